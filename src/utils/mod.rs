//! # ماژول توابع کمکی (Utilities)
//!
//! این ماژول توابع و ثابت‌های کمکی رو ارائه میده.
//!
//! ## مفاهیم Rust:
//! - **static**: متغیرهای با عمر 'static
//! - **once_cell**: مقداردهی اولیه تنبل
//! - **Regex**: عبارات منظم

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// =====================================
// Constants
// =====================================
/// حداکثر طول URL
pub const MAX_URL_LENGTH: usize = 2048;

/// نشانه کوتاه شدن متن
pub const ELLIPSIS: &str = "...";

// =====================================
// Lazy Statics (Regex patterns)
// =====================================
/// تگ‌های بلوکی که جاشون فاصله میذاریم
///
/// # مفاهیم:
/// - `Lazy`: مقداردهی اولیه در اولین استفاده
/// - این بهینه‌تر از ساخت Regex هر بار هست
static BLOCK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</?(p|br|div|li|ul|ol|h[1-6]|tr|td|th|section|article|blockquote)\b[^>]*>")
        .expect("Invalid regex pattern")
});

/// هر تگ HTML دیگه
static ANY_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>").expect("Invalid regex pattern")
});

/// entity‌های عددی (`&#8217;` و `&#x2019;`)
static NUMERIC_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("Invalid regex pattern")
});

// =====================================
// URL Functions
// =====================================
/// اعتبارسنجی URL
///
/// # مفاهیم:
/// - استفاده از کتابخانه url برای parsing
/// - Pattern matching روی Result
#[must_use]
pub fn is_valid_url(url_str: &str) -> bool {
    if url_str.len() > MAX_URL_LENGTH {
        return false;
    }

    match url::Url::parse(url_str) {
        Ok(url) => {
            // فقط http و https مجازه
            let scheme = url.scheme();
            scheme == "http" || scheme == "https"
        }
        Err(_) => false,
    }
}

/// تبدیل لینک CMS به مسیر داخلی سایت
///
/// - مسیر نسبی (`/about`) همونطور برمیگرده
/// - آدرس کامل روی host CMS به مسیر تبدیل میشه (با query و fragment)
/// - بقیه (لینک بیرونی، `#`، `mailto:`) `None`
///
/// # مثال
/// ```rust
/// use portfolio_cms::utils::to_route_path;
///
/// let host = Some("cms.example.com");
/// assert_eq!(to_route_path("https://cms.example.com/projects/?p=2", host).as_deref(), Some("/projects/?p=2"));
/// assert_eq!(to_route_path("https://github.com/me", host), None);
/// ```
#[must_use]
pub fn to_route_path(link: &str, cms_host: Option<&str>) -> Option<String> {
    if link.starts_with('/') && !link.starts_with("//") {
        return Some(link.to_string());
    }

    let parsed = url::Url::parse(link).ok()?;
    let host = parsed.host_str()?;

    if !cms_host.is_some_and(|cms| cms.eq_ignore_ascii_case(host)) {
        return None;
    }

    let mut path = parsed.path().to_string();
    if let Some(query) = parsed.query() {
        path.push('?');
        path.push_str(query);
    }
    if let Some(fragment) = parsed.fragment() {
        path.push('#');
        path.push_str(fragment);
    }
    Some(path)
}

// =====================================
// String Utilities
// =====================================
/// خلاصه کردن متن طولانی
///
/// # مفاهیم:
/// - Unicode-aware: طول بر اساس کاراکتر، نه بایت (متن فارسی دو بایتیه)
/// - خروجی هیچوقت از `max_chars` کاراکتر بلندتر نیست
///
/// # مثال
/// ```rust
/// use portfolio_cms::utils::truncate;
///
/// assert_eq!(truncate("Hello, World!", 8), "Hello...");
/// assert_eq!(truncate("سلام دنیا", 20), "سلام دنیا");
/// ```
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    // جا برای "..." نیست: فقط برش
    if max_chars <= ELLIPSIS.len() {
        return text.chars().take(max_chars).collect();
    }

    let keep = max_chars - ELLIPSIS.len();
    let truncated: String = text.chars().take(keep).collect();

    format!("{}{ELLIPSIS}", truncated.trim_end())
}

/// تمیز کردن whitespace‌های اضافی
#[must_use]
pub fn clean_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// حذف تگ‌های HTML و تبدیل به متن ساده
///
/// تگ‌های بلوکی به فاصله تبدیل میشن، بقیه حذف. entity‌های رایج وردپرس
/// decode میشن.
///
/// # مثال
/// ```rust
/// use portfolio_cms::utils::strip_html;
///
/// assert_eq!(strip_html("<p>Hello <b>World</b></p><p>Again&nbsp;&amp; again</p>"), "Hello World Again & again");
/// ```
#[must_use]
pub fn strip_html(html: &str) -> String {
    let text = BLOCK_TAG.replace_all(html, " ");
    let text = ANY_TAG.replace_all(&text, "");
    clean_whitespace(&decode_entities(&text))
}

/// decode کردن entity‌های HTML
#[must_use]
pub fn decode_entities(text: &str) -> String {
    let named = text
        .replace("&nbsp;", " ")
        .replace("&hellip;", "…")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">");

    let numeric = NUMERIC_ENTITY.replace_all(&named, |caps: &Captures<'_>| {
        let code = &caps[1];
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        value
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    // آخر از همه، تا `&amp;lt;` دوبار decode نشه
    numeric.replace("&amp;", "&")
}
