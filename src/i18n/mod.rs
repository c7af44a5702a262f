//! # ماژول پیام‌های رابط کاربری (UI Messages)
//!
//! متن‌های ثابت رابط (پیام خطای بخش‌ها، صفحه‌بندی، صفحه ۴۰۴) برای هر زبان.
//! محتوای CMS اینجا نیست؛ اون با [`crate::localization`] انتخاب میشه.
//!
//! ## مفاهیم:
//! - کاتالوگ هر زبان یک فایل JSON تو در تو در `locales/<code>/translation.json`
//! - `include_str!`: فایل‌ها موقع کامپایل داخل باینری قرار میگیرن
//! - `Lazy`: کاتالوگ یک بار parse و به کلیدهای نقطه‌دار (`posts.errorLoading`) تخت میشه
//! - کلید ناموجود اول در فارسی (زبان پیش‌فرض) و بعد خود کلید برمیگرده
//!
//! ## مثال
//! ```rust
//! use portfolio_cms::{i18n::{keys, t}, models::Language};
//!
//! assert_eq!(t(Language::En, keys::PAGINATION_NEXT), "Next");
//! assert_eq!(t(Language::Fa, keys::PAGINATION_NEXT), "بعدی");
//! ```

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::error;

use crate::models::Language;

/// کلیدهای پیام
pub mod keys {
    pub const COMMON_LOADING: &str = "common.loading";
    pub const COMMON_ALL: &str = "common.all";
    pub const COMMON_ERROR: &str = "common.error";
    pub const COMMON_ROUTE_NOT_FOUND: &str = "common.routeNotFound";

    pub const PAGINATION_NEXT: &str = "pagination.next";
    pub const PAGINATION_PREVIOUS: &str = "pagination.previous";

    pub const HEADER_ERROR: &str = "header.errorLoading";
    pub const HOME_ERROR: &str = "home.errorLoading";
    pub const ABOUT_ERROR: &str = "about.errorLoading";
    pub const CONTACT_ERROR: &str = "contact.errorLoading";
    pub const POSTS_ERROR: &str = "posts.errorLoading";

    pub const PROJECTS_VIEW: &str = "projects.viewProject";
    pub const PROJECTS_ERROR: &str = "projects.errorLoading";
    pub const PROJECTS_NOT_FOUND: &str = "projects.notFound";

    pub const NOT_FOUND_TITLE: &str = "notFound.title";
    pub const NOT_FOUND_DESCRIPTION: &str = "notFound.description";
    pub const NOT_FOUND_GO_HOME: &str = "notFound.goHome";
    pub const NOT_FOUND_VIEW_PROJECTS: &str = "notFound.viewProjects";
}

/// کاتالوگ تخت یک زبان
pub type Catalog = BTreeMap<String, String>;

static EN: Lazy<Catalog> =
    Lazy::new(|| load("en", include_str!("../../locales/en/translation.json")));

static FA: Lazy<Catalog> =
    Lazy::new(|| load("fa", include_str!("../../locales/fa/translation.json")));

/// parse و تخت کردن یک فایل ترجمه
///
/// فایل خراب فقط لاگ میشه؛ کلیدها به fallback میرسن.
fn load(code: &str, raw: &str) -> Catalog {
    match serde_json::from_str::<Value>(raw) {
        Ok(tree) => {
            let mut catalog = Catalog::new();
            flatten("", &tree, &mut catalog);
            catalog
        }
        Err(e) => {
            error!(language = code, error = %e, "Translation file is invalid");
            Catalog::new()
        }
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut Catalog) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
        }
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}

/// کاتالوگ کامل یک زبان
#[must_use]
pub fn catalog(language: Language) -> &'static Catalog {
    match language {
        Language::En => &EN,
        Language::Fa => &FA,
    }
}

/// ترجمه یک کلید
///
/// ترتیب fallback: زبان خواسته شده، فارسی، خود کلید.
#[must_use]
pub fn t(language: Language, key: &str) -> String {
    catalog(language)
        .get(key)
        .or_else(|| catalog(Language::default()).get(key))
        .cloned()
        .unwrap_or_else(|| key.to_string())
}

/// ترجمه با جایگذاری `{{name}}`
///
/// # مثال
/// ```rust
/// use portfolio_cms::{i18n::{keys, t_with}, models::Language};
///
/// let message = t_with(Language::En, keys::PROJECTS_NOT_FOUND, &[("slug", "en-demo")]);
/// assert_eq!(message, "Project 'en-demo' not found");
/// ```
#[must_use]
pub fn t_with(language: Language, key: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(t(language, key), |text, (name, value)| {
        text.replace(&format!("{{{{{name}}}}}"), value)
    })
}

// =====================================
// Dates
// =====================================
const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// تاریخ نمایشی برای زبان
///
/// - `fa`: تقویم جلالی با ارقام فارسی (`۱۴۰۳/۲/۱۲`)
/// - `en`: فرمت آمریکایی (`5/1/2024`)
///
/// # مثال
/// ```rust
/// use chrono::NaiveDate;
/// use portfolio_cms::{i18n::format_date, models::Language};
///
/// let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// assert_eq!(format_date(date, Language::En), "5/1/2024");
/// assert_eq!(format_date(date, Language::Fa), "۱۴۰۳/۲/۱۲");
/// ```
#[must_use]
pub fn format_date(date: NaiveDate, language: Language) -> String {
    match language {
        Language::En => format!("{}/{}/{}", date.month(), date.day(), date.year()),
        Language::Fa => {
            let (year, month, day) = to_jalali(date);
            persian_digits(&format!("{year}/{month}/{day}"))
        }
    }
}

/// تبدیل میلادی به جلالی (سال، ماه، روز)
#[must_use]
pub fn to_jalali(date: NaiveDate) -> (i64, u32, u32) {
    const MONTH_OFFSETS: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

    let gy = i64::from(date.year());
    let gm = date.month() as usize;
    let gd = i64::from(date.day());

    let gy2 = if gm > 2 { gy + 1 } else { gy };
    let mut days = 355_666 + 365 * gy + (gy2 + 3) / 4 - (gy2 + 99) / 100 + (gy2 + 399) / 400
        + gd
        + MONTH_OFFSETS[gm - 1];

    let mut jy = -1595 + 33 * (days / 12_053);
    days %= 12_053;
    jy += 4 * (days / 1461);
    days %= 1461;
    if days > 365 {
        jy += (days - 1) / 365;
        days = (days - 1) % 365;
    }

    let (jm, jd) = if days < 186 {
        (1 + days / 31, 1 + days % 31)
    } else {
        (7 + (days - 186) / 30, 1 + (days - 186) % 30)
    };

    (jy, jm as u32, jd as u32)
}

fn persian_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => PERSIAN_DIGITS[d as usize],
            None => c,
        })
        .collect()
}
