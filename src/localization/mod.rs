//! # ماژول بومی‌سازی محتوا (Content Localization)
//!
//! قانون انتخاب مقدار یک فیلد دوزبانه، در یک جا.
//!
//! ## قرارداد نام‌گذاری
//!
//! هر فیلد قابل ترجمه `F` در رکورد CMS مقدار فارسی (زبان پیش‌فرض) رو نگه میداره،
//! و فیلد همزادش `enF` (پیشوند `en` + حرف اول بزرگ) مقدار انگلیسی رو:
//!
//! ```text
//! { "title": "سلام", "enTitle": "Hello" }
//! ```
//!
//! - زبان `fa`: همیشه `record[F]`
//! - زبان `en`: اگه `record[enF]` هست و خالی نیست همون، وگرنه `record[F]`
//!
//! شکل مقدار (رشته، آبجکت، آرایه) تغییر نمیکنه؛ فقط انتخاب میشه کدوم همزاد خونده بشه.
//!
//! ## لایه‌ها
//! - [`resolve`]: تابع pure اصلی روی یک رکورد
//! - [`localize_record`]: اعمال بازگشتی روی کل رکورد (برای بدنه صفحات)
//! - [`ContentRecord`]: adapter برای پیمایش رکوردهای تو در توی اختیاری
//! - [`Localized`]: wrapper تایپ‌دار برای مدل‌های تایپ‌دار

mod record;

pub use record::{ContentRecord, Localized};

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::models::Language;

/// پیشوند فیلدهای override انگلیسی
pub const OVERRIDE_PREFIX: &str = "en";

// =====================================
// Naming Convention
// =====================================
/// نام فیلد override برای یک فیلد پایه
///
/// # مثال
/// ```rust
/// use portfolio_cms::localization::override_key;
///
/// assert_eq!(override_key("title"), "enTitle");
/// assert_eq!(override_key("map"), "enMap");
/// ```
#[must_use]
pub fn override_key(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => format!("{OVERRIDE_PREFIX}{}{}", first.to_uppercase(), chars.as_str()),
        None => OVERRIDE_PREFIX.to_string(),
    }
}

/// نام فیلد پایه برای یک کلید override، فقط اگه رفت و برگشت یکی باشه
///
/// `enTitle` -> `title`. کلیدهایی مثل `enabled` (بعد از `en` حرف کوچیک)
/// override نیستن.
#[must_use]
pub fn base_key(key: &str) -> Option<String> {
    let rest = key.strip_prefix(OVERRIDE_PREFIX)?;
    let mut chars = rest.chars();
    let first = chars.next()?;

    if !first.is_uppercase() {
        return None;
    }

    let base = format!("{}{}", first.to_lowercase(), chars.as_str());
    (override_key(&base) == key).then_some(base)
}

/// آیا مقدار خالی حساب میشه؟
///
/// `null`، رشته خالی، آرایه خالی و آبجکت خالی. عدد و boolean هیچوقت خالی نیستن.
#[must_use]
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

// =====================================
// Resolver
// =====================================
/// انتخاب مقدار نمایشی یک فیلد برای زبان داده شده
///
/// `None` یعنی رکورد هیچ مقداری برای این فیلد نداره.
///
/// # مثال
/// ```rust
/// use portfolio_cms::{localization::resolve, models::Language};
/// use serde_json::json;
///
/// let record = json!({ "title": "سلام", "enTitle": "Hello" });
/// assert_eq!(resolve(&record, "title", Language::En), Some(&json!("Hello")));
/// assert_eq!(resolve(&record, "title", Language::Fa), Some(&json!("سلام")));
/// ```
#[must_use]
pub fn resolve<'a>(record: &'a Value, field: &str, language: Language) -> Option<&'a Value> {
    let default = record.get(field);

    if language.is_default() {
        return default;
    }

    record
        .get(override_key(field).as_str())
        .filter(|value| !is_blank(value))
        .or(default)
}

/// مثل [`resolve`] ولی روی رکورد اختیاری، با مقدار پیش‌فرض
///
/// رکورد غایب (مثلا relation پر نشده) یا فیلد `null` مقدار `default` رو برمیگردونه.
#[must_use]
pub fn resolve_or(
    record: Option<&Value>,
    field: &str,
    language: Language,
    default: Value,
) -> Value {
    record
        .and_then(|r| resolve(r, field, language))
        .filter(|value| !value.is_null())
        .cloned()
        .unwrap_or(default)
}

/// بومی‌سازی کل رکورد به صورت بازگشتی
///
/// در هر سطح آبجکت:
/// - هر فیلد پایه با مقدار resolve شده‌اش جایگزین میشه
/// - کلیدی که `override_key` یکی از کلیدهای موجوده (همزاد) از خروجی حذف میشه
/// - `enF` بدون فیلد پایه با نام `F` میاد: در `en` مقدار خودش، در `fa` `null`
///
/// مجموعه کلیدهای خروجی در هر دو زبان یکیه.
///
/// # مثال
/// ```rust
/// use portfolio_cms::{localization::localize_record, models::Language};
/// use serde_json::json;
///
/// let record = json!({ "intro": { "title": "سلام", "enTitle": "Hello" } });
/// assert_eq!(
///     localize_record(&record, Language::En),
///     json!({ "intro": { "title": "Hello" } })
/// );
/// ```
#[must_use]
pub fn localize_record(record: &Value, language: Language) -> Value {
    match record {
        Value::Object(map) => Value::Object(localize_object(map, language)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| localize_record(item, language))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

/// نقش هر کلید در یک سطح آبجکت
enum KeyRole<'a> {
    /// فیلد معمولی؛ همزادش (اگه باشه) این کلیده
    Field(Option<&'a Value>),
    /// همزاد یک فیلد موجود
    Companion,
    /// `enF` بدون `F`؛ با نام پایه منتشر میشه
    Orphan(String),
}

fn key_role<'a>(
    key: &str,
    map: &'a Map<String, Value>,
    overrides: &HashSet<String>,
) -> KeyRole<'a> {
    if overrides.contains(key) {
        return KeyRole::Companion;
    }

    let own_override = override_key(key);
    if let Some(value) = map.get(own_override.as_str()) {
        return KeyRole::Field(Some(value));
    }

    match base_key(key) {
        // نام پایه نباید با کلید موجود یا همزاد یک کلید موجود یکی بشه
        Some(base)
            if !map.contains_key(base.as_str())
                && !map.keys().any(|other| override_key(other) == base) =>
        {
            KeyRole::Orphan(base)
        }
        _ => KeyRole::Field(None),
    }
}

fn localize_object(map: &Map<String, Value>, language: Language) -> Map<String, Value> {
    let overrides: HashSet<String> = map
        .keys()
        .map(|key| override_key(key))
        .filter(|candidate| map.contains_key(candidate.as_str()))
        .collect();

    let mut localized = Map::new();

    for (key, value) in map {
        match key_role(key, map, &overrides) {
            KeyRole::Companion => {}
            KeyRole::Field(companion) => {
                let chosen = match companion {
                    Some(english) if !language.is_default() && !is_blank(english) => english,
                    _ => value,
                };
                localized.insert(key.clone(), localize_record(chosen, language));
            }
            KeyRole::Orphan(base) => {
                let resolved = if language.is_default() {
                    Value::Null
                } else {
                    localize_record(value, language)
                };
                localized.insert(base, resolved);
            }
        }
    }

    localized
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_override_key() {
        assert_eq!(override_key("title"), "enTitle");
        assert_eq!(override_key("subtitle"), "enSubtitle");
        assert_eq!(override_key("desc"), "enDesc");
        assert_eq!(override_key(""), "en");
    }

    #[test]
    fn test_base_key() {
        assert_eq!(base_key("enTitle").as_deref(), Some("title"));
        assert_eq!(base_key("enLink").as_deref(), Some("link"));
        assert_eq!(base_key("enabled"), None);
        assert_eq!(base_key("en"), None);
        assert_eq!(base_key("title"), None);
        // `enTitle` همزاد `title` هست نه `Title`
        assert_eq!(override_key("Title"), "enTitle");
        assert_eq!(base_key("en_title"), None);
    }

    #[test]
    fn test_english_override_wins() {
        let record = json!({ "title": "سلام", "enTitle": "Hello" });
        assert_eq!(resolve(&record, "title", Language::En), Some(&json!("Hello")));
    }

    #[test]
    fn test_farsi_ignores_override() {
        let record = json!({ "title": "سلام", "enTitle": "Hello" });
        assert_eq!(resolve(&record, "title", Language::Fa), Some(&json!("سلام")));
    }

    #[test]
    fn test_missing_override_falls_back() {
        let record = json!({ "title": "سلام" });
        assert_eq!(resolve(&record, "title", Language::En), Some(&json!("سلام")));
    }

    #[test]
    fn test_blank_override_falls_back() {
        for blank in [json!(""), json!(null), json!([]), json!({})] {
            let record = json!({ "title": "سلام", "enTitle": blank });
            assert_eq!(resolve(&record, "title", Language::En), Some(&json!("سلام")));
        }
    }

    #[test]
    fn test_shape_is_preserved() {
        let record = json!({
            "link": { "title": "لینک", "url": "/fa" },
            "enLink": { "title": "Link", "url": "/en" },
            "items": [1, 2],
        });

        assert_eq!(
            resolve(&record, "link", Language::En),
            Some(&json!({ "title": "Link", "url": "/en" }))
        );
        assert_eq!(resolve(&record, "items", Language::En), Some(&json!([1, 2])));
    }

    #[test]
    fn test_resolve_or_absent_record() {
        assert_eq!(resolve_or(None, "title", Language::En, json!("")), json!(""));

        let record = json!({ "title": null });
        assert_eq!(
            resolve_or(Some(&record), "title", Language::Fa, json!("-")),
            json!("-")
        );
    }

    #[test]
    fn test_localize_record_nested() {
        let record = json!({
            "intro": {
                "title": "سلام",
                "enTitle": "Hello",
                "subtitle": "زیرعنوان",
                "items": [
                    { "title": "یک", "enTitle": "One" },
                    { "title": "دو" }
                ]
            },
            "email": "me@example.com"
        });

        assert_eq!(
            localize_record(&record, Language::En),
            json!({
                "intro": {
                    "title": "Hello",
                    "subtitle": "زیرعنوان",
                    "items": [{ "title": "One" }, { "title": "دو" }]
                },
                "email": "me@example.com"
            })
        );

        assert_eq!(
            localize_record(&record, Language::Fa),
            json!({
                "intro": {
                    "title": "سلام",
                    "subtitle": "زیرعنوان",
                    "items": [{ "title": "یک" }, { "title": "دو" }]
                },
                "email": "me@example.com"
            })
        );
    }

    #[test]
    fn test_localize_record_orphan_override() {
        let record = json!({ "enAddress": "Tehran", "enabled": true });

        assert_eq!(
            localize_record(&record, Language::En),
            json!({ "address": "Tehran", "enabled": true })
        );
        assert_eq!(
            localize_record(&record, Language::Fa),
            json!({ "address": null, "enabled": true })
        );
    }

    #[test]
    fn test_localize_record_capitalized_field() {
        let record = json!({ "Title": "سلام", "enTitle": "Hello" });

        assert_eq!(localize_record(&record, Language::En), json!({ "Title": "Hello" }));
        assert_eq!(localize_record(&record, Language::Fa), json!({ "Title": "سلام" }));
    }

    #[test]
    fn test_localize_record_non_letter_field() {
        let record = json!({ "_title": "سلام", "en_title": "Hello" });

        assert_eq!(localize_record(&record, Language::En), json!({ "_title": "Hello" }));
        assert_eq!(localize_record(&record, Language::Fa), json!({ "_title": "سلام" }));
    }

    #[test]
    fn test_orphan_never_shadows_companion() {
        // `enEnTitle` بدون `enTitle`؛ نام پایه‌اش همزاد `title` میشد
        let record = json!({ "title": "سلام", "enEnTitle": "x" });

        let en = localize_record(&record, Language::En);
        assert_eq!(en, json!({ "title": "سلام", "enEnTitle": "x" }));
        assert_eq!(localize_record(&record, Language::Fa), en);
    }
}
