//! # Adapter‌های رکورد
//!
//! [`ContentRecord`] برای ساخت مدل‌های تایپ‌دار از رکورد خام CMS،
//! و [`Localized`] برای نگه داشتن هر دو نسخه یک مقدار.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{is_blank, override_key, resolve};
use crate::models::Language;

// =====================================
// Localized<T>
// =====================================
/// مقدار دوزبانه تایپ‌دار
///
/// قرارداد `en` + حرف اول بزرگ فقط در [`Localized::from_record`] اعمال میشه؛
/// بقیه کد فقط با `get(language)` کار داره.
///
/// # مثال
/// ```rust
/// use portfolio_cms::{localization::Localized, models::Language};
///
/// let title = Localized::new("سلام".to_string()).with_english("Hello".to_string());
/// assert_eq!(title.get(Language::En), "Hello");
/// assert_eq!(title.get(Language::Fa), "سلام");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized<T> {
    default: T,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    english: Option<T>,
}

impl<T> Localized<T> {
    /// ساخت با مقدار زبان پیش‌فرض
    pub fn new(default: T) -> Self {
        Self {
            default,
            english: None,
        }
    }

    /// اضافه کردن ترجمه انگلیسی
    #[must_use]
    pub fn with_english(mut self, english: T) -> Self {
        self.english = Some(english);
        self
    }

    /// مقدار برای زبان داده شده
    pub fn get(&self, language: Language) -> &T {
        match language {
            Language::Fa => &self.default,
            Language::En => self.english.as_ref().unwrap_or(&self.default),
        }
    }

    /// گرفتن ownership مقدار resolve شده
    pub fn into_resolved(self, language: Language) -> T {
        match language {
            Language::Fa => self.default,
            Language::En => self.english.unwrap_or(self.default),
        }
    }

    /// آیا ترجمه انگلیسی داره؟
    pub fn has_translation(&self) -> bool {
        self.english.is_some()
    }
}

impl<T: DeserializeOwned> Localized<T> {
    /// خوندن هر دو نسخه یک فیلد از رکورد
    ///
    /// اگه فیلد پایه نباشه یا `null` باشه `None`. override خالی یا با نوع
    /// ناسازگار نادیده گرفته میشه.
    pub fn from_record(record: &Value, field: &str) -> Option<Self> {
        let default = record
            .get(field)
            .filter(|v| !v.is_null())
            .and_then(|v| T::deserialize(v).ok())?;

        let english = record
            .get(override_key(field).as_str())
            .filter(|v| !is_blank(v))
            .and_then(|v| T::deserialize(v).ok());

        Some(Self { default, english })
    }
}

// =====================================
// ContentRecord
// =====================================
/// نمای یک رکورد (یا زیررکورد) برای یک زبان مشخص
///
/// # مفاهیم:
/// - `Copy`: فقط یک reference و یک enum کوچیک داخلشه
/// - Lifetime `'a`: مقدارهای برگشتی به رکورد اصلی اشاره میکنن، کپی نمیشن
///
/// رکورد غایب خطا نیست: همه متدها مقدار پیش‌فرض برمیگردونن.
///
/// # مثال
/// ```rust
/// use portfolio_cms::{localization::ContentRecord, models::Language};
/// use serde_json::json;
///
/// let data = json!({ "info": { "address": "تهران", "enAddress": "Tehran" } });
/// let record = ContentRecord::new(Some(&data), Language::En);
///
/// assert_eq!(record.child("info").text("address"), "Tehran");
/// assert_eq!(record.child("missing").text("address"), "");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ContentRecord<'a> {
    value: Option<&'a Value>,
    language: Language,
}

impl<'a> ContentRecord<'a> {
    /// ساخت نما روی رکورد اختیاری
    #[must_use]
    pub fn new(value: Option<&'a Value>, language: Language) -> Self {
        Self {
            value: value.filter(|v| !v.is_null()),
            language,
        }
    }

    /// زبان این نما
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// مقدار خام رکورد
    #[must_use]
    pub fn value(&self) -> Option<&'a Value> {
        self.value
    }

    /// آیا رکورد وجود داره؟
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// زیررکورد بدون بومی‌سازی (مثلا `page.contact`)
    #[must_use]
    pub fn child(&self, key: &str) -> ContentRecord<'a> {
        Self::new(self.value.and_then(|v| v.get(key)), self.language)
    }

    /// زیررکورد بومی‌سازی شده (مثلا `link` / `enLink`)
    #[must_use]
    pub fn localized_child(&self, key: &str) -> ContentRecord<'a> {
        Self::new(self.resolved(key), self.language)
    }

    /// آیتم‌های یک آرایه بومی‌سازی شده
    #[must_use]
    pub fn items(&self, key: &str) -> Vec<ContentRecord<'a>> {
        match self.resolved(key) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| Self::new(Some(item), self.language))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// متن بومی‌سازی شده؛ نبودش یعنی رشته خالی
    #[must_use]
    pub fn text(&self, field: &str) -> String {
        value_to_text(self.resolved(field))
    }

    /// متن فیلد غیرقابل ترجمه (ایمیل، تلفن، آدرس تصویر)
    #[must_use]
    pub fn raw_text(&self, field: &str) -> String {
        value_to_text(self.value.and_then(|v| v.get(field)))
    }

    /// مقدار تایپ‌دار بومی‌سازی شده
    ///
    /// اگه نباشه یا با نوع `T` جور نباشه، `T::default()`.
    #[must_use]
    pub fn resolve<T: DeserializeOwned + Default>(&self, field: &str) -> T {
        self.resolved(field)
            .and_then(|v| T::deserialize(v).ok())
            .unwrap_or_default()
    }

    /// هر دو نسخه فیلد
    #[must_use]
    pub fn localized<T: DeserializeOwned>(&self, field: &str) -> Option<Localized<T>> {
        self.value.and_then(|v| Localized::from_record(v, field))
    }

    fn resolved(&self, field: &str) -> Option<&'a Value> {
        self.value
            .and_then(|v| resolve(v, field, self.language))
            .filter(|v| !v.is_null())
    }
}

fn value_to_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
