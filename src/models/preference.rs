//! # زبان، جهت متن و تم
//!
//! مقادیری که کاربر انتخاب میکنه و بین نشست‌ها ذخیره میشن.
//!
//! زبان پیش‌فرض همیشه فارسی (`fa`) هست و انگلیسی (`en`) زبان override.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::Preference;

// =====================================
// Language
// =====================================
/// زبان‌های پشتیبانی شده
///
/// # مثال
/// ```rust
/// use portfolio_cms::models::Language;
///
/// let lang: Language = "en".parse().unwrap();
/// assert!(!lang.is_rtl());
/// assert_eq!(lang.toggled(), Language::Fa);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// فارسی - زبان پیش‌فرض محتوا
    #[default]
    Fa,

    /// انگلیسی - زبان override
    En,
}

impl Language {
    /// همه زبان‌ها به ترتیب نمایش
    pub const ALL: [Language; 2] = [Language::Fa, Language::En];

    /// کد دو حرفی زبان
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Fa => "fa",
            Self::En => "en",
        }
    }

    /// نام زبان به خط خودش
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::Fa => "فارسی",
            Self::En => "English",
        }
    }

    /// جهت متن
    #[must_use]
    pub const fn direction(self) -> TextDirection {
        match self {
            Self::Fa => TextDirection::Rtl,
            Self::En => TextDirection::Ltr,
        }
    }

    /// آیا راست به چپ هست؟
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self.direction(), TextDirection::Rtl)
    }

    /// آیا زبان پیش‌فرض محتوا هست؟
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Fa)
    }

    /// زبان مقابل
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Fa => Self::En,
            Self::En => Self::Fa,
        }
    }

    /// parse کردن کد زبان
    ///
    /// فقط `fa` و `en` قبول میشن؛ بقیه `None`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "fa" => Some(Self::Fa),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    /// alias مجموعه پست‌ها در کوئری GraphQL
    #[must_use]
    pub const fn posts_alias(self) -> &'static str {
        match self {
            Self::Fa => "FaPost",
            Self::En => "EnPost",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| AppError::UnsupportedLanguage(s.to_string()))
    }
}

impl Preference for Language {
    const KEY: &'static str = "selectedLanguage";

    fn code(&self) -> &'static str {
        Language::code(*self)
    }

    fn parse(code: &str) -> Option<Self> {
        Self::from_code(code)
    }

    fn toggled(self) -> Self {
        Language::toggled(self)
    }
}

// =====================================
// Text Direction
// =====================================
/// جهت متن سند
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    /// راست به چپ
    Rtl,
    /// چپ به راست
    Ltr,
}

impl TextDirection {
    /// مقدار attribute `dir`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rtl => "rtl",
            Self::Ltr => "ltr",
        }
    }

    /// کلاس CSS جهت‌دار که روی body گذاشته میشه
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =====================================
// Theme
// =====================================
/// تم رنگی
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// روشن
    #[default]
    Light,
    /// تیره
    Dark,
}

impl Theme {
    /// کد تم
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// آیا تم تیره فعاله؟
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Theme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as Preference>::parse(s)
            .ok_or_else(|| AppError::BadRequest(format!("Unsupported theme: '{s}'")))
    }
}

impl Preference for Theme {
    const KEY: &'static str = "theme";

    fn code(&self) -> &'static str {
        Theme::code(*self)
    }

    fn parse(code: &str) -> Option<Self> {
        match code {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_language_is_farsi() {
        assert_eq!(Language::default(), Language::Fa);
        assert!(Language::default().is_rtl());
    }

    #[test]
    fn test_direction() {
        assert_eq!(Language::Fa.direction(), TextDirection::Rtl);
        assert_eq!(Language::En.direction(), TextDirection::Ltr);
        assert_eq!(Language::En.direction().css_class(), "ltr");
    }

    #[test]
    fn test_parse_only_supported_codes() {
        assert_eq!("fa".parse::<Language>().ok(), Some(Language::Fa));
        assert_eq!("en".parse::<Language>().ok(), Some(Language::En));
        assert!(matches!(
            "xx".parse::<Language>(),
            Err(AppError::UnsupportedLanguage(_))
        ));
        assert!("EN".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        for lang in Language::ALL {
            assert_eq!(lang.toggled().toggled(), lang);
        }
    }

    #[test]
    fn test_serde_codes() {
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
        assert_eq!(serde_json::to_string(&TextDirection::Rtl).unwrap(), "\"rtl\"");
        assert_eq!(serde_json::from_str::<Theme>("\"dark\"").unwrap(), Theme::Dark);
    }

    #[test]
    fn test_theme_preference() {
        assert_eq!(<Theme as Preference>::parse("dark"), Some(Theme::Dark));
        assert_eq!(<Theme as Preference>::parse("blue"), None);
        assert_eq!(Preference::toggled(Theme::Light), Theme::Dark);
        assert!("blue".parse::<Theme>().is_err());
    }
}
