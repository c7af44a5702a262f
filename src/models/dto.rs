//! # Data Transfer Objects (DTOs)
//!
//! DTO‌هایی که در API استفاده میشن
//!
//! ## مفاهیم:
//! - DTO: برای انتقال داده بین لایه‌ها
//! - Request/Response separation: جداسازی ورودی از خروجی
//! - Envelope: هر صفحه زبان، جهت متن و تم جاری رو همراه محتوا برمیگردونه

use axum::{
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::{HeaderView, Language, PostView, TextDirection, Theme};
use crate::{error::AppError, i18n};

/// هدر جهت متن در پاسخ صفحات
pub const TEXT_DIRECTION_HEADER: &str = "x-text-direction";

// =====================================
// Generic API Responses
// =====================================
/// پاسخ موفق عمومی
///
/// # مفاهیم:
/// - Generic: کار با هر نوع داده
/// - `T: Serialize`: T باید قابل تبدیل به JSON باشه
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// ساخت پاسخ موفق
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    /// اضافه کردن پیام
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

// =====================================
// Health Check
// =====================================
/// پاسخ health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: bool,
    pub language: Language,
}

impl HealthResponse {
    /// ساخت پاسخ؛ اگه ذخیره‌سازی در دسترس نباشه `degraded`
    #[must_use]
    pub fn new(database_ok: bool, language: Language) -> Self {
        Self {
            status: if database_ok { "healthy" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: database_ok,
            language,
        }
    }
}

// =====================================
// Page Sections
// =====================================
/// یک بخش صفحه: یا آماده یا پیام خطا
///
/// خطای یک بخش کل صفحه رو خراب نمیکنه. `message` به زبان صفحه هست و
/// `detail` متن خطای اصلی.
///
/// ```json
/// { "status": "ready", "data": { ... } }
/// { "status": "error", "message": "Error loading contact page", "detail": "Contact data structure is incorrect" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Section<T> {
    Ready {
        data: T,
    },
    Error {
        message: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
}

impl<T> Section<T> {
    /// تبدیل نتیجه fetch به بخش صفحه
    ///
    /// خطا با `warn!` لاگ میشه و به پیام کلید `message_key` در زبان صفحه تبدیل میشه.
    pub fn from_result(
        result: Result<T, AppError>,
        message_key: &str,
        language: Language,
    ) -> Self {
        match result {
            Ok(data) => Self::Ready { data },
            Err(e) => {
                tracing::warn!(section = message_key, error = %e, "Section failed to load");
                Self::Error {
                    message: i18n::t(language, message_key),
                    detail: Some(e.to_string()),
                }
            }
        }
    }

    /// آیا بخش آماده هست؟
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// داده بخش آماده
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready { data } => Some(data),
            Self::Error { .. } => None,
        }
    }
}

/// پاسخ کامل یک صفحه
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub lang: Language,
    pub dir: TextDirection,
    pub dir_class: String,
    pub theme: Theme,
    pub header: Section<HeaderView>,
    pub content: T,
}

impl<T> PageResponse<T> {
    /// ساخت envelope صفحه
    pub fn new(language: Language, theme: Theme, header: Section<HeaderView>, content: T) -> Self {
        let dir = language.direction();
        Self {
            lang: language,
            dir,
            dir_class: dir.css_class().to_string(),
            theme,
            header,
            content,
        }
    }
}

impl<T: Serialize> IntoResponse for PageResponse<T> {
    fn into_response(self) -> Response {
        let lang = HeaderValue::from_static(self.lang.code());
        let dir = HeaderValue::from_static(self.dir.as_str());

        let mut response = Json(self).into_response();
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_LANGUAGE, lang);
        headers.insert(HeaderName::from_static(TEXT_DIRECTION_HEADER), dir);
        response
    }
}

/// محتوای صفحه اصلی
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeContent {
    /// `homeFields` بومی‌سازی شده
    pub intro: Section<Value>,
    pub featured_projects: Section<Vec<PostView>>,
}

// =====================================
// Projects
// =====================================
/// فیلتر زبان لیست پروژه‌ها
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectFilter {
    /// هر دو زبان، جدیدترین اول
    #[default]
    All,
    En,
    Fa,
}

impl ProjectFilter {
    /// زبان فیلتر؛ `All` یعنی بدون فیلتر
    #[must_use]
    pub fn language(self) -> Option<Language> {
        match self {
            Self::All => None,
            Self::En => Some(Language::En),
            Self::Fa => Some(Language::Fa),
        }
    }
}

/// پارامترهای query لیست پروژه‌ها
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectsQuery {
    #[serde(default)]
    pub page: Option<u32>,

    #[serde(default)]
    pub per_page: Option<u32>,

    #[serde(default)]
    pub filter: ProjectFilter,
}

// =====================================
// Preferences
// =====================================
/// وضعیت زبان
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageResponse {
    pub code: Language,
    pub name: String,
    pub dir: TextDirection,
    pub is_rtl: bool,
    pub supported: Vec<Language>,
}

impl From<Language> for LanguageResponse {
    fn from(language: Language) -> Self {
        Self {
            code: language,
            name: language.native_name().to_string(),
            dir: language.direction(),
            is_rtl: language.is_rtl(),
            supported: Language::ALL.to_vec(),
        }
    }
}

/// وضعیت تم
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub theme: Theme,
    pub is_dark: bool,
}

impl From<Theme> for ThemeResponse {
    fn from(theme: Theme) -> Self {
        Self {
            theme,
            is_dark: theme.is_dark(),
        }
    }
}

/// درخواست تغییر زبان
///
/// کد به صورت رشته خونده میشه تا کد نامعتبر `400` با لیست زبان‌ها بده،
/// نه خطای deserialize.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetLanguageRequest {
    #[validate(length(min = 2, max = 2, message = "Language code must be two letters"))]
    pub code: String,
}

/// درخواست تغییر تم
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetThemeRequest {
    #[validate(length(min = 1, max = 16))]
    pub theme: String,
}
