//! # ماژول مدیریت خطاها (Error Handling)
//!
//! این ماژول سیستم مدیریت خطای سرویس رو تعریف میکنه.
//!
//! ## دسته‌بندی خطاها
//!
//! دو نوع خطای اصلی از سمت محتوا داریم:
//! - **خطای شبکه/کوئری**: CMS در دسترس نیست یا GraphQL خطا برگردونده
//! - **خطای داده ناقص**: پاسخ اومده ولی فیلد تو در توی مورد انتظار نیست
//!
//! هیچکدوم retry نمیشن. در صفحات، این خطاها فقط همون بخش (section) رو
//! به یک پیام خطا تبدیل میکنن و کل پاسخ رو خراب نمیکنن.
//!
//! ## مفاهیم Rust:
//! - **thiserror**: derive macro برای Error trait
//! - **From Trait**: تبدیل خودکار نوع‌ها با `#[from]`
//! - **Result Type Alias**: alias برای ساده‌تر شدن کد

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::{i18n, models::Language};

// =====================================
// Result Type Alias
// =====================================
/// نوع Result سفارشی برنامه
///
/// به جای نوشتن `Result<Post, AppError>` میتونیم بنویسیم `Result<Post>`
pub type Result<T, E = AppError> = std::result::Result<T, E>;

// =====================================
// Custom Error Enum
// =====================================
/// خطای اصلی برنامه
///
/// # مفاهیم:
/// - `#[error("...")]`: پیام خطا برای هر نوع
/// - `#[from]`: تبدیل خودکار از نوع‌های دیگه
#[derive(Debug, Error)]
pub enum AppError {
    // ----------------------------------------
    // خطاهای کاربر (4xx)
    // ----------------------------------------

    /// درخواست نامعتبر - 400
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// کد زبان پشتیبانی نمیشه - 400
    #[error("Unsupported language code: '{0}'")]
    UnsupportedLanguage(String),

    /// پیدا نشد - 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// خطای اعتبارسنجی - 422
    #[error("Validation error: {0}")]
    Validation(String),

    // ----------------------------------------
    // خطاهای CMS (502)
    // ----------------------------------------

    /// CMS خطا برگردونده (HTTP غیر 2xx یا GraphQL errors)
    #[error("CMS error: {0}")]
    Cms(String),

    /// ساختار پاسخ CMS ناقصه
    #[error("{0}")]
    MissingData(String),

    /// خطای شبکه در ارتباط با CMS
    #[error("CMS request failed: {0}")]
    Http(#[from] reqwest::Error),

    // ----------------------------------------
    // خطاهای سرور (5xx)
    // ----------------------------------------

    /// خطای داخلی سرور - 500
    #[error("Internal server error: {0}")]
    Internal(String),

    /// خطای سرور
    #[error("Server error: {0}")]
    Server(String),

    /// خطای تنظیمات
    #[error("Configuration error: {0}")]
    Config(String),

    /// خطای دیتابیس
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// خطای migration
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// خطای IO
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// خطای JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// خطای URL
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl AppError {
    /// گرفتن HTTP status code متناسب با خطا
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 4xx Client Errors
            Self::BadRequest(_) | Self::UnsupportedLanguage(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,

            // خطاهای upstream
            Self::Cms(_) | Self::MissingData(_) | Self::Http(_) => StatusCode::BAD_GATEWAY,

            // 5xx Server Errors
            Self::Internal(_)
            | Self::Server(_)
            | Self::Config(_)
            | Self::Database(_)
            | Self::Migration(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::UrlParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// آیا این یه خطای سرور هست؟
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// آیا خطا از سمت CMS اومده؟
    ///
    /// این خطاها در صفحات به پیام inline تبدیل میشن.
    #[must_use]
    pub fn is_content_failure(&self) -> bool {
        matches!(self, Self::Cms(_) | Self::MissingData(_) | Self::Http(_))
    }

    /// خطای ساختار ناقص برای یک بخش از صفحه
    ///
    /// # مثال
    /// ```rust
    /// use portfolio_cms::AppError;
    ///
    /// let err = AppError::missing_section("Contact");
    /// assert_eq!(err.to_string(), "Contact data structure is incorrect");
    /// ```
    #[must_use]
    pub fn missing_section(section: &str) -> Self {
        Self::MissingData(format!("{section} data structure is incorrect"))
    }

    /// ساخت خطای Not Found برای پروژه، به زبان صفحه
    #[must_use]
    pub fn project_not_found(slug: &str, language: Language) -> Self {
        Self::NotFound(i18n::t_with(
            language,
            i18n::keys::PROJECTS_NOT_FOUND,
            &[("slug", slug)],
        ))
    }
}

// =====================================
// Error Response DTO
// =====================================
/// ساختار پاسخ خطا در API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// کد خطا (مثلا "Not Found")
    pub error: String,

    /// پیام خطا
    pub message: String,

    /// کد وضعیت HTTP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    /// جزئیات اضافی (اختیاری)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// ساخت پاسخ خطای جدید
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code: None,
            details: None,
        }
    }

    /// اضافه کردن کد وضعیت
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status_code = Some(status.as_u16());
        self
    }

    /// اضافه کردن جزئیات
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

// =====================================
// IntoResponse Implementation
// =====================================
/// تبدیل AppError به Response HTTP
///
/// این باعث میشه بتونیم AppError رو مستقیم از handler برگردونیم.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            error!(error = %self, "Server error occurred");
        }

        let status = self.status_code();

        let mut error_response = ErrorResponse::new(
            status.canonical_reason().unwrap_or("Error"),
            self.to_string(),
        )
        .with_status(status);

        // برای کد زبان نامعتبر، لیست زبان‌های مجاز رو هم میفرستیم
        if let Self::UnsupportedLanguage(_) = &self {
            error_response = error_response.with_details(serde_json::json!({
                "supported": Language::ALL
                    .iter()
                    .map(|lang| lang.code())
                    .collect::<Vec<_>>(),
            }));
        }

        (status, Json(error_response)).into_response()
    }
}

// =====================================
// From Implementations
// =====================================

impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::Internal(s)
    }
}

impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::Internal(s.to_string())
    }
}

// تبدیل validator error
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

// =====================================
// Option Extensions
// =====================================
/// Extension trait برای Option
pub trait OptionExt<T> {
    /// تبدیل None به خطای ساختار ناقص برای یک بخش
    fn ok_or_missing(self, section: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_missing(self, section: &str) -> Result<T> {
        self.ok_or_else(|| AppError::missing_section(section))
    }
}
