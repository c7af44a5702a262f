//! # Custom Extractors
//!
//! Extractor‌های سفارشی برای استخراج داده از request
//!
//! ## مفاهیم Rust + Axum:
//! - **Extractors**: نوع‌هایی که از request داده استخراج میکنن
//! - **FromRequestParts**: extractor بدون body
//! - **FromRequest**: extractor که body رو مصرف میکنه
//! - **Rejection**: نوع خطا برای extractors
//!
//! ## چطور کار میکنه؟
//! وقتی یه extractor به عنوان پارامتر handler تعریف میشه،
//! axum قبل از اجرای handler، extractor رو اجرا میکنه.

use axum::{
    async_trait,
    body::Body,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query,
    },
    http::{request::Parts, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{error::AppError, models::Language, services::AppState};

// =====================================
// Request Language Extractor
// =====================================
/// زبان این درخواست
///
/// # مفاهیم:
/// - `?lang=en` فقط همین درخواست رو با اون زبان render میکنه؛
///   وضعیت سراسری زبان عوض نمیشه
/// - بدون پارامتر: زبان فعلی برنامه
///
/// # استفاده در handler:
/// ```rust,ignore
/// async fn handler(RequestLanguage(lang): RequestLanguage) -> ... {
///     // lang یا از query اومده یا از LanguageState
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLanguage(pub Language);

impl RequestLanguage {
    /// نام پارامتر query
    pub const QUERY_PARAM: &'static str = "lang";

    /// خوندن پارامتر `lang` از query string
    ///
    /// # Errors
    /// `UnsupportedLanguage` اگه پارامتر باشه ولی `fa`/`en` نباشه
    pub fn from_query(query: Option<&str>) -> Result<Option<Language>, AppError> {
        let Some(query) = query else {
            return Ok(None);
        };

        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == Self::QUERY_PARAM)
            .map(|(_, value)| value.parse::<Language>())
            .transpose()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequestLanguage {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let language = Self::from_query(parts.uri.query())?
            .unwrap_or_else(|| state.language.current_language());

        Ok(RequestLanguage(language))
    }
}

// =====================================
// Request ID Extractor
// =====================================
/// استخراج یا تولید Request ID
///
/// # مفاهیم:
/// - برای tracing و لاگینگ
/// - middleware [`super::request_id`] همیشه header رو میذاره
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    /// Header name برای request ID
    pub const HEADER_NAME: &'static str = "x-request-id";
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequestId {
    type Rejection = std::convert::Infallible; // هیچوقت fail نمیکنه

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .headers
            .get(Self::HEADER_NAME)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
            .unwrap_or_else(super::generate_request_id);

        Ok(RequestId(request_id))
    }
}

// =====================================
// JSON with Validation
// =====================================
/// استخراج JSON با اعتبارسنجی خودکار
///
/// # مفاهیم:
/// - Validation در سطح extractor
/// - ترکیب چند کار در یک extractor
///
/// # استفاده:
/// ```rust,ignore
/// async fn handler(ValidatedJson(data): ValidatedJson<SetLanguageRequest>) -> ... {
///     // data حتما valid هست
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        // اول JSON رو parse کن
        let Json(data): Json<T> = Json::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| AppError::BadRequest(format!("Invalid JSON: {e}")))?;

        // بعد validate کن
        data.validate()?;

        Ok(ValidatedJson(data))
    }
}

// =====================================
// Query with JSON errors
// =====================================
/// استخراج query string با خطای JSON
///
/// `Query` خود axum برای `?page=abc` متن ساده برمیگردونه؛ این نسخه همون
/// خطا رو به [`AppError::BadRequest`] تبدیل میکنه تا شکل پاسخ با بقیه API یکی باشه.
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: QueryRejection| AppError::BadRequest(format!("Invalid query: {e}")))?;

        Ok(QueryParams(params))
    }
}
