//! # Translation Handlers
//!
//! کاتالوگ پیام‌های رابط برای یک زبان

use axum::Json;
use serde::Serialize;

use crate::{
    api::extractors::RequestLanguage,
    i18n::{self, Catalog},
    models::{ApiResponse, Language, TextDirection},
};

/// پیام‌های یک زبان
#[derive(Debug, Serialize)]
pub struct TranslationsResponse {
    pub lang: Language,
    pub dir: TextDirection,
    pub messages: &'static Catalog,
}

/// کاتالوگ پیام‌ها
///
/// # Endpoint
/// `GET /api/translations?lang=en`
///
/// # Response
/// ```json
/// {
///   "success": true,
///   "data": { "lang": "en", "dir": "ltr", "messages": { "common.loading": "Loading...", ... } }
/// }
/// ```
pub async fn get_translations(
    RequestLanguage(lang): RequestLanguage,
) -> Json<ApiResponse<TranslationsResponse>> {
    Json(ApiResponse::success(TranslationsResponse {
        lang,
        dir: lang.direction(),
        messages: i18n::catalog(lang),
    }))
}
