//! # Preference Handlers
//!
//! خوندن و تغییر زبان و تم برنامه
//!
//! ## مفاهیم:
//! - تغییر از طریق [`LanguageState`](crate::state::LanguageState) انجام میشه؛
//!   همه subscriber‌ها باخبر میشن و مقدار در SQLite ذخیره میشه
//! - تغییر به مقدار فعلی کاری نمیکنه

use axum::{extract::State, Json};
use tracing::info;

use crate::{
    api::extractors::ValidatedJson,
    error::Result,
    models::{
        ApiResponse, Language, LanguageResponse, SetLanguageRequest, SetThemeRequest, Theme,
        ThemeResponse,
    },
    services::AppState,
};

fn change_message(changed: bool, what: &str) -> String {
    if changed {
        format!("{what} changed")
    } else {
        format!("{what} unchanged")
    }
}

// =====================================
// Language
// =====================================
/// زبان فعلی
///
/// # Endpoint
/// `GET /api/language`
///
/// # Response
/// ```json
/// {
///   "success": true,
///   "data": { "code": "fa", "name": "فارسی", "dir": "rtl", "is_rtl": true, "supported": ["fa", "en"] }
/// }
/// ```
pub async fn get_language(State(state): State<AppState>) -> Json<ApiResponse<LanguageResponse>> {
    Json(ApiResponse::success(
        state.language.current_language().into(),
    ))
}

/// تغییر زبان
///
/// # Endpoint
/// `PUT /api/language`
///
/// # Request Body
/// ```json
/// { "code": "en" }
/// ```
///
/// # Errors
/// - `422` اگه کد دو حرفی نباشه
/// - `400` اگه زبان پشتیبانی نشه
pub async fn set_language(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SetLanguageRequest>,
) -> Result<Json<ApiResponse<LanguageResponse>>> {
    let language: Language = request.code.parse()?;
    let changed = state.language.set_language(language.code()).await;

    if changed {
        info!(language = %language, "Language changed");
    }

    Ok(Json(
        ApiResponse::success(state.language.current_language().into())
            .with_message(change_message(changed, "Language")),
    ))
}

/// جابجایی بین فارسی و انگلیسی
///
/// # Endpoint
/// `POST /api/language/toggle`
pub async fn toggle_language(
    State(state): State<AppState>,
) -> Json<ApiResponse<LanguageResponse>> {
    let language = state.language.toggle_language().await;
    info!(language = %language, "Language toggled");

    Json(ApiResponse::success(language.into()))
}

// =====================================
// Theme
// =====================================
/// تم فعلی
///
/// # Endpoint
/// `GET /api/theme`
pub async fn get_theme(State(state): State<AppState>) -> Json<ApiResponse<ThemeResponse>> {
    Json(ApiResponse::success(state.theme.current_theme().into()))
}

/// تغییر تم
///
/// # Endpoint
/// `PUT /api/theme`
///
/// # Request Body
/// ```json
/// { "theme": "dark" }
/// ```
pub async fn set_theme(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SetThemeRequest>,
) -> Result<Json<ApiResponse<ThemeResponse>>> {
    let theme: Theme = request.theme.parse()?;
    let changed = state.theme.set(theme).await;

    Ok(Json(
        ApiResponse::success(state.theme.current_theme().into())
            .with_message(change_message(changed, "Theme")),
    ))
}

/// جابجایی بین تم روشن و تیره
///
/// # Endpoint
/// `POST /api/theme/toggle`
pub async fn toggle_theme(State(state): State<AppState>) -> Json<ApiResponse<ThemeResponse>> {
    Json(ApiResponse::success(state.theme.toggle_theme().await.into()))
}
