//! # Health Check Handler
//!
//! برای بررسی سلامت سرویس

use axum::{extract::State, Json};

use crate::{models::HealthResponse, services::AppState};

// =====================================
// Health Check
// =====================================
/// بررسی سلامت سرویس
///
/// # مفاهیم:
/// - Health check برای Kubernetes/Docker
/// - بررسی اتصال ذخیره‌ساز تنظیمات (SQLite)
/// - CMS اینجا چک نمیشه؛ خرابی اون فقط بخش‌های صفحه رو تحت تاثیر میذاره
///
/// # Endpoint
/// `GET /health`
///
/// # Response
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": true,
///   "language": "fa"
/// }
/// ```
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_ok = state.language.store_healthy().await;

    Json(HealthResponse::new(
        db_ok,
        state.language.current_language(),
    ))
}
