//! # لایه API
//!
//! این ماژول HTTP handlers و routing رو مدیریت میکنه.
//!
//! ## مفاهیم Rust + Axum:
//! - **Router**: تعریف مسیرها
//! - **Handler Functions**: پردازش request‌ها
//! - **Extractors**: استخراج داده از request
//! - **State**: اشتراک state بین handlers
//! - **Middleware**: پردازش قبل/بعد از handler
//! - **Tower**: زیرساخت middleware
//!
//! ## ساختار URL‌ها:
//! - `GET /` - صفحه اصلی
//! - `GET /about` - درباره
//! - `GET /contact` - تماس
//! - `GET /projects` - لیست پروژه‌ها
//! - `GET /projects/:slug` - جزئیات پروژه
//! - `GET|PUT /api/language` - زبان برنامه
//! - `POST /api/language/toggle` - جابجایی زبان
//! - `GET|PUT /api/theme` - تم برنامه
//! - `POST /api/theme/toggle` - جابجایی تم
//! - `GET /api/translations` - پیام‌های رابط زبان درخواست
//! - `GET /health` - Health check
//!
//! همه صفحات `?lang=fa|en` رو برای همون درخواست قبول میکنن.

mod extractors;
mod handlers;
mod middleware;

pub use extractors::*;
pub use handlers::*;
pub use middleware::*;

use std::time::Duration;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::services::AppState;

// =====================================
// Router Builder
// =====================================
/// ساخت Router اصلی برنامه
///
/// # مفاهیم:
/// - `Router::new()`: شروع router خالی
/// - `.route()`: اضافه کردن route
/// - `.nest()`: گروه‌بندی route‌ها
/// - `.layer()`: اضافه کردن middleware
/// - `.with_state()`: تزریق state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // صفحات
        .merge(page_routes())
        // API routes
        .nest("/api", api_routes())
        // Health check
        .route("/health", get(handlers::health::health_check))
        // مسیر ناشناخته
        .fallback(handlers::pages::not_found)
        // Middleware‌های عمومی
        .layer(
            ServiceBuilder::new()
                // Tracing - لاگ کردن request‌ها
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(request_id))
                .layer(axum_middleware::from_fn(request_timing))
                .layer(axum_middleware::from_fn(security_headers))
                // Timeout - حداکثر زمان پردازش
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                // Compression - فشرده‌سازی response
                .layer(CompressionLayer::new())
                // CORS - اجازه دسترسی از دامنه‌های دیگه
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        // تزریق state به همه handlers
        .with_state(state)
}

/// Route‌های صفحات
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::pages::home))
        .route("/about", get(handlers::pages::about))
        .route("/contact", get(handlers::pages::contact))
        .route("/projects", get(handlers::pages::projects))
        .route("/projects/:slug", get(handlers::pages::project))
}

/// Route‌های API
///
/// # مفاهیم:
/// - Nested routing: گروه‌بندی route‌ها
/// - `get(..).put(..)`: چند متد روی یک مسیر
fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/language",
            get(handlers::preferences::get_language).put(handlers::preferences::set_language),
        )
        .route("/language/toggle", post(handlers::preferences::toggle_language))
        .route(
            "/theme",
            get(handlers::preferences::get_theme).put(handlers::preferences::set_theme),
        )
        .route("/theme/toggle", post(handlers::preferences::toggle_theme))
        .route("/translations", get(handlers::translations::get_translations))
}

// =====================================
// Request ID
// =====================================
/// تولید request ID برای tracing
#[must_use]
pub fn generate_request_id() -> String {
    nanoid::nanoid!(12)
}
