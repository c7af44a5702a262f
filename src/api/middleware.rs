//! # Middleware
//!
//! Middleware‌های سفارشی برای پردازش request/response
//!
//! ## مفاهیم:
//! - **Middleware**: کد که قبل/بعد از handler اجرا میشه
//! - **Tower**: کتابخانه middleware در اکوسیستم Rust
//! - **Next**: ادامه زنجیره middleware

use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use super::{generate_request_id, RequestId};

// =====================================
// Request Timing Middleware
// =====================================
/// اندازه‌گیری زمان پردازش request
///
/// پاسخ‌های 5xx با سطح `warn` لاگ میشن.
///
/// # استفاده:
/// ```rust,ignore
/// let app = Router::new()
///     .layer(axum::middleware::from_fn(request_timing));
/// ```
pub async fn request_timing(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = Instant::now();
    let response = next.run(request).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    let status = response.status();
    if status.is_server_error() {
        warn!(%method, %uri, %status, duration_ms, "Request failed");
    } else {
        info!(%method, %uri, %status, duration_ms, "Request completed");
    }

    response
}

// =====================================
// Request ID Middleware
// =====================================
/// اضافه کردن Request ID به هر request و response
///
/// ID دریافتی از کلاینت اگه قابل استفاده در header نباشه، جایگزین میشه.
pub async fn request_id(mut request: Request<Body>, next: Next) -> Response {
    let incoming = request
        .headers()
        .get(RequestId::HEADER_NAME)
        .and_then(|v| v.to_str().ok())
        .filter(|id| !id.is_empty())
        .and_then(|id| HeaderValue::from_str(id).ok());

    let header_value = match incoming {
        Some(value) => value,
        None => match HeaderValue::from_str(&generate_request_id()) {
            Ok(value) => value,
            Err(_) => return next.run(request).await,
        },
    };

    request
        .headers_mut()
        .insert(RequestId::HEADER_NAME, header_value.clone());

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(RequestId::HEADER_NAME, header_value);

    response
}

// =====================================
// Security Headers Middleware
// =====================================
/// اضافه کردن header‌های امنیتی
///
/// # Headers:
/// - X-Content-Type-Options
/// - X-Frame-Options
/// - Referrer-Policy
pub async fn security_headers(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    // جلوگیری از MIME sniffing
    headers.insert("x-content-type-options", HeaderValue::from_static("nosniff"));

    // جلوگیری از clickjacking
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));

    headers.insert(
        "referrer-policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}
