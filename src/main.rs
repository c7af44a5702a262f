//! # Portfolio CMS - نقطه ورود برنامه
//!
//! این فایل نقطه شروع اجرای برنامه است.
//! در Rust، `main.rs` برای باینری‌ها و `lib.rs` برای کتابخانه‌ها استفاده میشه.
//!
//! ## مفاهیم Rust در این فایل:
//! - `async fn main()`: تابع اصلی غیرهمزمان با tokio
//! - `anyhow::Result`: خطای هر نوعی رو با context بالا میبره
//! - `?` operator: انتشار خطا به بالا
//! - `tokio::spawn`: یک task پس‌زمینه برای گوش دادن به تغییر زبان

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// وارد کردن ماژول‌ها از کتابخانه‌مون
use portfolio_cms::{
    api::create_router,
    cms::CmsClient,
    config::{Config, Environment},
    database::{Database, PreferenceRepository},
    services::AppState,
    state::LanguageState,
};

/// نقطه ورود اصلی برنامه
///
/// # Errors
/// خطا برمیگردونه اگه:
/// - تنظیمات نامعتبر باشن
/// - دیتابیس متصل نشه
/// - سرور استارت نشه
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // لود کردن متغیرهای محیطی از فایل .env
    // اگه فایل نباشه اوکیه
    dotenvy::dotenv().ok();

    // فرمت لاگ به محیط بستگی داره، پس اول تنظیمات
    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("🚀 Starting Portfolio CMS Service...");

    config.validate()?;
    info!(
        cms = %config.cms_graphql_url,
        environment = ?config.environment,
        "✅ Configuration loaded successfully"
    );

    // اتصال به دیتابیس تنظیمات
    let database = Database::connect(&config.database_url)
        .await
        .context("failed to open preference database")?;
    database.migrate().await?;
    info!("✅ Database migrations applied");

    let store = Arc::new(PreferenceRepository::new(database));
    let cms = Arc::new(CmsClient::new(&config)?);

    let addr = config.server_addr();
    let state = AppState::initialize(config, cms, store).await;
    info!(
        language = %state.language.current_language(),
        theme = %state.theme.current_theme(),
        "✅ Preferences restored"
    );

    spawn_language_logger(&state.language);

    let app = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("🌐 Server listening on http://{}", addr);

    // اجرای سرور - این بلاک تا ابد اجرا میشه
    axum::serve(listener, app).await?;

    Ok(())
}

/// لاگ کردن هر تغییر زبان
///
/// # مفاهیم:
/// - `watch::Receiver::changed()`: فقط روی تغییر بعدی بیدار میشه
/// - وقتی sender drop بشه حلقه تموم میشه
fn spawn_language_logger(language: &LanguageState) {
    let mut receiver = language.subscribe();

    tokio::spawn(async move {
        while receiver.changed().await.is_ok() {
            let current = *receiver.borrow_and_update();
            info!(
                language = %current,
                dir = %current.direction(),
                "Language switched"
            );
        }
    });
}

/// راه‌اندازی سیستم tracing برای لاگینگ
///
/// # مفاهیم:
/// - Structured Logging: لاگ‌ها به صورت ساختاریافته ذخیره میشن
/// - Layers: لایه‌های مختلف برای فرمت و فیلتر کردن
/// - EnvFilter: فیلتر کردن لاگ‌ها بر اساس متغیر محیطی
/// - production: JSON یک خطی؛ بقیه: فرمت pretty
fn init_tracing(environment: &Environment) {
    // EnvFilter از متغیر RUST_LOG میخونه
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("portfolio_cms=debug,tower_http=debug"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if environment.uses_json_logs() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true) // span فعلی (مثلا operation کوئری)
                    .with_target(true),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)     // نمایش نام ماژول
                    .with_thread_ids(true) // نمایش ID ترد
                    .with_file(true)       // نمایش نام فایل
                    .with_line_number(true) // نمایش شماره خط
                    .with_level(true)      // نمایش سطح لاگ
                    .pretty(),             // فرمت زیبا
            )
            .init();
    }
}
