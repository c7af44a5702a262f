//! # ماژول سرویس‌ها (Business Logic Layer)
//!
//! این ماژول منطق اصلی برنامه رو پیاده‌سازی میکنه.
//!
//! ## لایه‌بندی معماری
//!
//! ```text
//! ┌─────────────────┐
//! │    API Layer    │  <-- HTTP handlers (axum)
//! ├─────────────────┤
//! │  Service Layer  │  <-- بومی‌سازی و ساخت view (اینجا!)
//! ├─────────────────┤
//! │  Content Source │  <-- CMS GraphQL
//! ├─────────────────┤
//! │ Preference State│  <-- زبان و تم (SQLite)
//! └─────────────────┘
//! ```
//!
//! ## مفاهیم Rust:
//! - **Dependency Injection**: تزریق وابستگی‌ها
//! - **Traits برای Abstraction**: منبع محتوا و ذخیره‌سازی قابل تعویض
//! - **Arc<T>**: اشتراک امن بین threads

mod content_service;

pub use content_service::*;

use std::sync::Arc;

use crate::{
    cms::ContentSource,
    config::Config,
    state::{LanguageState, PreferenceStore, ThemeState},
};

// =====================================
// Application State
// =====================================
/// وضعیت برنامه که بین همه handlers اشتراک‌گذاری میشه
///
/// # مفاهیم:
/// - `Arc<T>`: Reference counting برای thread-safe sharing
/// - `Clone`: کپی کردن (فقط Arc clone میشه، نه داده)
/// - `language` و `theme` خودشون clone ارزون دارن و همه به یک مقدار اشاره میکنن
#[derive(Clone)]
pub struct AppState {
    /// تنظیمات برنامه
    pub config: Arc<Config>,

    /// سرویس محتوا
    pub content: Arc<ContentService>,

    /// زبان فعلی
    pub language: LanguageState,

    /// تم فعلی
    pub theme: ThemeState,
}

impl AppState {
    /// ساخت AppState و بازیابی زبان و تم ذخیره شده
    ///
    /// # مفاهیم:
    /// - Factory method: ساخت object پیچیده
    /// - Dependency Injection: همه وابستگی‌ها تزریق میشن
    pub async fn initialize(
        config: Config,
        source: Arc<dyn ContentSource>,
        store: Arc<dyn PreferenceStore>,
    ) -> Self {
        let content = Arc::new(ContentService::new(source, &config));

        let (language, theme) = tokio::join!(
            LanguageState::load(Arc::clone(&store)),
            ThemeState::load(store),
        );

        Self {
            config: Arc::new(config),
            content,
            language,
            theme,
        }
    }

    /// دسترسی به config
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
