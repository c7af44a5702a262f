//! # Portfolio CMS Library
//!
//! این کتابخانه سرویس محتوای یک سایت پورتفولیوی دو زبانه (فارسی/انگلیسی) رو
//! ارائه میده. محتوا از GraphQL وردپرس (headless) خونده میشه و با زبان
//! فعلی resolve میشه.
//!
//! ## ساختار پروژه
//!
//! ```text
//! src/
//! ├── lib.rs          # نقطه ورود کتابخانه - اینجا!
//! ├── main.rs         # نقطه ورود باینری
//! ├── config/         # مدیریت تنظیمات
//! ├── error/          # تعریف خطاها
//! ├── database/       # ذخیره زبان و تم در SQLite
//! ├── models/         # مدل‌های داده و view‌ها
//! ├── localization/   # resolve کردن فیلدهای `enX`
//! ├── i18n/           # پیام‌های رابط و تاریخ برای هر زبان
//! ├── state/          # وضعیت زبان و تم (watch channel)
//! ├── cms/            # کلاینت GraphQL
//! ├── services/       # ساخت محتوای صفحات
//! ├── api/            # لایه API
//! └── utils/          # توابع کمکی
//! ```
//!
//! ## مفاهیم Rust در این فایل
//!
//! - **Module System**: سیستم ماژول‌ها برای سازماندهی کد
//! - **Public API**: با `pub` مشخص میکنیم چی از بیرون قابل دسترسی باشه
//! - **Re-exports**: با `pub use` آیتم‌ها رو re-export میکنیم
//!
//! ## مثال استفاده
//!
//! ```rust
//! use portfolio_cms::{localization::resolve, models::Language};
//! use serde_json::json;
//!
//! let record = json!({ "title": "سلام", "enTitle": "Hello" });
//! assert_eq!(resolve(&record, "title", Language::En), Some(&json!("Hello")));
//! assert_eq!(resolve(&record, "title", Language::Fa), Some(&json!("سلام")));
//! ```

// =====================================
// Module Declarations
// =====================================

/// ماژول مدیریت تنظیمات برنامه
pub mod config;

/// ماژول تعریف و مدیریت خطاها
pub mod error;

/// ماژول ارتباط با دیتابیس
pub mod database;

/// ماژول مدل‌های داده (Domain Models)
pub mod models;

/// بومی‌سازی رکوردهای CMS
pub mod localization;

/// پیام‌های رابط کاربری هر زبان
pub mod i18n;

/// وضعیت زبان و تم
pub mod state;

/// کلاینت CMS
pub mod cms;

/// ماژول سرویس‌ها (Business Logic)
pub mod services;

/// ماژول API و HTTP Handlers
pub mod api;

/// ماژول توابع کمکی
pub mod utils;

// =====================================
// Re-exports
// =====================================

/// نتیجه عملیات با خطای سفارشی ما
pub use error::Result;

/// خطای اصلی برنامه
pub use error::AppError;

// =====================================
// Prelude Module
// =====================================
/// ماژول prelude برای import راحت‌تر آیتم‌های پرکاربرد
///
/// کاربرد:
/// ```rust
/// use portfolio_cms::prelude::*;
/// ```
pub mod prelude {
    pub use crate::cms::{CmsClient, ContentSource, PageKind};
    pub use crate::config::Config;
    pub use crate::database::{Database, PreferenceRepository};
    pub use crate::error::{AppError, Result};
    pub use crate::localization::{localize_record, resolve, ContentRecord, Localized};
    pub use crate::models::*;
    pub use crate::services::*;
    pub use crate::state::{LanguageState, PreferenceStore, ThemeState};
}
