//! # ماژول تنظیمات (Configuration)
//!
//! این ماژول مسئول خوندن و مدیریت تنظیمات سرویس هست.
//!
//! ## متغیرهای محیطی
//!
//! | متغیر | پیش‌فرض |
//! |---|---|
//! | `HOST` | `127.0.0.1` |
//! | `PORT` | `3000` |
//! | `CMS_GRAPHQL_URL` | `https://cms.aminasaadi.ir/admin/graphql` |
//! | `CMS_TIMEOUT_SECS` | `15` |
//! | `DATABASE_URL` | `sqlite://data/preferences.db?mode=rwc` |
//! | `PROJECTS_PER_PAGE` | `6` |
//! | `ENVIRONMENT` | `development` |
//!
//! ## مفاهیم Rust:
//! - **Default Trait**: مقادیر پیش‌فرض
//! - **Builder Pattern**: ساخت تدریجی آبجکت

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::utils;

/// آدرس پیش‌فرض GraphQL endpoint وردپرس
pub const DEFAULT_CMS_GRAPHQL_URL: &str = "https://cms.aminasaadi.ir/admin/graphql";

/// تنظیمات اصلی برنامه
///
/// # مثال
/// ```rust
/// use portfolio_cms::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.port, 3000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// آدرس هاست سرور
    pub host: String,

    /// پورت سرور
    pub port: u16,

    /// آدرس GraphQL endpoint سیستم مدیریت محتوا
    pub cms_graphql_url: String,

    /// حداکثر زمان انتظار برای پاسخ CMS (ثانیه)
    pub cms_timeout_secs: u64,

    /// آدرس دیتابیس تنظیمات کاربر
    pub database_url: String,

    /// تعداد پروژه در هر صفحه
    pub projects_per_page: u32,

    /// محیط اجرا (development, production)
    pub environment: Environment,
}

/// محیط اجرای برنامه
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// محیط توسعه
    #[default]
    Development,

    /// محیط تست
    Testing,

    /// محیط تولید
    Production,
}

impl Environment {
    /// آیا در محیط توسعه هستیم؟
    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// آیا در محیط تولید هستیم؟
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// لاگ‌ها به صورت JSON (یک خط برای هر رویداد) نوشته بشن؟
    ///
    /// در production برای جمع‌آوری لاگ؛ بقیه محیط‌ها فرمت pretty.
    #[must_use]
    pub fn uses_json_logs(&self) -> bool {
        self.is_production()
    }
}

/// تبدیل String به Environment
impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "testing" | "test" => Environment::Testing,
            _ => Environment::Development,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cms_graphql_url: DEFAULT_CMS_GRAPHQL_URL.to_string(),
            cms_timeout_secs: 15,
            database_url: "sqlite://data/preferences.db?mode=rwc".to_string(),
            projects_per_page: 6,
            environment: Environment::Development,
        }
    }
}

impl Config {
    /// ساخت تنظیمات از متغیرهای محیطی
    ///
    /// متغیری که نباشه یا parse نشه، مقدار پیش‌فرض میگیره.
    ///
    /// # Errors
    /// در حال حاضر همیشه `Ok` برمیگردونه؛ اعتبارسنجی در [`Config::validate`] هست.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let get_env = |key: &str, default: &str| -> String {
            env::var(key).unwrap_or_else(|_| default.to_string())
        };

        // helper برای parse کردن عدد
        fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
            env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }

        Ok(Self {
            host: get_env("HOST", &defaults.host),
            port: parse_env("PORT", defaults.port),
            cms_graphql_url: get_env("CMS_GRAPHQL_URL", &defaults.cms_graphql_url),
            cms_timeout_secs: parse_env("CMS_TIMEOUT_SECS", defaults.cms_timeout_secs),
            database_url: get_env("DATABASE_URL", &defaults.database_url),
            projects_per_page: parse_env("PROJECTS_PER_PAGE", defaults.projects_per_page),
            environment: get_env("ENVIRONMENT", "development").into(),
        })
    }

    /// اعتبارسنجی تنظیمات
    ///
    /// # Errors
    /// - پورت صفر
    /// - آدرس CMS که http/https نیست
    /// - اندازه صفحه صفر
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(AppError::Config("PORT cannot be 0".to_string()));
        }

        if !utils::is_valid_url(&self.cms_graphql_url) {
            return Err(AppError::Config(format!(
                "CMS_GRAPHQL_URL is not a valid http(s) URL: {}",
                self.cms_graphql_url
            )));
        }

        // در production اتصال بدون TLS به CMS قبول نیست
        if self.environment.is_production() && !self.cms_graphql_url.starts_with("https://") {
            return Err(AppError::Config(
                "CMS_GRAPHQL_URL must use https in production".to_string(),
            ));
        }

        if self.projects_per_page == 0 {
            return Err(AppError::Config(
                "PROJECTS_PER_PAGE cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// آدرس کامل سرور
    #[must_use]
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// timeout درخواست‌های CMS
    #[must_use]
    pub fn cms_timeout(&self) -> Duration {
        Duration::from_secs(self.cms_timeout_secs)
    }

    /// هاست CMS (برای تشخیص لینک‌های داخلی منو)
    #[must_use]
    pub fn cms_host(&self) -> Option<String> {
        url::Url::parse(&self.cms_graphql_url)
            .ok()
            .and_then(|u| u.host_str().map(ToString::to_string))
    }
}

// =====================================
// Builder Pattern
// =====================================
/// ساخت Config با Builder Pattern
///
/// # مثال
/// ```rust
/// use portfolio_cms::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .port(8080)
///     .host("0.0.0.0")
///     .build();
/// assert_eq!(config.port, 8080);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// ساخت builder جدید
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// تنظیم پورت
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// تنظیم هاست
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// تنظیم آدرس CMS
    #[must_use]
    pub fn cms_graphql_url(mut self, url: impl Into<String>) -> Self {
        self.config.cms_graphql_url = url.into();
        self
    }

    /// تنظیم timeout
    #[must_use]
    pub fn cms_timeout_secs(mut self, secs: u64) -> Self {
        self.config.cms_timeout_secs = secs;
        self
    }

    /// تنظیم database_url
    #[must_use]
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    /// تنظیم تعداد پروژه در صفحه
    #[must_use]
    pub fn projects_per_page(mut self, per_page: u32) -> Self {
        self.config.projects_per_page = per_page;
        self
    }

    /// تنظیم محیط
    #[must_use]
    pub fn environment(mut self, env: Environment) -> Self {
        self.config.environment = env;
        self
    }

    /// ساخت Config نهایی
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }

    /// ساخت Config با اعتبارسنجی
    ///
    /// # Errors
    /// خطا برمیگردونه اگه اعتبارسنجی fail بشه
    pub fn build_validated(self) -> Result<Config> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
