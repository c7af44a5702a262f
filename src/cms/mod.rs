//! # ماژول CMS (Headless WordPress)
//!
//! ارتباط با GraphQL endpoint وردپرس.
//!
//! ## مفاهیم Rust:
//! - **Trait Object**: [`ContentSource`] سرویس رو از HTTP جدا میکنه (تست با mock)
//! - **Generic + DeserializeOwned**: یک متد `execute` برای همه کوئری‌ها
//! - **Associated consts**: هر صفحه کوئری و مسیر داده خودش رو میدونه
//!
//! ## قرارداد پاسخ
//! - HTTP غیر 2xx: [`AppError::Cms`]
//! - `errors` بدون `data`: [`AppError::Cms`]
//! - `errors` همراه `data`: لاگ میشه و داده استفاده میشه
//! - نه `data` نه `errors`: [`AppError::MissingData`]

pub mod queries;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{Connection, Menu, MultilingualPosts, Post};
use queries::GraphQlQuery;

// =====================================
// Pages
// =====================================
/// صفحات ثابت سایت
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    About,
    Contact,
}

impl PageKind {
    /// کوئری صفحه
    #[must_use]
    pub const fn query(self) -> GraphQlQuery {
        match self {
            Self::Home => queries::GET_HOME_FIELDS,
            Self::About => queries::GET_ABOUT_FIELDS,
            Self::Contact => queries::GET_CONTACT_FIELDS,
        }
    }

    /// مسیر بسته فیلدهای صفحه داخل `data`
    #[must_use]
    pub const fn data_path(self) -> [&'static str; 2] {
        match self {
            Self::Home => ["page", "homeFields"],
            Self::About => ["page", "aboutFields"],
            Self::Contact => ["page", "contact"],
        }
    }

    /// نام بخش در پیام‌های خطا
    #[must_use]
    pub const fn section_name(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Contact => "Contact",
        }
    }
}

// =====================================
// Content Source
// =====================================
/// منبع محتوا
///
/// پیاده‌سازی اصلی [`CmsClient`] هست؛ در تست‌ها mock یا fake جاش میشینه.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// کل `data` کوئری یک صفحه
    async fn page(&self, kind: PageKind) -> Result<Value>;

    /// رکورد `headerFooter.header` (ممکنه `null` باشه)
    async fn header(&self) -> Result<Value>;

    /// همه منوها
    async fn menus(&self) -> Result<Vec<Menu>>;

    /// پست‌های هر دو زبان
    async fn posts(&self) -> Result<MultilingualPosts>;

    /// یک پست با بدنه کامل؛ `None` اگه نباشه
    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>>;
}

// =====================================
// GraphQL Envelope
// =====================================
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
    operation_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,

    #[serde(default)]
    errors: Vec<GraphQlError>,
}

/// یک خطای GraphQL
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct MenusData {
    #[serde(default)]
    menus: Option<Connection<Menu>>,
}

#[derive(Debug, Deserialize)]
struct PostData {
    #[serde(default)]
    post: Option<Post>,
}

// =====================================
// CMS Client
// =====================================
/// کلاینت GraphQL وردپرس
///
/// # مفاهیم:
/// - `reqwest::Client` خودش `Arc` داخلی داره؛ clone ارزونه
/// - timeout روی کل درخواست تنظیم میشه
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    endpoint: String,
}

impl CmsClient {
    /// ساخت کلاینت از تنظیمات
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_endpoint(&config.cms_graphql_url, config.cms_timeout())
    }

    /// ساخت کلاینت برای یک endpoint مشخص
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// آدرس endpoint
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// اجرای یک کوئری و decode کردن `data`
    #[instrument(skip(self, query, variables), fields(operation = query.operation))]
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &GraphQlQuery,
        variables: Value,
    ) -> Result<T> {
        let started = Instant::now();

        let response = self
            .http
            .post(&self.endpoint)
            .json(&GraphQlRequest {
                query: query.document,
                variables,
                operation_name: query.operation,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Cms(format!(
                "{} failed with HTTP {status}",
                query.operation
            )));
        }

        let body = response.bytes().await?;
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = body.len(),
            "CMS response received"
        );

        Self::decode_response(query.operation, &body)
    }

    /// decode کردن بدنه پاسخ GraphQL
    ///
    /// # مثال
    /// ```rust
    /// use portfolio_cms::cms::CmsClient;
    /// use serde_json::Value;
    ///
    /// let data: Value = CmsClient::decode_response("GetMenus", br#"{"data":{"menus":null}}"#).unwrap();
    /// assert!(data["menus"].is_null());
    /// ```
    pub fn decode_response<T: DeserializeOwned>(operation: &str, body: &[u8]) -> Result<T> {
        let envelope: GraphQlResponse = serde_json::from_slice(body)
            .map_err(|e| AppError::Cms(format!("{operation} returned invalid JSON: {e}")))?;

        let messages = || {
            envelope
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        };

        match envelope.data.as_ref().filter(|data| !data.is_null()) {
            Some(data) => {
                if !envelope.errors.is_empty() {
                    warn!(operation, errors = %messages(), "CMS returned partial data with errors");
                }
                T::deserialize(data).map_err(|e| {
                    AppError::MissingData(format!("{operation} data structure is incorrect: {e}"))
                })
            }
            None if !envelope.errors.is_empty() => Err(AppError::Cms(messages())),
            None => Err(AppError::MissingData(format!("{operation} returned no data"))),
        }
    }
}

#[async_trait]
impl ContentSource for CmsClient {
    async fn page(&self, kind: PageKind) -> Result<Value> {
        self.execute(&kind.query(), json!({})).await
    }

    async fn header(&self) -> Result<Value> {
        let data: Value = self.execute(&queries::GET_HEADER, json!({})).await?;
        Ok(data
            .pointer("/headerFooter/header")
            .cloned()
            .unwrap_or(Value::Null))
    }

    async fn menus(&self) -> Result<Vec<Menu>> {
        let data: MenusData = self.execute(&queries::GET_MENUS, json!({})).await?;
        Ok(data.menus.unwrap_or_default().nodes)
    }

    async fn posts(&self) -> Result<MultilingualPosts> {
        let posts: MultilingualPosts = self
            .execute(&queries::GET_MULTILINGUAL_POSTS, json!({}))
            .await?;
        Ok(posts.normalized())
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let data: PostData = self
            .execute(&queries::GET_POST_BY_SLUG, json!({ "slug": slug }))
            .await?;
        Ok(data.post)
    }
}
