//! # ذخیره‌سازی تنظیمات
//!
//! یک key-value ساده برای زبان و تم. پیاده‌سازی SQLite در
//! [`crate::database::PreferenceRepository`] هست؛ نسخه حافظه برای تست.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;

/// محل ذخیره تنظیمات کاربر
///
/// # مفاهیم:
/// - `Send + Sync`: باید بین thread‌ها share بشه (پشت `Arc<dyn ...>`)
/// - `#[async_trait]`: متدهای async در trait object
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// خوندن مقدار؛ `None` یعنی هیچوقت ذخیره نشده
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// نوشتن (یا جایگزینی) مقدار
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// بررسی در دسترس بودن
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

/// ذخیره‌سازی در حافظه
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    /// ساخت store خالی
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ساخت store با مقادیر اولیه (مثلا انتخاب نشست قبلی)
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        Self {
            values: RwLock::new(values),
        }
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
