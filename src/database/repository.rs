//! # Repository تنظیمات
//!
//! جدول `preferences`: یک ردیف برای هر کلید (`selectedLanguage`، `theme`).
//!
//! ## مفاهیم Rust:
//! - **async_trait**: پیاده‌سازی [`PreferenceStore`] روی SQLite
//! - **FromRow**: تبدیل خودکار ردیف به struct

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::FromRow;

use super::Database;
use crate::error::Result;
use crate::state::PreferenceStore;

/// یک ردیف جدول `preferences`
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PreferenceRecord {
    pub key: String,
    pub value: String,
    pub updated_at: NaiveDateTime,
}

/// Repository برای تنظیمات کاربر
///
/// # مفاهیم:
/// - Struct با dependency injection
/// - Database به عنوان dependency تزریق میشه
#[derive(Debug, Clone)]
pub struct PreferenceRepository {
    db: Database,
}

impl PreferenceRepository {
    /// ساخت repository جدید
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// پیدا کردن ردیف با کلید
    pub async fn find(&self, key: &str) -> Result<Option<PreferenceRecord>> {
        let record = sqlx::query_as::<_, PreferenceRecord>(
            r#"
            SELECT key, value, updated_at
            FROM preferences
            WHERE key = ?
            "#,
        )
        .bind(key)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(record)
    }

    /// درج یا به‌روزرسانی (upsert)
    pub async fn upsert(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO preferences (key, value, updated_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(self.db.pool())
        .await?;

        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for PreferenceRepository {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.find(key).await?.map(|record| record.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.upsert(key, value).await
    }

    async fn health_check(&self) -> Result<()> {
        self.db.health_check().await
    }
}
