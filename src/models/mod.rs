//! # ماژول مدل‌ها (Domain Models)
//!
//! این ماژول مدل‌های داده سرویس رو تعریف میکنه.
//!
//! ## انواع مدل:
//! - **Preference**: زبان، جهت متن و تم ([`Language`], [`TextDirection`], [`Theme`])
//! - **CMS Models**: پست‌ها و منوها، همون شکلی که GraphQL برمیگردونه
//! - **Views**: مدل‌های resolve شده برای یک زبان (خروجی API)
//! - **DTO**: بسته‌بندی پاسخ‌ها و درخواست‌های API

mod preference;
mod post;
mod views;
mod dto;

// Re-export همه مدل‌ها
pub use preference::*;
pub use post::*;
pub use views::*;
pub use dto::*;

use serde::{Deserialize, Serialize};

// =====================================
// Pagination
// =====================================
/// حداکثر تعداد آیتم در هر صفحه
pub const MAX_PER_PAGE: u32 = 100;

/// پارامترهای صفحه‌بندی
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    /// شماره صفحه (از 1 شروع میشه)
    #[serde(default = "default_page")]
    pub page: u32,

    /// تعداد آیتم در صفحه
    pub per_page: u32,
}

fn default_page() -> u32 { 1 }

impl Pagination {
    /// ساخت صفحه‌بندی
    ///
    /// صفحه صفر به صفحه 1 تبدیل میشه.
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page,
        }
    }

    /// محاسبه offset
    #[must_use]
    pub fn offset(&self) -> u32 {
        (self.page.saturating_sub(1)).saturating_mul(self.limit())
    }

    /// محاسبه limit
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }
}

/// نتیجه صفحه‌بندی شده
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    /// داده‌ها
    pub data: Vec<T>,

    /// اطلاعات صفحه‌بندی
    pub pagination: PaginationInfo,
}

/// اطلاعات صفحه‌بندی
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub current_page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationInfo {
    /// ساخت اطلاعات صفحه‌بندی
    #[must_use]
    pub fn new(pagination: &Pagination, total_items: u64) -> Self {
        let per_page = u64::from(pagination.limit());
        let total_pages = u32::try_from(total_items.div_ceil(per_page)).unwrap_or(u32::MAX);

        Self {
            current_page: pagination.page,
            per_page: pagination.limit(),
            total_items,
            total_pages,
            has_next: pagination.page < total_pages,
            has_prev: pagination.page > 1,
        }
    }
}

impl<T> PaginatedResult<T> {
    /// ساخت نتیجه صفحه‌بندی شده
    pub fn new(data: Vec<T>, pagination: &Pagination, total_items: u64) -> Self {
        Self {
            data,
            pagination: PaginationInfo::new(pagination, total_items),
        }
    }

    /// برش یک صفحه از لیست کامل
    ///
    /// # مفاهیم:
    /// - `skip` و `take` روی iterator: بدون کپی اضافه
    /// - `into_iter`: گرفتن ownership آیتم‌ها
    pub fn from_items(items: Vec<T>, pagination: &Pagination) -> Self {
        let total = items.len() as u64;
        let data = items
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();

        Self::new(data, pagination, total)
    }

    /// تبدیل آیتم‌ها با حفظ اطلاعات صفحه‌بندی
    pub fn map<U, F>(self, f: F) -> PaginatedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResult {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
