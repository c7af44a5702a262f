//! # مدل پست‌ها و منوها
//!
//! شکل داده‌هایی که از GraphQL وردپرس برمیگردن.
//! پست‌ها همون پروژه‌های پورتفولیو هستن.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Language;

/// پیشوند slug پست‌های انگلیسی
pub const ENGLISH_SLUG_PREFIX: &str = "en-";

// =====================================
// GraphQL Connection
// =====================================
/// لیست `nodes` در پاسخ‌های GraphQL
///
/// # مفاهیم:
/// - Generic: برای پست، دسته‌بندی و آیتم منو استفاده میشه
/// - `#[serde(default)]`: اگه `nodes` نبود، لیست خالی
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// `{ node: {...} }` در پاسخ‌های GraphQL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

// =====================================
// Post
// =====================================
/// تصویر
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub source_url: String,

    #[serde(default)]
    pub alt_text: Option<String>,
}

/// اطلاعات اضافه پروژه (ACF)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    #[serde(default)]
    pub site_url: Option<String>,
}

/// دسته‌بندی پست
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
}

/// پست وردپرس
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,

    #[serde(default)]
    pub content: Option<String>,

    /// تاریخ انتشار به فرمت وردپرس (`2024-05-01T10:00:00`)
    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub excerpt: Option<String>,

    #[serde(default)]
    pub featured_image: Option<Edge<MediaItem>>,

    #[serde(default)]
    pub project: Option<ProjectMeta>,

    #[serde(default)]
    pub categories: Option<Connection<Category>>,
}

impl Post {
    /// زبان پست از روی slug
    ///
    /// پست‌های انگلیسی با `en-` شروع میشن، بقیه فارسی هستن.
    #[must_use]
    pub fn language(&self) -> Language {
        language_of_slug(&self.slug)
    }

    /// تاریخ انتشار parse شده
    #[must_use]
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.date, "%Y-%m-%dT%H:%M:%S").ok()
    }

    /// آدرس تصویر شاخص
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.featured_image
            .as_ref()
            .map(|edge| edge.node.source_url.as_str())
    }

    /// نام دسته‌بندی‌ها (به عنوان tag تکنولوژی)
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        self.categories
            .as_ref()
            .map(|c| c.nodes.iter().map(|cat| cat.name.clone()).collect())
            .unwrap_or_default()
    }
}

/// تشخیص زبان از روی slug
#[must_use]
pub fn language_of_slug(slug: &str) -> Language {
    if slug.starts_with(ENGLISH_SLUG_PREFIX) {
        Language::En
    } else {
        Language::Fa
    }
}

// =====================================
// Multilingual Posts
// =====================================
/// پاسخ کوئری `GetMultilingualPosts`
///
/// هر زبان یه alias جدا در کوئری داره (`EnPost` و `FaPost`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultilingualPosts {
    #[serde(rename = "EnPost", default)]
    pub en: Option<Connection<Post>>,

    #[serde(rename = "FaPost", default)]
    pub fa: Option<Connection<Post>>,
}

impl MultilingualPosts {
    /// پست‌های یک زبان
    #[must_use]
    pub fn by_language(&self, language: Language) -> &[Post] {
        let collection = match language {
            Language::En => self.en.as_ref(),
            Language::Fa => self.fa.as_ref(),
        };
        collection
            .map(|c| c.nodes.as_slice())
            .unwrap_or_default()
    }

    /// گذاشتن هر پست در مجموعه زبان خودش (بر اساس slug)، بدون تکرار
    ///
    /// جستجوی وردپرس روی slug فیلتر نمیکنه، پس مجموعه‌های خام ممکنه
    /// پست زبان دیگه یا پست تکراری داشته باشن.
    #[must_use]
    pub fn normalized(self) -> Self {
        let mut seen = HashSet::new();
        let mut en = Vec::new();
        let mut fa = Vec::new();

        for post in self.en.into_iter().chain(self.fa).flat_map(|c| c.nodes) {
            if !seen.insert(post.id.clone()) {
                continue;
            }
            match post.language() {
                Language::En => en.push(post),
                Language::Fa => fa.push(post),
            }
        }

        Self {
            en: Some(Connection { nodes: en }),
            fa: Some(Connection { nodes: fa }),
        }
    }

    /// همه پست‌ها، جدیدترین اول
    ///
    /// پست‌هایی که تاریخشون parse نمیشه آخر لیست میان.
    #[must_use]
    pub fn all_newest_first(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .by_language(Language::En)
            .iter()
            .chain(self.by_language(Language::Fa))
            .cloned()
            .collect();

        // Option: None < Some، پس برعکس مقایسه میکنیم
        posts.sort_by(|a, b| b.published_at().cmp(&a.published_at()));
        posts
    }
}

// =====================================
// Menus
// =====================================
/// آیتم منو
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub url: String,

    #[serde(default)]
    pub parent_id: Option<String>,
}

/// منوی وردپرس
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub menu_items: Connection<MenuItem>,
}

impl Menu {
    /// آیا این منو برای زبان داده شده هست؟
    ///
    /// نام منو باید با کد زبان تموم بشه (`Main-en`، `main_en`، `Main EN`).
    #[must_use]
    pub fn is_for_language(&self, language: Language) -> bool {
        let name = self.name.to_lowercase();
        let code = language.code();
        ['-', '_', ' ']
            .iter()
            .any(|sep| name.ends_with(&format!("{sep}{code}")))
    }
}

/// انتخاب منوی مناسب زبان
///
/// منویی که نامش با کد زبان تموم بشه اولویت داره، بعد منوی بدون پسوند زبان،
/// و در آخر اولین منو.
#[must_use]
pub fn select_menu(menus: &[Menu], language: Language) -> Option<&Menu> {
    menus
        .iter()
        .find(|menu| menu.is_for_language(language))
        .or_else(|| {
            menus
                .iter()
                .find(|menu| !Language::ALL.iter().any(|l| menu.is_for_language(*l)))
        })
        .or_else(|| menus.first())
}
