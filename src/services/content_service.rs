//! # سرویس محتوا
//!
//! محتوای خام CMS رو به view‌های یک زبان تبدیل میکنه.
//!
//! ## مفاهیم Rust:
//! - `Arc<dyn ContentSource>`: منبع محتوا قابل تعویضه (CMS یا mock)
//! - `tokio::join!`: درخواست‌های مستقل همزمان اجرا میشن
//! - `#[instrument]`: هر عملیات یک span با زبان درخواست

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    cms::{ContentSource, PageKind},
    config::Config,
    error::{AppError, OptionExt, Result},
    localization::{localize_record, ContentRecord},
    models::{
        ContactView, HeaderView, Language, PaginatedResult, Pagination, Post, PostView,
        ProjectFilter,
    },
};

/// سرویس محتوای صفحات
pub struct ContentService {
    source: Arc<dyn ContentSource>,
    cms_host: Option<String>,
    per_page: u32,
}

impl ContentService {
    /// ساخت سرویس جدید
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>, config: &Config) -> Self {
        Self {
            source,
            cms_host: config.cms_host(),
            per_page: config.projects_per_page,
        }
    }

    /// فیلدهای صفحه اصلی (`page.homeFields`) بومی‌سازی شده
    #[instrument(skip(self))]
    pub async fn home(&self, language: Language) -> Result<Value> {
        self.page_fields(PageKind::Home, language).await
    }

    /// فیلدهای صفحه درباره (`page.aboutFields`) بومی‌سازی شده
    #[instrument(skip(self))]
    pub async fn about(&self, language: Language) -> Result<Value> {
        self.page_fields(PageKind::About, language).await
    }

    /// صفحه تماس
    ///
    /// # Errors
    /// - `MissingData("Contact data structure is incorrect")` اگه `page.contact` نباشه
    #[instrument(skip(self))]
    pub async fn contact(&self, language: Language) -> Result<ContactView> {
        let kind = PageKind::Contact;
        let data = self.source.page(kind).await?;
        let [page, fields] = kind.data_path();

        let record = ContentRecord::new(Some(&data), language)
            .child(page)
            .child(fields);

        ContactView::from_record(record).ok_or_missing(kind.section_name())
    }

    /// هدر: نام سایت، لوگو و منوی زبان
    ///
    /// رکورد هدر و منوها همزمان خونده میشن.
    #[instrument(skip(self))]
    pub async fn header(&self, language: Language) -> Result<HeaderView> {
        let (header, menus) = tokio::join!(self.source.header(), self.source.menus());
        let header = header?;
        let menus = menus?;

        debug!(menus = menus.len(), "Header data loaded");

        Ok(HeaderView::build(
            ContentRecord::new(Some(&header), language),
            &menus,
            self.cms_host.as_deref(),
        ))
    }

    /// لیست پروژه‌ها با فیلتر زبان و صفحه‌بندی
    ///
    /// `All` پست‌های هر دو زبان رو جدیدترین اول برمیگردونه.
    #[instrument(skip(self))]
    pub async fn projects(
        &self,
        language: Language,
        filter: ProjectFilter,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<PaginatedResult<PostView>> {
        let posts = self.source.posts().await?;

        let list: Vec<Post> = match filter.language() {
            Some(language) => posts.by_language(language).to_vec(),
            None => posts.all_newest_first(),
        };

        let pagination = Pagination::new(page.unwrap_or(1), per_page.unwrap_or(self.per_page));
        Ok(PaginatedResult::from_items(list, &pagination)
            .map(|post| PostView::summary(&post, language)))
    }

    /// پروژه‌های منتخب صفحه اصلی: صفحه اول پروژه‌های زبان جاری
    #[instrument(skip(self))]
    pub async fn featured_projects(&self, language: Language) -> Result<Vec<PostView>> {
        let posts = self.source.posts().await?;

        Ok(posts
            .by_language(language)
            .iter()
            .take(self.per_page as usize)
            .map(|post| PostView::summary(post, language))
            .collect())
    }

    /// یک پروژه با slug؛ `None` اگه وجود نداشته باشه
    #[instrument(skip(self))]
    pub async fn project(&self, language: Language, slug: &str) -> Result<Option<PostView>> {
        if slug.trim().is_empty() {
            return Err(AppError::BadRequest("Project slug is empty".to_string()));
        }

        let post = self.source.post_by_slug(slug).await?;
        Ok(post.map(|post| PostView::detail(&post, language)))
    }

    async fn page_fields(&self, kind: PageKind, language: Language) -> Result<Value> {
        let data = self.source.page(kind).await?;
        let [page, fields] = kind.data_path();

        let bundle = data
            .get(page)
            .and_then(|p| p.get(fields))
            .filter(|v| !v.is_null())
            .ok_or_missing(kind.section_name())?;

        Ok(localize_record(bundle, language))
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::MockContentSource;
    use crate::config::ConfigBuilder;
    use crate::models::{Connection, Menu, MenuItem, MultilingualPosts};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn service(source: MockContentSource) -> ContentService {
        let config = ConfigBuilder::new()
            .cms_graphql_url("https://cms.example.com/admin/graphql")
            .projects_per_page(2)
            .build();
        ContentService::new(Arc::new(source), &config)
    }

    fn post(slug: &str, date: &str) -> Post {
        serde_json::from_value(json!({ "id": slug, "title": slug, "slug": slug, "date": date }))
            .unwrap()
    }

    fn posts() -> MultilingualPosts {
        MultilingualPosts {
            en: Some(Connection {
                nodes: vec![post("en-one", "2024-01-01T00:00:00"), post("en-two", "2024-03-01T00:00:00")],
            }),
            fa: Some(Connection {
                nodes: vec![
                    post("yek", "2024-02-01T00:00:00"),
                    post("do", "2023-01-01T00:00:00"),
                    post("se", "2022-01-01T00:00:00"),
                ],
            }),
        }
    }

    #[tokio::test]
    async fn test_home_is_localized() {
        let mut source = MockContentSource::new();
        source.expect_page().returning(|_| {
            Ok(json!({
                "page": {
                    "title": "home",
                    "homeFields": { "intro": { "title": "سلام", "enTitle": "Hello" } }
                }
            }))
        });

        let home = service(source).home(Language::En).await.unwrap();
        assert_eq!(home, json!({ "intro": { "title": "Hello" } }));
    }

    #[tokio::test]
    async fn test_missing_page_fields() {
        let mut source = MockContentSource::new();
        source
            .expect_page()
            .returning(|_| Ok(json!({ "page": { "aboutFields": null } })));

        let error = service(source).about(Language::Fa).await.unwrap_err();
        assert_eq!(error.to_string(), "About data structure is incorrect");
    }

    #[tokio::test]
    async fn test_contact_missing_structure() {
        let mut source = MockContentSource::new();
        source
            .expect_page()
            .withf(|kind| *kind == PageKind::Contact)
            .returning(|_| Ok(json!({ "page": null })));

        let error = service(source).contact(Language::En).await.unwrap_err();
        assert!(matches!(error, AppError::MissingData(_)));
        assert_eq!(error.to_string(), "Contact data structure is incorrect");
    }

    #[tokio::test]
    async fn test_contact_resolves_language() {
        let mut source = MockContentSource::new();
        source.expect_page().returning(|_| {
            Ok(json!({
                "page": { "contact": { "title": "تماس", "enTitle": "Contact" } }
            }))
        });

        let contact = service(source).contact(Language::En).await.unwrap();
        assert_eq!(contact.title, "Contact");
        assert_eq!(contact.info.email, "");
    }

    #[tokio::test]
    async fn test_cms_failure_propagates() {
        let mut source = MockContentSource::new();
        source
            .expect_page()
            .returning(|_| Err(AppError::Cms("unreachable".into())));

        let error = service(source).home(Language::Fa).await.unwrap_err();
        assert!(error.is_content_failure());
    }

    #[tokio::test]
    async fn test_header_selects_language_menu() {
        let mut source = MockContentSource::new();
        source
            .expect_header()
            .returning(|| Ok(json!({ "siteName": "امینا", "enSiteName": "Amina" })));
        source.expect_menus().returning(|| {
            let menu = |name: &str, url: &str| Menu {
                id: name.to_string(),
                name: name.to_string(),
                menu_items: Connection {
                    nodes: vec![MenuItem {
                        id: format!("{name}-1"),
                        label: name.to_string(),
                        url: url.to_string(),
                        parent_id: None,
                    }],
                },
            };
            Ok(vec![
                menu("Main", "https://cms.example.com/fa/"),
                menu("Main-en", "https://cms.example.com/en/"),
            ])
        });

        let header = service(source).header(Language::En).await.unwrap();
        assert_eq!(header.site_name, "Amina");
        assert_eq!(header.menu[0].url, "/en/");
    }

    #[tokio::test]
    async fn test_header_fails_when_menus_fail() {
        let mut source = MockContentSource::new();
        source.expect_header().returning(|| Ok(json!(null)));
        source
            .expect_menus()
            .returning(|| Err(AppError::Cms("boom".into())));

        assert!(service(source).header(Language::Fa).await.is_err());
    }

    #[tokio::test]
    async fn test_projects_filter_and_paging() {
        let mut source = MockContentSource::new();
        source.expect_posts().returning(|| Ok(posts()));
        let service = service(source);

        let all = service.projects(Language::En, ProjectFilter::All, None, None).await.unwrap();
        let slugs: Vec<_> = all.data.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["en-two", "yek"]);
        assert_eq!(all.pagination.total_items, 5);
        assert_eq!(all.pagination.total_pages, 3);

        let farsi = service
            .projects(Language::Fa, ProjectFilter::Fa, Some(2), None)
            .await
            .unwrap();
        let slugs: Vec<_> = farsi.data.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["se"]);
        assert!(!farsi.pagination.has_next);
    }

    #[tokio::test]
    async fn test_featured_projects_uses_language() {
        let mut source = MockContentSource::new();
        source.expect_posts().returning(|| Ok(posts()));

        let featured = service(source).featured_projects(Language::Fa).await.unwrap();
        let slugs: Vec<_> = featured.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["yek", "do"]);
    }

    #[tokio::test]
    async fn test_project_by_slug() {
        let mut source = MockContentSource::new();
        source.expect_post_by_slug().returning(|slug| {
            if slug != "en-one" {
                return Ok(None);
            }
            let mut found = post("en-one", "2024-01-01T00:00:00");
            found.content = Some("<p>body</p>".into());
            Ok(Some(found))
        });
        let service = service(source);

        let project = service.project(Language::Fa, "en-one").await.unwrap().unwrap();
        assert_eq!(project.content.as_deref(), Some("<p>body</p>"));
        assert_eq!(project.language, Language::En);
        assert_eq!(project.display_date, "۱۴۰۲/۱۰/۱۱");

        assert!(service.project(Language::En, "missing").await.unwrap().is_none());
        assert!(service.project(Language::En, " ").await.is_err());
    }
}
