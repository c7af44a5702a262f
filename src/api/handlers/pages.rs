//! # Page Handlers
//!
//! صفحات سایت: اصلی، درباره، تماس، پروژه‌ها
//!
//! ## مفاهیم:
//! - هر صفحه یک [`PageResponse`] هست: زبان، جهت متن، تم و هدر همراه محتوا
//! - بخش‌های مستقل با `tokio::join!` همزمان خونده میشن
//! - خطای CMS فقط همون بخش رو به پیام خطا تبدیل میکنه (پاسخ همچنان 200)
//! - پیام خطای بخش‌ها از [`crate::i18n`] و به زبان صفحه میاد

use axum::{
    extract::{Path, State},
    http::Uri,
};
use serde_json::Value;
use tracing::debug;

use crate::{
    api::extractors::{QueryParams, RequestId, RequestLanguage},
    error::{AppError, Result},
    i18n::{self, keys},
    models::{
        ContactView, HomeContent, PageResponse, PaginatedResult, PostView, ProjectsQuery, Section,
    },
    services::AppState,
};

// =====================================
// Home
// =====================================
/// صفحه اصلی
///
/// # Endpoint
/// `GET /?lang=en`
///
/// # Response
/// ```json
/// {
///   "lang": "fa",
///   "dir": "rtl",
///   "dir_class": "rtl",
///   "theme": "light",
///   "header": { "status": "ready", "data": { ... } },
///   "content": {
///     "intro": { "status": "ready", "data": { ... } },
///     "featured_projects": { "status": "error", "message": "Error loading posts", "detail": "..." }
///   }
/// }
/// ```
pub async fn home(
    State(state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
) -> PageResponse<HomeContent> {
    let content = &state.content;
    let (header, intro, featured) = tokio::join!(
        content.header(lang),
        content.home(lang),
        content.featured_projects(lang),
    );

    PageResponse::new(
        lang,
        state.theme.current_theme(),
        Section::from_result(header, keys::HEADER_ERROR, lang),
        HomeContent {
            intro: Section::from_result(intro, keys::HOME_ERROR, lang),
            featured_projects: Section::from_result(featured, keys::POSTS_ERROR, lang),
        },
    )
}

// =====================================
// About
// =====================================
/// صفحه درباره
///
/// # Endpoint
/// `GET /about`
pub async fn about(
    State(state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
) -> PageResponse<Section<Value>> {
    let (header, about) = tokio::join!(state.content.header(lang), state.content.about(lang));

    PageResponse::new(
        lang,
        state.theme.current_theme(),
        Section::from_result(header, keys::HEADER_ERROR, lang),
        Section::from_result(about, keys::ABOUT_ERROR, lang),
    )
}

// =====================================
// Contact
// =====================================
/// صفحه تماس
///
/// # Endpoint
/// `GET /contact`
pub async fn contact(
    State(state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
) -> PageResponse<Section<ContactView>> {
    let (header, contact) =
        tokio::join!(state.content.header(lang), state.content.contact(lang));

    PageResponse::new(
        lang,
        state.theme.current_theme(),
        Section::from_result(header, keys::HEADER_ERROR, lang),
        Section::from_result(contact, keys::CONTACT_ERROR, lang),
    )
}

// =====================================
// Projects
// =====================================
/// لیست پروژه‌ها
///
/// # Endpoint
/// `GET /projects?filter=en&page=2&per_page=6`
///
/// `filter` یکی از `all` (پیش‌فرض)، `en` یا `fa`
pub async fn projects(
    State(state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
    QueryParams(query): QueryParams<ProjectsQuery>,
) -> PageResponse<Section<PaginatedResult<PostView>>> {
    let (header, projects) = tokio::join!(
        state.content.header(lang),
        state
            .content
            .projects(lang, query.filter, query.page, query.per_page),
    );

    PageResponse::new(
        lang,
        state.theme.current_theme(),
        Section::from_result(header, keys::HEADER_ERROR, lang),
        Section::from_result(projects, keys::PROJECTS_ERROR, lang),
    )
}

/// جزئیات یک پروژه
///
/// # Endpoint
/// `GET /projects/:slug`
///
/// # Errors
/// - `404` اگه پروژه وجود نداشته باشه (پیام به زبان صفحه)
/// - خطای CMS مثل بقیه صفحات inline برمیگرده
pub async fn project(
    State(state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
    Path(slug): Path<String>,
) -> Result<PageResponse<Section<PostView>>> {
    let (header, project) =
        tokio::join!(state.content.header(lang), state.content.project(lang, &slug));

    let content = match project {
        Ok(Some(view)) => Section::Ready { data: view },
        Ok(None) => return Err(AppError::project_not_found(&slug, lang)),
        Err(e) if e.is_content_failure() => {
            Section::from_result(Err(e), keys::PROJECTS_ERROR, lang)
        }
        Err(e) => return Err(e),
    };

    Ok(PageResponse::new(
        lang,
        state.theme.current_theme(),
        Section::from_result(header, keys::HEADER_ERROR, lang),
        content,
    ))
}

// =====================================
// Fallback
// =====================================
/// مسیر ناشناخته
///
/// `?lang` نامعتبر اینجا هم `400` میده.
pub async fn not_found(
    RequestId(request_id): RequestId,
    RequestLanguage(lang): RequestLanguage,
    uri: Uri,
) -> AppError {
    debug!(%request_id, path = uri.path(), "No route matched");
    AppError::NotFound(i18n::t_with(
        lang,
        keys::COMMON_ROUTE_NOT_FOUND,
        &[("path", uri.path())],
    ))
}
