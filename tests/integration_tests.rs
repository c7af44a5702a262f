//! # تست‌های Integration
//!
//! این فایل تست‌های end-to-end رو شامل میشه.
//!
//! ## مفاهیم Rust در تست‌ها:
//! - `#[tokio::test]`: تست‌های async
//! - `tower::ServiceExt::oneshot`: ارسال یک request به router بدون باز کردن پورت
//! - یک منبع محتوای ساختگی به جای CMS واقعی
//!
//! ## اجرای تست‌ها:
//! ```bash
//! cargo test                    # همه تست‌ها
//! cargo test --lib              # فقط تست‌های unit
//! cargo test --test integration_tests  # فقط این فایل
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use portfolio_cms::{
    api::create_router,
    cms::{ContentSource, PageKind},
    config::ConfigBuilder,
    error::{AppError, Result},
    models::{Connection, Menu, MenuItem, MultilingualPosts, Post},
    services::AppState,
    state::MemoryPreferenceStore,
};

// =====================================
// Fake CMS
// =====================================
/// منبع محتوای ساختگی
///
/// `broken` صفحه‌هایی که باید خطای ساختار بدن.
#[derive(Default)]
struct FakeCms {
    broken: Vec<PageKind>,
    offline: bool,
}

fn post(slug: &str, date: &str) -> Post {
    serde_json::from_value(json!({
        "id": slug,
        "title": slug,
        "slug": slug,
        "date": date,
        "excerpt": "<p>Short &amp; sweet</p>",
    }))
    .unwrap()
}

#[async_trait]
impl ContentSource for FakeCms {
    async fn page(&self, kind: PageKind) -> Result<Value> {
        if self.offline {
            return Err(AppError::Cms("connection refused".into()));
        }
        if self.broken.contains(&kind) {
            return Ok(json!({ "page": null }));
        }

        Ok(match kind {
            PageKind::Home => json!({
                "page": {
                    "homeFields": {
                        "intro": { "title": "سلام", "enTitle": "Hello", "subtitle": "زیرنویس", "enSubtitle": "" }
                    }
                }
            }),
            PageKind::About => json!({
                "page": { "aboutFields": { "about": { "desc": "درباره من", "enDesc": "About me" } } }
            }),
            PageKind::Contact => json!({
                "page": {
                    "contact": {
                        "title": "تماس",
                        "enTitle": "Contact",
                        "info": { "email": "me@example.com" }
                    }
                }
            }),
        })
    }

    async fn header(&self) -> Result<Value> {
        Ok(json!({ "siteName": "امینا", "enSiteName": "Amina" }))
    }

    async fn menus(&self) -> Result<Vec<Menu>> {
        let menu = |name: &str, label: &str, url: &str| Menu {
            id: name.to_string(),
            name: name.to_string(),
            menu_items: Connection {
                nodes: vec![MenuItem {
                    id: format!("{name}-1"),
                    label: label.to_string(),
                    url: url.to_string(),
                    parent_id: None,
                }],
            },
        };

        Ok(vec![
            menu("Main", "درباره", "https://cms.example.com/about/"),
            menu("Main-en", "About", "https://cms.example.com/en/about/"),
        ])
    }

    async fn posts(&self) -> Result<MultilingualPosts> {
        Ok(MultilingualPosts {
            en: Some(Connection {
                nodes: vec![post("en-hyperme", "2024-05-01T10:00:00")],
            }),
            fa: Some(Connection {
                nodes: vec![
                    post("hyperme", "2024-04-01T10:00:00"),
                    post("portfolio", "2023-01-01T10:00:00"),
                ],
            }),
        }
        .normalized())
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        if slug != "en-hyperme" {
            return Ok(None);
        }
        let mut found = post(slug, "2024-05-01T10:00:00");
        found.content = Some("<p>Full story</p>".into());
        Ok(Some(found))
    }
}

// =====================================
// Helpers
// =====================================
async fn app_state(cms: FakeCms) -> AppState {
    let config = ConfigBuilder::new()
        .cms_graphql_url("https://cms.example.com/admin/graphql")
        .build();

    AppState::initialize(
        config,
        Arc::new(cms),
        Arc::new(MemoryPreferenceStore::new()),
    )
    .await
}

fn router(state: &AppState) -> Router {
    create_router(state.clone())
}

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
    send(state, Request::get(uri).body(Body::empty()).unwrap()).await
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =====================================
// تست‌های صفحات
// =====================================
mod page_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_home_defaults_to_farsi() {
        let state = app_state(FakeCms::default()).await;
        let (status, headers, body) = get(&state, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_LANGUAGE], "fa");
        assert_eq!(headers["x-text-direction"], "rtl");
        assert_eq!(body["lang"], "fa");
        assert_eq!(body["dir"], "rtl");
        assert_eq!(body["theme"], "light");
        assert_eq!(body["header"]["data"]["site_name"], "امینا");
        assert_eq!(body["header"]["data"]["menu"][0]["url"], "/about/");
        assert_eq!(
            body["content"]["intro"]["data"],
            json!({ "intro": { "title": "سلام", "subtitle": "زیرنویس" } })
        );
        assert_eq!(body["content"]["featured_projects"]["status"], "ready");
        assert_eq!(
            body["content"]["featured_projects"]["data"][0]["slug"],
            "hyperme"
        );
    }

    #[tokio::test]
    async fn test_query_language_does_not_change_state() {
        let state = app_state(FakeCms::default()).await;
        let (status, headers, body) = get(&state, "/?lang=en").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_LANGUAGE], "en");
        assert_eq!(body["dir"], "ltr");
        assert_eq!(body["header"]["data"]["site_name"], "Amina");
        assert_eq!(body["header"]["data"]["menu"][0]["url"], "/en/about/");
        // override خالی نادیده گرفته میشه
        assert_eq!(
            body["content"]["intro"]["data"],
            json!({ "intro": { "title": "Hello", "subtitle": "زیرنویس" } })
        );

        assert_eq!(
            state.language.current_language(),
            portfolio_cms::models::Language::Fa
        );
    }

    #[tokio::test]
    async fn test_unsupported_query_language() {
        let state = app_state(FakeCms::default()).await;
        let (status, _, body) = get(&state, "/about?lang=de").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["supported"], json!(["fa", "en"]));
    }

    #[tokio::test]
    async fn test_broken_section_renders_inline() {
        let state = app_state(FakeCms {
            broken: vec![PageKind::Contact],
            ..FakeCms::default()
        })
        .await;
        let (status, _, body) = get(&state, "/contact").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["header"]["status"], "ready");
        assert_eq!(
            body["content"],
            json!({
                "status": "error",
                "message": "خطا در بارگذاری صفحه تماس",
                "detail": "Contact data structure is incorrect"
            })
        );
    }

    #[tokio::test]
    async fn test_section_error_uses_page_language() {
        let state = app_state(FakeCms {
            offline: true,
            ..FakeCms::default()
        })
        .await;

        let (_, _, body) = get(&state, "/about?lang=fa").await;
        assert_eq!(body["content"]["message"], "خطا در بارگذاری صفحه درباره");
        assert_eq!(body["content"]["detail"], "CMS error: connection refused");

        let (_, _, body) = get(&state, "/about?lang=en").await;
        assert_eq!(body["content"]["message"], "Error loading about page");
    }

    #[tokio::test]
    async fn test_offline_cms_keeps_page_alive() {
        let state = app_state(FakeCms {
            offline: true,
            ..FakeCms::default()
        })
        .await;
        let (status, _, body) = get(&state, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"]["intro"]["status"], "error");
        assert_eq!(body["content"]["featured_projects"]["status"], "ready");
    }

    #[tokio::test]
    async fn test_contact_in_english() {
        let state = app_state(FakeCms::default()).await;
        let (_, _, body) = get(&state, "/contact?lang=en").await;

        assert_eq!(body["content"]["data"]["title"], "Contact");
        assert_eq!(body["content"]["data"]["info"]["email"], "me@example.com");
    }

    #[tokio::test]
    async fn test_projects_filter() {
        let state = app_state(FakeCms::default()).await;

        let (status, _, body) = get(&state, "/projects").await;
        assert_eq!(status, StatusCode::OK);
        let slugs: Vec<&str> = body["content"]["data"]["data"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|p| p["slug"].as_str())
            .collect();
        assert_eq!(slugs, vec!["en-hyperme", "hyperme", "portfolio"]);

        let (_, _, body) = get(&state, "/projects?filter=fa&per_page=1&page=2").await;
        let page = &body["content"]["data"];
        assert_eq!(page["data"][0]["slug"], "portfolio");
        assert_eq!(page["pagination"]["total_items"], 2);
        assert_eq!(page["data"][0]["excerpt"], "Short & sweet");
        assert_eq!(page["data"][0]["display_date"], "۱۴۰۱/۱۰/۱۱");

        let (_, _, body) = get(&state, "/projects?filter=en&lang=en").await;
        assert_eq!(body["content"]["data"]["data"][0]["display_date"], "5/1/2024");
    }

    #[tokio::test]
    async fn test_projects_malformed_query() {
        let state = app_state(FakeCms::default()).await;
        let (status, headers, body) = get(&state, "/projects?page=abc").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(body["error"], "Bad Request");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Bad request: Invalid query"));
    }

    #[tokio::test]
    async fn test_project_detail_and_missing() {
        let state = app_state(FakeCms::default()).await;

        let (status, _, body) = get(&state, "/projects/en-hyperme").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"]["data"]["content"], "<p>Full story</p>");
        assert_eq!(body["content"]["data"]["language"], "en");

        let (status, _, body) = get(&state, "/projects/nothing-here?lang=en").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Not found: Project 'nothing-here' not found");

        let (status, _, body) = get(&state, "/projects/nothing-here").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Not found: پروژه 'nothing-here' پیدا نشد");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let state = app_state(FakeCms::default()).await;
        let (status, headers, body) = get(&state, "/no/such/page?lang=en").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(headers.contains_key("x-request-id"));
        assert_eq!(body["message"], "Not found: No route for /no/such/page");
    }

    #[tokio::test]
    async fn test_translations_catalog() {
        let state = app_state(FakeCms::default()).await;

        let (status, _, body) = get(&state, "/api/translations?lang=en").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["dir"], "ltr");
        assert_eq!(body["data"]["messages"]["common.loading"], "Loading...");
        assert_eq!(body["data"]["messages"]["projects.viewProject"], "View Project");

        let (_, _, body) = get(&state, "/api/translations").await;
        assert_eq!(body["data"]["lang"], "fa");
        assert_eq!(body["data"]["messages"]["pagination.next"], "بعدی");
    }
}

// =====================================
// تست‌های زبان و تم
// =====================================
mod preference_tests {
    use super::*;
    use portfolio_cms::models::{Language, Theme};

    #[tokio::test]
    async fn test_set_language_changes_pages() {
        let state = app_state(FakeCms::default()).await;
        let mut receiver = state.language.subscribe();

        let (status, _, body) = send(
            &state,
            json_request("PUT", "/api/language", json!({ "code": "en" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["code"], "en");
        assert_eq!(body["data"]["is_rtl"], false);
        assert_eq!(body["message"], "Language changed");

        assert!(receiver.has_changed().unwrap());
        assert_eq!(*receiver.borrow_and_update(), Language::En);

        let (_, _, body) = get(&state, "/about").await;
        assert_eq!(body["lang"], "en");
        assert_eq!(body["content"]["data"]["about"]["desc"], "About me");

        // تغییر به همون زبان
        let (_, _, body) = send(
            &state,
            json_request("PUT", "/api/language", json!({ "code": "en" })),
        )
        .await;
        assert_eq!(body["message"], "Language unchanged");
        assert!(!receiver.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_invalid_language_codes() {
        let state = app_state(FakeCms::default()).await;

        let (status, _, _) = send(
            &state,
            json_request("PUT", "/api/language", json!({ "code": "xx" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _, _) = send(
            &state,
            json_request("PUT", "/api/language", json!({ "code": "english" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        assert_eq!(state.language.current_language(), Language::Fa);
    }

    #[tokio::test]
    async fn test_toggle_language_twice() {
        let state = app_state(FakeCms::default()).await;
        let toggle = || Request::post("/api/language/toggle").body(Body::empty()).unwrap();

        let (_, _, body) = send(&state, toggle()).await;
        assert_eq!(body["data"]["code"], "en");

        let (_, _, body) = send(&state, toggle()).await;
        assert_eq!(body["data"]["code"], "fa");
        assert_eq!(body["data"]["dir"], "rtl");
    }

    #[tokio::test]
    async fn test_theme_endpoints() {
        let state = app_state(FakeCms::default()).await;

        let (_, _, body) = get(&state, "/api/theme").await;
        assert_eq!(body["data"]["theme"], "light");

        let (_, _, body) = send(
            &state,
            Request::post("/api/theme/toggle").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(body["data"]["is_dark"], true);
        assert_eq!(state.theme.current_theme(), Theme::Dark);

        let (status, _, _) = send(
            &state,
            json_request("PUT", "/api/theme", json!({ "theme": "sepia" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, _, body) = get(&state, "/").await;
        assert_eq!(body["theme"], "dark");
    }

    #[tokio::test]
    async fn test_health() {
        let state = app_state(FakeCms::default()).await;
        let (status, _, body) = get(&state, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], true);
        assert_eq!(body["language"], "fa");
    }
}

// =====================================
// تست‌های Config
// =====================================
mod config_tests {
    use portfolio_cms::config::{Config, ConfigBuilder, Environment};

    /// تست مقادیر پیش‌فرض
    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.projects_per_page, 6);
        assert!(config.environment.is_development());
        assert!(config.validate().is_ok());
    }

    /// در production آدرس CMS باید https باشه
    #[test]
    fn test_production_requires_https() {
        let config = ConfigBuilder::new()
            .environment(Environment::Production)
            .cms_graphql_url("http://cms.example.com/graphql")
            .build();
        assert!(config.validate().is_err());

        let config = ConfigBuilder::new()
            .environment(Environment::Production)
            .cms_graphql_url("https://cms.example.com/graphql")
            .build();
        assert!(config.validate().is_ok());
        assert_eq!(config.cms_host().as_deref(), Some("cms.example.com"));
    }

    #[test]
    fn test_environment_conversion() {
        assert_eq!(
            Environment::from("production".to_string()),
            Environment::Production
        );
        assert_eq!(
            Environment::from("unknown".to_string()),
            Environment::Development
        );
    }
}

// =====================================
// Property-Based Tests
// =====================================
mod property_tests {
    use portfolio_cms::{
        localization::{localize_record, override_key, resolve},
        models::Language,
    };
    use proptest::prelude::*;
    use serde_json::{json, Map, Value};

    proptest! {
        /// override غیرخالی همیشه در انگلیسی برنده‌ست و در فارسی هیچوقت
        #[test]
        fn english_override_wins(fa in "\\PC*", en in "\\PC+") {
            let record = json!({ "title": fa.clone(), "enTitle": en.clone() });
            let expected_en = json!(en);
            let expected_fa = json!(fa);

            prop_assert_eq!(resolve(&record, "title", Language::En), Some(&expected_en));
            prop_assert_eq!(resolve(&record, "title", Language::Fa), Some(&expected_fa));
        }

        /// بعد از بومی‌سازی هیچ کلید `enX` کنار `x` باقی نمیمونه
        #[test]
        fn localized_record_has_no_overrides(value in "[a-z]{0,8}", english in proptest::bool::ANY) {
            let record = json!({ "desc": value, "enDesc": "english", "nested": { "name": "x", "enName": "y" } });
            let language = if english { Language::En } else { Language::Fa };
            let localized = localize_record(&record, language);

            prop_assert!(localized.get("enDesc").is_none());
            prop_assert!(localized["nested"].get("enName").is_none());
            prop_assert!(localized.get("desc").is_some());
        }

        /// برای هر نام کلیدی: شکل خروجی در دو زبان یکیه و همزادی باقی نمیمونه
        #[test]
        fn localized_shape_for_any_key_names(
            entries in proptest::collection::btree_map("[a-zA-Z_]{0,6}", "[a-z]{0,3}", 0..8),
            fields in proptest::collection::vec("[a-zA-Z_0-9]{0,5}", 0..4),
        ) {
            let mut record = Map::new();
            for (key, value) in entries {
                record.insert(key, Value::String(value));
            }
            for field in &fields {
                record.insert(field.clone(), json!("فارسی"));
                record.insert(override_key(field), json!("english"));
            }
            let record = Value::Object(record);

            let en = localize_record(&record, Language::En);
            let fa = localize_record(&record, Language::Fa);
            let en_keys: Vec<&String> = en.as_object().unwrap().keys().collect();
            let fa_keys: Vec<&String> = fa.as_object().unwrap().keys().collect();
            prop_assert_eq!(&en_keys, &fa_keys);

            for key in en_keys {
                let companion = override_key(key);
                prop_assert!(
                    en.get(companion.as_str()).is_none(),
                    "companion {} of {} leaked", companion, key
                );
            }
        }
    }
}
