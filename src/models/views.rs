//! # مدل‌های نمایشی (Views)
//!
//! خروجی resolve شده برای یک زبان. هیچ فیلد `enX` به این مدل‌ها نمیرسه؛
//! انتخاب بین دو نسخه قبل از ساخت view انجام میشه.

use serde::{Deserialize, Serialize};

use super::{select_menu, Language, MediaItem, Menu, MenuItem, Post};
use crate::i18n::format_date;
use crate::localization::{ContentRecord, Localized};
use crate::utils::{strip_html, to_route_path, truncate};

/// نام سایت وقتی CMS نداره
pub const DEFAULT_SITE_NAME: &str = "Portfolio";

/// حداکثر طول خلاصه پست (کاراکتر)
pub const EXCERPT_LENGTH: usize = 160;

/// عمق مجاز زیرمنوها
const MAX_MENU_DEPTH: usize = 4;

// =====================================
// Links & Media
// =====================================
/// لینک ACF (`{title, url, target}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkView {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// خوندن `{ node: MediaItem }` از رکورد
fn media_node(record: ContentRecord<'_>) -> Option<MediaItem> {
    record
        .child("node")
        .value()
        .and_then(|value| MediaItem::deserialize(value).ok())
}

// =====================================
// Contact
// =====================================
/// صفحه تماس
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactView {
    pub title: String,
    pub subtitle: String,
    pub info: ContactInfoView,
    pub social: SocialView,
    pub location: LocationView,
}

/// اطلاعات تماس
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfoView {
    pub title: String,
    pub subtitle: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// شبکه‌های اجتماعی
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialView {
    pub title: String,
    pub items: Vec<SocialItemView>,
}

/// یک شبکه اجتماعی
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialItemView {
    pub logo: Option<MediaItem>,
    pub link: LinkView,
}

/// موقعیت و نقشه
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationView {
    pub title: String,
    /// متن ساده، بدون تگ HTML
    pub description: String,
    /// آدرس embed نقشه
    pub map: String,
}

impl ContactView {
    /// ساخت از رکورد `page.contact`
    ///
    /// اگه رکورد نباشه `None`؛ زیربخش‌های غایب مقدار خالی میگیرن.
    ///
    /// # مثال
    /// ```rust
    /// use portfolio_cms::{localization::ContentRecord, models::{ContactView, Language}};
    /// use serde_json::json;
    ///
    /// let data = json!({ "title": "تماس", "enTitle": "Contact", "info": { "email": "a@b.c" } });
    /// let view = ContactView::from_record(ContentRecord::new(Some(&data), Language::En)).unwrap();
    ///
    /// assert_eq!(view.title, "Contact");
    /// assert_eq!(view.info.email, "a@b.c");
    /// ```
    #[must_use]
    pub fn from_record(contact: ContentRecord<'_>) -> Option<Self> {
        if !contact.is_present() {
            return None;
        }
        let language = contact.language();

        let info = contact.child("info");
        let social = contact.child("social");
        let location = contact.child("location");

        let items = social
            .items("items")
            .into_iter()
            .filter_map(|item| {
                let link = item.localized::<LinkView>("link")?.into_resolved(language);
                Some(SocialItemView {
                    logo: media_node(item.child("logo")),
                    link,
                })
            })
            .collect();

        Some(Self {
            title: contact.text("title"),
            subtitle: contact.text("subtitle"),
            info: ContactInfoView {
                title: info.text("title"),
                subtitle: info.text("subtitle"),
                email: info.raw_text("email"),
                phone: info.raw_text("phone"),
                address: info.text("address"),
            },
            social: SocialView {
                title: social.text("title"),
                items,
            },
            location: LocationView {
                title: location.text("title"),
                description: strip_html(&location.text("desc")),
                map: location.text("map"),
            },
        })
    }
}

// =====================================
// Header
// =====================================
/// هدر سایت: نام، لوگو و منوی زبان جاری
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderView {
    pub site_name: String,
    pub logo: Option<MediaItem>,
    pub menu: Vec<MenuLink>,
}

/// آیتم منو آماده نمایش
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuLink {
    pub id: String,
    pub label: String,

    /// مسیر داخلی (`/about`) یا آدرس کامل برای لینک بیرونی
    pub url: String,
    pub external: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuLink>,
}

impl MenuLink {
    /// ساخت درخت منو از لیست تخت وردپرس
    #[must_use]
    pub fn tree(items: &[MenuItem], cms_host: Option<&str>) -> Vec<Self> {
        items
            .iter()
            .filter(|item| item.parent_id.is_none())
            .map(|item| Self::build(item, items, cms_host, 0))
            .collect()
    }

    fn build(item: &MenuItem, all: &[MenuItem], cms_host: Option<&str>, depth: usize) -> Self {
        let (url, external) = match to_route_path(&item.url, cms_host) {
            Some(path) => (path, false),
            None => (item.url.clone(), true),
        };

        let children = if depth + 1 < MAX_MENU_DEPTH {
            all.iter()
                .filter(|child| child.parent_id.as_deref() == Some(item.id.as_str()))
                .map(|child| Self::build(child, all, cms_host, depth + 1))
                .collect()
        } else {
            Vec::new()
        };

        Self {
            id: item.id.clone(),
            label: item.label.clone(),
            url,
            external,
            children,
        }
    }
}

impl HeaderView {
    /// ساخت از رکورد `headerFooter.header` و لیست منوها
    ///
    /// منوی مناسب زبان رکورد انتخاب میشه.
    #[must_use]
    pub fn build(header: ContentRecord<'_>, menus: &[Menu], cms_host: Option<&str>) -> Self {
        let site_name = header
            .localized::<String>("siteName")
            .map(|name| name.into_resolved(header.language()))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_NAME.to_string());

        let menu = select_menu(menus, header.language())
            .map(|menu| MenuLink::tree(&menu.menu_items.nodes, cms_host))
            .unwrap_or_default();

        Self {
            site_name,
            logo: media_node(header.child("logo")),
            menu,
        }
    }
}

// =====================================
// Posts
// =====================================
/// پروژه (پست) آماده نمایش
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub language: Language,

    /// خلاصه بدون HTML
    pub excerpt: String,
    pub date: String,

    /// تاریخ به تقویم و ارقام زبان صفحه؛ اگه parse نشه همون `date`
    pub display_date: String,
    pub image_url: Option<String>,
    pub site_url: Option<String>,
    pub tags: Vec<String>,

    /// بدنه HTML؛ فقط در صفحه تک پروژه
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PostView {
    /// نسخه خلاصه برای لیست‌ها
    ///
    /// `language` زبان صفحه هست، نه زبان خود پست.
    #[must_use]
    pub fn summary(post: &Post, language: Language) -> Self {
        let excerpt = post
            .excerpt
            .as_deref()
            .map(|html| truncate(&strip_html(html), EXCERPT_LENGTH))
            .unwrap_or_default();

        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            language: post.language(),
            excerpt,
            date: post.date.clone(),
            display_date: post
                .published_at()
                .map(|at| format_date(at.date(), language))
                .unwrap_or_else(|| post.date.clone()),
            image_url: post.image_url().map(str::to_string),
            site_url: post.project.as_ref().and_then(|p| p.site_url.clone()),
            tags: post.tags(),
            content: None,
        }
    }

    /// نسخه کامل با بدنه
    #[must_use]
    pub fn detail(post: &Post, language: Language) -> Self {
        Self {
            content: post.content.clone(),
            ..Self::summary(post, language)
        }
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Connection;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn contact_fixture() -> serde_json::Value {
        json!({
            "title": "تماس با من",
            "enTitle": "Contact me",
            "subtitle": "در تماس باشید",
            "info": {
                "title": "اطلاعات",
                "enTitle": "Info",
                "email": "hello@example.com",
                "phone": "+98 912 000 0000",
                "address": "تهران",
                "enAddress": "Tehran"
            },
            "social": {
                "title": "شبکه‌ها",
                "items": [
                    {
                        "logo": { "node": { "sourceUrl": "https://cdn/gh.svg", "altText": "GitHub" } },
                        "link": { "title": "گیت‌هاب", "url": "https://github.com/a", "target": "_blank" },
                        "enLink": { "title": "GitHub", "url": "https://github.com/a", "target": "_blank" }
                    },
                    { "logo": null }
                ]
            },
            "location": {
                "title": "موقعیت",
                "desc": "<p>دفتر <b>مرکزی</b></p>",
                "enDesc": "<p>Head <b>office</b></p>",
                "map": "https://maps/fa",
                "enMap": ""
            }
        })
    }

    #[test]
    fn test_contact_english() {
        let data = contact_fixture();
        let view = ContactView::from_record(ContentRecord::new(Some(&data), Language::En)).unwrap();

        assert_eq!(view.title, "Contact me");
        assert_eq!(view.subtitle, "در تماس باشید");
        assert_eq!(view.info.title, "Info");
        assert_eq!(view.info.address, "Tehran");
        assert_eq!(view.social.title, "شبکه‌ها");
        assert_eq!(view.social.items.len(), 1);
        assert_eq!(view.social.items[0].link.title, "GitHub");
        assert_eq!(view.location.description, "Head office");
        assert_eq!(view.location.map, "https://maps/fa");
    }

    #[test]
    fn test_contact_farsi() {
        let data = contact_fixture();
        let view = ContactView::from_record(ContentRecord::new(Some(&data), Language::Fa)).unwrap();

        assert_eq!(view.title, "تماس با من");
        assert_eq!(view.info.address, "تهران");
        assert_eq!(view.social.items[0].link.title, "گیت‌هاب");
        assert_eq!(
            view.social.items[0].logo.as_ref().map(|l| l.source_url.as_str()),
            Some("https://cdn/gh.svg")
        );
        assert_eq!(view.location.description, "دفتر مرکزی");
    }

    #[test]
    fn test_contact_absent() {
        assert!(ContactView::from_record(ContentRecord::new(None, Language::Fa)).is_none());
    }

    fn item(id: &str, url: &str, parent: Option<&str>) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            label: id.to_string(),
            url: url.to_string(),
            parent_id: parent.map(str::to_string),
        }
    }

    #[test]
    fn test_header_menu_tree() {
        let menus = vec![Menu {
            id: "m".into(),
            name: "Main".into(),
            menu_items: Connection {
                nodes: vec![
                    item("about", "https://cms.example.com/about/", None),
                    item("gh", "https://github.com/a", None),
                    item("team", "https://cms.example.com/about/team", Some("about")),
                ],
            },
        }];
        let header = json!({ "siteName": "امینا", "enSiteName": "Amina" });
        let view = HeaderView::build(
            ContentRecord::new(Some(&header), Language::En),
            &menus,
            Some("cms.example.com"),
        );

        assert_eq!(view.site_name, "Amina");
        assert_eq!(view.menu.len(), 2);
        assert_eq!(view.menu[0].url, "/about/");
        assert!(!view.menu[0].external);
        assert_eq!(view.menu[0].children[0].url, "/about/team");
        assert!(view.menu[1].external);
    }

    #[test]
    fn test_header_defaults() {
        let view = HeaderView::build(ContentRecord::new(None, Language::Fa), &[], None);
        assert_eq!(view.site_name, DEFAULT_SITE_NAME);
        assert!(view.menu.is_empty());
        assert!(view.logo.is_none());
    }

    #[test]
    fn test_post_summary_strips_excerpt() {
        let post: Post = serde_json::from_value(json!({
            "id": "1",
            "title": "HyperMe",
            "slug": "en-hyperme",
            "date": "2024-05-01T10:00:00",
            "excerpt": "<p>A <em>fast</em> site</p>\n",
            "content": "<p>body</p>"
        }))
        .unwrap();

        let summary = PostView::summary(&post, Language::En);
        assert_eq!(summary.excerpt, "A fast site");
        assert_eq!(summary.language, Language::En);
        assert!(summary.content.is_none());

        assert_eq!(
            PostView::detail(&post, Language::En).content.as_deref(),
            Some("<p>body</p>")
        );
    }

    #[test]
    fn test_post_display_date_follows_page_language() {
        let post: Post = serde_json::from_value(json!({
            "id": "1",
            "title": "HyperMe",
            "slug": "en-hyperme",
            "date": "2024-05-01T10:00:00"
        }))
        .unwrap();

        assert_eq!(PostView::summary(&post, Language::En).display_date, "5/1/2024");
        assert_eq!(PostView::summary(&post, Language::Fa).display_date, "۱۴۰۳/۲/۱۲");

        let undated = Post {
            date: "soon".into(),
            ..post
        };
        assert_eq!(PostView::summary(&undated, Language::Fa).display_date, "soon");
    }
}
