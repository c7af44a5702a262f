//! # کوئری‌های GraphQL
//!
//! هر فیلد قابل ترجمه کنار همزاد `enX` خودش خواسته میشه تا resolver
//! بتونه بینشون انتخاب کنه.

/// یک کوئری با نام operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphQlQuery {
    /// نام operation (باید با نام داخل document یکی باشه)
    pub operation: &'static str,
    pub document: &'static str,
}

pub const GET_MENUS: GraphQlQuery = GraphQlQuery {
    operation: "GetMenus",
    document: r#"
query GetMenus {
  menus {
    nodes {
      id
      name
      menuItems(first: 100) {
        nodes {
          id
          label
          url
          parentId
        }
      }
    }
  }
}
"#,
};

pub const GET_HEADER: GraphQlQuery = GraphQlQuery {
    operation: "GetHeader",
    document: r#"
query GetHeader {
  headerFooter {
    header {
      siteName
      enSiteName
      logo {
        node {
          sourceUrl
          altText
        }
      }
    }
  }
}
"#,
};

pub const GET_HOME_FIELDS: GraphQlQuery = GraphQlQuery {
    operation: "GetHomeFields",
    document: r#"
query GetHomeFields {
  page(id: "home", idType: URI) {
    title
    homeFields {
      intro {
        title
        enTitle
        subtitle
        enSubtitle
        items {
          title
          enTitle
          description
          enDescription
        }
        button {
          title
          url
          target
        }
        enButton {
          title
          url
          target
        }
      }
    }
  }
}
"#,
};

pub const GET_ABOUT_FIELDS: GraphQlQuery = GraphQlQuery {
    operation: "GetAboutFields",
    document: r#"
query GetAboutFields {
  page(id: "about", idType: URI) {
    title
    aboutFields {
      hero {
        title
        enTitle
        subtitle
        enSubtitle
        image {
          node {
            sourceUrl
            altText
          }
        }
      }
      about {
        title
        enTitle
        desc
        enDesc
      }
      skills {
        title
        enTitle
        items {
          name
          enName
          level
        }
      }
      experience {
        title
        enTitle
        items {
          role
          enRole
          company
          enCompany
          period
          enPeriod
          desc
          enDesc
        }
      }
      button {
        title
        url
        target
      }
      enButton {
        title
        url
        target
      }
    }
  }
}
"#,
};

pub const GET_CONTACT_FIELDS: GraphQlQuery = GraphQlQuery {
    operation: "GetContactFields",
    document: r#"
query GetContactFields {
  page(id: "contact", idType: URI) {
    contact {
      title
      enTitle
      subtitle
      enSubtitle
      info {
        title
        enTitle
        subtitle
        enSubtitle
        email
        phone
        address
        enAddress
      }
      social {
        title
        enTitle
        items {
          logo {
            node {
              sourceUrl
              altText
            }
          }
          link {
            title
            url
            target
          }
          enLink {
            title
            url
            target
          }
        }
      }
      location {
        title
        enTitle
        desc
        enDesc
        map
        enMap
      }
    }
  }
}
"#,
};

/// پست‌های هر دو زبان در یک درخواست
///
/// پست‌های انگلیسی با slug `en-` شروع میشن؛ `FaPost` بقیه رو میگیره.
pub const GET_MULTILINGUAL_POSTS: GraphQlQuery = GraphQlQuery {
    operation: "GetMultilingualPosts",
    document: r#"
fragment PostFields on Post {
  id
  title
  slug
  date
  excerpt
  featuredImage {
    node {
      sourceUrl
      altText
    }
  }
  project {
    siteUrl
  }
  categories {
    nodes {
      name
      slug
    }
  }
}

query GetMultilingualPosts {
  EnPost: posts(first: 100, where: { search: "en-", orderby: { field: DATE, order: DESC } }) {
    nodes {
      ...PostFields
    }
  }
  FaPost: posts(first: 100, where: { orderby: { field: DATE, order: DESC } }) {
    nodes {
      ...PostFields
    }
  }
}
"#,
};

pub const GET_POST_BY_SLUG: GraphQlQuery = GraphQlQuery {
    operation: "GetPostBySlug",
    document: r#"
query GetPostBySlug($slug: ID!) {
  post(id: $slug, idType: SLUG) {
    id
    title
    content
    excerpt
    slug
    date
    featuredImage {
      node {
        sourceUrl
        altText
      }
    }
    project {
      siteUrl
    }
    categories {
      nodes {
        name
        slug
      }
    }
  }
}
"#,
};
