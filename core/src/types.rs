//! WordPress REST response records.
//!
//! # Design
//! Deserializing into these structs is the schema check. Required fields
//! are plain fields, optional ones are `Option`, and fixed literals such as
//! `taxonomy: "category"` are single-variant enums so a wrong value rejects
//! the whole response. Fields the client does not model are ignored.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Publication status used to filter content queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Publish,
}

impl ContentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Publish => "publish",
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentStatus {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ContentStatus::Draft),
            "publish" => Ok(ContentStatus::Publish),
            other => Err(ConfigError::InvalidStatus(other.to_string())),
        }
    }
}

/// Arguments for a posts listing. `Default` asks for the first page of nine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostsOverviewParams {
    pub status: Option<ContentStatus>,
    pub page: u32,
    pub per_page: u32,
    pub tag_ids: Option<Vec<u64>>,
    pub category_ids: Option<Vec<u64>>,
}

impl Default for PostsOverviewParams {
    fn default() -> Self {
        Self {
            status: None,
            page: 1,
            per_page: 9,
            tag_ids: None,
            category_ids: None,
        }
    }
}

/// Arguments for a single-post lookup by slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetailParams {
    pub slug: String,
    #[serde(default)]
    pub status: Option<ContentStatus>,
    #[serde(default)]
    pub tag_ids: Option<Vec<u64>>,
    #[serde(default)]
    pub category_ids: Option<Vec<u64>>,
}

impl PostDetailParams {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            status: None,
            tag_ids: None,
            category_ids: None,
        }
    }
}

/// An HTML fragment as WordPress renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendered {
    pub rendered: String,
}

/// A rendered fragment that may sit behind a post password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedRendered {
    pub rendered: String,
    pub protected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryTaxonomy {
    #[serde(rename = "category")]
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagTaxonomy {
    #[serde(rename = "post_tag")]
    PostTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageType {
    #[serde(rename = "page")]
    Page,
}

/// A term of the `category` taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub count: u64,
    pub description: String,
    pub link: String,
    pub name: String,
    pub slug: String,
    pub taxonomy: CategoryTaxonomy,
    pub parent: u64,
    pub meta: Vec<serde_json::Value>,
}

/// A term of the `post_tag` taxonomy. Tags are flat, so there is no parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub count: u64,
    pub description: String,
    pub link: String,
    pub name: String,
    pub slug: String,
    pub taxonomy: TagTaxonomy,
    pub meta: Vec<serde_json::Value>,
}

/// Author summary embedded by `_embed=true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedAuthor {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_urls: Option<BTreeMap<String, String>>,
}

/// Featured media summary embedded by `_embed=true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedMedia {
    pub id: u64,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Embedded {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Vec<EmbeddedAuthor>>,
    #[serde(
        rename = "wp:featuredmedia",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub featured_media: Option<Vec<EmbeddedMedia>>,
}

/// Listing form of a post. The pages overview uses the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOverview {
    pub id: u64,
    pub title: Rendered,
    pub excerpt: Rendered,
    pub date: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<u64>,
    #[serde(
        rename = "_embedded",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub embedded: Option<Embedded>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub overview: PostOverview,
    pub content: Rendered,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOverview {
    pub id: u64,
    pub date: String,
    pub slug: String,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: PageType,
    pub link: String,
    pub title: Rendered,
    pub excerpt: ProtectedRendered,
    pub parent: u64,
    pub menu_order: i64,
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
    pub class_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub footnotes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDetail {
    #[serde(flatten)]
    pub overview: PageOverview,
    pub date_gmt: String,
    pub guid: Rendered,
    pub modified: String,
    pub modified_gmt: String,
    pub content: ProtectedRendered,
    pub author: u64,
    pub featured_media: u64,
    pub comment_status: String,
    pub ping_status: String,
    pub template: String,
    pub meta: PageMeta,
}

/// Paging state read from `X-WP-TotalPages` / `X-WP-Total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub total_pages: u64,
    pub total_posts: u64,
    pub current_page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsOverviewResult {
    pub posts: Vec<PostOverview>,
    pub pagination: PaginationInfo,
}

/// Raw contents of the site's `/llms.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmsTxt {
    pub llms_txt: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tag_accepts_post_tag_taxonomy() {
        let tag: Tag = serde_json::from_value(json!({
            "id": 1, "count": 2, "description": "", "link": "l",
            "name": "News", "slug": "news", "taxonomy": "post_tag", "meta": []
        }))
        .unwrap();
        assert_eq!(tag.taxonomy, TagTaxonomy::PostTag);
        assert_eq!(tag.slug, "news");
    }

    #[test]
    fn category_rejects_tag_taxonomy() {
        let result: Result<Category, _> = serde_json::from_value(json!({
            "id": 1, "count": 0, "description": "", "link": "l", "name": "News",
            "slug": "news", "taxonomy": "post_tag", "parent": 0, "meta": []
        }));
        assert!(result.is_err());
    }

    #[test]
    fn category_requires_parent() {
        let result: Result<Category, _> = serde_json::from_value(json!({
            "id": 1, "count": 0, "description": "", "link": "l", "name": "News",
            "slug": "news", "taxonomy": "category", "meta": []
        }));
        assert!(result.is_err());
    }

    #[test]
    fn post_overview_reads_embedded_author_and_media() {
        let post: PostOverview = serde_json::from_value(json!({
            "id": 7,
            "title": { "rendered": "Hello" },
            "excerpt": { "rendered": "<p>Hi</p>" },
            "date": "2024-05-01T10:00:00",
            "slug": "hello",
            "author": 2,
            "featured_media": 9,
            "_embedded": {
                "author": [{ "id": 2, "name": "Ada", "avatar_urls": { "24": "a.png" } }],
                "wp:featuredmedia": [{ "id": 9, "source_url": "https://cdn/x.jpg" }]
            }
        }))
        .unwrap();
        let embedded = post.embedded.unwrap();
        assert_eq!(embedded.author.unwrap()[0].name, "Ada");
        let media = embedded.featured_media.unwrap();
        assert_eq!(media[0].source_url, "https://cdn/x.jpg");
        assert_eq!(media[0].alt_text, None);
    }

    #[test]
    fn post_detail_without_optional_fields() {
        let post: PostDetail = serde_json::from_value(json!({
            "id": 7,
            "title": { "rendered": "Hello" },
            "excerpt": { "rendered": "" },
            "content": { "rendered": "<p>Body</p>" },
            "date": "2024-05-01T10:00:00",
            "slug": "hello"
        }))
        .unwrap();
        assert_eq!(post.overview.slug, "hello");
        assert_eq!(post.content.rendered, "<p>Body</p>");
        assert!(post.modified.is_none());
        assert!(post.overview.embedded.is_none());
    }

    #[test]
    fn post_detail_requires_content() {
        let result: Result<PostDetail, _> = serde_json::from_value(json!({
            "id": 7,
            "title": { "rendered": "Hello" },
            "excerpt": { "rendered": "" },
            "date": "2024-05-01T10:00:00",
            "slug": "hello"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn page_overview_rejects_post_type() {
        let result: Result<PageOverview, _> = serde_json::from_value(json!({
            "id": 3, "date": "d", "slug": "about", "status": "publish", "type": "post",
            "link": "l", "title": { "rendered": "About" },
            "excerpt": { "rendered": "", "protected": false },
            "parent": 0, "menu_order": 0, "categories": [], "tags": [], "class_list": []
        }));
        assert!(result.is_err());
    }

    #[test]
    fn posts_overview_params_fill_defaults() {
        let params: PostsOverviewParams = serde_json::from_value(json!({ "page": 3 })).unwrap();
        assert_eq!(params.page, 3);
        assert_eq!(params.per_page, 9);
        assert!(params.tag_ids.is_none());
    }

    #[test]
    fn content_status_parses_known_values_only() {
        assert_eq!("draft".parse::<ContentStatus>(), Ok(ContentStatus::Draft));
        assert_eq!("publish".parse::<ContentStatus>(), Ok(ContentStatus::Publish));
        assert_eq!(
            "Publish".parse::<ContentStatus>(),
            Err(ConfigError::InvalidStatus("Publish".to_string()))
        );
    }
}
