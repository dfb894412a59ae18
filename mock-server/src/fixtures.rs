//! Canned site content served by the mock.

use serde_json::{json, Value};

use crate::Site;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "abcd efgh ijkl";

pub const NEWS_CATEGORY: u64 = 3;
pub const DOCS_CATEGORY: u64 = 5;
pub const RELEASE_TAG: u64 = 4;

/// Eleven published posts plus one draft.
pub const PUBLISHED_POSTS: u64 = 11;

const BASE: &str = "http://wordpress.test";

impl Site {
    /// A small blog: two categories, one tag, a published and a draft page,
    /// and a dozen posts newest first.
    pub fn sample() -> Self {
        let mut posts: Vec<Value> = (1..=PUBLISHED_POSTS)
            .rev()
            .map(|n| {
                let mut tags = Vec::new();
                if n % 3 == 0 {
                    tags.push(RELEASE_TAG);
                }
                let category = if n % 2 == 1 { NEWS_CATEGORY } else { DOCS_CATEGORY };
                let slug = format!("post-{n}");
                let date = format!("2024-03-{n:02}T09:00:00");
                post(100 + n, &slug, "publish", &date, category, &tags)
            })
            .collect();
        posts.insert(
            0,
            post(
                200,
                "upcoming-launch",
                "draft",
                "2024-04-01T09:00:00",
                NEWS_CATEGORY,
                &[RELEASE_TAG],
            ),
        );

        Site {
            username: USERNAME.to_string(),
            password: PASSWORD.to_string(),
            authors: vec![json!({
                "id": 1,
                "name": "Ada",
                "url": "",
                "description": "Editor",
                "link": format!("{BASE}/author/ada/"),
                "slug": "ada",
                "avatar_urls": { "24": format!("{BASE}/avatar/ada-24.png"), "96": format!("{BASE}/avatar/ada-96.png") }
            })],
            media: vec![json!({
                "id": 40,
                "source_url": format!("{BASE}/wp-content/uploads/cover.jpg"),
                "alt_text": "Cover image",
                "media_type": "image"
            })],
            categories: vec![
                term(NEWS_CATEGORY, "News", "news", "category"),
                term(DOCS_CATEGORY, "Docs", "docs", "category"),
            ],
            tags: vec![term(RELEASE_TAG, "Release", "release", "post_tag")],
            pages: vec![
                page(12, "about", "publish", &[DOCS_CATEGORY]),
                page(13, "roadmap", "draft", &[]),
            ],
            posts,
            llms_txt: format!("# Example Blog\n\n> Notes from the team.\n\n- [About]({BASE}/about/)\n"),
        }
    }
}

fn term(id: u64, name: &str, slug: &str, taxonomy: &str) -> Value {
    let path = if taxonomy == "category" { "category" } else { "tag" };
    let mut value = json!({
        "id": id,
        "count": 0,
        "description": "",
        "link": format!("{BASE}/{path}/{slug}/"),
        "name": name,
        "slug": slug,
        "taxonomy": taxonomy,
        "meta": [],
        "_links": {}
    });
    if taxonomy == "category" {
        value["parent"] = json!(0);
    }
    value
}

fn page(id: u64, slug: &str, status: &str, categories: &[u64]) -> Value {
    json!({
        "id": id,
        "date": "2024-01-01T00:00:00",
        "date_gmt": "2024-01-01T00:00:00",
        "guid": { "rendered": format!("{BASE}/?page_id={id}") },
        "modified": "2024-01-02T00:00:00",
        "modified_gmt": "2024-01-02T00:00:00",
        "slug": slug,
        "status": status,
        "type": "page",
        "link": format!("{BASE}/{slug}/"),
        "title": { "rendered": slug.to_uppercase() },
        "content": { "rendered": format!("<p>{slug}</p>"), "protected": false },
        "excerpt": { "rendered": format!("<p>{slug}</p>"), "protected": false },
        "author": 1,
        "featured_media": 0,
        "parent": 0,
        "menu_order": 0,
        "comment_status": "closed",
        "ping_status": "closed",
        "template": "",
        "meta": { "footnotes": "" },
        "categories": categories,
        "tags": [],
        "class_list": [format!("post-{id}"), "page", "type-page", format!("status-{status}")]
    })
}

fn post(id: u64, slug: &str, status: &str, date: &str, category: u64, tags: &[u64]) -> Value {
    let featured_media: u64 = if id % 2 == 0 { 40 } else { 0 };
    json!({
        "id": id,
        "date": date,
        "modified": date,
        "slug": slug,
        "status": status,
        "type": "post",
        "link": format!("{BASE}/{slug}/"),
        "title": { "rendered": format!("Post {slug}") },
        "content": { "rendered": format!("<p>Body of {slug}</p>"), "protected": false },
        "excerpt": { "rendered": format!("<p>{slug}</p>"), "protected": false },
        "author": 1,
        "featured_media": featured_media,
        "categories": [category],
        "tags": tags
    })
}
