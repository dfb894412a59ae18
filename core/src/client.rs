//! Request builder, response parser and transport driver for the WordPress
//! REST API.
//!
//! # Design
//! `WordpressClient` holds immutable configuration plus an injected
//! `HttpTransport`. Every operation exists in three forms: `build_*`
//! produces an `HttpRequest`, `parse_*` consumes an `HttpResponse`, and
//! `load_*` runs one through the transport and hands the result to the
//! other. The build and parse halves never touch the network, so a host
//! that does its own I/O can skip `load_*` entirely.
//!
//! Category filters on the page operations are caller-supplied ids.
//! Resolving a category slug first is a separate pair of operations,
//! `load_pages_by_category_slug` and `load_page_detail_by_category_slug`.

use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::config::WordpressConfig;
use crate::error::{ApiError, ConfigError, WordpressError};
use crate::http::{HttpRequest, HttpResponse, HttpTransport, UreqTransport};
use crate::query::Query;
use crate::types::{
    Category, ContentStatus, LlmsTxt, PageDetail, PaginationInfo, PostDetail, PostDetailParams,
    PostOverview, PostsOverviewParams, PostsOverviewResult, Tag,
};

const CATEGORIES_PATH: &str = "/wp-json/wp/v2/categories";
const TAGS_PATH: &str = "/wp-json/wp/v2/tags";
const PAGES_PATH: &str = "/wp-json/wp/v2/pages";
const POSTS_PATH: &str = "/wp-json/wp/v2/posts";
const LLMS_TXT_PATH: &str = "/llms.txt";

const PAGES_PER_OVERVIEW: u32 = 10;

pub const TOTAL_PAGES_HEADER: &str = "X-WP-TotalPages";
pub const TOTAL_POSTS_HEADER: &str = "X-WP-Total";

const CATEGORIES_ERROR: &str = "Failed to fetch categories";
const TAGS_ERROR: &str = "Failed to fetch tags";
const PAGES_ERROR: &str = "Failed to fetch pages";
const PAGE_DETAIL_ERROR: &str = "Failed to fetch page detail";
const POSTS_ERROR: &str = "Failed to fetch posts";
const POST_DETAIL_ERROR: &str = "Failed to fetch post detail";

/// Typed client for the read-only parts of the WordPress REST API.
#[derive(Debug, Clone)]
pub struct WordpressClient<T> {
    config: WordpressConfig,
    transport: T,
}

impl WordpressClient<UreqTransport> {
    /// Client configured from `WORDPRESS_*` environment variables, talking
    /// over a default `UreqTransport`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(WordpressConfig::from_env()?, UreqTransport::new()))
    }
}

impl<T> WordpressClient<T> {
    pub fn new(config: WordpressConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &WordpressConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn resolve_status(&self, status: Option<ContentStatus>) -> ContentStatus {
        status.unwrap_or(self.config.status())
    }

    fn request(&self, path: &str, query: &Query) -> HttpRequest {
        let url = query.append_to(&format!("{}{path}", self.config.base_url()));
        let authorization = self.config.credentials().authorization();
        HttpRequest {
            url,
            headers: vec![("Authorization".to_string(), authorization.as_str().to_string())],
        }
    }

    pub fn build_categories(&self, category: &str) -> HttpRequest {
        self.request(CATEGORIES_PATH, &Query::new().set("slug", category))
    }

    pub fn build_tags(&self, tag: &str) -> HttpRequest {
        self.request(TAGS_PATH, &Query::new().set("slug", tag))
    }

    pub fn build_pages_overview(
        &self,
        category_ids: Option<&[u64]>,
        status: Option<ContentStatus>,
    ) -> HttpRequest {
        let query = Query::new()
            .set("per_page", PAGES_PER_OVERVIEW)
            .set("status", self.resolve_status(status))
            .set("_embed", true)
            .set_ids("categories", category_ids);
        self.request(PAGES_PATH, &query)
    }

    pub fn build_page_detail(
        &self,
        slug: &str,
        category_ids: Option<&[u64]>,
        status: Option<ContentStatus>,
    ) -> HttpRequest {
        let query = Query::new()
            .set("slug", slug)
            .set("status", self.resolve_status(status))
            .set("_embed", true)
            .set_ids("categories", category_ids);
        self.request(PAGES_PATH, &query)
    }

    pub fn build_posts_overview(&self, params: &PostsOverviewParams) -> HttpRequest {
        let query = Query::new()
            .set("page", params.page)
            .set("per_page", params.per_page)
            .set("status", self.resolve_status(params.status))
            .set("_embed", true)
            .set_ids("tags", params.tag_ids.as_deref())
            .set_ids("categories", params.category_ids.as_deref());
        self.request(POSTS_PATH, &query)
    }

    pub fn build_post_detail(&self, params: &PostDetailParams) -> HttpRequest {
        let query = Query::new()
            .set("slug", &params.slug)
            .set("status", self.resolve_status(params.status))
            .set("_embed", true)
            .set_ids("tags", params.tag_ids.as_deref())
            .set_ids("categories", params.category_ids.as_deref());
        self.request(POSTS_PATH, &query)
    }

    pub fn build_llms_txt(&self) -> HttpRequest {
        self.request(LLMS_TXT_PATH, &Query::new())
    }

    pub fn parse_categories(&self, response: HttpResponse) -> Result<Vec<Category>, ApiError> {
        validate(&response, CATEGORIES_ERROR)
    }

    pub fn parse_tags(&self, response: HttpResponse) -> Result<Vec<Tag>, ApiError> {
        validate(&response, TAGS_ERROR)
    }

    /// The pages listing is validated against the post overview shape.
    pub fn parse_pages_overview(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<PostOverview>, ApiError> {
        validate(&response, PAGES_ERROR)
    }

    /// WordPress answers a slug lookup with an array, normally of zero or
    /// one pages.
    pub fn parse_page_detail(&self, response: HttpResponse) -> Result<Vec<PageDetail>, ApiError> {
        validate(&response, PAGE_DETAIL_ERROR)
    }

    /// `current_page` echoes the page that was requested.
    pub fn parse_posts_overview(
        &self,
        current_page: u32,
        response: HttpResponse,
    ) -> Result<PostsOverviewResult, ApiError> {
        let total_pages = header_count(&response, TOTAL_PAGES_HEADER, 1);
        let total_posts = header_count(&response, TOTAL_POSTS_HEADER, 0);

        if response.status != 200 {
            error!(status = response.status, body = %response.body, "{POSTS_ERROR}");
            return Err(WordpressError::new(POSTS_ERROR).into());
        }

        let posts = validate(&response, POSTS_ERROR)?;
        Ok(PostsOverviewResult {
            posts,
            pagination: PaginationInfo {
                total_pages,
                total_posts,
                current_page,
            },
        })
    }

    pub fn parse_post_detail(&self, response: HttpResponse) -> Result<Vec<PostDetail>, ApiError> {
        validate(&response, POST_DETAIL_ERROR)
    }

    /// The body is returned as-is, whatever the status.
    pub fn parse_llms_txt(&self, response: HttpResponse) -> Result<LlmsTxt, ApiError> {
        Ok(LlmsTxt {
            llms_txt: response.body,
        })
    }
}

impl<T: HttpTransport> WordpressClient<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(url = %request.url, "requesting");
        let response = self.transport.get(request)?;
        debug!(url = %request.url, status = response.status, "received");
        Ok(response)
    }

    pub fn load_categories(&self, category: &str) -> Result<Vec<Category>, ApiError> {
        debug!(category, "fetching categories");
        let response = self.execute(&self.build_categories(category))?;
        self.parse_categories(response)
    }

    pub fn load_tags(&self, tag: &str) -> Result<Vec<Tag>, ApiError> {
        debug!(tag, "fetching tags");
        let response = self.execute(&self.build_tags(tag))?;
        self.parse_tags(response)
    }

    pub fn load_pages_overview(
        &self,
        category_ids: Option<&[u64]>,
        status: Option<ContentStatus>,
    ) -> Result<Vec<PostOverview>, ApiError> {
        let response = self.execute(&self.build_pages_overview(category_ids, status))?;
        self.parse_pages_overview(response)
    }

    /// Pages overview filtered by the first category matching `category`.
    ///
    /// Issues the category lookup, then the pages request. When no category
    /// matches, returns an empty list without the second request.
    pub fn load_pages_by_category_slug(
        &self,
        category: &str,
        status: Option<ContentStatus>,
    ) -> Result<Vec<PostOverview>, ApiError> {
        let categories = self.load_categories(category)?;
        let Some(first) = categories.first() else {
            debug!(category, "no category matches slug");
            return Ok(Vec::new());
        };
        self.load_pages_overview(Some(std::slice::from_ref(&first.id)), status)
    }

    pub fn load_page_detail(
        &self,
        slug: &str,
        category_ids: Option<&[u64]>,
        status: Option<ContentStatus>,
    ) -> Result<Vec<PageDetail>, ApiError> {
        debug!(slug, "fetching page detail");
        let response = self.execute(&self.build_page_detail(slug, category_ids, status))?;
        self.parse_page_detail(response)
    }

    /// Page detail restricted to the first category matching `category`.
    ///
    /// Same lookup rule as `load_pages_by_category_slug`: no match means an
    /// empty list and no page request.
    pub fn load_page_detail_by_category_slug(
        &self,
        category: &str,
        slug: &str,
        status: Option<ContentStatus>,
    ) -> Result<Vec<PageDetail>, ApiError> {
        let categories = self.load_categories(category)?;
        let Some(first) = categories.first() else {
            debug!(category, slug, "no category matches slug");
            return Ok(Vec::new());
        };
        self.load_page_detail(slug, Some(std::slice::from_ref(&first.id)), status)
    }

    pub fn load_posts_overview(
        &self,
        params: &PostsOverviewParams,
    ) -> Result<PostsOverviewResult, ApiError> {
        let response = self.execute(&self.build_posts_overview(params))?;
        self.parse_posts_overview(params.page, response)
    }

    pub fn load_post_detail(&self, params: &PostDetailParams) -> Result<Vec<PostDetail>, ApiError> {
        debug!(slug = %params.slug, "fetching post detail");
        let response = self.execute(&self.build_post_detail(params))?;
        self.parse_post_detail(response)
    }

    pub fn load_llms_txt(&self) -> Result<LlmsTxt, ApiError> {
        let response = self.execute(&self.build_llms_txt())?;
        self.parse_llms_txt(response)
    }
}

/// Decode the body, then check it against `D`.
///
/// Non-JSON bodies surface as transport errors. Shape mismatches are logged
/// with the serde diagnostic and reported as `message`.
fn validate<D: DeserializeOwned>(
    response: &HttpResponse,
    message: &'static str,
) -> Result<D, ApiError> {
    let json = response.json()?;
    serde_json::from_value(json).map_err(|e| {
        error!(error = %e, status = response.status, "{message}");
        ApiError::from(WordpressError::new(message))
    })
}

/// Base-10 count from a pagination header, or `default` when the header is
/// missing or has no leading digits.
///
/// Reads the leading run of digits after optional whitespace and `+`, so
/// `"37abc"` is 37.
fn header_count(response: &HttpResponse, name: &str, default: u64) -> u64 {
    response
        .header(name)
        .and_then(leading_digits)
        .unwrap_or(default)
}

fn leading_digits(value: &str) -> Option<u64> {
    let value = value.trim_start();
    let value = value.strip_prefix('+').unwrap_or(value);
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse().ok()
}
