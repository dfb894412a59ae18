//! Typed client for the WordPress REST API.
//!
//! # Overview
//! Fetches categories, tags, pages, posts and `llms.txt` from a WordPress
//! site with basic-auth (application password) credentials, validating each
//! JSON response against a fixed schema before handing back typed records.
//!
//! # Design
//! - `WordpressClient` holds immutable configuration and an injected
//!   `HttpTransport`; it carries no mutable state between calls.
//! - Each operation is split into `build_*` (produces a request) and
//!   `parse_*` (consumes a response), with `load_*` joining the two around
//!   one transport call. The I/O boundary stays explicit and testable.
//! - Errors are a two-way sum: `TransportError` for the round-trip,
//!   `WordpressError` for an unexpected response shape.
//! - Response types are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod query;
pub mod types;

pub use client::WordpressClient;
pub use config::WordpressConfig;
pub use credentials::Credentials;
pub use error::{ApiError, ConfigError, TransportError, WordpressError};
pub use http::{HttpRequest, HttpResponse, HttpTransport, UreqTransport};
pub use types::{
    Category, ContentStatus, Embedded, EmbeddedAuthor, EmbeddedMedia, LlmsTxt, PageDetail,
    PageOverview, PaginationInfo, PostDetail, PostDetailParams, PostOverview,
    PostsOverviewParams, PostsOverviewResult, Tag,
};
