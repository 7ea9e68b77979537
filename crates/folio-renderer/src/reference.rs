//! Internal path resolution for cross-document references.
//!
//! The content source denormalizes "a link to another document" in several
//! shapes: a slug on the payload itself, on a nested `reference` or
//! `document` object, or a bare `slug` string. All of them are tried in a
//! fixed order and missing fields simply fall through.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde_json::Value;

use crate::record::{get_string, nested_string};
use crate::util::encode_uri_component;

/// Document type routed under `/articles` by default.
pub const ARTICLE_TYPE: &str = "article";

const SLUG_PATHS: &[&[&str]] = &[
    &["slug", "current"],
    &["reference", "slug", "current"],
    &["document", "slug", "current"],
    &["slug"],
];

const DOCUMENT_TYPE_PATHS: &[&[&str]] = &[
    &["documentType"],
    &["reference", "_type"],
    &["document", "_type"],
    &["_type"],
];

/// Mapping from document type to the path prefix its pages live under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceRoutes {
    prefixes: HashMap<String, String>,
}

impl Default for ReferenceRoutes {
    fn default() -> Self {
        Self::empty().with_route(ARTICLE_TYPE, "/articles")
    }
}

impl ReferenceRoutes {
    /// Create routes where every document lives at `/{slug}`.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            prefixes: HashMap::new(),
        }
    }

    /// Route a document type under `prefix` (e.g. `"/projects"`).
    #[must_use]
    pub fn with_route(mut self, document_type: impl Into<String>, prefix: &str) -> Self {
        self.prefixes
            .insert(document_type.into(), prefix.trim_end_matches('/').to_owned());
        self
    }

    /// Path prefix for a document type, if routed.
    #[must_use]
    pub fn prefix(&self, document_type: &str) -> Option<&str> {
        self.prefixes.get(document_type).map(String::as_str)
    }

    /// Derive an internal href from a reference payload.
    ///
    /// A pre-resolved `href` that is already a path or anchor is returned as
    /// is. Otherwise the slug and document type are looked up and combined into
    /// `{prefix}/{slug}`. Returns `None` when no slug can be found.
    #[must_use]
    pub fn resolve(&self, value: &Value) -> Option<String> {
        if let Some(href) = get_string(value, "href")
            && (href.starts_with('/') || href.starts_with('#'))
        {
            return Some(href.to_owned());
        }

        let slug = first_at(value, SLUG_PATHS)?;
        let prefix = first_at(value, DOCUMENT_TYPE_PATHS)
            .and_then(|document_type| self.prefix(document_type))
            .unwrap_or("");
        Some(format!("{prefix}/{}", encode_uri_component(slug)))
    }
}

fn first_at<'a>(value: &'a Value, paths: &[&[&str]]) -> Option<&'a str> {
    paths.iter().find_map(|path| nested_string(value, path))
}

static DEFAULT_ROUTES: LazyLock<ReferenceRoutes> = LazyLock::new(ReferenceRoutes::default);

/// Derive an internal href using the default routes.
///
/// # Examples
///
/// ```
/// use folio_renderer::resolve_internal_href;
/// use serde_json::json;
///
/// let article = json!({"documentType": "article", "slug": {"current": "deep-dive"}});
/// assert_eq!(resolve_internal_href(&article).as_deref(), Some("/articles/deep-dive"));
///
/// let page = json!({"slug": {"current": "about"}});
/// assert_eq!(resolve_internal_href(&page).as_deref(), Some("/about"));
/// ```
#[must_use]
pub fn resolve_internal_href(value: &Value) -> Option<String> {
    DEFAULT_ROUTES.resolve(value)
}
