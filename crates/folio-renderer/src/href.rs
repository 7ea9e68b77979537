//! Link safety classification.
//!
//! [`is_safe_href`] decides whether a URL may be rendered as a link at all;
//! [`is_external_href`] decides whether a safe link gets hardened
//! (`target="_blank"` and `rel="noopener noreferrer"`). The two checks are
//! independent, so callers check safety first.

use url::Url;

/// Schemes allowed in rendered links.
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Whether the href points inside the current site (path or in-page anchor).
fn is_local(href: &str) -> bool {
    href.starts_with('/') || href.starts_with('#')
}

/// Check whether an href is safe to render as a link.
///
/// Paths (`/...`) and anchors (`#...`) are always safe and are not parsed.
/// Anything else must parse as an absolute URL with an `http`, `https`,
/// `mailto` or `tel` scheme.
///
/// # Examples
///
/// ```
/// use folio_renderer::is_safe_href;
///
/// assert!(is_safe_href("/articles/intro"));
/// assert!(is_safe_href("mailto:me@example.com"));
/// assert!(!is_safe_href("javascript:alert(1)"));
/// assert!(!is_safe_href("not a url"));
/// ```
#[must_use]
pub fn is_safe_href(href: &str) -> bool {
    if is_local(href) {
        return true;
    }
    Url::parse(href).is_ok_and(|url| SAFE_SCHEMES.contains(&url.scheme()))
}

/// Check whether an href leaves the site over `http` or `https`.
///
/// Unparseable input is not external; check [`is_safe_href`] before relying
/// on this for anchor hardening.
#[must_use]
pub fn is_external_href(href: &str) -> bool {
    // Browsers resolve `//host` and `/\host` against the current scheme.
    if href.starts_with("//") || href.starts_with("/\\") {
        return true;
    }
    if is_local(href) {
        return false;
    }
    Url::parse(href).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}
