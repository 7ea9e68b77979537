//! Link marks.

use crate::href::{is_external_href, is_safe_href};
use crate::html::anchor;
use crate::node::MarkDefinition;
use crate::options::RenderContext;
use crate::record::get_string;
use crate::registry::MarkRenderer;

/// `link` mark: an anchor to a safe `href`, hardened when external.
///
/// Missing or unsafe hrefs leave the children unlinked.
pub struct LinkMark;

impl MarkRenderer for LinkMark {
    fn types(&self) -> &[&str] {
        &["link"]
    }

    fn render(
        &self,
        children: String,
        mark: &MarkDefinition<'_>,
        _ctx: &RenderContext<'_>,
    ) -> String {
        match get_string(mark.value, "href") {
            Some(href) if is_safe_href(href) => anchor(href, &children, is_external_href(href)),
            Some(href) => {
                tracing::debug!(href, "Dropping unsafe link");
                children
            }
            None => children,
        }
    }
}

/// `internalLink` / `internalReference` marks: an anchor to another document.
pub struct InternalLinkMark;

impl MarkRenderer for InternalLinkMark {
    fn types(&self) -> &[&str] {
        &["internalLink", "internalReference"]
    }

    fn render(
        &self,
        children: String,
        mark: &MarkDefinition<'_>,
        ctx: &RenderContext<'_>,
    ) -> String {
        match ctx.options.routes.resolve(mark.value) {
            Some(href) => anchor(&href, &children, false),
            None => children,
        }
    }
}
