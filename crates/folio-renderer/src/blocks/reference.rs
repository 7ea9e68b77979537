//! Reference blocks (`reference`, `internalReference`).

use crate::html::anchor;
use crate::node::CustomNode;
use crate::options::RenderContext;
use crate::record::{get_string, nested_string};
use crate::registry::BlockRenderer;
use crate::util::escape_html;

/// Renders a link to another document; suppressed when no href resolves.
pub struct ReferenceBlock;

impl BlockRenderer for ReferenceBlock {
    fn types(&self) -> &[&str] {
        &["reference", "internalReference"]
    }

    fn render(&self, node: &CustomNode<'_>, ctx: &RenderContext<'_>) -> Option<String> {
        let href = ctx.options.routes.resolve(node.value)?;
        let label = get_string(node.value, "title")
            .or_else(|| nested_string(node.value, &["document", "title"]))
            .or_else(|| nested_string(node.value, &["reference", "title"]))
            .unwrap_or(&href);
        Some(format!(
            r#"<p class="reference">{}</p>"#,
            anchor(&href, &escape_html(label), false)
        ))
    }
}
