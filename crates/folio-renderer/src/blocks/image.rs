//! `image` blocks.

use crate::image::resolve_image;
use crate::node::CustomNode;
use crate::options::RenderContext;
use crate::registry::BlockRenderer;
use crate::util::escape_html;

/// Renders `image` nodes as a `<figure>`; suppressed without a usable URL.
pub struct ImageBlock;

impl BlockRenderer for ImageBlock {
    fn types(&self) -> &[&str] {
        &["image"]
    }

    fn render(&self, node: &CustomNode<'_>, ctx: &RenderContext<'_>) -> Option<String> {
        let image = resolve_image(node.value, ctx.options.fallback_alt.as_deref())?;
        let caption = image
            .alt
            .caption
            .as_deref()
            .map(|caption| format!("<figcaption>{}</figcaption>", escape_html(caption)))
            .unwrap_or_default();
        Some(format!(
            r#"<figure class="image"><img src="{}" alt="{}" width="{}" height="{}" loading="lazy" decoding="async">{caption}</figure>"#,
            escape_html(&image.url),
            escape_html(&image.alt.alt),
            image.dimensions.width,
            image.dimensions.height,
        ))
    }
}
