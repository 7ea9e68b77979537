//! Built-in block renderers.
//!
//! Each renderer reads its fields defensively and returns `None` when the
//! node lacks the data it needs.

mod callout;
mod code;
mod embed;
mod image;
mod reference;

pub use callout::{CalloutBlock, CalloutTone};
pub use code::CodeBlock;
pub use embed::EmbedBlock;
pub use image::ImageBlock;
pub use reference::ReferenceBlock;

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::Value;

    use crate::node::CustomNode;
    use crate::options::{RenderContext, RenderOptions};
    use crate::registry::BlockRenderer;

    /// Render `value` with `renderer` under its own `_type`.
    pub(crate) fn render_with<R: BlockRenderer>(
        renderer: &R,
        value: &Value,
        options: &RenderOptions,
    ) -> Option<String> {
        let node = CustomNode {
            node_type: value["_type"].as_str().unwrap_or_default(),
            key: None,
            value,
        };
        renderer.render(&node, &RenderContext::new(options))
    }
}
