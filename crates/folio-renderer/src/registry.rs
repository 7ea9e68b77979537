//! Dispatch tables for block and mark renderers.
//!
//! A [`RendererRegistry`] maps a block `_type` to a [`BlockRenderer`] and a
//! mark type to a [`MarkRenderer`]. Each handler declares every name it
//! answers to and is registered once per name, so schema aliases such as
//! `callout`/`note`/`alert` share a single instance.
//!
//! Every node ends in exactly one [`Disposition`]:
//!
//! - **Rendered**: a handler exists and produced output.
//! - **Suppressed**: a handler exists but the node has nothing to present.
//! - **Passthrough**: no handler is registered. Blocks render nothing; marks
//!   render their children unchanged.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::blocks::{CalloutBlock, CodeBlock, EmbedBlock, ImageBlock, ReferenceBlock};
use crate::marks::{CodeMark, DecoratorMark, InternalLinkMark, LinkMark};
use crate::node::{CustomNode, MarkDefinition};
use crate::options::RenderContext;

/// Renderer for a non-text block type.
///
/// # Example
///
/// ```
/// use folio_renderer::{BlockRenderer, CustomNode, RenderContext, RendererRegistry};
/// use folio_renderer::record::get_string;
///
/// struct Divider;
///
/// impl BlockRenderer for Divider {
///     fn types(&self) -> &[&str] { &["divider", "hr"] }
///
///     fn render(&self, node: &CustomNode<'_>, _ctx: &RenderContext<'_>) -> Option<String> {
///         Some(match get_string(node.value, "style") {
///             Some("dotted") => r#"<hr class="dotted">"#.to_owned(),
///             _ => "<hr>".to_owned(),
///         })
///     }
/// }
///
/// let registry = RendererRegistry::new().with_block(Divider);
/// assert!(registry.has_block("hr"));
/// ```
pub trait BlockRenderer: Send + Sync {
    /// Block types handled by this renderer.
    fn types(&self) -> &[&str];

    /// Render a node, or return `None` to suppress it.
    fn render(&self, node: &CustomNode<'_>, ctx: &RenderContext<'_>) -> Option<String>;
}

/// Renderer for an inline mark.
pub trait MarkRenderer: Send + Sync {
    /// Mark types handled by this renderer.
    fn types(&self) -> &[&str];

    /// Wrap already-rendered `children`.
    ///
    /// Return `children` unchanged to suppress the mark while keeping its text.
    fn render(
        &self,
        children: String,
        mark: &MarkDefinition<'_>,
        ctx: &RenderContext<'_>,
    ) -> String;
}

/// How a node was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Disposition {
    Rendered,
    Suppressed,
    Passthrough,
}

/// Result of dispatching a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockOutput {
    /// A handler produced HTML.
    Rendered(String),
    /// A handler found nothing to present.
    Suppressed,
    /// No handler is registered for the type.
    Passthrough,
}

impl BlockOutput {
    /// Rendered HTML, if any.
    #[must_use]
    pub fn html(&self) -> Option<&str> {
        match self {
            Self::Rendered(html) => Some(html),
            Self::Suppressed | Self::Passthrough => None,
        }
    }

    /// Consume the output, returning rendered HTML if any.
    #[must_use]
    pub fn into_html(self) -> Option<String> {
        match self {
            Self::Rendered(html) => Some(html),
            Self::Suppressed | Self::Passthrough => None,
        }
    }

    #[must_use]
    pub fn disposition(&self) -> Disposition {
        match self {
            Self::Rendered(_) => Disposition::Rendered,
            Self::Suppressed => Disposition::Suppressed,
            Self::Passthrough => Disposition::Passthrough,
        }
    }
}

/// Lookup tables from type name to renderer.
///
/// Built once and shared; dispatch takes `&self` and keeps no state between
/// calls.
#[derive(Clone)]
pub struct RendererRegistry {
    blocks: HashMap<String, Arc<dyn BlockRenderer>>,
    marks: HashMap<String, Arc<dyn MarkRenderer>>,
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("blocks", &self.block_types())
            .field("marks", &self.mark_types())
            .finish()
    }
}

impl RendererRegistry {
    /// Create a registry with every built-in block and mark renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::empty()
            .with_block(ImageBlock)
            .with_block(CodeBlock)
            .with_block(CalloutBlock)
            .with_block(EmbedBlock)
            .with_block(ReferenceBlock)
            .with_mark(LinkMark)
            .with_mark(InternalLinkMark)
            .with_mark(CodeMark)
            .with_mark(DecoratorMark)
    }

    /// Create a registry with no renderers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            blocks: HashMap::new(),
            marks: HashMap::new(),
        }
    }

    /// Register a block renderer under every type it declares.
    ///
    /// Later registrations replace earlier ones for the same type.
    #[must_use]
    pub fn with_block<R: BlockRenderer + 'static>(mut self, renderer: R) -> Self {
        let renderer: Arc<dyn BlockRenderer> = Arc::new(renderer);
        for name in renderer.types() {
            self.blocks.insert((*name).to_owned(), Arc::clone(&renderer));
        }
        self
    }

    /// Register a mark renderer under every type it declares.
    #[must_use]
    pub fn with_mark<R: MarkRenderer + 'static>(mut self, renderer: R) -> Self {
        let renderer: Arc<dyn MarkRenderer> = Arc::new(renderer);
        for name in renderer.types() {
            self.marks.insert((*name).to_owned(), Arc::clone(&renderer));
        }
        self
    }

    /// Route `alias` to the block renderer registered for `target`.
    #[must_use]
    pub fn alias_block(mut self, alias: &str, target: &str) -> Self {
        if let Some(renderer) = self.blocks.get(target) {
            let renderer = Arc::clone(renderer);
            self.blocks.insert(alias.to_owned(), renderer);
        } else {
            tracing::warn!(alias, target, "Block alias target is not registered");
        }
        self
    }

    /// Route `alias` to the mark renderer registered for `target`.
    #[must_use]
    pub fn alias_mark(mut self, alias: &str, target: &str) -> Self {
        if let Some(renderer) = self.marks.get(target) {
            let renderer = Arc::clone(renderer);
            self.marks.insert(alias.to_owned(), renderer);
        } else {
            tracing::warn!(alias, target, "Mark alias target is not registered");
        }
        self
    }

    #[must_use]
    pub fn has_block(&self, node_type: &str) -> bool {
        self.blocks.contains_key(node_type)
    }

    #[must_use]
    pub fn has_mark(&self, mark_type: &str) -> bool {
        self.marks.contains_key(mark_type)
    }

    /// Registered block types, sorted.
    #[must_use]
    pub fn block_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.blocks.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Registered mark types, sorted.
    #[must_use]
    pub fn mark_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.marks.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Dispatch a block node to its renderer.
    #[must_use]
    pub fn render_block(&self, node: &CustomNode<'_>, ctx: &RenderContext<'_>) -> BlockOutput {
        let Some(renderer) = self.blocks.get(node.node_type) else {
            tracing::debug!(node_type = node.node_type, key = ?node.key, "No block renderer");
            return BlockOutput::Passthrough;
        };
        if let Some(html) = renderer.render(node, ctx) {
            BlockOutput::Rendered(html)
        } else {
            tracing::debug!(node_type = node.node_type, key = ?node.key, "Block suppressed");
            BlockOutput::Suppressed
        }
    }

    /// Dispatch a mark; unknown marks return `children` unchanged.
    #[must_use]
    pub fn render_mark(
        &self,
        children: String,
        mark: &MarkDefinition<'_>,
        ctx: &RenderContext<'_>,
    ) -> String {
        let Some(renderer) = self.marks.get(mark.mark_type) else {
            tracing::debug!(mark_type = mark.mark_type, "No mark renderer");
            return children;
        };
        renderer.render(children, mark, ctx)
    }
}
