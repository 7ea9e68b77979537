//! Portable Text renderer with pluggable block and mark handlers.
//!
//! This crate turns a sequence of Portable Text nodes, as decoded from a
//! headless CMS, into HTML through a [`PortableTextRenderer`].
//!
//! # Architecture
//!
//! Text blocks and lists are rendered by the driver itself. Every other node
//! type and every mark is dispatched by name through a [`RendererRegistry`]:
//! - [`BlockRenderer`]: renders a custom node, or suppresses it by returning `None`
//! - [`MarkRenderer`]: wraps already-rendered span content
//!
//! Unregistered node types and marks pass through untouched. One node's
//! outcome never affects its neighbours; [`RenderResult::reports`] records
//! what happened to each of them.
//!
//! The policy helpers the built-in renderers share ([`is_safe_href`],
//! [`to_embeddable_url`], [`resolve_internal_href`], [`resolve_image`]) are
//! exported for callers building their own renderers.
//!
//! # Example
//!
//! ```
//! use folio_renderer::{PortableTextRenderer, RenderOptions, RendererRegistry};
//! use serde_json::json;
//!
//! let content = json!([
//!     {"_type": "block", "children": [{"_type": "span", "text": "Hello", "marks": ["strong"]}]},
//!     {"_type": "image", "asset": {"url": "https://cdn.example.com/a.png"}}
//! ]);
//! let renderer = PortableTextRenderer::new(
//!     RendererRegistry::new(),
//!     RenderOptions::new().with_fallback_alt("Illustration"),
//! );
//! let result = renderer.render(content.as_array().unwrap());
//! assert!(result.html.starts_with("<p><strong>Hello</strong></p>"));
//! assert!(result.html.contains(r#"width="1600" height="900""#));
//! ```

pub mod blocks;
mod href;
mod html;
mod image;
pub mod marks;
mod node;
mod options;
pub mod record;
mod reference;
mod registry;
mod renderer;
mod util;
mod video;

pub use href::{is_external_href, is_safe_href};
pub use image::{
    DEFAULT_IMAGE_ALT, DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH, ImageAlt, ImageDimensions,
    ResolvedImage, image_url, resolve_image, resolve_image_alt, resolve_image_dimensions,
};
pub use node::{BLOCK_TYPE, Block, ContentNode, CustomNode, MarkDefinition, SPAN_TYPE, Span};
pub use options::{RenderContext, RenderOptions};
pub use reference::{ARTICLE_TYPE, ReferenceRoutes, resolve_internal_href};
pub use registry::{BlockOutput, BlockRenderer, Disposition, MarkRenderer, RendererRegistry};
pub use renderer::{NodeReport, PortableTextRenderer, RenderResult};
pub use util::{encode_uri_component, escape_html};
pub use video::{ParseProviderError, VideoHosts, VideoProvider, to_embeddable_url};
