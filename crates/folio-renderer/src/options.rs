//! Caller-supplied rendering options.

use crate::reference::ReferenceRoutes;
use crate::video::VideoHosts;

/// Options shared by every renderer during a render pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Alt text for images that carry none of their own.
    pub fallback_alt: Option<String>,
    /// Path prefixes for cross-document references.
    pub routes: ReferenceRoutes,
    /// Hosts whose video URLs can be embedded.
    pub video_hosts: VideoHosts,
}

impl RenderOptions {
    /// Create options with default routes and video hosts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback alt text for images.
    #[must_use]
    pub fn with_fallback_alt(mut self, alt: impl Into<String>) -> Self {
        self.fallback_alt = Some(alt.into());
        self
    }

    /// Replace the reference routes.
    #[must_use]
    pub fn with_routes(mut self, routes: ReferenceRoutes) -> Self {
        self.routes = routes;
        self
    }

    /// Replace the video host table.
    #[must_use]
    pub fn with_video_hosts(mut self, hosts: VideoHosts) -> Self {
        self.video_hosts = hosts;
        self
    }
}

/// Per-call context handed to block and mark renderers.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext<'a> {
    pub options: &'a RenderOptions,
}

impl<'a> RenderContext<'a> {
    #[must_use]
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }
}
