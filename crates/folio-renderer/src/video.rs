//! Video URL normalization.
//!
//! Rewrites links to public video pages into player URLs suitable for an
//! `<iframe>`. Recognized hosts live in a [`VideoHosts`] table so sites can
//! add aliases without touching the rewrite rules.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::util::encode_uri_component;

/// How a host encodes the video id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VideoProvider {
    /// Watch page with the id in the `v` query parameter.
    YouTube,
    /// Short link with the id as the path.
    YouTubeShort,
    /// Vimeo page with the id as the path.
    Vimeo,
}

impl VideoProvider {
    /// Name used in configuration files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::YouTube => "youtube",
            Self::YouTubeShort => "youtube-short",
            Self::Vimeo => "vimeo",
        }
    }

    fn embed_url(self, url: &Url) -> Option<String> {
        match self {
            Self::YouTube => {
                let id = url
                    .query_pairs()
                    .find_map(|(name, value)| (name == "v").then_some(value))?;
                youtube_embed(&id)
            }
            Self::YouTubeShort => {
                let id = percent_decode_str(path_id(url)?).decode_utf8().ok()?;
                youtube_embed(&id)
            }
            Self::Vimeo => Some(format!("https://player.vimeo.com/video/{}", path_id(url)?)),
        }
    }
}

impl fmt::Display for VideoProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a provider name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown video provider '{0}' (expected youtube, youtube-short or vimeo)")]
pub struct ParseProviderError(String);

impl FromStr for VideoProvider {
    type Err = ParseProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "youtube" => Ok(Self::YouTube),
            "youtube-short" => Ok(Self::YouTubeShort),
            "vimeo" => Ok(Self::Vimeo),
            _ => Err(ParseProviderError(s.to_owned())),
        }
    }
}

fn youtube_embed(id: &str) -> Option<String> {
    (!id.is_empty()).then(|| format!("https://www.youtube.com/embed/{}", encode_uri_component(id)))
}

/// Path with leading slashes removed, if anything is left.
fn path_id(url: &Url) -> Option<&str> {
    let id = url.path().trim_start_matches('/');
    (!id.is_empty()).then_some(id)
}

/// Normalize a host for lookup: lowercase, without a leading `www.`.
fn normalize_host(host: &str) -> String {
    let host = host.to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_owned(),
        None => host,
    }
}

/// Table of hosts whose URLs can be turned into player URLs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoHosts {
    hosts: HashMap<String, VideoProvider>,
}

impl Default for VideoHosts {
    fn default() -> Self {
        Self::empty()
            .with_host("youtube.com", VideoProvider::YouTube)
            .with_host("m.youtube.com", VideoProvider::YouTube)
            .with_host("youtu.be", VideoProvider::YouTubeShort)
            .with_host("vimeo.com", VideoProvider::Vimeo)
    }
}

impl VideoHosts {
    /// Create a table with no known hosts.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            hosts: HashMap::new(),
        }
    }

    /// Register a host (a leading `www.` is ignored).
    #[must_use]
    pub fn with_host(mut self, host: &str, provider: VideoProvider) -> Self {
        self.hosts.insert(normalize_host(host), provider);
        self
    }

    /// Look up the provider for a host.
    #[must_use]
    pub fn provider(&self, host: &str) -> Option<VideoProvider> {
        self.hosts.get(&normalize_host(host)).copied()
    }

    /// Number of registered hosts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Whether no hosts are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Rewrite a video page URL into an embeddable player URL.
    ///
    /// Returns `None` for unparseable URLs, schemes other than `http`/`https`,
    /// unknown hosts, and URLs without a video id.
    #[must_use]
    pub fn embeddable_url(&self, raw: &str) -> Option<String> {
        let url = Url::parse(raw).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        self.provider(url.host_str()?)?.embed_url(&url)
    }
}

static DEFAULT_HOSTS: LazyLock<VideoHosts> = LazyLock::new(VideoHosts::default);

/// Rewrite a video page URL using the default host table.
///
/// # Examples
///
/// ```
/// use folio_renderer::to_embeddable_url;
///
/// assert_eq!(
///     to_embeddable_url("https://youtu.be/dQw4w9WgXcQ").as_deref(),
///     Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
/// );
/// assert_eq!(to_embeddable_url("https://example.com/video"), None);
/// ```
#[must_use]
pub fn to_embeddable_url(raw: &str) -> Option<String> {
    DEFAULT_HOSTS.embeddable_url(raw)
}
