//! Video embed blocks (`embed`, `videoEmbed`, `youtube`).

use crate::href::is_safe_href;
use crate::html::anchor;
use crate::node::CustomNode;
use crate::options::RenderContext;
use crate::record::first_string;
use crate::registry::BlockRenderer;
use crate::util::escape_html;

const URL_FIELDS: &[&str] = &["url", "href", "src"];
const TITLE_FIELDS: &[&str] = &["title", "caption", "label"];
const DEFAULT_TITLE: &str = "Embedded video";

/// Permissions granted to embedded players.
const IFRAME_ALLOW: &str =
    "accelerometer; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// Renders embeds as an `<iframe>` player.
///
/// Safe URLs that no known host can embed degrade to a hardened link, whatever
/// their scheme or host. Missing or unsafe URLs suppress the block.
pub struct EmbedBlock;

impl BlockRenderer for EmbedBlock {
    fn types(&self) -> &[&str] {
        &["embed", "videoEmbed", "youtube"]
    }

    fn render(&self, node: &CustomNode<'_>, ctx: &RenderContext<'_>) -> Option<String> {
        let url = first_string(node.value, URL_FIELDS).filter(|url| is_safe_href(url))?;
        let title = first_string(node.value, TITLE_FIELDS);

        let Some(src) = ctx.options.video_hosts.embeddable_url(url) else {
            tracing::debug!(url, "Embed URL has no player form, rendering link");
            let label = escape_html(title.unwrap_or(url));
            return Some(format!(
                r#"<p class="embed-link">{}</p>"#,
                anchor(url, &label, true)
            ));
        };

        Some(format!(
            r#"<div class="embed"><iframe src="{}" title="{}" loading="lazy" allow="{IFRAME_ALLOW}" referrerpolicy="strict-origin-when-cross-origin" allowfullscreen></iframe></div>"#,
            escape_html(&src),
            escape_html(title.unwrap_or(DEFAULT_TITLE)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::test_support::render_with;
    use crate::options::RenderOptions;
    use crate::video::{VideoHosts, VideoProvider};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn render(value: &Value) -> Option<String> {
        render_with(&EmbedBlock, value, &RenderOptions::default())
    }

    fn fallback(href: &str, label: &str) -> String {
        format!(
            r#"<p class="embed-link"><a href="{href}" target="_blank" rel="noopener noreferrer">{label}</a></p>"#
        )
    }

    #[test]
    fn test_youtube_iframe() {
        let value = json!({"_type": "youtube", "url": "https://youtu.be/dQw4w9WgXcQ"});
        let html = render(&value).unwrap();
        assert_eq!(
            html,
            r#"<div class="embed"><iframe src="https://www.youtube.com/embed/dQw4w9WgXcQ" title="Embedded video" loading="lazy" allow="accelerometer; clipboard-write; encrypted-media; gyroscope; picture-in-picture" referrerpolicy="strict-origin-when-cross-origin" allowfullscreen></iframe></div>"#
        );
    }

    #[test]
    fn test_url_synonyms_and_title() {
        let html = render(&json!({
            "_type": "videoEmbed",
            "src": "https://vimeo.com/42",
            "caption": "Demo reel"
        }))
        .unwrap();
        assert!(html.contains(r#"src="https://player.vimeo.com/video/42""#));
        assert!(html.contains(r#"title="Demo reel""#));
    }

    #[test]
    fn test_unknown_host_falls_back_to_hardened_link() {
        let value = json!({"_type": "embed", "href": "https://example.com/talk"});
        assert_eq!(
            render(&value).unwrap(),
            fallback("https://example.com/talk", "https://example.com/talk")
        );
    }

    #[test]
    fn test_fallback_link_uses_title() {
        let value = json!({"_type": "embed", "url": "https://example.com/v", "title": "Talk"});
        assert_eq!(render(&value).unwrap(), fallback("https://example.com/v", "Talk"));
    }

    #[test]
    fn test_fallback_always_hardened() {
        for url in ["//elsewhere.example/x", "/videos/intro", "mailto:av@example.com"] {
            let value = json!({"_type": "embed", "url": url});
            assert_eq!(render(&value).unwrap(), fallback(url, url), "{url}");
        }
    }

    #[test]
    fn test_unsafe_or_missing_url_suppressed() {
        for value in [
            json!({"_type": "embed"}),
            json!({"_type": "embed", "url": " "}),
            json!({"_type": "embed", "url": "javascript:alert(1)"}),
            json!({"_type": "embed", "url": "not a url"}),
        ] {
            assert_eq!(render(&value), None, "{value}");
        }
    }

    #[test]
    fn test_configured_host() {
        let hosts = VideoHosts::default().with_host("music.youtube.com", VideoProvider::YouTube);
        let options = RenderOptions::new().with_video_hosts(hosts);
        let value = json!({"_type": "embed", "url": "https://music.youtube.com/watch?v=abc"});
        let html = render_with(&EmbedBlock, &value, &options).unwrap();
        assert!(html.contains("https://www.youtube.com/embed/abc"));
    }
}
