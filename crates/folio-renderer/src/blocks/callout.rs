//! Callout blocks (`callout`, `note`, `alert`, `admonition`).

use crate::html::paragraphs;
use crate::node::CustomNode;
use crate::options::RenderContext;
use crate::record::{first_string, to_plain_text};
use crate::registry::BlockRenderer;
use crate::util::escape_html;

// SVG icons for callouts (GitHub Octicons-style, 16x16)
const SVG_INFO: &str = r#"<svg class="callout-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M0 8a8 8 0 1 1 16 0A8 8 0 0 1 0 8Zm8-6.5a6.5 6.5 0 1 0 0 13 6.5 6.5 0 0 0 0-13ZM6.5 7.75A.75.75 0 0 1 7.25 7h1a.75.75 0 0 1 .75.75v2.75h.25a.75.75 0 0 1 0 1.5h-2a.75.75 0 0 1 0-1.5h.25v-2h-.25a.75.75 0 0 1-.75-.75ZM8 6a1 1 0 1 1 0-2 1 1 0 0 1 0 2Z"></path></svg>"#;
const SVG_CHECK: &str = r#"<svg class="callout-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M0 8a8 8 0 1 1 16 0A8 8 0 0 1 0 8Zm1.5 0a6.5 6.5 0 1 0 13 0 6.5 6.5 0 0 0-13 0Zm10.28-1.72-4.5 4.5a.75.75 0 0 1-1.06 0l-2-2a.751.751 0 0 1 .018-1.042.751.751 0 0 1 1.042-.018l1.47 1.47 3.97-3.97a.751.751 0 0 1 1.042.018.751.751 0 0 1 .018 1.042Z"></path></svg>"#;
const SVG_ALERT: &str = r#"<svg class="callout-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M6.457 1.047c.659-1.234 2.427-1.234 3.086 0l6.082 11.378A1.75 1.75 0 0 1 14.082 15H1.918a1.75 1.75 0 0 1-1.543-2.575Zm1.763.707a.25.25 0 0 0-.44 0L1.698 13.132a.25.25 0 0 0 .22.368h12.164a.25.25 0 0 0 .22-.368Zm.53 3.996v2.5a.75.75 0 0 1-1.5 0v-2.5a.75.75 0 0 1 1.5 0ZM9 11a1 1 0 1 1-2 0 1 1 0 0 1 2 0Z"></path></svg>"#;
const SVG_STOP: &str = r#"<svg class="callout-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M4.47.22A.749.749 0 0 1 5 0h6c.199 0 .389.079.53.22l4.25 4.25c.141.14.22.331.22.53v6a.749.749 0 0 1-.22.53l-4.25 4.25A.749.749 0 0 1 11 16H5a.749.749 0 0 1-.53-.22L.22 11.53A.749.749 0 0 1 0 11V5c0-.199.079-.389.22-.53Zm.84 1.28L1.5 5.31v5.38l3.81 3.81h5.38l3.81-3.81V5.31L10.69 1.5ZM8 4a.75.75 0 0 1 .75.75v3.5a.75.75 0 0 1-1.5 0v-3.5A.75.75 0 0 1 8 4Zm0 8a1 1 0 1 1 0-2 1 1 0 0 1 0 2Z"></path></svg>"#;

const TITLE_FIELDS: &[&str] = &["title", "heading", "label"];
const BODY_FIELDS: &[&str] = &["body", "text", "message", "description", "content"];
const TONE_FIELDS: &[&str] = &["tone", "variant", "kind"];

/// Presentation class of a callout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalloutTone {
    Info,
    Success,
    Warning,
    Error,
}

impl CalloutTone {
    /// Map a raw tone case-insensitively; anything unrecognized is `Info`.
    ///
    /// ```
    /// use folio_renderer::blocks::CalloutTone;
    ///
    /// assert_eq!(CalloutTone::from_raw(Some("DANGER")), CalloutTone::Error);
    /// assert_eq!(CalloutTone::from_raw(Some("tip")), CalloutTone::Info);
    /// assert_eq!(CalloutTone::from_raw(None), CalloutTone::Info);
    /// ```
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("success") => Self::Success,
            Some("warning") => Self::Warning,
            Some("error" | "danger") => Self::Error,
            _ => Self::Info,
        }
    }

    /// CSS modifier for this tone.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Info => SVG_INFO,
            Self::Success => SVG_CHECK,
            Self::Warning => SVG_ALERT,
            Self::Error => SVG_STOP,
        }
    }
}

/// Renders callouts as `<aside>`; suppressed when neither title nor body
/// resolves.
pub struct CalloutBlock;

impl BlockRenderer for CalloutBlock {
    fn types(&self) -> &[&str] {
        &["callout", "note", "alert", "admonition"]
    }

    fn render(&self, node: &CustomNode<'_>, _ctx: &RenderContext<'_>) -> Option<String> {
        let title = first_string(node.value, TITLE_FIELDS);
        let body = BODY_FIELDS
            .iter()
            .find_map(|field| node.value.get(field).and_then(to_plain_text));
        if title.is_none() && body.is_none() {
            return None;
        }

        let tone = CalloutTone::from_raw(first_string(node.value, TONE_FIELDS));
        let title = title
            .map(|title| format!(r#"<p class="callout-title">{}</p>"#, escape_html(title)))
            .unwrap_or_default();
        let body = body.as_deref().map(paragraphs).unwrap_or_default();
        Some(format!(
            r#"<aside class="callout callout-{}" role="note">{}<div class="callout-content">{title}{body}</div></aside>"#,
            tone.class(),
            tone.icon(),
        ))
    }
}
