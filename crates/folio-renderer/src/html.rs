//! HTML fragments shared by the built-in renderers.

use std::fmt::Write;

use crate::util::escape_html;

/// Write an anchor around already-rendered `children`.
///
/// Hardened anchors open in a new browsing context without an opener or
/// referrer.
pub(crate) fn anchor(href: &str, children: &str, harden: bool) -> String {
    let href = escape_html(href);
    if harden {
        format!(r#"<a href="{href}" target="_blank" rel="noopener noreferrer">{children}</a>"#)
    } else {
        format!(r#"<a href="{href}">{children}</a>"#)
    }
}

/// Escape text and turn line breaks into `<br/>`.
pub(crate) fn text_with_breaks(text: &str) -> String {
    escape_html(text).replace('\n', "<br/>")
}

/// Render plain text as paragraphs split on blank lines.
pub(crate) fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .fold(String::new(), |mut out, p| {
            let _ = write!(out, "<p>{}</p>", text_with_breaks(p));
            out
        })
}
