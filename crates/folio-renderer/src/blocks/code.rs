//! `code` blocks.

use crate::node::CustomNode;
use crate::options::RenderContext;
use crate::record::{first_string, get_raw_string, get_string};
use crate::registry::BlockRenderer;
use crate::util::escape_html;

/// Renders `code` nodes as `<pre><code>`, with a caption when a filename is
/// present. Suppressed when there is no code text.
pub struct CodeBlock;

impl BlockRenderer for CodeBlock {
    fn types(&self) -> &[&str] {
        &["code"]
    }

    fn render(&self, node: &CustomNode<'_>, _ctx: &RenderContext<'_>) -> Option<String> {
        let code = get_raw_string(node.value, "code")?;
        let language = get_string(node.value, "language");
        let filename = first_string(node.value, &["filename", "title"]);

        let pre = match language {
            Some(lang) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(code)
            ),
            None => format!("<pre><code>{}</code></pre>", escape_html(code)),
        };

        let Some(filename) = filename else {
            return Some(format!(r#"<figure class="code-block">{pre}</figure>"#));
        };
        let language = language
            .map(|lang| format!(r#"<span class="code-language">{}</span>"#, escape_html(lang)))
            .unwrap_or_default();
        Some(format!(
            r#"<figure class="code-block"><figcaption><span class="code-filename">{}</span>{language}</figcaption>{pre}</figure>"#,
            escape_html(filename)
        ))
    }
}
