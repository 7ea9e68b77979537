//! Inline `code` mark.

use crate::node::MarkDefinition;
use crate::options::RenderContext;
use crate::registry::MarkRenderer;

/// Wraps children in `<code>`; never suppressed.
pub struct CodeMark;

impl MarkRenderer for CodeMark {
    fn types(&self) -> &[&str] {
        &["code"]
    }

    fn render(
        &self,
        children: String,
        _mark: &MarkDefinition<'_>,
        _ctx: &RenderContext<'_>,
    ) -> String {
        format!(r#"<code class="inline-code">{children}</code>"#)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RenderOptions;

    #[test]
    fn test_code_mark() {
        let options = RenderOptions::default();
        let html = CodeMark.render(
            "x &lt; y".to_owned(),
            &MarkDefinition::decorator("code"),
            &RenderContext::new(&options),
        );
        assert_eq!(html, r#"<code class="inline-code">x &lt; y</code>"#);
    }

    #[test]
    fn test_code_mark_empty_children() {
        let options = RenderOptions::default();
        let html = CodeMark.render(
            String::new(),
            &MarkDefinition::decorator("code"),
            &RenderContext::new(&options),
        );
        assert_eq!(html, r#"<code class="inline-code"></code>"#);
    }
}
