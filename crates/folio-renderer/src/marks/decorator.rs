//! Text decorators (`strong`, `em`, `underline`, `strike-through`).

use crate::node::MarkDefinition;
use crate::options::RenderContext;
use crate::registry::MarkRenderer;

/// Wraps children in the element matching the decorator name.
pub struct DecoratorMark;

impl DecoratorMark {
    fn tag(name: &str) -> Option<&'static str> {
        match name {
            "strong" => Some("strong"),
            "em" => Some("em"),
            "underline" => Some("u"),
            "strike-through" => Some("s"),
            _ => None,
        }
    }
}

impl MarkRenderer for DecoratorMark {
    fn types(&self) -> &[&str] {
        &["strong", "em", "underline", "strike-through"]
    }

    fn render(
        &self,
        children: String,
        mark: &MarkDefinition<'_>,
        _ctx: &RenderContext<'_>,
    ) -> String {
        match Self::tag(mark.mark_type) {
            Some(tag) => format!("<{tag}>{children}</{tag}>"),
            None => children,
        }
    }
}
