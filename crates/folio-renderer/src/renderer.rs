//! Document-order render driver.
//!
//! Walks a content sequence, renders text blocks and lists itself and hands
//! every other node to the [`RendererRegistry`].

use std::collections::HashMap;
use std::fmt::Write;

use serde_json::Value;

use crate::html::text_with_breaks;
use crate::node::{Block, ContentNode, MarkDefinition, Span};
use crate::options::{RenderContext, RenderOptions};
use crate::registry::{BlockOutput, Disposition, RendererRegistry};

/// Decorators in nesting order when spans share a run length.
const DECORATOR_ORDER: &[&str] = &["strong", "em", "code", "underline", "strike-through"];

/// Type reported for values that could not be narrowed into a node.
const UNKNOWN_TYPE: &str = "unknown";

/// How one input node was handled.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeReport {
    pub key: Option<String>,
    pub node_type: String,
    pub disposition: Disposition,
}

/// Result of rendering a content sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// One report per input node, in input order.
    pub reports: Vec<NodeReport>,
}

impl RenderResult {
    /// Number of nodes that ended with `disposition`.
    #[must_use]
    pub fn count(&self, disposition: Disposition) -> usize {
        self.reports
            .iter()
            .filter(|report| report.disposition == disposition)
            .count()
    }
}

/// Renders Portable Text content to HTML.
///
/// # Example
///
/// ```
/// use folio_renderer::{PortableTextRenderer, RenderOptions, RendererRegistry};
/// use serde_json::json;
///
/// let nodes = json!([
///     {"_type": "block", "style": "h2", "children": [{"_type": "span", "text": "Hello"}]},
///     {"_type": "code", "code": "let x = 1;", "language": "rust"}
/// ]);
/// let renderer = PortableTextRenderer::new(RendererRegistry::new(), RenderOptions::default());
/// let result = renderer.render(nodes.as_array().unwrap());
/// assert!(result.html.starts_with("<h2>Hello</h2>"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PortableTextRenderer {
    registry: RendererRegistry,
    options: RenderOptions,
}

impl PortableTextRenderer {
    #[must_use]
    pub fn new(registry: RendererRegistry, options: RenderOptions) -> Self {
        Self { registry, options }
    }

    #[must_use]
    pub fn registry(&self) -> &RendererRegistry {
        &self.registry
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a content sequence in document order.
    #[must_use]
    pub fn render(&self, nodes: &[Value]) -> RenderResult {
        let ctx = RenderContext::new(&self.options);
        let mut html = String::with_capacity(nodes.len() * 128);
        let mut lists = ListStack::default();
        let mut reports = Vec::with_capacity(nodes.len());

        for value in nodes {
            let Some(node) = ContentNode::from_value(value) else {
                tracing::warn!("Skipping content node without a type");
                reports.push(NodeReport {
                    key: None,
                    node_type: UNKNOWN_TYPE.to_owned(),
                    disposition: Disposition::Passthrough,
                });
                continue;
            };

            let disposition = match &node {
                ContentNode::Block(block) => {
                    let content = self.render_spans(block, ctx);
                    if let Some(kind) = block.list_item {
                        lists.push_item(list_tag(kind), block.level, &content, &mut html);
                    } else {
                        lists.close_all(&mut html);
                        let tag = style_tag(block.style);
                        let _ = write!(html, "<{tag}>{content}</{tag}>");
                    }
                    Disposition::Rendered
                }
                ContentNode::Custom(custom) => {
                    let output = self.registry.render_block(custom, &ctx);
                    if let BlockOutput::Rendered(block_html) = &output {
                        lists.close_all(&mut html);
                        html.push_str(block_html);
                    }
                    output.disposition()
                }
            };

            reports.push(NodeReport {
                key: node.key().map(str::to_owned),
                node_type: node.node_type().to_owned(),
                disposition,
            });
        }
        lists.close_all(&mut html);

        RenderResult { html, reports }
    }

    /// Render a single non-text node through the registry.
    #[must_use]
    pub fn render_node(&self, node: &ContentNode<'_>) -> BlockOutput {
        let ctx = RenderContext::new(&self.options);
        match node {
            ContentNode::Block(block) => {
                let tag = style_tag(block.style);
                let content = self.render_spans(block, ctx);
                BlockOutput::Rendered(format!("<{tag}>{content}</{tag}>"))
            }
            ContentNode::Custom(custom) => self.registry.render_block(custom, &ctx),
        }
    }

    /// Render a block's spans with their marks, without the block wrapper.
    fn render_spans(&self, block: &Block<'_>, ctx: RenderContext<'_>) -> String {
        let mut out = String::new();
        self.render_mark_nodes(block, &build_mark_tree(&block.children), ctx, &mut out);
        out
    }

    fn render_mark_nodes(
        &self,
        block: &Block<'_>,
        nodes: &[MarkNode<'_>],
        ctx: RenderContext<'_>,
        out: &mut String,
    ) {
        for node in nodes {
            match node {
                MarkNode::Text(text) => out.push_str(&text_with_breaks(text)),
                MarkNode::Marked { mark, children } => {
                    let mut inner = String::new();
                    self.render_mark_nodes(block, children, ctx, &mut inner);
                    let decorator;
                    let def = if let Some(def) = block.mark_def(mark) {
                        def
                    } else {
                        decorator = MarkDefinition::decorator(mark);
                        &decorator
                    };
                    out.push_str(&self.registry.render_mark(inner, def, &ctx));
                }
            }
        }
    }
}

fn style_tag(style: &str) -> &'static str {
    match style {
        "h1" => "h1",
        "h2" => "h2",
        "h3" => "h3",
        "h4" => "h4",
        "h5" => "h5",
        "h6" => "h6",
        "blockquote" => "blockquote",
        _ => "p",
    }
}

fn list_tag(kind: &str) -> &'static str {
    if kind == "number" { "ol" } else { "ul" }
}

/// Open lists, innermost last. Each open list has an open `<li>`.
#[derive(Default)]
struct ListStack {
    open: Vec<(&'static str, u32)>,
}

impl ListStack {
    fn push_item(&mut self, tag: &'static str, level: u32, content: &str, out: &mut String) {
        while let Some(&(open_tag, open_level)) = self.open.last() {
            if open_level > level || (open_level == level && open_tag != tag) {
                let _ = write!(out, "</li></{open_tag}>");
                self.open.pop();
            } else {
                break;
            }
        }
        match self.open.last() {
            Some(&(_, open_level)) if open_level == level => out.push_str("</li><li>"),
            _ => {
                let _ = write!(out, "<{tag}><li>");
                self.open.push((tag, level));
            }
        }
        out.push_str(content);
    }

    fn close_all(&mut self, out: &mut String) {
        while let Some((tag, _)) = self.open.pop() {
            let _ = write!(out, "</li></{tag}>");
        }
    }
}

/// Span text grouped under the marks that wrap it.
#[derive(Debug, PartialEq, Eq)]
enum MarkNode<'a> {
    Text(&'a str),
    Marked {
        mark: &'a str,
        children: Vec<MarkNode<'a>>,
    },
}

/// Nest spans under shared marks so adjacent spans reuse one wrapper.
///
/// Open marks stay open while following spans still carry them. New marks
/// open longest run first, so a link covering several differently decorated
/// spans becomes a single anchor.
fn build_mark_tree<'a>(spans: &[Span<'a>]) -> Vec<MarkNode<'a>> {
    let runs = run_lengths(spans);
    let mut root = Vec::new();
    let mut open: Vec<(&'a str, Vec<MarkNode<'a>>)> = Vec::new();

    for (span, run) in spans.iter().zip(&runs) {
        let marks = sorted_marks(span, run);
        let kept = open
            .iter()
            .take_while(|(open_mark, _)| marks.contains(open_mark))
            .count();
        while open.len() > kept {
            close_top(&mut open, &mut root);
        }
        for mark in marks {
            if !open.iter().any(|(open_mark, _)| *open_mark == mark) {
                open.push((mark, Vec::new()));
            }
        }
        push_node(&mut open, &mut root, MarkNode::Text(span.text));
    }
    while !open.is_empty() {
        close_top(&mut open, &mut root);
    }
    root
}

/// For every span, how many consecutive spans starting there carry each of
/// its marks. Filled in one backward pass.
fn run_lengths<'a>(spans: &[Span<'a>]) -> Vec<HashMap<&'a str, usize>> {
    let mut runs: Vec<HashMap<&'a str, usize>> = vec![HashMap::new(); spans.len()];
    for index in (0..spans.len()).rev() {
        let (current, following) = runs.split_at_mut(index + 1);
        let next = following.first();
        for mark in &spans[index].marks {
            let after = next.and_then(|run| run.get(mark)).copied().unwrap_or(0);
            current[index].insert(*mark, after + 1);
        }
    }
    runs
}

/// A span's distinct marks, longest run first.
fn sorted_marks<'a>(span: &Span<'a>, run: &HashMap<&'a str, usize>) -> Vec<&'a str> {
    let mut marks: Vec<&'a str> = Vec::new();
    for mark in &span.marks {
        if !marks.contains(mark) {
            marks.push(mark);
        }
    }
    let length = |mark: &str| run.get(mark).copied().unwrap_or(0);
    let rank = |mark: &str| {
        DECORATOR_ORDER
            .iter()
            .position(|d| *d == mark)
            .unwrap_or(DECORATOR_ORDER.len())
    };
    marks.sort_by(|a, b| {
        length(b)
            .cmp(&length(a))
            .then_with(|| rank(a).cmp(&rank(b)))
            .then_with(|| a.cmp(b))
    });
    marks
}

fn push_node<'a>(
    open: &mut [(&'a str, Vec<MarkNode<'a>>)],
    root: &mut Vec<MarkNode<'a>>,
    node: MarkNode<'a>,
) {
    match open.last_mut() {
        Some((_, children)) => children.push(node),
        None => root.push(node),
    }
}

fn close_top<'a>(open: &mut Vec<(&'a str, Vec<MarkNode<'a>>)>, root: &mut Vec<MarkNode<'a>>) {
    if let Some((mark, children)) = open.pop() {
        push_node(open, root, MarkNode::Marked { mark, children });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    static_assertions::assert_impl_all!(PortableTextRenderer: Send, Sync);

    fn span<'a>(text: &'a str, marks: &[&'a str]) -> Span<'a> {
        Span {
            key: None,
            text,
            marks: marks.to_vec(),
        }
    }

    fn render(nodes: &Value) -> RenderResult {
        PortableTextRenderer::default().render(nodes.as_array().unwrap())
    }

    fn paragraph(children: &Value) -> Value {
        json!({"_type": "block", "style": "normal", "children": children, "markDefs": []})
    }

    #[test]
    fn test_mark_tree_plain() {
        let spans = [span("a", &[]), span("b", &[])];
        assert_eq!(
            build_mark_tree(&spans),
            vec![MarkNode::Text("a"), MarkNode::Text("b")]
        );
    }

    #[test]
    fn test_mark_tree_shares_longest_mark() {
        let spans = [span("a", &["em", "l1"]), span("b", &["l1"]), span("c", &[])];
        assert_eq!(
            build_mark_tree(&spans),
            vec![
                MarkNode::Marked {
                    mark: "l1",
                    children: vec![
                        MarkNode::Marked {
                            mark: "em",
                            children: vec![MarkNode::Text("a")],
                        },
                        MarkNode::Text("b"),
                    ],
                },
                MarkNode::Text("c"),
            ]
        );
    }

    #[test]
    fn test_mark_tree_keeps_open_mark() {
        let spans = [span("a", &["l1"]), span("b", &["l1", "strong"])];
        assert_eq!(
            build_mark_tree(&spans),
            vec![MarkNode::Marked {
                mark: "l1",
                children: vec![
                    MarkNode::Text("a"),
                    MarkNode::Marked {
                        mark: "strong",
                        children: vec![MarkNode::Text("b")],
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_sorted_marks_tie_break() {
        let spans = [span("a", &["zeta", "em", "strong", "em"])];
        let runs = run_lengths(&spans);
        assert_eq!(sorted_marks(&spans[0], &runs[0]), vec!["strong", "em", "zeta"]);
    }

    #[test]
    fn test_run_lengths() {
        let spans = [
            span("a", &["l1", "em"]),
            span("b", &["l1"]),
            span("c", &["em"]),
        ];
        let runs = run_lengths(&spans);
        assert_eq!(runs[0]["l1"], 2);
        assert_eq!(runs[0]["em"], 1);
        assert_eq!(runs[1]["l1"], 1);
        assert_eq!(runs[2]["em"], 1);
        assert!(!runs[2].contains_key("l1"));
    }

    #[test]
    fn test_long_block_renders_in_one_wrapper() {
        let children: Vec<Value> = (0..20_000)
            .map(|_| json!({"_type": "span", "text": "x", "marks": ["strong", "em"]}))
            .collect();
        let nodes = json!([{"_type": "block", "children": children}]);
        let started = std::time::Instant::now();
        let html = render(&nodes).html;
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
        assert_eq!(html.len(), "<p><strong><em></em></strong></p>".len() + 20_000);
        assert!(html.starts_with("<p><strong><em>xx"));
    }

    #[test]
    fn test_paragraph_with_decorators() {
        let nodes = json!([paragraph(&json!([
            {"_type": "span", "text": "Hello "},
            {"_type": "span", "text": "bold", "marks": ["strong"]},
            {"_type": "span", "text": " & "},
            {"_type": "span", "text": "code", "marks": ["code"]}
        ]))]);
        assert_eq!(
            render(&nodes).html,
            r#"<p>Hello <strong>bold</strong> &amp; <code class="inline-code">code</code></p>"#
        );
    }

    #[test]
    fn test_styles() {
        let nodes = json!([
            {"_type": "block", "style": "h1", "children": [{"_type": "span", "text": "Title"}]},
            {"_type": "block", "style": "blockquote", "children": [{"_type": "span", "text": "Q"}]},
            {"_type": "block", "style": "fancy", "children": [{"_type": "span", "text": "Body"}]}
        ]);
        assert_eq!(
            render(&nodes).html,
            "<h1>Title</h1><blockquote>Q</blockquote><p>Body</p>"
        );
    }

    #[test]
    fn test_line_breaks() {
        let nodes = json!([paragraph(&json!([{"_type": "span", "text": "one\ntwo"}]))]);
        assert_eq!(render(&nodes).html, "<p>one<br/>two</p>");
    }

    #[test]
    fn test_link_spanning_spans_is_one_anchor() {
        let nodes = json!([{
            "_type": "block",
            "children": [
                {"_type": "span", "text": "see ", "marks": ["l1"]},
                {"_type": "span", "text": "this", "marks": ["l1", "strong"]}
            ],
            "markDefs": [{"_type": "link", "_key": "l1", "href": "https://example.com"}]
        }]);
        assert_eq!(
            render(&nodes).html,
            r#"<p><a href="https://example.com" target="_blank" rel="noopener noreferrer">see <strong>this</strong></a></p>"#
        );
    }

    #[test]
    fn test_unsafe_link_text_preserved() {
        let nodes = json!([{
            "_type": "block",
            "children": [{"_type": "span", "text": "click <me>", "marks": ["bad"]}],
            "markDefs": [{"_type": "link", "_key": "bad", "href": "javascript:alert(1)"}]
        }]);
        assert_eq!(render(&nodes).html, "<p>click &lt;me&gt;</p>");
    }

    #[test]
    fn test_unknown_mark_passthrough() {
        let nodes = json!([{
            "_type": "block",
            "children": [{"_type": "span", "text": "glow", "marks": ["h1"]}],
            "markDefs": [{"_type": "highlight", "_key": "h1", "color": "yellow"}]
        }]);
        assert_eq!(render(&nodes).html, "<p>glow</p>");
    }

    #[test]
    fn test_internal_link_mark() {
        let nodes = json!([{
            "_type": "block",
            "children": [{"_type": "span", "text": "post", "marks": ["r"]}],
            "markDefs": [{
                "_type": "internalLink",
                "_key": "r",
                "reference": {"_type": "article", "slug": {"current": "hello"}}
            }]
        }]);
        assert_eq!(render(&nodes).html, r#"<p><a href="/articles/hello">post</a></p>"#);
    }

    #[test]
    fn test_nested_lists() {
        let item = |text: &str, kind: &str, level: u32| {
            json!({
                "_type": "block",
                "listItem": kind,
                "level": level,
                "children": [{"_type": "span", "text": text}]
            })
        };
        let nodes = json!([
            item("a", "bullet", 1),
            item("b", "bullet", 2),
            item("c", "bullet", 1),
            item("d", "number", 1),
            paragraph(&json!([{"_type": "span", "text": "after"}]))
        ]);
        assert_eq!(
            render(&nodes).html,
            "<ul><li>a<ul><li>b</li></ul></li><li>c</li></ul><ol><li>d</li></ol><p>after</p>"
        );
    }

    #[test]
    fn test_list_closed_at_end() {
        let nodes = json!([
            {"_type": "block", "listItem": "bullet", "children": [{"_type": "span", "text": "x"}]},
            {"_type": "block", "listItem": "bullet", "children": [{"_type": "span", "text": "y"}]}
        ]);
        assert_eq!(render(&nodes).html, "<ul><li>x</li><li>y</li></ul>");
    }

    #[test]
    fn test_suppressed_node_does_not_split_list() {
        let nodes = json!([
            {"_type": "block", "listItem": "bullet", "children": [{"_type": "span", "text": "x"}]},
            {"_type": "image", "asset": {}},
            {"_type": "block", "listItem": "bullet", "children": [{"_type": "span", "text": "y"}]}
        ]);
        assert_eq!(render(&nodes).html, "<ul><li>x</li><li>y</li></ul>");
    }

    #[test]
    fn test_custom_block_closes_list() {
        let nodes = json!([
            {"_type": "block", "listItem": "bullet", "children": [{"_type": "span", "text": "x"}]},
            {"_type": "code", "code": "y"}
        ]);
        assert_eq!(
            render(&nodes).html,
            r#"<ul><li>x</li></ul><figure class="code-block"><pre><code>y</code></pre></figure>"#
        );
    }

    #[test]
    fn test_reports_and_isolation() {
        let nodes = json!([
            paragraph(&json!([{"_type": "span", "text": "before"}])),
            {"_type": "callout", "_key": "c1"},
            {"_type": "carousel", "_key": "k2"},
            "garbage",
            paragraph(&json!([{"_type": "span", "text": "after"}]))
        ]);
        let result = render(&nodes);
        assert_eq!(result.html, "<p>before</p><p>after</p>");
        assert_eq!(
            result.reports[1],
            NodeReport {
                key: Some("c1".to_owned()),
                node_type: "callout".to_owned(),
                disposition: Disposition::Suppressed,
            }
        );
        assert_eq!(result.reports[2].disposition, Disposition::Passthrough);
        assert_eq!(result.reports[3].node_type, "unknown");
        assert_eq!(result.count(Disposition::Rendered), 2);
        assert_eq!(result.count(Disposition::Suppressed), 1);
        assert_eq!(result.count(Disposition::Passthrough), 2);
    }

    #[test]
    fn test_render_is_idempotent() {
        let nodes = json!([
            paragraph(&json!([{"_type": "span", "text": "x", "marks": ["em"]}])),
            {"_type": "image", "asset": {"url": "/a.png"}}
        ]);
        let renderer = PortableTextRenderer::default();
        let nodes = nodes.as_array().unwrap();
        assert_eq!(renderer.render(nodes), renderer.render(nodes));
    }

    #[test]
    fn test_render_node() {
        let renderer = PortableTextRenderer::default();
        let value = json!({
            "_type": "block",
            "style": "h3",
            "children": [{"_type": "span", "text": "Hi"}]
        });
        let node = ContentNode::from_value(&value).unwrap();
        assert_eq!(renderer.render_node(&node).html(), Some("<h3>Hi</h3>"));
    }

    #[test]
    fn test_empty_input() {
        let result = PortableTextRenderer::default().render(&[]);
        assert!(result.html.is_empty());
        assert!(result.reports.is_empty());
    }
}
