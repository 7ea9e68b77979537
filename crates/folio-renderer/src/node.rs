//! Content nodes narrowed from untyped CMS values.
//!
//! [`ContentNode::from_value`] is the boundary between the decoded JSON the
//! content source hands over and the shapes the renderer works with. Text
//! blocks get a typed view; every other node type stays a borrowed record
//! that block renderers read through [`crate::record`].

use serde_json::{Map, Value};

use crate::record::get_string;

/// Type tag of text blocks.
pub const BLOCK_TYPE: &str = "block";

/// Type tag of inline text spans.
pub const SPAN_TYPE: &str = "span";

/// One element of a content sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum ContentNode<'a> {
    /// Paragraph-like node holding spans.
    Block(Block<'a>),
    /// Any other node type (image, code, callout, embed, reference, ...).
    Custom(CustomNode<'a>),
}

impl<'a> ContentNode<'a> {
    /// Narrow a decoded value into a content node.
    ///
    /// Returns `None` when the value is not an object or has no `_type`.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_renderer::ContentNode;
    /// use serde_json::json;
    ///
    /// let value = json!({"_type": "image", "_key": "a1", "asset": {"url": "/x.png"}});
    /// let node = ContentNode::from_value(&value).unwrap();
    /// assert_eq!(node.node_type(), "image");
    /// assert_eq!(node.key(), Some("a1"));
    ///
    /// assert!(ContentNode::from_value(&json!({"asset": {}})).is_none());
    /// ```
    #[must_use]
    pub fn from_value(value: &'a Value) -> Option<Self> {
        let node_type = get_string(value, "_type")?;
        let key = get_string(value, "_key");
        if node_type == BLOCK_TYPE {
            Some(Self::Block(Block::from_value(value, key)))
        } else {
            Some(Self::Custom(CustomNode {
                node_type,
                key,
                value,
            }))
        }
    }

    /// The node's type tag.
    #[must_use]
    pub fn node_type(&self) -> &'a str {
        match self {
            Self::Block(_) => BLOCK_TYPE,
            Self::Custom(node) => node.node_type,
        }
    }

    /// The node's key within its sequence, if present.
    #[must_use]
    pub fn key(&self) -> Option<&'a str> {
        match self {
            Self::Block(block) => block.key,
            Self::Custom(node) => node.key,
        }
    }
}

/// A text block: ordered spans plus the mark definitions they reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Block<'a> {
    pub key: Option<&'a str>,
    /// Block style (`normal`, `h1`..`h6`, `blockquote`).
    pub style: &'a str,
    /// List kind (`bullet`, `number`) when the block is a list item.
    pub list_item: Option<&'a str>,
    /// List nesting level, starting at 1.
    pub level: u32,
    pub children: Vec<Span<'a>>,
    pub mark_defs: Vec<MarkDefinition<'a>>,
}

impl<'a> Block<'a> {
    fn from_value(value: &'a Value, key: Option<&'a str>) -> Self {
        let children = value
            .get("children")
            .and_then(Value::as_array)
            .map(|children| children.iter().filter_map(Span::from_value).collect())
            .unwrap_or_default();
        let mark_defs = value
            .get("markDefs")
            .and_then(Value::as_array)
            .map(|defs| defs.iter().filter_map(MarkDefinition::from_value).collect())
            .unwrap_or_default();
        let level = value
            .get("level")
            .and_then(Value::as_u64)
            .and_then(|level| u32::try_from(level).ok())
            .filter(|level| *level > 0)
            .unwrap_or(1);

        Self {
            key,
            style: get_string(value, "style").unwrap_or("normal"),
            list_item: get_string(value, "listItem"),
            level,
            children,
            mark_defs,
        }
    }

    /// Find the mark definition a span mark refers to.
    #[must_use]
    pub fn mark_def(&self, key: &str) -> Option<&MarkDefinition<'a>> {
        self.mark_defs.iter().find(|def| def.key == key)
    }
}

/// Inline text with references to marks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span<'a> {
    pub key: Option<&'a str>,
    pub text: &'a str,
    /// Mark definition keys or decorator names.
    pub marks: Vec<&'a str>,
}

impl<'a> Span<'a> {
    fn from_value(value: &'a Value) -> Option<Self> {
        // Children without a type are treated as spans.
        if value.get("_type").is_some() && get_string(value, "_type") != Some(SPAN_TYPE) {
            return None;
        }
        let marks = value
            .get("marks")
            .and_then(Value::as_array)
            .map(|marks| marks.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        Some(Self {
            key: get_string(value, "_key"),
            text: value.get("text").and_then(Value::as_str).unwrap_or(""),
            marks,
        })
    }
}

static EMPTY_RECORD: Value = Value::Null;

/// An inline annotation definition (`link`, `internalLink`, ...).
#[derive(Clone, Debug, PartialEq)]
pub struct MarkDefinition<'a> {
    pub key: &'a str,
    pub mark_type: &'a str,
    /// Full definition payload; [`Value::Null`] for decorators.
    pub value: &'a Value,
}

impl<'a> MarkDefinition<'a> {
    fn from_value(value: &'a Value) -> Option<Self> {
        Some(Self {
            key: get_string(value, "_key")?,
            mark_type: get_string(value, "_type")?,
            value,
        })
    }

    /// Definition for a decorator mark, which carries no payload.
    #[must_use]
    pub fn decorator(name: &'a str) -> Self {
        Self {
            key: name,
            mark_type: name,
            value: &EMPTY_RECORD,
        }
    }

    /// The payload as an object, if it is one.
    #[must_use]
    pub fn fields(&self) -> Option<&'a Map<String, Value>> {
        self.value.as_object()
    }
}

/// Any non-text node; fields are read defensively from `value`.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomNode<'a> {
    pub node_type: &'a str,
    pub key: Option<&'a str>,
    pub value: &'a Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_narrowing() {
        let value = json!({
            "_type": "block",
            "_key": "b1",
            "style": "h2",
            "children": [
                {"_type": "span", "_key": "s1", "text": "Hello ", "marks": ["strong"]},
                {"_type": "span", "_key": "s2", "text": "world", "marks": ["l1", 7]}
            ],
            "markDefs": [{"_type": "link", "_key": "l1", "href": "https://example.com"}]
        });
        let Some(ContentNode::Block(block)) = ContentNode::from_value(&value) else {
            panic!("expected block");
        };
        assert_eq!(block.key, Some("b1"));
        assert_eq!(block.style, "h2");
        assert_eq!(block.level, 1);
        assert_eq!(block.children.len(), 2);
        assert_eq!(block.children[1].marks, vec!["l1"]);
        assert_eq!(block.mark_def("l1").map(|d| d.mark_type), Some("link"));
        assert!(block.mark_def("strong").is_none());
    }

    #[test]
    fn test_block_defaults() {
        let value = json!({"_type": "block"});
        let Some(ContentNode::Block(block)) = ContentNode::from_value(&value) else {
            panic!("expected block");
        };
        assert_eq!(block.style, "normal");
        assert!(block.children.is_empty());
        assert!(block.mark_defs.is_empty());
        assert!(block.list_item.is_none());
    }

    #[test]
    fn test_list_item_fields() {
        let value = json!({"_type": "block", "listItem": "number", "level": 3});
        let Some(ContentNode::Block(block)) = ContentNode::from_value(&value) else {
            panic!("expected block");
        };
        assert_eq!(block.list_item, Some("number"));
        assert_eq!(block.level, 3);
    }

    #[test]
    fn test_invalid_level_defaults_to_one() {
        for level in [json!(0), json!(-2), json!("2"), json!(1.5)] {
            let value = json!({"_type": "block", "listItem": "bullet", "level": level});
            let Some(ContentNode::Block(block)) = ContentNode::from_value(&value) else {
                panic!("expected block");
            };
            assert_eq!(block.level, 1);
        }
    }

    #[test]
    fn test_non_span_children_dropped() {
        let value = json!({
            "_type": "block",
            "children": [
                {"_type": "span", "text": "kept"},
                {"_type": "inlineImage", "asset": {}},
                {"text": "untyped"},
                {"_type": "span"}
            ]
        });
        let Some(ContentNode::Block(block)) = ContentNode::from_value(&value) else {
            panic!("expected block");
        };
        let texts: Vec<&str> = block.children.iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["kept", "untyped", ""]);
    }

    #[test]
    fn test_incomplete_mark_defs_dropped() {
        let value = json!({
            "_type": "block",
            "markDefs": [
                {"_type": "link"},
                {"_key": "k"},
                {"_type": "link", "_key": "ok"}
            ]
        });
        let Some(ContentNode::Block(block)) = ContentNode::from_value(&value) else {
            panic!("expected block");
        };
        assert_eq!(block.mark_defs.len(), 1);
        assert_eq!(block.mark_defs[0].key, "ok");
    }

    #[test]
    fn test_custom_node() {
        let value = json!({"_type": "callout", "_key": "c1", "title": "Heads up"});
        let node = ContentNode::from_value(&value).unwrap();
        assert_eq!(node.node_type(), "callout");
        assert!(matches!(node, ContentNode::Custom(ref c) if c.value == &value));
    }

    #[test]
    fn test_untyped_values_rejected() {
        assert!(ContentNode::from_value(&json!("text")).is_none());
        assert!(ContentNode::from_value(&json!({"_type": ""})).is_none());
        assert!(ContentNode::from_value(&json!({"_type": 5})).is_none());
        assert!(ContentNode::from_value(&json!(null)).is_none());
    }

    #[test]
    fn test_decorator_definition() {
        let def = MarkDefinition::decorator("strong");
        assert_eq!(def.mark_type, "strong");
        assert!(def.fields().is_none());
    }
}
