//! Conversion between node trees and [`serde_json::Value`].
//!
//! JSON carries no comments, anchors or tags, so converting to JSON resolves
//! every alias and drops comments. Scalars are typed by content unless they
//! carry the `!!str` tag.

use std::collections::HashSet;

use serde_json::{Map, Number, Value};

use crate::document::Document;
use crate::node::{Anchor, Node, Scalar};

const STR_TAG: &str = "!!str";

impl From<Value> for Node {
    fn from(json: Value) -> Self {
        match json {
            Value::Null => Self::null(),
            Value::Bool(flag) => Self::scalar(flag.to_string()),
            Value::Number(number) => Self::scalar(number.to_string()),
            Value::String(text) => {
                if matches!(typed_scalar(&text), Value::String(_)) {
                    Self::scalar(text)
                } else {
                    Self::Scalar(Scalar {
                        value: text,
                        tag: Some(STR_TAG.to_owned()),
                        ..Scalar::default()
                    })
                }
            }
            Value::Array(items) => Self::sequence(items.into_iter().map(Self::from)),
            Value::Object(entries) => Self::mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (Self::scalar(key), Self::from(value))),
            ),
        }
    }
}

impl From<Value> for Document {
    fn from(json: Value) -> Self {
        Self::new(Node::from(json))
    }
}

impl Document {
    /// Render the document as JSON.
    ///
    /// Aliases are replaced by their anchored bodies. An alias that refers
    /// to a body it is nested in, or that has no anchor, renders as `null`.
    ///
    /// # Examples
    ///
    /// ```
    /// use doc_merge::{Document, Node};
    /// use serde_json::json;
    ///
    /// let doc = Document::new(Node::mapping([(Node::scalar("port"), Node::alias("p"))]))
    ///     .with_anchor("p", Node::scalar("8080"));
    /// assert_eq!(doc.to_json(), json!({"port": 8080}));
    /// ```
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut active = HashSet::new();
        self.node_to_json(self.root(), &mut active)
    }

    fn node_to_json<'a>(&'a self, node: &'a Node, active: &mut HashSet<&'a Anchor>) -> Value {
        match node {
            Node::Null(_) => Value::Null,
            Node::Scalar(scalar) if scalar.tag.as_deref() == Some(STR_TAG) => {
                Value::String(scalar.value.clone())
            }
            Node::Scalar(scalar) => typed_scalar(&scalar.value),
            Node::Sequence(sequence) => Value::Array(
                sequence
                    .items
                    .iter()
                    .map(|item| self.node_to_json(item, active))
                    .collect(),
            ),
            Node::Mapping(mapping) => {
                let mut object = Map::new();
                for (key, value) in &mapping.entries {
                    let name = key.as_scalar().map_or_else(
                        || self.node_to_json(key, active).to_string(),
                        str::to_owned,
                    );
                    object.insert(name, self.node_to_json(value, active));
                }
                Value::Object(object)
            }
            Node::Alias(alias) => {
                let Some(body) = self.anchors().get(&alias.anchor) else {
                    return Value::Null;
                };
                if !active.insert(&alias.anchor) {
                    return Value::Null;
                }
                let rendered = self.node_to_json(body, active);
                active.remove(&alias.anchor);
                rendered
            }
        }
    }
}

fn typed_scalar(text: &str) -> Value {
    match text {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" | "~" => return Value::Null,
        _ => {}
    }
    text.parse::<Number>()
        .map_or_else(|_| Value::String(text.to_owned()), Value::Number)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::document::Document;
    use crate::node::Node;

    #[rstest]
    #[case::integer("42", json!(42))]
    #[case::float("1.5", json!(1.5))]
    #[case::boolean("true", json!(true))]
    #[case::null("~", Value::Null)]
    #[case::text("cat", json!("cat"))]
    #[case::not_a_number("inf", json!("inf"))]
    #[case::unsigned("18446744073709551615", json!(18_446_744_073_709_551_615_u64))]
    fn scalars_are_typed_by_content(#[case] text: &str, #[case] expected: Value) {
        assert_eq!(Document::new(Node::scalar(text)).to_json(), expected);
    }

    #[test]
    fn numeric_strings_survive_a_round_trip() {
        let value = json!({
            "version": "1.0",
            "name": "app",
            "tags": ["a", "1"],
            "max": 18_446_744_073_709_551_615_u64,
            "min": i64::MIN,
            "ratio": 0.25,
        });
        let doc = Document::from(value.clone());
        assert_eq!(doc.to_json(), value);
    }

    #[test]
    fn comments_are_dropped() {
        let doc = Document::new(Node::mapping([(
            Node::scalar("a"),
            Node::scalar("x").with_line_comment("note"),
        )]));
        assert_eq!(doc.to_json(), json!({"a": "x"}));
    }

    #[test]
    fn self_referencing_alias_renders_null() {
        let doc = Document::new(Node::alias("loop"))
            .with_anchor("loop", Node::mapping([(Node::scalar("next"), Node::alias("loop"))]));
        assert_eq!(doc.to_json(), json!({"next": null}));
    }

    #[test]
    fn shared_alias_renders_at_each_use() {
        let doc = Document::new(Node::sequence([Node::alias("v"), Node::alias("v")]))
            .with_anchor("v", Node::scalar("cat"));
        assert_eq!(doc.to_json(), json!(["cat", "cat"]));
    }
}
