//! In-memory representation of YAML-like document trees.
//!
//! [`Node`] is a closed sum type so the merger can match every pairing of
//! node kinds exhaustively. Comments travel with the node they annotate and
//! are stored without their leading `#` marker.

mod anchor;

use std::fmt;

pub use anchor::{Anchor, AnchorTable, NodeId};

/// Head and trailing comments attached to a node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Comments {
    /// Comment lines emitted above the node, joined with `\n`.
    pub head: String,
    /// Comment emitted after the node on the same line.
    pub line: String,
}

impl Comments {
    /// Returns `true` when neither comment is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_empty() && self.line.is_empty()
    }

    /// Clear both comments.
    pub fn clear(&mut self) {
        self.head.clear();
        self.line.clear();
    }
}

/// Presentation style of a collection, preserved for the serialiser.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Style {
    /// Indented block layout.
    #[default]
    Block,
    /// Inline `[a, b]` / `{a: b}` layout.
    Flow,
}

/// A leaf value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scalar {
    /// Source text of the scalar.
    pub value: String,
    /// Explicit tag such as `!!str`, when present.
    pub tag: Option<String>,
    /// Attached comments.
    pub comments: Comments,
}

/// An ordered mapping with unique keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mapping {
    /// Entries in insertion order.
    pub entries: Vec<(Node, Node)>,
    /// Presentation style.
    pub style: Style,
    /// Attached comments.
    pub comments: Comments,
}

/// An ordered list of nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence {
    /// Elements in order.
    pub items: Vec<Node>,
    /// Presentation style.
    pub style: Style,
    /// Attached comments.
    pub comments: Comments,
}

/// Reference to an anchored body; does not own the body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alias {
    /// Anchor the alias points at.
    pub anchor: Anchor,
    /// Attached comments.
    pub comments: Comments,
}

/// Universal tree unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Leaf value.
    Scalar(Scalar),
    /// Ordered key/value entries.
    Mapping(Mapping),
    /// Ordered elements.
    Sequence(Sequence),
    /// Reference to an anchored body.
    Alias(Alias),
    /// Explicit empty value, distinct from an absent key.
    Null(Comments),
}

/// Discriminant of a [`Node`], used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// [`Node::Scalar`]
    Scalar,
    /// [`Node::Mapping`]
    Mapping,
    /// [`Node::Sequence`]
    Sequence,
    /// [`Node::Alias`]
    Alias,
    /// [`Node::Null`]
    Null,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "scalar",
            Self::Mapping => "mapping",
            Self::Sequence => "sequence",
            Self::Alias => "alias",
            Self::Null => "null",
        })
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::Null(Comments::default())
    }
}

impl Node {
    /// Build an untagged scalar.
    #[must_use]
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar {
            value: value.into(),
            ..Scalar::default()
        })
    }

    /// Build an explicit null.
    #[must_use]
    pub fn null() -> Self {
        Self::default()
    }

    /// Build an alias to `anchor`.
    #[must_use]
    pub fn alias(anchor: impl Into<Anchor>) -> Self {
        Self::Alias(Alias {
            anchor: anchor.into(),
            comments: Comments::default(),
        })
    }

    /// Build a block mapping. Later duplicates of a key replace earlier ones.
    #[must_use]
    pub fn mapping<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Self, Self)>,
    {
        let mut mapping = Mapping::default();
        for (key, value) in entries {
            mapping.insert(key, value);
        }
        Self::Mapping(mapping)
    }

    /// Build a block sequence.
    #[must_use]
    pub fn sequence<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Sequence(Sequence {
            items: items.into_iter().collect(),
            ..Sequence::default()
        })
    }

    /// Attach a trailing comment.
    #[must_use]
    pub fn with_line_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments_mut().line = comment.into();
        self
    }

    /// Attach a head comment.
    #[must_use]
    pub fn with_head_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments_mut().head = comment.into();
        self
    }

    /// Switch a collection to flow style. Leaves other kinds untouched.
    #[must_use]
    pub fn flow(mut self) -> Self {
        match &mut self {
            Self::Mapping(mapping) => mapping.style = Style::Flow,
            Self::Sequence(sequence) => sequence.style = Style::Flow,
            Self::Scalar(_) | Self::Alias(_) | Self::Null(_) => {}
        }
        self
    }

    /// Discriminant of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Scalar(_) => NodeKind::Scalar,
            Self::Mapping(_) => NodeKind::Mapping,
            Self::Sequence(_) => NodeKind::Sequence,
            Self::Alias(_) => NodeKind::Alias,
            Self::Null(_) => NodeKind::Null,
        }
    }

    /// Comments attached to this node.
    #[must_use]
    pub const fn comments(&self) -> &Comments {
        match self {
            Self::Scalar(Scalar { comments, .. })
            | Self::Mapping(Mapping { comments, .. })
            | Self::Sequence(Sequence { comments, .. })
            | Self::Alias(Alias { comments, .. })
            | Self::Null(comments) => comments,
        }
    }

    /// Mutable access to the comments attached to this node.
    pub const fn comments_mut(&mut self) -> &mut Comments {
        match self {
            Self::Scalar(Scalar { comments, .. })
            | Self::Mapping(Mapping { comments, .. })
            | Self::Sequence(Sequence { comments, .. })
            | Self::Alias(Alias { comments, .. })
            | Self::Null(comments) => comments,
        }
    }

    /// Returns `true` for [`Node::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null(_))
    }

    /// Scalar text, if this is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(scalar) => Some(&scalar.value),
            _ => None,
        }
    }

    /// Mapping body, if this is a mapping.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Sequence body, if this is a sequence.
    #[must_use]
    pub const fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    /// Target anchor, if this is an alias.
    #[must_use]
    pub const fn as_alias(&self) -> Option<&Anchor> {
        match self {
            Self::Alias(alias) => Some(&alias.anchor),
            _ => None,
        }
    }

    /// Look up `key` when this node is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_mapping().and_then(|mapping| mapping.get(key))
    }

    /// Structural equality that ignores comments and presentation style.
    ///
    /// Mapping keys are matched with this relation, so `a # note` and `a`
    /// address the same entry.
    #[must_use]
    pub fn content_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(lhs), Self::Scalar(rhs)) => lhs.value == rhs.value && lhs.tag == rhs.tag,
            (Self::Alias(lhs), Self::Alias(rhs)) => lhs.anchor == rhs.anchor,
            (Self::Null(_), Self::Null(_)) => true,
            (Self::Sequence(lhs), Self::Sequence(rhs)) => {
                lhs.items.len() == rhs.items.len()
                    && lhs
                        .items
                        .iter()
                        .zip(&rhs.items)
                        .all(|(l, r)| l.content_eq(r))
            }
            (Self::Mapping(lhs), Self::Mapping(rhs)) => {
                lhs.entries.len() == rhs.entries.len()
                    && lhs.entries.iter().zip(&rhs.entries).all(|(l, r)| {
                        l.0.content_eq(&r.0) && l.1.content_eq(&r.1)
                    })
            }
            _ => false,
        }
    }

    /// Remove every comment in this subtree.
    pub fn strip_comments(&mut self) {
        self.comments_mut().clear();
        match self {
            Self::Mapping(mapping) => {
                for (key, value) in &mut mapping.entries {
                    key.strip_comments();
                    value.strip_comments();
                }
            }
            Self::Sequence(sequence) => {
                for item in &mut sequence.items {
                    item.strip_comments();
                }
            }
            Self::Scalar(_) | Self::Alias(_) | Self::Null(_) => {}
        }
    }
}

impl Mapping {
    /// Index of the entry whose key has the same content as `key`.
    #[must_use]
    pub fn position(&self, key: &Node) -> Option<usize> {
        self.entries
            .iter()
            .position(|(candidate, _)| candidate.content_eq(key))
    }

    /// Value stored under the scalar key `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate.as_scalar() == Some(key))
            .map(|(_, value)| value)
    }

    /// Insert `value` under `key`, replacing an existing entry in place.
    pub fn insert(&mut self, key: Node, value: Node) {
        if let Some(entry) = self
            .position(&key)
            .and_then(|index| self.entries.get_mut(index))
        {
            entry.1 = value;
            return;
        }
        self.entries.push((key, value));
    }

    /// Iterate over scalar keys in order; non-scalar keys are skipped.
    pub fn scalar_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|(key, _)| key.as_scalar())
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the mapping has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::scalar(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::scalar(value)
    }
}
