//! Sample documents reused by merge scenarios.

use doc_merge::{Document, Node};

use crate::nodes::{doc, map, s, sc, seq};

/// `a: simple # just the best`, `b: [1, 2]`, `c: {test: 1}`.
#[must_use]
pub fn data1() -> Document {
    doc(map([
        ("a", sc("simple", "just the best")),
        ("b", seq(&["1", "2"]).flow()),
        ("c", map([("test", s("1"))])),
    ]))
}

/// Overlay for [`data1`] with a replacement scalar, a new array, and new
/// nested keys.
#[must_use]
pub fn data2() -> Document {
    doc(map([
        ("a", s("other")),
        ("b", seq(&["3", "4"]).flow()),
        (
            "c",
            map([
                ("toast", s("leave")),
                ("test", s("1")),
                ("tell", s("1")),
                ("tasty.taco", s("cool")),
            ]),
        ),
    ]))
}

/// An empty document.
#[must_use]
pub fn empty() -> Document {
    doc(Node::null())
}
