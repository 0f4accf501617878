//! Integration tests replaying merge scenarios over whole documents.
//!
//! Covers key creation, overwrite and array strategies, comment retention,
//! alias rebinding, and empty or null inputs.

use anyhow::{Context, Result, ensure};
use doc_merge::{
    Anchor, ArrayStrategy, Document, DocumentSelection, MergePolicy, Node, merge_document_groups,
};
use rstest::rstest;
use test_helpers::nodes::{doc, keys, map, s, scalars};
use test_helpers::samples::{data1, data2, empty};

fn merge_pair(base: Document, overlay: Document, policy: &MergePolicy) -> Result<Document> {
    let mut merged =
        merge_document_groups(vec![vec![base], vec![overlay]], DocumentSelection::All, policy)?;
    ensure!(merged.len() == 1, "expected one document, got {}", merged.len());
    merged.pop().context("merged document")
}

#[rstest]
fn default_merge_adds_nested_keys() -> Result<()> {
    let merged = merge_pair(data1(), data2(), &MergePolicy::default())?;

    let a = merged.get("a").context("a")?;
    ensure!(a.as_scalar() == Some("simple"), "a overwritten: {a:?}");
    ensure!(a.comments().line == "just the best", "comment lost");
    let b = scalars(merged.get("b").context("b")?);
    ensure!(b == ["1", "2"], "b changed: {b:?}");
    let c = keys(merged.get("c").context("c")?);
    ensure!(
        c == ["test", "toast", "tell", "tasty.taco"],
        "unexpected nested keys: {c:?}"
    );
    Ok(())
}

#[rstest]
#[case::update(ArrayStrategy::Update, &["3", "4"])]
#[case::append(ArrayStrategy::Append, &["1", "2", "3", "4"])]
#[case::overwrite(ArrayStrategy::Overwrite, &["3", "4"])]
fn overwrite_keeps_base_comment_for_every_array_strategy(
    #[case] arrays: ArrayStrategy,
    #[case] expected: &[&str],
) -> Result<()> {
    let policy = MergePolicy::default()
        .with_overwrite(true)
        .with_arrays(arrays);
    let merged = merge_pair(data1(), data2(), &policy)?;

    let a = merged.get("a").context("a")?;
    ensure!(a.as_scalar() == Some("other"), "a kept: {a:?}");
    ensure!(a.comments().line == "just the best", "comment lost");
    let b = scalars(merged.get("b").context("b")?);
    ensure!(b == expected, "b mismatch: {b:?}");
    Ok(())
}

#[rstest]
fn appended_array_elements_keep_their_structure() -> Result<()> {
    let person = |name: &str, age: &str| map([("name", s(name)), ("age", s(age))]);
    let base = doc(map([("people", Node::sequence([person("Barry", "21")]))]));
    let overlay = doc(map([("people", Node::sequence([person("Roger", "44")]))]));
    let policy = MergePolicy::default().with_arrays(ArrayStrategy::Append);
    let merged = merge_pair(base, overlay, &policy)?;

    let people = merged
        .get("people")
        .and_then(Node::as_sequence)
        .context("people")?;
    let names: Vec<&str> = people
        .items
        .iter()
        .filter_map(|person| person.get("name").and_then(Node::as_scalar))
        .collect();
    ensure!(names == ["Barry", "Roger"], "names: {names:?}");
    Ok(())
}

#[rstest]
fn overlay_aliases_replace_base_values_with_overwrite() -> Result<()> {
    let base = doc(map([
        ("vars", map([("variable1", Node::alias("var1"))])),
        (
            "usage",
            map([
                ("value1", Node::alias("var1")),
                ("valueAnother", Node::alias("var1")),
                ("valuePlain", s("thing")),
            ]),
        ),
    ]))
    .with_anchor("var1", s("cat"));
    let overlay = doc(map([
        ("vars", map([("variable2", Node::alias("var2"))])),
        (
            "usage",
            map([
                ("value2", Node::alias("var2")),
                ("valueAnother", Node::alias("var2")),
                ("valuePlain", Node::alias("var2")),
            ]),
        ),
    ]))
    .with_anchor("var2", s("puppy"));
    let policy = MergePolicy::default().with_overwrite(true);
    let merged = merge_pair(base, overlay, &policy)?;

    let vars = keys(merged.get("vars").context("vars")?);
    ensure!(vars == ["variable1", "variable2"], "vars: {vars:?}");
    let usage = merged.get("usage").context("usage")?;
    ensure!(
        keys(usage) == ["value1", "valueAnother", "valuePlain", "value2"],
        "usage keys: {:?}",
        keys(usage)
    );
    let targets: Vec<&str> = ["value1", "valueAnother", "valuePlain", "value2"]
        .iter()
        .filter_map(|key| usage.get(key).and_then(Node::as_alias))
        .map(Anchor::as_str)
        .collect();
    ensure!(
        targets == ["var1", "var2", "var2", "var2"],
        "alias targets: {targets:?}"
    );
    ensure!(
        merged.anchor("var2").and_then(Node::as_scalar) == Some("puppy"),
        "overlay anchor not registered"
    );
    Ok(())
}

#[rstest]
#[case::empty_base(empty(), data1())]
#[case::empty_overlay(data1(), empty())]
fn empty_documents_yield_the_other_side(
    #[case] base: Document,
    #[case] overlay: Document,
) -> Result<()> {
    let merged = merge_pair(base, overlay, &MergePolicy::default())?;
    ensure!(merged == data1(), "unexpected merge: {merged:?}");
    Ok(())
}

#[rstest]
fn keys_with_special_characters_are_copied_verbatim() -> Result<()> {
    let overlay = doc(map([
        ("key[bracket]", s("value")),
        ("key.bracket", s("value")),
        ("key\"value\"", s("value")),
        ("key'value'", s("value")),
    ]));
    let merged = merge_pair(empty(), overlay.clone(), &MergePolicy::default())?;
    ensure!(merged == overlay, "keys altered: {merged:?}");
    Ok(())
}

#[rstest]
fn null_mapping_value_takes_overlay_mapping() -> Result<()> {
    let overlay = doc(map([("b", map([("thing", s("a frog"))]))]));
    let base = doc(map([("b", Node::null())]));
    let merged = merge_pair(base, overlay.clone(), &MergePolicy::default())?;
    ensure!(merged == overlay, "null not replaced: {merged:?}");
    Ok(())
}
