//! Snapshot tests for the AsciiDoc writer
//!
//! These tests load document trees from JSON fixtures, convert them and
//! snapshot the AsciiDoc output to detect unintended changes in rendering.
//! A fixture may come with a `.md` source used for line break resolution.

use std::fs;
use std::path::PathBuf;

use md2adoc_ast::{Node, Root};
use md2adoc_core::{Error, WriterOptions, convert};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn render_fixture(name: &str) -> String {
    let dir = fixtures_dir();
    let json = fs::read_to_string(dir.join(format!("{}.json", name)))
        .expect("Failed to read fixture file");
    let root: Root = serde_json::from_str(&json).expect("Failed to deserialize document tree");
    let source = fs::read_to_string(dir.join(format!("{}.md", name))).ok();
    convert(root, source.as_deref(), &WriterOptions::default())
        .expect("Failed to convert fixture")
}

macro_rules! snapshot_test {
    ($name:ident) => {
        #[test]
        fn $name() {
            let adoc = render_fixture(stringify!($name));
            insta::assert_snapshot!(adoc);
        }
    };
}

snapshot_test!(document);
snapshot_test!(references);
snapshot_test!(tables);
snapshot_test!(line_breaks);

#[test]
fn test_extension_node_aborts_conversion() {
    let root = Root::new(vec![
        Node::paragraph(vec![Node::text("before")]),
        Node::extension("tocMarker", vec![]),
    ]);
    let result = convert(root, None, &WriterOptions::default());
    assert!(matches!(result, Err(Error::UnsupportedNode { kind }) if kind == "tocMarker"));
}

#[test]
fn test_malformed_html_table() {
    let result = md2adoc_core::html_table::convert("<div><table></table></div>");
    assert!(matches!(result, Err(Error::MalformedInput(_))));
}
