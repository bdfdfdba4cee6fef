//! Document-level reference and abbreviation definitions
//!
//! Collected in one pass over the root's children before anything is
//! written, so a definition may appear after its first use.

use std::collections::HashMap;

use md2adoc_ast::{Node, Root};

use crate::abbreviation::Abbreviations;
use crate::error::Result;
use crate::writer::{WriterOptions, render_fragment};

/// Target of a link reference definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub url: String,
    pub title: Option<String>,
}

/// Lookup tables built from a document's definitions
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    references: HashMap<String, Reference>,
    abbreviations: Abbreviations,
}

impl Definitions {
    /// Collect the definitions among `root`'s direct children
    ///
    /// Labels, abbreviations and expansions are rendered to text first.
    /// Later definitions overwrite earlier ones with the same key.
    pub fn collect(root: &Root, options: &WriterOptions) -> Result<Self> {
        let mut definitions = Self::default();

        for node in &root.children {
            match node {
                Node::ReferenceDefinition(def) => {
                    let label = render_fragment(&def.children, node, options)?;
                    definitions.references.insert(
                        normalize_key(&label),
                        Reference {
                            url: def.url.clone(),
                            title: def.title.clone(),
                        },
                    );
                }
                Node::AbbreviationDefinition(def) => {
                    let abbreviation = render_fragment(&def.children, node, options)?;
                    let expansion = render_fragment(&def.expansion, node, options)?;
                    definitions.abbreviations.insert(abbreviation, expansion);
                }
                _ => {}
            }
        }

        Ok(definitions)
    }

    /// Look up a reference by key, ignoring case and whitespace
    pub fn reference(&self, key: &str) -> Option<&Reference> {
        self.references.get(&normalize_key(key))
    }

    pub fn abbreviations(&self) -> &Abbreviations {
        &self.abbreviations
    }
}

/// Normalize a reference key: drop spaces, tabs and newlines, lowercase the rest
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\n'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Docs Site"), "docssite");
        assert_eq!(normalize_key(" a\tB\nc "), "abc");
        assert_eq!(normalize_key("ÄPI"), "äpi");
    }

    #[test]
    fn test_collect_references() {
        let root = Root::new(vec![
            Node::paragraph(vec![Node::text("body")]),
            Node::reference_definition(
                vec![Node::text("Docs "), Node::strong(vec![Node::text("Site")])],
                "https://docs.example.com",
                Some("Docs".to_string()),
            ),
        ]);
        let definitions = Definitions::collect(&root, &WriterOptions::default()).unwrap();

        // The label renders as "Docs *Site*", which is the normalized key
        let reference = definitions.reference("docs *site*").unwrap();
        assert_eq!(reference.url, "https://docs.example.com");
        assert_eq!(reference.title.as_deref(), Some("Docs"));
        assert!(definitions.reference("docs site").is_none());
    }

    #[test]
    fn test_last_definition_wins() {
        let root = Root::new(vec![
            Node::reference_definition(vec![Node::text("key")], "https://first.example", None),
            Node::reference_definition(vec![Node::text("KEY")], "https://second.example", None),
        ]);
        let definitions = Definitions::collect(&root, &WriterOptions::default()).unwrap();
        assert_eq!(
            definitions.reference("Key").map(|r| r.url.as_str()),
            Some("https://second.example")
        );
    }

    #[test]
    fn test_collect_abbreviations() {
        let root = Root::new(vec![
            Node::abbreviation_definition(
                vec![Node::text("HTML")],
                vec![Node::text("Hyper Text Markup Language")],
            ),
            Node::abbreviation_definition(vec![Node::text("TBD")], vec![]),
        ]);
        let definitions = Definitions::collect(&root, &WriterOptions::default()).unwrap();

        let abbreviations = definitions.abbreviations();
        assert_eq!(abbreviations.len(), 2);
        assert_eq!(abbreviations["HTML"], "Hyper Text Markup Language");
        assert_eq!(abbreviations["TBD"], "");
    }

    #[test]
    fn test_nested_definitions_are_not_collected() {
        let root = Root::new(vec![Node::block_quote(vec![Node::reference_definition(
            vec![Node::text("inner")],
            "https://inner.example",
            None,
        )])]);
        let definitions = Definitions::collect(&root, &WriterOptions::default()).unwrap();
        assert!(definitions.reference("inner").is_none());
    }
}
