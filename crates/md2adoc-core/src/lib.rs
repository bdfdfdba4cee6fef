//! md2adoc-core: Core library for converting Markdown document trees to AsciiDoc
//!
//! This crate provides:
//! - Reference and abbreviation definition collection
//! - The AsciiDoc writer
//! - Raw HTML table conversion
//! - Abbreviation markup for plain text
//!
//! ## Example
//!
//! ```rust
//! use md2adoc_ast::{Node, Root};
//! use md2adoc_core::{WriterOptions, convert};
//!
//! let doc = Root::new(vec![
//!     Node::heading(1, vec![Node::text("Title")]),
//!     Node::paragraph(vec![Node::text("Hello "), Node::strong(vec![Node::text("world")])]),
//! ]);
//!
//! let adoc = convert(doc, None, &WriterOptions::default()).unwrap();
//! assert_eq!(adoc, "= Title\n\nHello *world*");
//! ```

pub mod abbreviation;
pub mod definitions;
pub mod error;
mod escape;
pub mod html_table;
pub mod writer;

pub use definitions::{Definitions, Reference, normalize_key};
pub use error::{Error, Result};
pub use writer::{WriterOptions, root_to_adoc};

use md2adoc_ast::{Root, normalize, resolve_line_breaks};

/// Convert a freshly parsed Markdown tree to AsciiDoc
///
/// The tree is normalized first. When the Markdown `source` is given, line
/// breaks ending in two spaces become hard breaks (` +`); without it every
/// break is soft.
pub fn convert(mut root: Root, source: Option<&str>, options: &WriterOptions) -> Result<String> {
    normalize(&mut root);
    if let Some(source) = source {
        resolve_line_breaks(&mut root, source);
    }
    root_to_adoc(&root, options)
}
