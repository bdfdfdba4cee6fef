//! md2adoc-ast: Markdown document tree for md2adoc
//!
//! This crate provides:
//! - The node types a Markdown parser hands over for conversion
//! - Tree normalization (wrapper collapsing, hard/soft line break resolution)
//!
//! ## Example
//!
//! ```rust
//! use md2adoc_ast::{Node, Root, normalize};
//!
//! let mut doc = Root::new(vec![
//!     Node::group(vec![Node::heading(1, vec![Node::text("Hello")])]),
//!     Node::paragraph(vec![Node::text("World")]),
//! ]);
//!
//! normalize(&mut doc);
//! assert!(matches!(doc.children[0], Node::Heading(_)));
//! ```

pub mod node;
pub mod normalize;

pub use node::{
    AbbreviationDefinition, Alignment, AnchorLink, BlockQuote, ColumnSpec, Definition,
    DefinitionList, DefinitionTerm, Extension, Group, Heading, Html, Image, ImageKind, InlineCode,
    Link, LinkKind, LinkReference, List, ListItem, Node, Paragraph, QuoteKind, Quoted,
    ReferenceDefinition, Root, Simple, SimpleKind, Span, Strikethrough, StrongEmphasis, Table,
    TableBody, TableCaption, TableCell, TableHeader, TableRow, Text, Verbatim,
};
pub use normalize::{normalize, resolve_line_breaks};
