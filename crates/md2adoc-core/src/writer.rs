//! Markdown tree to AsciiDoc writer
//!
//! Walks a normalized document tree and emits AsciiDoc. Link and image
//! references and abbreviations are resolved against [`Definitions`]
//! collected from the root before the walk starts.

use std::sync::LazyLock;

use md2adoc_ast::{
    Alignment, Html, Image, ImageKind, Link, LinkKind, LinkReference, Node, QuoteKind, Root,
    Simple, SimpleKind, StrongEmphasis, Table, TableCell, Verbatim,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::abbreviation;
use crate::definitions::Definitions;
use crate::error::{Error, Result};
use crate::escape::escape_html;
use crate::html_table;

/// Runs of blank lines, possibly holding stray indentation
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\r?\n{2,}").expect("blank line pattern: hardcoded regex is valid")
});

/// Options for the AsciiDoc writer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    /// Guess a language for code blocks that don't declare one
    pub auto_detect_language: bool,
    /// Language for untagged code blocks when detection is off
    pub default_language: Option<String>,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            auto_detect_language: true,
            default_language: None,
        }
    }
}

/// Convert a normalized Markdown tree to AsciiDoc
///
/// Runs of blank lines in the output are collapsed into one and the result
/// is trimmed.
///
/// # Errors
///
/// Returns [`Error::UnsupportedNode`] when the tree holds a node the writer
/// has no rule for, and propagates HTML table conversion failures.
pub fn root_to_adoc(root: &Root, options: &WriterOptions) -> Result<String> {
    let definitions = Definitions::collect(root, options)?;
    let mut writer = Writer::new(options, &definitions);
    for child in &root.children {
        writer.write_node(child, None)?;
    }
    Ok(normalize_blank_lines(&writer.output))
}

/// Render `nodes` as plain inline content, with no definitions in scope
pub(crate) fn render_fragment(
    nodes: &[Node],
    parent: &Node,
    options: &WriterOptions,
) -> Result<String> {
    let definitions = Definitions::default();
    let writer = Writer::new(options, &definitions);
    writer.render_to_string(nodes, Some(parent))
}

fn normalize_blank_lines(text: &str) -> String {
    BLANK_LINES.replace_all(text, "\n").trim().to_string()
}

/// AsciiDoc writer state
struct Writer<'a> {
    options: &'a WriterOptions,
    definitions: &'a Definitions,
    output: String,
    /// Spaces written after every newline (definition lists)
    indent: usize,
    list_marker: char,
    list_level: usize,
    blockquote_level: usize,
    table: Option<&'a Table>,
    column: usize,
    in_table_header: bool,
}

impl<'a> Writer<'a> {
    fn new(options: &'a WriterOptions, definitions: &'a Definitions) -> Self {
        Self {
            options,
            definitions,
            output: String::new(),
            indent: 0,
            list_marker: '*',
            list_level: 0,
            blockquote_level: 0,
            table: None,
            column: 0,
            in_table_header: false,
        }
    }

    /// A writer with the same context but an empty buffer
    fn scoped(&self) -> Self {
        Self {
            options: self.options,
            definitions: self.definitions,
            output: String::new(),
            indent: 0,
            list_marker: self.list_marker,
            list_level: self.list_level,
            blockquote_level: self.blockquote_level,
            table: self.table,
            column: self.column,
            in_table_header: self.in_table_header,
        }
    }

    fn render_to_string(&self, nodes: &'a [Node], parent: Option<&'a Node>) -> Result<String> {
        let mut writer = self.scoped();
        writer.write_children(nodes, parent)?;
        Ok(writer.output)
    }

    /// Start a new line; nothing is written at the very start of the output
    fn newline(&mut self) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        for _ in 0..self.indent {
            self.output.push(' ');
        }
    }

    fn blank_line(&mut self) {
        self.newline();
        self.newline();
    }

    fn repeat(&mut self, c: char, times: usize) {
        for _ in 0..times {
            self.output.push(c);
        }
    }

    fn write_children(&mut self, children: &'a [Node], parent: Option<&'a Node>) -> Result<()> {
        for child in children {
            self.write_node(child, parent)?;
        }
        Ok(())
    }

    fn write_node(&mut self, node: &'a Node, parent: Option<&'a Node>) -> Result<()> {
        let this = Some(node);
        match node {
            Node::Root(_) | Node::Group(_) | Node::TableBody(_) => {
                self.write_children(node.children(), this)?;
            }
            Node::Heading(h) => {
                self.blank_line();
                self.repeat('=', h.level as usize);
                self.output.push(' ');
                self.write_children(&h.children, this)?;
                self.blank_line();
            }
            Node::Paragraph(p) => {
                self.blank_line();
                self.write_children(&p.children, this)?;
                self.blank_line();
            }
            Node::BulletList(l) => self.write_list('*', &l.children, node)?,
            Node::OrderedList(l) => self.write_list('.', &l.children, node)?,
            Node::ListItem(item) => self.write_list_item(&item.children, node)?,
            Node::BlockQuote(q) => {
                self.blank_line();
                self.blockquote_level += 4;
                self.repeat('_', self.blockquote_level);
                self.newline();
                self.write_children(&q.children, this)?;
                self.blank_line();
                self.repeat('_', self.blockquote_level);
                self.blockquote_level -= 4;
                self.newline();
            }
            Node::Verbatim(v) => self.write_verbatim(v),
            Node::Table(t) => self.write_table(t, node)?,
            Node::TableHeader(h) => {
                self.in_table_header = true;
                self.write_children(&h.children, this)?;
                self.in_table_header = false;
            }
            Node::TableRow(r) => {
                self.column = 0;
                self.newline();
                self.write_children(&r.children, this)?;
                if self.in_table_header {
                    self.newline();
                }
            }
            Node::TableCell(c) => self.write_table_cell(c, node)?,
            Node::TableCaption(c) => {
                self.newline();
                self.output.push_str("<caption>");
                self.write_children(&c.children, this)?;
                self.output.push_str("</caption>");
            }
            Node::DefinitionList(l) => {
                self.newline();
                self.write_children(&l.children, this)?;
            }
            Node::DefinitionTerm(t) => {
                self.write_children(&t.children, this)?;
                self.indent += 2;
                self.output.push_str("::");
                self.newline();
            }
            Node::Definition(d) => {
                self.write_children(&d.children, this)?;
                self.indent = self.indent.saturating_sub(2);
                self.newline();
            }
            Node::HtmlBlock(html) => self.write_html_block(html)?,
            Node::ReferenceDefinition(_) | Node::AbbreviationDefinition(_) => {}
            Node::Text(t) => {
                let definitions = self.definitions;
                let abbreviations = definitions.abbreviations();
                if abbreviations.is_empty() {
                    self.output.push_str(&t.value);
                } else {
                    self.output
                        .push_str(&abbreviation::substitute(&t.value, abbreviations));
                }
            }
            Node::SpecialText(t) => self.output.push_str(&escape_html(&t.value)),
            Node::InlineCode(c) => {
                self.output.push('`');
                self.output.push_str(&escape_html(&c.value));
                self.output.push('`');
            }
            Node::StrongEmphasis(e) => self.write_strong_emphasis(e, node)?,
            Node::Strikethrough(s) => {
                self.output.push_str("[line-through]#");
                self.write_children(&s.children, this)?;
                self.output.push('#');
            }
            Node::Quoted(q) => {
                let (open, close) = match q.kind {
                    QuoteKind::Double => ("\"", "\""),
                    QuoteKind::Single => ("'", "'"),
                    QuoteKind::DoubleAngle => ("«", "»"),
                };
                self.output.push_str(open);
                self.write_children(&q.children, this)?;
                self.output.push_str(close);
            }
            Node::Simple(s) => self.write_simple(s),
            Node::Link(l) => self.write_link(l, node)?,
            Node::Image(img) => self.write_image(img, node, parent)?,
            Node::AnchorLink(a) => self.output.push_str(&a.text),
            Node::InlineHtml(html) => self.output.push_str(&html.value),
            Node::Extension(_) => {
                return Err(Error::UnsupportedNode {
                    kind: node.kind_name().to_string(),
                });
            }
        }
        Ok(())
    }

    fn write_list(&mut self, marker: char, items: &'a [Node], node: &'a Node) -> Result<()> {
        let previous_marker = std::mem::replace(&mut self.list_marker, marker);
        self.list_level += 1;
        self.write_children(items, Some(node))?;
        self.list_level -= 1;
        self.list_marker = previous_marker;
        Ok(())
    }

    fn write_list_item(&mut self, children: &'a [Node], node: &'a Node) -> Result<()> {
        self.newline();
        self.repeat(self.list_marker, self.list_level);
        self.output.push(' ');

        for (i, child) in children.iter().enumerate() {
            match child {
                // The item's own text sits on the marker line
                Node::Paragraph(p) if i == 0 => self.write_children(&p.children, Some(child))?,
                _ => self.write_node(child, Some(node))?,
            }
        }
        Ok(())
    }

    fn write_verbatim(&mut self, verbatim: &Verbatim) {
        self.newline();

        let language = match verbatim.language.as_deref().map(str::trim) {
            Some(language) if !language.is_empty() => Some(language.to_string()),
            _ if self.options.auto_detect_language => {
                let guessed = detect_language(&verbatim.value);
                tracing::debug!(language = guessed, "Guessed code block language");
                Some(guessed.to_string())
            }
            _ => self.options.default_language.clone(),
        };
        if let Some(language) = language {
            self.output.push_str("[source,");
            self.output.push_str(&language);
            self.output.push(']');
        }

        self.newline();
        self.output.push_str("----");
        self.newline();
        self.output.push_str(&verbatim.value);
        if !verbatim.value.ends_with('\n') {
            self.output.push('\n');
        }
        self.output.push_str("----");
        self.blank_line();
    }

    fn write_table(&mut self, table: &'a Table, node: &'a Node) -> Result<()> {
        let previous_table = self.table.replace(table);
        let previous_column = self.column;

        self.newline();
        if table
            .columns
            .iter()
            .any(|c| c.alignment != Alignment::None)
        {
            let cols: Vec<&str> = table
                .columns
                .iter()
                .map(|c| match c.alignment {
                    Alignment::None | Alignment::Left => "<",
                    Alignment::Right => ">",
                    Alignment::Center => "^",
                })
                .collect();
            self.output.push_str(&format!("[cols=\"{}\"]", cols.join(",")));
            self.newline();
        }

        self.output.push_str("|===");
        self.write_children(&table.children, Some(node))?;
        self.newline();
        self.output.push_str("|===");
        self.newline();

        self.table = previous_table;
        self.column = previous_column;
        Ok(())
    }

    fn write_table_cell(&mut self, cell: &'a TableCell, node: &'a Node) -> Result<()> {
        let column_count = self.table.map_or(0, |t| t.columns.len());
        let index = self.column.min(column_count.saturating_sub(1));
        if index != self.column {
            tracing::warn!(
                column = self.column,
                columns = column_count,
                "Table cell column index clamped to last column"
            );
        }

        if self.output.is_empty() || self.output.ends_with(['\n', ' ']) {
            self.output.push('|');
        } else {
            self.output.push_str(" |");
        }
        if cell.col_span > 1 {
            self.output
                .push_str(&format!(" colspan=\"{}\"", cell.col_span));
        }
        self.write_children(&cell.children, Some(node))?;

        self.column += cell.col_span.max(1) as usize;
        Ok(())
    }

    fn write_html_block(&mut self, html: &Html) -> Result<()> {
        if html.value.is_empty() {
            return Ok(());
        }
        self.newline();
        if html.value.starts_with("<table") {
            self.output.push_str(&html_table::convert(&html.value)?);
        } else {
            self.output.push_str(&html.value);
        }
        self.newline();
        Ok(())
    }

    fn write_strong_emphasis(&mut self, e: &'a StrongEmphasis, node: &'a Node) -> Result<()> {
        if e.closed {
            let token = if e.strong { '*' } else { '_' };
            self.output.push(token);
            self.write_children(&e.children, Some(node))?;
            self.output.push(token);
        } else {
            // Never closed: the opening characters were literal text
            self.output.push_str(&e.delimiter);
            self.write_children(&e.children, Some(node))?;
        }
        Ok(())
    }

    fn write_simple(&mut self, simple: &Simple) {
        match simple.kind {
            SimpleKind::Apostrophe => self.output.push('\''),
            SimpleKind::Ellipsis => self.output.push('…'),
            SimpleKind::Emdash => self.output.push('—'),
            SimpleKind::Endash => self.output.push('–'),
            SimpleKind::HorizontalRule => {
                self.blank_line();
                self.output.push_str("'''");
            }
            SimpleKind::NonBreakingSpace => self.output.push_str("{nbsp}"),
            SimpleKind::HardLineBreak => {
                self.output.push_str(" +");
                self.newline();
            }
            SimpleKind::LineBreak => self.newline(),
        }
    }

    fn write_link(&mut self, link: &'a Link, node: &'a Node) -> Result<()> {
        match link.kind {
            LinkKind::Auto => self.write_uri(&link.url, &link.url),
            LinkKind::Mail => self.write_uri(&format!("mailto:{}", link.url), &link.url),
            LinkKind::Wiki => self.write_uri(&wiki_href(&link.url), &link.url),
            LinkKind::Explicit => {
                let text = self.render_to_string(&link.children, Some(node))?;
                self.write_link_text(&link.url, &text);
            }
            LinkKind::Reference => {
                let text = self.render_to_string(&link.children, Some(node))?;
                let key = self.reference_key(link.reference.as_ref(), &text, node)?;
                let definitions = self.definitions;
                match definitions.reference(&key) {
                    Some(reference) => self.write_link_text(&reference.url, &text),
                    None => {
                        tracing::warn!(key = %key, "Unresolved link reference, keeping literal text");
                        self.write_unresolved("", &text, link.reference.as_ref(), &key);
                    }
                }
            }
        }
        Ok(())
    }

    /// Link with rendered text; text that is already an image macro stands alone
    fn write_link_text(&mut self, href: &str, text: &str) {
        if text.starts_with("image:") {
            self.output.push_str(text);
        } else {
            self.write_uri(href, text);
        }
    }

    fn write_uri(&mut self, href: &str, text: &str) {
        if let Some(anchor) = href.strip_prefix('#') {
            self.output.push_str("<<");
            self.output.push_str(anchor);
            self.output.push(',');
            self.output.push_str(text);
            self.output.push_str(">>");
            return;
        }

        let uri = if href.contains("://") {
            href.to_string()
        } else {
            format!("link:{href}")
        };
        self.output.push_str(&uri);
        if uri != text {
            self.output.push('[');
            self.push_attribute_text(text);
            self.output.push(']');
        }
    }

    fn write_image(
        &mut self,
        image: &'a Image,
        node: &'a Node,
        parent: Option<&'a Node>,
    ) -> Result<()> {
        let text = self.render_to_string(&image.children, Some(node))?;

        let href = match image.kind {
            ImageKind::Explicit => image.url.clone(),
            ImageKind::Reference => {
                let key = self.reference_key(image.reference.as_ref(), &text, node)?;
                let definitions = self.definitions;
                match definitions.reference(&key) {
                    Some(reference) => reference.url.clone(),
                    None => {
                        tracing::warn!(key = %key, "Unresolved image reference, keeping literal text");
                        self.write_unresolved("!", &text, image.reference.as_ref(), &key);
                        return Ok(());
                    }
                }
            }
        };

        // Only an image that is the link's whole content takes over the link
        let link_href = match parent {
            Some(link_node) => match link_node {
                Node::Link(link) if link.children.len() == 1 => {
                    self.link_href(link, link_node)?
                }
                _ => None,
            },
            None => None,
        };

        self.output.push_str("image:");
        self.output.push_str(&href);
        self.output.push('[');
        match link_href {
            Some(link_href) => {
                if !text.is_empty() {
                    self.push_attribute_text(&text);
                    self.output.push(',');
                }
                self.output.push_str("link=");
                self.output.push_str(&link_href);
            }
            None => self.push_attribute_text(&text),
        }
        self.output.push(']');
        Ok(())
    }

    /// Target of the link an image sits in
    ///
    /// Reference links only resolve through an explicit key; their text is
    /// the image itself.
    fn link_href(&self, link: &'a Link, node: &'a Node) -> Result<Option<String>> {
        let href = match link.kind {
            LinkKind::Explicit | LinkKind::Auto => Some(link.url.clone()),
            LinkKind::Mail => Some(format!("mailto:{}", link.url)),
            LinkKind::Wiki => Some(wiki_href(&link.url)),
            LinkKind::Reference => match link.reference.as_ref().and_then(|r| r.key.as_ref()) {
                Some(key) => {
                    let key = self.render_to_string(key, Some(node))?;
                    self.definitions.reference(&key).map(|r| r.url.clone())
                }
                None => None,
            },
        };
        Ok(href)
    }

    /// Lookup key of a reference link or image: its explicit key, else its text
    fn reference_key(
        &self,
        reference: Option<&'a LinkReference>,
        text: &str,
        node: &'a Node,
    ) -> Result<String> {
        match reference.and_then(|r| r.key.as_ref()) {
            Some(key) => self.render_to_string(key, Some(node)),
            None => Ok(text.to_string()),
        }
    }

    /// The reference as it appeared in the source: `[text]`, `[text][]` or `[text][key]`
    fn write_unresolved(
        &mut self,
        prefix: &str,
        text: &str,
        reference: Option<&LinkReference>,
        key: &str,
    ) {
        self.output.push_str(prefix);
        self.output.push('[');
        self.output.push_str(text);
        self.output.push(']');
        if let Some(reference) = reference {
            self.output.push_str(&reference.separator);
            self.output.push('[');
            if reference.key.is_some() {
                self.output.push_str(key);
            }
            self.output.push(']');
        }
    }

    /// Text inside an attribute list, quoted when it holds a comma
    fn push_attribute_text(&mut self, text: &str) {
        if text.contains(',') {
            self.output.push('"');
            self.output.push_str(text);
            self.output.push('"');
        } else {
            self.output.push_str(text);
        }
    }
}

/// Guess the language of an untagged code block
///
/// The order of the checks matters: markup first, then statement-terminated
/// code, then Kotlin, with Groovy as the fallback. The text is checked as
/// given, so a block ending in a newline never counts as statement-terminated.
fn detect_language(code: &str) -> &'static str {
    if code.starts_with('<') {
        "html"
    } else if code.ends_with(';') {
        "java"
    } else if code.contains("fun ") {
        "kotlin"
    } else {
        "groovy"
    }
}

/// Relative page URL of a wiki link: spaces become dashes, the rest is form-encoded
fn wiki_href(page: &str) -> String {
    let dashed = page.replace(' ', "-");
    let encoded: String = url::form_urlencoded::byte_serialize(dashed.as_bytes()).collect();
    format!("./{encoded}.html")
}
