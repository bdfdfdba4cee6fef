//! Markdown document tree types
//!
//! The closed set of node kinds a Markdown parser hands over for AsciiDoc
//! rendering. Block and inline nodes share one enum so that any node can
//! appear anywhere a parser puts it.

use serde::{Deserialize, Serialize};

/// Root node of a parsed Markdown document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub children: Vec<Node>,
}

/// A document tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    // Structural nodes
    Root(Root),
    Group(Group),

    // Block nodes
    Heading(Heading),
    Paragraph(Paragraph),
    BulletList(List),
    OrderedList(List),
    ListItem(ListItem),
    BlockQuote(BlockQuote),
    Verbatim(Verbatim),
    Table(Table),
    TableHeader(TableHeader),
    TableBody(TableBody),
    TableRow(TableRow),
    TableCell(TableCell),
    TableCaption(TableCaption),
    DefinitionList(DefinitionList),
    DefinitionTerm(DefinitionTerm),
    Definition(Definition),
    HtmlBlock(Html),

    // Document-level definitions (never rendered directly)
    ReferenceDefinition(ReferenceDefinition),
    AbbreviationDefinition(AbbreviationDefinition),

    // Inline nodes
    Text(Text),
    SpecialText(Text),
    InlineCode(InlineCode),
    StrongEmphasis(StrongEmphasis),
    Strikethrough(Strikethrough),
    Quoted(Quoted),
    Simple(Simple),
    Link(Link),
    Image(Image),
    AnchorLink(AnchorLink),
    InlineHtml(Html),

    // Parser extension output with no rendering rule
    Extension(Extension),
}

/// Generic grouping node, as produced by parsers that wrap runs of inline content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub children: Vec<Node>,
}

/// Heading node (`=` to `======`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub children: Vec<Node>,
}

/// Paragraph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub children: Vec<Node>,
}

/// Bullet or ordered list; the variant carrying it decides which
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub children: Vec<Node>,
}

/// List item node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub children: Vec<Node>,
}

/// Block quote node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockQuote {
    pub children: Vec<Node>,
}

/// Fenced or indented code block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verbatim {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub value: String,
}

/// Table node
///
/// `columns` is the authoritative column count of the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<ColumnSpec>,
    pub children: Vec<Node>,
}

/// Column declaration from the table's delimiter row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    #[serde(default)]
    pub alignment: Alignment,
}

/// Column alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    None,
    Left,
    Right,
    Center,
}

/// Table header section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableHeader {
    pub children: Vec<Node>,
}

/// Table body section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBody {
    pub children: Vec<Node>,
}

/// Table row node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub children: Vec<Node>,
}

/// Table cell node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default = "default_col_span")]
    pub col_span: u32,
    pub children: Vec<Node>,
}

fn default_col_span() -> u32 {
    1
}

/// Table caption node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCaption {
    pub children: Vec<Node>,
}

/// Definition list (extension)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionList {
    pub children: Vec<Node>,
}

/// Definition term (extension)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionTerm {
    pub children: Vec<Node>,
}

/// Definition body (extension)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub children: Vec<Node>,
}

/// Raw HTML, block or inline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Html {
    pub value: String,
}

/// Link reference definition: `[label]: url "title"`
///
/// `children` hold the label as parsed inline content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDefinition {
    pub children: Vec<Node>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Abbreviation definition: `*[HTML]: Hyper Text Markup Language`
///
/// `children` hold the abbreviation itself, `expansion` its long form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbbreviationDefinition {
    pub children: Vec<Node>,
    #[serde(default)]
    pub expansion: Vec<Node>,
}

/// Plain text node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
}

/// Inline code node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineCode {
    pub value: String,
}

/// Strong (`**`) or emphasis (`*`) run
///
/// An unclosed run keeps the delimiter it was opened with so it can be
/// printed back as literal text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrongEmphasis {
    pub strong: bool,
    #[serde(default = "default_closed")]
    pub closed: bool,
    #[serde(default)]
    pub delimiter: String,
    pub children: Vec<Node>,
}

fn default_closed() -> bool {
    true
}

/// Strikethrough node (`~~text~~`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strikethrough {
    pub children: Vec<Node>,
}

/// Smart-quoted run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quoted {
    pub kind: QuoteKind,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuoteKind {
    Double,
    Single,
    DoubleAngle,
}

/// Typographic or structural leaf node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simple {
    pub kind: SimpleKind,
    /// Byte range of the node in the Markdown source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SimpleKind {
    Apostrophe,
    Ellipsis,
    Emdash,
    Endash,
    HorizontalRule,
    /// Line break as reported by the parser; soft unless resolved otherwise
    LineBreak,
    /// Line break known to be hard (two trailing spaces in the source)
    HardLineBreak,
    NonBreakingSpace,
}

/// Byte range into the Markdown source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Link node
///
/// For `Reference` links `url` is empty and the target is looked up through
/// the document's reference definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub kind: LinkKind,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<LinkReference>,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkKind {
    Auto,
    Explicit,
    Reference,
    Wiki,
    Mail,
}

/// Image node; `children` hold the alt text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub kind: ImageKind,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<LinkReference>,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageKind {
    Explicit,
    Reference,
}

/// Second bracket pair of a reference link or image
///
/// Absent for the shortcut form `[text]`. `key` is `None` for the collapsed
/// form `[text][]`, where the text doubles as the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkReference {
    #[serde(default)]
    pub separator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Vec<Node>>,
}

/// Heading anchor produced by some parsers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorLink {
    pub name: String,
    pub text: String,
}

/// Node emitted by a parser extension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    pub name: String,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    /// Child nodes in document order; empty for leaves
    pub fn children(&self) -> &[Node] {
        match self.children_ref() {
            Some(children) => children,
            None => &[],
        }
    }

    fn children_ref(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Root(n) => Some(&n.children),
            Node::Group(n) => Some(&n.children),
            Node::Heading(n) => Some(&n.children),
            Node::Paragraph(n) => Some(&n.children),
            Node::BulletList(n) | Node::OrderedList(n) => Some(&n.children),
            Node::ListItem(n) => Some(&n.children),
            Node::BlockQuote(n) => Some(&n.children),
            Node::Table(n) => Some(&n.children),
            Node::TableHeader(n) => Some(&n.children),
            Node::TableBody(n) => Some(&n.children),
            Node::TableRow(n) => Some(&n.children),
            Node::TableCell(n) => Some(&n.children),
            Node::TableCaption(n) => Some(&n.children),
            Node::DefinitionList(n) => Some(&n.children),
            Node::DefinitionTerm(n) => Some(&n.children),
            Node::Definition(n) => Some(&n.children),
            Node::ReferenceDefinition(n) => Some(&n.children),
            Node::AbbreviationDefinition(n) => Some(&n.children),
            Node::StrongEmphasis(n) => Some(&n.children),
            Node::Strikethrough(n) => Some(&n.children),
            Node::Quoted(n) => Some(&n.children),
            Node::Link(n) => Some(&n.children),
            Node::Image(n) => Some(&n.children),
            Node::Extension(n) => Some(&n.children),
            Node::Verbatim(_)
            | Node::HtmlBlock(_)
            | Node::Text(_)
            | Node::SpecialText(_)
            | Node::InlineCode(_)
            | Node::Simple(_)
            | Node::AnchorLink(_)
            | Node::InlineHtml(_) => None,
        }
    }

    /// Mutable access to the child list, `None` for leaves
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root(n) => Some(&mut n.children),
            Node::Group(n) => Some(&mut n.children),
            Node::Heading(n) => Some(&mut n.children),
            Node::Paragraph(n) => Some(&mut n.children),
            Node::BulletList(n) | Node::OrderedList(n) => Some(&mut n.children),
            Node::ListItem(n) => Some(&mut n.children),
            Node::BlockQuote(n) => Some(&mut n.children),
            Node::Table(n) => Some(&mut n.children),
            Node::TableHeader(n) => Some(&mut n.children),
            Node::TableBody(n) => Some(&mut n.children),
            Node::TableRow(n) => Some(&mut n.children),
            Node::TableCell(n) => Some(&mut n.children),
            Node::TableCaption(n) => Some(&mut n.children),
            Node::DefinitionList(n) => Some(&mut n.children),
            Node::DefinitionTerm(n) => Some(&mut n.children),
            Node::Definition(n) => Some(&mut n.children),
            Node::ReferenceDefinition(n) => Some(&mut n.children),
            Node::AbbreviationDefinition(n) => Some(&mut n.children),
            Node::StrongEmphasis(n) => Some(&mut n.children),
            Node::Strikethrough(n) => Some(&mut n.children),
            Node::Quoted(n) => Some(&mut n.children),
            Node::Link(n) => Some(&mut n.children),
            Node::Image(n) => Some(&mut n.children),
            Node::Extension(n) => Some(&mut n.children),
            Node::Verbatim(_)
            | Node::HtmlBlock(_)
            | Node::Text(_)
            | Node::SpecialText(_)
            | Node::InlineCode(_)
            | Node::Simple(_)
            | Node::AnchorLink(_)
            | Node::InlineHtml(_) => None,
        }
    }

    /// Name of the node kind, as used in the serialized `type` tag
    pub fn kind_name(&self) -> &str {
        match self {
            Node::Root(_) => "root",
            Node::Group(_) => "group",
            Node::Heading(_) => "heading",
            Node::Paragraph(_) => "paragraph",
            Node::BulletList(_) => "bulletList",
            Node::OrderedList(_) => "orderedList",
            Node::ListItem(_) => "listItem",
            Node::BlockQuote(_) => "blockQuote",
            Node::Verbatim(_) => "verbatim",
            Node::Table(_) => "table",
            Node::TableHeader(_) => "tableHeader",
            Node::TableBody(_) => "tableBody",
            Node::TableRow(_) => "tableRow",
            Node::TableCell(_) => "tableCell",
            Node::TableCaption(_) => "tableCaption",
            Node::DefinitionList(_) => "definitionList",
            Node::DefinitionTerm(_) => "definitionTerm",
            Node::Definition(_) => "definition",
            Node::HtmlBlock(_) => "htmlBlock",
            Node::ReferenceDefinition(_) => "referenceDefinition",
            Node::AbbreviationDefinition(_) => "abbreviationDefinition",
            Node::Text(_) => "text",
            Node::SpecialText(_) => "specialText",
            Node::InlineCode(_) => "inlineCode",
            Node::StrongEmphasis(_) => "strongEmphasis",
            Node::Strikethrough(_) => "strikethrough",
            Node::Quoted(_) => "quoted",
            Node::Simple(_) => "simple",
            Node::Link(_) => "link",
            Node::Image(_) => "image",
            Node::AnchorLink(_) => "anchorLink",
            Node::InlineHtml(_) => "inlineHtml",
            Node::Extension(e) => &e.name,
        }
    }
}

// Convenience constructors
impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(Text { value: s.into() })
    }

    pub fn special_text(s: impl Into<String>) -> Self {
        Node::SpecialText(Text { value: s.into() })
    }

    pub fn group(children: Vec<Node>) -> Self {
        Node::Group(Group { children })
    }

    pub fn root(children: Vec<Node>) -> Self {
        Node::Root(Root { children })
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(Paragraph { children })
    }

    pub fn heading(level: u8, children: Vec<Node>) -> Self {
        Node::Heading(Heading { level, children })
    }

    pub fn bullet_list(children: Vec<Node>) -> Self {
        Node::BulletList(List { children })
    }

    pub fn ordered_list(children: Vec<Node>) -> Self {
        Node::OrderedList(List { children })
    }

    pub fn list_item(children: Vec<Node>) -> Self {
        Node::ListItem(ListItem { children })
    }

    pub fn block_quote(children: Vec<Node>) -> Self {
        Node::BlockQuote(BlockQuote { children })
    }

    pub fn verbatim(language: Option<String>, value: impl Into<String>) -> Self {
        Node::Verbatim(Verbatim {
            language,
            value: value.into(),
        })
    }

    pub fn inline_code(value: impl Into<String>) -> Self {
        Node::InlineCode(InlineCode {
            value: value.into(),
        })
    }

    pub fn table(columns: Vec<Alignment>, children: Vec<Node>) -> Self {
        Node::Table(Table {
            columns: columns
                .into_iter()
                .map(|alignment| ColumnSpec { alignment })
                .collect(),
            children,
        })
    }

    pub fn table_header(children: Vec<Node>) -> Self {
        Node::TableHeader(TableHeader { children })
    }

    pub fn table_body(children: Vec<Node>) -> Self {
        Node::TableBody(TableBody { children })
    }

    pub fn table_row(children: Vec<Node>) -> Self {
        Node::TableRow(TableRow { children })
    }

    pub fn table_cell(children: Vec<Node>) -> Self {
        Node::TableCell(TableCell {
            col_span: 1,
            children,
        })
    }

    pub fn table_cell_spanning(col_span: u32, children: Vec<Node>) -> Self {
        Node::TableCell(TableCell { col_span, children })
    }

    pub fn table_caption(children: Vec<Node>) -> Self {
        Node::TableCaption(TableCaption { children })
    }

    pub fn definition_list(children: Vec<Node>) -> Self {
        Node::DefinitionList(DefinitionList { children })
    }

    pub fn definition_term(children: Vec<Node>) -> Self {
        Node::DefinitionTerm(DefinitionTerm { children })
    }

    pub fn definition(children: Vec<Node>) -> Self {
        Node::Definition(Definition { children })
    }

    pub fn html_block(value: impl Into<String>) -> Self {
        Node::HtmlBlock(Html {
            value: value.into(),
        })
    }

    pub fn inline_html(value: impl Into<String>) -> Self {
        Node::InlineHtml(Html {
            value: value.into(),
        })
    }

    pub fn reference_definition(
        label: Vec<Node>,
        url: impl Into<String>,
        title: Option<String>,
    ) -> Self {
        Node::ReferenceDefinition(ReferenceDefinition {
            children: label,
            url: url.into(),
            title,
        })
    }

    pub fn abbreviation_definition(abbreviation: Vec<Node>, expansion: Vec<Node>) -> Self {
        Node::AbbreviationDefinition(AbbreviationDefinition {
            children: abbreviation,
            expansion,
        })
    }

    pub fn strong(children: Vec<Node>) -> Self {
        Node::StrongEmphasis(StrongEmphasis {
            strong: true,
            closed: true,
            delimiter: "**".to_string(),
            children,
        })
    }

    pub fn emphasis(children: Vec<Node>) -> Self {
        Node::StrongEmphasis(StrongEmphasis {
            strong: false,
            closed: true,
            delimiter: "*".to_string(),
            children,
        })
    }

    /// A strong/emphasis run whose closing delimiter never appeared
    pub fn unclosed_emphasis(delimiter: impl Into<String>, children: Vec<Node>) -> Self {
        let delimiter = delimiter.into();
        Node::StrongEmphasis(StrongEmphasis {
            strong: delimiter.len() > 1,
            closed: false,
            delimiter,
            children,
        })
    }

    pub fn strikethrough(children: Vec<Node>) -> Self {
        Node::Strikethrough(Strikethrough { children })
    }

    pub fn quoted(kind: QuoteKind, children: Vec<Node>) -> Self {
        Node::Quoted(Quoted { kind, children })
    }

    pub fn simple(kind: SimpleKind) -> Self {
        Node::Simple(Simple { kind, span: None })
    }

    /// Line break covering `start..end` of the Markdown source
    pub fn line_break(start: usize, end: usize) -> Self {
        Node::Simple(Simple {
            kind: SimpleKind::LineBreak,
            span: Some(Span { start, end }),
        })
    }

    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Link(Link {
            kind: LinkKind::Explicit,
            url: url.into(),
            title: None,
            reference: None,
            children,
        })
    }

    pub fn link_with_title(
        url: impl Into<String>,
        title: impl Into<String>,
        children: Vec<Node>,
    ) -> Self {
        Node::Link(Link {
            kind: LinkKind::Explicit,
            url: url.into(),
            title: Some(title.into()),
            reference: None,
            children,
        })
    }

    pub fn auto_link(url: impl Into<String>) -> Self {
        Node::Link(Link {
            kind: LinkKind::Auto,
            url: url.into(),
            title: None,
            reference: None,
            children: Vec::new(),
        })
    }

    pub fn mail_link(address: impl Into<String>) -> Self {
        Node::Link(Link {
            kind: LinkKind::Mail,
            url: address.into(),
            title: None,
            reference: None,
            children: Vec::new(),
        })
    }

    pub fn wiki_link(page: impl Into<String>) -> Self {
        Node::Link(Link {
            kind: LinkKind::Wiki,
            url: page.into(),
            title: None,
            reference: None,
            children: Vec::new(),
        })
    }

    /// Reference link; `reference` is `None` for the shortcut form `[text]`
    pub fn reference_link(children: Vec<Node>, reference: Option<LinkReference>) -> Self {
        Node::Link(Link {
            kind: LinkKind::Reference,
            url: String::new(),
            title: None,
            reference,
            children,
        })
    }

    pub fn image(url: impl Into<String>, alt: Vec<Node>) -> Self {
        Node::Image(Image {
            kind: ImageKind::Explicit,
            url: url.into(),
            title: None,
            reference: None,
            children: alt,
        })
    }

    pub fn reference_image(alt: Vec<Node>, reference: Option<LinkReference>) -> Self {
        Node::Image(Image {
            kind: ImageKind::Reference,
            url: String::new(),
            title: None,
            reference,
            children: alt,
        })
    }

    pub fn anchor_link(name: impl Into<String>, text: impl Into<String>) -> Self {
        Node::AnchorLink(AnchorLink {
            name: name.into(),
            text: text.into(),
        })
    }

    pub fn extension(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Extension(Extension {
            name: name.into(),
            children,
        })
    }
}

impl LinkReference {
    /// Full form `[text][key]`
    pub fn keyed(separator: impl Into<String>, key: Vec<Node>) -> Self {
        Self {
            separator: separator.into(),
            key: Some(key),
        }
    }

    /// Collapsed form `[text][]`
    pub fn collapsed(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            key: None,
        }
    }
}

impl Root {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_constructors() {
        let text = Node::text("hello");
        assert!(matches!(text, Node::Text(Text { value }) if value == "hello"));

        let heading = Node::heading(2, vec![Node::text("Title")]);
        assert!(matches!(heading, Node::Heading(Heading { level: 2, .. })));

        let para = Node::paragraph(vec![Node::text("content")]);
        assert!(matches!(para, Node::Paragraph(_)));
    }

    #[test]
    fn test_emphasis_constructors() {
        let Node::StrongEmphasis(strong) = Node::strong(vec![Node::text("x")]) else {
            panic!("Expected StrongEmphasis node");
        };
        assert!(strong.strong);
        assert!(strong.closed);

        let Node::StrongEmphasis(open) = Node::unclosed_emphasis("__", vec![Node::text("x")])
        else {
            panic!("Expected StrongEmphasis node");
        };
        assert!(open.strong);
        assert!(!open.closed);
        assert_eq!(open.delimiter, "__");
    }

    #[test]
    fn test_table_constructors() {
        let table = Node::table(
            vec![Alignment::Left, Alignment::None],
            vec![Node::table_body(vec![Node::table_row(vec![
                Node::table_cell(vec![Node::text("A")]),
                Node::table_cell_spanning(2, vec![Node::text("B")]),
            ])])],
        );
        let Node::Table(t) = table else {
            panic!("Expected Table node");
        };
        assert_eq!(t.columns.len(), 2);
        assert_eq!(t.columns[1].alignment, Alignment::None);
    }

    #[test]
    fn test_children_of_leaves_are_empty() {
        assert!(Node::text("x").children().is_empty());
        assert!(Node::simple(SimpleKind::Emdash).children().is_empty());
        assert!(Node::text("x").children_mut().is_none());
    }

    #[test]
    fn test_kind_name() {
        assert_eq!(Node::bullet_list(vec![]).kind_name(), "bulletList");
        assert_eq!(Node::extension("mathBlock", vec![]).kind_name(), "mathBlock");
    }

    #[test]
    fn test_serde_roundtrip() {
        let root = Root::new(vec![
            Node::heading(1, vec![Node::text("Title")]),
            Node::paragraph(vec![
                Node::text("Hello "),
                Node::strong(vec![Node::text("world")]),
                Node::line_break(12, 15),
                Node::reference_link(
                    vec![Node::text("docs")],
                    Some(LinkReference::keyed(" ", vec![Node::text("Docs")])),
                ),
            ]),
        ]);

        let json = serde_json::to_string(&root).unwrap();
        let parsed: Root = serde_json::from_str(&json).unwrap();
        assert_eq!(root, parsed);
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"children":[
            {"type":"tableCell","children":[]},
            {"type":"strongEmphasis","strong":false,"children":[]},
            {"type":"simple","kind":"nonBreakingSpace"}
        ]}"#;
        let root: Root = serde_json::from_str(json).unwrap();
        assert!(matches!(&root.children[0], Node::TableCell(c) if c.col_span == 1));
        assert!(matches!(&root.children[1], Node::StrongEmphasis(e) if e.closed));
        assert!(
            matches!(&root.children[2], Node::Simple(s) if s.kind == SimpleKind::NonBreakingSpace && s.span.is_none())
        );
    }
}
