//! Raw HTML table to AsciiDoc table conversion
//!
//! Markdown lets authors drop a literal `<table>` into a document. Those
//! blocks are parsed with html5ever and re-emitted as an AsciiDoc `|===`
//! table; only the first table in the fragment is converted.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever::Attribute;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::cell::RefCell;

use crate::error::{Error, Result};

const TABLE_FENCE: &str = "|===\n";

/// Convert an HTML fragment starting with `<table` into AsciiDoc
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] if `html` does not start with a table
/// tag, and [`Error::Html`] if the parser fails to read the input.
pub fn convert(html: &str) -> Result<String> {
    if !html.starts_with("<table") {
        return Err(Error::MalformedInput(format!(
            "No table found in HTML: {html}"
        )));
    }

    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())?;

    let mut result = String::from(TABLE_FENCE);
    if let Some(table) = find_element(&dom.document, "table") {
        let mut rows = Vec::new();
        collect_elements(&table, "tr", &mut rows);
        tracing::debug!(rows = rows.len(), "Converting HTML table");

        for row in &rows {
            let header = build_row(row, "th");
            result.push_str(&header.text);
            if header.cells > 0 {
                result.push('\n');
            }

            result.push_str(&build_row(row, "td").text);
            result.push('\n');
        }
    }
    result.push_str(TABLE_FENCE);

    Ok(result)
}

/// One row's worth of cells of a single kind (`th` or `td`)
struct Row {
    text: String,
    cells: usize,
}

fn build_row(row: &Handle, cell_tag: &str) -> Row {
    let mut text = String::new();
    let mut cells = 0;
    for child in row.children.borrow().iter() {
        if let NodeData::Element { name, attrs, .. } = &child.data
            && name.local.as_ref() == cell_tag
        {
            cells += 1;
            text.push('|');
            if let Some(span) = colspan(attrs) {
                text.push_str(&format!(" colspan=\"{span}\""));
            }
            text.push_str(&format_cell(child));
            text.push(' ');
        }
    }
    Row {
        text: text.trim().to_string(),
        cells,
    }
}

/// Cell text with basic inline formatting
///
/// A recognized formatting child replaces the cell's own text; when there
/// are several, the last one wins.
fn format_cell(cell: &Handle) -> String {
    let mut result = own_text(cell);

    for child in cell.children.borrow().iter() {
        let NodeData::Element { name, attrs, .. } = &child.data else {
            continue;
        };
        let text = own_text(child);
        match name.local.as_ref() {
            "code" => result = format!("`{text}`"),
            "b" | "strong" => result = format!("*{text}*"),
            "i" | "em" => result = format!("_{text}_"),
            "a" => {
                let href = get_attr(attrs, "href").unwrap_or_default();
                result = format!("{href}[{text}]");
            }
            _ => {}
        }
    }

    result
}

/// Text of the element's direct text children, whitespace collapsed
fn own_text(handle: &Handle) -> String {
    let mut text = String::new();
    for child in handle.children.borrow().iter() {
        if let NodeData::Text { contents } = &child.data {
            text.push_str(&contents.borrow());
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn colspan(attrs: &RefCell<Vec<Attribute>>) -> Option<u32> {
    get_attr(attrs, "colspan")
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|&span| span > 1)
}

fn get_attr(attrs: &RefCell<Vec<Attribute>>, name: &str) -> Option<String> {
    attrs
        .borrow()
        .iter()
        .find(|attr| attr.name.local.as_ref() == name)
        .map(|attr| attr.value.to_string())
}

/// First element named `tag` in document order
fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    for child in handle.children.borrow().iter() {
        if let NodeData::Element { name, .. } = &child.data
            && name.local.as_ref() == tag
        {
            return Some(child.clone());
        }
        if let Some(found) = find_element(child, tag) {
            return Some(found);
        }
    }
    None
}

/// All descendant elements named `tag`, in document order
fn collect_elements(handle: &Handle, tag: &str, found: &mut Vec<Handle>) {
    for child in handle.children.borrow().iter() {
        if let NodeData::Element { name, .. } = &child.data
            && name.local.as_ref() == tag
        {
            found.push(child.clone());
        }
        collect_elements(child, tag, found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_data_rows() {
        let html = "<table>\
            <tr><th>Name</th><th>Type</th></tr>\
            <tr><td><code>id</code></td><td>integer</td></tr>\
            </table>";
        assert_eq!(
            convert(html).unwrap(),
            "|===\n|Name |Type\n\n|`id` |integer\n|===\n"
        );
    }

    #[test]
    fn test_formatting_children() {
        let html = "<table><tr>\
            <td><b>bold</b></td>\
            <td><em>it</em></td>\
            <td><a href=\"https://x.io\">site</a></td>\
            </tr></table>";
        assert_eq!(
            convert(html).unwrap(),
            "|===\n|*bold* |_it_ |https://x.io[site]\n|===\n"
        );
    }

    #[test]
    fn test_last_formatting_child_wins() {
        let html = "<table><tr><td>x <code>a</code> <b>b</b></td></tr></table>";
        assert_eq!(convert(html).unwrap(), "|===\n|*b*\n|===\n");
    }

    #[test]
    fn test_colspan() {
        let html = "<table><tr><td colspan=\"2\">wide</td><td colspan=\"1\">one</td></tr></table>";
        assert_eq!(
            convert(html).unwrap(),
            "|===\n| colspan=\"2\"wide |one\n|===\n"
        );
    }

    #[test]
    fn test_own_text_collapses_whitespace() {
        let html = "<table><tr><td>\n   spread\n   out   </td></tr></table>";
        assert_eq!(convert(html).unwrap(), "|===\n|spread out\n|===\n");
    }

    #[test]
    fn test_only_first_table() {
        let html = "<table><tr><td>first</td></tr></table>\
            <table><tr><td>second</td></tr></table>";
        assert_eq!(convert(html).unwrap(), "|===\n|first\n|===\n");
    }

    #[test]
    fn test_rejects_non_table() {
        let err = convert("<p>no table</p>").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
        assert!(err.to_string().contains("No table found in HTML"));
    }
}
