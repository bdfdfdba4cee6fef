//! Abbreviation markup for plain text
//!
//! Every whole-word occurrence of a defined abbreviation is wrapped in an
//! `<abbr>` tag carrying the expansion as its title.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::escape::escape_html;

/// Abbreviation text mapped to its expansion
pub type Abbreviations = BTreeMap<String, String>;

/// An accepted occurrence: the abbreviation and its expansion
type Occurrence<'a> = (&'a str, &'a str);

/// Wrap every whole-word abbreviation occurrence in `text`
///
/// Literal text before a match is escaped. When two abbreviations match at
/// the same offset the longer one wins, and a match starting inside text
/// already consumed by an earlier match is dropped.
pub fn substitute<'t>(text: &'t str, abbreviations: &Abbreviations) -> Cow<'t, str> {
    let occurrences = find_occurrences(text, abbreviations);
    if occurrences.is_empty() {
        return Cow::Borrowed(text);
    }

    let mut output = String::with_capacity(text.len() + occurrences.len() * 32);
    let mut consumed = 0;
    for (start, (abbreviation, expansion)) in occurrences {
        if start < consumed {
            continue;
        }
        output.push_str(&escape_html(&text[consumed..start]));
        output.push_str("<abbr");
        if !expansion.is_empty() {
            output.push_str(" title=\"");
            output.push_str(&escape_html(expansion));
            output.push('"');
        }
        output.push('>');
        output.push_str(&escape_html(abbreviation));
        output.push_str("</abbr>");
        consumed = start + abbreviation.len();
    }
    output.push_str(&text[consumed..]);

    Cow::Owned(output)
}

/// Collect accepted occurrences of all abbreviations, keyed by byte offset
fn find_occurrences<'a>(
    text: &str,
    abbreviations: &'a Abbreviations,
) -> BTreeMap<usize, Occurrence<'a>> {
    let mut occurrences: BTreeMap<usize, Occurrence<'a>> = BTreeMap::new();

    for (abbreviation, expansion) in abbreviations {
        if abbreviation.is_empty() {
            continue;
        }

        let mut from = 0;
        while let Some(found) = text[from..].find(abbreviation.as_str()) {
            let start = from + found;
            let end = start + abbreviation.len();
            from = end;

            if !is_whole_word(text, start, end) {
                continue;
            }

            match occurrences.entry(start) {
                Entry::Vacant(entry) => {
                    entry.insert((abbreviation.as_str(), expansion.as_str()));
                }
                Entry::Occupied(mut entry) => {
                    if abbreviation.len() > entry.get().0.len() {
                        entry.insert((abbreviation.as_str(), expansion.as_str()));
                    }
                }
            }
        }
    }

    occurrences
}

/// Neither neighbour of `text[start..end]` is an ASCII letter or digit
fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(|c| c.is_ascii_alphanumeric())
        && !after.is_some_and(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abbreviations(entries: &[(&str, &str)]) -> Abbreviations {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_whole_word_only() {
        let abbrs = abbreviations(&[("API", "Application Programming Interface")]);
        let result = substitute("Our API is REST; MyAPIX is not.", &abbrs);
        assert_eq!(
            result,
            "Our <abbr title=\"Application Programming Interface\">API</abbr> is REST; MyAPIX is not."
        );
    }

    #[test]
    fn test_no_match_borrows() {
        let abbrs = abbreviations(&[("API", "Application Programming Interface")]);
        let result = substitute("APIs everywhere", &abbrs);
        assert!(matches!(result, Cow::Borrowed("APIs everywhere")));
    }

    #[test]
    fn test_every_occurrence() {
        let abbrs = abbreviations(&[("W3C", "World Wide Web Consortium")]);
        let result = substitute("W3C and W3C.", &abbrs);
        assert_eq!(
            result,
            "<abbr title=\"World Wide Web Consortium\">W3C</abbr> and \
             <abbr title=\"World Wide Web Consortium\">W3C</abbr>."
        );
    }

    #[test]
    fn test_empty_expansion_omits_title() {
        let abbrs = abbreviations(&[("TBD", "")]);
        assert_eq!(substitute("Status: TBD", &abbrs), "Status: <abbr>TBD</abbr>");
    }

    #[test]
    fn test_escapes_text_between_matches() {
        let abbrs = abbreviations(&[("XML", "Extensible \"Markup\" Language")]);
        assert_eq!(
            substitute("a < XML & b", &abbrs),
            "a &lt; <abbr title=\"Extensible &quot;Markup&quot; Language\">XML</abbr> & b"
        );
    }

    #[test]
    fn test_longest_match_wins_at_same_offset() {
        let abbrs = abbreviations(&[("C", "C language"), ("C++", "C plus plus")]);
        assert_eq!(
            substitute("C++ rocks", &abbrs),
            "<abbr title=\"C plus plus\">C++</abbr> rocks"
        );
    }

    #[test]
    fn test_overlapping_match_is_skipped() {
        let abbrs = abbreviations(&[("API", "Interface"), ("REST API", "Web interface")]);
        assert_eq!(
            substitute("REST API docs", &abbrs),
            "<abbr title=\"Web interface\">REST API</abbr> docs"
        );
    }

    #[test]
    fn test_non_ascii_neighbours_are_boundaries() {
        let abbrs = abbreviations(&[("API", "Interface")]);
        assert_eq!(
            substitute("«API»", &abbrs),
            "«<abbr title=\"Interface\">API</abbr>»"
        );
    }

    #[test]
    fn test_empty_abbreviation_is_ignored() {
        let abbrs = abbreviations(&[("", "nothing")]);
        assert_eq!(substitute("text", &abbrs), "text");
    }
}
