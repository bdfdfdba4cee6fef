//! Tree normalization
//!
//! Parsers tend to wrap content in structural nodes that carry no meaning of
//! their own. Collapsing them up front keeps the writer's parent checks
//! (e.g. "first paragraph of a list item") looking at real nodes.

use crate::node::{Node, Root, SimpleKind};

/// Source text that marks a hard line break: two trailing spaces, then the newline
const HARD_LINE_BREAK: &str = "  \n";

/// Collapse wrapper nodes throughout the tree
///
/// A nested `Root` is replaced by its first child and a `Group` with a single
/// child is replaced by that child. Running this twice yields the same tree
/// as running it once.
pub fn normalize(root: &mut Root) {
    clean_children(&mut root.children);
}

/// Bottom-up: a wrapper is only judged once its own children are clean
fn clean_children(children: &mut Vec<Node>) {
    let nodes = std::mem::take(children);
    children.reserve(nodes.len());
    for mut node in nodes {
        if let Some(grandchildren) = node.children_mut() {
            clean_children(grandchildren);
        }
        if let Some(node) = unwrap_wrapper(node) {
            children.push(node);
        }
    }
}

/// Peel wrappers off `node` until a real node is left; `None` for an empty root
fn unwrap_wrapper(mut node: Node) -> Option<Node> {
    loop {
        node = match node {
            Node::Root(root) => {
                let mut children = root.children.into_iter();
                let first = children.next()?;
                if children.len() > 0 {
                    tracing::warn!(
                        dropped = children.len(),
                        "Nested root keeps only its first child"
                    );
                }
                first
            }
            Node::Group(group) if group.children.len() == 1 => {
                group.children.into_iter().next()?
            }
            other => return Some(other),
        };
    }
}

/// Classify every line break in the tree as hard or soft
///
/// A break is hard when the source text it spans starts with two spaces
/// followed by a newline. Breaks without a span, or whose span falls outside
/// `source`, stay as they are.
pub fn resolve_line_breaks(root: &mut Root, source: &str) {
    for child in &mut root.children {
        resolve_node(child, source);
    }
}

fn resolve_node(node: &mut Node, source: &str) {
    if let Node::Simple(simple) = node {
        if simple.kind == SimpleKind::LineBreak {
            let is_hard = simple
                .span
                .and_then(|span| source.get(span.start..span.end))
                .is_some_and(|spanned| spanned.starts_with(HARD_LINE_BREAK));
            if is_hard {
                simple.kind = SimpleKind::HardLineBreak;
            }
        }
        return;
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            resolve_node(child, source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Simple;

    fn sample() -> Root {
        Root::new(vec![
            Node::root(vec![Node::paragraph(vec![Node::group(vec![Node::text(
                "wrapped",
            )])])]),
            Node::group(vec![Node::group(vec![Node::heading(
                2,
                vec![Node::text("Deep")],
            )])]),
            Node::group(vec![Node::text("a"), Node::text("b")]),
            Node::root(vec![]),
        ])
    }

    #[test]
    fn test_collapses_wrappers() {
        let mut root = sample();
        normalize(&mut root);

        assert_eq!(
            root.children,
            vec![
                Node::paragraph(vec![Node::text("wrapped")]),
                Node::heading(2, vec![Node::text("Deep")]),
                Node::group(vec![Node::text("a"), Node::text("b")]),
            ]
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut once = sample();
        normalize(&mut once);
        let mut twice = once.clone();
        normalize(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_group_left_with_one_child_collapses_in_same_pass() {
        let mut once = Root::new(vec![Node::paragraph(vec![Node::group(vec![
            Node::root(vec![]),
            Node::text("x"),
        ])])]);
        normalize(&mut once);
        assert_eq!(
            once.children,
            vec![Node::paragraph(vec![Node::text("x")])]
        );

        let mut twice = once.clone();
        normalize(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_nested_root_drops_siblings() {
        let mut root = Root::new(vec![Node::root(vec![
            Node::paragraph(vec![Node::text("kept")]),
            Node::paragraph(vec![Node::text("dropped")]),
        ])]);
        normalize(&mut root);

        assert_eq!(
            root.children,
            vec![Node::paragraph(vec![Node::text("kept")])]
        );
        assert!(logs_contain("Nested root keeps only its first child"));
    }

    #[test]
    fn test_resolve_line_breaks() {
        let source = "first  \nsecond\nthird";
        let mut root = Root::new(vec![Node::paragraph(vec![
            Node::text("first"),
            Node::line_break(5, 8),
            Node::text("second"),
            Node::line_break(14, 15),
            Node::text("third"),
        ])]);
        resolve_line_breaks(&mut root, source);

        let kinds: Vec<SimpleKind> = root.children[0]
            .children()
            .iter()
            .filter_map(|n| match n {
                Node::Simple(Simple { kind, .. }) => Some(*kind),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, vec![SimpleKind::HardLineBreak, SimpleKind::LineBreak]);
    }

    #[test]
    fn test_three_trailing_spaces_is_soft() {
        let source = "a   \nb";
        let mut root = Root::new(vec![Node::paragraph(vec![Node::line_break(1, 5)])]);
        resolve_line_breaks(&mut root, source);
        assert!(matches!(
            &root.children[0].children()[0],
            Node::Simple(s) if s.kind == SimpleKind::LineBreak
        ));
    }

    #[test]
    fn test_out_of_range_span_is_ignored() {
        let mut root = Root::new(vec![Node::line_break(40, 43)]);
        resolve_line_breaks(&mut root, "short");
        assert!(matches!(
            &root.children[0],
            Node::Simple(s) if s.kind == SimpleKind::LineBreak
        ));
    }
}
