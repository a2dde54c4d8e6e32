// src/extractors/tree.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{node::Node as DomNode, ElementRef, Html};

// Elements whose text never reaches the reader. `<title>` is kept.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RE")
});

/// What the section extractor needs to know about an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `h1`..`h6`, carrying the level.
    Heading(u8),
    Paragraph,
    Other,
}

impl NodeKind {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "h1" => NodeKind::Heading(1),
            "h2" => NodeKind::Heading(2),
            "h3" => NodeKind::Heading(3),
            "h4" => NodeKind::Heading(4),
            "h5" => NodeKind::Heading(5),
            "h6" => NodeKind::Heading(6),
            "p" => NodeKind::Paragraph,
            _ => NodeKind::Other,
        }
    }
}

/// A parsed HTML document.
pub struct NodeTree {
    document: Html,
}

/// One element of a [`NodeTree`], borrowed from it.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    kind: NodeKind,
    element: ElementRef<'a>,
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Text content of the element with whitespace runs collapsed and trimmed.
    pub fn visible_text(&self) -> String {
        let raw: String = visible_fragments(self.element).collect();
        normalize_whitespace(&raw)
    }
}

impl NodeTree {
    /// Parses raw HTML. html5ever recovers from malformed markup, so this never fails.
    pub fn parse(raw_html: &str) -> Self {
        let document = Html::parse_document(raw_html);
        tracing::debug!("Parsed document ({} bytes of HTML)", raw_html.len());
        Self { document }
    }

    /// All elements in document order.
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> + '_ {
        self.document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .map(|element| Node {
                kind: NodeKind::from_tag(element.value().name()),
                element,
            })
    }

    /// Whole-page text: each text fragment trimmed, empty ones dropped, joined by newlines.
    pub fn visible_text(&self) -> String {
        visible_fragments(self.document.root_element())
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn visible_fragments<'a>(root: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    root.descendants().filter_map(|node| match node.value() {
        DomNode::Text(text) => {
            let hidden = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|ancestor| HIDDEN_ELEMENTS.contains(&ancestor.value().name()));
            if hidden { None } else { Some(&**text) }
        }
        _ => None,
    })
}

pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kinds_follow_tag_names() {
        let tree = NodeTree::parse(
            "<html><body><h1>A</h1><h6>F</h6><p>para</p><div>other</div></body></html>",
        );
        let kinds: Vec<NodeKind> = tree
            .nodes()
            .map(|n| n.kind())
            .filter(|k| *k != NodeKind::Other)
            .collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Heading(1), NodeKind::Heading(6), NodeKind::Paragraph]
        );
        assert!(tree.nodes().any(|n| n.kind() == NodeKind::Other));
    }

    #[test]
    fn test_visible_text_collapses_whitespace() {
        let tree = NodeTree::parse("<p>  Hello\n\t <b>big</b>   world  </p>");
        let paragraph = tree
            .nodes()
            .find(|n| n.kind() == NodeKind::Paragraph)
            .unwrap();
        assert_eq!(paragraph.visible_text(), "Hello big world");
    }

    #[test]
    fn test_document_text_keeps_title_but_skips_scripts_and_styles() {
        let tree = NodeTree::parse(
            r#"<html><head><title>T</title><style>p { color: red }</style></head>
               <body><div>First</div><script>var x = 1;</script><span> Second </span></body></html>"#,
        );
        assert_eq!(tree.visible_text(), "T\nFirst\nSecond");
    }

    #[test]
    fn test_empty_document_has_no_text() {
        let tree = NodeTree::parse("");
        assert_eq!(tree.visible_text(), "");
        assert!(tree.nodes().all(|n| n.kind() == NodeKind::Other));
    }
}
