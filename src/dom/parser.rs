//! Fragment builder - instantiate element subtrees from markup.
//!
//! Markup goes through an HTML5 fragment parse (body context) and the result
//! is copied into live [`Element`]s. Character references are decoded, stray
//! closing tags are dropped and unclosed elements are closed, all following
//! the HTML parsing rules. Comments do not survive.

use scraper::{ElementRef, Html};

use super::element::{Element, Node};

/// Parse `markup` into top-level nodes (elements and text, in order).
pub fn parse_fragment(markup: &str) -> Vec<Node> {
    let fragment = Html::parse_fragment(markup);
    // Fragment content hangs off a synthetic <html> element.
    convert_children(fragment.root_element())
}

/// Parse `markup` and return its first top-level element.
pub fn parse_first_element(markup: &str) -> Option<Element> {
    parse_fragment(markup)
        .into_iter()
        .find_map(|node| node.as_element().cloned())
}

fn convert_children(parent: ElementRef<'_>) -> Vec<Node> {
    parent
        .children()
        .filter_map(|child| match ElementRef::wrap(child) {
            Some(element) => Some(Node::Element(convert(element))),
            None => child.value().as_text().map(|text| Node::Text(text.to_string())),
        })
        .collect()
}

fn convert(source: ElementRef<'_>) -> Element {
    let data = source.value();
    let element = Element::new(data.name());
    for (name, value) in data.attrs() {
        element.set_attribute(name, value);
    }
    for child in convert_children(source) {
        element.append_child(child);
    }
    element
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_elements_and_text() {
        let nodes = parse_fragment("<div><button id='timer'>00:00:00</button><button>x</button></div>");
        assert_eq!(nodes.len(), 1);

        let root = nodes[0].as_element().cloned().expect("root element");
        assert_eq!(root.tag(), "div");
        let buttons = root.child_elements();
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0].id(), Some("timer".to_string()));
        assert_eq!(buttons[0].text_content(), "00:00:00");
        assert_eq!(buttons[1].text_content(), "x");
        assert_eq!(buttons[0].parent(), Some(root));
    }

    #[test]
    fn test_whitespace_text_is_kept() {
        let nodes = parse_fragment("\n  <div>\n    <span>a</span>\n  </div>\n");
        assert!(matches!(nodes[0], Node::Text(_)));
        let root = parse_first_element("\n  <div>\n    <span>a</span>\n  </div>\n").expect("root");
        assert_eq!(root.children().len(), 3);
        assert_eq!(root.child_elements().len(), 1);
    }

    #[test]
    fn test_attribute_forms() {
        let root = parse_first_element(
            r#"<div><input type=text disabled value="a b" data-x='1' style="a: b; c: d"></div>"#,
        )
        .and_then(|div| div.first_element_child())
        .expect("input");
        assert_eq!(root.tag(), "input");
        assert_eq!(root.attribute("type"), Some("text".to_string()));
        assert_eq!(root.attribute("disabled"), Some(String::new()));
        assert_eq!(root.attribute("value"), Some("a b".to_string()));
        assert_eq!(root.attribute("data-x"), Some("1".to_string()));
        assert_eq!(root.attribute("style"), Some("a: b; c: d".to_string()));
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_duplicate_attribute_keeps_first() {
        let root = parse_first_element(r#"<b data-id="1" data-id="2"></b>"#).expect("root");
        assert_eq!(root.attribute("data-id"), Some("1".to_string()));
    }

    #[test]
    fn test_quoted_gt_does_not_end_tag() {
        let root = parse_first_element(r#"<div title="a > b">text</div>"#).expect("root");
        assert_eq!(root.attribute("title"), Some("a > b".to_string()));
        assert_eq!(root.text_content(), "text");
    }

    #[test]
    fn test_void_elements_have_no_children() {
        let root = parse_first_element("<p>a<br>b<img src=x>c</p>").expect("root");
        let tags: Vec<_> = root.child_elements().iter().map(Element::tag).collect();
        assert_eq!(tags, vec!["br", "img"]);
        assert_eq!(root.text_content(), "abc");
    }

    #[test]
    fn test_stray_and_unclosed_tags() {
        let nodes = parse_fragment("</stray><div><span>a</div>b");
        assert_eq!(nodes.len(), 2);
        let root = nodes[0].as_element().cloned().expect("root");
        assert_eq!(root.text_content(), "a");
        assert!(matches!(&nodes[1], Node::Text(t) if t == "b"));
    }

    #[test]
    fn test_comments_skipped() {
        let root = parse_first_element("<!-- note --><div><!-- inner -->x</div>").expect("root");
        assert_eq!(root.text_content(), "x");
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn test_character_references() {
        let root = parse_first_element("<p title='&quot;hi&quot;'>1 &lt; 2 &amp; &#65;&#x42;</p>")
            .expect("root");
        assert_eq!(root.attribute("title"), Some("\"hi\"".to_string()));
        assert_eq!(root.text_content(), "1 < 2 & AB");
    }

    #[test]
    fn test_named_references_beyond_the_basics() {
        let root = parse_first_element("<p>&copy; 2024 &mdash; x&hellip;</p>").expect("root");
        assert_eq!(root.text_content(), "© 2024 — x…");
    }

    #[test]
    fn test_no_elements() {
        assert!(parse_first_element("just text").is_none());
        assert!(parse_first_element("").is_none());
        assert!(parse_first_element("a < b").is_none());
    }
}
