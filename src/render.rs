//! HTML rendering for the in-memory host
//!
//! Serializes a [`MemoryHost`] subtree to an HTML string, for assertions
//! and debugging.

use crate::attr::Attrs;
use crate::host::{MemoryHost, NodeId, NodeKind};

// =============================================================================
// Rendering
// =============================================================================

/// Render `node` and its subtree to HTML.
pub fn to_html(host: &MemoryHost, node: NodeId) -> String {
    let mut output = String::new();
    render_node(host, node, &mut output);
    output
}

/// Render the children of `node`, without the node itself.
pub fn inner_html(host: &MemoryHost, node: NodeId) -> String {
    let mut output = String::new();
    for child in host.children(node) {
        render_node(host, child, &mut output);
    }
    output
}

fn render_node(host: &MemoryHost, node: NodeId, output: &mut String) {
    match host.kind(node) {
        NodeKind::Element { tag, attrs, .. } => {
            render_element(host, node, &tag, &attrs, output);
        }
        NodeKind::Text(text) => output.push_str(&escape_html(&text)),
        NodeKind::Comment(text) => {
            output.push_str("<!--");
            output.push_str(&text);
            output.push_str("-->");
        }
        NodeKind::Fragment => {
            for child in host.children(node) {
                render_node(host, child, output);
            }
        }
    }
}

fn render_element(
    host: &MemoryHost,
    node: NodeId,
    tag: &str,
    attrs: &Attrs,
    output: &mut String,
) {
    output.push('<');
    output.push_str(tag);
    render_attrs(attrs, output);

    if is_void_element(tag) {
        output.push_str(" />");
        return;
    }

    output.push('>');
    for child in host.children(node) {
        render_node(host, child, output);
    }
    output.push_str("</");
    output.push_str(tag);
    output.push('>');
}

/// Render attributes to HTML.
fn render_attrs(attrs: &Attrs, output: &mut String) {
    for (name, value) in attrs {
        output.push(' ');
        output.push_str(name);
        output.push_str("=\"");
        output.push_str(&escape_attr(value));
        output.push('"');
    }
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape attribute value special characters.
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Check if element is a void element (self-closing).
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Host;

    #[test]
    fn test_render_tree() {
        let host = MemoryHost::new();
        let div = host.create_element("div", None);
        host.set_attribute(&div, "class", "card");
        let text = host.create_text_node("a < b");
        let br = host.create_element("br", None);
        let note = host.create_comment("note");
        host.append_child(&div, &text);
        host.append_child(&div, &br);
        host.append_child(&div, &note);

        assert_eq!(
            to_html(&host, div),
            r#"<div class="card">a &lt; b<br /><!--note--></div>"#
        );
        assert_eq!(inner_html(&host, div), "a &lt; b<br /><!--note-->");
    }

    #[test]
    fn test_render_inserted_fragment_and_namespace() {
        let host = MemoryHost::new();
        let svg = host.create_element_ns("http://www.w3.org/2000/svg", "svg", None);
        let frag = host.create_document_fragment().unwrap();
        let circle = host.create_element_ns("http://www.w3.org/2000/svg", "circle", None);
        host.append_child(&frag, &circle);
        host.append_child(&svg, &frag);

        // Namespaced tags keep their case; the fragment left nothing behind
        assert_eq!(to_html(&host, svg), "<svg><circle></circle></svg>");
        assert_eq!(to_html(&host, frag), "");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_attr("say \"hi\" & go"), "say &quot;hi&quot; &amp; go");
    }
}
