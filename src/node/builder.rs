//! Description builders
//!
//! Chained constructors on [`VNode`] plus the [`h`] shorthand. Every
//! `with_*` call publishes a new description (fresh identity token).

use std::any::Any;

use compact_str::CompactString;

use crate::host::Host;
use crate::selector::{COMMENT_SELECTOR, is_svg_root};

use super::{Content, Key, NodeHooks, VNode, VNodeData};

/// Namespace applied by [`h`] to `svg` subtrees.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

impl<H: Host> VNode<H> {
    /// Create an element description from a selector.
    pub fn element(sel: impl Into<CompactString>) -> Self {
        Self::new(Some(sel.into()), None, None, Content::Empty)
    }

    /// Create a bare text description.
    pub fn text_node(text: impl Into<String>) -> Self {
        Self::new(None, None, None, Content::Text(text.into()))
    }

    /// Create a comment description.
    pub fn comment(text: impl Into<String>) -> Self {
        Self::new(
            Some(COMMENT_SELECTOR.into()),
            None,
            None,
            Content::Text(text.into()),
        )
    }

    /// Create a fragment description.
    pub fn fragment(children: Vec<VNode<H>>) -> Self {
        Self::new(None, None, None, Content::Children(children))
    }

    /// Set the sibling key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.set_key(Some(key.into()));
        self
    }

    /// Replace the extension data.
    #[must_use]
    pub fn with_data(mut self, data: VNodeData<H>) -> Self {
        self.data = Some(data);
        self.touch();
        self
    }

    /// Replace the content with a child list.
    #[must_use]
    pub fn with_children(mut self, children: Vec<VNode<H>>) -> Self {
        self.set_content(children);
        self
    }

    /// Append one child.
    #[must_use]
    pub fn child(mut self, child: VNode<H>) -> Self {
        self.push_child(child);
        self
    }

    /// Replace the content with text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_content(text.into());
        self
    }

    /// Add or replace an attribute in the extension data.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<CompactString>, value: impl Into<CompactString>) -> Self {
        let data = self.data.take().unwrap_or_default();
        self.with_data(data.with_attr(name, value))
    }

    /// Set the namespace.
    #[must_use]
    pub fn with_ns(mut self, ns: impl Into<CompactString>) -> Self {
        self.data_mut().ns = Some(ns.into());
        self
    }

    /// Set the species tag.
    #[must_use]
    pub fn with_is(mut self, is: impl Into<CompactString>) -> Self {
        self.data_mut().is = Some(is.into());
        self
    }

    /// Configure per-node hooks.
    #[must_use]
    pub fn with_hooks(mut self, f: impl FnOnce(NodeHooks<H>) -> NodeHooks<H>) -> Self {
        let data = self.data_mut();
        data.hook = f(std::mem::take(&mut data.hook));
        self
    }

    /// Store module-owned data.
    #[must_use]
    pub fn with_ext<T: Any>(mut self, value: T) -> Self {
        self.data_mut().ext.insert(value);
        self
    }
}

/// Build a description from a selector, optional data and content.
///
/// The result always carries data. An `svg` root (`svg`, `svg.x`, `svg#x`)
/// gets the SVG namespace, and so does every descendant that carries data,
/// except below a `foreignObject`.
///
/// # Example
///
/// ```
/// use snapdom::prelude::*;
///
/// let list: VNode<MemoryHost> = h("ul#todo", None, vec![
///     h("li", None, "first").with_key(1),
///     h("li", None, "second").with_key(2),
/// ]);
/// assert_eq!(list.children().len(), 2);
/// ```
pub fn h<H: Host>(
    sel: &str,
    data: Option<VNodeData<H>>,
    content: impl Into<Content<H>>,
) -> VNode<H> {
    let mut node = VNode::new(
        Some(sel.into()),
        None,
        Some(data.unwrap_or_default()),
        content.into(),
    );
    if is_svg_root(sel) {
        add_ns(&mut node);
    }
    node
}

fn add_ns<H: Host>(node: &mut VNode<H>) {
    let changed = match &mut node.data {
        Some(data) if data.ns.as_deref() != Some(SVG_NAMESPACE) => {
            data.ns = Some(SVG_NAMESPACE.into());
            true
        }
        _ => false,
    };
    if changed {
        node.touch();
    }
    if node.sel.as_deref() == Some("foreignObject") {
        return;
    }
    if let Content::Children(children) = &mut node.content {
        for child in children.iter_mut().filter(|c| c.data.is_some()) {
            add_ns(child);
        }
    }
}
