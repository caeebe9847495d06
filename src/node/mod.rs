//! Node descriptions
//!
//! A [`VNode`] describes one desired point of the output tree: an element
//! (selector set), a comment (selector `"!"`), a fragment (no selector,
//! children) or a bare text node (no selector, text).
//!
//! # Key Features
//!
//! - Children and text are mutually exclusive by construction ([`Content`])
//! - The realized artifact (`elm`) is only ever written by the engine
//! - Every description carries a [`VNodeId`]; clones share it, public
//!   mutation replaces it

mod builder;
mod data;
mod hooks;

pub use builder::{SVG_NAMESPACE, h};
pub use data::{Extensions, VNodeData};
pub use hooks::{
    CreateHook, DestroyHook, InitHook, InsertHook, NodeHooks, PatchHook, RemoveHook,
};

pub use crate::id::{Key, VNodeId};

use std::fmt;

use compact_str::CompactString;

use crate::host::Host;
use crate::selector::COMMENT_SELECTOR;

// =============================================================================
// Content
// =============================================================================

/// What a description holds below itself.
pub enum Content<H: Host> {
    /// Neither children nor text
    Empty,
    /// Text content (a single text child for elements)
    Text(String),
    /// Child descriptions
    Children(Vec<VNode<H>>),
}

impl<H: Host> Content<H> {
    /// Get child descriptions, if any.
    #[inline]
    pub fn children(&self) -> Option<&[VNode<H>]> {
        match self {
            Content::Children(c) => Some(c),
            _ => None,
        }
    }

    /// Get text content, if any.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        match self {
            Content::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Check if there is neither text nor a child list.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Content::Empty)
    }
}

impl<H: Host> Default for Content<H> {
    fn default() -> Self {
        Content::Empty
    }
}

impl<H: Host> Clone for Content<H> {
    fn clone(&self) -> Self {
        match self {
            Content::Empty => Content::Empty,
            Content::Text(t) => Content::Text(t.clone()),
            Content::Children(c) => Content::Children(c.clone()),
        }
    }
}

impl<H: Host> fmt::Debug for Content<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Empty => f.write_str("Empty"),
            Content::Text(t) => f.debug_tuple("Text").field(t).finish(),
            Content::Children(c) => f.debug_tuple("Children").field(c).finish(),
        }
    }
}

impl<H: Host> From<()> for Content<H> {
    fn from(_: ()) -> Self {
        Content::Empty
    }
}

impl<H: Host> From<&str> for Content<H> {
    fn from(value: &str) -> Self {
        Content::Text(value.to_owned())
    }
}

impl<H: Host> From<String> for Content<H> {
    fn from(value: String) -> Self {
        Content::Text(value)
    }
}

impl<H: Host> From<Vec<VNode<H>>> for Content<H> {
    fn from(value: Vec<VNode<H>>) -> Self {
        Content::Children(value)
    }
}

impl<H: Host> From<VNode<H>> for Content<H> {
    fn from(value: VNode<H>) -> Self {
        Content::Children(vec![value])
    }
}

// =============================================================================
// VNode
// =============================================================================

/// Description of one node of the desired tree.
pub struct VNode<H: Host> {
    pub(crate) sel: Option<CompactString>,
    pub(crate) key: Option<Key>,
    pub(crate) data: Option<VNodeData<H>>,
    pub(crate) content: Content<H>,
    pub(crate) elm: Option<H::Node>,
    pub(crate) id: VNodeId,
}

impl<H: Host> VNode<H> {
    /// Create a description from its raw parts.
    pub fn new(
        sel: Option<CompactString>,
        key: Option<Key>,
        data: Option<VNodeData<H>>,
        content: Content<H>,
    ) -> Self {
        Self {
            sel,
            key,
            data,
            content,
            elm: None,
            id: VNodeId::next(),
        }
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    /// Selector, if any.
    #[inline]
    pub fn sel(&self) -> Option<&str> {
        self.sel.as_deref()
    }

    /// Sibling key, if any.
    #[inline]
    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    /// Extension data, if any.
    #[inline]
    pub fn data(&self) -> Option<&VNodeData<H>> {
        self.data.as_ref()
    }

    /// Content below this node.
    #[inline]
    pub fn content(&self) -> &Content<H> {
        &self.content
    }

    /// Child descriptions (empty unless the content is a child list).
    #[inline]
    pub fn children(&self) -> &[VNode<H>] {
        self.content.children().unwrap_or(&[])
    }

    /// Text content, if any.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.content.text()
    }

    /// Realized artifact, once the engine has created or reused one.
    #[inline]
    pub fn elm(&self) -> Option<&H::Node> {
        self.elm.as_ref()
    }

    /// Identity token.
    #[inline]
    pub fn id(&self) -> VNodeId {
        self.id
    }

    /// Species tag (`data.is`), if any.
    #[inline]
    pub fn species(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.is.as_deref())
    }

    /// Check if this describes a comment.
    #[inline]
    pub fn is_comment(&self) -> bool {
        self.sel.as_deref() == Some(COMMENT_SELECTOR)
    }

    /// Check if this describes a bare text node.
    #[inline]
    pub fn is_text(&self) -> bool {
        self.sel.is_none() && !matches!(self.content, Content::Children(_))
    }

    /// Check if this describes a fragment.
    #[inline]
    pub fn is_fragment(&self) -> bool {
        self.sel.is_none() && matches!(self.content, Content::Children(_))
    }

    /// Get a descendant by child-index path.
    pub fn get_by_path(&self, path: &[u32]) -> Option<&VNode<H>> {
        let mut node = self;
        for &idx in path {
            node = node.children().get(idx as usize)?;
        }
        Some(node)
    }

    // -------------------------------------------------------------------------
    // Mutation (each call publishes a new description)
    // -------------------------------------------------------------------------

    /// Replace the selector.
    pub fn set_sel(&mut self, sel: Option<CompactString>) {
        self.sel = sel;
        self.touch();
    }

    /// Replace the key.
    pub fn set_key(&mut self, key: Option<Key>) {
        self.key = key;
        self.touch();
    }

    /// Mutable access to the extension data, creating it when absent.
    pub fn data_mut(&mut self) -> &mut VNodeData<H> {
        self.touch();
        self.data.get_or_insert_with(VNodeData::new)
    }

    /// Replace the content.
    pub fn set_content(&mut self, content: impl Into<Content<H>>) {
        self.content = content.into();
        self.touch();
    }

    /// Mutable access to the child list, if the content is one.
    pub fn children_mut(&mut self) -> Option<&mut Vec<VNode<H>>> {
        self.touch();
        match &mut self.content {
            Content::Children(c) => Some(c),
            _ => None,
        }
    }

    /// Append a child, replacing text or empty content with a child list.
    pub fn push_child(&mut self, child: VNode<H>) {
        self.touch();
        if let Content::Children(c) = &mut self.content {
            c.push(child);
        } else {
            self.content = Content::Children(vec![child]);
        }
    }

    #[inline]
    fn touch(&mut self) {
        self.id = VNodeId::next();
    }
}

impl<H: Host> Clone for VNode<H> {
    fn clone(&self) -> Self {
        Self {
            sel: self.sel.clone(),
            key: self.key.clone(),
            data: self.data.clone(),
            content: self.content.clone(),
            elm: self.elm.clone(),
            id: self.id,
        }
    }
}

impl<H: Host> fmt::Debug for VNode<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("VNode");
        s.field("sel", &self.sel);
        if let Some(key) = &self.key {
            s.field("key", key);
        }
        if let Some(data) = &self.data {
            s.field("data", data);
        }
        s.field("content", &self.content)
            .field("elm", &self.elm)
            .field("id", &self.id)
            .finish()
    }
}

// =============================================================================
// Identity matching
// =============================================================================

/// Whether two descriptions denote the same logical node.
///
/// Equal selectors, equal keys and equal species tags, where an absent value
/// only matches another absent value. Matching nodes are patched in place;
/// anything else is recreated.
#[inline]
pub fn same_vnode<H: Host>(a: &VNode<H>, b: &VNode<H>) -> bool {
    a.sel == b.sel && a.key == b.key && a.species() == b.species()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    type V = VNode<MemoryHost>;

    #[test]
    fn test_same_vnode() {
        let a = V::element("div").with_key("a");
        assert!(same_vnode(&a, &V::element("div").with_key("a")));
        assert!(!same_vnode(&a, &V::element("div").with_key("b")));
        assert!(!same_vnode(&a, &V::element("div")));
        assert!(!same_vnode(&a, &V::element("span").with_key("a")));

        // Species tag takes part; absent data counts as absent tag
        let plain = V::element("button");
        assert!(same_vnode(&plain, &V::element("button").with_data(VNodeData::new())));
        assert!(!same_vnode(&plain, &V::element("button").with_is("fancy-button")));

        // Bare text nodes always match each other
        assert!(same_vnode(&V::text_node("x"), &V::text_node("y")));
    }

    #[test]
    fn test_identity_token() {
        let a = V::element("p").with_text("hi");
        let b = a.clone();
        assert_eq!(a.id(), b.id());

        let mut c = a.clone();
        c.set_content("bye");
        assert_ne!(a.id(), c.id());

        let mut d = a.clone();
        d.data_mut().ns = Some("urn:x".into());
        assert_ne!(a.id(), d.id());
    }

    #[test]
    fn test_kind_predicates() {
        assert!(V::text_node("x").is_text());
        assert!(V::comment("x").is_comment());
        assert!(V::fragment(vec![]).is_fragment());
        assert!(!V::element("div").is_text());
    }

    #[test]
    fn test_push_child_switches_content() {
        let mut node = V::element("ul").with_text("none");
        assert!(node.children_mut().is_none());
        node.push_child(V::element("li"));
        assert_eq!(node.text(), None);
        assert_eq!(node.children().len(), 1);
    }

    #[test]
    fn test_get_by_path() {
        let tree = V::element("div").with_children(vec![
            V::element("p"),
            V::element("ul").with_children(vec![V::element("li"), V::element("li").with_key(2)]),
        ]);
        assert_eq!(tree.get_by_path(&[]).and_then(|n| n.sel()), Some("div"));
        assert_eq!(tree.get_by_path(&[1, 1]).and_then(|n| n.key()), Some(&Key::from(2)));
        assert!(tree.get_by_path(&[0, 0]).is_none());
    }
}
