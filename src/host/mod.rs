//! Host adapters.
//!
//! The reconciler never touches a concrete tree. Everything it needs from the
//! render target goes through the [`Host`] trait: creating artifacts, moving
//! them around, and reading back parent/sibling links.
//!
//! - [`Host`]: the capability set the engine calls
//! - [`MemoryHost`]: arena-backed default host with DOM-like semantics

mod memory;

pub use memory::{HostOp, MemoryHost, NodeId, NodeKind};

use std::fmt::Debug;

use crate::node::VNodeData;

/// Capability interface the engine requires from its render target.
///
/// All operations are synchronous and side-effecting. Methods take `&self`:
/// hosts wrap handles to a tree they mutate through interior mutability,
/// the way DOM bindings do.
///
/// `Node` is a cheap handle to a realized artifact. Equality must mean
/// "same artifact", not structural equality.
pub trait Host: Sized {
    /// Handle to a realized artifact (element, text, comment or fragment).
    type Node: Clone + PartialEq + Debug;

    /// Create an element with the given tag.
    fn create_element(&self, tag: &str, data: Option<&VNodeData<Self>>) -> Self::Node;

    /// Create an element inside a namespace (`data.ns`).
    fn create_element_ns(
        &self,
        namespace: &str,
        tag: &str,
        data: Option<&VNodeData<Self>>,
    ) -> Self::Node;

    /// Create a text artifact.
    fn create_text_node(&self, text: &str) -> Self::Node;

    /// Create a comment artifact.
    fn create_comment(&self, text: &str) -> Self::Node;

    /// Create a fragment artifact, or `None` if the host has no fragments.
    fn create_document_fragment(&self) -> Option<Self::Node> {
        None
    }

    /// Append `child` as the last child of `parent`.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);

    /// Insert (or move) `new_child` before `reference`, or at the end when
    /// `reference` is `None`.
    fn insert_before(
        &self,
        parent: &Self::Node,
        new_child: &Self::Node,
        reference: Option<&Self::Node>,
    );

    /// Detach `child` from `parent`.
    fn remove_child(&self, parent: &Self::Node, child: &Self::Node);

    /// Current parent of `node`.
    fn parent_node(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Sibling following `node` under its current parent.
    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Replace the text of `node` (all children, for elements).
    fn set_text_content(&self, node: &Self::Node, text: &str);

    /// Tag name of an element, as the host reports it.
    fn tag_name(&self, element: &Self::Node) -> String;

    /// Set an attribute on an element.
    fn set_attribute(&self, element: &Self::Node, name: &str, value: &str);

    /// Read an attribute from an element.
    fn get_attribute(&self, element: &Self::Node, name: &str) -> Option<String>;

    /// Whether `node` is an element.
    fn is_element(&self, node: &Self::Node) -> bool;

    /// Whether `node` is a fragment.
    fn is_document_fragment(&self, _node: &Self::Node) -> bool {
        false
    }
}
