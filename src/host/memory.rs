//! In-memory host tree
//!
//! `MemoryHost` keeps every artifact in an arena and mirrors the DOM rules
//! the engine relies on:
//!
//! - inserting a node that already has a parent moves it
//! - inserting a fragment moves the fragment's children and empties it;
//!   the fragment remembers where it went, so later inserts that target the
//!   fragment land in that parent instead
//! - `set_text_content` on an element replaces all of its children
//! - `tag_name` reports HTML tags upper-cased
//!
//! Every mutation is appended to a journal of [`HostOp`]s so callers can
//! count exactly what a reconciliation pass did.

use std::cell::{Ref, RefCell};

use compact_str::CompactString;
use tracing::warn;

use crate::attr::{Attrs, AttrsExt};
use crate::node::VNodeData;

use super::Host;

// =============================================================================
// Public Types
// =============================================================================

/// Handle to an artifact owned by a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Get the raw arena index
    #[inline]
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// What an artifact is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Element with tag, optional namespace and attributes
    Element {
        tag: CompactString,
        namespace: Option<CompactString>,
        attrs: Attrs,
    },
    /// Text node
    Text(String),
    /// Comment node
    Comment(String),
    /// Fragment (children move out on insertion)
    Fragment,
}

/// One recorded host mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOp {
    CreateElement { node: NodeId, tag: CompactString },
    CreateText { node: NodeId },
    CreateComment { node: NodeId },
    CreateFragment { node: NodeId },
    AppendChild { parent: NodeId, child: NodeId },
    InsertBefore {
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    },
    RemoveChild { parent: NodeId, child: NodeId },
    SetTextContent { node: NodeId },
    SetAttribute { node: NodeId, name: CompactString },
}

impl HostOp {
    /// Whether this op created a new artifact
    pub fn is_create(&self) -> bool {
        matches!(
            self,
            Self::CreateElement { .. }
                | Self::CreateText { .. }
                | Self::CreateComment { .. }
                | Self::CreateFragment { .. }
        )
    }
}

// =============================================================================
// Arena
// =============================================================================

#[derive(Debug)]
struct Slot {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Where a fragment's children were moved to
    fragment_parent: Option<NodeId>,
}

impl Slot {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            fragment_parent: None,
        }
    }
}

#[derive(Debug, Default)]
struct Arena {
    slots: Vec<Slot>,
}

impl Arena {
    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Slot::new(kind));
        id
    }

    fn slot(&self, id: NodeId) -> &Slot {
        &self.slots[id.index()]
    }

    fn slot_mut(&mut self, id: NodeId) -> &mut Slot {
        &mut self.slots[id.index()]
    }

    /// Follow fragments that have already been inserted to their real parent.
    fn resolve_parent(&self, mut parent: NodeId) -> NodeId {
        while let (NodeKind::Fragment, Some(target)) =
            (&self.slot(parent).kind, self.slot(parent).fragment_parent)
        {
            parent = target;
        }
        parent
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.slot_mut(child).parent.take() {
            self.slot_mut(parent).children.retain(|&c| c != child);
        }
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.slot(node).parent?;
        let siblings = &self.slot(parent).children;
        let pos = siblings.iter().position(|&c| c == node)?;
        siblings.get(pos + 1).copied()
    }

    fn insert(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        let parent = self.resolve_parent(parent);

        // Inserting a node before itself keeps it in place
        let reference = match reference {
            Some(r) if r == child => self.next_sibling(child),
            other => other,
        };

        let moving = if matches!(self.slot(child).kind, NodeKind::Fragment) {
            self.slot_mut(child).fragment_parent = Some(parent);
            let children = std::mem::take(&mut self.slot_mut(child).children);
            for &c in &children {
                self.slot_mut(c).parent = None;
            }
            children
        } else {
            self.detach(child);
            vec![child]
        };

        let siblings = &self.slot(parent).children;
        let mut index = match reference {
            Some(r) => match siblings.iter().position(|&c| c == r) {
                Some(pos) => pos,
                None => {
                    warn!(?parent, ?r, "reference is not a child of parent; appending");
                    siblings.len()
                }
            },
            None => siblings.len(),
        };

        for node in moving {
            self.slot_mut(node).parent = Some(parent);
            self.slot_mut(parent).children.insert(index, node);
            index += 1;
        }
    }

    fn collect_text(&self, node: NodeId, buf: &mut String) {
        match &self.slot(node).kind {
            NodeKind::Text(t) => buf.push_str(t),
            NodeKind::Comment(_) => {}
            NodeKind::Element { .. } | NodeKind::Fragment => {
                for &c in &self.slot(node).children {
                    self.collect_text(c, buf);
                }
            }
        }
    }
}

// =============================================================================
// MemoryHost
// =============================================================================

/// Arena-backed host tree with an operation journal.
#[derive(Debug, Default)]
pub struct MemoryHost {
    arena: RefCell<Arena>,
    journal: RefCell<Vec<HostOp>>,
}

impl MemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, op: HostOp) {
        self.journal.borrow_mut().push(op);
    }

    fn alloc(&self, kind: NodeKind) -> NodeId {
        self.arena.borrow_mut().alloc(kind)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Journal
    // ─────────────────────────────────────────────────────────────────────────

    /// Operations recorded since creation or the last `take_journal`.
    pub fn journal(&self) -> Ref<'_, [HostOp]> {
        Ref::map(self.journal.borrow(), Vec::as_slice)
    }

    /// Drain the journal.
    pub fn take_journal(&self) -> Vec<HostOp> {
        std::mem::take(&mut *self.journal.borrow_mut())
    }

    /// Count journal entries matching `pred`.
    pub fn count_ops(&self, pred: impl Fn(&HostOp) -> bool) -> usize {
        self.journal.borrow().iter().filter(|op| pred(op)).count()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────────────────

    /// What `node` is.
    pub fn kind(&self, node: NodeId) -> NodeKind {
        self.arena.borrow().slot(node).kind.clone()
    }

    /// Current children of `node`.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.arena.borrow().slot(node).children.clone()
    }

    /// Current parent of `node`.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.borrow().slot(node).parent
    }

    /// Concatenated text of `node` and its descendants (comments excluded).
    pub fn text_content(&self, node: NodeId) -> String {
        let mut buf = String::new();
        self.arena.borrow().collect_text(node, &mut buf);
        buf
    }

    /// Text data of a text or comment node.
    pub fn data(&self, node: NodeId) -> Option<String> {
        match &self.arena.borrow().slot(node).kind {
            NodeKind::Text(t) | NodeKind::Comment(t) => Some(t.clone()),
            _ => None,
        }
    }

    /// Namespace of an element.
    pub fn namespace(&self, node: NodeId) -> Option<CompactString> {
        match &self.arena.borrow().slot(node).kind {
            NodeKind::Element { namespace, .. } => namespace.clone(),
            _ => None,
        }
    }

    /// Attributes of an element, in insertion order.
    pub fn attributes(&self, node: NodeId) -> Attrs {
        match &self.arena.borrow().slot(node).kind {
            NodeKind::Element { attrs, .. } => attrs.clone(),
            _ => Attrs::new(),
        }
    }

    fn new_element(
        &self,
        tag: &str,
        namespace: Option<&str>,
        data: Option<&VNodeData<Self>>,
    ) -> NodeId {
        let attrs = data.map(|d| d.attrs.clone()).unwrap_or_default();
        let node = self.alloc(NodeKind::Element {
            tag: tag.into(),
            namespace: namespace.map(CompactString::from),
            attrs,
        });
        self.record(HostOp::CreateElement {
            node,
            tag: tag.into(),
        });
        node
    }
}

impl Host for MemoryHost {
    type Node = NodeId;

    fn create_element(&self, tag: &str, data: Option<&VNodeData<Self>>) -> NodeId {
        self.new_element(tag, None, data)
    }

    fn create_element_ns(&self, namespace: &str, tag: &str, data: Option<&VNodeData<Self>>) -> NodeId {
        self.new_element(tag, Some(namespace), data)
    }

    fn create_text_node(&self, text: &str) -> NodeId {
        let node = self.alloc(NodeKind::Text(text.to_owned()));
        self.record(HostOp::CreateText { node });
        node
    }

    fn create_comment(&self, text: &str) -> NodeId {
        let node = self.alloc(NodeKind::Comment(text.to_owned()));
        self.record(HostOp::CreateComment { node });
        node
    }

    fn create_document_fragment(&self) -> Option<NodeId> {
        let node = self.alloc(NodeKind::Fragment);
        self.record(HostOp::CreateFragment { node });
        Some(node)
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.arena.borrow_mut().insert(*parent, *child, None);
        self.record(HostOp::AppendChild {
            parent: *parent,
            child: *child,
        });
    }

    fn insert_before(&self, parent: &NodeId, new_child: &NodeId, reference: Option<&NodeId>) {
        self.arena
            .borrow_mut()
            .insert(*parent, *new_child, reference.copied());
        self.record(HostOp::InsertBefore {
            parent: *parent,
            child: *new_child,
            reference: reference.copied(),
        });
    }

    fn remove_child(&self, parent: &NodeId, child: &NodeId) {
        {
            let mut arena = self.arena.borrow_mut();
            let parent = arena.resolve_parent(*parent);
            if arena.slot(*child).parent == Some(parent) {
                arena.detach(*child);
            } else {
                warn!(?parent, ?child, "remove_child: node is not a child of parent");
            }
        }
        self.record(HostOp::RemoveChild {
            parent: *parent,
            child: *child,
        });
    }

    fn parent_node(&self, node: &NodeId) -> Option<NodeId> {
        self.arena.borrow().slot(*node).parent
    }

    fn next_sibling(&self, node: &NodeId) -> Option<NodeId> {
        self.arena.borrow().next_sibling(*node)
    }

    fn set_text_content(&self, node: &NodeId, text: &str) {
        {
            let mut arena = self.arena.borrow_mut();
            if let NodeKind::Text(data) | NodeKind::Comment(data) = &mut arena.slot_mut(*node).kind {
                *data = text.to_owned();
            } else {
                let old = std::mem::take(&mut arena.slot_mut(*node).children);
                for c in old {
                    arena.slot_mut(c).parent = None;
                }
                if !text.is_empty() {
                    let t = arena.alloc(NodeKind::Text(text.to_owned()));
                    arena.slot_mut(t).parent = Some(*node);
                    arena.slot_mut(*node).children.push(t);
                }
            }
        }
        self.record(HostOp::SetTextContent { node: *node });
    }

    fn tag_name(&self, element: &NodeId) -> String {
        match &self.arena.borrow().slot(*element).kind {
            NodeKind::Element { tag, namespace: None, .. } => tag.as_str().to_uppercase(),
            NodeKind::Element { tag, .. } => tag.to_string(),
            _ => String::new(),
        }
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) {
        {
            let mut arena = self.arena.borrow_mut();
            match &mut arena.slot_mut(*element).kind {
                NodeKind::Element { attrs, .. } => attrs.set_attr(name, value),
                _ => warn!(?element, name, "set_attribute on a non-element"),
            }
        }
        self.record(HostOp::SetAttribute {
            node: *element,
            name: name.into(),
        });
    }

    fn get_attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        match &self.arena.borrow().slot(*element).kind {
            NodeKind::Element { attrs, .. } => attrs.get_attr(name).map(str::to_owned),
            _ => None,
        }
    }

    fn is_element(&self, node: &NodeId) -> bool {
        matches!(self.arena.borrow().slot(*node).kind, NodeKind::Element { .. })
    }

    fn is_document_fragment(&self, node: &NodeId) -> bool {
        matches!(self.arena.borrow().slot(*node).kind, NodeKind::Fragment)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_move() {
        let host = MemoryHost::new();
        let root = host.create_element("div", None);
        let a = host.create_element("a", None);
        let b = host.create_element("b", None);
        host.append_child(&root, &a);
        host.append_child(&root, &b);
        assert_eq!(host.children(root), vec![a, b]);

        // Moving an attached node detaches it first
        host.insert_before(&root, &b, Some(&a));
        assert_eq!(host.children(root), vec![b, a]);
        assert_eq!(host.next_sibling(&b), Some(a));
        assert_eq!(host.next_sibling(&a), None);
        assert_eq!(host.parent_node(&a), Some(root));
    }

    #[test]
    fn test_insert_before_self_is_noop() {
        let host = MemoryHost::new();
        let root = host.create_element("ul", None);
        let items: Vec<_> = (0..3).map(|_| host.create_element("li", None)).collect();
        for li in &items {
            host.append_child(&root, li);
        }
        host.insert_before(&root, &items[1], Some(&items[1]));
        assert_eq!(host.children(root), items);
    }

    #[test]
    fn test_fragment_insertion_moves_children() {
        let host = MemoryHost::new();
        let root = host.create_element("div", None);
        let frag = host.create_document_fragment().unwrap();
        let t1 = host.create_text_node("x");
        let t2 = host.create_text_node("y");
        host.append_child(&frag, &t1);
        host.append_child(&frag, &t2);

        host.append_child(&root, &frag);
        assert_eq!(host.children(root), vec![t1, t2]);
        assert!(host.children(frag).is_empty());
        assert_eq!(host.parent_node(&t1), Some(root));

        // Later inserts into the fragment land in its new parent
        let t3 = host.create_text_node("z");
        host.insert_before(&frag, &t3, Some(&t1));
        assert_eq!(host.children(root), vec![t3, t1, t2]);
        assert_eq!(host.text_content(root), "zxy");
    }

    #[test]
    fn test_set_text_content_replaces_children() {
        let host = MemoryHost::new();
        let p = host.create_element("p", None);
        let span = host.create_element("span", None);
        host.append_child(&p, &span);

        host.set_text_content(&p, "hello");
        assert_eq!(host.text_content(p), "hello");
        assert_eq!(host.parent_node(&span), None);

        host.set_text_content(&p, "");
        assert!(host.children(p).is_empty());
    }

    #[test]
    fn test_tag_name_and_attributes() {
        let host = MemoryHost::new();
        let div = host.create_element("div", None);
        let svg = host.create_element_ns("http://www.w3.org/2000/svg", "svg", None);
        let html_tag: String = host.tag_name(&div);
        assert_eq!(html_tag, "DIV");
        assert_eq!(host.tag_name(&svg), "svg");

        host.set_attribute(&div, "id", "app");
        assert_eq!(host.get_attribute(&div, "id").as_deref(), Some("app"));
        assert_eq!(host.get_attribute(&div, "class"), None);
        assert!(host.is_element(&div));
        assert!(!host.is_document_fragment(&div));
    }

    #[test]
    fn test_journal() {
        let host = MemoryHost::new();
        let root = host.create_element("div", None);
        let t = host.create_text_node("a");
        host.append_child(&root, &t);
        host.remove_child(&root, &t);

        assert_eq!(host.count_ops(HostOp::is_create), 2);
        assert_eq!(host.journal().len(), 4);
        let ops = host.take_journal();
        assert_eq!(ops[3], HostOp::RemoveChild { parent: root, child: t });
        assert!(host.journal().is_empty());
        assert_eq!(host.parent(t), None);
    }
}
