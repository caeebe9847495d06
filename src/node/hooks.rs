//! Per-node lifecycle hooks
//!
//! Hooks attached to one description through `VNodeData::hook`. Module-wide
//! hooks live in [`crate::module`].

use std::fmt;
use std::rc::Rc;

use crate::host::Host;
use crate::macros::impl_hook_builders;
use crate::removal::RemoveHandle;

use super::VNode;

/// Runs before creation; may rewrite the description.
pub type InitHook<H> = Rc<dyn Fn(&mut VNode<H>)>;

/// Runs after an artifact has been created: `(empty placeholder, node)`.
pub type CreateHook<H> = Rc<dyn Fn(&VNode<H>, &VNode<H>)>;

/// Runs once the whole pass has been committed to the host.
pub type InsertHook<H> = Rc<dyn Fn(&VNode<H>)>;

/// Runs around or during an in-place patch: `(old, new)`.
pub type PatchHook<H> = Rc<dyn Fn(&VNode<H>, &VNode<H>)>;

/// Runs before a subtree is removed.
pub type DestroyHook<H> = Rc<dyn Fn(&VNode<H>)>;

/// Takes a share of a pending removal.
pub type RemoveHook<H> = Rc<dyn Fn(&VNode<H>, RemoveHandle<H>)>;

/// Hooks attached to a single description.
pub struct NodeHooks<H: Host> {
    pub init: Option<InitHook<H>>,
    pub create: Option<CreateHook<H>>,
    pub insert: Option<InsertHook<H>>,
    pub prepatch: Option<PatchHook<H>>,
    pub update: Option<PatchHook<H>>,
    pub postpatch: Option<PatchHook<H>>,
    pub destroy: Option<DestroyHook<H>>,
    pub remove: Option<RemoveHook<H>>,
}

impl<H: Host> NodeHooks<H> {
    /// Create an empty hook record.
    pub fn new() -> Self {
        Self {
            init: None,
            create: None,
            insert: None,
            prepatch: None,
            update: None,
            postpatch: None,
            destroy: None,
            remove: None,
        }
    }

    impl_hook_builders! {
        init: (&mut VNode<H>),
        create: (&VNode<H>, &VNode<H>),
        insert: (&VNode<H>),
        prepatch: (&VNode<H>, &VNode<H>),
        update: (&VNode<H>, &VNode<H>),
        postpatch: (&VNode<H>, &VNode<H>),
        destroy: (&VNode<H>),
        remove: (&VNode<H>, RemoveHandle<H>),
    }

    /// Whether no hook is set.
    pub fn is_empty(&self) -> bool {
        self.installed().is_empty()
    }
}

impl<H: Host> Default for NodeHooks<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> Clone for NodeHooks<H> {
    fn clone(&self) -> Self {
        Self {
            init: self.init.clone(),
            create: self.create.clone(),
            insert: self.insert.clone(),
            prepatch: self.prepatch.clone(),
            update: self.update.clone(),
            postpatch: self.postpatch.clone(),
            destroy: self.destroy.clone(),
            remove: self.remove.clone(),
        }
    }
}

impl<H: Host> fmt::Debug for NodeHooks<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.installed()).finish()
    }
}
