//! Coordinated removal
//!
//! Removing a node may have to wait for extensions, for example until an
//! exit transition has finished. Every `remove` hook receives a
//! [`RemoveHandle`]; the artifact is detached from its parent only once every
//! handle issued for it has been completed.
//!
//! The countdown starts at `module remove hooks + 1`. The extra share
//! belongs to the node's own `remove` hook, or is completed by the engine
//! right away when the node has none.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::host::Host;

struct Countdown<H: Host> {
    host: Rc<H>,
    artifact: H::Node,
    pending: Cell<usize>,
}

impl<H: Host> Countdown<H> {
    fn acknowledge(&self) {
        let pending = self.pending.get();
        if pending == 0 {
            return;
        }
        self.pending.set(pending - 1);
        if pending > 1 {
            trace!(artifact = ?self.artifact, remaining = pending - 1, "removal acknowledged");
            return;
        }
        match self.host.parent_node(&self.artifact) {
            Some(parent) => {
                trace!(artifact = ?self.artifact, "removal complete; detaching");
                self.host.remove_child(&parent, &self.artifact);
            }
            None => trace!(artifact = ?self.artifact, "removal complete; already detached"),
        }
    }
}

/// Shared completion callback for one pending removal.
///
/// Each holder completes its share exactly once by calling
/// [`complete`](Self::complete), which consumes the handle. Cloning hands
/// out another reference to the same countdown without adding a share.
/// Completions after the artifact has been detached are ignored.
pub struct RemoveHandle<H: Host> {
    inner: Rc<Countdown<H>>,
}

impl<H: Host> RemoveHandle<H> {
    pub(crate) fn new(host: Rc<H>, artifact: H::Node, listeners: usize) -> Self {
        Self {
            inner: Rc::new(Countdown {
                host,
                artifact,
                pending: Cell::new(listeners),
            }),
        }
    }

    /// Complete this holder's share of the removal.
    pub fn complete(self) {
        self.inner.acknowledge();
    }

    /// The artifact waiting to be detached.
    pub fn artifact(&self) -> &H::Node {
        &self.inner.artifact
    }

    /// Number of completions still outstanding.
    pub fn pending(&self) -> usize {
        self.inner.pending.get()
    }

    /// Whether the countdown has reached zero.
    pub fn is_done(&self) -> bool {
        self.pending() == 0
    }
}

impl<H: Host> Clone for RemoveHandle<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: Host> fmt::Debug for RemoveHandle<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoveHandle")
            .field("artifact", &self.inner.artifact)
            .field("pending", &self.inner.pending.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostOp, MemoryHost};

    fn attached() -> (Rc<MemoryHost>, <MemoryHost as Host>::Node, <MemoryHost as Host>::Node) {
        let host = Rc::new(MemoryHost::new());
        let parent = host.create_element("div", None);
        let child = host.create_element("span", None);
        host.append_child(&parent, &child);
        (host, parent, child)
    }

    #[test]
    fn test_detaches_after_last_completion() {
        let (host, parent, child) = attached();
        let handle = RemoveHandle::new(Rc::clone(&host), child, 3);
        let a = handle.clone();
        let b = handle.clone();

        a.complete();
        assert_eq!(host.parent_node(&child), Some(parent));
        handle.complete();
        assert_eq!(host.parent_node(&child), Some(parent));
        assert_eq!(b.pending(), 1);
        b.complete();
        assert_eq!(host.parent_node(&child), None);
    }

    #[test]
    fn test_extra_completions_are_ignored() {
        let (host, _parent, child) = attached();
        let handle = RemoveHandle::new(Rc::clone(&host), child, 1);
        let spare = handle.clone();
        handle.complete();
        assert!(spare.is_done());
        spare.complete();

        let removals = host.count_ops(|op| matches!(op, HostOp::RemoveChild { .. }));
        assert_eq!(removals, 1);
    }
}
