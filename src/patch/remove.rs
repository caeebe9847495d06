//! Subtree removal

use std::ops::Range;
use std::rc::Rc;

use tracing::trace;

use crate::error::VdomResult;
use crate::host::Host;
use crate::node::VNode;
use crate::removal::RemoveHandle;

use super::{Pass, hook_of, realized};

impl<H: Host> Pass<'_, H> {
    /// Remove `vnodes[range]` from `parent`, skipping slots marked in
    /// `consumed`.
    ///
    /// Nodes with a selector run their destroy hooks and then go through a
    /// removal countdown; selector-less nodes are detached right away.
    pub(super) fn remove_vnodes(
        &mut self,
        parent: &H::Node,
        vnodes: &[VNode<H>],
        range: Range<usize>,
        consumed: Option<&[bool]>,
    ) -> VdomResult<()> {
        for idx in range {
            if consumed.is_some_and(|c| c[idx]) {
                continue;
            }
            let node = &vnodes[idx];
            let elm = realized(node)?;
            self.stats.removed += 1;

            if node.sel.is_none() {
                trace!(artifact = ?elm, "remove");
                self.host.remove_child(parent, elm);
                continue;
            }

            self.invoke_destroy_hook(node);

            let listeners = self.modules.remove.len() + 1;
            trace!(artifact = ?elm, listeners, "removal pending");
            let handle = RemoveHandle::new(Rc::clone(self.host), elm.clone(), listeners);
            for remove in &self.modules.remove {
                remove(node, handle.clone());
            }
            match hook_of(node, |h| &h.remove) {
                Some(remove) => remove(node, handle),
                None => handle.complete(),
            }
        }
        Ok(())
    }

    /// Run destroy hooks for `vnode` and its descendants, parents first.
    /// Nodes without data are skipped along with their subtrees.
    fn invoke_destroy_hook(&self, vnode: &VNode<H>) {
        let Some(data) = &vnode.data else {
            return;
        };
        if let Some(destroy) = &data.hook.destroy {
            destroy(vnode);
        }
        for destroy in &self.modules.destroy {
            destroy(vnode);
        }
        for child in vnode.children() {
            self.invoke_destroy_hook(child);
        }
    }
}
