//! Keyed children reconciliation
//!
//! Walks the old and new child lists from both ends at once. Four cursor
//! comparisons cover the common edits (append, prepend, removal, reversal,
//! swapping the ends) without a lookup; anything else falls back to a key
//! map over the remaining old range, built once per list on first use.
//!
//! Ranges are half-open: `old[os..oe]` and `new[ns..ne]` are still open.

use rustc_hash::FxHashMap;
use smallvec::{SmallVec, smallvec};
use tracing::{debug, trace};

use crate::error::VdomResult;
use crate::host::Host;
use crate::node::{Key, VNode, same_vnode};

use super::{Pass, TreePath, realized};

impl<H: Host> Pass<'_, H> {
    pub(super) fn update_children(
        &mut self,
        parent: &H::Node,
        old_ch: &[VNode<H>],
        new_ch: &mut [VNode<H>],
        path: &mut TreePath,
    ) -> VdomResult<()> {
        let mut consumed: SmallVec<[bool; 32]> = smallvec![false; old_ch.len()];
        let mut key_map: Option<FxHashMap<&Key, usize>> = None;

        let (mut os, mut oe) = (0, old_ch.len());
        let (mut ns, mut ne) = (0, new_ch.len());

        while os < oe && ns < ne {
            if consumed[os] {
                os += 1;
            } else if consumed[oe - 1] {
                oe -= 1;
            } else if same_vnode(&old_ch[os], &new_ch[ns]) {
                self.patch_child(&old_ch[os], new_ch, ns, path)?;
                os += 1;
                ns += 1;
            } else if same_vnode(&old_ch[oe - 1], &new_ch[ne - 1]) {
                self.patch_child(&old_ch[oe - 1], new_ch, ne - 1, path)?;
                oe -= 1;
                ne -= 1;
            } else if same_vnode(&old_ch[os], &new_ch[ne - 1]) {
                // Moved right
                self.patch_child(&old_ch[os], new_ch, ne - 1, path)?;
                let anchor = self.host.next_sibling(realized(&old_ch[oe - 1])?);
                self.move_before(parent, realized(&old_ch[os])?, anchor.as_ref());
                os += 1;
                ne -= 1;
            } else if same_vnode(&old_ch[oe - 1], &new_ch[ns]) {
                // Moved left
                self.patch_child(&old_ch[oe - 1], new_ch, ns, path)?;
                self.move_before(parent, realized(&old_ch[oe - 1])?, Some(realized(&old_ch[os])?));
                oe -= 1;
                ns += 1;
            } else {
                let map = key_map.get_or_insert_with(|| key_to_old_idx(old_ch, os, oe));
                let candidate = new_ch[ns].key.as_ref().and_then(|k| map.get(k)).copied();
                let anchor = realized(&old_ch[os])?.clone();

                match candidate {
                    Some(idx) if (os..oe).contains(&idx) && !consumed[idx] && old_ch[idx].sel == new_ch[ns].sel => {
                        self.patch_child(&old_ch[idx], new_ch, ns, path)?;
                        consumed[idx] = true;
                        self.move_before(parent, realized(&old_ch[idx])?, Some(&anchor));
                    }
                    found => {
                        if found.is_some() {
                            debug!(key = ?new_ch[ns].key, sel = ?new_ch[ns].sel, "key match not reusable; recreating");
                        }
                        path.push(ns as u32);
                        let created = self.create_elm(&mut new_ch[ns], path);
                        path.pop();
                        self.host.insert_before(parent, &created?, Some(&anchor));
                    }
                }
                ns += 1;
            }
        }

        if os >= oe {
            if ns < ne {
                let before = new_ch.get(ne).and_then(|n| n.elm.clone());
                self.add_vnodes(parent, before.as_ref(), new_ch, ns..ne, path)?;
            }
        } else {
            self.remove_vnodes(parent, old_ch, os..oe, Some(consumed.as_slice()))?;
        }
        Ok(())
    }

    fn patch_child(
        &mut self,
        old: &VNode<H>,
        new_ch: &mut [VNode<H>],
        idx: usize,
        path: &mut TreePath,
    ) -> VdomResult<()> {
        path.push(idx as u32);
        let result = self.patch_vnode(old, &mut new_ch[idx], path);
        path.pop();
        result
    }

    fn move_before(&mut self, parent: &H::Node, elm: &H::Node, anchor: Option<&H::Node>) {
        trace!(artifact = ?elm, before = ?anchor, "move");
        self.host.insert_before(parent, elm, anchor);
        self.stats.moved += 1;
    }
}

/// Map keys in `old_ch[start..end]` to their index; unkeyed nodes are skipped.
fn key_to_old_idx<H: Host>(old_ch: &[VNode<H>], start: usize, end: usize) -> FxHashMap<&Key, usize> {
    let mut map = FxHashMap::default();
    for (idx, node) in old_ch.iter().enumerate().take(end).skip(start) {
        if let Some(key) = &node.key {
            map.insert(key, idx);
        }
    }
    map
}
