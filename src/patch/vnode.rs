//! Same-node patch

use tracing::trace;

use crate::error::VdomResult;
use crate::host::Host;
use crate::node::{Content, VNode};

use super::{Pass, TreePath, hook_of, realized};

impl<H: Host> Pass<'_, H> {
    /// Patch `old` into `new` in place; both describe the same logical node.
    pub(super) fn patch_vnode(
        &mut self,
        old: &VNode<H>,
        new: &mut VNode<H>,
        path: &mut TreePath,
    ) -> VdomResult<()> {
        if let Some(prepatch) = hook_of(new, |h| &h.prepatch) {
            prepatch(old, new);
        }

        let elm = realized(old)?.clone();
        new.elm = Some(elm.clone());

        // Published descriptions are immutable, so an equal token means an
        // identical subtree.
        if old.id == new.id {
            adopt_realized(old, new);
            trace!(id = %new.id, "identical description; skipped");
            return Ok(());
        }
        self.stats.patched += 1;

        let text_changed = new.text().is_some_and(|t| old.text() != Some(t));
        if new.data.is_some() || text_changed {
            for update in &self.modules.update {
                update(old, new);
            }
            if let Some(update) = hook_of(new, |h| &h.update) {
                update(old, new);
            }
        }

        match (&old.content, &mut new.content) {
            (Content::Children(old_ch), Content::Children(new_ch)) => {
                self.update_children(&elm, old_ch, new_ch, path)?;
            }
            (Content::Text(_), Content::Children(new_ch)) => {
                self.set_text(&elm, "");
                let len = new_ch.len();
                self.add_vnodes(&elm, None, new_ch, 0..len, path)?;
            }
            (Content::Empty, Content::Children(new_ch)) => {
                let len = new_ch.len();
                self.add_vnodes(&elm, None, new_ch, 0..len, path)?;
            }
            (Content::Children(old_ch), Content::Empty) => {
                self.remove_vnodes(&elm, old_ch, 0..old_ch.len(), None)?;
            }
            (Content::Text(_), Content::Empty) => self.set_text(&elm, ""),
            (Content::Empty, Content::Empty) => {}
            (old_content, Content::Text(text)) => {
                if old_content.text() != Some(text.as_str()) {
                    if let Content::Children(old_ch) = old_content {
                        self.remove_vnodes(&elm, old_ch, 0..old_ch.len(), None)?;
                    }
                    self.set_text(&elm, text);
                }
            }
        }

        if let Some(postpatch) = hook_of(new, |h| &h.postpatch) {
            postpatch(old, new);
        }
        Ok(())
    }

    fn set_text(&mut self, elm: &H::Node, text: &str) {
        trace!(artifact = ?elm, text, "set text content");
        self.host.set_text_content(elm, text);
        self.stats.text_updates += 1;
    }
}

/// Copy artifacts from `old` into a description sharing its identity.
///
/// A clone of an unrealized description carries the same token as the
/// description it was cloned from, which the engine may since have realized.
fn adopt_realized<H: Host>(old: &VNode<H>, new: &mut VNode<H>) {
    if new.elm.is_none() {
        new.elm = old.elm.clone();
    }
    if let Content::Children(new_ch) = &mut new.content {
        for (old_child, new_child) in old.children().iter().zip(new_ch.iter_mut()) {
            adopt_realized(old_child, new_child);
        }
    }
}
