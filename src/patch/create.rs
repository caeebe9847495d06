//! Artifact creation

use std::ops::Range;

use tracing::trace;

use crate::error::{VdomError, VdomResult};
use crate::host::Host;
use crate::node::{Content, VNode};
use crate::selector::Selector;

use super::{Pass, TreePath, hook_of};

impl<H: Host> Pass<'_, H> {
    /// Realize `vnode` and its subtree, returning the new artifact.
    ///
    /// `path` is the position of `vnode` in the new tree; it is restored
    /// before returning.
    pub(super) fn create_elm(&mut self, vnode: &mut VNode<H>, path: &mut TreePath) -> VdomResult<H::Node> {
        if let Some(init) = hook_of(vnode, |h| &h.init) {
            init(vnode);
        }

        let elm = if vnode.is_comment() {
            if !matches!(vnode.content, Content::Text(_)) {
                vnode.content = Content::Text(String::new());
            }
            self.host.create_comment(vnode.text().unwrap_or_default())
        } else if let Some(sel) = vnode.sel.clone() {
            self.create_element(vnode, &sel, path)?
        } else if self.options.experimental.fragments && matches!(vnode.content, Content::Children(_)) {
            self.create_fragment(vnode, path)?
        } else {
            self.host.create_text_node(vnode.text().unwrap_or_default())
        };

        vnode.elm = Some(elm.clone());
        self.stats.created += 1;
        Ok(elm)
    }

    fn create_element(&mut self, vnode: &mut VNode<H>, sel: &str, path: &mut TreePath) -> VdomResult<H::Node> {
        let selector = Selector::parse(sel);
        let data = vnode.data.as_ref();
        let elm = match data.and_then(|d| d.ns.as_deref()) {
            Some(ns) => self.host.create_element_ns(ns, selector.tag, data),
            None => self.host.create_element(selector.tag, data),
        };
        if let Some(id) = selector.id {
            self.host.set_attribute(&elm, "id", id);
        }
        if let Some(class) = selector.class_attr() {
            self.host.set_attribute(&elm, "class", &class);
        }
        trace!(sel, artifact = ?elm, "created element");

        vnode.elm = Some(elm.clone());
        for create in &self.modules.create {
            create(&self.modules.empty, vnode);
        }

        match &mut vnode.content {
            Content::Children(children) => self.append_children(&elm, children, path)?,
            Content::Text(text) => {
                let text = self.host.create_text_node(text);
                self.host.append_child(&elm, &text);
            }
            Content::Empty => {}
        }

        if let Some(create) = hook_of(vnode, |h| &h.create) {
            create(&self.modules.empty, vnode);
        }
        if vnode.data.as_ref().is_some_and(|d| d.hook.insert.is_some()) {
            self.inserted.push(path.clone());
        }
        Ok(elm)
    }

    fn create_fragment(&mut self, vnode: &mut VNode<H>, path: &mut TreePath) -> VdomResult<H::Node> {
        let elm = self
            .host
            .create_document_fragment()
            .ok_or(VdomError::FragmentUnsupported)?;
        trace!(artifact = ?elm, "created fragment");

        vnode.elm = Some(elm.clone());
        for create in &self.modules.create {
            create(&self.modules.empty, vnode);
        }
        if let Content::Children(children) = &mut vnode.content {
            self.append_children(&elm, children, path)?;
        }
        Ok(elm)
    }

    fn append_children(
        &mut self,
        parent: &H::Node,
        children: &mut [VNode<H>],
        path: &mut TreePath,
    ) -> VdomResult<()> {
        for (idx, child) in children.iter_mut().enumerate() {
            path.push(idx as u32);
            let created = self.create_elm(child, path);
            path.pop();
            self.host.append_child(parent, &created?);
        }
        Ok(())
    }

    /// Create `vnodes[range]` and insert each before `before` (or append).
    pub(super) fn add_vnodes(
        &mut self,
        parent: &H::Node,
        before: Option<&H::Node>,
        vnodes: &mut [VNode<H>],
        range: Range<usize>,
        path: &mut TreePath,
    ) -> VdomResult<()> {
        for idx in range {
            path.push(idx as u32);
            let created = self.create_elm(&mut vnodes[idx], path);
            path.pop();
            self.host.insert_before(parent, &created?, before);
        }
        Ok(())
    }
}
