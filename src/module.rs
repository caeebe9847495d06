//! Modules - pluggable bundles of lifecycle hooks
//!
//! A [`Module`] carries optional callbacks invoked for *every* node the
//! engine touches. Attribute, class, style and event handling all live in
//! modules; the core only calls them at the right points.
//!
//! The engine takes an ordered list of modules once, at construction, and
//! flattens it into a [`ModuleRegistry`]: one ordered hook list per event.
//! The registry is never modified afterwards.
//!
//! # Example
//!
//! ```
//! use snapdom::prelude::*;
//!
//! let log: Module<MemoryHost> = Module::new("log")
//!     .on_create(|_empty, node| println!("created {:?}", node.sel()))
//!     .on_post(|| println!("pass done"));
//!
//! let patcher = init(vec![log]);
//! assert_eq!(patcher.modules().names().as_slice(), ["log"]);
//! ```

use std::fmt;
use std::rc::Rc;

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::host::Host;
use crate::macros::impl_hook_builders;
use crate::node::{Content, CreateHook, DestroyHook, PatchHook, RemoveHook, VNode, VNodeData};
use crate::removal::RemoveHandle;

/// Runs once at the start (`pre`) or end (`post`) of a pass.
pub type PassHook = Rc<dyn Fn()>;

// =============================================================================
// Module
// =============================================================================

/// A named record of optional module hooks.
pub struct Module<H: Host> {
    name: CompactString,
    pub pre: Option<PassHook>,
    pub create: Option<CreateHook<H>>,
    pub update: Option<PatchHook<H>>,
    pub destroy: Option<DestroyHook<H>>,
    pub remove: Option<RemoveHook<H>>,
    pub post: Option<PassHook>,
}

impl<H: Host> Module<H> {
    /// Create a module without hooks.
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            pre: None,
            create: None,
            update: None,
            destroy: None,
            remove: None,
            post: None,
        }
    }

    /// Module name, used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    impl_hook_builders! {
        pre: (),
        create: (&VNode<H>, &VNode<H>),
        update: (&VNode<H>, &VNode<H>),
        destroy: (&VNode<H>),
        remove: (&VNode<H>, RemoveHandle<H>),
        post: (),
    }
}

impl<H: Host> Clone for Module<H> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            pre: self.pre.clone(),
            create: self.create.clone(),
            update: self.update.clone(),
            destroy: self.destroy.clone(),
            remove: self.remove.clone(),
            post: self.post.clone(),
        }
    }
}

impl<H: Host> fmt::Debug for Module<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("hooks", &self.installed())
            .finish()
    }
}

// =============================================================================
// ModuleRegistry
// =============================================================================

/// Module hooks flattened per event, in module order.
pub struct ModuleRegistry<H: Host> {
    names: SmallVec<[CompactString; 8]>,
    pub(crate) pre: Vec<PassHook>,
    pub(crate) create: Vec<CreateHook<H>>,
    pub(crate) update: Vec<PatchHook<H>>,
    pub(crate) destroy: Vec<DestroyHook<H>>,
    pub(crate) remove: Vec<RemoveHook<H>>,
    pub(crate) post: Vec<PassHook>,
    /// Placeholder passed as the "old" side of `create` hooks
    pub(crate) empty: VNode<H>,
}

impl<H: Host> ModuleRegistry<H> {
    /// Flatten `modules` into per-event hook lists.
    pub fn new(modules: impl IntoIterator<Item = Module<H>>) -> Self {
        let mut registry = Self {
            names: SmallVec::new(),
            pre: Vec::new(),
            create: Vec::new(),
            update: Vec::new(),
            destroy: Vec::new(),
            remove: Vec::new(),
            post: Vec::new(),
            empty: VNode::new(
                Some(CompactString::default()),
                None,
                Some(VNodeData::new()),
                Content::Children(Vec::new()),
            ),
        };
        for module in modules {
            registry.names.push(module.name);
            registry.pre.extend(module.pre);
            registry.create.extend(module.create);
            registry.update.extend(module.update);
            registry.destroy.extend(module.destroy);
            registry.remove.extend(module.remove);
            registry.post.extend(module.post);
        }
        registry
    }

    /// Names of the registered modules, in order.
    pub fn names(&self) -> SmallVec<[&str; 8]> {
        self.names.iter().map(CompactString::as_str).collect()
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no module is registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of module `remove` hooks; removal countdowns start one above.
    pub fn remove_hook_count(&self) -> usize {
        self.remove.len()
    }

    /// The empty placeholder handed to `create` hooks.
    pub fn empty_node(&self) -> &VNode<H> {
        &self.empty
    }
}

impl<H: Host> fmt::Debug for ModuleRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.names)
            .field("pre", &self.pre.len())
            .field("create", &self.create.len())
            .field("update", &self.update.len())
            .field("destroy", &self.destroy.len())
            .field("remove", &self.remove.len())
            .field("post", &self.post.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    #[test]
    fn test_module_builder() {
        let m: Module<MemoryHost> = Module::new("class")
            .on_create(|_, _| {})
            .on_update(|_, _| {});

        assert_eq!(m.name(), "class");
        assert!(m.has_create());
        assert!(!m.has_remove());
        assert_eq!(m.installed().as_slice(), &["create", "update"]);
    }

    #[test]
    fn test_registry_flattens_in_order() {
        let a: Module<MemoryHost> = Module::new("a").on_pre(|| {}).on_remove(|_, rm| rm.complete());
        let b: Module<MemoryHost> = Module::new("b").on_remove(|_, rm| rm.complete()).on_post(|| {});
        let c: Module<MemoryHost> = Module::new("c");

        let registry = ModuleRegistry::new(vec![a, b, c]);
        assert_eq!(registry.names().as_slice(), &["a", "b", "c"]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.pre.len(), 1);
        assert_eq!(registry.remove_hook_count(), 2);
        assert_eq!(registry.post.len(), 1);
        assert!(registry.create.is_empty());
    }

    #[test]
    fn test_empty_placeholder() {
        let registry: ModuleRegistry<MemoryHost> = ModuleRegistry::new(Vec::new());
        let empty = registry.empty_node();
        assert_eq!(empty.sel(), Some(""));
        assert!(empty.data().is_some());
        assert!(empty.children().is_empty());
        assert!(empty.elm().is_none());
    }
}
