//! Patch engine
//!
//! Reconciles a previously rendered tree against a new description and
//! applies the difference to a [`Host`], invoking module and node hooks on
//! the way.
//!
//! # Architecture
//!
//! ```text
//! Patcher::patch(old, new)
//!   ├─ same_vnode?  ── yes ─> patch_vnode ─> update_children (keyed, 4 cursors)
//!   │                                      └> add_vnodes / remove_vnodes
//!   └─ no ─> create_elm(new) ─> insert next to old ─> remove_vnodes([old])
//! then: queued insert hooks, post hooks
//! ```
//!
//! # Key Features
//!
//! - **Read-only old tree**: the previous description is never mutated;
//!   reused old slots are tracked in a per-list bitmap
//! - **Deferred insert hooks**: recorded as paths into the new tree and
//!   fired after the whole pass has been committed, in creation order
//! - **Coordinated removal**: artifacts are detached once every `remove`
//!   hook has completed its [`RemoveHandle`](crate::RemoveHandle)
//!
//! Errors abort the pass immediately; host mutations made before the error
//! are not rolled back.

mod children;
mod create;
mod remove;
mod vnode;


use std::rc::Rc;

use compact_str::CompactString;
use smallvec::SmallVec;
use tracing::{debug, trace, trace_span};

use crate::error::{VdomError, VdomResult};
use crate::host::{Host, MemoryHost};
use crate::module::{Module, ModuleRegistry};
use crate::node::{Content, NodeHooks, VNode, VNodeData, same_vnode};

// =============================================================================
// Configuration
// =============================================================================

/// Options that are not yet considered stable.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExperimentalOptions {
    /// Realize selector-less descriptions with children as host fragments.
    /// Default: false
    pub fragments: bool,
}

/// Engine configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub experimental: ExperimentalOptions,
}

impl Options {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable fragment creation.
    #[must_use]
    pub fn with_fragments(mut self, enabled: bool) -> Self {
        self.experimental.fragments = enabled;
        self
    }
}

/// Statistics from one patch pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct PatchStats {
    /// Number of artifacts created
    pub created: usize,
    /// Number of descriptions patched in place
    pub patched: usize,
    /// Number of artifacts moved among their siblings
    pub moved: usize,
    /// Number of subtrees handed to the removal protocol
    pub removed: usize,
    /// Number of text content writes
    pub text_updates: usize,
    /// Number of `insert` hooks fired
    pub inserted: usize,
}

impl PatchStats {
    /// Check if the pass changed the host tree structure or text.
    pub fn has_changes(&self) -> bool {
        self.created + self.moved + self.removed + self.text_updates > 0
    }
}

// =============================================================================
// PatchRoot
// =============================================================================

/// The "old" side of a patch: a realized artifact or a previous description.
pub enum PatchRoot<H: Host> {
    /// A host artifact without description; wrapped before patching
    Artifact(H::Node),
    /// The description returned by the previous pass
    VNode(VNode<H>),
}

impl<H: Host> PatchRoot<H> {
    /// Patch against a raw host artifact.
    pub fn artifact(node: H::Node) -> Self {
        Self::Artifact(node)
    }
}

impl<H: Host> From<VNode<H>> for PatchRoot<H> {
    fn from(value: VNode<H>) -> Self {
        Self::VNode(value)
    }
}

impl From<crate::host::NodeId> for PatchRoot<MemoryHost> {
    fn from(value: crate::host::NodeId) -> Self {
        Self::Artifact(value)
    }
}

// =============================================================================
// Patcher
// =============================================================================

/// Create an engine over a fresh [`MemoryHost`].
pub fn init(modules: Vec<Module<MemoryHost>>) -> Patcher<MemoryHost> {
    init_with_host(modules, MemoryHost::new(), Options::default())
}

/// Create an engine over a custom host.
pub fn init_with_host<H: Host>(modules: Vec<Module<H>>, host: H, options: Options) -> Patcher<H> {
    Patcher::new(modules, host, options)
}

/// The patch entry point.
///
/// Holds the host, the module registry and the options for its whole
/// lifetime. Build a new engine to change any of them.
pub struct Patcher<H: Host> {
    host: Rc<H>,
    modules: ModuleRegistry<H>,
    options: Options,
    last_stats: PatchStats,
}

impl<H: Host> Patcher<H> {
    /// Create an engine.
    pub fn new(modules: Vec<Module<H>>, host: H, options: Options) -> Self {
        let modules = ModuleRegistry::new(modules);
        debug!(modules = ?modules.names(), ?options, "patcher initialized");
        Self {
            host: Rc::new(host),
            modules,
            options,
            last_stats: PatchStats::default(),
        }
    }

    /// The host this engine mutates.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The registered modules.
    pub fn modules(&self) -> &ModuleRegistry<H> {
        &self.modules
    }

    /// The engine options.
    pub fn options(&self) -> Options {
        self.options
    }

    /// Statistics of the most recent pass.
    pub fn last_stats(&self) -> PatchStats {
        self.last_stats
    }

    /// Patch `container`, a realized artifact, into `new`.
    pub fn mount(&mut self, container: H::Node, new: VNode<H>) -> VdomResult<VNode<H>> {
        self.patch(PatchRoot::Artifact(container), new)
    }

    /// Reconcile `old` into `new` and apply the difference to the host.
    ///
    /// Returns `new` with every artifact realized; pass it back as `old` on
    /// the next call.
    pub fn patch(&mut self, old: impl Into<PatchRoot<H>>, mut new: VNode<H>) -> VdomResult<VNode<H>> {
        let span = trace_span!("patch", sel = ?new.sel());
        let _enter = span.enter();

        let mut pass = Pass::new(&self.host, &self.modules, self.options);
        for pre in &self.modules.pre {
            pre();
        }

        let old = match old.into() {
            PatchRoot::Artifact(artifact) => self.wrap_artifact(artifact),
            PatchRoot::VNode(vnode) => vnode,
        };

        let mut path = TreePath::new();
        if same_vnode(&old, &new) {
            pass.patch_vnode(&old, &mut new, &mut path)?;
        } else {
            let elm = realized(&old)?.clone();
            let parent = self.host.parent_node(&elm);
            let created = pass.create_elm(&mut new, &mut path)?;
            match parent {
                Some(parent) => {
                    trace!(old = ?old.sel(), new = ?new.sel(), "replacing root");
                    let next = self.host.next_sibling(&elm);
                    self.host.insert_before(&parent, &created, next.as_ref());
                    pass.remove_vnodes(&parent, std::slice::from_ref(&old), 0..1, None)?;
                }
                None => debug!(old = ?old.sel(), "old root is detached; new root left unattached"),
            }
        }

        pass.fire_insert_hooks(&new);
        for post in &self.modules.post {
            post();
        }

        self.last_stats = pass.stats;
        debug!(stats = ?self.last_stats, "patch complete");
        Ok(new)
    }

    /// Describe a bare artifact: elements by `tag#id.classes`, fragments
    /// by an empty child list, anything else as a selector-less node.
    fn wrap_artifact(&self, artifact: H::Node) -> VNode<H> {
        let host = &*self.host;
        let mut node = if host.is_element(&artifact) {
            let mut sel = CompactString::from(host.tag_name(&artifact).to_lowercase());
            if let Some(id) = host.get_attribute(&artifact, "id").filter(|id| !id.is_empty()) {
                sel.push('#');
                sel.push_str(&id);
            }
            if let Some(class) = host.get_attribute(&artifact, "class").filter(|c| !c.is_empty()) {
                sel.push('.');
                sel.push_str(&class.replace(' ', "."));
            }
            VNode::new(Some(sel), None, Some(VNodeData::new()), Content::Children(Vec::new()))
        } else if host.is_document_fragment(&artifact) {
            VNode::new(None, None, Some(VNodeData::new()), Content::Children(Vec::new()))
        } else {
            VNode::new(None, None, None, Content::Empty)
        };
        trace!(sel = ?node.sel(), artifact = ?artifact, "wrapped root artifact");
        node.elm = Some(artifact);
        node
    }
}

impl<H: Host> std::fmt::Debug for Patcher<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Patcher")
            .field("modules", &self.modules)
            .field("options", &self.options)
            .field("last_stats", &self.last_stats)
            .finish()
    }
}

// =============================================================================
// Pass state
// =============================================================================

/// Child-index path from the new root to a description.
pub(crate) type TreePath = SmallVec<[u32; 16]>;

/// State of one patch pass.
struct Pass<'a, H: Host> {
    host: &'a Rc<H>,
    modules: &'a ModuleRegistry<H>,
    options: Options,
    /// Nodes with an `insert` hook, in creation order
    inserted: Vec<TreePath>,
    stats: PatchStats,
}

impl<'a, H: Host> Pass<'a, H> {
    fn new(host: &'a Rc<H>, modules: &'a ModuleRegistry<H>, options: Options) -> Self {
        Self {
            host,
            modules,
            options,
            inserted: Vec::new(),
            stats: PatchStats::default(),
        }
    }

    fn fire_insert_hooks(&mut self, root: &VNode<H>) {
        for path in std::mem::take(&mut self.inserted) {
            let Some(node) = root.get_by_path(&path) else {
                continue;
            };
            if let Some(insert) = hook_of(node, |h| &h.insert) {
                insert(node);
                self.stats.inserted += 1;
            }
        }
    }
}

/// Clone one of the node's own hooks out of its data.
fn hook_of<H: Host, T: Clone>(
    node: &VNode<H>,
    pick: impl FnOnce(&NodeHooks<H>) -> &Option<T>,
) -> Option<T> {
    node.data.as_ref().and_then(|d| pick(&d.hook).clone())
}

/// The artifact of a description the engine has seen before.
fn realized<H: Host>(node: &VNode<H>) -> VdomResult<&H::Node> {
    node.elm
        .as_ref()
        .ok_or_else(|| VdomError::not_realized(node.sel()))
}
