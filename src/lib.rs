//! snapdom - keyed virtual-tree reconciliation
//!
//! ## Core Concepts
//!
//! **Descriptions, not trees**: every render builds a fresh [`VNode`] tree.
//! The engine compares it with the tree returned by the previous pass and
//! applies the difference to a host through the [`Host`] trait.
//!
//! **Modules**: attribute, class, style and event handling are not part of
//! the core. They plug in as [`Module`]s whose hooks run for every node.
//!
//! ## Modules
//! - `node`: descriptions, node data, per-node hooks, builders
//! - `module`: module hooks and the per-event registry
//! - `host`: the `Host` capability trait and the in-memory host
//! - `patch`: the reconciler and its entry point
//! - `removal`: coordinated removal handles
//! - `render`: HTML serialization of the in-memory host
//!
//! ## Usage
//!
//! ```
//! use snapdom::prelude::*;
//!
//! let mut patcher = init(Vec::new());
//! let body = patcher.host().create_element("body", None);
//! let container = patcher.host().create_element("div", None);
//! patcher.host().append_child(&body, &container);
//!
//! let list = |items: &[&str]| -> VNode<MemoryHost> {
//!     h("ul", None, items.iter().map(|s| h("li", None, *s).with_key(*s)).collect::<Vec<_>>())
//! };
//!
//! let vnode = patcher.mount(container, list(&["a", "b"]))?;
//! let vnode = patcher.patch(vnode, list(&["b", "a", "c"]))?;
//!
//! assert_eq!(
//!     to_html(patcher.host(), body),
//!     "<body><ul><li>b</li><li>a</li><li>c</li></ul></body>"
//! );
//! assert!(vnode.elm().is_some());
//! # Ok::<(), VdomError>(())
//! ```

// =============================================================================
// Core modules
// =============================================================================

/// Node descriptions: VNode, VNodeData, NodeHooks, h
pub mod node;

/// Module hooks and registry
pub mod module;

/// Host adapters
pub mod host;

/// Reconciler: Patcher, init, Options
pub mod patch;

/// Coordinated removal
pub mod removal;

/// Attribute types
pub mod attr;

/// Selector parsing
pub mod selector;

/// Node identity: Key, VNodeId
pub mod id;

/// Error types
pub mod error;

/// HTML rendering
pub mod render;

/// Prelude for common imports
pub mod prelude;

mod macros;

// =============================================================================
// Re-exports
// =============================================================================

// Node types
pub use node::{Content, Extensions, NodeHooks, VNode, VNodeData, h, same_vnode};

// Identity
pub use id::{Key, VNodeId};

// Modules
pub use module::{Module, ModuleRegistry, PassHook};

// Host
pub use host::{Host, MemoryHost};

// Patch entry point
pub use patch::{ExperimentalOptions, Options, PatchRoot, PatchStats, Patcher, init, init_with_host};

// Removal
pub use removal::RemoveHandle;

// Error types
pub use error::{VdomError, VdomResult};

// =============================================================================
// Tests
// =============================================================================
