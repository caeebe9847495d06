//! Prelude module for common imports.
//!
//! ```
//! use snapdom::prelude::*;
//! ```

// Node types
pub use crate::node::{Content, Extensions, NodeHooks, VNode, VNodeData, h, same_vnode};

// Identity
pub use crate::id::{Key, VNodeId};

// Modules
pub use crate::module::{Module, ModuleRegistry};

// Host
pub use crate::host::{Host, HostOp, MemoryHost, NodeId};

// Patch entry point
pub use crate::patch::{Options, PatchRoot, PatchStats, Patcher, init, init_with_host};

// Removal
pub use crate::removal::RemoveHandle;

// Error
pub use crate::error::{VdomError, VdomResult};

// Render
pub use crate::render::{inner_html, to_html};
