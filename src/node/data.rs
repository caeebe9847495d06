//! Node data - everything besides selector, key and content
//!
//! `VNodeData` is the extension point of a description: a namespace for the
//! host, the species tag taking part in identity matching, plain attributes,
//! per-node hooks, and typed slots for module-owned data.

use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

use compact_str::CompactString;
use rustc_hash::FxHashMap;

use crate::attr::{Attrs, AttrsExt};
use crate::host::Host;

use super::NodeHooks;

// =============================================================================
// Extensions
// =============================================================================

/// Typed storage for module-owned data, one value per type.
///
/// Values are reference-counted, so cloning a description never deep-copies
/// module data.
#[derive(Clone, Default)]
pub struct Extensions {
    map: FxHashMap<TypeId, Rc<dyn Any>>,
}

impl Extensions {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`, replacing any previous value of the same type.
    pub fn insert<T: Any>(&mut self, value: T) {
        self.map.insert(TypeId::of::<T>(), Rc::new(value));
    }

    /// Get the value of type `T`, if any.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref::<T>())
    }

    /// Check if a value of type `T` is stored.
    pub fn contains<T: Any>(&self) -> bool {
        self.map.contains_key(&TypeId::of::<T>())
    }

    /// Remove the value of type `T`.
    pub fn remove<T: Any>(&mut self) -> bool {
        self.map.remove(&TypeId::of::<T>()).is_some()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Debug for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extensions").field("len", &self.map.len()).finish()
    }
}

// =============================================================================
// VNodeData
// =============================================================================

/// Extension data of a description.
pub struct VNodeData<H: Host> {
    /// Element namespace (elements are created with `create_element_ns`)
    pub ns: Option<CompactString>,
    /// Species tag; part of identity matching
    pub is: Option<CompactString>,
    /// Plain attributes a host may apply at creation
    pub attrs: Attrs,
    /// Per-node lifecycle hooks
    pub hook: NodeHooks<H>,
    /// Module-owned typed data
    pub ext: Extensions,
}

impl<H: Host> VNodeData<H> {
    /// Create empty data.
    pub fn new() -> Self {
        Self {
            ns: None,
            is: None,
            attrs: Attrs::new(),
            hook: NodeHooks::new(),
            ext: Extensions::new(),
        }
    }

    /// Set the namespace.
    #[must_use]
    pub fn with_ns(mut self, ns: impl Into<CompactString>) -> Self {
        self.ns = Some(ns.into());
        self
    }

    /// Set the species tag.
    #[must_use]
    pub fn with_is(mut self, is: impl Into<CompactString>) -> Self {
        self.is = Some(is.into());
        self
    }

    /// Add or replace an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<CompactString>, value: impl Into<CompactString>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    /// Configure hooks.
    #[must_use]
    pub fn with_hooks(mut self, f: impl FnOnce(NodeHooks<H>) -> NodeHooks<H>) -> Self {
        self.hook = f(self.hook);
        self
    }

    /// Store module-owned data.
    #[must_use]
    pub fn with_ext<T: Any>(mut self, value: T) -> Self {
        self.ext.insert(value);
        self
    }
}

impl<H: Host> Default for VNodeData<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> Clone for VNodeData<H> {
    fn clone(&self) -> Self {
        Self {
            ns: self.ns.clone(),
            is: self.is.clone(),
            attrs: self.attrs.clone(),
            hook: self.hook.clone(),
            ext: self.ext.clone(),
        }
    }
}

impl<H: Host> fmt::Debug for VNodeData<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VNodeData")
            .field("ns", &self.ns)
            .field("is", &self.is)
            .field("attrs", &self.attrs)
            .field("hook", &self.hook)
            .field("ext", &self.ext)
            .finish()
    }
}
