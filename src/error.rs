//! Error types for snapdom.
//!
//! Only configuration faults surface as errors. Irregular input such as
//! duplicate keys degrades to recreate-and-discard instead.

use thiserror::Error;

/// Errors that can occur during a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VdomError {
    /// Fragment creation was requested but the host cannot realize fragments
    #[error("the document fragment is not supported on this host")]
    FragmentUnsupported,

    /// A previous description reached the engine without a realized artifact
    #[error("description {} was never realized on the host", .sel.as_deref().unwrap_or("<text>"))]
    NotRealized {
        /// Selector of the offending description, if it had one
        sel: Option<String>,
    },
}

/// Result type alias for reconciliation operations.
pub type VdomResult<T> = Result<T, VdomError>;

impl VdomError {
    /// Create a not-realized error for a description with the given selector.
    pub fn not_realized(sel: Option<&str>) -> Self {
        Self::NotRealized {
            sel: sel.map(str::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VdomError::FragmentUnsupported;
        assert_eq!(err.to_string(), "the document fragment is not supported on this host");

        let err = VdomError::not_realized(Some("div#app"));
        assert_eq!(err.to_string(), "description div#app was never realized on the host");

        let err = VdomError::not_realized(None);
        assert_eq!(err.to_string(), "description <text> was never realized on the host");
    }

    #[test]
    fn test_error_is_send_sync() {
        static_assertions::assert_impl_all!(VdomError: Send, Sync, std::error::Error);
    }
}
