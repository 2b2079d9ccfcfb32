//! Error taxonomy for group registration.
//!
//! All variants are construction-time faults: they are reported at the
//! faulting `register` call and the registry is left unchanged. The compiler
//! front end surfaces them as source errors on the declaration that carried
//! the bad group definition.

use crate::GroupId;

/// Errors raised while building the warning-group hierarchy.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum RegistryError {
    /// A group with this name has already been registered.
    #[error("diagnostic group `{name}` is already registered")]
    DuplicateGroup { name: String },

    /// The requested parent group id was never registered.
    #[error("parent group {parent:?} is not registered")]
    UnknownParent { parent: GroupId },

    /// The parent chain of the requested parent does not terminate.
    ///
    /// Unreachable through the public API (a parent must already exist and
    /// every new group gets a fresh id), but the ancestor walk is bounded
    /// and a corrupted hierarchy is reported instead of looped on.
    #[error("registering `{name}` under {parent:?} would not terminate at a root group")]
    InvalidHierarchy { name: String, parent: GroupId },
}
