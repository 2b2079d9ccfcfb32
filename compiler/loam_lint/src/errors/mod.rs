//! Error taxonomy for policy construction and queries.
//!
//! Construction-time variants (`ConflictingDirective`,
//! `SuppressAllWithWarningsAsErrors`) are reported at the faulting call and
//! map back to source errors on the offending declaration or flag. The
//! query-time variants (`UnknownGroup`, `UnknownScope`) indicate a caller
//! bug — the emitting phase handed the resolver an id it never produced —
//! and should be treated as internal errors, not user-facing diagnostics.

use loam_diagnostic::GroupId;

use crate::ScopeId;

/// Errors raised while building or querying a warning policy.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum PolicyError {
    /// A second directive for the same group was attached to one scope.
    ///
    /// Mirrors the source error for multiple conflicting `warn` attributes
    /// on the same declaration.
    #[error("scope {scope:?} already has a directive for group {group:?}")]
    ConflictingDirective { scope: ScopeId, group: GroupId },

    /// The queried or attached group id was never registered.
    #[error("diagnostic group {group:?} is not registered")]
    UnknownGroup { group: GroupId },

    /// The queried or attached scope id does not exist in the tree.
    #[error("scope {scope:?} does not exist")]
    UnknownScope { scope: ScopeId },

    /// Module-wide suppression and warnings-as-errors are mutually exclusive.
    #[error("cannot suppress all warnings while treating warnings as errors")]
    SuppressAllWithWarningsAsErrors,
}
