//! Warning-policy resolution for the Loam compiler.
//!
//! Given the warning-group hierarchy from `loam_diagnostic`, a tree of
//! lexical scopes, and the `warn`-attribute directives attached to them,
//! this crate answers one question: *with what severity should a diagnostic
//! of group G, emitted at scope S, be treated?*
//!
//! # Lifecycle
//!
//! Construction and querying never interleave. The front end drives a
//! mutable [`PolicyBuilder`] while it walks declarations (opening scopes,
//! attaching directives); [`PolicyBuilder::finish`] then freezes everything
//! into a [`PolicyResolver`], which is an immutable, lock-free structure
//! that may be shared across threads and queried concurrently.
//!
//! # Resolution rule
//!
//! Directives are applied outermost scope first, in source order within a
//! scope, and **last write wins** — a directive for a broader ancestor group
//! applied after a subgroup directive overwrites the subgroup's effect, and
//! an inner scope always beats an outer one. See
//! [`PolicyResolver::effective_severity`].

pub mod flags;

mod errors;
mod overrides;
mod policy;
mod scope;

pub use errors::PolicyError;
pub use overrides::{OverrideDirective, OverrideTable};
pub use policy::{GlobalPolicy, PolicyBuilder, PolicyResolver};
pub use scope::{AncestorChain, ScopeId, ScopeKind, ScopeTree};
