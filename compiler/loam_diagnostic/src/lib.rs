//! Diagnostic vocabulary for the Loam compiler.
//!
//! Defines the names the rest of the compiler uses to talk about warnings:
//! - [`Severity`] — how a diagnostic is ultimately treated
//! - [`GroupId`] / [`GroupRegistry`] — interned warning-group identifiers and
//!   their parent/subgroup hierarchy
//! - [`builtin`] — the group hierarchy the compiler ships with
//!
//! The registry is built once, up front, and is read-only afterwards. Policy
//! resolution (which directive wins where) lives in `loam_lint`; this crate
//! only answers "does this group exist, and what is it a subgroup of".

pub mod builtin;
mod errors;
mod group;
mod severity;

pub use errors::RegistryError;
pub use group::{Ancestors, DiagnosticGroup, GroupId, GroupRegistry};
pub use severity::{ParseSeverityError, Severity};
