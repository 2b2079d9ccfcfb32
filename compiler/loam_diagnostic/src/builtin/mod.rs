//! The warning-group hierarchy the compiler ships with.
//!
//! Diagnostics the compiler emits belong to one of these groups; the
//! registry stays open, so later phases (or plugins) can register further
//! groups under them.
//!
//! # Adding a new group
//!
//! Add an entry to the `BUILTIN_GROUPS` table below. Parents must appear
//! before their children.

use crate::{GroupRegistry, RegistryError};

/// Built-in group names, in registration order.
///
/// Each entry is `(name, parent name)`; a `None` parent marks a root group.
static BUILTIN_GROUPS: &[(&str, Option<&str>)] = &[
    ("deprecated", None),
    ("deprecated_declaration", Some("deprecated")),
    ("availability", None),
    ("unused", None),
    ("unused_import", Some("unused")),
    ("unused_variable", Some("unused")),
    ("unsafe_usage", None),
    ("strict_memory_safety", Some("unsafe_usage")),
    ("unknown_warning_group", None),
];

/// Seed the built-in groups into `registry`.
///
/// Fails only if `registry` already contains one of the built-in names.
pub fn seed(registry: &mut GroupRegistry) -> Result<(), RegistryError> {
    for &(name, parent_name) in BUILTIN_GROUPS {
        let parent = parent_name.and_then(|p| registry.lookup(p));
        // Parents precede children in the table, so a miss is a table bug.
        debug_assert_eq!(parent.is_some(), parent_name.is_some());
        registry.register(name, parent)?;
    }
    Ok(())
}

/// Create a registry containing exactly the built-in groups.
pub fn registry() -> Result<GroupRegistry, RegistryError> {
    let mut registry = GroupRegistry::new();
    seed(&mut registry)?;
    Ok(registry)
}
