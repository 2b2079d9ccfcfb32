//! Per-scope override directives.
//!
//! Each directive records one `warn`-attribute application: a target group,
//! the severity to apply, and an optional reason string for display when the
//! diagnostic is emitted. Directives are immutable once attached and keep
//! their source order — both within a scope and globally via `index`.

use loam_diagnostic::{GroupId, Severity};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{PolicyError, ScopeId};

/// One `warn`-attribute application on a scope.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct OverrideDirective {
    /// The group the directive targets.
    pub group: GroupId,
    /// The severity the directive applies.
    pub severity: Severity,
    /// Optional human-readable justification, carried through to emission.
    pub reason: Option<String>,
    /// Global source order of the directive across the whole table.
    pub index: u32,
}

/// Most scopes carry zero, one, or two directives.
type DirectiveList = SmallVec<[OverrideDirective; 2]>;

/// Ordered per-scope directive storage.
///
/// Only the same-group-twice-on-one-scope conflict is checked here (the
/// source error for repeated `warn` attributes naming one group). Scope and
/// group existence are validated by [`crate::PolicyBuilder`], which owns the
/// tree and the registry.
#[derive(Clone, Debug, Default)]
pub struct OverrideTable {
    by_scope: FxHashMap<ScopeId, DirectiveList>,
    next_index: u32,
}

impl OverrideTable {
    /// Create an empty table.
    pub fn new() -> Self {
        OverrideTable::default()
    }

    /// Attach a directive to `scope`, preserving source order.
    ///
    /// Fails with [`PolicyError::ConflictingDirective`] if `scope` already
    /// carries a directive for exactly `group`. Directives for distinct
    /// groups never conflict, even when one group is an ancestor of the
    /// other — the resolver applies them all, in order.
    pub fn attach(
        &mut self,
        scope: ScopeId,
        group: GroupId,
        severity: Severity,
        reason: Option<String>,
    ) -> Result<(), PolicyError> {
        let list = self.by_scope.entry(scope).or_default();
        if list.iter().any(|d| d.group == group) {
            return Err(PolicyError::ConflictingDirective { scope, group });
        }

        list.push(OverrideDirective {
            group,
            severity,
            reason,
            index: self.next_index,
        });
        self.next_index += 1;
        Ok(())
    }

    /// The directives attached to `scope`, in source order.
    pub fn directives(&self, scope: ScopeId) -> &[OverrideDirective] {
        self.by_scope.get(&scope).map_or(&[], |list| list.as_slice())
    }

    /// Total number of directives in the table.
    pub fn len(&self) -> usize {
        self.by_scope.values().map(SmallVec::len).sum()
    }

    /// Check whether the table holds no directives.
    pub fn is_empty(&self) -> bool {
        self.by_scope.values().all(SmallVec::is_empty)
    }
}
