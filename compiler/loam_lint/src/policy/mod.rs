//! Global policy, builder, and the resolver itself.

use loam_diagnostic::{GroupId, GroupRegistry, Severity};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{OverrideTable, PolicyError, ScopeId, ScopeKind, ScopeTree};

/// Module-wide baseline severities, set by driver flags.
///
/// Established once at resolver construction and immutable during
/// resolution. Per-group entries take precedence over the default; the
/// `warnings_as_errors` flag escalates only the *default* baseline (an
/// explicit per-group entry was asked for by name and is honored as given).
#[derive(Clone, Debug)]
pub struct GlobalPolicy {
    per_group: FxHashMap<GroupId, Severity>,
    default_severity: Severity,
    suppress_all: bool,
    warnings_as_errors: bool,
}

impl Default for GlobalPolicy {
    fn default() -> Self {
        GlobalPolicy {
            per_group: FxHashMap::default(),
            default_severity: Severity::Warning,
            suppress_all: false,
            warnings_as_errors: false,
        }
    }
}

impl GlobalPolicy {
    /// Create the default policy: every group at `Warning`, no flags.
    pub fn new() -> Self {
        GlobalPolicy::default()
    }

    /// Set the baseline severity for one group.
    #[must_use]
    pub fn with_baseline(mut self, group: GroupId, severity: Severity) -> Self {
        self.set_baseline(group, severity);
        self
    }

    /// Turn on module-wide warning suppression.
    #[must_use]
    pub fn with_suppress_all(mut self) -> Self {
        self.suppress_all = true;
        self
    }

    /// Turn on module-wide warnings-as-errors.
    #[must_use]
    pub fn with_warnings_as_errors(mut self) -> Self {
        self.warnings_as_errors = true;
        self
    }

    /// Set the baseline severity for one group (last write wins).
    pub fn set_baseline(&mut self, group: GroupId, severity: Severity) {
        self.per_group.insert(group, severity);
    }

    /// Set the module-wide suppression flag.
    pub fn set_suppress_all(&mut self, on: bool) {
        self.suppress_all = on;
    }

    /// Set the module-wide warnings-as-errors flag.
    pub fn set_warnings_as_errors(&mut self, on: bool) {
        self.warnings_as_errors = on;
    }

    /// Whether module-wide suppression is active.
    pub fn suppress_all(&self) -> bool {
        self.suppress_all
    }

    /// Whether warnings-as-errors is active.
    pub fn warnings_as_errors(&self) -> bool {
        self.warnings_as_errors
    }

    /// The baseline severity resolution starts from for `group`.
    ///
    /// Under module-wide suppression every baseline is `Ignored`; scope
    /// directives that escalate to `Error` still apply on top of it.
    pub fn baseline(&self, group: GroupId) -> Severity {
        if self.suppress_all {
            return Severity::Ignored;
        }
        if let Some(&severity) = self.per_group.get(&group) {
            return severity;
        }
        if self.warnings_as_errors && self.default_severity == Severity::Warning {
            return Severity::Error;
        }
        self.default_severity
    }

    /// Reject flag combinations the driver forbids.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.suppress_all && self.warnings_as_errors {
            return Err(PolicyError::SuppressAllWithWarningsAsErrors);
        }
        Ok(())
    }
}

/// Mutable construction side of the policy engine.
///
/// The front end opens scopes and attaches directives while walking
/// declarations, then calls [`PolicyBuilder::finish`]. All construction
/// faults are reported here, at the faulting call; the resolver never fails
/// on valid input.
#[derive(Clone, Debug)]
pub struct PolicyBuilder {
    registry: GroupRegistry,
    scopes: ScopeTree,
    overrides: OverrideTable,
    policy: GlobalPolicy,
}

impl PolicyBuilder {
    /// Create a builder over `registry` with the default global policy.
    pub fn new(registry: GroupRegistry) -> Self {
        PolicyBuilder {
            registry,
            scopes: ScopeTree::new(),
            overrides: OverrideTable::new(),
            policy: GlobalPolicy::default(),
        }
    }

    /// Create a builder with an explicit global policy.
    ///
    /// Fails if the policy combines suppression with warnings-as-errors.
    pub fn with_policy(registry: GroupRegistry, policy: GlobalPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(PolicyBuilder {
            registry,
            scopes: ScopeTree::new(),
            overrides: OverrideTable::new(),
            policy,
        })
    }

    /// The group registry this policy is built against.
    pub fn registry(&self) -> &GroupRegistry {
        &self.registry
    }

    /// The root (module) scope.
    pub fn root(&self) -> ScopeId {
        self.scopes.root()
    }

    /// Open a scope nested inside `parent`.
    pub fn open_scope(&mut self, parent: ScopeId, kind: ScopeKind) -> Result<ScopeId, PolicyError> {
        self.scopes.child(parent, kind)
    }

    /// Attach a `warn` directive to `scope`.
    ///
    /// Validates both ids, then delegates the same-group conflict check to
    /// the override table.
    pub fn attach_override(
        &mut self,
        scope: ScopeId,
        group: GroupId,
        severity: Severity,
        reason: Option<String>,
    ) -> Result<(), PolicyError> {
        if !self.scopes.contains(scope) {
            return Err(PolicyError::UnknownScope { scope });
        }
        if !self.registry.contains(group) {
            return Err(PolicyError::UnknownGroup { group });
        }
        self.overrides.attach(scope, group, severity, reason)?;
        debug!(?scope, ?group, %severity, "attached warn directive");
        Ok(())
    }

    /// Freeze construction and produce the immutable resolver.
    pub fn finish(self) -> PolicyResolver {
        debug!(
            scopes = self.scopes.len(),
            directives = self.overrides.len(),
            "warning policy frozen"
        );
        PolicyResolver {
            registry: self.registry,
            scopes: self.scopes,
            overrides: self.overrides,
            policy: self.policy,
        }
    }
}

/// Immutable query side of the policy engine.
///
/// Owns all of its data and never mutates it, so a resolver can be shared
/// across threads and queried concurrently without locking.
#[derive(Clone, Debug)]
pub struct PolicyResolver {
    registry: GroupRegistry,
    scopes: ScopeTree,
    overrides: OverrideTable,
    policy: GlobalPolicy,
}

impl PolicyResolver {
    /// Compute the effective severity of `group` for a diagnostic emitted
    /// at `scope`.
    ///
    /// Starting from the global baseline, the ancestor chain is walked
    /// outermost to innermost; at each scope every directive targeting
    /// `group` or a strict ancestor group overwrites the tracked severity
    /// in source order. Last write wins — group specificity carries no
    /// precedence. Under module-wide suppression only directives escalating
    /// to `Error` take effect.
    ///
    /// `UnknownGroup` / `UnknownScope` indicate a caller bug: the emitting
    /// phase passed an id that was never produced by this policy's registry
    /// or tree.
    pub fn effective_severity(
        &self,
        scope: ScopeId,
        group: GroupId,
    ) -> Result<Severity, PolicyError> {
        if !self.registry.contains(group) {
            return Err(PolicyError::UnknownGroup { group });
        }
        if !self.scopes.contains(scope) {
            return Err(PolicyError::UnknownScope { scope });
        }

        let mut current = self.policy.baseline(group);

        // ancestor_chain yields innermost first; the walk applies
        // directives outermost first.
        let chain: SmallVec<[ScopeId; 8]> = self.scopes.ancestor_chain(scope).collect();
        for &visited in chain.iter().rev() {
            for directive in self.overrides.directives(visited) {
                let applies = directive.group == group
                    || self.registry.is_subgroup_of(group, directive.group);
                if !applies {
                    continue;
                }
                if self.policy.suppress_all() && !directive.severity.is_error() {
                    trace!(?visited, group = ?directive.group, "directive suppressed module-wide");
                    continue;
                }
                trace!(
                    ?visited,
                    group = ?directive.group,
                    severity = %directive.severity,
                    "directive applies"
                );
                current = directive.severity;
            }
        }

        Ok(current)
    }

    /// The group registry this policy was built against.
    pub fn registry(&self) -> &GroupRegistry {
        &self.registry
    }

    /// The scope tree this policy was built over.
    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    /// The directives attached to `scope`, in source order.
    pub fn directives(&self, scope: ScopeId) -> &[crate::OverrideDirective] {
        self.overrides.directives(scope)
    }

    /// The global policy in effect.
    pub fn policy(&self) -> &GlobalPolicy {
        &self.policy
    }
}
