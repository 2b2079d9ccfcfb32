//! Property-based tests for warning-policy resolution.
//!
//! These complement the unit tests in `src/policy/tests.rs` by generating
//! random group hierarchies, scope chains, and directive placements, and
//! checking the guarantees that must hold for every input:
//! 1. Baseline pass-through when no directive applies
//! 2. Same-group double-attach always conflicts
//! 3. An exact-group directive on the innermost scope wins
//! 4. Idempotence of repeated queries
//! 5. Suppression only ever yields `Ignored`, or `Error` via escalation

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use loam_diagnostic::{GroupId, GroupRegistry, Severity};
use loam_lint::{GlobalPolicy, PolicyBuilder, PolicyError, ScopeId, ScopeKind};
use proptest::prelude::*;

// -- Strategies --

fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Error),
        Just(Severity::Warning),
        Just(Severity::Ignored),
    ]
}

/// Raw directive placement: scope and group picked by index modulo the
/// generated chain lengths.
type RawDirective = (usize, usize, Severity);

fn directives_strategy() -> impl Strategy<Value = Vec<RawDirective>> {
    prop::collection::vec((0usize..16, 0usize..16, severity_strategy()), 0..8)
}

// -- Fixture --

/// A linear group hierarchy and a linear scope chain, with directives
/// attached wherever the raw placements land (same-group conflicts are
/// skipped, mirroring a front end that rejects the second attribute).
struct Fixture {
    registry_len: usize,
    groups: Vec<GroupId>,
    scopes: Vec<ScopeId>,
    attached: Vec<(ScopeId, GroupId, Severity)>,
    builder: PolicyBuilder,
}

impl Fixture {
    fn build(
        group_depth: usize,
        scope_depth: usize,
        raw: &[RawDirective],
        policy: GlobalPolicy,
        skip_innermost_scope: bool,
    ) -> Self {
        let mut registry = GroupRegistry::new();
        let mut groups = Vec::new();
        let mut parent = None;
        for i in 0..group_depth {
            let id = registry.register(format!("group_{i}"), parent).unwrap();
            groups.push(id);
            parent = Some(id);
        }
        let registry_len = registry.len();

        let mut builder = PolicyBuilder::with_policy(registry, policy).unwrap();
        let mut scopes = vec![builder.root()];
        for _ in 1..scope_depth {
            let last = *scopes.last().unwrap();
            scopes.push(builder.open_scope(last, ScopeKind::Member).unwrap());
        }

        let mut attached = Vec::new();
        for &(scope_idx, group_idx, severity) in raw {
            let scope = scopes[scope_idx % scopes.len()];
            if skip_innermost_scope && scope == *scopes.last().unwrap() {
                continue;
            }
            let group = groups[group_idx % groups.len()];
            match builder.attach_override(scope, group, severity, None) {
                Ok(()) => attached.push((scope, group, severity)),
                Err(PolicyError::ConflictingDirective { .. }) => {}
                Err(other) => panic!("unexpected attach error: {other}"),
            }
        }

        Fixture {
            registry_len,
            groups,
            scopes,
            attached,
            builder,
        }
    }

    /// Whether any attached directive applies to `group` (exact or via a
    /// strict ancestor) with the given severity, anywhere on the chain of
    /// `scope`. Scope chains are linear here, so every scope with index
    /// <= the query scope's is on the chain.
    fn has_applicable(&self, scope: ScopeId, group: GroupId, severity: Severity) -> bool {
        // In a linear hierarchy, groups[i] is an ancestor of groups[j] for i < j.
        let group_pos = self.groups.iter().position(|&g| g == group).unwrap();
        let scope_pos = self.scopes.iter().position(|&s| s == scope).unwrap();
        self.attached.iter().any(|&(s, g, sev)| {
            let s_pos = self.scopes.iter().position(|&x| x == s).unwrap();
            let g_pos = self.groups.iter().position(|&x| x == g).unwrap();
            s_pos <= scope_pos && g_pos <= group_pos && sev == severity
        })
    }
}

// -- Properties --

proptest! {
    #[test]
    fn baseline_passthrough_without_directives(
        group_depth in 1usize..5,
        scope_depth in 1usize..6,
        default_overrides in prop::collection::vec((0usize..16, severity_strategy()), 0..4),
        query_scope in 0usize..16,
        query_group in 0usize..16,
    ) {
        let fixture = Fixture::build(group_depth, scope_depth, &[], GlobalPolicy::new(), false);
        let registry = fixture.builder.registry().clone();

        let mut policy = GlobalPolicy::new();
        for (group_idx, severity) in default_overrides {
            policy.set_baseline(fixture.groups[group_idx % fixture.groups.len()], severity);
        }
        // Rebuild with the randomized baselines but still no directives.
        let mut builder = PolicyBuilder::with_policy(registry, policy.clone()).unwrap();
        let mut scopes = vec![builder.root()];
        for _ in 1..scope_depth {
            let last = *scopes.last().unwrap();
            scopes.push(builder.open_scope(last, ScopeKind::Member).unwrap());
        }
        let resolver = builder.finish();

        let scope = scopes[query_scope % scopes.len()];
        let group = fixture.groups[query_group % fixture.groups.len()];
        prop_assert_eq!(
            resolver.effective_severity(scope, group).unwrap(),
            policy.baseline(group)
        );
    }

    #[test]
    fn duplicate_attach_always_conflicts(
        group_depth in 1usize..5,
        scope_depth in 1usize..6,
        scope_idx in 0usize..16,
        group_idx in 0usize..16,
        first in severity_strategy(),
        second in severity_strategy(),
    ) {
        let fixture = Fixture::build(group_depth, scope_depth, &[], GlobalPolicy::new(), false);
        let mut builder = fixture.builder;
        let scope = fixture.scopes[scope_idx % fixture.scopes.len()];
        let group = fixture.groups[group_idx % fixture.groups.len()];

        builder.attach_override(scope, group, first, None).unwrap();
        let err = builder.attach_override(scope, group, second, None).unwrap_err();
        prop_assert_eq!(err, PolicyError::ConflictingDirective { scope, group });
    }

    #[test]
    fn innermost_exact_directive_wins(
        group_depth in 1usize..5,
        scope_depth in 2usize..6,
        raw in directives_strategy(),
        group_idx in 0usize..16,
        severity in severity_strategy(),
    ) {
        // Outer scopes get arbitrary directives; the innermost scope gets
        // exactly one, for the queried group.
        let mut fixture =
            Fixture::build(group_depth, scope_depth, &raw, GlobalPolicy::new(), true);
        let leaf = *fixture.scopes.last().unwrap();
        let group = fixture.groups[group_idx % fixture.groups.len()];
        fixture
            .builder
            .attach_override(leaf, group, severity, None)
            .unwrap();
        let resolver = fixture.builder.finish();

        prop_assert_eq!(resolver.effective_severity(leaf, group).unwrap(), severity);
    }

    #[test]
    fn resolution_is_idempotent(
        group_depth in 1usize..5,
        scope_depth in 1usize..6,
        raw in directives_strategy(),
        query_scope in 0usize..16,
        query_group in 0usize..16,
    ) {
        let fixture = Fixture::build(group_depth, scope_depth, &raw, GlobalPolicy::new(), false);
        let resolver = fixture.builder.clone().finish();

        let scope = fixture.scopes[query_scope % fixture.scopes.len()];
        let group = fixture.groups[query_group % fixture.groups.len()];
        let first = resolver.effective_severity(scope, group);
        let second = resolver.effective_severity(scope, group);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn suppression_only_yields_ignored_or_escalated_error(
        group_depth in 1usize..5,
        scope_depth in 1usize..6,
        raw in directives_strategy(),
        query_scope in 0usize..16,
        query_group in 0usize..16,
    ) {
        let policy = GlobalPolicy::new().with_suppress_all();
        let fixture = Fixture::build(group_depth, scope_depth, &raw, policy, false);
        let scope = fixture.scopes[query_scope % fixture.scopes.len()];
        let group = fixture.groups[query_group % fixture.groups.len()];
        let resolver = fixture.builder.clone().finish();

        let severity = resolver.effective_severity(scope, group).unwrap();
        if fixture.has_applicable(scope, group, Severity::Error) {
            prop_assert_eq!(severity, Severity::Error);
        } else {
            prop_assert_eq!(severity, Severity::Ignored);
        }
    }

    #[test]
    fn unknown_ids_fail_the_query(
        group_depth in 1usize..5,
        scope_depth in 1usize..6,
    ) {
        let fixture = Fixture::build(group_depth, scope_depth, &[], GlobalPolicy::new(), false);
        let resolver = fixture.builder.finish();

        #[expect(clippy::cast_possible_truncation, reason = "test-sized values")]
        let bogus_group = GroupId::new(fixture.registry_len as u32);
        #[expect(clippy::cast_possible_truncation, reason = "test-sized values")]
        let bogus_scope = ScopeId::new(fixture.scopes.len() as u32);

        prop_assert_eq!(
            resolver.effective_severity(fixture.scopes[0], bogus_group),
            Err(PolicyError::UnknownGroup { group: bogus_group })
        );
        prop_assert_eq!(
            resolver.effective_severity(bogus_scope, fixture.groups[0]),
            Err(PolicyError::UnknownScope { scope: bogus_scope })
        );
    }
}
