//! Lexical scope tree.
//!
//! Scopes form a single tree rooted at the module scope, stored flat as a
//! `Vec` indexed by [`ScopeId`]. Children always attach to an existing
//! scope, so the tree is acyclic by construction and every ancestor chain
//! is finite.

use std::fmt;

use crate::PolicyError;

/// Index into the scope tree.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The root (module) scope of every tree.
    pub const ROOT: ScopeId = ScopeId(0);

    /// Create a new `ScopeId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        ScopeId(index)
    }

    /// Get the index into the tree.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeId({})", self.0)
    }
}

/// What kind of declaration opened a scope.
///
/// Descriptive only: resolution never branches on the kind, it exists so
/// trace output and tests read like the module → type → member nesting the
/// front end produces.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScopeKind {
    /// The module scope (always the root).
    Module,
    /// A type declaration.
    Type,
    /// A member declaration (function, property, nested member).
    Member,
}

#[derive(Copy, Clone, Debug)]
struct ScopeData {
    parent: Option<ScopeId>,
    kind: ScopeKind,
}

/// Tree of lexical scopes, rooted at the module scope.
#[derive(Clone, Debug)]
pub struct ScopeTree {
    scopes: Vec<ScopeData>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    /// Create a tree containing only the root module scope.
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![ScopeData {
                parent: None,
                kind: ScopeKind::Module,
            }],
        }
    }

    /// The root (module) scope.
    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    /// Create a new scope nested inside `parent`.
    pub fn child(&mut self, parent: ScopeId, kind: ScopeKind) -> Result<ScopeId, PolicyError> {
        if !self.contains(parent) {
            return Err(PolicyError::UnknownScope { scope: parent });
        }
        #[expect(clippy::cast_possible_truncation, reason = "scope counts are small")]
        let id = ScopeId::new(self.scopes.len() as u32);
        self.scopes.push(ScopeData {
            parent: Some(parent),
            kind,
        });
        Ok(id)
    }

    /// Check whether `id` names a scope in this tree.
    pub fn contains(&self, id: ScopeId) -> bool {
        id.index() < self.scopes.len()
    }

    /// Get a scope's parent (`None` for the root and for unknown ids).
    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.scopes.get(id.index()).and_then(|data| data.parent)
    }

    /// Get the kind of declaration that opened a scope.
    pub fn kind(&self, id: ScopeId) -> Option<ScopeKind> {
        self.scopes.get(id.index()).map(|data| data.kind)
    }

    /// Iterate from `scope` up to the root, inclusive, innermost first.
    ///
    /// Yields nothing for an unknown id.
    pub fn ancestor_chain(&self, scope: ScopeId) -> AncestorChain<'_> {
        AncestorChain {
            tree: self,
            next: self.contains(scope).then_some(scope),
        }
    }

    /// Number of scopes in the tree.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// A scope tree is never empty: it always holds the root.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Iterator from a scope up to the root, inclusive.
#[derive(Clone, Debug)]
pub struct AncestorChain<'a> {
    tree: &'a ScopeTree,
    next: Option<ScopeId>,
}

impl Iterator for AncestorChain<'_> {
    type Item = ScopeId;

    fn next(&mut self) -> Option<ScopeId> {
        let id = self.next?;
        self.next = self.tree.parent(id);
        Some(id)
    }
}
