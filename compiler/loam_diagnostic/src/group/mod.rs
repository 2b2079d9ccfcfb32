//! Warning-group identifiers and the group hierarchy.
//!
//! Groups form a forest: every group has at most one parent, and the parent
//! chain of any group is finite. Group names are interned to a compact
//! [`GroupId`] at registration so the hot resolution path compares `u32`s
//! instead of strings.

use std::fmt;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::RegistryError;

/// Index into the group registry.
///
/// - Memory: 4 bytes
/// - Equality: O(1) integer compare
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct GroupId(u32);

impl GroupId {
    /// Create a new `GroupId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        GroupId(index)
    }

    /// Get the index into the registry.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupId({})", self.0)
    }
}

/// A registered diagnostic group, borrowed from the registry.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct DiagnosticGroup<'a> {
    /// The group's interned id.
    pub id: GroupId,
    /// The group's unique name.
    pub name: &'a str,
    /// The parent group, if this group is a subgroup.
    pub parent: Option<GroupId>,
}

/// Owned per-group data inside the registry.
#[derive(Clone, Debug)]
struct GroupData {
    name: String,
    parent: Option<GroupId>,
}

/// Registry of diagnostic groups and their parent/subgroup relationships.
///
/// Built once during compiler configuration; read-only afterwards. Ids are
/// dense indices in registration order, so lookups by id are a `Vec` index
/// and lookups by name go through one `FxHashMap`.
#[derive(Clone, Debug, Default)]
pub struct GroupRegistry {
    groups: Vec<GroupData>,
    by_name: FxHashMap<String, GroupId>,
}

impl GroupRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        GroupRegistry::default()
    }

    /// Register a new group, optionally as a subgroup of `parent`.
    ///
    /// Fails with [`RegistryError::DuplicateGroup`] if `name` is taken and
    /// [`RegistryError::UnknownParent`] if `parent` was never registered.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        parent: Option<GroupId>,
    ) -> Result<GroupId, RegistryError> {
        let name = name.into();

        if self.by_name.contains_key(&name) {
            return Err(RegistryError::DuplicateGroup { name });
        }

        if let Some(parent) = parent {
            if !self.contains(parent) {
                return Err(RegistryError::UnknownParent { parent });
            }
            // The walk is bounded by the registry size; a chain that fails
            // to reach a root within that bound is corrupt.
            if !self.chain_terminates(parent) {
                return Err(RegistryError::InvalidHierarchy { name, parent });
            }
        }

        #[expect(clippy::cast_possible_truncation, reason = "group counts are tiny")]
        let id = GroupId::new(self.groups.len() as u32);
        self.groups.push(GroupData {
            name: name.clone(),
            parent,
        });
        self.by_name.insert(name, id);

        debug!(group = ?id, parent = ?parent, "registered diagnostic group");
        Ok(id)
    }

    /// Check whether `id` names a registered group.
    pub fn contains(&self, id: GroupId) -> bool {
        id.index() < self.groups.len()
    }

    /// Look up a group id by name.
    pub fn lookup(&self, name: &str) -> Option<GroupId> {
        self.by_name.get(name).copied()
    }

    /// Get the borrowed view of a registered group.
    pub fn get(&self, id: GroupId) -> Option<DiagnosticGroup<'_>> {
        self.groups.get(id.index()).map(|data| DiagnosticGroup {
            id,
            name: &data.name,
            parent: data.parent,
        })
    }

    /// Get a group's name.
    pub fn name(&self, id: GroupId) -> Option<&str> {
        self.groups.get(id.index()).map(|data| data.name.as_str())
    }

    /// Get a group's parent, if any.
    ///
    /// Returns `None` both for root groups and for unregistered ids; use
    /// [`GroupRegistry::contains`] to tell the two apart.
    pub fn parent(&self, id: GroupId) -> Option<GroupId> {
        self.groups.get(id.index()).and_then(|data| data.parent)
    }

    /// Iterate over the parent chain of `id`, nearest ancestor first.
    ///
    /// The group itself is not yielded.
    pub fn ancestors(&self, id: GroupId) -> Ancestors<'_> {
        Ancestors {
            registry: self,
            next: self.parent(id),
        }
    }

    /// Check whether `ancestor` is a strict ancestor of `group`.
    ///
    /// Not reflexive: a group is not a subgroup of itself.
    pub fn is_subgroup_of(&self, group: GroupId, ancestor: GroupId) -> bool {
        self.ancestors(group).any(|g| g == ancestor)
    }

    /// Number of registered groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Walk the parent chain from `start`, bounded by the registry size.
    fn chain_terminates(&self, start: GroupId) -> bool {
        let mut current = Some(start);
        for _ in 0..=self.groups.len() {
            match current {
                None => return true,
                Some(id) => current = self.parent(id),
            }
        }
        false
    }
}

/// Iterator over a group's parent chain, nearest ancestor first.
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    registry: &'a GroupRegistry,
    next: Option<GroupId>,
}

impl Iterator for Ancestors<'_> {
    type Item = GroupId;

    fn next(&mut self) -> Option<GroupId> {
        let id = self.next?;
        self.next = self.registry.parent(id);
        Some(id)
    }
}
