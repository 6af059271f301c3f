//! Sparse-set storage for a single component type.
//!
//! A [`SparseSet`] maps entity IDs to payloads through two arrays:
//!
//! - `sparse[entity_id]` → slot in `dense`, or [`ABSENT`](usize::MAX)
//! - `dense` → payloads packed contiguously, cache-friendly to iterate
//! - `entities` → the entity owning each dense slot, kept in parallel
//!
//! Insert, remove, and lookup are O(1). Removal is swap-remove: the last
//! dense slot overwrites the vacated one, so the dense array stays gap-free
//! at the cost of reordering. Iteration order is therefore insertion/swap
//! order and changes across removals.
//!
//! The sparse vector grows on demand to the highest inserted entity ID, so
//! there is no hard ceiling on IDs — only memory proportional to the
//! largest one used with this store.

use std::any::Any;

use crate::component::Component;
use crate::entity::Entity;

/// Sentinel marking an empty sparse slot.
const ABSENT: usize = usize::MAX;

/// Dense pre-reservation used for stores created lazily by a
/// [`Registry`](crate::Registry), unless overridden with
/// [`Registry::with_store_capacity`](crate::Registry::with_store_capacity).
pub const DEFAULT_STORE_CAPACITY: usize = 8192;

/// A sparse set of components of type `T`, keyed by [`Entity`].
#[derive(Debug)]
pub struct SparseSet<T> {
    /// Entity index → dense slot, or [`ABSENT`].
    sparse: Vec<usize>,
    /// Entity owning each dense slot. Always the same length as `dense`.
    entities: Vec<Entity>,
    /// Packed payloads.
    dense: Vec<T>,
}

impl<T> SparseSet<T> {
    /// Create an empty set with no reserved memory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sparse: Vec::new(),
            entities: Vec::new(),
            dense: Vec::new(),
        }
    }

    /// Create an empty set with dense storage reserved for `capacity`
    /// entries. This is a reservation hint, not a ceiling.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sparse: Vec::new(),
            entities: Vec::with_capacity(capacity),
            dense: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Returns `true` if no entity holds a component in this set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Insert `value` for `entity`, or replace an existing entry.
    ///
    /// Returns the previous payload when `entity` was already present.
    /// Overwriting in place keeps exactly one dense slot per entity, so a
    /// repeated insert can never orphan a slot or alias another entity.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        let index = entity.index();
        if index >= self.sparse.len() {
            self.sparse.resize(index + 1, ABSENT);
        }
        let slot = self.sparse[index];
        if slot != ABSENT {
            debug_assert_eq!(self.entities[slot], entity);
            return Some(std::mem::replace(&mut self.dense[slot], value));
        }
        self.sparse[index] = self.dense.len();
        self.entities.push(entity);
        self.dense.push(value);
        None
    }

    /// Remove the entry for `entity`, returning its payload.
    ///
    /// Swap-remove: the last dense slot is moved into the vacated position
    /// and its sparse entry retargeted. Idempotent — removing an absent
    /// entity returns `None` and changes nothing.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let index = entity.index();
        let slot = *self.sparse.get(index)?;
        if slot == ABSENT || self.entities[slot] != entity {
            return None;
        }
        self.sparse[index] = ABSENT;
        let value = self.dense.swap_remove(slot);
        self.entities.swap_remove(slot);
        if slot < self.entities.len() {
            let moved = self.entities[slot];
            self.sparse[moved.index()] = slot;
        }
        Some(value)
    }

    /// Returns `true` if `entity` has an entry in this set.
    ///
    /// Checks both the sparse slot and the dense back-pointer, so a stale
    /// sparse entry can never report a false positive.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        match self.sparse.get(entity.index()) {
            Some(&slot) => slot != ABSENT && self.entities[slot] == entity,
            None => false,
        }
    }

    /// Returns a reference to the payload for `entity`, if present.
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        let slot = *self.sparse.get(entity.index())?;
        if slot == ABSENT || self.entities[slot] != entity {
            return None;
        }
        Some(&self.dense[slot])
    }

    /// Returns a mutable reference to the payload for `entity`, if present.
    #[must_use]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let slot = *self.sparse.get(entity.index())?;
        if slot == ABSENT || self.entities[slot] != entity {
            return None;
        }
        Some(&mut self.dense[slot])
    }

    /// The entities currently in this set, in dense order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterate `(Entity, &T)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.dense.iter())
    }

    /// Iterate `(Entity, &mut T)` pairs in dense order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.dense.iter_mut())
    }
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The narrow, payload-type-free face of a [`SparseSet`].
///
/// The [`Registry`](crate::Registry) owns one store per component type
/// behind this trait so it can fan entity removal out across heterogeneous
/// stores. Typed access goes back through a checked [`Any`] downcast.
pub(crate) trait ErasedStore: Send + Sync {
    /// Remove `entity`'s entry if present. No-op otherwise.
    fn erase(&mut self, entity: Entity);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStore for SparseSet<T> {
    fn erase(&mut self, entity: Entity) {
        self.remove(entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(id: u64) -> Entity {
        Entity::from_raw(id)
    }

    #[test]
    fn test_insert_then_get_roundtrip() {
        let mut set = SparseSet::new();
        set.insert(e(7), "hello");
        assert!(set.contains(e(7)));
        assert_eq!(set.get(e(7)), Some(&"hello"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_insert_overwrites_and_returns_old_value() {
        let mut set = SparseSet::new();
        assert_eq!(set.insert(e(1), 10), None);
        assert_eq!(set.insert(e(1), 20), Some(10));
        // Still exactly one dense slot.
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(e(1)), Some(&20));
    }

    #[test]
    fn test_remove_returns_payload() {
        let mut set = SparseSet::new();
        set.insert(e(3), 30);
        assert_eq!(set.remove(e(3)), Some(30));
        assert!(!set.contains(e(3)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_absent_is_idempotent() {
        let mut set = SparseSet::new();
        set.insert(e(1), 1);
        set.insert(e(2), 2);
        assert_eq!(set.remove(e(5)), None);
        assert_eq!(set.remove(e(2)), Some(2));
        assert_eq!(set.remove(e(2)), None);
        // Survivor untouched.
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(e(1)), Some(&1));
    }

    #[test]
    fn test_swap_remove_preserves_other_payloads() {
        let mut set = SparseSet::new();
        set.insert(e(1), "a");
        set.insert(e(2), "b");
        set.insert(e(3), "c");
        // Removing the middle entry moves the last one into its slot.
        assert_eq!(set.remove(e(2)), Some("b"));
        assert!(set.contains(e(1)));
        assert!(!set.contains(e(2)));
        assert!(set.contains(e(3)));
        assert_eq!(set.get(e(1)), Some(&"a"));
        assert_eq!(set.get(e(3)), Some(&"c"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_remove_last_slot_needs_no_retarget() {
        let mut set = SparseSet::new();
        set.insert(e(1), 1);
        set.insert(e(2), 2);
        assert_eq!(set.remove(e(2)), Some(2));
        assert_eq!(set.get(e(1)), Some(&1));
    }

    #[test]
    fn test_sparse_grows_to_large_ids() {
        let mut set = SparseSet::new();
        set.insert(e(100_000), 42);
        assert!(set.contains(e(100_000)));
        assert_eq!(set.get(e(100_000)), Some(&42));
        assert!(!set.contains(e(99_999)));
    }

    #[test]
    fn test_contains_out_of_sparse_range_is_false() {
        let set: SparseSet<u32> = SparseSet::new();
        assert!(!set.contains(e(12345)));
        assert_eq!(set.get(e(12345)), None);
    }

    #[test]
    fn test_iter_visits_exactly_live_entries() {
        let mut set = SparseSet::new();
        set.insert(e(1), 10);
        set.insert(e(2), 20);
        set.insert(e(3), 30);
        set.remove(e(1));

        let mut pairs: Vec<_> = set.iter().map(|(en, v)| (en.id(), *v)).collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(2, 20), (3, 30)]);
    }

    #[test]
    fn test_iter_mut_updates_in_place() {
        let mut set = SparseSet::new();
        set.insert(e(1), 1);
        set.insert(e(2), 2);
        for (_, v) in set.iter_mut() {
            *v *= 10;
        }
        assert_eq!(set.get(e(1)), Some(&10));
        assert_eq!(set.get(e(2)), Some(&20));
    }

    #[test]
    fn test_invariant_holds_across_mixed_operations() {
        let mut set = SparseSet::new();
        for id in 1..=50u64 {
            set.insert(e(id), id * 2);
        }
        for id in (1..=50u64).step_by(3) {
            set.remove(e(id));
        }
        for id in (1..=50u64).step_by(5) {
            set.insert(e(id), id * 7);
        }

        // Dense back-pointers agree with membership, and len matches the
        // number of entities reporting present.
        let mut live = 0;
        for id in 1..=50u64 {
            if set.contains(e(id)) {
                live += 1;
                let (found, _) = set.iter().find(|(en, _)| *en == e(id)).unwrap();
                assert_eq!(found, e(id));
            }
        }
        assert_eq!(set.len(), live);
    }

    #[test]
    fn test_with_capacity_starts_empty() {
        let set: SparseSet<u8> = SparseSet::with_capacity(DEFAULT_STORE_CAPACITY);
        assert!(set.is_empty());
        assert_eq!(set.entities(), &[]);
    }
}
