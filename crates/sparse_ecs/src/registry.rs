//! The [`Registry`] — sole entry point for entity and component storage.
//!
//! A registry owns one [`SparseSet`] per distinct component type, created
//! lazily the first time a component of that type is added. Stores are held
//! behind the type-erased [`ErasedStore`] face so entity removal can fan out
//! uniformly; typed access recovers the concrete store through a checked
//! downcast.
//!
//! The registry is not internally synchronized. All mutation takes
//! `&mut self`, so iteration is statically exclusive with modification;
//! sharing a registry across threads requires external mutual exclusion.

use std::any::TypeId;
use std::collections::HashMap;

use tracing::trace;

use crate::component::{Component, ComponentTypeId};
use crate::entity::{Entity, EntityAllocator};
use crate::error::EcsError;
use crate::sparse_set::{DEFAULT_STORE_CAPACITY, ErasedStore, SparseSet};
use crate::view::ComponentSet;

/// Entity allocation plus per-type component storage.
pub struct Registry {
    /// Entity and component-type ID allocator.
    allocator: EntityAllocator,
    /// Maps each Rust type to the ID assigned on its first use here.
    type_ids: HashMap<TypeId, ComponentTypeId>,
    /// One type-erased sparse set per registered component type.
    stores: HashMap<ComponentTypeId, Box<dyn ErasedStore>>,
    /// Dense reservation applied to lazily created stores.
    store_capacity: usize,
}

impl Registry {
    /// Create an empty registry. Lazily created stores reserve
    /// [`DEFAULT_STORE_CAPACITY`] dense entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store_capacity(DEFAULT_STORE_CAPACITY)
    }

    /// Create an empty registry whose lazily created stores reserve
    /// `capacity` dense entries up front. The reservation is a hint — stores
    /// grow past it on demand.
    #[must_use]
    pub fn with_store_capacity(capacity: usize) -> Self {
        Self {
            allocator: EntityAllocator::new(),
            type_ids: HashMap::new(),
            stores: HashMap::new(),
            store_capacity: capacity,
        }
    }

    /// Allocate a fresh entity. IDs increase monotonically and are never
    /// reused, not even after [`despawn`](Self::despawn).
    pub fn spawn(&mut self) -> Entity {
        self.allocator.allocate()
    }

    /// Remove `entity` from every store in this registry.
    ///
    /// Safe for entities present in any subset of stores, including none —
    /// per-store erase is a no-op for absent entities. Cost is proportional
    /// to the number of distinct component types ever registered.
    pub fn despawn(&mut self, entity: Entity) {
        for store in self.stores.values_mut() {
            store.erase(entity);
        }
        trace!(%entity, stores = self.stores.len(), "despawned entity");
    }

    /// Returns the ID assigned to component type `T`, allocating one on
    /// first request.
    ///
    /// Component IDs are drawn from the same counter as entities, so they
    /// never collide with each other. They are stable for this registry's
    /// lifetime but differ between registries and across process runs.
    pub fn component_id<T: Component>(&mut self) -> ComponentTypeId {
        if let Some(&id) = self.type_ids.get(&TypeId::of::<T>()) {
            return id;
        }
        let id = ComponentTypeId(self.allocator.allocate().id());
        self.type_ids.insert(TypeId::of::<T>(), id);
        id
    }

    /// Attach `value` to `entity`, creating the store for `T` if this is the
    /// first `T` ever added.
    ///
    /// Insert overwrites: if `entity` already had a `T`, the old payload is
    /// replaced in place and returned.
    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> Option<T> {
        self.store_or_create::<T>().insert(entity, value)
    }

    /// Detach `T` from `entity`, returning the payload if one was present.
    ///
    /// A no-op returning `None` when the entity never had `T` — or when no
    /// store for `T` exists at all (no store is created just to erase from
    /// it).
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.store_mut::<T>()?.remove(entity)
    }

    /// Returns a reference to `entity`'s `T` payload.
    ///
    /// Fails loudly with a typed error rather than returning a default or
    /// stale value: [`EcsError::MissingStore`] when `T` was never added to
    /// any entity, [`EcsError::MissingComponent`] when this entity lacks it.
    pub fn get<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        let store = self.store::<T>().ok_or(EcsError::MissingStore {
            component: std::any::type_name::<T>(),
        })?;
        store.get(entity).ok_or(EcsError::MissingComponent {
            entity,
            component: std::any::type_name::<T>(),
        })
    }

    /// Returns a mutable reference to `entity`'s `T` payload.
    ///
    /// Same error contract as [`get`](Self::get).
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        let store = self.store_mut::<T>().ok_or(EcsError::MissingStore {
            component: std::any::type_name::<T>(),
        })?;
        store.get_mut(entity).ok_or(EcsError::MissingComponent {
            entity,
            component: std::any::type_name::<T>(),
        })
    }

    /// Returns `true` if `entity` currently has a `T` component. A missing
    /// store counts as absent, not as an error.
    #[must_use]
    pub fn contains<T: Component>(&self, entity: Entity) -> bool {
        self.store::<T>().is_some_and(|s| s.contains(entity))
    }

    /// Returns `true` if `entity` has **every** component in the tuple `S`,
    /// short-circuiting left to right.
    ///
    /// ```rust
    /// # use sparse_ecs::Registry;
    /// # struct Position(f32);
    /// # struct Velocity(f32);
    /// # let mut registry = Registry::new();
    /// # let e = registry.spawn();
    /// # registry.add_component(e, Position(0.0));
    /// # registry.add_component(e, Velocity(1.0));
    /// assert!(registry.contains_all::<(Position, Velocity)>(e));
    /// ```
    #[must_use]
    pub fn contains_all<S: ComponentSet>(&self, entity: Entity) -> bool {
        S::contains(self, entity)
    }

    /// Iterate all `(Entity, &T)` pairs in dense order. Empty if no `T` was
    /// ever added.
    pub fn each<T: Component>(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.store::<T>().into_iter().flat_map(|s| s.iter())
    }

    /// Iterate all `(Entity, &mut T)` pairs in dense order, for in-place
    /// mutation of a single store.
    pub fn each_mut<T: Component>(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.store_mut::<T>().into_iter().flat_map(|s| s.iter_mut())
    }

    /// Iterate every entity that has **all** components in the tuple `S`,
    /// yielding shared references to each payload.
    ///
    /// This is a semi-join: it walks the dense array of the *first* tuple
    /// element and filters by presence of the rest. Which type is listed
    /// first does not affect the result set, only the cost — list the
    /// rarest component first to minimize wasted membership checks. If the
    /// driving type was never populated, the view yields nothing.
    ///
    /// Mutation while a view is live is rejected by the borrow checker;
    /// collect the entities first or use [`each_mut`](Self::each_mut) /
    /// [`get_mut`](Self::get_mut) to write.
    pub fn view<S: ComponentSet>(&self) -> impl Iterator<Item = (Entity, S::Refs<'_>)> {
        S::driving_entities(self)
            .iter()
            .copied()
            .filter_map(move |entity| S::fetch(self, entity).map(|refs| (entity, refs)))
    }

    /// Returns the number of IDs issued so far (entities plus component
    /// types, which share the counter).
    #[must_use]
    pub fn entity_count(&self) -> u64 {
        self.allocator.count()
    }

    /// Returns the number of component stores created so far.
    #[must_use]
    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    /// Look up the store for `T`, if one was ever created.
    pub(crate) fn store<T: Component>(&self) -> Option<&SparseSet<T>> {
        let id = self.type_ids.get(&TypeId::of::<T>())?;
        self.stores.get(id)?.as_any().downcast_ref::<SparseSet<T>>()
    }

    /// Mutable variant of [`store`](Self::store).
    pub(crate) fn store_mut<T: Component>(&mut self) -> Option<&mut SparseSet<T>> {
        let id = self.type_ids.get(&TypeId::of::<T>())?;
        self.stores
            .get_mut(id)?
            .as_any_mut()
            .downcast_mut::<SparseSet<T>>()
    }

    /// Look up the store for `T`, creating it if missing.
    fn store_or_create<T: Component>(&mut self) -> &mut SparseSet<T> {
        let id = self.component_id::<T>();
        let capacity = self.store_capacity;
        let store = self.stores.entry(id).or_insert_with(|| {
            trace!(
                component = std::any::type_name::<T>(),
                %id,
                "created component store"
            );
            Box::new(SparseSet::<T>::with_capacity(capacity))
        });
        store
            .as_any_mut()
            .downcast_mut::<SparseSet<T>>()
            .expect("component type ID mapped to a store of another type")
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("allocator", &self.allocator)
            .field("stores", &self.stores.len())
            .field("store_capacity", &self.store_capacity)
            .finish()
    }
}
