//! Core [`Component`] trait and type identity.
//!
//! Any `Send + Sync + 'static` value type can be attached to an entity; the
//! blanket impl means plain structs work without ceremony. Each distinct
//! component type is assigned a [`ComponentTypeId`] by the
//! [`Registry`](crate::Registry) the first time it is used there.

use serde::{Deserialize, Serialize};

/// Marker trait for anything that can be stored as a component.
///
/// Blanket-implemented for every `Send + Sync + 'static` type, so callers
/// never implement it by hand:
///
/// ```rust
/// use sparse_ecs::Registry;
///
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// let mut registry = Registry::new();
/// let e = registry.spawn();
/// registry.add_component(e, Health { current: 80.0, max: 100.0 });
/// ```
pub trait Component: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Component for T {}

/// A unique identifier for a component type within one
/// [`Registry`](crate::Registry).
///
/// IDs are allocated lazily from the registry's entity counter on first use
/// of a type, so they are stable for the registry's lifetime but **not**
/// stable across process runs or between independent registries. Two
/// registries may assign the same type different IDs; neither leaks state
/// into the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentTypeId(pub u64);

impl std::fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ComponentTypeId({})", self.0)
    }
}
