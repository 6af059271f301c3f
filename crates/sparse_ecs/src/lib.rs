//! # sparse_ecs
//!
//! A sparse-set Entity-Component-System storage core: typed data
//! ("components") keyed by lightweight integer identifiers ("entities"),
//! with O(1) insert/remove/lookup and gap-free linear iteration.
//!
//! This crate provides:
//!
//! - [`Entity`] — lightweight `u64` entity identifiers.
//! - [`EntityAllocator`] — monotonically increasing ID allocator.
//! - [`Component`] — blanket trait satisfied by any `Send + Sync + 'static`
//!   value type.
//! - [`SparseSet`] — two-array storage with swap-remove erasure.
//! - [`Registry`] — per-type stores, component CRUD, and iteration.
//! - [`ComponentSet`] — tuples of component types for conjunction queries.
//!
//! ## Example
//!
//! ```rust
//! use sparse_ecs::Registry;
//!
//! struct Position { x: f32, y: f32 }
//! struct Velocity { dx: f32, dy: f32 }
//!
//! let mut registry = Registry::new();
//! let e = registry.spawn();
//! registry.add_component(e, Position { x: 0.0, y: 0.0 });
//! registry.add_component(e, Velocity { dx: 1.0, dy: 0.0 });
//!
//! for (entity, (pos, vel)) in registry.view::<(Position, Velocity)>() {
//!     println!("{entity}: ({}, {}) moving ({}, {})", pos.x, pos.y, vel.dx, vel.dy);
//! }
//! ```
//!
//! The registry is single-threaded by construction: every mutation takes
//! `&mut self`, so views and iteration are statically exclusive with
//! modification. Share it across threads only behind external locking.

pub mod component;
pub mod entity;
pub mod error;
pub mod registry;
pub mod sparse_set;
pub mod view;

pub use component::{Component, ComponentTypeId};
pub use entity::{Entity, EntityAllocator};
pub use error::EcsError;
pub use registry::Registry;
pub use sparse_set::{DEFAULT_STORE_CAPACITY, SparseSet};
pub use view::ComponentSet;
