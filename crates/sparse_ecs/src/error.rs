//! Storage-layer error types.

use crate::entity::Entity;

/// Errors surfaced by direct component access on a
/// [`Registry`](crate::Registry).
///
/// Queries (`view`, `contains_all`, `each`) treat a missing store as "no
/// matches"; only value access ([`Registry::get`](crate::Registry::get) and
/// [`Registry::get_mut`](crate::Registry::get_mut)) fails loudly, since a
/// caller asking for a specific payload that is not there is a logic error
/// worth distinguishing from an empty query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EcsError {
    /// No store exists for the component type — it was never added to any
    /// entity in this registry.
    #[error("no store for component type `{component}`")]
    MissingStore {
        /// The component's Rust type name.
        component: &'static str,
    },

    /// The store exists but the entity has no entry in it.
    #[error("{entity} has no `{component}` component")]
    MissingComponent {
        /// The entity that was queried.
        entity: Entity,
        /// The component's Rust type name.
        component: &'static str,
    },
}
