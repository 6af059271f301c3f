//! Multi-component conjunction queries.
//!
//! A [`ComponentSet`] is a tuple of component types — `(Position,)`,
//! `(Position, Velocity)`, and so on up to eight elements. It backs
//! [`Registry::contains_all`](crate::Registry::contains_all) and
//! [`Registry::view`](crate::Registry::view): presence is the
//! short-circuiting AND over every element's store, and views drive
//! iteration off the first element's dense array.

use crate::component::Component;
use crate::entity::Entity;
use crate::registry::Registry;
use crate::sparse_set::SparseSet;

/// A non-empty tuple of component types queried together.
///
/// Implemented for tuples of arity 1 through 8. The first element is the
/// *driving* type of a view: its dense entity list is walked and the rest
/// act as filters, so ordering is a performance knob, never a correctness
/// one.
pub trait ComponentSet {
    /// Shared references to each component in the tuple, in order.
    type Refs<'a>;

    /// `true` if `entity` is present in every element's store. Missing
    /// stores make this `false`, never an error.
    fn contains(registry: &Registry, entity: Entity) -> bool;

    /// All payload references for `entity`, or `None` if any element's
    /// store or entry is missing.
    fn fetch(registry: &Registry, entity: Entity) -> Option<Self::Refs<'_>>;

    /// Dense entity list of the first element's store; empty if that store
    /// was never created.
    fn driving_entities(registry: &Registry) -> &[Entity];
}

macro_rules! impl_component_set {
    ($head:ident $(, $tail:ident)*) => {
        impl<$head: Component $(, $tail: Component)*> ComponentSet for ($head, $($tail,)*) {
            type Refs<'a> = (&'a $head, $(&'a $tail,)*);

            fn contains(registry: &Registry, entity: Entity) -> bool {
                registry.store::<$head>().is_some_and(|s| s.contains(entity))
                    $(&& registry.store::<$tail>().is_some_and(|s| s.contains(entity)))*
            }

            fn fetch(registry: &Registry, entity: Entity) -> Option<Self::Refs<'_>> {
                Some((
                    registry.store::<$head>()?.get(entity)?,
                    $(registry.store::<$tail>()?.get(entity)?,)*
                ))
            }

            fn driving_entities(registry: &Registry) -> &[Entity] {
                registry.store::<$head>().map_or(&[], SparseSet::entities)
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);
