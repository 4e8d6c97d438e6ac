//! Utilities for component signatures of event handlers.

use std::any::{type_name, TypeId};

use crate::{Component, Entity, World};

/// Signature of the event handler in ECS.
///
/// Describes which component types an entity must carry for the handler
/// to be invoked, and fetches copies of them when it is.
///
pub trait Signature: Sized + 'static {
    /// Array of [TypeId]s which represents set of types in this signature.
    fn type_ids() -> Box<[TypeId]>;

    /// Clones components of this signature out of the world.
    ///
    /// # Errors
    ///
    /// Returns type name of the first component which is not attached to the entity.
    ///
    fn fetch(world: &World, entity: Entity) -> Result<Self, &'static str>;
}

impl Signature for () {
    fn type_ids() -> Box<[TypeId]> {
        Box::from([])
    }

    fn fetch(_world: &World, _entity: Entity) -> Result<Self, &'static str> {
        Ok(())
    }
}

// Generate implementations of Signature for tuples up to 8 elements.
macro_rules! impl_signature {
    ($($name:ident),+) => {
        impl<$($name),+> Signature for ($($name,)+)
        where
            $($name: Component,)+
        {
            fn type_ids() -> Box<[TypeId]> {
                Box::from([$(TypeId::of::<$name>()),+])
            }

            fn fetch(world: &World, entity: Entity) -> Result<Self, &'static str> {
                Ok(($(world
                    .component::<$name>(entity)
                    .ok_or_else(type_name::<$name>)?,)+))
            }
        }
    };
}

impl_signature!(A);
impl_signature!(A, B);
impl_signature!(A, B, C);
impl_signature!(A, B, C, D);
impl_signature!(A, B, C, D, E);
impl_signature!(A, B, C, D, E, F);
impl_signature!(A, B, C, D, E, F, G);
impl_signature!(A, B, C, D, E, F, G, H);
