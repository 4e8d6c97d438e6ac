//! Utilities for *entities* in ECS.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Unique identifier of the *entity* of ECS.
    ///
    /// Identifiers are never reused: once an entity is despawned,
    /// its identifier stays expired forever.
    /// The null identifier (`Entity::default()`) never exists.
    pub struct Entity;
}

/// Storage for all entities of ECS.
pub type EntityStorage = SlotMap<Entity, ()>;
