//! Utilities for *components* in ECS.

use std::any::{Any, TypeId};
use std::collections::HashSet;

use slotmap::new_key_type;

pub use manager::*;
pub use signature::*;
pub use storage::*;

mod manager;
mod signature;
mod storage;

/// Objects of this trait represent *component* of ECS.
///
/// Components should be just plain data.
/// Handlers work on clones and commit them back explicitly,
/// so every component must be cheaply clonable.
///
pub trait Component: Any + Clone + Send + Sync {}

impl<T> Component for T where T: Any + Clone + Send + Sync {}

new_key_type! {
    /// Unique identifier of the *component* of ECS.
    struct ComponentID;
}

/// Set of component types attached to some entity.
pub type ComponentSet = HashSet<TypeId>;
