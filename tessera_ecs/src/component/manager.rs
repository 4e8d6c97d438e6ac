//! Utilities for managing component storages.

use std::any::TypeId;
use std::collections::HashMap;

use super::{super::Entity, Component, ComponentSet, ComponentStorage, ErasedStorage};

/// Manager of all components of ECS.
#[derive(Default)]
#[repr(transparent)]
pub struct ComponentManager {
    storages: HashMap<TypeId, Box<dyn ErasedStorage>>,
}

impl ComponentManager {
    /// Creates new component manager.
    pub fn new() -> Self {
        Self {
            storages: HashMap::new(),
        }
    }

    /// Inserts component of type `T` and attaches it to the entity.
    /// If component was already attached, it will be replaced by value.
    ///
    /// Returns previously attached component, if any.
    ///
    pub fn insert<T>(&mut self, entity: Entity, component: T) -> Option<T>
    where
        T: Component,
    {
        self.storage_or_create::<T>().insert(entity, component)
    }

    /// Removes component of type `T` and detaches it from the entity.
    ///
    /// Returns component that was previously attached to the entity.
    ///
    pub fn remove<T>(&mut self, entity: Entity) -> Option<T>
    where
        T: Component,
    {
        self.storage_mut::<T>()?.remove(entity)
    }

    /// Detaches components of every type from the entity.
    pub fn remove_all(&mut self, entity: Entity) {
        for storage in self.storages.values_mut() {
            storage.detach(entity);
        }
    }

    /// Returns `true` if component of type `T` was already attached to the entity.
    pub fn attached<T>(&self, entity: Entity) -> bool
    where
        T: Component,
    {
        self.storage::<T>()
            .map(|storage| storage.attached(entity))
            .unwrap_or(false)
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    pub fn get<T>(&self, entity: Entity) -> Option<&T>
    where
        T: Component,
    {
        self.storage::<T>()?.get(entity)
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    pub fn get_mut<T>(&mut self, entity: Entity) -> Option<&mut T>
    where
        T: Component,
    {
        self.storage_mut::<T>()?.get_mut(entity)
    }

    /// Resolves the set of component types attached to the entity.
    pub fn types_of(&self, entity: Entity) -> ComponentSet {
        self.storages
            .iter()
            .filter(|(_, storage)| storage.attached(entity))
            .map(|(type_id, _)| *type_id)
            .collect()
    }

    /// Names of component types attached to the entity, for diagnostics.
    pub fn names_of(&self, entity: Entity) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .storages
            .values()
            .filter(|storage| storage.attached(entity))
            .map(|storage| storage.component_name())
            .collect();
        names.sort_unstable();
        names
    }

    /// Retrieves storage for components of type `T`, if it was ever created.
    pub fn storage<T>(&self) -> Option<&ComponentStorage<T>>
    where
        T: Component,
    {
        let boxed = self.storages.get(&TypeId::of::<T>())?;
        boxed.as_any().downcast_ref()
    }

    fn storage_mut<T>(&mut self) -> Option<&mut ComponentStorage<T>>
    where
        T: Component,
    {
        let boxed = self.storages.get_mut(&TypeId::of::<T>())?;
        boxed.as_any_mut().downcast_mut()
    }

    fn storage_or_create<T>(&mut self) -> &mut ComponentStorage<T>
    where
        T: Component,
    {
        self.storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentStorage::<T>::new()) as Box<dyn ErasedStorage>)
            .as_any_mut()
            .downcast_mut()
            .expect("storage registered under foreign type id")
    }
}
