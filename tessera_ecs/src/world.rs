//! Utilities for storage of ECS.

use std::any::type_name;

use anymap2::AnyMap;

use super::{Component, ComponentManager, ComponentSet, ComponentStorage, Entity, EntityStorage};

/// Storage for entities, components and resources of ECS.
///
/// Operations on entities which do not exist never fail:
/// reads return nothing and writes are ignored.
/// Use [`World::exists`] to check entity validity first.
///
pub struct World {
    /// Storage for all entities.
    entities: EntityStorage,
    /// Map with typeid of components and their storages.
    component_manager: ComponentManager,
    /// Singletons owned by the world: system state, collaborators, configuration.
    resources: AnyMap,
}

impl World {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self {
            entities: EntityStorage::with_key(),
            component_manager: ComponentManager::new(),
            resources: AnyMap::new(),
        }
    }

    /// Creates new entity without any components.
    pub fn spawn(&mut self) -> Entity {
        let entity = self.entities.insert(());
        log::trace!("spawned entity {:?}", entity);
        entity
    }

    /// Destroys the entity and detaches all of its components.
    ///
    /// Returns `false` if the entity did not exist.
    ///
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }
        self.component_manager.remove_all(entity);
        log::trace!("despawned entity {:?}", entity);
        true
    }

    /// Returns `true` if the entity exists in this world.
    pub fn exists(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Returns iterator over all existing entities.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }

    /// Number of existing entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if there are no entities in this world.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Attaches component to the entity, replacing the previous one.
    ///
    /// Returns previously attached component, if any.
    /// Does nothing if the entity does not exist.
    ///
    pub fn insert<T>(&mut self, entity: Entity, component: T) -> Option<T>
    where
        T: Component,
    {
        if !self.exists(entity) {
            log::debug!(
                "ignoring {} for nonexistent entity {:?}",
                type_name::<T>(),
                entity,
            );
            return None;
        }
        self.component_manager.insert(entity, component)
    }

    /// Commits a modified copy of the component back to the entity.
    pub fn save<T>(&mut self, entity: Entity, component: T)
    where
        T: Component,
    {
        self.insert(entity, component);
    }

    /// Detaches component of type `T` from the entity.
    pub fn remove<T>(&mut self, entity: Entity) -> Option<T>
    where
        T: Component,
    {
        self.component_manager.remove(entity)
    }

    /// Returns `true` if component of type `T` is attached to the entity.
    pub fn has<T>(&self, entity: Entity) -> bool
    where
        T: Component,
    {
        self.component_manager.attached::<T>(entity)
    }

    /// Retrieves an immutable reference to component attached to the entity.
    pub fn get<T>(&self, entity: Entity) -> Option<&T>
    where
        T: Component,
    {
        self.component_manager.get(entity)
    }

    /// Retrieves a mutable reference to component attached to the entity.
    pub fn get_mut<T>(&mut self, entity: Entity) -> Option<&mut T>
    where
        T: Component,
    {
        self.component_manager.get_mut(entity)
    }

    /// Retrieves a copy of component attached to the entity.
    ///
    /// Changes made to the copy are visible only after [`World::save`].
    ///
    pub fn component<T>(&self, entity: Entity) -> Option<T>
    where
        T: Component,
    {
        self.get(entity).cloned()
    }

    /// Resolves the set of component types currently attached to the entity.
    pub fn component_types(&self, entity: Entity) -> ComponentSet {
        self.component_manager.types_of(entity)
    }

    /// Names of component types attached to the entity, for diagnostics.
    pub fn component_names(&self, entity: Entity) -> Vec<&'static str> {
        self.component_manager.names_of(entity)
    }

    /// Returns iterator over all components of type `T` with their entities.
    pub fn iter<T>(&self) -> impl Iterator<Item = (Entity, &T)>
    where
        T: Component,
    {
        self.component_manager
            .storage::<T>()
            .into_iter()
            .flat_map(ComponentStorage::iter)
    }

    /// Inserts resource into the world, replacing the previous one of the same type.
    pub fn insert_resource<R>(&mut self, resource: R) -> Option<R>
    where
        R: 'static,
    {
        self.resources.insert(resource)
    }

    /// Removes resource of type `R` from the world.
    pub fn remove_resource<R>(&mut self) -> Option<R>
    where
        R: 'static,
    {
        self.resources.remove::<R>()
    }

    /// Retrieves an immutable reference to resource of type `R`.
    pub fn resource<R>(&self) -> Option<&R>
    where
        R: 'static,
    {
        self.resources.get::<R>()
    }

    /// Retrieves a mutable reference to resource of type `R`.
    pub fn resource_mut<R>(&mut self) -> Option<&mut R>
    where
        R: 'static,
    {
        self.resources.get_mut::<R>()
    }

    /// Returns `true` if resource of type `R` is present.
    pub fn contains_resource<R>(&self) -> bool
    where
        R: 'static,
    {
        self.resources.contains::<R>()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
