//! Context passed to every event handler invocation.

use std::any::type_name;

use crate::dispatch::{DispatchError, Dispatcher, HandlerError};
use crate::{Component, Entity, Event, World};

/// Access to the world and the dispatcher from inside of the event handler.
///
/// The context is bound to the *target* entity of the current dispatch.
/// Events sent through the context are dispatched synchronously,
/// before the sending handler continues.
///
pub struct HandlerContext<'a> {
    world: &'a mut World,
    dispatcher: &'a Dispatcher,
    entity: Entity,
    depth: usize,
}

impl<'a> HandlerContext<'a> {
    pub(crate) fn new(
        world: &'a mut World,
        dispatcher: &'a Dispatcher,
        entity: Entity,
        depth: usize,
    ) -> Self {
        Self {
            world,
            dispatcher,
            entity,
            depth,
        }
    }

    /// Target entity of the current dispatch.
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Nesting level of the current dispatch, zero for top level dispatch.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn world(&self) -> &World {
        &*self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut *self.world
    }

    pub fn dispatcher(&self) -> &'a Dispatcher {
        self.dispatcher
    }

    /// Splits context into the world and the dispatcher,
    /// e.g. to run logic shared with a system update.
    pub fn parts(&mut self) -> (&mut World, &'a Dispatcher) {
        (&mut *self.world, self.dispatcher)
    }

    /// Retrieves a copy of the component of the target entity.
    ///
    /// # Errors
    ///
    /// An error is returned if the component is not attached.
    ///
    pub fn component<T>(&self) -> Result<T, HandlerError>
    where
        T: Component,
    {
        self.component_of(self.entity)
    }

    /// Retrieves a copy of the component of any entity.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity does not exist
    /// or the component is not attached.
    ///
    pub fn component_of<T>(&self, entity: Entity) -> Result<T, HandlerError>
    where
        T: Component,
    {
        self.world
            .component(entity)
            .ok_or_else(|| HandlerError::MissingComponent {
                entity,
                component: type_name::<T>(),
            })
    }

    /// Commits a modified component copy back to the target entity.
    pub fn save<T>(&mut self, component: T)
    where
        T: Component,
    {
        self.world.save(self.entity, component)
    }

    /// Commits a modified component copy back to any entity.
    pub fn save_to<T>(&mut self, entity: Entity, component: T)
    where
        T: Component,
    {
        self.world.save(entity, component)
    }

    /// Retrieves resource of type `R`.
    ///
    /// # Errors
    ///
    /// An error is returned if the resource was never inserted.
    ///
    pub fn resource<R>(&self) -> Result<&R, HandlerError>
    where
        R: 'static,
    {
        self.world
            .resource()
            .ok_or_else(HandlerError::missing_resource::<R>)
    }

    /// Retrieves resource of type `R` for modification.
    ///
    /// # Errors
    ///
    /// An error is returned if the resource was never inserted.
    ///
    pub fn resource_mut<R>(&mut self) -> Result<&mut R, HandlerError>
    where
        R: 'static,
    {
        self.world
            .resource_mut()
            .ok_or_else(HandlerError::missing_resource::<R>)
    }

    /// Dispatches event to the entity immediately.
    ///
    /// Returns the event after all handlers have seen it,
    /// so the caller can check whether it was consumed.
    ///
    /// # Errors
    ///
    /// An error is returned if some handler of the nested dispatch failed.
    ///
    pub fn send<E>(&mut self, entity: Entity, mut event: E) -> Result<E, DispatchError>
    where
        E: Event,
    {
        self.dispatcher
            .dispatch_nested(&mut *self.world, entity, &mut event, self.depth + 1)?;
        Ok(event)
    }
}
