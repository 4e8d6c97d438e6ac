//! Utilities for dispatch of events to entities.

use std::any::{type_name, TypeId};

pub use error::*;

use crate::handler::{HandlerContext, HandlerRegistry, HandlerResult, Priority};
use crate::{Entity, Event, Signature, World};

mod error;

/// Maximal nesting of events sent from inside of handlers.
pub const MAX_DISPATCH_DEPTH: usize = 64;

/// Routes events to the handlers whose component filter matches the target entity.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HandlerRegistry,
}

impl Dispatcher {
    /// Creates dispatcher without any handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry of all handlers of this dispatcher.
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Registers handler of event `E` for entities carrying every component of `C`.
    ///
    /// See [`HandlerRegistry::register`].
    ///
    pub fn register<E, C, F>(&mut self, name: &'static str, priority: Priority, handler: F)
    where
        E: Event,
        C: Signature,
        F: Fn(&mut E, &mut HandlerContext<'_>, C) -> HandlerResult + 'static,
    {
        self.handlers.register(name, priority, handler)
    }

    /// Dispatches event to the entity.
    ///
    /// Handlers are filtered against the component set the entity had
    /// when the dispatch started, and invoked in priority order until
    /// some handler consumes the event.
    /// Dispatch to an entity which does not exist does nothing.
    ///
    /// # Errors
    ///
    /// An error is returned if some handler failed;
    /// handlers after the failed one are not invoked.
    ///
    pub fn dispatch<E>(&self, world: &mut World, entity: Entity, event: &mut E) -> Result<(), DispatchError>
    where
        E: Event,
    {
        self.dispatch_nested(world, entity, event, 0)
    }

    /// Dispatches event to the entity and returns it back.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::dispatch`].
    ///
    pub fn send<E>(&self, world: &mut World, entity: Entity, mut event: E) -> Result<E, DispatchError>
    where
        E: Event,
    {
        self.dispatch(world, entity, &mut event)?;
        Ok(event)
    }

    /// Creates top level handler context bound to the entity,
    /// so logic written for handlers can also run from a system update.
    pub fn context<'a>(&'a self, world: &'a mut World, entity: Entity) -> HandlerContext<'a> {
        HandlerContext::new(world, self, entity, 0)
    }

    pub(crate) fn dispatch_nested<E>(
        &self,
        world: &mut World,
        entity: Entity,
        event: &mut E,
        depth: usize,
    ) -> Result<(), DispatchError>
    where
        E: Event,
    {
        if depth >= MAX_DISPATCH_DEPTH {
            return Err(DispatchError::TooDeep {
                event: type_name::<E>(),
                depth,
            });
        }
        if !world.exists(entity) {
            log::debug!(
                "skipping {} for nonexistent entity {:?}",
                type_name::<E>(),
                entity,
            );
            return Ok(());
        }
        let registrations = self.handlers.lookup(TypeId::of::<E>());
        if registrations.is_empty() {
            return Ok(());
        }

        let snapshot = world.component_types(entity);
        let mut context = HandlerContext::new(world, self, entity, depth);
        for registration in registrations {
            if !registration.matches(&snapshot) {
                continue;
            }
            if let Err(source) = registration.invoke(&mut *event, &mut context) {
                let error = DispatchError::Handler {
                    handler: registration.name(),
                    event: type_name::<E>(),
                    entity,
                    source,
                };
                if depth == 0 {
                    log::error!("{}", error);
                } else {
                    log::debug!("nested {}", error);
                }
                return Err(error);
            }
            if E::CONSUMABLE && event.is_consumed() {
                log::trace!(
                    "{} consumed by `{}`",
                    type_name::<E>(),
                    registration.name(),
                );
                break;
            }
        }
        Ok(())
    }
}
