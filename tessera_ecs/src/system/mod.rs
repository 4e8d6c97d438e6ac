//! Utilities for *systems* in ECS.
//!
//! A system may update every tick, render in some render phases and handle events,
//! in any combination. Capabilities are queried through [`System::as_update`]
//! and [`System::as_render`]; event handling is set up in [`System::initialize`].

use std::any::type_name;
use std::collections::VecDeque;

pub use error::*;

use crate::dispatch::{DispatchError, Dispatcher};
use crate::{Entity, Event, World};

mod error;

/// Objects of this trait represent *system* of ECS.
pub trait System: 'static {
    /// Name of the system, used in diagnostics.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// Registers event handlers and inserts resources this system relies on.
    ///
    /// Called once when the system is added to the [`Scheduler`].
    ///
    fn initialize(&mut self, _world: &mut World, _dispatcher: &mut Dispatcher) -> Result<(), SystemError> {
        Ok(())
    }

    /// Releases resources of this system. Called once on scheduler shutdown.
    fn shutdown(&mut self, _world: &mut World) {}

    /// Returns this system as update capable one, if it is.
    fn as_update(&mut self) -> Option<&mut dyn UpdateSystem> {
        None
    }

    /// Returns this system as render capable one, if it is.
    fn as_render(&mut self) -> Option<&mut dyn RenderSystem> {
        None
    }
}

/// System which is updated every tick.
pub trait UpdateSystem {
    /// Advances state of the system by `delta` seconds.
    fn update(&mut self, world: &mut World, dispatcher: &Dispatcher, delta: f32) -> Result<(), SystemError>;
}

/// System which takes part in rendering of the frame.
///
/// Every method corresponds to one of [`RenderPhase`]s.
///
pub trait RenderSystem {
    fn render_opaque(&mut self, _world: &World) {}

    fn render_alpha_blend(&mut self, _world: &World) {}

    fn render_overlay(&mut self, _world: &World) {}

    fn render_shadows(&mut self, _world: &World) {}

    fn render_first_person(&mut self, _world: &World) {}
}

/// Phase of the frame rendering.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RenderPhase {
    Opaque,
    AlphaBlend,
    Overlay,
    Shadows,
    FirstPerson,
}

impl RenderPhase {
    /// All render phases in order of their execution.
    pub const ORDER: [RenderPhase; 5] = [
        RenderPhase::Opaque,
        RenderPhase::AlphaBlend,
        RenderPhase::Overlay,
        RenderPhase::Shadows,
        RenderPhase::FirstPerson,
    ];

    fn run(self, system: &mut dyn RenderSystem, world: &World) {
        match self {
            RenderPhase::Opaque => system.render_opaque(world),
            RenderPhase::AlphaBlend => system.render_alpha_blend(world),
            RenderPhase::Overlay => system.render_overlay(world),
            RenderPhase::Shadows => system.render_shadows(world),
            RenderPhase::FirstPerson => system.render_first_person(world),
        }
    }
}

type PendingEvent = Box<dyn FnOnce(&Dispatcher, &mut World) -> Result<(), DispatchError>>;

/// Owner of all systems and the dispatcher of their event handlers.
///
/// Each tick runs strictly in sequence: queued events are dispatched,
/// then update capable systems are updated in registration order,
/// then every render phase runs across render capable systems.
/// Failure of one dispatch or one system update is logged
/// and does not stop the rest of the tick.
///
#[derive(Default)]
pub struct Scheduler {
    dispatcher: Dispatcher,
    systems: Vec<Box<dyn System>>,
    pending: VecDeque<PendingEvent>,
    ticks: u64,
}

impl Scheduler {
    /// Creates scheduler without any systems.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initializes the system and appends it to the schedule.
    ///
    /// # Errors
    ///
    /// An error is returned if initialization of the system failed;
    /// such system is not added.
    ///
    pub fn register<S>(&mut self, world: &mut World, mut system: S) -> Result<(), SystemError>
    where
        S: System,
    {
        system.initialize(world, &mut self.dispatcher)?;
        log::debug!("registered system {}", system.name());
        self.systems.push(Box::new(system));
        Ok(())
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    /// Names of all systems in registration order.
    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|system| system.name()).collect()
    }

    /// Number of registered systems.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns `true` if there are no registered systems.
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Number of ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Dispatches event to the entity immediately and returns it back.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::dispatch`].
    ///
    pub fn send<E>(&self, world: &mut World, entity: Entity, event: E) -> Result<E, DispatchError>
    where
        E: Event,
    {
        self.dispatcher.send(world, entity, event)
    }

    /// Queues event to be dispatched at the beginning of the next tick.
    pub fn post<E>(&mut self, entity: Entity, event: E)
    where
        E: Event,
    {
        self.pending.push_back(Box::new(move |dispatcher: &Dispatcher, world: &mut World| {
            let mut event = event;
            dispatcher.dispatch(world, entity, &mut event)
        }));
    }

    /// Number of events waiting for the next tick.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Dispatches all queued events, each one independently.
    ///
    /// Returns number of dispatches that failed.
    ///
    pub fn process_events(&mut self, world: &mut World) -> usize {
        let mut failed = 0;
        while let Some(pending) = self.pending.pop_front() {
            if pending(&self.dispatcher, world).is_err() {
                failed += 1;
            }
        }
        if failed > 0 {
            log::warn!("{} event dispatches failed during tick {}", failed, self.ticks);
        }
        failed
    }

    /// Updates every update capable system in registration order.
    pub fn update(&mut self, world: &mut World, delta: f32) {
        for system in &mut self.systems {
            let name = system.name();
            if let Some(system) = system.as_update() {
                if let Err(error) = system.update(world, &self.dispatcher, delta) {
                    log::error!("update of system {} failed: {}", name, error);
                }
            }
        }
    }

    /// Runs every render phase in order across render capable systems.
    pub fn render(&mut self, world: &World) {
        for phase in RenderPhase::ORDER {
            for system in &mut self.systems {
                if let Some(system) = system.as_render() {
                    phase.run(system, world);
                }
            }
        }
    }

    /// Runs one full tick: queued events, updates, render phases.
    pub fn tick(&mut self, world: &mut World, delta: f32) {
        self.process_events(world);
        self.update(world, delta);
        self.render(world);
        self.ticks += 1;
    }

    /// Shuts down all systems in reverse registration order.
    pub fn shutdown(&mut self, world: &mut World) {
        while let Some(mut system) = self.systems.pop() {
            system.shutdown(world);
            log::debug!("system {} shut down", system.name());
        }
        self.pending.clear();
    }
}
