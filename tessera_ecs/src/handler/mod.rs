//! Utilities for registration of event *handlers*.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;

pub use context::HandlerContext;

use crate::dispatch::HandlerError;
use crate::{ComponentSet, Event, EventRegistry, Signature};

mod context;

/// Result of the event handler invocation.
pub type HandlerResult = Result<(), HandlerError>;

type Callback = Box<dyn Fn(&mut dyn Any, &mut HandlerContext<'_>) -> HandlerResult>;

/// Priority of the event handler.
///
/// Handlers with higher priority are invoked first.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub i32);

impl Priority {
    pub const CRITICAL: Self = Self(200);
    pub const HIGH: Self = Self(150);
    pub const NORMAL: Self = Self(100);
    pub const LOW: Self = Self(50);
    pub const TRIVIAL: Self = Self(0);
}

impl Default for Priority {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Event handler with its priority and component filter.
pub struct Registration {
    name: &'static str,
    priority: Priority,
    required: Box<[TypeId]>,
    callback: Callback,
}

impl Registration {
    /// Name of the handler, used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Priority of the handler.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Component types the target entity must carry.
    pub fn required(&self) -> &[TypeId] {
        &self.required
    }

    /// Returns `true` if every required component is in the set.
    pub fn matches(&self, components: &ComponentSet) -> bool {
        self.required.iter().all(|id| components.contains(id))
    }

    pub(crate) fn invoke(&self, event: &mut dyn Any, context: &mut HandlerContext<'_>) -> HandlerResult {
        (self.callback)(event, context)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("required", &self.required.len())
            .finish()
    }
}

/// Lookup table from event type to handlers ordered by priority.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<TypeId, Vec<Registration>>,
    events: EventRegistry,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers handler of event `E` for entities carrying every component of `C`.
    ///
    /// Handler receives clones of components of `C`; modified copies
    /// must be saved explicitly through the [`HandlerContext`].
    /// If a component of `C` was detached by an earlier handler of the same
    /// dispatch, this handler is skipped.
    /// Among handlers with equal priority, earlier registration is invoked first.
    ///
    pub fn register<E, C, F>(&mut self, name: &'static str, priority: Priority, handler: F)
    where
        E: Event,
        C: Signature,
        F: Fn(&mut E, &mut HandlerContext<'_>, C) -> HandlerResult + 'static,
    {
        self.events.declare::<E>();

        let callback: Callback = Box::new(move |event: &mut dyn Any, context: &mut HandlerContext<'_>| {
            let event = event
                .downcast_mut::<E>()
                .expect("handler registered under foreign event type");
            // filter matched the snapshot, but an earlier handler may have detached a component
            let components = match C::fetch(context.world(), context.entity()) {
                Ok(components) => components,
                Err(component) => {
                    log::debug!(
                        "skipping handler `{}`: {} was detached from {:?} during dispatch",
                        name,
                        component,
                        context.entity(),
                    );
                    return Ok(());
                }
            };
            handler(event, context, components)
        });
        let registration = Registration {
            name,
            priority,
            required: C::type_ids(),
            callback,
        };

        let registrations = self.handlers.entry(TypeId::of::<E>()).or_default();
        let index = registrations.partition_point(|other| other.priority >= priority);
        registrations.insert(index, registration);
        log::debug!(
            "registered handler `{}` for {} with priority {}",
            name,
            type_name::<E>(),
            priority.0,
        );
    }

    /// Handlers of the event type, ordered descending by priority.
    pub fn lookup(&self, event: TypeId) -> &[Registration] {
        self.handlers.get(&event).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Handlers of event `E`, ordered descending by priority.
    pub fn lookup_for<E>(&self) -> &[Registration]
    where
        E: Event,
    {
        self.lookup(TypeId::of::<E>())
    }

    /// Registry of event types which have handlers.
    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    /// Total number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    /// Returns `true` if no handler was registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
