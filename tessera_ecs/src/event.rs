//! Utilities for *events* of ECS.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

/// Objects of this trait represent *event* routed to entities of ECS.
///
/// Events are plain values: a new one is constructed for every dispatch.
/// Consumable events stop propagation to lower priority handlers
/// once [`Event::consume`] was called.
///
/// A consumable event must override all three of [`Event::CONSUMABLE`],
/// [`Event::is_consumed`] and [`Event::consume`], storing the flag in the event itself.
/// With the default methods the dispatcher never observes consumption,
/// so setting only [`Event::CONSUMABLE`] leaves the event reaching every handler.
///
/// ```
/// use tessera_ecs::Event;
///
/// #[derive(Default)]
/// struct Click {
///     consumed: bool,
/// }
///
/// impl Event for Click {
///     const CONSUMABLE: bool = true;
///
///     fn is_consumed(&self) -> bool {
///         self.consumed
///     }
///
///     fn consume(&mut self) {
///         self.consumed = true;
///     }
/// }
///
/// let mut click = Click::default();
/// click.consume();
/// assert!(click.is_consumed());
/// ```
///
pub trait Event: Any {
    /// `true` if handlers can stop propagation of this event.
    ///
    /// Requires [`Event::is_consumed`] and [`Event::consume`] to be overridden as well.
    const CONSUMABLE: bool = false;

    /// Returns `true` if some handler has consumed this event.
    fn is_consumed(&self) -> bool {
        false
    }

    /// Marks this event as handled.
    ///
    /// Does nothing for events which are not consumable.
    ///
    fn consume(&mut self) {}
}

/// Description of the event type declared in [`EventRegistry`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EventInfo {
    name: &'static str,
    consumable: bool,
}

impl EventInfo {
    /// Creates description of event type `E`.
    pub fn of<E>() -> Self
    where
        E: Event,
    {
        Self {
            name: type_name::<E>(),
            consumable: E::CONSUMABLE,
        }
    }

    /// Full type name of the event.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// If handlers can stop propagation of the event.
    pub fn consumable(&self) -> bool {
        self.consumable
    }
}

/// Registry of all event types known to the dispatcher.
#[derive(Debug, Default)]
pub struct EventRegistry {
    events: HashMap<TypeId, EventInfo>,
}

impl EventRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares event type `E`, returning its description.
    ///
    /// Declaring the same type again is allowed and changes nothing.
    ///
    pub fn declare<E>(&mut self) -> EventInfo
    where
        E: Event,
    {
        *self.events.entry(TypeId::of::<E>()).or_insert_with(|| {
            let info = EventInfo::of::<E>();
            log::trace!(
                "declared event {} (consumable: {})",
                info.name,
                info.consumable,
            );
            info
        })
    }

    /// Retrieves description of the event type, if it was declared.
    pub fn info(&self, type_id: TypeId) -> Option<EventInfo> {
        self.events.get(&type_id).copied()
    }

    /// Returns `true` if event type `E` was declared.
    pub fn contains<E>(&self) -> bool
    where
        E: Event,
    {
        self.events.contains_key(&TypeId::of::<E>())
    }

    /// Returns iterator over descriptions of all declared event types.
    pub fn iter(&self) -> impl Iterator<Item = &EventInfo> {
        self.events.values()
    }

    /// Number of declared event types.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if no event type was declared.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
