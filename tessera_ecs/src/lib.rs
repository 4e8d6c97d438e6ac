//! Entity Component System (ECS) utilities for game engine.
//!
//! Entities are plain identifiers, components are plain data,
//! and behaviour lives in event handlers registered with priority
//! and component filter in the [`Dispatcher`],
//! and in systems driven by the [`Scheduler`].

pub use component::{Component, ComponentManager, ComponentSet, ComponentStorage, Signature};
pub use dispatch::{DispatchError, Dispatcher, HandlerError, MAX_DISPATCH_DEPTH};
pub use entity::{Entity, EntityStorage};
pub use event::{Event, EventInfo, EventRegistry};
pub use handler::{HandlerContext, HandlerRegistry, HandlerResult, Priority, Registration};
pub use system::{RenderPhase, RenderSystem, Scheduler, System, SystemError, UpdateSystem};
pub use world::World;

pub mod dispatch;
pub mod handler;
pub mod system;

mod component;
mod entity;
mod event;
mod world;
