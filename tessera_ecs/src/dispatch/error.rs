//! Error types of event dispatch.

use std::any::type_name;
use std::error::Error;

use thiserror::Error;

use crate::Entity;

/// Error that can happen inside of the event handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("entity {entity:?} has no component {component}")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    #[error("resource {resource} is not present in the world")]
    MissingResource { resource: &'static str },

    #[error("nested dispatch failure: {0}")]
    Dispatch(#[source] Box<DispatchError>),

    #[error(transparent)]
    Custom(Box<dyn Error + Send + Sync + 'static>),
}

impl HandlerError {
    /// Creates an error for the absent resource of type `R`.
    pub fn missing_resource<R>() -> Self
    where
        R: 'static,
    {
        Self::MissingResource {
            resource: type_name::<R>(),
        }
    }

    /// Wraps any error raised by the handler logic.
    pub fn custom<E>(error: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync + 'static>>,
    {
        Self::Custom(error.into())
    }
}

impl From<DispatchError> for HandlerError {
    fn from(error: DispatchError) -> Self {
        Self::Dispatch(Box::new(error))
    }
}

/// Error that can happen on dispatch of the event.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("handler `{handler}` failed on {event} for entity {entity:?}: {source}")]
    Handler {
        handler: &'static str,
        event: &'static str,
        entity: Entity,
        #[source]
        source: HandlerError,
    },

    #[error("dispatch of {event} exceeded nesting depth of {depth}")]
    TooDeep { event: &'static str, depth: usize },
}
