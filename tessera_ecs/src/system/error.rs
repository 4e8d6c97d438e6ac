//! Error types of systems.

use std::error::Error;

use thiserror::Error;

use crate::dispatch::{DispatchError, HandlerError};

/// Error that can happen on initialization or update of the system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("event dispatch failure: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("handler logic failure: {0}")]
    Handler(#[from] HandlerError),

    #[error("resource {0} is not present in the world")]
    MissingResource(&'static str),

    #[error(transparent)]
    Custom(Box<dyn Error + Send + Sync + 'static>),
}
