//! Utilities for client error handling.

use std::error::Error as StdError;
use std::fmt;

use tessera_ecs::SystemError;

use crate::config::ConfigError;

/// Result of any operation which can return an error.
pub type Result<T> = std::result::Result<T, Error>;

/// General error type of the client.
///
/// Contains general message and source of error, if any.
///
#[derive(Debug)]
pub struct Error {
    message: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates new error with specified message and source of error.
    pub fn new<T, E>(message: T, source: E) -> Self
    where
        T: ToString,
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: message.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// General message of this error, without its source.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)?;
        match &self.source {
            Some(source) => write!(f, " ({})", source),
            None => Ok(()),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|err| err.as_ref() as _)
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Self::from(message.to_string())
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self {
            message,
            source: None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(error: ConfigError) -> Self {
        Self::new("configuration loading failed", error)
    }
}

impl From<SystemError> for Error {
    fn from(error: SystemError) -> Self {
        Self::new("system initialization failed", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_source() {
        let error = Error::from(SystemError::MissingResource("Config"));
        assert_eq!(error.message(), "system initialization failed");
        assert_eq!(
            error.to_string(),
            "system initialization failed (resource Config is not present in the world)",
        );
        assert!(error.source().is_some());
    }

    #[test]
    fn test_plain_message() {
        let error = Error::from("no local player");
        assert_eq!(error.to_string(), "no local player");
        assert!(error.source().is_none());
    }
}
