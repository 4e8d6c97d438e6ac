//! Configuration utilities for the client and your game.
//!
//! Configuration is stored in TOML; every section is optional
//! and missing values fall back to defaults.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use log::LevelFilter;
use semver::Version;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::{Input, Key, MouseButton, FORWARDS_BIND};


pub const ENGINE_NAME: &str = env!("CARGO_CRATE_NAME", "library must be compiled by Cargo");

const ENGINE_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "library must be compiled by Cargo");
lazy_static::lazy_static! {
    pub static ref ENGINE_VERSION: Version = ENGINE_VERSION_STR.parse().unwrap();
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration file: {0}")]
    Io(#[from] io::Error),

    #[error("malformed configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// This struct represents general configuration of the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    name: String,
    version: Version,
    log_level: LevelFilter,
    player: PlayerConfig,
    rendering: RenderingConfig,
    input: InputConfig,
}

impl Config {
    /// Loads configuration from the TOML file.
    ///
    /// # Errors
    ///
    /// An error is returned if the file cannot be read or is malformed.
    ///
    pub fn load<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from the TOML text.
    ///
    /// # Errors
    ///
    /// An error is returned if the text is malformed.
    ///
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Name of your game.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semver version of your game.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Maximal level of log messages.
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn player(&self) -> &PlayerConfig {
        &self.player
    }

    pub fn rendering(&self) -> &RenderingConfig {
        &self.rendering
    }

    pub fn rendering_mut(&mut self) -> &mut RenderingConfig {
        &mut self.rendering
    }

    pub fn input(&self) -> &InputConfig {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputConfig {
        &mut self.input
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "Hello World".to_string(),
            version: Version::new(0, 0, 0),
            log_level: if cfg!(debug_assertions) {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            player: PlayerConfig::default(),
            rendering: RenderingConfig::default(),
            input: InputConfig::default(),
        }
    }
}

/// Body settings of the local player.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Standing height of the character in blocks.
    pub height: f32,
    /// Height of the eyes above the center of the character.
    pub eye_height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            height: 1.8,
            eye_height: 0.6,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    pub camera_bobbing: bool,
    /// Highlight the block or the object the player is aiming at.
    pub render_placing_box: bool,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            camera_bobbing: true,
            render_placing_box: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub binds: BindsConfig,
}

/// Mapping from bind URI to the inputs bound to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindsConfig(HashMap<String, Vec<Input>>);

impl BindsConfig {
    /// All inputs bound to the bind, including unassigned ones.
    pub fn binds(&self, uri: &str) -> &[Input] {
        self.0.get(uri).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First valid input bound to the bind.
    pub fn first_valid(&self, uri: &str) -> Option<Input> {
        self.binds(uri).iter().copied().find(Input::is_valid)
    }

    /// Replaces inputs of the bind.
    pub fn set<S>(&mut self, uri: S, inputs: Vec<Input>)
    where
        S: Into<String>,
    {
        self.0.insert(uri.into(), inputs);
    }

    /// Bind which the input is assigned to, if any.
    pub fn uri_of(&self, input: Input) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, inputs)| inputs.contains(&input))
            .map(|(uri, _)| uri.as_str())
    }
}

impl Default for BindsConfig {
    fn default() -> Self {
        let binds = [
            (FORWARDS_BIND, Input::Key(Key::W)),
            ("engine:backwards", Input::Key(Key::S)),
            ("engine:left", Input::Key(Key::A)),
            ("engine:right", Input::Key(Key::D)),
            ("engine:jump", Input::Key(Key::Space)),
            ("engine:crouch", Input::Key(Key::C)),
            ("engine:autoMove", Input::Key(Key::X)),
            ("engine:toggleSpeedTemporarily", Input::Key(Key::LeftShift)),
            ("engine:chat", Input::Key(Key::T)),
            ("engine:frob", Input::Key(Key::E)),
            ("engine:useItem", Input::Mouse(MouseButton::Right)),
        ];
        Self(
            binds
                .into_iter()
                .map(|(uri, input)| (uri.to_string(), vec![input]))
                .collect(),
        )
    }
}
