//! Local player of the client: input handling, camera and target highlight.

use tessera_ecs::{Entity, Event, World};
use ultraviolet::{Rotor3, Vec3};

pub use system::LocalPlayerSystem;

use crate::logic::characters::GazeMountPoint;
use crate::logic::location::Location;
use crate::math::Aabb;

mod system;
mod tests;

/// Fraction of the standing height the character has while crouching.
pub const CROUCH_FRACTION: f32 = 0.5;

/// Entities controlled by the player of this client.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LocalPlayer {
    client: Entity,
    character: Entity,
}

impl LocalPlayer {
    pub fn new(client: Entity, character: Entity) -> Self {
        Self { client, character }
    }

    pub fn client(&self) -> Entity {
        self.client
    }

    pub fn character(&self) -> Entity {
        self.character
    }

    /// Returns `true` if both client and character are alive.
    pub fn is_valid(&self, world: &World) -> bool {
        world.exists(self.client) && world.exists(self.character)
    }

    /// Position of the eyes of the character.
    pub fn view_position(&self, world: &World) -> Option<Vec3> {
        let location = world.get::<Location>(self.character)?;
        let translate = world
            .get::<GazeMountPoint>(self.character)
            .map(|gaze| gaze.translate)
            .unwrap_or_else(Vec3::zero);
        Some(location.position + location.rotation * translate)
    }

    /// Rotation of the view of the character.
    pub fn view_rotation(&self, world: &World) -> Option<Rotor3> {
        world.get::<Location>(self.character).map(|location| location.rotation)
    }
}

/// Requests the player makes to the authority of the game.
pub trait ActivationRequests {
    /// Requests activation of the target of the character.
    ///
    /// Returns `true` if the request was sent.
    ///
    fn activate_target(&mut self, character: Entity) -> bool;

    /// Requests activation of the item owned by the character.
    fn activate_owned_item(&mut self, character: Entity, item: Entity);
}

/// Sent to the character when it is spawned.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct OnPlayerSpawnedEvent;

impl Event for OnPlayerSpawnedEvent {}

/// Sent when the player aims at another entity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlayerTargetChangedEvent {
    pub old_target: Entity,
    pub new_target: Entity,
}

impl Event for PlayerTargetChangedEvent {}

/// State of the local player accumulated from input between ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalPlayerState {
    relative_movement: Vec3,
    auto_move: bool,
    run_per_default: bool,
    run: bool,
    jump: bool,
    look_pitch: f32,
    look_pitch_delta: f32,
    look_yaw: f32,
    look_yaw_delta: f32,
    crouch_fraction: f32,
    bob_factor: f32,
    last_step_delta: f32,
    input_sequence_number: u32,
    target_aabb: Option<Aabb>,
}

impl LocalPlayerState {
    /// Movement requested by input, relative to the view of the character.
    pub fn relative_movement(&self) -> Vec3 {
        self.relative_movement
    }

    pub fn is_auto_move(&self) -> bool {
        self.auto_move
    }

    pub fn is_run_per_default(&self) -> bool {
        self.run_per_default
    }

    pub fn is_running(&self) -> bool {
        self.run
    }

    pub fn is_jump_requested(&self) -> bool {
        self.jump
    }

    /// Pitch of the view in degrees.
    pub fn look_pitch(&self) -> f32 {
        self.look_pitch
    }

    /// Yaw of the view in degrees.
    pub fn look_yaw(&self) -> f32 {
        self.look_yaw
    }

    pub fn crouch_fraction(&self) -> f32 {
        self.crouch_fraction
    }

    pub fn bob_factor(&self) -> f32 {
        self.bob_factor
    }

    /// Sequence number the next movement input will have.
    pub fn input_sequence_number(&self) -> u32 {
        self.input_sequence_number
    }

    /// Bounds of the highlighted target of the player.
    pub fn target_aabb(&self) -> Option<&Aabb> {
        self.target_aabb.as_ref()
    }

    fn next_sequence_number(&mut self) -> u32 {
        let number = self.input_sequence_number;
        self.input_sequence_number = self.input_sequence_number.wrapping_add(1);
        number
    }
}

impl Default for LocalPlayerState {
    fn default() -> Self {
        Self {
            relative_movement: Vec3::zero(),
            auto_move: false,
            run_per_default: true,
            run: true,
            jump: false,
            look_pitch: 0.0,
            look_pitch_delta: 0.0,
            look_yaw: 0.0,
            look_yaw_delta: 0.0,
            crouch_fraction: CROUCH_FRACTION,
            bob_factor: 0.0,
            last_step_delta: 0.0,
            input_sequence_number: 1,
            target_aabb: None,
        }
    }
}
