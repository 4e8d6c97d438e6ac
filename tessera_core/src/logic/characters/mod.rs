//! Characters of the game: their components, events and movement modes.

use slotmap::Key;
use tessera_ecs::{Dispatcher, Entity, Event, HandlerContext, HandlerResult, Priority, System, SystemError, World};
use ultraviolet::Vec3;


/// Way the character moves through the world.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum MovementMode {
    #[default]
    Walking,
    Crouching,
    Climbing,
    /// Free flight through any geometry.
    Ghosting,
    Swimming,
}

/// Entity which is a character.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Character;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CharacterMovement {
    pub mode: MovementMode,
    /// Height of the collider of the character.
    pub height: f32,
    /// Progress of the current step, wraps around from 1 to 0.
    pub footstep_delta: f32,
}

impl Default for CharacterMovement {
    fn default() -> Self {
        Self {
            mode: MovementMode::Walking,
            height: 1.8,
            footstep_delta: 0.0,
        }
    }
}

/// Point the camera of the character is mounted to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GazeMountPoint {
    pub translate: Vec3,
}

impl Default for GazeMountPoint {
    fn default() -> Self {
        Self {
            translate: Vec3::new(0.0, 0.6, 0.0),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CharacterHeldItem {
    pub selected_item: Entity,
}

impl Default for CharacterHeldItem {
    fn default() -> Self {
        Self {
            selected_item: Entity::null(),
        }
    }
}

/// Interaction of the character with some object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interaction {
    /// URI of the screen opened by the interaction.
    pub screen: Option<String>,
}

/// Request to change movement mode of the character.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SetMovementModeEvent {
    pub mode: MovementMode,
}

impl SetMovementModeEvent {
    pub fn new(mode: MovementMode) -> Self {
        Self { mode }
    }
}

impl Event for SetMovementModeEvent {}

/// Movement intent of the character for one tick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CharacterMoveInputEvent {
    /// Increases with every input, starting from 1.
    pub sequence_number: u32,
    pub pitch: f32,
    pub yaw: f32,
    /// Desired movement in world space.
    pub movement: Vec3,
    pub running: bool,
    pub jump_requested: bool,
    pub delta_ms: u64,
}

impl Event for CharacterMoveInputEvent {}

/// Sent to the character before it uses its held item.
///
/// Consuming this event cancels the usage.
///
#[derive(Debug, Default)]
pub struct OnItemUseEvent {
    consumed: bool,
}

impl OnItemUseEvent {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Event for OnItemUseEvent {
    const CONSUMABLE: bool = true;

    fn is_consumed(&self) -> bool {
        self.consumed
    }

    fn consume(&mut self) {
        self.consumed = true;
    }
}

/// Changes collider height of the character.
pub fn set_character_height(context: &mut HandlerContext<'_>, character: Entity, height: f32) -> HandlerResult {
    let mut movement = context.component_of::<CharacterMovement>(character)?;
    movement.height = height;
    context.save_to(character, movement);
    Ok(())
}

/// Changes height of the eyes of the character.
pub fn set_character_eye_height(context: &mut HandlerContext<'_>, character: Entity, eye_height: f32) -> HandlerResult {
    let mut gaze = context.component_of::<GazeMountPoint>(character)?;
    gaze.translate.y = eye_height;
    context.save_to(character, gaze);
    Ok(())
}

/// System which applies movement mode changes to characters.
#[derive(Debug, Default)]
pub struct CharacterSystem;

impl CharacterSystem {
    fn on_set_movement_mode(
        event: &mut SetMovementModeEvent,
        context: &mut HandlerContext<'_>,
        (mut movement,): (CharacterMovement,),
    ) -> HandlerResult {
        if movement.mode != event.mode {
            log::debug!(
                "character {:?} changes movement mode from {:?} to {:?}",
                context.entity(),
                movement.mode,
                event.mode,
            );
        }
        movement.mode = event.mode;
        context.save(movement);
        Ok(())
    }
}

impl System for CharacterSystem {
    fn initialize(&mut self, _world: &mut World, dispatcher: &mut Dispatcher) -> Result<(), SystemError> {
        dispatcher.register::<SetMovementModeEvent, (CharacterMovement,), _>(
            "CharacterSystem::on_set_movement_mode",
            Priority::NORMAL,
            Self::on_set_movement_mode,
        );
        Ok(())
    }
}
