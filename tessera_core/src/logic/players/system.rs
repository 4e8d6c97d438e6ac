use std::f32::consts::FRAC_PI_4;

use tessera_ecs::{
    Dispatcher, Event, HandlerContext, HandlerError, HandlerResult, Priority, RenderSystem,
    System, SystemError, UpdateSystem, World,
};
use ultraviolet::{Rotor3, Vec3};

use super::{ActivationRequests, LocalPlayer, LocalPlayerState, OnPlayerSpawnedEvent, PlayerTargetChangedEvent};
use crate::config::Config;
use crate::graphics::{forward, Camera, OverlayRenderer};
use crate::input::{
    AutoMove, AxisEvent, Bind, ButtonEvent, ButtonState, Chat, Crouch, CrouchMode, Forwards, ForwardsReal, Frob,
    Input, InputSystem, Jump, MouseX, MouseY, RotationPitch, RotationYaw, Strafe, StrafeReal, ToggleSpeedPermanently,
    ToggleSpeedTemporarily, UseItem, Vertical, VerticalReal, FORWARDS_BIND,
};
use crate::logic::blocks::{Block, BlockRegion, Mesh};
use crate::logic::characters::{
    set_character_eye_height, set_character_height, Character, CharacterHeldItem, CharacterMoveInputEvent,
    CharacterMovement, GazeMountPoint, Interaction, MovementMode, OnItemUseEvent, SetMovementModeEvent,
};
use crate::logic::location::Location;
use crate::logic::network::{Client, NetworkMode};
use crate::logic::notifications::NotificationMessageEvent;
use crate::physics::{PhysicsEngine, VERTICAL_PENETRATION_LEEWAY};
use crate::world::WorldProvider;

/// Widening of the field of view while ghosting, in degrees.
const GHOSTING_FOV_EXTENSION: f32 = 24.0;

const OVERLAY_LINE_THICKNESS: f32 = 2.0;

/// System which turns input of the local player into movement of its character,
/// keeps the camera attached to the character and highlights the target.
///
/// State of the system is stored in the world as [`LocalPlayerState`] resource.
/// The system relies on these resources:
/// - [`Config`] and [`LocalPlayer`];
/// - boxed [`Camera`], [`PhysicsEngine`], [`WorldProvider`],
///   [`InputSystem`] and [`ActivationRequests`] collaborators.
///
/// Update is skipped while there is no valid local player.
///
pub struct LocalPlayerSystem {
    overlay: Box<dyn OverlayRenderer>,
}

impl LocalPlayerSystem {
    pub fn new<R>(overlay: R) -> Self
    where
        R: OverlayRenderer + 'static,
    {
        Self {
            overlay: Box::new(overlay),
        }
    }

    pub fn overlay_renderer(&self) -> &dyn OverlayRenderer {
        self.overlay.as_ref()
    }

    pub fn set_overlay_renderer(&mut self, overlay: Box<dyn OverlayRenderer>) {
        self.overlay = overlay;
    }
}

impl System for LocalPlayerSystem {
    fn initialize(&mut self, world: &mut World, dispatcher: &mut Dispatcher) -> Result<(), SystemError> {
        if !world.contains_resource::<Config>() {
            return Err(SystemError::MissingResource("Config"));
        }
        world.insert_resource(LocalPlayerState::default());

        dispatcher.register::<AxisEvent<MouseX>, (Character,), _>(
            "LocalPlayerSystem::on_mouse_x",
            Priority::NORMAL,
            look_yaw::<MouseX>,
        );
        dispatcher.register::<AxisEvent<MouseY>, (Character,), _>(
            "LocalPlayerSystem::on_mouse_y",
            Priority::NORMAL,
            look_pitch::<MouseY>,
        );
        dispatcher.register::<AxisEvent<RotationYaw>, (Character,), _>(
            "LocalPlayerSystem::update_rotation_yaw",
            Priority::NORMAL,
            look_yaw::<RotationYaw>,
        );
        dispatcher.register::<AxisEvent<RotationPitch>, (Character,), _>(
            "LocalPlayerSystem::update_rotation_pitch",
            Priority::NORMAL,
            look_pitch::<RotationPitch>,
        );
        dispatcher.register::<ButtonEvent<Jump>, (Character, CharacterMovement), _>(
            "LocalPlayerSystem::on_jump",
            Priority::NORMAL,
            on_jump,
        );
        dispatcher.register::<ButtonEvent<Chat>, (Client,), _>(
            "LocalPlayerSystem::update_chat_open",
            Priority::NORMAL,
            on_chat,
        );
        dispatcher.register::<AxisEvent<Forwards>, (Client,), _>(
            "LocalPlayerSystem::update_forwards_movement",
            Priority::NORMAL,
            on_forwards,
        );
        dispatcher.register::<AxisEvent<Strafe>, (Client,), _>(
            "LocalPlayerSystem::update_strafe_movement",
            Priority::NORMAL,
            strafe_movement::<Strafe>,
        );
        dispatcher.register::<AxisEvent<Vertical>, (Client,), _>(
            "LocalPlayerSystem::update_vertical_movement",
            Priority::NORMAL,
            vertical_movement::<Vertical>,
        );
        dispatcher.register::<AxisEvent<ForwardsReal>, (Client,), _>(
            "LocalPlayerSystem::update_forwards_real_movement",
            Priority::NORMAL,
            on_forwards_real,
        );
        dispatcher.register::<AxisEvent<StrafeReal>, (Client,), _>(
            "LocalPlayerSystem::update_strafe_real_movement",
            Priority::NORMAL,
            strafe_movement::<StrafeReal>,
        );
        dispatcher.register::<AxisEvent<VerticalReal>, (Client,), _>(
            "LocalPlayerSystem::update_vertical_real_movement",
            Priority::NORMAL,
            vertical_movement::<VerticalReal>,
        );
        dispatcher.register::<ButtonEvent<ToggleSpeedTemporarily>, (Client,), _>(
            "LocalPlayerSystem::on_toggle_speed_temporarily",
            Priority::NORMAL,
            on_toggle_speed_temporarily,
        );
        dispatcher.register::<ButtonEvent<Crouch>, (Client,), _>(
            "LocalPlayerSystem::on_crouch_temporarily",
            Priority::NORMAL,
            on_crouch,
        );
        dispatcher.register::<ButtonEvent<CrouchMode>, (Client,), _>(
            "LocalPlayerSystem::on_crouch_mode",
            Priority::NORMAL,
            on_crouch_mode,
        );
        dispatcher.register::<ButtonEvent<AutoMove>, (Client,), _>(
            "LocalPlayerSystem::on_auto_move_mode",
            Priority::NORMAL,
            on_auto_move,
        );
        dispatcher.register::<ButtonEvent<ToggleSpeedPermanently>, (Client,), _>(
            "LocalPlayerSystem::on_toggle_speed_permanently",
            Priority::NORMAL,
            on_toggle_speed_permanently,
        );
        dispatcher.register::<OnPlayerSpawnedEvent, (), _>(
            "LocalPlayerSystem::on_player_spawn",
            Priority::NORMAL,
            on_player_spawned,
        );
        dispatcher.register::<PlayerTargetChangedEvent, (), _>(
            "LocalPlayerSystem::on_target_changed",
            Priority::NORMAL,
            on_target_changed,
        );
        dispatcher.register::<ButtonEvent<Frob>, (Character,), _>(
            "LocalPlayerSystem::on_frob_button",
            Priority::NORMAL,
            on_frob,
        );
        dispatcher.register::<ButtonEvent<UseItem>, (Character, CharacterHeldItem), _>(
            "LocalPlayerSystem::on_use_item_button",
            Priority::NORMAL,
            on_use_item,
        );
        Ok(())
    }

    fn shutdown(&mut self, world: &mut World) {
        world.remove_resource::<LocalPlayerState>();
    }

    fn as_update(&mut self) -> Option<&mut dyn UpdateSystem> {
        Some(self)
    }

    fn as_render(&mut self) -> Option<&mut dyn RenderSystem> {
        Some(self)
    }
}

impl UpdateSystem for LocalPlayerSystem {
    fn update(&mut self, world: &mut World, dispatcher: &Dispatcher, delta: f32) -> Result<(), SystemError> {
        let local_player = match world.resource::<LocalPlayer>() {
            Some(&local_player) if local_player.is_valid(world) => local_player,
            _ => return Ok(()),
        };
        let mut context = dispatcher.context(world, local_player.character());
        update_player(&mut context, delta)?;
        Ok(())
    }
}

impl RenderSystem for LocalPlayerSystem {
    fn render_overlay(&mut self, world: &World) {
        let render_placing_box = world
            .resource::<Config>()
            .map_or(false, |config| config.rendering().render_placing_box);
        if !render_placing_box {
            return;
        }
        let aabb = world
            .resource::<LocalPlayerState>()
            .and_then(|state| state.target_aabb);
        if let Some(aabb) = aabb {
            self.overlay.set_aabb(aabb);
            self.overlay.render(OVERLAY_LINE_THICKNESS);
        }
    }
}

fn player_state<'c>(context: &'c mut HandlerContext<'_>) -> Result<&'c mut LocalPlayerState, HandlerError> {
    context.resource_mut::<LocalPlayerState>()
}

fn update_player(context: &mut HandlerContext<'_>, delta: f32) -> HandlerResult {
    let movement = context.component::<CharacterMovement>()?;
    process_input(context, &movement, delta)?;
    update_camera(context, &movement)
}

fn process_input(context: &mut HandlerContext<'_>, movement: &CharacterMovement, delta: f32) -> HandlerResult {
    let state = player_state(context)?;
    state.look_yaw = (state.look_yaw - state.look_yaw_delta) % 360.0;
    state.look_yaw_delta = 0.0;
    state.look_pitch = (state.look_pitch + state.look_pitch_delta).clamp(-89.0, 89.0);
    state.look_pitch_delta = 0.0;

    let relative = state.relative_movement;
    let mut direction = Vec3::new(relative.x, 0.0, relative.z);
    // positive yaw turns forward (+z) towards +x
    let yaw = Rotor3::from_rotation_xz(-state.look_yaw.to_radians());
    match movement.mode {
        MovementMode::Walking => direction = yaw * direction,
        // climbing mover applies rotation by itself
        MovementMode::Climbing => direction.y += relative.y,
        _ => {
            let pitch = Rotor3::from_rotation_yz(state.look_pitch.to_radians());
            direction = (yaw * pitch) * direction;
            direction.y += relative.y;
        }
    }

    let event = CharacterMoveInputEvent {
        sequence_number: state.next_sequence_number(),
        pitch: state.look_pitch,
        yaw: state.look_yaw,
        movement: direction,
        running: state.run,
        jump_requested: state.jump,
        delta_ms: (delta * 1000.0).round() as u64,
    };
    let character = context.entity();
    context.send(character, event)?;
    player_state(context)?.jump = false;
    Ok(())
}

fn update_camera(context: &mut HandlerContext<'_>, movement: &CharacterMovement) -> HandlerResult {
    let local_player = *context.resource::<LocalPlayer>()?;
    let camera_bobbing = context.resource::<Config>()?.rendering().camera_bobbing;

    let state = player_state(context)?;
    let mut step_delta = movement.footstep_delta - state.last_step_delta;
    if step_delta < 0.0 {
        step_delta += 1.0;
    }
    state.bob_factor += step_delta;
    state.last_step_delta = movement.footstep_delta;
    let bob_factor = state.bob_factor;

    let world = context.world();
    let (position, rotation) = match (
        local_player.view_position(world),
        local_player.view_rotation(world),
    ) {
        (Some(position), Some(rotation)) => (position, rotation),
        _ => return Ok(()),
    };
    let camera = match context.world_mut().resource_mut::<Box<dyn Camera>>() {
        Some(camera) => camera,
        None => return Ok(()),
    };

    camera.set_position(position);
    camera.set_view_direction(rotation * forward());
    if let Some(bobbing) = camera.bobbing() {
        if camera_bobbing {
            bobbing.set_bobbing_rotation_offset_factor(bobbing_offset(bob_factor, 0.0, 0.01, 2.5));
            bobbing.set_bobbing_vertical_offset_factor(bobbing_offset(bob_factor, FRAC_PI_4, 0.025, 3.0));
        } else {
            bobbing.set_bobbing_rotation_offset_factor(0.0);
            bobbing.set_bobbing_vertical_offset_factor(0.0);
        }
    }
    if movement.mode == MovementMode::Ghosting {
        camera.extend_fov(GHOSTING_FOV_EXTENSION);
    } else {
        camera.reset_fov();
    }
    Ok(())
}

fn bobbing_offset(bob_factor: f32, phase_offset: f32, amplitude: f32, frequency: f32) -> f32 {
    (bob_factor * frequency + phase_offset).sin() * amplitude
}

/// Crouches character of the client, reducing its height and eye height.
fn crouch_player(context: &mut HandlerContext<'_>, client: &Client) -> HandlerResult {
    let character = client.character;
    let height = context.component_of::<CharacterMovement>(character)?.height;
    let eye_height = context.component_of::<GazeMountPoint>(character)?.translate.y;
    let crouch_fraction = player_state(context)?.crouch_fraction;

    set_character_height(context, character, height * crouch_fraction)?;
    set_character_eye_height(context, character, eye_height * crouch_fraction)?;
    context.send(character, SetMovementModeEvent::new(MovementMode::Crouching))?;
    Ok(())
}

/// Stands character of the client up, unless there is an obstacle above it.
fn stand_player(context: &mut HandlerContext<'_>, client: &Client) -> HandlerResult {
    let character = client.character;
    let height = context.component_of::<CharacterMovement>(character)?.height;
    let eye_height = context.component_of::<GazeMountPoint>(character)?.translate.y;
    let position = context.component_of::<Location>(character)?.position;
    let crouch_fraction = player_state(context)?.crouch_fraction;

    // height is the crouched one here
    let rise = (1.0 - crouch_fraction) * height / crouch_fraction;
    let to = position + Vec3::unit_y() * rise;
    let sweep = context
        .resource::<Box<dyn PhysicsEngine>>()?
        .sweep(character, position, to, VERTICAL_PENETRATION_LEEWAY, -1.0);
    if sweep.has_hit() {
        let entity = context.entity();
        log::debug!("character {:?} cannot stand up at {:?}", character, position);
        context.send(entity, NotificationMessageEvent::new("Cannot stand up here!", entity))?;
        return Ok(());
    }

    set_character_height(context, character, height / crouch_fraction)?;
    set_character_eye_height(context, character, eye_height / crouch_fraction)?;
    context.send(character, SetMovementModeEvent::new(MovementMode::Walking))?;
    Ok(())
}

fn forwards_key(context: &HandlerContext<'_>) -> Result<Option<Input>, HandlerError> {
    Ok(context
        .resource::<Config>()?
        .input()
        .binds
        .first_valid(FORWARDS_BIND))
}

/// Starts holding the forward key, if any is bound.
fn start_auto_move(context: &mut HandlerContext<'_>) -> HandlerResult {
    player_state(context)?.auto_move = false;
    let key = match forwards_key(context)? {
        Some(key) => key,
        None => {
            log::warn!("auto move requested, but no key is bound to {}", FORWARDS_BIND);
            return Ok(());
        }
    };
    let input = context.resource_mut::<Box<dyn InputSystem>>()?;
    input.simulate_single_key_stroke(key);
    input.simulate_repeated_key_stroke(key);
    player_state(context)?.auto_move = true;
    Ok(())
}

/// Releases the forward key held by auto move.
fn stop_auto_move(context: &mut HandlerContext<'_>) -> HandlerResult {
    if let Some(key) = forwards_key(context)? {
        context
            .resource_mut::<Box<dyn InputSystem>>()?
            .cancel_simulated_key_stroke(key);
        player_state(context)?.auto_move = false;
    }
    Ok(())
}

fn look_yaw<A>(event: &mut AxisEvent<A>, context: &mut HandlerContext<'_>, _: (Character,)) -> HandlerResult
where
    A: Bind,
{
    player_state(context)?.look_yaw_delta = event.value();
    event.consume();
    Ok(())
}

fn look_pitch<A>(event: &mut AxisEvent<A>, context: &mut HandlerContext<'_>, _: (Character,)) -> HandlerResult
where
    A: Bind,
{
    player_state(context)?.look_pitch_delta = event.value();
    event.consume();
    Ok(())
}

fn on_jump(
    event: &mut ButtonEvent<Jump>,
    context: &mut HandlerContext<'_>,
    _: (Character, CharacterMovement),
) -> HandlerResult {
    let down = event.state() == ButtonState::Down;
    player_state(context)?.jump = down;
    if down {
        event.consume();
    }
    Ok(())
}

/// Opened chat stops the character, unless it moves automatically.
fn on_chat(event: &mut ButtonEvent<Chat>, context: &mut HandlerContext<'_>, (client,): (Client,)) -> HandlerResult {
    if !event.is_down() {
        return Ok(());
    }
    let state = player_state(context)?;
    state.relative_movement.x = 0.0;
    if !state.auto_move {
        state.relative_movement.z = 0.0;
    }

    let mode = context.component_of::<CharacterMovement>(client.character)?.mode;
    if mode == MovementMode::Crouching {
        stand_player(context, &client)?;
    }
    let state = player_state(context)?;
    state.run = state.run_per_default;
    Ok(())
}

fn on_forwards(event: &mut AxisEvent<Forwards>, context: &mut HandlerContext<'_>, _: (Client,)) -> HandlerResult {
    let state = player_state(context)?;
    state.relative_movement.z = event.value();
    if state.relative_movement.z == 0.0 && state.auto_move {
        stop_auto_move(context)?;
    }
    event.consume();
    Ok(())
}

fn on_forwards_real(
    event: &mut AxisEvent<ForwardsReal>,
    context: &mut HandlerContext<'_>,
    _: (Client,),
) -> HandlerResult {
    player_state(context)?.relative_movement.z = event.value();
    event.consume();
    Ok(())
}

fn strafe_movement<A>(event: &mut AxisEvent<A>, context: &mut HandlerContext<'_>, _: (Client,)) -> HandlerResult
where
    A: Bind,
{
    player_state(context)?.relative_movement.x = event.value();
    event.consume();
    Ok(())
}

fn vertical_movement<A>(event: &mut AxisEvent<A>, context: &mut HandlerContext<'_>, _: (Client,)) -> HandlerResult
where
    A: Bind,
{
    player_state(context)?.relative_movement.y = event.value();
    event.consume();
    Ok(())
}

fn on_toggle_speed_temporarily(
    event: &mut ButtonEvent<ToggleSpeedTemporarily>,
    context: &mut HandlerContext<'_>,
    _: (Client,),
) -> HandlerResult {
    let state = player_state(context)?;
    state.run = state.run_per_default ^ event.is_down();
    event.consume();
    Ok(())
}

/// Crouches while the button is held, stands up when it is released.
fn on_crouch(event: &mut ButtonEvent<Crouch>, context: &mut HandlerContext<'_>, (client,): (Client,)) -> HandlerResult {
    let mode = context.component_of::<CharacterMovement>(client.character)?.mode;
    match (event.is_down(), mode) {
        (true, MovementMode::Walking) => crouch_player(context, &client)?,
        (false, MovementMode::Crouching) => stand_player(context, &client)?,
        _ => (),
    }
    event.consume();
    Ok(())
}

fn on_crouch_mode(
    event: &mut ButtonEvent<CrouchMode>,
    context: &mut HandlerContext<'_>,
    (client,): (Client,),
) -> HandlerResult {
    if event.is_down() {
        match context.component_of::<CharacterMovement>(client.character)?.mode {
            MovementMode::Walking => crouch_player(context, &client)?,
            MovementMode::Crouching => stand_player(context, &client)?,
            _ => (),
        }
    }
    event.consume();
    Ok(())
}

fn on_auto_move(event: &mut ButtonEvent<AutoMove>, context: &mut HandlerContext<'_>, _: (Client,)) -> HandlerResult {
    if event.is_down() {
        if player_state(context)?.auto_move {
            stop_auto_move(context)?;
        } else {
            start_auto_move(context)?;
        }
    }
    event.consume();
    Ok(())
}

fn on_toggle_speed_permanently(
    event: &mut ButtonEvent<ToggleSpeedPermanently>,
    context: &mut HandlerContext<'_>,
    _: (Client,),
) -> HandlerResult {
    if event.is_down() {
        let state = player_state(context)?;
        state.run_per_default = !state.run_per_default;
        state.run = !state.run;
    }
    event.consume();
    Ok(())
}

fn on_player_spawned(_: &mut OnPlayerSpawnedEvent, context: &mut HandlerContext<'_>, _: ()) -> HandlerResult {
    let character = context.entity();
    let local_player = match context.world().resource::<LocalPlayer>() {
        Some(local_player) if local_player.character() == character => *local_player,
        _ => return Ok(()),
    };
    let player = *context.resource::<Config>()?.player();
    log::debug!(
        "local player {:?} spawned with height {} and eye height {}",
        local_player.client(),
        player.height,
        player.eye_height,
    );

    set_character_height(context, character, player.height)?;
    let mut gaze = context.component::<GazeMountPoint>()?;
    gaze.translate = Vec3::new(0.0, player.eye_height, 0.0);
    context.save(gaze);

    let state = player_state(context)?;
    state.look_yaw = 0.0;
    state.look_pitch = 0.0;
    // camera must be in place before the first tick
    update_player(context, 0.0)
}

fn on_target_changed(
    event: &mut PlayerTargetChangedEvent,
    context: &mut HandlerContext<'_>,
    _: (),
) -> HandlerResult {
    let target = event.new_target;
    let world = context.world();
    if !world.exists(target) {
        player_state(context)?.target_aabb = None;
        return Ok(());
    }
    let location = match world.get::<Location>(target) {
        Some(&location) => location,
        None => return Ok(()),
    };

    let aabb = if world.has::<Block>(target) || world.has::<BlockRegion>(target) {
        let provider = context.resource::<Box<dyn WorldProvider>>()?;
        log::trace!("targeting block {}", provider.block_name(location.position));
        Some(provider.block_bounds(location.position))
    } else {
        world
            .get::<Mesh>(target)
            .and_then(|mesh| mesh.aabb)
            .map(|aabb| aabb.transform(location.rotation, location.position, location.scale))
    };
    if let Some(aabb) = aabb {
        player_state(context)?.target_aabb = Some(aabb);
    }
    Ok(())
}

fn on_frob(event: &mut ButtonEvent<Frob>, context: &mut HandlerContext<'_>, _: (Character,)) -> HandlerResult {
    if event.state() != ButtonState::Down {
        return Ok(());
    }
    let character = context.entity();
    if let Some(mut interaction) = context.world().component::<Interaction>(character) {
        if let Some(screen) = interaction.screen.take() {
            log::debug!("character {:?} closes interaction screen {}", character, screen);
            context.save(interaction);
            return Ok(());
        }
    }

    let sent = context
        .resource_mut::<Box<dyn ActivationRequests>>()?
        .activate_target(character);
    if sent {
        event.consume();
    }
    Ok(())
}

fn on_use_item(
    event: &mut ButtonEvent<UseItem>,
    context: &mut HandlerContext<'_>,
    (_, held_item): (Character, CharacterHeldItem),
) -> HandlerResult {
    if !event.is_down() {
        return Ok(());
    }
    let item = held_item.selected_item;
    if !context.world().exists(item) {
        return Ok(());
    }

    let character = context.entity();
    let authority = context
        .world()
        .resource::<NetworkMode>()
        .copied()
        .unwrap_or_default()
        .is_authority();
    // authority triggers item use event itself on activation
    let request_is_valid = authority || !context.send(character, OnItemUseEvent::new())?.is_consumed();
    if request_is_valid {
        context
            .resource_mut::<Box<dyn ActivationRequests>>()?
            .activate_owned_item(character, item);
        context.save(held_item);
        event.consume();
    }
    Ok(())
}
