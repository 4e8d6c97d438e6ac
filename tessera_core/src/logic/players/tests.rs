#![cfg(test)]

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::Key as _;
use tessera_ecs::{Entity, Event, Priority, Scheduler, SystemError, World};
use ultraviolet::Vec3;

use super::*;
use crate::config::Config;
use crate::graphics::{AabbRenderer, Camera, DrawList, PerspectiveCamera};
use crate::input::*;
use crate::logic::blocks::{Block, Mesh};
use crate::logic::characters::*;
use crate::logic::location::Location;
use crate::logic::network::{Client, NetworkMode};
use crate::logic::notifications::NotificationMessageEvent;
use crate::math::Aabb;
use crate::physics::{PhysicsEngine, SweepResult};
use crate::world::{EmptyWorld, WorldProvider};

const W: Input = Input::Key(Key::W);
const DELTA: f32 = 0.016;

type Sweeps = Rc<RefCell<Vec<(Vec3, Vec3)>>>;

struct Obstacle {
    blocked: bool,
    sweeps: Sweeps,
}

impl PhysicsEngine for Obstacle {
    fn sweep(&self, _character: Entity, from: Vec3, to: Vec3, _leeway: f32, _slope_factor: f32) -> SweepResult {
        self.sweeps.borrow_mut().push((from, to));
        if self.blocked {
            SweepResult::hit(to)
        } else {
            SweepResult::miss()
        }
    }
}

#[derive(Debug, Default)]
struct Activations {
    targets: Vec<Entity>,
    items: Vec<Entity>,
}

struct FakeActivation(Rc<RefCell<Activations>>);

impl ActivationRequests for FakeActivation {
    fn activate_target(&mut self, character: Entity) -> bool {
        self.0.borrow_mut().targets.push(character);
        true
    }

    fn activate_owned_item(&mut self, _character: Entity, item: Entity) {
        self.0.borrow_mut().items.push(item);
    }
}

struct Fixture {
    world: World,
    scheduler: Scheduler,
    client: Entity,
    character: Entity,
    draws: DrawList,
    sweeps: Sweeps,
    activations: Rc<RefCell<Activations>>,
}

impl Fixture {
    fn new() -> Self {
        Self::with_config(Config::default())
    }

    fn with_config(config: Config) -> Self {
        let mut world = World::new();
        let character = world.spawn();
        world.insert(character, Character);
        world.insert(character, CharacterMovement::default());
        world.insert(character, GazeMountPoint::default());
        world.insert(character, CharacterHeldItem::default());
        world.insert(character, Location::new(Vec3::new(0.0, 10.0, 0.0)));
        let client = world.spawn();
        world.insert(client, Client { character });
        world.insert(client, Location::new(Vec3::new(0.0, 10.0, 0.0)));

        let sweeps = Sweeps::default();
        let activations = Rc::new(RefCell::new(Activations::default()));
        world.insert_resource(config);
        world.insert_resource(LocalPlayer::new(client, character));
        world.insert_resource(NetworkMode::None);
        world.insert_resource::<Box<dyn Camera>>(Box::new(PerspectiveCamera::new(70.0)));
        world.insert_resource::<Box<dyn PhysicsEngine>>(Box::new(Obstacle {
            blocked: false,
            sweeps: sweeps.clone(),
        }));
        world.insert_resource::<Box<dyn WorldProvider>>(Box::new(EmptyWorld));
        world.insert_resource::<Box<dyn InputSystem>>(Box::new(SimulatedKeyboard::new()));
        world.insert_resource::<Box<dyn ActivationRequests>>(Box::new(FakeActivation(activations.clone())));
        world.insert_resource(Vec::<CharacterMoveInputEvent>::new());
        world.insert_resource(Vec::<String>::new());

        let draws = DrawList::new();
        let mut scheduler = Scheduler::new();
        scheduler.register(&mut world, CharacterSystem).unwrap();
        scheduler
            .register(&mut world, LocalPlayerSystem::new(AabbRenderer::new(draws.clone())))
            .unwrap();

        let dispatcher = scheduler.dispatcher_mut();
        dispatcher.register::<CharacterMoveInputEvent, (), _>("record moves", Priority::TRIVIAL, |event, context, _| {
            context.resource_mut::<Vec<CharacterMoveInputEvent>>()?.push(*event);
            Ok(())
        });
        dispatcher.register::<NotificationMessageEvent, (), _>(
            "record notifications",
            Priority::TRIVIAL,
            |event, context, _| {
                context.resource_mut::<Vec<String>>()?.push(event.message.clone());
                Ok(())
            },
        );

        Self {
            world,
            scheduler,
            client,
            character,
            draws,
            sweeps,
            activations,
        }
    }

    fn send_client<E: Event>(&mut self, event: E) -> E {
        self.scheduler.send(&mut self.world, self.client, event).unwrap()
    }

    fn send_character<E: Event>(&mut self, event: E) -> E {
        self.scheduler.send(&mut self.world, self.character, event).unwrap()
    }

    fn tick(&mut self) {
        self.scheduler.tick(&mut self.world, DELTA);
    }

    fn state(&self) -> &LocalPlayerState {
        self.world.resource::<LocalPlayerState>().unwrap()
    }

    fn movement(&self) -> CharacterMovement {
        *self.world.get::<CharacterMovement>(self.character).unwrap()
    }

    fn eye_height(&self) -> f32 {
        self.world.get::<GazeMountPoint>(self.character).unwrap().translate.y
    }

    fn moves(&self) -> &[CharacterMoveInputEvent] {
        self.world.resource::<Vec<CharacterMoveInputEvent>>().unwrap()
    }

    fn notifications(&self) -> &[String] {
        self.world.resource::<Vec<String>>().unwrap()
    }

    fn camera(&self) -> &dyn Camera {
        self.world.resource::<Box<dyn Camera>>().unwrap().as_ref()
    }

    fn set_obstacle(&mut self, blocked: bool) {
        let sweeps = self.sweeps.clone();
        self.world
            .insert_resource::<Box<dyn PhysicsEngine>>(Box::new(Obstacle { blocked, sweeps }));
    }

    fn poll_keys(&mut self) -> Vec<(Input, ButtonState)> {
        self.world
            .resource_mut::<Box<dyn InputSystem>>()
            .unwrap()
            .poll(DELTA)
            .iter()
            .map(|event| (event.input(), event.state()))
            .collect()
    }
}

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).mag() < 1e-4
}

#[test]
fn test_jump_down_and_up() {
    let mut fixture = Fixture::new();

    let jump = fixture.send_character(ButtonEvent::<Jump>::new(ButtonState::Down, DELTA));
    assert!(jump.is_consumed());
    assert!(fixture.state().is_jump_requested());

    fixture.tick();
    assert!(fixture.moves()[0].jump_requested);
    assert!(!fixture.state().is_jump_requested());

    let jump = fixture.send_character(ButtonEvent::<Jump>::new(ButtonState::Repeat, DELTA));
    assert!(!jump.is_consumed());
    let jump = fixture.send_character(ButtonEvent::<Jump>::new(ButtonState::Up, DELTA));
    assert!(!jump.is_consumed());
    assert!(!fixture.state().is_jump_requested());

    fixture.tick();
    assert!(!fixture.moves()[1].jump_requested);
}

#[test]
fn test_jump_requires_character() {
    let mut fixture = Fixture::new();
    let jump = fixture.send_client(ButtonEvent::<Jump>::new(ButtonState::Down, DELTA));
    assert!(!jump.is_consumed());
    assert!(!fixture.state().is_jump_requested());
}

#[test]
fn test_autorun_is_cancelled_by_releasing_forwards() {
    let mut fixture = Fixture::new();

    let auto_move = fixture.send_client(ButtonEvent::<AutoMove>::new(ButtonState::Down, DELTA));
    assert!(auto_move.is_consumed());
    assert!(fixture.state().is_auto_move());
    assert_eq!(fixture.poll_keys(), [(W, ButtonState::Down)]);
    assert_eq!(fixture.poll_keys(), [(W, ButtonState::Repeat)]);

    let forwards = fixture.send_client(AxisEvent::<Forwards>::new(1.0, DELTA));
    assert!(forwards.is_consumed());
    assert!(fixture.state().is_auto_move());
    assert_eq!(fixture.state().relative_movement().z, 1.0);

    let forwards = fixture.send_client(AxisEvent::<Forwards>::new(0.0, DELTA));
    assert!(forwards.is_consumed());
    assert!(!fixture.state().is_auto_move());
    assert_eq!(fixture.poll_keys(), [(W, ButtonState::Up)]);
    assert!(fixture.poll_keys().is_empty());
}

#[test]
fn test_auto_move_button_toggles() {
    let mut fixture = Fixture::new();
    fixture.send_client(ButtonEvent::<AutoMove>::new(ButtonState::Down, DELTA));
    fixture.send_client(ButtonEvent::<AutoMove>::new(ButtonState::Up, DELTA));
    assert!(fixture.state().is_auto_move());

    fixture.send_client(ButtonEvent::<AutoMove>::new(ButtonState::Down, DELTA));
    assert!(!fixture.state().is_auto_move());
    assert_eq!(fixture.poll_keys(), [(W, ButtonState::Down), (W, ButtonState::Up)]);
}

#[test]
fn test_auto_move_needs_forward_key() {
    let config = Config::from_toml_str(
        r#"
[input.binds]
"engine:forwards" = [{ key = "none" }]
"#,
    )
    .unwrap();
    let mut fixture = Fixture::with_config(config);

    let auto_move = fixture.send_client(ButtonEvent::<AutoMove>::new(ButtonState::Down, DELTA));
    assert!(auto_move.is_consumed());
    assert!(!fixture.state().is_auto_move());
    assert!(fixture.poll_keys().is_empty());
}

#[test]
fn test_stand_up_is_blocked_by_obstacle() {
    let mut fixture = Fixture::new();

    let crouch = fixture.send_client(ButtonEvent::<Crouch>::new(ButtonState::Down, DELTA));
    assert!(crouch.is_consumed());
    assert_eq!(fixture.movement().mode, MovementMode::Crouching);
    assert_eq!(fixture.movement().height, 0.9);
    assert_eq!(fixture.eye_height(), 0.3);

    fixture.set_obstacle(true);
    let crouch = fixture.send_client(ButtonEvent::<Crouch>::new(ButtonState::Up, DELTA));
    assert!(crouch.is_consumed());
    assert_eq!(fixture.movement().mode, MovementMode::Crouching);
    assert_eq!(fixture.movement().height, 0.9);
    assert_eq!(fixture.notifications(), ["Cannot stand up here!"]);

    let (from, to) = fixture.sweeps.borrow()[0];
    assert!(approx(from, Vec3::new(0.0, 10.0, 0.0)));
    assert!(approx(to, Vec3::new(0.0, 10.9, 0.0)));
}

#[test]
fn test_stand_up_when_clear() {
    let mut fixture = Fixture::new();
    fixture.send_client(ButtonEvent::<Crouch>::new(ButtonState::Down, DELTA));
    fixture.send_client(ButtonEvent::<Crouch>::new(ButtonState::Up, DELTA));

    assert_eq!(fixture.movement().mode, MovementMode::Walking);
    assert_eq!(fixture.movement().height, 1.8);
    assert_eq!(fixture.eye_height(), 0.6);
    assert!(fixture.notifications().is_empty());
    assert_eq!(fixture.sweeps.borrow().len(), 1);
}

#[test]
fn test_crouch_mode_toggles() {
    let mut fixture = Fixture::new();
    fixture.send_client(ButtonEvent::<CrouchMode>::new(ButtonState::Down, DELTA));
    fixture.send_client(ButtonEvent::<CrouchMode>::new(ButtonState::Up, DELTA));
    assert_eq!(fixture.movement().mode, MovementMode::Crouching);

    fixture.send_client(ButtonEvent::<CrouchMode>::new(ButtonState::Down, DELTA));
    assert_eq!(fixture.movement().mode, MovementMode::Walking);
}

#[test]
fn test_chat_stops_character() {
    let mut fixture = Fixture::new();
    fixture.send_client(AxisEvent::<Strafe>::new(1.0, DELTA));
    fixture.send_client(AxisEvent::<Forwards>::new(1.0, DELTA));
    fixture.send_client(ButtonEvent::<ToggleSpeedTemporarily>::new(ButtonState::Down, DELTA));
    fixture.send_client(ButtonEvent::<Crouch>::new(ButtonState::Down, DELTA));
    assert!(!fixture.state().is_running());

    let chat = fixture.send_client(ButtonEvent::<Chat>::new(ButtonState::Down, DELTA));
    assert!(!chat.is_consumed());
    assert_eq!(fixture.state().relative_movement(), Vec3::zero());
    assert!(fixture.state().is_running());
    assert_eq!(fixture.movement().mode, MovementMode::Walking);
}

#[test]
fn test_chat_keeps_auto_move() {
    let mut fixture = Fixture::new();
    fixture.send_client(ButtonEvent::<AutoMove>::new(ButtonState::Down, DELTA));
    fixture.send_client(AxisEvent::<Forwards>::new(1.0, DELTA));
    fixture.send_client(AxisEvent::<Strafe>::new(-1.0, DELTA));

    fixture.send_client(ButtonEvent::<Chat>::new(ButtonState::Down, DELTA));
    assert_eq!(fixture.state().relative_movement(), Vec3::new(0.0, 0.0, 1.0));
    assert!(fixture.state().is_auto_move());
}

#[test]
fn test_speed_toggles() {
    let mut fixture = Fixture::new();
    assert!(fixture.state().is_running());

    fixture.send_client(ButtonEvent::<ToggleSpeedTemporarily>::new(ButtonState::Down, DELTA));
    assert!(!fixture.state().is_running());
    fixture.send_client(ButtonEvent::<ToggleSpeedTemporarily>::new(ButtonState::Up, DELTA));
    assert!(fixture.state().is_running());

    let toggle = fixture.send_client(ButtonEvent::<ToggleSpeedPermanently>::new(ButtonState::Down, DELTA));
    assert!(toggle.is_consumed());
    assert!(!fixture.state().is_run_per_default());
    assert!(!fixture.state().is_running());

    fixture.send_client(ButtonEvent::<ToggleSpeedTemporarily>::new(ButtonState::Down, DELTA));
    assert!(fixture.state().is_running());
}

#[test]
fn test_look_is_integrated_on_update() {
    let mut fixture = Fixture::new();
    let mouse = fixture.send_character(AxisEvent::<MouseX>::new(30.0, DELTA));
    assert!(mouse.is_consumed());
    fixture.send_character(AxisEvent::<MouseY>::new(120.0, DELTA));
    let ignored = fixture.send_client(AxisEvent::<RotationYaw>::new(5.0, DELTA));
    assert!(!ignored.is_consumed());

    fixture.tick();
    assert_eq!(fixture.state().look_yaw(), -30.0);
    assert_eq!(fixture.state().look_pitch(), 89.0);
    let input = fixture.moves()[0];
    assert_eq!(input.sequence_number, 1);
    assert_eq!(input.yaw, -30.0);
    assert_eq!(input.pitch, 89.0);
    assert_eq!(input.delta_ms, 16);

    fixture.send_character(AxisEvent::<RotationYaw>::new(350.0, DELTA));
    fixture.tick();
    assert_eq!(fixture.state().look_yaw(), -20.0);
    assert_eq!(fixture.moves()[1].sequence_number, 2);
    assert_eq!(fixture.state().input_sequence_number(), 3);
}

#[test]
fn test_movement_depends_on_mode() {
    let mut fixture = Fixture::new();
    fixture.send_client(AxisEvent::<Forwards>::new(1.0, DELTA));
    fixture.send_client(AxisEvent::<Vertical>::new(1.0, DELTA));

    fixture.tick();
    assert!(approx(fixture.moves()[0].movement, Vec3::new(0.0, 0.0, 1.0)));

    let character = fixture.character;
    fixture.send_character(SetMovementModeEvent::new(MovementMode::Climbing));
    assert_eq!(fixture.world.get::<CharacterMovement>(character).unwrap().mode, MovementMode::Climbing);
    fixture.tick();
    assert!(approx(fixture.moves()[1].movement, Vec3::new(0.0, 1.0, 1.0)));

    fixture.send_character(SetMovementModeEvent::new(MovementMode::Swimming));
    fixture.send_client(AxisEvent::<VerticalReal>::new(-0.5, DELTA));
    fixture.tick();
    assert!(approx(fixture.moves()[2].movement, Vec3::new(0.0, -0.5, 1.0)));
}

#[test]
fn test_movement_follows_yaw() {
    let mut fixture = Fixture::new();
    fixture.send_character(AxisEvent::<MouseX>::new(-90.0, DELTA));
    fixture.send_client(AxisEvent::<Forwards>::new(1.0, DELTA));

    fixture.tick();
    assert_eq!(fixture.state().look_yaw(), 90.0);
    assert!(approx(fixture.moves()[0].movement, Vec3::new(1.0, 0.0, 0.0)));

    fixture.send_client(AxisEvent::<Forwards>::new(0.0, DELTA));
    fixture.send_client(AxisEvent::<Strafe>::new(1.0, DELTA));
    fixture.tick();
    assert!(approx(fixture.moves()[1].movement, Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn test_sequence_number_wraps() {
    let mut fixture = Fixture::new();
    fixture.world.resource_mut::<LocalPlayerState>().unwrap().input_sequence_number = u32::MAX;

    fixture.tick();
    fixture.tick();
    assert_eq!(fixture.moves()[0].sequence_number, u32::MAX);
    assert_eq!(fixture.moves()[1].sequence_number, 0);
}

#[test]
fn test_player_spawn_applies_config() {
    let config = Config::from_toml_str(
        r#"
[player]
height = 2.0
eye_height = 0.75
"#,
    )
    .unwrap();
    let mut fixture = Fixture::with_config(config);
    fixture.send_character(AxisEvent::<MouseX>::new(45.0, DELTA));

    fixture.send_client(OnPlayerSpawnedEvent);
    assert!(fixture.moves().is_empty());

    fixture.send_character(OnPlayerSpawnedEvent);
    assert_eq!(fixture.movement().height, 2.0);
    assert_eq!(fixture.eye_height(), 0.75);
    assert_eq!(fixture.moves().len(), 1);
    assert_eq!(fixture.moves()[0].delta_ms, 0);
    assert!(approx(fixture.camera().position(), Vec3::new(0.0, 10.75, 0.0)));
}

#[test]
fn test_target_highlight() {
    let mut fixture = Fixture::new();
    let block = fixture.world.spawn();
    fixture.world.insert(block, Block);
    fixture.world.insert(block, Location::new(Vec3::new(3.2, 4.0, 5.0)));

    fixture.send_character(PlayerTargetChangedEvent {
        old_target: Entity::null(),
        new_target: block,
    });
    assert_eq!(fixture.state().target_aabb(), Some(&Aabb::block(Vec3::new(3.0, 4.0, 5.0))));

    fixture.scheduler.render(&fixture.world);
    let lines = fixture.draws.drain();
    assert_eq!(lines.len(), 12);
    assert!(lines.iter().all(|line| line.thickness == 2.0));

    let object = fixture.world.spawn();
    fixture.world.insert(
        object,
        Mesh {
            aabb: Some(Aabb::from_center_extents(Vec3::zero(), Vec3::one())),
        },
    );
    fixture.world.insert(
        object,
        Location {
            scale: 2.0,
            ..Location::new(Vec3::new(0.0, 1.0, 0.0))
        },
    );
    fixture.send_character(PlayerTargetChangedEvent {
        old_target: block,
        new_target: object,
    });
    let aabb = *fixture.state().target_aabb().unwrap();
    assert!(approx(aabb.min(), Vec3::new(-2.0, -1.0, -2.0)));
    assert!(approx(aabb.max(), Vec3::new(2.0, 3.0, 2.0)));

    fixture.world.despawn(object);
    fixture.send_character(PlayerTargetChangedEvent {
        old_target: object,
        new_target: object,
    });
    assert!(fixture.state().target_aabb().is_none());
    fixture.scheduler.render(&fixture.world);
    assert!(fixture.draws.is_empty());
}

#[test]
fn test_placing_box_can_be_disabled() {
    let mut config = Config::default();
    config.rendering_mut().render_placing_box = false;
    let mut fixture = Fixture::with_config(config);
    let block = fixture.world.spawn();
    fixture.world.insert(block, Block);
    fixture.world.insert(block, Location::default());

    fixture.send_character(PlayerTargetChangedEvent {
        old_target: Entity::null(),
        new_target: block,
    });
    assert!(fixture.state().target_aabb().is_some());
    fixture.tick();
    assert!(fixture.draws.is_empty());
}

#[test]
fn test_frob_closes_interaction_first() {
    let mut fixture = Fixture::new();
    let character = fixture.character;
    fixture.world.insert(
        character,
        Interaction {
            screen: Some("engine:chest".to_string()),
        },
    );

    let frob = fixture.send_character(ButtonEvent::<Frob>::new(ButtonState::Down, DELTA));
    assert!(!frob.is_consumed());
    assert_eq!(fixture.world.get::<Interaction>(character).unwrap().screen, None);
    assert!(fixture.activations.borrow().targets.is_empty());

    let frob = fixture.send_character(ButtonEvent::<Frob>::new(ButtonState::Down, DELTA));
    assert!(frob.is_consumed());
    assert_eq!(fixture.activations.borrow().targets, [character]);

    let frob = fixture.send_character(ButtonEvent::<Frob>::new(ButtonState::Up, DELTA));
    assert!(!frob.is_consumed());
    assert_eq!(fixture.activations.borrow().targets.len(), 1);
}

#[test]
fn test_use_item() {
    let mut fixture = Fixture::new();
    let use_item = fixture.send_character(ButtonEvent::<UseItem>::new(ButtonState::Down, DELTA));
    assert!(!use_item.is_consumed());

    let item = fixture.world.spawn();
    let character = fixture.character;
    fixture.world.insert(character, CharacterHeldItem { selected_item: item });
    let use_item = fixture.send_character(ButtonEvent::<UseItem>::new(ButtonState::Down, DELTA));
    assert!(use_item.is_consumed());
    assert_eq!(fixture.activations.borrow().items, [item]);

    fixture.world.insert_resource(NetworkMode::Client);
    fixture.send_character(ButtonEvent::<UseItem>::new(ButtonState::Down, DELTA));
    assert_eq!(fixture.activations.borrow().items.len(), 2);

    fixture
        .scheduler
        .dispatcher_mut()
        .register::<OnItemUseEvent, (), _>("veto", Priority::HIGH, |event, _, _| {
            event.consume();
            Ok(())
        });
    let use_item = fixture.send_character(ButtonEvent::<UseItem>::new(ButtonState::Down, DELTA));
    assert!(!use_item.is_consumed());
    assert_eq!(fixture.activations.borrow().items.len(), 2);
}

#[test]
fn test_camera_follows_character() {
    let mut fixture = Fixture::new();
    let initial_direction = fixture.camera().view_direction();
    fixture.tick();
    assert!(approx(fixture.camera().position(), Vec3::new(0.0, 10.6, 0.0)));
    assert!(approx(fixture.camera().view_direction(), initial_direction));
    assert!(approx(fixture.camera().view_direction(), Vec3::unit_z()));
    assert_eq!(fixture.camera().fov(), 70.0);

    fixture.send_character(SetMovementModeEvent::new(MovementMode::Ghosting));
    fixture.tick();
    assert_eq!(fixture.camera().fov(), 94.0);

    fixture.send_character(SetMovementModeEvent::new(MovementMode::Walking));
    fixture.tick();
    assert_eq!(fixture.camera().fov(), 70.0);
}

#[test]
fn test_bob_factor_wraps_steps() {
    let mut fixture = Fixture::new();
    let character = fixture.character;
    let set_footstep = |fixture: &mut Fixture, footstep_delta: f32| {
        let mut movement = fixture.movement();
        movement.footstep_delta = footstep_delta;
        fixture.world.save(character, movement);
    };

    set_footstep(&mut fixture, 0.25);
    fixture.tick();
    assert!((fixture.state().bob_factor() - 0.25).abs() < 1e-5);

    set_footstep(&mut fixture, 0.1);
    fixture.tick();
    assert!((fixture.state().bob_factor() - 1.1).abs() < 1e-5);
}

#[test]
fn test_update_without_local_player() {
    let mut fixture = Fixture::new();
    fixture.world.remove_resource::<LocalPlayer>();
    fixture.tick();
    assert!(fixture.moves().is_empty());

    let character = fixture.character;
    fixture.world.insert_resource(LocalPlayer::new(fixture.client, character));
    fixture.world.despawn(character);
    fixture.tick();
    assert!(fixture.moves().is_empty());
}

#[test]
fn test_initialization_requires_config() {
    let mut world = World::new();
    let mut scheduler = Scheduler::new();
    let result = scheduler.register(&mut world, LocalPlayerSystem::new(AabbRenderer::new(DrawList::new())));
    assert!(matches!(result, Err(SystemError::MissingResource("Config"))));
    assert!(scheduler.is_empty());
}
