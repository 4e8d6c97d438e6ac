//! Headless voxel client driven by the tessera event driven ECS.

use tessera_core::config::{Config, ENGINE_NAME, ENGINE_VERSION};
use tessera_core::ecs::{DispatchError, Entity, Scheduler, World};
use tessera_core::error::{Error, Result};
use tessera_core::graphics::{AabbRenderer, Camera, DrawList, PerspectiveCamera};
use tessera_core::input::{Input, InputSystem, Key, MouseButton, SimulatedKeyboard};
use tessera_core::logic::blocks::Block;
use tessera_core::logic::characters::{Character, CharacterHeldItem, CharacterMovement, CharacterSystem, GazeMountPoint};
use tessera_core::logic::location::Location;
use tessera_core::logic::network::{Client, NetworkMode};
use tessera_core::logic::players::{
    ActivationRequests, LocalPlayer, LocalPlayerState, LocalPlayerSystem, OnPlayerSpawnedEvent,
    PlayerTargetChangedEvent,
};
use tessera_core::physics::PhysicsEngine;
use tessera_core::world::{EmptyWorld, WorldProvider};
use ultraviolet::Vec3;

use demo::{ActivationLog, Ceiling, KeyRouter, NotificationLogSystem};

mod demo;
mod logger;

const CONFIG_PATH: &str = "tessera.toml";
const TICKS: u64 = 120;
const DELTA: f32 = 1.0 / 60.0;

/// Entry point of `tessera` headless client
fn main() -> Result<()> {
    let (config, config_error) = match Config::load(CONFIG_PATH) {
        Ok(config) => (config, None),
        Err(error) => (Config::default(), Some(Error::from(error))),
    };
    let _handle = logger::init(config.log_level()).map_err(|error| Error::new("logger initialization failed", error))?;
    log::info!("logger initialized successfully");
    if let Some(error) = config_error {
        log::warn!("{}, using defaults", error);
    }
    log::info!("{} {} on {} {}", config.name(), config.version(), ENGINE_NAME, *ENGINE_VERSION);

    let mut world = World::new();
    let local_player = spawn_player(&mut world);
    let target = world.spawn();
    world.insert(target, Block);
    world.insert(target, Location::new(Vec3::new(1.0, 1.0, 2.0)));

    world.insert_resource(config);
    world.insert_resource(local_player);
    world.insert_resource(NetworkMode::None);
    world.insert_resource::<Box<dyn Camera>>(Box::new(PerspectiveCamera::default()));
    world.insert_resource::<Box<dyn PhysicsEngine>>(Box::new(Ceiling::new(1.5)));
    world.insert_resource::<Box<dyn WorldProvider>>(Box::new(EmptyWorld));
    world.insert_resource::<Box<dyn InputSystem>>(Box::new(SimulatedKeyboard::new()));
    world.insert_resource::<Box<dyn ActivationRequests>>(Box::new(ActivationLog));

    let draws = DrawList::new();
    let mut scheduler = Scheduler::new();
    scheduler.register(&mut world, NotificationLogSystem)?;
    scheduler.register(&mut world, CharacterSystem)?;
    scheduler.register(&mut world, LocalPlayerSystem::new(AabbRenderer::new(draws.clone())))?;
    log::debug!("systems: {:?}", scheduler.system_names());

    scheduler
        .send(&mut world, local_player.character(), OnPlayerSpawnedEvent)
        .map_err(dispatch_error)?;
    scheduler.post(
        local_player.character(),
        PlayerTargetChangedEvent {
            old_target: Entity::default(),
            new_target: target,
        },
    );

    let mut router = KeyRouter::default();
    for tick in 0..TICKS {
        if let Some(input) = world.resource_mut::<Box<dyn InputSystem>>() {
            play_script(input.as_mut(), tick);
        }
        let events = world
            .resource_mut::<Box<dyn InputSystem>>()
            .map(|input| input.poll(DELTA))
            .unwrap_or_default();
        for event in &events {
            router
                .route(&scheduler, &mut world, local_player, event)
                .map_err(dispatch_error)?;
        }

        scheduler.tick(&mut world, DELTA);
        log::trace!("tick {} drew {} overlay lines", tick, draws.drain().len());
    }

    if let Some(state) = world.resource::<LocalPlayerState>() {
        log::info!(
            "after {} ticks: yaw {}, pitch {}, {} movement inputs sent",
            scheduler.ticks(),
            state.look_yaw(),
            state.look_pitch(),
            state.input_sequence_number() - 1,
        );
    }
    scheduler.shutdown(&mut world);
    Ok(())
}

fn spawn_player(world: &mut World) -> LocalPlayer {
    let item = world.spawn();
    let character = world.spawn();
    world.insert(character, Character);
    world.insert(character, CharacterMovement::default());
    world.insert(character, GazeMountPoint::default());
    world.insert(character, CharacterHeldItem { selected_item: item });
    world.insert(character, Location::new(Vec3::new(0.0, 1.0, 0.0)));

    let client = world.spawn();
    world.insert(client, Client { character });
    world.insert(client, Location::default());
    LocalPlayer::new(client, character)
}

/// Simulates the user pressing keys at fixed ticks.
fn play_script(input: &mut dyn InputSystem, tick: u64) {
    let key = Input::Key;
    match tick {
        10 | 40 => input.simulate_single_key_stroke(key(Key::X)),
        30 => input.simulate_single_key_stroke(key(Key::Space)),
        50 => input.simulate_repeated_key_stroke(key(Key::C)),
        70 => input.cancel_simulated_key_stroke(key(Key::C)),
        90 => input.simulate_single_key_stroke(key(Key::T)),
        100 => input.simulate_single_key_stroke(key(Key::E)),
        110 => input.simulate_single_key_stroke(Input::Mouse(MouseButton::Right)),
        _ => (),
    }
}

fn dispatch_error(error: DispatchError) -> Error {
    Error::new("event dispatch failed", error)
}
