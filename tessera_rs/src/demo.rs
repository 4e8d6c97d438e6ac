//! Collaborators of the headless client and routing of key events to binds.

use std::collections::HashSet;

use tessera_core::config::Config;
use tessera_core::ecs::{
    DispatchError, Dispatcher, Entity, Event, HandlerContext, HandlerResult, Priority, Scheduler, System,
    SystemError, World,
};
use tessera_core::input::{
    AutoMove, AxisEvent, Bind, ButtonEvent, ButtonState, Chat, Crouch, CrouchMode, Forwards, Frob, Jump, KeyEvent,
    Strafe, ToggleSpeedPermanently, ToggleSpeedTemporarily, UseItem,
};
use tessera_core::logic::notifications::NotificationMessageEvent;
use tessera_core::logic::players::{ActivationRequests, LocalPlayer};
use tessera_core::physics::{PhysicsEngine, SweepResult};
use ultraviolet::Vec3;

/// Physics of the world which is closed from above by a flat ceiling.
#[derive(Debug, Copy, Clone)]
pub struct Ceiling {
    height: f32,
}

impl Ceiling {
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl PhysicsEngine for Ceiling {
    fn sweep(&self, _character: Entity, _from: Vec3, to: Vec3, leeway: f32, _slope_factor: f32) -> SweepResult {
        if to.y > self.height + leeway {
            SweepResult::hit(Vec3::new(to.x, self.height, to.z))
        } else {
            SweepResult::miss()
        }
    }
}

/// Activation requests which are only written to the log.
#[derive(Debug, Default)]
pub struct ActivationLog;

impl ActivationRequests for ActivationLog {
    fn activate_target(&mut self, character: Entity) -> bool {
        log::info!("character {:?} activates its target", character);
        true
    }

    fn activate_owned_item(&mut self, character: Entity, item: Entity) {
        log::info!("character {:?} uses item {:?}", character, item);
    }
}

/// Writes notifications for the player to the log.
#[derive(Debug, Default)]
pub struct NotificationLogSystem;

impl NotificationLogSystem {
    fn on_notification(
        event: &mut NotificationMessageEvent,
        _context: &mut HandlerContext<'_>,
        _: (),
    ) -> HandlerResult {
        log::info!("notification from {:?}: {}", event.from, event.message);
        Ok(())
    }
}

impl System for NotificationLogSystem {
    fn initialize(&mut self, _world: &mut World, dispatcher: &mut Dispatcher) -> Result<(), SystemError> {
        dispatcher.register::<NotificationMessageEvent, (), _>(
            "NotificationLogSystem::on_notification",
            Priority::LOW,
            Self::on_notification,
        );
        Ok(())
    }
}

/// Turns raw key events into events of the binds they are assigned to.
#[derive(Debug, Default)]
pub struct KeyRouter {
    held: HashSet<String>,
}

impl KeyRouter {
    pub fn route(
        &mut self,
        scheduler: &Scheduler,
        world: &mut World,
        player: LocalPlayer,
        event: &KeyEvent,
    ) -> Result<(), DispatchError> {
        let uri = match world
            .resource::<Config>()
            .and_then(|config| config.input().binds.uri_of(event.input()))
        {
            Some(uri) => uri.to_string(),
            None => {
                log::trace!("{} is not bound", event.input());
                return Ok(());
            }
        };
        if event.is_down() {
            self.held.insert(uri.clone());
        } else {
            self.held.remove(&uri);
        }

        let (client, character) = (player.client(), player.character());
        let (state, delta) = (event.state(), event.delta());
        match uri.as_str() {
            "engine:forwards" | "engine:backwards" => {
                let value = self.axis("engine:forwards", "engine:backwards");
                send(scheduler, world, client, AxisEvent::<Forwards>::new(value, delta))
            }
            "engine:left" | "engine:right" => {
                let value = self.axis("engine:left", "engine:right");
                send(scheduler, world, client, AxisEvent::<Strafe>::new(value, delta))
            }
            uri if uri == Jump::URI => button::<Jump>(scheduler, world, character, state, delta),
            uri if uri == Frob::URI => button::<Frob>(scheduler, world, character, state, delta),
            uri if uri == UseItem::URI => button::<UseItem>(scheduler, world, character, state, delta),
            uri if uri == Crouch::URI => button::<Crouch>(scheduler, world, client, state, delta),
            uri if uri == CrouchMode::URI => button::<CrouchMode>(scheduler, world, client, state, delta),
            uri if uri == AutoMove::URI => button::<AutoMove>(scheduler, world, client, state, delta),
            uri if uri == Chat::URI => button::<Chat>(scheduler, world, client, state, delta),
            uri if uri == ToggleSpeedTemporarily::URI => {
                button::<ToggleSpeedTemporarily>(scheduler, world, client, state, delta)
            }
            uri if uri == ToggleSpeedPermanently::URI => {
                button::<ToggleSpeedPermanently>(scheduler, world, client, state, delta)
            }
            uri => {
                log::trace!("bind {} has no handler", uri);
                Ok(())
            }
        }
    }

    fn axis(&self, positive: &str, negative: &str) -> f32 {
        let value = |uri: &str| if self.held.contains(uri) { 1.0 } else { 0.0 };
        value(positive) - value(negative)
    }
}

fn button<B>(
    scheduler: &Scheduler,
    world: &mut World,
    entity: Entity,
    state: ButtonState,
    delta: f32,
) -> Result<(), DispatchError>
where
    B: Bind,
{
    send(scheduler, world, entity, ButtonEvent::<B>::new(state, delta))
}

fn send<E>(scheduler: &Scheduler, world: &mut World, entity: Entity, event: E) -> Result<(), DispatchError>
where
    E: Event,
{
    let event = scheduler.send(world, entity, event)?;
    if event.is_consumed() {
        log::trace!("{} consumed by {:?}", std::any::type_name::<E>(), entity);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tessera_core::input::{Input, Key};

    use super::*;

    fn key(key: Key, state: ButtonState) -> KeyEvent {
        KeyEvent::new(Input::Key(key), state, 0.016)
    }

    #[test]
    fn test_ceiling_blocks_sweep() {
        let ceiling = Ceiling::new(2.0);
        let from = Vec3::new(0.0, 1.0, 0.0);
        assert!(!ceiling.sweep(Entity::default(), from, Vec3::new(0.0, 2.0, 0.0), 0.05, -1.0).has_hit());
        assert!(ceiling.sweep(Entity::default(), from, Vec3::new(0.0, 2.5, 0.0), 0.05, -1.0).has_hit());
    }

    #[test]
    fn test_opposite_keys_cancel_out() {
        let mut world = World::new();
        world.insert_resource(Config::default());
        let client = world.spawn();
        let character = world.spawn();
        let player = LocalPlayer::new(client, character);
        let scheduler = Scheduler::new();
        let mut router = KeyRouter::default();

        router.route(&scheduler, &mut world, player, &key(Key::W, ButtonState::Down)).unwrap();
        assert_eq!(router.axis("engine:forwards", "engine:backwards"), 1.0);
        router.route(&scheduler, &mut world, player, &key(Key::S, ButtonState::Down)).unwrap();
        assert_eq!(router.axis("engine:forwards", "engine:backwards"), 0.0);
        router.route(&scheduler, &mut world, player, &key(Key::W, ButtonState::Up)).unwrap();
        assert_eq!(router.axis("engine:forwards", "engine:backwards"), -1.0);
        router.route(&scheduler, &mut world, player, &key(Key::Q, ButtonState::Down)).unwrap();
        assert_eq!(router.held.len(), 1);
    }
}
