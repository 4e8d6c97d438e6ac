//! Network related state of the client.

use tessera_ecs::Entity;

/// Entity which represents connected client.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Client {
    /// Character controlled by this client.
    pub character: Entity,
}

/// Mode of the network of the running game.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum NetworkMode {
    /// Single player game.
    #[default]
    None,
    ListenServer,
    DedicatedServer,
    /// Connected to the remote server.
    Client,
}

impl NetworkMode {
    /// Returns `true` if this side decides the state of the game.
    pub fn is_authority(&self) -> bool {
        !matches!(self, NetworkMode::Client)
    }
}
