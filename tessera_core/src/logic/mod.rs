//! Game logic of the client built on top of ECS.

pub mod blocks;
pub mod characters;
pub mod location;
pub mod network;
pub mod notifications;
pub mod players;
