//! API for voxel game client built on top of event driven ECS.

pub use tessera_ecs as ecs;

pub mod config;
pub mod error;
pub mod graphics;
pub mod input;
pub mod logic;
pub mod math;
pub mod physics;
pub mod world;
