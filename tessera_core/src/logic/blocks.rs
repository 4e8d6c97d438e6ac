//! Components of entities which represent blocks of the world.

use crate::math::Aabb;

/// Entity which represents single block of the world.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Block;

/// Entity which represents region of blocks of the world.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct BlockRegion;

/// Renderable geometry of the entity.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Bounds of the geometry in the space of the entity, if loaded.
    pub aabb: Option<Aabb>,
}
