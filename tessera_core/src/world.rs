//! Voxel world queries consumed by the client logic.

use ultraviolet::Vec3;

use crate::math::Aabb;

/// Provider of the voxel world data.
pub trait WorldProvider {
    /// Bounds of the block at the position.
    ///
    /// Full blocks occupy the whole unit cube around the block position.
    ///
    fn block_bounds(&self, position: Vec3) -> Aabb {
        Aabb::block(position)
    }

    /// Name of the block at the position.
    fn block_name(&self, position: Vec3) -> &str;
}

/// World of air only, used before any world is loaded.
#[derive(Debug, Default, Copy, Clone)]
pub struct EmptyWorld;

impl WorldProvider for EmptyWorld {
    fn block_name(&self, _position: Vec3) -> &str {
        "engine:air"
    }
}
