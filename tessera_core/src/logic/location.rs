use ultraviolet::{Rotor3, Vec3};

/// Placement of the entity in the world.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Location {
    pub position: Vec3,
    pub rotation: Rotor3,
    pub scale: f32,
}

impl Location {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            position: Vec3::zero(),
            rotation: Rotor3::identity(),
            scale: 1.0,
        }
    }
}
