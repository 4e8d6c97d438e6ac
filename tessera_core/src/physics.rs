//! Physics query layer consumed by the client logic.

use tessera_ecs::Entity;
use ultraviolet::Vec3;

/// How deep the character collider may sink into geometry vertically
/// before the sweep reports a hit.
pub const VERTICAL_PENETRATION_LEEWAY: f32 = 0.05;

/// Result of the collider sweep.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SweepResult {
    /// Point of the first contact, if there was any.
    pub contact: Option<Vec3>,
}

impl SweepResult {
    pub fn miss() -> Self {
        Self { contact: None }
    }

    pub fn hit(contact: Vec3) -> Self {
        Self {
            contact: Some(contact),
        }
    }

    pub fn has_hit(&self) -> bool {
        self.contact.is_some()
    }
}

/// Physics engine which owns colliders of the characters.
pub trait PhysicsEngine {
    /// Sweeps collider of the character from one position to another.
    ///
    /// Negative `slope_factor` disables sliding along slopes.
    ///
    fn sweep(&self, character: Entity, from: Vec3, to: Vec3, leeway: f32, slope_factor: f32) -> SweepResult;
}
