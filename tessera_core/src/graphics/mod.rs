//! Graphics collaborators of the client: cameras and overlay renderers.
//!
//! Actual rendering backend lives outside of this crate
//! and consumes the state these types record.

pub use camera::*;
pub use overlay::*;

mod camera;
mod overlay;
