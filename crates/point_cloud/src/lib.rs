//! Procedural point clouds for the galaxy viewer: a spiral galaxy with a radial color
//! gradient and a backdrop starfield. Generation is a pure function of the parameters
//! and an injected [`RandomSource`].

mod cloud;
mod color;
mod galaxy;
mod params;
mod random;
mod starfield;
mod store;

pub use cloud::{LengthMismatch, PointCloud};
pub use color::{ColorParseError, Rgb};
pub use galaxy::{branch_angle, generate_galaxy};
pub use params::{GenerationParameters, Invalidated, ParameterError};
pub use random::{RandomSource, ReplaySource};
pub use starfield::{DEFAULT_HALF_EXTENT, StarfieldLayout, StarfieldSettings, generate_starfield};
pub use store::{CloudSlot, ParameterStore};
