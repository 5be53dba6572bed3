//! Cube state model.
//!
//! ```text
//! geometry → faces, part locations, canonical face orders, quarter-turn tables
//!   ↓
//! state    → PermutationState: location/orientation arrays per part category
//! ```

mod error;
mod geometry;
mod state;

pub use error::CubeError;
pub use geometry::{Face, Geometry, PartType, MAX_LAYER_COUNT, MIN_LAYER_COUNT};
pub use state::PermutationState;
