//! Core data models for the pairing engine.

mod group;
mod ids;
mod pairing;
mod player;

pub use group::*;
pub use ids::*;
pub use pairing::*;
pub use player::*;
