//! Player motion module
//!
//! Provides the character motion controller: grounded/ceiling probing,
//! smoothed movement, crouch, jump, and the landed/crouch signals.

mod config;
mod events;
mod motion;

pub use config::{MotionConfig, MotionConfigError};
pub use events::MotionEvents;
pub use motion::{CharacterMotionController, MotionState, MoveInput};
