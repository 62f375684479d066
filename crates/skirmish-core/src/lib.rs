//! Skirmish Core - Foundation types for the Skirmish character sandbox
//!
//! This crate provides the pieces shared by the physics and gameplay crates:
//! - Mathematical primitives (re-exported from glam)
//! - Transform type for poses that live outside the physics world
//! - Smooth-damp interpolation for velocity shaping
//! - Time system driving the frame/fixed-step split

pub mod math;
pub mod time;
pub mod types;

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use math::smooth_damp;
pub use time::{GameTime, TimeConfig};
pub use types::Transform;
