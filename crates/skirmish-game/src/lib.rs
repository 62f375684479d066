//! Skirmish Game - Gameplay logic for the Skirmish character sandbox
//!
//! Currently hosts the player motion controller; combat consumers hang off
//! the attack anchor it maintains.

pub mod player;

pub use player::{CharacterMotionController, MotionConfig, MotionEvents, MoveInput};
