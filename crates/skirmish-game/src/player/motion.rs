//! Character motion controller
//!
//! Drives a dynamic capsule body: grounded/ceiling overlap probes, smoothed
//! horizontal movement, crouch with an upper-body collider toggle, jump
//! impulses, and fall-speed shaping. The host scheduler calls
//! [`CharacterMotionController::on_physics_tick`] once per fixed step,
//! [`CharacterMotionController::on_frame_tick`] once per frame, and feeds
//! movement intents through [`CharacterMotionController::move_character`].
//!
//! The host owns the single controller instance and every collaborator it
//! needs; there is no global state.

use glam::Vec3;
use rapier3d::prelude::*;
use tracing::{debug, info};

use skirmish_core::{smooth_damp, Transform};
use skirmish_physics::{layers, PhysicsWorld};

use super::{MotionConfig, MotionConfigError, MotionEvents};

/// Capsule height in meters
const CAPSULE_HEIGHT: f32 = 1.8;
/// Capsule radius in meters
const CAPSULE_RADIUS: f32 = 0.4;
/// Body mass in kilograms; the default jump impulse is tuned against this
const CHARACTER_MASS: f32 = 50.0;
/// Input units are scaled by this factor into target velocity
const SPEED_SCALE: f32 = 10.0;
/// Attack anchor distance in front of the character
const ANCHOR_FORWARD_OFFSET: f32 = 0.75;
/// Anchor rotation applied on every facing flip, degrees around world Y
const ANCHOR_FLIP_DEGREES: f32 = -45.0;

/// Movement intent for one simulation tick
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveInput {
    /// Sideways input, positive = right
    pub horizontal: f32,
    /// Depth input, positive = forward
    pub vertical: f32,
    /// Whether crouch is requested
    pub crouch: bool,
    /// Whether a jump is requested
    pub jump: bool,
}

/// Mutable per-tick state owned by the controller
#[derive(Debug, Clone)]
pub struct MotionState {
    /// Whether the ground probe found support this step
    pub grounded: bool,
    /// Whether the character was crouching on the previous move call
    pub was_crouching: bool,
    /// Which way the character is facing (drives the attack anchor)
    pub facing_right: bool,
    /// Strict-sign movement direction bookkeeping
    pub direction_right: bool,
    /// Smoothing accumulator for the velocity spring
    damp_velocity: Vec3,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            grounded: true,
            was_crouching: false,
            facing_right: true,
            direction_right: true,
            damp_velocity: Vec3::ZERO,
        }
    }
}

/// Player character motion controller
pub struct CharacterMotionController {
    config: MotionConfig,
    state: MotionState,
    /// The dynamic body being driven
    body: RigidBodyHandle,
    /// Upper-body collider disabled while crouching
    crouch_collider: Option<ColliderHandle>,
    /// Ground probe point, relative to the body center
    ground_check: Vec3,
    /// Ceiling probe point, relative to the body center
    ceiling_check: Vec3,
    /// Combat origin kept in front of the character, relative to the feet
    attack_anchor: Transform,
    /// Landed / crouch-changed signal registry
    pub events: MotionEvents,
}

impl CharacterMotionController {
    /// Spawn the character at a feet position in the physics world.
    ///
    /// Builds a rotation-locked dynamic body carrying two stacked capsule
    /// colliders; the upper one is the crouch collider.
    pub fn spawn(
        physics: &mut PhysicsWorld,
        config: MotionConfig,
        position: Vec3,
    ) -> Result<Self, MotionConfigError> {
        config.validate()?;

        let center_y = position.y + CAPSULE_HEIGHT / 2.0;
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, center_y, position.z])
            .lock_rotations()
            .additional_mass(CHARACTER_MASS)
            .build();

        // Each half-capsule covers half the character height
        let half_segment = (CAPSULE_HEIGHT / 2.0 - 2.0 * CAPSULE_RADIUS) / 2.0;
        let lower = ColliderBuilder::capsule_y(half_segment.max(0.01), CAPSULE_RADIUS)
            .translation(vector![0.0, -CAPSULE_HEIGHT / 4.0, 0.0])
            .collision_groups(layers::player_collider_groups())
            .friction(0.0)
            .friction_combine_rule(CoefficientCombineRule::Min)
            .restitution(0.0)
            .build();
        let (body_handle, _) = physics.add_dynamic_body(body, lower);

        let upper = ColliderBuilder::capsule_y(half_segment.max(0.01), CAPSULE_RADIUS)
            .translation(vector![0.0, CAPSULE_HEIGHT / 4.0, 0.0])
            .collision_groups(layers::player_collider_groups())
            .friction(0.0)
            .friction_combine_rule(CoefficientCombineRule::Min)
            .restitution(0.0)
            .build();
        let crouch_collider = physics.attach_collider(upper, body_handle);

        let anchor_offset = Vec3::new(ANCHOR_FORWARD_OFFSET, CAPSULE_HEIGHT / 2.0, 0.0);

        info!("Spawned character motion controller at {:?}", position);

        Ok(Self {
            config,
            state: MotionState::default(),
            body: body_handle,
            crouch_collider: Some(crouch_collider),
            ground_check: Vec3::new(0.0, -CAPSULE_HEIGHT / 2.0, 0.0),
            ceiling_check: Vec3::new(0.0, CAPSULE_HEIGHT / 2.0, 0.0),
            attack_anchor: Transform::from_position(anchor_offset),
            events: MotionEvents::new(),
        })
    }

    /// Whether the ground probe currently finds support
    pub fn grounded(&self) -> bool {
        self.state.grounded
    }

    /// Whether the character is currently crouching
    pub fn is_crouching(&self) -> bool {
        self.state.was_crouching
    }

    /// Which way the character is facing
    pub fn facing_right(&self) -> bool {
        self.state.facing_right
    }

    /// Strict-sign movement direction from the last move call
    pub fn direction_right(&self) -> bool {
        self.state.direction_right
    }

    /// The combat origin in front of the character, relative to the feet
    pub fn attack_anchor(&self) -> &Transform {
        &self.attack_anchor
    }

    /// The combat origin in world space, if the body still exists
    pub fn attack_anchor_world(&self, physics: &PhysicsWorld) -> Option<Transform> {
        self.position(physics).map(|feet| {
            let mut anchor = self.attack_anchor;
            anchor.position += feet;
            anchor
        })
    }

    /// World-space feet position, if the body still exists
    pub fn position(&self, physics: &PhysicsWorld) -> Option<Vec3> {
        self.body_center(physics)
            .map(|center| center - Vec3::new(0.0, CAPSULE_HEIGHT / 2.0, 0.0))
    }

    /// Current linear velocity, if the body still exists
    pub fn velocity(&self, physics: &PhysicsWorld) -> Option<Vec3> {
        physics
            .get_rigid_body(self.body)
            .map(|body| Vec3::new(body.linvel().x, body.linvel().y, body.linvel().z))
    }

    fn body_center(&self, physics: &PhysicsWorld) -> Option<Vec3> {
        physics.get_rigid_body(self.body).map(|body| {
            Vec3::new(body.translation().x, body.translation().y, body.translation().z)
        })
    }

    fn probe_filter(&self) -> QueryFilter<'_> {
        QueryFilter::default()
            .groups(layers::probe_filter(self.config.ground_layers))
            .exclude_rigid_body(self.body)
    }

    /// Update grounded state from the ground probe. Runs once per fixed
    /// physics step, after the world has stepped.
    pub fn on_physics_tick(&mut self, physics: &PhysicsWorld) {
        let Some(center) = self.body_center(physics) else {
            return;
        };

        let was_grounded = self.state.grounded;
        let hits = physics.overlap_sphere(
            center + self.ground_check,
            self.config.grounded_radius,
            self.probe_filter(),
        );
        self.state.grounded = !hits.is_empty();

        if self.state.grounded && !was_grounded {
            debug!("character landed");
            self.events.fire_landed();
        }
    }

    /// Steepen the falling arc beyond default gravity. Runs once per
    /// rendered frame.
    pub fn on_frame_tick(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        let gravity_y = physics.config.gravity.y;
        let fall_multiplier = self.config.fall_multiplier;

        let Some(body) = physics.get_rigid_body_mut(self.body) else {
            return;
        };
        let mut velocity = *body.linvel();
        if velocity.y < 0.0 {
            velocity.y += fall_multiplier * gravity_y * dt;
            body.set_linvel(velocity, true);
        }
    }

    /// Apply one tick of movement intent.
    ///
    /// Crouch is forced while a ceiling blocks standing up. Movement and
    /// turning only run while grounded or with air control enabled; the
    /// jump impulse is gated on grounded alone.
    pub fn move_character(&mut self, physics: &mut PhysicsWorld, input: MoveInput) {
        let mut crouch = input.crouch;

        // A ceiling overhead keeps the character crouched even when
        // release was requested
        if !crouch {
            if let Some(center) = self.body_center(physics) {
                let blocked = !physics
                    .overlap_sphere(
                        center + self.ceiling_check,
                        self.config.ceiling_radius,
                        self.probe_filter(),
                    )
                    .is_empty();
                if blocked {
                    crouch = true;
                }
            }
        }

        if self.state.grounded || self.config.air_control {
            let mut horizontal = input.horizontal;
            let mut vertical = input.vertical;

            if crouch {
                if !self.state.was_crouching {
                    self.state.was_crouching = true;
                    debug!("character crouched");
                    self.events.fire_crouch_changed(true);
                }

                horizontal *= self.config.crouch_speed;
                vertical *= self.config.crouch_speed;

                self.set_crouch_collider_enabled(physics, false);
            } else {
                self.set_crouch_collider_enabled(physics, true);

                if self.state.was_crouching {
                    self.state.was_crouching = false;
                    debug!("character stood up");
                    self.events.fire_crouch_changed(false);
                }
            }

            let dt = physics.config.timestep;
            let smoothing = self.config.movement_smoothing;

            if let Some(body) = physics.get_rigid_body_mut(self.body) {
                let current =
                    Vec3::new(body.linvel().x, body.linvel().y, body.linvel().z);
                let target =
                    Vec3::new(horizontal * SPEED_SCALE, current.y, vertical * SPEED_SCALE);
                let smoothed = smooth_damp(
                    current,
                    target,
                    &mut self.state.damp_velocity,
                    smoothing,
                    dt,
                );
                body.set_linvel(vector![smoothed.x, smoothed.y, smoothed.z], true);
            }

            if horizontal > 0.0 {
                self.state.direction_right = true;
            } else if horizontal < 0.0 || self.config.idle_resets_direction {
                self.state.direction_right = false;
            }

            // Turn when input direction and facing disagree
            if horizontal > 0.0 && !self.state.facing_right {
                self.flip_attack_anchor();
            } else if horizontal < 0.0 && self.state.facing_right {
                self.flip_attack_anchor();
            }
        }

        if self.state.grounded && input.jump {
            let jump_force = self.config.jump_force;
            if let Some(body) = physics.get_rigid_body_mut(self.body) {
                body.apply_impulse(vector![0.0, jump_force, 0.0], true);
            }
        }
    }

    /// Remove the character's body and colliders from the physics world.
    ///
    /// Tick methods called on a despawned controller are no-ops.
    pub fn despawn(&mut self, physics: &mut PhysicsWorld) {
        physics.remove_rigid_body(self.body);
        self.crouch_collider = None;
        info!("Despawned character motion controller");
    }

    fn set_crouch_collider_enabled(&self, physics: &mut PhysicsWorld, enabled: bool) {
        if let Some(handle) = self.crouch_collider {
            if let Some(collider) = physics.get_collider_mut(handle) {
                collider.set_enabled(enabled);
            }
        }
    }

    // The anchor is stored relative to the character, so rotating about
    // its local origin is the same as orbiting the character's position.
    fn flip_attack_anchor(&mut self) {
        self.state.facing_right = !self.state.facing_right;
        self.attack_anchor
            .rotate_around(Vec3::ZERO, Vec3::Y, ANCHOR_FLIP_DEGREES.to_radians());
    }
}

impl std::fmt::Debug for CharacterMotionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacterMotionController")
            .field("state", &self.state)
            .field("body", &self.body)
            .field("attack_anchor", &self.attack_anchor)
            .finish()
    }
}
