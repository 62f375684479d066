//! Skirmish Physics - Physics simulation using rapier3d
//!
//! Wraps the rapier world behind the few capabilities the gameplay code
//! needs: stepping, body/collider access, and bounded overlap probes.

pub mod layers;

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

/// Physics world configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -9.81 on Y axis)
    pub gravity: Vec3,
    /// Physics timestep (default: 1/60)
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            timestep: 1.0 / 60.0,
        }
    }
}

/// Most overlap hits a single probe reports
pub const MAX_OVERLAP_HITS: usize = 10;

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    /// Configuration
    pub config: PhysicsConfig,

    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Impulse joint storage
    pub impulse_joint_set: ImpulseJointSet,
    /// Multi-body joint storage
    pub multibody_joint_set: MultibodyJointSet,

    /// Integration parameters
    integration_parameters: IntegrationParameters,
    /// Physics pipeline
    physics_pipeline: PhysicsPipeline,
    /// Island manager
    island_manager: IslandManager,
    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,
    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,
    /// Continuous collision detection solver
    ccd_solver: CCDSolver,
    /// Query pipeline for overlap probes
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        Self {
            config,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Step the physics simulation by one fixed timestep
    pub fn step(&mut self) {
        let gravity = vector![self.config.gravity.x, self.config.gravity.y, self.config.gravity.z];

        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        // Update query pipeline after physics step
        self.query_pipeline.update(&self.collider_set);
    }

    /// Refresh the query pipeline after mutating colliders outside `step`
    pub fn update_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Add a dynamic rigid body with a collider
    pub fn add_dynamic_body(
        &mut self,
        rigid_body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let rb_handle = self.rigid_body_set.insert(rigid_body);
        let col_handle =
            self.collider_set
                .insert_with_parent(collider, rb_handle, &mut self.rigid_body_set);
        (rb_handle, col_handle)
    }

    /// Attach an extra collider to an existing rigid body
    pub fn attach_collider(
        &mut self,
        collider: Collider,
        body: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, body, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and its colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    /// Get a rigid body by handle
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable rigid body by handle
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Get a mutable collider by handle
    pub fn get_collider_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.collider_set.get_mut(handle)
    }

    /// Find colliders overlapping a sphere, up to [`MAX_OVERLAP_HITS`]
    ///
    /// The filter decides which layers are probed and which bodies are
    /// excluded (typically the prober itself).
    pub fn overlap_sphere(
        &self,
        center: Vec3,
        radius: f32,
        filter: QueryFilter,
    ) -> Vec<ColliderHandle> {
        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(center.x, center.y, center.z);

        let mut hits = Vec::new();
        self.query_pipeline.intersections_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &shape_pos,
            &shape,
            filter,
            |handle| {
                hits.push(handle);
                hits.len() < MAX_OVERLAP_HITS
            },
        );
        hits
    }

    /// Create a ground plane collider on the GROUND layer
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .collision_groups(layers::ground_collider_groups())
            .friction(0.7)
            .restitution(0.0)
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static box collider on the GROUND layer
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .collision_groups(layers::ground_collider_groups())
            .friction(0.7)
            .build();
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_world_creation() {
        let world = PhysicsWorld::new();
        assert_eq!(world.config.gravity, Vec3::new(0.0, -9.81, 0.0));
    }

    #[test]
    fn test_ground_creation() {
        let mut world = PhysicsWorld::new();
        let ground = world.create_ground(0.0);
        assert!(world.get_collider(ground).is_some());
    }

    #[test]
    fn test_overlap_sphere_finds_ground() {
        let mut world = PhysicsWorld::new();
        world.create_static_box(Vec3::new(5.0, 0.5, 5.0), Vec3::new(0.0, -0.5, 0.0));
        world.update_queries();

        let filter = QueryFilter::default().groups(layers::probe_filter(layers::GROUND_BIT));
        let hits = world.overlap_sphere(Vec3::new(0.0, 0.1, 0.0), 0.2, filter);
        assert_eq!(hits.len(), 1);

        // Out of range
        let hits = world.overlap_sphere(Vec3::new(0.0, 5.0, 0.0), 0.2, filter);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_overlap_sphere_respects_layers() {
        let mut world = PhysicsWorld::new();
        let collider = ColliderBuilder::ball(0.5)
            .collision_groups(layers::player_collider_groups())
            .build();
        world.add_static_collider(collider);
        world.update_queries();

        let filter = QueryFilter::default().groups(layers::probe_filter(layers::GROUND_BIT));
        assert!(world.overlap_sphere(Vec3::ZERO, 0.2, filter).is_empty());

        let filter = QueryFilter::default().groups(layers::probe_filter(layers::PLAYER_BIT));
        assert_eq!(world.overlap_sphere(Vec3::ZERO, 0.2, filter).len(), 1);
    }

    #[test]
    fn test_overlap_sphere_excludes_body() {
        let mut world = PhysicsWorld::new();
        let body = RigidBodyBuilder::dynamic().build();
        let collider = ColliderBuilder::ball(0.5)
            .collision_groups(layers::ground_collider_groups())
            .build();
        let (body_handle, _) = world.add_dynamic_body(body, collider);
        world.update_queries();

        let filter = QueryFilter::default()
            .groups(layers::probe_filter(layers::GROUND_BIT))
            .exclude_rigid_body(body_handle);
        assert!(world.overlap_sphere(Vec3::ZERO, 0.2, filter).is_empty());
    }

    #[test]
    fn test_overlap_sphere_hit_cap() {
        let mut world = PhysicsWorld::new();
        for i in 0..MAX_OVERLAP_HITS + 5 {
            let collider = ColliderBuilder::ball(0.1)
                .translation(vector![i as f32 * 0.01, 0.0, 0.0])
                .collision_groups(layers::ground_collider_groups())
                .build();
            world.add_static_collider(collider);
        }
        world.update_queries();

        let filter = QueryFilter::default().groups(layers::probe_filter(layers::GROUND_BIT));
        let hits = world.overlap_sphere(Vec3::ZERO, 1.0, filter);
        assert_eq!(hits.len(), MAX_OVERLAP_HITS);
    }

    #[test]
    fn test_dynamic_body_falls() {
        let mut world = PhysicsWorld::new();
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![0.0, 10.0, 0.0])
            .build();
        let collider = ColliderBuilder::ball(0.5).build();
        let (handle, _) = world.add_dynamic_body(body, collider);

        for _ in 0..10 {
            world.step();
        }

        let body = world.get_rigid_body(handle).unwrap();
        assert!(body.linvel().y < 0.0);
        assert!(body.translation().y < 10.0);
    }
}
