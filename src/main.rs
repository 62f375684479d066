//! Skirmish - a character motion sandbox
//!
//! Hosts the physics world and runs a scripted session against the motion
//! controller: walk right, jump, crawl under a low bar, stand back up.
//! The host loop owns the single controller instance and drives its
//! frame/physics ticks from [`GameTime`].

mod settings;

use anyhow::{Context, Result};
use glam::Vec3;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use skirmish_core::GameTime;
use skirmish_game::{CharacterMotionController, MoveInput};
use skirmish_physics::PhysicsWorld;

use settings::GameSettings;

/// Demo session length in frames
const SESSION_FRAMES: u64 = 600;
/// Simulated frame delta (the sandbox has no real frame clock)
const FRAME_DELTA: f32 = 1.0 / 60.0;

/// Movement intent for the scripted session
fn scripted_input(frame: u64) -> MoveInput {
    match frame {
        // Walk right
        0..=119 => MoveInput {
            horizontal: 0.3,
            ..Default::default()
        },
        // Jump without breaking stride
        120 => MoveInput {
            horizontal: 0.3,
            jump: true,
            ..Default::default()
        },
        121..=299 => MoveInput {
            horizontal: 0.3,
            ..Default::default()
        },
        // Duck and crawl under the bar
        300..=479 => MoveInput {
            horizontal: 0.3,
            crouch: true,
            ..Default::default()
        },
        // Release crouch while still under the bar; the ceiling probe
        // keeps the character down until there is headroom
        480..=599 => MoveInput {
            horizontal: 0.3,
            ..Default::default()
        },
        _ => MoveInput::default(),
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Skirmish sandbox...");

    let settings = GameSettings::load();
    settings
        .motion
        .validate()
        .context("Invalid motion settings")?;

    let mut physics = PhysicsWorld::with_config(settings.physics.clone());
    physics.create_ground(0.0);
    // A low bar the character has to crawl under
    physics.create_static_box(Vec3::new(2.0, 0.15, 2.0), Vec3::new(18.0, 1.6, 0.0));
    physics.update_queries();

    let mut controller = CharacterMotionController::spawn(
        &mut physics,
        settings.motion.clone(),
        Vec3::new(0.0, 0.5, 0.0),
    )
    .context("Failed to spawn character")?;
    controller.events.on_landed(|| info!("signal: landed"));
    controller
        .events
        .on_crouch_changed(|crouching| info!("signal: crouch changed to {}", crouching));

    let mut time = GameTime::new(settings.time.clone());
    while time.frame_count < SESSION_FRAMES {
        time.update(FRAME_DELTA);
        let input = scripted_input(time.frame_count);

        for _ in 0..time.fixed_steps() {
            controller.move_character(&mut physics, input);
            physics.step();
            controller.on_physics_tick(&physics);
        }
        controller.on_frame_tick(&mut physics, time.delta_time);

        if time.frame_count % 60 == 0 {
            if let (Some(position), Some(velocity)) =
                (controller.position(&physics), controller.velocity(&physics))
            {
                info!(
                    "t={:.1}s pos=({:.2}, {:.2}) vel=({:.2}, {:.2}) grounded={} crouching={}",
                    time.total_time,
                    position.x,
                    position.y,
                    velocity.x,
                    velocity.y,
                    controller.grounded(),
                    controller.is_crouching(),
                );
            }
        }
    }

    controller.despawn(&mut physics);
    info!("Session complete");
    Ok(())
}
