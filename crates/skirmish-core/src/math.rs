//! Interpolation helpers for velocity shaping

use glam::Vec3;

/// Minimum smoothing time to keep the spring math finite.
const MIN_SMOOTH_TIME: f32 = 1e-4;

/// Critically-damped spring interpolation toward a target vector.
///
/// Moves `current` toward `target` over roughly `smooth_time` seconds
/// without overshooting, accumulating the in-flight rate in `velocity`.
/// Callers keep `velocity` alive across ticks; it starts at zero and is
/// mutated on every call.
pub fn smooth_damp(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;

    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Clamp to the target if the spring would carry us past it
    let moving_away = target - current;
    if moving_away.dot(output - target) > 0.0 {
        output = target;
        *velocity = Vec3::ZERO;
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_damp_converges() {
        let target = Vec3::new(10.0, 0.0, -4.0);
        let mut current = Vec3::ZERO;
        let mut velocity = Vec3::ZERO;

        for _ in 0..120 {
            current = smooth_damp(current, target, &mut velocity, 0.05, 1.0 / 60.0);
        }

        assert!(current.abs_diff_eq(target, 1e-3));
    }

    #[test]
    fn test_smooth_damp_mutates_velocity() {
        let mut velocity = Vec3::ZERO;
        smooth_damp(Vec3::ZERO, Vec3::X, &mut velocity, 0.05, 1.0 / 60.0);
        assert!(velocity.length() > 0.0);
    }

    #[test]
    fn test_smooth_damp_does_not_overshoot() {
        let target = Vec3::new(1.0, 0.0, 0.0);
        let mut current = Vec3::ZERO;
        let mut velocity = Vec3::ZERO;

        for _ in 0..600 {
            current = smooth_damp(current, target, &mut velocity, 0.01, 1.0 / 60.0);
            assert!(current.x <= target.x + 1e-4);
        }
    }

    #[test]
    fn test_smooth_damp_stationary_at_target() {
        let target = Vec3::splat(3.0);
        let mut velocity = Vec3::ZERO;
        let result = smooth_damp(target, target, &mut velocity, 0.05, 1.0 / 60.0);
        assert!(result.abs_diff_eq(target, 1e-5));
    }
}
