//! Wander: a perturbed angle on a projection circle ahead of the agent.

use crate::behaviors::SteeringGains;
use crate::math::{normalised, TRUNCATE_EPSILON};
use crate::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

pub const DEFAULT_WANDER_RADIUS: f32 = 20.0;
pub const DEFAULT_WANDER_DISTANCE: f32 = 40.0;
pub const DEFAULT_ANGLE_RANDOM_STRENGTH: f32 = 1.0;
/// Linear interpolation rate of the current angle toward the target angle.
pub const ANGLE_LERP_RATE: f32 = 5.0;
/// Bounds of the random retarget interval, in seconds.
pub const RETARGET_MIN: f32 = 1.0;
pub const RETARGET_MAX: f32 = 3.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WanderParams {
    pub gains: SteeringGains,
    pub radius: f32,
    pub distance: f32,
    /// Current wander angle on the projection circle, radians.
    pub angle: f32,
    /// Angle the current angle is interpolating toward.
    pub target_angle: f32,
    /// Half-range of the random angle increment per retarget.
    pub angle_random_strength: f32,
    /// Seconds until the next retarget. Starts expired so the first tick
    /// draws a fresh target.
    pub retarget_timer: f32,
}

impl Default for WanderParams {
    fn default() -> Self {
        Self {
            gains: SteeringGains::default(),
            radius: DEFAULT_WANDER_RADIUS,
            distance: DEFAULT_WANDER_DISTANCE,
            angle: 0.0,
            target_angle: 0.0,
            angle_random_strength: DEFAULT_ANGLE_RANDOM_STRENGTH,
            retarget_timer: 0.0,
        }
    }
}

/// Advance the retarget timer and, when it expires, draw a new target angle
/// and a new interval in `[RETARGET_MIN, RETARGET_MAX]`. Split from the
/// desired-velocity computation so the RNG draws can run in a sequential
/// pass while the rest of the tick parallelises.
pub fn retarget(params: &mut WanderParams, dt: f32, rng: &mut impl Rng) {
    params.retarget_timer -= dt;
    if params.retarget_timer <= 0.0 {
        let perturbation = rng.gen_range(-1.0..1.0f32) * params.angle_random_strength;
        params.target_angle = params.angle + perturbation;
        params.retarget_timer = rng.gen_range(RETARGET_MIN..RETARGET_MAX);
    }
}

/// Lerp the current angle toward the target angle, project the circle ahead
/// of the agent and steer for the rim point at the current angle.
pub fn wander(
    position: Vec2,
    velocity: Vec2,
    orientation: f32,
    max_speed: f32,
    params: &mut WanderParams,
    dt: f32,
) -> Vec2 {
    let factor = (ANGLE_LERP_RATE * dt).min(1.0);
    params.angle += (params.target_angle - params.angle) * factor;

    // Project along the velocity direction; a stationary agent falls back to
    // its facing (orientation carries a +pi/2 nose offset).
    let forward = if velocity.norm() > TRUNCATE_EPSILON {
        normalised(velocity)
    } else {
        let heading = orientation - FRAC_PI_2;
        Vec2::new(heading.cos(), heading.sin())
    };

    let center = position + forward * params.distance;
    let rim = center + Vec2::new(params.angle.cos(), params.angle.sin()) * params.radius;
    normalised(rim - position) * max_speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn retarget_interval_stays_in_bounds() {
        let mut params = WanderParams::default();
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..50 {
            params.retarget_timer = 0.0;
            retarget(&mut params, 1.0 / 60.0, &mut rng);
            assert!(params.retarget_timer >= RETARGET_MIN - 1.0 / 60.0);
            assert!(params.retarget_timer <= RETARGET_MAX);
        }
    }

    #[test]
    fn angle_lerps_toward_target() {
        let mut params = WanderParams {
            angle: 0.0,
            target_angle: 1.0,
            ..WanderParams::default()
        };
        let dt = 1.0 / 60.0;
        wander(Vec2::zeros(), Vec2::new(1.0, 0.0), 0.0, 20.0, &mut params, dt);
        let expected = ANGLE_LERP_RATE * dt;
        assert!((params.angle - expected).abs() < 1.0e-5);
        assert!(params.angle < params.target_angle);
    }

    #[test]
    fn desired_velocity_has_max_speed_magnitude() {
        let mut params = WanderParams::default();
        let desired = wander(
            Vec2::new(100.0, 100.0),
            Vec2::new(3.0, 1.0),
            0.0,
            20.0,
            &mut params,
            1.0 / 60.0,
        );
        assert!((desired.norm() - 20.0).abs() < 1.0e-3);
    }

    #[test]
    fn stationary_agent_projects_along_facing() {
        let mut params = WanderParams {
            radius: 0.0,
            ..WanderParams::default()
        };
        // Facing along +x: orientation carries the +pi/2 nose offset.
        let desired = wander(
            Vec2::zeros(),
            Vec2::zeros(),
            FRAC_PI_2,
            20.0,
            &mut params,
            1.0 / 60.0,
        );
        assert!(desired.x > 19.9);
        assert!(desired.y.abs() < 1.0e-3);
    }
}
