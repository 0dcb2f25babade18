//! Seek, flee and arrival: the position-target behaviours.

use crate::behaviors::SteeringGains;
use crate::math::normalised;
use crate::Vec2;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SLOWING_RADIUS: f32 = 100.0;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SeekParams {
    pub gains: SteeringGains,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FleeParams {
    pub gains: SteeringGains,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ArrivalParams {
    pub gains: SteeringGains,
    pub slowing_radius: f32,
}

impl Default for ArrivalParams {
    fn default() -> Self {
        Self {
            gains: SteeringGains::default(),
            slowing_radius: DEFAULT_SLOWING_RADIUS,
        }
    }
}

/// Full-speed desired velocity straight at the target. A target on top of
/// the agent degrades to a zero desired velocity.
pub fn seek(position: Vec2, target: Vec2, max_speed: f32) -> Vec2 {
    normalised(target - position) * max_speed
}

/// Mirror of seek: full speed directly away from the target.
pub fn flee(position: Vec2, target: Vec2, max_speed: f32) -> Vec2 {
    normalised(position - target) * max_speed
}

/// Seek with a linear speed ramp inside the slowing radius, down to zero at
/// the target itself.
pub fn arrival(position: Vec2, target: Vec2, max_speed: f32, params: &ArrivalParams) -> Vec2 {
    let offset = target - position;
    let distance = offset.norm();
    let ramp = if params.slowing_radius > 0.0 {
        (distance / params.slowing_radius).clamp(0.0, 1.0)
    } else {
        1.0
    };
    normalised(offset) * max_speed * ramp
}
