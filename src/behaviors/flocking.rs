//! Separation, cohesion and alignment over a neighbourhood radius.
//! Neighbour offsets are measured through the torus, so flocks stay
//! coherent across the wrap seam.

use crate::behaviors::SteeringGains;
use crate::math::{normalised, wrapped_offset};
use crate::sim::TickSnapshot;
use crate::Vec2;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SEPARATION_RADIUS: f32 = 50.0;
pub const DEFAULT_COHESION_RADIUS: f32 = 100.0;
pub const DEFAULT_ALIGNMENT_RADIUS: f32 = 75.0;

const DIST_EPSILON: f32 = 1.0e-6;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeparationParams {
    pub gains: SteeringGains,
    pub neighborhood_radius: f32,
}

impl Default for SeparationParams {
    fn default() -> Self {
        Self {
            gains: SteeringGains::default(),
            neighborhood_radius: DEFAULT_SEPARATION_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CohesionParams {
    pub gains: SteeringGains,
    pub neighborhood_radius: f32,
    pub include_self: bool,
}

impl Default for CohesionParams {
    fn default() -> Self {
        Self {
            gains: SteeringGains::default(),
            neighborhood_radius: DEFAULT_COHESION_RADIUS,
            include_self: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AlignmentParams {
    pub gains: SteeringGains,
    pub neighborhood_radius: f32,
}

impl Default for AlignmentParams {
    fn default() -> Self {
        Self {
            gains: SteeringGains::default(),
            neighborhood_radius: DEFAULT_ALIGNMENT_RADIUS,
        }
    }
}

pub struct CohesionOutput {
    pub desired: Vec2,
    pub centroid: Vec2,
}

/// Average of unit away-vectors weighted by 1/distance, so the closest
/// neighbours dominate. No neighbours in radius means no force at all this
/// tick: the behaviour is skipped, not zero-forced.
pub fn separate(
    index: usize,
    position: Vec2,
    max_speed: f32,
    snapshot: &TickSnapshot,
    params: &SeparationParams,
) -> Option<Vec2> {
    let radius2 = params.neighborhood_radius * params.neighborhood_radius;
    let mut away_sum = Vec2::zeros();
    let mut close = 0usize;

    for (j, other) in snapshot.views.iter().enumerate() {
        if j == index {
            continue;
        }
        let offset = wrapped_offset(position, other.position, snapshot.world);
        let dist2 = offset.norm_squared();
        if dist2 < radius2 && dist2 > DIST_EPSILON {
            let dist = dist2.sqrt();
            away_sum += normalised(-offset) / dist;
            close += 1;
        }
    }

    if close == 0 {
        return None;
    }
    let average = away_sum / close as f32;
    Some(normalised(average) * max_speed)
}

/// Steer toward the centroid of agents within the neighbourhood radius.
/// The centroid is surfaced for visualization alongside the desired
/// velocity.
pub fn cohere(
    index: usize,
    position: Vec2,
    max_speed: f32,
    snapshot: &TickSnapshot,
    params: &CohesionParams,
) -> Option<CohesionOutput> {
    let radius2 = params.neighborhood_radius * params.neighborhood_radius;
    let mut offset_sum = Vec2::zeros();
    let mut neighbors = 0usize;

    for (j, other) in snapshot.views.iter().enumerate() {
        if j == index {
            if params.include_self {
                neighbors += 1;
            }
            continue;
        }
        let offset = wrapped_offset(position, other.position, snapshot.world);
        if offset.norm_squared() < radius2 {
            offset_sum += offset;
            neighbors += 1;
        }
    }

    if neighbors == 0 {
        return None;
    }
    let mean_offset = offset_sum / neighbors as f32;
    Some(CohesionOutput {
        desired: normalised(mean_offset) * max_speed,
        centroid: position + mean_offset,
    })
}

/// Match the average velocity of the neighbourhood.
pub fn align(
    index: usize,
    position: Vec2,
    max_speed: f32,
    snapshot: &TickSnapshot,
    params: &AlignmentParams,
) -> Option<Vec2> {
    let radius2 = params.neighborhood_radius * params.neighborhood_radius;
    let mut velocity_sum = Vec2::zeros();
    let mut neighbors = 0usize;

    for (j, other) in snapshot.views.iter().enumerate() {
        if j == index {
            continue;
        }
        let offset = wrapped_offset(position, other.position, snapshot.world);
        if offset.norm_squared() < radius2 {
            velocity_sum += other.velocity;
            neighbors += 1;
        }
    }

    if neighbors == 0 {
        return None;
    }
    let average = velocity_sum / neighbors as f32;
    Some(normalised(average) * max_speed)
}
