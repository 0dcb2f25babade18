//! Obstacle handling in two halves: feeler-based avoidance steering, gated
//! by weighting like any behaviour, and the unconditional hard-collision
//! correction that runs every tick regardless of weighting.

use crate::behaviors::SteeringGains;
use crate::math::{dot, normalised, segment_aabb, SegmentHit, TRUNCATE_EPSILON};
use crate::world::Obstacle;
use crate::Vec2;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DETECTION_LENGTH: f32 = 60.0;
pub const DEFAULT_NORMAL_INFLUENCE: f32 = 1.0;
pub const DEFAULT_TANGENT_INFLUENCE: f32 = 0.5;

/// Restitution applied to the velocity's normal component when bouncing off
/// a face the agent was moving into.
pub const RESTITUTION: f32 = 0.6;
/// Damping applied when the agent overlaps while moving parallel to or away
/// from the face (the scrape case).
pub const SCRAPE_DAMPING: f32 = 0.8;
/// Extra push past the face so the corrected position is strictly outside.
const PUSH_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AvoidanceParams {
    pub gains: SteeringGains,
    /// Feeler length, cast along the velocity direction.
    pub detection_length: f32,
    pub normal_influence: f32,
    pub tangent_influence: f32,
}

impl Default for AvoidanceParams {
    fn default() -> Self {
        Self {
            gains: SteeringGains::default(),
            detection_length: DEFAULT_DETECTION_LENGTH,
            normal_influence: DEFAULT_NORMAL_INFLUENCE,
            tangent_influence: DEFAULT_TANGENT_INFLUENCE,
        }
    }
}

/// Nearest feeler intersection across all obstacles, if any.
pub fn nearest_threat(
    position: Vec2,
    velocity: Vec2,
    obstacles: &[Obstacle],
    detection_length: f32,
) -> Option<SegmentHit> {
    if velocity.norm() <= TRUNCATE_EPSILON {
        return None;
    }
    let tip = position + normalised(velocity) * detection_length;

    let mut nearest: Option<SegmentHit> = None;
    for obstacle in obstacles {
        if let Some(hit) = segment_aabb(position, tip, obstacle.min_bound(), obstacle.max_bound()) {
            match nearest {
                Some(best) if best.t <= hit.t => {}
                _ => nearest = Some(hit),
            }
        }
    }
    nearest
}

/// Steer away from the nearest threatened surface: a normal component
/// pointing off the face and a tangential slide along it, blended by their
/// influence weights. A near-zero slide projection falls back to the
/// normal's perpendicular so the response never deadlocks head-on.
pub fn avoid(
    position: Vec2,
    velocity: Vec2,
    max_speed: f32,
    obstacles: &[Obstacle],
    params: &AvoidanceParams,
) -> Option<Vec2> {
    let hit = nearest_threat(position, velocity, obstacles, params.detection_length)?;

    let normal = hit.normal;
    let mut slide = velocity - normal * dot(velocity, normal);
    if slide.norm() <= TRUNCATE_EPSILON {
        slide = Vec2::new(-normal.y, normal.x);
    }

    let response = normal * params.normal_influence + normalised(slide) * params.tangent_influence;
    Some(normalised(response) * max_speed)
}

/// Penetration-driven position correction plus velocity reflection. Runs
/// unconditionally every tick: this is collision response, not a steering
/// preference. An overlapping agent is pushed out along the axis of minimum
/// penetration the same tick the overlap is detected.
pub fn resolve_overlap(position: &mut Vec2, velocity: &mut Vec2, obstacles: &[Obstacle]) {
    for obstacle in obstacles {
        if !obstacle.contains(*position) {
            continue;
        }
        let min = obstacle.min_bound();
        let max = obstacle.max_bound();

        let faces = [
            (position.x - min.x, Vec2::new(-1.0, 0.0)),
            (max.x - position.x, Vec2::new(1.0, 0.0)),
            (position.y - min.y, Vec2::new(0.0, -1.0)),
            (max.y - position.y, Vec2::new(0.0, 1.0)),
        ];
        let (depth, normal) = faces
            .into_iter()
            .fold(faces[0], |best, face| if face.0 < best.0 { face } else { best });

        *position += normal * (depth + PUSH_EPSILON);

        let into = dot(*velocity, normal);
        if into < 0.0 {
            *velocity -= normal * ((1.0 + RESTITUTION) * into);
        } else {
            *velocity *= SCRAPE_DAMPING;
        }
    }
}
