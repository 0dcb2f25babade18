//! Leader following: hold station behind a bound leader, and dodge sideways
//! out of the rectangular danger zone directly ahead of it so followers
//! never cut across the leader's path.

use crate::behaviors::basic::seek;
use crate::behaviors::SteeringGains;
use crate::math::{dot, normalised, TRUNCATE_EPSILON};
use crate::sim::TickSnapshot;
use crate::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

pub const DEFAULT_OFFSET: f32 = 30.0;
pub const DEFAULT_DANGER_LENGTH: f32 = 60.0;
pub const DEFAULT_DANGER_HALF_WIDTH: f32 = 20.0;
pub const DEFAULT_LATERAL_EVASION_STRENGTH: f32 = 1.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LeaderParams {
    pub gains: SteeringGains,
    /// Index of the leader agent in the simulation arena.
    pub leader: Option<usize>,
    /// Station-keeping distance behind the leader along its heading.
    pub offset: f32,
    pub danger_length: f32,
    pub danger_half_width: f32,
    pub lateral_evasion_strength: f32,
}

impl Default for LeaderParams {
    fn default() -> Self {
        Self {
            gains: SteeringGains::default(),
            leader: None,
            offset: DEFAULT_OFFSET,
            danger_length: DEFAULT_DANGER_LENGTH,
            danger_half_width: DEFAULT_DANGER_HALF_WIDTH,
            lateral_evasion_strength: DEFAULT_LATERAL_EVASION_STRENGTH,
        }
    }
}

pub fn follow(
    position: Vec2,
    max_speed: f32,
    snapshot: &TickSnapshot,
    params: &LeaderParams,
) -> Option<Vec2> {
    let leader = snapshot.views.get(params.leader?)?;

    // Leader heading from its velocity, falling back to its facing when it
    // is standing still (heading carries the +pi/2 nose offset).
    let forward = if leader.velocity.norm() > TRUNCATE_EPSILON {
        normalised(leader.velocity)
    } else {
        let heading = leader.heading - FRAC_PI_2;
        Vec2::new(heading.cos(), heading.sin())
    };

    let behind = leader.position - forward * params.offset;
    let mut desired = seek(position, behind, max_speed);

    // Lateral dodge when the follower sits in the box ahead of the leader.
    let to_follower = position - leader.position;
    let along = dot(to_follower, forward);
    let side = Vec2::new(-forward.y, forward.x);
    let lateral = dot(to_follower, side);
    if along >= 0.0 && along <= params.danger_length && lateral.abs() < params.danger_half_width {
        let escape = if lateral >= 0.0 { side } else { -side };
        desired += escape * max_speed * params.lateral_evasion_strength;
        desired = normalised(desired) * max_speed;
    }

    Some(desired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::AgentView;

    fn snapshot_with_leader(px: f32, py: f32, vx: f32, vy: f32) -> TickSnapshot {
        TickSnapshot {
            views: vec![AgentView {
                position: Vec2::new(px, py),
                velocity: Vec2::new(vx, vy),
                heading: 0.0,
            }],
            world: Vec2::new(1280.0, 720.0),
        }
    }

    fn bound_params() -> LeaderParams {
        LeaderParams {
            leader: Some(0),
            ..LeaderParams::default()
        }
    }

    #[test]
    fn follower_steers_for_the_point_behind_the_leader() {
        // Leader at origin moving +x; station point is (-30, 0).
        let snap = snapshot_with_leader(0.0, 0.0, 10.0, 0.0);
        let desired = follow(Vec2::new(-100.0, 0.0), 20.0, &snap, &bound_params())
            .expect("leader bound");
        assert!(desired.x > 0.0);
        assert!(desired.y.abs() < 1.0e-3);
    }

    #[test]
    fn follower_in_danger_zone_dodges_sideways() {
        let snap = snapshot_with_leader(0.0, 0.0, 10.0, 0.0);
        // Directly ahead of the leader, slightly left of its axis.
        let desired = follow(Vec2::new(30.0, 5.0), 20.0, &snap, &bound_params())
            .expect("leader bound");
        // Escape is away from the axis on the follower's side.
        assert!(desired.y > 0.0);
    }

    #[test]
    fn follower_outside_danger_zone_gets_no_lateral_term() {
        let snap = snapshot_with_leader(0.0, 0.0, 10.0, 0.0);
        let desired = follow(Vec2::new(30.0, 50.0), 20.0, &snap, &bound_params())
            .expect("leader bound");
        let plain = seek(Vec2::new(30.0, 50.0), Vec2::new(-30.0, 0.0), 20.0);
        assert!((desired - plain).norm() < 1.0e-4);
    }

    #[test]
    fn unbound_follower_is_skipped() {
        let snap = snapshot_with_leader(0.0, 0.0, 10.0, 0.0);
        let params = LeaderParams::default();
        assert!(follow(Vec2::new(30.0, 5.0), 20.0, &snap, &params).is_none());
    }
}
