//! Pursuit and evasion against a bound target agent, with constant-velocity
//! linear prediction. Targets are explicit handles into the agent arena,
//! validated when bound; an unbound behaviour simply contributes nothing.

use crate::behaviors::basic::{flee, seek};
use crate::behaviors::SteeringGains;
use crate::sim::{AgentView, TickSnapshot};
use crate::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PursuitParams {
    pub gains: SteeringGains,
    /// Index of the target agent in the simulation arena.
    pub target: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EvasionParams {
    pub gains: SteeringGains,
    pub target: Option<usize>,
}

/// Predicted future position of the target. The prediction horizon is a
/// distance/speed estimate, not a true time-to-intercept.
pub fn predict_intercept(position: Vec2, max_speed: f32, target: &AgentView) -> Vec2 {
    if max_speed <= 0.0 {
        return target.position;
    }
    let distance = (target.position - position).norm();
    target.position + target.velocity * (distance / max_speed)
}

pub fn pursue(
    position: Vec2,
    max_speed: f32,
    snapshot: &TickSnapshot,
    params: &PursuitParams,
) -> Option<Vec2> {
    let target = snapshot.views.get(params.target?)?;
    Some(seek(position, predict_intercept(position, max_speed, target), max_speed))
}

pub fn evade(
    position: Vec2,
    max_speed: f32,
    snapshot: &TickSnapshot,
    params: &EvasionParams,
) -> Option<Vec2> {
    let target = snapshot.views.get(params.target?)?;
    Some(flee(position, predict_intercept(position, max_speed, target), max_speed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(px: f32, py: f32, vx: f32, vy: f32) -> AgentView {
        AgentView {
            position: Vec2::new(px, py),
            velocity: Vec2::new(vx, vy),
            heading: 0.0,
        }
    }

    fn snapshot(views: Vec<AgentView>) -> TickSnapshot {
        TickSnapshot {
            views,
            world: Vec2::new(1280.0, 720.0),
        }
    }

    #[test]
    fn prediction_leads_a_moving_target() {
        let target = view(100.0, 0.0, 0.0, 10.0);
        let predicted = predict_intercept(Vec2::zeros(), 20.0, &target);
        // 100 units away at max speed 20 => 5 unit horizon along +y.
        assert!((predicted - Vec2::new(100.0, 50.0)).norm() < 1.0e-3);
    }

    #[test]
    fn prediction_of_stationary_target_is_its_position() {
        let target = view(42.0, 7.0, 0.0, 0.0);
        let predicted = predict_intercept(Vec2::zeros(), 20.0, &target);
        assert_eq!(predicted, Vec2::new(42.0, 7.0));
    }

    #[test]
    fn unbound_pursuit_is_skipped() {
        let snap = snapshot(vec![view(0.0, 0.0, 0.0, 0.0)]);
        let params = PursuitParams::default();
        assert!(pursue(Vec2::new(50.0, 50.0), 20.0, &snap, &params).is_none());
    }

    #[test]
    fn evasion_runs_from_the_predicted_point() {
        let snap = snapshot(vec![view(0.0, 0.0, 0.0, 0.0), view(100.0, 0.0, 0.0, 0.0)]);
        let params = EvasionParams {
            target: Some(1),
            ..EvasionParams::default()
        };
        let desired = evade(Vec2::zeros(), 20.0, &snap, &params).expect("target bound");
        assert!(desired.x < 0.0);
    }

    #[test]
    fn stale_target_index_is_skipped() {
        let snap = snapshot(vec![view(0.0, 0.0, 0.0, 0.0)]);
        let params = PursuitParams {
            target: Some(9),
            ..PursuitParams::default()
        };
        assert!(pursue(Vec2::zeros(), 20.0, &snap, &params).is_none());
    }
}
