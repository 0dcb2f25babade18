//! Agent kinematic core: owns position/velocity/orientation, funnels every
//! behaviour through the force blender in a fixed order, integrates, and
//! wraps at the world boundary.

use crate::behaviors::{
    avoidance, basic, flocking, leader, pursuit, wander, BehaviorId, BehaviorPreset, SteeringGains,
    SteeringSet, EXECUTION_ORDER, N_BEHAVIORS,
};
use crate::math::truncate;
use crate::sim::{SimEvent, TickSnapshot};
use crate::world::{Obstacle, WorldBounds};
use crate::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

pub const DEFAULT_MAX_SPEED: f32 = 20.0;
pub const DEFAULT_SPEED_MULTIPLIER: f32 = 1.0;
/// Below this speed the facing is left alone, so a near-stationary agent
/// does not jitter in place.
pub const ORIENTATION_GATE: f32 = 0.01;
/// The rendered nose points along +y of the model, so the facing leads the
/// velocity angle by a quarter turn.
pub const HEADING_OFFSET: f32 = FRAC_PI_2;

const DEFAULT_COLOR: [f32; 3] = [0.196, 0.196, 0.196];

/// One steering agent. Mutable, identity-bearing, owned by the simulation
/// arena; cross-agent references are arena indices, never pointers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    position: Vec2,
    velocity: Vec2,
    /// Facing angle in radians, only recomputed while moving.
    orientation: f32,
    max_speed: f32,
    /// Scales integrated displacement independently of `max_speed`.
    speed_multiplier: f32,
    target_position: Vec2,
    preset: BehaviorPreset,
    /// Display color consumed by the rendering collaborator only.
    color: [f32; 3],
    steering: SteeringSet,
    /// Last computed desired velocity per behaviour, diagnostics only.
    desired: [Vec2; N_BEHAVIORS],
    cohesion_centroid: Option<Vec2>,
}

impl Agent {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            position: spawn,
            velocity: Vec2::zeros(),
            orientation: 0.0,
            max_speed: DEFAULT_MAX_SPEED,
            speed_multiplier: DEFAULT_SPEED_MULTIPLIER,
            target_position: spawn,
            preset: BehaviorPreset::None,
            color: DEFAULT_COLOR,
            steering: SteeringSet::default(),
            desired: [Vec2::zeros(); N_BEHAVIORS],
            cohesion_centroid: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn orientation(&self) -> f32 {
        self.orientation
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn preset(&self) -> BehaviorPreset {
        self.preset
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn target_position(&self) -> Vec2 {
        self.target_position
    }

    pub fn steering(&self) -> &SteeringSet {
        &self.steering
    }

    pub fn steering_mut(&mut self) -> &mut SteeringSet {
        &mut self.steering
    }

    /// Cached desired velocity of the behaviour's last evaluation. Zero for
    /// disabled or skipped behaviours.
    pub fn desired_velocity(&self, id: BehaviorId) -> Vec2 {
        self.desired[id.index()]
    }

    /// Centroid of the last cohesion evaluation, for visualization.
    pub fn cohesion_centroid(&self) -> Option<Vec2> {
        self.cohesion_centroid
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = truncate(velocity, self.max_speed);
    }

    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.max_speed = max_speed.max(0.0);
        self.velocity = truncate(self.velocity, self.max_speed);
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.speed_multiplier = multiplier;
    }

    pub fn set_target_position(&mut self, target: Vec2) {
        self.target_position = target;
    }

    pub fn set_preset(&mut self, preset: BehaviorPreset) {
        self.preset = preset;
    }

    pub fn set_color(&mut self, color: [f32; 3]) {
        self.color = color;
    }

    /// Force blender, force-only entry: clamp to this behaviour's own force
    /// cap, scale by strength and weighting, accumulate, then clamp the
    /// velocity to the global speed cap.
    pub fn apply_steering_force(&mut self, force: Vec2, gains: SteeringGains, dt: f32) {
        let force = truncate(force, gains.max_force);
        self.velocity += force * gains.strength * gains.weighting * dt;
        self.velocity = truncate(self.velocity, self.max_speed);
    }

    /// Force blender, desired-velocity entry: the steering force is the gap
    /// between desired and current velocity.
    pub fn apply_steering(&mut self, desired: Vec2, gains: SteeringGains, dt: f32) {
        let force = desired - self.velocity;
        self.apply_steering_force(force, gains, dt);
    }

    /// Wander RNG phase, run before the main update so the rest of the tick
    /// is deterministic without the RNG handle. Gated like the behaviour
    /// itself: a zero-weighted wander draws nothing.
    pub fn retarget_wander(&mut self, dt: f32, rng: &mut impl Rng) {
        if self.steering.wander.gains.enabled() {
            wander::retarget(&mut self.steering.wander, dt, rng);
        }
    }

    /// One tick: hard collision correction, the behaviours in fixed order,
    /// integration, facing, boundary wrap.
    pub fn update(
        &mut self,
        index: usize,
        dt: f32,
        bounds: &WorldBounds,
        snapshot: &TickSnapshot,
        obstacles: &[Obstacle],
        events: &mut Vec<SimEvent>,
    ) {
        // Collision response runs even when avoidance weighting is zero.
        avoidance::resolve_overlap(&mut self.position, &mut self.velocity, obstacles);
        self.velocity = truncate(self.velocity, self.max_speed);

        for id in EXECUTION_ORDER {
            let gains = *self.steering.gains(id);
            if !gains.enabled() {
                self.desired[id.index()] = Vec2::zeros();
                if id == BehaviorId::Cohesion {
                    self.cohesion_centroid = None;
                }
                continue;
            }
            let desired = self.evaluate(id, index, dt, snapshot, obstacles, events);
            match desired {
                Some(d) => {
                    self.desired[id.index()] = d;
                    self.apply_steering(d, gains, dt);
                }
                None => self.desired[id.index()] = Vec2::zeros(),
            }
        }

        self.position += self.velocity * self.speed_multiplier * dt;

        if self.velocity.norm() > ORIENTATION_GATE {
            self.orientation = self.velocity.y.atan2(self.velocity.x) + HEADING_OFFSET;
        }

        self.position = bounds.wrap(self.position);
    }

    fn evaluate(
        &mut self,
        id: BehaviorId,
        index: usize,
        dt: f32,
        snapshot: &TickSnapshot,
        obstacles: &[Obstacle],
        events: &mut Vec<SimEvent>,
    ) -> Option<Vec2> {
        match id {
            BehaviorId::ObstacleAvoidance => avoidance::avoid(
                self.position,
                self.velocity,
                self.max_speed,
                obstacles,
                &self.steering.avoidance,
            ),
            BehaviorId::Seek => Some(basic::seek(
                self.position,
                self.target_position,
                self.max_speed,
            )),
            BehaviorId::Flee => Some(basic::flee(
                self.position,
                self.target_position,
                self.max_speed,
            )),
            BehaviorId::Wander => Some(wander::wander(
                self.position,
                self.velocity,
                self.orientation,
                self.max_speed,
                &mut self.steering.wander,
                dt,
            )),
            BehaviorId::Separation => flocking::separate(
                index,
                self.position,
                self.max_speed,
                snapshot,
                &self.steering.separation,
            ),
            BehaviorId::Cohesion => {
                match flocking::cohere(
                    index,
                    self.position,
                    self.max_speed,
                    snapshot,
                    &self.steering.cohesion,
                ) {
                    Some(out) => {
                        self.cohesion_centroid = Some(out.centroid);
                        Some(out.desired)
                    }
                    None => {
                        self.cohesion_centroid = None;
                        None
                    }
                }
            }
            BehaviorId::Alignment => flocking::align(
                index,
                self.position,
                self.max_speed,
                snapshot,
                &self.steering.alignment,
            ),
            BehaviorId::Pursuit => {
                let desired =
                    pursuit::pursue(self.position, self.max_speed, snapshot, &self.steering.pursuit);
                if desired.is_some() {
                    if let Some(target) = self.steering.pursuit.target {
                        events.push(SimEvent::TargetHighlight {
                            source: index,
                            target,
                        });
                    }
                }
                desired
            }
            BehaviorId::Evasion => {
                let desired =
                    pursuit::evade(self.position, self.max_speed, snapshot, &self.steering.evasion);
                if desired.is_some() {
                    if let Some(target) = self.steering.evasion.target {
                        events.push(SimEvent::TargetHighlight {
                            source: index,
                            target,
                        });
                    }
                }
                desired
            }
            BehaviorId::Arrival => Some(basic::arrival(
                self.position,
                self.target_position,
                self.max_speed,
                &self.steering.arrival,
            )),
            BehaviorId::LeaderFollowing => follow_leader(self, snapshot),
        }
    }
}

fn follow_leader(agent: &Agent, snapshot: &TickSnapshot) -> Option<Vec2> {
    leader::follow(
        agent.position,
        agent.max_speed,
        snapshot,
        &agent.steering.leader,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::AgentView;

    fn lone_snapshot(agent: &Agent, bounds: &WorldBounds) -> TickSnapshot {
        TickSnapshot {
            views: vec![AgentView {
                position: agent.position(),
                velocity: agent.velocity(),
                heading: agent.orientation(),
            }],
            world: bounds.size(),
        }
    }

    #[test]
    fn velocity_never_exceeds_max_speed() {
        let bounds = WorldBounds::new(1280.0, 720.0);
        let mut agent = Agent::new(Vec2::new(100.0, 100.0));
        agent.steering_mut().seek.gains.weighting = 1.0;
        agent.steering_mut().seek.gains.strength = 100.0;
        agent.set_target_position(Vec2::new(1000.0, 600.0));

        for _ in 0..240 {
            let snap = lone_snapshot(&agent, &bounds);
            let mut events = Vec::new();
            agent.update(0, 1.0 / 60.0, &bounds, &snap, &[], &mut events);
            assert!(agent.velocity().norm() <= agent.max_speed() + 1.0e-3);
        }
    }

    #[test]
    fn single_behaviour_force_is_capped_per_tick() {
        let bounds = WorldBounds::new(1280.0, 720.0);
        let dt = 1.0 / 60.0;
        let mut agent = Agent::new(Vec2::new(100.0, 100.0));
        let gains = SteeringGains {
            weighting: 0.8,
            strength: 2.0,
            max_force: 10.0,
        };
        agent.steering_mut().seek.gains = gains;
        agent.set_target_position(Vec2::new(1200.0, 700.0));

        let before = agent.velocity();
        let snap = lone_snapshot(&agent, &bounds);
        let mut events = Vec::new();
        agent.update(0, dt, &bounds, &snap, &[], &mut events);
        // No integration feedback on velocity, so the whole delta is the
        // seek contribution (pre-global-clamp bound).
        let delta = agent.velocity() - before;
        let cap = gains.strength * gains.weighting * gains.max_force * dt;
        assert!(delta.norm() <= cap + 1.0e-4);
    }

    #[test]
    fn zero_weight_behaviour_zeroes_cached_desired_and_applies_nothing() {
        let bounds = WorldBounds::new(1280.0, 720.0);
        let mut agent = Agent::new(Vec2::new(100.0, 100.0));
        agent.set_target_position(Vec2::new(500.0, 500.0));
        // All weightings default to zero.
        let snap = lone_snapshot(&agent, &bounds);
        let mut events = Vec::new();
        agent.update(0, 1.0 / 60.0, &bounds, &snap, &[], &mut events);
        assert_eq!(agent.velocity(), Vec2::zeros());
        for id in EXECUTION_ORDER {
            assert_eq!(agent.desired_velocity(id), Vec2::zeros());
        }
    }

    #[test]
    fn orientation_keeps_previous_value_when_stationary() {
        let bounds = WorldBounds::new(1280.0, 720.0);
        let mut agent = Agent::new(Vec2::new(100.0, 100.0));
        agent.set_velocity(Vec2::new(5.0, 0.0));
        let snap = lone_snapshot(&agent, &bounds);
        let mut events = Vec::new();
        agent.update(0, 1.0 / 60.0, &bounds, &snap, &[], &mut events);
        let facing = agent.orientation();
        assert!((facing - HEADING_OFFSET).abs() < 1.0e-4);

        agent.set_velocity(Vec2::zeros());
        let snap = lone_snapshot(&agent, &bounds);
        agent.update(0, 1.0 / 60.0, &bounds, &snap, &[], &mut events);
        assert_eq!(agent.orientation(), facing);
    }

    #[test]
    fn wrap_preserves_velocity_and_other_axis() {
        let bounds = WorldBounds::new(1280.0, 720.0);
        let mut agent = Agent::new(Vec2::new(0.05, 300.0));
        agent.set_velocity(Vec2::new(-20.0, 0.0));
        let snap = lone_snapshot(&agent, &bounds);
        let mut events = Vec::new();
        agent.update(0, 1.0 / 60.0, &bounds, &snap, &[], &mut events);
        assert_eq!(agent.position().x, 1280.0);
        assert_eq!(agent.position().y, 300.0);
        assert_eq!(agent.velocity(), Vec2::new(-20.0, 0.0));
    }

    #[test]
    fn overlap_correction_runs_with_zero_avoidance_weighting() {
        let bounds = WorldBounds::new(1280.0, 720.0);
        let obstacle = Obstacle::new(Vec2::new(100.0, 100.0), Vec2::new(40.0, 40.0));
        let mut agent = Agent::new(obstacle.center());
        assert!(!agent.steering().avoidance.gains.enabled());

        let snap = lone_snapshot(&agent, &bounds);
        let mut events = Vec::new();
        agent.update(0, 1.0 / 60.0, &bounds, &snap, &[obstacle], &mut events);
        assert!(!obstacle.contains(agent.position()));
    }
}
