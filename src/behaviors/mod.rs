//! Steering behaviour library: one calculator per behaviour kind, each
//! mapping (agent state, world snapshot) -> desired velocity, plus the
//! shared blend coefficients and the fixed execution order.

pub mod avoidance;
pub mod basic;
pub mod flocking;
pub mod leader;
pub mod pursuit;
pub mod wander;

pub use avoidance::AvoidanceParams;
pub use basic::ArrivalParams;
pub use flocking::{AlignmentParams, CohesionParams, SeparationParams};
pub use leader::LeaderParams;
pub use pursuit::{EvasionParams, PursuitParams};
pub use wander::WanderParams;

use serde::{Deserialize, Serialize};

pub const DEFAULT_STRENGTH: f32 = 0.5;
pub const DEFAULT_MAX_FORCE: f32 = 100.0;

/// Stable identifier for each steering behaviour. Doubles as the index into
/// the per-agent cached desired-velocity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorId {
    ObstacleAvoidance,
    Seek,
    Flee,
    Wander,
    Separation,
    Cohesion,
    Alignment,
    Pursuit,
    Evasion,
    Arrival,
    LeaderFollowing,
}

pub const N_BEHAVIORS: usize = 11;

/// Behaviours run in this order every tick. Accumulation through the
/// blender is additive but truncation is nonlinear, so the order is part of
/// the reproducibility contract.
pub const EXECUTION_ORDER: [BehaviorId; N_BEHAVIORS] = [
    BehaviorId::ObstacleAvoidance,
    BehaviorId::Seek,
    BehaviorId::Flee,
    BehaviorId::Wander,
    BehaviorId::Separation,
    BehaviorId::Cohesion,
    BehaviorId::Alignment,
    BehaviorId::Pursuit,
    BehaviorId::Evasion,
    BehaviorId::Arrival,
    BehaviorId::LeaderFollowing,
];

impl BehaviorId {
    pub const fn index(self) -> usize {
        match self {
            BehaviorId::ObstacleAvoidance => 0,
            BehaviorId::Seek => 1,
            BehaviorId::Flee => 2,
            BehaviorId::Wander => 3,
            BehaviorId::Separation => 4,
            BehaviorId::Cohesion => 5,
            BehaviorId::Alignment => 6,
            BehaviorId::Pursuit => 7,
            BehaviorId::Evasion => 8,
            BehaviorId::Arrival => 9,
            BehaviorId::LeaderFollowing => 10,
        }
    }
}

/// Exclusive behaviour tag, selected one at a time for presets and
/// visualization. The force blend is gated by per-behaviour weighting, not
/// by this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BehaviorPreset {
    #[default]
    None,
    Seek,
    Flee,
    Wander,
    Flocking,
    Pursuit,
    Evasion,
    ObstacleAvoidance,
    Arrival,
    LeaderFollowing,
}

/// Blend coefficients every behaviour carries: `weighting` gates and scales
/// the blend, `strength` is the force multiplier, `max_force` caps this
/// behaviour's steering force before scaling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SteeringGains {
    pub weighting: f32,
    pub strength: f32,
    pub max_force: f32,
}

impl Default for SteeringGains {
    fn default() -> Self {
        Self {
            weighting: 0.0,
            strength: DEFAULT_STRENGTH,
            max_force: DEFAULT_MAX_FORCE,
        }
    }
}

impl SteeringGains {
    /// `weighting <= 0` disables the behaviour outright: no computation, no
    /// force, cached desired velocity forced to zero.
    pub fn enabled(&self) -> bool {
        self.weighting > 0.0
    }
}

/// Every behaviour's parameter bundle for one agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SteeringSet {
    pub seek: basic::SeekParams,
    pub flee: basic::FleeParams,
    pub wander: WanderParams,
    pub separation: SeparationParams,
    pub cohesion: CohesionParams,
    pub alignment: AlignmentParams,
    pub pursuit: PursuitParams,
    pub evasion: EvasionParams,
    pub avoidance: AvoidanceParams,
    pub arrival: ArrivalParams,
    pub leader: LeaderParams,
}

impl SteeringSet {
    pub fn gains(&self, id: BehaviorId) -> &SteeringGains {
        match id {
            BehaviorId::ObstacleAvoidance => &self.avoidance.gains,
            BehaviorId::Seek => &self.seek.gains,
            BehaviorId::Flee => &self.flee.gains,
            BehaviorId::Wander => &self.wander.gains,
            BehaviorId::Separation => &self.separation.gains,
            BehaviorId::Cohesion => &self.cohesion.gains,
            BehaviorId::Alignment => &self.alignment.gains,
            BehaviorId::Pursuit => &self.pursuit.gains,
            BehaviorId::Evasion => &self.evasion.gains,
            BehaviorId::Arrival => &self.arrival.gains,
            BehaviorId::LeaderFollowing => &self.leader.gains,
        }
    }

    pub fn gains_mut(&mut self, id: BehaviorId) -> &mut SteeringGains {
        match id {
            BehaviorId::ObstacleAvoidance => &mut self.avoidance.gains,
            BehaviorId::Seek => &mut self.seek.gains,
            BehaviorId::Flee => &mut self.flee.gains,
            BehaviorId::Wander => &mut self.wander.gains,
            BehaviorId::Separation => &mut self.separation.gains,
            BehaviorId::Cohesion => &mut self.cohesion.gains,
            BehaviorId::Alignment => &mut self.alignment.gains,
            BehaviorId::Pursuit => &mut self.pursuit.gains,
            BehaviorId::Evasion => &mut self.evasion.gains,
            BehaviorId::Arrival => &mut self.arrival.gains,
            BehaviorId::LeaderFollowing => &mut self.leader.gains,
        }
    }

    /// Zero every weighting. Presets start from here.
    pub fn disable_all(&mut self) {
        for id in EXECUTION_ORDER {
            self.gains_mut(id).weighting = 0.0;
        }
    }
}
