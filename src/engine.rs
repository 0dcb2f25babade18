//! UI-facing layer: preset catalog, broadcast parameter setters and flat
//! state getters. This is the boundary the rendering/input collaborator
//! talks to; errors surface as plain strings here.

use crate::agent::Agent;
use crate::behaviors::{
    AlignmentParams, ArrivalParams, AvoidanceParams, BehaviorId, BehaviorPreset, CohesionParams,
    LeaderParams, SeparationParams, SteeringGains, WanderParams,
};
use crate::sim::{AgentSnapshot, SimConfig, SimEvent, Simulation};
use crate::world::Obstacle;
use crate::Vec2;
use serde::{Deserialize, Serialize};

pub const PRESET_NONE: &str = "none";
pub const PRESET_SEEK: &str = "seek";
pub const PRESET_FLEE: &str = "flee";
pub const PRESET_WANDER: &str = "wander";
pub const PRESET_FLOCKING: &str = "flocking";
pub const PRESET_PURSUIT: &str = "pursuit";
pub const PRESET_EVASION: &str = "evasion";
pub const PRESET_OBSTACLE_AVOIDANCE: &str = "obstacle-avoidance";
pub const PRESET_ARRIVAL: &str = "arrival";
pub const PRESET_LEADER_FOLLOWING: &str = "leader-following";

/// Golden angle, radians. Used for the deterministic demo spawn spiral.
const GOLDEN_ANGLE: f32 = 2.399_963;

pub struct PresetInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub fn preset_catalog() -> &'static [PresetInfo] {
    &[
        PresetInfo {
            id: PRESET_NONE,
            name: "No steering",
            description: "Agents coast; only collision response runs.",
        },
        PresetInfo {
            id: PRESET_SEEK,
            name: "Seek",
            description: "Full-speed pursuit of the target point.",
        },
        PresetInfo {
            id: PRESET_FLEE,
            name: "Flee",
            description: "Full-speed retreat from the target point.",
        },
        PresetInfo {
            id: PRESET_WANDER,
            name: "Wander",
            description: "Perturbed heading on a projection circle.",
        },
        PresetInfo {
            id: PRESET_FLOCKING,
            name: "Flocking",
            description: "Separation, cohesion and alignment together.",
        },
        PresetInfo {
            id: PRESET_PURSUIT,
            name: "Pursuit",
            description: "Intercept a bound agent's predicted position.",
        },
        PresetInfo {
            id: PRESET_EVASION,
            name: "Evasion",
            description: "Run from a bound agent's predicted position.",
        },
        PresetInfo {
            id: PRESET_OBSTACLE_AVOIDANCE,
            name: "Obstacle avoidance",
            description: "Feeler-based steering around static boxes.",
        },
        PresetInfo {
            id: PRESET_ARRIVAL,
            name: "Arrival",
            description: "Seek with a linear slow-down near the target.",
        },
        PresetInfo {
            id: PRESET_LEADER_FOLLOWING,
            name: "Leader following",
            description: "Hold station behind agent 0 while it wanders.",
        },
    ]
}

pub fn normalize_preset_id(id: &str) -> Option<&'static str> {
    preset_catalog().iter().map(|p| p.id).find(|p| *p == id)
}

fn behavior_from_id(id: &str) -> Option<BehaviorId> {
    match id {
        "obstacle-avoidance" => Some(BehaviorId::ObstacleAvoidance),
        "seek" => Some(BehaviorId::Seek),
        "flee" => Some(BehaviorId::Flee),
        "wander" => Some(BehaviorId::Wander),
        "separation" => Some(BehaviorId::Separation),
        "cohesion" => Some(BehaviorId::Cohesion),
        "alignment" => Some(BehaviorId::Alignment),
        "pursuit" => Some(BehaviorId::Pursuit),
        "evasion" => Some(BehaviorId::Evasion),
        "arrival" => Some(BehaviorId::Arrival),
        "leader-following" => Some(BehaviorId::LeaderFollowing),
        _ => None,
    }
}

/// Spawn description for custom scenes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentConfig {
    pub position: [f32; 2],
    #[serde(default)]
    pub velocity: [f32; 2],
    #[serde(default)]
    pub max_speed: Option<f32>,
    #[serde(default)]
    pub speed_multiplier: Option<f32>,
}

pub struct Engine {
    sim: Simulation,
    preset_id: &'static str,
}

impl Engine {
    /// Deterministic demo scene: `count` agents on a golden-angle spiral
    /// around the world center, gentle tangential starting velocities.
    pub fn new_demo(width: f32, height: f32, count: usize, seed: u64) -> Engine {
        let mut sim = Simulation::new(SimConfig {
            width,
            height,
            seed: Some(seed),
        });
        let center = Vec2::new(width * 0.5, height * 0.5);
        let spread = width.min(height) * 0.35;
        for i in 0..count {
            let fi = i as f32;
            let angle = fi * GOLDEN_ANGLE;
            let r = spread * ((fi + 0.5) / count.max(1) as f32).sqrt();
            let position = center + Vec2::new(angle.cos(), angle.sin()) * r;
            let mut agent = Agent::new(position);
            agent.set_velocity(Vec2::new(-angle.sin(), angle.cos()) * 2.0);
            sim.add_agent(agent);
        }
        Engine {
            sim,
            preset_id: PRESET_NONE,
        }
    }

    pub fn new_custom(
        configs: &[AgentConfig],
        width: f32,
        height: f32,
        seed: u64,
        preset: Option<&str>,
    ) -> Result<Engine, String> {
        let mut sim = Simulation::new(SimConfig {
            width,
            height,
            seed: Some(seed),
        });
        for c in configs {
            let mut agent = Agent::new(Vec2::new(c.position[0], c.position[1]));
            if let Some(max_speed) = c.max_speed {
                agent.set_max_speed(max_speed);
            }
            agent.set_velocity(Vec2::new(c.velocity[0], c.velocity[1]));
            if let Some(multiplier) = c.speed_multiplier {
                agent.set_speed_multiplier(multiplier);
            }
            sim.add_agent(agent);
        }
        let mut engine = Engine {
            sim,
            preset_id: PRESET_NONE,
        };
        if let Some(id) = preset {
            engine.set_preset(id)?;
        }
        Ok(engine)
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    pub fn len(&self) -> usize {
        self.sim.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sim.is_empty()
    }

    pub fn preset_id(&self) -> &'static str {
        self.preset_id
    }

    pub fn tick(&mut self, dt: f32) {
        self.sim.step(dt);
    }

    pub fn set_target(&mut self, x: f32, y: f32) {
        self.sim.set_target_position(Vec2::new(x, y));
    }

    pub fn add_obstacle(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.sim
            .add_obstacle(Obstacle::new(Vec2::new(x, y), Vec2::new(width, height)));
    }

    /// Select the exclusive behaviour preset: zero every weighting, then
    /// enable the preset's set. The underlying blend stays weight-gated;
    /// the preset tag exists for visualization and UI state.
    pub fn set_preset(&mut self, id: &str) -> Result<(), String> {
        let id = normalize_preset_id(id).ok_or_else(|| format!("unknown preset id '{id}'"))?;

        for agent in 0..self.sim.len() {
            if let Some(a) = self.sim.agent_mut(agent) {
                a.steering_mut().disable_all();
            }
        }

        match id {
            PRESET_NONE => self.tag_all(BehaviorPreset::None),
            PRESET_SEEK => {
                self.enable_all(BehaviorId::Seek);
                self.tag_all(BehaviorPreset::Seek);
            }
            PRESET_FLEE => {
                self.enable_all(BehaviorId::Flee);
                self.tag_all(BehaviorPreset::Flee);
            }
            PRESET_WANDER => {
                self.enable_all(BehaviorId::Wander);
                self.tag_all(BehaviorPreset::Wander);
            }
            PRESET_FLOCKING => {
                self.enable_all(BehaviorId::Separation);
                self.enable_all(BehaviorId::Cohesion);
                self.enable_all(BehaviorId::Alignment);
                self.tag_all(BehaviorPreset::Flocking);
            }
            PRESET_PURSUIT => {
                self.sim
                    .default_target_binding()
                    .map_err(|e| e.to_string())?;
                self.enable_all(BehaviorId::Pursuit);
                self.tag_all(BehaviorPreset::Pursuit);
            }
            PRESET_EVASION => {
                self.sim
                    .default_target_binding()
                    .map_err(|e| e.to_string())?;
                self.enable_all(BehaviorId::Evasion);
                self.tag_all(BehaviorPreset::Evasion);
            }
            PRESET_OBSTACLE_AVOIDANCE => {
                self.enable_all(BehaviorId::ObstacleAvoidance);
                self.enable_all(BehaviorId::Wander);
                self.tag_all(BehaviorPreset::ObstacleAvoidance);
            }
            PRESET_ARRIVAL => {
                self.enable_all(BehaviorId::Arrival);
                self.tag_all(BehaviorPreset::Arrival);
            }
            PRESET_LEADER_FOLLOWING => {
                if self.sim.len() < 2 {
                    return Err("leader following requires at least two agents".to_string());
                }
                for follower in 1..self.sim.len() {
                    self.sim
                        .bind_leader(follower, 0)
                        .map_err(|e| e.to_string())?;
                    if let Some(a) = self.sim.agent_mut(follower) {
                        a.steering_mut().leader.gains.weighting = 1.0;
                    }
                }
                if let Some(leader) = self.sim.agent_mut(0) {
                    leader.steering_mut().wander.gains.weighting = 1.0;
                }
                self.tag_all(BehaviorPreset::LeaderFollowing);
            }
            _ => {}
        }

        self.preset_id = id;
        Ok(())
    }

    fn enable_all(&mut self, id: BehaviorId) {
        for agent in 0..self.sim.len() {
            if let Some(a) = self.sim.agent_mut(agent) {
                a.steering_mut().gains_mut(id).weighting = 1.0;
            }
        }
    }

    fn tag_all(&mut self, preset: BehaviorPreset) {
        for agent in 0..self.sim.len() {
            if let Some(a) = self.sim.agent_mut(agent) {
                a.set_preset(preset);
            }
        }
    }

    /// Broadcast one behaviour's blend coefficients, the per-behaviour
    /// slider set of the UI.
    pub fn set_gains(&mut self, behavior: &str, gains: SteeringGains) -> Result<(), String> {
        let id = behavior_from_id(behavior)
            .ok_or_else(|| format!("unknown behavior id '{behavior}'"))?;
        for agent in 0..self.sim.len() {
            if let Some(a) = self.sim.agent_mut(agent) {
                *a.steering_mut().gains_mut(id) = gains;
            }
        }
        Ok(())
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        for agent in 0..self.sim.len() {
            if let Some(a) = self.sim.agent_mut(agent) {
                a.set_speed_multiplier(multiplier);
            }
        }
    }

    pub fn set_wander_params(&mut self, params: WanderParams) {
        self.broadcast(|steering| steering.wander = params);
    }

    pub fn set_separation_params(&mut self, params: SeparationParams) {
        self.broadcast(|steering| steering.separation = params);
    }

    pub fn set_cohesion_params(&mut self, params: CohesionParams) {
        self.broadcast(|steering| steering.cohesion = params);
    }

    pub fn set_alignment_params(&mut self, params: AlignmentParams) {
        self.broadcast(|steering| steering.alignment = params);
    }

    pub fn set_avoidance_params(&mut self, params: AvoidanceParams) {
        self.broadcast(|steering| steering.avoidance = params);
    }

    pub fn set_arrival_params(&mut self, params: ArrivalParams) {
        self.broadcast(|steering| steering.arrival = params);
    }

    /// Tuning fields only; leader bindings stay as bound.
    pub fn set_leader_params(&mut self, params: LeaderParams) {
        self.broadcast(|steering| {
            let bound = steering.leader.leader;
            steering.leader = params;
            steering.leader.leader = bound;
        });
    }

    fn broadcast(&mut self, mut apply: impl FnMut(&mut crate::behaviors::SteeringSet)) {
        for agent in 0..self.sim.len() {
            if let Some(a) = self.sim.agent_mut(agent) {
                apply(a.steering_mut());
            }
        }
    }

    pub fn snapshots(&self) -> Vec<AgentSnapshot> {
        self.sim.snapshots()
    }

    /// Flat `[x, y]*` positions for the renderer.
    pub fn positions_flat(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.sim.len() * 2);
        for a in self.sim.agents() {
            out.push(a.position().x);
            out.push(a.position().y);
        }
        out
    }

    /// Flat `[vx, vy]*` velocities.
    pub fn velocities_flat(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.sim.len() * 2);
        for a in self.sim.agents() {
            out.push(a.velocity().x);
            out.push(a.velocity().y);
        }
        out
    }

    pub fn orientations_flat(&self) -> Vec<f32> {
        self.sim.agents().iter().map(|a| a.orientation()).collect()
    }

    /// Flat `[r, g, b]*` display colors.
    pub fn colors_flat(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.sim.len() * 3);
        for a in self.sim.agents() {
            out.extend_from_slice(&a.color());
        }
        out
    }

    /// Flat `[x, y, vx, vy]*` state matrix.
    pub fn states_flat(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.sim.len() * 4);
        for a in self.sim.agents() {
            out.push(a.position().x);
            out.push(a.position().y);
            out.push(a.velocity().x);
            out.push(a.velocity().y);
        }
        out
    }

    /// Drain this tick's highlight events as flat `[source, target]*`
    /// index pairs.
    pub fn events_flat(&mut self) -> Vec<u32> {
        let mut out = Vec::new();
        for event in self.sim.drain_events() {
            match event {
                SimEvent::TargetHighlight { source, target } => {
                    out.push(source as u32);
                    out.push(target as u32);
                }
            }
        }
        out
    }
}
