//! Simulation tick driver: owns the agent arena, obstacles and world
//! bounds, freezes a per-tick snapshot every agent reads from, and collects
//! the events the rendering collaborator consumes.

use crate::agent::Agent;
use crate::world::{Obstacle, WorldBounds};
use crate::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_WORLD_WIDTH: f32 = 1280.0;
pub const DEFAULT_WORLD_HEIGHT: f32 = 720.0;
const DEFAULT_SEED: u64 = 0x5EED_0001;

/// Construction-time configuration. `seed` pins the wander RNG so runs are
/// reproducible; `None` uses a fixed default seed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimConfig {
    pub width: f32,
    pub height: f32,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WORLD_WIDTH,
            height: DEFAULT_WORLD_HEIGHT,
            seed: None,
        }
    }
}

/// Read-only view of one agent at tick start.
#[derive(Debug, Clone, Copy)]
pub struct AgentView {
    pub position: Vec2,
    pub velocity: Vec2,
    pub heading: f32,
}

/// Frozen state of the whole arena at tick start. Every agent's behaviours
/// read neighbours from here, so later-indexed agents see start-of-tick
/// state instead of already-updated peers.
#[derive(Debug, Clone)]
pub struct TickSnapshot {
    pub views: Vec<AgentView>,
    pub world: Vec2,
}

impl TickSnapshot {
    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

/// Presentation hooks emitted during a tick, drained by the caller. The
/// physics core never writes another agent's display state directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// `source` is actively pursuing/evading `target` this tick.
    TargetHighlight { source: usize, target: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("operation requires a non-empty agent collection")]
    NoAgents,
    #[error("agent index {0} is out of bounds")]
    BadAgentIndex(usize),
    #[error("agent {0} cannot target itself")]
    SelfTarget(usize),
}

/// Full read-only state of one agent, for the rendering collaborator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub orientation: f32,
    pub color: [f32; 3],
}

#[derive(Debug)]
pub struct Simulation {
    bounds: WorldBounds,
    agents: Vec<Agent>,
    obstacles: Vec<Obstacle>,
    rng: SmallRng,
    events: Vec<SimEvent>,
    time: f32,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        Self {
            bounds: WorldBounds::new(config.width, config.height),
            agents: Vec::new(),
            obstacles: Vec::new(),
            rng: SmallRng::seed_from_u64(config.seed.unwrap_or(DEFAULT_SEED)),
            events: Vec::new(),
            time: 0.0,
        }
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Add an agent and return its arena index, the handle other agents use
    /// to reference it.
    pub fn add_agent(&mut self, agent: Agent) -> usize {
        self.agents.push(agent);
        self.agents.len() - 1
    }

    /// Obstacles are static, immutable geometry for the simulation's
    /// lifetime.
    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, index: usize) -> Option<&Agent> {
        self.agents.get(index)
    }

    pub fn agent_mut(&mut self, index: usize) -> Option<&mut Agent> {
        self.agents.get_mut(index)
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Broadcast the external target point (typically the cursor) to every
    /// agent, once per frame before the tick.
    pub fn set_target_position(&mut self, target: Vec2) {
        for agent in &mut self.agents {
            agent.set_target_position(target);
        }
    }

    fn check_binding(&self, source: usize, target: usize) -> Result<(), SimError> {
        if source >= self.agents.len() {
            return Err(SimError::BadAgentIndex(source));
        }
        if target >= self.agents.len() {
            return Err(SimError::BadAgentIndex(target));
        }
        if source == target {
            return Err(SimError::SelfTarget(source));
        }
        Ok(())
    }

    pub fn bind_pursuit_target(&mut self, source: usize, target: usize) -> Result<(), SimError> {
        self.check_binding(source, target)?;
        self.agents[source].steering_mut().pursuit.target = Some(target);
        Ok(())
    }

    pub fn bind_evasion_target(&mut self, source: usize, target: usize) -> Result<(), SimError> {
        self.check_binding(source, target)?;
        self.agents[source].steering_mut().evasion.target = Some(target);
        Ok(())
    }

    pub fn bind_leader(&mut self, follower: usize, leader: usize) -> Result<(), SimError> {
        self.check_binding(follower, leader)?;
        self.agents[follower].steering_mut().leader.leader = Some(leader);
        Ok(())
    }

    /// Reproduce the reference default: every agent targets the first agent
    /// other than itself, for both pursuit and evasion. Fails loudly on an
    /// arena too small to provide one, instead of faulting later.
    pub fn default_target_binding(&mut self) -> Result<(), SimError> {
        if self.agents.len() < 2 {
            return Err(SimError::NoAgents);
        }
        for i in 0..self.agents.len() {
            let target = if i == 0 { 1 } else { 0 };
            let steering = self.agents[i].steering_mut();
            steering.pursuit.target = Some(target);
            steering.evasion.target = Some(target);
        }
        Ok(())
    }

    /// Frozen per-tick view of the arena.
    pub fn tick_snapshot(&self) -> TickSnapshot {
        TickSnapshot {
            views: self
                .agents
                .iter()
                .map(|a| AgentView {
                    position: a.position(),
                    velocity: a.velocity(),
                    heading: a.orientation(),
                })
                .collect(),
            world: self.bounds.size(),
        }
    }

    /// Advance the whole arena one fixed timestep. Wander RNG draws run in
    /// a sequential pre-pass; every agent then updates against the frozen
    /// snapshot.
    pub fn step(&mut self, dt: f32) {
        let snapshot = self.tick_snapshot();

        for agent in &mut self.agents {
            agent.retarget_wander(dt, &mut self.rng);
        }

        let bounds = self.bounds;
        let obstacles = &self.obstacles;
        let events = &mut self.events;
        for (i, agent) in self.agents.iter_mut().enumerate() {
            agent.update(i, dt, &bounds, &snapshot, obstacles, events);
        }

        self.time += dt;
    }

    /// Parallel variant of [`step`](Self::step): the per-agent pass runs on
    /// rayon against the same frozen snapshot, with the RNG and event
    /// phases kept sequential so results match the serial path.
    #[cfg(feature = "parallel")]
    pub fn step_par(&mut self, dt: f32) {
        use rayon::prelude::*;

        let snapshot = self.tick_snapshot();

        for agent in &mut self.agents {
            agent.retarget_wander(dt, &mut self.rng);
        }

        let bounds = self.bounds;
        let obstacles = &self.obstacles;
        let per_agent: Vec<Vec<SimEvent>> = self
            .agents
            .par_iter_mut()
            .enumerate()
            .map(|(i, agent)| {
                let mut local = Vec::new();
                agent.update(i, dt, &bounds, &snapshot, obstacles, &mut local);
                local
            })
            .collect();
        for mut local in per_agent {
            self.events.append(&mut local);
        }

        self.time += dt;
    }

    /// Events emitted since the last drain.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only state of every agent for the rendering collaborator.
    pub fn snapshots(&self) -> Vec<AgentSnapshot> {
        self.agents
            .iter()
            .map(|a| AgentSnapshot {
                position: [a.position().x, a.position().y],
                velocity: [a.velocity().x, a.velocity().y],
                orientation: a.orientation(),
                color: a.color(),
            })
            .collect()
    }
}
