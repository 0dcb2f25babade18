//! 2D autonomous-agent steering simulation core.
//!
//! A population of point agents moves across a bounded, toroidal plane;
//! each agent blends weighted steering behaviours (seek, flee, wander,
//! separation/cohesion/alignment, pursuit, evasion, obstacle avoidance,
//! arrival, leader following) into a speed-capped velocity and integrates
//! kinematically. Rendering, input and UI are external collaborators: the
//! [`engine`] and `wasm` layers only expose read-only state and accept
//! parameter changes between ticks.

pub mod agent;
pub mod behaviors;
pub mod engine;
pub mod math;
pub mod sim;
pub mod world;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

/// The crate works in f32 planar vectors throughout.
pub type Vec2 = nalgebra::Vector2<f32>;

pub use agent::Agent;
pub use behaviors::{BehaviorId, BehaviorPreset, SteeringGains, SteeringSet};
pub use engine::{preset_catalog, AgentConfig, Engine, PresetInfo};
pub use sim::{
    AgentSnapshot, AgentView, SimConfig, SimError, SimEvent, Simulation, TickSnapshot,
};
pub use world::{Obstacle, WorldBounds};
