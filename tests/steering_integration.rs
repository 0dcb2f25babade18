use rsteer::engine::{
    PRESET_ARRIVAL, PRESET_FLOCKING, PRESET_PURSUIT, PRESET_SEEK, PRESET_WANDER,
};
use rsteer::{
    Agent, Engine, SimConfig, SimError, SimEvent, Simulation, SteeringGains, Vec2,
};

const DT: f32 = 1.0 / 60.0;

fn demo_engine(count: usize, seed: u64) -> Engine {
    Engine::new_demo(1280.0, 720.0, count, seed)
}

#[test]
fn speed_cap_holds_under_aggressive_parameters() {
    let mut engine = demo_engine(20, 42);
    engine.add_obstacle(500.0, 300.0, 150.0, 100.0);
    engine.set_target(900.0, 600.0);

    for preset in [PRESET_SEEK, PRESET_WANDER, PRESET_FLOCKING, PRESET_ARRIVAL] {
        engine.set_preset(preset).expect("known preset");
        for behavior in ["seek", "wander", "separation", "cohesion", "alignment", "arrival"] {
            engine
                .set_gains(
                    behavior,
                    SteeringGains {
                        weighting: 1.0,
                        strength: 500.0,
                        max_force: 10_000.0,
                    },
                )
                .expect("known behavior");
        }
        for _ in 0..120 {
            engine.tick(DT);
            for agent in engine.simulation().agents() {
                assert!(
                    agent.velocity().norm() <= agent.max_speed() + 1.0e-3,
                    "speed cap violated under preset {preset}"
                );
            }
        }
    }
}

#[test]
fn zero_weighted_behaviour_matches_absent_behaviour() {
    // Same seed, same seek setup; one sim also carries flee/cohesion at
    // weighting zero. Trajectories must be bit-for-bit identical.
    let build = |extra_zero_weights: bool| {
        let mut sim = Simulation::new(SimConfig {
            seed: Some(1234),
            ..SimConfig::default()
        });
        for i in 0..6 {
            let mut agent = Agent::new(Vec2::new(100.0 + 80.0 * i as f32, 200.0));
            agent.steering_mut().seek.gains.weighting = 1.0;
            agent.steering_mut().wander.gains.weighting = 0.5;
            if extra_zero_weights {
                agent.steering_mut().flee.gains.weighting = 0.0;
                agent.steering_mut().cohesion.gains.weighting = 0.0;
            }
            sim.add_agent(agent);
        }
        sim.set_target_position(Vec2::new(1000.0, 650.0));
        sim
    };

    let mut with_zeros = build(true);
    let mut without = build(false);
    for _ in 0..240 {
        with_zeros.step(DT);
        without.step(DT);
    }
    for (a, b) in with_zeros.agents().iter().zip(without.agents()) {
        assert_eq!(a.position(), b.position());
        assert_eq!(a.velocity(), b.velocity());
    }
}

#[test]
fn identical_seeds_reproduce_identical_trajectories() {
    let mut first = demo_engine(30, 777);
    let mut second = demo_engine(30, 777);
    first.set_preset(PRESET_WANDER).expect("known preset");
    second.set_preset(PRESET_WANDER).expect("known preset");

    for _ in 0..300 {
        first.tick(DT);
        second.tick(DT);
    }
    assert_eq!(first.positions_flat(), second.positions_flat());
    assert_eq!(first.velocities_flat(), second.velocities_flat());
}

#[test]
fn different_seeds_diverge_under_wander() {
    let mut first = demo_engine(10, 1);
    let mut second = demo_engine(10, 2);
    first.set_preset(PRESET_WANDER).expect("known preset");
    second.set_preset(PRESET_WANDER).expect("known preset");

    for _ in 0..300 {
        first.tick(DT);
        second.tick(DT);
    }
    assert_ne!(first.positions_flat(), second.positions_flat());
}

#[test]
fn toroidal_traversal_returns_near_start() {
    let mut sim = Simulation::new(SimConfig {
        width: 100.0,
        height: 100.0,
        seed: Some(5),
    });
    let start = Vec2::new(50.0, 30.0);
    let mut agent = Agent::new(start);
    agent.set_velocity(Vec2::new(-20.0, 0.0));
    sim.add_agent(agent);

    // No steering enabled: the agent coasts a full world width leftward.
    let dt = 0.1;
    for _ in 0..50 {
        sim.step(dt);
    }
    let agent = sim.agent(0).expect("agent exists");
    // The edge-snap wrap can donate up to one step of slack.
    assert!((agent.position().x - start.x).abs() < 2.5);
    assert_eq!(agent.position().y, start.y);
    assert_eq!(agent.velocity(), Vec2::new(-20.0, 0.0));
    let bounds = sim.bounds();
    assert!(bounds.contains(agent.position()));
}

#[test]
fn lone_agent_separation_is_a_no_op() {
    let mut sim = Simulation::new(SimConfig {
        seed: Some(3),
        ..SimConfig::default()
    });
    let mut agent = Agent::new(Vec2::new(200.0, 200.0));
    agent.set_velocity(Vec2::new(4.0, -3.0));
    agent.steering_mut().separation.gains.weighting = 1.0;
    sim.add_agent(agent);

    sim.step(DT);
    let agent = sim.agent(0).expect("agent exists");
    assert_eq!(agent.velocity(), Vec2::new(4.0, -3.0));
}

#[test]
fn arrival_settles_near_the_target() {
    let mut sim = Simulation::new(SimConfig {
        seed: Some(9),
        ..SimConfig::default()
    });
    let mut agent = Agent::new(Vec2::new(100.0, 100.0));
    agent.steering_mut().arrival.gains.weighting = 1.0;
    agent.steering_mut().arrival.gains.strength = 4.0;
    sim.add_agent(agent);
    let target = Vec2::new(600.0, 400.0);
    sim.set_target_position(target);

    for _ in 0..3600 {
        sim.step(DT);
    }
    let agent = sim.agent(0).expect("agent exists");
    let distance = (agent.position() - target).norm();
    assert!(distance < 50.0, "agent stopped {distance} away");
    assert!(agent.velocity().norm() < agent.max_speed() * 0.5);
}

#[test]
fn pursuit_preset_emits_highlight_pairs() {
    let mut engine = demo_engine(4, 21);
    engine.set_preset(PRESET_PURSUIT).expect("enough agents");

    engine.tick(DT);
    let events = engine.events_flat();
    // Every agent highlights its bound target each tick.
    assert_eq!(events.len(), 8);
    assert_eq!(events[0], 0);
    assert_eq!(events[1], 1);
}

#[test]
fn binding_into_empty_arena_is_a_loud_error() {
    let mut sim = Simulation::new(SimConfig::default());
    assert_eq!(sim.default_target_binding(), Err(SimError::NoAgents));
    assert_eq!(sim.bind_leader(0, 1), Err(SimError::BadAgentIndex(0)));
}

#[test]
fn obstacle_field_never_traps_an_agent_inside() {
    let mut engine = demo_engine(15, 33);
    engine.add_obstacle(400.0, 250.0, 200.0, 150.0);
    engine.add_obstacle(900.0, 100.0, 100.0, 300.0);
    engine.set_preset(PRESET_SEEK).expect("known preset");
    engine.set_target(500.0, 325.0); // dead center of the first obstacle

    for _ in 0..600 {
        engine.tick(DT);
        for (agent, obstacle) in engine
            .simulation()
            .agents()
            .iter()
            .flat_map(|a| engine.simulation().obstacles().iter().map(move |o| (a, o)))
        {
            assert!(
                !obstacle.contains(agent.position()),
                "agent left inside an obstacle after the tick"
            );
        }
    }
}

#[test]
fn highlight_events_accumulate_until_drained() {
    let mut sim = Simulation::new(SimConfig {
        seed: Some(17),
        ..SimConfig::default()
    });
    sim.add_agent(Agent::new(Vec2::new(100.0, 100.0)));
    sim.add_agent(Agent::new(Vec2::new(500.0, 500.0)));
    sim.bind_evasion_target(0, 1).expect("valid binding");
    if let Some(agent) = sim.agent_mut(0) {
        agent.steering_mut().evasion.gains.weighting = 1.0;
    }

    sim.step(DT);
    sim.step(DT);
    assert_eq!(sim.events().len(), 2);
    let drained = sim.drain_events();
    assert!(drained
        .iter()
        .all(|e| *e == SimEvent::TargetHighlight { source: 0, target: 1 }));
    assert!(sim.events().is_empty());
}
