use rsteer::engine::PRESET_FLOCKING;
use rsteer::Engine;

fn main() {
    // Headless demo: the reference scene (1280x720, 100 agents) with a few
    // obstacles, run at a fixed 60 Hz for ten simulated seconds.
    let mut engine = Engine::new_demo(1280.0, 720.0, 100, 7);
    engine.add_obstacle(300.0, 200.0, 120.0, 80.0);
    engine.add_obstacle(800.0, 450.0, 90.0, 150.0);

    if let Err(e) = engine.set_preset(PRESET_FLOCKING) {
        eprintln!("failed to apply preset: {e}");
        std::process::exit(1);
    }
    engine.set_target(640.0, 360.0);

    let dt = 1.0 / 60.0;
    let steps = 600;
    for _ in 0..steps {
        engine.tick(dt);
    }

    let sim = engine.simulation();
    println!("t = {:.2} s, agents = {}", sim.time(), sim.len());
    for (i, snap) in sim.snapshots().iter().take(5).enumerate() {
        println!(
            "agent {i}: pos = ({:7.2}, {:7.2}) vel = ({:6.2}, {:6.2}) facing = {:5.2} rad",
            snap.position[0], snap.position[1], snap.velocity[0], snap.velocity[1], snap.orientation
        );
    }
}
