//! Carom entry point
//!
//! Headless run of a seeded random scene: `carom [seed] [steps] [settings.json]`.
//! Set `RUST_LOG=debug` to see individual bounces.

use std::process::ExitCode;

use carom::EngineSettings;
use carom::sim::{SceneParams, random_scene};

const DEFAULT_SEED: u64 = 12345;
const DEFAULT_STEPS: u64 = 600;
/// Steps between progress lines
const REPORT_EVERY: u64 = 100;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = match args.first().map(|s| s.parse::<u64>()) {
        None => DEFAULT_SEED,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("invalid seed {:?}: {}", args[0], e);
            return ExitCode::FAILURE;
        }
    };
    let steps = match args.get(1).map(|s| s.parse::<u64>()) {
        None => DEFAULT_STEPS,
        Some(Ok(steps)) => steps,
        Some(Err(e)) => {
            eprintln!("invalid step count {:?}: {}", args[1], e);
            return ExitCode::FAILURE;
        }
    };
    let settings = match args.get(2) {
        None => EngineSettings::default(),
        Some(path) => match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| EngineSettings::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("{}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
    };

    log::info!("Carom starting: seed={}, steps={}", seed, steps);

    let mut world = match random_scene(seed, &SceneParams::default(), settings) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("scene: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let start_momentum = world.momentum();
    let mut pairs = 0;
    let mut bounces = 0;
    let mut truncated = 0;
    for _ in 0..steps {
        let report = world.step();
        pairs += report.pair_collisions;
        bounces += report.wall_bounces;
        truncated += report.truncated;
        if (report.step + 1) % REPORT_EVERY == 0 {
            log::info!(
                "Step {}: {} pair collisions, {} wall bounces so far",
                report.step + 1,
                pairs,
                bounces
            );
        }
    }

    println!(
        "{} steps: {} pair collisions, {} wall bounces, {} truncated",
        world.steps(),
        pairs,
        bounces,
        truncated
    );
    println!("momentum {} -> {}", start_momentum, world.momentum());
    for (i, ball) in world.balls.iter().enumerate() {
        println!(
            "ball {:2}: pos=({:8.2}, {:8.2}) vel=({:7.3}, {:7.3}) r={:.1}",
            i,
            ball.pos.x,
            ball.pos.y,
            ball.vel.x,
            ball.vel.y,
            ball.radius()
        );
    }

    ExitCode::SUCCESS
}
