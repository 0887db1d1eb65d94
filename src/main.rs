//! Orbit Strike headless runner
//!
//! Flies a scripted pilot through the simulation and logs the HUD, for
//! tuning settings files without a renderer attached.
//!
//! Usage: `orbit-strike [flat|orbital|settings.json] [seed] [ticks]`

use orbit_strike::consts::TICK_RATE;
use orbit_strike::sim::{SimEvent, TickInput, World, tick};
use orbit_strike::{Profile, Settings, SettingsError};

/// Default run length: one minute of play
const DEFAULT_TICKS: u64 = 60 * TICK_RATE as u64;

fn load_settings(arg: Option<&str>) -> Result<Settings, SettingsError> {
    match arg {
        None => Ok(Settings::flat()),
        Some(name) => match Profile::from_str(name) {
            Some(profile) => Ok(Settings::from_profile(profile)),
            None => Settings::load(name),
        },
    }
}

/// Alternate burns and coasts while sweeping the guns
fn scripted_input(t: u64) -> TickInput {
    let phase = t % (4 * TICK_RATE as u64);
    TickInput {
        ignite: t == 0,
        thrust_level: (t == 0).then_some(3),
        thrust: phase < 20,
        rotate_left: (40..70).contains(&phase),
        pitch_up: (100..110).contains(&phase),
        fire: true,
        ..Default::default()
    }
}

fn main() {
    env_logger::init();
    log::info!("Orbit Strike (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = match load_settings(args.first().map(String::as_str)) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    let seed = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EED_u64);
    let ticks = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let mut world = World::new(settings, seed);
    let mut destroyed = 0usize;
    let mut bounces = 0usize;
    let mut last = None;

    for t in 0..ticks {
        let snapshot = tick(&mut world, &scripted_input(t));
        for event in &snapshot.events {
            match event {
                SimEvent::AsteroidDestroyed { .. } => destroyed += 1,
                SimEvent::ShipBounced { .. } => bounces += 1,
                _ => {}
            }
        }
        if t % TICK_RATE as u64 == 0 {
            let hud = snapshot.hud;
            log::info!(
                "t={:>5} speed={:.2} alt={:.0} thrust={} asteroids={} lasers={} particles={}",
                snapshot.tick,
                hud.speed,
                hud.altitude,
                hud.thrust_level,
                snapshot.asteroids.len(),
                snapshot.projectiles.len(),
                snapshot.particles.len()
            );
        }
        last = Some(snapshot);
    }

    log::info!(
        "Done: {} ticks, {} asteroids destroyed, {} ship bounces",
        ticks,
        destroyed,
        bounces
    );

    if let Some(snapshot) = last {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize snapshot: {e}"),
        }
    }
}
