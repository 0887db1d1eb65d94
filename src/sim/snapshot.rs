//! Read-only view of a tick's outcome for presentation layers

use serde::{Deserialize, Serialize};

use super::gravity::altitude;
use super::state::{Asteroid, Particle, Planet, Projectile, Ship, SimEvent, World};

/// Derived readouts for the heads-up display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    /// Ship speed (units per tick)
    pub speed: f32,
    /// Distance from the planet surface
    pub altitude: f32,
    pub thrust_level: u8,
    /// Gravity as shown on the tuning slider (G × 10)
    pub gravity_display: f32,
}

/// Everything a renderer needs after a tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub active: bool,
    pub planet: Planet,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub events: Vec<SimEvent>,
    pub hud: Hud,
}

impl Hud {
    pub fn from_world(world: &World) -> Self {
        Self {
            speed: world.ship.vel.length(),
            altitude: altitude(world.ship.pos, &world.planet),
            thrust_level: world.ship.thrust_level,
            gravity_display: world.gravity * 10.0,
        }
    }
}

impl Snapshot {
    pub fn capture(world: &World) -> Self {
        Self {
            tick: world.time_ticks,
            active: world.active,
            planet: world.planet,
            ship: world.ship.clone(),
            asteroids: world.asteroids.clone(),
            projectiles: world.projectiles.clone(),
            particles: world.particles.clone(),
            events: world.events.clone(),
            hud: Hud::from_world(world),
        }
    }

    /// Serialize for a JavaScript or remote presentation layer
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Profile;
    use glam::Vec3;

    #[test]
    fn test_hud_readouts() {
        let mut world = World::with_profile(Profile::Orbital, 1);
        world.ship.vel = Vec3::new(3.0, 4.0, 0.0);
        let hud = Hud::from_world(&world);
        assert_eq!(hud.speed, 5.0);
        // Ship starts 150 from the origin, planet radius 50
        assert_eq!(hud.altitude, 100.0);
        assert_eq!(hud.thrust_level, 1);
        assert!((hud.gravity_display - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_snapshot_serializes() {
        let world = World::with_profile(Profile::Orbital, 1);
        let json = Snapshot::capture(&world).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["asteroids"].as_array().map(|a| a.len()), Some(20));
        assert_eq!(value["active"], serde_json::Value::Bool(false));
    }
}
