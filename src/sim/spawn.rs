//! Asteroid population management
//!
//! The flat arena drops a new rock in from a random edge on a fixed cadence
//! while under its cap. The orbital field is seeded once and topped back up
//! whenever rocks are destroyed.

use glam::Vec3;
use rand::Rng;

use super::state::{SimEvent, World};
use crate::settings::SpawnPolicy;
use crate::{planar, polar_to_cartesian};

/// Uniform sample in `[min, max)`, or `min` for an empty range
fn sample(rng: &mut impl Rng, (min, max): (f32, f32)) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// Spawner step for one tick; returns how many asteroids were added
pub fn maybe_spawn(world: &mut World) -> usize {
    match world.settings.spawn {
        SpawnPolicy::Edge {
            interval_ticks,
            cap,
            ..
        } => {
            world.spawn_timer += 1;
            if world.spawn_timer < interval_ticks {
                return 0;
            }
            world.spawn_timer = 0;
            if world.asteroids.len() >= cap {
                return 0;
            }
            spawn_from_edge(world);
            1
        }
        SpawnPolicy::Orbit { target, .. } => replenish(world, target),
    }
}

/// Add orbiting asteroids until `target` are live
pub fn replenish(world: &mut World, target: usize) -> usize {
    let mut added = 0;
    while world.asteroids.len() < target {
        if spawn_in_orbit(world).is_none() {
            break;
        }
        added += 1;
    }
    added
}

/// Place a rock just outside a random edge, heading roughly at the center
pub fn spawn_from_edge(world: &mut World) -> Option<u32> {
    let SpawnPolicy::Edge {
        edge_offset,
        speed,
        radius,
        aim_jitter,
        ..
    } = world.settings.spawn
    else {
        return None;
    };

    let extent = world.viewport;
    let rng = &mut world.rng;
    let (x, y) = match rng.random_range(0..4) {
        0 => (rng.random::<f32>() * extent.x, -edge_offset),
        1 => (extent.x + edge_offset, rng.random::<f32>() * extent.y),
        2 => (rng.random::<f32>() * extent.x, extent.y + edge_offset),
        _ => (-edge_offset, rng.random::<f32>() * extent.y),
    };

    let center = extent / 2.0;
    let heading = (center.y - y).atan2(center.x - x) + (rng.random::<f32>() - 0.5) * aim_jitter;
    let speed = sample(rng, speed);
    let radius = sample(rng, radius);

    let pos = Vec3::new(x, y, 0.0);
    let vel = planar(polar_to_cartesian(speed, heading));
    let id = world.push_asteroid(pos, vel, radius);
    world.events.push(SimEvent::AsteroidSpawned { id });
    log::debug!("Edge spawn {} at ({:.0}, {:.0}) r={:.1}", id, x, y, radius);
    Some(id)
}

/// Place a rock on a near-circular orbit in the ring band
///
/// Speed follows `v = sqrt(G * mass / r)` for the live gravity constant.
pub fn spawn_in_orbit(world: &mut World) -> Option<u32> {
    let SpawnPolicy::Orbit {
        radius,
        distance,
        height_jitter,
        vertical_speed_jitter,
        ..
    } = world.settings.spawn
    else {
        return None;
    };

    let g_mass = world.gravity * world.planet.mass;
    let center = world.planet.pos;
    let rng = &mut world.rng;

    let radius = sample(rng, radius);
    let orbit = sample(rng, distance);
    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    let ring = polar_to_cartesian(orbit, angle);
    let height = (rng.random::<f32>() - 0.5) * height_jitter;

    let speed = (g_mass / orbit).sqrt();
    let tangent = polar_to_cartesian(speed, angle + std::f32::consts::FRAC_PI_2);
    let climb = (rng.random::<f32>() - 0.5) * vertical_speed_jitter;

    // The orbital plane is x/z with y as "up"
    let pos = center + Vec3::new(ring.x, height, ring.y);
    let vel = Vec3::new(tangent.x, climb, tangent.y);

    let id = world.push_asteroid(pos, vel, radius);
    world.events.push(SimEvent::AsteroidSpawned { id });
    Some(id)
}
