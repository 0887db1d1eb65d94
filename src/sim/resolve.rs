//! Collision response
//!
//! Applies the side effects of detected collisions: projectile consumption,
//! asteroid destruction and splitting, ship impulse, planet bounce and the
//! cosmetic particle bursts. Removals are applied after the detection pass
//! so no live entity is skipped or processed twice.

use glam::Vec3;
use rand::Rng;

use super::collision::{ProjectileHit, ShipContact};
use super::state::{ParticleTag, Planet, SimEvent, World};
use crate::settings::SpawnPolicy;

/// Bounce a body off the planet surface
///
/// Velocity is reversed and damped (`v *= -restitution`) and the body is pushed
/// out along the surface normal until its center sits `contact_radius` from
/// the planet center. An exactly centered body is pushed out along +X.
pub fn planet_contact(
    pos: &mut Vec3,
    vel: &mut Vec3,
    planet: &Planet,
    distance: f32,
    contact_radius: f32,
    restitution: f32,
) {
    *vel *= -restitution;
    let outward = (*pos - planet.pos).normalize_or(Vec3::X);
    let overlap = contact_radius - distance;
    if overlap > 0.0 {
        *pos += outward * overlap;
    }
}

/// Random offset in `[-span / 2, span / 2)` on each active axis
pub(crate) fn scatter(rng: &mut impl Rng, span: f32, planar: bool) -> Vec3 {
    let x = (rng.random::<f32>() - 0.5) * span;
    let y = (rng.random::<f32>() - 0.5) * span;
    let z = if planar {
        0.0
    } else {
        (rng.random::<f32>() - 0.5) * span
    };
    Vec3::new(x, y, z)
}

/// Emit `count` particles at `origin` with scattered velocities
pub fn burst(world: &mut World, origin: Vec3, count: usize, spread: f32, tag: ParticleTag) {
    let planar = world.settings.profile.wraps();
    for _ in 0..count {
        let vel = scatter(&mut world.rng, spread, planar);
        world.emit_particle(origin, vel, tag);
    }
}

/// Consume hit projectiles and destroy (or split) the asteroids they struck
///
/// Returns how many asteroids were removed. Children created here join the
/// live set after the pass and are only collidable from the next tick.
pub fn resolve_projectile_hits(world: &mut World, hits: &[ProjectileHit]) -> usize {
    if hits.is_empty() {
        return 0;
    }

    let planar = world.settings.profile.wraps();
    let threshold = world.settings.split_threshold;
    let jitter = world.settings.split_jitter;
    let mut destroyed: Vec<u32> = Vec::with_capacity(hits.len());
    let mut children: Vec<(u32, Vec3, Vec3, f32)> = Vec::new();

    for hit in hits {
        // Spent projectiles are swept by the expiry pass later this tick
        world.projectiles[hit.projectile].life = 0.0;

        let (id, pos, vel, radius) = {
            let a = &world.asteroids[hit.asteroid];
            (a.id, a.pos, a.vel, a.radius)
        };
        destroyed.push(id);
        world.events.push(SimEvent::AsteroidDestroyed { id, pos, radius });

        let debris = world.settings.debris_burst;
        let spread = world.settings.debris_spread;
        burst(world, pos, debris, spread, ParticleTag::Debris);

        if radius > threshold {
            for _ in 0..2 {
                let child_vel = vel + scatter(&mut world.rng, jitter, planar);
                children.push((id, pos, child_vel, radius / 2.0));
            }
        }
    }

    world.asteroids.retain(|a| !destroyed.contains(&a.id));

    for pair in children.chunks(2) {
        let mut ids = [0u32; 2];
        for (slot, &(_, pos, vel, radius)) in ids.iter_mut().zip(pair) {
            *slot = world.push_asteroid(pos, vel, radius);
        }
        let parent = pair[0].0;
        log::debug!("Asteroid {} split into {:?}", parent, ids);
        world.events.push(SimEvent::AsteroidSplit {
            parent,
            children: ids,
        });
    }

    // The orbital field keeps its population constant
    if let SpawnPolicy::Orbit { target, .. } = world.settings.spawn {
        super::spawn::replenish(world, target);
    }

    destroyed.len()
}

/// Push the ship away from every asteroid it touches
///
/// Asteroids are not affected. Each contact applies its own impulse.
pub fn resolve_ship_contacts(world: &mut World, contacts: &[ShipContact]) {
    for contact in contacts {
        let strength = world.settings.bounce_strength;
        world.ship.vel -= contact.normal * strength;

        let asteroid = world.asteroids[contact.asteroid].id;
        world.events.push(SimEvent::ShipBounced { asteroid });
        log::debug!("Ship bounced off asteroid {}", asteroid);

        let origin = world.ship.pos;
        let count = world.settings.spark_burst;
        let spread = world.settings.spark_spread;
        burst(world, origin, count, spread, ParticleTag::Spark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Profile, Settings};
    use crate::sim::collision::{projectile_hits, ship_contacts};
    use crate::sim::state::Projectile;

    fn flat_world() -> World {
        World::with_profile(Profile::Flat, 42)
    }

    fn add_bolt(world: &mut World, pos: Vec3) {
        let id = world.next_entity_id();
        world.projectiles.push(Projectile {
            id,
            pos,
            vel: Vec3::ZERO,
            radius: 2.0,
            life: 1.0,
        });
    }

    #[test]
    fn test_large_asteroid_splits_in_two_halves() {
        let mut world = flat_world();
        let parent = world.push_asteroid(Vec3::new(300.0, 300.0, 0.0), Vec3::X, 40.0);
        add_bolt(&mut world, Vec3::new(300.0, 300.0, 0.0));

        let hits = projectile_hits(&world.projectiles, &world.asteroids, 0.0);
        let removed = resolve_projectile_hits(&mut world, &hits);

        assert_eq!(removed, 1);
        assert_eq!(world.asteroids.len(), 2);
        for child in &world.asteroids {
            assert_ne!(child.id, parent);
            assert_eq!(child.radius, 20.0);
            assert_eq!(child.pos, Vec3::new(300.0, 300.0, 0.0));
            // Parent velocity ± 1 per axis, planar
            assert!((child.vel - Vec3::X).abs().max_element() <= 1.0);
            assert_eq!(child.vel.z, 0.0);
        }
        assert_eq!(world.projectiles[0].life, 0.0);
        assert_eq!(world.particles.len(), 10);
        assert!(world.events.iter().any(|e| matches!(
            e,
            SimEvent::AsteroidSplit { parent: p, .. } if *p == parent
        )));
    }

    #[test]
    fn test_small_asteroid_destroyed_outright() {
        let mut world = flat_world();
        world.push_asteroid(Vec3::new(300.0, 300.0, 0.0), Vec3::ZERO, 15.0);
        add_bolt(&mut world, Vec3::new(305.0, 300.0, 0.0));

        let hits = projectile_hits(&world.projectiles, &world.asteroids, 0.0);
        resolve_projectile_hits(&mut world, &hits);
        assert!(world.asteroids.is_empty());
    }

    #[test]
    fn test_split_chain_terminates() {
        let mut world = flat_world();
        world.push_asteroid(Vec3::new(300.0, 300.0, 0.0), Vec3::ZERO, 100.0);

        // Keep shooting whatever is left until nothing remains
        let mut rounds = 0;
        while !world.asteroids.is_empty() {
            let targets: Vec<Vec3> = world.asteroids.iter().map(|a| a.pos).collect();
            world.projectiles.clear();
            for pos in targets {
                add_bolt(&mut world, pos);
            }
            let hits = projectile_hits(&world.projectiles, &world.asteroids, 0.0);
            resolve_projectile_hits(&mut world, &hits);
            rounds += 1;
            assert!(rounds < 10);
        }
        // 100 → 50 → 25 → 12.5 (no split): four generations
        assert_eq!(rounds, 4);
    }

    #[test]
    fn test_orbital_destruction_replenishes() {
        let mut world = World::with_profile(Profile::Orbital, 3);
        let target = world.asteroids[0].pos;
        add_bolt(&mut world, target);

        let hits = projectile_hits(&world.projectiles, &world.asteroids, 1.0);
        assert!(!hits.is_empty());
        resolve_projectile_hits(&mut world, &hits);
        assert_eq!(world.asteroids.len(), 20);
    }

    #[test]
    fn test_ship_bounce_pushes_away_and_spares_asteroid() {
        let mut world = flat_world();
        world.ship.pos = Vec3::new(100.0, 100.0, 0.0);
        world.ship.vel = Vec3::ZERO;
        world.push_asteroid(Vec3::new(120.0, 100.0, 0.0), Vec3::Y, 20.0);

        let contacts = ship_contacts(&world.ship, &world.asteroids);
        resolve_ship_contacts(&mut world, &contacts);

        assert_eq!(world.ship.vel, Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(world.asteroids.len(), 1);
        assert_eq!(world.asteroids[0].vel, Vec3::Y);
        assert_eq!(world.particles.len(), 5);
        assert!(world.particles.iter().all(|p| p.tag == ParticleTag::Spark));
    }

    #[test]
    fn test_planet_contact_pushes_to_surface_and_damps() {
        let planet = Planet {
            pos: Vec3::ZERO,
            radius: 60.0,
            mass: 5000.0,
        };
        let mut pos = Vec3::new(50.0, 0.0, 0.0);
        let mut vel = Vec3::new(-4.0, 0.0, 0.0);
        planet_contact(&mut pos, &mut vel, &planet, 50.0, 60.0, 0.5);
        assert!((pos.x - 60.0).abs() < 1e-5);
        assert_eq!(vel, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_planet_contact_at_center_stays_finite() {
        let planet = Planet {
            pos: Vec3::ZERO,
            radius: 60.0,
            mass: 5000.0,
        };
        let mut pos = Vec3::ZERO;
        let mut vel = Vec3::new(0.0, 1.0, 0.0);
        planet_contact(&mut pos, &mut vel, &planet, 0.0, 80.0, 0.8);
        assert_eq!(pos, Vec3::new(80.0, 0.0, 0.0));
        assert!(crate::is_finite(vel));
    }

    #[test]
    fn test_settings_burst_counts_apply() {
        let mut settings = Settings::flat();
        settings.debris_burst = 0;
        let mut world = World::new(settings, 1);
        world.push_asteroid(Vec3::new(300.0, 300.0, 0.0), Vec3::ZERO, 10.0);
        add_bolt(&mut world, Vec3::new(300.0, 300.0, 0.0));
        let hits = projectile_hits(&world.projectiles, &world.asteroids, 0.0);
        resolve_projectile_hits(&mut world, &hits);
        assert!(world.particles.is_empty());
    }
}
