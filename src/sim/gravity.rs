//! Inverse-square pull toward the planet
//!
//! Outside the planet every body accelerates by `G * mass / r²` along the unit
//! vector toward the center, scaled by a per-kind coupling. Inside the planet
//! no force is applied; the body is in contact and the resolver bounces it
//! back out instead.

use glam::Vec3;

use super::resolve::planet_contact;
use super::state::{BodyKind, Planet, SimEvent, World};
use crate::is_finite;

/// What the planet does to a body this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pull {
    /// Free flight: add this to the velocity
    Accelerate(Vec3),
    /// The body's center is at or inside the planet surface
    Contact { distance: f32 },
}

/// Acceleration toward a body of the given radius
///
/// Returns zero inside the body, at its exact center, and whenever the
/// result would not be finite.
pub fn acceleration(
    position: Vec3,
    body_position: Vec3,
    body_radius: f32,
    g: f32,
    mass_constant: f32,
    coupling: f32,
) -> Vec3 {
    match pull(position, body_position, body_radius, g * mass_constant * coupling) {
        Pull::Accelerate(a) => a,
        Pull::Contact { .. } => Vec3::ZERO,
    }
}

/// Classify a position against the body and compute the pull
///
/// `strength` is the full `G * mass * coupling` product.
pub fn pull(position: Vec3, body_position: Vec3, body_radius: f32, strength: f32) -> Pull {
    let displacement = body_position - position;
    let dist_sq = displacement.length_squared();
    let dist = dist_sq.sqrt();

    if dist <= body_radius {
        return Pull::Contact { distance: dist };
    }

    let accel = displacement.normalize_or_zero() * (strength / dist_sq);
    if is_finite(accel) {
        Pull::Accelerate(accel)
    } else {
        Pull::Accelerate(Vec3::ZERO)
    }
}

/// Apply the planet to ship, asteroids and projectiles
///
/// Ships and asteroids that reach the surface are bounced out; projectiles
/// inside the planet simply coast without gravity.
pub fn apply_gravity(world: &mut World) {
    let planet = world.planet;
    let settings = &world.settings;
    let g_mass = world.gravity * planet.mass;
    let mut contacts: Vec<BodyKind> = Vec::new();

    let ship = &mut world.ship;
    match pull(ship.pos, planet.pos, planet.radius, g_mass * settings.coupling.ship) {
        Pull::Accelerate(a) => ship.vel += a,
        Pull::Contact { distance } => {
            planet_contact(
                &mut ship.pos,
                &mut ship.vel,
                &planet,
                distance,
                planet.radius,
                settings.ship_restitution,
            );
            contacts.push(BodyKind::Ship);
        }
    }

    for asteroid in &mut world.asteroids {
        let strength = g_mass * settings.coupling.asteroid;
        match pull(asteroid.pos, planet.pos, planet.radius, strength) {
            Pull::Accelerate(a) => asteroid.vel += a,
            Pull::Contact { distance } => {
                planet_contact(
                    &mut asteroid.pos,
                    &mut asteroid.vel,
                    &planet,
                    distance,
                    planet.radius + asteroid.radius,
                    settings.asteroid_restitution,
                );
                contacts.push(BodyKind::Asteroid);
            }
        }
    }

    let strength = g_mass * settings.coupling.projectile;
    for projectile in &mut world.projectiles {
        if let Pull::Accelerate(a) = pull(projectile.pos, planet.pos, planet.radius, strength) {
            projectile.vel += a;
        }
    }

    world
        .events
        .extend(contacts.into_iter().map(|kind| SimEvent::PlanetContact { kind }));
}

/// Distance from the planet surface (negative when inside)
pub fn altitude(position: Vec3, planet: &Planet) -> f32 {
    position.distance(planet.pos) - planet.radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_inverse_square_magnitude() {
        // G=0.2, mass=5000, r=120 → 1000 / 14400
        let a = acceleration(
            Vec3::new(120.0, 0.0, 0.0),
            Vec3::ZERO,
            60.0,
            0.2,
            5000.0,
            1.0,
        );
        assert!((a.length() - 1000.0 / 14400.0).abs() < 1e-6);
        assert!(a.x < 0.0);
        assert_eq!(a.y, 0.0);
    }

    #[test]
    fn test_coupling_scales_pull() {
        let pos = Vec3::new(0.0, 200.0, 0.0);
        let full = acceleration(pos, Vec3::ZERO, 60.0, 0.2, 5000.0, 1.0);
        let laser = acceleration(pos, Vec3::ZERO, 60.0, 0.2, 5000.0, 0.4);
        assert!((laser.length() - full.length() * 0.4).abs() < 1e-7);
    }

    #[test]
    fn test_no_pull_inside_body() {
        let a = acceleration(Vec3::new(30.0, 0.0, 0.0), Vec3::ZERO, 60.0, 0.2, 5000.0, 1.0);
        assert_eq!(a, Vec3::ZERO);
        assert_eq!(
            pull(Vec3::new(60.0, 0.0, 0.0), Vec3::ZERO, 60.0, 1000.0),
            Pull::Contact { distance: 60.0 }
        );
    }

    #[test]
    fn test_zero_radius_center_is_contact() {
        assert_eq!(
            pull(Vec3::ZERO, Vec3::ZERO, 0.0, 1000.0),
            Pull::Contact { distance: 0.0 }
        );
        assert_eq!(acceleration(Vec3::ZERO, Vec3::ZERO, 0.0, 0.2, 5000.0, 1.0), Vec3::ZERO);
    }

    #[test]
    fn test_center_singularity_is_guarded() {
        // A negative radius never reports contact, so these reach the inverse-square path
        assert_eq!(
            pull(Vec3::ZERO, Vec3::ZERO, -1.0, 1000.0),
            Pull::Accelerate(Vec3::ZERO)
        );

        // Subnormal squared distance: the quotient overflows to infinity
        let near = Vec3::new(1e-20, 0.0, 0.0);
        assert_eq!(pull(near, Vec3::ZERO, -1.0, 1000.0), Pull::Accelerate(Vec3::ZERO));
    }

    #[test]
    fn test_altitude() {
        let planet = Planet {
            pos: Vec3::new(100.0, 100.0, 0.0),
            radius: 60.0,
            mass: 5000.0,
        };
        assert_eq!(altitude(Vec3::new(100.0, 200.0, 0.0), &planet), 40.0);
    }

    proptest! {
        #[test]
        fn prop_pull_points_at_body(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            z in -500.0f32..500.0,
        ) {
            let pos = Vec3::new(x, y, z);
            let a = acceleration(pos, Vec3::ZERO, 60.0, 0.2, 5000.0, 1.0);
            prop_assert!(is_finite(a));
            if pos.length() > 60.0 {
                prop_assert!(a.dot(-pos) > 0.0);
            } else {
                prop_assert_eq!(a, Vec3::ZERO);
            }
        }
    }
}
