//! Collision detection between projectiles, asteroids and the ship
//!
//! Detection is a pure pass over the live collections; nothing is removed
//! here. All comparisons are strict: centers exactly a radius-sum apart do
//! not collide.

use glam::Vec3;

use super::state::{Asteroid, Projectile, Ship};
use crate::direction_or_zero;

/// A projectile that struck an asteroid this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileHit {
    /// Index into the projectile list
    pub projectile: usize,
    /// Index into the asteroid list
    pub asteroid: usize,
}

/// An asteroid overlapping the ship this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipContact {
    /// Index into the asteroid list
    pub asteroid: usize,
    /// Unit vector from the ship toward the asteroid (zero on exact overlap)
    pub normal: Vec3,
}

/// True when two centers are strictly closer than `threshold`
#[inline]
pub fn within(a: Vec3, b: Vec3, threshold: f32) -> bool {
    a.distance(b) < threshold
}

/// Find projectile/asteroid hits
///
/// Projectiles are visited in list order (ascending id) and each stops at the
/// first asteroid it touches, also in ascending id order. An asteroid already
/// claimed by an earlier projectile this tick cannot be hit again, so the
/// later projectile survives and keeps flying.
pub fn projectile_hits(
    projectiles: &[Projectile],
    asteroids: &[Asteroid],
    margin: f32,
) -> Vec<ProjectileHit> {
    let mut claimed = vec![false; asteroids.len()];
    let mut hits = Vec::new();

    for (pi, projectile) in projectiles.iter().enumerate() {
        if projectile.life <= 0.0 {
            continue;
        }
        let target = asteroids.iter().enumerate().find(|(ai, asteroid)| {
            !claimed[*ai] && within(projectile.pos, asteroid.pos, asteroid.radius + margin)
        });
        if let Some((ai, _)) = target {
            claimed[ai] = true;
            hits.push(ProjectileHit {
                projectile: pi,
                asteroid: ai,
            });
        }
    }

    hits
}

/// Find every asteroid overlapping the ship hull
pub fn ship_contacts(ship: &Ship, asteroids: &[Asteroid]) -> Vec<ShipContact> {
    let hull = ship.hull_radius();
    asteroids
        .iter()
        .enumerate()
        .filter(|(_, asteroid)| within(ship.pos, asteroid.pos, asteroid.radius + hull))
        .map(|(ai, asteroid)| ShipContact {
            asteroid: ai,
            normal: direction_or_zero(ship.pos, asteroid.pos),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use proptest::prelude::*;

    fn rock(id: u32, x: f32, radius: f32) -> Asteroid {
        Asteroid {
            id,
            pos: Vec3::new(x, 0.0, 0.0),
            vel: Vec3::ZERO,
            radius,
            shape_seed: 0,
        }
    }

    fn bolt(id: u32, x: f32) -> Projectile {
        Projectile {
            id,
            pos: Vec3::new(x, 0.0, 0.0),
            vel: Vec3::ZERO,
            radius: 2.0,
            life: 1.0,
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let asteroids = [rock(1, 0.0, 20.0)];
        assert!(projectile_hits(&[bolt(2, 20.0)], &asteroids, 0.0).is_empty());
        assert_eq!(projectile_hits(&[bolt(2, 19.999)], &asteroids, 0.0).len(), 1);
    }

    #[test]
    fn test_margin_extends_reach() {
        let asteroids = [rock(1, 0.0, 5.0)];
        assert!(projectile_hits(&[bolt(2, 5.5)], &asteroids, 0.0).is_empty());
        assert_eq!(projectile_hits(&[bolt(2, 5.5)], &asteroids, 1.0).len(), 1);
    }

    #[test]
    fn test_projectile_at_center_is_hit() {
        let asteroids = [rock(1, 10.0, 20.0)];
        let hits = projectile_hits(&[bolt(2, 10.0)], &asteroids, 0.0);
        assert_eq!(
            hits,
            vec![ProjectileHit {
                projectile: 0,
                asteroid: 0
            }]
        );
    }

    #[test]
    fn test_first_asteroid_in_order_wins() {
        // Overlapping rocks: the projectile sits inside both
        let asteroids = [rock(1, 0.0, 30.0), rock(2, 10.0, 30.0)];
        let hits = projectile_hits(&[bolt(3, 5.0)], &asteroids, 0.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].asteroid, 0);
    }

    #[test]
    fn test_claimed_asteroid_not_hit_twice() {
        let asteroids = [rock(1, 0.0, 30.0)];
        let projectiles = [bolt(2, 1.0), bolt(3, -1.0)];
        let hits = projectile_hits(&projectiles, &asteroids, 0.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].projectile, 0);
    }

    #[test]
    fn test_second_projectile_takes_next_rock() {
        let asteroids = [rock(1, 0.0, 30.0), rock(2, 10.0, 30.0)];
        let projectiles = [bolt(3, 5.0), bolt(4, 5.0)];
        let hits = projectile_hits(&projectiles, &asteroids, 0.0);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].asteroid, 1);
    }

    #[test]
    fn test_spent_projectile_ignored() {
        let asteroids = [rock(1, 0.0, 30.0)];
        let mut spent = bolt(2, 0.0);
        spent.life = 0.0;
        assert!(projectile_hits(&[spent], &asteroids, 0.0).is_empty());
    }

    #[test]
    fn test_ship_contact_uses_half_size() {
        let mut ship = Ship::new(&Settings::flat());
        ship.pos = Vec3::ZERO;
        // radius 20 + 15/2 = 27.5
        assert!(ship_contacts(&ship, &[rock(1, 27.5, 20.0)]).is_empty());
        let contacts = ship_contacts(&ship, &[rock(1, 27.0, 20.0)]);
        assert_eq!(contacts.len(), 1);
        assert!((contacts[0].normal - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_ship_contact_exact_overlap_has_zero_normal() {
        let mut ship = Ship::new(&Settings::flat());
        ship.pos = Vec3::ZERO;
        let contacts = ship_contacts(&ship, &[rock(1, 0.0, 20.0)]);
        assert_eq!(contacts[0].normal, Vec3::ZERO);
    }

    proptest! {
        #[test]
        fn prop_within_matches_strict_distance(
            d in 0.0f32..100.0,
            r in 0.1f32..100.0,
        ) {
            let hit = within(Vec3::ZERO, Vec3::new(d, 0.0, 0.0), r);
            prop_assert_eq!(hit, d < r);
        }
    }
}
