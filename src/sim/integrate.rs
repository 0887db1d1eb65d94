//! Position integration and boundary policy
//!
//! One unit step per tick: velocity has already been updated by input and
//! gravity, then `position += velocity` (semi-implicit Euler). The step is
//! frame-coupled; there is no delta time. Nothing here draws random numbers.

use glam::{Vec2, Vec3};

use super::state::World;

/// What happens when a body leaves the visible area
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    /// Torus topology on x/y over `[-margin, extent + margin]`
    Wrap { extent: Vec2, margin: f32 },
    /// Free drift
    Unbounded,
}

/// Advance one unit step
#[inline]
pub fn advance(pos: &mut Vec3, vel: Vec3) {
    *pos += vel;
}

/// Wrap a single coordinate onto the opposite edge
#[inline]
pub fn wrap_coordinate(value: f32, extent: f32, margin: f32) -> f32 {
    if value < -margin {
        extent + margin
    } else if value > extent + margin {
        -margin
    } else {
        value
    }
}

/// Apply a boundary policy to a position
pub fn apply_boundary(pos: &mut Vec3, boundary: Boundary) {
    if let Boundary::Wrap { extent, margin } = boundary {
        pos.x = wrap_coordinate(pos.x, extent.x, margin);
        pos.y = wrap_coordinate(pos.y, extent.y, margin);
    }
}

/// Boundaries for (ship and projectiles, asteroids), read from the live viewport
pub fn boundaries(world: &World) -> (Boundary, Boundary) {
    if world.settings.profile.wraps() {
        let extent = world.viewport;
        (
            Boundary::Wrap {
                extent,
                margin: 0.0,
            },
            Boundary::Wrap {
                extent,
                margin: world.settings.asteroid_wrap_margin,
            },
        )
    } else {
        (Boundary::Unbounded, Boundary::Unbounded)
    }
}

/// Move every entity by its velocity and apply the boundary policy
///
/// Particles drift freely and never wrap.
pub fn integrate(world: &mut World) {
    let (craft, rocks) = boundaries(world);

    advance(&mut world.ship.pos, world.ship.vel);
    apply_boundary(&mut world.ship.pos, craft);

    for projectile in &mut world.projectiles {
        advance(&mut projectile.pos, projectile.vel);
        apply_boundary(&mut projectile.pos, craft);
    }

    for asteroid in &mut world.asteroids {
        advance(&mut asteroid.pos, asteroid.vel);
        apply_boundary(&mut asteroid.pos, rocks);
    }

    for particle in &mut world.particles {
        advance(&mut particle.pos, particle.vel);
    }
}
