//! Fixed-step simulation tick
//!
//! Core loop that advances the world by one frame. The order is fixed:
//! controls → pilot → gravity → integrate → collisions → expiry → spawn.
//! Later phases always see the live set left by earlier ones.

use glam::Vec2;

use super::collision::{projectile_hits, ship_contacts};
use super::gravity::apply_gravity;
use super::integrate::integrate;
use super::resolve::{resolve_projectile_hits, resolve_ship_contacts, scatter};
use super::snapshot::Snapshot;
use super::spawn::maybe_spawn;
use super::state::{ParticleTag, Projectile, SimEvent, Steer, World};
use crate::consts::*;
use crate::settings::Profile;

/// Pilot intent for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    /// Nose up/down (orbital only)
    pub pitch_up: bool,
    pub pitch_down: bool,
    /// Roll (orbital only)
    pub roll_left: bool,
    pub roll_right: bool,
    pub thrust: bool,
    pub fire: bool,
    /// Newly selected thrust level (1-9)
    pub thrust_level: Option<u8>,
    /// Gravity slider position; G becomes `slider / 1000`
    pub gravity_slider: Option<f32>,
    /// Viewport size after a resize
    pub viewport: Option<Vec2>,
    /// Start the session
    pub ignite: bool,
}

impl TickInput {
    /// Attitude change for the held rotation actions
    pub fn steer(&self, rate: f32, profile: Profile) -> Steer {
        let axis = |pos: bool, neg: bool| (pos as i8 - neg as i8) as f32 * rate;
        match profile {
            // Screen y points down, so a growing angle turns clockwise
            Profile::Flat => Steer {
                turn: axis(self.rotate_right, self.rotate_left),
                ..Default::default()
            },
            Profile::Orbital => Steer {
                turn: axis(self.rotate_left, self.rotate_right),
                pitch: axis(self.pitch_up, self.pitch_down),
                roll: axis(self.roll_left, self.roll_right),
            },
        }
    }
}

/// Convert the tuning slider to a gravitational constant
#[inline]
pub fn gravity_from_slider(value: f32) -> f32 {
    value / 1000.0
}

/// Advance the world by one fixed step and publish the result
///
/// While the session is inactive only the controls are applied; no physics
/// runs and the tick counter does not advance.
pub fn tick(world: &mut World, input: &TickInput) -> Snapshot {
    world.events.clear();
    apply_controls(world, input);

    if !world.active {
        return Snapshot::capture(world);
    }

    world.time_ticks += 1;

    pilot(world, input);
    apply_gravity(world);
    integrate(world);

    let hits = projectile_hits(
        &world.projectiles,
        &world.asteroids,
        world.settings.projectile_hit_margin,
    );
    resolve_projectile_hits(world, &hits);

    let contacts = ship_contacts(&world.ship, &world.asteroids);
    resolve_ship_contacts(world, &contacts);

    expire(world);
    maybe_spawn(world);

    // Ensure deterministic ordering
    world.normalize_order();

    Snapshot::capture(world)
}

/// Session and tuning controls; these apply even before ignition
fn apply_controls(world: &mut World, input: &TickInput) {
    if let Some(extent) = input.viewport {
        world.resize(extent.x, extent.y);
    }

    if let Some(slider) = input.gravity_slider {
        let g = gravity_from_slider(slider);
        if g >= 0.0 && g.is_finite() {
            world.gravity = g;
        } else {
            log::warn!("Ignoring gravity slider value {}", slider);
        }
    }

    if let Some(level) = input.thrust_level {
        if !world.ship.set_thrust_level(level) {
            log::warn!("Ignoring thrust level {} (expected 1-9)", level);
        }
    }

    if input.ignite {
        world.ignite();
    }
}

/// Rotation, thrust and weapons
fn pilot(world: &mut World, input: &TickInput) {
    let settings = &world.settings;
    let steer = input.steer(settings.rotation_speed, settings.profile);
    let (accel, divisor) = (settings.thrust_accel, settings.thrust_divisor);

    let ship = &mut world.ship;
    ship.steer(steer);
    ship.thrusting = false;
    ship.fire_cooldown = ship.fire_cooldown.saturating_sub(1);

    if input.thrust {
        ship.thrust(accel, divisor);
        emit_exhaust(world);
    }

    if input.fire && world.ship.fire_cooldown == 0 {
        fire(world);
    }
}

/// Exhaust puffs trailing behind the hull
fn emit_exhaust(world: &mut World) {
    let forward = world.ship.forward();
    let nozzle = world.ship.pos - forward * EXHAUST_OFFSET;
    let planar = world.settings.profile.wraps();
    for _ in 0..world.settings.exhaust_per_tick {
        let vel = scatter(&mut world.rng, world.settings.exhaust_spread, planar)
            - forward * EXHAUST_SPEED;
        world.emit_particle(nozzle, vel, ParticleTag::Exhaust);
    }
}

/// Launch a projectile from the muzzle and start the cooldown
fn fire(world: &mut World) {
    let settings = &world.settings;
    let forward = world.ship.forward();
    let pos = world.ship.pos + forward * settings.muzzle_offset;
    let mut vel = forward * settings.projectile_speed;
    if settings.projectile_inherits_velocity {
        vel += world.ship.vel;
    }
    let radius = settings.projectile_radius;
    world.ship.fire_cooldown = settings.fire_cooldown_ticks;

    let id = world.next_entity_id();
    world.projectiles.push(Projectile {
        id,
        pos,
        vel,
        radius,
        life: FULL_LIFE,
    });
    world.events.push(SimEvent::ProjectileFired { id });
}

/// Count down lives and drop everything that reached zero this tick
pub fn expire(world: &mut World) {
    let decay = world.settings.projectile_decay;
    for projectile in &mut world.projectiles {
        projectile.life -= decay;
    }
    world.projectiles.retain(|p| p.life > 0.0);

    let decay = world.settings.particle_decay;
    for particle in &mut world.particles {
        particle.life -= decay;
    }
    world.particles.retain(|p| p.life > 0.0);
}
