//! World state and entity types
//!
//! Entities are plain data. Everything the presentation layer draws is read
//! from a [`Snapshot`](super::Snapshot), never from these structs directly.

use glam::{EulerRot, Quat, Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::normalize_angle;
use crate::settings::{Profile, Settings, SpawnPolicy};

/// The fixed gravitating body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub pos: Vec3,
    pub radius: f32,
    pub mass: f32,
}

/// Ship attitude; exactly one representation per profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Orientation {
    /// Heading in the screen plane (radians, y axis pointing down-screen)
    Planar { angle: f32 },
    /// Cockpit attitude, applied in yaw → pitch → roll (YXZ) order
    Euler { pitch: f32, yaw: f32, roll: f32 },
}

impl Orientation {
    /// Unit vector the nose points along
    pub fn forward(&self) -> Vec3 {
        match *self {
            Orientation::Planar { angle } => Vec3::new(angle.cos(), angle.sin(), 0.0),
            Orientation::Euler { pitch, yaw, roll } => {
                Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll) * Vec3::NEG_Z
            }
        }
    }
}

/// Per-tick attitude change requested by the pilot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Steer {
    /// Positive turns right in the flat arena, left (positive yaw) in orbit
    pub turn: f32,
    pub pitch: f32,
    pub roll: f32,
}

/// The piloted craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec3,
    pub vel: Vec3,
    pub orientation: Orientation,
    pub size: f32,
    /// Selected thrust level (1-9)
    pub thrust_level: u8,
    /// Thrust was applied this tick (drives the exhaust flame)
    pub thrusting: bool,
    /// Ticks until the next shot is allowed
    pub fire_cooldown: u32,
    /// Always true: collisions bounce the ship instead of destroying it
    pub alive: bool,
}

impl Ship {
    pub fn new(settings: &Settings) -> Self {
        let orientation = match settings.profile {
            Profile::Flat => Orientation::Planar {
                angle: -std::f32::consts::FRAC_PI_2,
            },
            Profile::Orbital => Orientation::Euler {
                pitch: 0.0,
                yaw: 0.0,
                roll: 0.0,
            },
        };
        Self {
            pos: settings.ship_start,
            vel: Vec3::ZERO,
            orientation,
            size: settings.ship_size,
            thrust_level: settings.initial_thrust_level,
            thrusting: false,
            fire_cooldown: 0,
            alive: true,
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation.forward()
    }

    /// Apply an attitude change; the planar heading ignores pitch and roll
    pub fn steer(&mut self, steer: Steer) {
        match &mut self.orientation {
            Orientation::Planar { angle } => {
                *angle = normalize_angle(*angle + steer.turn);
            }
            Orientation::Euler { pitch, yaw, roll } => {
                *pitch += steer.pitch;
                *yaw += steer.turn;
                *roll += steer.roll;
            }
        }
    }

    /// Accelerate along the current heading
    pub fn thrust(&mut self, accel: f32, divisor: f32) {
        let magnitude = accel * (self.thrust_level as f32 / divisor);
        self.vel += self.forward() * magnitude;
        self.thrusting = true;
    }

    /// Select a thrust level; values outside 1-9 are ignored
    pub fn set_thrust_level(&mut self, level: u8) -> bool {
        if (MIN_THRUST_LEVEL..=MAX_THRUST_LEVEL).contains(&level) {
            self.thrust_level = level;
            true
        } else {
            false
        }
    }

    /// Collision radius against asteroids
    #[inline]
    pub fn hull_radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// A drifting rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec3,
    pub vel: Vec3,
    pub radius: f32,
    /// Opaque seed the presentation layer turns into an outline or mesh
    pub shape_seed: u32,
}

/// A laser bolt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec3,
    pub vel: Vec3,
    pub radius: f32,
    /// 1.0 at launch, removed once it reaches 0
    pub life: f32,
}

/// Cosmetic role of a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleTag {
    /// Engine exhaust behind a thrusting ship
    Exhaust,
    /// Rock fragments from a destroyed asteroid
    Debris,
    /// Hull sparks from a ship bounce
    Spark,
}

/// A particle for visual effects (never collides)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    pub life: f32,
    pub tag: ParticleTag,
}

/// Which body touched the planet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Ship,
    Asteroid,
}

/// Things that happened during a tick, for audio/visual cues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Ignited,
    ProjectileFired { id: u32 },
    AsteroidSpawned { id: u32 },
    AsteroidDestroyed { id: u32, pos: Vec3, radius: f32 },
    AsteroidSplit { parent: u32, children: [u32; 2] },
    ShipBounced { asteroid: u32 },
    PlanetContact { kind: BodyKind },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub settings: Settings,
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    /// Ticks simulated while active
    pub time_ticks: u64,
    /// False until the pilot ignites; physics is inert before that
    pub active: bool,
    /// Live gravitational constant
    pub gravity: f32,
    /// Current viewport extent (flat wrap bounds)
    pub viewport: Vec2,
    pub planet: Planet,
    pub ship: Ship,
    /// Live asteroids (sorted by id)
    pub asteroids: Vec<Asteroid>,
    /// Live projectiles (sorted by id)
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    /// Ticks since the last edge spawn attempt
    pub spawn_timer: u32,
    /// Events raised during the current tick
    pub events: Vec<SimEvent>,
    next_id: u32,
}

impl World {
    /// Create a world; settings are assumed validated
    pub fn new(settings: Settings, seed: u64) -> Self {
        let viewport = settings.viewport;
        let planet = Planet {
            pos: match settings.profile {
                Profile::Flat => (viewport / 2.0).extend(0.0),
                Profile::Orbital => Vec3::ZERO,
            },
            radius: settings.planet_radius,
            mass: settings.planet_mass,
        };

        let mut world = Self {
            gravity: settings.gravity,
            ship: Ship::new(&settings),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            active: false,
            viewport,
            planet,
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            spawn_timer: 0,
            events: Vec::new(),
            next_id: 1,
            settings,
        };

        if let SpawnPolicy::Orbit { target, .. } = world.settings.spawn {
            super::spawn::replenish(&mut world, target);
            world.events.clear();
        }

        log::info!(
            "World created: profile={} seed={} asteroids={}",
            world.settings.profile.as_str(),
            seed,
            world.asteroids.len()
        );
        world
    }

    /// Create a world from a built-in profile preset
    pub fn with_profile(profile: Profile, seed: u64) -> Self {
        Self::new(Settings::from_profile(profile), seed)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start the session; returns false if it was already running
    pub fn ignite(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.events.push(SimEvent::Ignited);
        log::info!("Ignition at tick {}", self.time_ticks);
        true
    }

    /// Track a resized viewport; the flat planet stays centered
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            log::warn!("Ignoring degenerate viewport {}x{}", width, height);
            return;
        }
        self.viewport = Vec2::new(width, height);
        if self.settings.profile == Profile::Flat {
            self.planet.pos = (self.viewport / 2.0).extend(0.0);
        }
    }

    /// Add an asteroid with a fresh id
    pub fn push_asteroid(&mut self, pos: Vec3, vel: Vec3, radius: f32) -> u32 {
        let id = self.next_entity_id();
        let shape_seed = self.rng.random();
        self.asteroids.push(Asteroid {
            id,
            pos,
            vel,
            radius,
            shape_seed,
        });
        id
    }

    /// Add a particle unless the cap is reached
    pub fn emit_particle(&mut self, pos: Vec3, vel: Vec3, tag: ParticleTag) {
        if self.particles.len() >= self.settings.max_particles {
            return;
        }
        self.particles.push(Particle {
            pos,
            vel,
            life: FULL_LIFE,
            tag,
        });
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.asteroids.sort_by_key(|a| a.id);
        self.projectiles.sort_by_key(|p| p.id);
    }
}
