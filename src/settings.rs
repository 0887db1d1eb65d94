//! Physics tuning and world profiles
//!
//! Two complete policy sets exist for what is conceptually the same game:
//! the flat screen-wrapping arena and the unbounded orbital field. A world is
//! built from exactly one of them; the two are never mixed. Any field can be
//! overridden from JSON on top of the chosen preset.

use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::SettingsError;
use crate::consts::{MAX_THRUST_LEVEL, MIN_THRUST_LEVEL, ms_to_ticks};

/// Boundary and spawn policy set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Planar arena: wrap-around edges, timed edge spawns, asteroid splitting
    #[default]
    Flat,
    /// Unbounded 3D space: orbit spawns, replenished on destruction
    Orbital,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Flat => "flat",
            Profile::Orbital => "orbital",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "flat" | "2d" => Some(Profile::Flat),
            "orbital" | "orbit" | "3d" => Some(Profile::Orbital),
            _ => None,
        }
    }

    /// Whether positions wrap at the viewport edges
    pub fn wraps(&self) -> bool {
        matches!(self, Profile::Flat)
    }
}

/// Per-kind multiplier on the planet's pull
///
/// Lasers feel a weaker pull than rocks in the flat arena and none at all in
/// the orbital field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravityCoupling {
    pub ship: f32,
    pub asteroid: f32,
    pub projectile: f32,
}

/// How the asteroid population is maintained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Periodic spawns just outside a random viewport edge, aimed at the center
    Edge {
        /// Ticks between spawn attempts
        interval_ticks: u32,
        /// No spawn while this many asteroids are live
        cap: usize,
        /// Distance outside the edge where new rocks appear
        edge_offset: f32,
        /// Launch speed range
        speed: (f32, f32),
        /// Radius range
        radius: (f32, f32),
        /// Full span of the random heading offset (radians)
        aim_jitter: f32,
    },
    /// Rocks seeded on near-circular orbits; the field is kept at `target`
    Orbit {
        target: usize,
        radius: (f32, f32),
        /// Orbital distance band from the planet center
        distance: (f32, f32),
        /// Full span of the out-of-plane position offset
        height_jitter: f32,
        /// Full span of the out-of-plane velocity offset
        vertical_speed_jitter: f32,
    },
}

/// Physics settings for one world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub profile: Profile,

    // === World ===
    /// Initial viewport extent (flat profile wrap bounds)
    pub viewport: Vec2,
    pub planet_radius: f32,
    pub planet_mass: f32,
    /// Gravitational constant G (live-tunable in the flat profile)
    pub gravity: f32,
    pub coupling: GravityCoupling,
    /// Velocity is multiplied by `-restitution` on planet contact
    pub ship_restitution: f32,
    pub asteroid_restitution: f32,

    // === Ship ===
    pub ship_start: Vec3,
    pub ship_size: f32,
    /// Radians per tick while a rotate/pitch/roll action is held
    pub rotation_speed: f32,
    /// Acceleration per tick is `thrust_accel * level / thrust_divisor`
    pub thrust_accel: f32,
    pub thrust_divisor: f32,
    pub initial_thrust_level: u8,
    /// Projectiles leave the ship this far along its heading
    pub muzzle_offset: f32,
    /// Velocity change applied to the ship when it touches an asteroid
    pub bounce_strength: f32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    /// Life lost per tick
    pub projectile_decay: f32,
    /// Add the ship's velocity to the muzzle velocity
    pub projectile_inherits_velocity: bool,
    /// Extra reach added to the asteroid radius for hit tests
    pub projectile_hit_margin: f32,
    pub fire_cooldown_ticks: u32,

    // === Asteroids ===
    /// Rocks larger than this split in two when shot
    pub split_threshold: f32,
    /// Full span of the per-axis velocity offset given to each child
    pub split_jitter: f32,
    /// Asteroids wrap this far outside the viewport
    pub asteroid_wrap_margin: f32,
    pub spawn: SpawnPolicy,

    // === Particles ===
    pub particle_decay: f32,
    pub max_particles: usize,
    pub exhaust_per_tick: usize,
    pub exhaust_spread: f32,
    pub debris_burst: usize,
    pub debris_spread: f32,
    pub spark_burst: usize,
    pub spark_spread: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self::flat()
    }
}

impl Settings {
    /// Preset for the given profile
    pub fn from_profile(profile: Profile) -> Self {
        match profile {
            Profile::Flat => Self::flat(),
            Profile::Orbital => Self::orbital(),
        }
    }

    /// Close-orbit screen arena
    pub fn flat() -> Self {
        Self {
            profile: Profile::Flat,

            viewport: Vec2::new(1280.0, 720.0),
            planet_radius: 60.0,
            planet_mass: 5000.0,
            gravity: 0.2,
            coupling: GravityCoupling {
                ship: 1.0,
                asteroid: 1.0,
                projectile: 0.4,
            },
            ship_restitution: 0.5,
            asteroid_restitution: 0.8,

            ship_start: Vec3::new(150.0, 150.0, 0.0),
            ship_size: 15.0,
            rotation_speed: 0.05,
            thrust_accel: 0.05,
            thrust_divisor: 2.0,
            initial_thrust_level: 1,
            muzzle_offset: 15.0,
            bounce_strength: 2.0,

            projectile_speed: 7.0,
            projectile_radius: 2.0,
            projectile_decay: 0.01,
            projectile_inherits_velocity: false,
            projectile_hit_margin: 0.0,
            fire_cooldown_ticks: ms_to_ticks(200),

            split_threshold: 15.0,
            split_jitter: 2.0,
            asteroid_wrap_margin: 50.0,
            spawn: SpawnPolicy::Edge {
                interval_ticks: ms_to_ticks(2000),
                cap: 8,
                edge_offset: 40.0,
                speed: (1.0, 3.0),
                radius: (20.0, 50.0),
                aim_jitter: 1.0,
            },

            particle_decay: 0.02,
            max_particles: 512,
            exhaust_per_tick: 3,
            exhaust_spread: 2.0,
            debris_burst: 10,
            debris_spread: 5.0,
            spark_burst: 5,
            spark_spread: 5.0,
        }
    }

    /// Unbounded cockpit view around the planet at the origin
    pub fn orbital() -> Self {
        Self {
            profile: Profile::Orbital,

            planet_radius: 50.0,
            gravity: 0.1,
            coupling: GravityCoupling {
                ship: 0.05,
                asteroid: 0.05,
                projectile: 0.0,
            },
            ship_restitution: 0.2,

            ship_start: Vec3::new(0.0, 0.0, 150.0),
            ship_size: 2.0,
            rotation_speed: 0.02,
            thrust_accel: 0.025,
            thrust_divisor: 5.0,
            muzzle_offset: 0.0,

            projectile_speed: 5.0,
            projectile_radius: 0.1,
            projectile_decay: 1.0 / ms_to_ticks(2000) as f32,
            projectile_inherits_velocity: true,
            projectile_hit_margin: 1.0,
            fire_cooldown_ticks: ms_to_ticks(250),

            spawn: SpawnPolicy::Orbit {
                target: 20,
                radius: (2.0, 7.0),
                distance: (100.0, 200.0),
                height_jitter: 50.0,
                vertical_speed_jitter: 0.5,
            },

            exhaust_per_tick: 0,
            ..Self::flat()
        }
    }

    /// Parse JSON overrides on top of the preset named by its `profile` field
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let profile = match overrides.get("profile") {
            Some(p) => serde_json::from_value(p.clone())?,
            None => Profile::default(),
        };

        let mut merged = serde_json::to_value(Self::from_profile(profile))?;
        if let (Some(base), Some(over)) = (merged.as_object_mut(), overrides.as_object()) {
            for (key, value) in over {
                base.insert(key.clone(), value.clone());
            }
        }

        let settings: Settings = serde_json::from_value(merged)?;
        settings.validated()
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded {} settings from {}",
            settings.profile.as_str(),
            path.display()
        );
        Ok(settings)
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("planet_radius", self.planet_radius)?;
        positive("planet_mass", self.planet_mass)?;
        positive("ship_size", self.ship_size)?;
        positive("projectile_radius", self.projectile_radius)?;
        positive("projectile_decay", self.projectile_decay)?;
        positive("particle_decay", self.particle_decay)?;
        positive("thrust_divisor", self.thrust_divisor)?;
        // Halving always reaches a positive floor, so split chains terminate
        positive("split_threshold", self.split_threshold)?;

        non_negative("gravity", self.gravity)?;
        non_negative("coupling.ship", self.coupling.ship)?;
        non_negative("coupling.asteroid", self.coupling.asteroid)?;
        non_negative("coupling.projectile", self.coupling.projectile)?;
        non_negative("projectile_hit_margin", self.projectile_hit_margin)?;
        non_negative("asteroid_wrap_margin", self.asteroid_wrap_margin)?;

        restitution("ship_restitution", self.ship_restitution)?;
        restitution("asteroid_restitution", self.asteroid_restitution)?;

        if !(MIN_THRUST_LEVEL..=MAX_THRUST_LEVEL).contains(&self.initial_thrust_level) {
            return Err(SettingsError::OutOfRange {
                name: "initial_thrust_level",
                value: self.initial_thrust_level as f32,
                allowed: "1..=9",
            });
        }

        if self.profile.wraps() {
            positive("viewport.x", self.viewport.x)?;
            positive("viewport.y", self.viewport.y)?;
        }

        match &self.spawn {
            SpawnPolicy::Edge {
                speed,
                radius,
                interval_ticks,
                edge_offset,
                aim_jitter,
                ..
            } => {
                positive("spawn.interval_ticks", *interval_ticks as f32)?;
                non_negative("spawn.edge_offset", *edge_offset)?;
                non_negative("spawn.aim_jitter", *aim_jitter)?;
                range("spawn.speed", *speed)?;
                positive("spawn.radius", radius.0)?;
                range("spawn.radius", *radius)?;
            }
            SpawnPolicy::Orbit {
                radius,
                distance,
                height_jitter,
                vertical_speed_jitter,
                ..
            } => {
                non_negative("spawn.height_jitter", *height_jitter)?;
                non_negative("spawn.vertical_speed_jitter", *vertical_speed_jitter)?;
                positive("spawn.radius", radius.0)?;
                range("spawn.radius", *radius)?;
                positive("spawn.distance", distance.0)?;
                range("spawn.distance", *distance)?;
            }
        }

        Ok(())
    }

    /// Validate and return self
    pub fn validated(self) -> Result<Self, SettingsError> {
        self.validate()?;
        Ok(self)
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), SettingsError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::NonPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), SettingsError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            name,
            value,
            allowed: "[0, inf)",
        })
    }
}

fn restitution(name: &'static str, value: f32) -> Result<(), SettingsError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            name,
            value,
            allowed: "(0, 1)",
        })
    }
}

/// Bounds of a sampled range: finite, ordered, with a finite width
fn range(name: &'static str, (min, max): (f32, f32)) -> Result<(), SettingsError> {
    for value in [min, max, max - min] {
        if !value.is_finite() {
            return Err(SettingsError::OutOfRange {
                name,
                value,
                allowed: "finite",
            });
        }
    }
    if min <= max {
        Ok(())
    } else {
        Err(SettingsError::InvertedRange { name, min, max })
    }
}
