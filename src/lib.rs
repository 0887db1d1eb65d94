//! Orbit Strike - gravity well arcade simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, integration, collisions, spawning)
//! - `settings`: Data-driven physics tuning and the flat/orbital profiles
//! - `error`: Configuration errors
//!
//! Rendering, input polling and UI live outside this crate. A host feeds a
//! [`sim::TickInput`] into [`sim::tick`] once per displayed frame and draws the
//! returned [`sim::Snapshot`].

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use settings::{Profile, Settings};

use glam::{Vec2, Vec3};

/// Simulation constants shared by both profiles
pub mod consts {
    /// Nominal host frame rate; one tick is one frame
    pub const TICK_RATE: u32 = 60;

    /// Convert a millisecond duration to whole ticks at the nominal rate
    pub const fn ms_to_ticks(ms: u32) -> u32 {
        ms / 1000 * TICK_RATE + ms % 1000 * TICK_RATE / 1000
    }

    /// Initial life of projectiles and particles (counts down to 0)
    pub const FULL_LIFE: f32 = 1.0;

    /// Highest selectable thrust level
    pub const MAX_THRUST_LEVEL: u8 = 9;
    pub const MIN_THRUST_LEVEL: u8 = 1;

    /// Exhaust particles leave the hull this far behind the ship center
    pub const EXHAUST_OFFSET: f32 = 10.0;
    /// Exhaust speed along the reverse heading
    pub const EXHAUST_SPEED: f32 = 2.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Unit vector from `from` toward `to`, or zero when the points coincide
#[inline]
pub fn direction_or_zero(from: Vec3, to: Vec3) -> Vec3 {
    (to - from).normalize_or_zero()
}

/// Lift a planar point into the simulation's 3D space (z = 0)
#[inline]
pub fn planar(v: Vec2) -> Vec3 {
    v.extend(0.0)
}

/// True when every component is a finite real number
#[inline]
pub fn is_finite(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle_wraps_both_ways() {
        use std::f32::consts::PI;
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 0.001);
        assert!((normalize_angle(-1.5 * PI) - 0.5 * PI).abs() < 0.001);
        assert_eq!(normalize_angle(0.25), 0.25);
    }

    #[test]
    fn test_direction_or_zero_guards_coincident_points() {
        let p = Vec3::new(3.0, 4.0, 0.0);
        assert_eq!(direction_or_zero(p, p), Vec3::ZERO);

        let d = direction_or_zero(Vec3::ZERO, p);
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert!((d.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_ms_to_ticks() {
        assert_eq!(consts::ms_to_ticks(200), 12);
        assert_eq!(consts::ms_to_ticks(250), 15);
        assert_eq!(consts::ms_to_ticks(2000), 120);
        assert_eq!(consts::ms_to_ticks(1999), 119);
        assert_eq!(consts::ms_to_ticks(u32::MAX), 257_698_037);
    }
}
