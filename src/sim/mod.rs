//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod gravity;
pub mod integrate;
pub mod resolve;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{ProjectileHit, ShipContact, projectile_hits, ship_contacts};
pub use gravity::{Pull, acceleration, apply_gravity};
pub use integrate::{Boundary, integrate};
pub use snapshot::{Hud, Snapshot};
pub use spawn::maybe_spawn;
pub use state::{
    Asteroid, BodyKind, Orientation, Particle, ParticleTag, Planet, Projectile, Ship, SimEvent,
    World,
};
pub use tick::{TickInput, gravity_from_slider, tick};
