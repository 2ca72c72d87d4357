//! stat_core - Bounded stats and combat entities
//!
//! This library provides:
//! - BoundedStat: A numeric resource clamped to `[min, max]` on every mutation
//! - Entity: A named actor owning its stats and an inventory
//! - StatError: Lookup and configuration failures
//!
//! # Quick Start
//!
//! ```rust
//! use stat_core::prelude::*;
//!
//! let mut goblin = Entity::new(EntityId(1), "Goblin").with_health(10).unwrap();
//! goblin.health_mut().unwrap().decrease(25);
//! assert!(goblin.health().unwrap().is_at_floor());
//! ```

pub mod bounded;
pub mod entity;
pub mod prelude;

pub use bounded::BoundedStat;
pub use entity::{Entity, EntityId};

// Re-export commonly needed gear_core types
pub use gear_core::{Equipment, EquipmentSlot, Inventory};

use thiserror::Error;

/// Name of the health stat every combatant is expected to carry
pub const HEALTH: &str = "Health";

/// Error looking up or configuring a stat
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatError {
    #[error("Unknown stat: {0}")]
    UnknownStat(String),
    #[error("Invalid stat bounds: min {min} exceeds max {max}")]
    InvalidBounds { min: i32, max: i32 },
}
