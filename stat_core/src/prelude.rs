//! Prelude module for convenient imports
//!
//! ```rust
//! use stat_core::prelude::*;
//! ```

pub use crate::bounded::BoundedStat;
pub use crate::entity::{Entity, EntityId};
pub use crate::{StatError, HEALTH};

// Re-exports from gear_core
pub use gear_core::{DiceRoller, Equipment, EquipmentSlot, Inventory, Rarity};
