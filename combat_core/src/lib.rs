//! combat_core - Turn-based attack resolution
//!
//! An attack rolls one die against an [`OutcomeTable`], rolls the attacker's
//! weapons against the defender's armor, reduces the health of whoever got
//! hit, narrates the result and, if health reached its floor, chains a
//! [`DeathAction`]. Everything the core needs from the game goes through
//! [`CombatContext`].
//!
//! # Quick Start
//!
//! ```rust
//! use combat_core::prelude::*;
//!
//! let mut arena = Arena::new();
//! let sword = Equipment::new("sword", "Sword").with_damage("1d8".parse().unwrap());
//! let mut orc = Entity::new(EntityId(1), "Orc").with_health(12).unwrap();
//! orc.inventory_mut().equip(EquipmentSlot::MainHand, sword);
//! arena.spawn(orc);
//! arena.spawn(Entity::new(EntityId(2), "Elf").with_health(10).unwrap());
//!
//! let attack = AttackAction::with_roll(EntityId(2), 20).unwrap();
//! let resolution = attack.perform(&mut arena, Some(EntityId(1))).unwrap();
//! assert_eq!(resolution.attack().unwrap().outcome, Outcome::CriticalHit);
//! assert_eq!(arena.messages().len(), 1 + resolution.deaths().count());
//! ```

pub mod action;
pub mod config;
pub mod context;
pub mod damage;
pub mod hooks;
pub mod message;
pub mod outcome;
pub mod prelude;

pub use action::{
    Action, ActionReport, AttackAction, AttackReport, DeathAction, GameAction, Resolution,
};
pub use context::{Arena, CombatContext};
pub use damage::{calculate_damage, DamageRoll};
pub use hooks::{ObserverId, Observers};
pub use message::{EntityRef, Fragment, Message};
pub use outcome::{Outcome, OutcomeTable, Tier};

use stat_core::StatError;
use thiserror::Error;

/// Error resolving an action
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error(transparent)]
    Stat(#[from] StatError),
    #[error("Roll {roll} is outside the attack die (1..={faces})")]
    RollOutOfRange { roll: u32, faces: u32 },
    #[error("Action chain exceeded depth {0}")]
    ChainTooDeep(usize),
}
