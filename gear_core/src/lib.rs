//! gear_core - Dice pools, equipment and inventories
//!
//! This library provides:
//! - DiceRoller: Configurable dice pools with tabletop notation (`"1d8+2d4"`)
//! - Equipment: Armor and damage dice for one piece of gear
//! - Inventory: Per-slot equipment owned by a single entity
//! - GearCatalog: Equipment templates loaded from TOML/JSON files

mod catalog;
pub mod dice;
mod equipment;
mod inventory;
pub mod types;

pub use catalog::GearCatalog;
pub use dice::{Dice, DiceRoller};
pub use equipment::Equipment;
pub use inventory::Inventory;
pub use types::{EquipmentSlot, Rarity};

use std::path::PathBuf;
use thiserror::Error;

/// Invalid dice pool configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiceError {
    #[error("Dice must have at least one face")]
    ZeroFaces,
    #[error("Invalid dice notation: '{0}'")]
    InvalidNotation(String),
    #[error("Too many dice in one group: {count} (max {max})")]
    TooManyDice { count: u32, max: u32 },
}

/// Error loading gear configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("JSON parse error in '{path}': {error}")]
    Json {
        error: serde_json::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path}': {message}")]
    Validation { message: String, path: PathBuf },
}
