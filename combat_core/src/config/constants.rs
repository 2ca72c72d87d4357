//! Combat constants configuration

use super::ConfigError;
use crate::outcome::OutcomeTable;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Global combat constants instance
static COMBAT_CONSTANTS: OnceLock<CombatConstants> = OnceLock::new();

/// Initialize the global combat constants from a TOML file
///
/// Call once at startup, before the first attack is built.
/// Returns error if already initialized or if loading fails.
pub fn init_constants(path: &Path) -> Result<(), ConfigError> {
    let constants = CombatConstants::load_from_path(path)?;
    COMBAT_CONSTANTS
        .set(constants)
        .map_err(|_| already_initialized())
}

/// Initialize the global combat constants with default values
pub fn init_constants_default() -> Result<(), ConfigError> {
    COMBAT_CONSTANTS
        .set(CombatConstants::default())
        .map_err(|_| already_initialized())
}

fn already_initialized() -> ConfigError {
    ConfigError::ValidationError("CombatConstants already initialized".to_string())
}

/// Get a reference to the global combat constants
///
/// Falls back to (and locks in) the defaults if nothing was initialized.
pub fn constants() -> &'static CombatConstants {
    COMBAT_CONSTANTS.get_or_init(CombatConstants::default)
}

/// Check if constants have been initialized
pub fn constants_initialized() -> bool {
    COMBAT_CONSTANTS.get().is_some()
}

/// Ensure constants are initialized with defaults (idempotent, useful for tests)
pub fn ensure_constants_initialized() {
    COMBAT_CONSTANTS.get_or_init(CombatConstants::default);
}

/// Tunable combat constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Name of the stat attacks subtract damage from
    #[serde(default = "default_health_stat")]
    pub health_stat: String,
    /// How many chained follow-up actions one top-level action may trigger
    #[serde(default = "default_max_chain_depth")]
    pub max_chain_depth: usize,
    /// Attack roll to outcome mapping
    #[serde(default)]
    pub outcomes: OutcomeTable,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            health_stat: default_health_stat(),
            max_chain_depth: default_max_chain_depth(),
            outcomes: OutcomeTable::default(),
        }
    }
}

impl CombatConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        super::load_toml(path)
    }
}

fn default_health_stat() -> String {
    stat_core::HEALTH.to_string()
}

fn default_max_chain_depth() -> usize {
    8
}
