//! Outcome tiers - Maps an attack roll onto a result
//!
//! The default table, for a d20:
//!
//! | Roll    | Outcome      | Multiplier        |
//! |---------|--------------|-------------------|
//! | 1       | CriticalMiss | 1 (against self)  |
//! | 2-4     | Miss         | 0                 |
//! | 5-16    | Hit          | 1                 |
//! | 17-19   | HeavyHit     | 2                 |
//! | 20      | CriticalHit  | 3                 |
//!
//! A table is only ever built through validation, which guarantees every
//! face of the die lands in exactly one tier.

use crate::config::ConfigError;
use gear_core::DiceRoller;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

const D20: NonZeroU32 = match NonZeroU32::new(20) {
    Some(faces) => faces,
    None => panic!("20 is non-zero"),
};

/// Result category of an attack roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The attacker hits itself
    CriticalMiss,
    Miss,
    Hit,
    /// "Double" hit
    HeavyHit,
    CriticalHit,
}

impl Outcome {
    pub fn all() -> &'static [Outcome] {
        &[
            Outcome::CriticalMiss,
            Outcome::Miss,
            Outcome::Hit,
            Outcome::HeavyHit,
            Outcome::CriticalHit,
        ]
    }

    /// Damage multiplier used when a table entry doesn't set one
    pub fn default_multiplier(&self) -> u32 {
        match self {
            Outcome::CriticalMiss => 1,
            Outcome::Miss => 0,
            Outcome::Hit => 1,
            Outcome::HeavyHit => 2,
            Outcome::CriticalHit => 3,
        }
    }

    /// Whether the outcome damages the target (as opposed to nobody or the attacker)
    pub fn hits_target(&self) -> bool {
        matches!(
            self,
            Outcome::Hit | Outcome::HeavyHit | Outcome::CriticalHit
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::CriticalMiss => write!(f, "Critical Miss"),
            Outcome::Miss => write!(f, "Miss"),
            Outcome::Hit => write!(f, "Hit"),
            Outcome::HeavyHit => write!(f, "Heavy Hit"),
            Outcome::CriticalHit => write!(f, "Critical Hit"),
        }
    }
}

/// One contiguous roll range of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub outcome: Outcome,
    /// Lowest roll (inclusive)
    pub min: u32,
    /// Highest roll (inclusive)
    pub max: u32,
    pub multiplier: u32,
}

impl Tier {
    pub fn contains(&self, roll: u32) -> bool {
        (self.min..=self.max).contains(&roll)
    }
}

/// TOML/serde layout of an outcome table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeTableConfig {
    #[serde(default = "default_faces")]
    pub faces: u32,
    #[serde(default)]
    pub tiers: Vec<TierConfig>,
}

/// TOML/serde layout of one tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierConfig {
    pub outcome: Outcome,
    pub min: u32,
    pub max: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<u32>,
}

fn default_faces() -> u32 {
    20
}

/// Validated mapping from every face of the attack die to a tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OutcomeTableConfig", into = "OutcomeTableConfig")]
pub struct OutcomeTable {
    faces: NonZeroU32,
    /// Sorted by `min`, contiguous from 1 to `faces`
    tiers: Vec<Tier>,
}

impl Default for OutcomeTable {
    fn default() -> Self {
        let tier = |outcome: Outcome, min, max| Tier {
            outcome,
            min,
            max,
            multiplier: outcome.default_multiplier(),
        };
        OutcomeTable {
            faces: D20,
            tiers: vec![
                tier(Outcome::CriticalMiss, 1, 1),
                tier(Outcome::Miss, 2, 4),
                tier(Outcome::Hit, 5, 16),
                tier(Outcome::HeavyHit, 17, 19),
                tier(Outcome::CriticalHit, 20, 20),
            ],
        }
    }
}

impl OutcomeTable {
    /// Build a table, checking the tiers cover `[1, faces]` exactly once
    pub fn new(faces: u32, mut tiers: Vec<Tier>) -> Result<Self, ConfigError> {
        let faces = NonZeroU32::new(faces).ok_or_else(|| {
            ConfigError::ValidationError("outcome die must have at least one face".to_string())
        })?;

        for tier in &tiers {
            if tier.min > tier.max {
                return Err(ConfigError::ValidationError(format!(
                    "{} tier has min {} above max {}",
                    tier.outcome, tier.min, tier.max
                )));
            }
            if tier.max > faces.get() {
                return Err(ConfigError::ValidationError(format!(
                    "{} tier runs past the die's last face ({})",
                    tier.outcome, faces
                )));
            }
            if tier.outcome == Outcome::Miss && tier.multiplier != 0 {
                return Err(ConfigError::ValidationError(
                    "miss tier cannot carry a damage multiplier".to_string(),
                ));
            }
        }

        tiers.sort_by_key(|t| t.min);

        let mut next: u32 = 1;
        for tier in &tiers {
            if tier.min < next {
                return Err(ConfigError::ValidationError(format!(
                    "{} tier overlaps roll {}",
                    tier.outcome, tier.min
                )));
            }
            if tier.min > next {
                return Err(ConfigError::ValidationError(format!(
                    "rolls {}..{} are not covered by any tier",
                    next,
                    tier.min - 1
                )));
            }
            next = tier.max.saturating_add(1);
        }
        if next <= faces.get() {
            return Err(ConfigError::ValidationError(format!(
                "rolls {}..{} are not covered by any tier",
                next, faces
            )));
        }

        Ok(OutcomeTable { faces, tiers })
    }

    /// Number of faces on the attack die
    pub fn faces(&self) -> u32 {
        self.faces.get()
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// The tier a roll falls in, or `None` if the roll is off the die
    pub fn lookup(&self, roll: u32) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.contains(roll))
    }

    /// The attack die as a dice pool
    pub fn die(&self) -> DiceRoller {
        DiceRoller::single(self.faces)
    }

    /// Roll the attack die
    pub fn roll_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        self.die().roll_with_rng(rng)
    }
}

impl TryFrom<OutcomeTableConfig> for OutcomeTable {
    type Error = ConfigError;

    fn try_from(config: OutcomeTableConfig) -> Result<Self, Self::Error> {
        let tiers = config
            .tiers
            .into_iter()
            .map(|t| Tier {
                outcome: t.outcome,
                min: t.min,
                max: t.max,
                multiplier: t.multiplier.unwrap_or_else(|| t.outcome.default_multiplier()),
            })
            .collect();
        OutcomeTable::new(config.faces, tiers)
    }
}

impl From<OutcomeTable> for OutcomeTableConfig {
    fn from(table: OutcomeTable) -> Self {
        OutcomeTableConfig {
            faces: table.faces.get(),
            tiers: table
                .tiers
                .into_iter()
                .map(|t| TierConfig {
                    outcome: t.outcome,
                    min: t.min,
                    max: t.max,
                    multiplier: Some(t.multiplier),
                })
                .collect(),
        }
    }
}
