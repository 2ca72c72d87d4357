//! Dice pools - Sums of uniformly rolled dice
//!
//! A pool is a list of `(faces, count)` groups. Rolling a pool rolls `count`
//! dice of each group and sums every face, so a pool always lands in
//! `[min_total, max_total]`.
//!
//! Pools are written in the usual tabletop notation: `"1d8+2d4"`. A bare `d6`
//! means `1d6` and `"0"` is the empty pool.
//!
//! Totals saturate at `u32::MAX` and a group holds at most
//! [`MAX_DICE_PER_GROUP`] dice.

use crate::DiceError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Largest `count` a single group accepts
pub const MAX_DICE_PER_GROUP: u32 = 1000;

/// A group of identical dice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    /// Number of faces on each die (always >= 1)
    pub faces: u32,
    /// Number of dice in the group
    pub count: u32,
}

/// A configurable pool of dice
///
/// Rolling holds no state between calls beyond the pool itself, so a roller
/// can be shared freely and rolled from any thread with its own RNG.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiceRoller {
    dice: Vec<Dice>,
}

impl DiceRoller {
    /// Create an empty pool (always rolls 0)
    pub fn new() -> Self {
        DiceRoller::default()
    }

    /// Create a pool holding a single group of dice
    pub fn with_dice(faces: u32, count: u32) -> Result<Self, DiceError> {
        let mut roller = DiceRoller::new();
        roller.add_dice(faces, count)?;
        Ok(roller)
    }

    /// Create a pool of one die
    pub fn single(faces: NonZeroU32) -> Self {
        DiceRoller {
            dice: vec![Dice {
                faces: faces.get(),
                count: 1,
            }],
        }
    }

    /// Add `count` dice with `faces` faces to the pool
    pub fn add_dice(&mut self, faces: u32, count: u32) -> Result<(), DiceError> {
        if faces < 1 {
            return Err(DiceError::ZeroFaces);
        }
        if count > MAX_DICE_PER_GROUP {
            return Err(DiceError::TooManyDice {
                count,
                max: MAX_DICE_PER_GROUP,
            });
        }
        self.dice.push(Dice { faces, count });
        Ok(())
    }

    /// The configured dice groups, in insertion order
    pub fn dice(&self) -> &[Dice] {
        &self.dice
    }

    /// Whether the pool holds no dice at all
    pub fn is_empty(&self) -> bool {
        self.dice.iter().all(|d| d.count == 0)
    }

    /// Smallest possible roll (every die shows 1)
    pub fn min_total(&self) -> u32 {
        self.dice
            .iter()
            .fold(0u32, |total, d| total.saturating_add(d.count))
    }

    /// Largest possible roll (every die shows its highest face)
    pub fn max_total(&self) -> u32 {
        self.dice
            .iter()
            .fold(0u32, |total, d| total.saturating_add(d.faces.saturating_mul(d.count)))
    }

    /// Roll the pool with the thread-local RNG
    pub fn roll(&self) -> u32 {
        let mut rng = rand::thread_rng();
        self.roll_with_rng(&mut rng)
    }

    /// Roll the pool with a provided RNG (for deterministic testing)
    pub fn roll_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let mut total = 0u32;
        for group in &self.dice {
            for _ in 0..group.count {
                total = total.saturating_add(rng.gen_range(1..=group.faces));
            }
        }
        total
    }
}

impl fmt::Display for DiceRoller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dice.is_empty() {
            return write!(f, "0");
        }
        for (i, group) in self.dice.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{}d{}", group.count, group.faces)?;
        }
        Ok(())
    }
}

impl FromStr for DiceRoller {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let notation = s.trim();
        let mut roller = DiceRoller::new();
        if notation.is_empty() || notation == "0" {
            return Ok(roller);
        }

        for term in notation.split('+') {
            let term = term.trim();
            let invalid = || DiceError::InvalidNotation(s.to_string());

            let (count, faces) = term.split_once(['d', 'D']).ok_or_else(invalid)?;
            let count = if count.is_empty() {
                1
            } else {
                count.parse::<u32>().map_err(|_| invalid())?
            };
            let faces = faces.parse::<u32>().map_err(|_| invalid())?;

            roller.add_dice(faces, count)?;
        }

        Ok(roller)
    }
}

impl TryFrom<String> for DiceRoller {
    type Error = DiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DiceRoller> for String {
    fn from(roller: DiceRoller) -> Self {
        roller.to_string()
    }
}
