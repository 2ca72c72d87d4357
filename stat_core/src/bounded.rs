//! BoundedStat - A numeric resource clamped between a floor and a ceiling
//!
//! Every mutation goes through the clamp, so `min <= value <= max` holds
//! after any call. Pushing a value out of range is not an error.

use crate::StatError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoundedStat")]
pub struct BoundedStat {
    value: i32,
    min: i32,
    max: i32,
}

/// Unchecked serialized form, validated on the way in
#[derive(Deserialize)]
struct RawBoundedStat {
    value: i32,
    min: i32,
    max: i32,
}

impl TryFrom<RawBoundedStat> for BoundedStat {
    type Error = StatError;

    fn try_from(raw: RawBoundedStat) -> Result<Self, Self::Error> {
        BoundedStat::with_value(raw.min, raw.max, raw.value)
    }
}

impl BoundedStat {
    /// Create a stat filled to its ceiling
    pub fn new(min: i32, max: i32) -> Result<Self, StatError> {
        if min > max {
            return Err(StatError::InvalidBounds { min, max });
        }
        Ok(BoundedStat {
            value: max,
            min,
            max,
        })
    }

    /// Create a stat with a starting value (clamped)
    pub fn with_value(min: i32, max: i32, value: i32) -> Result<Self, StatError> {
        let mut stat = Self::new(min, max)?;
        stat.set_value(value);
        Ok(stat)
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Set the value, clamped into `[min, max]`
    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Subtract `amount`, stopping at the floor
    pub fn decrease(&mut self, amount: u32) {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.set_value(self.value.saturating_sub(amount));
    }

    /// Add `amount`, stopping at the ceiling
    pub fn increase(&mut self, amount: u32) {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.set_value(self.value.saturating_add(amount));
    }

    /// Replace both bounds and re-clamp the current value
    pub fn set_bounds(&mut self, min: i32, max: i32) -> Result<(), StatError> {
        if min > max {
            return Err(StatError::InvalidBounds { min, max });
        }
        self.min = min;
        self.max = max;
        self.set_value(self.value);
        Ok(())
    }

    pub fn is_at_floor(&self) -> bool {
        self.value == self.min
    }

    pub fn is_at_ceiling(&self) -> bool {
        self.value == self.max
    }
}

impl fmt::Display for BoundedStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.value, self.max)
    }
}
