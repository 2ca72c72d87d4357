use crate::dice::DiceRoller;
use crate::types::{EquipmentSlot, Rarity};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A piece of gear: armor it grants and the dice it rolls for damage
///
/// Equipment is an immutable value once built. Inventories own their
/// equipment outright, so two entities never share an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    /// Catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Flat armor contributed while equipped
    #[serde(default)]
    pub armor: u32,
    /// Damage dice rolled on each attack
    #[serde(default)]
    pub damage: DiceRoller,
    #[serde(default)]
    pub rarity: Rarity,
    /// Slot this gear is meant for, if it cares
    #[serde(default)]
    pub slot: Option<EquipmentSlot>,
}

impl Equipment {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Equipment {
            id: id.into(),
            name: name.into(),
            armor: 0,
            damage: DiceRoller::new(),
            rarity: Rarity::default(),
            slot: None,
        }
    }

    pub fn with_armor(mut self, armor: u32) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_damage(mut self, damage: DiceRoller) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_slot(mut self, slot: EquipmentSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Draw a fresh damage roll
    pub fn roll_damage(&self) -> u32 {
        self.damage.roll()
    }

    /// Draw a fresh damage roll with a provided RNG
    pub fn roll_damage_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        self.damage.roll_with_rng(rng)
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.rarity)?;
        if !self.damage.is_empty() {
            write!(f, " [{} dmg]", self.damage)?;
        }
        if self.armor > 0 {
            write!(f, " [{} armor]", self.armor)?;
        }
        Ok(())
    }
}
