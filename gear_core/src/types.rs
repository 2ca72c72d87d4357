use serde::{Deserialize, Serialize};
use std::fmt;

/// Equipment slot on an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    MainHand,
    OffHand,
    Head,
    Body,
    Hands,
    Legs,
    Feet,
    Neck,
    Ring,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::MainHand,
            EquipmentSlot::OffHand,
            EquipmentSlot::Head,
            EquipmentSlot::Body,
            EquipmentSlot::Hands,
            EquipmentSlot::Legs,
            EquipmentSlot::Feet,
            EquipmentSlot::Neck,
            EquipmentSlot::Ring,
        ]
    }

    /// Slots whose gear contributes weapon damage
    pub fn is_weapon_slot(&self) -> bool {
        matches!(self, EquipmentSlot::MainHand | EquipmentSlot::OffHand)
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentSlot::MainHand => write!(f, "Main Hand"),
            EquipmentSlot::OffHand => write!(f, "Off Hand"),
            EquipmentSlot::Head => write!(f, "Head"),
            EquipmentSlot::Body => write!(f, "Body"),
            EquipmentSlot::Hands => write!(f, "Hands"),
            EquipmentSlot::Legs => write!(f, "Legs"),
            EquipmentSlot::Feet => write!(f, "Feet"),
            EquipmentSlot::Neck => write!(f, "Neck"),
            EquipmentSlot::Ring => write!(f, "Ring"),
        }
    }
}

/// Item rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Display color as a 0xRRGGBB value
    pub fn color(&self) -> u32 {
        match self {
            Rarity::Common => 0xFFFFFF,
            Rarity::Uncommon => 0x1EFF00,
            Rarity::Rare => 0x0070DD,
            Rarity::Epic => 0xA335EE,
            Rarity::Legendary => 0xFF8000,
        }
    }

    /// Display color as a `#RRGGBB` hex string
    pub fn hex_color(&self) -> String {
        format!("#{:06X}", self.color())
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::Common => write!(f, "Common"),
            Rarity::Uncommon => write!(f, "Uncommon"),
            Rarity::Rare => write!(f, "Rare"),
            Rarity::Epic => write!(f, "Epic"),
            Rarity::Legendary => write!(f, "Legendary"),
        }
    }
}
