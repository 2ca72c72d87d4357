//! Inventory - Per-slot equipment owned by one entity

use crate::equipment::Equipment;
use crate::types::EquipmentSlot;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from every equipment slot to optional gear
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: HashMap<EquipmentSlot, Equipment>,
}

impl Inventory {
    /// Create an inventory with every slot empty
    pub fn new() -> Self {
        Inventory::default()
    }

    /// Put gear in a slot, returning whatever it displaced
    pub fn equip(&mut self, slot: EquipmentSlot, equipment: Equipment) -> Option<Equipment> {
        self.slots.insert(slot, equipment)
    }

    /// Empty a slot, returning its gear
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Equipment> {
        self.slots.remove(&slot)
    }

    /// Gear in a slot, if any
    pub fn equipment(&self, slot: EquipmentSlot) -> Option<&Equipment> {
        self.slots.get(&slot)
    }

    /// Occupied slots in slot order
    pub fn equipped(&self) -> impl Iterator<Item = (EquipmentSlot, &Equipment)> + '_ {
        EquipmentSlot::all()
            .iter()
            .filter_map(|slot| self.slots.get(slot).map(|e| (*slot, e)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Sum of armor over every occupied slot, saturating at `u32::MAX`
    pub fn total_armor(&self) -> u32 {
        self.slots
            .values()
            .fold(0u32, |total, e| total.saturating_add(e.armor))
    }

    /// Fresh damage roll over the weapon slots. Empty hands contribute 0.
    pub fn roll_weapon_damage<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let mut total = 0u32;
        for slot in EquipmentSlot::all().iter().filter(|s| s.is_weapon_slot()) {
            if let Some(weapon) = self.equipment(*slot) {
                total = total.saturating_add(weapon.roll_damage_with_rng(rng));
            }
        }
        total
    }
}
