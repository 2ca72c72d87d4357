//! Damage calculation - Weapon rolls minus armor
//!
//! Formula:
//! - armor = sum of armor over every occupied slot of the defender
//! - raw = fresh main hand roll + fresh off hand roll of the attacker
//! - damage = max(0, raw - armor)

use rand::Rng;
use stat_core::Entity;

/// The pieces of one damage calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageRoll {
    /// Weapon damage before armor
    pub raw: u32,
    /// Defender's total armor
    pub armor: u32,
}

impl DamageRoll {
    /// Damage left after armor, never negative
    pub fn dealt(&self) -> u32 {
        self.raw.saturating_sub(self.armor)
    }

    /// Whether armor soaked everything
    pub fn absorbed(&self) -> bool {
        self.dealt() == 0
    }
}

/// Roll the attacker's weapons against the defender's armor
///
/// The attacker and defender may be the same entity (a critical miss).
pub fn calculate_damage<R: Rng + ?Sized>(
    attacker: &Entity,
    defender: &Entity,
    rng: &mut R,
) -> DamageRoll {
    DamageRoll {
        raw: attacker.inventory().roll_weapon_damage(rng),
        armor: defender.inventory().total_armor(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gear_core::{DiceRoller, Equipment, EquipmentSlot};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use stat_core::EntityId;

    fn fixed(amount: u32) -> DiceRoller {
        DiceRoller::with_dice(1, amount).unwrap()
    }

    fn armed(main: u32, off: Option<u32>) -> Entity {
        let mut entity = Entity::new(EntityId(1), "Attacker");
        entity.inventory_mut().equip(
            EquipmentSlot::MainHand,
            Equipment::new("main", "Main").with_damage(fixed(main)),
        );
        if let Some(off) = off {
            entity.inventory_mut().equip(
                EquipmentSlot::OffHand,
                Equipment::new("off", "Off").with_damage(fixed(off)),
            );
        }
        entity
    }

    fn armored(pieces: &[(EquipmentSlot, u32)]) -> Entity {
        let mut entity = Entity::new(EntityId(2), "Defender");
        for (slot, armor) in pieces {
            entity
                .inventory_mut()
                .equip(*slot, Equipment::new("piece", "Piece").with_armor(*armor));
        }
        entity
    }

    #[test]
    fn test_weapon_minus_armor() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let attacker = armed(8, None);
        let defender = armored(&[(EquipmentSlot::Body, 3)]);

        let roll = calculate_damage(&attacker, &defender, &mut rng);
        assert_eq!(roll, DamageRoll { raw: 8, armor: 3 });
        assert_eq!(roll.dealt(), 5);
    }

    #[test]
    fn test_both_hands_add() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let attacker = armed(3, Some(1));
        let defender = armored(&[]);
        assert_eq!(calculate_damage(&attacker, &defender, &mut rng).dealt(), 4);
    }

    #[test]
    fn test_armor_clamps_to_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let attacker = armed(2, None);
        let defender = armored(&[(EquipmentSlot::Head, 2), (EquipmentSlot::Feet, 3)]);

        let roll = calculate_damage(&attacker, &defender, &mut rng);
        assert_eq!(roll.dealt(), 0);
        assert!(roll.absorbed());
    }

    #[test]
    fn test_unarmed_deals_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let attacker = Entity::new(EntityId(1), "Fist");
        let defender = armored(&[]);
        assert_eq!(calculate_damage(&attacker, &defender, &mut rng).dealt(), 0);
    }

    #[test]
    fn test_self_damage_uses_own_armor() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut attacker = armed(6, None);
        attacker
            .inventory_mut()
            .equip(EquipmentSlot::Body, Equipment::new("vest", "Vest").with_armor(4));
        assert_eq!(calculate_damage(&attacker, &attacker, &mut rng).dealt(), 2);
    }

    proptest! {
        #[test]
        fn prop_more_armor_never_more_damage(
            main in 0u32..40,
            off in 0u32..40,
            armor in 0u32..100,
            extra in 0u32..100,
        ) {
            let mut rng = ChaCha8Rng::seed_from_u64(0);
            let attacker = armed(main, Some(off));
            let light = armored(&[(EquipmentSlot::Body, armor)]);
            let heavy = armored(&[(EquipmentSlot::Body, armor), (EquipmentSlot::Head, extra)]);

            let light_damage = calculate_damage(&attacker, &light, &mut rng).dealt();
            let heavy_damage = calculate_damage(&attacker, &heavy, &mut rng).dealt();
            prop_assert!(heavy_damage <= light_damage);
            prop_assert_eq!(light_damage, (main + off).saturating_sub(armor));
        }
    }
}
