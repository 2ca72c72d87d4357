//! Attack action - Roll once, resolve against the outcome table, maybe chain a death

use super::{acting_entity, finish, Action, ActionReport, AttackReport, DeathAction, Resolution};
use crate::config::constants;
use crate::context::CombatContext;
use crate::damage::{calculate_damage, DamageRoll};
use crate::hooks::{ObserverId, Observers};
use crate::message::{narration, EntityRef};
use crate::outcome::{Outcome, OutcomeTable, Tier};
use crate::ActionError;
use rand::Rng;
use stat_core::EntityId;
use tracing::{debug, debug_span, trace};

/// An attack against a fixed target
///
/// The attack die is rolled once, when the action is built. Damage dice are
/// rolled fresh when it is performed.
#[derive(Debug)]
pub struct AttackAction {
    target: EntityId,
    roll: u32,
    tier: Tier,
    observers: Observers,
    death_observers: Observers,
}

impl AttackAction {
    /// Build an attack, rolling with the thread-local RNG
    pub fn new(target: EntityId) -> Self {
        let mut rng = rand::thread_rng();
        Self::with_rng(target, &mut rng)
    }

    /// Build an attack, rolling against the configured outcome table
    pub fn with_rng<R: Rng + ?Sized>(target: EntityId, rng: &mut R) -> Self {
        Self::from_table(target, &constants().outcomes, rng)
    }

    /// Build an attack, rolling against a specific outcome table
    pub fn from_table<R: Rng + ?Sized>(
        target: EntityId,
        table: &OutcomeTable,
        rng: &mut R,
    ) -> Self {
        loop {
            let roll = table.roll_with_rng(rng);
            // Validated tables cover every face of their die
            if let Some(tier) = table.lookup(roll) {
                return Self::from_tier(target, roll, *tier);
            }
        }
    }

    /// Build an attack with a pre-rolled value on the configured table
    pub fn with_roll(target: EntityId, roll: u32) -> Result<Self, ActionError> {
        Self::with_table_roll(target, &constants().outcomes, roll)
    }

    /// Build an attack with a pre-rolled value on a specific table
    pub fn with_table_roll(
        target: EntityId,
        table: &OutcomeTable,
        roll: u32,
    ) -> Result<Self, ActionError> {
        let tier = table.lookup(roll).ok_or(ActionError::RollOutOfRange {
            roll,
            faces: table.faces(),
        })?;
        Ok(Self::from_tier(target, roll, *tier))
    }

    fn from_tier(target: EntityId, roll: u32, tier: Tier) -> Self {
        AttackAction {
            target,
            roll,
            tier,
            observers: Observers::new(),
            death_observers: Observers::new(),
        }
    }

    pub fn target(&self) -> EntityId {
        self.target
    }

    /// The attack die result
    pub fn roll(&self) -> u32 {
        self.roll
    }

    pub fn outcome(&self) -> Outcome {
        self.tier.outcome
    }

    /// Register an observer on the death this attack may cause
    pub fn on_death<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&ActionReport) + 'static,
    {
        self.death_observers.add(observer)
    }
}

impl Action for AttackAction {
    fn resolve<C, R>(
        mut self,
        ctx: &mut C,
        actor: Option<EntityId>,
        rng: &mut R,
        resolution: &mut Resolution,
    ) -> Result<(), ActionError>
    where
        C: CombatContext + ?Sized,
        R: Rng + ?Sized,
    {
        let span = debug_span!("attack", actor = ?actor, target = %self.target, roll = self.roll);
        let _enter = span.enter();

        let Some(attacker) = acting_entity(ctx, actor) else {
            return Ok(());
        };
        let Some(defender) = ctx.entity(self.target) else {
            trace!("no target entity, skipping attack");
            return Ok(());
        };

        let outcome = self.tier.outcome;
        let health = constants().health_stat.as_str();
        let actor_ref = EntityRef::of(attacker);
        let target_ref = EntityRef::of(defender);

        // The entity that takes the damage must have the stat before anything changes
        let victim = if outcome == Outcome::CriticalMiss {
            attacker
        } else {
            defender
        };
        victim.stat(health)?;
        let victim_id = victim.id();

        let roll = match outcome {
            Outcome::CriticalMiss => calculate_damage(attacker, attacker, rng),
            Outcome::Miss => DamageRoll::default(),
            _ => calculate_damage(attacker, defender, rng),
        };
        let damage = roll.dealt().saturating_mul(self.tier.multiplier);
        debug!(%outcome, raw = roll.raw, armor = roll.armor, damage, "attack resolved");

        let (message, apply) = match outcome {
            Outcome::CriticalMiss => (narration::critical_miss(&actor_ref, damage), true),
            Outcome::Miss => (narration::miss(&actor_ref), false),
            _ if damage > 0 => (narration::hit(outcome, &actor_ref, &target_ref, damage), true),
            _ => (narration::dodge(&actor_ref, &target_ref), false),
        };

        let mut health_after = None;
        let mut reached_floor = false;
        if apply {
            if let Some(entity) = ctx.entity_mut(victim_id) {
                let stat = entity.stat_mut(health)?;
                stat.decrease(damage);
                debug!(entity = %victim_id, health = %stat, "health reduced");
                health_after = Some(stat.value());
                reached_floor = stat.is_at_floor();
            }
        }

        ctx.display_message(message);

        let report = AttackReport {
            actor: actor_ref.id,
            target: target_ref.id,
            roll: self.roll,
            outcome,
            damage,
            damaged: health_after.map(|_| victim_id),
            dodged: outcome.hits_target() && damage == 0,
            health_after,
        };
        finish(&mut self.observers, resolution, ActionReport::Attack(report));

        if reached_floor {
            let death = DeathAction::with_observers(std::mem::take(&mut self.death_observers));
            resolution.chain(death, ctx, Some(victim_id), rng)?;
        }

        Ok(())
    }

    fn observers(&self) -> &Observers {
        &self.observers
    }

    fn observers_mut(&mut self) -> &mut Observers {
        &mut self.observers
    }
}
