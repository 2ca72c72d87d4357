//! Actions - Effects performed by an entity, followed by observer hooks
//!
//! Every action runs the same way:
//! 1. Guard: no active map or no acting entity makes the call a silent no-op
//! 2. Apply the effect and display its narration
//! 3. Fire the action's observers with an [`ActionReport`]
//! 4. Perform any chained follow-up action (e.g. a death)
//!
//! Actions are single use: `perform` consumes them.

mod attack;
mod death;

pub use attack::AttackAction;
pub use death::DeathAction;

use crate::config::constants;
use crate::context::CombatContext;
use crate::hooks::{ObserverId, Observers};
use crate::outcome::Outcome;
use crate::ActionError;
use rand::Rng;
use serde::Serialize;
use stat_core::{Entity, EntityId};

/// What a completed action did, handed to observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionReport {
    Attack(AttackReport),
    Death { entity: EntityId },
}

/// Details of a resolved attack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttackReport {
    pub actor: EntityId,
    pub target: EntityId,
    /// The pre-rolled attack die
    pub roll: u32,
    pub outcome: Outcome,
    /// Damage after armor and multiplier
    pub damage: u32,
    /// Entity whose health was reduced, if any
    pub damaged: Option<EntityId>,
    /// Armor absorbed a landed hit
    pub dodged: bool,
    /// Health of the damaged entity after the hit
    pub health_after: Option<i32>,
}

/// Everything one top-level `perform` did, in order, including chained actions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    reports: Vec<ActionReport>,
    #[serde(skip)]
    depth: usize,
}

impl Resolution {
    pub fn new() -> Self {
        Resolution::default()
    }

    pub fn reports(&self) -> &[ActionReport] {
        &self.reports
    }

    /// True when the guard turned the call into a no-op
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Entities that died during this resolution
    pub fn deaths(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.reports.iter().filter_map(|r| match r {
            ActionReport::Death { entity } => Some(*entity),
            ActionReport::Attack(_) => None,
        })
    }

    /// The first attack report, if an attack resolved
    pub fn attack(&self) -> Option<&AttackReport> {
        self.reports.iter().find_map(|r| match r {
            ActionReport::Attack(report) => Some(report),
            ActionReport::Death { .. } => None,
        })
    }

    fn record(&mut self, report: ActionReport) {
        self.reports.push(report);
    }

    /// Perform a follow-up action on the same call stack, bounded by `max_chain_depth`
    fn chain<A, C, R>(
        &mut self,
        action: A,
        ctx: &mut C,
        actor: Option<EntityId>,
        rng: &mut R,
    ) -> Result<(), ActionError>
    where
        A: Action,
        C: CombatContext + ?Sized,
        R: Rng + ?Sized,
    {
        let max_depth = constants().max_chain_depth;
        if self.depth >= max_depth {
            return Err(ActionError::ChainTooDeep(self.depth + 1));
        }
        self.depth += 1;
        let result = action.resolve(ctx, actor, rng, self);
        self.depth -= 1;
        result
    }
}

/// Shared entry guard: the acting entity, or `None` if the action must no-op
fn acting_entity<'c, C>(ctx: &'c C, actor: Option<EntityId>) -> Option<&'c Entity>
where
    C: CombatContext + ?Sized,
{
    if !ctx.has_active_map() {
        tracing::trace!("no active map, skipping action");
        return None;
    }
    let entity = actor.and_then(|id| ctx.entity(id));
    if entity.is_none() {
        tracing::trace!(?actor, "no acting entity, skipping action");
    }
    entity
}

/// Shared tail of every action: tell the observers, then log the report
fn finish(observers: &mut Observers, resolution: &mut Resolution, report: ActionReport) {
    observers.fire(&report);
    resolution.record(report);
}

/// An operation an entity performs against the game
pub trait Action: Sized {
    /// Apply the action, appending its reports (and any chained ones) to `resolution`
    fn resolve<C, R>(
        self,
        ctx: &mut C,
        actor: Option<EntityId>,
        rng: &mut R,
        resolution: &mut Resolution,
    ) -> Result<(), ActionError>
    where
        C: CombatContext + ?Sized,
        R: Rng + ?Sized;

    fn observers(&self) -> &Observers;

    fn observers_mut(&mut self) -> &mut Observers;

    /// Perform the action with the thread-local RNG
    fn perform<C>(self, ctx: &mut C, actor: Option<EntityId>) -> Result<Resolution, ActionError>
    where
        C: CombatContext + ?Sized,
    {
        let mut rng = rand::thread_rng();
        self.perform_with_rng(ctx, actor, &mut rng)
    }

    /// Perform the action with a provided RNG (for deterministic testing)
    fn perform_with_rng<C, R>(
        self,
        ctx: &mut C,
        actor: Option<EntityId>,
        rng: &mut R,
    ) -> Result<Resolution, ActionError>
    where
        C: CombatContext + ?Sized,
        R: Rng + ?Sized,
    {
        let mut resolution = Resolution::new();
        self.resolve(ctx, actor, rng, &mut resolution)?;
        Ok(resolution)
    }

    fn add_observer<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&ActionReport) + 'static,
    {
        self.observers_mut().add(observer)
    }

    fn add_optional_observer<F>(&mut self, observer: Option<F>) -> Option<ObserverId>
    where
        F: FnMut(&ActionReport) + 'static,
    {
        self.observers_mut().add_optional(observer)
    }

    fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers_mut().remove(id)
    }

    fn clear_observers(&mut self) {
        self.observers_mut().clear();
    }
}

/// Closed set of actions, for callers that queue actions of mixed kinds
#[derive(Debug)]
pub enum GameAction {
    Attack(AttackAction),
    Death(DeathAction),
}

impl From<AttackAction> for GameAction {
    fn from(action: AttackAction) -> Self {
        GameAction::Attack(action)
    }
}

impl From<DeathAction> for GameAction {
    fn from(action: DeathAction) -> Self {
        GameAction::Death(action)
    }
}

impl Action for GameAction {
    fn resolve<C, R>(
        self,
        ctx: &mut C,
        actor: Option<EntityId>,
        rng: &mut R,
        resolution: &mut Resolution,
    ) -> Result<(), ActionError>
    where
        C: CombatContext + ?Sized,
        R: Rng + ?Sized,
    {
        match self {
            GameAction::Attack(action) => action.resolve(ctx, actor, rng, resolution),
            GameAction::Death(action) => action.resolve(ctx, actor, rng, resolution),
        }
    }

    fn observers(&self) -> &Observers {
        match self {
            GameAction::Attack(action) => action.observers(),
            GameAction::Death(action) => action.observers(),
        }
    }

    fn observers_mut(&mut self) -> &mut Observers {
        match self {
            GameAction::Attack(action) => action.observers_mut(),
            GameAction::Death(action) => action.observers_mut(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Arena;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn goblin_arena() -> Arena {
        let mut arena = Arena::new();
        arena.spawn(Entity::new(EntityId(1), "Goblin").with_health(5).unwrap());
        arena
    }

    #[test]
    fn test_chain_depth_bounded() {
        let mut arena = goblin_arena();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut resolution = Resolution::new();
        resolution.depth = constants().max_chain_depth;

        let err = resolution
            .chain(DeathAction::new(), &mut arena, Some(EntityId(1)), &mut rng)
            .unwrap_err();
        assert_eq!(err, ActionError::ChainTooDeep(constants().max_chain_depth + 1));
        assert!(resolution.is_empty());
        assert!(!arena.entity(EntityId(1)).unwrap().is_dead());
    }

    #[test]
    fn test_chain_restores_depth() {
        let mut arena = goblin_arena();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut resolution = Resolution::new();

        resolution
            .chain(DeathAction::new(), &mut arena, Some(EntityId(1)), &mut rng)
            .unwrap();
        assert_eq!(resolution.depth, 0);
        assert_eq!(resolution.deaths().count(), 1);
    }

    #[test]
    fn test_game_action_dispatch() {
        let mut arena = goblin_arena();
        let mut action = GameAction::from(DeathAction::new());
        let id = action.add_observer(|_| {});
        assert_eq!(action.observers().len(), 1);
        assert!(action.remove_observer(id));
        assert!(action.observers().is_empty());

        let resolution = action.perform(&mut arena, Some(EntityId(1))).unwrap();
        assert_eq!(
            resolution.reports(),
            &[ActionReport::Death {
                entity: EntityId(1)
            }]
        );
    }

    #[test]
    fn test_report_serializes_tagged() {
        let report = ActionReport::Death {
            entity: EntityId(4),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["action"], "death");
    }
}
