//! Death action - Marks an entity dead once a stat hits its floor

use super::{acting_entity, finish, Action, ActionReport, Resolution};
use crate::context::CombatContext;
use crate::hooks::Observers;
use crate::message::{narration, EntityRef};
use crate::ActionError;
use rand::Rng;
use stat_core::EntityId;
use tracing::{debug_span, info};

/// The death of the acting entity
///
/// Only marks the entity and signals the context; removing it from the world
/// is left to [`CombatContext::entity_died`]. An entity that is already dead
/// and still present dies again: the narration, `entity_died` and observers
/// all run each time.
#[derive(Debug, Default)]
pub struct DeathAction {
    observers: Observers,
}

impl DeathAction {
    pub fn new() -> Self {
        DeathAction::default()
    }

    pub(crate) fn with_observers(observers: Observers) -> Self {
        DeathAction { observers }
    }
}

impl Action for DeathAction {
    fn resolve<C, R>(
        mut self,
        ctx: &mut C,
        actor: Option<EntityId>,
        _rng: &mut R,
        resolution: &mut Resolution,
    ) -> Result<(), ActionError>
    where
        C: CombatContext + ?Sized,
        R: Rng + ?Sized,
    {
        let span = debug_span!("death", entity = ?actor);
        let _enter = span.enter();

        let Some(entity) = acting_entity(ctx, actor) else {
            return Ok(());
        };
        let who = EntityRef::of(entity);

        if let Some(entity) = ctx.entity_mut(who.id) {
            entity.mark_dead();
        }
        ctx.display_message(narration::death(&who));
        ctx.entity_died(who.id);
        info!(entity = %who.id, name = %who.name, "entity died");

        finish(&mut self.observers, resolution, ActionReport::Death { entity: who.id });
        Ok(())
    }

    fn observers(&self) -> &Observers {
        &self.observers
    }

    fn observers_mut(&mut self) -> &mut Observers {
        &mut self.observers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Arena;
    use stat_core::Entity;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_marks_and_narrates() {
        let mut arena = Arena::new();
        arena.spawn(Entity::new(EntityId(3), "Goblin"));

        let resolution = DeathAction::new().perform(&mut arena, Some(EntityId(3))).unwrap();
        assert_eq!(resolution.deaths().collect::<Vec<_>>(), vec![EntityId(3)]);
        assert!(arena.entity(EntityId(3)).unwrap().is_dead());
        assert_eq!(arena.messages()[0].to_string(), "Goblin has died.");
    }

    #[test]
    fn test_dying_twice_repeats() {
        let mut arena = Arena::new();
        arena.spawn(Entity::new(EntityId(3), "Goblin"));

        DeathAction::new().perform(&mut arena, Some(EntityId(3))).unwrap();
        let again = DeathAction::new().perform(&mut arena, Some(EntityId(3))).unwrap();
        assert_eq!(again.deaths().count(), 1);
        assert_eq!(arena.messages().len(), 2);
        assert!(arena.entity(EntityId(3)).unwrap().is_dead());
    }

    #[test]
    fn test_despawning_context() {
        let mut arena = Arena::new();
        arena.set_despawn_dead(true);
        arena.spawn(Entity::new(EntityId(3), "Goblin"));

        DeathAction::new().perform(&mut arena, Some(EntityId(3))).unwrap();
        assert!(arena.entity(EntityId(3)).is_none());
        assert_eq!(arena.messages().len(), 1);
    }

    #[test]
    fn test_guard_skips_observers() {
        let fired = Rc::new(Cell::new(0));
        let mut arena = Arena::new();
        arena.spawn(Entity::new(EntityId(3), "Goblin"));

        let mut death = DeathAction::new();
        let count = Rc::clone(&fired);
        death.add_observer(move |_| count.set(count.get() + 1));
        assert!(death.perform(&mut arena, None).unwrap().is_empty());

        arena.set_map_active(false);
        let mut death = DeathAction::new();
        let count = Rc::clone(&fired);
        death.add_observer(move |_| count.set(count.get() + 1));
        assert!(death.perform(&mut arena, Some(EntityId(3))).unwrap().is_empty());

        assert_eq!(fired.get(), 0);
        assert!(!arena.entity(EntityId(3)).unwrap().is_dead());
    }
}
