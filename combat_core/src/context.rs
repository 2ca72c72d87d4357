//! Context - The capabilities combat needs from the rest of the game

use crate::message::Message;
use stat_core::{Entity, EntityId};
use std::collections::BTreeMap;

/// What the combat core asks of the game driving it
///
/// The world, the screen and entity storage all live outside the core; this
/// trait is the whole surface it touches.
pub trait CombatContext {
    /// Whether a map/world is currently loaded. Actions are no-ops without one.
    fn has_active_map(&self) -> bool;

    /// Hand a narration line to the presentation layer
    fn display_message(&mut self, message: Message);

    fn entity(&self, id: EntityId) -> Option<&Entity>;

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity>;

    /// Called once a death has been resolved, after the entity is marked dead.
    /// World cleanup goes here; the default does nothing.
    fn entity_died(&mut self, _id: EntityId) {}
}

/// In-memory context: a set of entities and a message log
#[derive(Debug, Clone)]
pub struct Arena {
    map_active: bool,
    despawn_dead: bool,
    entities: BTreeMap<EntityId, Entity>,
    messages: Vec<Message>,
}

impl Default for Arena {
    fn default() -> Self {
        Arena::new()
    }
}

impl Arena {
    /// Create an arena with an active map
    pub fn new() -> Self {
        Arena {
            map_active: true,
            despawn_dead: false,
            entities: BTreeMap::new(),
            messages: Vec::new(),
        }
    }

    pub fn set_map_active(&mut self, active: bool) {
        self.map_active = active;
    }

    /// Remove entities from the arena as soon as their death resolves
    pub fn set_despawn_dead(&mut self, despawn: bool) {
        self.despawn_dead = despawn;
    }

    /// Add an entity, returning any entity it replaced
    pub fn spawn(&mut self, entity: Entity) -> Option<Entity> {
        self.entities.insert(entity.id(), entity)
    }

    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Every message displayed so far
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Drain the message log
    pub fn take_messages(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages)
    }
}

impl CombatContext for Arena {
    fn has_active_map(&self) -> bool {
        self.map_active
    }

    fn display_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    fn entity_died(&mut self, id: EntityId) {
        if self.despawn_dead {
            self.entities.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_lookup() {
        let mut arena = Arena::new();
        assert!(arena.has_active_map());
        assert!(arena.spawn(Entity::new(EntityId(1), "Rat")).is_none());
        assert!(arena.spawn(Entity::new(EntityId(1), "Big Rat")).is_some());
        assert_eq!(arena.entity(EntityId(1)).map(|e| e.name()), Some("Big Rat"));
        assert!(arena.entity(EntityId(2)).is_none());
        assert_eq!(arena.entities().count(), 1);
    }

    #[test]
    fn test_message_log() {
        let mut arena = Arena::new();
        arena.display_message(Message::builder().text("one").build());
        arena.display_message(Message::builder().text("two").build());
        assert_eq!(arena.messages().len(), 2);

        let drained = arena.take_messages();
        assert_eq!(drained[1].to_string(), "two");
        assert!(arena.messages().is_empty());
    }

    #[test]
    fn test_despawn_on_death() {
        let mut arena = Arena::new();
        arena.spawn(Entity::new(EntityId(1), "Rat"));

        arena.entity_died(EntityId(1));
        assert!(arena.entity(EntityId(1)).is_some());

        arena.set_despawn_dead(true);
        arena.entity_died(EntityId(1));
        assert!(arena.entity(EntityId(1)).is_none());
    }
}
