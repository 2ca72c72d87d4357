//! Narration - Display messages built from text and entity references

use serde::{Deserialize, Serialize};
use stat_core::{Entity, EntityId};
use std::fmt;

/// Identity of an entity as it appears in a message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: EntityId,
    pub name: String,
}

impl EntityRef {
    pub fn of(entity: &Entity) -> Self {
        EntityRef {
            id: entity.id(),
            name: entity.name().to_string(),
        }
    }
}

/// A piece of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    Text { text: String },
    Entity { entity: EntityRef },
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Text { text } => write!(f, "{}", text),
            Fragment::Entity { entity } => write!(f, "{}", entity.name),
        }
    }
}

/// An immutable narration line
///
/// Presentation layers can render the fragments however they like (for
/// example coloring entity names); `Display` gives the plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    fragments: Vec<Fragment>,
}

impl Message {
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Entities referenced by the message, in order of appearance
    pub fn entities(&self) -> impl Iterator<Item = &EntityRef> {
        self.fragments.iter().filter_map(|f| match f {
            Fragment::Entity { entity } => Some(entity),
            Fragment::Text { .. } => None,
        })
    }

    pub fn mentions(&self, id: EntityId) -> bool {
        self.entities().any(|e| e.id == id)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            write!(f, "{}", fragment)?;
        }
        Ok(())
    }
}

/// Builder for [`Message`]
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    fragments: Vec<Fragment>,
}

impl MessageBuilder {
    /// Append plain text (adjacent text is merged)
    pub fn text(mut self, text: impl AsRef<str>) -> Self {
        let text = text.as_ref();
        if text.is_empty() {
            return self;
        }
        match self.fragments.last_mut() {
            Some(Fragment::Text { text: last }) => last.push_str(text),
            _ => self.fragments.push(Fragment::Text {
                text: text.to_string(),
            }),
        }
        self
    }

    /// Append an entity's display name
    pub fn entity(mut self, entity: &EntityRef) -> Self {
        self.fragments.push(Fragment::Entity {
            entity: entity.clone(),
        });
        self
    }

    pub fn build(self) -> Message {
        Message {
            fragments: self.fragments,
        }
    }
}

/// Stock combat narration lines
pub mod narration {
    use super::{EntityRef, Message};
    use crate::outcome::Outcome;

    pub fn critical_miss(actor: &EntityRef, damage: u32) -> Message {
        Message::builder()
            .entity(actor)
            .text(format!(" missed and attacked itself for {} damage.", damage))
            .build()
    }

    pub fn miss(actor: &EntityRef) -> Message {
        Message::builder()
            .entity(actor)
            .text(" missed its target.")
            .build()
    }

    /// Narration for a damaging hit. Non-hit outcomes fall back to a plain hit line.
    pub fn hit(outcome: Outcome, actor: &EntityRef, target: &EntityRef, damage: u32) -> Message {
        let verb = match outcome {
            Outcome::HeavyHit => " landed a heavy attack against ",
            Outcome::CriticalHit => " landed a critical attack against ",
            _ => " attacked ",
        };
        Message::builder()
            .entity(actor)
            .text(verb)
            .entity(target)
            .text(format!(" for {} damage.", damage))
            .build()
    }

    pub fn dodge(actor: &EntityRef, target: &EntityRef) -> Message {
        Message::builder()
            .entity(target)
            .text(" dodged ")
            .entity(actor)
            .text("'s attack.")
            .build()
    }

    pub fn death(entity: &EntityRef) -> Message {
        Message::builder().entity(entity).text(" has died.").build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Outcome;

    fn named(id: u64, name: &str) -> EntityRef {
        EntityRef {
            id: EntityId(id),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_builder_merges_text() {
        let message = Message::builder().text("a").text("").text("b").build();
        assert_eq!(message.fragments().len(), 1);
        assert_eq!(message.to_string(), "ab");
    }

    #[test]
    fn test_entities_in_order() {
        let orc = named(1, "Orc");
        let elf = named(2, "Elf");
        let message = narration::dodge(&orc, &elf);
        let ids: Vec<EntityId> = message.entities().map(|e| e.id).collect();
        assert_eq!(ids, vec![EntityId(2), EntityId(1)]);
        assert!(message.mentions(EntityId(1)));
        assert!(!message.mentions(EntityId(3)));
    }

    #[test]
    fn test_narration_lines() {
        let orc = named(1, "Orc");
        let elf = named(2, "Elf");

        assert_eq!(
            narration::critical_miss(&orc, 0).to_string(),
            "Orc missed and attacked itself for 0 damage."
        );
        assert_eq!(narration::miss(&orc).to_string(), "Orc missed its target.");
        assert_eq!(
            narration::hit(Outcome::Hit, &orc, &elf, 5).to_string(),
            "Orc attacked Elf for 5 damage."
        );
        assert_eq!(
            narration::hit(Outcome::HeavyHit, &orc, &elf, 10).to_string(),
            "Orc landed a heavy attack against Elf for 10 damage."
        );
        assert_eq!(
            narration::hit(Outcome::CriticalHit, &orc, &elf, 12).to_string(),
            "Orc landed a critical attack against Elf for 12 damage."
        );
        assert_eq!(
            narration::dodge(&orc, &elf).to_string(),
            "Elf dodged Orc's attack."
        );
        assert_eq!(narration::death(&elf).to_string(), "Elf has died.");
    }

    #[test]
    fn test_entity_ref_of() {
        let entity = Entity::new(EntityId(9), "Troll");
        assert_eq!(EntityRef::of(&entity), named(9, "Troll"));
    }
}
