//! Entity - A named actor with bounded stats and an inventory

use crate::bounded::BoundedStat;
use crate::{StatError, HEALTH};
use gear_core::Inventory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Stable identifier for an entity in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An actor taking part in combat
///
/// Stats are owned by the entity and only reachable through the clamping
/// accessors on [`BoundedStat`]. Death is a flag, not removal: taking the
/// entity out of the world belongs to whoever owns the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    name: String,
    #[serde(default)]
    stats: HashMap<String, BoundedStat>,
    #[serde(default)]
    inventory: Inventory,
    #[serde(default)]
    dead: bool,
}

impl Entity {
    /// Create an entity with no stats and an empty inventory
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Entity {
            id,
            name: name.into(),
            stats: HashMap::new(),
            inventory: Inventory::new(),
            dead: false,
        }
    }

    /// Builder: add or replace a named stat
    pub fn with_stat(mut self, name: impl Into<String>, stat: BoundedStat) -> Self {
        self.insert_stat(name, stat);
        self
    }

    /// Builder: add a full `Health` stat over `[0, max]`
    pub fn with_health(self, max: i32) -> Result<Self, StatError> {
        let health = BoundedStat::new(0, max)?;
        Ok(self.with_stat(HEALTH, health))
    }

    /// Builder: replace the inventory
    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a stat by name
    pub fn stat(&self, name: &str) -> Result<&BoundedStat, StatError> {
        self.stats
            .get(name)
            .ok_or_else(|| StatError::UnknownStat(name.to_string()))
    }

    /// Look up a stat by name for mutation
    pub fn stat_mut(&mut self, name: &str) -> Result<&mut BoundedStat, StatError> {
        self.stats
            .get_mut(name)
            .ok_or_else(|| StatError::UnknownStat(name.to_string()))
    }

    pub fn has_stat(&self, name: &str) -> bool {
        self.stats.contains_key(name)
    }

    /// Add or replace a stat, returning the previous one
    pub fn insert_stat(
        &mut self,
        name: impl Into<String>,
        stat: BoundedStat,
    ) -> Option<BoundedStat> {
        self.stats.insert(name.into(), stat)
    }

    pub fn remove_stat(&mut self, name: &str) -> Option<BoundedStat> {
        self.stats.remove(name)
    }

    /// All stats, sorted by name
    pub fn stats(&self) -> Vec<(&str, &BoundedStat)> {
        let mut stats: Vec<_> = self.stats.iter().map(|(k, v)| (k.as_str(), v)).collect();
        stats.sort_by(|a, b| a.0.cmp(b.0));
        stats
    }

    /// The `Health` stat
    pub fn health(&self) -> Result<&BoundedStat, StatError> {
        self.stat(HEALTH)
    }

    pub fn health_mut(&mut self) -> Result<&mut BoundedStat, StatError> {
        self.stat_mut(HEALTH)
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Put the entity in its terminal state. Returns false if it was already dead.
    pub fn mark_dead(&mut self) -> bool {
        !std::mem::replace(&mut self.dead, true)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
