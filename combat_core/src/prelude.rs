//! Common imports for driving combat

pub use crate::action::{
    Action, ActionReport, AttackAction, AttackReport, DeathAction, GameAction, Resolution,
};
pub use crate::context::{Arena, CombatContext};
pub use crate::hooks::ObserverId;
pub use crate::message::{narration, EntityRef, Message};
pub use crate::outcome::{Outcome, OutcomeTable};
pub use crate::ActionError;

pub use stat_core::prelude::*;
