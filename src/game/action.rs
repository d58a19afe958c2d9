//! Player actions
//!
//! The single inbound vocabulary for both human and bot decisions. Every
//! action passes through legality checking before execution; the same
//! enum is what decision providers return and what the engine logs.

use crate::core::CardId;
use crate::effects::Target;
use crate::game::combat::BlockAssignment;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Put a land from hand onto the battlefield (no stack).
    PlayLand { card: CardId },
    /// Cast a spell from hand, or the commander from the command zone.
    CastSpell {
        card: CardId,
        from_command_zone: bool,
        targets: Vec<Target>,
    },
    /// Activate an ability of a permanent by index into its ability list.
    ActivateAbility {
        card: CardId,
        ability_index: usize,
        targets: Vec<Target>,
    },
    DeclareAttackers { attackers: Vec<CardId> },
    DeclareBlockers { assignments: Vec<BlockAssignment> },
    /// Decline to act; also the only legal choice outside decision points.
    Pass,
}

impl PlayerAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::PlayLand { .. } => ActionKind::PlayLand,
            PlayerAction::CastSpell { .. } => ActionKind::CastSpell,
            PlayerAction::ActivateAbility { .. } => ActionKind::ActivateAbility,
            PlayerAction::DeclareAttackers { .. } => ActionKind::DeclareAttackers,
            PlayerAction::DeclareBlockers { .. } => ActionKind::DeclareBlockers,
            PlayerAction::Pass => ActionKind::Pass,
        }
    }
}

/// Discriminant-only view of an action, for error messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    PlayLand,
    CastSpell,
    ActivateAbility,
    DeclareAttackers,
    DeclareBlockers,
    Pass,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::PlayLand => "play land",
            ActionKind::CastSpell => "cast spell",
            ActionKind::ActivateAbility => "activate ability",
            ActionKind::DeclareAttackers => "declare attackers",
            ActionKind::DeclareBlockers => "declare blockers",
            ActionKind::Pass => "pass",
        };
        write!(f, "{s}")
    }
}
