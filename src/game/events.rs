//! Game events and the event log
//!
//! Executors, effects and state-based actions record events; the trigger
//! matcher scans for triggered abilities whose condition matches each new
//! event. Events map 1:1 onto `TriggerCondition` where a condition exists;
//! bookkeeping events (ability activation, player loss) have no condition
//! and simply never match.

use crate::core::{CardId, PlayerId, TriggerCondition};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CreatureEntersBattlefield { card: CardId, controller: PlayerId },
    CreatureDies { card: CardId, controller: PlayerId },
    SpellCast { card: CardId, controller: PlayerId },
    LandPlayed { card: CardId, player: PlayerId },
    UpkeepStart { player: PlayerId },
    TurnEnd { player: PlayerId },
    AbilityActivated { card: CardId, player: PlayerId },
    PlayerLoses { player: PlayerId },
}

impl GameEvent {
    /// Does this event satisfy the given trigger condition?
    pub fn matches(&self, condition: TriggerCondition) -> bool {
        matches!(
            (self, condition),
            (GameEvent::CreatureEntersBattlefield { .. }, TriggerCondition::WhenCreatureEnters)
                | (GameEvent::CreatureDies { .. }, TriggerCondition::WhenCreatureDies)
                | (GameEvent::SpellCast { .. }, TriggerCondition::WhenSpellCast)
                | (GameEvent::LandPlayed { .. }, TriggerCondition::WhenLandPlayed)
                | (GameEvent::UpkeepStart { .. }, TriggerCondition::AtBeginningOfUpkeep)
                | (GameEvent::TurnEnd { .. }, TriggerCondition::AtEndOfTurn)
        )
    }
}
