//! Turn phases and steps

use serde::{Deserialize, Serialize};

/// Major phases of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Beginning,
    PreCombatMain,
    Combat,
    PostCombatMain,
    Ending,
}

/// Specific steps within phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    // Beginning phase
    Untap,
    Upkeep,
    Draw,

    // Pre-combat main
    Main1,

    // Combat
    BeginCombat,
    DeclareAttackers,
    DeclareBlockers,
    CombatDamage,
    EndCombat,

    // Post-combat main
    Main2,

    // Ending phase
    End,
    Cleanup,
}

impl Step {
    pub fn phase(&self) -> Phase {
        match self {
            Step::Untap | Step::Upkeep | Step::Draw => Phase::Beginning,
            Step::Main1 => Phase::PreCombatMain,
            Step::BeginCombat
            | Step::DeclareAttackers
            | Step::DeclareBlockers
            | Step::CombatDamage
            | Step::EndCombat => Phase::Combat,
            Step::Main2 => Phase::PostCombatMain,
            Step::End | Step::Cleanup => Phase::Ending,
        }
    }

    pub fn next(&self) -> Option<Step> {
        match self {
            Step::Untap => Some(Step::Upkeep),
            Step::Upkeep => Some(Step::Draw),
            Step::Draw => Some(Step::Main1),
            Step::Main1 => Some(Step::BeginCombat),
            Step::BeginCombat => Some(Step::DeclareAttackers),
            Step::DeclareAttackers => Some(Step::DeclareBlockers),
            Step::DeclareBlockers => Some(Step::CombatDamage),
            Step::CombatDamage => Some(Step::EndCombat),
            Step::EndCombat => Some(Step::Main2),
            Step::Main2 => Some(Step::End),
            Step::End => Some(Step::Cleanup),
            Step::Cleanup => None,
        }
    }

    /// Sorcery-speed spells and lands are restricted to the main phases.
    pub fn is_main(&self) -> bool {
        matches!(self, Step::Main1 | Step::Main2)
    }
}

/// Current turn structure.
///
/// The priority loop never advances turns; a host drives step progression
/// through `GameState` helpers, so this holds no hidden continuation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnStructure {
    /// Current turn number (starts at 1).
    pub turn_number: u32,

    pub current_step: Step,

    /// Index of the active player in `GameState::players`.
    pub active_player_idx: usize,

    /// Extra turns granted by effects, to be consumed by the host.
    pub pending_extra_turns: u8,
}

impl TurnStructure {
    pub fn new(starting_idx: usize) -> Self {
        TurnStructure {
            turn_number: 1,
            current_step: Step::Untap,
            active_player_idx: starting_idx,
            pending_extra_turns: 0,
        }
    }

    pub fn current_phase(&self) -> Phase {
        self.current_step.phase()
    }

    /// Advance to the next step; returns false at end of turn.
    pub fn advance_step(&mut self) -> bool {
        if let Some(next) = self.current_step.next() {
            self.current_step = next;
            true
        } else {
            false
        }
    }

    pub fn next_turn(&mut self, next_idx: usize) {
        self.turn_number += 1;
        self.current_step = Step::Untap;
        self.active_player_idx = next_idx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_phases() {
        assert_eq!(Step::Upkeep.phase(), Phase::Beginning);
        assert_eq!(Step::Main1.phase(), Phase::PreCombatMain);
        assert_eq!(Step::DeclareBlockers.phase(), Phase::Combat);
        assert_eq!(Step::Cleanup.phase(), Phase::Ending);
    }

    #[test]
    fn test_main_steps() {
        assert!(Step::Main1.is_main());
        assert!(Step::Main2.is_main());
        assert!(!Step::CombatDamage.is_main());
    }

    #[test]
    fn test_turn_progression() {
        let mut turn = TurnStructure::new(0);
        assert_eq!(turn.turn_number, 1);
        assert_eq!(turn.current_step, Step::Untap);

        while turn.advance_step() {}
        assert_eq!(turn.current_step, Step::Cleanup);

        turn.next_turn(1);
        assert_eq!(turn.turn_number, 2);
        assert_eq!(turn.active_player_idx, 1);
        assert_eq!(turn.current_step, Step::Untap);
    }
}
