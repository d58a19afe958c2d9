//! Decision providers
//!
//! The engine asks providers for decisions; it never blocks. A provider
//! that cannot answer synchronously (a human at a UI) returns `None`, and
//! the engine suspends until the decision arrives out of band.

use crate::game::action::PlayerAction;
use crate::game::view::GameStateView;
use std::collections::VecDeque;

pub trait DecisionProvider {
    /// The next action for this player, or `None` if the decision must
    /// come from outside the engine.
    fn decide(&mut self, view: &GameStateView<'_>) -> Option<PlayerAction>;
}

/// Placeholder for an external human player; always suspends.
#[derive(Debug, Default)]
pub struct HumanProvider;

impl DecisionProvider for HumanProvider {
    fn decide(&mut self, _view: &GameStateView<'_>) -> Option<PlayerAction> {
        None
    }
}

/// Bot that always passes priority.
#[derive(Debug, Default)]
pub struct PassBot;

impl DecisionProvider for PassBot {
    fn decide(&mut self, _view: &GameStateView<'_>) -> Option<PlayerAction> {
        Some(PlayerAction::Pass)
    }
}

/// Bot that plays a fixed script of actions, then passes forever.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    script: VecDeque<PlayerAction>,
}

impl ScriptedProvider {
    pub fn new(actions: impl IntoIterator<Item = PlayerAction>) -> Self {
        ScriptedProvider {
            script: actions.into_iter().collect(),
        }
    }

    pub fn push(&mut self, action: PlayerAction) {
        self.script.push_back(action);
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl DecisionProvider for ScriptedProvider {
    fn decide(&mut self, _view: &GameStateView<'_>) -> Option<PlayerAction> {
        Some(self.script.pop_front().unwrap_or(PlayerAction::Pass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::game::state::GameState;

    #[test]
    fn test_scripted_provider_exhausts_to_pass() {
        let state = GameState::new(1, 1, "Alice", "Bob");
        let view = GameStateView::new(&state, PlayerId::new(0));
        let mut bot = ScriptedProvider::new([PlayerAction::Pass]);
        assert_eq!(bot.decide(&view), Some(PlayerAction::Pass));
        assert_eq!(bot.decide(&view), Some(PlayerAction::Pass));
        assert_eq!(bot.remaining(), 0);
    }

    #[test]
    fn test_human_provider_suspends() {
        let state = GameState::new(1, 1, "Alice", "Bob");
        let view = GameStateView::new(&state, PlayerId::new(0));
        assert_eq!(HumanProvider.decide(&view), None);
    }
}
