//! Rules engine facade
//!
//! Owns the game state, the effect registry, the replacement rules, and a
//! decision provider per player. All outside interaction goes through
//! `process_action` and the turn/step drivers; the engine never blocks
//! waiting for input, it suspends instead.

use crate::core::PlayerId;
use crate::effects::{CustomEffectFn, EffectRegistry};
use crate::error::EngineError;
use crate::game::action::PlayerAction;
use crate::game::events::GameEvent;
use crate::game::legal;
use crate::game::phase::Step;
use crate::game::priority::{DecisionProvider, HumanProvider};
use crate::game::replace::{ReplacementRule, ReplacementRules};
use crate::game::state::GameState;
use crate::game::view::GameStateView;
use crate::game::{execute, sba, stack, triggers};
use crate::Result;

/// Hard bound on priority-loop iterations per driver call. A well-formed
/// game never approaches it; hitting it means a runaway loop.
const MAX_ITERATIONS: usize = 10_000;

/// How a driver call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The stack is empty and every player passed, or the game is over.
    Completed,
    /// A decision provider needs external input; resume by calling
    /// `process_action` with that player's choice.
    Suspended,
}

pub struct RulesEngine {
    pub game: GameState,
    registry: EffectRegistry,
    replacements: ReplacementRules,
    providers: Vec<Box<dyn DecisionProvider>>,
}

impl RulesEngine {
    pub fn new(game: GameState) -> Self {
        let providers: Vec<Box<dyn DecisionProvider>> = game
            .players
            .iter()
            .map(|_| Box::new(HumanProvider) as Box<dyn DecisionProvider>)
            .collect();
        RulesEngine {
            game,
            registry: EffectRegistry::with_builtins(),
            replacements: ReplacementRules::new(),
            providers,
        }
    }

    pub fn set_provider(&mut self, player: PlayerId, provider: Box<dyn DecisionProvider>) {
        self.providers[player.index()] = provider;
    }

    /// Register a card-specific effect under a stable name.
    pub fn register_effect(&mut self, name: impl Into<String>, applier: CustomEffectFn) {
        self.registry.register(name, applier);
    }

    pub fn add_replacement(&mut self, rule: ReplacementRule) {
        self.replacements.add(rule);
    }

    pub fn remove_replacement(&mut self, rule: &ReplacementRule) {
        self.replacements.remove(rule);
    }

    /// Is exactly one player still standing?
    pub fn winner(&self) -> Option<PlayerId> {
        let mut standing = self.game.players.iter().filter(|p| !p.has_lost);
        match (standing.next(), standing.next()) {
            (Some(winner), None) => Some(winner.id),
            _ => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game.players.iter().filter(|p| !p.has_lost).count() <= 1
    }

    /// Check, apply, and follow through on one external action, then run
    /// the priority loop until it completes or suspends.
    pub fn process_action(&mut self, player: PlayerId, action: &PlayerAction) -> Result<Outcome> {
        self.apply_action(player, action)?;
        self.run_priority()
    }

    /// Legality check, execution, state-based actions, trigger flush. The
    /// non-recursive core shared by `process_action` and the loop.
    fn apply_action(&mut self, player: PlayerId, action: &PlayerAction) -> Result<()> {
        legal::check_legal(&self.game, player, action)?;
        if matches!(action, PlayerAction::Pass) {
            // A pass mutates nothing; it only advances the all-pass scan.
            self.game.mark_passed(player);
            return Ok(());
        }
        execute::execute(
            &mut self.game,
            &self.registry,
            &self.replacements,
            player,
            action,
        )?;
        self.game.clear_passes();
        sba::check(&mut self.game)?;
        triggers::flush_pending(&mut self.game);
        Ok(())
    }

    /// Offer priority in turn order until every live player passes on an
    /// empty stack. When all pass on a non-empty stack, resolve the top
    /// item and offer priority again.
    pub fn run_priority(&mut self) -> Result<Outcome> {
        for _ in 0..MAX_ITERATIONS {
            if self.is_game_over() {
                return Ok(Outcome::Completed);
            }
            match self.offer_priority_round()? {
                RoundResult::AllPassed => {
                    self.game.clear_passes();
                    if self.game.stack.is_empty() {
                        return Ok(Outcome::Completed);
                    }
                    stack::resolve_top(&mut self.game, &self.registry, &self.replacements)?;
                    sba::check(&mut self.game)?;
                    triggers::flush_pending(&mut self.game);
                }
                RoundResult::Acted => {}
                RoundResult::Suspended => return Ok(Outcome::Suspended),
            }
        }
        Err(EngineError::Internal(
            "priority loop exceeded its iteration bound".into(),
        ))
    }

    /// One scan over the players in priority order (active player first).
    fn offer_priority_round(&mut self) -> Result<RoundResult> {
        let player_count = self.game.players.len();
        let start = self.game.turn.active_player_idx;
        for offset in 0..player_count {
            let idx = (start + offset) % player_count;
            let pid = self.game.players[idx].id;
            if self.game.players[idx].has_lost || self.game.has_passed(pid) {
                continue;
            }
            let decision = {
                let view = GameStateView::new(&self.game, pid);
                self.providers[idx].decide(&view)
            };
            match decision {
                None => return Ok(RoundResult::Suspended),
                Some(PlayerAction::Pass) => {
                    self.game.mark_passed(pid);
                    continue;
                }
                Some(action) => {
                    // Illegal bot actions are logged and treated as a pass
                    // so one bad decision cannot wedge the loop.
                    match self.apply_action(pid, &action) {
                        Ok(()) => return Ok(RoundResult::Acted),
                        Err(EngineError::IllegalAction { kind, reason }) => {
                            self.game.logger.warn(&format!(
                                "{pid} attempted illegal {kind}: {reason}"
                            ));
                            self.game.mark_passed(pid);
                            continue;
                        }
                        Err(other) => return Err(other),
                    }
                }
            }
        }
        Ok(RoundResult::AllPassed)
    }

    /// Advance to the next step (rolling into the next turn after
    /// cleanup), run its turn-based side effects, then run priority.
    pub fn advance_step(&mut self) -> Result<Outcome> {
        // A new step is a new round of priority for everyone.
        self.game.clear_passes();
        if !self.game.turn.advance_step() {
            let next_idx = if self.game.turn.pending_extra_turns > 0 {
                self.game.turn.pending_extra_turns -= 1;
                self.game.turn.active_player_idx
            } else {
                (self.game.turn.active_player_idx + 1) % self.game.players.len()
            };
            self.game.turn.next_turn(next_idx);
        }
        self.on_step_entry()?;
        sba::check(&mut self.game)?;
        triggers::flush_pending(&mut self.game);
        self.run_priority()
    }

    fn on_step_entry(&mut self) -> Result<()> {
        let active = self.game.active_player_id();
        match self.game.current_step() {
            Step::Untap => self.game.begin_turn_maintenance()?,
            Step::Upkeep => {
                triggers::record_event(&mut self.game, GameEvent::UpkeepStart { player: active })?
            }
            Step::Draw => {
                // The starting player skips the very first draw.
                if self.game.turn.turn_number > 1 {
                    self.game.draw_card(active)?;
                }
            }
            Step::CombatDamage => {
                // Reached when the defender declared no blockers; all
                // attackers connect unblocked.
                if self.game.combat.has_attackers() {
                    execute::resolve_combat_damage(&mut self.game, &self.replacements)?;
                    self.game.combat.clear();
                }
            }
            Step::End => {
                triggers::record_event(&mut self.game, GameEvent::TurnEnd { player: active })?
            }
            Step::Cleanup => self.game.cleanup_maintenance()?,
            _ => {}
        }
        Ok(())
    }

    /// Drive a full turn with the installed providers. Stops early if a
    /// provider suspends or the game ends.
    pub fn run_turn(&mut self) -> Result<Outcome> {
        let starting_turn = self.game.turn.turn_number;
        while self.game.turn.turn_number == starting_turn {
            match self.advance_step()? {
                Outcome::Suspended => return Ok(Outcome::Suspended),
                Outcome::Completed => {
                    if self.is_game_over() {
                        return Ok(Outcome::Completed);
                    }
                }
            }
        }
        Ok(Outcome::Completed)
    }
}

enum RoundResult {
    AllPassed,
    Acted,
    Suspended,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::priority::PassBot;

    fn bot_engine() -> RulesEngine {
        let game = GameState::new(1, 17, "Alice", "Bob");
        let mut engine = RulesEngine::new(game);
        engine.set_provider(PlayerId::new(0), Box::new(PassBot));
        engine.set_provider(PlayerId::new(1), Box::new(PassBot));
        engine
    }

    #[test]
    fn test_empty_stack_completes() {
        let mut engine = bot_engine();
        assert_eq!(engine.run_priority().unwrap(), Outcome::Completed);
    }

    #[test]
    fn test_human_provider_suspends_with_stack_work() {
        let game = GameState::new(1, 17, "Alice", "Bob");
        let mut engine = RulesEngine::new(game);
        let spell = engine.game.mint_card("Giant Growth", PlayerId::new(0));
        engine.game.stack.push(crate::game::StackItem::spell(
            spell,
            PlayerId::new(0),
            vec![],
        ));
        assert_eq!(engine.run_priority().unwrap(), Outcome::Suspended);
        // Suspension left the stack untouched.
        assert_eq!(engine.game.stack.len(), 1);
    }

    #[test]
    fn test_bots_pass_until_stack_resolves() {
        let mut engine = bot_engine();
        let spell = engine.game.mint_card("Healing Salve", PlayerId::new(0));
        {
            let card = engine.game.cards.get_mut(spell).unwrap();
            card.type_line = crate::core::TypeLine::of(crate::core::CardType::Instant);
            card.effects
                .push(crate::effects::EffectSpec::GainLife { amount: 3 });
        }
        engine.game.stack.push(crate::game::StackItem::spell(
            spell,
            PlayerId::new(0),
            vec![],
        ));
        assert_eq!(engine.run_priority().unwrap(), Outcome::Completed);
        assert_eq!(engine.game.players[0].life, 23);
        assert!(engine.game.stack.is_empty());
    }

    #[test]
    fn test_external_passes_complete_the_scan() {
        // Two human seats: each externally submitted pass must count
        // toward the all-pass scan so the stack eventually resolves.
        let game = GameState::new(1, 17, "Alice", "Bob");
        let mut engine = RulesEngine::new(game);
        let spell = engine.game.mint_card("Healing Salve", PlayerId::new(0));
        {
            let card = engine.game.cards.get_mut(spell).unwrap();
            card.type_line = crate::core::TypeLine::of(crate::core::CardType::Instant);
            card.effects
                .push(crate::effects::EffectSpec::GainLife { amount: 3 });
        }
        engine.game.stack.push(crate::game::StackItem::spell(
            spell,
            PlayerId::new(0),
            vec![],
        ));
        assert_eq!(engine.run_priority().unwrap(), Outcome::Suspended);
        assert_eq!(
            engine
                .process_action(PlayerId::new(0), &PlayerAction::Pass)
                .unwrap(),
            Outcome::Suspended
        );
        // Bob's pass completes the scan; the spell resolves and priority
        // comes back around on the now-empty stack.
        assert_eq!(
            engine
                .process_action(PlayerId::new(1), &PlayerAction::Pass)
                .unwrap(),
            Outcome::Suspended
        );
        assert!(engine.game.stack.is_empty());
        assert_eq!(engine.game.players[0].life, 23);
        engine
            .process_action(PlayerId::new(0), &PlayerAction::Pass)
            .unwrap();
        assert_eq!(
            engine
                .process_action(PlayerId::new(1), &PlayerAction::Pass)
                .unwrap(),
            Outcome::Completed
        );
    }

    #[test]
    fn test_winner_after_loss() {
        let mut engine = bot_engine();
        engine.game.players[1].life = 0;
        sba::check(&mut engine.game).unwrap();
        assert!(engine.is_game_over());
        assert_eq!(engine.winner(), Some(PlayerId::new(0)));
    }
}
