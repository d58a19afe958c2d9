//! Central game state
//!
//! `GameState` owns every card, both players, the turn structure, the
//! stack, and the event history. All zone movement funnels through
//! `move_card` so the battlefield-exit reset and the exclusivity invariant
//! hold no matter which subsystem is doing the moving.

use crate::core::{Card, CardId, CardStore, Player, PlayerId};
use crate::error::EngineError;
use crate::game::combat::CombatState;
use crate::game::events::GameEvent;
use crate::game::logger::GameLogger;
use crate::game::phase::{Step, TurnStructure};
use crate::game::stack_item::StackItem;
use crate::game::triggers::PendingTrigger;
use crate::zones::Zone;
use crate::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

pub const STARTING_LIFE: i32 = 20;
pub const COMMANDER_STARTING_LIFE: i32 = 40;

#[derive(Debug, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: u64,
    pub cards: CardStore,
    pub players: Vec<Player>,
    pub turn: TurnStructure,
    pub combat: CombatState,
    /// Spells and abilities waiting to resolve; last element is the top.
    pub stack: Vec<StackItem>,
    /// Append-only history of observable events this game.
    pub events: Vec<GameEvent>,
    /// Triggers that have fired but not yet been put on the stack.
    pub pending_triggers: Vec<PendingTrigger>,
    /// Players who have passed priority since the last state change. The
    /// current all-pass scan is complete once every live player is here,
    /// so the priority loop carries no state of its own across calls.
    pub passed_priority: Vec<PlayerId>,
    /// Seeded RNG for shuffles; RefCell so read-mostly callers can shuffle
    /// without threading &mut through every signature.
    pub rng: RefCell<ChaCha12Rng>,
    #[serde(skip, default)]
    pub logger: GameLogger,
}

impl GameState {
    /// Two-player game with empty zones. Decks are loaded by the caller.
    pub fn new(game_id: u64, seed: u64, name1: &str, name2: &str) -> Self {
        Self::with_starting_life(game_id, seed, name1, name2, STARTING_LIFE)
    }

    pub fn with_starting_life(
        game_id: u64,
        seed: u64,
        name1: &str,
        name2: &str,
        starting_life: i32,
    ) -> Self {
        let players = vec![
            Player::new(PlayerId::new(0), name1, starting_life),
            Player::new(PlayerId::new(1), name2, starting_life),
        ];
        GameState {
            game_id,
            cards: CardStore::new(),
            players,
            turn: TurnStructure::new(0),
            combat: CombatState::new(),
            stack: Vec::new(),
            events: Vec::new(),
            pending_triggers: Vec::new(),
            passed_priority: Vec::new(),
            rng: RefCell::new(ChaCha12Rng::seed_from_u64(seed)),
            logger: GameLogger::new(),
        }
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .get(id.index())
            .ok_or(EngineError::EntityNotFound(id.as_u32()))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .get_mut(id.index())
            .ok_or(EngineError::EntityNotFound(id.as_u32()))
    }

    pub fn active_player_id(&self) -> PlayerId {
        self.players[self.turn.active_player_idx].id
    }

    /// The other player in a two-player game.
    pub fn opponent_of(&self, id: PlayerId) -> PlayerId {
        PlayerId::new(1 - id.as_u32() % 2)
    }

    /// Create a fresh card owned by `owner`, register it, and return its id.
    /// The card belongs to no zone until the caller places it.
    pub fn mint_card(&mut self, name: &str, owner: PlayerId) -> CardId {
        let id = self.cards.next_id();
        self.cards.insert(Card::new(id, name, owner));
        id
    }

    /// Zone the card currently occupies, if any.
    pub fn zone_of(&self, card_id: CardId) -> Option<(PlayerId, Zone)> {
        for player in &self.players {
            if let Some(zone) = player.zones.zone_of(card_id) {
                return Some((player.id, zone));
            }
        }
        None
    }

    /// Move a card between zones of its owner. Removes from the source
    /// before adding to the destination, so a card is never in two zones.
    /// Leaving the battlefield clears all battlefield-only state.
    pub fn move_card(&mut self, card_id: CardId, from: Zone, to: Zone) -> Result<()> {
        let owner = self.cards.get(card_id)?.owner;
        let leaving_battlefield = from == Zone::Battlefield && to != Zone::Battlefield;
        let zones = &mut self.player_mut(owner)?.zones;
        if !zones.get_mut(from).remove(card_id) {
            return Err(EngineError::Internal(format!(
                "{card_id} not in {from:?} during zone transfer"
            )));
        }
        zones.get_mut(to).add(card_id);
        if leaving_battlefield {
            self.cards.get_mut(card_id)?.reset_battlefield_state();
        }
        Ok(())
    }

    /// Move the top card of the library to hand. Returns the drawn card, or
    /// None if the library was empty (empty-library draws are not a loss
    /// condition in this engine).
    pub fn draw_card(&mut self, player_id: PlayerId) -> Result<Option<CardId>> {
        let zones = &mut self.player_mut(player_id)?.zones;
        match zones.library.draw_top() {
            Some(card_id) => {
                zones.hand.add(card_id);
                crate::log_verbose!(self.logger, "{player_id} draws {card_id}");
                Ok(Some(card_id))
            }
            None => {
                self.logger
                    .normal(&format!("{player_id} draws from an empty library"));
                Ok(None)
            }
        }
    }

    pub fn shuffle_library(&mut self, player_id: PlayerId) -> Result<()> {
        let rng = self.rng.get_mut();
        self.players
            .get_mut(player_id.index())
            .ok_or(EngineError::EntityNotFound(player_id.as_u32()))?
            .zones
            .library
            .shuffle(rng);
        Ok(())
    }

    /// Start-of-turn maintenance for the active player: untap everything,
    /// clear summoning sickness, reset the land count, and emit upkeep.
    pub fn begin_turn_maintenance(&mut self) -> Result<()> {
        let active = self.active_player_id();
        let battlefield: Vec<CardId> = self
            .player(active)?
            .zones
            .battlefield
            .cards
            .clone();
        for card_id in battlefield {
            let card = self.cards.get_mut(card_id)?;
            card.untap();
            card.summoning_sick = false;
        }
        self.player_mut(active)?.begin_turn();
        self.logger.normal(&format!(
            "turn {} begins for {active}",
            self.turn.turn_number
        ));
        Ok(())
    }

    /// Cleanup-step maintenance: clear damage and until-end-of-turn
    /// bonuses from all permanents, and empty both mana pools.
    pub fn cleanup_maintenance(&mut self) -> Result<()> {
        let all: Vec<CardId> = self
            .players
            .iter()
            .flat_map(|p| p.zones.battlefield.cards.iter().copied())
            .collect();
        for card_id in all {
            let card = self.cards.get_mut(card_id)?;
            card.damage = 0;
            card.damage_shield = 0;
            card.power_bonus = 0;
            card.toughness_bonus = 0;
        }
        for player in &mut self.players {
            player.mana_pool.clear();
        }
        Ok(())
    }

    /// Record that `player` passed priority without changing the state.
    pub fn mark_passed(&mut self, player: PlayerId) {
        if !self.passed_priority.contains(&player) {
            self.passed_priority.push(player);
        }
    }

    pub fn has_passed(&self, player: PlayerId) -> bool {
        self.passed_priority.contains(&player)
    }

    /// Every state change hands all players a fresh round of priority.
    pub fn clear_passes(&mut self) {
        self.passed_priority.clear();
    }

    /// Step predicate used by legality checks: is it a main step of the
    /// active player's turn with nothing on the stack?
    pub fn sorcery_speed_ok(&self, player_id: PlayerId) -> bool {
        self.active_player_id() == player_id
            && self.turn.current_step.is_main()
            && self.stack.is_empty()
    }

    pub fn current_step(&self) -> Step {
        self.turn.current_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardType;
    use crate::core::TypeLine;

    fn two_card_state() -> (GameState, CardId, CardId) {
        let mut state = GameState::new(1, 42, "Alice", "Bob");
        let a = state.mint_card("Grizzly Bears", PlayerId::new(0));
        let b = state.mint_card("Island", PlayerId::new(0));
        state.players[0].zones.library.add(a);
        state.players[0].zones.library.add(b);
        (state, a, b)
    }

    #[test]
    fn test_draw_moves_top_of_library() {
        let (mut state, a, b) = two_card_state();
        // b was added last, so it is on top
        assert_eq!(state.draw_card(PlayerId::new(0)).unwrap(), Some(b));
        assert_eq!(state.draw_card(PlayerId::new(0)).unwrap(), Some(a));
        assert_eq!(state.draw_card(PlayerId::new(0)).unwrap(), None);
        assert_eq!(state.players[0].zones.hand.len(), 2);
    }

    #[test]
    fn test_move_card_is_exclusive() {
        let (mut state, a, _) = two_card_state();
        state.move_card(a, Zone::Library, Zone::Hand).unwrap();
        assert!(state.players[0].zones.hand.contains(a));
        assert!(!state.players[0].zones.library.contains(a));
        // moving from the wrong source zone is an internal error
        assert!(state.move_card(a, Zone::Library, Zone::Graveyard).is_err());
    }

    #[test]
    fn test_leaving_battlefield_resets_state() {
        let mut state = GameState::new(1, 42, "Alice", "Bob");
        let id = state.mint_card("Grizzly Bears", PlayerId::new(0));
        {
            let card = state.cards.get_mut(id).unwrap();
            card.type_line = TypeLine::of(CardType::Creature);
            card.power = Some(2);
            card.toughness = Some(2);
            card.damage = 2;
            card.tapped = true;
        }
        state.players[0].zones.battlefield.add(id);
        state.move_card(id, Zone::Battlefield, Zone::Graveyard).unwrap();
        let card = state.cards.get(id).unwrap();
        assert_eq!(card.damage, 0);
        assert!(!card.tapped);
    }

    #[test]
    fn test_opponent_of() {
        let state = GameState::new(1, 42, "Alice", "Bob");
        assert_eq!(state.opponent_of(PlayerId::new(0)), PlayerId::new(1));
        assert_eq!(state.opponent_of(PlayerId::new(1)), PlayerId::new(0));
    }
}
