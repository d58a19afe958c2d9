//! Read-only views of the game
//!
//! `GameStateView` is what decision providers see: full read access scoped
//! to one player's perspective, no mutation. `PublicState` is the
//! serializable projection for outbound transport; it hides hidden zones
//! behind counts.

use crate::core::{CardId, PlayerId};
use crate::game::phase::Step;
use crate::game::stack_item::StackItemKind;
use crate::game::state::GameState;
use serde::{Deserialize, Serialize};

/// Borrowed, read-only view for one player's decisions.
pub struct GameStateView<'a> {
    state: &'a GameState,
    player: PlayerId,
}

impl<'a> GameStateView<'a> {
    pub fn new(state: &'a GameState, player: PlayerId) -> Self {
        GameStateView { state, player }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player
    }

    pub fn step(&self) -> Step {
        self.state.current_step()
    }

    pub fn turn_number(&self) -> u32 {
        self.state.turn.turn_number
    }

    pub fn is_active_player(&self) -> bool {
        self.state.active_player_id() == self.player
    }

    pub fn stack_size(&self) -> usize {
        self.state.stack.len()
    }

    pub fn life(&self, player: PlayerId) -> i32 {
        self.state
            .player(player)
            .map(|p| p.life)
            .unwrap_or(0)
    }

    pub fn mana_available(&self) -> u32 {
        self.state
            .player(self.player)
            .map(|p| p.mana_pool.total())
            .unwrap_or(0)
    }

    pub fn hand(&self) -> &[CardId] {
        self.state
            .player(self.player)
            .map(|p| p.zones.hand.cards.as_slice())
            .unwrap_or(&[])
    }

    pub fn battlefield(&self, player: PlayerId) -> &[CardId] {
        self.state
            .player(player)
            .map(|p| p.zones.battlefield.cards.as_slice())
            .unwrap_or(&[])
    }

    pub fn card(&self, id: CardId) -> Option<&crate::core::Card> {
        self.state.cards.get(id).ok()
    }

    /// Top `count` cards of this player's own library, topmost first.
    /// Scry-style decisions read from here.
    pub fn library_top(&self, count: usize) -> Vec<CardId> {
        self.state
            .player(self.player)
            .map(|p| {
                p.zones
                    .library
                    .cards
                    .iter()
                    .rev()
                    .take(count)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn attackers(&self) -> &[CardId] {
        &self.state.combat.attackers
    }
}

/// Serializable snapshot safe to send to any observer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicState {
    pub game_id: u64,
    pub turn: u32,
    pub step: Step,
    pub active_player: PlayerId,
    pub stack: Vec<StackEntrySummary>,
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackEntrySummary {
    pub kind: StackItemKind,
    pub source: CardId,
    pub controller: PlayerId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub life: i32,
    pub has_lost: bool,
    pub hand_count: usize,
    pub library_count: usize,
    pub battlefield: Vec<CardSummary>,
    pub graveyard: Vec<CardSummary>,
    pub command_zone: Vec<CardSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSummary {
    pub id: CardId,
    pub name: String,
    pub tapped: bool,
    pub damage: i32,
    pub power: Option<i32>,
    pub toughness: Option<i32>,
}

impl PublicState {
    pub fn snapshot(state: &GameState) -> Self {
        let stack = state
            .stack
            .iter()
            .map(|item| StackEntrySummary {
                kind: item.kind,
                source: item.source,
                controller: item.controller,
            })
            .collect();
        let players = state
            .players
            .iter()
            .map(|player| PlayerSummary {
                id: player.id,
                name: player.name.to_string(),
                life: player.life,
                has_lost: player.has_lost,
                hand_count: player.zones.hand.len(),
                library_count: player.zones.library.len(),
                battlefield: summarize(state, &player.zones.battlefield.cards),
                graveyard: summarize(state, &player.zones.graveyard.cards),
                command_zone: summarize(state, &player.zones.command.cards),
            })
            .collect();
        PublicState {
            game_id: state.game_id,
            turn: state.turn.turn_number,
            step: state.current_step(),
            active_player: state.active_player_id(),
            stack,
            players,
        }
    }
}

fn summarize(state: &GameState, cards: &[CardId]) -> Vec<CardSummary> {
    cards
        .iter()
        .filter_map(|&id| state.cards.get(id).ok())
        .map(|card| CardSummary {
            id: card.id,
            name: card.name.to_string(),
            tapped: card.tapped,
            damage: card.damage,
            power: card.power.map(|p| p + card.power_bonus),
            toughness: card.toughness.map(|t| t + card.toughness_bonus),
        })
        .collect()
}
