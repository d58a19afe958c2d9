//! Game zones (Library, Hand, Battlefield, Graveyard, Command)
//!
//! Every player owns one of each zone. A card id appears in at most one zone
//! vector at a time; zone changes are exclusive transfers handled by
//! `GameState::move_card`. Library order matters: top of library is the end
//! of the vector.

use crate::core::CardId;
use serde::{Deserialize, Serialize};

/// The zones a card can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Library,
    Hand,
    Battlefield,
    Graveyard,
    Command,
}

/// An ordered collection of card ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardZone {
    pub cards: Vec<CardId>,
}

impl CardZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, card_id: CardId) {
        self.cards.push(card_id);
    }

    pub fn remove(&mut self, card_id: CardId) -> bool {
        if let Some(pos) = self.cards.iter().position(|&id| id == card_id) {
            // Ordinary remove rather than swap_remove: iteration order must
            // stay deterministic for reproducible games.
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.contains(&card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remove and return the top card (end of the vector).
    pub fn draw_top(&mut self) -> Option<CardId> {
        self.cards.pop()
    }

    pub fn peek_top(&self) -> Option<CardId> {
        self.cards.last().copied()
    }

    /// Put a card on top of the zone (library top).
    pub fn add_to_top(&mut self, card_id: CardId) {
        self.cards.push(card_id);
    }

    pub fn add_to_bottom(&mut self, card_id: CardId) {
        self.cards.insert(0, card_id);
    }

    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }
}

/// The five zones belonging to one player.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerZones {
    pub library: CardZone,
    pub hand: CardZone,
    pub battlefield: CardZone,
    pub graveyard: CardZone,
    pub command: CardZone,
}

impl PlayerZones {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, zone: Zone) -> &CardZone {
        match zone {
            Zone::Library => &self.library,
            Zone::Hand => &self.hand,
            Zone::Battlefield => &self.battlefield,
            Zone::Graveyard => &self.graveyard,
            Zone::Command => &self.command,
        }
    }

    pub fn get_mut(&mut self, zone: Zone) -> &mut CardZone {
        match zone {
            Zone::Library => &mut self.library,
            Zone::Hand => &mut self.hand,
            Zone::Battlefield => &mut self.battlefield,
            Zone::Graveyard => &mut self.graveyard,
            Zone::Command => &mut self.command,
        }
    }

    /// The zone currently holding `card_id`, if any.
    pub fn zone_of(&self, card_id: CardId) -> Option<Zone> {
        for zone in [
            Zone::Library,
            Zone::Hand,
            Zone::Battlefield,
            Zone::Graveyard,
            Zone::Command,
        ] {
            if self.get(zone).contains(card_id) {
                return Some(zone);
            }
        }
        None
    }
}
