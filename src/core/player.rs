//! Player representation

use crate::core::{ManaPool, PlayerId, PlayerName};
use crate::zones::PlayerZones;
use serde::{Deserialize, Serialize};

/// A player in the game.
///
/// Players are created once at game start and mutated throughout; a player
/// who loses is flagged `has_lost` rather than removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: PlayerName,

    /// Life total; the player loses when it drops to 0 or below.
    pub life: i32,

    /// The five zones this player owns.
    pub zones: PlayerZones,

    pub mana_pool: ManaPool,

    /// Lands played this turn; resets at turn start.
    pub lands_played_this_turn: u8,

    /// Times this player's commander has been cast from the command zone.
    /// Each prior cast raises the commander's effective cost by 2.
    pub commander_tax: u32,

    pub has_lost: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<PlayerName>, starting_life: i32) -> Self {
        Player {
            id,
            name: name.into(),
            life: starting_life,
            zones: PlayerZones::new(),
            mana_pool: ManaPool::new(),
            lands_played_this_turn: 0,
            commander_tax: 0,
            has_lost: false,
        }
    }

    pub fn gain_life(&mut self, amount: i32) {
        self.life += amount;
    }

    pub fn lose_life(&mut self, amount: i32) {
        self.life -= amount;
    }

    pub fn can_play_land(&self) -> bool {
        self.lands_played_this_turn < 1
    }

    /// Effective cost of casting this player's commander from the command
    /// zone: base cost plus 2 per tax level.
    pub fn commander_cost(&self, base_cost: u32) -> u32 {
        base_cost + 2 * self.commander_tax
    }

    /// Per-turn reset at the start of this player's turn.
    pub fn begin_turn(&mut self) {
        self.lands_played_this_turn = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let player = Player::new(PlayerId::new(0), "Alice", 20);
        assert_eq!(player.life, 20);
        assert!(!player.has_lost);
        assert!(player.can_play_land());
    }

    #[test]
    fn test_commander_tax() {
        let mut player = Player::new(PlayerId::new(0), "Bob", 40);
        assert_eq!(player.commander_cost(3), 3);
        player.commander_tax += 1;
        assert_eq!(player.commander_cost(3), 5);
        player.commander_tax += 1;
        assert_eq!(player.commander_cost(3), 7);
    }

    #[test]
    fn test_lands_reset() {
        let mut player = Player::new(PlayerId::new(0), "Carol", 20);
        player.lands_played_this_turn = 1;
        assert!(!player.can_play_land());
        player.begin_turn();
        assert!(player.can_play_land());
    }
}
