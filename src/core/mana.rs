//! Mana colors and the per-player mana pool
//!
//! Costs use a simplified integer model: a card's cost is a single
//! non-negative amount, paid from the pool total. The pool still tracks a
//! per-color breakdown so color information is available to effects and the
//! public-state projection, but payment does not enforce color identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mana colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "W"),
            Color::Blue => write!(f, "U"),
            Color::Black => write!(f, "B"),
            Color::Red => write!(f, "R"),
            Color::Green => write!(f, "G"),
            Color::Colorless => write!(f, "C"),
        }
    }
}

/// Mana pool for a player. Copy-eligible: six u32 counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManaPool {
    pub white: u32,
    pub blue: u32,
    pub black: u32,
    pub red: u32,
    pub green: u32,
    pub colorless: u32,
}

impl ManaPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, color: Color, amount: u32) {
        match color {
            Color::White => self.white += amount,
            Color::Blue => self.blue += amount,
            Color::Black => self.black += amount,
            Color::Red => self.red += amount,
            Color::Green => self.green += amount,
            Color::Colorless => self.colorless += amount,
        }
    }

    pub fn total(&self) -> u32 {
        self.white + self.blue + self.black + self.red + self.green + self.colorless
    }

    pub fn can_pay(&self, amount: u32) -> bool {
        self.total() >= amount
    }

    /// Pay `amount` from the pool total, draining colors in WUBRG-then-
    /// colorless order. Returns the amount by which payment fell short
    /// (0 on success); the pool is untouched on failure.
    pub fn pay(&mut self, amount: u32) -> std::result::Result<(), u32> {
        if !self.can_pay(amount) {
            return Err(amount - self.total());
        }
        let mut remaining = amount;
        for slot in [
            &mut self.white,
            &mut self.blue,
            &mut self.black,
            &mut self.red,
            &mut self.green,
            &mut self.colorless,
        ] {
            let used = remaining.min(*slot);
            *slot -= used;
            remaining -= used;
        }
        debug_assert_eq!(remaining, 0, "failed to drain mana pool");
        Ok(())
    }

    /// Empty the pool (end of step / end of turn).
    pub fn clear(&mut self) {
        *self = ManaPool::new();
    }
}

impl fmt::Display for ManaPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}W {}U {}B {}R {}G {}C",
            self.white, self.blue, self.black, self.red, self.green, self.colorless
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_total() {
        let mut pool = ManaPool::new();
        pool.add(Color::Red, 2);
        pool.add(Color::Blue, 1);
        assert_eq!(pool.red, 2);
        assert_eq!(pool.blue, 1);
        assert_eq!(pool.total(), 3);
    }

    #[test]
    fn test_pay_drains_in_order() {
        let mut pool = ManaPool::new();
        pool.add(Color::White, 1);
        pool.add(Color::Red, 2);

        assert!(pool.pay(2).is_ok());
        // White drains before red.
        assert_eq!(pool.white, 0);
        assert_eq!(pool.red, 1);
        assert_eq!(pool.total(), 1);
    }

    #[test]
    fn test_pay_insufficient_leaves_pool_untouched() {
        let mut pool = ManaPool::new();
        pool.add(Color::Green, 2);

        assert_eq!(pool.pay(5), Err(3));
        assert_eq!(pool.total(), 2);
    }

    #[test]
    fn test_clear() {
        let mut pool = ManaPool::new();
        pool.add(Color::Black, 3);
        pool.clear();
        assert_eq!(pool.total(), 0);
    }
}
