//! Core game types and entities

pub mod ability;
pub mod card;
pub mod entity;
pub mod mana;
pub mod player;
pub mod types;

pub use ability::{
    Ability, AbilityCost, ActivatedAbility, Keyword, SacrificeFilter, StaticAbility,
    TriggerCondition, TriggeredAbility,
};
pub use card::{Card, CardType, Supertype, TypeLine};
pub use entity::{CardId, CardStore, PlayerId};
pub use mana::{Color, ManaPool};
pub use player::Player;
pub use types::{CardName, PlayerName};
