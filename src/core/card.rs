//! Card types and definitions

use crate::core::{Ability, CardId, Keyword, PlayerId};
use crate::effects::EffectSpec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Card types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Creature,
    Instant,
    Sorcery,
    Enchantment,
    Artifact,
    Land,
    Planeswalker,
}

/// Supertypes preceding the card type on the type line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Supertype {
    Legendary,
    Basic,
}

/// A card's type line, e.g. "Legendary Creature — Elf".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypeLine {
    pub supertypes: SmallVec<[Supertype; 1]>,
    pub types: SmallVec<[CardType; 2]>,
    pub subtypes: SmallVec<[String; 2]>,
}

impl TypeLine {
    pub fn of(card_type: CardType) -> Self {
        let mut line = TypeLine::default();
        line.types.push(card_type);
        line
    }

    pub fn has_type(&self, t: CardType) -> bool {
        self.types.contains(&t)
    }

    pub fn has_subtype(&self, s: &str) -> bool {
        self.subtypes.iter().any(|st| st == s)
    }
}

impl fmt::Display for TypeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        for st in &self.supertypes {
            parts.push(format!("{st:?}"));
        }
        for t in &self.types {
            parts.push(format!("{t:?}"));
        }
        write!(f, "{}", parts.join(" "))?;
        if !self.subtypes.is_empty() {
            write!(f, " — {}", self.subtypes.join(" "))?;
        }
        Ok(())
    }
}

/// Mana colors a card belongs to.
pub type ColorSet = SmallVec<[crate::core::Color; 2]>;

/// A card instance during gameplay.
///
/// A card is exclusively contained in exactly one zone vector at a time (or
/// held by a stack item while being cast). Moving zones is an exclusive
/// transfer; the card entity itself lives in `CardStore` for the whole game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: crate::core::CardName,
    pub type_line: TypeLine,

    /// Simplified integer cost, paid from the mana pool total.
    pub mana_cost: u32,

    pub colors: ColorSet,

    /// Power/toughness (creatures only).
    pub power: Option<i32>,
    pub toughness: Option<i32>,

    /// Damage accumulated this turn; reset on zone change and at cleanup.
    pub damage: i32,

    /// Remaining damage-prevention shield from static abilities.
    pub damage_shield: i32,

    /// Temporary until-end-of-turn stat bonuses from pump/static effects.
    pub power_bonus: i32,
    pub toughness_bonus: i32,

    pub tapped: bool,
    pub summoning_sick: bool,
    pub is_token: bool,
    pub is_commander: bool,

    /// For auras: the permanent this card is attached to.
    pub attached_to: Option<CardId>,

    pub keywords: SmallVec<[Keyword; 4]>,

    /// Colors this permanent has protection from; combat damage from a
    /// source of these colors is prevented.
    pub protections: ColorSet,

    /// Ordered ability descriptors (keyword / triggered / activated / static).
    pub abilities: Vec<Ability>,

    /// Spell effects applied when this card resolves as an instant/sorcery.
    pub effects: Vec<EffectSpec>,

    /// Free-text rules text (display only).
    pub text: String,

    pub owner: PlayerId,
}

impl Card {
    pub fn new(id: CardId, name: impl Into<crate::core::CardName>, owner: PlayerId) -> Self {
        Card {
            id,
            name: name.into(),
            type_line: TypeLine::default(),
            mana_cost: 0,
            colors: SmallVec::new(),
            power: None,
            toughness: None,
            damage: 0,
            damage_shield: 0,
            power_bonus: 0,
            toughness_bonus: 0,
            tapped: false,
            summoning_sick: false,
            is_token: false,
            is_commander: false,
            attached_to: None,
            keywords: SmallVec::new(),
            protections: SmallVec::new(),
            abilities: Vec::new(),
            effects: Vec::new(),
            text: String::new(),
            owner,
        }
    }

    pub fn is_type(&self, t: CardType) -> bool {
        self.type_line.has_type(t)
    }

    pub fn is_creature(&self) -> bool {
        self.is_type(CardType::Creature)
    }

    pub fn is_land(&self) -> bool {
        self.is_type(CardType::Land)
    }

    pub fn is_aura(&self) -> bool {
        self.is_type(CardType::Enchantment) && self.type_line.has_subtype("Aura")
    }

    /// Instants and sorceries go to the graveyard when they resolve;
    /// everything else becomes a permanent.
    pub fn is_permanent_type(&self) -> bool {
        !self.is_type(CardType::Instant) && !self.is_type(CardType::Sorcery)
    }

    pub fn has_keyword(&self, kw: Keyword) -> bool {
        self.keywords.contains(&kw)
            || self
                .abilities
                .iter()
                .any(|a| matches!(a, Ability::Keyword(k) if *k == kw))
    }

    pub fn grant_keyword(&mut self, kw: Keyword) {
        if !self.keywords.contains(&kw) {
            self.keywords.push(kw);
        }
    }

    pub fn tap(&mut self) {
        self.tapped = true;
    }

    pub fn untap(&mut self) {
        self.tapped = false;
    }

    /// Current power including temporary bonuses.
    pub fn current_power(&self) -> i32 {
        self.power.unwrap_or(0) + self.power_bonus
    }

    /// Current toughness including temporary bonuses.
    pub fn current_toughness(&self) -> i32 {
        self.toughness.unwrap_or(0) + self.toughness_bonus
    }

    /// Has this creature taken lethal damage?
    pub fn has_lethal_damage(&self) -> bool {
        self.is_creature() && self.damage >= self.current_toughness()
    }

    /// Reset battlefield-only state when the card leaves the battlefield.
    pub fn reset_battlefield_state(&mut self) {
        self.damage = 0;
        self.damage_shield = 0;
        self.power_bonus = 0;
        self.toughness_bonus = 0;
        self.tapped = false;
        self.summoning_sick = false;
        self.attached_to = None;
        self.protections.clear();
    }
}
