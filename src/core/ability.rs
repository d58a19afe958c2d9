//! Ability descriptors carried on cards
//!
//! A card's rules are an ordered sequence of descriptors: keywords (static
//! flags), triggered abilities (queue onto the stack when an event matches),
//! activated abilities (paid costs, then the stack), and static abilities
//! (continuously-applied modifications).

use crate::core::{CardType, Color};
use crate::effects::EffectSpec;
use crate::game::Step;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Evergreen keyword abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Flying,
    FirstStrike,
    DoubleStrike,
    Deathtouch,
    Haste,
    Hexproof,
    Indestructible,
    Lifelink,
    Menace,
    Reach,
    Trample,
    Vigilance,
    Defender,
    Flash,
    Intimidate,
    // Restriction flags modeled as keywords so they live in one set
    CannotAttack,
    CannotBlock,
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Keyword::Flying => "flying",
            Keyword::FirstStrike => "first strike",
            Keyword::DoubleStrike => "double strike",
            Keyword::Deathtouch => "deathtouch",
            Keyword::Haste => "haste",
            Keyword::Hexproof => "hexproof",
            Keyword::Indestructible => "indestructible",
            Keyword::Lifelink => "lifelink",
            Keyword::Menace => "menace",
            Keyword::Reach => "reach",
            Keyword::Trample => "trample",
            Keyword::Vigilance => "vigilance",
            Keyword::Defender => "defender",
            Keyword::Flash => "flash",
            Keyword::Intimidate => "intimidate",
            Keyword::CannotAttack => "can't attack",
            Keyword::CannotBlock => "can't block",
        };
        write!(f, "{s}")
    }
}

/// Conditions a triggered ability can listen for. Each maps 1:1 onto an
/// emitted `GameEvent` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerCondition {
    WhenCreatureEnters,
    WhenCreatureDies,
    WhenSpellCast,
    WhenLandPlayed,
    AtBeginningOfUpkeep,
    AtEndOfTurn,
}

/// A triggered ability: fires when its condition matches a recorded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredAbility {
    pub condition: TriggerCondition,
    pub effect: EffectSpec,
    /// Optional triggers are currently queued unconditionally, same as
    /// mandatory ones; the flag is kept so card data can express intent.
    pub optional: bool,
}

/// Costs payable to activate an ability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AbilityCost {
    /// Tap the source permanent.
    Tap,
    /// Pay from the mana pool total.
    Mana(u32),
    /// Pay life. Payability is a hard precondition: life cannot go negative.
    Life(i32),
    /// Sacrifice a battlefield permanent matching the filter.
    Sacrifice(Option<SacrificeFilter>),
    /// Discard the last card in hand.
    Discard,
}

/// Filter for sacrifice costs (all present fields must match).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SacrificeFilter {
    pub card_type: Option<CardType>,
    pub color: Option<Color>,
    pub name: Option<String>,
}

/// An activated ability: pay costs, put the effect on the stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivatedAbility {
    pub costs: SmallVec<[AbilityCost; 2]>,
    pub effect: EffectSpec,
    /// If set, the ability may only be activated during these steps.
    pub allowed_steps: Option<SmallVec<[Step; 2]>>,
    /// Whether the effect requires an explicit target.
    pub requires_target: bool,
    pub description: String,
}

/// Continuously-applied modifications requiring no activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StaticAbility {
    /// Power/toughness delta applied to the target permanent.
    PowerToughnessDelta { power: i32, toughness: i32 },
    /// Cost delta for spells the controller casts.
    CostDelta(i32),
    /// Damage prevention shield: absorbs the next N damage to the target.
    PreventDamage(i32),
    /// Protection flag from a color.
    ProtectionFrom(Color),
}

/// Any ability descriptor a card can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Ability {
    Keyword(Keyword),
    Triggered(TriggeredAbility),
    Activated(ActivatedAbility),
    Static(StaticAbility),
}

impl Ability {
    pub fn as_activated(&self) -> Option<&ActivatedAbility> {
        match self {
            Ability::Activated(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_triggered(&self) -> Option<&TriggeredAbility> {
        match self {
            Ability::Triggered(t) => Some(t),
            _ => None,
        }
    }
}
