//! Effect library
//!
//! Effects are a closed sum type over the templated mechanics the engine
//! knows how to apply, plus a runtime-extensible `Custom` escape hatch for
//! truly unique card behaviors. Appliers return a success boolean at the
//! outer boundary: unknown descriptors and applier failures are logged and
//! treated as no-ops, never as engine-fatal errors.

pub mod custom;
pub mod keywords;
pub mod statics;
pub mod templates;

use crate::core::{CardId, CardType, Color, Keyword, PlayerId, StaticAbility};
use crate::game::GameState;
use crate::game::ReplacementRules;
use crate::Result;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub use custom::CustomEffectFn;

/// Target reference for effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    Player(PlayerId),
    Card(CardId),
}

/// Filter used by search effects and sacrifice costs; all present fields
/// must match.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardFilter {
    pub name: Option<String>,
    pub card_type: Option<CardType>,
    pub color: Option<Color>,
}

impl CardFilter {
    pub fn matches(&self, card: &crate::core::Card) -> bool {
        if let Some(name) = &self.name {
            if card.name.as_str() != name {
                return false;
            }
        }
        if let Some(t) = self.card_type {
            if !card.is_type(t) {
                return false;
            }
        }
        if let Some(c) = self.color {
            if !card.colors.contains(&c) {
                return false;
            }
        }
        true
    }
}

/// A reusable effect, parameterized with exactly the fields its applier
/// needs. `Custom` falls back to the runtime registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EffectSpec {
    /// Deal damage to each target (player or creature).
    Damage { amount: i32 },
    /// Controller draws cards.
    Draw { count: u8 },
    /// Add mana to the controller's pool.
    AddMana { color: Color, amount: u32 },
    /// Destroy each targeted permanent (respects indestructible).
    Destroy,
    /// Return each targeted permanent to its owner's hand.
    Bounce,
    /// Controller gains life.
    GainLife { amount: i32 },
    /// Put creature tokens onto the controller's battlefield.
    CreateToken { count: u8, power: i32, toughness: i32, name: String },
    /// Move up to `max_count` matching cards from library to hand, then
    /// shuffle the library.
    SearchLibrary { filter: CardFilter, max_count: u8 },
    /// Targeted player (or controller) mills cards to their graveyard.
    Mill { count: u8 },
    /// Look at the top cards of the library. Reordering choice is not
    /// implemented; cards stay on top.
    Scry { count: u8 },
    /// Counter the targeted spell on the stack.
    Counter,
    /// Until-end-of-turn stat boost for each targeted creature.
    Pump { power: i32, toughness: i32 },
    /// Grant a keyword to each targeted permanent.
    GrantKeyword(Keyword),
    /// Apply a static modification to each target.
    Static(StaticAbility),
    /// Named card-specific effect resolved through the registry.
    Custom(String),
}

/// Registry of named card-specific effects.
///
/// Constructed once at engine instantiation and passed by reference into
/// resolution, so tests can build isolated registries. Ships with the
/// classic-card built-ins as worked examples of the template system's
/// limits.
#[derive(Clone)]
pub struct EffectRegistry {
    customs: FxHashMap<String, CustomEffectFn>,
}

impl EffectRegistry {
    /// An empty registry (no custom effects resolvable).
    pub fn empty() -> Self {
        EffectRegistry {
            customs: FxHashMap::default(),
        }
    }

    /// Registry preloaded with the built-in classic-card effects.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        custom::register_builtins(&mut registry);
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, applier: CustomEffectFn) {
        self.customs.insert(name.into(), applier);
    }

    pub fn lookup(&self, name: &str) -> Option<CustomEffectFn> {
        self.customs.get(name).copied()
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Apply an effect against the game state.
///
/// This is the effect-application boundary: applier errors are caught here,
/// logged, and reported as `false` so a bad card definition can never
/// corrupt the priority loop.
pub fn apply_effect(
    state: &mut GameState,
    registry: &EffectRegistry,
    replacements: &ReplacementRules,
    spec: &EffectSpec,
    source: CardId,
    controller: PlayerId,
    targets: &[Target],
) -> bool {
    let outcome = apply_effect_inner(state, registry, replacements, spec, source, controller, targets);
    match outcome {
        Ok(()) => true,
        Err(err) => {
            state.logger.warn(&format!(
                "effect {spec:?} from {source} failed, treating as no-op: {err}"
            ));
            false
        }
    }
}

fn apply_effect_inner(
    state: &mut GameState,
    registry: &EffectRegistry,
    replacements: &ReplacementRules,
    spec: &EffectSpec,
    source: CardId,
    controller: PlayerId,
    targets: &[Target],
) -> Result<()> {
    match spec {
        EffectSpec::Damage { amount } => {
            templates::damage(state, replacements, source, controller, targets, *amount)
        }
        EffectSpec::Draw { count } => {
            templates::draw(state, replacements, controller, *count)
        }
        EffectSpec::AddMana { color, amount } => {
            templates::add_mana(state, controller, *color, *amount)
        }
        EffectSpec::Destroy => templates::destroy(state, replacements, targets),
        EffectSpec::Bounce => templates::bounce(state, replacements, targets),
        EffectSpec::GainLife { amount } => templates::gain_life(state, controller, *amount),
        EffectSpec::CreateToken {
            count,
            power,
            toughness,
            name,
        } => templates::create_token(state, controller, *count, *power, *toughness, name),
        EffectSpec::SearchLibrary { filter, max_count } => {
            templates::search_library(state, controller, filter, *max_count)
        }
        EffectSpec::Mill { count } => templates::mill(state, replacements, controller, targets, *count),
        EffectSpec::Scry { count } => templates::scry(state, controller, *count),
        EffectSpec::Counter => templates::counter(state, targets),
        EffectSpec::Pump { power, toughness } => templates::pump(state, targets, *power, *toughness),
        EffectSpec::GrantKeyword(kw) => keywords::grant(state, source, targets, *kw),
        EffectSpec::Static(ability) => statics::apply(state, controller, targets, ability),
        EffectSpec::Custom(name) => {
            custom::apply(state, registry, replacements, name, source, controller, targets)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Card;

    #[test]
    fn test_card_filter() {
        let mut card = Card::new(CardId::new(1), "Llanowar Elves", PlayerId::new(0));
        card.type_line = crate::core::TypeLine::of(CardType::Creature);
        card.colors.push(Color::Green);

        assert!(CardFilter::default().matches(&card));
        assert!(CardFilter {
            card_type: Some(CardType::Creature),
            ..Default::default()
        }
        .matches(&card));
        assert!(!CardFilter {
            card_type: Some(CardType::Land),
            ..Default::default()
        }
        .matches(&card));
        assert!(CardFilter {
            name: Some("Llanowar Elves".to_string()),
            color: Some(Color::Green),
            ..Default::default()
        }
        .matches(&card));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = EffectRegistry::with_builtins();
        assert!(registry.lookup("lightning_bolt").is_some());
        assert!(registry.lookup("sol_ring").is_some());
        assert!(registry.lookup("no_such_effect").is_none());

        let empty = EffectRegistry::empty();
        assert!(empty.lookup("lightning_bolt").is_none());
    }
}
