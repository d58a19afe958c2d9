//! Stack items
//!
//! The stack holds pending spells and abilities. It is strictly LIFO: the
//! item pushed last resolves first, and no turn or phase may advance while
//! it is non-empty.

use crate::core::{CardId, PlayerId};
use crate::effects::{EffectSpec, Target};
use serde::{Deserialize, Serialize};

/// What kind of object a stack item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackItemKind {
    /// A cast spell; its card is held by the item until resolution.
    Spell,
    /// An activated ability.
    Ability,
    /// A triggered ability queued by the trigger matcher.
    Triggered,
}

/// A pending spell or ability awaiting resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackItem {
    pub kind: StackItemKind,

    /// The spell card itself, or the ability's source permanent.
    pub source: CardId,

    pub controller: PlayerId,

    pub targets: Vec<Target>,

    /// For abilities and triggers: the effect to apply on resolution.
    /// Spells carry their effects on the card instead.
    pub effect: Option<EffectSpec>,
}

impl StackItem {
    pub fn spell(source: CardId, controller: PlayerId, targets: Vec<Target>) -> Self {
        StackItem {
            kind: StackItemKind::Spell,
            source,
            controller,
            targets,
            effect: None,
        }
    }

    pub fn ability(
        source: CardId,
        controller: PlayerId,
        targets: Vec<Target>,
        effect: EffectSpec,
    ) -> Self {
        StackItem {
            kind: StackItemKind::Ability,
            source,
            controller,
            targets,
            effect: Some(effect),
        }
    }

    pub fn triggered(source: CardId, controller: PlayerId, effect: EffectSpec) -> Self {
        StackItem {
            kind: StackItemKind::Triggered,
            source,
            controller,
            targets: Vec::new(),
            effect: Some(effect),
        }
    }
}
