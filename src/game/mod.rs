//! Game rules: turn structure, combat, the stack, and the engine facade.

pub mod action;
pub mod combat;
pub mod engine;
pub mod events;
pub mod execute;
pub mod legal;
pub mod logger;
pub mod phase;
pub mod priority;
pub mod replace;
pub mod sba;
pub mod stack;
pub mod stack_item;
pub mod state;
pub mod triggers;
pub mod view;

pub use action::{ActionKind, PlayerAction};
pub use combat::{BlockAssignment, CombatState};
pub use engine::{Outcome, RulesEngine};
pub use events::GameEvent;
pub use legal::check_legal;
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use phase::{Phase, Step, TurnStructure};
pub use priority::{DecisionProvider, HumanProvider, PassBot, ScriptedProvider};
pub use replace::{DamageScope, PrimitiveAction, ReplacementRule, ReplacementRules};
pub use stack_item::{StackItem, StackItemKind};
pub use state::{GameState, COMMANDER_STARTING_LIFE, STARTING_LIFE};
pub use triggers::PendingTrigger;
pub use view::{CardSummary, GameStateView, PlayerSummary, PublicState, StackEntrySummary};
