//! Shared fixtures for integration tests.

#![allow(dead_code)]

use manastack::core::{
    Ability, AbilityCost, ActivatedAbility, Card, CardId, CardType, Color, PlayerId, TypeLine,
};
use manastack::effects::EffectSpec;
use manastack::game::{GameState, PassBot, RulesEngine, Step, VerbosityLevel};
use smallvec::smallvec;

pub const ALICE: PlayerId = PlayerId::new(0);
pub const BOB: PlayerId = PlayerId::new(1);

/// A quiet two-player game with pass bots installed for both seats.
pub fn engine_with_bots(seed: u64) -> RulesEngine {
    let mut state = GameState::new(1, seed, "Alice", "Bob");
    state.logger.set_verbosity(VerbosityLevel::Silent);
    let mut engine = RulesEngine::new(state);
    engine.set_provider(ALICE, Box::new(PassBot));
    engine.set_provider(BOB, Box::new(PassBot));
    engine
}

pub fn main_phase(engine: &mut RulesEngine) {
    engine.game.turn.current_step = Step::Main1;
}

pub fn give_mana(engine: &mut RulesEngine, player: PlayerId, amount: u32) {
    engine.game.players[player.index()]
        .mana_pool
        .add(Color::Colorless, amount);
}

fn configure(card: &mut Card, card_type: CardType, cost: u32) {
    card.type_line = TypeLine::of(card_type);
    card.mana_cost = cost;
}

/// A vanilla creature put straight into the owner's hand.
pub fn creature_in_hand(
    engine: &mut RulesEngine,
    owner: PlayerId,
    name: &str,
    cost: u32,
    power: i32,
    toughness: i32,
) -> CardId {
    let id = engine.game.mint_card(name, owner);
    let card = engine.game.cards.get_mut(id).unwrap();
    configure(card, CardType::Creature, cost);
    card.power = Some(power);
    card.toughness = Some(toughness);
    engine.game.players[owner.index()].zones.hand.add(id);
    id
}

/// A creature already on the battlefield, battle-ready.
pub fn creature_on_battlefield(
    engine: &mut RulesEngine,
    owner: PlayerId,
    name: &str,
    power: i32,
    toughness: i32,
) -> CardId {
    let id = engine.game.mint_card(name, owner);
    let card = engine.game.cards.get_mut(id).unwrap();
    configure(card, CardType::Creature, 0);
    card.power = Some(power);
    card.toughness = Some(toughness);
    engine.game.players[owner.index()].zones.battlefield.add(id);
    id
}

/// An instant with the given effects, in hand.
pub fn instant_in_hand(
    engine: &mut RulesEngine,
    owner: PlayerId,
    name: &str,
    cost: u32,
    effects: Vec<EffectSpec>,
) -> CardId {
    let id = engine.game.mint_card(name, owner);
    let card = engine.game.cards.get_mut(id).unwrap();
    configure(card, CardType::Instant, cost);
    card.effects = effects;
    engine.game.players[owner.index()].zones.hand.add(id);
    id
}

/// A basic land with a tap-for-mana ability, in hand.
pub fn land_in_hand(engine: &mut RulesEngine, owner: PlayerId, name: &str, color: Color) -> CardId {
    let id = engine.game.mint_card(name, owner);
    let card = engine.game.cards.get_mut(id).unwrap();
    card.type_line = TypeLine::of(CardType::Land);
    card.abilities.push(Ability::Activated(ActivatedAbility {
        costs: smallvec![AbilityCost::Tap],
        effect: EffectSpec::AddMana { color, amount: 1 },
        allowed_steps: None,
        requires_target: false,
        description: format!("tap: add one {color} mana"),
    }));
    engine.game.players[owner.index()].zones.hand.add(id);
    id
}
