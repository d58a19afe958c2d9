//! End-to-end casting: mana payment, land drops, commander tax.

mod common;

use common::*;
use manastack::core::{CardType, Color, TypeLine};
use manastack::effects::EffectSpec;
use manastack::game::{Outcome, PlayerAction};
use manastack::EngineError;

#[test]
fn test_cast_without_mana_is_rejected() {
    let mut engine = engine_with_bots(1);
    main_phase(&mut engine);
    let bear = creature_in_hand(&mut engine, ALICE, "Grizzly Bears", 2, 2, 2);

    let action = PlayerAction::CastSpell {
        card: bear,
        from_command_zone: false,
        targets: vec![],
    };
    let err = engine.process_action(ALICE, &action).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction { .. }));
    // Nothing changed: the card is still in hand.
    assert!(engine.game.players[0].zones.hand.contains(bear));
}

#[test]
fn test_cast_deducts_exact_mana() {
    let mut engine = engine_with_bots(1);
    main_phase(&mut engine);
    let bear = creature_in_hand(&mut engine, ALICE, "Grizzly Bears", 2, 2, 2);
    give_mana(&mut engine, ALICE, 5);

    let outcome = engine
        .process_action(
            ALICE,
            &PlayerAction::CastSpell {
                card: bear,
                from_command_zone: false,
                targets: vec![],
            },
        )
        .unwrap();
    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(engine.game.players[0].mana_pool.total(), 3);
    assert!(engine.game.players[0].zones.battlefield.contains(bear));
    assert!(engine.game.cards.get(bear).unwrap().summoning_sick);
}

#[test]
fn test_second_land_in_a_turn_is_rejected() {
    let mut engine = engine_with_bots(1);
    main_phase(&mut engine);
    let first = land_in_hand(&mut engine, ALICE, "Forest", Color::Green);
    let second = land_in_hand(&mut engine, ALICE, "Forest", Color::Green);

    engine
        .process_action(ALICE, &PlayerAction::PlayLand { card: first })
        .unwrap();
    let err = engine
        .process_action(ALICE, &PlayerAction::PlayLand { card: second })
        .unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction { .. }));
    assert_eq!(engine.game.players[0].zones.battlefield.len(), 1);
}

#[test]
fn test_land_ability_produces_mana() {
    let mut engine = engine_with_bots(1);
    main_phase(&mut engine);
    let forest = land_in_hand(&mut engine, ALICE, "Forest", Color::Green);
    engine
        .process_action(ALICE, &PlayerAction::PlayLand { card: forest })
        .unwrap();
    engine
        .process_action(
            ALICE,
            &PlayerAction::ActivateAbility {
                card: forest,
                ability_index: 0,
                targets: vec![],
            },
        )
        .unwrap();
    assert_eq!(engine.game.players[0].mana_pool.total(), 1);
    assert!(engine.game.cards.get(forest).unwrap().tapped);

    // Tapped lands cannot be activated again.
    let err = engine
        .process_action(
            ALICE,
            &PlayerAction::ActivateAbility {
                card: forest,
                ability_index: 0,
                targets: vec![],
            },
        )
        .unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction { .. }));
}

#[test]
fn test_commander_tax_escalates() {
    let mut engine = engine_with_bots(1);
    main_phase(&mut engine);

    let commander = engine.game.mint_card("General Kudro", ALICE);
    {
        let card = engine.game.cards.get_mut(commander).unwrap();
        card.type_line = TypeLine::of(CardType::Creature);
        card.mana_cost = 3;
        card.power = Some(3);
        card.toughness = Some(3);
        card.is_commander = true;
    }
    engine.game.players[0].zones.command.add(commander);

    let cast = PlayerAction::CastSpell {
        card: commander,
        from_command_zone: true,
        targets: vec![],
    };

    // First cast: base cost.
    give_mana(&mut engine, ALICE, 3);
    engine.process_action(ALICE, &cast).unwrap();
    assert_eq!(engine.game.players[0].mana_pool.total(), 0);
    assert_eq!(engine.game.players[0].commander_tax, 1);

    // Send it back to the command zone and recast: base + 2.
    engine
        .game
        .move_card(
            commander,
            manastack::zones::Zone::Battlefield,
            manastack::zones::Zone::Command,
        )
        .unwrap();
    give_mana(&mut engine, ALICE, 5);
    engine.process_action(ALICE, &cast).unwrap();
    assert_eq!(engine.game.players[0].mana_pool.total(), 0);

    // Third time: base + 4, and 5 mana is no longer enough.
    engine
        .game
        .move_card(
            commander,
            manastack::zones::Zone::Battlefield,
            manastack::zones::Zone::Command,
        )
        .unwrap();
    give_mana(&mut engine, ALICE, 5);
    let err = engine.process_action(ALICE, &cast).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction { .. }));
    give_mana(&mut engine, ALICE, 2);
    engine.process_action(ALICE, &cast).unwrap();
    assert!(engine.game.players[0].zones.battlefield.contains(commander));
}

#[test]
fn test_instant_castable_outside_main_phase() {
    let mut engine = engine_with_bots(1);
    engine.game.turn.current_step = manastack::game::Step::Upkeep;
    let salve = instant_in_hand(
        &mut engine,
        ALICE,
        "Healing Salve",
        1,
        vec![EffectSpec::GainLife { amount: 3 }],
    );
    give_mana(&mut engine, ALICE, 1);
    engine
        .process_action(
            ALICE,
            &PlayerAction::CastSpell {
                card: salve,
                from_command_zone: false,
                targets: vec![],
            },
        )
        .unwrap();
    assert_eq!(engine.game.players[0].life, 23);
    assert!(engine.game.players[0].zones.graveyard.contains(salve));
}

#[test]
fn test_sorcery_rejected_at_instant_speed() {
    let mut engine = engine_with_bots(1);
    engine.game.turn.current_step = manastack::game::Step::Upkeep;
    let id = engine.game.mint_card("Divination", ALICE);
    {
        let card = engine.game.cards.get_mut(id).unwrap();
        card.type_line = TypeLine::of(CardType::Sorcery);
        card.mana_cost = 0;
        card.effects.push(EffectSpec::Draw { count: 2 });
    }
    engine.game.players[0].zones.hand.add(id);
    let err = engine
        .process_action(
            ALICE,
            &PlayerAction::CastSpell {
                card: id,
                from_command_zone: false,
                targets: vec![],
            },
        )
        .unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction { .. }));
}
