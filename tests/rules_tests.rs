//! Standard rule set: checks, costs and rewards.

mod common;

use conquest_engine::core::{Action, ScriptedDice};
use conquest_engine::game::GameBuilder;
use conquest_engine::map::{RegionId, Symbol, Terrain};
use conquest_engine::rules::{DefaultRules, Rules, RulesConfig, Violation};

use common::game;

#[test]
fn test_structural_violations() {
    let game = game(2, 3, &[1]);
    let rules = DefaultRules::new();
    let state = game.state();

    let violations = rules.check(state, &Action::SelectCombo { combo: 9 });
    assert_eq!(violations.as_slice(), &[Violation::ComboOutOfRange { index: 9, n_combos: 3 }]);

    let violations = rules.check(state, &Action::conquer(RegionId(42)));
    assert!(violations.contains(&Violation::RegionOutOfRange {
        region: RegionId(42),
        n_regions: 6
    }));
    assert!(violations.iter().any(Violation::is_structural));

    let violations = rules.check(
        state,
        &Action::Deploy {
            region: RegionId(0),
            n_tokens: 0,
        },
    );
    assert!(violations.contains(&Violation::NonPositiveTokenCount));
}

#[test]
fn test_every_violation_is_reported() {
    let game = game(2, 3, &[1]);
    let violations = game.check(&Action::Abandon { region: RegionId(2) });

    assert_eq!(
        violations.as_slice(),
        &[Violation::NoActiveRace, Violation::NonControlledRegion]
    );
}

#[test]
fn test_nothing_but_select_before_a_combo() {
    let game = game(2, 3, &[1]);

    assert_eq!(game.check(&Action::EndTurn).as_slice(), &[Violation::EndBeforeSelect]);
    assert_eq!(game.check(&Action::Decline).as_slice(), &[Violation::NoActiveRace]);
    assert_eq!(
        game.check(&Action::StartRedeployment).as_slice(),
        &[Violation::NoActiveRace, Violation::NoActiveRegions]
    );
}

#[test]
fn test_select_when_active_is_rejected() {
    let mut game = game(2, 3, &[1]);
    game.apply(Action::SelectCombo { combo: 0 }).unwrap();

    assert_eq!(
        game.check(&Action::SelectCombo { combo: 0 }).as_slice(),
        &[Violation::SelectingWhenActive]
    );
}

#[test]
fn test_conquest_costs() {
    let mut game = game(2, 3, &[1]);
    game.apply(Action::SelectCombo { combo: 0 }).unwrap();
    let rules = game.rules().clone();

    // Plain, lost tribe, mountain
    assert_eq!(rules.conquest_cost(game.state(), RegionId(0)), 1);
    assert_eq!(rules.conquest_cost(game.state(), RegionId(1)), 2);
    assert_eq!(rules.conquest_cost(game.state(), RegionId(2)), 2);

    game.apply(Action::conquer(RegionId(0))).unwrap();
    game.apply(Action::Deploy {
        region: RegionId(0),
        n_tokens: 3,
    })
    .unwrap();

    // Defended by 4 tokens
    assert_eq!(rules.conquest_cost(game.state(), RegionId(0)), 5);
}

#[test]
fn test_dice_needs_a_chance() {
    let config = RulesConfig::default().with_base_conquest_cost(4);
    let mut game = GameBuilder::new(common::assets(2, 3))
        .shuffle(false)
        .dice(ScriptedDice::new([6]))
        .build_with_rules(DefaultRules::with_config(config))
        .unwrap();
    game.apply(Action::SelectCombo { combo: 0 }).unwrap();
    game.apply(Action::conquer(RegionId(0))).unwrap();

    // 1 token left, the lost tribe costs 5: a 6 could still do it
    assert!(game.check(&Action::conquer_with_dice(RegionId(1))).is_empty());

    // Without the dice it's out of reach
    assert_eq!(
        game.check(&Action::conquer(RegionId(1))).as_slice(),
        &[Violation::NotEnoughTokensToConquer {
            tokens_on_hand: 1,
            tokens_required: 5
        }]
    );
}

#[test]
fn test_dice_out_of_reach() {
    let config = RulesConfig::default().with_base_conquest_cost(4).with_max_dice_roll(2);
    let mut game = GameBuilder::new(common::assets(2, 3))
        .shuffle(false)
        .build_with_rules(DefaultRules::with_config(config))
        .unwrap();
    game.apply(Action::SelectCombo { combo: 0 }).unwrap();
    game.apply(Action::conquer(RegionId(0))).unwrap();

    assert_eq!(
        game.check(&Action::conquer_with_dice(RegionId(1))).as_slice(),
        &[Violation::NotEnoughTokensToRoll {
            tokens_on_hand: 1,
            minimum_required: 3
        }]
    );
}

#[test]
fn test_custom_unconquerable_terrain() {
    let config = RulesConfig::default().with_unconquerable([Terrain::Forest]);
    let mut game = GameBuilder::new(common::assets(2, 3))
        .shuffle(false)
        .build_with_rules(DefaultRules::with_config(config))
        .unwrap();
    game.apply(Action::SelectCombo { combo: 0 }).unwrap();

    assert_eq!(
        game.check(&Action::conquer(RegionId(0))).as_slice(),
        &[Violation::UnconquerableTerrain(Terrain::Forest)]
    );
    // Sea is fair game now
    game.apply(Action::conquer(RegionId(3))).unwrap();
}

#[test]
fn test_symbol_bonus_adds_to_reward() {
    let config = RulesConfig::default().with_symbol_bonus(Symbol::Mine, 2);
    let mut game = GameBuilder::new(common::assets(2, 3))
        .shuffle(false)
        .build_with_rules(DefaultRules::with_config(config))
        .unwrap();
    game.apply(Action::SelectCombo { combo: 0 }).unwrap();
    game.apply(Action::conquer(RegionId(0))).unwrap();
    game.apply(Action::conquer(RegionId(1))).unwrap();
    game.apply(Action::conquer(RegionId(2))).unwrap();

    let player = game.state().current_player_id();
    // 3 regions + 2 for the mine
    assert_eq!(game.rules().turn_reward(game.state(), player), 5);
}

#[test]
fn test_combo_price() {
    let game = game(2, 3, &[1]);
    let price = game.rules().combo_price(game.state(), 2);

    assert_eq!(price.cost, 2);
    assert_eq!(price.placements.as_slice(), &[(0, 1), (1, 1)]);
}

#[test]
fn test_check_is_pure() {
    let mut game = game(2, 3, &[1]);
    game.apply(Action::SelectCombo { combo: 0 }).unwrap();
    let before = game.state().clone();

    for action in [
        Action::conquer(RegionId(0)),
        Action::conquer_with_dice(RegionId(1)),
        Action::Decline,
        Action::EndTurn,
    ] {
        let _ = game.check(&action);
    }

    assert_eq!(game.state(), &before);
}
