//! Shared fixtures for integration tests.

#![allow(dead_code)]

use conquest_engine::core::{Ability, Assets, Race, RaceId, ScriptedDice};
use conquest_engine::game::{Game, GameBuilder};
use conquest_engine::map::{Map, Symbol, Terrain, Tile};
use conquest_engine::rules::Rules;

/// Six regions:
///
/// ```text
/// 0 Forest (border)      borders 1, 3
/// 1 Hill (lost tribe)    borders 0, 2, 5
/// 2 Mountain (mine)      borders 1, 3, 5
/// 3 Sea (border)         borders 0, 2, 4
/// 4 Farmland (border)    borders 3, 5
/// 5 Swamp                borders 1, 2, 4
/// ```
pub fn map() -> Map {
    let tiles = vec![
        Tile::new(Terrain::Forest).at_border(),
        Tile::new(Terrain::Hill).with_symbol(Symbol::LostTribe),
        Tile::new(Terrain::Mountain).with_symbol(Symbol::Mine),
        Tile::new(Terrain::Sea).at_border(),
        Tile::new(Terrain::Farmland).at_border(),
        Tile::new(Terrain::Swamp),
    ];
    let borders = vec![(0, 1), (1, 2), (2, 3), (0, 3), (3, 4), (4, 5), (1, 5), (2, 5)];
    Map::new(tiles, borders).unwrap()
}

/// Assets for `n_players` with 3 visible combos of 5 tokens each, and one
/// race and ability to spare.
pub fn assets(n_players: usize, n_turns: u32) -> Assets {
    assets_with_spares(n_players, n_turns, 1)
}

/// Like [`assets`], with exactly as many races and abilities as a game needs.
pub fn minimal_assets(n_players: usize, n_turns: u32) -> Assets {
    assets_with_spares(n_players, n_turns, 0)
}

fn assets_with_spares(n_players: usize, n_turns: u32, spares: usize) -> Assets {
    let mut assets = Assets::new(map())
        .with_name("test")
        .with_players(n_players)
        .with_selectable_combos(3)
        .with_turns(n_turns);
    for i in 0..2 * n_players + 3 + spares {
        assets = assets.with_race(Race::new(format!("Race {}", i), 3, 10));
    }
    for i in 0..n_players + 3 + spares {
        assets = assets.with_ability(Ability::new(format!("Ability {}", i), 2));
    }
    assets
}

/// Unshuffled game with scripted dice.
pub fn game(n_players: usize, n_turns: u32, rolls: &[u32]) -> Game {
    GameBuilder::new(assets(n_players, n_turns))
        .shuffle(false)
        .dice(ScriptedDice::new(rolls.to_vec()))
        .build()
        .unwrap()
}

/// Check token conservation for every race.
pub fn assert_tokens_conserved<R: Rules>(game: &Game<R>) {
    let state = game.state();
    for (i, race) in state.assets().races.iter().enumerate() {
        let id = RaceId(i as u16);
        let total = state.tokens_on_board(id) + state.tokens_on_hand(id) + state.tokens_in_storage(id);
        assert_eq!(total, race.max_n_tokens, "tokens of {} not conserved", race.name);
    }
}
