//! Benchmarks for the hot paths of AI clients: checking actions, listing
//! legal actions and snapshotting state.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use conquest_engine::core::{Ability, Action, Assets, Race};
use conquest_engine::game::{Game, GameBuilder};
use conquest_engine::map::{Map, RegionId, Symbol, Terrain, Tile};

/// A 4x4 grid with a border ring and a few lost tribes.
fn assets() -> Assets {
    let terrains = [Terrain::Forest, Terrain::Hill, Terrain::Farmland, Terrain::Mountain, Terrain::Swamp];
    let mut tiles = Vec::new();
    let mut borders = Vec::new();
    for y in 0..4u16 {
        for x in 0..4u16 {
            let id = y * 4 + x;
            let mut tile = Tile::new(terrains[usize::from(id) % terrains.len()]);
            if x == 0 || y == 0 || x == 3 || y == 3 {
                tile = tile.at_border();
            }
            if id % 5 == 1 {
                tile = tile.with_symbol(Symbol::LostTribe);
            }
            tiles.push(tile);
            if x < 3 {
                borders.push((id, id + 1));
            }
            if y < 3 {
                borders.push((id, id + 4));
            }
        }
    }

    let mut assets = Assets::new(Map::new(tiles, borders).unwrap()).with_players(4);
    for i in 0..16 {
        assets = assets.with_race(Race::new(format!("Race {i}"), 4 + i % 4, 12));
    }
    for i in 0..12 {
        assets = assets.with_ability(Ability::new(format!("Ability {i}"), 2 + i % 3));
    }
    assets
}

/// A game a few turns in, by always taking the first legal action that
/// isn't ending the turn.
fn midgame() -> Game {
    let mut game = GameBuilder::new(assets()).seed(42).build().unwrap();
    for _ in 0..60 {
        let legal = game.legal_actions();
        let action = legal
            .iter()
            .copied()
            .find(|a| *a != Action::EndTurn && *a != Action::Decline)
            .unwrap_or(Action::EndTurn);
        if game.apply(action).is_err() {
            break;
        }
    }
    game
}

fn bench_check(c: &mut Criterion) {
    let game = midgame();
    let actions: Vec<Action> = (0..16)
        .flat_map(|i| [Action::conquer(RegionId(i)), Action::conquer_with_dice(RegionId(i))])
        .collect();

    c.bench_function("check_32_conquests", |b| {
        b.iter(|| {
            for action in &actions {
                black_box(game.check(black_box(action)));
            }
        });
    });
}

fn bench_legal_actions(c: &mut Criterion) {
    let game = midgame();

    c.bench_function("legal_actions", |b| {
        b.iter(|| black_box(game.legal_actions()));
    });
}

fn bench_state_clone(c: &mut Criterion) {
    let game = midgame();

    c.bench_function("state_clone", |b| {
        b.iter(|| black_box(game.state().clone()));
    });
}

criterion_group!(benches, bench_check, bench_legal_actions, bench_state_clone);
criterion_main!(benches);
