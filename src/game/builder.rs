//! Game setup.

use std::sync::Arc;

use tracing::debug;

use super::engine::Game;
use crate::core::config::{Assets, AssetsError};
use crate::core::rng::{DiceRoller, GameRng};
use crate::rules::{DefaultRules, Rules};

/// Builder for a new game.
///
/// ```
/// use conquest_engine::core::{Ability, Assets, Race};
/// use conquest_engine::game::GameBuilder;
/// use conquest_engine::map::{Map, Terrain, Tile};
///
/// let map = Map::new(
///     vec![Tile::new(Terrain::Forest).at_border(), Tile::new(Terrain::Hill)],
///     vec![(0, 1)],
/// )
/// .unwrap();
/// let mut assets = Assets::new(map).with_selectable_combos(1);
/// for i in 0..5 {
///     assets = assets.with_race(Race::new(format!("Race {}", i), 4, 10));
/// }
/// for i in 0..3 {
///     assets = assets.with_ability(Ability::new(format!("Ability {}", i), 2));
/// }
///
/// let game = GameBuilder::new(assets).seed(42).build().unwrap();
/// assert_eq!(game.state().combos().len(), 1);
/// ```
pub struct GameBuilder {
    assets: Assets,
    seed: u64,
    shuffle: bool,
    dice: Option<Box<dyn DiceRoller + Send>>,
}

impl GameBuilder {
    pub fn new(assets: Assets) -> Self {
        Self {
            assets,
            seed: 0,
            shuffle: true,
            dice: None,
        }
    }

    /// Seed for shuffling and the default dice.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Whether to shuffle races and abilities before the game. On by default.
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Replace the seeded dice.
    pub fn dice(mut self, dice: impl DiceRoller + Send + 'static) -> Self {
        self.dice = Some(Box::new(dice));
        self
    }

    /// Build a game with the standard rules.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetsError`] if the assets can't support a game.
    pub fn build(self) -> Result<Game, AssetsError> {
        self.build_with_rules(DefaultRules::new())
    }

    /// Build a game with a custom rule set.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetsError`] if the assets can't support a game.
    pub fn build_with_rules<R: Rules>(self, rules: R) -> Result<Game<R>, AssetsError> {
        self.assets.validate()?;

        let root = GameRng::new(self.seed);
        let assets = if self.shuffle {
            let mut rng = root.for_context("shuffle");
            self.assets.shuffled(&mut rng)
        } else {
            self.assets
        };
        debug!(seed = self.seed, shuffled = self.shuffle, "Assets prepared");

        let dice: Box<dyn DiceRoller + Send> = match self.dice {
            Some(dice) => dice,
            None => Box::new(root.for_context("dice")),
        };
        Ok(Game::from_parts(Arc::new(assets), rules, dice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{Ability, Race};
    use crate::map::{Map, Terrain, Tile};

    fn assets(n_races: usize) -> Assets {
        let map = Map::new(vec![Tile::new(Terrain::Forest).at_border()], vec![]).unwrap();
        let mut assets = Assets::new(map).with_selectable_combos(2);
        for i in 0..n_races {
            assets = assets.with_race(Race::new(format!("Race {}", i), 3, 8));
        }
        for i in 0..8 {
            assets = assets.with_ability(Ability::new(format!("Ability {}", i), 1));
        }
        assets
    }

    #[test]
    fn test_build_rejects_invalid_assets() {
        let err = GameBuilder::new(assets(3)).build().unwrap_err();
        assert!(matches!(err, AssetsError::NotEnoughRaces { required: 6, actual: 3, .. }));
    }

    #[test]
    fn test_same_seed_same_setup() {
        let a = GameBuilder::new(assets(8)).seed(7).build().unwrap();
        let b = GameBuilder::new(assets(8)).seed(7).build().unwrap();
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_no_shuffle_keeps_order() {
        let game = GameBuilder::new(assets(8)).shuffle(false).build().unwrap();
        let races: Vec<_> = game.state().assets().races.iter().map(|r| r.name.clone()).collect();
        assert_eq!(races[0], "Race 0");
        assert_eq!(races[7], "Race 7");
    }
}
