//! Generation entry point that turns a config and an RNG into a dungeon.

use log::debug;
use rand_chacha::rand_core::Rng;

use crate::config::GeneratorConfig;

use super::model::Dungeon;
use super::walk::run_random_walk;

pub struct MapGenerator {
    config: GeneratorConfig,
}

impl MapGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate<R: Rng>(&self, rng: &mut R) -> Dungeon {
        let config = &self.config;
        let floor = run_random_walk(
            config.start,
            config.walker_count,
            config.walk_length,
            config.max_steps_per_walker,
            rng,
        );
        let dungeon = Dungeon::new(config.start, floor, config.wall_padding);

        let (min, max) = dungeon.bounds();
        debug!(
            "generated {} floor cells from {} walkers x {} steps, bounds {min}..={max}",
            dungeon.floor().len(),
            config.walker_count + 1,
            config.effective_steps(),
        );
        dungeon
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::types::Cell;

    #[test]
    fn same_seed_produces_byte_identical_dungeons() {
        let generator = MapGenerator::new(GeneratorConfig::default());
        let a = generator.generate(&mut ChaCha8Rng::seed_from_u64(123_456));
        let b = generator.generate(&mut ChaCha8Rng::seed_from_u64(123_456));
        assert_eq!(a.canonical_bytes(), b.canonical_bytes());
    }

    #[test]
    fn different_seeds_change_the_layout() {
        let generator = MapGenerator::new(GeneratorConfig::default());
        let a = generator.generate(&mut ChaCha8Rng::seed_from_u64(1));
        let b = generator.generate(&mut ChaCha8Rng::seed_from_u64(2));
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn zero_walkers_returns_the_start_when_steps_are_zero() {
        let config = GeneratorConfig {
            start: Cell::new(-5, 8),
            walker_count: 0,
            walk_length: 0,
            ..Default::default()
        };
        let dungeon = MapGenerator::new(config).generate(&mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(dungeon.floor().len(), 1);
        assert!(dungeon.is_floor(Cell::new(-5, 8)));
    }

    #[test]
    fn padding_is_carried_into_the_dungeon() {
        let config = GeneratorConfig { wall_padding: 3, ..Default::default() };
        let dungeon = MapGenerator::new(config).generate(&mut ChaCha8Rng::seed_from_u64(4));
        assert_eq!(dungeon.wall_padding(), 3);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]
        #[test]
        fn start_cell_is_always_floor(
            seed in any::<u64>(),
            walkers in 0_usize..5,
            walk_length in 1_usize..300,
            max_steps in 1_usize..300,
        ) {
            let config = GeneratorConfig {
                walker_count: walkers,
                walk_length,
                max_steps_per_walker: max_steps,
                ..Default::default()
            };
            let dungeon = MapGenerator::new(config).generate(&mut ChaCha8Rng::seed_from_u64(seed));
            prop_assert!(dungeon.is_floor(Cell::ZERO));
        }
    }
}
