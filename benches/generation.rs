use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use snake_pit::config::Config;
use snake_pit::pit::SnakePit;
use snake_pit::snake::Species;

fn pit_config(species: Species, parallel: bool) -> Config {
    let mut config = Config::default();
    config.grid.width = 20;
    config.grid.height = 20;
    config.population.size = 500;
    config.population.species = species;
    config.evolution.parallel_survival = parallel;
    config
}

fn one_generation(c: &mut Criterion) {
    for parallel in [false, true] {
        let config = pit_config(Species::FullMovement, parallel);
        let name = if parallel {
            "generation_parallel"
        } else {
            "generation_sequential"
        };

        c.bench_function(name, |b| {
            b.iter_batched(
                || {
                    let mut pit = SnakePit::new(&config, StdRng::seed_from_u64(7)).unwrap();
                    pit.spawn().unwrap();
                    pit
                },
                |mut pit| pit.survive().unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
}

criterion_group!(benches, one_generation);
criterion_main!(benches);
