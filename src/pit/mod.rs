use crate::config::Config;
use crate::error::{ConfigError, NetworkError, PitError};
use crate::evolution::{crossover, Mutator};
use crate::geometry::Grid;
use crate::neural::{Activation, NetworkState};
use crate::snake::{Snake, Species};
use crate::stats::{GenerationMetrics, ProgressRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Share of the population, after the elite, that is kept as mates.
pub const MATING_POOL_PERCENT: usize = 1;

pub struct SnakePit {
    grid: Grid,
    species: Species,
    activation: Activation,
    population_size: usize,
    mutator: Mutator,
    parallel: bool,
    rng: StdRng,
    snakes: Vec<Snake>,
    best: Option<Snake>,
    champion: Option<Snake>,
    mating_pool: Vec<NetworkState>,
    high_score: i64,
    generation: u32,
}

impl SnakePit {
    pub fn new(config: &Config, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let mutator = Mutator::from_probability(config.evolution.mutation_probability)?;

        log::info!(
            "Snake pit: {} {} snakes on a {}x{} grid, mutation probability {}, activation {}",
            config.population.size,
            config.population.species,
            config.grid.width,
            config.grid.height,
            mutator.probability(),
            config.population.activation.description()
        );

        Ok(Self {
            grid: config.grid()?,
            species: config.population.species,
            activation: config.population.activation,
            population_size: config.population.size,
            mutator,
            parallel: config.evolution.parallel_survival,
            rng,
            snakes: Vec::with_capacity(config.population.size),
            best: None,
            champion: None,
            mating_pool: Vec::new(),
            high_score: 0,
            generation: 0,
        })
    }

    /// Fill the population for the next generation.
    ///
    /// The first generation gets random brains. Later ones start with the elite and
    /// are topped up with offspring of the elite and a random mate from the pool.
    pub fn spawn(&mut self) -> Result<(), PitError> {
        let mut snakes = Vec::with_capacity(self.population_size);

        if self.generation == 0 {
            for _ in 0..self.population_size {
                snakes.push(Snake::new(self.species, self.grid, self.activation, &mut self.rng));
            }
        } else {
            let elite = match &self.best {
                Some(best) if !self.mating_pool.is_empty() => best.brain().state()?.clone(),
                _ => {
                    return Err(PitError::NoMatingPool {
                        generation: self.generation + 1,
                    })
                }
            };

            snakes.push(self.hatch(&elite)?);
            while snakes.len() < self.population_size {
                let mate = &self.mating_pool[self.rng.gen_range(0..self.mating_pool.len())];
                let (daughter, son) = crossover(&elite, mate, &self.mutator, &mut self.rng)?;

                snakes.push(self.hatch(&daughter)?);
                if snakes.len() < self.population_size {
                    snakes.push(self.hatch(&son)?);
                }
            }
        }

        self.snakes = snakes;
        self.generation += 1;
        Ok(())
    }

    pub fn survive(&mut self) -> Result<(ProgressRecord, GenerationMetrics), PitError> {
        if self.snakes.is_empty() {
            self.spawn()?;
        }

        if self.parallel {
            let seeds: Vec<u64> = self.snakes.iter().map(|_| self.rng.gen()).collect();
            self.snakes
                .par_iter_mut()
                .zip(seeds)
                .try_for_each(|(snake, seed)| -> Result<(), NetworkError> {
                    let mut rng = StdRng::seed_from_u64(seed);
                    snake.survive(&mut rng)?;
                    Ok(())
                })?;
        } else {
            for snake in &mut self.snakes {
                snake.survive(&mut self.rng)?;
            }
        }

        // stable, so equal fitness keeps population order
        self.snakes.sort_by(|a, b| b.fitness().cmp(&a.fitness()));

        let top = match self.snakes.first() {
            Some(top) => top.clone(),
            None => {
                return Err(PitError::NoMatingPool {
                    generation: self.generation,
                })
            }
        };

        let state = top.brain().state()?.clone();
        self.best = Some(self.hatch(&state)?);

        let selection = (self.snakes.len() * MATING_POOL_PERCENT / 100).max(1);
        self.mating_pool = self
            .snakes
            .iter()
            .skip(1)
            .take(selection)
            .map(|snake| snake.brain().state().cloned())
            .collect::<Result<Vec<_>, _>>()?;

        let record = ProgressRecord {
            generation: self.generation,
            fitness: top.fitness(),
            length: top.length(),
            moves: top.movements().len(),
        };
        let metrics = GenerationMetrics::compute(self.generation, &self.snakes);

        self.report(&record, &metrics);
        self.champion = Some(top);

        Ok((record, metrics))
    }

    fn hatch(&mut self, state: &NetworkState) -> Result<Snake, NetworkError> {
        Snake::from_state(self.species, self.grid, self.activation, state, &mut self.rng)
    }

    fn report(&mut self, record: &ProgressRecord, metrics: &GenerationMetrics) {
        if self.high_score == 0 {
            self.high_score = record.fitness;
        }
        let delta = relative_delta(record.fitness, self.high_score);
        let high_score = self.high_score.max(record.fitness);
        self.high_score = high_score;

        log::info!(
            "Best snake in generation #{}, length: {}, moves: {}, score: {} [{}{}%, {}]",
            record.generation,
            record.length,
            record.moves,
            record.fitness,
            if delta > 0 { "+" } else { "" },
            delta,
            high_score
        );
        log::info!(
            "Generation #{}: avg fitness {:.2}, avg length {:.2}, food {}, deaths timeout/wall/self {}/{}/{}",
            metrics.generation,
            metrics.avg_fitness,
            metrics.avg_length,
            metrics.total_food,
            metrics.timeouts,
            metrics.wall_collisions,
            metrics.self_collisions
        );
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    /// Fresh copy of the last generation's top brain, carried into the next one.
    pub fn best(&self) -> Option<&Snake> {
        self.best.as_ref()
    }

    /// The last generation's top snake as it was evaluated, with its full run recorded.
    pub fn champion(&self) -> Option<&Snake> {
        self.champion.as_ref()
    }

    pub fn mating_pool_len(&self) -> usize {
        self.mating_pool.len()
    }

    pub fn high_score(&self) -> i64 {
        self.high_score
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn species(&self) -> Species {
        self.species
    }
}

/// Percentage change of `fitness` against `high_score`, signed by the high score.
fn relative_delta(fitness: i64, high_score: i64) -> i64 {
    if high_score == 0 {
        return 0;
    }
    (100.0 * (fitness - high_score) as f64 / high_score as f64).round() as i64
}
