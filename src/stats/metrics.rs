use crate::snake::{Death, Snake, Status};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationMetrics {
    pub generation: u32,
    pub population: usize,
    pub best_fitness: i64,
    pub worst_fitness: i64,
    pub avg_fitness: f64,
    pub avg_length: f64,
    pub max_length: usize,
    pub avg_moves: f64,
    pub total_food: u64,
    pub timeouts: usize,
    pub wall_collisions: usize,
    pub self_collisions: usize,
}

impl GenerationMetrics {
    pub fn compute(generation: u32, snakes: &[Snake]) -> Self {
        let population = snakes.len();

        if population == 0 {
            return Self {
                generation,
                population: 0,
                best_fitness: 0,
                worst_fitness: 0,
                avg_fitness: 0.0,
                avg_length: 0.0,
                max_length: 0,
                avg_moves: 0.0,
                total_food: 0,
                timeouts: 0,
                wall_collisions: 0,
                self_collisions: 0,
            };
        }

        let best_fitness = snakes.iter().map(|s| s.fitness()).max().unwrap_or(0);
        let worst_fitness = snakes.iter().map(|s| s.fitness()).min().unwrap_or(0);
        let total_fitness: i64 = snakes.iter().map(|s| s.fitness()).sum();
        let avg_fitness = total_fitness as f64 / population as f64;

        let total_length: usize = snakes.iter().map(|s| s.length()).sum();
        let avg_length = total_length as f64 / population as f64;
        let max_length = snakes.iter().map(|s| s.length()).max().unwrap_or(0);

        let total_moves: usize = snakes.iter().map(|s| s.movements().len()).sum();
        let avg_moves = total_moves as f64 / population as f64;

        let total_food: u64 = snakes.iter().map(|s| s.food_eaten() as u64).sum();

        let deaths = |death: Death| {
            snakes
                .iter()
                .filter(|s| s.status() == Status::Dead(death))
                .count()
        };

        Self {
            generation,
            population,
            best_fitness,
            worst_fitness,
            avg_fitness,
            avg_length,
            max_length,
            avg_moves,
            total_food,
            timeouts: deaths(Death::Timeout),
            wall_collisions: deaths(Death::WallCollision),
            self_collisions: deaths(Death::SelfCollision),
        }
    }
}
