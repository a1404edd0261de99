pub mod forward_only;
pub mod full_movement;
pub mod species;

pub use species::{Physiology, Species, Topology};

use crate::error::NetworkError;
use crate::geometry::{Grid, Movement, Point};
use crate::neural::{Activation, NetworkState, NeuralNetwork};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const MOVE_TIMEOUT_INITIAL: u32 = 200;
pub const MOVE_TIMEOUT_INCREMENT: u32 = 50;
pub const MOVE_TIMEOUT_LIMIT: u32 = 500;

pub const FOOD_REWARD: i64 = 10;
pub const MOVED_AWAY_PENALTY: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Death {
    Timeout,
    WallCollision,
    SelfCollision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Alive,
    Dead(Death),
}

impl Status {
    pub fn is_alive(&self) -> bool {
        matches!(self, Status::Alive)
    }
}

#[derive(Debug, Clone)]
pub struct Snake {
    species: Species,
    grid: Grid,
    brain: NeuralNetwork,
    hatchling: Vec<Point>,
    body: VecDeque<Point>,
    movements: Vec<Movement>,
    food_locations: Vec<Point>,
    food: Option<Point>,
    status: Status,
    fitness: i64,
    food_eaten: u32,
    moved_closer: u32,
    moved_away: u32,
    move_timeout: u32,
    move_timeout_limit: u32,
    distance_to_food: f64,
}

impl Snake {
    pub fn new<R: Rng + ?Sized>(
        species: Species,
        grid: Grid,
        activation: Activation,
        rng: &mut R,
    ) -> Self {
        let mut brain = species.brain(activation);
        brain.set_random_state(rng);
        let hatchling = species.hatchling(&grid, rng);
        Self::with_body(species, grid, brain, hatchling)
    }

    pub fn from_state<R: Rng + ?Sized>(
        species: Species,
        grid: Grid,
        activation: Activation,
        state: &NetworkState,
        rng: &mut R,
    ) -> Result<Self, NetworkError> {
        let mut brain = species.brain(activation);
        brain.set_state(state)?;
        let hatchling = species.hatchling(&grid, rng);
        Ok(Self::with_body(species, grid, brain, hatchling))
    }

    pub fn with_body(species: Species, grid: Grid, brain: NeuralNetwork, hatchling: Vec<Point>) -> Self {
        let body = hatchling.iter().copied().collect();
        Self {
            species,
            grid,
            brain,
            hatchling,
            body,
            movements: Vec::new(),
            food_locations: Vec::new(),
            food: None,
            status: Status::Alive,
            fitness: 0,
            food_eaten: 0,
            moved_closer: 0,
            moved_away: 0,
            move_timeout: 0,
            move_timeout_limit: MOVE_TIMEOUT_INITIAL,
            distance_to_food: 0.0,
        }
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn brain(&self) -> &NeuralNetwork {
        &self.brain
    }

    pub fn hatchling(&self) -> &[Point] {
        &self.hatchling
    }

    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn head(&self) -> Option<&Point> {
        self.body.back()
    }

    pub fn length(&self) -> usize {
        self.body.len()
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn food(&self) -> Option<&Point> {
        self.food.as_ref()
    }

    pub fn food_locations(&self) -> &[Point] {
        &self.food_locations
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn fitness(&self) -> i64 {
        self.fitness
    }

    pub fn food_eaten(&self) -> u32 {
        self.food_eaten
    }

    pub fn moved_closer(&self) -> u32 {
        self.moved_closer
    }

    pub fn moved_away(&self) -> u32 {
        self.moved_away
    }

    pub fn move_timeout(&self) -> u32 {
        self.move_timeout
    }

    pub fn move_timeout_limit(&self) -> u32 {
        self.move_timeout_limit
    }

    /// Put food on a uniformly chosen cell not covered by the body.
    ///
    /// When the body covers every cell the current food stays where it is.
    pub fn place_food<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.body.len() >= self.grid.cells() {
            return;
        }

        let physiology = self.species.physiology();
        let food = loop {
            let x = rng.gen_range(0..self.grid.width());
            let y = rng.gen_range(0..self.grid.height());
            let candidate = physiology.food(x, y);
            if !self.body.contains(&candidate) {
                break candidate;
            }
        };

        self.set_food(food);
    }

    /// Put food on a specific cell.
    ///
    /// Only food laid before the first move sets the approach baseline; later food is
    /// measured from the distance of the previous step.
    pub fn set_food(&mut self, food: Point) {
        if self.movements.is_empty() {
            if let Some(head) = self.body.back() {
                self.distance_to_food = head.distance_to(&food);
            }
        }
        self.food = Some(food);
        self.food_locations.push(food);
    }

    pub fn step<R: RngCore>(&mut self, rng: &mut R) -> Result<Status, NetworkError> {
        if !self.status.is_alive() {
            return Ok(self.status);
        }
        if self.food.is_none() {
            self.place_food(rng);
        }

        self.move_timeout += 1;
        if self.move_timeout > self.move_timeout_limit {
            return Ok(self.die(Death::Timeout));
        }

        let head = match self.body.back() {
            Some(head) => *head,
            None => return Ok(self.die(Death::SelfCollision)),
        };
        let food = self.food.unwrap_or(head);

        let physiology = self.species.physiology();
        let inputs = physiology.look(&self.body, &food, &self.grid);
        let outputs = self.brain.think(&inputs)?;
        let movement = physiology.decode(&outputs, rng);
        let next = head.translate(movement);

        if !self.grid.contains(&next) {
            return Ok(self.die(Death::WallCollision));
        }
        if self.body.contains(&next) {
            return Ok(self.die(Death::SelfCollision));
        }

        self.body.push_back(next);
        self.movements.push(movement);

        let distance = next.distance_to(&food);
        if distance < self.distance_to_food {
            self.moved_closer += 1;
        } else {
            self.moved_away += 1;
        }
        self.distance_to_food = distance;

        if next == food {
            self.food_eaten += 1;
            self.move_timeout = 0;
            self.move_timeout_limit =
                (self.move_timeout_limit + MOVE_TIMEOUT_INCREMENT).min(MOVE_TIMEOUT_LIMIT);
            self.place_food(rng);
        } else {
            self.body.pop_front();
        }

        Ok(self.status)
    }

    pub fn survive<R: RngCore>(&mut self, rng: &mut R) -> Result<Status, NetworkError> {
        if self.food.is_none() {
            self.place_food(rng);
        }
        while self.step(rng)?.is_alive() {}
        Ok(self.status)
    }

    fn die(&mut self, death: Death) -> Status {
        let penalty = (MOVED_AWAY_PENALTY * self.moved_away as f64).round() as i64;
        self.fitness = self.moved_closer as i64 - penalty + FOOD_REWARD * self.food_eaten as i64;
        self.status = Status::Dead(death);

        log::debug!(
            "Snake died ({:?}) after {} moves: length {}, food {}, fitness {}",
            death,
            self.movements.len(),
            self.body.len(),
            self.food_eaten,
            self.fitness
        );

        self.status
    }

    pub fn replay(&self) -> Replay {
        Replay {
            species: self.species,
            grid: self.grid,
            hatchling: self.hatchling.clone(),
            movements: self.movements.clone(),
            food: self.food_locations.clone(),
            fitness: self.fitness,
            length: self.body.len(),
            death: match self.status {
                Status::Alive => None,
                Status::Dead(death) => Some(death),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub species: Species,
    pub grid: Grid,
    pub hatchling: Vec<Point>,
    pub movements: Vec<Movement>,
    pub food: Vec<Point>,
    pub fitness: i64,
    pub length: usize,
    pub death: Option<Death>,
}

impl Replay {
    pub fn bodies(&self) -> Vec<Vec<Point>> {
        let mut body: VecDeque<Point> = self.hatchling.iter().copied().collect();
        let mut bodies = Vec::with_capacity(self.movements.len() + 1);
        bodies.push(self.hatchling.clone());

        let mut food = self.food.iter();
        let mut current = food.next();
        for &movement in &self.movements {
            let head = match body.back() {
                Some(head) => head.translate(movement),
                None => break,
            };
            body.push_back(head);
            if current == Some(&head) {
                current = food.next();
            } else {
                body.pop_front();
            }
            bodies.push(body.iter().copied().collect());
        }

        bodies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::species::HATCHLING_LENGTH;
    use crate::geometry::Heading;
    use crate::neural::state::{Param, Slot};
    use rand::{rngs::StdRng, SeedableRng};

    fn fixed_brain(species: Species, output: usize) -> NeuralNetwork {
        let mut brain = species.brain(Activation::Relu);
        let topology = species.topology();
        let mut sizes = topology.hidden.to_vec();
        sizes.push(topology.outputs);

        let mut state = NetworkState::zeroed(topology.inputs, &sizes);
        let index = state
            .index_of(Slot {
                layer: sizes.len() - 1,
                neuron: output,
                param: Param::Bias,
            })
            .unwrap();
        state.as_mut_slice()[index] = 1.0;
        brain.set_state(&state).unwrap();
        brain
    }

    fn southbound(x: i32, tail_y: i32) -> Vec<Point> {
        (0..4)
            .map(|i| Point::headed(x, tail_y + i, Heading::South))
            .collect()
    }

    #[test]
    fn test_move_south_and_eat() {
        let mut rng = StdRng::seed_from_u64(1);
        let brain = fixed_brain(Species::ForwardOnly, 0);
        let mut snake = Snake::with_body(Species::ForwardOnly, Grid::new(5, 5).unwrap(), brain, southbound(2, 0));
        snake.set_food(Point::plain(2, 4));

        let status = snake.step(&mut rng).unwrap();

        assert_eq!(status, Status::Alive);
        assert_eq!(snake.length(), 5);
        assert_eq!(snake.food_eaten(), 1);
        assert_eq!(snake.move_timeout(), 0);
        assert_eq!(
            snake.move_timeout_limit(),
            MOVE_TIMEOUT_INITIAL + MOVE_TIMEOUT_INCREMENT
        );
        assert_eq!(snake.head(), Some(&Point::plain(2, 4)));
        assert_eq!(snake.moved_closer(), 1);

        // new food is off the body
        let food = snake.food().copied().unwrap();
        assert_ne!(food, Point::plain(2, 4));
        assert!(!snake.body().contains(&food));
        assert_eq!(snake.food_locations().len(), 2);
    }

    #[test]
    fn test_wall_collision() {
        let mut rng = StdRng::seed_from_u64(2);
        let brain = fixed_brain(Species::ForwardOnly, 0);
        let mut snake = Snake::with_body(Species::ForwardOnly, Grid::new(5, 5).unwrap(), brain, southbound(2, 0));
        snake.set_food(Point::plain(0, 0));

        assert_eq!(snake.step(&mut rng).unwrap(), Status::Alive);
        assert_eq!(
            snake.step(&mut rng).unwrap(),
            Status::Dead(Death::WallCollision)
        );

        // one step away from the food, rounded penalty of 1.5
        assert_eq!(snake.moved_away(), 1);
        assert_eq!(snake.fitness(), -2);
        assert_eq!(snake.movements().len(), 1);
        assert_eq!(snake.length(), 4);

        // dead snakes stay dead
        assert_eq!(
            snake.step(&mut rng).unwrap(),
            Status::Dead(Death::WallCollision)
        );
        assert_eq!(snake.movements().len(), 1);
    }

    #[test]
    fn test_self_collision_includes_tail() {
        let mut rng = StdRng::seed_from_u64(3);
        // outputs are [left, right, up, down]
        let brain = fixed_brain(Species::FullMovement, 2);
        let body = vec![
            Point::plain(1, 1),
            Point::plain(2, 1),
            Point::plain(2, 2),
            Point::plain(1, 2),
        ];
        let mut snake = Snake::with_body(Species::FullMovement, Grid::new(8, 8).unwrap(), brain, body);
        snake.set_food(Point::plain(6, 6));

        assert_eq!(
            snake.step(&mut rng).unwrap(),
            Status::Dead(Death::SelfCollision)
        );
        assert_eq!(snake.fitness(), 0);
    }

    #[test]
    fn test_timeout() {
        let mut rng = StdRng::seed_from_u64(4);
        let brain = fixed_brain(Species::ForwardOnly, 0);
        let body = (0..4).map(|x| Point::headed(x, 2, Heading::East)).collect();
        let mut snake = Snake::with_body(Species::ForwardOnly, Grid::new(600, 5).unwrap(), brain, body);
        snake.set_food(Point::plain(0, 0));

        let mut steps = 0;
        while snake.step(&mut rng).unwrap().is_alive() {
            steps += 1;
        }
        steps += 1;

        assert_eq!(snake.status(), Status::Dead(Death::Timeout));
        assert_eq!(steps, MOVE_TIMEOUT_INITIAL + 1);
        assert_eq!(snake.movements().len(), MOVE_TIMEOUT_INITIAL as usize);
        assert_eq!(snake.moved_away(), MOVE_TIMEOUT_INITIAL);
        assert_eq!(snake.fitness(), -300);
    }

    #[test]
    fn test_step_after_eating_is_measured_from_the_meal() {
        let mut rng = StdRng::seed_from_u64(10);
        let brain = fixed_brain(Species::ForwardOnly, 0);
        let mut snake = Snake::with_body(Species::ForwardOnly, Grid::new(5, 40).unwrap(), brain, southbound(2, 0));
        snake.set_food(Point::plain(2, 4));

        assert!(snake.step(&mut rng).unwrap().is_alive());
        assert_eq!(snake.food_eaten(), 1);
        snake.set_food(Point::plain(2, 20));

        // the head sat on the eaten food, so any next step moves away
        assert!(snake.step(&mut rng).unwrap().is_alive());
        assert_eq!(snake.head(), Some(&Point::plain(2, 5)));
        assert_eq!(snake.moved_closer(), 1);
        assert_eq!(snake.moved_away(), 1);

        assert!(snake.step(&mut rng).unwrap().is_alive());
        assert_eq!(snake.moved_closer(), 2);
        assert_eq!(snake.moved_away(), 1);
    }

    #[test]
    fn test_timeout_limit_is_capped() {
        let mut rng = StdRng::seed_from_u64(5);
        let brain = fixed_brain(Species::ForwardOnly, 0);
        let body = (0..4).map(|x| Point::headed(x, 2, Heading::East)).collect();
        let mut snake = Snake::with_body(Species::ForwardOnly, Grid::new(40, 5).unwrap(), brain, body);

        // lay food directly ahead of the head ten times
        for _ in 0..10 {
            let head = *snake.head().unwrap();
            snake.set_food(Point::plain(head.x() + 1, head.y()));
            assert!(snake.step(&mut rng).unwrap().is_alive());
        }

        assert_eq!(snake.food_eaten(), 10);
        assert_eq!(snake.length(), 14);
        assert_eq!(snake.move_timeout_limit(), MOVE_TIMEOUT_LIMIT);
    }

    #[test]
    fn test_survive_fitness() {
        let mut rng = StdRng::seed_from_u64(6);
        let grid = Grid::new(12, 12).unwrap();

        for species in [Species::ForwardOnly, Species::FullMovement] {
            for _ in 0..20 {
                let mut snake = Snake::new(species, grid, Activation::Relu, &mut rng);
                let status = snake.survive(&mut rng).unwrap();

                assert!(!status.is_alive());
                let penalty = (1.5 * snake.moved_away() as f64).round() as i64;
                assert_eq!(
                    snake.fitness(),
                    snake.moved_closer() as i64 - penalty + 10 * snake.food_eaten() as i64
                );
                assert_eq!(
                    snake.length(),
                    HATCHLING_LENGTH + snake.food_eaten() as usize
                );
                assert!(snake.body().iter().all(|p| grid.contains(p)));
            }
        }
    }

    #[test]
    fn test_food_never_on_body() {
        let mut rng = StdRng::seed_from_u64(7);
        let brain = fixed_brain(Species::FullMovement, 0);
        let body: Vec<Point> = (0..8).map(|x| Point::plain(x, 0)).collect();
        let mut snake = Snake::with_body(Species::FullMovement, Grid::new(8, 2).unwrap(), brain, body);

        for _ in 0..50 {
            snake.place_food(&mut rng);
            assert_eq!(snake.food().map(|f| f.y()), Some(1));
        }
    }

    #[test]
    fn test_food_stays_when_grid_is_full() {
        let mut rng = StdRng::seed_from_u64(8);
        let brain = fixed_brain(Species::FullMovement, 0);
        let body = vec![
            Point::plain(0, 0),
            Point::plain(1, 0),
            Point::plain(1, 1),
            Point::plain(0, 1),
        ];
        let mut snake = Snake::with_body(Species::FullMovement, Grid::new(2, 2).unwrap(), brain, body);
        snake.set_food(Point::plain(1, 1));

        snake.place_food(&mut rng);
        assert_eq!(snake.food(), Some(&Point::plain(1, 1)));
        assert_eq!(snake.food_locations().len(), 1);
    }

    #[test]
    fn test_replay_reconstructs_body() {
        let mut rng = StdRng::seed_from_u64(9);
        let grid = Grid::new(16, 16).unwrap();

        for species in [Species::ForwardOnly, Species::FullMovement] {
            for _ in 0..10 {
                let mut snake = Snake::new(species, grid, Activation::Relu, &mut rng);
                snake.survive(&mut rng).unwrap();

                let replay = snake.replay();
                let bodies = replay.bodies();
                assert_eq!(bodies.len(), snake.movements().len() + 1);
                assert_eq!(bodies[0], snake.hatchling());

                let last: Vec<Point> = snake.body().iter().copied().collect();
                assert_eq!(bodies.last(), Some(&last));
                assert_eq!(replay.length, snake.length());
                assert!(replay.death.is_some());
            }
        }
    }
}
