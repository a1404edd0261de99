use super::forward_only::ForwardOnly;
use super::full_movement::FullMovement;
use crate::error::ConfigError;
use crate::geometry::{Grid, Heading, Movement, Point};
use crate::neural::{Activation, NeuralNetwork};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

pub const HATCHLING_LENGTH: usize = 4;
pub const HATCHLING_SPAWN_MARGIN: usize = 4;

pub const MIN_GRID_SIDE: usize = HATCHLING_LENGTH + HATCHLING_SPAWN_MARGIN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    pub inputs: usize,
    pub outputs: usize,
    pub hidden: &'static [usize],
}

pub trait Physiology: Send + Sync {
    fn topology(&self) -> Topology;

    fn segment(&self, x: i32, y: i32, heading: Heading) -> Point;

    fn food(&self, x: i32, y: i32) -> Point;

    /// Network inputs for the current body (tail first, head last) and food cell.
    fn look(&self, body: &VecDeque<Point>, food: &Point, grid: &Grid) -> Vec<f64>;

    fn decode(&self, outputs: &[f64], rng: &mut dyn RngCore) -> Movement;
}

static FORWARD_ONLY: ForwardOnly = ForwardOnly;
static FULL_MOVEMENT: FullMovement = FullMovement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Species {
    ForwardOnly,
    FullMovement,
}

impl Species {
    pub fn physiology(&self) -> &'static dyn Physiology {
        match self {
            Species::ForwardOnly => &FORWARD_ONLY,
            Species::FullMovement => &FULL_MOVEMENT,
        }
    }

    pub fn topology(&self) -> Topology {
        self.physiology().topology()
    }

    pub fn brain(&self, activation: Activation) -> NeuralNetwork {
        let topology = self.topology();
        NeuralNetwork::new(activation, topology.inputs, topology.outputs, topology.hidden)
    }

    /// Straight hatchling, tail first, pointing along a random compass heading.
    ///
    /// The tail is placed so the body and a spawn margin ahead of the head fit on the grid.
    pub fn hatchling<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> Vec<Point> {
        let length = HATCHLING_LENGTH as i32;
        let reach = (HATCHLING_LENGTH + HATCHLING_SPAWN_MARGIN) as i32;
        let heading = Heading::ALL[rng.gen_range(0..Heading::ALL.len())];

        let (x_tail, y_tail) = match heading {
            Heading::North => (
                rng.gen_range(0..grid.width()),
                reach - 1 + rng.gen_range(0..(grid.height() - reach + 1).max(1)),
            ),
            Heading::East => (
                rng.gen_range(0..(grid.width() - reach + 1).max(1)),
                rng.gen_range(0..grid.height()),
            ),
            Heading::South => (
                rng.gen_range(0..grid.width()),
                rng.gen_range(0..(grid.height() - reach + 1).max(1)),
            ),
            Heading::West => (
                reach - 1 + rng.gen_range(0..(grid.width() - reach + 1).max(1)),
                rng.gen_range(0..grid.height()),
            ),
        };

        let (dx, dy) = heading.delta();
        let physiology = self.physiology();
        let hatchling: Vec<Point> = (0..length)
            .map(|i| physiology.segment(x_tail + i * dx, y_tail + i * dy, heading))
            .collect();

        log::debug!("Hatchling ({:?}): {:?}", heading, hatchling);
        hatchling
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::ForwardOnly => "forward_only",
            Species::FullMovement => "full_movement",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        match tag.as_str() {
            "forwardonly" => Ok(Species::ForwardOnly),
            "fullmovement" => Ok(Species::FullMovement),
            _ => Err(ConfigError::UnknownSpecies(s.to_string())),
        }
    }
}

impl TryFrom<String> for Species {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Species> for String {
    fn from(species: Species) -> Self {
        species.as_str().to_string()
    }
}
