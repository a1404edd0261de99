use crate::error::ConfigError;
use crate::geometry::Grid;
use crate::neural::Activation;
use crate::snake::species::MIN_GRID_SIDE;
use crate::snake::Species;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub grid: GridConfig,
    pub population: PopulationConfig,
    pub evolution: EvolutionConfig,
    pub simulation: SimulationConfig,
    pub progress: ProgressConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    pub size: usize,
    pub species: Species,
    #[serde(default)]
    pub activation: Activation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    pub mutation_probability: f64,
    pub max_generations: u32,
    #[serde(default = "default_parallel_survival")]
    pub parallel_survival: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed seed for the shared random stream; entropy when absent.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    pub enabled: bool,
    pub directory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub enabled: bool,
    pub address: String,
    pub port: u16,
    pub update_rate_hz: u64,
    pub static_dir: String,
}

fn default_parallel_survival() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                width: 40,
                height: 40,
            },
            population: PopulationConfig {
                size: 10_000,
                species: Species::FullMovement,
                activation: Activation::Relu,
            },
            evolution: EvolutionConfig {
                mutation_probability: 0.4,
                max_generations: 2_000,
                parallel_survival: true,
            },
            simulation: SimulationConfig { seed: None },
            progress: ProgressConfig {
                enabled: true,
                directory: "progress".to_string(),
            },
            server: ServerConfig {
                enabled: true,
                address: "0.0.0.0".to_string(),
                port: 8080,
                update_rate_hz: 2,
                static_dir: "static".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let probability = self.evolution.mutation_probability;
        if !(0.0..=1.0).contains(&probability) {
            return Err(ConfigError::InvalidMutationProbability(probability));
        }

        if self.grid.width < MIN_GRID_SIDE || self.grid.height < MIN_GRID_SIDE {
            return Err(ConfigError::GridTooSmall {
                width: self.grid.width,
                height: self.grid.height,
                minimum: MIN_GRID_SIDE,
            });
        }

        self.grid()?;

        if self.population.size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population.size));
        }

        Ok(())
    }

    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(self.grid.width, self.grid.height).ok_or(ConfigError::GridTooLarge {
            width: self.grid.width,
            height: self.grid.height,
        })
    }
}
