pub mod crossover;
pub mod mutation;

pub use crossover::{crossover, crossover_at};
pub use mutation::Mutator;
