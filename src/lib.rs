pub mod config;
pub mod error;
pub mod evolution;
pub mod geometry;
pub mod neural;
pub mod pit;
pub mod rng;
pub mod server;
pub mod snake;
pub mod stats;
