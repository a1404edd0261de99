pub mod grid;
pub mod movement;
pub mod point;

pub use grid::Grid;
pub use movement::{Movement, Turn};
pub use point::{Heading, Point};
