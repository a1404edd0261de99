use super::movement::{Movement, Turn};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Absolute compass heading on the grid. `y` grows southwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Heading::North => (0, -1),
            Heading::East => (1, 0),
            Heading::South => (0, 1),
            Heading::West => (-1, 0),
        }
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Heading::North),
            (1, 0) => Some(Heading::East),
            (0, 1) => Some(Heading::South),
            (-1, 0) => Some(Heading::West),
            _ => None,
        }
    }

    pub fn turned(&self, turn: Turn) -> Self {
        let (dx, dy) = self.delta();
        let (new_dx, new_dy) = match turn {
            Turn::Forward => (dx, dy),
            Turn::Right => (-dy, dx),
            Turn::Left => (dy, -dx),
        };
        Heading::from_delta(new_dx, new_dy).unwrap_or(*self)
    }
}

/// Grid coordinate, optionally carrying the heading it was laid down with.
///
/// Equality and hashing look at the coordinate only, so a headed body segment
/// matches a plain food cell at the same position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Point {
    Plain { x: i32, y: i32 },
    Headed { x: i32, y: i32, heading: Heading },
}

impl Point {
    pub fn plain(x: i32, y: i32) -> Self {
        Point::Plain { x, y }
    }

    pub fn headed(x: i32, y: i32, heading: Heading) -> Self {
        Point::Headed { x, y, heading }
    }

    pub fn x(&self) -> i32 {
        match *self {
            Point::Plain { x, .. } | Point::Headed { x, .. } => x,
        }
    }

    pub fn y(&self) -> i32 {
        match *self {
            Point::Plain { y, .. } | Point::Headed { y, .. } => y,
        }
    }

    pub fn heading(&self) -> Option<Heading> {
        match *self {
            Point::Plain { .. } => None,
            Point::Headed { heading, .. } => Some(heading),
        }
    }

    /// Apply a movement using this point's own rule.
    ///
    /// Plain points add the absolute step. Headed points rotate their heading by a turn
    /// and advance one cell along the new heading; an absolute step also re-aims them.
    /// A plain point has no heading to turn, so a turn leaves it in place.
    pub fn translate(&self, movement: Movement) -> Point {
        match (*self, movement) {
            (Point::Plain { x, y }, Movement::Step { dx, dy }) => Point::plain(x + dx, y + dy),
            (Point::Plain { .. }, Movement::Turn { .. }) => *self,
            (Point::Headed { x, y, heading }, Movement::Turn { turn }) => {
                let heading = heading.turned(turn);
                let (dx, dy) = heading.delta();
                Point::headed(x + dx, y + dy, heading)
            }
            (Point::Headed { x, y, heading }, Movement::Step { dx, dy }) => {
                let heading = Heading::from_delta(dx, dy).unwrap_or(heading);
                Point::headed(x + dx, y + dy, heading)
            }
        }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = (other.x() - self.x()) as f64;
        let dy = (other.y() - self.y()) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x() == other.x() && self.y() == other.y()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x().hash(state);
        self.y().hash(state);
    }
}
