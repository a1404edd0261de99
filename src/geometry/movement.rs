use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Turn {
    Left,
    Forward,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Movement {
    Turn { turn: Turn },
    Step { dx: i32, dy: i32 },
}

impl Movement {
    /// Decode `[forward, left, right]` into a relative turn.
    ///
    /// The strongest output wins; exact ties are resolved uniformly at random among
    /// the tied options.
    pub fn forward_only<R: Rng + ?Sized>(outputs: &[f64], rng: &mut R) -> Movement {
        let forward = output(outputs, 0);
        let left = output(outputs, 1);
        let right = output(outputs, 2);
        let max = forward.max(left).max(right);

        let mut tied = [Turn::Forward; 3];
        let mut count = 0;
        for (value, turn) in [(forward, Turn::Forward), (left, Turn::Left), (right, Turn::Right)] {
            if value == max {
                tied[count] = turn;
                count += 1;
            }
        }

        let turn = match count {
            0 => Turn::Forward,
            1 => tied[0],
            n => tied[rng.gen_range(0..n)],
        };

        Movement::Turn { turn }
    }

    /// Decode `[left, right, up, down]` into an absolute step.
    ///
    /// Opposing ties on one axis are settled with a coin flip, and if both axes
    /// still want to move one of them is dropped at random so the snake never
    /// moves diagonally.
    pub fn full<R: Rng + ?Sized>(outputs: &[f64], rng: &mut R) -> Movement {
        let left = output(outputs, 0);
        let right = output(outputs, 1);
        let up = output(outputs, 2);
        let down = output(outputs, 3);
        let max = left.max(right).max(up).max(down);

        let mut dx = 0;
        let mut dx_count = 0;
        if left == max {
            dx = -1;
            dx_count += 1;
        }
        if right == max {
            dx = 1;
            dx_count += 1;
        }
        if dx_count == 2 {
            dx = if rng.gen_bool(0.5) { 1 } else { -1 };
        }

        let mut dy = 0;
        let mut dy_count = 0;
        if up == max {
            dy = -1;
            dy_count += 1;
        }
        if down == max {
            dy = 1;
            dy_count += 1;
        }
        if dy_count == 2 {
            dy = if rng.gen_bool(0.5) { 1 } else { -1 };
        }

        if dx_count > 0 && dy_count > 0 {
            if rng.gen_bool(0.5) {
                dx = 0;
            } else {
                dy = 0;
            }
        }

        Movement::Step { dx, dy }
    }
}

fn output(outputs: &[f64], index: usize) -> f64 {
    outputs.get(index).copied().unwrap_or(f64::NEG_INFINITY)
}
