use super::species::{Physiology, Topology};
use crate::geometry::{Grid, Heading, Movement, Point, Turn};
use rand::RngCore;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardOnly;

impl Physiology for ForwardOnly {
    fn topology(&self) -> Topology {
        Topology {
            inputs: 6,
            outputs: 3,
            hidden: &[6, 8],
        }
    }

    fn segment(&self, x: i32, y: i32, heading: Heading) -> Point {
        Point::headed(x, y, heading)
    }

    // Food carries no heading of its own; equality ignores it anyway.
    fn food(&self, x: i32, y: i32) -> Point {
        Point::plain(x, y)
    }

    fn look(&self, body: &VecDeque<Point>, food: &Point, grid: &Grid) -> Vec<f64> {
        let (head, heading) = match body.back().and_then(|h| h.heading().map(|d| (*h, d))) {
            Some(found) => found,
            None => return vec![0.0; 6],
        };

        let forward = heading.delta();
        let left = heading.turned(Turn::Left).delta();
        let right = heading.turned(Turn::Right).delta();

        let mut forward_distance = boundary_distance(&head, forward, grid);
        let mut left_distance = boundary_distance(&head, left, grid);
        let mut right_distance = boundary_distance(&head, right, grid);

        // the head itself is excluded, it is the last segment
        for segment in body.iter().take(body.len().saturating_sub(1)) {
            let rx = segment.x() - head.x();
            let ry = segment.y() - head.y();
            let along = dot((rx, ry), forward);
            let across = dot((rx, ry), left);

            if across == 0 && along > 0 {
                forward_distance = forward_distance.min(along as f64);
            }
            if along == 0 {
                if across == 0 {
                    left_distance = 0.0;
                    right_distance = 0.0;
                    break;
                } else if across > 0 {
                    left_distance = left_distance.min(across as f64);
                } else {
                    right_distance = right_distance.min(-across as f64);
                }
            }
        }

        let fx = food.x() - head.x();
        let fy = food.y() - head.y();
        let forward_food = dot((fx, fy), forward).max(0) as f64;
        let left_food = dot((fx, fy), left).max(0) as f64;
        let right_food = dot((fx, fy), right).max(0) as f64;

        vec![
            forward_distance / extent(forward, grid),
            left_distance / extent(left, grid),
            right_distance / extent(right, grid),
            forward_food / extent(forward, grid),
            left_food / extent(left, grid),
            right_food / extent(right, grid),
        ]
    }

    fn decode(&self, outputs: &[f64], rng: &mut dyn RngCore) -> Movement {
        Movement::forward_only(outputs, rng)
    }
}

fn dot(a: (i32, i32), b: (i32, i32)) -> i32 {
    a.0 * b.0 + a.1 * b.1
}

fn boundary_distance(head: &Point, direction: (i32, i32), grid: &Grid) -> f64 {
    let cells = match direction {
        (1, _) => grid.width() - head.x() - 1,
        (-1, _) => head.x(),
        (_, 1) => grid.height() - head.y() - 1,
        _ => head.y(),
    };
    cells as f64
}

fn extent(direction: (i32, i32), grid: &Grid) -> f64 {
    if direction.0 != 0 {
        grid.width() as f64
    } else {
        grid.height() as f64
    }
}
