use super::species::{Physiology, Topology};
use crate::geometry::{Grid, Heading, Movement, Point};
use rand::RngCore;
use std::collections::VecDeque;
use std::f64::consts::{FRAC_PI_2, SQRT_2, TAU};

/// Snake that looks along all eight compass rays and moves in absolute directions.
///
/// Inputs are three blocks of eight, ordered N, NE, E, SE, S, SW, W, NW:
/// food, grid boundary, own body.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullMovement;

const FAR: f64 = 1.0;

impl Physiology for FullMovement {
    fn topology(&self) -> Topology {
        Topology {
            inputs: 24,
            outputs: 4,
            hidden: &[16, 20],
        }
    }

    fn segment(&self, x: i32, y: i32, _heading: Heading) -> Point {
        Point::plain(x, y)
    }

    fn food(&self, x: i32, y: i32) -> Point {
        Point::plain(x, y)
    }

    fn look(&self, body: &VecDeque<Point>, food: &Point, grid: &Grid) -> Vec<f64> {
        let head = match body.back() {
            Some(head) => *head,
            None => return vec![FAR; 24],
        };

        let mut inputs = Vec::with_capacity(24);
        inputs.extend_from_slice(&food_rays(&head, food, grid));
        inputs.extend_from_slice(&boundary_rays(&head, grid));
        inputs.extend_from_slice(&body_rays(&head, body, grid));
        inputs
    }

    fn decode(&self, outputs: &[f64], rng: &mut dyn RngCore) -> Movement {
        Movement::full(outputs, rng)
    }
}

// indices into a block of eight rays
const N: usize = 0;
const NE: usize = 1;
const E: usize = 2;
const SE: usize = 3;
const S: usize = 4;
const SW: usize = 5;
const W: usize = 6;
const NW: usize = 7;

/// Food distance split into the two cardinal components of its quadrant,
/// with their sum along the diagonal between them. Other rays read as far.
fn food_rays(head: &Point, food: &Point, grid: &Grid) -> [f64; 8] {
    let east = (food.x() - head.x()) as f64;
    let north = (head.y() - food.y()) as f64;
    let distance = (east * east + north * north).sqrt() / grid.diagonal();

    // clockwise from north
    let mut bearing = east.atan2(north);
    if bearing < 0.0 {
        bearing += TAU;
    }
    let quadrant = ((bearing / FRAC_PI_2).floor() as usize).min(3);
    let angle = bearing - quadrant as f64 * FRAC_PI_2;
    let first = distance * angle.cos();
    let second = distance * angle.sin();
    let diagonal = (first + second) / SQRT_2;

    let (a, between, b) = match quadrant {
        0 => (N, NE, E),
        1 => (E, SE, S),
        2 => (S, SW, W),
        _ => (W, NW, N),
    };

    let mut rays = [FAR; 8];
    rays[a] = first;
    rays[b] = second;
    rays[between] = diagonal;
    rays
}

/// Distance to the grid edge along each ray.
///
/// On a rectangular grid a diagonal ray can reach a side before the corner, so
/// which side of the two corner-to-corner diagonals the head is on decides
/// whether the x or y extent governs each diagonal reading.
fn boundary_rays(head: &Point, grid: &Grid) -> [f64; 8] {
    let (hx, hy) = (head.x() as f64, head.y() as f64);
    let (w, h) = (grid.width() as f64, grid.height() as f64);
    let scale = SQRT_2 / grid.diagonal();
    let gradient = h / w;

    let mut rays = [FAR; 8];
    rays[N] = hy / h;
    rays[E] = (w - hx - 1.0) / w;
    rays[S] = (h - hy - 1.0) / h;
    rays[W] = hx / w;

    // south-west corner up to north-east corner
    let below_rising = hy + hx * gradient > h - 1.0;
    if below_rising {
        rays[NE] = (w - hx - 1.0) * scale;
        rays[SW] = (h - hy - 1.0) * scale;
    } else {
        rays[NE] = hy * scale;
        rays[SW] = hx * scale;
    }

    // north-west corner down to south-east corner
    let above_falling = (h - hy - 1.0) / gradient + hx > w - 1.0;
    if above_falling {
        rays[SE] = (w - hx - 1.0) * scale;
        rays[NW] = hy * scale;
    } else {
        rays[SE] = (h - hy - 1.0) * scale;
        rays[NW] = hx * scale;
    }

    rays
}

fn body_rays(head: &Point, body: &VecDeque<Point>, grid: &Grid) -> [f64; 8] {
    let (w, h) = (grid.width() as f64, grid.height() as f64);
    let scale = SQRT_2 / grid.diagonal();
    let mut rays = [FAR; 8];

    for segment in body {
        let dx = segment.x() - head.x();
        let dy = segment.y() - head.y();

        let (ray, distance) = if dy == 0 && dx != 0 {
            (if dx > 0 { E } else { W }, dx.abs() as f64 / w)
        } else if dx == 0 && dy != 0 {
            (if dy > 0 { S } else { N }, dy.abs() as f64 / h)
        } else if dx != 0 && dx.abs() == dy.abs() {
            let ray = match (dx > 0, dy > 0) {
                (true, false) => NE,
                (true, true) => SE,
                (false, true) => SW,
                (false, false) => NW,
            };
            (ray, dx.abs() as f64 * scale)
        } else {
            continue;
        };

        rays[ray] = rays[ray].min(distance);
    }

    rays
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_body(points: &[(i32, i32)]) -> VecDeque<Point> {
        points.iter().map(|&(x, y)| Point::plain(x, y)).collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_input_layout() {
        let grid = Grid::new(10, 10).unwrap();
        let snake = plain_body(&[(5, 2), (5, 3), (5, 4), (5, 5)]);
        let inputs = FullMovement.look(&snake, &Point::plain(1, 1), &grid);
        assert_eq!(inputs.len(), 24);
        assert!(inputs.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_food_south_east_quadrant() {
        let grid = Grid::new(5, 5).unwrap();
        let rays = food_rays(&Point::plain(0, 2), &Point::plain(4, 3), &grid);
        let scale = 1.0 / grid.diagonal();

        assert!(close(rays[E], 4.0 * scale));
        assert!(close(rays[S], 1.0 * scale));
        assert!(close(rays[SE], 5.0 * scale / SQRT_2));
        for ray in [N, NE, SW, W, NW] {
            assert_eq!(rays[ray], FAR);
        }
    }

    #[test]
    fn test_food_north_east_quadrant() {
        let grid = Grid::new(11, 11).unwrap();
        let rays = food_rays(&Point::plain(5, 5), &Point::plain(8, 1), &grid);
        let scale = 1.0 / grid.diagonal();

        // 4 cells north, 3 cells east
        assert!(close(rays[N], 4.0 * scale));
        assert!(close(rays[E], 3.0 * scale));
        assert!(close(rays[NE], 7.0 * scale / SQRT_2));
        for ray in [SE, S, SW, W, NW] {
            assert_eq!(rays[ray], FAR);
        }
    }

    #[test]
    fn test_food_south_west_quadrant() {
        let grid = Grid::new(11, 11).unwrap();
        let rays = food_rays(&Point::plain(5, 5), &Point::plain(2, 9), &grid);
        let scale = 1.0 / grid.diagonal();

        assert!(close(rays[S], 4.0 * scale));
        assert!(close(rays[W], 3.0 * scale));
        assert!(close(rays[SW], 7.0 * scale / SQRT_2));
        assert_eq!(rays[N], FAR);
        assert_eq!(rays[E], FAR);
    }

    #[test]
    fn test_boundary_cardinals() {
        let grid = Grid::new(10, 20).unwrap();
        let rays = boundary_rays(&Point::plain(3, 5), &grid);

        assert!(close(rays[N], 5.0 / 20.0));
        assert!(close(rays[E], 6.0 / 10.0));
        assert!(close(rays[S], 14.0 / 20.0));
        assert!(close(rays[W], 3.0 / 10.0));
    }

    #[test]
    fn test_boundary_diagonals_in_corners() {
        let grid = Grid::new(10, 10).unwrap();
        let scale = SQRT_2 / grid.diagonal();

        let top_left = boundary_rays(&Point::plain(0, 0), &grid);
        assert!(close(top_left[NE], 0.0));
        assert!(close(top_left[SW], 0.0));
        assert!(close(top_left[NW], 0.0));
        assert!(close(top_left[SE], 9.0 * scale));

        let bottom_right = boundary_rays(&Point::plain(9, 9), &grid);
        assert!(close(bottom_right[NE], 0.0));
        assert!(close(bottom_right[SW], 0.0));
        assert!(close(bottom_right[SE], 0.0));
        assert!(close(bottom_right[NW], 9.0 * scale));
    }

    #[test]
    fn test_boundary_diagonals_on_wide_grid() {
        // 20 wide, 5 high: the corner diagonals are shallow
        let grid = Grid::new(20, 5).unwrap();
        let scale = SQRT_2 / grid.diagonal();

        // left of the rising diagonal, the north-east ray is limited by the top edge
        let left = boundary_rays(&Point::plain(2, 2), &grid);
        assert!(close(left[NE], 2.0 * scale));
        assert!(close(left[SW], 2.0 * scale));

        // right of it the east side governs
        let right = boundary_rays(&Point::plain(17, 2), &grid);
        assert!(close(right[NE], 2.0 * scale));
        assert!(close(right[SW], 2.0 * scale));
        assert!(close(right[SE], 2.0 * scale));
        assert!(close(right[NW], 2.0 * scale));
    }

    #[test]
    fn test_body_rays() {
        let grid = Grid::new(10, 10).unwrap();
        let scale = SQRT_2 / grid.diagonal();
        // head at (5, 5), tail first
        let snake = plain_body(&[
            (7, 3), // north-east, 2 away
            (5, 8), // south, 3 away
            (5, 7), // south, 2 away
            (2, 5), // west, 3 away
            (6, 7), // off every ray
            (4, 4), // north-west, 1 away
            (5, 5),
        ]);

        let rays = body_rays(&Point::plain(5, 5), &snake, &grid);
        assert!(close(rays[NE], 2.0 * scale));
        assert!(close(rays[S], 2.0 / 10.0));
        assert!(close(rays[W], 3.0 / 10.0));
        assert!(close(rays[NW], 1.0 * scale));
        for ray in [N, E, SE, SW] {
            assert_eq!(rays[ray], FAR);
        }
    }

    #[test]
    fn test_body_north_and_south_are_geometric() {
        let grid = Grid::new(10, 10).unwrap();
        let above = body_rays(
            &Point::plain(2, 6),
            &plain_body(&[(2, 1), (2, 6)]),
            &grid,
        );
        assert!(close(above[N], 5.0 / 10.0));
        assert_eq!(above[S], FAR);

        // one cell south of the head, with y smaller than the head's x
        let shifted = body_rays(
            &Point::plain(8, 6),
            &plain_body(&[(8, 7), (8, 6)]),
            &grid,
        );
        assert!(close(shifted[S], 1.0 / 10.0));
        assert_eq!(shifted[N], FAR);
    }
}
