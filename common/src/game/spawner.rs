use std::collections::HashSet;
use std::fmt;

use super::grid::Grid;
use super::session_rng::SessionRng;
use super::types::Point;

const MAX_RANDOM_DRAWS: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnError {
    NoSpaceAvailable,
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::NoSpaceAvailable => write!(f, "no free cell left on the grid"),
        }
    }
}

impl std::error::Error for SpawnError {}

/// Draws a uniformly random in-bounds cell outside `occupied`. Rejection
/// sampling first; on a crowded grid falls back to collecting the free
/// cells and picking among them, so the call always terminates.
pub fn spawn_free_cell(
    grid: Grid,
    occupied: &HashSet<Point>,
    rng: &mut SessionRng,
) -> Result<Point, SpawnError> {
    if occupied.len() >= grid.cell_count() {
        return Err(SpawnError::NoSpaceAvailable);
    }

    for _ in 0..MAX_RANDOM_DRAWS {
        let candidate = Point::new(
            rng.random_range(0..grid.width),
            rng.random_range(0..grid.height),
        );
        if !occupied.contains(&candidate) {
            return Ok(candidate);
        }
    }

    let free: Vec<Point> = (0..grid.height)
        .flat_map(|y| (0..grid.width).map(move |x| Point::new(x, y)))
        .filter(|cell| !occupied.contains(cell))
        .collect();

    if free.is_empty() {
        return Err(SpawnError::NoSpaceAvailable);
    }
    Ok(free[rng.random_range(0..free.len())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_avoids_occupied_cells() {
        let grid = Grid::new(4, 4);
        let mut rng = SessionRng::new(7);
        let occupied: HashSet<Point> = (0..4)
            .flat_map(|y| (0..4).map(move |x| Point::new(x, y)))
            .filter(|p| !(p.x == 2 && p.y == 3))
            .collect();

        let cell = spawn_free_cell(grid, &occupied, &mut rng).unwrap();
        assert_eq!(cell, Point::new(2, 3));
    }

    #[test]
    fn test_spawn_on_full_grid_fails() {
        let grid = Grid::new(3, 3);
        let mut rng = SessionRng::new(7);
        let occupied: HashSet<Point> = (0..3)
            .flat_map(|y| (0..3).map(move |x| Point::new(x, y)))
            .collect();

        assert_eq!(
            spawn_free_cell(grid, &occupied, &mut rng),
            Err(SpawnError::NoSpaceAvailable)
        );
    }

    #[test]
    fn test_spawn_is_in_bounds_and_free() {
        let grid = Grid::new(6, 6);
        let mut rng = SessionRng::new(42);
        let mut occupied = HashSet::new();

        for _ in 0..grid.cell_count() {
            let cell = spawn_free_cell(grid, &occupied, &mut rng).unwrap();
            assert!(grid.in_bounds(cell));
            assert!(!occupied.contains(&cell));
            occupied.insert(cell);
        }
        assert_eq!(
            spawn_free_cell(grid, &occupied, &mut rng),
            Err(SpawnError::NoSpaceAvailable)
        );
    }
}
