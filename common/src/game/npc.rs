use std::time::Duration;

use super::grid::Grid;
use super::snake::Snake;
use super::types::{Direction, Point};

/// Lifecycle of the rival snake. While banished the body is gone from the
/// field; `respawn_at` is the virtual-clock deadline for the comeback, or
/// `None` when no comeback is scheduled (feature disabled).
#[derive(Clone, Debug)]
pub enum NpcState {
    Alive { snake: Snake, direction: Direction },
    Banished { respawn_at: Option<Duration> },
}

impl NpcState {
    pub fn is_alive(&self) -> bool {
        matches!(self, NpcState::Alive { .. })
    }

    pub fn snake(&self) -> Option<&Snake> {
        match self {
            NpcState::Alive { snake, .. } => Some(snake),
            NpcState::Banished { .. } => None,
        }
    }
}

/// Greedy one-step movement choice. No search: the rival chases the
/// nearest food and only ever looks one cell ahead.
pub struct NpcController;

impl NpcController {
    /// Picks the next heading, or `None` when there is no food to chase
    /// (the snake then holds position for the tick).
    ///
    /// Candidates that reverse the current heading are discarded, the rest
    /// are ordered by resulting distance to the target (stable sort, so
    /// equal candidates keep the Up/Down/Left/Right enumeration order) and
    /// the first one landing on a legal cell wins. Legal means in bounds
    /// and outside the snake's own body; the player's body is deliberately
    /// not checked, running into it is how the rival kills.
    pub fn choose_direction(
        snake: &Snake,
        current: Direction,
        foods: &[Point],
        grid: Grid,
    ) -> Option<Direction> {
        let head = snake.head();
        let target = Self::nearest_food(head, foods)?;

        let mut candidates: Vec<Direction> = Direction::ALL
            .iter()
            .copied()
            .filter(|direction| !direction.is_opposite(&current))
            .collect();
        candidates.sort_by_key(|direction| head.step(*direction).manhattan_distance(target));

        for direction in candidates {
            let next = head.step(direction);
            if grid.in_bounds(next) && !snake.contains(next) {
                return Some(direction);
            }
        }

        // Boxed in: keep the old heading. The tick decides whether the
        // resulting cell is usable at all.
        Some(current)
    }

    /// First food at minimal Manhattan distance, in iteration order.
    fn nearest_food(from: Point, foods: &[Point]) -> Option<Point> {
        let mut best: Option<(i32, Point)> = None;
        for &food in foods {
            let distance = from.manhattan_distance(food);
            match best {
                Some((best_distance, _)) if distance >= best_distance => {}
                _ => best = Some((distance, food)),
            }
        }
        best.map(|(_, food)| food)
    }
}
