use std::collections::{HashSet, VecDeque};

use super::types::{Direction, Point};

pub const SPAWN_LENGTH: usize = 3;

/// Ordered body of one snake, head first. The same type backs the player
/// and the NPC; only the controller driving `advance` differs.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    /// Straight layout trailing away from `heading`.
    pub fn spawn(head: Point, heading: Direction) -> Self {
        let (dx, dy) = heading.delta();
        let mut body = VecDeque::new();
        let mut body_set = HashSet::new();

        for i in 0..SPAWN_LENGTH as i32 {
            let segment = Point::new(head.x - dx * i, head.y - dy * i);
            body.push_back(segment);
            body_set.insert(segment);
        }

        Self { body, body_set }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.body_set.contains(&point)
    }

    pub fn segments(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    /// Prepends `new_head`. Without growth the tail segment is released
    /// first, so moving onto the vacated tail cell keeps the occupancy
    /// index consistent.
    pub fn advance(&mut self, new_head: Point, grow: bool) {
        if !grow {
            let tail = self
                .body
                .pop_back()
                .expect("Snake body should never be empty");
            self.body_set.remove(&tail);
        }
        self.body.push_front(new_head);
        self.body_set.insert(new_head);
    }
}
