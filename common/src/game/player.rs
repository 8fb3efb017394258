use super::types::Direction;

/// Buffers the latest directional intent between ticks. Depth 1: each new
/// valid intent replaces the previous one, and a reversal of the committed
/// heading is dropped without comment.
#[derive(Clone, Debug)]
pub struct PlayerController {
    direction: Direction,
    pending: Option<Direction>,
}

impl PlayerController {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            pending: None,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_intent(&mut self, direction: Direction) {
        if !direction.is_opposite(&self.direction) {
            self.pending = Some(direction);
        }
    }

    /// Commits the pending intent, if any, and returns the heading to use
    /// for this tick.
    pub fn step_intent(&mut self) -> Direction {
        if let Some(direction) = self.pending.take() {
            self.direction = direction;
        }
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_is_committed_on_step() {
        let mut ctrl = PlayerController::new(Direction::Right);
        ctrl.set_intent(Direction::Up);

        assert_eq!(ctrl.direction(), Direction::Right);
        assert_eq!(ctrl.step_intent(), Direction::Up);
        assert_eq!(ctrl.direction(), Direction::Up);
    }

    #[test]
    fn test_reversal_is_silently_dropped() {
        let mut ctrl = PlayerController::new(Direction::Right);
        ctrl.set_intent(Direction::Left);

        assert_eq!(ctrl.step_intent(), Direction::Right);
    }

    #[test]
    fn test_latest_valid_intent_wins() {
        let mut ctrl = PlayerController::new(Direction::Right);
        ctrl.set_intent(Direction::Up);
        ctrl.set_intent(Direction::Down);

        assert_eq!(ctrl.step_intent(), Direction::Down);
    }

    #[test]
    fn test_reversal_does_not_clobber_pending_intent() {
        let mut ctrl = PlayerController::new(Direction::Right);
        ctrl.set_intent(Direction::Up);
        ctrl.set_intent(Direction::Left);

        assert_eq!(ctrl.step_intent(), Direction::Up);
    }

    #[test]
    fn test_no_pending_keeps_current_heading() {
        let mut ctrl = PlayerController::new(Direction::Down);
        assert_eq!(ctrl.step_intent(), Direction::Down);
        assert_eq!(ctrl.step_intent(), Direction::Down);
    }
}
