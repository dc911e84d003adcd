//! Greedy demo-mode steering
//!
//! Heads straight for the food, preferring moves that shrink the Manhattan
//! distance and skipping anything that is an immediate reversal, leaves the
//! grid, or lands on the snake. There is no lookahead: when every candidate
//! is filtered out the pending direction is left alone and the snake dies on
//! the next tick.

use super::action::Direction;
use super::state::{GameState, Position, Snake};

/// Pick a direction toward `food`, or `None` when boxed in
pub fn choose_direction(snake: &Snake, food: Position) -> Option<Direction> {
    let head = snake.head();
    let dx = food.x - head.x;
    let dy = food.y - head.y;

    let mut candidates = Vec::with_capacity(4);
    if dx > 0 {
        candidates.push(Direction::Right);
    }
    if dx < 0 {
        candidates.push(Direction::Left);
    }
    if dy > 0 {
        candidates.push(Direction::Down);
    }
    if dy < 0 {
        candidates.push(Direction::Up);
    }
    if candidates.is_empty() {
        candidates.extend(Direction::ALL);
    }

    candidates.into_iter().find(|&direction| {
        if snake.direction.is_opposite(direction) {
            return false;
        }
        let next = head.moved_in_direction(direction);
        next.is_on_grid() && !snake.occupies(next)
    })
}

/// Run the heuristic against `state` and queue its choice
pub fn steer(state: &mut GameState) -> Option<Direction> {
    let choice = choose_direction(&state.snake, state.food.position)?;
    state.request_direction(choice);
    Some(choice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::Food;

    fn snake_at(head: Position, direction: Direction) -> Snake {
        Snake::new(head, direction, 3)
    }

    #[test]
    fn test_food_due_east() {
        let snake = snake_at(Position::new(10, 10), Direction::Right);
        assert_eq!(
            choose_direction(&snake, Position::new(20, 10)),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_food_due_east_while_heading_up() {
        let snake = snake_at(Position::new(10, 10), Direction::Up);
        assert_eq!(
            choose_direction(&snake, Position::new(12, 10)),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_horizontal_preferred_over_vertical() {
        let snake = snake_at(Position::new(10, 10), Direction::Right);
        assert_eq!(
            choose_direction(&snake, Position::new(15, 2)),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_reversal_filtered() {
        // Food is behind and below: Left would reverse, so Down is chosen
        let snake = snake_at(Position::new(10, 10), Direction::Right);
        assert_eq!(
            choose_direction(&snake, Position::new(3, 14)),
            Some(Direction::Down)
        );
    }

    #[test]
    fn test_food_straight_behind_is_boxed() {
        // Only candidate is Left, which reverses; no fallback to other moves
        let snake = snake_at(Position::new(10, 10), Direction::Right);
        assert_eq!(choose_direction(&snake, Position::new(2, 10)), None);
    }

    #[test]
    fn test_body_cells_filtered() {
        // Heading up with the body curling to the right of the head
        let snake = Snake {
            body: vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
                Position::new(6, 5),
            ],
            direction: Direction::Up,
        };
        // Food to the right and above: Right hits (6,5), Up is free
        assert_eq!(
            choose_direction(&snake, Position::new(9, 1)),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_out_of_bounds_filtered() {
        let snake = snake_at(Position::new(0, 5), Direction::Up);
        // Food to the left would leave the grid; Up remains
        assert_eq!(
            choose_direction(&snake, Position::new(-3, 2)),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_fallback_when_on_food() {
        let snake = snake_at(Position::new(10, 10), Direction::Right);
        assert_eq!(
            choose_direction(&snake, Position::new(10, 10)),
            Some(Direction::Right)
        );

        let snake = snake_at(Position::new(10, 10), Direction::Left);
        // Right reverses and Left runs into nothing: Left is second in order
        assert_eq!(
            choose_direction(&snake, Position::new(10, 10)),
            Some(Direction::Left)
        );
    }

    #[test]
    fn test_steer_writes_pending_direction() {
        let snake = snake_at(Position::new(10, 10), Direction::Right);
        let mut state = GameState::new(snake, Food::new(Position::new(10, 20), 0));

        assert_eq!(steer(&mut state), Some(Direction::Down));
        assert_eq!(state.pending_direction, Direction::Down);
    }

    #[test]
    fn test_steer_boxed_in_leaves_pending() {
        let snake = snake_at(Position::new(10, 10), Direction::Right);
        let mut state = GameState::new(snake, Food::new(Position::new(1, 10), 0));
        state.pending_direction = Direction::Right;

        assert_eq!(steer(&mut state), None);
        assert_eq!(state.pending_direction, Direction::Right);
    }
}
