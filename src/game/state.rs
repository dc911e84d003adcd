use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::config::{
    INITIAL_SNAKE_LENGTH, MAX_COMBO, STARTING_LIVES, TIER_THRESHOLDS, TILE_COUNT,
};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    pub fn manhattan_distance(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Whether the position lies inside the fixed grid
    pub fn is_on_grid(&self) -> bool {
        (0..TILE_COUNT).contains(&self.x) && (0..TILE_COUNT).contains(&self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Committed velocity
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    /// The 3-segment horizontal chain centered on the grid, heading right
    pub fn canonical() -> Self {
        let center = TILE_COUNT / 2;
        Self::new(
            Position::new(center, center),
            Direction::Right,
            INITIAL_SNAKE_LENGTH,
        )
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Whether any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend `new_head`, dropping the tail unless the snake grows
    pub fn advance_to(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// The single active food item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    /// Cosmetic glyph index into `FOOD_VARIANTS`
    pub variant: usize,
}

impl Food {
    pub fn new(position: Position, variant: usize) -> Self {
        Self { position, variant }
    }
}

/// Temporary rule modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Self-intersection is ignored
    Ghost,
    /// Food within range is pulled onto the head
    Magnet,
    /// Food is worth twice the points
    Double,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Ghost, PowerUpKind::Magnet, PowerUpKind::Double];

    pub fn duration_ms(&self) -> u32 {
        match self {
            Self::Ghost => 5_000,
            Self::Magnet => 6_000,
            Self::Double => 8_000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ghost => "GHOST",
            Self::Magnet => "MAGNET",
            Self::Double => "DOUBLE",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Ghost => "👻",
            Self::Magnet => "🧲",
            Self::Double => "✨",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Ghost => "Phase through yourself!",
            Self::Magnet => "Attract nearby food!",
            Self::Double => "Double points!",
        }
    }
}

/// A power-up waiting on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUpItem {
    pub position: Position,
    pub kind: PowerUpKind,
    pub duration_ms: u32,
}

impl PowerUpItem {
    pub fn new(position: Position, kind: PowerUpKind) -> Self {
        Self {
            position,
            kind,
            duration_ms: kind.duration_ms(),
        }
    }
}

/// A held power-up and its countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub remaining_ms: u32,
}

impl ActiveEffect {
    /// Fraction of the full duration still left, for progress bars
    pub fn remaining_fraction(&self) -> f64 {
        f64::from(self.remaining_ms) / f64::from(self.kind.duration_ms())
    }
}

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Next velocity to commit, written by input and read by `tick`
    pub pending_direction: Direction,
    pub food: Food,
    pub power_up: Option<PowerUpItem>,
    pub active_effects: Vec<ActiveEffect>,
    pub score: u32,
    pub lives: u32,
    pub combo_multiplier: u32,
    pub combo_timer: u32,
    pub run_state: RunState,
    pub autoplay: bool,
    pub boosting: bool,
    pub ticks: u64,
}

impl GameState {
    /// Create a new game state, waiting for its first run
    pub fn new(snake: Snake, food: Food) -> Self {
        let pending_direction = snake.direction;
        Self {
            snake,
            pending_direction,
            food,
            power_up: None,
            active_effects: Vec::new(),
            score: 0,
            lives: STARTING_LIVES,
            combo_multiplier: 1,
            combo_timer: 0,
            run_state: RunState::NotStarted,
            autoplay: false,
            boosting: false,
            ticks: 0,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.is_on_grid()
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    pub fn has_effect(&self, kind: PowerUpKind) -> bool {
        self.active_effects.iter().any(|effect| effect.kind == kind)
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Queue a turn. The exact opposite of the committed velocity is ignored.
    ///
    /// Returns whether the request was accepted.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.snake.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    pub fn set_boosting(&mut self, boosting: bool) {
        self.boosting = boosting;
    }

    /// Flip between Running and Paused; no effect in any other state
    pub fn toggle_pause(&mut self) {
        self.run_state = match self.run_state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
            other => other,
        };
    }

    pub fn resume(&mut self) {
        if self.run_state == RunState::Paused {
            self.run_state = RunState::Running;
        }
    }

    /// The score to hand to persistence, available only once the run is over
    pub fn final_score(&self) -> Option<u32> {
        (self.run_state == RunState::GameOver).then_some(self.score)
    }

    /// Cosmetic color tier for the current score
    pub fn tier(&self) -> usize {
        TIER_THRESHOLDS
            .iter()
            .rposition(|&threshold| self.score >= threshold)
            .unwrap_or(0)
    }

    pub(crate) fn bump_combo(&mut self) {
        self.combo_multiplier = (self.combo_multiplier + 1).min(MAX_COMBO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> GameState {
        GameState::new(Snake::canonical(), Food::new(Position::new(1, 1), 0))
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
    }

    #[test]
    fn test_manhattan_distance() {
        let a = Position::new(2, 3);
        assert_eq!(a.manhattan_distance(Position::new(2, 3)), 0);
        assert_eq!(a.manhattan_distance(Position::new(4, 2)), 3);
        assert_eq!(Position::new(4, 2).manhattan_distance(a), 3);
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.body[2], Position::new(3, 5));
        assert_eq!(snake.tail(), Position::new(3, 5));
    }

    #[test]
    fn test_canonical_snake() {
        let snake = Snake::canonical();
        assert_eq!(
            snake.body,
            vec![Position::new(15, 15), Position::new(14, 15), Position::new(13, 15)]
        );
        assert_eq!(snake.direction, Direction::Right);
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.advance_to(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));

        snake.advance_to(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));
    }

    #[test]
    fn test_occupies_includes_head() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
        assert!(!snake.occupies(Position::new(10, 10)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = sample_state();

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(29, 29)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(30, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 30)));
    }

    #[test]
    fn test_reverse_request_ignored() {
        let mut state = sample_state();
        state.request_direction(Direction::Up);
        assert_eq!(state.pending_direction, Direction::Up);

        // Committed velocity is still Right, so Left is rejected
        assert!(!state.request_direction(Direction::Left));
        assert_eq!(state.pending_direction, Direction::Up);
    }

    #[test]
    fn test_latest_legal_request_wins() {
        let mut state = sample_state();
        assert!(state.request_direction(Direction::Up));
        assert!(state.request_direction(Direction::Down));
        assert_eq!(state.pending_direction, Direction::Down);
    }

    #[test]
    fn test_toggle_pause_only_while_playing() {
        let mut state = sample_state();
        state.toggle_pause();
        assert_eq!(state.run_state, RunState::NotStarted);

        state.run_state = RunState::Running;
        state.toggle_pause();
        assert_eq!(state.run_state, RunState::Paused);
        state.toggle_pause();
        assert_eq!(state.run_state, RunState::Running);

        state.run_state = RunState::GameOver;
        state.toggle_pause();
        assert_eq!(state.run_state, RunState::GameOver);
    }

    #[test]
    fn test_resume() {
        let mut state = sample_state();
        state.run_state = RunState::Paused;
        state.resume();
        assert_eq!(state.run_state, RunState::Running);

        state.run_state = RunState::NotStarted;
        state.resume();
        assert_eq!(state.run_state, RunState::NotStarted);
    }

    #[test]
    fn test_final_score_only_when_over() {
        let mut state = sample_state();
        state.score = 120;
        state.run_state = RunState::Running;
        assert_eq!(state.final_score(), None);

        state.run_state = RunState::GameOver;
        assert_eq!(state.final_score(), Some(120));
    }

    #[test]
    fn test_combo_bump_caps() {
        let mut state = sample_state();
        for _ in 0..10 {
            state.bump_combo();
        }
        assert_eq!(state.combo_multiplier, MAX_COMBO);
    }

    #[test]
    fn test_tier_thresholds() {
        let mut state = sample_state();
        assert_eq!(state.tier(), 0);
        state.score = 200;
        assert_eq!(state.tier(), 1);
        state.score = 999;
        assert_eq!(state.tier(), 2);
        state.score = 5000;
        assert_eq!(state.tier(), 4);
    }

    #[test]
    fn test_effect_fraction() {
        let effect = ActiveEffect {
            kind: PowerUpKind::Ghost,
            remaining_ms: 2_500,
        };
        assert!((effect.remaining_fraction() - 0.5).abs() < f64::EPSILON);
    }
}
