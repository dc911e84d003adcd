use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::{
    action::PlayMode,
    autoplay,
    config::{
        BASE_POINTS, COMBO_WINDOW_TICKS, FOOD_VARIANTS, MAGNET_RANGE, MAX_SPAWN_ATTEMPTS,
        POWER_UP_SPAWN_CHANCE, STARTING_LIVES, TICK_MS, TILE_COUNT,
    },
    event::{CollisionType, GameEvent, TickResult},
    state::{ActiveEffect, Food, GameState, Position, PowerUpItem, PowerUpKind, RunState, Snake},
};

/// The game engine that handles all game logic
///
/// The engine only owns its random source. Everything that changes between
/// ticks lives in the `GameState` passed to each call.
pub struct GameEngine<R: Rng = StdRng> {
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create an engine seeded from the OS
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a reproducible engine
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// A board waiting for its first run
    pub fn new_game(&mut self) -> GameState {
        let snake = Snake::canonical();
        let mut state = GameState::new(snake, Food::new(Position::new(0, 0), 0));
        self.place_food(&mut state);
        state
    }

    /// Start a fresh run, from any state
    pub fn initialize(&mut self, state: &mut GameState, mode: PlayMode) {
        state.score = 0;
        state.lives = STARTING_LIVES;
        state.active_effects.clear();
        state.power_up = None;
        state.combo_multiplier = 1;
        state.combo_timer = 0;
        state.boosting = false;
        state.ticks = 0;
        state.autoplay = mode.is_autoplay();

        reset_snake(state);
        self.spawn_food(state);
        state.run_state = RunState::Running;

        info!(?mode, "run started");
    }

    /// One driver step: autoplay steering when the demo is on, then a tick
    pub fn advance(&mut self, state: &mut GameState) -> TickResult {
        if state.is_running() && state.autoplay {
            autoplay::steer(state);
        }
        self.tick(state)
    }

    /// Execute one simulation step
    pub fn tick(&mut self, state: &mut GameState) -> TickResult {
        let mut result = TickResult::default();

        if !state.is_running() {
            result.terminated = state.run_state == RunState::GameOver;
            return result;
        }

        // Legality was checked when the direction was requested
        state.snake.direction = state.pending_direction;

        // A life loss only ends its own move; the boosted second move runs
        // from the reset chain
        let moves = if state.boosting { 2 } else { 1 };
        for _ in 0..moves {
            self.move_once(state, &mut result.events);
            if state.run_state == RunState::GameOver {
                break;
            }
        }

        state.ticks += 1;

        if state.run_state == RunState::GameOver {
            result.terminated = true;
            return result;
        }

        decay_combo(state, &mut result.events);
        decay_effects(state, &mut result.events);

        result
    }

    /// Move the head one cell, or lose a life trying
    fn move_once(&mut self, state: &mut GameState, events: &mut Vec<GameEvent>) {
        let mut new_head = state.snake.head().moved_in_direction(state.snake.direction);

        if state.has_effect(PowerUpKind::Magnet)
            && new_head.manhattan_distance(state.food.position) <= MAGNET_RANGE
        {
            new_head = state.food.position;
        }

        if let Some(cause) = check_collision(state, new_head) {
            events.extend(self.lose_life(state, cause, new_head));
            return;
        }

        if new_head == state.food.position {
            state.snake.advance_to(new_head, true);
            self.eat_food(state, events);
        } else if let Some(item) = state.power_up.filter(|item| item.position == new_head) {
            state.snake.advance_to(new_head, false);
            activate_power_up(state, item, events);
        } else {
            state.snake.advance_to(new_head, false);
        }
    }

    fn eat_food(&mut self, state: &mut GameState, events: &mut Vec<GameEvent>) {
        let doubled = if state.has_effect(PowerUpKind::Double) { 2 } else { 1 };
        let points = BASE_POINTS * state.combo_multiplier * doubled;

        state.score += points;
        state.bump_combo();
        state.combo_timer = COMBO_WINDOW_TICKS;

        events.push(GameEvent::FoodEaten {
            position: state.food.position,
            points,
            combo: state.combo_multiplier,
        });

        events.extend(self.spawn_food(state));
    }

    /// Take a life after a fatal collision
    ///
    /// The snake goes back to its starting chain; score and held power-ups
    /// carry over. At zero lives the run is over.
    pub fn lose_life(
        &mut self,
        state: &mut GameState,
        cause: CollisionType,
        position: Position,
    ) -> Vec<GameEvent> {
        state.lives = state.lives.saturating_sub(1);

        let mut events = vec![GameEvent::LifeLost {
            cause,
            position,
            lives_left: state.lives,
        }];

        if state.lives == 0 {
            state.run_state = RunState::GameOver;
            info!(score = state.score, ticks = state.ticks, "game over");
            events.push(GameEvent::GameOver {
                final_score: state.score,
            });
        } else {
            debug!(?cause, lives = state.lives, "life lost");
            reset_snake(state);
            // The fresh chain may cover the food
            if state.snake.occupies(state.food.position) {
                self.place_food(state);
            }
        }

        events
    }

    /// Respawn the food and maybe roll a power-up item
    pub fn spawn_food(&mut self, state: &mut GameState) -> Option<GameEvent> {
        self.place_food(state);

        if state.power_up.is_some() || !self.rng.gen_bool(POWER_UP_SPAWN_CHANCE) {
            return None;
        }

        let kind = *PowerUpKind::ALL.choose(&mut self.rng)?;
        let position = self.random_free_cell(state, Some(state.food.position))?;
        state.power_up = Some(PowerUpItem::new(position, kind));

        debug!(?kind, x = position.x, y = position.y, "power-up spawned");
        Some(GameEvent::PowerUpSpawned { kind, position })
    }

    fn place_food(&mut self, state: &mut GameState) {
        let variant = self.rng.gen_range(0..FOOD_VARIANTS.len());
        let item = state.power_up.map(|item| item.position);

        match self.random_free_cell(state, item) {
            Some(position) => state.food = Food::new(position, variant),
            None => warn!("no free cell left for food, keeping previous position"),
        }
    }

    /// Uniform random cell off the snake (and off `avoid`)
    ///
    /// Draws a bounded number of random cells, then falls back to choosing
    /// among the enumerated free cells so a crowded board still terminates.
    fn random_free_cell(&mut self, state: &GameState, avoid: Option<Position>) -> Option<Position> {
        let is_free = |pos: Position| !state.snake.occupies(pos) && Some(pos) != avoid;

        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let pos = Position::new(
                self.rng.gen_range(0..TILE_COUNT),
                self.rng.gen_range(0..TILE_COUNT),
            );
            if is_free(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..TILE_COUNT)
            .flat_map(|y| (0..TILE_COUNT).map(move |x| Position::new(x, y)))
            .filter(|&pos| is_free(pos))
            .collect();

        free.choose(&mut self.rng).copied()
    }
}

fn reset_snake(state: &mut GameState) {
    state.snake = Snake::canonical();
    state.pending_direction = state.snake.direction;
}

/// Check if the new head position causes a collision
fn check_collision(state: &GameState, pos: Position) -> Option<CollisionType> {
    if !state.is_in_bounds(pos) {
        return Some(CollisionType::Wall);
    }

    if !state.has_effect(PowerUpKind::Ghost) && state.is_occupied_by_snake(pos) {
        return Some(CollisionType::SelfCollision);
    }

    None
}

/// Picking up a kind that is already held restarts its timer
fn activate_power_up(state: &mut GameState, item: PowerUpItem, events: &mut Vec<GameEvent>) {
    state.power_up = None;

    match state
        .active_effects
        .iter_mut()
        .find(|effect| effect.kind == item.kind)
    {
        Some(effect) => effect.remaining_ms = item.duration_ms,
        None => state.active_effects.push(ActiveEffect {
            kind: item.kind,
            remaining_ms: item.duration_ms,
        }),
    }

    debug!(kind = ?item.kind, "power-up collected");
    events.push(GameEvent::PowerUpCollected {
        kind: item.kind,
        position: item.position,
    });
}

fn decay_combo(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.combo_timer = state.combo_timer.saturating_sub(1);

    if state.combo_timer == 0 && state.combo_multiplier != 1 {
        state.combo_multiplier = 1;
        events.push(GameEvent::ComboReset);
    }
}

fn decay_effects(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let elapsed = TICK_MS as u32;

    state.active_effects.retain_mut(|effect| {
        effect.remaining_ms = effect.remaining_ms.saturating_sub(elapsed);
        if effect.remaining_ms == 0 {
            events.push(GameEvent::PowerUpExpired { kind: effect.kind });
            false
        } else {
            true
        }
    });
}
