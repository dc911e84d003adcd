//! Events the simulation reports to its collaborators
//!
//! The engine never schedules cosmetic work itself. Renderers, sound or
//! persistence layers react to these and own whatever timers they need.

use serde::Serialize;

use super::state::{Position, PowerUpKind};

/// What killed the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into itself
    SelfCollision,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    FoodEaten {
        position: Position,
        points: u32,
        /// Multiplier after this food was counted
        combo: u32,
    },
    PowerUpSpawned {
        kind: PowerUpKind,
        position: Position,
    },
    PowerUpCollected {
        kind: PowerUpKind,
        position: Position,
    },
    PowerUpExpired {
        kind: PowerUpKind,
    },
    ComboReset,
    LifeLost {
        cause: CollisionType,
        position: Position,
        lives_left: u32,
    },
    GameOver {
        final_score: u32,
    },
}

/// Outcome of one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    pub events: Vec<GameEvent>,
    /// Whether the run has ended
    pub terminated: bool,
}

impl TickResult {
    pub fn ate_food(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, GameEvent::FoodEaten { .. }))
    }

    pub fn lost_life(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, GameEvent::LifeLost { .. }))
    }
}
