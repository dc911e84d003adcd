//! Per-run tallies built from game events

use serde::Serialize;

use crate::game::GameEvent;

/// Counters for a single run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub foods_eaten: u32,
    pub power_ups_collected: u32,
    pub lives_lost: u32,
    pub best_combo: u32,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::FoodEaten { combo, .. } => {
                    self.foods_eaten += 1;
                    self.best_combo = self.best_combo.max(*combo);
                }
                GameEvent::PowerUpCollected { .. } => self.power_ups_collected += 1,
                GameEvent::LifeLost { .. } => self.lives_lost += 1,
                _ => {}
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
