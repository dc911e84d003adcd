//! Headless demo runs
//!
//! Drives the autoplay demo without a terminal, as fast as the CPU allows,
//! and reports how the run went. Handy for checking the rules end to end and
//! for comparing seeds.

use serde::Serialize;
use tracing::{debug, info};

use crate::game::{GameEngine, GameState, PlayMode, RunState};
use crate::metrics::RunStats;

#[derive(Debug, Clone)]
pub struct SimulateOptions {
    /// Upper bound on ticks to run
    pub ticks: u64,
    pub seed: u64,
    /// Hold boost down for the whole run
    pub boost: bool,
}

/// Final report of a headless run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub seed: u64,
    pub ticks: u64,
    pub score: u32,
    pub lives: u32,
    pub snake_length: usize,
    pub run_state: RunState,
    #[serde(flatten)]
    pub stats: RunStats,
}

impl SimulationSummary {
    fn from_state(seed: u64, state: &GameState, stats: RunStats) -> Self {
        Self {
            seed,
            ticks: state.ticks,
            score: state.score,
            lives: state.lives,
            snake_length: state.snake.len(),
            run_state: state.run_state,
            stats,
        }
    }
}

/// Run the demo for up to `options.ticks` ticks, stopping early at game over
pub fn run_simulation(options: &SimulateOptions) -> SimulationSummary {
    let mut engine = GameEngine::with_seed(options.seed);
    let mut state = engine.new_game();
    engine.initialize(&mut state, PlayMode::Demo);
    state.set_boosting(options.boost);

    let mut stats = RunStats::new();

    info!(seed = options.seed, ticks = options.ticks, boost = options.boost, "simulation started");

    for _ in 0..options.ticks {
        let result = engine.advance(&mut state);
        stats.record(&result.events);

        for event in &result.events {
            debug!(tick = state.ticks, ?event);
        }

        if result.terminated {
            break;
        }
    }

    let summary = SimulationSummary::from_state(options.seed, &state, stats);
    info!(score = summary.score, ticks = summary.ticks, "simulation finished");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::STARTING_LIVES;

    fn options(seed: u64, ticks: u64) -> SimulateOptions {
        SimulateOptions {
            ticks,
            seed,
            boost: false,
        }
    }

    #[test]
    fn test_same_seed_same_run() {
        let first = run_simulation(&options(42, 3_000));
        let second = run_simulation(&options(42, 3_000));

        assert_eq!(first, second);
    }

    #[test]
    fn test_respects_tick_budget() {
        let summary = run_simulation(&options(5, 50));

        assert!(summary.ticks <= 50);
        assert_eq!(summary.seed, 5);
    }

    #[test]
    fn test_summary_consistency() {
        let summary = run_simulation(&options(9, 50_000));

        assert_eq!(summary.lives + summary.stats.lives_lost, STARTING_LIVES);
        if summary.run_state == RunState::GameOver {
            assert_eq!(summary.lives, 0);
        }
        if summary.stats.foods_eaten > 0 {
            assert!(summary.score >= 10 * summary.stats.foods_eaten);
        }
    }

    #[test]
    fn test_boosted_run() {
        let summary = run_simulation(&SimulateOptions {
            ticks: 500,
            seed: 1,
            boost: true,
        });

        assert!(summary.ticks <= 500);
        assert!(summary.snake_length >= 3);
    }

    #[test]
    fn test_summary_json() {
        let summary = run_simulation(&options(3, 10));
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["seed"], 3);
        assert!(json.get("foods_eaten").is_some());
        assert!(json.get("run_state").is_some());
    }
}
