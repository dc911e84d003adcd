use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::game::config::TICK_MS;
use crate::game::{GameEngine, GameEvent, GameState, PlayMode, RunState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::{GameMetrics, RunStats};
use crate::render::{EffectsOverlay, Renderer};
use crate::storage::HighScoreStore;

/// Settings for the interactive game
#[derive(Debug, Clone)]
pub struct ArcadeOptions {
    /// Boot straight into the autoplay demo instead of the title screen
    pub boot_demo: bool,
    pub high_score_file: PathBuf,
    pub seed: Option<u64>,
}

pub struct ArcadeMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    run_stats: RunStats,
    effects: EffectsOverlay,
    renderer: Renderer,
    input_handler: InputHandler,
    store: HighScoreStore,
    should_quit: bool,
}

impl ArcadeMode {
    pub fn new(options: ArcadeOptions) -> Self {
        let mut engine = match options.seed {
            Some(seed) => GameEngine::with_seed(seed),
            None => GameEngine::new(),
        };
        let state = engine.new_game();

        let store = HighScoreStore::new(options.high_score_file);
        // A broken high score file must not keep the game from starting
        let high_score = store.load().unwrap_or_else(|err| {
            warn!("ignoring unreadable high score: {err:#}");
            0
        });

        let mut mode = Self {
            engine,
            state,
            metrics: GameMetrics::with_high_score(high_score),
            run_stats: RunStats::new(),
            effects: EffectsOverlay::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            store,
            should_quit: false,
        };

        if options.boot_demo {
            mode.start_run(PlayMode::Demo);
        }

        mode
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // One simulation tick per frame, ~30 Hz
        let mut tick_timer = interval(Duration::from_millis(TICK_MS));
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(tick_ms = TICK_MS, "game loop started");

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick, then render the result
                _ = tick_timer.tick() => {
                    self.update_game();

                    let drawn = terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics, &self.effects);
                    });
                    // A failed frame is skipped; the simulation carries on
                    if let Err(err) = drawn {
                        warn!("failed to draw frame: {err}");
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(games_played = self.metrics.games_played, "leaving game");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply(action);
        }
    }

    fn apply(&mut self, action: KeyAction) {
        let in_player_run = !self.state.autoplay
            && matches!(self.state.run_state, RunState::Running | RunState::Paused);

        match action {
            KeyAction::Steer(direction) => {
                if in_player_run && self.state.is_running() {
                    self.state.request_direction(direction);
                }
            }
            KeyAction::Boost => {
                if !in_player_run {
                    self.start_run(PlayMode::Player);
                } else if self.state.is_running() {
                    let boosting = !self.state.boosting;
                    self.state.set_boosting(boosting);
                }
            }
            KeyAction::Start => {
                if !in_player_run {
                    self.start_run(PlayMode::Player);
                }
            }
            KeyAction::TogglePause => self.state.toggle_pause(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        if self.state.is_running() {
            self.metrics.update();
        }

        let result = self.engine.advance(&mut self.state);

        self.run_stats.record(&result.events);
        self.effects.observe(&result.events);
        self.effects.advance_frame();

        if result
            .events
            .iter()
            .any(|event| matches!(event, GameEvent::GameOver { .. }))
        {
            self.finish_run();
        }
    }

    fn start_run(&mut self, mode: PlayMode) {
        self.engine.initialize(&mut self.state, mode);
        self.metrics.on_game_start();
        self.run_stats.reset();
        self.effects.clear();
    }

    /// Hand the final score to the high score store; demo runs never count
    fn finish_run(&mut self) {
        let Some(final_score) = self.state.final_score() else {
            return;
        };

        info!(
            final_score,
            demo = self.state.autoplay,
            foods = self.run_stats.foods_eaten,
            best_combo = self.run_stats.best_combo,
            "run finished"
        );

        if self.state.autoplay {
            return;
        }

        let new_record = self.metrics.on_game_over(final_score);
        debug!(session_best = self.metrics.session_best, new_record, "player run booked");

        if new_record {
            match self.store.record(final_score) {
                Ok(_) => info!(final_score, path = ?self.store.path(), "new high score saved"),
                Err(err) => warn!("failed to save high score: {err:#}"),
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
