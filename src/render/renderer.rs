use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::effects::EffectsOverlay;
use crate::game::config::{COMBO_WINDOW_TICKS, FOOD_VARIANTS, TILE_COUNT};
use crate::game::{GameState, Position, PowerUpKind, RunState};
use crate::metrics::GameMetrics;

/// Head and body colors per score tier
const TIER_COLORS: [(Color, Color); 5] = [
    (Color::Green, Color::LightGreen),
    (Color::Yellow, Color::LightYellow),
    (Color::Magenta, Color::LightMagenta),
    (Color::Blue, Color::LightBlue),
    (Color::Indexed(93), Color::Indexed(141)),
];

/// Width in characters of a power-up countdown bar
const EFFECT_BAR_WIDTH: usize = 20;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        effects: &EffectsOverlay,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(4), // Power-ups and banner
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match state.run_state {
            RunState::NotStarted => {
                frame.render_widget(self.render_title(metrics), game_area);
            }
            RunState::GameOver => {
                frame.render_widget(self.render_game_over(state, metrics), game_area);
            }
            RunState::Running | RunState::Paused => {
                frame.render_widget(self.render_grid(state, effects), game_area);
            }
        }

        let status = self.render_status(chunks[2], state, effects);
        frame.render_widget(status, chunks[2]);

        let controls = self.render_controls(state);
        frame.render_widget(controls, chunks[3]);
    }

    fn render_grid(&self, state: &GameState, effects: &EffectsOverlay) -> Paragraph<'_> {
        let (head_color, body_color) = TIER_COLORS[state.tier().min(TIER_COLORS.len() - 1)];
        let ghost = state.has_effect(PowerUpKind::Ghost);
        let body_style = if ghost {
            Style::default().fg(body_color).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(body_color)
        };

        let mut lines = Vec::with_capacity(TILE_COUNT as usize);

        for y in 0..TILE_COUNT {
            let mut spans = Vec::with_capacity(TILE_COUNT as usize);

            for x in 0..TILE_COUNT {
                let pos = Position::new(x, y);

                let cell = if pos == state.snake.head() {
                    // Snake head - tier color
                    Span::styled(
                        "■ ",
                        Style::default().fg(head_color).add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(pos) {
                    Span::styled("□ ", body_style)
                } else if pos == state.food.position {
                    let glyph = FOOD_VARIANTS
                        .get(state.food.variant)
                        .copied()
                        .unwrap_or("O ");
                    Span::styled(glyph, Style::default().add_modifier(Modifier::BOLD))
                } else if let Some(item) = state.power_up.filter(|item| item.position == pos) {
                    Span::styled(item.kind.icon(), Style::default().fg(power_up_color(item.kind)))
                } else if effects.sparkle_at(pos) {
                    Span::styled("✦ ", Style::default().fg(Color::Yellow))
                } else {
                    // Empty cell
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let border_color = if effects.is_flashing() {
            Color::Red
        } else {
            Color::White
        };

        let title = match (state.run_state, state.autoplay) {
            (RunState::Paused, _) => " PAUSED - P to resume ",
            (_, true) => " DEMO - Enter to play ",
            _ => " Snake ",
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let combo_style = if state.combo_multiplier >= 4 {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Lives: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.lives.to_string(), Style::default().fg(Color::Red)),
            Span::raw("    "),
            Span::styled("Combo: ", Style::default().fg(Color::Yellow)),
            Span::styled(format!("x{}", state.combo_multiplier), combo_style),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.run_clock(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_status(&self, area: Rect, state: &GameState, effects: &EffectsOverlay) -> Paragraph<'_> {
        let mut lines = Vec::new();

        if state.combo_timer > 0 {
            let filled = bar_cells(f64::from(state.combo_timer) / f64::from(COMBO_WINDOW_TICKS));
            lines.push(Line::from(vec![
                Span::styled("COMBO ", Style::default().fg(Color::Yellow)),
                Span::styled("█".repeat(filled), Style::default().fg(Color::Yellow)),
                Span::styled(
                    "░".repeat(EFFECT_BAR_WIDTH - filled),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }

        for effect in &state.active_effects {
            let filled = bar_cells(effect.remaining_fraction());
            let color = power_up_color(effect.kind);
            lines.push(Line::from(vec![
                Span::raw(format!("{} {:<6} ", effect.kind.icon(), effect.kind.as_str())),
                Span::styled("█".repeat(filled), Style::default().fg(color)),
                Span::styled(
                    "░".repeat(EFFECT_BAR_WIDTH - filled),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }

        let mut pops: Vec<Span> = effects
            .floating_texts()
            .iter()
            .map(|text| {
                let color = if text.highlight { Color::Yellow } else { Color::White };
                Span::styled(format!("{} ", text.text), Style::default().fg(color))
            })
            .collect();
        if let Some(banner) = effects.banner() {
            pops.push(Span::styled(
                banner.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        if !pops.is_empty() {
            lines.push(Line::from(pops));
        }

        // Keep the newest lines if there are more than fit
        let visible = usize::from(area.height);
        if lines.len() > visible {
            lines.drain(..lines.len() - visible);
        }

        Paragraph::new(lines).alignment(Alignment::Center)
    }

    fn render_title(&self, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "S N A K E",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if !state.autoplay && metrics.new_record {
            text.push(Line::from(vec![Span::styled(
                "NEW HIGH SCORE!",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
            )]));
        }

        text.extend([
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ]);

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, state: &GameState) -> Paragraph<'_> {
        let boost = if state.boosting { "ON" } else { "off" };
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" boost ({boost}) | ")),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Ghost => Color::Magenta,
        PowerUpKind::Magnet => Color::Blue,
        PowerUpKind::Double => Color::Yellow,
    }
}

fn bar_cells(fraction: f64) -> usize {
    ((fraction.clamp(0.0, 1.0) * EFFECT_BAR_WIDTH as f64).round() as usize).min(EFFECT_BAR_WIDTH)
}
