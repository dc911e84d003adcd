//! Cosmetic timers driven by game events
//!
//! Flashes, pop-up score text and banners live here, counted in rendered
//! frames. Nothing in this module feeds back into the simulation.

use crate::game::{GameEvent, Position};

/// Frames the board border stays red after a life is lost
const FLASH_FRAMES: u32 = 12;
/// Frames a "+points" pop-up stays visible
const FLOATING_TEXT_FRAMES: u32 = 40;
/// Frames a power-up or combo banner stays visible
const BANNER_FRAMES: u32 = 45;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatingText {
    pub text: String,
    pub position: Position,
    pub frames_left: u32,
    /// Big combos are drawn highlighted
    pub highlight: bool,
}

#[derive(Debug, Default)]
pub struct EffectsOverlay {
    flash_frames: u32,
    floating: Vec<FloatingText>,
    banner: Option<(String, u32)>,
}

impl EffectsOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// React to the events of one tick
    pub fn observe(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::FoodEaten {
                    position,
                    points,
                    combo,
                } => {
                    self.floating.push(FloatingText {
                        text: format!("+{points}"),
                        position: *position,
                        frames_left: FLOATING_TEXT_FRAMES,
                        highlight: *combo >= 3,
                    });
                    if *combo > 1 {
                        self.banner = Some((format!("x{combo} COMBO!"), BANNER_FRAMES));
                    }
                }
                GameEvent::PowerUpCollected { kind, .. } => {
                    self.banner = Some((
                        format!("{} {}! {}", kind.icon(), kind.as_str(), kind.description()),
                        BANNER_FRAMES,
                    ));
                }
                GameEvent::LifeLost { .. } => self.flash_frames = FLASH_FRAMES,
                GameEvent::ComboReset => {
                    if self
                        .banner
                        .as_ref()
                        .is_some_and(|(text, _)| text.ends_with("COMBO!"))
                    {
                        self.banner = None;
                    }
                }
                _ => {}
            }
        }
    }

    /// Count down every timer by one rendered frame
    pub fn advance_frame(&mut self) {
        self.flash_frames = self.flash_frames.saturating_sub(1);

        self.floating.retain_mut(|text| {
            text.frames_left = text.frames_left.saturating_sub(1);
            text.frames_left > 0
        });

        if let Some((_, frames)) = &mut self.banner {
            *frames = frames.saturating_sub(1);
        }
        if self.banner.as_ref().is_some_and(|(_, frames)| *frames == 0) {
            self.banner = None;
        }
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_frames > 0
    }

    pub fn floating_texts(&self) -> &[FloatingText] {
        &self.floating
    }

    pub fn sparkle_at(&self, pos: Position) -> bool {
        self.floating.iter().any(|text| text.position == pos)
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
