//! Arcade Snake - a terminal Snake with combos, power-ups and an autoplay demo
//!
//! This library provides:
//! - Core game simulation and the autoplay heuristic (game module)
//! - TUI rendering and cosmetic effects (render module)
//! - Keyboard mapping (input module)
//! - Session metrics and high score storage (metrics, storage modules)
//! - Interactive and headless drivers (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;
