//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A driver calls `GameEngine::advance` at a fixed cadence; renderers read the
//! resulting `GameState` and react to the `GameEvent`s each tick reports.

pub mod action;
pub mod autoplay;
pub mod config;
pub mod engine;
pub mod event;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, PlayMode};
pub use engine::GameEngine;
pub use event::{CollisionType, GameEvent, TickResult};
pub use state::{
    ActiveEffect, Food, GameState, Position, PowerUpItem, PowerUpKind, RunState, Snake,
};
