//! Torus Snake - classic grid snake on a wrapping board
//!
//! This library provides:
//! - Core simulation logic (game module): grid wraparound, the snake state
//!   machine, item placement, and the tick engine
//! - Keyboard input mapping (input module)
//! - Terminal rendering (render module)
//! - The fixed-tick game loop tying them together (app module)

pub mod app;
pub mod game;
pub mod input;
pub mod render;
