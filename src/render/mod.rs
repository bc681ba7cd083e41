//! Terminal rendering: entities yield sprites, the renderer paints them

pub mod renderer;
pub mod sprite;

pub use renderer::Renderer;
pub use sprite::{Drawable, Sprite};
