use ratatui::style::Color;

use crate::game::{Cell, Item, ItemKind, Snake};

// Palette carried over from the desktop version of the game
pub const BOARD_BACKGROUND: Color = Color::Rgb(245, 245, 245);
pub const CELL_BORDER: Color = Color::Rgb(0, 0, 0);
pub const FOOD_COLOR: Color = Color::Rgb(220, 20, 60);
pub const SNAKE_COLOR: Color = Color::Rgb(34, 139, 34);
pub const OBSTACLE_COLOR: Color = Color::Rgb(105, 105, 105);

/// One grid cell to paint: where, the fill, and an optional border color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub cell: Cell,
    pub fill: Color,
    pub border: Option<Color>,
}

impl Sprite {
    /// True when this sprite repaints its cell with the board background,
    /// i.e. it erases rather than draws
    pub fn is_clear(&self) -> bool {
        self.fill == BOARD_BACKGROUND
    }
}

/// Anything that can tell the renderer which cells to paint.
///
/// Entities yield cells and colors only; they never touch the drawing
/// facility themselves.
pub trait Drawable {
    fn sprites(&self) -> Vec<Sprite>;
}

impl Drawable for Item {
    fn sprites(&self) -> Vec<Sprite> {
        let fill = match self.kind {
            ItemKind::Food => FOOD_COLOR,
            ItemKind::Obstacle => OBSTACLE_COLOR,
        };
        vec![Sprite {
            cell: self.cell,
            fill,
            border: Some(CELL_BORDER),
        }]
    }
}

impl Drawable for Snake {
    fn sprites(&self) -> Vec<Sprite> {
        let mut sprites = Vec::with_capacity(self.len() + 1);

        // Erase the cell the tail vacated this tick
        if let Some(vacated) = self.last_vacated() {
            sprites.push(Sprite {
                cell: vacated,
                fill: BOARD_BACKGROUND,
                border: None,
            });
        }

        for (i, &cell) in self.cells().iter().enumerate() {
            sprites.push(Sprite {
                cell,
                fill: SNAKE_COLOR,
                // Only the head carries a border
                border: (i == 0).then_some(CELL_BORDER),
            });
        }

        sprites
    }
}
