use std::collections::HashMap;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, GameState};

use super::sprite::{Drawable, Sprite};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        let grid = self.render_grid(state);
        frame.render_widget(grid, chunks[0]);

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[1]);
    }

    /// Collect every entity's sprites into a per-cell lookup. The snake is
    /// added last so it wins any overlap within a tick.
    fn sprite_map(&self, state: &GameState) -> HashMap<Cell, Sprite> {
        let mut map = HashMap::new();

        let sprites = state
            .food
            .sprites()
            .into_iter()
            .chain(state.obstacles.iter().flat_map(|stone| stone.sprites()))
            .chain(state.snake.sprites());

        for sprite in sprites {
            map.insert(sprite.cell, sprite);
        }
        map
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let sprites = self.sprite_map(state);
        let mut lines = Vec::new();

        for y in 0..state.grid.height() {
            let mut spans = Vec::new();

            for x in 0..state.grid.width() {
                let span = match sprites.get(&Cell::new(x, y)) {
                    Some(sprite) if !sprite.is_clear() => {
                        let mut style = Style::default().fg(sprite.fill);
                        if sprite.border.is_some() {
                            style = style.add_modifier(Modifier::BOLD);
                        }
                        Span::styled("■ ", style)
                    }
                    _ => Span::styled("· ", Style::default().fg(Color::DarkGray)),
                };
                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
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
