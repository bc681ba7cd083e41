use std::collections::HashSet;

use anyhow::Result;
use rand::rngs::ThreadRng;

use super::config::GameConfig;
use super::grid::{Cell, Grid};
use super::item::{Item, ItemKind};
use super::snake::Snake;

/// Outcome of a single simulation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake moved onto an empty cell
    Moved,
    /// The head landed on food: the snake grew and the food respawned
    AteFood,
    /// The head ran into the snake's own body
    SelfCollision,
    /// The head ran into a stone
    HitObstacle,
}

impl TickOutcome {
    /// True for the outcomes that reset the snake
    pub fn is_reset(&self) -> bool {
        matches!(self, TickOutcome::SelfCollision | TickOutcome::HitObstacle)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: Grid,
    pub snake: Snake,
    pub food: Item,
    pub obstacles: Vec<Item>,
}

impl GameState {
    /// Union of all cells currently used by the snake body and placed items,
    /// consulted whenever a new random position is chosen
    pub fn occupied_cells(&self) -> HashSet<Cell> {
        let mut occupied: HashSet<Cell> = self.snake.cells().iter().copied().collect();
        occupied.insert(self.food.cell);
        occupied.extend(self.obstacles.iter().map(|stone| stone.cell));
        occupied
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: ThreadRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh game: snake of length 1 at the board center, then food
    /// and stones each placed on a cell free of everything placed before it
    pub fn new_game(&mut self) -> Result<GameState> {
        let grid = Grid::new(self.config.grid_width, self.config.grid_height);
        let snake = Snake::new(grid.center());

        let mut occupied: HashSet<Cell> = snake.cells().iter().copied().collect();
        let food = Item::spawn(ItemKind::Food, &grid, &occupied, &mut self.rng)?;
        occupied.insert(food.cell);

        let mut obstacles = Vec::with_capacity(self.config.obstacle_count);
        for _ in 0..self.config.obstacle_count {
            let stone = Item::spawn(ItemKind::Obstacle, &grid, &occupied, &mut self.rng)?;
            occupied.insert(stone.cell);
            obstacles.push(stone);
        }

        Ok(GameState {
            grid,
            snake,
            food,
            obstacles,
        })
    }

    /// Execute one tick: advance the snake, then resolve at most one
    /// collision. Priority is fixed, first match wins: food, then the own
    /// body, then stones.
    pub fn tick(&mut self, state: &mut GameState) -> Result<TickOutcome> {
        state.snake.advance(&state.grid);
        let head = state.snake.head();

        if head == state.food.cell {
            state.snake.grow();
            let occupied = state.occupied_cells();
            state.food.relocate(&state.grid, &occupied, &mut self.rng)?;
            return Ok(TickOutcome::AteFood);
        }

        if state.snake.hit_self() {
            state.snake.reset(state.grid.center(), &mut self.rng);
            return Ok(TickOutcome::SelfCollision);
        }

        if let Some(hit) = state.obstacles.iter().position(|stone| stone.cell == head) {
            state.snake.reset(state.grid.center(), &mut self.rng);
            let occupied = state.occupied_cells();
            state.obstacles[hit].relocate(&state.grid, &occupied, &mut self.rng)?;
            return Ok(TickOutcome::HitObstacle);
        }

        Ok(TickOutcome::Moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    /// Fresh 20x20 game with the items parked away from row 10, so scripted
    /// head movement along the center row meets nothing unintended.
    fn parked_game(engine: &mut GameEngine) -> GameState {
        let mut state = engine.new_game().unwrap();
        state.food.cell = Cell::new(0, 0);
        for (i, stone) in state.obstacles.iter_mut().enumerate() {
            stone.cell = Cell::new(i as i32 + 1, 0);
        }
        state
    }

    #[test]
    fn test_new_game_entities_disjoint() {
        let mut engine = GameEngine::new(GameConfig::small());
        let state = engine.new_game().unwrap();

        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), state.grid.center());
        assert_ne!(state.food.cell, state.snake.head());
        for stone in &state.obstacles {
            assert_ne!(stone.cell, state.snake.head());
            assert_ne!(stone.cell, state.food.cell);
        }
        assert_eq!(
            state.occupied_cells().len(),
            state.snake.len() + 1 + state.obstacles.len()
        );
    }

    #[test]
    fn test_eating_food_grows_and_respawns() {
        let mut engine = GameEngine::new(GameConfig::new(20, 20));
        let mut state = parked_game(&mut engine);

        let former_food = state.grid.step(state.snake.head(), Direction::Right);
        state.food.cell = former_food;

        let outcome = engine.tick(&mut state).unwrap();
        assert_eq!(outcome, TickOutcome::AteFood);
        assert_eq!(state.snake.head(), former_food);
        assert_eq!(state.snake.length(), 2);
        assert_ne!(state.food.cell, former_food);
        assert!(!state.snake.cells().contains(&state.food.cell));

        // Growth becomes visible on the following tick
        state.food.cell = Cell::new(0, 0);
        let outcome = engine.tick(&mut state).unwrap();
        assert_eq!(outcome, TickOutcome::Moved);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.snake.last_vacated(), None);
    }

    #[test]
    fn test_head_wraps_off_right_edge() {
        let mut engine = GameEngine::new(GameConfig::new(20, 20));
        let mut state = parked_game(&mut engine);
        let row = state.snake.head().y;

        // Center is x = 10; ten ticks heading right cross the edge
        for _ in 0..10 {
            let outcome = engine.tick(&mut state).unwrap();
            assert_eq!(outcome, TickOutcome::Moved);
        }
        assert_eq!(state.snake.head(), Cell::new(0, row));
    }

    #[test]
    fn test_self_collision_resets_to_center() {
        let mut engine = GameEngine::new(GameConfig::new(20, 20));
        let mut state = parked_game(&mut engine);

        // Feed four times in a straight line to reach length 5
        for _ in 0..4 {
            state.food.cell = state.grid.step(state.snake.head(), Direction::Right);
            let outcome = engine.tick(&mut state).unwrap();
            assert_eq!(outcome, TickOutcome::AteFood);
        }
        state.food.cell = Cell::new(0, 0);
        engine.tick(&mut state).unwrap();
        assert_eq!(state.snake.len(), 5);

        // Hook back onto the own body
        state.snake.queue_direction(Direction::Down);
        engine.tick(&mut state).unwrap();
        state.snake.queue_direction(Direction::Left);
        engine.tick(&mut state).unwrap();
        state.snake.queue_direction(Direction::Up);
        let outcome = engine.tick(&mut state).unwrap();

        assert_eq!(outcome, TickOutcome::SelfCollision);
        assert!(outcome.is_reset());
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.length(), 1);
        assert_eq!(state.snake.head(), state.grid.center());
    }

    #[test]
    fn test_obstacle_resets_snake_and_relocates() {
        let mut engine = GameEngine::new(GameConfig::new(20, 20));
        let mut state = parked_game(&mut engine);

        let ahead = state.grid.step(state.snake.head(), Direction::Right);
        state.obstacles[0].cell = ahead;

        let outcome = engine.tick(&mut state).unwrap();
        assert_eq!(outcome, TickOutcome::HitObstacle);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), state.grid.center());

        let relocated = state.obstacles[0].cell;
        assert_ne!(relocated, ahead);
        assert_ne!(relocated, state.snake.head());
        assert_ne!(relocated, state.food.cell);
    }

    #[test]
    fn test_food_wins_over_obstacle_on_same_cell() {
        let mut engine = GameEngine::new(GameConfig::new(20, 20));
        let mut state = parked_game(&mut engine);

        // Placement never produces this, but the resolution order is fixed
        let ahead = state.grid.step(state.snake.head(), Direction::Right);
        state.food.cell = ahead;
        state.obstacles[0].cell = ahead;

        let outcome = engine.tick(&mut state).unwrap();
        assert_eq!(outcome, TickOutcome::AteFood);
        assert_eq!(state.snake.length(), 2);
        assert_eq!(state.obstacles[0].cell, ahead);
    }

    #[test]
    fn test_plain_move_leaves_lengths_alone() {
        let mut engine = GameEngine::new(GameConfig::new(20, 20));
        let mut state = parked_game(&mut engine);

        let outcome = engine.tick(&mut state).unwrap();
        assert_eq!(outcome, TickOutcome::Moved);
        assert!(!outcome.is_reset());
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.length(), 1);
    }
}
