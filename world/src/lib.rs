#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Snake.

mod food;
mod snake;

pub use food::Food;
pub use snake::Snake;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_core::{Board, Command, Event};
use thiserror::Error;

/// Failures surfaced while mutating the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The snake body was empty when its head was needed.
    #[error("snake body is empty")]
    EmptyState,
    /// Every board cell is excluded so the food has nowhere to go.
    #[error("no free cell left for the food")]
    NoFreeCell,
}

/// Represents the authoritative Snake world state.
#[derive(Debug)]
pub struct World {
    board: Board,
    snake: Snake,
    food: Food,
    rng: ChaCha8Rng,
    tick_index: u64,
}

impl World {
    /// Creates a world with a fresh snake at the board center and food placed clear of it.
    pub fn new(board: Board, seed: u64) -> Result<Self, WorldError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let snake = Snake::new(board);
        let food = Food::spawn(board, &snake.occupied_cells(), &mut rng)?;

        Ok(Self {
            board,
            snake,
            food,
            rng,
            tick_index: 0,
        })
    }

    /// Assembles a world from prepared entities sharing the snake's board.
    #[must_use]
    pub fn from_parts(snake: Snake, food: Food, seed: u64) -> Self {
        Self {
            board: snake.board(),
            snake,
            food,
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick_index: 0,
        }
    }

    fn tick(&mut self, out_events: &mut Vec<Event>) -> Result<(), WorldError> {
        self.tick_index = self.tick_index.saturating_add(1);

        if let Some((from, to)) = self.snake.apply_pending_direction() {
            out_events.push(Event::DirectionChanged { from, to });
        }

        let head = self.snake.advance()?;
        out_events.push(Event::SnakeAdvanced {
            head,
            vacated: self.snake.last_vacated(),
        });

        if head == self.food.position() {
            self.snake.grow();
            out_events.push(Event::FoodEaten {
                cell: head,
                length: self.snake.length(),
            });
            self.place_food(out_events)?;
        } else if self.snake.check_self_collision() {
            self.reset_snake(out_events)?;
        }

        Ok(())
    }

    fn place_food(&mut self, out_events: &mut Vec<Event>) -> Result<(), WorldError> {
        match self.food.relocate(&self.snake.occupied_cells(), &mut self.rng) {
            Ok(cell) => {
                out_events.push(Event::FoodRelocated { cell });
                Ok(())
            }
            Err(WorldError::NoFreeCell) => {
                out_events.push(Event::BoardFilled);
                let direction = self.snake.reset(&mut self.rng);
                out_events.push(Event::SnakeReset { direction });
                let cell = self
                    .food
                    .relocate(&self.snake.occupied_cells(), &mut self.rng)?;
                out_events.push(Event::FoodRelocated { cell });
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    fn reset_snake(&mut self, out_events: &mut Vec<Event>) -> Result<(), WorldError> {
        let direction = self.snake.reset(&mut self.rng);
        out_events.push(Event::SnakeReset { direction });

        if self.snake.positions().contains(&self.food.position()) {
            let cell = self
                .food
                .relocate(&self.snake.occupied_cells(), &mut self.rng)?;
            out_events.push(Event::FoodRelocated { cell });
        }

        Ok(())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// An error indicates a broken world invariant and should be treated as fatal.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), WorldError> {
    match command {
        Command::RequestDirection { direction } => {
            world.snake.request_direction(direction);
            Ok(())
        }
        Command::Tick => world.tick(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Food, Snake, World};
    use snake_core::Board;

    /// Board the world is played on.
    #[must_use]
    pub fn board(world: &World) -> Board {
        world.board
    }

    /// Provides read-only access to the snake.
    #[must_use]
    pub fn snake(world: &World) -> &Snake {
        &world.snake
    }

    /// Provides read-only access to the food.
    #[must_use]
    pub fn food(world: &World) -> &Food {
        &world.food
    }

    /// Number of ticks processed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
