#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Snake engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters translate raw input into
//! [`InputEvent`] values, systems turn those into [`Command`] values, the
//! world executes commands via its `apply` entry point and broadcasts
//! [`Event`] values describing what changed during the tick.
//!
//! Positions are expressed in pixel space and always sit on a cell corner of
//! the [`Board`].

use thiserror::Error;

/// Width of the playing board measured in pixels.
pub const BOARD_WIDTH: u32 = 640;

/// Height of the playing board measured in pixels.
pub const BOARD_HEIGHT: u32 = 480;

/// Side length of a single square cell measured in pixels.
pub const CELL_SIZE: u32 = 20;

/// Number of simulation ticks processed per second.
pub const TICKS_PER_SECOND: u32 = 20;

/// Title shown by windowed adapters.
pub const WINDOW_TITLE: &str = "Snake";

/// Top-left pixel coordinate of a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    x: u32,
    y: u32,
}

impl Position {
    /// Creates a new position from pixel coordinates.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Horizontal pixel offset of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Vertical pixel offset of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }
}

/// Cardinal movement directions available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction, in a fixed order suitable for uniform sampling.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Per-tick displacement sign along the column and row axes.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Direction pointing the exact opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns `true` when `other` reverses this direction.
    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Toroidal cell grid laid over the board's pixel surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    width: u32,
    height: u32,
    cell_size: u32,
}

impl Board {
    /// The 640x480 board with 20 pixel cells used by the game.
    pub const STANDARD: Board = Board {
        width: BOARD_WIDTH,
        height: BOARD_HEIGHT,
        cell_size: CELL_SIZE,
    };

    /// Creates a board, verifying that the cell size tiles both dimensions exactly.
    pub fn new(width: u32, height: u32, cell_size: u32) -> Result<Self, BoardError> {
        if cell_size == 0 {
            return Err(BoardError::ZeroCellSize);
        }

        if width == 0 || height == 0 || width % cell_size != 0 || height % cell_size != 0 {
            return Err(BoardError::UnevenCells {
                width,
                height,
                cell_size,
            });
        }

        Ok(Self {
            width,
            height,
            cell_size,
        })
    }

    /// Board width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Board height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Side length of a cell in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Number of cell columns and rows.
    #[must_use]
    pub const fn cell_count(&self) -> (u32, u32) {
        (self.width / self.cell_size, self.height / self.cell_size)
    }

    /// Total number of cells on the board.
    #[must_use]
    pub const fn total_cells(&self) -> usize {
        let (columns, rows) = self.cell_count();
        columns as usize * rows as usize
    }

    /// Cell at the middle of the board, snapped to the grid.
    #[must_use]
    pub const fn center(&self) -> Position {
        let (columns, rows) = self.cell_count();
        Position::new(
            (columns / 2) * self.cell_size,
            (rows / 2) * self.cell_size,
        )
    }

    /// Position of the cell at the provided column and row, if it exists.
    #[must_use]
    pub fn cell(&self, column: u32, row: u32) -> Option<Position> {
        let (columns, rows) = self.cell_count();
        if column >= columns || row >= rows {
            return None;
        }

        Some(Position::new(column * self.cell_size, row * self.cell_size))
    }

    /// Reports whether the position is a cell corner inside the board.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x < self.width
            && position.y < self.height
            && position.x % self.cell_size == 0
            && position.y % self.cell_size == 0
    }

    /// Moves a position one cell in `direction`, re-entering at the opposite edge.
    #[must_use]
    pub fn wrap_advance(&self, position: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        let step = i64::from(self.cell_size);
        let x = (i64::from(position.x) + i64::from(dx) * step).rem_euclid(i64::from(self.width));
        let y = (i64::from(position.y) + i64::from(dy) * step).rem_euclid(i64::from(self.height));

        // rem_euclid keeps both coordinates within 0..width and 0..height.
        Position::new(x as u32, y as u32)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Reasons a board description was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A zero cell size would produce an empty grid.
    #[error("cell size must be positive")]
    ZeroCellSize,
    /// The cell size must divide both board dimensions.
    #[error("cell size {cell_size} does not tile a {width}x{height} board")]
    UnevenCells {
        /// Requested board width.
        width: u32,
        /// Requested board height.
        height: u32,
        /// Requested cell size.
        cell_size: u32,
    },
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Asks the snake to turn on its next tick.
    RequestDirection {
        /// Requested direction of travel.
        direction: Direction,
    },
    /// Advances the simulation by one tick.
    Tick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// The pending direction became the current direction.
    DirectionChanged {
        /// Direction before the change.
        from: Direction,
        /// Direction after the change.
        to: Direction,
    },
    /// The snake moved its head one cell.
    SnakeAdvanced {
        /// Cell the head now occupies.
        head: Position,
        /// Tail cell released during the move, if one was trimmed.
        vacated: Option<Position>,
    },
    /// The snake's head landed on the food.
    FoodEaten {
        /// Cell where the food was eaten.
        cell: Position,
        /// Target length of the snake after growing.
        length: usize,
    },
    /// The food moved to a new free cell.
    FoodRelocated {
        /// Cell the food now occupies.
        cell: Position,
    },
    /// The snake ran into itself and started over.
    SnakeReset {
        /// Randomly chosen direction after the reset.
        direction: Direction,
    },
    /// The snake covered every cell so no food could be placed.
    BoardFilled,
}

/// Directional keys understood by the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
}

/// Raw input observed by an adapter during a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// The player asked to close the window.
    CloseRequested,
    /// A directional key was pressed.
    KeyPressed(Key),
}

/// Signals whether the game loop keeps running after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoopControl {
    /// Process the next tick.
    Continue,
    /// Leave the loop and release the window.
    Exit,
}
