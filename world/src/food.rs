//! Food placement on free board cells.

use std::collections::HashSet;

use rand::Rng;
use snake_core::{Board, Position};

use crate::WorldError;

/// Single piece of food occupying one board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    board: Board,
    position: Position,
}

impl Food {
    /// Places food on a random cell outside `excluded`.
    pub fn spawn<R>(
        board: Board,
        excluded: &HashSet<Position>,
        rng: &mut R,
    ) -> Result<Self, WorldError>
    where
        R: Rng + ?Sized,
    {
        let position = sample_free_cell(board, excluded, rng)?;
        Ok(Self { board, position })
    }

    /// Places food on a known cell.
    #[must_use]
    pub const fn at(board: Board, position: Position) -> Self {
        Self { board, position }
    }

    /// Board the food is placed on.
    #[must_use]
    pub const fn board(&self) -> Board {
        self.board
    }

    /// Cell the food occupies.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Moves the food to a uniformly chosen cell that is not in `excluded`.
    ///
    /// Fails with [`WorldError::NoFreeCell`] when `excluded` covers the whole board.
    pub fn relocate<R>(
        &mut self,
        excluded: &HashSet<Position>,
        rng: &mut R,
    ) -> Result<Position, WorldError>
    where
        R: Rng + ?Sized,
    {
        self.position = sample_free_cell(self.board, excluded, rng)?;
        Ok(self.position)
    }
}

fn sample_free_cell<R>(
    board: Board,
    excluded: &HashSet<Position>,
    rng: &mut R,
) -> Result<Position, WorldError>
where
    R: Rng + ?Sized,
{
    let blocked = excluded
        .iter()
        .filter(|cell| board.contains(**cell))
        .count();
    if blocked >= board.total_cells() {
        return Err(WorldError::NoFreeCell);
    }

    let (columns, rows) = board.cell_count();
    loop {
        let column = rng.gen_range(0..columns);
        let row = rng.gen_range(0..rows);
        let cell = Position::new(column * board.cell_size(), row * board.cell_size());
        if !excluded.contains(&cell) {
            return Ok(cell);
        }
    }
}
