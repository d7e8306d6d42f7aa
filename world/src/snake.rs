//! Snake body, heading and growth bookkeeping.

use std::collections::{HashSet, VecDeque};

use rand::Rng;
use snake_core::{Board, Direction, Position};

use crate::WorldError;

/// Ordered body of the snake together with its heading and growth target.
///
/// The head lives at the front of the body. Every completed [`Snake::advance`]
/// leaves the body no longer than [`Snake::length`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    board: Board,
    positions: VecDeque<Position>,
    direction: Direction,
    pending_direction: Option<Direction>,
    length: usize,
    last_vacated: Option<Position>,
}

impl Snake {
    /// Creates a single-cell snake at the board center heading right.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self::with_body(board, vec![board.center()], Direction::Right)
    }

    /// Creates a snake occupying `body`, head first, with a matching target length.
    #[must_use]
    pub fn with_body(board: Board, body: Vec<Position>, direction: Direction) -> Self {
        let length = body.len();
        Self {
            board,
            positions: body.into(),
            direction,
            pending_direction: None,
            length,
            last_vacated: None,
        }
    }

    /// Board the snake moves across.
    #[must_use]
    pub const fn board(&self) -> Board {
        self.board
    }

    /// Cells occupied by the body, head first.
    #[must_use]
    pub fn positions(&self) -> &VecDeque<Position> {
        &self.positions
    }

    /// Set of every cell the body currently occupies.
    #[must_use]
    pub fn occupied_cells(&self) -> HashSet<Position> {
        self.positions.iter().copied().collect()
    }

    /// Direction applied on the next advance.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction requested by input but not yet applied.
    #[must_use]
    pub const fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Body length the snake grows toward.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Tail cell trimmed during the most recent advance.
    #[must_use]
    pub const fn last_vacated(&self) -> Option<Position> {
        self.last_vacated
    }

    /// Cell occupied by the head.
    pub fn head_position(&self) -> Result<Position, WorldError> {
        self.positions.front().copied().ok_or(WorldError::EmptyState)
    }

    /// Records `direction` as pending unless it reverses the current heading.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.direction.is_opposite(direction) {
            return;
        }

        self.pending_direction = Some(direction);
    }

    /// Promotes the pending direction, returning the `(from, to)` pair when the heading changed.
    pub fn apply_pending_direction(&mut self) -> Option<(Direction, Direction)> {
        let next = self.pending_direction.take()?;
        let previous = self.direction;
        self.direction = next;

        (previous != next).then_some((previous, next))
    }

    /// Moves the head one cell forward and trims the tail once the body exceeds its length.
    ///
    /// Returns the cell the head moved into.
    pub fn advance(&mut self) -> Result<Position, WorldError> {
        let head = self.head_position()?;
        let next = self.board.wrap_advance(head, self.direction);
        self.positions.push_front(next);

        self.last_vacated = if self.positions.len() > self.length {
            self.positions.pop_back()
        } else {
            None
        };

        Ok(next)
    }

    /// Raises the target length; the body catches up on the next advance.
    pub fn grow(&mut self) {
        self.length = self.length.saturating_add(1);
    }

    /// Returns `true` when the head shares a cell with any other body segment.
    #[must_use]
    pub fn check_self_collision(&self) -> bool {
        let Some(head) = self.positions.front() else {
            return false;
        };

        self.positions.iter().skip(1).any(|cell| cell == head)
    }

    /// Shrinks the snake back to a single center cell facing a random direction.
    ///
    /// Returns the newly chosen direction.
    pub fn reset<R>(&mut self, rng: &mut R) -> Direction
    where
        R: Rng + ?Sized,
    {
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];

        self.positions.clear();
        self.positions.push_back(self.board.center());
        self.length = 1;
        self.direction = direction;
        self.pending_direction = None;
        self.last_vacated = None;

        direction
    }
}
