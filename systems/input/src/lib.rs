#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system that turns raw adapter input into world commands.

use snake_core::{Command, Direction, InputEvent, Key, LoopControl};

/// Translates drained input events into direction requests.
///
/// Reversal filtering lives on the snake; the mapper only forwards.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputMapper;

impl InputMapper {
    /// Creates a new input mapper.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Consumes the frame's input events and emits direction commands in arrival order.
    ///
    /// Returns [`LoopControl::Exit`] as soon as a close request is seen; events after
    /// it are not translated.
    pub fn handle(&self, events: &[InputEvent], out: &mut Vec<Command>) -> LoopControl {
        for event in events {
            match event {
                InputEvent::CloseRequested => return LoopControl::Exit,
                InputEvent::KeyPressed(key) => out.push(Command::RequestDirection {
                    direction: direction_for(*key),
                }),
            }
        }

        LoopControl::Continue
    }
}

/// Direction requested by a directional key.
#[must_use]
pub const fn direction_for(key: Key) -> Direction {
    match key {
        Key::Up => Direction::Up,
        Key::Down => Direction::Down,
        Key::Left => Direction::Left,
        Key::Right => Direction::Right,
    }
}
