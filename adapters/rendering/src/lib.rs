#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Snake adapters.
//!
//! Entities draw themselves through the [`Draw`] capability onto any
//! [`RenderTarget`]. Backends own the window, pace frames with a
//! [`TickClock`] and hand a target to the per-frame closure passed to
//! [`RenderingBackend::run`].

mod clock;

pub use clock::TickClock;

use anyhow::Result as AnyResult;
use snake_core::{Board, InputEvent, LoopControl, Position};
use snake_world::{query, Food, Snake, World};
use thiserror::Error;

/// Stroke width of the border drawn around every occupied cell.
pub const BORDER_WIDTH: f32 = 1.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Board colours.
pub mod palette {
    use super::Color;

    /// Fill used to clear the board and erase vacated cells.
    pub const BACKGROUND: Color = Color::from_rgb_u8(100, 100, 0);
    /// Outline drawn around occupied cells.
    pub const BORDER: Color = Color::from_rgb_u8(93, 216, 228);
    /// Food fill.
    pub const FOOD: Color = Color::from_rgb_u8(255, 0, 0);
    /// Snake body fill.
    pub const SNAKE: Color = Color::from_rgb_u8(5, 255, 5);
}

/// Surface that accepts the primitive draw operations used by the game.
pub trait RenderTarget {
    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Fills the square cell of side `size` anchored at `origin`.
    fn fill_rect(&mut self, origin: Position, size: u32, color: Color);

    /// Outlines the square cell of side `size` anchored at `origin`.
    fn stroke_rect(&mut self, origin: Position, size: u32, color: Color, line_width: f32);
}

/// Capability shared by everything that can paint itself onto a [`RenderTarget`].
pub trait Draw {
    /// Issues the draw calls for the current state without mutating it.
    fn draw(&self, target: &mut dyn RenderTarget);
}

fn draw_cell(target: &mut dyn RenderTarget, cell: Position, size: u32, fill: Color) {
    target.fill_rect(cell, size, fill);
    target.stroke_rect(cell, size, palette::BORDER, BORDER_WIDTH);
}

impl Draw for Snake {
    fn draw(&self, target: &mut dyn RenderTarget) {
        let size = self.board().cell_size();
        for cell in self.positions() {
            draw_cell(target, *cell, size, palette::SNAKE);
        }

        if let Ok(head) = self.head_position() {
            draw_cell(target, head, size, palette::SNAKE);
        }

        if let Some(vacated) = self.last_vacated() {
            if !self.positions().contains(&vacated) {
                target.fill_rect(vacated, size, palette::BACKGROUND);
            }
        }
    }
}

impl Draw for Food {
    fn draw(&self, target: &mut dyn RenderTarget) {
        draw_cell(target, self.position(), self.board().cell_size(), palette::FOOD);
    }
}

/// Draws the snake followed by the food.
pub fn draw_world(world: &World, target: &mut dyn RenderTarget) {
    query::snake(world).draw(target);
    query::food(world).draw(target);
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Board whose pixel size determines the window size.
    pub board: Board,
    /// Ticks processed per second.
    pub tick_rate: u32,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, board: Board, tick_rate: u32) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            board,
            tick_rate,
        }
    }
}

/// Rendering backend capable of presenting Snake frames.
pub trait RenderingBackend {
    /// Runs the rendering backend until the frame closure asks to exit.
    ///
    /// Every tick the backend waits for the tick boundary, clears the surface to
    /// the presentation's clear color, drains pending input, invokes `frame`
    /// with the drained events and a render target, then presents the frame.
    /// An error returned by `frame` stops the loop and is returned after the
    /// window is released.
    fn run<F>(self, presentation: Presentation, frame: F) -> AnyResult<()>
    where
        F: FnMut(&[InputEvent], &mut dyn RenderTarget) -> AnyResult<LoopControl> + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RenderingError {
    /// Frame pacing needs at least one tick per second.
    #[error("tick rate must be positive")]
    ZeroTickRate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_core::Direction;

    #[derive(Clone, Debug, PartialEq)]
    enum Op {
        Clear(Color),
        Fill(Position, Color),
        Stroke(Position, Color),
    }

    #[derive(Default)]
    struct RecordingTarget {
        ops: Vec<Op>,
    }

    impl RenderTarget for RecordingTarget {
        fn clear(&mut self, color: Color) {
            self.ops.push(Op::Clear(color));
        }

        fn fill_rect(&mut self, origin: Position, size: u32, color: Color) {
            assert_eq!(size, 20);
            self.ops.push(Op::Fill(origin, color));
        }

        fn stroke_rect(&mut self, origin: Position, size: u32, color: Color, line_width: f32) {
            assert_eq!(size, 20);
            assert!((line_width - BORDER_WIDTH).abs() < f32::EPSILON);
            self.ops.push(Op::Stroke(origin, color));
        }
    }

    fn cell_ops(cell: Position, fill: Color) -> [Op; 2] {
        [Op::Fill(cell, fill), Op::Stroke(cell, palette::BORDER)]
    }

    #[test]
    fn palette_matches_board_colours() {
        assert_eq!(palette::BACKGROUND, Color::from_rgb_u8(100, 100, 0));
        assert!((palette::SNAKE.green - 1.0).abs() < f32::EPSILON);
        assert!((palette::FOOD.red - 1.0).abs() < f32::EPSILON);
        assert!((palette::BORDER.alpha - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn snake_draws_body_then_head_then_erases_vacated_cell() {
        let board = Board::STANDARD;
        let mut snake = Snake::with_body(
            board,
            vec![Position::new(100, 100), Position::new(80, 100)],
            Direction::Right,
        );
        let _ = snake.advance().expect("non-empty body");
        let mut target = RecordingTarget::default();

        snake.draw(&mut target);

        let head = Position::new(120, 100);
        let body = Position::new(100, 100);
        let mut expected = Vec::new();
        expected.extend(cell_ops(head, palette::SNAKE));
        expected.extend(cell_ops(body, palette::SNAKE));
        expected.extend(cell_ops(head, palette::SNAKE));
        expected.push(Op::Fill(Position::new(80, 100), palette::BACKGROUND));
        assert_eq!(target.ops, expected);
    }

    #[test]
    fn vacated_cell_reoccupied_by_head_is_not_erased() {
        let board = Board::STANDARD;
        let mut snake = Snake::with_body(
            board,
            vec![
                Position::new(100, 100),
                Position::new(100, 120),
                Position::new(120, 120),
                Position::new(120, 100),
            ],
            Direction::Right,
        );
        let _ = snake.advance().expect("non-empty body");
        let mut target = RecordingTarget::default();

        snake.draw(&mut target);

        assert!(!target
            .ops
            .iter()
            .any(|op| matches!(op, Op::Fill(_, color) if *color == palette::BACKGROUND)));
    }

    #[test]
    fn food_draws_a_bordered_cell() {
        let food = Food::at(Board::STANDARD, Position::new(40, 60));
        let mut target = RecordingTarget::default();

        food.draw(&mut target);

        assert_eq!(target.ops, cell_ops(Position::new(40, 60), palette::FOOD).to_vec());
    }

    #[test]
    fn draw_world_paints_snake_before_food() {
        let board = Board::STANDARD;
        let world = World::from_parts(
            Snake::new(board),
            Food::at(board, Position::new(0, 0)),
            0,
        );
        let mut target = RecordingTarget::default();
        target.clear(palette::BACKGROUND);

        draw_world(&world, &mut target);

        assert_eq!(target.ops.first(), Some(&Op::Clear(palette::BACKGROUND)));
        assert_eq!(
            target.ops.last(),
            Some(&Op::Stroke(Position::new(0, 0), palette::BORDER))
        );
        assert_eq!(
            target.ops[1],
            Op::Fill(board.center(), palette::SNAKE),
            "snake should be drawn first"
        );
    }

    #[test]
    fn presentation_retains_window_settings() {
        let presentation = Presentation::new("Snake", palette::BACKGROUND, Board::STANDARD, 20);

        assert_eq!(presentation.window_title, "Snake");
        assert_eq!(presentation.board.width(), 640);
        assert_eq!(presentation.tick_rate, 20);
    }
}
