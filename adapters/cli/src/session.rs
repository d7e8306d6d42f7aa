//! Per-tick wiring of input, world and drawing.

use anyhow::{Context, Result};
use snake_core::{Board, Command, Event, InputEvent, LoopControl};
use snake_rendering::{draw_world, RenderTarget};
use snake_system_input::InputMapper;
use snake_world::{self as world, query, World};

/// Owns the world for the lifetime of the window and advances it once per frame.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    input: InputMapper,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Session {
    /// Starts a session on the standard board.
    pub(crate) fn new(seed: u64) -> Result<Self> {
        let world = World::new(Board::STANDARD, seed).context("failed to create the world")?;
        Ok(Self::from_world(world))
    }

    fn from_world(world: World) -> Self {
        Self {
            world,
            input: InputMapper::new(),
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Processes one tick: translates input, advances the world, then draws it.
    ///
    /// The render target has already been cleared by the backend.
    pub(crate) fn frame(
        &mut self,
        input: &[InputEvent],
        target: &mut dyn RenderTarget,
    ) -> Result<LoopControl> {
        self.commands.clear();
        self.events.clear();

        if self.input.handle(input, &mut self.commands) == LoopControl::Exit {
            log::info!(
                "close requested after {} ticks",
                query::tick_index(&self.world)
            );
            return Ok(LoopControl::Exit);
        }

        self.commands.push(Command::Tick);
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events)
                .context("world invariant violated")?;
        }

        for event in &self.events {
            log_event(event);
        }

        draw_world(&self.world, target);
        Ok(LoopControl::Continue)
    }
}

fn log_event(event: &Event) {
    match event {
        Event::SnakeReset { direction } => {
            log::info!("snake collided with itself; restarting heading {direction:?}");
        }
        Event::BoardFilled => log::info!("board filled; restarting"),
        Event::FoodEaten { cell, length } => {
            log::debug!("food eaten at {cell:?}; length now {length}");
        }
        other => log::debug!("{other:?}"),
    }
}
