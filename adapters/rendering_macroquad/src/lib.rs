#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Snake.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The window is sized to the board in pixels and is not resizable, so board
//! coordinates map one to one onto screen coordinates.

use anyhow::{Context, Result};
use macroquad::{
    input::{
        is_quit_requested, prevent_quit,
        utils::{register_input_subscriber, repeat_all_miniquad_input},
        KeyCode,
    },
    miniquad::{Context as QuadContext, EventHandler, KeyMods},
    shapes::{draw_rectangle, draw_rectangle_lines},
};
use snake_core::{InputEvent, Key, LoopControl, Position};
use snake_rendering::{Color, Presentation, RenderTarget, RenderingBackend, TickClock};
use std::{mem, sync::mpsc, time::Duration};

/// Input observed during a single frame, keys in the order they went down.
#[doc(hidden)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyObservations {
    /// The window manager asked the window to close.
    pub close_requested: bool,
    /// Keys pressed since the previous frame, oldest first.
    pub pressed: Vec<KeyCode>,
}

impl KeyObservations {
    /// Records a key-down event; auto-repeats of a held key are ignored.
    pub fn record_key_down(&mut self, keycode: KeyCode, repeat: bool) {
        if !repeat {
            self.pressed.push(keycode);
        }
    }

    /// Appends the observed input to `out` in arrival order.
    ///
    /// A window close request comes first. `Escape` becomes a close request at
    /// its position, arrows become key presses, and other keys are dropped.
    pub fn collect_into(&self, out: &mut Vec<InputEvent>) {
        if self.close_requested {
            out.push(InputEvent::CloseRequested);
        }

        out.extend(self.pressed.iter().filter_map(|keycode| match keycode {
            KeyCode::Escape => Some(InputEvent::CloseRequested),
            KeyCode::Up => Some(InputEvent::KeyPressed(Key::Up)),
            KeyCode::Down => Some(InputEvent::KeyPressed(Key::Down)),
            KeyCode::Left => Some(InputEvent::KeyPressed(Key::Left)),
            KeyCode::Right => Some(InputEvent::KeyPressed(Key::Right)),
            _ => None,
        }));
    }
}

/// Subscribes to macroquad's raw input queue so key presses keep their order
/// between two polls.
struct KeyRecorder {
    subscriber: usize,
    observations: KeyObservations,
}

impl KeyRecorder {
    /// Must be created inside the macroquad window.
    fn new() -> Self {
        Self {
            subscriber: register_input_subscriber(),
            observations: KeyObservations::default(),
        }
    }

    /// Drains every input event since the previous poll.
    fn poll(&mut self) -> KeyObservations {
        let subscriber = self.subscriber;
        repeat_all_miniquad_input(self, subscriber);

        let mut observations = mem::take(&mut self.observations);
        observations.close_requested = is_quit_requested();
        observations
    }
}

impl EventHandler for KeyRecorder {
    fn update(&mut self, _ctx: &mut QuadContext) {}

    fn draw(&mut self, _ctx: &mut QuadContext) {}

    fn key_down_event(
        &mut self,
        _ctx: &mut QuadContext,
        keycode: KeyCode,
        _keymods: KeyMods,
        repeat: bool,
    ) {
        self.observations.record_key_down(keycode, repeat);
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_tick_rate: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or present as soon as a tick completes.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs the measured tick rate once per second.
    #[must_use]
    pub fn with_show_tick_rate(mut self, show: bool) -> Self {
        self.show_tick_rate = show;
        self
    }
}

/// Averages tick durations over one-second windows.
#[derive(Debug, Default)]
struct TickRateCounter {
    elapsed: Duration,
    ticks: u32,
}

impl TickRateCounter {
    /// Records a completed tick and returns the ticks-per-second average once a second has passed.
    fn record_tick(&mut self, tick: Duration) -> Option<f32> {
        self.elapsed += tick;
        self.ticks = self.ticks.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let rate = self.ticks as f32 / seconds;
        self.elapsed = Duration::ZERO;
        self.ticks = 0;
        Some(rate)
    }
}

/// Render target that forwards draw calls to macroquad's immediate-mode shapes.
#[derive(Debug, Default)]
struct MacroquadSurface;

impl RenderTarget for MacroquadSurface {
    fn clear(&mut self, color: Color) {
        macroquad::window::clear_background(to_macroquad_color(color));
    }

    fn fill_rect(&mut self, origin: Position, size: u32, color: Color) {
        let (x, y, side) = cell_rectangle(origin, size);
        draw_rectangle(x, y, side, side, to_macroquad_color(color));
    }

    fn stroke_rect(&mut self, origin: Position, size: u32, color: Color, line_width: f32) {
        let (x, y, side) = cell_rectangle(origin, size);
        draw_rectangle_lines(x, y, side, side, line_width, to_macroquad_color(color));
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut frame: F) -> Result<()>
    where
        F: FnMut(&[InputEvent], &mut dyn RenderTarget) -> Result<LoopControl> + 'static,
    {
        let Self {
            swap_interval,
            show_tick_rate,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            board,
            tick_rate,
        } = presentation;

        let mut clock = TickClock::new(tick_rate).context("failed to configure frame pacing")?;
        let window_width =
            i32::try_from(board.width()).context("board width exceeds window limits")?;
        let window_height =
            i32::try_from(board.height()).context("board height exceeds window limits")?;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (outcome_sender, outcome_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            prevent_quit();

            let mut recorder = KeyRecorder::new();
            let mut surface = MacroquadSurface;
            let mut tick_rate_counter = TickRateCounter::default();
            let mut input = Vec::new();

            let outcome = loop {
                let tick = clock.tick();
                surface.clear(clear_color);

                input.clear();
                recorder.poll().collect_into(&mut input);

                match frame(&input, &mut surface) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break Ok(()),
                    Err(error) => break Err(error),
                }

                if show_tick_rate {
                    if let Some(rate) = tick_rate_counter.record_tick(tick) {
                        log::info!("tick rate: {rate:.2}/s (target {tick_rate}/s)");
                    }
                }

                macroquad::window::next_frame().await;
            };

            let _ = outcome_sender.send(outcome);
        });

        outcome_receiver.recv().unwrap_or(Ok(()))
    }
}

fn cell_rectangle(origin: Position, size: u32) -> (f32, f32, f32) {
    (origin.x() as f32, origin.y() as f32, size as f32)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
