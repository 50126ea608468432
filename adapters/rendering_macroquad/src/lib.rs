#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Reflected Path.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Sound cues reach the binary through the
//! `AudioSink` seam instead.
//!
//! All text drawing lives inside the local `ui` module.

mod ui;

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{
    get_last_key_pressed, is_key_pressed, is_mouse_button_pressed, is_quit_requested,
    mouse_position, prevent_quit, KeyCode, MouseButton,
};
use reflected_path_core::{InputEvent, PointerButton};
use reflected_path_rendering::{
    to_screen_point, Color, FrameControl, FrameInput, Palette, Presentation, RenderingBackend,
    Scene, SymmetryLinePresentation, TilePresentation,
};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

const TILE_OUTLINE_THICKNESS: f32 = 1.0;

/// Raw device state sampled once per frame.
///
/// Converting observations into a [`FrameInput`] is kept separate from
/// sampling so the mapping can be exercised without a window.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputObservations {
    /// The window close button or `Escape` was pressed.
    pub quit_requested: bool,
    /// Mouse buttons pressed this frame with the cursor position at the time.
    pub pointer_presses: Vec<(PointerButton, Vec2)>,
    /// Any other key was pressed this frame.
    pub key_pressed: bool,
}

impl InputObservations {
    fn poll() -> Self {
        let quit_requested = is_quit_requested() || is_key_pressed(KeyCode::Escape);
        let (cursor_x, cursor_y) = mouse_position();
        let cursor = Vec2::new(cursor_x, cursor_y);
        let pointer_presses = [
            (MouseButton::Left, PointerButton::Primary),
            (MouseButton::Right, PointerButton::Secondary),
            (MouseButton::Middle, PointerButton::Middle),
        ]
        .into_iter()
        .filter(|(button, _)| is_mouse_button_pressed(*button))
        .map(|(_, button)| (button, cursor))
        .collect();
        let key_pressed = matches!(get_last_key_pressed(), Some(key) if key != KeyCode::Escape);

        Self {
            quit_requested,
            pointer_presses,
            key_pressed,
        }
    }

    /// Converts the observations into the discrete events consumed by the session.
    ///
    /// A quit request is reported first, followed by pointer presses and
    /// finally a single key press.
    #[must_use]
    pub fn into_frame_input(self) -> FrameInput {
        let mut events = Vec::with_capacity(self.pointer_presses.len() + 2);
        if self.quit_requested {
            events.push(InputEvent::Quit);
        }
        events.extend(
            self.pointer_presses
                .into_iter()
                .map(|(button, position)| InputEvent::PointerDown {
                    position: to_screen_point(position),
                    button,
                }),
        );
        if self.key_pressed {
            events.push(InputEvent::KeyDown);
        }
        FrameInput { events }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
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
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    update: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    update_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_update: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.update_accum += breakdown.update;
        self.render_accum += breakdown.render;

        self.frame_times.push_back(breakdown.frame);
        self.window_duration += breakdown.frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames;
        let per_second = frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let avg_update = self.update_accum / frames;
        let avg_render = self.render_accum / frames;

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.update_accum = Duration::ZERO;
        self.render_accum = Duration::ZERO;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_update,
            avg_render,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            window_size,
            palette,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_size.x.round() as i32,
            window_height: window_size.y.round() as i32,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            prevent_quit();

            let mut scene = scene;
            let mut fps_counter = FpsCounter::default();
            let epoch = Instant::now();
            let mut last_frame = epoch;

            loop {
                let frame_start = Instant::now();
                let frame = frame_start.duration_since(last_frame);
                last_frame = frame_start;

                let frame_input = InputObservations::poll().into_frame_input();
                let control = update_scene(epoch.elapsed(), frame_input, &mut scene);
                let update = frame_start.elapsed();

                let render_start = Instant::now();
                let screen = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                macroquad::window::clear_background(to_macroquad_color(palette.background));
                draw_scene(&scene, &palette, screen);
                let render = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame,
                    update,
                    render,
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        avg_update,
                        avg_render,
                    }) = fps_metrics
                    {
                        log::info!(
                            "FPS: {:.2} (10s avg: {:.2}) | update: {:>6.2}ms render: {:>6.2}ms",
                            per_second,
                            trailing_ten_seconds,
                            avg_update.as_secs_f64() * 1_000.0,
                            avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                if control == FrameControl::Exit {
                    log::debug!("render loop exiting");
                    break;
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn draw_scene(scene: &Scene, palette: &Palette, screen: Vec2) {
    let outline = to_macroquad_color(palette.grid_lines);
    for tile in &scene.tiles {
        draw_tile(tile, outline);
    }
    draw_symmetry_line(&scene.symmetry_line, palette.symmetry_line);
    ui::draw_hud(&scene.hud, palette);
    if let Some(message) = &scene.message {
        ui::draw_message(message, screen, palette);
    }
}

fn draw_tile(tile: &TilePresentation, outline: macroquad::color::Color) {
    let TilePresentation { origin, size, fill } = *tile;
    macroquad::shapes::draw_rectangle(origin.x, origin.y, size, size, to_macroquad_color(fill));
    macroquad::shapes::draw_rectangle_lines(
        origin.x,
        origin.y,
        size,
        size,
        TILE_OUTLINE_THICKNESS,
        outline,
    );
}

fn draw_symmetry_line(line: &SymmetryLinePresentation, color: Color) {
    let (start, end) = symmetry_line_endpoints(line);
    macroquad::shapes::draw_line(
        start.x,
        start.y,
        end.x,
        end.y,
        line.thickness,
        to_macroquad_color(color),
    );
}

fn symmetry_line_endpoints(line: &SymmetryLinePresentation) -> (Vec2, Vec2) {
    (Vec2::new(line.x, line.top), Vec2::new(line.x, line.bottom))
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetry_line_spans_the_grid_height() {
        let line = SymmetryLinePresentation {
            x: 400.0,
            top: 70.0,
            bottom: 550.0,
            thickness: SymmetryLinePresentation::DEFAULT_THICKNESS,
        };

        assert_eq!(
            symmetry_line_endpoints(&line),
            (Vec2::new(400.0, 70.0), Vec2::new(400.0, 550.0))
        );
    }

    #[test]
    fn macroquad_color_keeps_alpha() {
        let color = to_macroquad_color(Color::new(0.0, 0.0, 0.0, 0.5));

        assert!((color.a - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn fps_counter_reports_average_frames_per_second() {
        let mut counter = FpsCounter::default();
        let frame = |millis| FrameBreakdown {
            frame: Duration::from_millis(millis),
            ..FrameBreakdown::default()
        };
        assert!(counter.record_frame(frame(250)).is_none());
        assert!(counter.record_frame(frame(250)).is_none());
        assert!(counter.record_frame(frame(250)).is_none());

        let metrics = counter
            .record_frame(frame(250))
            .expect("should report FPS after one second of samples");
        assert!((metrics.per_second - 4.0).abs() <= 1e-3);
        assert!((metrics.trailing_ten_seconds - 4.0).abs() <= 1e-3);
        assert!(counter.record_frame(frame(250)).is_none());
    }

    #[test]
    fn fps_counter_averages_update_and_render_time() {
        let mut counter = FpsCounter::default();
        let frame = FrameBreakdown {
            frame: Duration::from_millis(500),
            update: Duration::from_millis(2),
            render: Duration::from_millis(6),
        };

        assert!(counter.record_frame(frame).is_none());
        let metrics = counter
            .record_frame(FrameBreakdown {
                update: Duration::from_millis(4),
                render: Duration::from_millis(2),
                ..frame
            })
            .expect("should report after one second");

        assert_eq!(metrics.avg_update, Duration::from_millis(3));
        assert_eq!(metrics.avg_render, Duration::from_millis(4));
    }

    #[test]
    fn fps_counter_tracks_trailing_ten_second_average() {
        let mut counter = FpsCounter::default();
        let frame = |millis| FrameBreakdown {
            frame: Duration::from_millis(millis),
            ..FrameBreakdown::default()
        };

        for _ in 0..10 {
            for sample in 0..5 {
                let metrics = counter.record_frame(frame(200));
                if sample == 4 {
                    let metrics = metrics.expect("should report every second");
                    assert!((metrics.per_second - 5.0).abs() <= 1e-3);
                    assert!((metrics.trailing_ten_seconds - 5.0).abs() <= 1e-3);
                } else {
                    assert!(metrics.is_none());
                }
            }
        }

        for sample in 0..10 {
            let metrics = counter.record_frame(frame(100));
            if sample == 9 {
                let metrics = metrics.expect("should report every second");
                assert!((metrics.per_second - 10.0).abs() <= 1e-3);
                assert!((metrics.trailing_ten_seconds - 5.5).abs() <= 1e-3);
            } else {
                assert!(metrics.is_none());
            }
        }
    }
}
