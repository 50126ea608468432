#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Reflected Path adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use reflected_path_core::{InputEvent, ScreenPoint, ScreenRect, SoundCue, TileColor};
use std::time::Duration;

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
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

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

    /// Returns the same color with the provided alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

impl From<TileColor> for Color {
    fn from(color: TileColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Fixed colors used for everything that is not a tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Solid color used to clear each frame.
    pub background: Color,
    /// Outline drawn around every tile.
    pub grid_lines: Color,
    /// Vertical mirror line.
    pub symmetry_line: Color,
    /// HUD text and restart prompts.
    pub ui_text: Color,
    /// Headline of the message overlay.
    pub message_text: Color,
    /// Translucent box behind the message overlay.
    pub message_backdrop: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_rgb_u8(20, 30, 40),
            grid_lines: Color::from_rgb_u8(50, 60, 70),
            symmetry_line: Color::from_rgb_u8(255, 255, 255),
            ui_text: Color::from_rgb_u8(230, 230, 230),
            message_text: Color::from_rgb_u8(255, 220, 180),
            message_backdrop: Color::new(0.0, 0.0, 0.0, 180.0 / 255.0),
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Discrete input events observed during the frame, in arrival order.
    pub events: Vec<InputEvent>,
}

/// Decision returned by the scene update closure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep rendering frames.
    Continue,
    /// Stop after presenting the current frame.
    Exit,
}

/// Filled square representing one grid tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePresentation {
    /// Top-left corner in screen pixels.
    pub origin: Vec2,
    /// Side length in pixels.
    pub size: f32,
    /// Current fill color.
    pub fill: Color,
}

impl TilePresentation {
    /// Creates a tile covering the provided screen rectangle.
    #[must_use]
    pub fn from_rect(rect: ScreenRect, fill: Color) -> Self {
        Self {
            origin: to_vec2(rect.origin()),
            size: rect.width().min(rect.height()),
            fill,
        }
    }
}

/// Vertical line separating the source and player halves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymmetryLinePresentation {
    /// Horizontal screen position of the line.
    pub x: f32,
    /// Upper end of the line.
    pub top: f32,
    /// Lower end of the line.
    pub bottom: f32,
    /// Stroke width in pixels.
    pub thickness: f32,
}

impl SymmetryLinePresentation {
    /// Stroke width used by the reference layout.
    pub const DEFAULT_THICKNESS: f32 = 3.0;
}

/// Status line drawn above the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct HudPresentation {
    /// Top-left corner of the status line.
    pub origin: Vec2,
    /// Horizontal distance between consecutive entries.
    pub spacing: f32,
    /// Formatted countdown.
    pub time: String,
    /// Formatted ink counter.
    pub ink: String,
    /// Formatted mistake counter.
    pub mistakes: String,
    /// Formatted level progress.
    pub level: String,
}

impl HudPresentation {
    /// Entries in drawing order.
    #[must_use]
    pub fn entries(&self) -> [&str; 4] {
        [
            self.time.as_str(),
            self.ink.as_str(),
            self.mistakes.as_str(),
            self.level.as_str(),
        ]
    }
}

/// Centered message with an optional prompt below it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessagePresentation {
    /// Main line of the message.
    pub headline: String,
    /// Secondary instruction line.
    pub prompt: Option<String>,
}

impl MessagePresentation {
    /// Creates a message without a prompt.
    #[must_use]
    pub fn headline<T>(headline: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            headline: headline.into(),
            prompt: None,
        }
    }

    /// Attaches a prompt line.
    #[must_use]
    pub fn with_prompt<T>(mut self, prompt: T) -> Self
    where
        T: Into<String>,
    {
        self.prompt = Some(prompt.into());
        self
    }
}

/// Scene description combining the tiles, the mirror line and the text layers.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Tiles in row-major order.
    pub tiles: Vec<TilePresentation>,
    /// Mirror line drawn over the tiles.
    pub symmetry_line: SymmetryLinePresentation,
    /// Status line.
    pub hud: HudPresentation,
    /// Overlay shown between levels and after the game ends.
    pub message: Option<MessagePresentation>,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        tiles: Vec<TilePresentation>,
        symmetry_line: SymmetryLinePresentation,
        hud: HudPresentation,
        message: Option<MessagePresentation>,
    ) -> Self {
        Self {
            tiles,
            symmetry_line,
            hud,
            message,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Fixed window size in pixels.
    pub window_size: Vec2,
    /// Colors for everything except tiles.
    pub palette: Palette,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, window_size: Vec2, palette: Palette, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            window_size,
            palette,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Reflected Path scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the window closes or the closure asks to exit.
    ///
    /// The provided `update_scene` closure receives the monotonic time since
    /// the backend started, the input captured during the frame, and may
    /// mutate the scene before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static;
}

/// Fire-and-forget sound output.
///
/// Implementations swallow their own failures; game logic never waits on them.
pub trait AudioSink {
    /// Requests playback of `cue`.
    fn play(&mut self, cue: SoundCue);
}

/// Converts a core screen point into a glam vector.
#[must_use]
pub fn to_vec2(point: ScreenPoint) -> Vec2 {
    Vec2::new(point.x(), point.y())
}

/// Converts a glam vector into a core screen point.
#[must_use]
pub fn to_screen_point(vector: Vec2) -> ScreenPoint {
    ScreenPoint::new(vector.x, vector.y)
}
