#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Reflected Path engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams and respond with new commands or
//! side-channel outputs such as [`SoundCue`] values.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Title shown by the window adapters.
pub const WINDOW_TITLE: &str = "Reflected Path";

/// Width of the reference screen in pixels.
pub const SCREEN_WIDTH: f32 = 800.0;

/// Height of the reference screen in pixels.
pub const SCREEN_HEIGHT: f32 = 600.0;

/// Location of a single grid tile expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    row: u32,
    column: u32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

/// Coordinate as written in level data.
///
/// Signed so that malformed level data survives parsing and is rejected by
/// the world's bounds validation instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct PathCoord {
    row: i32,
    column: i32,
}

impl PathCoord {
    /// Creates a new level-data coordinate.
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Row index as written in the level data.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Column index as written in the level data.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Converts the coordinate into a grid coordinate when both indices are non-negative.
    #[must_use]
    pub fn to_grid(self) -> Option<GridCoord> {
        let row = u32::try_from(self.row).ok()?;
        let column = u32::try_from(self.column).ok()?;
        Some(GridCoord::new(row, column))
    }
}

impl From<(i32, i32)> for PathCoord {
    fn from((row, column): (i32, i32)) -> Self {
        Self::new(row, column)
    }
}

impl From<PathCoord> for (i32, i32) {
    fn from(coord: PathCoord) -> Self {
        (coord.row, coord.column)
    }
}

/// Point on the screen measured in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ScreenPoint {
    x: f32,
    y: f32,
}

impl ScreenPoint {
    /// Creates a new screen point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal position in pixels.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical position in pixels.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Reports whether both components are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned screen rectangle measured in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    origin: ScreenPoint,
    width: f32,
    height: f32,
}

impl ScreenRect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(origin: ScreenPoint, width: f32, height: f32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Top-left corner of the rectangle.
    #[must_use]
    pub const fn origin(&self) -> ScreenPoint {
        self.origin
    }

    /// Width of the rectangle.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the rectangle.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Reports whether the point lies inside the half-open rectangle.
    ///
    /// Non-finite points never hit.
    #[must_use]
    pub fn contains(&self, point: ScreenPoint) -> bool {
        if !point.is_finite() {
            return false;
        }

        point.x >= self.origin.x
            && point.x < self.origin.x + self.width
            && point.y >= self.origin.y
            && point.y < self.origin.y + self.height
    }
}

/// Logical state of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileState {
    /// Tile carries no mark.
    #[default]
    Empty,
    /// Tile belongs to the path being memorised.
    OriginalPath,
    /// Player marked a tile that belongs to the reflection.
    Correct,
    /// Player marked a tile outside the reflection.
    Incorrect,
}

impl TileState {
    /// Color associated with the state.
    #[must_use]
    pub const fn color(self) -> TileColor {
        match self {
            Self::Empty => TileColor::from_rgb(25, 35, 45),
            Self::OriginalPath => TileColor::from_rgb(100, 180, 255),
            Self::Correct => TileColor::from_rgb(0, 200, 100),
            Self::Incorrect => TileColor::from_rgb(220, 50, 50),
        }
    }

    /// Numeric code used by the reference level tooling.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::OriginalPath => 1,
            Self::Correct => 3,
            Self::Incorrect => 4,
        }
    }

    /// Converts a raw state code, falling back to [`TileState::Empty`] for unknown codes.
    #[must_use]
    pub fn coerce(code: u8) -> Self {
        match Self::try_from(code) {
            Ok(state) => state,
            Err(error) => {
                log::warn!("{error}; using an empty tile instead");
                Self::Empty
            }
        }
    }
}

impl TryFrom<u8> for TileState {
    type Error = InvalidTileState;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Empty),
            1 => Ok(Self::OriginalPath),
            3 => Ok(Self::Correct),
            4 => Ok(Self::Incorrect),
            _ => Err(InvalidTileState { code }),
        }
    }
}

/// Error raised when a raw tile state code is not part of the closed state set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("tile state code {code} is not a valid tile state")]
pub struct InvalidTileState {
    /// Code that failed to convert.
    pub code: u8,
}

/// Opaque RGB color used for tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl TileColor {
    /// Creates a color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Linearly interpolates each channel between `self` and `target`.
    ///
    /// `t` is clamped to `0.0..=1.0`; `t == 1.0` yields `target` exactly.
    #[must_use]
    pub fn lerp(self, target: Self, t: f32) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Self {
            red: lerp_channel(self.red, target.red, t),
            green: lerp_channel(self.green, target.green, t),
            blue: lerp_channel(self.blue, target.blue, t),
        }
    }
}

fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    let from = f32::from(from);
    let to = f32::from(to);
    (from + (to - from) * t).round().clamp(0.0, 255.0) as u8
}

/// Phases of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// The source path is being revealed and memorised.
    ShowingPath,
    /// The player reproduces the reflection on the right half.
    PlayerDrawing,
    /// The level was won; the next level loads after a short delay.
    LevelTransition,
    /// The level countdown reached zero.
    GameOverTime,
    /// The ink budget ran out before the reflection was complete.
    GameOverInk,
    /// The player exceeded the mistake limit.
    GameOverMistakes,
    /// Every level has been completed.
    GameComplete,
}

impl GameState {
    /// Reports whether the state waits for an external restart.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::GameOverTime | Self::GameOverInk | Self::GameOverMistakes | Self::GameComplete
        )
    }

    /// Reports whether the state is one of the game-over states.
    #[must_use]
    pub const fn is_game_over(self) -> bool {
        matches!(
            self,
            Self::GameOverTime | Self::GameOverInk | Self::GameOverMistakes
        )
    }
}

/// Resource whose exhaustion ended a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverReason {
    /// The countdown ran out.
    Time,
    /// The click budget ran out.
    Ink,
    /// Too many incorrect tiles were marked.
    Mistakes,
}

impl GameOverReason {
    /// Terminal game state that corresponds to the reason.
    #[must_use]
    pub const fn state(self) -> GameState {
        match self {
            Self::Time => GameState::GameOverTime,
            Self::Ink => GameState::GameOverInk,
            Self::Mistakes => GameState::GameOverMistakes,
        }
    }
}

/// Fixed geometry of the playing field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    columns: u32,
    rows: u32,
    tile_size: f32,
    origin: ScreenPoint,
}

impl GridLayout {
    /// Number of columns in the reference layout.
    pub const DEFAULT_COLUMNS: u32 = 16;
    /// Number of rows in the reference layout.
    pub const DEFAULT_ROWS: u32 = 12;
    /// Side length of a tile in the reference layout.
    pub const DEFAULT_TILE_SIZE: f32 = 40.0;
    /// Distance between the top of the screen and the grid.
    pub const DEFAULT_TOP_MARGIN: f32 = 70.0;

    /// Creates a layout with explicit dimensions and screen placement.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, tile_size: f32, origin: ScreenPoint) -> Self {
        Self {
            columns,
            rows,
            tile_size,
            origin,
        }
    }

    /// Creates a layout horizontally centred on the reference screen.
    #[must_use]
    pub fn centered(columns: u32, rows: u32, tile_size: f32) -> Self {
        let width = columns as f32 * tile_size;
        let origin_x = ((SCREEN_WIDTH - width) * 0.5).floor().max(0.0);
        Self::new(
            columns,
            rows,
            tile_size,
            ScreenPoint::new(origin_x, Self::DEFAULT_TOP_MARGIN),
        )
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a tile in pixels.
    #[must_use]
    pub const fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Top-left corner of the grid on screen.
    #[must_use]
    pub const fn origin(&self) -> ScreenPoint {
        self.origin
    }

    /// First player-side column; also the width of each half.
    #[must_use]
    pub const fn symmetry_index(&self) -> u32 {
        self.columns / 2
    }

    /// Horizontal screen position of the mirror line.
    #[must_use]
    pub fn symmetry_line_x(&self) -> f32 {
        self.origin.x + self.symmetry_index() as f32 * self.tile_size
    }

    /// Width of the grid in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    /// Height of the grid in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, coord: GridCoord) -> bool {
        coord.row() < self.rows && coord.column() < self.columns
    }

    /// Reports whether the coordinate lies on the player (right) half.
    #[must_use]
    pub const fn is_player_side(&self, coord: GridCoord) -> bool {
        self.contains(coord) && coord.column() >= self.symmetry_index()
    }

    /// Reports whether the coordinate lies on the source (left) half.
    #[must_use]
    pub const fn is_source_side(&self, coord: GridCoord) -> bool {
        coord.row() < self.rows && coord.column() < self.symmetry_index()
    }

    /// Screen rectangle covered by the tile at `coord`.
    #[must_use]
    pub fn tile_rect(&self, coord: GridCoord) -> ScreenRect {
        ScreenRect::new(
            ScreenPoint::new(
                self.origin.x + coord.column() as f32 * self.tile_size,
                self.origin.y + coord.row() as f32 * self.tile_size,
            ),
            self.tile_size,
            self.tile_size,
        )
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::centered(
            Self::DEFAULT_COLUMNS,
            Self::DEFAULT_ROWS,
            Self::DEFAULT_TILE_SIZE,
        )
    }
}

/// Durations that pace the reveal, transitions and warnings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    /// Delay between two revealed path tiles.
    pub reveal_delay: Duration,
    /// How long the fully revealed path stays visible.
    pub path_show_duration: Duration,
    /// Pause between a won level and the next one.
    pub transition_delay: Duration,
    /// Duration of a tile color animation. Zero disables animation.
    pub tile_transition: Duration,
    /// Remaining time at which the low-time warning starts.
    pub warning_threshold: Duration,
    /// Minimum interval between two low-time warnings.
    pub warning_repeat: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            reveal_delay: Duration::from_millis(75),
            path_show_duration: Duration::from_millis(1800),
            transition_delay: Duration::from_millis(1500),
            tile_transition: Duration::from_millis(250),
            warning_threshold: Duration::from_millis(10_000),
            warning_repeat: Duration::from_millis(1000),
        }
    }
}

/// Resolved per-level resource budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Countdown available once drawing starts.
    pub time_limit: Duration,
    /// Number of tiles the player may mark.
    pub ink_limit: u32,
    /// Number of incorrect tiles tolerated; one more ends the game.
    pub mistake_limit: u32,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_millis(25_000),
            ink_limit: 25,
            mistake_limit: 5,
        }
    }
}

/// Optional per-level replacements for the default resource limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LevelOverrides {
    /// Replacement countdown.
    pub time_limit: Option<Duration>,
    /// Replacement ink budget.
    pub ink_limit: Option<u32>,
    /// Replacement mistake tolerance.
    pub mistake_limit: Option<u32>,
}

impl LevelOverrides {
    /// Applies the overrides on top of `defaults`.
    #[must_use]
    pub fn resolve(&self, defaults: ResourceLimits) -> ResourceLimits {
        ResourceLimits {
            time_limit: self.time_limit.unwrap_or(defaults.time_limit),
            ink_limit: self.ink_limit.unwrap_or(defaults.ink_limit),
            mistake_limit: self.mistake_limit.unwrap_or(defaults.mistake_limit),
        }
    }
}

/// Static description of a single level.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Human-readable label, if any.
    pub name: Option<String>,
    /// Source path in reveal order.
    pub path: Vec<PathCoord>,
    /// Resource overrides for the level.
    pub overrides: LevelOverrides,
}

impl LevelSpec {
    /// Creates an unnamed level without overrides.
    #[must_use]
    pub fn new(path: Vec<PathCoord>) -> Self {
        Self {
            name: None,
            path,
            overrides: LevelOverrides::default(),
        }
    }

    /// Attaches a display name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the resource overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: LevelOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Read-only provider of level data.
pub trait LevelSource {
    /// Number of available levels.
    fn level_count(&self) -> usize;

    /// Level stored at `index`, if present.
    fn level(&self, index: usize) -> Option<&LevelSpec>;
}

/// Level data combined with its resolved resource limits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelPlan {
    /// Zero-based level index.
    pub index: usize,
    /// Display name carried over from the level data.
    pub name: Option<String>,
    /// Source path in reveal order.
    pub path: Vec<PathCoord>,
    /// Limits after applying the level overrides.
    pub limits: ResourceLimits,
}

/// Reasons a level could not be set up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum SetupError {
    /// The requested index lies past the last level.
    #[error("no level exists at index {index}")]
    NoMoreLevels {
        /// Requested level index.
        index: usize,
    },
    /// None of the level's path coordinates lies on the source half.
    #[error("level {index} has no valid path tiles on the source side")]
    EmptyPath {
        /// Requested level index.
        index: usize,
    },
}

/// Complete configuration of a play session.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionConfig {
    /// Grid geometry.
    pub layout: GridLayout,
    /// Pacing constants.
    pub timing: Timing,
    /// Limits used when a level does not override them.
    pub defaults: ResourceLimits,
}

/// Commands that express all permissible world mutations.
///
/// Every command carries the monotonic time at which it is issued.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Prepares the level at `index` and starts revealing its path.
    SetupLevel {
        /// Zero-based level index.
        index: usize,
        /// Time at which the setup happens.
        now: Duration,
    },
    /// Reports a primary pointer press during drawing.
    Click {
        /// Screen position of the press.
        position: ScreenPoint,
        /// Time at which the press was observed.
        now: Duration,
    },
    /// Advances animations and the state machine to `now`.
    Tick {
        /// Current monotonic time.
        now: Duration,
    },
    /// Restarts the session from the first level.
    Restart {
        /// Time at which the restart was requested.
        now: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A level was set up and its reveal started.
    LevelStarted {
        /// Zero-based level index.
        index: usize,
        /// Limits that apply to the level.
        limits: ResourceLimits,
        /// Number of valid path tiles queued for reveal.
        path_tiles: usize,
        /// Number of tiles in the reflection set.
        required_tiles: usize,
    },
    /// A level coordinate fell outside the source half and was skipped.
    PathCoordinateRejected {
        /// Level that contained the coordinate.
        index: usize,
        /// Offending coordinate.
        coord: PathCoord,
    },
    /// A level could not be set up.
    LevelSetupFailed {
        /// Requested level index.
        index: usize,
        /// Failure reason.
        error: SetupError,
    },
    /// A path tile became visible.
    TileRevealed {
        /// Revealed coordinate.
        coord: GridCoord,
    },
    /// The path was hidden and drawing started.
    PathHidden,
    /// The player marked a tile.
    TileMarked {
        /// Marked coordinate.
        coord: GridCoord,
        /// Whether the tile belongs to the reflection.
        correct: bool,
        /// Ink left after the mark.
        remaining_ink: u32,
    },
    /// The countdown is below the warning threshold.
    TimerWarning {
        /// Time left in the level.
        remaining: Duration,
    },
    /// Every required tile was marked.
    LevelCompleted {
        /// Zero-based level index.
        index: usize,
    },
    /// A resource ran out.
    GameOver {
        /// Exhausted resource.
        reason: GameOverReason,
    },
    /// The last level was completed.
    GameCompleted,
    /// A restart was accepted.
    SessionRestarted,
    /// The session cannot continue.
    SessionHalted {
        /// Failure that halted the session.
        error: SetupError,
    },
}

/// Pointer buttons distinguished by the input adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Usually the left mouse button.
    Primary,
    /// Usually the right mouse button.
    Secondary,
    /// Usually the middle mouse button.
    Middle,
}

/// Discrete input events polled once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// The player asked to close the game.
    Quit,
    /// A pointer button was pressed.
    PointerDown {
        /// Screen position of the pointer.
        position: ScreenPoint,
        /// Button that was pressed.
        button: PointerButton,
    },
    /// A key was pressed.
    KeyDown,
}

/// Named sound effects requested from the audio sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Any accepted tile mark.
    Click,
    /// A correct mark.
    Correct,
    /// An incorrect mark.
    Incorrect,
    /// A level was won.
    LevelComplete,
    /// A level was lost.
    GameOver,
    /// The path reveal started.
    PathShow,
    /// The countdown is running low.
    TimerLow,
}

impl SoundCue {
    /// Stable asset name of the cue.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
            Self::LevelComplete => "level_complete",
            Self::GameOver => "game_over",
            Self::PathShow => "path_show",
            Self::TimerLow => "timer_warning",
        }
    }
}
