use std::time::Duration;

use reflected_path_core::{GridCoord, ScreenPoint, ScreenRect, TileColor, TileState};

/// In-flight color transition of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorAnimation {
    /// Visual color when the transition started.
    pub from: TileColor,
    /// Color reached when the transition ends.
    pub to: TileColor,
    /// Time at which the transition started.
    pub started_at: Duration,
    /// Total length of the transition.
    pub duration: Duration,
}

impl ColorAnimation {
    fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Single grid square with a logical state and an animated visual color.
///
/// The logical state is authoritative; the visual color only trails it.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    coord: GridCoord,
    rect: ScreenRect,
    transition: Duration,
    state: TileState,
    visual: TileColor,
    animation: Option<ColorAnimation>,
}

impl Tile {
    /// Creates an empty tile covering `rect`.
    ///
    /// `transition` is the length of color animations; zero disables them.
    #[must_use]
    pub fn new(coord: GridCoord, rect: ScreenRect, transition: Duration) -> Self {
        Self {
            coord,
            rect,
            transition,
            state: TileState::Empty,
            visual: TileState::Empty.color(),
            animation: None,
        }
    }

    /// Grid coordinate of the tile.
    #[must_use]
    pub const fn coord(&self) -> GridCoord {
        self.coord
    }

    /// Screen rectangle covered by the tile.
    #[must_use]
    pub const fn rect(&self) -> ScreenRect {
        self.rect
    }

    /// Logical state of the tile.
    #[must_use]
    pub const fn state(&self) -> TileState {
        self.state
    }

    /// Color the tile should currently be drawn with.
    #[must_use]
    pub const fn visual_color(&self) -> TileColor {
        self.visual
    }

    /// Running color transition, if any.
    #[must_use]
    pub const fn animation(&self) -> Option<&ColorAnimation> {
        self.animation.as_ref()
    }

    /// Changes the logical state and starts the matching color transition.
    ///
    /// With `immediate` set, or when transitions are disabled, the visual
    /// color snaps to the state color. Otherwise the transition starts from
    /// the current visual color so interrupted animations stay continuous.
    pub fn set_state(&mut self, state: TileState, now: Duration, immediate: bool) {
        self.state = state;
        let target = state.color();

        if immediate || self.transition.is_zero() {
            self.visual = target;
            self.animation = None;
            return;
        }

        if target == self.visual {
            self.animation = None;
            return;
        }

        self.animation = Some(ColorAnimation {
            from: self.visual,
            to: target,
            started_at: now,
            duration: self.transition,
        });
    }

    /// Advances the color transition to `now`.
    pub fn update_animation(&mut self, now: Duration) {
        let Some(animation) = self.animation else {
            return;
        };

        let t = animation.progress(now);
        if t >= 1.0 {
            self.visual = animation.to;
            self.animation = None;
        } else {
            self.visual = animation.from.lerp(animation.to, t);
        }
    }

    /// Reports whether `point` lies inside the tile.
    #[must_use]
    pub fn is_clicked(&self, point: ScreenPoint) -> bool {
        self.rect.contains(point)
    }
}
