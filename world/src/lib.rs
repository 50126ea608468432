#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Reflected Path.
//!
//! The world owns the grid, the level progression and the resource counters.
//! It only changes through [`apply`] and is read through [`query`].

mod grid;
mod tile;

use std::{collections::BTreeSet, fmt, time::Duration};

use reflected_path_core::{
    Command, Event, GameOverReason, GameState, GridCoord, LevelSource, ResourceLimits,
    ScreenPoint, SessionConfig, SetupError, TileState,
};
use reflected_path_system_level_loader as level_loader;
use reflected_path_system_reflection::Reflection;

pub use grid::Grid;
pub use tile::{ColorAnimation, Tile};

/// Represents the authoritative Reflected Path session state.
pub struct World {
    config: SessionConfig,
    levels: Box<dyn LevelSource>,
    reflection: Reflection,
    grid: Grid,
    state: GameState,
    stalled: bool,
    level_index: usize,
    limits: ResourceLimits,
    remaining_time: Duration,
    remaining_ink: u32,
    mistakes_made: u32,
    reflection_set: BTreeSet<GridCoord>,
    player_drawn: BTreeSet<GridCoord>,
    reveal_queue: Vec<GridCoord>,
    revealed: usize,
    last_reveal_at: Duration,
    level_started_at: Duration,
    transition_started_at: Duration,
    last_warning_at: Option<Duration>,
}

impl World {
    /// Creates a world over the provided level source.
    ///
    /// No level is loaded until a [`Command::SetupLevel`] is applied.
    #[must_use]
    pub fn new(config: SessionConfig, levels: Box<dyn LevelSource>) -> Self {
        let limits = config.defaults;
        Self {
            reflection: Reflection::for_layout(&config.layout),
            grid: Grid::new(config.layout, config.timing.tile_transition),
            levels,
            state: GameState::ShowingPath,
            stalled: false,
            level_index: 0,
            limits,
            remaining_time: limits.time_limit,
            remaining_ink: limits.ink_limit,
            mistakes_made: 0,
            reflection_set: BTreeSet::new(),
            player_drawn: BTreeSet::new(),
            reveal_queue: Vec::new(),
            revealed: 0,
            last_reveal_at: Duration::ZERO,
            level_started_at: Duration::ZERO,
            transition_started_at: Duration::ZERO,
            last_warning_at: None,
            config,
        }
    }

    fn setup_level(
        &mut self,
        index: usize,
        now: Duration,
        out_events: &mut Vec<Event>,
    ) -> Result<(), SetupError> {
        let plan = match level_loader::load(&*self.levels, index, self.config.defaults) {
            Ok(plan) => plan,
            Err(error) => {
                log::info!("no level at index {index}; all levels complete");
                self.state = GameState::GameComplete;
                out_events.push(Event::GameCompleted);
                out_events.push(Event::LevelSetupFailed { index, error });
                return Err(error);
            }
        };

        self.level_index = index;
        self.limits = plan.limits;
        self.remaining_time = plan.limits.time_limit;
        self.remaining_ink = plan.limits.ink_limit;
        self.mistakes_made = 0;
        self.player_drawn.clear();
        self.reflection_set.clear();
        self.reveal_queue.clear();
        self.revealed = 0;
        self.last_warning_at = None;
        self.stalled = false;
        self.grid.reset_all();

        let layout = *self.grid.layout();
        for coord in plan.path {
            match coord.to_grid().filter(|grid| layout.is_source_side(*grid)) {
                Some(valid) => {
                    self.reveal_queue.push(valid);
                    if let Some(reflected) = self.reflection.reflect(valid) {
                        let _ = self.reflection_set.insert(reflected);
                    }
                }
                None => {
                    log::warn!(
                        "level {index}: path coordinate ({}, {}) is outside the source side",
                        coord.row(),
                        coord.column()
                    );
                    out_events.push(Event::PathCoordinateRejected { index, coord });
                }
            }
        }

        if self.reveal_queue.is_empty() {
            let error = SetupError::EmptyPath { index };
            log::warn!("{error}");
            out_events.push(Event::LevelSetupFailed { index, error });
            return Err(error);
        }

        self.state = GameState::ShowingPath;
        self.last_reveal_at = now;
        log::info!(
            "level {} started{}",
            index + 1,
            plan.name
                .as_deref()
                .map(|name| format!(" ({name})"))
                .unwrap_or_default()
        );
        out_events.push(Event::LevelStarted {
            index,
            limits: plan.limits,
            path_tiles: self.reveal_queue.len(),
            required_tiles: self.reflection_set.len(),
        });
        Ok(())
    }

    fn step(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        match self.state {
            GameState::ShowingPath => self.advance_reveal(now, out_events),
            GameState::PlayerDrawing => self.advance_drawing(now, out_events),
            GameState::LevelTransition => self.advance_transition(now, out_events),
            GameState::GameOverTime
            | GameState::GameOverInk
            | GameState::GameOverMistakes
            | GameState::GameComplete => {}
        }
    }

    fn advance_reveal(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        if self.reveal_queue.is_empty() {
            return;
        }

        let delay = self.config.timing.reveal_delay;
        while let Some(&coord) = self.reveal_queue.get(self.revealed) {
            let due = self.last_reveal_at.saturating_add(delay);
            if now < due {
                return;
            }
            self.last_reveal_at = due;
            self.revealed += 1;
            if let Some(tile) = self.grid.tile_mut(coord) {
                tile.set_state(TileState::OriginalPath, now, true);
            }
            log::trace!("revealed ({}, {})", coord.row(), coord.column());
            out_events.push(Event::TileRevealed { coord });
        }

        if now.saturating_sub(self.last_reveal_at) < self.config.timing.path_show_duration {
            return;
        }

        for coord in &self.reveal_queue {
            if let Some(tile) = self.grid.tile_mut(*coord) {
                if tile.state() == TileState::OriginalPath {
                    tile.set_state(TileState::Empty, now, false);
                }
            }
        }
        self.state = GameState::PlayerDrawing;
        self.level_started_at = now;
        self.remaining_time = self.limits.time_limit;
        log::debug!("path hidden; drawing started");
        out_events.push(Event::PathHidden);
    }

    fn advance_drawing(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        let elapsed = now.saturating_sub(self.level_started_at);
        self.remaining_time = self.limits.time_limit.saturating_sub(elapsed);
        self.warn_if_low_on_time(now, out_events);

        if self.is_level_complete() {
            log::info!("level {} complete", self.level_index + 1);
            self.state = GameState::LevelTransition;
            self.transition_started_at = now;
            out_events.push(Event::LevelCompleted {
                index: self.level_index,
            });
        } else if self.remaining_time.is_zero() {
            self.game_over(GameOverReason::Time, now, out_events);
        } else if self.remaining_ink == 0 {
            self.game_over(GameOverReason::Ink, now, out_events);
        }
    }

    fn warn_if_low_on_time(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        let timing = self.config.timing;
        if self.remaining_time.is_zero() || self.remaining_time > timing.warning_threshold {
            return;
        }

        let due = self
            .last_warning_at
            .map_or(true, |at| now.saturating_sub(at) >= timing.warning_repeat);
        if due {
            self.last_warning_at = Some(now);
            out_events.push(Event::TimerWarning {
                remaining: self.remaining_time,
            });
        }
    }

    fn advance_transition(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        if self.stalled {
            return;
        }
        let elapsed = now.saturating_sub(self.transition_started_at);
        if elapsed < self.config.timing.transition_delay {
            return;
        }

        let next = self.level_index.saturating_add(1);
        if let Err(error) = self.setup_level(next, now, out_events) {
            self.transition_started_at = now;
            if let SetupError::EmptyPath { .. } = error {
                log::error!("{error}; waiting for a restart");
                self.stalled = true;
            }
        }
    }

    fn handle_click(&mut self, position: ScreenPoint, now: Duration, out_events: &mut Vec<Event>) {
        if self.state != GameState::PlayerDrawing {
            return;
        }
        if self.remaining_ink == 0 {
            log::debug!("click ignored: out of ink");
            return;
        }

        let Some(coord) = self.grid.hit_test(position) else {
            return;
        };
        if !self.grid.is_player_side(coord) {
            return;
        }
        let Some(tile) = self.grid.tile_mut(coord) else {
            return;
        };
        if tile.state() != TileState::Empty {
            return;
        }

        self.remaining_ink -= 1;
        let _ = self.player_drawn.insert(coord);
        let correct = self.reflection_set.contains(&coord);
        if correct {
            tile.set_state(TileState::Correct, now, false);
        } else {
            tile.set_state(TileState::Incorrect, now, false);
            self.mistakes_made = self.mistakes_made.saturating_add(1);
        }
        log::debug!(
            "marked ({}, {}): {}; ink left {}",
            coord.row(),
            coord.column(),
            if correct { "correct" } else { "incorrect" },
            self.remaining_ink
        );
        out_events.push(Event::TileMarked {
            coord,
            correct,
            remaining_ink: self.remaining_ink,
        });

        if self.mistakes_made > self.limits.mistake_limit {
            self.game_over(GameOverReason::Mistakes, now, out_events);
        }
    }

    fn restart(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        if !self.state.is_terminal() && !self.stalled {
            return;
        }

        log::info!("restarting from the first level");
        self.level_index = 0;
        out_events.push(Event::SessionRestarted);
        if let Err(error) = self.setup_level(0, now, out_events) {
            log::error!("restart failed: {error}");
            out_events.push(Event::SessionHalted { error });
        }
    }

    fn game_over(&mut self, reason: GameOverReason, now: Duration, out_events: &mut Vec<Event>) {
        log::info!("level {} lost: {reason:?}", self.level_index + 1);
        self.state = reason.state();
        self.transition_started_at = now;
        out_events.push(Event::GameOver { reason });
    }

    fn is_level_complete(&self) -> bool {
        !self.reflection_set.is_empty() && self.reflection_set.is_subset(&self.player_drawn)
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("state", &self.state)
            .field("stalled", &self.stalled)
            .field("level_index", &self.level_index)
            .field("level_count", &self.levels.level_count())
            .field("remaining_time", &self.remaining_time)
            .field("remaining_ink", &self.remaining_ink)
            .field("mistakes_made", &self.mistakes_made)
            .finish_non_exhaustive()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SetupLevel { index, now } => {
            let _ = world.setup_level(index, now, out_events);
        }
        Command::Click { position, now } => world.handle_click(position, now, out_events),
        Command::Tick { now } => {
            world.grid.update_animations(now);
            world.step(now, out_events);
        }
        Command::Restart { now } => world.restart(now, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::{collections::BTreeSet, time::Duration};

    use reflected_path_core::{GameState, GridCoord, GridLayout, ResourceLimits, Timing};

    use super::{Grid, Tile, World};

    /// Current phase of the session.
    #[must_use]
    pub fn state(world: &World) -> GameState {
        world.state
    }

    /// Reports whether a transition failed to load the next level.
    #[must_use]
    pub fn is_stalled(world: &World) -> bool {
        world.stalled
    }

    /// Zero-based index of the current level.
    #[must_use]
    pub fn level_index(world: &World) -> usize {
        world.level_index
    }

    /// Number of levels offered by the level source.
    #[must_use]
    pub fn level_count(world: &World) -> usize {
        world.levels.level_count()
    }

    /// Resource limits of the current level.
    #[must_use]
    pub fn limits(world: &World) -> ResourceLimits {
        world.limits
    }

    /// Countdown left in the current level.
    #[must_use]
    pub fn remaining_time(world: &World) -> Duration {
        world.remaining_time
    }

    /// Ink left in the current level.
    #[must_use]
    pub fn remaining_ink(world: &World) -> u32 {
        world.remaining_ink
    }

    /// Incorrect tiles marked in the current level.
    #[must_use]
    pub fn mistakes_made(world: &World) -> u32 {
        world.mistakes_made
    }

    /// Read-only access to the grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Tiles in row-major order.
    #[must_use]
    pub fn tiles(world: &World) -> &[Tile] {
        world.grid.tiles()
    }

    /// Player-side coordinates required to win the level.
    #[must_use]
    pub fn reflection_set(world: &World) -> &BTreeSet<GridCoord> {
        &world.reflection_set
    }

    /// Player-side coordinates marked during the level.
    #[must_use]
    pub fn player_drawn(world: &World) -> &BTreeSet<GridCoord> {
        &world.player_drawn
    }

    /// Reports whether every required tile has been marked.
    #[must_use]
    pub fn is_level_complete(world: &World) -> bool {
        world.is_level_complete()
    }

    /// Number of path tiles revealed so far in the current level.
    #[must_use]
    pub fn revealed_tiles(world: &World) -> usize {
        world.revealed
    }

    /// Time spent in the current transition or end-of-level message.
    ///
    /// `None` while a level is being shown or played.
    #[must_use]
    pub fn message_elapsed(world: &World, now: Duration) -> Option<Duration> {
        match world.state {
            GameState::ShowingPath | GameState::PlayerDrawing => None,
            _ => Some(now.saturating_sub(world.transition_started_at)),
        }
    }

    /// Grid geometry of the session.
    #[must_use]
    pub fn layout(world: &World) -> &GridLayout {
        world.grid.layout()
    }

    /// Pacing constants of the session.
    #[must_use]
    pub fn timing(world: &World) -> Timing {
        world.config.timing
    }
}
