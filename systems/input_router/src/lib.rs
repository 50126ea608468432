#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input routing system that turns polled input events into world commands.

use std::time::Duration;

use reflected_path_core::{Command, GameState, InputEvent, PointerButton};

/// Result of routing one frame of input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteOutcome {
    /// Indicates whether the player asked to close the game during the frame.
    pub quit: bool,
}

/// System that translates adapter input into click and restart commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputRouter;

impl InputRouter {
    /// Creates a new input router.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Routes the frame's input events given the current session phase.
    ///
    /// Primary presses become [`Command::Click`] while the player is drawing.
    /// Any press in a terminal state, or while the session is stalled,
    /// becomes a single [`Command::Restart`] for the frame. A quit request
    /// is reported through the outcome and does not stop the remaining
    /// events from being routed.
    pub fn handle(
        &mut self,
        events: &[InputEvent],
        state: GameState,
        stalled: bool,
        now: Duration,
        out: &mut Vec<Command>,
    ) -> RouteOutcome {
        let awaiting_restart = stalled || state.is_terminal();
        let mut outcome = RouteOutcome::default();
        let mut restart_issued = false;

        for event in events {
            match *event {
                InputEvent::Quit => outcome.quit = true,
                InputEvent::PointerDown { .. } | InputEvent::KeyDown if awaiting_restart => {
                    if !restart_issued {
                        out.push(Command::Restart { now });
                        restart_issued = true;
                    }
                }
                InputEvent::PointerDown {
                    position,
                    button: PointerButton::Primary,
                } if state == GameState::PlayerDrawing => {
                    out.push(Command::Click { position, now });
                }
                InputEvent::PointerDown { .. } | InputEvent::KeyDown => {}
            }
        }

        outcome
    }
}
