#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that maps world events to fire-and-forget sound cues.

use reflected_path_core::{Event, SoundCue};

/// Sound cue system.
#[derive(Clone, Copy, Debug, Default)]
pub struct AudioCues;

impl AudioCues {
    /// Creates a new audio cue system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Appends the cues requested by `events`, in event order.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<SoundCue>) {
        for event in events {
            match event {
                Event::LevelStarted { .. } => out.push(SoundCue::PathShow),
                Event::TileMarked { correct, .. } => {
                    out.push(SoundCue::Click);
                    out.push(if *correct {
                        SoundCue::Correct
                    } else {
                        SoundCue::Incorrect
                    });
                }
                Event::LevelCompleted { .. } => out.push(SoundCue::LevelComplete),
                Event::GameOver { .. } => out.push(SoundCue::GameOver),
                Event::TimerWarning { .. } => out.push(SoundCue::TimerLow),
                Event::PathCoordinateRejected { .. }
                | Event::LevelSetupFailed { .. }
                | Event::TileRevealed { .. }
                | Event::PathHidden
                | Event::GameCompleted
                | Event::SessionRestarted
                | Event::SessionHalted { .. } => {}
            }
        }
    }
}
