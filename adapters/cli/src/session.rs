//! Per-frame glue between the backend, the pure systems and the world.

use std::{fmt, time::Duration};

use anyhow::{bail, Result};
use reflected_path_core::{Command, Event, LevelSource, SessionConfig, SoundCue};
use reflected_path_rendering::{AudioSink, FrameControl, FrameInput, Scene};
use reflected_path_system_audio_cues::AudioCues;
use reflected_path_system_input_router::InputRouter;
use reflected_path_world::{self as world, query, World};

use crate::scene;

/// Running game session driven once per rendered frame.
pub(crate) struct Session {
    world: World,
    router: InputRouter,
    cues: AudioCues,
    sink: Box<dyn AudioSink>,
    /// Backend time of the first frame; session time counts from there.
    clock_origin: Option<Duration>,
    now: Duration,
    commands: Vec<Command>,
    events: Vec<Event>,
    sounds: Vec<SoundCue>,
}

impl Session {
    /// Sets up the level at `start_index`, failing when it cannot be played.
    pub(crate) fn start(
        config: SessionConfig,
        levels: Box<dyn LevelSource>,
        start_index: usize,
        sink: Box<dyn AudioSink>,
    ) -> Result<Self> {
        let mut session = Self {
            world: World::new(config, levels),
            router: InputRouter::new(),
            cues: AudioCues::new(),
            sink,
            clock_origin: None,
            now: Duration::ZERO,
            commands: Vec::new(),
            events: Vec::new(),
            sounds: Vec::new(),
        };

        world::apply(
            &mut session.world,
            Command::SetupLevel {
                index: start_index,
                now: Duration::ZERO,
            },
            &mut session.events,
        );
        let failure = session.events.iter().find_map(|event| match event {
            Event::LevelSetupFailed { error, .. } => Some(*error),
            _ => None,
        });
        if let Some(error) = failure {
            bail!("cannot start level {}: {error}", start_index + 1);
        }

        session.play_cues();
        Ok(session)
    }

    /// Routes the frame's input, advances the world and plays resulting cues.
    pub(crate) fn frame(&mut self, backend_now: Duration, input: &FrameInput) -> FrameControl {
        let origin = *self.clock_origin.get_or_insert(backend_now);
        let now = backend_now.saturating_sub(origin);
        self.now = now;

        self.commands.clear();
        self.events.clear();
        let outcome = self.router.handle(
            &input.events,
            query::state(&self.world),
            query::is_stalled(&self.world),
            now,
            &mut self.commands,
        );
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
        world::apply(&mut self.world, Command::Tick { now }, &mut self.events);
        self.play_cues();

        let halted = self
            .events
            .iter()
            .any(|event| matches!(event, Event::SessionHalted { .. }));
        if halted {
            log::error!("session halted; closing the window");
        }
        if outcome.quit {
            log::info!("quit requested");
        }

        if outcome.quit || halted {
            FrameControl::Exit
        } else {
            FrameControl::Continue
        }
    }

    /// Creates the scene shown before the first frame.
    pub(crate) fn scene(&self) -> Scene {
        scene::build(&self.world, self.now)
    }

    /// Copies the current world state into `scene`.
    pub(crate) fn populate(&self, scene: &mut Scene) {
        scene::populate(&self.world, self.now, scene);
    }

    fn play_cues(&mut self) {
        self.sounds.clear();
        self.cues.handle(&self.events, &mut self.sounds);
        for cue in self.sounds.drain(..) {
            self.sink.play(cue);
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("world", &self.world)
            .field("clock_origin", &self.clock_origin)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}
