//! Sound sinks selectable from the command line.

use reflected_path_core::SoundCue;
use reflected_path_rendering::AudioSink;

/// Sink that reports cues through the log instead of a sound device.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("sound cue: {}", cue.name());
    }
}

/// Sink selected by `--mute`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct SilentSink;

impl AudioSink for SilentSink {
    fn play(&mut self, _cue: SoundCue) {}
}
