#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Reflected Path experience.

mod audio;
mod scene;
mod session;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use glam::Vec2;
use reflected_path_core::{SessionConfig, SCREEN_HEIGHT, SCREEN_WIDTH, WINDOW_TITLE};
use reflected_path_rendering::{AudioSink, Palette, Presentation, RenderingBackend};
use reflected_path_rendering_macroquad::MacroquadBackend;
use reflected_path_system_level_loader::Catalog;

use crate::{
    audio::{LogSink, SilentSink},
    session::Session,
};

/// Memorise a path on the left half of the grid, then redraw its mirror image.
#[derive(Debug, Parser)]
#[command(name = "reflected-path", version)]
struct Args {
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// TOML file with the levels to play instead of the built-in set.
    #[arg(long, value_name = "FILE")]
    levels: Option<PathBuf>,

    /// First level to play, counting from 1.
    #[arg(
        long,
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    start_level: u32,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long, overrides_with = "no_vsync")]
    vsync: bool,

    /// Render frames as fast as possible.
    #[arg(long = "no-vsync", overrides_with = "vsync")]
    no_vsync: bool,

    /// Log frame timing once per second.
    #[arg(long)]
    show_fps: bool,

    /// Drop every sound cue.
    #[arg(long)]
    mute: bool,
}

impl Args {
    fn vsync_preference(&self) -> Option<bool> {
        match (self.vsync, self.no_vsync) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    fn start_index(&self) -> usize {
        self.start_level.saturating_sub(1) as usize
    }
}

/// Entry point for the Reflected Path command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let catalog = load_catalog(args.levels.as_deref())?;
    let start_index = args.start_index();
    if start_index >= catalog.len() {
        bail!(
            "level {} does not exist; {} levels are available",
            args.start_level,
            catalog.len()
        );
    }

    let sink: Box<dyn AudioSink> = if args.mute {
        Box::new(SilentSink)
    } else {
        Box::new(LogSink)
    };
    let mut session = Session::start(
        SessionConfig::default(),
        Box::new(catalog),
        start_index,
        sink,
    )?;

    let presentation = Presentation::new(
        WINDOW_TITLE,
        Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        Palette::default(),
        session.scene(),
    );

    let mut backend = MacroquadBackend::new().with_show_fps(args.show_fps);
    if let Some(enabled) = args.vsync_preference() {
        backend = backend.with_vsync(enabled);
    }

    backend.run(presentation, move |now, input, scene| {
        let control = session.frame(now, &input);
        session.populate(scene);
        control
    })
}

fn init_logging(verbose: &Verbosity<WarnLevel>) {
    let default_filter = verbose.log_level_filter().to_string();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            let catalog = Catalog::from_path(path)
                .with_context(|| format!("failed to load levels from {}", path.display()))?;
            log::info!("loaded {} levels from {}", catalog.len(), path.display());
            Ok(catalog)
        }
        None => Ok(Catalog::builtin()),
    }
}
