//! Text layers drawn over the grid: the status line and the message overlay.
//!
//! Layout is computed from plain text metrics so it can be checked without a
//! window; only the `draw_*` functions touch macroquad.

use glam::Vec2;
use macroquad::{
    shapes::draw_rectangle,
    text::{draw_text, measure_text},
};
use reflected_path_rendering::{Color, HudPresentation, MessagePresentation, Palette};

use crate::to_macroquad_color;

/// Font size used for every text layer.
pub(crate) const FONT_SIZE: u16 = 26;

const MESSAGE_PADDING: Vec2 = Vec2::new(20.0, 10.0);
const PROMPT_GAP: f32 = 30.0;

/// Size of a rendered line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TextMetrics {
    pub(crate) width: f32,
    pub(crate) height: f32,
    /// Distance from the top of the line to its baseline.
    pub(crate) ascent: f32,
}

impl TextMetrics {
    fn measure(text: &str) -> Self {
        let dimensions = measure_text(text, None, FONT_SIZE, 1.0);
        Self {
            width: dimensions.width,
            height: dimensions.height,
            ascent: dimensions.offset_y,
        }
    }
}

/// Screen placement of the message overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct MessageLayout {
    pub(crate) backdrop_origin: Vec2,
    pub(crate) backdrop_size: Vec2,
    pub(crate) headline_baseline: Vec2,
    pub(crate) prompt_baseline: Option<Vec2>,
}

/// Centers the headline on screen and hangs the prompt below it.
pub(crate) fn message_layout(
    screen: Vec2,
    headline: TextMetrics,
    prompt: Option<TextMetrics>,
) -> MessageLayout {
    let center = screen * 0.5;
    let headline_size = Vec2::new(headline.width, headline.height);
    let headline_origin = center - headline_size * 0.5;

    let prompt_baseline = prompt.map(|prompt| {
        let prompt_center_y = headline_origin.y + headline.height + PROMPT_GAP;
        Vec2::new(
            center.x - prompt.width * 0.5,
            prompt_center_y - prompt.height * 0.5 + prompt.ascent,
        )
    });

    MessageLayout {
        backdrop_origin: headline_origin - MESSAGE_PADDING,
        backdrop_size: headline_size + MESSAGE_PADDING * 2.0,
        headline_baseline: Vec2::new(headline_origin.x, headline_origin.y + headline.ascent),
        prompt_baseline,
    }
}

/// Baselines of the status line entries, left to right.
pub(crate) fn hud_baselines(hud: &HudPresentation, ascent: f32) -> [Vec2; 4] {
    let baseline = hud.origin + Vec2::new(0.0, ascent);
    [0.0, 1.0, 2.0, 3.0].map(|slot| baseline + Vec2::new(hud.spacing * slot, 0.0))
}

pub(crate) fn draw_hud(hud: &HudPresentation, palette: &Palette) {
    let ascent = TextMetrics::measure("Time").ascent;
    for (entry, baseline) in hud.entries().into_iter().zip(hud_baselines(hud, ascent)) {
        draw_line_of_text(entry, baseline, palette.ui_text);
    }
}

pub(crate) fn draw_message(message: &MessagePresentation, screen: Vec2, palette: &Palette) {
    let headline = TextMetrics::measure(&message.headline);
    let prompt = message.prompt.as_deref().map(TextMetrics::measure);
    let layout = message_layout(screen, headline, prompt);

    draw_rectangle(
        layout.backdrop_origin.x,
        layout.backdrop_origin.y,
        layout.backdrop_size.x,
        layout.backdrop_size.y,
        to_macroquad_color(palette.message_backdrop),
    );
    draw_line_of_text(
        &message.headline,
        layout.headline_baseline,
        palette.message_text,
    );

    if let (Some(text), Some(baseline)) = (message.prompt.as_deref(), layout.prompt_baseline) {
        draw_line_of_text(text, baseline, palette.ui_text);
    }
}

fn draw_line_of_text(text: &str, baseline: Vec2, color: Color) {
    draw_text(
        text,
        baseline.x,
        baseline.y,
        f32::from(FONT_SIZE),
        to_macroquad_color(color),
    );
}
