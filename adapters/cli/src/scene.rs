//! Scene population from world queries.

use std::time::Duration;

use glam::Vec2;
use reflected_path_core::GameState;
use reflected_path_rendering::{
    Color, HudPresentation, MessagePresentation, Scene, SymmetryLinePresentation,
    TilePresentation,
};
use reflected_path_world::{query, World};

const HUD_TOP: f32 = 20.0;
const HUD_SPACING: f32 = 160.0;
/// The level-complete banner disappears this long before the next level loads.
const BANNER_LEAD: Duration = Duration::from_millis(300);
const RESTART_PROMPT: &str = "Click or press any key to restart";

/// Builds a fresh scene for the current world state.
pub(crate) fn build(world: &World, now: Duration) -> Scene {
    let mut scene = Scene::new(
        Vec::with_capacity(query::tiles(world).len()),
        symmetry_line(world),
        hud(world),
        None,
    );
    populate(world, now, &mut scene);
    scene
}

/// Refreshes `scene` in place, reusing its tile buffer.
pub(crate) fn populate(world: &World, now: Duration, scene: &mut Scene) {
    scene.tiles.clear();
    scene.tiles.extend(
        query::tiles(world)
            .iter()
            .map(|tile| TilePresentation::from_rect(tile.rect(), Color::from(tile.visual_color()))),
    );
    scene.symmetry_line = symmetry_line(world);
    scene.hud = hud(world);
    scene.message = message(world, now);
}

fn symmetry_line(world: &World) -> SymmetryLinePresentation {
    let layout = query::layout(world);
    let top = layout.origin().y();
    SymmetryLinePresentation {
        x: layout.symmetry_line_x(),
        top,
        bottom: top + layout.height(),
        thickness: SymmetryLinePresentation::DEFAULT_THICKNESS,
    }
}

fn hud(world: &World) -> HudPresentation {
    let limits = query::limits(world);
    HudPresentation {
        origin: Vec2::new(query::layout(world).origin().x(), HUD_TOP),
        spacing: HUD_SPACING,
        time: format!("Time: {:.1}s", query::remaining_time(world).as_secs_f32()),
        ink: format!("Ink: {}", query::remaining_ink(world)),
        mistakes: format!(
            "Mistakes: {}/{}",
            query::mistakes_made(world),
            limits.mistake_limit
        ),
        level: format!(
            "Level {}/{}",
            query::level_index(world) + 1,
            query::level_count(world)
        ),
    }
}

fn message(world: &World, now: Duration) -> Option<MessagePresentation> {
    let level = query::level_index(world) + 1;
    if query::is_stalled(world) {
        return Some(
            MessagePresentation::headline(format!("LEVEL {level} COULD NOT BE LOADED"))
                .with_prompt(RESTART_PROMPT),
        );
    }

    let elapsed = query::message_elapsed(world, now)?;
    let game_over = |headline: &str| {
        Some(MessagePresentation::headline(headline).with_prompt(RESTART_PROMPT))
    };
    match query::state(world) {
        GameState::ShowingPath | GameState::PlayerDrawing => None,
        GameState::LevelTransition => {
            let visible_for = query::timing(world)
                .transition_delay
                .saturating_sub(BANNER_LEAD);
            (elapsed < visible_for)
                .then(|| MessagePresentation::headline(format!("LEVEL {level} COMPLETE!")))
        }
        GameState::GameOverTime => game_over("TIME'S UP!"),
        GameState::GameOverInk => game_over("OUT OF INK!"),
        GameState::GameOverMistakes => game_over("TOO MANY MISTAKES!"),
        GameState::GameComplete => game_over("CONGRATULATIONS! ALL LEVELS COMPLETE!"),
    }
}
