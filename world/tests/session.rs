use std::time::Duration;

use reflected_path_core::{
    Command, Event, GameOverReason, GameState, GridCoord, LevelOverrides, LevelSpec, PathCoord,
    ScreenPoint, SessionConfig, SetupError, TileState,
};
use reflected_path_system_level_loader::Catalog;
use reflected_path_world::{self as world, query, World};

const REVEAL: Duration = Duration::from_millis(75);
const SHOW: Duration = Duration::from_millis(1_800);
const TRANSITION: Duration = Duration::from_millis(1_500);

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn path(coords: &[(i32, i32)]) -> Vec<PathCoord> {
    coords.iter().copied().map(PathCoord::from).collect()
}

fn level(coords: &[(i32, i32)]) -> LevelSpec {
    LevelSpec::new(path(coords))
}

fn world_with(levels: Vec<LevelSpec>) -> World {
    World::new(SessionConfig::default(), Box::new(Catalog::new(levels)))
}

fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

fn tile_center(coord: GridCoord) -> ScreenPoint {
    ScreenPoint::new(
        80.0 + coord.column() as f32 * 40.0 + 20.0,
        70.0 + coord.row() as f32 * 40.0 + 20.0,
    )
}

fn click(world: &mut World, coord: GridCoord, now: Duration) -> Vec<Event> {
    run(
        world,
        Command::Click {
            position: tile_center(coord),
            now,
        },
    )
}

/// Sets up `index` at time zero and ticks once past the reveal and show phases.
fn start_drawing(world: &mut World, index: usize) -> Duration {
    let _ = run(world, Command::SetupLevel { index, now: ms(0) });
    let now = ms(10_000);
    let _ = run(world, Command::Tick { now });
    assert_eq!(query::state(world), GameState::PlayerDrawing);
    now
}

fn state_of(world: &World, coord: GridCoord) -> TileState {
    query::grid(world)
        .tile(coord)
        .map(|tile| tile.state())
        .expect("coordinate inside the grid")
}

#[test]
fn scenario_far_tile_reflects_across_the_line() {
    let mut world = world_with(vec![level(&[(2, 1)])]);
    let _ = run(&mut world, Command::SetupLevel { index: 0, now: ms(0) });

    assert_eq!(
        query::reflection_set(&world).iter().copied().collect::<Vec<_>>(),
        vec![GridCoord::new(2, 14)]
    );
}

#[test]
fn scenario_tile_next_to_the_line_reflects_to_first_player_column() {
    let mut world = world_with(vec![level(&[(0, 7)])]);
    let _ = run(&mut world, Command::SetupLevel { index: 0, now: ms(0) });

    assert_eq!(
        query::reflection_set(&world).iter().copied().collect::<Vec<_>>(),
        vec![GridCoord::new(0, 8)]
    );
}

#[test]
fn setup_clears_the_board_and_rejects_invalid_coordinates() {
    let mut world = world_with(vec![
        level(&[(2, 1), (3, 1), (2, 1)]),
        level(&[(2, 1), (2, 8), (-1, 3), (12, 0), (4, 4)]),
    ]);

    let start = start_drawing(&mut world, 0);
    let _ = click(&mut world, GridCoord::new(2, 14), start);
    let _ = click(&mut world, GridCoord::new(5, 10), start);

    let events = run(&mut world, Command::SetupLevel { index: 1, now: start });

    let rejected: Vec<PathCoord> = events
        .iter()
        .filter_map(|event| match event {
            Event::PathCoordinateRejected { index: 1, coord } => Some(*coord),
            _ => None,
        })
        .collect();
    assert_eq!(rejected, path(&[(2, 8), (-1, 3), (12, 0)]));
    assert!(events.contains(&Event::LevelStarted {
        index: 1,
        limits: query::limits(&world),
        path_tiles: 2,
        required_tiles: 2,
    }));

    assert!(query::player_drawn(&world).is_empty());
    assert!(query::tiles(&world)
        .iter()
        .all(|tile| tile.state() == TileState::Empty));
    assert_eq!(query::state(&world), GameState::ShowingPath);
    assert_eq!(query::level_index(&world), 1);
    assert_eq!(query::remaining_ink(&world), 25);
    assert_eq!(query::mistakes_made(&world), 0);
}

#[test]
fn duplicate_path_tiles_share_one_reflection() {
    let mut world = world_with(vec![level(&[(2, 1), (3, 1), (2, 1)])]);
    let events = run(&mut world, Command::SetupLevel { index: 0, now: ms(0) });

    assert!(events.contains(&Event::LevelStarted {
        index: 0,
        limits: query::limits(&world),
        path_tiles: 3,
        required_tiles: 2,
    }));
    assert!(query::reflection_set(&world).len() <= 3);
}

#[test]
fn reveal_paces_tiles_then_hides_the_path() {
    let mut world = world_with(vec![level(&[(2, 1), (3, 1), (4, 1)])]);
    let _ = run(&mut world, Command::SetupLevel { index: 0, now: ms(0) });

    assert!(run(&mut world, Command::Tick { now: ms(74) }).is_empty());
    assert_eq!(
        run(&mut world, Command::Tick { now: REVEAL }),
        vec![Event::TileRevealed {
            coord: GridCoord::new(2, 1)
        }]
    );

    let late = run(&mut world, Command::Tick { now: ms(400) });
    assert_eq!(
        late,
        vec![
            Event::TileRevealed {
                coord: GridCoord::new(3, 1)
            },
            Event::TileRevealed {
                coord: GridCoord::new(4, 1)
            },
        ],
        "a slow frame reveals every overdue tile",
    );
    assert_eq!(query::revealed_tiles(&world), 3);
    for row in 2..=4 {
        let tile = query::grid(&world)
            .tile(GridCoord::new(row, 1))
            .expect("tile exists");
        assert_eq!(tile.state(), TileState::OriginalPath);
        assert!(tile.animation().is_none(), "reveals are not animated");
    }

    let last_reveal = REVEAL * 3;
    assert!(run(&mut world, Command::Tick { now: last_reveal + SHOW - ms(1) }).is_empty());
    assert_eq!(query::state(&world), GameState::ShowingPath);

    let hidden_at = last_reveal + SHOW;
    assert_eq!(
        run(&mut world, Command::Tick { now: hidden_at }),
        vec![Event::PathHidden]
    );
    assert_eq!(query::state(&world), GameState::PlayerDrawing);
    assert_eq!(state_of(&world, GridCoord::new(3, 1)), TileState::Empty);
    assert!(query::grid(&world)
        .tile(GridCoord::new(3, 1))
        .and_then(|tile| tile.animation())
        .is_some());

    let _ = run(&mut world, Command::Tick { now: hidden_at + ms(250) });
    let tile = query::grid(&world)
        .tile(GridCoord::new(3, 1))
        .expect("tile exists");
    assert_eq!(tile.visual_color(), TileState::Empty.color());
}

#[test]
fn scenario_ink_exhaustion_ignores_further_clicks() {
    let mut world = world_with(vec![level(&[(2, 1)]).with_overrides(LevelOverrides {
        ink_limit: Some(1),
        ..LevelOverrides::default()
    })]);
    let now = start_drawing(&mut world, 0);

    let first = click(&mut world, GridCoord::new(3, 9), now);
    assert_eq!(
        first,
        vec![Event::TileMarked {
            coord: GridCoord::new(3, 9),
            correct: false,
            remaining_ink: 0,
        }]
    );
    assert_eq!(state_of(&world, GridCoord::new(3, 9)), TileState::Incorrect);
    assert_eq!(query::mistakes_made(&world), 1);

    let second = click(&mut world, GridCoord::new(4, 9), now);
    assert!(second.is_empty());
    assert_eq!(state_of(&world, GridCoord::new(4, 9)), TileState::Empty);
    assert_eq!(query::mistakes_made(&world), 1);
    assert_eq!(query::remaining_ink(&world), 0);
    assert_eq!(query::player_drawn(&world).len(), 1);

    let events = run(&mut world, Command::Tick { now: now + ms(16) });
    assert_eq!(
        events,
        vec![Event::GameOver {
            reason: GameOverReason::Ink
        }]
    );
    assert_eq!(query::state(&world), GameState::GameOverInk);
}

#[test]
fn scenario_zero_mistake_tolerance_ends_inside_the_click() {
    let mut world = world_with(vec![level(&[(2, 1)]).with_overrides(LevelOverrides {
        mistake_limit: Some(0),
        ..LevelOverrides::default()
    })]);
    let now = start_drawing(&mut world, 0);

    let events = click(&mut world, GridCoord::new(5, 12), now);

    assert_eq!(
        events,
        vec![
            Event::TileMarked {
                coord: GridCoord::new(5, 12),
                correct: false,
                remaining_ink: 24,
            },
            Event::GameOver {
                reason: GameOverReason::Mistakes
            },
        ]
    );
    assert_eq!(query::mistakes_made(&world), 1);
    assert_eq!(query::state(&world), GameState::GameOverMistakes);
}

#[test]
fn scenario_winning_click_that_spends_the_last_ink_still_wins() {
    let mut world = world_with(vec![
        level(&[(2, 1)]).with_overrides(LevelOverrides {
            ink_limit: Some(1),
            ..LevelOverrides::default()
        }),
        level(&[(0, 0)]),
    ]);
    let now = start_drawing(&mut world, 0);

    let marked = click(&mut world, GridCoord::new(2, 14), now);
    assert_eq!(
        marked,
        vec![Event::TileMarked {
            coord: GridCoord::new(2, 14),
            correct: true,
            remaining_ink: 0,
        }]
    );
    assert!(query::is_level_complete(&world));

    let events = run(&mut world, Command::Tick { now: now + ms(16) });
    assert_eq!(events, vec![Event::LevelCompleted { index: 0 }]);
    assert_eq!(query::state(&world), GameState::LevelTransition);
}

#[test]
fn clicks_on_marked_source_or_outside_tiles_do_nothing() {
    let mut world = world_with(vec![level(&[(2, 1), (3, 1)])]);
    let now = start_drawing(&mut world, 0);

    let _ = click(&mut world, GridCoord::new(2, 14), now);
    let ink = query::remaining_ink(&world);

    assert!(click(&mut world, GridCoord::new(2, 14), now).is_empty());
    assert!(click(&mut world, GridCoord::new(2, 1), now).is_empty());
    assert!(run(
        &mut world,
        Command::Click {
            position: ScreenPoint::new(5.0, 5.0),
            now,
        }
    )
    .is_empty());
    assert!(run(
        &mut world,
        Command::Click {
            position: ScreenPoint::new(f32::NAN, 200.0),
            now,
        }
    )
    .is_empty());

    assert_eq!(query::remaining_ink(&world), ink);
    assert_eq!(state_of(&world, GridCoord::new(2, 1)), TileState::Empty);
    assert_eq!(query::player_drawn(&world).len(), 1);
}

#[test]
fn clicks_are_ignored_while_the_path_is_shown() {
    let mut world = world_with(vec![level(&[(2, 1)])]);
    let _ = run(&mut world, Command::SetupLevel { index: 0, now: ms(0) });

    assert!(click(&mut world, GridCoord::new(2, 14), ms(10)).is_empty());
    assert!(query::player_drawn(&world).is_empty());
}

#[test]
fn countdown_warns_then_ends_the_level() {
    let mut world = world_with(vec![level(&[(2, 1)])]);
    let start = start_drawing(&mut world, 0);

    assert!(run(&mut world, Command::Tick { now: start + ms(14_999) }).is_empty());

    let warned = run(&mut world, Command::Tick { now: start + ms(15_001) });
    assert_eq!(
        warned,
        vec![Event::TimerWarning {
            remaining: ms(9_999)
        }]
    );
    assert!(run(&mut world, Command::Tick { now: start + ms(15_500) }).is_empty());
    assert_eq!(
        run(&mut world, Command::Tick { now: start + ms(16_001) }),
        vec![Event::TimerWarning {
            remaining: ms(8_999)
        }]
    );

    let events = run(&mut world, Command::Tick { now: start + ms(25_000) });
    assert_eq!(
        events,
        vec![Event::GameOver {
            reason: GameOverReason::Time
        }]
    );
    assert_eq!(query::state(&world), GameState::GameOverTime);
    assert_eq!(query::remaining_time(&world), Duration::ZERO);
}

#[test]
fn win_is_checked_before_the_countdown() {
    let mut world = world_with(vec![level(&[(2, 1)]), level(&[(0, 0)])]);
    let start = start_drawing(&mut world, 0);
    let _ = click(&mut world, GridCoord::new(2, 14), start + ms(24_000));

    let events = run(&mut world, Command::Tick { now: start + ms(30_000) });

    assert_eq!(events, vec![Event::LevelCompleted { index: 0 }]);
    assert_eq!(query::state(&world), GameState::LevelTransition);
}

#[test]
fn transition_loads_the_next_level_after_its_delay() {
    let mut world = world_with(vec![level(&[(2, 1)]), level(&[(5, 5), (6, 5)])]);
    let start = start_drawing(&mut world, 0);
    let _ = click(&mut world, GridCoord::new(2, 14), start);
    let won_at = start + ms(16);
    let _ = run(&mut world, Command::Tick { now: won_at });

    assert!(run(&mut world, Command::Tick { now: won_at + TRANSITION - ms(1) }).is_empty());
    assert_eq!(
        query::message_elapsed(&world, won_at + ms(500)),
        Some(ms(500))
    );

    let events = run(&mut world, Command::Tick { now: won_at + TRANSITION });
    assert!(matches!(
        events.as_slice(),
        [Event::LevelStarted {
            index: 1,
            path_tiles: 2,
            required_tiles: 2,
            ..
        }]
    ));
    assert_eq!(query::level_index(&world), 1);
    assert_eq!(query::state(&world), GameState::ShowingPath);
    assert_eq!(query::message_elapsed(&world, won_at + TRANSITION), None);
}

#[test]
fn finishing_the_last_level_completes_the_game() {
    let mut world = world_with(vec![level(&[(2, 1)])]);
    let start = start_drawing(&mut world, 0);
    let _ = click(&mut world, GridCoord::new(2, 14), start);
    let won_at = start + ms(16);
    let _ = run(&mut world, Command::Tick { now: won_at });

    let events = run(&mut world, Command::Tick { now: won_at + TRANSITION });

    assert_eq!(
        events,
        vec![
            Event::GameCompleted,
            Event::LevelSetupFailed {
                index: 1,
                error: SetupError::NoMoreLevels { index: 1 },
            },
        ]
    );
    assert_eq!(query::state(&world), GameState::GameComplete);
    assert_eq!(query::level_index(&world), 0);
}

#[test]
fn broken_next_level_stalls_until_restart() {
    let mut world = world_with(vec![level(&[(2, 1)]), level(&[(2, 9), (-3, 0)])]);
    let start = start_drawing(&mut world, 0);
    let _ = click(&mut world, GridCoord::new(2, 14), start);
    let won_at = start + ms(16);
    let _ = run(&mut world, Command::Tick { now: won_at });

    let events = run(&mut world, Command::Tick { now: won_at + TRANSITION });
    assert_eq!(
        events.last(),
        Some(&Event::LevelSetupFailed {
            index: 1,
            error: SetupError::EmptyPath { index: 1 },
        })
    );
    assert_eq!(query::state(&world), GameState::LevelTransition);
    assert!(query::is_stalled(&world));

    let later = won_at + TRANSITION * 3;
    assert!(run(&mut world, Command::Tick { now: later }).is_empty());
    assert!(query::is_stalled(&world));

    let restarted = run(&mut world, Command::Restart { now: later });
    assert_eq!(restarted.first(), Some(&Event::SessionRestarted));
    assert!(matches!(
        restarted.last(),
        Some(Event::LevelStarted { index: 0, .. })
    ));
    assert!(!query::is_stalled(&world));
    assert_eq!(query::state(&world), GameState::ShowingPath);
    assert_eq!(query::level_index(&world), 0);
}

#[test]
fn restart_is_ignored_during_play() {
    let mut world = world_with(vec![level(&[(2, 1)])]);
    let now = start_drawing(&mut world, 0);
    let _ = click(&mut world, GridCoord::new(3, 9), now);

    assert!(run(&mut world, Command::Restart { now }).is_empty());
    assert_eq!(query::state(&world), GameState::PlayerDrawing);
    assert_eq!(query::mistakes_made(&world), 1);
}

#[test]
fn restart_after_game_over_returns_to_the_first_level() {
    let mut world = world_with(vec![level(&[(2, 1)]), level(&[(3, 3)])]);
    let start = start_drawing(&mut world, 1);
    let _ = run(&mut world, Command::Tick { now: start + ms(25_000) });
    assert_eq!(query::state(&world), GameState::GameOverTime);

    let events = run(&mut world, Command::Restart { now: start + ms(26_000) });

    assert_eq!(events.first(), Some(&Event::SessionRestarted));
    assert_eq!(query::level_index(&world), 0);
    assert_eq!(query::state(&world), GameState::ShowingPath);
    assert_eq!(query::remaining_time(&world), ms(25_000));
}

#[test]
fn restart_into_a_broken_first_level_halts_the_session() {
    let mut world = world_with(vec![level(&[(0, 8)])]);
    let _ = run(&mut world, Command::SetupLevel { index: 4, now: ms(0) });
    assert_eq!(query::state(&world), GameState::GameComplete);

    let events = run(&mut world, Command::Restart { now: ms(100) });

    assert_eq!(
        events,
        vec![
            Event::SessionRestarted,
            Event::PathCoordinateRejected {
                index: 0,
                coord: PathCoord::new(0, 8),
            },
            Event::LevelSetupFailed {
                index: 0,
                error: SetupError::EmptyPath { index: 0 },
            },
            Event::SessionHalted {
                error: SetupError::EmptyPath { index: 0 },
            },
        ]
    );
}

#[test]
fn builtin_first_level_plays_through() {
    let mut world = World::new(SessionConfig::default(), Box::new(Catalog::builtin()));
    let now = start_drawing(&mut world, 0);
    let required: Vec<GridCoord> = query::reflection_set(&world).iter().copied().collect();
    assert_eq!(required.len(), 5);
    assert_eq!(query::level_count(&world), 25);

    for coord in &required {
        let _ = click(&mut world, *coord, now);
    }
    let events = run(&mut world, Command::Tick { now: now + ms(16) });

    assert_eq!(events, vec![Event::LevelCompleted { index: 0 }]);
    assert_eq!(query::remaining_ink(&world), 20);
    assert_eq!(query::mistakes_made(&world), 0);
}
