use glam::Vec2;
use reflected_path_core::{InputEvent, PointerButton, ScreenPoint};
use reflected_path_rendering_macroquad::InputObservations;

fn replay(frames: &[InputObservations]) -> Vec<Vec<InputEvent>> {
    frames
        .iter()
        .cloned()
        .map(|observations| observations.into_frame_input().events)
        .collect()
}

#[test]
fn idle_frames_produce_no_events() {
    let events = InputObservations::default().into_frame_input().events;

    assert!(events.is_empty());
}

#[test]
fn quit_is_reported_before_other_input() {
    let observations = InputObservations {
        quit_requested: true,
        pointer_presses: vec![(PointerButton::Primary, Vec2::new(10.0, 20.0))],
        key_pressed: true,
    };

    assert_eq!(
        observations.into_frame_input().events,
        vec![
            InputEvent::Quit,
            InputEvent::PointerDown {
                position: ScreenPoint::new(10.0, 20.0),
                button: PointerButton::Primary,
            },
            InputEvent::KeyDown,
        ]
    );
}

#[test]
fn pointer_presses_keep_their_button_and_position() {
    let observations = InputObservations {
        pointer_presses: vec![
            (PointerButton::Secondary, Vec2::new(420.0, 90.0)),
            (PointerButton::Middle, Vec2::new(420.0, 90.0)),
        ],
        ..InputObservations::default()
    };

    assert_eq!(
        observations.into_frame_input().events,
        vec![
            InputEvent::PointerDown {
                position: ScreenPoint::new(420.0, 90.0),
                button: PointerButton::Secondary,
            },
            InputEvent::PointerDown {
                position: ScreenPoint::new(420.0, 90.0),
                button: PointerButton::Middle,
            },
        ]
    );
}

#[test]
fn observation_sequence_replays_deterministically() {
    let frames = vec![
        InputObservations::default(),
        InputObservations {
            pointer_presses: vec![(PointerButton::Primary, Vec2::new(500.0, 150.0))],
            ..InputObservations::default()
        },
        InputObservations {
            key_pressed: true,
            ..InputObservations::default()
        },
        InputObservations {
            quit_requested: true,
            ..InputObservations::default()
        },
    ];

    let first_run = replay(&frames);
    let second_run = replay(&frames);

    assert_eq!(first_run, second_run);
    assert_eq!(
        first_run.iter().map(Vec::len).collect::<Vec<_>>(),
        vec![0, 1, 1, 1]
    );
    assert_eq!(first_run[3], vec![InputEvent::Quit]);
}
