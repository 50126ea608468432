//! Reference level set.

use std::time::Duration;

use reflected_path_core::{LevelOverrides, LevelSpec, PathCoord};

struct BuiltinLevel {
    name: &'static str,
    path: &'static [(i32, i32)],
    time_ms: Option<u64>,
    ink: Option<u32>,
    mistakes: Option<u32>,
}

const fn level(name: &'static str, path: &'static [(i32, i32)]) -> BuiltinLevel {
    BuiltinLevel {
        name,
        path,
        time_ms: None,
        ink: None,
        mistakes: None,
    }
}

impl BuiltinLevel {
    const fn time(mut self, millis: u64) -> Self {
        self.time_ms = Some(millis);
        self
    }

    const fn ink(mut self, ink: u32) -> Self {
        self.ink = Some(ink);
        self
    }

    const fn mistakes(mut self, mistakes: u32) -> Self {
        self.mistakes = Some(mistakes);
        self
    }

    fn to_spec(&self) -> LevelSpec {
        LevelSpec::new(self.path.iter().copied().map(PathCoord::from).collect())
            .named(self.name)
            .with_overrides(LevelOverrides {
                time_limit: self.time_ms.map(Duration::from_millis),
                ink_limit: self.ink,
                mistake_limit: self.mistakes,
            })
    }
}

const LEVELS: [BuiltinLevel; 25] = [
    level("Simple L", &[(2, 1), (3, 1), (4, 1), (4, 2), (4, 3)]),
    level("Diagonal", &[(1, 1), (2, 2), (3, 3), (4, 4)]),
    level(
        "U Shape",
        &[(6, 2), (5, 2), (4, 2), (4, 3), (4, 4), (5, 4), (6, 4)],
    ),
    level("Cross", &[(3, 2), (4, 2), (5, 2), (4, 1), (4, 3)]),
    level("Zig Zag", &[(1, 1), (1, 2), (2, 2), (2, 3), (3, 3), (3, 4)]),
    level(
        "Frame",
        &[
            (2, 1),
            (2, 2),
            (2, 3),
            (2, 4),
            (3, 4),
            (4, 4),
            (5, 4),
            (5, 3),
            (5, 2),
            (5, 1),
            (4, 1),
            (3, 1),
        ],
    )
    .ink(30)
    .mistakes(7),
    level(
        "Stairs",
        &[(7, 1), (6, 1), (6, 2), (5, 2), (5, 3), (4, 3), (4, 4)],
    ),
    level("T Shape", &[(2, 1), (2, 2), (2, 3), (3, 2), (4, 2)]),
    level(
        "S Shape",
        &[(1, 3), (1, 2), (2, 2), (3, 2), (3, 3), (4, 3), (4, 4)],
    )
    .time(20_000),
    level(
        "Winding Path",
        &[
            (3, 1),
            (4, 1),
            (5, 1),
            (5, 2),
            (5, 3),
            (4, 3),
            (3, 3),
            (3, 4),
            (3, 5),
            (4, 5),
        ],
    )
    .ink(25)
    .mistakes(5),
    level(
        "Small Spiral",
        &[
            (3, 3),
            (3, 4),
            (4, 4),
            (5, 4),
            (5, 3),
            (5, 2),
            (4, 2),
            (3, 2),
            (3, 1),
        ],
    ),
    level(
        "Arrow",
        &[(1, 1), (2, 2), (3, 3), (4, 4), (3, 4), (5, 4), (4, 5)],
    )
    .mistakes(4),
    level(
        "Interlocking L",
        &[
            (1, 1),
            (2, 1),
            (3, 1),
            (3, 2),
            (3, 3),
            (4, 3),
            (5, 3),
            (5, 4),
            (5, 5),
            (6, 5),
        ],
    )
    .time(35_000)
    .ink(30)
    .mistakes(6),
    level(
        "Thin Frame",
        &[
            (1, 1),
            (1, 2),
            (1, 3),
            (1, 4),
            (1, 5),
            (2, 5),
            (3, 5),
            (4, 5),
            (5, 5),
            (6, 5),
            (6, 4),
            (6, 3),
            (6, 2),
            (6, 1),
            (5, 1),
            (4, 1),
            (3, 1),
            (2, 1),
        ],
    )
    .ink(40)
    .mistakes(8),
    level(
        "Checkerboard",
        &[
            (2, 1),
            (2, 3),
            (2, 5),
            (4, 1),
            (4, 3),
            (4, 5),
            (6, 1),
            (6, 3),
            (6, 5),
        ],
    )
    .time(20_000)
    .mistakes(3),
    level(
        "Long Snake",
        &[
            (1, 6),
            (1, 5),
            (1, 4),
            (2, 4),
            (3, 4),
            (3, 3),
            (3, 2),
            (4, 2),
            (5, 2),
            (5, 1),
            (6, 1),
            (7, 1),
            (8, 1),
        ],
    )
    .ink(35)
    .mistakes(5),
    level(
        "Castle Top",
        &[
            (4, 1),
            (4, 2),
            (3, 2),
            (3, 3),
            (2, 3),
            (2, 4),
            (3, 4),
            (3, 5),
            (4, 5),
            (4, 6),
            (5, 6),
        ],
    )
    .time(30_000),
    level(
        "Almost Symmetric",
        &[
            (2, 2),
            (3, 1),
            (4, 2),
            (5, 1),
            (6, 2),
            (5, 3),
            (4, 4),
            (3, 3),
        ],
    )
    .mistakes(4),
    level(
        "Double U",
        &[
            (2, 1),
            (3, 1),
            (4, 1),
            (4, 2),
            (3, 2),
            (2, 2),
            (2, 4),
            (3, 4),
            (4, 4),
            (4, 5),
            (3, 5),
            (2, 5),
            (5, 1),
            (5, 5),
        ],
    )
    .ink(35)
    .mistakes(6),
    level(
        "Maze Start",
        &[
            (1, 1),
            (1, 2),
            (1, 3),
            (2, 3),
            (3, 3),
            (3, 2),
            (3, 1),
            (4, 1),
            (5, 1),
            (5, 2),
            (5, 3),
            (5, 4),
            (4, 4),
            (3, 4),
            (2, 4),
        ],
    )
    .time(40_000)
    .ink(40)
    .mistakes(7),
    level(
        "Column",
        &[
            (1, 3),
            (2, 3),
            (3, 3),
            (4, 3),
            (5, 3),
            (6, 3),
            (7, 3),
            (8, 3),
            (9, 3),
            (10, 3),
        ],
    )
    .time(15_000)
    .mistakes(4),
    level(
        "Scattered Dots",
        &[(1, 1), (3, 5), (5, 2), (7, 6), (9, 3), (11, 1)],
    )
    .mistakes(2),
    level(
        "H Shape",
        &[(2, 1), (3, 1), (4, 1), (5, 1), (6, 1), (4, 2), (4, 3)],
    ),
    level(
        "Plus Variations",
        &[
            (3, 3),
            (4, 3),
            (5, 3),
            (6, 3),
            (7, 3),
            (5, 1),
            (5, 2),
            (5, 4),
            (5, 5),
            (1, 3),
            (2, 3),
            (8, 3),
            (9, 3),
        ],
    )
    .ink(30)
    .mistakes(5),
    level(
        "Complex Weave",
        &[
            (1, 1),
            (2, 1),
            (2, 2),
            (1, 2),
            (1, 3),
            (1, 4),
            (2, 4),
            (3, 4),
            (3, 3),
            (3, 2),
            (4, 2),
            (5, 2),
            (5, 3),
            (5, 4),
            (5, 5),
            (4, 5),
            (3, 5),
            (2, 5),
        ],
    )
    .time(45_000)
    .ink(45)
    .mistakes(5),
];

pub(crate) fn levels() -> Vec<LevelSpec> {
    LEVELS.iter().map(BuiltinLevel::to_spec).collect()
}
