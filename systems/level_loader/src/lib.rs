#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level loading for Reflected Path.
//!
//! Provides the in-memory [`Catalog`] level source, the built-in level set,
//! TOML level files, and [`load`], which resolves a level's overrides against
//! the session defaults. Coordinates are not bounds-checked here; the world
//! validates them against its grid when the level is set up.

mod builtin;

use std::{fs, io, path::Path, path::PathBuf, time::Duration};

use reflected_path_core::{
    LevelOverrides, LevelPlan, LevelSource, LevelSpec, PathCoord, ResourceLimits, SetupError,
};
use serde::Deserialize;
use thiserror::Error;

/// Resolves the level at `index` into a plan with concrete resource limits.
///
/// # Errors
///
/// Returns [`SetupError::NoMoreLevels`] when `index` lies past the last level.
pub fn load<S>(source: &S, index: usize, defaults: ResourceLimits) -> Result<LevelPlan, SetupError>
where
    S: LevelSource + ?Sized,
{
    let spec = source
        .level(index)
        .ok_or(SetupError::NoMoreLevels { index })?;

    Ok(LevelPlan {
        index,
        name: spec.name.clone(),
        path: spec.path.clone(),
        limits: spec.overrides.resolve(defaults),
    })
}

/// Ordered, in-memory collection of levels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    levels: Vec<LevelSpec>,
}

impl Catalog {
    /// Creates a catalog from explicit level specifications.
    #[must_use]
    pub fn new(levels: Vec<LevelSpec>) -> Self {
        Self { levels }
    }

    /// The reference level set shipped with the game.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin::levels())
    }

    /// Parses a catalog from TOML level-file contents.
    ///
    /// # Errors
    ///
    /// Fails when the text is not a valid level file or declares no levels.
    pub fn from_toml_str(contents: &str) -> Result<Self, LevelFileError> {
        let file: LevelFile = toml::from_str(contents)?;
        if file.levels.is_empty() {
            return Err(LevelFileError::NoLevels);
        }

        Ok(Self::new(
            file.levels.into_iter().map(RawLevel::into_spec).collect(),
        ))
    }

    /// Reads and parses a TOML level file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or its contents are rejected by
    /// [`Catalog::from_toml_str`].
    pub fn from_path(path: &Path) -> Result<Self, LevelFileError> {
        let contents = fs::read_to_string(path).map_err(|source| LevelFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&contents)?;
        log::info!(
            "loaded {} levels from {}",
            catalog.levels.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Number of levels in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Reports whether the catalog holds no levels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterator over the levels in play order.
    pub fn iter(&self) -> impl Iterator<Item = &LevelSpec> {
        self.levels.iter()
    }
}

impl LevelSource for Catalog {
    fn level_count(&self) -> usize {
        self.levels.len()
    }

    fn level(&self, index: usize) -> Option<&LevelSpec> {
        self.levels.get(index)
    }
}

/// Errors raised while reading level files.
#[derive(Debug, Error)]
pub enum LevelFileError {
    /// The file could not be read.
    #[error("failed to read level file {path}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The contents are not a valid level file.
    #[error("malformed level file")]
    Parse(#[from] toml::de::Error),
    /// The file declares no `[[level]]` tables.
    #[error("level file declares no levels")]
    NoLevels,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LevelFile {
    #[serde(rename = "level", default)]
    levels: Vec<RawLevel>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLevel {
    name: Option<String>,
    path: Vec<PathCoord>,
    time_ms: Option<u64>,
    ink: Option<u32>,
    mistakes: Option<u32>,
}

impl RawLevel {
    fn into_spec(self) -> LevelSpec {
        let overrides = LevelOverrides {
            time_limit: self.time_ms.map(Duration::from_millis),
            ink_limit: self.ink,
            mistake_limit: self.mistakes,
        };
        let spec = LevelSpec::new(self.path).with_overrides(overrides);
        match self.name {
            Some(name) => spec.named(name),
            None => spec,
        }
    }
}
