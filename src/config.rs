//! Tunable constants, loaded from an optional TOML file (spec.md §6).
//!
//! Grounded in the pack's plain `serde` + `toml` config loading
//! (`a-samea-vicseksim-rs`), which is a better fit here than
//! `emilyst-stardrift`'s full `config`-crate layering: this crate has a
//! single configuration source, not a windowed app's cascade of
//! defaults/file/env/CLI layers.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::octree::OctreeConfig;

/// Process-wide tunables. Held as fields on an explicit simulation handle
/// (`World`), not as globals — see spec.md §9's "global singleton world"
/// design note.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Gravitational constant.
    pub g: f64,
    /// Speed ceiling.
    pub c: f64,
    /// Body allocation capacity.
    pub capacity: usize,
    /// Multipole acceptance criterion threshold.
    pub theta: f64,
    /// Softening length in the force denominator.
    pub epsilon: f64,
    /// Halt subdivision when child width would fall below this.
    pub minimum_width: f64,
    /// Target wall-clock duration of one tick, in milliseconds.
    pub frame_interval_ms: f64,
    /// Camera Z velocity decay applied once per tick.
    pub camera_easing: f64,
    /// Ceiling on the smoothed FPS reading.
    pub fps_max: f64,
    /// Number of recent positions kept per body when trails are enabled.
    pub trail_length: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            g: 67.,
            c: 1e4,
            capacity: 1000,
            theta: 0.5,
            epsilon: 700.,
            minimum_width: 1.0,
            frame_interval_ms: 33.,
            camera_easing: 0.94,
            fps_max: 999.9,
            trail_length: 64,
        }
    }
}

impl SimConfig {
    pub fn octree_config(&self) -> OctreeConfig {
        OctreeConfig {
            theta: self.theta,
            epsilon: self.epsilon,
            minimum_width: self.minimum_width,
        }
    }

    /// Load from a TOML file, falling back to `Default` for any field the
    /// file doesn't set. Returns `Default` outright if `path` doesn't exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&text).map_err(ConfigError::Parse)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, text).map_err(ConfigError::Io)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[source] std::io::Error),
    #[error("could not parse config file: {0}")]
    Parse(#[source] toml::de::Error),
    #[error("could not serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),
}
