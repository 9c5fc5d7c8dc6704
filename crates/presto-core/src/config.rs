use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PrestoResult;
use crate::transition::{blind_count_for_density, TransitionSpec, DEFAULT_BLIND_COUNT};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    /// Animator tick period in milliseconds.
    pub tick_ms: u32,
    /// Whether slides paint their background layer before their components.
    pub render_background: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            tick_ms: 20,
            render_background: true,
        }
    }
}

impl DisplayConfig {
    pub fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_ms.max(1) as u64)
    }
}

/// Transition settings as opaque identifiers; see [`TransitionConfig::resolve`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub kind: String,
    pub direction: String,
    /// Signed so that negative values in hand-edited files clamp instead of failing to parse.
    pub duration_ms: i64,
    pub easing: String,
    pub blind_count: u32,
    /// Strips per pixel of height; overrides `blind_count` when set.
    pub blind_density: Option<f64>,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            kind: "fade".to_string(),
            direction: "in".to_string(),
            duration_ms: 500,
            easing: "linear".to_string(),
            blind_count: DEFAULT_BLIND_COUNT,
            blind_density: None,
        }
    }
}

impl TransitionConfig {
    /// Resolve into a [`TransitionSpec`]. Unknown identifiers fall back to
    /// `swap` / `in` / `linear`; this never fails.
    pub fn resolve(&self, display_height: u32) -> TransitionSpec {
        let blind_count = match self.blind_density {
            Some(density) => blind_count_for_density(display_height, density),
            None => self.blind_count,
        };
        TransitionSpec::from_ids(&self.kind, &self.direction, self.duration_ms, &self.easing)
            .with_blind_count(blind_count)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. "info" or "presto_render=debug".
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PrestoConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub transition: TransitionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PrestoConfig {
    pub fn from_toml_str(contents: &str) -> PrestoResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml_string(&self) -> PrestoResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load_from_file(path: &Path) -> PrestoResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> PrestoResult<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// The configured transition, resolved against the display height.
    pub fn transition_spec(&self) -> TransitionSpec {
        self.transition.resolve(self.display.height)
    }
}
