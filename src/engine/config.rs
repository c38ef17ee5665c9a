use std::path::Path;

use anyhow::Context as _;

use crate::{
    animation::ease::Ease,
    color::color::ColorStyle,
    foundation::error::{TinselError, TinselResult},
};

/// Engine timing and output settings. Every field has a default, so a JSON
/// config only needs to name what it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Seconds a pattern plays on its own.
    pub steady_secs: f64,
    /// Seconds spent cross-fading into the next pattern.
    pub transition_secs: f64,
    pub sparkle_period: f64,
    pub streamer_period: f64,
    /// Period of the global blend hue rotation.
    pub blend_period: f64,
    pub transition_ease: Ease,
    pub color_style: ColorStyle,
    /// Hold the current pattern instead of moving on when its time is up.
    pub pause_change: bool,
    /// Pattern to open with, by name; random when unset.
    pub start_pattern: Option<String>,
    /// RNG seed; OS entropy when unset.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            steady_secs: 54.0,
            transition_secs: 6.0,
            sparkle_period: 0.25,
            streamer_period: 1.0,
            blend_period: 60.0,
            transition_ease: Ease::InOutCubic,
            color_style: ColorStyle::EightColor,
            pause_change: false,
            start_pattern: None,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> TinselResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> TinselResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read config from '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> TinselResult<()> {
        for (name, v) in [
            ("steady_secs", self.steady_secs),
            ("transition_secs", self.transition_secs),
            ("sparkle_period", self.sparkle_period),
            ("streamer_period", self.streamer_period),
            ("blend_period", self.blend_period),
        ] {
            if !(v > 0.0) || !v.is_finite() {
                return Err(TinselError::config(format!("{name} must be > 0, got {v}")));
            }
        }
        if let Some(name) = &self.start_pattern
            && name.trim().is_empty()
        {
            return Err(TinselError::config("start_pattern must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/config.rs"]
mod tests;
