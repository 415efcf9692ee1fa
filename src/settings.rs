/// Serializable motion settings
///
/// A data-only description of a motion (path, timing, space, easing) that
/// can live in a JSON file and be turned into a [`MotionConfig`] at
/// runtime. Callbacks are attached separately; they do not serialize.

use anyhow::Result;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::curve::StraightLine;
use crate::easing::Easing;
use crate::motion::MotionConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionSettings {
    /// Ordered destination points; one point means a straight path
    pub waypoints: Vec<DVec3>,
    /// Seconds, or the speed divisor when `speed_based`
    pub duration: f64,
    pub speed_based: bool,
    pub local: bool,
    pub easing: Easing,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            waypoints: Vec::new(),
            duration: 1.0,
            speed_based: false,
            local: false,
            easing: Easing::Linear,
        }
    }
}

impl MotionSettings {
    /// Load settings from a JSON file
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings: MotionSettings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to a JSON file with pretty formatting
    pub fn save(&self, path: &str) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load settings, falling back to (and persisting) defaults when the
    /// file is missing or malformed
    pub fn load_or_default(path: &str) -> Self {
        Self::load(path).unwrap_or_else(|_| {
            let settings = Self::default();
            let _ = settings.save(path);
            settings
        })
    }

    /// Build a motion configuration from these settings. An empty waypoint
    /// list degenerates to a zero-length path anchored at the current
    /// position.
    pub fn to_config(&self) -> MotionConfig {
        let config = match self.waypoints.as_slice() {
            // Zero-length path anchored at the begin position
            [] => MotionConfig::along_curve(std::sync::Arc::new(StraightLine::new(
                DVec3::ZERO,
                DVec3::ZERO,
            ))),
            [single] => MotionConfig::to_point(*single),
            _ => MotionConfig::along_waypoints(self.waypoints.clone()),
        };
        config
            .duration(self.duration)
            .speed_based(self.speed_based)
            .local(self.local)
            .easing(self.easing)
    }
}
