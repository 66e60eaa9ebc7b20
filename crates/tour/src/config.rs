use catalog::{
    DEFAULT_API_BASE_URL, DEFAULT_FILE_BASE_URL, DEFAULT_HOUSE_PATH, DEFAULT_SCENES_PATH,
    default_fallback_textures,
};
use serde::{Deserialize, Serialize};

use crate::controller::{DEFAULT_DRAG_SENSITIVITY, DEFAULT_LATITUDE_LIMIT};
use crate::error::TourError;

pub const ENV_API_BASE: &str = "TOUR_API_BASE";
pub const ENV_FILE_BASE: &str = "TOUR_FILE_BASE";

/// Seed used when none is configured; front ends normally supply one.
pub const DEFAULT_RNG_SEED: u64 = 0x5eed;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    pub api_base_url: String,
    /// Path template; `{house_id}` is substituted.
    pub scenes_path: String,
    pub house_path: String,
    /// Host that relative asset paths are resolved against.
    pub file_base_url: String,

    pub drag_sensitivity: f64,
    pub latitude_limit: f64,

    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    pub sphere_radius: f64,
    pub sphere_width_segments: u32,
    pub sphere_height_segments: u32,
    /// `0xRRGGBB`
    pub background_color: u32,
    pub placeholder_color: u32,

    pub fallback_texture_urls: Vec<String>,
    pub rng_seed: Option<u64>,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            scenes_path: DEFAULT_SCENES_PATH.to_string(),
            house_path: DEFAULT_HOUSE_PATH.to_string(),
            file_base_url: DEFAULT_FILE_BASE_URL.to_string(),
            drag_sensitivity: DEFAULT_DRAG_SENSITIVITY,
            latitude_limit: DEFAULT_LATITUDE_LIMIT,
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            sphere_radius: 500.0,
            sphere_width_segments: 60,
            sphere_height_segments: 40,
            background_color: 0x222222,
            placeholder_color: 0x444444,
            fallback_texture_urls: default_fallback_textures(),
            rng_seed: None,
        }
    }
}

impl TourConfig {
    /// Parses a (possibly partial) JSON object; missing keys keep defaults.
    /// An empty string yields the defaults.
    pub fn from_json_str(json: &str) -> Result<Self, TourError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Applies `TOUR_API_BASE` / `TOUR_FILE_BASE` through `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = v;
        }
        if let Some(v) = lookup(ENV_FILE_BASE).filter(|v| !v.trim().is_empty()) {
            self.file_base_url = v;
        }
        self
    }

    pub fn validate(&self) -> Result<(), TourError> {
        let fail = |msg: &str| Err(TourError::Config(msg.to_string()));
        if !(self.drag_sensitivity.is_finite() && self.drag_sensitivity > 0.0) {
            return fail("drag_sensitivity must be positive");
        }
        if !(self.latitude_limit > 0.0 && self.latitude_limit < 90.0) {
            return fail("latitude_limit must be within (0, 90)");
        }
        if !(self.fov_y_deg > 0.0 && self.fov_y_deg < 180.0) {
            return fail("fov_y_deg must be within (0, 180)");
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return fail("near must be positive and below far");
        }
        if !(self.sphere_radius > self.near && self.sphere_radius < self.far) {
            return fail("sphere_radius must lie between near and far");
        }
        if self.sphere_width_segments < 3 || self.sphere_height_segments < 2 {
            return fail("sphere needs at least 3x2 segments");
        }
        Ok(())
    }

    pub fn seed(&self) -> u64 {
        self.rng_seed.unwrap_or(DEFAULT_RNG_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::{ENV_API_BASE, ENV_FILE_BASE, TourConfig};
    use crate::error::TourError;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_valid() {
        let cfg = TourConfig::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.fallback_texture_urls.len(), 3);
        assert_eq!(TourConfig::from_json_str("  "), Ok(cfg));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = TourConfig::from_json_str(r#"{"api_base_url":"http://localhost:3000","rng_seed":9}"#)
            .expect("parse");
        assert_eq!(cfg.api_base_url, "http://localhost:3000");
        assert_eq!(cfg.rng_seed, Some(9));
        assert_eq!(cfg.sphere_radius, 500.0);
    }

    #[test]
    fn rejects_inconsistent_values() {
        assert!(matches!(
            TourConfig::from_json_str(r#"{"far": 100.0}"#),
            Err(TourError::Config(_))
        ));
        assert!(matches!(
            TourConfig::from_json_str(r#"{"latitude_limit": 90.0}"#),
            Err(TourError::Config(_))
        ));
        assert!(matches!(TourConfig::from_json_str("{"), Err(TourError::Config(_))));
    }

    #[test]
    fn env_overrides_apply_when_set() {
        let cfg = TourConfig::default().with_env_overrides(|key| match key {
            k if k == ENV_API_BASE => Some("https://staging.example".to_string()),
            k if k == ENV_FILE_BASE => Some(String::new()),
            _ => None,
        });
        assert_eq!(cfg.api_base_url, "https://staging.example");
        assert_eq!(cfg.file_base_url, TourConfig::default().file_base_url);
    }
}
