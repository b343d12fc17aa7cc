use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{CoordinateError, LatLon};
use crate::{
    DEFAULT_DRAWER_COLLAPSE_MS, DEFAULT_FLIGHT_DURATION_S, DEFAULT_FOCUS_ZOOM,
    DEFAULT_INITIAL_OPEN_DELAY_MS, DEFAULT_OVERVIEW_LAT, DEFAULT_OVERVIEW_LON,
    DEFAULT_OVERVIEW_ZOOM, DEFAULT_PANEL_FADE_MS, ELEVATED_Z_OFFSET, MAX_ZOOM, MIN_ZOOM,
};

/// How a new camera request treats a motion that is still in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SupersedePolicy {
    /// The engine redirects an in-flight animation when asked to animate again.
    #[default]
    Implicit,
    /// The engine needs an explicit cancel before the next animation starts.
    CancelThenRestart,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("zoom {0} is out of range")]
    InvalidZoom(f64),

    #[error("{field} must be a positive, finite duration")]
    InvalidDuration { field: &'static str },

    #[error("invalid overview center: {0}")]
    InvalidOverview(#[from] CoordinateError),

    #[error("config parse failed: {0}")]
    Parse(String),
}

/// Camera and timing knobs. Defaults reproduce the stock explorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExplorerConfig {
    pub overview_center: LatLon,
    pub overview_zoom: f64,
    pub focus_zoom: f64,
    pub flight_duration_s: f64,
    pub panel_fade_ms: u64,
    pub drawer_collapse_ms: u64,
    pub initial_open_delay_ms: u64,
    pub elevated_z_offset: i32,
    pub supersede: SupersedePolicy,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            overview_center: LatLon {
                lat: DEFAULT_OVERVIEW_LAT,
                lon: DEFAULT_OVERVIEW_LON,
            },
            overview_zoom: DEFAULT_OVERVIEW_ZOOM,
            focus_zoom: DEFAULT_FOCUS_ZOOM,
            flight_duration_s: DEFAULT_FLIGHT_DURATION_S,
            panel_fade_ms: DEFAULT_PANEL_FADE_MS,
            drawer_collapse_ms: DEFAULT_DRAWER_COLLAPSE_MS,
            initial_open_delay_ms: DEFAULT_INITIAL_OPEN_DELAY_MS,
            elevated_z_offset: ELEVATED_Z_OFFSET,
            supersede: SupersedePolicy::Implicit,
        }
    }
}

impl ExplorerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.overview_center.validate()?;

        for zoom in [self.overview_zoom, self.focus_zoom] {
            if !zoom.is_finite() || !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
                return Err(ConfigError::InvalidZoom(zoom));
            }
        }

        if !self.flight_duration_s.is_finite() || self.flight_duration_s <= 0.0 {
            return Err(ConfigError::InvalidDuration {
                field: "flightDurationS",
            });
        }

        // Zero would make the shell settle a transition before it rendered.
        if self.panel_fade_ms == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "panelFadeMs",
            });
        }
        if self.drawer_collapse_ms == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "drawerCollapseMs",
            });
        }

        Ok(())
    }

    /// Validated config, or the defaults when `candidate` is unusable.
    pub fn or_default(candidate: Option<Self>) -> Self {
        match candidate {
            Some(config) => match config.validate() {
                Ok(()) => config,
                Err(e) => {
                    tracing::warn!(error = %e, "rejecting explorer config, using defaults");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}
