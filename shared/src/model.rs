use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::controller::Controller;

// --- Typed IDs ---

macro_rules! typed_id {
    ($name:ident) => {
        #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

typed_id!(EntityId);

// --- Coordinate: validated, NaN-safe ---

#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize, Deserialize)]
pub enum CoordinateError {
    #[error("coordinate is not finite")]
    NonFinite,
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Latitude/longitude pair in degrees, in that order.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    pub fn validate(self) -> Result<Self, CoordinateError> {
        Self::new(self.lat, self.lon)
    }
}

impl TryFrom<(f64, f64)> for LatLon {
    type Error = CoordinateError;

    fn try_from((lat, lon): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(lat, lon)
    }
}

/// A named, geo-located point of interest. Immutable once loaded.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationEntity {
    pub id: EntityId,
    pub name: String,
    pub coords: LatLon,
    pub description: String,
    pub image_url: String,
}

impl LocationEntity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        coords: LatLon,
        description: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::new(id),
            name: name.into(),
            coords,
            description: description.into(),
            image_url: image_url.into(),
        }
    }
}

#[derive(Default, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    #[default]
    List,
    Detail,
}

/// Externally visible view state. Only the controller mutates it.
#[derive(Default, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub mode: Mode,
    pub selected_id: Option<EntityId>,
    pub animating: bool,
}

/// Crux model. Everything lives behind the controller so no other
/// component can write view state directly.
#[derive(Default, Debug)]
pub struct Model {
    pub controller: Controller,
}
