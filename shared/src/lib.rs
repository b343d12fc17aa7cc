// lib.rs - Selection & view-state core for the point-of-interest explorer

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod capabilities;
pub mod config;
pub mod controller;
pub mod drawer;
pub mod event;
pub mod highlight;
pub mod list_panel;
pub mod markers;
pub mod model;
pub mod store;
pub mod view;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::{ConfigError, ExplorerConfig, SupersedePolicy};
pub use controller::{Controller, Directive, Phase, Suspension};
pub use event::Event;
pub use model::{EntityId, LatLon, LocationEntity, Mode, Model, ViewState};
pub use store::{EntitySource, EntityStore, StoreError};
pub use view::ViewModel;

pub const DEFAULT_OVERVIEW_LAT: f64 = -25.27;
pub const DEFAULT_OVERVIEW_LON: f64 = 122.5;
pub const DEFAULT_OVERVIEW_ZOOM: f64 = 5.0;
pub const DEFAULT_FOCUS_ZOOM: f64 = 10.0;
pub const DEFAULT_FLIGHT_DURATION_S: f64 = 1.5;
pub const DEFAULT_PANEL_FADE_MS: u64 = 300;
pub const DEFAULT_DRAWER_COLLAPSE_MS: u64 = 500;
pub const DEFAULT_INITIAL_OPEN_DELAY_MS: u64 = 500;
pub const ELEVATED_Z_OFFSET: i32 = 1000;
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 22.0;

pub const MARKER_ICON_CLASS: &str = "custom-marker";
pub const MARKER_ICON_SIZE_PX: u32 = 20;

/// Stable element ids the shell resolves before `Event::Initialize`.
pub const DRAWER_ELEMENT_ID: &str = "info-drawer";
pub const LIST_ELEMENT_ID: &str = "location-list";
pub const DETAIL_ELEMENT_ID: &str = "detail-view";
pub const CLOSE_BUTTON_ELEMENT_ID: &str = "close-drawer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostElement {
    Drawer,
    List,
    Detail,
    CloseButton,
}

impl HostElement {
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Drawer => DRAWER_ELEMENT_ID,
            Self::List => LIST_ELEMENT_ID,
            Self::Detail => DETAIL_ELEMENT_ID,
            Self::CloseButton => CLOSE_BUTTON_ELEMENT_ID,
        }
    }
}

impl std::fmt::Display for HostElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.element_id())
    }
}

/// Every variant is recovered locally; none escapes a public operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplorerError {
    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),

    #[error("host element {0} is missing")]
    MissingDomTarget(HostElement),

    #[error("map adapter unavailable")]
    MapUnavailable,
}
