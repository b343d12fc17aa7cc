use serde::{Deserialize, Serialize};

use crate::config::ExplorerConfig;
use crate::controller::{CollapseId, ExpandId, HostEnvironment, MotionId, SwapId};
use crate::model::EntityId;
use crate::store::EntitySource;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    Noop,

    Initialize {
        entities: EntitySource,
        host: HostEnvironment,
        config: Option<ExplorerConfig>,
    },

    // List panel
    RowClicked {
        id: EntityId,
    },
    RowKeyDown {
        id: EntityId,
        key: String,
    },
    RowHoverChanged {
        id: EntityId,
        hovered: bool,
    },

    // Map
    MarkerClicked {
        id: EntityId,
    },
    MarkerHoverChanged {
        id: EntityId,
        hovered: bool,
    },
    MapBackgroundClicked,

    // Drawer controls
    BackClicked,
    CloseClicked,

    // Completions, produced by capabilities
    #[serde(skip)]
    CameraMotionEnded(MotionId),
    #[serde(skip)]
    PanelSwapSettled(SwapId),
    #[serde(skip)]
    DrawerExpanded(ExpandId),
    #[serde(skip)]
    DrawerCollapsed(CollapseId),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::Initialize { .. } => "initialize",
            Self::RowClicked { .. } => "row_clicked",
            Self::RowKeyDown { .. } => "row_key_down",
            Self::RowHoverChanged { .. } => "row_hover_changed",
            Self::MarkerClicked { .. } => "marker_clicked",
            Self::MarkerHoverChanged { .. } => "marker_hover_changed",
            Self::MapBackgroundClicked => "map_background_clicked",
            Self::BackClicked => "back_clicked",
            Self::CloseClicked => "close_clicked",
            Self::CameraMotionEnded(_) => "camera_motion_ended",
            Self::PanelSwapSettled(_) => "panel_swap_settled",
            Self::DrawerExpanded(_) => "drawer_expanded",
            Self::DrawerCollapsed(_) => "drawer_collapsed",
        }
    }

    /// Hover events change cosmetics only and fire far more often.
    pub fn is_passive(&self) -> bool {
        matches!(
            self,
            Self::RowHoverChanged { .. } | Self::MarkerHoverChanged { .. }
        )
    }
}
