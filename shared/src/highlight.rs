//! Hover routing between the map and the list.
//!
//! Each entry point borrows only the surface it writes to, so a hover can
//! never be echoed back into the surface it came from.

use crate::list_panel::ListPanel;
use crate::markers::{MarkerRegistry, MarkerStyle};
use crate::model::EntityId;

/// Pointer entered or left a marker: mirror it on the paired row.
pub fn on_marker_hover(list: &mut ListPanel, id: &EntityId, hovered: bool) {
    list.set_highlighted_row(id, hovered);
}

/// Pointer entered or left a row: mirror it on the paired marker.
pub fn on_row_hover(markers: &mut MarkerRegistry, id: &EntityId, hovered: bool) -> Vec<MarkerStyle> {
    markers.set_highlight(id, hovered)
}
