use serde::{Deserialize, Serialize};

use crate::controller::{Controller, Phase};
use crate::drawer::DetailContent;
use crate::list_panel::ACTIVATION_KEYS;
use crate::markers::ZOrder;
use crate::model::Mode;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaneView {
    List,
    FadingToDetail,
    Detail,
    FadingToList,
}

impl From<Phase> for PaneView {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::List => Self::List,
            Phase::TransitioningToDetail(_) => Self::FadingToDetail,
            Phase::Detail => Self::Detail,
            Phase::TransitioningToList(_) => Self::FadingToList,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub label: String,
    pub class_list: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MarkerView {
    pub id: String,
    pub handle: u32,
    pub highlighted: bool,
    pub active: bool,
    pub elevated: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub image_src: String,
    pub image_alt: String,
    pub description: String,
    pub back_label: String,
}

impl From<&DetailContent> for DetailView {
    fn from(content: &DetailContent) -> Self {
        Self {
            title: content.title.clone(),
            image_src: content.image_src.clone(),
            image_alt: content.image_alt.clone(),
            description: content.description.clone(),
            back_label: content.back_label.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ViewModel {
    pub mode: Mode,
    pub selected_id: Option<String>,
    pub animating: bool,
    pub drawer_open: bool,
    pub pane: PaneView,
    pub rows: Vec<RowView>,
    pub markers: Vec<MarkerView>,
    pub detail: Option<DetailView>,
    pub camera_busy: bool,
    pub close_enabled: bool,
    pub map_available: bool,
    /// Row keydown values the shell must `preventDefault` synchronously.
    pub activation_keys: Vec<String>,
}

impl From<&Controller> for ViewModel {
    fn from(controller: &Controller) -> Self {
        let state = controller.view_state();

        let rows = controller
            .list()
            .rows()
            .iter()
            .map(|row| RowView {
                id: row.id.to_string(),
                label: row.label.clone(),
                class_list: row.class_list(),
            })
            .collect();

        let markers = controller
            .markers()
            .styles()
            .map(|style| MarkerView {
                id: style.entity_id.to_string(),
                handle: style.handle.0,
                highlighted: style.highlighted,
                active: style.active,
                elevated: style.z_order == ZOrder::Elevated,
            })
            .collect();

        Self {
            mode: state.mode,
            selected_id: state.selected_id.as_ref().map(ToString::to_string),
            animating: state.animating,
            drawer_open: controller.drawer().is_expanded(),
            pane: controller.phase().into(),
            rows,
            markers,
            detail: controller.drawer().detail().map(DetailView::from),
            camera_busy: controller.camera().is_busy(),
            close_enabled: controller.drawer().elements().close_button,
            map_available: controller.map_available(),
            activation_keys: ACTIVATION_KEYS.iter().map(ToString::to_string).collect(),
        }
    }
}
