use tracing::{debug, error};

use crate::capabilities::Capabilities;
use crate::config::ExplorerConfig;
use crate::controller::Directive;
use crate::event::Event;
use crate::list_panel::RowKey;
use crate::model::Model;
use crate::store::EntityStore;
use crate::view::ViewModel;

#[derive(Default)]
pub struct App;

impl App {
    /// Hands queued controller work to the shell through the capabilities.
    fn flush(model: &mut Model, caps: &Capabilities) {
        let elevated_z_offset = model.controller.config().elevated_z_offset;

        for directive in model.controller.take_directives() {
            match directive {
                Directive::CreateMarker {
                    handle,
                    entity_id,
                    coords,
                    popup,
                } => caps.map.create_marker(handle, &entity_id, coords, popup),
                Directive::StyleMarker(style) => caps.map.style_marker(&style, elevated_z_offset),
                Directive::AnimateCamera { motion, target } => {
                    caps.map.animate_to(motion, target, Event::CameraMotionEnded);
                }
                Directive::CancelCamera { motion } => caps.map.cancel_motion(motion),
                Directive::ExpandDrawer { expand, delay_ms } => {
                    caps.drawer.expand(expand, delay_ms, Event::DrawerExpanded);
                }
                Directive::CollapseDrawer {
                    collapse,
                    duration_ms,
                } => caps
                    .drawer
                    .collapse(collapse, duration_ms, Event::DrawerCollapsed),
                Directive::SwapPanels { swap, to, fade_ms } => {
                    caps.drawer
                        .swap_panels(swap, to, fade_ms, Event::PanelSwapSettled);
                }
            }
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        if !event.is_passive() {
            debug!(event = event.name(), "update");
        }

        let controller = &mut model.controller;

        match event {
            Event::Noop => return,

            Event::Initialize {
                entities,
                host,
                config,
            } => {
                let store = entities.load().unwrap_or_else(|e| {
                    error!(error = %e, "entity list rejected, starting empty");
                    EntityStore::default()
                });
                controller.initialize(store, host, ExplorerConfig::or_default(config));
            }

            Event::RowClicked { id } | Event::MarkerClicked { id } => controller.select(&id),
            Event::RowKeyDown { id, key } => controller.row_key(&id, &RowKey::from_key(&key)),
            Event::RowHoverChanged { id, hovered } => controller.row_hover(&id, hovered),
            Event::MarkerHoverChanged { id, hovered } => controller.marker_hover(&id, hovered),
            Event::MapBackgroundClicked => controller.map_background_clicked(),

            Event::BackClicked => controller.back_clicked(),
            Event::CloseClicked => controller.close_clicked(),

            Event::CameraMotionEnded(motion) => controller.camera_motion_ended(motion),
            Event::PanelSwapSettled(swap) => controller.panel_swap_settled(swap),
            Event::DrawerExpanded(expand) => controller.drawer_expanded(expand),
            Event::DrawerCollapsed(collapse) => controller.drawer_collapsed(collapse),
        }

        Self::flush(model, caps);
        caps.render.render();
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel::from(&model.controller)
    }
}
