//! View-state controller: the drawer state machine and the camera guard.
//!
//! The controller owns every piece of mutable explorer state. Operations run
//! to completion and queue [`Directive`]s for the shell. The timed effects
//! (initial drawer open, panel swap, drawer collapse, camera motion) are
//! suspension points identified by tokens, and a completion carrying anything
//! but the current token is dropped as stale.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::{ExplorerConfig, SupersedePolicy};
use crate::drawer::{DetailContent, DrawerShell, HostElements, Pane};
use crate::highlight;
use crate::list_panel::{ListPanel, RowKey};
use crate::markers::{MarkerHandle, MarkerRegistry, MarkerStyle};
use crate::model::{EntityId, LatLon, Mode, ViewState};
use crate::store::EntityStore;
use crate::ExplorerError;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SwapId(pub u64);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CollapseId(pub u64);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MotionId(pub u64);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ExpandId(pub u64);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    List,
    TransitioningToDetail(SwapId),
    Detail,
    TransitioningToList(SwapId),
}

impl Phase {
    pub const fn mode(self) -> Mode {
        match self {
            Self::List | Self::TransitioningToList(_) => Mode::List,
            Self::Detail | Self::TransitioningToDetail(_) => Mode::Detail,
        }
    }

    pub const fn is_transitioning(self) -> bool {
        matches!(
            self,
            Self::TransitioningToDetail(_) | Self::TransitioningToList(_)
        )
    }
}

/// A point where the controller waits on the shell.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Suspension {
    DrawerOpen(ExpandId),
    PanelSwap(SwapId),
    DrawerCollapse(CollapseId),
    CameraMotion(MotionId),
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct CameraTarget {
    pub center: LatLon,
    pub zoom: f64,
    pub duration_s: f64,
}

/// One flag, one in-flight motion: always the most recently requested one.
#[derive(Debug, Clone, Default)]
pub struct CameraGuard {
    busy: bool,
    in_flight: Option<MotionId>,
    target: Option<CameraTarget>,
    issued: u64,
}

impl CameraGuard {
    pub fn request(&mut self, target: CameraTarget, policy: SupersedePolicy) -> Vec<Directive> {
        let mut directives = Vec::with_capacity(2);

        if let (true, Some(previous), SupersedePolicy::CancelThenRestart) =
            (self.busy, self.in_flight, policy)
        {
            directives.push(Directive::CancelCamera { motion: previous });
        }

        self.issued += 1;
        let motion = MotionId(self.issued);
        if self.busy {
            debug!(motion = motion.0, "re-targeting camera motion in flight");
        }
        self.busy = true;
        self.in_flight = Some(motion);
        self.target = Some(target);

        directives.push(Directive::AnimateCamera { motion, target });
        directives
    }

    /// Clears the flag only for the motion that is currently tracked.
    pub fn complete(&mut self, motion: MotionId) -> bool {
        if self.in_flight != Some(motion) {
            debug!(motion = motion.0, "stale camera completion ignored");
            return false;
        }
        self.busy = false;
        self.in_flight = None;
        true
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn in_flight(&self) -> Option<MotionId> {
        self.in_flight
    }

    /// Last requested target, kept after the motion lands.
    pub fn target(&self) -> Option<CameraTarget> {
        self.target
    }
}

/// Work the shell must carry out, in emission order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Directive {
    CreateMarker {
        handle: MarkerHandle,
        entity_id: EntityId,
        coords: LatLon,
        popup: String,
    },
    StyleMarker(MarkerStyle),
    AnimateCamera {
        motion: MotionId,
        target: CameraTarget,
    },
    CancelCamera {
        motion: MotionId,
    },
    ExpandDrawer {
        expand: ExpandId,
        delay_ms: u64,
    },
    CollapseDrawer {
        collapse: CollapseId,
        duration_ms: u64,
    },
    SwapPanels {
        swap: SwapId,
        to: Pane,
        fade_ms: u64,
    },
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostEnvironment {
    pub elements: HostElements,
    pub map_available: bool,
}

impl Default for HostEnvironment {
    fn default() -> Self {
        Self {
            elements: HostElements::all(),
            map_available: true,
        }
    }
}

/// The delayed initial open, still waiting on the shell.
#[derive(Debug, Clone, Copy)]
struct ScheduledOpen {
    expand: ExpandId,
    /// A close arrived after the open was scheduled and no selection since.
    overridden: bool,
}

#[derive(Debug, Default)]
pub struct Controller {
    config: ExplorerConfig,
    store: EntityStore,
    markers: MarkerRegistry,
    list: ListPanel,
    drawer: DrawerShell,
    view: ViewState,
    phase: Phase,
    camera: CameraGuard,
    map_available: bool,
    initialized: bool,
    issued: u64,
    pending_collapse: Option<CollapseId>,
    scheduled_open: Option<ScheduledOpen>,
    directives: Vec<Directive>,
}

impl Controller {
    /// Builds markers and rows and opens the drawer. Accepted once.
    #[instrument(level = "debug", skip_all, fields(entities = store.len()))]
    pub fn initialize(&mut self, store: EntityStore, host: HostEnvironment, config: ExplorerConfig) {
        if self.initialized {
            warn!("explorer already initialized, ignoring");
            return;
        }

        for element in host.elements.missing() {
            warn!(error = %ExplorerError::MissingDomTarget(element), "feature disabled");
        }

        self.config = config;
        self.store = store;
        self.map_available = host.map_available;
        self.drawer = DrawerShell::new(host.elements);
        self.list = if host.elements.list {
            ListPanel::enabled()
        } else {
            ListPanel::default()
        };
        self.list.render(self.store.all());

        if self.map_available {
            for entity in self.store.all() {
                let handle = self.markers.register(entity);
                self.directives.push(Directive::CreateMarker {
                    handle,
                    entity_id: entity.id.clone(),
                    coords: entity.coords,
                    popup: entity.name.clone(),
                });
            }
        } else {
            warn!(error = %ExplorerError::MapUnavailable, "markers and camera disabled");
        }

        // The drawer counts as expanded only once the shell reports it open.
        if self.drawer.elements().drawer {
            let expand = ExpandId(self.next_token());
            self.scheduled_open = Some(ScheduledOpen {
                expand,
                overridden: false,
            });
            self.directives.push(Directive::ExpandDrawer {
                expand,
                delay_ms: self.config.initial_open_delay_ms,
            });
        }

        self.initialized = true;
        info!(markers = self.markers.len(), "explorer initialized");
    }

    #[instrument(level = "debug", skip_all, fields(entity_id = %id))]
    pub fn select(&mut self, id: &EntityId) {
        let entity = match self.store.find(id) {
            Ok(entity) => entity.clone(),
            Err(e) => {
                debug!(error = %e, "selection ignored");
                return;
            }
        };

        self.request_camera(CameraTarget {
            center: entity.coords,
            zoom: self.config.focus_zoom,
            duration_s: self.config.flight_duration_s,
        });

        self.drawer.set_detail(DetailContent::from(&entity));
        let styles = self.markers.set_active(Some(&entity.id));
        self.push_styles(styles);
        self.list.set_active_row(Some(&entity.id));

        // A pending close still resets to the list once its collapse settles.
        if self.drawer.expand() {
            let expand = ExpandId(self.next_token());
            self.directives.push(Directive::ExpandDrawer { expand, delay_ms: 0 });
        }
        if let Some(open) = &mut self.scheduled_open {
            open.overridden = false;
        }

        self.phase = if self.drawer.elements().can_swap_panes() {
            let swap = self.next_swap();
            self.directives.push(Directive::SwapPanels {
                swap,
                to: Pane::Detail,
                fade_ms: self.config.panel_fade_ms,
            });
            Phase::TransitioningToDetail(swap)
        } else {
            Phase::Detail
        };

        self.view.selected_id = Some(entity.id);
        self.sync_view();
    }

    #[instrument(level = "debug", skip_all)]
    pub fn show_list(&mut self) {
        let styles = self.markers.set_active(None);
        self.push_styles(styles);
        self.list.set_active_row(None);
        self.view.selected_id = None;

        let phase = self.phase;
        self.phase = match phase {
            Phase::Detail | Phase::TransitioningToDetail(_)
                if self.drawer.elements().can_swap_panes() =>
            {
                let swap = self.next_swap();
                self.directives.push(Directive::SwapPanels {
                    swap,
                    to: Pane::List,
                    fade_ms: self.config.panel_fade_ms,
                });
                Phase::TransitioningToList(swap)
            }
            Phase::TransitioningToList(swap) => Phase::TransitioningToList(swap),
            _ => {
                self.drawer.clear_detail();
                Phase::List
            }
        };

        self.request_camera(CameraTarget {
            center: self.config.overview_center,
            zoom: self.config.overview_zoom,
            duration_s: self.config.flight_duration_s,
        });
        self.sync_view();
    }

    /// Collapses the drawer; the list reset runs once the collapse settles.
    #[instrument(level = "debug", skip_all)]
    pub fn close_drawer(&mut self) {
        if let Some(open) = &mut self.scheduled_open {
            open.overridden = true;
        }
        if self.drawer.collapse() {
            let collapse = CollapseId(self.next_token());
            self.pending_collapse = Some(collapse);
            self.directives.push(Directive::CollapseDrawer {
                collapse,
                duration_ms: self.config.drawer_collapse_ms,
            });
        } else {
            self.show_list();
        }
    }

    pub fn row_key(&mut self, id: &EntityId, key: &RowKey) {
        if key.action().activate {
            self.select(id);
        }
    }

    pub fn marker_hover(&mut self, id: &EntityId, hovered: bool) {
        highlight::on_marker_hover(&mut self.list, id, hovered);
    }

    pub fn row_hover(&mut self, id: &EntityId, hovered: bool) {
        let styles = highlight::on_row_hover(&mut self.markers, id, hovered);
        self.push_styles(styles);
    }

    /// Click on empty map: dismiss the drawer if it is open.
    pub fn map_background_clicked(&mut self) {
        if self.drawer.is_expanded() {
            self.close_drawer();
        }
    }

    pub fn close_clicked(&mut self) {
        if self.drawer.elements().close_button {
            self.close_drawer();
        } else {
            debug!("close control missing, click ignored");
        }
    }

    pub fn back_clicked(&mut self) {
        if self.view.mode == Mode::Detail {
            self.show_list();
        }
    }

    pub fn panel_swap_settled(&mut self, swap: SwapId) {
        let phase = self.phase;
        self.phase = match phase {
            Phase::TransitioningToDetail(pending) if pending == swap => Phase::Detail,
            Phase::TransitioningToList(pending) if pending == swap => {
                self.drawer.clear_detail();
                Phase::List
            }
            phase => {
                debug!(swap = swap.0, "stale panel swap ignored");
                phase
            }
        };
        self.sync_view();
    }

    pub fn drawer_collapsed(&mut self, collapse: CollapseId) {
        if self.pending_collapse == Some(collapse) {
            self.pending_collapse = None;
            self.show_list();
        } else {
            debug!(collapse = collapse.0, "stale drawer collapse ignored");
        }
    }

    /// The shell opened the drawer. A delayed open that a close overtook is
    /// folded back with a plain collapse, which resets nothing.
    pub fn drawer_expanded(&mut self, expand: ExpandId) {
        match self.scheduled_open {
            Some(open) if open.expand == expand => {
                self.scheduled_open = None;
                if open.overridden {
                    debug!(expand = expand.0, "late drawer open overridden by close");
                    let collapse = CollapseId(self.next_token());
                    self.directives.push(Directive::CollapseDrawer {
                        collapse,
                        duration_ms: self.config.drawer_collapse_ms,
                    });
                } else {
                    self.drawer.expand();
                }
            }
            _ => debug!(expand = expand.0, "drawer open acknowledged"),
        }
    }

    pub fn camera_motion_ended(&mut self, motion: MotionId) {
        self.camera.complete(motion);
    }

    pub fn take_directives(&mut self) -> Vec<Directive> {
        std::mem::take(&mut self.directives)
    }

    pub fn pending_suspensions(&self) -> Vec<Suspension> {
        let mut pending = Vec::new();
        if let Some(open) = self.scheduled_open {
            pending.push(Suspension::DrawerOpen(open.expand));
        }
        if let Phase::TransitioningToDetail(swap) | Phase::TransitioningToList(swap) = self.phase {
            pending.push(Suspension::PanelSwap(swap));
        }
        if let Some(collapse) = self.pending_collapse {
            pending.push(Suspension::DrawerCollapse(collapse));
        }
        if let Some(motion) = self.camera.in_flight() {
            pending.push(Suspension::CameraMotion(motion));
        }
        pending
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    pub fn list(&self) -> &ListPanel {
        &self.list
    }

    pub fn drawer(&self) -> &DrawerShell {
        &self.drawer
    }

    pub fn camera(&self) -> &CameraGuard {
        &self.camera
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn map_available(&self) -> bool {
        self.map_available
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn request_camera(&mut self, target: CameraTarget) {
        if !self.map_available {
            debug!(error = %ExplorerError::MapUnavailable, "camera request skipped");
            return;
        }
        let directives = self.camera.request(target, self.config.supersede);
        self.directives.extend(directives);
    }

    fn push_styles(&mut self, styles: Vec<MarkerStyle>) {
        self.directives
            .extend(styles.into_iter().map(Directive::StyleMarker));
    }

    fn next_swap(&mut self) -> SwapId {
        SwapId(self.next_token())
    }

    fn next_token(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    fn sync_view(&mut self) {
        self.view.mode = self.phase.mode();
        self.view.animating = self.phase.is_transitioning();
    }
}
