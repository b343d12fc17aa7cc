use std::collections::VecDeque;

use crux_core::testing::AppTester;
use crux_core::Request;
use poi_explorer::capabilities::{DrawerOperation, DrawerOutput, MapOperation, MapOutput};
use poi_explorer::controller::HostEnvironment;
use poi_explorer::drawer::Pane;
use poi_explorer::view::PaneView;
use poi_explorer::{App, Effect, EntityId, EntitySource, Event, LatLon, LocationEntity, Mode, Model};

/// Plays the shell: records every operation and resolves timed ones on demand.
struct Shell {
    app: AppTester<App, Effect>,
    model: Model,
    map_log: Vec<MapOperation>,
    drawer_log: Vec<DrawerOperation>,
    motions: VecDeque<Request<MapOperation>>,
    transitions: VecDeque<Request<DrawerOperation>>,
}

impl Shell {
    /// Initialized, with the delayed initial open already landed.
    fn new(entities: Vec<LocationEntity>) -> Self {
        let mut shell = Self::starting(entities);
        shell.settle_transitions();
        shell.clear_logs();
        shell
    }

    /// Initialized, with the initial open still pending in the shell.
    fn starting(entities: Vec<LocationEntity>) -> Self {
        let mut shell = Self {
            app: AppTester::<App, Effect>::default(),
            model: Model::default(),
            map_log: Vec::new(),
            drawer_log: Vec::new(),
            motions: VecDeque::new(),
            transitions: VecDeque::new(),
        };
        shell.send(Event::Initialize {
            entities: EntitySource::Inline(entities),
            host: HostEnvironment::default(),
            config: None,
        });
        shell.clear_logs();
        shell
    }

    fn send(&mut self, event: Event) {
        let update = self.app.update(event, &mut self.model);
        self.absorb(update.effects);
    }

    fn absorb(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::MapView(request) => {
                    self.map_log.push(request.operation.clone());
                    if matches!(request.operation, MapOperation::AnimateTo { .. }) {
                        self.motions.push_back(request);
                    }
                }
                Effect::Drawer(request) => {
                    self.drawer_log.push(request.operation.clone());
                    self.transitions.push_back(request);
                }
                Effect::Render(_) => {}
            }
        }
    }

    /// Lets every pending drawer transition run out, including ones they trigger.
    fn settle_transitions(&mut self) {
        while let Some(mut request) = self.transitions.pop_front() {
            let update = self
                .app
                .resolve(&mut request, DrawerOutput::Settled)
                .expect("drawer request should resolve");
            for event in update.events {
                self.send(event);
            }
        }
    }

    /// Answers the oldest camera motion still pending on the engine.
    fn end_next_motion(&mut self, output: MapOutput) {
        let mut request = self.motions.pop_front().expect("a camera motion is pending");
        let update = self
            .app
            .resolve(&mut request, output)
            .expect("camera request should resolve");
        for event in update.events {
            self.send(event);
        }
    }

    fn clear_logs(&mut self) {
        self.map_log.clear();
        self.drawer_log.clear();
    }

    fn view(&self) -> poi_explorer::ViewModel {
        self.app.view(&self.model)
    }

    fn animations(&self) -> Vec<(f64, f64, f64)> {
        self.map_log
            .iter()
            .filter_map(|op| match op {
                MapOperation::AnimateTo { lat, lon, zoom, .. } => Some((*lat, *lon, *zoom)),
                _ => None,
            })
            .collect()
    }
}

fn wave_rock() -> LocationEntity {
    LocationEntity::new(
        "1",
        "Wave Rock",
        LatLon::new(-32.4, 118.9).unwrap(),
        "...",
        "a.jpg",
    )
}

fn pinnacles() -> LocationEntity {
    LocationEntity::new(
        "2",
        "The Pinnacles",
        LatLon::new(-30.6, 115.2).unwrap(),
        "Limestone spires",
        "b.jpg",
    )
}

fn id(s: &str) -> EntityId {
    EntityId::new(s)
}

#[test]
fn initialize_registers_markers_and_opens_drawer() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let update = app.update(
        Event::Initialize {
            entities: EntitySource::Inline(vec![wave_rock(), pinnacles()]),
            host: HostEnvironment::default(),
            config: None,
        },
        &mut model,
    );

    let mut created = Vec::new();
    let mut opening = None;
    for effect in update.effects {
        match effect {
            Effect::MapView(request) => {
                if let MapOperation::CreateMarker { entity_id, popup, icon, .. } = &request.operation {
                    assert_eq!(icon.class_name, "custom-marker");
                    created.push((entity_id.clone(), popup.clone()));
                }
            }
            Effect::Drawer(request) => {
                assert_eq!(request.operation, DrawerOperation::Expand { delay_ms: 500 });
                opening = Some(request);
            }
            Effect::Render(_) => {}
        }
    }
    assert_eq!(
        created,
        [
            ("1".to_string(), "Wave Rock".to_string()),
            ("2".to_string(), "The Pinnacles".to_string())
        ]
    );

    let view = app.view(&model);
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].label, "Wave Rock");
    assert!(!view.drawer_open);
    assert_eq!(view.mode, Mode::List);

    let mut opening = opening.expect("initial open requested");
    let opened = app
        .resolve(&mut opening, DrawerOutput::Settled)
        .expect("drawer request should resolve");
    for event in opened.events {
        app.update(event, &mut model);
    }
    assert!(app.view(&model).drawer_open);
}

#[test]
fn background_click_before_initial_open_is_ignored() {
    let mut shell = Shell::starting(vec![wave_rock()]);
    shell.clear_logs();

    shell.send(Event::MapBackgroundClicked);
    assert!(shell.drawer_log.is_empty());

    shell.settle_transitions();
    assert!(shell.view().drawer_open);
}

#[test]
fn close_before_initial_open_keeps_drawer_closed() {
    let mut shell = Shell::starting(vec![wave_rock()]);
    shell.clear_logs();

    shell.send(Event::CloseClicked);
    shell.settle_transitions();

    // The late open is folded back by a second collapse.
    let collapses = shell
        .drawer_log
        .iter()
        .filter(|op| matches!(op, DrawerOperation::Collapse { .. }))
        .count();
    assert_eq!(collapses, 2);

    let view = shell.view();
    assert!(!view.drawer_open);
    assert_eq!(view.mode, Mode::List);
}

#[test]
fn dropped_motion_releases_camera() {
    let mut shell = Shell::new(vec![wave_rock()]);
    shell.send(Event::RowClicked { id: id("1") });
    assert!(shell.view().camera_busy);

    shell.end_next_motion(MapOutput::Ack);
    assert!(!shell.view().camera_busy);
}

#[test]
fn reselecting_while_closing_still_resets() {
    let mut shell = Shell::new(vec![wave_rock(), pinnacles()]);
    shell.send(Event::RowClicked { id: id("1") });
    shell.settle_transitions();

    shell.send(Event::CloseClicked);
    shell.send(Event::RowClicked { id: id("2") });
    shell.settle_transitions();

    let view = shell.view();
    assert_eq!(view.mode, Mode::List);
    assert_eq!(view.selected_id, None);
    assert!(view.markers.iter().all(|m| !m.active));
    assert!(view.rows.iter().all(|r| r.class_list.is_empty()));
}

#[test]
fn view_lists_row_activation_keys() {
    let shell = Shell::new(vec![wave_rock()]);
    let keys = shell.view().activation_keys;
    assert!(keys.iter().any(|k| k == "Enter"));
    assert!(keys.iter().any(|k| k == " "));
    assert!(!keys.iter().any(|k| k == "Tab"));
}

#[test]
fn selecting_wave_rock_updates_every_surface() {
    let mut shell = Shell::new(vec![wave_rock()]);
    shell.send(Event::RowClicked { id: id("1") });

    assert_eq!(shell.animations(), [(-32.4, 118.9, 10.0)]);
    assert!(shell.map_log.contains(&MapOperation::StyleMarker {
        handle: 0,
        highlighted: false,
        active: true,
        z_offset: 1000,
    }));
    assert!(shell.drawer_log.contains(&DrawerOperation::SwapPanels {
        to: Pane::Detail,
        fade_ms: 300,
    }));

    let view = shell.view();
    assert!(view.markers[0].active);
    assert_eq!(view.rows[0].class_list, ["selected"]);
    let detail = view.detail.expect("detail content");
    assert_eq!(detail.title, "Wave Rock");
    assert_eq!(detail.image_src, "a.jpg");
    assert_eq!(view.mode, Mode::Detail);
    assert_eq!(view.selected_id.as_deref(), Some("1"));
    assert!(view.animating);
    assert!(view.camera_busy);

    shell.settle_transitions();
    let view = shell.view();
    assert_eq!(view.pane, PaneView::Detail);
    assert!(!view.animating);
}

#[test]
fn rapid_reselection_targets_the_last_entity() {
    let mut shell = Shell::new(vec![wave_rock(), pinnacles()]);
    shell.send(Event::MarkerClicked { id: id("1") });
    shell.clear_logs();
    shell.send(Event::MarkerClicked { id: id("2") });

    assert_eq!(shell.animations(), [(-30.6, 115.2, 10.0)]);

    // The first flight lands late; the guard keeps tracking the second.
    shell.end_next_motion(MapOutput::MotionEnded);
    assert!(shell.view().camera_busy);
    shell.end_next_motion(MapOutput::MotionEnded);
    assert!(!shell.view().camera_busy);

    let view = shell.view();
    let active: Vec<_> = view.markers.iter().filter(|m| m.active).map(|m| m.id.as_str()).collect();
    assert_eq!(active, ["2"]);
    assert_eq!(view.detail.unwrap().title, "The Pinnacles");
}

#[test]
fn closing_from_detail_returns_to_the_list() {
    let mut shell = Shell::new(vec![wave_rock(), pinnacles()]);
    shell.send(Event::RowClicked { id: id("1") });
    shell.settle_transitions();
    shell.clear_logs();

    shell.send(Event::CloseClicked);
    assert_eq!(shell.drawer_log, [DrawerOperation::Collapse { duration_ms: 500 }]);
    assert!(!shell.view().drawer_open);

    shell.settle_transitions();
    assert!(shell.drawer_log.contains(&DrawerOperation::SwapPanels {
        to: Pane::List,
        fade_ms: 300,
    }));
    assert_eq!(shell.animations(), [(-25.27, 122.5, 5.0)]);

    let view = shell.view();
    assert_eq!(view.mode, Mode::List);
    assert_eq!(view.pane, PaneView::List);
    assert_eq!(view.selected_id, None);
    assert!(view.markers.iter().all(|m| !m.active));
    assert!(view.rows.iter().all(|r| r.class_list.is_empty()));
    assert!(view.detail.is_none());
}

#[test]
fn close_is_idempotent_from_any_mode() {
    let mut shell = Shell::new(vec![wave_rock()]);

    for _ in 0..2 {
        shell.send(Event::CloseClicked);
        shell.settle_transitions();
        let view = shell.view();
        assert_eq!(view.mode, Mode::List);
        assert_eq!(view.selected_id, None);
    }
}

#[test]
fn back_button_returns_to_list_without_closing() {
    let mut shell = Shell::new(vec![wave_rock()]);
    shell.send(Event::RowClicked { id: id("1") });
    shell.settle_transitions();

    shell.send(Event::BackClicked);
    shell.settle_transitions();

    let view = shell.view();
    assert_eq!(view.mode, Mode::List);
    assert!(view.drawer_open);
    assert!(!view.markers[0].active);
}

#[test]
fn background_click_dismisses_open_drawer() {
    let mut shell = Shell::new(vec![wave_rock()]);
    shell.send(Event::MapBackgroundClicked);
    assert_eq!(shell.drawer_log, [DrawerOperation::Collapse { duration_ms: 500 }]);

    shell.settle_transitions();
    shell.clear_logs();
    shell.send(Event::MapBackgroundClicked);
    assert!(shell.drawer_log.is_empty());
}

#[test]
fn keyboard_activation_matches_click() {
    let mut shell = Shell::new(vec![wave_rock(), pinnacles()]);
    shell.send(Event::RowKeyDown { id: id("2"), key: "ArrowDown".into() });
    assert_eq!(shell.view().selected_id, None);

    shell.send(Event::RowKeyDown { id: id("2"), key: "Enter".into() });
    assert_eq!(shell.view().selected_id.as_deref(), Some("2"));

    shell.send(Event::RowKeyDown { id: id("1"), key: " ".into() });
    assert_eq!(shell.view().selected_id.as_deref(), Some("1"));
}

#[test]
fn hover_round_trips_leave_no_highlight() {
    let mut shell = Shell::new(vec![wave_rock()]);

    shell.send(Event::MarkerHoverChanged { id: id("1"), hovered: true });
    let view = shell.view();
    assert_eq!(view.rows[0].class_list, ["highlighted"]);
    assert!(!view.markers[0].highlighted);
    assert!(shell.map_log.is_empty());

    shell.send(Event::MarkerHoverChanged { id: id("1"), hovered: false });
    shell.send(Event::RowHoverChanged { id: id("1"), hovered: true });
    assert_eq!(
        shell.map_log,
        [MapOperation::StyleMarker {
            handle: 0,
            highlighted: true,
            active: false,
            z_offset: 1000,
        }]
    );
    shell.send(Event::RowHoverChanged { id: id("1"), hovered: false });

    let view = shell.view();
    assert!(view.rows[0].class_list.is_empty());
    assert!(!view.markers[0].highlighted);
    assert!(!view.markers[0].elevated);
    assert_eq!(view.mode, Mode::List);
}

#[test]
fn unknown_selection_is_silent() {
    let mut shell = Shell::new(vec![wave_rock()]);
    let before = shell.view();
    shell.send(Event::RowClicked { id: id("missing") });

    assert_eq!(shell.view(), before);
    assert!(shell.map_log.is_empty());
    assert!(shell.drawer_log.is_empty());
}
