use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::controller::{CameraTarget, MotionId};
use crate::markers::{MarkerHandle, MarkerStyle, ZOrder};
use crate::model::{EntityId, LatLon};
use crate::{MARKER_ICON_CLASS, MARKER_ICON_SIZE_PX};

/// Mapping-engine capability: markers and camera.
#[derive(Clone)]
pub struct MapView<E> {
    context: CapabilityContext<MapOperation, E>,
}

impl<Ev> Capability<Ev> for MapView<Ev> {
    type Operation = MapOperation;
    type MappedSelf<MappedEv> = MapView<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        MapView::new(self.context.map_event(f))
    }
}

impl<E> MapView<E>
where
    E: 'static,
{
    pub fn new(context: CapabilityContext<MapOperation, E>) -> Self {
        Self { context }
    }

    pub fn create_marker(&self, handle: MarkerHandle, entity_id: &EntityId, coords: LatLon, popup: String) {
        self.notify(MapOperation::CreateMarker {
            handle: handle.0,
            entity_id: entity_id.to_string(),
            lat: coords.lat,
            lon: coords.lon,
            icon: IconSpec::default(),
            popup,
        });
    }

    pub fn style_marker(&self, style: &MarkerStyle, elevated_z_offset: i32) {
        let z_offset = match style.z_order {
            ZOrder::Elevated => elevated_z_offset,
            ZOrder::Normal => 0,
        };
        self.notify(MapOperation::StyleMarker {
            handle: style.handle.0,
            highlighted: style.highlighted,
            active: style.active,
            z_offset,
        });
    }

    /// Starts a camera motion. The shell resolves the request when the
    /// engine reports the end of its next motion, or with `Ack` when the
    /// engine dropped it. Either way the motion is over.
    pub fn animate_to<F>(&self, motion: MotionId, target: CameraTarget, callback: F)
    where
        F: FnOnce(MotionId) -> E + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let output = ctx
                .request_from_shell(MapOperation::AnimateTo {
                    motion: motion.0,
                    lat: target.center.lat,
                    lon: target.center.lon,
                    zoom: target.zoom,
                    duration_s: target.duration_s,
                })
                .await;
            if output == MapOutput::Ack {
                tracing::debug!(motion = motion.0, "camera motion dropped by engine");
            }
            ctx.update_app(callback(motion));
        });
    }

    pub fn cancel_motion(&self, motion: MotionId) {
        self.notify(MapOperation::CancelMotion { motion: motion.0 });
    }

    fn notify(&self, operation: MapOperation) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(operation).await;
        });
    }
}

/// Marker glyph parameters for the engine's div icon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IconSpec {
    pub class_name: String,
    pub size_px: u32,
    pub anchor_px: u32,
}

impl Default for IconSpec {
    fn default() -> Self {
        Self {
            class_name: MARKER_ICON_CLASS.to_string(),
            size_px: MARKER_ICON_SIZE_PX,
            anchor_px: MARKER_ICON_SIZE_PX / 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum MapOperation {
    CreateMarker {
        handle: u32,
        entity_id: String,
        lat: f64,
        lon: f64,
        icon: IconSpec,
        popup: String,
    },
    StyleMarker {
        handle: u32,
        highlighted: bool,
        active: bool,
        z_offset: i32,
    },
    AnimateTo {
        motion: u64,
        lat: f64,
        lon: f64,
        zoom: f64,
        duration_s: f64,
    },
    CancelMotion {
        motion: u64,
    },
}

impl Operation for MapOperation {
    type Output = MapOutput;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MapOutput {
    Ack,
    MotionEnded,
}
