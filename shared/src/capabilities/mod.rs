mod drawer;
mod map;

pub use self::drawer::{Drawer, DrawerOperation, DrawerOutput};
pub use self::map::{IconSpec, MapOperation, MapOutput, MapView};

// Crux's built-in Render covers view updates; map and drawer are ours.
pub use crux_core::render::Render;

use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub render: Render<Event>,
    pub map: MapView<Event>,
    pub drawer: Drawer<Event>,
}
