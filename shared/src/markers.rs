//! Marker registry: entity id -> engine marker handle plus its visual state.
//!
//! The registry never talks to the map itself. Every mutation returns the
//! styles that actually changed and the controller forwards them to the
//! `MapView` capability.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{EntityId, LocationEntity};

/// Opaque handle the shell uses to address an engine marker.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u32);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZOrder {
    Elevated,
    #[default]
    Normal,
}

/// Snapshot of one marker's visual state, as sent to the engine.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MarkerStyle {
    pub handle: MarkerHandle,
    pub entity_id: EntityId,
    pub highlighted: bool,
    pub active: bool,
    pub z_order: ZOrder,
}

#[derive(Debug, Clone)]
struct MarkerEntry {
    handle: MarkerHandle,
    entity_id: EntityId,
    highlighted: bool,
    active: bool,
    z_order: ZOrder,
}

impl MarkerEntry {
    fn style(&self) -> MarkerStyle {
        MarkerStyle {
            handle: self.handle,
            entity_id: self.entity_id.clone(),
            highlighted: self.highlighted,
            active: self.active,
            z_order: self.z_order,
        }
    }

    /// Elevated while highlighted or active, normal otherwise.
    fn restack(&mut self) {
        self.z_order = if self.highlighted || self.active {
            ZOrder::Elevated
        } else {
            ZOrder::Normal
        };
    }
}

#[derive(Debug, Clone, Default)]
pub struct MarkerRegistry {
    markers: Vec<MarkerEntry>,
    index: HashMap<EntityId, usize>,
}

impl MarkerRegistry {
    /// Called once per entity during initialization.
    pub fn register(&mut self, entity: &LocationEntity) -> MarkerHandle {
        #[allow(clippy::cast_possible_truncation)]
        let handle = MarkerHandle(self.markers.len() as u32);
        self.index.insert(entity.id.clone(), self.markers.len());
        self.markers.push(MarkerEntry {
            handle,
            entity_id: entity.id.clone(),
            highlighted: false,
            active: false,
            z_order: ZOrder::Normal,
        });
        handle
    }

    pub fn set_highlight(&mut self, id: &EntityId, highlighted: bool) -> Vec<MarkerStyle> {
        let Some(&i) = self.index.get(id) else {
            tracing::debug!(entity_id = %id, "highlight for unregistered marker ignored");
            return Vec::new();
        };

        let entry = &mut self.markers[i];
        let before = (entry.highlighted, entry.z_order);
        entry.highlighted = highlighted;
        entry.restack();

        if before == (entry.highlighted, entry.z_order) {
            Vec::new()
        } else {
            vec![entry.style()]
        }
    }

    /// Activates exactly `id`, or nothing for `None`. An unknown id is a no-op
    /// and leaves the current active marker alone.
    pub fn set_active(&mut self, id: Option<&EntityId>) -> Vec<MarkerStyle> {
        if let Some(id) = id {
            if !self.index.contains_key(id) {
                tracing::debug!(entity_id = %id, "activation of unregistered marker ignored");
                return Vec::new();
            }
        }

        let mut changed = Vec::new();
        for entry in &mut self.markers {
            let active = id == Some(&entry.entity_id);
            let before = (entry.active, entry.z_order);
            entry.active = active;
            entry.restack();
            if before != (entry.active, entry.z_order) {
                changed.push(entry.style());
            }
        }
        changed
    }

    pub fn style(&self, id: &EntityId) -> Option<MarkerStyle> {
        self.index.get(id).map(|&i| self.markers[i].style())
    }

    pub fn styles(&self) -> impl Iterator<Item = MarkerStyle> + '_ {
        self.markers.iter().map(MarkerEntry::style)
    }

    pub fn active(&self) -> Option<&EntityId> {
        self.markers
            .iter()
            .find(|m| m.active)
            .map(|m| &m.entity_id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
