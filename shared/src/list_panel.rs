use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{EntityId, LocationEntity};

pub const SELECTED_CLASS: &str = "selected";
pub const HIGHLIGHTED_CLASS: &str = "highlighted";

/// `KeyboardEvent.key` values that activate a focused row. The shell's
/// keydown handler calls `preventDefault` for these before dispatching.
pub const ACTIVATION_KEYS: [&str; 3] = ["Enter", " ", "Spacebar"];

/// Keys a focused row reacts to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum RowKey {
    Enter,
    Space,
    Other(String),
}

impl RowKey {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            other => Self::Other(other.to_string()),
        }
    }

    /// Enter and Space behave like a click and suppress the browser's
    /// default scroll.
    pub fn action(&self) -> KeyAction {
        match self {
            Self::Enter | Self::Space => KeyAction {
                activate: true,
                prevent_default: true,
            },
            Self::Other(_) => KeyAction::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyAction {
    pub activate: bool,
    pub prevent_default: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ListRow {
    pub id: EntityId,
    pub label: String,
    pub selected: bool,
    pub highlighted: bool,
}

impl ListRow {
    pub fn class_list(&self) -> Vec<String> {
        let mut classes = Vec::new();
        if self.selected {
            classes.push(SELECTED_CLASS.to_string());
        }
        if self.highlighted {
            classes.push(HIGHLIGHTED_CLASS.to_string());
        }
        classes
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListPanel {
    enabled: bool,
    rows: Vec<ListRow>,
    index: HashMap<EntityId, usize>,
}

impl ListPanel {
    /// A panel whose host container exists. `Default` is the disabled panel.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn render(&mut self, entities: &[LocationEntity]) {
        if !self.enabled {
            return;
        }
        self.rows = entities
            .iter()
            .map(|e| ListRow {
                id: e.id.clone(),
                label: e.name.clone(),
                selected: false,
                highlighted: false,
            })
            .collect();
        self.index = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.id.clone(), i))
            .collect();
    }

    pub fn set_active_row(&mut self, id: Option<&EntityId>) {
        for row in &mut self.rows {
            row.selected = id == Some(&row.id);
        }
    }

    pub fn set_highlighted_row(&mut self, id: &EntityId, highlighted: bool) {
        if let Some(&i) = self.index.get(id) {
            self.rows[i].highlighted = highlighted;
        }
    }

    pub fn row(&self, id: &EntityId) -> Option<&ListRow> {
        self.index.get(id).map(|&i| &self.rows[i])
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn selected(&self) -> Option<&EntityId> {
        self.rows.iter().find(|r| r.selected).map(|r| &r.id)
    }
}
