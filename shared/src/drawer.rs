use serde::{Deserialize, Serialize};

use crate::model::{EntityId, LocationEntity};
use crate::HostElement;

pub const BACK_LABEL: &str = "← Back to list";

/// Which host elements the shell found before initialization.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostElements {
    pub drawer: bool,
    pub list: bool,
    pub detail: bool,
    pub close_button: bool,
}

impl Default for HostElements {
    fn default() -> Self {
        Self::all()
    }
}

impl HostElements {
    pub const fn all() -> Self {
        Self {
            drawer: true,
            list: true,
            detail: true,
            close_button: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            drawer: false,
            list: false,
            detail: false,
            close_button: false,
        }
    }

    pub fn missing(&self) -> Vec<HostElement> {
        [
            (self.drawer, HostElement::Drawer),
            (self.list, HostElement::List),
            (self.detail, HostElement::Detail),
            (self.close_button, HostElement::CloseButton),
        ]
        .into_iter()
        .filter_map(|(present, element)| (!present).then_some(element))
        .collect()
    }

    /// The pane swap needs both panes to exist.
    pub const fn can_swap_panes(&self) -> bool {
        self.list && self.detail
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Pane {
    #[default]
    List,
    Detail,
}

/// Hero image, title, description and back affordance for one entity.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DetailContent {
    pub entity_id: EntityId,
    pub title: String,
    pub image_src: String,
    pub image_alt: String,
    pub description: String,
    pub back_label: String,
}

impl From<&LocationEntity> for DetailContent {
    fn from(entity: &LocationEntity) -> Self {
        Self {
            entity_id: entity.id.clone(),
            title: entity.name.clone(),
            image_src: entity.image_url.clone(),
            image_alt: entity.name.clone(),
            description: entity.description.clone(),
            back_label: BACK_LABEL.to_string(),
        }
    }
}

/// Expand/collapse container hosting the list and detail panes.
#[derive(Debug, Clone, Default)]
pub struct DrawerShell {
    elements: HostElements,
    expanded: bool,
    detail: Option<DetailContent>,
}

impl DrawerShell {
    pub fn new(elements: HostElements) -> Self {
        Self {
            elements,
            expanded: false,
            detail: None,
        }
    }

    pub fn elements(&self) -> HostElements {
        self.elements
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Returns whether the host must be told; false when already expanded
    /// or when there is no drawer element.
    pub fn expand(&mut self) -> bool {
        if !self.elements.drawer || self.expanded {
            return false;
        }
        self.expanded = true;
        true
    }

    /// Returns whether a collapse animation will run.
    pub fn collapse(&mut self) -> bool {
        self.expanded = false;
        self.elements.drawer
    }

    /// Replaces the detail pane content. No-op without a detail element.
    pub fn set_detail(&mut self, content: DetailContent) {
        if self.elements.detail {
            self.detail = Some(content);
        }
    }

    pub fn clear_detail(&mut self) {
        self.detail = None;
    }

    pub fn detail(&self) -> Option<&DetailContent> {
        self.detail.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LatLon;

    fn wave_rock() -> LocationEntity {
        LocationEntity::new("1", "Wave Rock", LatLon { lat: -32.4, lon: 118.9 }, "Granite", "a.jpg")
    }

    #[test]
    fn detail_content_mirrors_entity() {
        let content = DetailContent::from(&wave_rock());
        assert_eq!(content.title, "Wave Rock");
        assert_eq!(content.image_src, "a.jpg");
        assert_eq!(content.image_alt, "Wave Rock");
        assert_eq!(content.description, "Granite");
    }

    #[test]
    fn expand_reports_only_real_changes() {
        let mut drawer = DrawerShell::new(HostElements::all());
        assert!(drawer.expand());
        assert!(!drawer.expand());
        assert!(drawer.collapse());
        assert!(!drawer.is_expanded());
    }

    #[test]
    fn missing_elements_degrade() {
        let mut elements = HostElements::all();
        elements.drawer = false;
        elements.detail = false;
        let mut drawer = DrawerShell::new(elements);

        assert!(!drawer.expand());
        assert!(!drawer.collapse());
        drawer.set_detail(DetailContent::from(&wave_rock()));
        assert!(drawer.detail().is_none());
        assert!(!elements.can_swap_panes());
        assert_eq!(elements.missing(), [HostElement::Drawer, HostElement::Detail]);
    }
}
