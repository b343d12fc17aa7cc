use geojson::{feature::Id, Feature, GeoJson, Value};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::model::{CoordinateError, EntityId, LatLon, LocationEntity};
use crate::ExplorerError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate entity id: {0}")]
    DuplicateId(EntityId),

    #[error("entity at position {index} has an empty id")]
    EmptyId { index: usize },

    #[error("entity {id} has invalid coordinates: {source}")]
    InvalidCoordinate {
        id: EntityId,
        #[source]
        source: CoordinateError,
    },

    #[error("entity json is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("geojson is malformed: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("feature at position {index} is missing `{property}`")]
    MissingProperty {
        index: usize,
        property: &'static str,
    },

    #[error("feature at position {index} is not a point")]
    UnsupportedGeometry { index: usize },
}

/// Where the initial entity list comes from. The core never fetches it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum EntitySource {
    Inline(Vec<LocationEntity>),
    Json(String),
    GeoJson(String),
}

impl EntitySource {
    pub fn load(self) -> Result<EntityStore, StoreError> {
        match self {
            Self::Inline(entities) => EntityStore::new(entities),
            Self::Json(json) => EntityStore::from_json_str(&json),
            Self::GeoJson(geojson) => EntityStore::from_geojson_str(&geojson),
        }
    }
}

/// Wire shape of the bundled location data: `coords` is `[lat, lon]`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntity {
    id: String,
    name: String,
    coords: [f64; 2],
    #[serde(default)]
    description: String,
    #[serde(default)]
    image_url: String,
}

/// Immutable, ordered entity list. Order is the list-panel order.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: Vec<LocationEntity>,
    index: HashMap<EntityId, usize>,
}

impl EntityStore {
    pub fn new(entities: Vec<LocationEntity>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(entities.len());
        for (index, entity) in entities.iter().enumerate() {
            if entity.id.as_str().trim().is_empty() {
                return Err(StoreError::EmptyId { index });
            }
            if !seen.insert(&entity.id) {
                return Err(StoreError::DuplicateId(entity.id.clone()));
            }
            entity
                .coords
                .validate()
                .map_err(|source| StoreError::InvalidCoordinate {
                    id: entity.id.clone(),
                    source,
                })?;
        }

        let index = entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();

        Ok(Self { entities, index })
    }

    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let raw: Vec<RawEntity> = serde_json::from_str(json)?;
        let entities = raw
            .into_iter()
            .map(|r| LocationEntity {
                id: EntityId::new(r.id),
                name: r.name,
                coords: LatLon {
                    lat: r.coords[0],
                    lon: r.coords[1],
                },
                description: r.description,
                image_url: r.image_url,
            })
            .collect();
        Self::new(entities)
    }

    /// Point features only. GeoJSON positions are `[lon, lat]`.
    pub fn from_geojson_str(geojson: &str) -> Result<Self, StoreError> {
        let features = match geojson.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(collection) => collection.features,
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::Geometry(_) => return Err(StoreError::UnsupportedGeometry { index: 0 }),
        };

        let entities = features
            .iter()
            .enumerate()
            .map(|(index, feature)| entity_from_feature(index, feature))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entities)
    }

    pub fn all(&self) -> &[LocationEntity] {
        &self.entities
    }

    pub fn find(&self, id: &EntityId) -> Result<&LocationEntity, ExplorerError> {
        self.index
            .get(id)
            .map(|&i| &self.entities[i])
            .ok_or_else(|| ExplorerError::UnknownEntity(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

fn entity_from_feature(index: usize, feature: &Feature) -> Result<LocationEntity, StoreError> {
    let coords = match feature.geometry.as_ref().map(|g| &g.value) {
        Some(Value::Point(position)) if position.len() >= 2 => LatLon {
            lat: position[1],
            lon: position[0],
        },
        _ => return Err(StoreError::UnsupportedGeometry { index }),
    };

    let id = match &feature.id {
        Some(Id::String(s)) => s.clone(),
        Some(Id::Number(n)) => n.to_string(),
        None => string_property(feature, "id").ok_or(StoreError::MissingProperty {
            index,
            property: "id",
        })?,
    };

    let name = string_property(feature, "name").ok_or(StoreError::MissingProperty {
        index,
        property: "name",
    })?;

    Ok(LocationEntity {
        id: EntityId::new(id),
        name,
        coords,
        description: string_property(feature, "description").unwrap_or_default(),
        image_url: string_property(feature, "imageUrl").unwrap_or_default(),
    })
}

fn string_property(feature: &Feature, key: &str) -> Option<String> {
    feature
        .property(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}
