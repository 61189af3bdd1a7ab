//! Vineyard records and the ordered catalog the markers are rendered from

use crate::{core::geo::LatLng, MapError, Result};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single vineyard. The name is its unique key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vineyard {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Image reference shown in the popup
    #[serde(default)]
    pub image: String,
    /// Location/description text shown in the popup
    #[serde(default)]
    pub location: String,
}

impl Vineyard {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
            image: String::new(),
            location: String::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Link slug for this vineyard's card, see [`slug`]
    pub fn slug(&self) -> String {
        slug(&self.name)
    }
}

/// Replaces every whitespace run with a single hyphen and lowercases the result.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
        } else {
            out.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }
    out
}

#[derive(Deserialize)]
struct CatalogFile {
    vineyards: Vec<Vineyard>,
}

/// Vineyards in display order, with lookup by name
#[derive(Debug, Clone, Default)]
pub struct VineyardCatalog {
    order: Vec<String>,
    records: FxHashMap<String, Vineyard>,
}

impl VineyardCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vineyard, rejecting duplicate names and out-of-range coordinates
    pub fn insert(&mut self, vineyard: Vineyard) -> Result<()> {
        if !vineyard.position().is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "{}: ({}, {})",
                vineyard.name, vineyard.lat, vineyard.lng
            )));
        }
        if self.records.contains_key(&vineyard.name) {
            return Err(MapError::DuplicateVineyard(vineyard.name));
        }
        self.order.push(vineyard.name.clone());
        self.records.insert(vineyard.name.clone(), vineyard);
        Ok(())
    }

    pub fn from_vineyards(vineyards: impl IntoIterator<Item = Vineyard>) -> Result<Self> {
        let mut catalog = Self::new();
        for vineyard in vineyards {
            catalog.insert(vineyard)?;
        }
        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let catalog = Self::from_vineyards(file.vineyards)?;
        log::debug!("loaded catalog with {} vineyards", catalog.len());
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Vineyard names in display order
    pub fn keys(&self) -> &[String] {
        &self.order
    }

    pub fn get(&self, name: &str) -> Option<&Vineyard> {
        self.records.get(name)
    }

    /// Like [`get`](Self::get), for callers that treat a miss as an error
    pub fn require(&self, name: &str) -> Result<&Vineyard> {
        self.get(name)
            .ok_or_else(|| MapError::UnknownVineyard(name.to_string()))
    }

    /// The key-to-record mapping, as consumed by the list renderer
    pub fn records(&self) -> &FxHashMap<String, Vineyard> {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vineyard> {
        self.order.iter().filter_map(|name| self.records.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
