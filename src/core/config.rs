//! Configuration for marker styling and the visibility box
//!
//! Presets are exposed through [`MarkerProfile`], mirroring how the map is
//! tuned elsewhere: pick a named profile or supply a custom [`MarkerConfig`].
//! Configs can also be read from JSON, with every field optional.

use crate::{
    core::{constants, geo::Point},
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerProfile {
    /// Tight box matching a street-level zoom
    Default,
    /// Larger box for region-level browsing
    Wide,
    Custom(MarkerConfig),
}

impl MarkerProfile {
    pub fn resolve(&self) -> MarkerConfig {
        match self {
            Self::Default => MarkerConfig::default(),
            Self::Wide => MarkerConfig {
                visibility_half_lat: 0.05,
                visibility_half_lng: 0.05,
                ..MarkerConfig::default()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for MarkerProfile {
    fn default() -> Self {
        Self::Default
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Half height of the visibility box in degrees
    pub visibility_half_lat: f64,
    /// Half width of the visibility box in degrees
    pub visibility_half_lng: f64,
    pub fill_in_view: String,
    pub fill_out_of_view: String,
    pub marker_offset: Point,
    pub popup_offset: Point,
    pub opacity_full: f32,
    pub opacity_dimmed: f32,
    /// Opacity of a marker while its own info-window is open
    pub opacity_hidden: f32,
    pub z_index_focused: i32,
    pub z_index_default: i32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            visibility_half_lat: constants::VISIBILITY_HALF_LAT,
            visibility_half_lng: constants::VISIBILITY_HALF_LNG,
            fill_in_view: constants::FILL_IN_VIEW.to_string(),
            fill_out_of_view: constants::FILL_OUT_OF_VIEW.to_string(),
            marker_offset: Point::new(constants::MARKER_OFFSET.0, constants::MARKER_OFFSET.1),
            popup_offset: Point::new(constants::POPUP_OFFSET.0, constants::POPUP_OFFSET.1),
            opacity_full: constants::OPACITY_FULL,
            opacity_dimmed: constants::OPACITY_DIMMED,
            opacity_hidden: constants::OPACITY_HIDDEN,
            z_index_focused: constants::Z_INDEX_FOCUSED,
            z_index_default: constants::Z_INDEX_DEFAULT,
        }
    }
}

impl MarkerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("visibility_half_lat", self.visibility_half_lat),
            ("visibility_half_lng", self.visibility_half_lng),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MapError::Config(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("opacity_full", self.opacity_full),
            ("opacity_dimmed", self.opacity_dimmed),
            ("opacity_hidden", self.opacity_hidden),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MapError::Config(format!(
                    "{} must be within 0.0..=1.0, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("fill_in_view", &self.fill_in_view),
            ("fill_out_of_view", &self.fill_out_of_view),
        ] {
            if parse_hex_color(value).is_none() {
                return Err(MapError::Config(format!(
                    "{} is not a #RRGGBB color: {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Parses a `#RRGGBB` string into its components.
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
