//! Bounding-box visibility: an approximate "is this point on screen" test
//! using a fixed-size box around the viewport center instead of projection math.

use crate::core::{
    config::MarkerConfig,
    constants,
    geo::{LatLng, LatLngBounds},
};

/// Returns true iff the marker lies inside the default visibility box
/// centered on the viewport coordinate. NaN input yields false.
pub fn check_coord(viewport_lat: f64, viewport_lng: f64, marker_lat: f64, marker_lng: f64) -> bool {
    VisibilityBox::default().contains(
        LatLng::new(viewport_lat, viewport_lng),
        LatLng::new(marker_lat, marker_lng),
    )
}

/// Half extents of the box used by [`check_coord`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityBox {
    pub half_lat: f64,
    pub half_lng: f64,
}

impl VisibilityBox {
    pub fn new(half_lat: f64, half_lng: f64) -> Self {
        Self { half_lat, half_lng }
    }

    pub fn from_config(config: &MarkerConfig) -> Self {
        Self::new(config.visibility_half_lat, config.visibility_half_lng)
    }

    /// Absolute differences keep the check symmetric in its two points;
    /// any NaN makes both comparisons false.
    pub fn contains(&self, viewport: LatLng, marker: LatLng) -> bool {
        (viewport.lat - marker.lat).abs() <= self.half_lat
            && (viewport.lng - marker.lng).abs() <= self.half_lng
    }

    /// The box as geographic bounds around `center`
    pub fn bounds(&self, center: LatLng) -> LatLngBounds {
        LatLngBounds::around(center, self.half_lat, self.half_lng)
    }
}

impl Default for VisibilityBox {
    fn default() -> Self {
        Self::new(constants::VISIBILITY_HALF_LAT, constants::VISIBILITY_HALF_LNG)
    }
}
