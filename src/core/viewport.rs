use crate::core::geo::LatLng;
use crate::traits::ViewportSink;
use serde::{Deserialize, Serialize};

/// The current view of the map, represented by its center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
}

impl Viewport {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            center: LatLng::new(latitude, longitude),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.center.lat
    }

    pub fn longitude(&self) -> f64 {
        self.center.lng
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<LatLng> for Viewport {
    fn from(center: LatLng) -> Self {
        Self { center }
    }
}

/// A viewport is the simplest owner of the map center: it just records it
impl ViewportSink for Viewport {
    fn change_map_center(&mut self, lat: f64, lng: f64) {
        self.center = LatLng::new(lat, lng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_accessors() {
        let viewport = Viewport::new(38.29, -122.45);
        assert_eq!(viewport.latitude(), 38.29);
        assert_eq!(viewport.longitude(), -122.45);
    }

    #[test]
    fn test_change_map_center() {
        let mut viewport = Viewport::default();
        viewport.change_map_center(1.5, 2.5);
        assert_eq!(viewport.center, LatLng::new(1.5, 2.5));
    }
}
