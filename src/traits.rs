//! Shared trait abstractions for the outward-facing callbacks
//!
//! Markers never own map, viewport or page state. They reach it through
//! these seams, which the host container (or a test double) implements.

use crate::core::geo::LatLng;

/// Owner of the map's center coordinate.
/// Receives the new center after a marker pans the map.
pub trait ViewportSink {
    fn change_map_center(&mut self, lat: f64, lng: f64);
}

/// The provider map widget, as far as markers are concerned
pub trait MapSurface {
    /// Animate the view so `position` becomes the center
    fn pan_to(&mut self, position: LatLng);
}

/// A page element that can be brought into view, e.g. a vineyard card
pub trait ScrollIntoView {
    fn scroll_into_view(&mut self);
}
