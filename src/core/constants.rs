//! Core constants for vineyard markers and popups.
//! Keeping them in a single place makes it easier to tweak the magic numbers.

/// Half height of the visibility box around the viewport center, in degrees.
pub const VISIBILITY_HALF_LAT: f64 = 0.01;

/// Half width of the visibility box around the viewport center, in degrees.
pub const VISIBILITY_HALF_LNG: f64 = 0.01;

/// Marker fill when the vineyard lies inside the visibility box.
pub const FILL_IN_VIEW: &str = "#618549";

/// Marker fill when the vineyard lies outside the visibility box.
pub const FILL_OUT_OF_VIEW: &str = "#A69C80";

/// Pin anchor relative to the coordinate (left, top) in pixels.
pub const MARKER_OFFSET: (f64, f64) = (-12.0, -40.0);

/// Popup anchor relative to the coordinate (left, top) in pixels.
pub const POPUP_OFFSET: (f64, f64) = (8.0, 0.0);

/// Opacity of a clickable focused marker, and of an info-window marker whose window is closed.
pub const OPACITY_FULL: f32 = 1.0;

/// Opacity of a marker that is neither clickable-and-focused nor carries an info-window.
pub const OPACITY_DIMMED: f32 = 0.6;

/// Opacity of a marker while its own info-window is open.
pub const OPACITY_HIDDEN: f32 = 0.0;

pub const Z_INDEX_FOCUSED: i32 = 2;
pub const Z_INDEX_DEFAULT: i32 = 1;
