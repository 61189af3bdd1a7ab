//! # vinemap
//!
//! Vineyard markers for two map providers.
//!
//! The crate turns a vineyard catalog plus the current viewport into marker
//! render trees: list-style pins colored by whether they sit near the map
//! center, and stateful provider-2 markers with click-driven info-windows.
//! A single [`PopupOwner`] decides which popup is open; markers only ask.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{MarkerConfig, MarkerProfile},
    geo::{LatLng, LatLngBounds, Point},
    map::{MapOptions, VineyardMap},
    viewport::Viewport,
    visibility::{check_coord, VisibilityBox},
};

pub use crate::data::vineyard::{slug, Vineyard, VineyardCatalog};

pub use crate::layers::{
    custom_marker::{CustomMarker, CustomMarkerNode, CustomMarkerProps, MarkerIcons},
    marker::{render_markers, MarkerFill, MarkerLayer, MarkerLayerInput, MarkerNode},
};

pub use crate::input::events::{EventHandled, MarkerClickEvent, MarkerEvent};

pub use crate::ui::{elements::ElementRegistry, popup::PopupOwner};

/// Installs an env_logger backend for the `log` macros used throughout the crate.
/// Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::builder().format_timestamp_millis().try_init();
}

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Duplicate vineyard: {0}")]
    DuplicateVineyard(String),

    #[error("Unknown vineyard: {0}")]
    UnknownVineyard(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;
