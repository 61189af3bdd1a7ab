//! Prelude module for common vinemap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use vinemap::prelude::*;`

pub use crate::core::{
    config::{MarkerConfig, MarkerProfile},
    geo::{LatLng, LatLngBounds, Point},
    map::{MapOptions, VineyardMap},
    viewport::Viewport,
    visibility::{check_coord, VisibilityBox},
};

pub use crate::data::vineyard::{slug, Vineyard, VineyardCatalog};

pub use crate::layers::{
    custom_marker::{
        CustomMarker, CustomMarkerNode, CustomMarkerProps, InfoWindowNode, MarkerContext,
        MarkerIcons,
    },
    marker::{render_markers, MarkerFill, MarkerLayer, MarkerLayerInput, MarkerNode},
};

pub use crate::input::events::{EventHandled, MarkerClickEvent, MarkerEvent};

pub use crate::traits::{MapSurface, ScrollIntoView, ViewportSink};

pub use crate::ui::{
    elements::ElementRegistry,
    popup::{PopupContent, PopupEvent, PopupNode, PopupOwner},
};

#[cfg(feature = "egui")]
pub use crate::ui::{
    painter::{hit_test, HitArea, MarkerPainter},
    style::{MarkerStyle, PopupStyle},
};

pub use crate::{Error as MapError, Result};
