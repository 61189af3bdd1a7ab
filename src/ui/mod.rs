pub mod elements;
pub mod popup;

#[cfg(feature = "egui")]
pub mod painter;
#[cfg(feature = "egui")]
pub mod style;

pub use elements::ElementRegistry;

pub use popup::{PopupContent, PopupEvent, PopupNode, PopupOwner};

#[cfg(feature = "egui")]
pub use painter::{hit_test, HitArea, MarkerPainter};

#[cfg(feature = "egui")]
pub use style::{MarkerStyle, PopupStyle};
