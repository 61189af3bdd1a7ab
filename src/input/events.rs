use crate::core::geo::{LatLng, Point};
use serde::{Deserialize, Serialize};

/// Payload of a click on a provider marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerClickEvent {
    /// Geographic position reported by the provider for the click
    pub lat_lng: LatLng,
    /// Screen position of the click, when the provider reports one
    pub pixel: Option<Point>,
}

impl MarkerClickEvent {
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            lat_lng: LatLng::new(lat, lng),
            pixel: None,
        }
    }

    pub fn with_pixel(mut self, pixel: Point) -> Self {
        self.pixel = Some(pixel);
        self
    }

    pub fn lat(&self) -> f64 {
        self.lat_lng.lat
    }

    pub fn lng(&self) -> f64 {
        self.lat_lng.lng
    }
}

/// Events the host container routes to its markers
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerEvent {
    /// A provider-2 marker was clicked
    Click {
        key: String,
        event: MarkerClickEvent,
    },
    /// The close button of a provider-2 info-window was pressed
    CloseInfoWindow { key: String },
    /// A list-variant pin was clicked
    PinClick { key: String },
    /// The list-variant popup was dismissed
    ClosePopup,
}

impl MarkerEvent {
    /// Vineyard the event targets, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            MarkerEvent::Click { key, .. }
            | MarkerEvent::CloseInfoWindow { key }
            | MarkerEvent::PinClick { key } => Some(key),
            MarkerEvent::ClosePopup => None,
        }
    }
}

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_accessors() {
        let event = MarkerClickEvent::at(38.3, -122.3).with_pixel(Point::new(10.0, 20.0));
        assert_eq!(event.lat(), 38.3);
        assert_eq!(event.lng(), -122.3);
        assert_eq!(event.pixel, Some(Point::new(10.0, 20.0)));
    }

    #[test]
    fn test_event_key() {
        let click = MarkerEvent::Click {
            key: "Opus".to_string(),
            event: MarkerClickEvent::at(0.0, 0.0),
        };
        assert_eq!(click.key(), Some("Opus"));
        assert_eq!(MarkerEvent::ClosePopup.key(), None);
    }
}
