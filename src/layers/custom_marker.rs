//! Provider-2 marker: icon swaps on focus, a click-driven info-window, and an
//! optional scroll effect that pans the map and brings the vineyard card into view.
//!
//! The marker keeps a local "my window is open" flag but never writes the
//! shared popup state itself; it goes through [`PopupOwner`].

use crate::{
    core::{config::MarkerConfig, geo::LatLng},
    input::events::{EventHandled, MarkerClickEvent},
    traits::{MapSurface, ScrollIntoView, ViewportSink},
    ui::{elements::ElementRegistry, popup::PopupContent, popup::PopupOwner},
};
use serde::{Deserialize, Serialize};

/// Icon URLs for the two focus states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerIcons {
    pub on: String,
    pub off: String,
}

impl MarkerIcons {
    pub fn new(on: impl Into<String>, off: impl Into<String>) -> Self {
        Self {
            on: on.into(),
            off: off.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomMarkerProps {
    pub position: LatLng,
    /// Display text; also the key for popup ownership and card lookup
    pub text: String,
    pub icons: MarkerIcons,
    pub is_focused: bool,
    pub is_clickable: bool,
    pub has_scroll_effect: bool,
    /// Content of the info-window; `None` means the marker has no info-window
    pub info_window: Option<PopupContent>,
}

impl CustomMarkerProps {
    pub fn new(text: impl Into<String>, position: LatLng, icons: MarkerIcons) -> Self {
        Self {
            position,
            text: text.into(),
            icons,
            is_focused: false,
            is_clickable: false,
            has_scroll_effect: false,
            info_window: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.is_focused = focused;
        self
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.is_clickable = clickable;
        self
    }

    pub fn scroll_effect(mut self, enabled: bool) -> Self {
        self.has_scroll_effect = enabled;
        self
    }

    pub fn with_info_window(mut self, content: PopupContent) -> Self {
        self.info_window = Some(content);
        self
    }

    pub fn has_info_window(&self) -> bool {
        self.info_window.is_some()
    }
}

/// Open info-window attached to a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoWindowNode {
    pub position: LatLng,
    pub content: PopupContent,
}

/// Render output of a [`CustomMarker`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomMarkerNode {
    pub key: String,
    pub position: LatLng,
    pub icon: String,
    pub clickable: bool,
    pub z_index: i32,
    pub opacity: f32,
    pub info_window: Option<InfoWindowNode>,
}

/// Collaborators a marker may call out to while handling a click
pub struct MarkerContext<'a, M, V, H> {
    pub popups: &'a mut PopupOwner<String>,
    pub map: &'a mut M,
    pub viewport: &'a mut V,
    pub elements: &'a mut ElementRegistry<H>,
}

#[derive(Debug, Clone)]
pub struct CustomMarker {
    props: CustomMarkerProps,
    config: MarkerConfig,
    info_window_open: bool,
}

impl CustomMarker {
    pub fn new(props: CustomMarkerProps) -> Self {
        Self::with_config(props, MarkerConfig::default())
    }

    pub fn with_config(props: CustomMarkerProps, config: MarkerConfig) -> Self {
        Self {
            props,
            config,
            info_window_open: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.props.text
    }

    pub fn props(&self) -> &CustomMarkerProps {
        &self.props
    }

    /// Replaces props on re-render; the local window flag survives
    pub fn set_props(&mut self, props: CustomMarkerProps) {
        self.props = props;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.props.is_focused = focused;
    }

    pub fn is_info_window_open(&self) -> bool {
        self.info_window_open
    }

    pub fn icon(&self) -> &str {
        if self.props.is_focused {
            &self.props.icons.on
        } else {
            &self.props.icons.off
        }
    }

    pub fn z_index(&self) -> i32 {
        if self.props.is_focused {
            self.config.z_index_focused
        } else {
            self.config.z_index_default
        }
    }

    /// The info-window branch wins over clickable-and-focused.
    pub fn opacity(&self) -> f32 {
        if self.props.has_info_window() {
            if self.info_window_open {
                self.config.opacity_hidden
            } else {
                self.config.opacity_full
            }
        } else if self.props.is_clickable && self.props.is_focused {
            self.config.opacity_full
        } else {
            self.config.opacity_dimmed
        }
    }

    pub fn render(&self) -> CustomMarkerNode {
        let info_window = match (&self.props.info_window, self.info_window_open) {
            (Some(content), true) => Some(InfoWindowNode {
                position: self.props.position,
                content: content.clone(),
            }),
            _ => None,
        };

        CustomMarkerNode {
            key: self.props.text.clone(),
            position: self.props.position,
            icon: self.icon().to_string(),
            clickable: self.props.is_clickable,
            z_index: self.z_index(),
            opacity: self.opacity(),
            info_window,
        }
    }

    /// Handles a click on this marker. Non-clickable markers ignore it.
    pub fn on_click<M, V, H>(
        &mut self,
        event: &MarkerClickEvent,
        ctx: &mut MarkerContext<'_, M, V, H>,
    ) -> EventHandled
    where
        M: MapSurface,
        V: ViewportSink,
        H: ScrollIntoView,
    {
        if !self.props.is_clickable {
            return EventHandled::NotHandled;
        }

        let (lat, lng) = (event.lat(), event.lng());
        log::debug!("marker clicked: {} ({}, {})", self.props.text, lat, lng);

        if self.props.has_info_window() && !ctx.popups.is_open() && !self.info_window_open {
            ctx.popups.request_open(self.props.text.clone());
            self.info_window_open = true;
        }

        if self.props.has_scroll_effect {
            ctx.map.pan_to(LatLng::new(lat, lng));
            ctx.viewport.change_map_center(lat, lng);
            ctx.elements.scroll_to(&self.props.text);
        }

        EventHandled::Handled
    }

    /// Closes this marker's info-window in the owner and locally, together.
    pub fn close_info_window(&mut self, popups: &mut PopupOwner<String>) {
        if popups.is_open_for(&self.props.text) {
            popups.request_close();
        }
        self.info_window_open = false;
    }

    /// Drops a local open flag the owner no longer agrees with
    pub fn reconcile(&mut self, popups: &PopupOwner<String>) {
        if self.info_window_open && !popups.is_open_for(&self.props.text) {
            log::debug!("info-window for {} closed by owner", self.props.text);
            self.info_window_open = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::viewport::Viewport;
    use crate::ui::popup::PopupEvent;

    #[derive(Default)]
    struct RecordingMap {
        pans: Vec<LatLng>,
    }

    impl MapSurface for RecordingMap {
        fn pan_to(&mut self, position: LatLng) {
            self.pans.push(position);
        }
    }

    #[derive(Default)]
    struct Card {
        scrolled: usize,
    }

    impl ScrollIntoView for Card {
        fn scroll_into_view(&mut self) {
            self.scrolled += 1;
        }
    }

    fn content(name: &str) -> PopupContent {
        PopupContent {
            image: String::new(),
            region: name.to_string(),
            link: name.to_lowercase(),
            description: String::new(),
        }
    }

    fn props(name: &str) -> CustomMarkerProps {
        CustomMarkerProps::new(name, LatLng::new(38.5, -122.4), MarkerIcons::new("on.svg", "off.svg"))
    }

    #[test]
    fn test_icon_and_z_index_follow_focus() {
        let focused = CustomMarker::new(props("A").focused(true));
        assert_eq!(focused.icon(), "on.svg");
        assert_eq!(focused.z_index(), 2);

        let unfocused = CustomMarker::new(props("A"));
        assert_eq!(unfocused.icon(), "off.svg");
        assert_eq!(unfocused.z_index(), 1);
    }

    #[test]
    fn test_opacity_without_info_window() {
        assert_eq!(CustomMarker::new(props("A").clickable(true).focused(true)).opacity(), 1.0);
        assert_eq!(CustomMarker::new(props("A").clickable(true)).opacity(), 0.6);
        assert_eq!(CustomMarker::new(props("A").focused(true)).opacity(), 0.6);
    }

    #[test]
    fn test_opacity_info_window_branch_wins() {
        let mut popups = PopupOwner::new();
        let mut map = RecordingMap::default();
        let mut viewport = Viewport::default();
        let mut elements: ElementRegistry<Card> = ElementRegistry::new();

        // Not clickable, not focused, but has an info-window: full opacity.
        let marker = CustomMarker::new(props("A").with_info_window(content("A")));
        assert_eq!(marker.opacity(), 1.0);

        let mut marker = CustomMarker::new(props("A").clickable(true).with_info_window(content("A")));
        let mut ctx = MarkerContext {
            popups: &mut popups,
            map: &mut map,
            viewport: &mut viewport,
            elements: &mut elements,
        };
        marker.on_click(&MarkerClickEvent::at(38.5, -122.4), &mut ctx);
        assert_eq!(marker.opacity(), 0.0);
        assert!(marker.render().info_window.is_some());
    }

    #[test]
    fn test_open_window_uses_configured_opacity() {
        let mut popups = PopupOwner::new();
        let mut map = RecordingMap::default();
        let mut viewport = Viewport::default();
        let mut elements: ElementRegistry<Card> = ElementRegistry::new();

        let config = MarkerConfig {
            opacity_hidden: 0.2,
            ..MarkerConfig::default()
        };
        let mut marker = CustomMarker::with_config(
            props("A").clickable(true).with_info_window(content("A")),
            config,
        );
        let mut ctx = MarkerContext {
            popups: &mut popups,
            map: &mut map,
            viewport: &mut viewport,
            elements: &mut elements,
        };
        marker.on_click(&MarkerClickEvent::at(38.5, -122.4), &mut ctx);
        assert_eq!(marker.opacity(), 0.2);
        assert_eq!(marker.render().opacity, 0.2);
    }

    #[test]
    fn test_non_clickable_click_is_noop() {
        let mut popups = PopupOwner::new();
        let mut map = RecordingMap::default();
        let mut viewport = Viewport::new(1.0, 1.0);
        let mut elements = ElementRegistry::new();
        elements.register("A", Card::default());

        let mut marker = CustomMarker::new(
            props("A").scroll_effect(true).with_info_window(content("A")),
        );
        let mut ctx = MarkerContext {
            popups: &mut popups,
            map: &mut map,
            viewport: &mut viewport,
            elements: &mut elements,
        };
        let handled = marker.on_click(&MarkerClickEvent::at(38.5, -122.4), &mut ctx);

        assert_eq!(handled, EventHandled::NotHandled);
        assert!(!marker.is_info_window_open());
        assert!(popups.events().is_empty());
        assert!(map.pans.is_empty());
        assert_eq!(viewport, Viewport::new(1.0, 1.0));
        assert_eq!(elements.get("A").unwrap().scrolled, 0);
    }

    #[test]
    fn test_scroll_effect_pans_and_scrolls() {
        let mut popups = PopupOwner::new();
        let mut map = RecordingMap::default();
        let mut viewport = Viewport::default();
        let mut elements = ElementRegistry::new();
        elements.register("A", Card::default());

        let mut marker = CustomMarker::new(props("A").clickable(true).scroll_effect(true));
        let mut ctx = MarkerContext {
            popups: &mut popups,
            map: &mut map,
            viewport: &mut viewport,
            elements: &mut elements,
        };
        marker.on_click(&MarkerClickEvent::at(38.51, -122.41), &mut ctx);

        assert_eq!(map.pans, vec![LatLng::new(38.51, -122.41)]);
        assert_eq!(viewport.center, LatLng::new(38.51, -122.41));
        assert_eq!(elements.get("A").unwrap().scrolled, 1);
        // No info-window, so the owner is untouched.
        assert!(popups.events().is_empty());
    }

    #[test]
    fn test_scroll_effect_without_card_still_pans() {
        let mut popups = PopupOwner::new();
        let mut map = RecordingMap::default();
        let mut viewport = Viewport::default();
        let mut elements: ElementRegistry<Card> = ElementRegistry::new();

        let mut marker = CustomMarker::new(props("A").clickable(true).scroll_effect(true));
        let mut ctx = MarkerContext {
            popups: &mut popups,
            map: &mut map,
            viewport: &mut viewport,
            elements: &mut elements,
        };
        assert_eq!(
            marker.on_click(&MarkerClickEvent::at(1.0, 2.0), &mut ctx),
            EventHandled::Handled
        );
        assert_eq!(map.pans.len(), 1);
    }

    #[test]
    fn test_second_window_waits_for_close() {
        let mut popups = PopupOwner::new();
        let mut map = RecordingMap::default();
        let mut viewport = Viewport::default();
        let mut elements: ElementRegistry<Card> = ElementRegistry::new();

        let mut a = CustomMarker::new(props("A").clickable(true).with_info_window(content("A")));
        let mut b = CustomMarker::new(props("B").clickable(true).with_info_window(content("B")));
        let click = MarkerClickEvent::at(38.5, -122.4);

        {
            let mut ctx = MarkerContext {
                popups: &mut popups,
                map: &mut map,
                viewport: &mut viewport,
                elements: &mut elements,
            };
            b.on_click(&click, &mut ctx);
            a.on_click(&click, &mut ctx);
        }
        assert!(b.is_info_window_open());
        assert!(!a.is_info_window_open());

        b.close_info_window(&mut popups);
        assert!(!b.is_info_window_open());
        assert!(!popups.is_open());

        {
            let mut ctx = MarkerContext {
                popups: &mut popups,
                map: &mut map,
                viewport: &mut viewport,
                elements: &mut elements,
            };
            a.on_click(&click, &mut ctx);
        }
        assert!(a.is_info_window_open());
        assert_eq!(
            popups.events(),
            [
                PopupEvent::Opened("B".to_string()),
                PopupEvent::Closed("B".to_string()),
                PopupEvent::Opened("A".to_string()),
            ]
        );
    }

    #[test]
    fn test_close_leaves_other_owner_key_alone() {
        let mut popups = PopupOwner::new();
        popups.request_open("B".to_string());

        let mut a = CustomMarker::new(props("A").with_info_window(content("A")));
        a.close_info_window(&mut popups);
        assert!(popups.is_open_for(&"B".to_string()));
    }

    #[test]
    fn test_reconcile_clears_stale_flag() {
        let mut popups = PopupOwner::new();
        let mut map = RecordingMap::default();
        let mut viewport = Viewport::default();
        let mut elements: ElementRegistry<Card> = ElementRegistry::new();

        let mut a = CustomMarker::new(props("A").clickable(true).with_info_window(content("A")));
        let mut ctx = MarkerContext {
            popups: &mut popups,
            map: &mut map,
            viewport: &mut viewport,
            elements: &mut elements,
        };
        a.on_click(&MarkerClickEvent::at(0.0, 0.0), &mut ctx);
        assert!(a.is_info_window_open());

        popups.request_open("B".to_string());
        a.reconcile(&popups);
        assert!(!a.is_info_window_open());
        assert_eq!(a.opacity(), 1.0);
    }
}
