//! Parent container for vineyard markers.
//!
//! Owns the viewport, the popup owner, the card registry and the markers of
//! both provider variants, and routes [`MarkerEvent`]s to them. Markers only
//! propose changes; this type applies them.

use crate::{
    core::{
        config::{MarkerConfig, MarkerProfile},
        viewport::Viewport,
        visibility::VisibilityBox,
    },
    data::vineyard::VineyardCatalog,
    input::events::{EventHandled, MarkerEvent},
    layers::{
        custom_marker::{CustomMarker, CustomMarkerNode, CustomMarkerProps, MarkerContext, MarkerIcons},
        marker::{MarkerLayer, MarkerLayerInput, MarkerNode},
    },
    traits::{MapSurface, ScrollIntoView, ViewportSink},
    ui::{
        elements::ElementRegistry,
        popup::{PopupContent, PopupEvent, PopupOwner},
    },
};

#[derive(Debug, Clone)]
pub struct MapOptions {
    pub profile: MarkerProfile,
    pub icons: MarkerIcons,
    pub is_mobile: bool,
    /// Provider-2 markers respond to clicks
    pub clickable: bool,
    /// Provider-2 clicks pan the map and scroll the vineyard card into view
    pub scroll_effect: bool,
    /// Provider-2 markers carry an info-window
    pub info_windows: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            profile: MarkerProfile::Default,
            icons: MarkerIcons::new("marker-on.svg", "marker-off.svg"),
            is_mobile: false,
            clickable: true,
            scroll_effect: true,
            info_windows: true,
        }
    }
}

pub struct VineyardMap<M, H> {
    catalog: VineyardCatalog,
    config: MarkerConfig,
    viewport: Viewport,
    is_mobile: bool,
    /// Popup flag of the list variant
    popup_open: bool,
    popups: PopupOwner<String>,
    elements: ElementRegistry<H>,
    layer: MarkerLayer,
    markers: Vec<CustomMarker>,
    map: M,
}

impl<M, H> VineyardMap<M, H>
where
    M: MapSurface,
    H: ScrollIntoView,
{
    pub fn new(catalog: VineyardCatalog, viewport: Viewport, map: M, options: MapOptions) -> Self {
        let config = options.profile.resolve();
        let markers = catalog
            .iter()
            .map(|vineyard| {
                let mut props =
                    CustomMarkerProps::new(vineyard.name.clone(), vineyard.position(), options.icons.clone())
                        .clickable(options.clickable)
                        .scroll_effect(options.scroll_effect);
                if options.info_windows {
                    props = props.with_info_window(PopupContent::for_vineyard(vineyard));
                }
                CustomMarker::with_config(props, config.clone())
            })
            .collect();

        let mut this = Self {
            catalog,
            layer: MarkerLayer::new(config.clone()),
            config,
            viewport,
            is_mobile: options.is_mobile,
            popup_open: false,
            popups: PopupOwner::new(),
            elements: ElementRegistry::new(),
            markers,
            map,
        };
        this.refresh_focus();
        this
    }

    pub fn catalog(&self) -> &VineyardCatalog {
        &self.catalog
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// External pan/zoom moved the map
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.refresh_focus();
    }

    pub fn set_mobile(&mut self, is_mobile: bool) {
        self.is_mobile = is_mobile;
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup_open
    }

    pub fn popups(&self) -> &PopupOwner<String> {
        &self.popups
    }

    /// Takes the popup open/close history recorded since the last call
    pub fn drain_popup_events(&mut self) -> Vec<PopupEvent<String>> {
        self.popups.drain_events()
    }

    pub fn elements_mut(&mut self) -> &mut ElementRegistry<H> {
        &mut self.elements
    }

    pub fn elements(&self) -> &ElementRegistry<H> {
        &self.elements
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn marker(&self, key: &str) -> Option<&CustomMarker> {
        self.markers.iter().find(|m| m.key() == key)
    }

    /// List-variant render tree for the current state
    pub fn list_markers(&self) -> Vec<MarkerNode> {
        let input =
            MarkerLayerInput::from_catalog(&self.catalog, self.viewport, self.is_mobile, self.popup_open);
        self.layer.render(&input)
    }

    /// Provider-2 render tree for the current state
    pub fn custom_markers(&mut self) -> Vec<CustomMarkerNode> {
        for marker in &mut self.markers {
            marker.reconcile(&self.popups);
        }
        self.markers.iter().map(CustomMarker::render).collect()
    }

    pub fn handle(&mut self, event: MarkerEvent) -> EventHandled {
        match event {
            MarkerEvent::Click { key, event } => {
                let Some(marker) = self.markers.iter_mut().find(|m| m.key() == key) else {
                    log::warn!("click for unknown marker {:?}", key);
                    return EventHandled::NotHandled;
                };
                let mut ctx = MarkerContext {
                    popups: &mut self.popups,
                    map: &mut self.map,
                    viewport: &mut self.viewport,
                    elements: &mut self.elements,
                };
                let handled = marker.on_click(&event, &mut ctx);
                self.refresh_focus();
                handled
            }
            MarkerEvent::CloseInfoWindow { key } => {
                match self.markers.iter_mut().find(|m| m.key() == key) {
                    Some(marker) => {
                        marker.close_info_window(&mut self.popups);
                        EventHandled::Handled
                    }
                    None => EventHandled::NotHandled,
                }
            }
            MarkerEvent::PinClick { key } => self.pin_click(&key),
            MarkerEvent::ClosePopup => {
                self.layer.close_popup(|open| self.popup_open = open);
                EventHandled::Handled
            }
        }
    }

    /// A list pin click centers the map on the pin, opens the popup and
    /// brings the vineyard card into view.
    fn pin_click(&mut self, key: &str) -> EventHandled {
        let Some(node) = self.list_markers().into_iter().find(|n| n.key == key) else {
            log::warn!("click for unknown pin {:?}", key);
            return EventHandled::NotHandled;
        };

        let mut clicked = None;
        self.layer.click(&node, &self.elements, |lat, lng, element| {
            clicked = Some((lat, lng, element.is_some()));
        });

        if let Some((lat, lng, has_element)) = clicked {
            self.map.pan_to(node.position);
            self.viewport.change_map_center(lat, lng);
            self.popup_open = true;
            if has_element {
                self.elements.scroll_to(key);
            }
            self.refresh_focus();
        }
        EventHandled::Handled
    }

    /// Focus follows the visibility box around the current center
    fn refresh_focus(&mut self) {
        let visibility = VisibilityBox::from_config(&self.config);
        let center = self.viewport.center;
        for marker in &mut self.markers {
            let focused = visibility.contains(center, marker.props().position);
            marker.set_focused(focused);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::geo::LatLng, data::vineyard::Vineyard, input::events::MarkerClickEvent};

    #[derive(Default)]
    struct NullMap;

    impl MapSurface for NullMap {
        fn pan_to(&mut self, _position: LatLng) {}
    }

    struct NullCard;

    impl ScrollIntoView for NullCard {
        fn scroll_into_view(&mut self) {}
    }

    fn host() -> VineyardMap<NullMap, NullCard> {
        let catalog = VineyardCatalog::from_vineyards([
            Vineyard::new("North", 45.0, -123.0),
            Vineyard::new("South", 44.0, -123.0),
        ])
        .unwrap();
        VineyardMap::new(catalog, Viewport::new(45.0, -123.0), NullMap, MapOptions::default())
    }

    #[test]
    fn test_focus_follows_viewport() {
        let mut map = host();
        let nodes = map.custom_markers();
        assert_eq!(nodes[0].icon, "marker-on.svg");
        assert_eq!(nodes[1].icon, "marker-off.svg");

        map.set_viewport(Viewport::new(44.0, -123.0));
        let nodes = map.custom_markers();
        assert_eq!(nodes[0].z_index, 1);
        assert_eq!(nodes[1].z_index, 2);
    }

    #[test]
    fn test_click_unknown_marker() {
        let mut map = host();
        let handled = map.handle(MarkerEvent::Click {
            key: "Nowhere".to_string(),
            event: MarkerClickEvent::at(0.0, 0.0),
        });
        assert_eq!(handled, EventHandled::NotHandled);
    }

    #[test]
    fn test_drain_popup_events_empties_history() {
        let mut map = host();
        for _ in 0..50 {
            map.handle(MarkerEvent::Click {
                key: "North".to_string(),
                event: MarkerClickEvent::at(45.0, -123.0),
            });
            map.handle(MarkerEvent::CloseInfoWindow {
                key: "North".to_string(),
            });
        }
        assert_eq!(map.popups().events().len(), 100);

        let drained = map.drain_popup_events();
        assert_eq!(drained.len(), 100);
        assert_eq!(drained[0], PopupEvent::Opened("North".to_string()));
        assert_eq!(drained[1], PopupEvent::Closed("North".to_string()));
        assert!(map.popups().events().is_empty());
        assert!(map.drain_popup_events().is_empty());
    }

    #[test]
    fn test_close_popup_clears_flag() {
        let mut map = host();
        map.handle(MarkerEvent::PinClick { key: "North".to_string() });
        assert!(map.is_popup_open());
        map.handle(MarkerEvent::ClosePopup);
        assert!(!map.is_popup_open());
    }
}
