//! List-variant markers: one pin per vineyard, colored by viewport visibility,
//! with a popup attached to the vineyard(s) near the viewport center.

use crate::{
    core::{
        config::MarkerConfig,
        geo::{LatLng, Point},
        viewport::Viewport,
        visibility::VisibilityBox,
    },
    data::vineyard::{Vineyard, VineyardCatalog},
    ui::{
        elements::ElementRegistry,
        popup::{PopupContent, PopupNode},
    },
};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Two-valued pin color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerFill {
    InView,
    OutOfView,
}

impl MarkerFill {
    pub fn color<'a>(&self, config: &'a MarkerConfig) -> &'a str {
        match self {
            MarkerFill::InView => &config.fill_in_view,
            MarkerFill::OutOfView => &config.fill_out_of_view,
        }
    }
}

/// A rendered pin, keyed by vineyard name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerNode {
    pub key: String,
    pub position: LatLng,
    pub offset: Point,
    pub fill: MarkerFill,
    /// Resolved `#RRGGBB` color for `fill`
    pub color: String,
    pub popup: Option<PopupNode>,
}

/// Everything the list renderer reads
#[derive(Debug, Clone, Copy)]
pub struct MarkerLayerInput<'a> {
    /// Vineyard names in render order
    pub vineyards: &'a [String],
    pub coordinates: &'a FxHashMap<String, Vineyard>,
    pub viewport: Viewport,
    pub is_mobile: bool,
    pub is_popup_open: bool,
}

impl<'a> MarkerLayerInput<'a> {
    pub fn from_catalog(
        catalog: &'a VineyardCatalog,
        viewport: Viewport,
        is_mobile: bool,
        is_popup_open: bool,
    ) -> Self {
        Self {
            vineyards: catalog.keys(),
            coordinates: catalog.records(),
            viewport,
            is_mobile,
            is_popup_open,
        }
    }
}

/// Renders vineyard pins for the popup-style provider
#[derive(Debug, Clone, Default)]
pub struct MarkerLayer {
    config: MarkerConfig,
}

impl MarkerLayer {
    pub fn new(config: MarkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MarkerConfig {
        &self.config
    }

    /// Produces one node per known vineyard in input order.
    /// Keys with no record are skipped.
    pub fn render(&self, input: &MarkerLayerInput<'_>) -> Vec<MarkerNode> {
        let visibility = VisibilityBox::from_config(&self.config);
        let center = input.viewport.center;

        input
            .vineyards
            .iter()
            .filter_map(|key| {
                let Some(vineyard) = input.coordinates.get(key) else {
                    log::warn!("no coordinates for vineyard {:?}, skipping marker", key);
                    return None;
                };

                let visible = visibility.contains(center, vineyard.position());
                let fill = if visible {
                    MarkerFill::InView
                } else {
                    MarkerFill::OutOfView
                };
                let popup = (visible && input.is_popup_open && !input.is_mobile)
                    .then(|| self.popup_for(vineyard));

                Some(MarkerNode {
                    key: key.clone(),
                    position: vineyard.position(),
                    offset: self.config.marker_offset,
                    fill,
                    color: fill.color(&self.config).to_string(),
                    popup,
                })
            })
            .collect()
    }

    fn popup_for(&self, vineyard: &Vineyard) -> PopupNode {
        PopupNode {
            position: vineyard.position(),
            offset: self.config.popup_offset,
            content: PopupContent::for_vineyard(vineyard),
            close_on_click: true,
            dynamic_position: false,
        }
    }

    /// Forwards a pin click to `on_click` with the pin's coordinates and the
    /// card element registered for it, if any.
    pub fn click<H, F>(&self, node: &MarkerNode, elements: &ElementRegistry<H>, on_click: F)
    where
        F: FnOnce(f64, f64, Option<&H>),
    {
        let element = elements.get(&node.key);
        if element.is_none() {
            log::warn!("no element registered for {:?}", node.key);
        }
        log::debug!("pin clicked: {} ({}, {})", node.key, node.position.lat, node.position.lng);
        on_click(node.position.lat, node.position.lng, element);
    }

    /// Dismissing a popup asks the owner to clear the popup-open flag
    pub fn close_popup<F>(&self, toggle_popup: F)
    where
        F: FnOnce(bool),
    {
        toggle_popup(false);
    }
}

/// Renders with the default configuration
pub fn render_markers(input: &MarkerLayerInput<'_>) -> Vec<MarkerNode> {
    MarkerLayer::default().render(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> VineyardCatalog {
        VineyardCatalog::from_vineyards([
            Vineyard::new("Hudson Terrace", 40.0001, -74.0001)
                .with_image("hudson.jpg")
                .with_location("Hudson Valley, NY"),
            Vineyard::new("Far Field", 41.0, -75.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_one_marker_per_vineyard() {
        let catalog = catalog();
        let input = MarkerLayerInput::from_catalog(&catalog, Viewport::new(40.0, -74.0), false, false);
        let nodes = render_markers(&input);

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].key, "Hudson Terrace");
        assert_eq!(nodes[1].key, "Far Field");
    }

    #[test]
    fn test_fill_by_visibility() {
        let catalog = catalog();
        let input = MarkerLayerInput::from_catalog(&catalog, Viewport::new(40.0, -74.0), false, false);
        let nodes = render_markers(&input);

        assert_eq!(nodes[0].fill, MarkerFill::InView);
        assert_eq!(nodes[0].color, "#618549");
        assert_eq!(nodes[1].fill, MarkerFill::OutOfView);
        assert_eq!(nodes[1].color, "#A69C80");
        assert_eq!(nodes[0].offset, Point::new(-12.0, -40.0));
    }

    #[test]
    fn test_popup_only_on_visible_when_open() {
        let catalog = catalog();
        let closed = MarkerLayerInput::from_catalog(&catalog, Viewport::new(40.0, -74.0), false, false);
        assert!(render_markers(&closed).iter().all(|n| n.popup.is_none()));

        let open = MarkerLayerInput::from_catalog(&catalog, Viewport::new(40.0, -74.0), false, true);
        let nodes = render_markers(&open);
        let popup = nodes[0].popup.as_ref().unwrap();
        assert_eq!(popup.content.link, "hudson-terrace");
        assert_eq!(popup.content.description, "Hudson Valley, NY");
        assert_eq!(popup.offset, Point::new(8.0, 0.0));
        assert!(popup.close_on_click);
        assert!(!popup.dynamic_position);
        assert!(nodes[1].popup.is_none());
    }

    #[test]
    fn test_no_popup_on_mobile() {
        let catalog = catalog();
        for viewport in [Viewport::new(40.0, -74.0), Viewport::new(41.0, -75.0)] {
            let input = MarkerLayerInput::from_catalog(&catalog, viewport, true, true);
            assert!(render_markers(&input).iter().all(|n| n.popup.is_none()));
        }
    }

    #[test]
    fn test_unknown_keys_are_skipped() {
        let catalog = catalog();
        let keys = vec!["Ghost".to_string(), "Far Field".to_string()];
        let input = MarkerLayerInput {
            vineyards: &keys,
            coordinates: catalog.records(),
            viewport: Viewport::default(),
            is_mobile: false,
            is_popup_open: false,
        };
        let nodes = render_markers(&input);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].key, "Far Field");
    }

    #[test]
    fn test_click_passes_coordinates_and_element() {
        let catalog = catalog();
        let input = MarkerLayerInput::from_catalog(&catalog, Viewport::default(), false, false);
        let nodes = render_markers(&input);
        let layer = MarkerLayer::default();

        let mut elements = ElementRegistry::new();
        elements.register("Hudson Terrace", 7u32);

        let mut seen = None;
        layer.click(&nodes[0], &elements, |lat, lng, el| seen = Some((lat, lng, el.copied())));
        assert_eq!(seen, Some((40.0001, -74.0001, Some(7))));

        layer.click(&nodes[1], &elements, |lat, lng, el| seen = Some((lat, lng, el.copied())));
        assert_eq!(seen, Some((41.0, -75.0, None)));
    }

    #[test]
    fn test_close_popup_toggles_false() {
        let mut flag = true;
        MarkerLayer::default().close_popup(|open| flag = open);
        assert!(!flag);
    }
}
