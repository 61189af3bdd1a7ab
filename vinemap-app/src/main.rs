use anyhow::Context;
use egui::{Color32, Pos2, Sense};
use std::{cell::RefCell, rc::Rc};
use vinemap::prelude::*;

const SAMPLE_CATALOG: &str = r#"{
    "vineyards": [
        { "name": "Domaine Serene", "lat": 45.2270, "lng": -123.0690,
          "image": "serene.jpg", "location": "Dayton, Oregon" },
        { "name": "Archery Summit", "lat": 45.2440, "lng": -123.0450,
          "image": "archery.jpg", "location": "Dayton, Oregon" },
        { "name": "Sokol Blosser", "lat": 45.2420, "lng": -123.0810,
          "image": "sokol.jpg", "location": "Dundee, Oregon" },
        { "name": "Stoller Family Estate", "lat": 45.2260, "lng": -123.0980,
          "image": "stoller.jpg", "location": "Dayton, Oregon" }
    ]
}"#;

/// Standalone vineyard map viewer
///
/// Usage: `vinemap-app [catalog.json] [marker-config.json]`
fn main() -> anyhow::Result<()> {
    vinemap::init_logging();

    let mut args = std::env::args().skip(1);
    let catalog = match args.next() {
        Some(path) => VineyardCatalog::from_path(&path)
            .with_context(|| format!("failed to load catalog {}", path))?,
        None => VineyardCatalog::from_json_str(SAMPLE_CATALOG)?,
    };
    let profile = match args.next() {
        Some(path) => MarkerProfile::Custom(
            MarkerConfig::from_path(&path)
                .with_context(|| format!("failed to load marker config {}", path))?,
        ),
        None => MarkerProfile::Default,
    };
    log::info!("showing {} vineyards", catalog.len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Vinemap - Vineyard Browser"),
        ..Default::default()
    };

    eframe::run_native(
        "vinemap-app",
        options,
        Box::new(move |_cc| Box::new(VinemapApp::new(catalog, profile))),
    )
    .map_err(|e| anyhow::anyhow!("viewer exited with error: {}", e))?;

    Ok(())
}

/// The map widget as seen by markers; panning is applied through the viewport
#[derive(Default)]
struct EguiMap {
    last_pan: Option<LatLng>,
}

impl MapSurface for EguiMap {
    fn pan_to(&mut self, position: LatLng) {
        self.last_pan = Some(position);
    }
}

/// A vineyard card in the side panel. Scrolling is deferred to the next frame.
struct CardHandle {
    name: String,
    pending: Rc<RefCell<Option<String>>>,
}

impl ScrollIntoView for CardHandle {
    fn scroll_into_view(&mut self) {
        *self.pending.borrow_mut() = Some(self.name.clone());
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    PopupPins,
    InfoWindows,
}

struct VinemapApp {
    map: VineyardMap<EguiMap, CardHandle>,
    painter: MarkerPainter,
    pending_scroll: Rc<RefCell<Option<String>>>,
    mode: Mode,
    mobile: bool,
    /// Pixels per degree
    scale: f64,
}

impl VinemapApp {
    fn new(catalog: VineyardCatalog, profile: MarkerProfile) -> Self {
        let config = profile.resolve();
        let start = catalog
            .iter()
            .next()
            .map(|v| Viewport::from(v.position()))
            .unwrap_or_default();

        let pending_scroll = Rc::new(RefCell::new(None));
        let options = MapOptions {
            profile,
            ..MapOptions::default()
        };
        let mut map = VineyardMap::new(catalog, start, EguiMap::default(), options);

        let names = map.catalog().keys().to_vec();
        for name in names {
            let handle = CardHandle {
                name: name.clone(),
                pending: Rc::clone(&pending_scroll),
            };
            map.elements_mut().register(name, handle);
        }

        Self {
            map,
            painter: MarkerPainter::new(MarkerStyle::from_config(&config), PopupStyle::default()),
            pending_scroll,
            mode: Mode::PopupPins,
            mobile: false,
            scale: 8000.0,
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.mode, Mode::PopupPins, "Popup pins");
            ui.selectable_value(&mut self.mode, Mode::InfoWindows, "Info windows");
            ui.separator();
            if ui.checkbox(&mut self.mobile, "Mobile").changed() {
                self.map.set_mobile(self.mobile);
            }
            ui.add(
                egui::Slider::new(&mut self.scale, 500.0..=50000.0)
                    .logarithmic(true)
                    .text("zoom"),
            );
            let open = self.map.popups().open_key().cloned();
            if let Some(key) = open {
                if ui.button(format!("Close {}", key)).clicked() {
                    self.map.handle(MarkerEvent::CloseInfoWindow { key });
                }
            }
        });
    }

    fn cards(&mut self, ui: &mut egui::Ui) {
        let target = self.pending_scroll.borrow_mut().take();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for vineyard in self.map.catalog().iter() {
                let response = ui
                    .group(|ui| {
                        ui.set_width(ui.available_width());
                        ui.strong(&vineyard.name);
                        ui.label(&vineyard.location);
                        ui.weak(vineyard.slug());
                    })
                    .response;
                if target.as_deref() == Some(vineyard.name.as_str()) {
                    response.scroll_to_me(Some(egui::Align::TOP));
                }
            }
        });
    }

    fn map_view(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, Color32::from_rgb(0xEE, 0xEA, 0xDF));

        let center = self.map.viewport().center;
        let scale = self.scale;
        let project = move |p: LatLng| {
            Pos2::new(
                rect.center().x + ((p.lng - center.lng) * scale) as f32,
                rect.center().y - ((p.lat - center.lat) * scale) as f32,
            )
        };

        let hits = match self.mode {
            Mode::PopupPins => {
                let nodes = self.map.list_markers();
                self.painter.paint_markers(&painter, &nodes, project)
            }
            Mode::InfoWindows => {
                let nodes = self.map.custom_markers();
                self.painter.paint_custom_markers(&painter, &nodes, project)
            }
        };

        if response.dragged() {
            let delta = response.drag_delta();
            self.map.set_viewport(Viewport::new(
                center.lat + delta.y as f64 / scale,
                center.lng - delta.x as f64 / scale,
            ));
        }

        if response.clicked() {
            let hit = response
                .interact_pointer_pos()
                .and_then(|pos| hit_test(&hits, pos))
                .map(str::to_string);
            match (hit, self.mode) {
                (Some(key), Mode::PopupPins) => {
                    self.map.handle(MarkerEvent::PinClick { key });
                }
                (Some(key), Mode::InfoWindows) => {
                    if let Some(vineyard) = self.map.catalog().get(&key) {
                        let event = MarkerClickEvent::at(vineyard.lat, vineyard.lng);
                        self.map.handle(MarkerEvent::Click { key, event });
                    }
                }
                (None, Mode::PopupPins) if self.map.is_popup_open() => {
                    self.map.handle(MarkerEvent::ClosePopup);
                }
                (None, _) => {}
            }
        }

        if let Some(target) = self.map.map().last_pan {
            painter.text(
                rect.left_bottom() + egui::vec2(6.0, -6.0),
                egui::Align2::LEFT_BOTTOM,
                format!("last pan: {:.4}, {:.4}", target.lat, target.lng),
                egui::FontId::monospace(11.0),
                Color32::DARK_GRAY,
            );
        }
    }
}

impl eframe::App for VinemapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));
        egui::SidePanel::left("cards")
            .default_width(260.0)
            .show(ctx, |ui| self.cards(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.map_view(ui));

        for event in self.map.drain_popup_events() {
            log::debug!("popup {:?}", event);
        }
    }
}
