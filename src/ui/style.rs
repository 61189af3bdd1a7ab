use crate::core::config::{parse_hex_color, MarkerConfig};
use egui::{Color32, FontId, Stroke};

/// Style for vineyard pins and provider-2 markers
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    /// Pin color inside the visibility box
    pub in_view_color: Color32,
    /// Pin color outside the visibility box
    pub out_of_view_color: Color32,
    /// Provider-2 marker color when focused
    pub focused_color: Color32,
    /// Provider-2 marker color when not focused
    pub unfocused_color: Color32,
    /// Radius of the pin head
    pub size: f32,
    /// Outline around pins and markers
    pub border_stroke: Stroke,
}

impl MarkerStyle {
    /// Pin colors follow the configured fills; unparsable colors keep the defaults
    pub fn from_config(config: &MarkerConfig) -> Self {
        let mut style = Self::default();
        if let Some(color) = hex_to_color32(&config.fill_in_view) {
            style.in_view_color = color;
            style.focused_color = color;
        }
        if let Some(color) = hex_to_color32(&config.fill_out_of_view) {
            style.out_of_view_color = color;
            style.unfocused_color = color;
        }
        style
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            in_view_color: Color32::from_rgb(0x61, 0x85, 0x49),
            out_of_view_color: Color32::from_rgb(0xA6, 0x9C, 0x80),
            focused_color: Color32::from_rgb(0x61, 0x85, 0x49),
            unfocused_color: Color32::from_rgb(0xA6, 0x9C, 0x80),
            size: 10.0,
            border_stroke: Stroke::new(1.5, Color32::WHITE),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PopupStyle {
    pub background_color: Color32,
    pub border_color: Color32,
    pub border_width: f32,
    pub rounding: f32,
    pub padding: f32,
    pub title_font: FontId,
    pub font_id: FontId,
    pub text_color: Color32,
    pub link_color: Color32,
    pub max_width: f32,
}

impl Default for PopupStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::WHITE,
            border_color: Color32::GRAY,
            border_width: 1.0,
            rounding: 4.0,
            padding: 8.0,
            title_font: FontId::proportional(14.0),
            font_id: FontId::proportional(12.0),
            text_color: Color32::BLACK,
            link_color: Color32::from_rgb(0x61, 0x85, 0x49),
            max_width: 300.0,
        }
    }
}

pub fn hex_to_color32(value: &str) -> Option<Color32> {
    parse_hex_color(value).map(|(r, g, b)| Color32::from_rgb(r, g, b))
}
