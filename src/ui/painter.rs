//! Draws marker render trees with egui.
//!
//! Projection is left to the caller: every method takes a closure mapping a
//! coordinate to a screen position, so any tile widget can host the markers.

use crate::{
    core::geo::{LatLng, Point},
    layers::{
        custom_marker::CustomMarkerNode,
        marker::{MarkerFill, MarkerNode},
    },
    ui::{
        popup::{PopupContent, PopupNode},
        style::{MarkerStyle, PopupStyle},
    },
};
use egui::{Align2, Painter, Pos2, Rect, Stroke, Vec2};

/// Pin image footprint; the offset in [`MarkerNode`] anchors its top-left corner
const PIN_SIZE: Vec2 = Vec2::new(24.0, 40.0);

/// Clickable area of a drawn marker
#[derive(Debug, Clone, PartialEq)]
pub struct HitArea {
    pub key: String,
    pub rect: Rect,
}

#[derive(Debug, Clone, Default)]
pub struct MarkerPainter {
    pub markers: MarkerStyle,
    pub popups: PopupStyle,
}

impl MarkerPainter {
    pub fn new(markers: MarkerStyle, popups: PopupStyle) -> Self {
        Self { markers, popups }
    }

    /// Paints list-variant pins and their popups, returning pin hit areas in draw order
    pub fn paint_markers<P>(&self, painter: &Painter, nodes: &[MarkerNode], project: P) -> Vec<HitArea>
    where
        P: Fn(LatLng) -> Pos2,
    {
        let mut hits = Vec::with_capacity(nodes.len());
        for node in nodes {
            let tip = project(node.position);
            let rect = Rect::from_min_size(offset(tip, node.offset), PIN_SIZE);
            let color = match node.fill {
                MarkerFill::InView => self.markers.in_view_color,
                MarkerFill::OutOfView => self.markers.out_of_view_color,
            };

            let head = Pos2::new(rect.center().x, rect.min.y + self.markers.size + 2.0);
            painter.line_segment([head, tip], Stroke::new(3.0, color));
            painter.circle_filled(head, self.markers.size, color);
            painter.circle_stroke(head, self.markers.size, self.markers.border_stroke);

            hits.push(HitArea {
                key: node.key.clone(),
                rect,
            });
        }

        // Popups go on top of every pin.
        for popup in nodes.iter().filter_map(|n| n.popup.as_ref()) {
            self.paint_popup(painter, popup, &project);
        }
        hits
    }

    /// Paints provider-2 markers and any open info-window
    pub fn paint_custom_markers<P>(
        &self,
        painter: &Painter,
        nodes: &[CustomMarkerNode],
        project: P,
    ) -> Vec<HitArea>
    where
        P: Fn(LatLng) -> Pos2,
    {
        let mut ordered: Vec<&CustomMarkerNode> = nodes.iter().collect();
        ordered.sort_by_key(|n| n.z_index);

        let mut hits = Vec::new();
        for node in ordered {
            let center = project(node.position);
            let color = if node.z_index > 1 {
                self.markers.focused_color
            } else {
                self.markers.unfocused_color
            }
            .gamma_multiply(node.opacity);

            painter.circle_filled(center, self.markers.size, color);
            painter.circle_stroke(
                center,
                self.markers.size,
                Stroke::new(
                    self.markers.border_stroke.width,
                    self.markers.border_stroke.color.gamma_multiply(node.opacity),
                ),
            );

            if node.clickable {
                hits.push(HitArea {
                    key: node.key.clone(),
                    rect: Rect::from_center_size(center, Vec2::splat(self.markers.size * 2.0)),
                });
            }

            if let Some(window) = &node.info_window {
                self.paint_content(painter, project(window.position), &window.content);
            }
        }
        hits
    }

    pub fn paint_popup<P>(&self, painter: &Painter, popup: &PopupNode, project: P) -> Rect
    where
        P: Fn(LatLng) -> Pos2,
    {
        let anchor = offset(project(popup.position), popup.offset);
        self.paint_content(painter, anchor, &popup.content)
    }

    fn paint_content(&self, painter: &Painter, anchor: Pos2, content: &PopupContent) -> Rect {
        let style = &self.popups;
        let lines = [
            (content.region.as_str(), &style.title_font, style.text_color),
            (content.description.as_str(), &style.font_id, style.text_color),
            (content.link.as_str(), &style.font_id, style.link_color),
        ];

        let mut size = Vec2::ZERO;
        for (text, font, color) in &lines {
            let line = painter
                .layout_no_wrap(text.to_string(), (*font).clone(), *color)
                .size();
            size.x = size.x.max(line.x);
            size.y += line.y;
        }
        let size = Vec2::new(
            (size.x + style.padding * 2.0).min(style.max_width),
            size.y + style.padding * 2.0,
        );

        let rect = Rect::from_min_size(anchor, size);
        painter.rect_filled(rect, style.rounding, style.background_color);
        painter.rect_stroke(rect, style.rounding, (style.border_width, style.border_color));

        let mut cursor = rect.min + Vec2::splat(style.padding);
        for (text, font, color) in lines {
            if text.is_empty() {
                continue;
            }
            let drawn = painter.text(cursor, Align2::LEFT_TOP, text, font.clone(), color);
            cursor.y += drawn.height();
        }
        rect
    }
}

/// Returns the key of the topmost hit area containing `pos`
pub fn hit_test(hits: &[HitArea], pos: Pos2) -> Option<&str> {
    hits.iter()
        .rev()
        .find(|hit| hit.rect.contains(pos))
        .map(|hit| hit.key.as_str())
}

fn offset(pos: Pos2, by: Point) -> Pos2 {
    pos + Vec2::new(by.x as f32, by.y as f32)
}
