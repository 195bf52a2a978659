//! Axis-aligned rectangles for placed items, using kurbo.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use shared::{PlacedComponent, ProductTemplate};

use crate::units::to_pixels;

/// Real-world dimensions of an item being placed (inches), plus facings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemFootprint {
    pub width: f64,
    pub height: f64,
    pub facings: u32,
}

impl ItemFootprint {
    pub fn new(width: f64, height: f64, facings: u32) -> Self {
        Self {
            width,
            height,
            facings,
        }
    }

    pub fn of_product(product: &ProductTemplate, facings: u32) -> Self {
        Self::new(product.width, product.height, facings)
    }

    pub fn of_component(component: &PlacedComponent) -> Self {
        Self::new(component.width, component.height, component.facings)
    }

    /// Occupied width in pixels: one facing times the facing count.
    pub fn width_px(&self) -> f64 {
        to_pixels(self.width * self.facings as f64)
    }

    pub fn height_px(&self) -> f64 {
        to_pixels(self.height)
    }

    /// Occupied rectangle with its top-left corner at `(x, y)`.
    pub fn rect_at(&self, x: f64, y: f64) -> Rect {
        Rect::from_origin_size(Point::new(x, y), Size::new(self.width_px(), self.height_px()))
    }
}

/// Occupied rectangle of a placed component.
pub fn component_rect(component: &PlacedComponent) -> Rect {
    ItemFootprint::of_component(component).rect_at(component.x, component.y)
}

/// Strict AABB intersection. Rectangles that only share an edge do not overlap,
/// so items can sit flush against each other.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
}

/// Strict overlap of two vertical extents `[top, top + height)`.
pub fn spans_overlap(a_top: f64, a_height: f64, b_top: f64, b_height: f64) -> bool {
    a_top < b_top + b_height && a_top + a_height > b_top
}
