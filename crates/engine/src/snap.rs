//! Snapping: grid (X), shelf rows (Y) and shelf-mate magnetism (X).
//!
//! All functions are pure. Coordinates are pixels relative to the section's
//! content origin, i.e. below the header and row offset.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use shared::{PlacedComponent, Row, Section};

use crate::geometry::{spans_overlap, ItemFootprint};
use crate::state::settings::SnapSettings;
use crate::units::{grid_step_px, to_pixels};

/// Vertical band `[start, end)` of one shelf, in content-relative pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBoundary {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

impl RowBoundary {
    pub fn contains(&self, y: f64) -> bool {
        y >= self.start && y < self.end
    }
}

/// Result of shelf snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShelfSnap {
    pub y: f64,
    pub row_index: usize,
    /// False when no shelf contained the item's center and the first shelf was used.
    pub matched: bool,
}

/// Fully snapped position of an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnappedPosition {
    pub x: f64,
    pub y: f64,
    pub row_index: usize,
}

/// Round to the nearest multiple of the build-time grid step.
pub fn snap_to_grid(value: f64) -> f64 {
    snap_to_grid_step(value, grid_step_px())
}

/// Round to the nearest multiple of `step`. A non-positive step disables snapping.
pub fn snap_to_grid_step(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return value;
    }
    (value / step).round() * step
}

/// Derive cumulative shelf bands. The first band starts at 0: header and row
/// offset are already outside the content coordinate space.
pub fn row_boundaries(rows: &[Row]) -> Vec<RowBoundary> {
    let mut start = 0.0;
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let end = start + to_pixels(row.height);
            let boundary = RowBoundary { index, start, end };
            start = end;
            boundary
        })
        .collect()
}

/// Rest the item on the shelf whose band contains its vertical center.
///
/// Falls back to the first shelf when the center is above or below every
/// band. Returns `None` only when there are no shelves at all.
pub fn snap_to_shelf(y: f64, item_height_px: f64, rows: &[Row]) -> Option<ShelfSnap> {
    let boundaries = row_boundaries(rows);
    let first = *boundaries.first()?;
    let center = y + item_height_px / 2.0;

    let snap = match boundaries.iter().find(|b| b.contains(center)) {
        Some(b) => ShelfSnap {
            y: b.end - item_height_px,
            row_index: b.index,
            matched: true,
        },
        None => {
            tracing::debug!("No shelf contains center {center}, falling back to first shelf");
            ShelfSnap {
                y: first.end - item_height_px,
                row_index: 0,
                matched: false,
            }
        }
    };
    Some(snap)
}

/// Pull `x` flush against the nearest shelf-mate edge within `threshold_px`.
///
/// Shelf-mates are items whose vertical extent overlaps the dragged item's.
/// For each one, two alignments are tried: right of the neighbor and left of
/// it. The closest alignment wins; on equal distance the first one found in
/// insertion order is kept. `x` is returned unchanged when nothing is close.
pub fn snap_to_adjacent_product(
    x: f64,
    y: f64,
    footprint: &ItemFootprint,
    existing: &[PlacedComponent],
    threshold_px: f64,
    exclude_id: Option<&str>,
) -> f64 {
    let width = footprint.width_px();
    let height = footprint.height_px();

    let mut best: Option<(f64, f64)> = None;
    for other in existing {
        if exclude_id == Some(other.id.as_str()) {
            continue;
        }
        let other_fp = ItemFootprint::of_component(other);
        if !spans_overlap(y, height, other.y, other_fp.height_px()) {
            continue;
        }

        let candidates = [other.x + other_fp.width_px(), other.x - width];
        for candidate in candidates {
            let dist = (candidate - x).abs();
            if dist >= threshold_px {
                continue;
            }
            if best.map_or(true, |(best_dist, _)| dist < best_dist) {
                best = Some((dist, candidate));
            }
        }
    }

    best.map_or(x, |(_, candidate)| candidate)
}

/// Compose grid, shelf and adjacency snapping in that order.
///
/// Shelf snapping fixes Y; grid and adjacency resolve X, with adjacency
/// overriding the grid when a shelf-mate is close enough.
pub fn snap_position(
    raw: Point,
    footprint: &ItemFootprint,
    section: &Section,
    settings: &SnapSettings,
    exclude_id: Option<&str>,
) -> Option<SnappedPosition> {
    let mut x = raw.x;
    if settings.grid_active() {
        x = snap_to_grid(x);
    }

    let shelf = snap_to_shelf(raw.y, footprint.height_px(), &section.rows)?;

    if settings.adjacent_active() {
        x = snap_to_adjacent_product(
            x,
            shelf.y,
            footprint,
            &section.components,
            settings.threshold_px,
            exclude_id,
        );
    }

    Some(SnappedPosition {
        x,
        y: shelf.y,
        row_index: shelf.row_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(id: &str, x: f64, y: f64, w: f64, h: f64) -> PlacedComponent {
        PlacedComponent {
            id: id.to_string(),
            product_id: "p".to_string(),
            name: id.to_string(),
            width: w,
            height: h,
            depth: 0.0,
            facings: 1,
            x,
            y,
            row_index: 0,
        }
    }

    fn rows(heights: &[f64]) -> Vec<Row> {
        heights.iter().map(|h| Row::new(*h)).collect()
    }

    #[test]
    fn test_snap_to_grid_rounds_to_nearest() {
        assert_eq!(snap_to_grid(0.0), 0.0);
        assert_eq!(snap_to_grid(4.9), 0.0);
        assert_eq!(snap_to_grid(5.1), 10.0);
        assert_eq!(snap_to_grid(22.0), 20.0);
        assert_eq!(snap_to_grid(-6.0), -10.0);
    }

    #[test]
    fn test_snap_to_grid_is_idempotent() {
        for v in [-37.0, -0.4, 0.0, 3.3, 14.99, 15.0, 123.456, 999.5] {
            let once = snap_to_grid(v);
            assert_eq!(snap_to_grid(once), once, "v={v}");
        }
    }

    #[test]
    fn test_snap_to_grid_step_non_positive_is_identity() {
        assert_eq!(snap_to_grid_step(13.7, 0.0), 13.7);
        assert_eq!(snap_to_grid_step(13.7, -5.0), 13.7);
    }

    #[test]
    fn test_row_boundaries_are_cumulative_from_zero() {
        let b = row_boundaries(&rows(&[14.0, 12.0, 10.0]));
        assert_eq!(b.len(), 3);
        assert_eq!((b[0].start, b[0].end), (0.0, 140.0));
        assert_eq!((b[1].start, b[1].end), (140.0, 260.0));
        assert_eq!((b[2].start, b[2].end), (260.0, 360.0));
    }

    #[test]
    fn test_snap_to_shelf_rests_on_containing_row() {
        let r = rows(&[14.0, 12.0]);
        // center at 150 + 25 = 175, inside the second band
        let snap = snap_to_shelf(150.0, 50.0, &r).unwrap();
        assert_eq!(snap.row_index, 1);
        assert_eq!(snap.y, 260.0 - 50.0);
        assert!(snap.matched);
    }

    #[test]
    fn test_snap_to_shelf_band_is_half_open() {
        let r = rows(&[14.0, 12.0]);
        // center exactly on the boundary belongs to the lower shelf
        let snap = snap_to_shelf(140.0 - 25.0, 50.0, &r).unwrap();
        assert_eq!(snap.row_index, 1);
    }

    #[test]
    fn test_snap_to_shelf_falls_back_to_first_row() {
        let r = rows(&[14.0, 12.0]);
        for y in [-500.0, -100.0, 400.0, 10_000.0] {
            let snap = snap_to_shelf(y, 50.0, &r).unwrap();
            assert_eq!(snap.row_index, 0, "y={y}");
            assert_eq!(snap.y, 90.0);
            assert!(!snap.matched);
        }
    }

    #[test]
    fn test_snap_to_shelf_empty_rows() {
        assert!(snap_to_shelf(10.0, 50.0, &[]).is_none());
    }

    #[test]
    fn test_snap_to_shelf_always_lands_on_a_row_end() {
        let r = rows(&[14.0, 12.0, 8.5, 20.0]);
        let ends: Vec<f64> = row_boundaries(&r).iter().map(|b| b.end).collect();
        for h in [10.0, 35.0, 50.0] {
            let mut y = -100.0;
            while y < 700.0 {
                let snap = snap_to_shelf(y, h, &r).unwrap();
                assert!(ends.contains(&(snap.y + h)), "y={y} h={h} got {}", snap.y);
                y += 7.0;
            }
        }
    }

    #[test]
    fn test_adjacent_snaps_to_right_edge() {
        let existing = vec![component("a", 0.0, 90.0, 2.5, 5.0)];
        let fp = ItemFootprint::new(2.5, 5.0, 1);
        let x = snap_to_adjacent_product(22.0, 90.0, &fp, &existing, 20.0, None);
        assert_eq!(x, 25.0);
    }

    #[test]
    fn test_adjacent_snaps_to_left_edge() {
        let existing = vec![component("a", 100.0, 90.0, 2.5, 5.0)];
        let fp = ItemFootprint::new(3.0, 5.0, 1);
        let x = snap_to_adjacent_product(80.0, 90.0, &fp, &existing, 20.0, None);
        assert_eq!(x, 70.0);
    }

    #[test]
    fn test_adjacent_ignores_far_items() {
        let existing = vec![component("a", 0.0, 90.0, 2.5, 5.0)];
        let fp = ItemFootprint::new(2.5, 5.0, 1);
        assert_eq!(snap_to_adjacent_product(60.0, 90.0, &fp, &existing, 20.0, None), 60.0);
        // exactly at the threshold is not close enough
        assert_eq!(snap_to_adjacent_product(45.0, 90.0, &fp, &existing, 20.0, None), 45.0);
    }

    #[test]
    fn test_adjacent_ignores_other_shelves() {
        let existing = vec![component("a", 0.0, 200.0, 2.5, 5.0)];
        let fp = ItemFootprint::new(2.5, 5.0, 1);
        assert_eq!(snap_to_adjacent_product(22.0, 90.0, &fp, &existing, 20.0, None), 22.0);
    }

    #[test]
    fn test_adjacent_excludes_self() {
        let existing = vec![component("a", 0.0, 90.0, 2.5, 5.0)];
        let fp = ItemFootprint::new(2.5, 5.0, 1);
        assert_eq!(
            snap_to_adjacent_product(22.0, 90.0, &fp, &existing, 20.0, Some("a")),
            22.0
        );
    }

    #[test]
    fn test_adjacent_picks_closest_candidate() {
        let existing = vec![
            component("a", 0.0, 90.0, 2.5, 5.0),  // right edge 25
            component("b", 60.0, 90.0, 2.5, 5.0), // left slot 60 - 25 = 35
        ];
        let fp = ItemFootprint::new(2.5, 5.0, 1);
        assert_eq!(snap_to_adjacent_product(33.0, 90.0, &fp, &existing, 20.0, None), 35.0);
        assert_eq!(snap_to_adjacent_product(27.0, 90.0, &fp, &existing, 20.0, None), 25.0);
    }

    #[test]
    fn test_adjacent_tie_keeps_first_found() {
        let existing = vec![
            component("a", 0.0, 90.0, 2.5, 5.0),  // right edge 25
            component("b", 60.0, 90.0, 2.5, 5.0), // left slot 35
        ];
        let fp = ItemFootprint::new(2.5, 5.0, 1);
        assert_eq!(snap_to_adjacent_product(30.0, 90.0, &fp, &existing, 20.0, None), 25.0);

        let reversed: Vec<_> = existing.into_iter().rev().collect();
        assert_eq!(snap_to_adjacent_product(30.0, 90.0, &fp, &reversed, 20.0, None), 35.0);
    }

    #[test]
    fn test_adjacent_uses_neighbor_facings() {
        let mut wide = component("a", 0.0, 90.0, 2.5, 5.0);
        wide.facings = 3;
        let fp = ItemFootprint::new(2.5, 5.0, 1);
        assert_eq!(snap_to_adjacent_product(70.0, 90.0, &fp, &[wide], 20.0, None), 75.0);
    }

    fn section(components: Vec<PlacedComponent>) -> Section {
        Section {
            id: "s".into(),
            fixture_id: "f".into(),
            name: "Bay".into(),
            width: 48.0,
            height: 72.0,
            header_height: 6.0,
            row_offset: 2.0,
            rows: rows(&[14.0]),
            components,
        }
    }

    #[test]
    fn test_snap_position_composes_grid_shelf_adjacent() {
        let s = section(vec![component("a", 0.0, 90.0, 2.5, 5.0)]);
        let fp = ItemFootprint::new(2.5, 5.0, 1);
        let pos = snap_position(Point::new(22.0, 60.0), &fp, &s, &SnapSettings::default(), None)
            .unwrap();
        assert_eq!(pos, SnappedPosition { x: 25.0, y: 90.0, row_index: 0 });
    }

    #[test]
    fn test_snap_position_grid_only() {
        let s = section(vec![]);
        let fp = ItemFootprint::new(2.5, 5.0, 1);
        let settings = SnapSettings {
            adjacent: false,
            ..SnapSettings::default()
        };
        let pos = snap_position(Point::new(47.0, 10.0), &fp, &s, &settings, None).unwrap();
        assert_eq!(pos.x, 50.0);
        assert_eq!(pos.y, 90.0);
    }

    #[test]
    fn test_snap_position_disabled_keeps_raw_x() {
        let s = section(vec![component("a", 0.0, 90.0, 2.5, 5.0)]);
        let fp = ItemFootprint::new(2.5, 5.0, 1);
        let settings = SnapSettings {
            enabled: false,
            ..SnapSettings::default()
        };
        let pos = snap_position(Point::new(27.3, 10.0), &fp, &s, &settings, None).unwrap();
        assert_eq!(pos.x, 27.3);
        assert_eq!(pos.y, 90.0);
    }
}
