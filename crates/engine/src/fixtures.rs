//! Factory functions for templates, catalogs and placed components.
//!
//! Used by tests, by the replay binary and as the server's demo catalog.

use shared::*;

// ── Section / fixture templates ─────────────────────────────────

/// 48" x 72" bay with a 6" header, 2" row offset and the given shelf heights.
pub fn bay_template(name: &str, rows: &[f64]) -> SectionTemplate {
    SectionTemplate {
        name: name.to_string(),
        width: 48.0,
        height: 72.0,
        header_height: 6.0,
        row_offset: 2.0,
        rows: rows.iter().map(|h| Row::new(*h)).collect(),
    }
}

/// One bay with a single 14" shelf.
pub fn single_shelf_fixture() -> FixtureTemplate {
    FixtureTemplate {
        id: "single-shelf".to_string(),
        name: "Single Shelf".to_string(),
        sections: vec![bay_template("Bay 1", &[14.0])],
    }
}

/// Two-bay gondola, four shelves per bay.
pub fn gondola_fixture() -> FixtureTemplate {
    FixtureTemplate {
        id: "gondola-2x4".to_string(),
        name: "Gondola 2 Bay".to_string(),
        sections: vec![
            bay_template("Left Bay", &[14.0, 12.0, 12.0, 12.0]),
            bay_template("Right Bay", &[14.0, 12.0, 12.0, 12.0]),
        ],
    }
}

/// A bay with no shelves at all.
pub fn shelfless_fixture() -> FixtureTemplate {
    FixtureTemplate {
        id: "pegboard".to_string(),
        name: "Pegboard".to_string(),
        sections: vec![bay_template("Board", &[])],
    }
}

// ── Products ────────────────────────────────────────────────────

/// Product template with name equal to its id.
pub fn product(id: &str, width: f64, height: f64) -> ProductTemplate {
    ProductTemplate {
        id: id.to_string(),
        name: id.to_string(),
        brand: String::new(),
        width,
        height,
        depth: width,
    }
}

/// A placed component on shelf 0 with one facing.
pub fn placed(id: &str, width: f64, height: f64, x: f64, y: f64) -> PlacedComponent {
    PlacedComponent {
        id: id.to_string(),
        product_id: format!("{}_product", id),
        name: id.to_string(),
        width,
        height,
        depth: 0.0,
        facings: 1,
        x,
        y,
        row_index: 0,
    }
}

// ── Catalog ─────────────────────────────────────────────────────

/// Small catalog with the fixtures above and a few beverages.
pub fn demo_catalog() -> Catalog {
    Catalog {
        fixtures: vec![single_shelf_fixture(), gondola_fixture(), shelfless_fixture()],
        products: vec![
            ProductTemplate {
                id: "cola-12oz".to_string(),
                name: "Cola 12oz".to_string(),
                brand: "Fizz".to_string(),
                width: 2.5,
                height: 5.0,
                depth: 2.5,
            },
            ProductTemplate {
                id: "water-1l".to_string(),
                name: "Water 1L".to_string(),
                brand: "Spring".to_string(),
                width: 3.5,
                height: 10.5,
                depth: 3.5,
            },
            ProductTemplate {
                id: "chips-family".to_string(),
                name: "Chips Family Size".to_string(),
                brand: "Crunch".to_string(),
                width: 9.0,
                height: 11.0,
                depth: 3.0,
            },
        ],
    }
}
