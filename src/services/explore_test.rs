use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::model::SizeClass;
use crate::model::test_helpers::{categorized, installation};

fn table() -> Vec<Installation> {
    vec![
        categorized("inst-0", Sector::Residential, SizeClass::Small, 120.0, 9.0),
        categorized("inst-1", Sector::Hospital, SizeClass::Large, 900.0, 14.5),
        categorized("inst-2", Sector::Office, SizeClass::Medium, 400.0, 3.2),
        categorized("inst-3", Sector::Retail, SizeClass::Medium, 400.0, 11.0),
    ]
}

fn ids(list: &[Installation]) -> Vec<&str> {
    list.iter().map(|i| i.id.as_str()).collect()
}

// =============================================================
// Search
// =============================================================

#[test]
fn empty_term_returns_everything() {
    assert_eq!(search(&table(), "").len(), 4);
}

#[test]
fn search_is_case_insensitive_across_fields() {
    let rows = table();
    assert_eq!(search(&rows, "HOSP").len(), 1);
    assert_eq!(search(&rows, "médio").len(), 2);
    assert_eq!(search(&rows, "inst-3")[0].id, "inst-3");
    assert!(search(&rows, "eólica").is_empty());
}

// =============================================================
// Sort
// =============================================================

#[test]
fn default_sort_is_roi_descending() {
    let mut rows = table();
    sort_installations(&mut rows, SortConfig::default());
    assert_eq!(ids(&rows), vec!["inst-1", "inst-3", "inst-0", "inst-2"]);
}

#[test]
fn ties_keep_input_order() {
    let mut rows = table();
    sort_installations(&mut rows, SortConfig { key: SortKey::Capacity, direction: Direction::Ascending });
    assert_eq!(ids(&rows), vec!["inst-0", "inst-2", "inst-3", "inst-1"]);
    sort_installations(&mut rows, SortConfig { key: SortKey::Capacity, direction: Direction::Descending });
    assert_eq!(ids(&rows), vec!["inst-1", "inst-2", "inst-3", "inst-0"]);
}

#[test]
fn sector_sorts_by_label() {
    let mut rows = table();
    sort_installations(&mut rows, SortConfig { key: SortKey::Sector, direction: Direction::Ascending });
    let sectors: Vec<&str> = rows.iter().map(|i| i.sector.label()).collect();
    assert_eq!(sectors, vec!["Escritório", "Hospital", "Residencial", "Varejo"]);
}

#[test]
fn header_toggle_rule() {
    let start = SortConfig::default();
    let roi_asc = start.toggle(SortKey::Roi);
    assert_eq!(roi_asc.direction, Direction::Ascending);
    assert_eq!(roi_asc.toggle(SortKey::Roi).direction, Direction::Descending);
    assert_eq!(roi_asc.toggle(SortKey::Age), SortConfig { key: SortKey::Age, direction: Direction::Ascending });
}

// =============================================================
// Hulls
// =============================================================

#[test]
fn hulls_skip_small_sectors_but_keep_their_color_slot() {
    let mut rows = vec![categorized("h", Sector::Hotel, SizeClass::Small, 1.0, 1.0)];
    for (i, (lng, lat)) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.5, 0.5)].into_iter().enumerate() {
        let mut inst = installation(&format!("r{i}"), lng, lat);
        inst.sector = Sector::Residential;
        rows.push(inst);
    }

    let hulls = sector_hulls(&rows);
    assert_eq!(hulls.len(), 1);
    assert_eq!(hulls[0].sector, Sector::Residential);
    assert_eq!(hulls[0].count, 5);
    assert_eq!(hulls[0].color, crate::color::CATEGORY_10[1]);
    assert_eq!(hulls[0].ring.len(), 4);
    assert!(hulls[0].ring.contains(&[1.0, 0.0]));
}

#[test]
fn collinear_sector_has_no_hull() {
    let rows: Vec<Installation> =
        (0..4).map(|i| installation(&format!("c{i}"), f64::from(i), f64::from(i))).collect();
    assert!(sector_hulls(&rows).is_empty());
}

// =============================================================
// Footprints
// =============================================================

#[test]
fn footprints_are_centered_on_installations() {
    let mut rng = StdRng::seed_from_u64(3);
    let rows = vec![installation("a", -46.46, -23.66), installation("b", -46.45, -23.67)];
    let shapes = footprints(&mut rng, &rows, Metric::Capacity);
    assert_eq!(shapes.len(), 2);
    for (shape, inst) in shapes.iter().zip(&rows) {
        let lat = shape.ring.iter().map(|c| c[0]).sum::<f64>() / 4.0;
        let lng = shape.ring.iter().map(|c| c[1]).sum::<f64>() / 4.0;
        assert!((lat - inst.lat).abs() < 1e-12);
        assert!((lng - inst.lng).abs() < 1e-12);
        // 100 m² roofs stay well under 20 m across.
        assert!(shape.ring.iter().all(|c| (c[0] - inst.lat).abs() < 20.0 / 111_132.0));
    }
}

#[test]
fn footprint_fill_reverses_for_costs() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut cheap = installation("cheap", -46.46, -23.66);
    cheap.capex = 100.0;
    cheap.roi = 2.0;
    let mut dear = installation("dear", -46.46, -23.66);
    dear.capex = 900.0;
    dear.roi = 15.0;
    let rows = vec![cheap, dear];

    let by_capex = footprints(&mut rng, &rows, Metric::Capex);
    assert_eq!(by_capex[0].fill, "#006837");
    assert_eq!(by_capex[1].fill, "#a50026");

    let by_roi = footprints(&mut rng, &rows, Metric::Roi);
    assert_eq!(by_roi[0].fill, "#a50026");
    assert_eq!(by_roi[1].fill, "#006837");
}

#[test]
fn no_installations_no_footprints() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(footprints(&mut rng, &[], Metric::Roi).is_empty());
}

#[test]
fn roi_tiers() {
    assert_eq!(roi_tier(10.5), RoiTier::High);
    assert_eq!(roi_tier(10.0), RoiTier::Medium);
    assert_eq!(roi_tier(5.0), RoiTier::Low);
}
