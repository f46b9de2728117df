use super::*;
use crate::geo::Polygon;
use crate::model::test_helpers::installation;

fn square_region(name: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Region {
    let ring = vec![Point::new(x0, y0), Point::new(x1, y0), Point::new(x1, y1), Point::new(x0, y1)];
    Region { name: name.into(), polygons: vec![Polygon::new(ring)] }
}

/// A and B overlap on lng 5..10; C never receives a point.
fn regions() -> Vec<Region> {
    vec![
        square_region("A", 0.0, 0.0, 10.0, 10.0),
        square_region("B", 5.0, 0.0, 15.0, 10.0),
        square_region("C", 20.0, 20.0, 30.0, 30.0),
    ]
}

fn installations() -> Vec<Installation> {
    let mut b = installation("b", 12.0, 5.0);
    b.roi = 12.0;
    vec![installation("a1", 2.0, 2.0), installation("a2", 7.0, 5.0), b, installation("out", 100.0, 100.0)]
}

#[test]
fn points_bin_into_first_containing_region() {
    let map = aggregate(&regions(), &installations(), Metric::Capacity);
    let counts: Vec<usize> = map.regions.iter().map(|r| r.count).collect();
    assert_eq!(counts, vec![2, 1, 0]);
    assert_eq!(map.unassigned, 1);
}

#[test]
fn capacity_sums_and_roi_averages() {
    let capacity = aggregate(&regions(), &installations(), Metric::Capacity);
    assert_eq!(capacity.reduction, Reduction::Sum);
    assert_eq!(capacity.regions[0].value, Some(200.0));
    assert_eq!(capacity.regions[1].value, Some(100.0));
    assert_eq!(capacity.domain, (100.0, 200.0));
    assert_eq!(capacity.regions[0].display_value, "200");

    let roi = aggregate(&regions(), &installations(), Metric::Roi);
    assert_eq!(roi.reduction, Reduction::Avg);
    assert_eq!(roi.regions[0].value, Some(8.0));
    assert_eq!(roi.regions[1].display_value, "12,0");
    assert!((roi.regions[0].total(Metric::Roi) - 16.0).abs() < 1e-9);
}

#[test]
fn extremes_take_the_outer_palette_steps() {
    let map = aggregate(&regions(), &installations(), Metric::Capacity);
    assert_eq!(map.regions[0].fill, YL_OR_RD_7[6]);
    assert_eq!(map.regions[1].fill, YL_OR_RD_7[0]);
}

#[test]
fn empty_region_is_painted_as_no_data() {
    let map = aggregate(&regions(), &installations(), Metric::Opex);
    let empty = &map.regions[2];
    assert_eq!(empty.value, None);
    assert_eq!(empty.display_value, "N/A");
    assert_eq!(empty.fill, NO_DATA);
}

#[test]
fn no_samples_falls_back_to_unit_domain() {
    let map = aggregate(&regions(), &[], Metric::Efficiency);
    assert_eq!(map.domain, (0.0, 1.0));
    assert!(map.regions.iter().all(|r| r.fill == NO_DATA));
    assert_eq!(map.unassigned, 0);
}

#[test]
fn legend_has_one_row_per_step_plus_no_data() {
    let map = aggregate(&regions(), &installations(), Metric::Capacity);
    assert_eq!(map.legend.len(), 8);
    assert_eq!(map.legend[0].label, "< 114");
    assert_eq!(map.legend[0].color, YL_OR_RD_7[0]);
    assert_eq!(map.legend[6].label, "≥ 186");
    assert!(map.legend[1].label.contains(" – "));
    let last = map.legend.last().unwrap();
    assert_eq!(last.label, "Sem Dados");
    assert_eq!(last.color, NO_DATA);
}

#[test]
fn degenerate_domain_collapses_legend() {
    // Both populated regions average 18.0 efficiency.
    let map = aggregate(&regions(), &installations(), Metric::Efficiency);
    assert_eq!(map.domain, (18.0, 18.0));
    assert_eq!(map.legend.len(), 2);
    assert_eq!(map.legend[0].label, "18,0");
    assert_eq!(map.regions[0].fill, map.legend[0].color);
}

#[test]
fn currency_metrics_use_brl() {
    assert_eq!(format_value(Metric::Capex, 5386.5), "R$ 5.386,50");
    assert_eq!(label(Metric::CarbonOffset), "CO₂ Offset Total (kg)");
    assert_eq!(reduction(Metric::CarbonOffset), Reduction::Sum);
}
