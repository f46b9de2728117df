use super::*;

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
    vec![Point::new(x0, y0), Point::new(x1, y0), Point::new(x1, y1), Point::new(x0, y1), Point::new(x0, y0)]
}

// =============================================================
// Containment
// =============================================================

#[test]
fn ring_contains_interior_not_exterior() {
    let ring = square(0.0, 0.0, 10.0, 10.0);
    assert!(ring_contains(&ring, Point::new(5.0, 5.0)));
    assert!(!ring_contains(&ring, Point::new(15.0, 5.0)));
    assert!(!ring_contains(&ring, Point::new(5.0, -1.0)));
}

#[test]
fn ring_without_closing_position_still_works() {
    let mut ring = square(0.0, 0.0, 4.0, 4.0);
    ring.pop();
    assert!(ring_contains(&ring, Point::new(1.0, 3.0)));
}

#[test]
fn concave_ring_excludes_notch() {
    // U shape opening upward.
    let ring = vec![
        Point::new(0.0, 0.0),
        Point::new(6.0, 0.0),
        Point::new(6.0, 6.0),
        Point::new(4.0, 6.0),
        Point::new(4.0, 2.0),
        Point::new(2.0, 2.0),
        Point::new(2.0, 6.0),
        Point::new(0.0, 6.0),
    ];
    assert!(ring_contains(&ring, Point::new(1.0, 5.0)));
    assert!(!ring_contains(&ring, Point::new(3.0, 5.0)));
}

#[test]
fn polygon_hole_is_excluded() {
    let poly = Polygon { exterior: square(0.0, 0.0, 10.0, 10.0), holes: vec![square(4.0, 4.0, 6.0, 6.0)] };
    assert!(poly.contains(Point::new(2.0, 2.0)));
    assert!(!poly.contains(Point::new(5.0, 5.0)));
}

#[test]
fn degenerate_ring_contains_nothing() {
    assert!(!ring_contains(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], Point::new(0.5, 0.5)));
}

// =============================================================
// GeoJSON
// =============================================================

#[test]
fn embedded_maua_regions_parse() {
    let regions = maua_regions().unwrap();
    assert_eq!(regions.len(), 10);
    assert_eq!(regions[0].name, "Jardim Zaíra");
    assert_eq!(regions[4].name, "Centro");
    assert_eq!(regions[9].name, "Sertãozinho");
    assert!(regions.iter().all(|r| r.polygons.len() == 1));
}

#[test]
fn maua_point_lookup() {
    let regions = maua_regions().unwrap();
    let find = |p: Point| regions.iter().find(|r| r.contains(p)).map(|r| r.name.as_str());

    assert_eq!(find(Point::new(-46.4535, -23.6915)), Some("Jardim Zaíra"));
    assert_eq!(find(Point::new(-46.425, -23.7075)), Some("Sertãozinho"));
    assert_eq!(find(Point::new(0.0, 0.0)), None);
}

#[test]
fn overlapping_regions_resolve_to_document_order() {
    let regions = maua_regions().unwrap();
    let p = Point::new(-46.461, -23.666);
    let centro = regions.iter().find(|r| r.name == "Centro").unwrap();
    assert!(centro.contains(p));
    let first = regions.iter().find(|r| r.contains(p)).unwrap();
    assert_eq!(first.name, "Parque São Vicente");
}

#[test]
fn multipolygon_and_missing_name() {
    let json = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": {}, "geometry": { "type": "MultiPolygon", "coordinates": [
                [[[0,0],[1,0],[1,1],[0,1],[0,0]]],
                [[[5,5],[6,5],[6,6],[5,6],[5,5]]]
            ] } }
        ]
    }"#;
    let regions = parse_regions(json).unwrap();
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].name, UNKNOWN_REGION);
    assert!(regions[0].contains(Point::new(0.5, 0.5)));
    assert!(regions[0].contains(Point::new(5.5, 5.5)));
    assert!(!regions[0].contains(Point::new(3.0, 3.0)));
}

#[test]
fn non_polygon_features_are_skipped() {
    let json = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "NM_BAIRRO": "Ponto" }, "geometry": { "type": "Point", "coordinates": [0, 0] } },
            { "type": "Feature", "properties": { "NM_BAIRRO": "Vazio" }, "geometry": null },
            { "type": "Feature", "properties": { "NM_BAIRRO": "Quadra" }, "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]] } }
        ]
    }"#;
    let regions = parse_regions(json).unwrap();
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].name, "Quadra");
}

#[test]
fn degenerate_ring_is_rejected() {
    let json = r#"{ "features": [ { "properties": null, "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,1]]] } } ] }"#;
    let err = parse_regions(json).unwrap_err();
    assert!(matches!(err, GeoError::DegenerateRing { feature: 0, len: 2 }));
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(parse_regions("not json").unwrap_err(), GeoError::Parse(_)));
}

// =============================================================
// Convex hull
// =============================================================

#[test]
fn hull_drops_interior_points() {
    let mut pts = square(0.0, 0.0, 4.0, 4.0);
    pts.push(Point::new(2.0, 2.0));
    pts.push(Point::new(1.0, 3.0));
    let hull = convex_hull(&pts).unwrap();
    assert_eq!(hull.len(), 4);
    assert!(!hull.contains(&Point::new(2.0, 2.0)));
}

#[test]
fn hull_is_counter_clockwise() {
    let hull = convex_hull(&square(0.0, 0.0, 2.0, 2.0)).unwrap();
    let area2: f64 = hull
        .iter()
        .zip(hull.iter().cycle().skip(1))
        .map(|(a, b)| a.lng * b.lat - b.lng * a.lat)
        .sum();
    assert!(area2 > 0.0);
}

#[test]
fn hull_needs_three_non_collinear_points() {
    assert!(convex_hull(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).is_none());
    assert!(convex_hull(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)]).is_none());
    assert!(convex_hull(&[Point::new(0.0, 0.0), Point::new(0.0, 0.0), Point::new(0.0, 0.0)]).is_none());
}
