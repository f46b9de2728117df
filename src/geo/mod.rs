//! Geometry: GeoJSON regions, point containment and convex hulls.
//!
//! DESIGN
//! ======
//! Regions come from a GeoJSON FeatureCollection of Polygon or MultiPolygon
//! features with `[lng, lat]` positions. Containment is planar even-odd ray
//! casting; at neighbourhood scale the spherical correction is negligible.
//!
//! The simplified Mauá neighbourhood polygons ship embedded in the binary.

pub mod choropleth;

use serde::Deserialize;

const MAUA_BAIRROS: &str = include_str!("maua_bairros.geojson");

/// Property carrying the neighbourhood name.
pub const NAME_PROPERTY: &str = "NM_BAIRRO";
pub const UNKNOWN_REGION: &str = "Bairro Desconhecido";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// The document is not valid GeoJSON for our purposes.
    #[error("geojson parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// A polygon ring has fewer than three positions.
    #[error("feature {feature}: ring with {len} positions (need at least 3)")]
    DegenerateRing { feature: usize, len: usize },
}

// =============================================================================
// PRIMITIVES
// =============================================================================

/// A position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lng: f64,
    pub lat: f64,
}

impl Point {
    #[must_use]
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// Exterior ring plus optional holes. Rings may or may not repeat the first position.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub exterior: Vec<Point>,
    pub holes: Vec<Vec<Point>>,
}

impl Polygon {
    #[must_use]
    pub fn new(exterior: Vec<Point>) -> Self {
        Self { exterior, holes: Vec::new() }
    }

    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        ring_contains(&self.exterior, p) && !self.holes.iter().any(|h| ring_contains(h, p))
    }
}

/// Even-odd ray cast toward +lng.
#[must_use]
pub fn ring_contains(ring: &[Point], p: Point) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.lat > p.lat) != (b.lat > p.lat) {
            let crossing = (b.lng - a.lng) * (p.lat - a.lat) / (b.lat - a.lat) + a.lng;
            if p.lng < crossing {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// A named area made of one or more polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub polygons: Vec<Polygon>,
}

impl Region {
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.polygons.iter().any(|poly| poly.contains(p))
    }
}

// =============================================================================
// GEOJSON
// =============================================================================

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<serde_json::Map<String, serde_json::Value>>,
    geometry: Option<Geometry>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<[f64; 2]>>> },
    #[serde(other)]
    Unsupported,
}

/// Parse a FeatureCollection into regions, in document order.
///
/// Features without geometry or with non-polygonal geometry are skipped.
///
/// # Errors
///
/// Returns [`GeoError::Parse`] for malformed JSON and
/// [`GeoError::DegenerateRing`] for rings with fewer than three positions.
pub fn parse_regions(json: &str) -> Result<Vec<Region>, GeoError> {
    let collection: FeatureCollection = serde_json::from_str(json)?;
    let mut regions = Vec::with_capacity(collection.features.len());

    for (idx, feature) in collection.features.into_iter().enumerate() {
        let rings_per_polygon = match feature.geometry {
            Some(Geometry::Polygon { coordinates }) => vec![coordinates],
            Some(Geometry::MultiPolygon { coordinates }) => coordinates,
            Some(Geometry::Unsupported) | None => {
                tracing::debug!(feature = idx, "skipping feature without polygon geometry");
                continue;
            }
        };

        let mut polygons = Vec::with_capacity(rings_per_polygon.len());
        for rings in rings_per_polygon {
            let mut rings = rings.into_iter().map(|ring| to_points(idx, ring));
            let Some(exterior) = rings.next().transpose()? else {
                continue;
            };
            let holes = rings.collect::<Result<Vec<_>, _>>()?;
            polygons.push(Polygon { exterior, holes });
        }

        let name = feature
            .properties
            .as_ref()
            .and_then(|p| p.get(NAME_PROPERTY))
            .and_then(serde_json::Value::as_str)
            .unwrap_or(UNKNOWN_REGION)
            .to_string();

        regions.push(Region { name, polygons });
    }

    Ok(regions)
}

fn to_points(feature: usize, ring: Vec<[f64; 2]>) -> Result<Vec<Point>, GeoError> {
    if ring.len() < 3 {
        return Err(GeoError::DegenerateRing { feature, len: ring.len() });
    }
    Ok(ring.into_iter().map(|[lng, lat]| Point { lng, lat }).collect())
}

/// The embedded Mauá neighbourhoods.
///
/// # Errors
///
/// Only fails if the embedded document is corrupt.
pub fn maua_regions() -> Result<Vec<Region>, GeoError> {
    parse_regions(MAUA_BAIRROS)
}

// =============================================================================
// CONVEX HULL
// =============================================================================

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.lng - o.lng) * (b.lat - o.lat) - (a.lat - o.lat) * (b.lng - o.lng)
}

/// Convex hull by monotone chain, counter-clockwise, without repeating the
/// first point. `None` when fewer than three non-collinear points remain.
#[must_use]
pub fn convex_hull(points: &[Point]) -> Option<Vec<Point>> {
    let mut pts: Vec<Point> = points.iter().copied().filter(|p| p.lng.is_finite() && p.lat.is_finite()).collect();
    pts.sort_by(|a, b| a.lng.total_cmp(&b.lng).then(a.lat.total_cmp(&b.lat)));
    pts.dedup();
    if pts.len() < 3 {
        return None;
    }

    let mut lower: Vec<Point> = Vec::with_capacity(pts.len());
    for &p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(pts.len());
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);

    (lower.len() >= 3).then_some(lower)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
