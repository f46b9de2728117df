//! Installation views: table search and sort, sector hulls and roof footprints.
//!
//! DESIGN
//! ======
//! These are the read-only projections the installations tab draws from the
//! generated records. Hulls and footprints come out as `[lat, lng]` rings,
//! the order map layers take them in.

use std::cmp::Ordering;
use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{self, SequentialScale};
use crate::geo::{self, Point};
use crate::model::{Installation, Metric, Sector};

/// Metres per degree of latitude.
const METERS_PER_DEG_LAT: f64 = 111_132.0;
/// Metres per degree of longitude at the equator.
const METERS_PER_DEG_LNG_EQUATOR: f64 = 111_320.0;

// =============================================================================
// SEARCH
// =============================================================================

/// Case-insensitive substring match on id, sector or size label.
#[must_use]
pub fn search<'a>(installations: &'a [Installation], term: &str) -> Vec<&'a Installation> {
    if term.is_empty() {
        return installations.iter().collect();
    }
    let needle = term.to_lowercase();
    installations
        .iter()
        .filter(|inst| {
            inst.id.to_lowercase().contains(&needle)
                || inst.sector.label().to_lowercase().contains(&needle)
                || inst.size.label().to_lowercase().contains(&needle)
        })
        .collect()
}

// =============================================================================
// SORT
// =============================================================================

/// Table columns that can be sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Id,
    Sector,
    Size,
    Capacity,
    Efficiency,
    Age,
    Roi,
    Capex,
    Opex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: Direction,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self { key: SortKey::Roi, direction: Direction::Descending }
    }
}

impl SortConfig {
    /// Header click: the same column flips ascending to descending,
    /// anything else starts ascending.
    #[must_use]
    pub fn toggle(self, key: SortKey) -> Self {
        let direction = if self.key == key && self.direction == Direction::Ascending {
            Direction::Descending
        } else {
            Direction::Ascending
        };
        Self { key, direction }
    }
}

fn compare(a: &Installation, b: &Installation, key: SortKey) -> Ordering {
    let by = |m: Metric| m.value(a).total_cmp(&m.value(b));
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Sector => a.sector.label().cmp(b.sector.label()),
        SortKey::Size => a.size.label().cmp(b.size.label()),
        SortKey::Capacity => by(Metric::Capacity),
        SortKey::Efficiency => by(Metric::Efficiency),
        SortKey::Age => by(Metric::Age),
        SortKey::Roi => by(Metric::Roi),
        SortKey::Capex => by(Metric::Capex),
        SortKey::Opex => by(Metric::Opex),
    }
}

/// Stable sort; ties keep their input order in both directions.
pub fn sort_installations(installations: &mut [Installation], config: SortConfig) {
    installations.sort_by(|a, b| {
        let ord = compare(a, b, config.key);
        match config.direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    });
}

// =============================================================================
// SECTOR HULLS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorHull {
    pub sector: Sector,
    pub count: usize,
    pub color: &'static str,
    /// `[lat, lng]` vertices, counter-clockwise.
    pub ring: Vec<[f64; 2]>,
}

/// One hull per sector with at least three installations.
///
/// Colors follow the order in which sectors first appear, counting sectors
/// that are too small for a hull.
#[must_use]
pub fn sector_hulls(installations: &[Installation]) -> Vec<SectorHull> {
    let mut groups: Vec<(Sector, Vec<Point>)> = Vec::new();
    for inst in installations {
        let point = Point::new(inst.lng, inst.lat);
        match groups.iter_mut().find(|(s, _)| *s == inst.sector) {
            Some((_, points)) => points.push(point),
            None => groups.push((inst.sector, vec![point])),
        }
    }

    groups
        .iter()
        .enumerate()
        .filter(|(_, (_, points))| points.len() >= 3)
        .filter_map(|(idx, (sector, points))| {
            let hull = geo::convex_hull(points)?;
            Some(SectorHull {
                sector: *sector,
                count: points.len(),
                color: color::category10(idx),
                ring: hull.iter().map(|p| [p.lat, p.lng]).collect(),
            })
        })
        .collect()
}

// =============================================================================
// FOOTPRINTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Footprint {
    pub id: String,
    /// Four `[lat, lng]` corners.
    pub ring: [[f64; 2]; 4],
    pub fill: String,
}

/// A randomly oriented rectangle per installation whose ground area equals
/// its usable capacity in m².
pub fn footprints<R: Rng + ?Sized>(rng: &mut R, installations: &[Installation], color_by: Metric) -> Vec<Footprint> {
    let Some(domain) = color::extent(installations.iter().map(|i| color_by.value(i))) else {
        return Vec::new();
    };
    let scale = SequentialScale::new(domain, color_by.lower_is_better());

    installations
        .iter()
        .map(|inst| {
            let aspect = 0.7 + rng.random::<f64>() * 0.6;
            let width_m = (inst.capacity * aspect).sqrt();
            let height_m = if width_m > 0.0 { inst.capacity / width_m } else { 0.0 };

            let half_w = width_m / (METERS_PER_DEG_LNG_EQUATOR * inst.lat.to_radians().cos()) / 2.0;
            let half_h = height_m / METERS_PER_DEG_LAT / 2.0;

            let angle = rng.random::<f64>() * PI;
            let (sin, cos) = angle.sin_cos();
            let corner = |x: f64, y: f64| [inst.lat + x * sin + y * cos, inst.lng + x * cos - y * sin];

            Footprint {
                id: inst.id.clone(),
                ring: [
                    corner(-half_w, -half_h),
                    corner(half_w, -half_h),
                    corner(half_w, half_h),
                    corner(-half_w, half_h),
                ],
                fill: scale.color(color_by.value(inst)),
            }
        })
        .collect()
}

// =============================================================================
// ROI TIER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoiTier {
    High,
    Medium,
    Low,
}

#[must_use]
pub fn roi_tier(roi: f64) -> RoiTier {
    if roi > 10.0 {
        RoiTier::High
    } else if roi > 5.0 {
        RoiTier::Medium
    } else {
        RoiTier::Low
    }
}

#[cfg(test)]
#[path = "explore_test.rs"]
mod tests;
