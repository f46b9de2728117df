//! Installation generator: synthetic solar installations around Mauá.
//!
//! DESIGN
//! ======
//! The sample is stratified by sector: each sector gets a share of the
//! target count proportional to its building count (at least one), and
//! splits its total roof area evenly across its installations. Size and
//! orientation are drawn from fixed categorical distributions; coordinates
//! are normal scatter around one of four neighbourhood cluster centers.
//!
//! All randomness comes from the caller's `Rng`, so a seeded generator
//! yields a reproducible sample.

use std::f64::consts::PI;

use rand::Rng;

use crate::model::{Installation, Orientation, Sector, SizeClass};

pub const DEFAULT_TARGET_COUNT: usize = 400;

/// Installed kW per m² of usable roof.
const KW_PER_M2: f64 = 0.18;
/// Installed cost, R$ per kW.
const CAPEX_PER_KW: f64 = 3500.0;
/// Annual OPEX as a fraction of CAPEX.
const OPEX_RATE: f64 = 0.015;
/// Annual yield, kWh per installed kW.
const SPECIFIC_YIELD_KWH_PER_KW: f64 = 1400.0;
/// Brazilian grid emission factor, kg CO₂ per kWh.
const GRID_EMISSION_KG_PER_KWH: f64 = 0.0817;

const CLUSTER_RADIUS_DEG: f64 = 0.015;

/// Building stock per sector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorProfile {
    pub sector: Sector,
    pub buildings: u32,
    /// Total roof area, m².
    pub area: f64,
}

pub const SECTOR_PROFILES: [SectorProfile; 6] = [
    SectorProfile { sector: Sector::Residential, buildings: 113_429, area: 17_099_000.0 },
    SectorProfile { sector: Sector::Hospital, buildings: 281, area: 107_000.0 },
    SectorProfile { sector: Sector::Hotel, buildings: 38, area: 72_000.0 },
    SectorProfile { sector: Sector::Office, buildings: 3_918, area: 1_815_000.0 },
    SectorProfile { sector: Sector::Retail, buildings: 7_523, area: 2_693_000.0 },
    SectorProfile { sector: Sector::Warehouse, buildings: 977, area: 295_000.0 },
];

pub const SIZE_DISTRIBUTION: [(SizeClass, f64); 3] =
    [(SizeClass::Small, 0.533), (SizeClass::Medium, 0.351), (SizeClass::Large, 0.116)];

pub const ORIENTATION_DISTRIBUTION: [(Orientation, f64); 5] = [
    (Orientation::North, 0.107),
    (Orientation::South, 0.084),
    (Orientation::East, 0.089),
    (Orientation::West, 0.095),
    (Orientation::Flat, 0.624),
];

/// Neighbourhood centers as (lat, lng).
pub const CLUSTER_CENTERS: [(f64, f64); 4] =
    [(-23.6675, -46.4608), (-23.68, -46.45), (-23.65, -46.47), (-23.66, -46.44)];

// =============================================================================
// SAMPLING
// =============================================================================

/// Pick from a categorical distribution by walking its cumulative weights.
///
/// Falls back to the last entry when rounding leaves the weights short of 1.
///
/// # Panics
///
/// Panics if `dist` is empty.
pub fn weighted_choice<T: Copy, R: Rng + ?Sized>(rng: &mut R, dist: &[(T, f64)]) -> T {
    let roll: f64 = rng.random();
    let mut cumulative = 0.0;
    for &(item, probability) in dist {
        cumulative += probability;
        if roll < cumulative {
            return item;
        }
    }
    dist[dist.len() - 1].0
}

/// One pair of independent standard normals (Box–Muller).
pub fn standard_normal_pair<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    // 1 - U lies in (0, 1], keeping ln() finite.
    let u1 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    let radius = (-2.0 * u1.ln()).sqrt();
    let theta = 2.0 * PI * u2;
    (radius * theta.cos(), radius * theta.sin())
}

/// Installations allotted to a sector for a given sample size.
#[must_use]
pub fn sector_count(profile: &SectorProfile, total_buildings: u32, target: usize) -> usize {
    let share = f64::from(profile.buildings) / f64::from(total_buildings) * target as f64;
    (share.round() as usize).max(1)
}

#[must_use]
pub fn carbon_offset_kg(capacity_m2: f64) -> f64 {
    capacity_m2 * KW_PER_M2 * SPECIFIC_YIELD_KWH_PER_KW * GRID_EMISSION_KG_PER_KWH
}

// =============================================================================
// GENERATOR
// =============================================================================

/// Generate a stratified sample of roughly `target_count` installations.
pub fn generate_installations<R: Rng + ?Sized>(rng: &mut R, target_count: usize) -> Vec<Installation> {
    let total_buildings: u32 = SECTOR_PROFILES.iter().map(|p| p.buildings).sum();
    let mut installations = Vec::with_capacity(target_count + SECTOR_PROFILES.len());

    for profile in &SECTOR_PROFILES {
        let count = sector_count(profile, total_buildings, target_count);
        let area_per_installation = profile.area / count as f64;

        for _ in 0..count {
            let size = weighted_choice(rng, &SIZE_DISTRIBUTION);
            let orientation = weighted_choice(rng, &ORIENTATION_DISTRIBUTION);

            let efficiency = 16.0 + rng.random::<f64>() * 6.0;
            let age = rng.random::<f64>() * 10.0;
            let capacity_kw = area_per_installation * KW_PER_M2;
            let capex = capacity_kw * CAPEX_PER_KW;
            let opex = capex * OPEX_RATE;
            let roi = 7.0 + (efficiency - 16.0) / 6.0 * 10.0 - age / 2.0;

            let (center_lat, center_lng) = CLUSTER_CENTERS[rng.random_range(0..CLUSTER_CENTERS.len())];
            let (z1, z2) = standard_normal_pair(rng);
            let lat = center_lat + z1 * CLUSTER_RADIUS_DEG * 0.5;
            let lng = center_lng + z2 * CLUSTER_RADIUS_DEG * 0.5;

            let capacity = area_per_installation * (0.8 + rng.random::<f64>() * 0.4);

            installations.push(Installation {
                id: format!("inst-{}", installations.len()),
                sector: profile.sector,
                size,
                orientation,
                efficiency,
                capacity,
                age,
                roi,
                capex,
                opex,
                carbon_offset: carbon_offset_kg(capacity),
                lat,
                lng,
            });
        }
    }

    tracing::debug!(count = installations.len(), target_count, "generated installations");
    installations
}

#[cfg(test)]
#[path = "installations_test.rs"]
mod tests;
