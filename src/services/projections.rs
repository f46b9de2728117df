//! Annual projections 2023–2033 along a logistic S-curve.
//!
//! GDP and energy use per capita ease from today's national averages toward
//! the 2033 targets; solar grows toward 35% of consumption on the same curve.

use crate::model::AnnualProjection;

pub const START_YEAR: i32 = 2023;
pub const END_YEAR: i32 = 2033;

const POPULATION: f64 = 480_000.0;

const INITIAL_GDP_PER_CAPITA: f64 = 9_000.0;
const TARGET_GDP_PER_CAPITA: f64 = 50_000.0;
const INITIAL_ENERGY_PER_CAPITA: f64 = 2_800.0;
const TARGET_ENERGY_PER_CAPITA: f64 = 10_000.0;
/// GWh produced by solar in the start year.
const INITIAL_SOLAR_PRODUCTION: f64 = 50.0;
const TARGET_SOLAR_SHARE: f64 = 0.35;

const S_CURVE_STEEPNESS: f64 = 12.0;

/// Logistic easing of `progress` in [0, 1], centered at 0.5.
#[must_use]
pub fn s_curve(progress: f64) -> f64 {
    1.0 / (1.0 + (-S_CURVE_STEEPNESS * (progress - 0.5)).exp())
}

#[must_use]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// One row per year, `START_YEAR..=END_YEAR`.
#[must_use]
pub fn generate_annual_projections() -> Vec<AnnualProjection> {
    let span = f64::from(END_YEAR - START_YEAR);

    (START_YEAR..=END_YEAR)
        .map(|year| {
            let eased = s_curve(f64::from(year - START_YEAR) / span);

            let gdp_per_capita = lerp(INITIAL_GDP_PER_CAPITA, TARGET_GDP_PER_CAPITA, eased);
            let energy_per_capita = lerp(INITIAL_ENERGY_PER_CAPITA, TARGET_ENERGY_PER_CAPITA, eased);
            let total_consumption = energy_per_capita * POPULATION / 1_000_000.0;
            let solar_production =
                lerp(INITIAL_SOLAR_PRODUCTION, total_consumption * TARGET_SOLAR_SHARE, eased);
            let other_production = total_consumption - solar_production;

            AnnualProjection {
                year,
                solar_production: round_to(solar_production, 2),
                other_production: round_to(other_production, 2),
                total_consumption: round_to(total_consumption, 2),
                gdp_per_capita: gdp_per_capita.round(),
                energy_per_capita: energy_per_capita.round(),
            }
        })
        .collect()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
#[path = "projections_test.rs"]
mod tests;
