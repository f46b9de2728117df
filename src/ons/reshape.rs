//! Turn raw ONS rows into the SIN dashboard data set.
//!
//! Rows are bucketed by `din_instante`, which sorts chronologically as
//! text. Generation and load sum across subsystems; the price attaches only
//! to instants that already have a bucket. An hour survives when it has a
//! non-zero load and positive generation. KPIs, sources and the mix describe
//! the most recent surviving hour.

use std::collections::BTreeMap;

use time::PrimitiveDateTime;
use time::macros::format_description;

use super::types::{GenerationRecord, LoadRecord, OnsError, PriceRecord};
use crate::format;
use crate::model::{
    ChangeType, ChartData, DashboardData, DemandSample, EnergyPrediction, GenerationSample, Icon, PriceSample,
};
use crate::services::dataset::{kpi, slice, source};

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    hydro: f64,
    thermal: f64,
    solar: f64,
    wind: f64,
    demand: Option<f64>,
    price: Option<f64>,
}

/// One surviving hour.
#[derive(Debug, Clone, PartialEq)]
pub struct GridHour {
    pub label: String,
    pub hydro: f64,
    pub thermal: f64,
    pub solar: f64,
    pub wind: f64,
    pub demand: f64,
    pub price: f64,
}

impl GridHour {
    #[must_use]
    pub fn generation(&self) -> f64 {
        self.hydro + self.thermal + self.solar + self.wind
    }
}

/// `H:00` from the instant's hour; the raw instant if it does not parse.
#[must_use]
pub fn hour_label(instant: &str) -> String {
    let fmt = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    match PrimitiveDateTime::parse(instant.get(..19).unwrap_or(instant), &fmt) {
        Ok(dt) => format!("{}:00", dt.hour()),
        Err(_) => instant.to_string(),
    }
}

/// Bucket, join and filter the three result sets, oldest hour first.
#[must_use]
pub fn merge_hours(generation: &[GenerationRecord], load: &[LoadRecord], price: &[PriceRecord]) -> Vec<GridHour> {
    let mut buckets: BTreeMap<&str, Bucket> = BTreeMap::new();

    for r in generation {
        let b = buckets.entry(r.din_instante.as_str()).or_default();
        b.hydro += r.val_geracao_hidraulica;
        b.thermal += r.val_geracao_termica + r.val_geracao_nuclear;
        b.solar += r.val_geracao_solar;
        b.wind += r.val_geracao_eolica;
    }
    for r in load {
        let b = buckets.entry(r.din_instante.as_str()).or_default();
        *b.demand.get_or_insert(0.0) += r.val_cargahoraria;
    }
    for r in price {
        if let Some(b) = buckets.get_mut(r.din_instante.as_str()) {
            b.price = Some(r.val_pld);
        }
    }

    buckets
        .into_iter()
        .filter_map(|(instant, b)| {
            let demand = b.demand.filter(|d| *d != 0.0)?;
            let hour = GridHour {
                label: hour_label(instant),
                hydro: b.hydro,
                thermal: b.thermal,
                solar: b.solar,
                wind: b.wind,
                demand,
                price: b.price.unwrap_or(0.0),
            };
            (hour.generation() > 0.0).then_some(hour)
        })
        .collect()
}

fn share(part: f64, total: f64) -> i64 {
    (part / total * 100.0).round() as i64
}

fn mix_fill(color: &str) -> &'static str {
    if color.starts_with("text-blue") {
        "#3b82f6"
    } else if color.starts_with("text-yellow") {
        "#facc15"
    } else {
        "#f97316"
    }
}

/// Settlement-price KPI title for a CCEE submarket code.
#[must_use]
pub fn price_title(submarket: &str) -> String {
    let region = match submarket {
        "SE" => "Sudeste",
        "S" => "Sul",
        "NE" => "Nordeste",
        "N" => "Norte",
        other => other,
    };
    format!("PLD ({region})")
}

/// Build the SIN data set from raw result sets. `submarket` is the code
/// the price query was filtered to.
///
/// # Errors
///
/// Returns [`OnsError::NoValidData`] when no hour survives the filter.
pub fn build_sin_data(
    generation: &[GenerationRecord],
    load: &[LoadRecord],
    price: &[PriceRecord],
    submarket: &str,
) -> Result<DashboardData, OnsError> {
    let hours = merge_hours(generation, load, price);
    let latest = hours.last().ok_or(OnsError::NoValidData)?;

    let total = latest.generation();
    let renewables = latest.solar + latest.wind;

    let mut hydro_kpi = kpi(2, "Geração Hidro", latest.hydro / 1000.0, 1, "GW", None, Icon::Water);
    hydro_kpi.change_type = ChangeType::Decrease;
    let kpis = vec![
        kpi(1, "Carga do SIN", latest.demand / 1000.0, 1, "GW", None, Icon::Bolt),
        hydro_kpi,
        kpi(3, &price_title(submarket), latest.price, 1, "R$/MWh", None, Icon::ChartLine),
        kpi(4, "Geração Solar/Eólica", renewables / 1000.0, 1, "GW", None, Icon::Sun),
    ];

    let gw = |mw: f64| format!("{} GW", format::gigawatts(mw));
    let energy_sources = vec![
        source("Hidrelétrica", &gw(latest.hydro), share(latest.hydro, total), Icon::Water, "text-blue-500"),
        source("Eólica + Solar", &gw(renewables), share(renewables, total), Icon::Sun, "text-yellow-400"),
        source("Térmica (Total)", &gw(latest.thermal), share(latest.thermal, total), Icon::Fire, "text-orange-500"),
    ];

    let energy_mix = energy_sources
        .iter()
        .map(|s| {
            let name = s.name.split(' ').next().unwrap_or(&s.name);
            slice(name, s.percentage as f64, mix_fill(&s.color))
        })
        .collect();

    let chart_data = ChartData {
        generation: hours
            .iter()
            .map(|h| GenerationSample { time: h.label.clone(), generation: h.generation(), demand: h.demand })
            .collect(),
        prices: hours.iter().map(|h| PriceSample { time: h.label.clone(), price: h.price }).collect(),
        energy_prediction: hours
            .iter()
            .map(|h| EnergyPrediction {
                time: h.label.clone(),
                solar: h.solar,
                thermal: h.thermal,
                hydro: h.hydro,
                battery: 0.0,
                wind: h.wind,
            })
            .collect(),
        demand_prediction: hours.iter().map(|h| DemandSample { time: h.label.clone(), value: h.demand }).collect(),
        energy_mix,
        ..ChartData::default()
    };

    Ok(DashboardData {
        kpis,
        alerts: Vec::new(),
        phases: Vec::new(),
        installations: Vec::new(),
        crypto_accounts: Vec::new(),
        energy_sources,
        chart_data,
    })
}

#[cfg(test)]
#[path = "reshape_test.rs"]
mod tests;
