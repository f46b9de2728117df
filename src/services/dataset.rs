//! Dashboard data sets: the simulated DAO program and the SIN fallback.
//!
//! DESIGN
//! ======
//! `generate_dao_data` assembles everything the dashboard renders for the
//! MEX Energy DAO: static program facts (KPIs, phases, treasury accounts,
//! energy matrix) plus randomized intraday chart series, the installation
//! sample and the 2023–2033 projections.
//!
//! `generate_sin_fallback` is a static national-grid snapshot with noisy
//! series, installed when the ONS fetch fails.

use std::f64::consts::PI;

use rand::Rng;
use serde::Serialize;

use crate::model::{
    Alert, AlertLevel, ChangeType, ChartData, CryptoAccount, DailyForecast, DashboardData, DemandSample,
    EnergyPrediction, EnergySource, GenerationSample, Icon, Kpi, MixSlice, NamedValue, Phase, PhaseStatus,
    PriceSample, WeatherSample,
};
use crate::services::installations::generate_installations;
use crate::services::projections::generate_annual_projections;

// =============================================================================
// BUILDERS
// =============================================================================

pub(crate) fn kpi(id: u32, title: &str, value: f64, decimals: usize, unit: &str, change: Option<f64>, icon: Icon) -> Kpi {
    let change_type = match change {
        Some(c) if c < 0.0 => ChangeType::Decrease,
        _ => ChangeType::Increase,
    };
    Kpi { id, title: title.into(), value, decimals, unit: unit.into(), change, change_type, icon }
}

fn alert(id: u32, level: AlertLevel, message: &str, timestamp: &str) -> Alert {
    Alert { id, level, message: message.into(), timestamp: timestamp.into() }
}

fn phase(id: u32, title: &str, status: PhaseStatus, progress: u8) -> Phase {
    Phase { id, title: title.into(), status, progress }
}

fn account(id: &str, name: &str, balance: &str, address: &str) -> CryptoAccount {
    CryptoAccount { id: id.into(), name: name.into(), balance: balance.into(), address: address.into() }
}

pub(crate) fn source(name: &str, capacity: &str, percentage: i64, icon: Icon, color: &str) -> EnergySource {
    EnergySource { name: name.into(), capacity: capacity.into(), percentage, icon, color: color.into() }
}

pub(crate) fn slice(name: &str, value: f64, fill: &str) -> MixSlice {
    MixSlice { name: name.into(), value, fill: fill.into() }
}

/// `0:00`, `2:00`, … for `count` two-hourly samples.
fn two_hourly(i: usize) -> String {
    format!("{}:00", i * 2)
}

// =============================================================================
// DAO
// =============================================================================

/// Build the simulated DAO data set with `installation_count` target installations.
pub fn generate_dao_data<R: Rng + ?Sized>(rng: &mut R, installation_count: usize) -> DashboardData {
    let kpis = vec![
        kpi(1, "Geração do Projeto", 1280.0, 0, "MW", Some(2.5), Icon::Bolt),
        kpi(2, "Eficiência Média", 18.7, 1, "%", Some(0.2), Icon::SolarPanel),
        kpi(3, "ROI do Projeto", 15.2, 1, "%", Some(-0.1), Icon::ChartLine),
        kpi(4, "Otimização IA", 98.9, 1, "%", Some(1.1), Icon::Brain),
    ];

    let alerts = vec![
        alert(1, AlertLevel::Info, "Manutenção programada para o setor B2 em 24h.", "há 2 minutos"),
        alert(
            2,
            AlertLevel::Warning,
            "Irradiação solar abaixo do esperado no setor industrial de Capuava.",
            "há 15 minutos",
        ),
    ];

    let phases = vec![
        phase(1, "Fase 1: Piloto", PhaseStatus::Done, 100),
        phase(2, "Fase 2: Expansão A", PhaseStatus::InProgress, 75),
        phase(3, "Fase 3: Expansão B", PhaseStatus::InProgress, 30),
        phase(4, "Otimização", PhaseStatus::Planned, 0),
    ];

    let installations = generate_installations(rng, installation_count);

    let crypto_accounts = vec![
        account("acc-1", "Reserva de Tesouraria", "1,250,000 MEX", "0x1A...fE3d"),
        account("acc-2", "Fundo de Manutenção", "450,000 MEX", "0x2B...gH4f"),
        account("acc-3", "Dividendos de Energia", "875,000 MEX", "0x3C...iJ5g"),
        account("acc-4", "Investimento em P&D", "200,000 MEX", "0x4D...kL6h"),
    ];

    let energy_sources = vec![
        source("Solar", "1.100 MW", 55, Icon::Sun, "text-yellow-400"),
        source("Eólica", "300 MW", 15, Icon::Wind, "text-cyan-400"),
        source("Térmica (Biocombustível)", "300 MW", 15, Icon::Fire, "text-orange-500"),
        source("Hidrelétrica", "200 MW", 10, Icon::Water, "text-blue-500"),
        source("Baterias", "100 MWh", 5, Icon::Battery, "text-green-500"),
    ];

    let chart_data = ChartData {
        generation: (0..12)
            .map(|i| GenerationSample {
                time: two_hourly(i),
                generation: 1000.0 + rng.random::<f64>() * 300.0,
                demand: 900.0 + rng.random::<f64>() * 400.0,
            })
            .collect(),
        efficiency: vec![
            NamedValue { name: "Residencial".into(), value: 19.2 },
            NamedValue { name: "Comercial".into(), value: 18.5 },
            NamedValue { name: "Industrial".into(), value: 18.1 },
        ],
        prices: (0..12)
            .map(|i| PriceSample { time: two_hourly(i), price: 0.5 + rng.random::<f64>() * 0.2 })
            .collect(),
        weather: (0..12)
            .map(|i| WeatherSample {
                time: two_hourly(i),
                irradiance: 800.0 + rng.random::<f64>() * 200.0,
                temp: 20.0 + rng.random::<f64>() * 5.0,
            })
            .collect(),
        annual_projections: generate_annual_projections(),
        energy_mix: vec![
            slice("Solar", 55.0, "#facc15"),
            slice("Eólica", 15.0, "#22d3ee"),
            slice("Térmica", 15.0, "#f97316"),
            slice("Hidro", 10.0, "#3b82f6"),
            slice("Baterias", 5.0, "#22c55e"),
        ],
        energy_prediction: (0..24).map(|hour| predict_dispatch(rng, hour)).collect(),
        demand_prediction: (0..24).map(|hour| predict_demand(rng, hour)).collect(),
        seven_day_forecast: (1..=7)
            .map(|d| DailyForecast {
                day: format!("D+{d}"),
                expected_generation: 6.4 + (rng.random::<f64>() - 0.5) * 2.0,
                irradiance: 5.5 + (rng.random::<f64>() - 0.5) * 2.0,
                temp: 24.0 + (rng.random::<f64>() - 0.5) * 6.0,
            })
            .collect(),
    };

    DashboardData { kpis, alerts, phases, installations, crypto_accounts, energy_sources, chart_data }
}

/// Hourly dispatch of the DAO matrix: daytime solar bell, night wind,
/// evening hydro/thermal/battery support. Values are clamped at zero.
fn predict_dispatch<R: Rng + ?Sized>(rng: &mut R, hour: u32) -> EnergyPrediction {
    let h = f64::from(hour);

    let solar = if (6..=18).contains(&hour) {
        1100.0 * ((h - 6.0) * PI / 12.0).sin() + (rng.random::<f64>() - 0.5) * 100.0
    } else {
        rng.random::<f64>() * 5.0
    };
    let wind = if !(7..=18).contains(&hour) {
        250.0 + rng.random::<f64>() * 50.0
    } else {
        80.0 + rng.random::<f64>() * 40.0
    };
    let mut hydro = 100.0 + (rng.random::<f64>() - 0.5) * 15.0;
    if (17..=22).contains(&hour) {
        hydro = 200.0 + (rng.random::<f64>() - 0.5) * 20.0;
    }
    let mut thermal = 10.0 + rng.random::<f64>() * 10.0;
    if (18..=21).contains(&hour) {
        thermal = 250.0 + rng.random::<f64>() * 50.0;
    }
    let battery = if (18..=22).contains(&hour) { 25.0 + (rng.random::<f64>() - 0.5) * 10.0 } else { 0.0 };

    EnergyPrediction {
        time: format!("{hour}:00"),
        solar: solar.max(0.0),
        thermal: thermal.max(0.0),
        hydro: hydro.max(0.0),
        battery: battery.max(0.0),
        wind: wind.max(0.0),
    }
}

/// Hourly demand: base load with a daily swing and a Gaussian evening peak at 19h.
fn predict_demand<R: Rng + ?Sized>(rng: &mut R, hour: u32) -> DemandSample {
    let h = f64::from(hour);
    let base = 1000.0;
    let daily = ((h - 2.0) * PI / 12.0).sin() * 200.0;
    let evening_peak = (-(h - 19.0).powi(2) / 4.0).exp() * 500.0;
    let value = base + daily + evening_peak + (rng.random::<f64>() - 0.5) * 100.0;
    DemandSample { time: format!("{hour}:00"), value }
}

// =============================================================================
// SIN FALLBACK
// =============================================================================

/// Static national-grid snapshot used when live ONS data is unavailable.
pub fn generate_sin_fallback<R: Rng + ?Sized>(rng: &mut R) -> DashboardData {
    let kpis = vec![
        kpi(1, "Carga do SIN", 75.3, 1, "GW", Some(1.8), Icon::Bolt),
        kpi(2, "Geração Hidro", 45.1, 1, "GW", Some(-0.5), Icon::Water),
        kpi(3, "CMO (Sudeste)", 180.5, 1, "R$/MWh", Some(3.2), Icon::ChartLine),
        kpi(4, "Geração Solar/Eólica", 15.2, 1, "GW", Some(4.5), Icon::Sun),
    ];

    let alerts = vec![alert(
        1,
        AlertLevel::Critical,
        "Falha ao carregar dados do ONS. Exibindo dados de exemplo.",
        "agora",
    )];

    let energy_sources = vec![
        source("Hidrelétrica", "109 GW", 60, Icon::Water, "text-blue-500"),
        source("Eólica + Solar", "36 GW", 20, Icon::Sun, "text-yellow-400"),
        source("Térmica (Total)", "27 GW", 15, Icon::Fire, "text-orange-500"),
        source("Outras", "9 GW", 5, Icon::Bolt, "text-green-500"),
    ];

    let chart_data = ChartData {
        generation: (0..12)
            .map(|i| GenerationSample {
                time: two_hourly(i),
                generation: 70_000.0 + rng.random::<f64>() * 8_000.0,
                demand: 68_000.0 + rng.random::<f64>() * 8_000.0,
            })
            .collect(),
        prices: (0..12)
            .map(|i| PriceSample { time: two_hourly(i), price: 150.0 + rng.random::<f64>() * 50.0 })
            .collect(),
        energy_mix: vec![
            slice("Hidro", 60.0, "#3b82f6"),
            slice("Eólica/Solar", 20.0, "#facc15"),
            slice("Térmica", 15.0, "#f97316"),
            slice("Outras", 5.0, "#22c55e"),
        ],
        ..ChartData::default()
    };

    DashboardData {
        kpis,
        alerts,
        phases: Vec::new(),
        installations: Vec::new(),
        crypto_accounts: Vec::new(),
        energy_sources,
        chart_data,
    }
}

// =============================================================================
// DUCK CURVE
// =============================================================================

/// One hour of the dispatch chart with demand and net demand joined in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuckCurvePoint {
    pub time: String,
    pub demand: f64,
    pub total_generation: f64,
    /// Demand left after solar and wind, floored at zero.
    pub net_demand: f64,
}

/// Join the energy and demand predictions by position. Missing demand reads as 0.
#[must_use]
pub fn duck_curve(chart: &ChartData) -> Vec<DuckCurvePoint> {
    chart
        .energy_prediction
        .iter()
        .enumerate()
        .map(|(i, ep)| {
            let demand = chart.demand_prediction.get(i).map_or(0.0, |d| d.value);
            let total_generation = ep.solar + ep.thermal + ep.hydro + ep.battery + ep.wind;
            let net_demand = (demand - (ep.solar + ep.wind)).max(0.0);
            DuckCurvePoint { time: ep.time.clone(), demand, total_generation, net_demand }
        })
        .collect()
}

#[cfg(test)]
#[path = "dataset_test.rs"]
mod tests;
