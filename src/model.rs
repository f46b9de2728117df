//! Domain records shared by the generators, aggregators and the feed.
//!
//! DESIGN
//! ======
//! Every record serializes with camelCase keys and Portuguese category
//! labels so the JSON the CLI emits is what the dashboard views consume.
//! Numeric values stay numeric; locale formatting happens in `format`.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// CATEGORIES
// =============================================================================

/// Building sector an installation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "Residencial")]
    Residential,
    #[serde(rename = "Hospital")]
    Hospital,
    #[serde(rename = "Hotel")]
    Hotel,
    #[serde(rename = "Escritório")]
    Office,
    #[serde(rename = "Varejo")]
    Retail,
    #[serde(rename = "Depósito")]
    Warehouse,
}

impl Sector {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Residential => "Residencial",
            Self::Hospital => "Hospital",
            Self::Hotel => "Hotel",
            Self::Office => "Escritório",
            Self::Retail => "Varejo",
            Self::Warehouse => "Depósito",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// System size bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeClass {
    #[serde(rename = "Pequeno")]
    Small,
    #[serde(rename = "Médio")]
    Medium,
    #[serde(rename = "Grande")]
    Large,
}

impl SizeClass {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Small => "Pequeno",
            Self::Medium => "Médio",
            Self::Large => "Grande",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Roof orientation of the panel array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "Norte")]
    North,
    #[serde(rename = "Sul")]
    South,
    #[serde(rename = "Leste")]
    East,
    #[serde(rename = "Oeste")]
    West,
    #[serde(rename = "Plano")]
    Flat,
}

impl Orientation {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::North => "Norte",
            Self::South => "Sul",
            Self::East => "Leste",
            Self::West => "Oeste",
            Self::Flat => "Plano",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// INSTALLATION
// =============================================================================

/// One simulated solar installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installation {
    pub id: String,
    #[serde(rename = "setor")]
    pub sector: Sector,
    #[serde(rename = "tamanho")]
    pub size: SizeClass,
    #[serde(rename = "orientacao")]
    pub orientation: Orientation,
    /// Panel efficiency, percent.
    pub efficiency: f64,
    /// Usable roof area, m².
    pub capacity: f64,
    /// Years in service.
    pub age: f64,
    /// Annual return, percent.
    pub roi: f64,
    /// Installed cost, R$.
    pub capex: f64,
    /// Annual operating cost, R$.
    pub opex: f64,
    /// Avoided emissions, kg CO₂ per year.
    pub carbon_offset: f64,
    pub lat: f64,
    pub lng: f64,
}

/// Numeric installation fields that views can aggregate or color by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Efficiency,
    Capacity,
    Age,
    Roi,
    Capex,
    Opex,
    CarbonOffset,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::Capacity,
        Metric::Efficiency,
        Metric::Age,
        Metric::Roi,
        Metric::Capex,
        Metric::Opex,
        Metric::CarbonOffset,
    ];

    #[must_use]
    pub fn value(self, inst: &Installation) -> f64 {
        match self {
            Self::Efficiency => inst.efficiency,
            Self::Capacity => inst.capacity,
            Self::Age => inst.age,
            Self::Roi => inst.roi,
            Self::Capex => inst.capex,
            Self::Opex => inst.opex,
            Self::CarbonOffset => inst.carbon_offset,
        }
    }

    /// Metrics where a smaller value is the better outcome.
    #[must_use]
    pub fn lower_is_better(self) -> bool {
        matches!(self, Self::Age | Self::Capex | Self::Opex)
    }
}

/// Categorical installation fields usable as grouping keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum Dimension {
    #[serde(rename = "setor")]
    Sector,
    #[serde(rename = "tamanho")]
    Size,
    #[serde(rename = "orientacao")]
    Orientation,
}

impl Dimension {
    #[must_use]
    pub fn key(self, inst: &Installation) -> &'static str {
        match self {
            Self::Sector => inst.sector.label(),
            Self::Size => inst.size.label(),
            Self::Orientation => inst.orientation.label(),
        }
    }
}

// =============================================================================
// DASHBOARD RECORDS
// =============================================================================

/// Which feed the dashboard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataSource {
    /// Simulated MEX Energy DAO program.
    Dao,
    /// Brazilian national grid, via ONS open data.
    Sin,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dao => "DAO",
            Self::Sin => "SIN",
        })
    }
}

/// Icon key the view layer maps to a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Bolt,
    SolarPanel,
    ChartLine,
    Brain,
    Sun,
    Fire,
    Water,
    Battery,
    Wind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub id: u32,
    pub title: String,
    pub value: f64,
    /// Fraction digits used when displaying `value`.
    pub decimals: usize,
    pub unit: String,
    /// Last relative change, percent. `None` when the source reports none.
    pub change: Option<f64>,
    pub change_type: ChangeType,
    pub icon: Icon,
}

impl Kpi {
    #[must_use]
    pub fn display_value(&self) -> String {
        crate::format::fixed(self.value, self.decimals)
    }

    #[must_use]
    pub fn display_change(&self) -> String {
        self.change.map(crate::format::signed_percent).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: u32,
    #[serde(rename = "type")]
    pub level: AlertLevel,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseStatus {
    #[serde(rename = "Concluída")]
    Done,
    #[serde(rename = "Em Andamento")]
    InProgress,
    #[serde(rename = "Planejada")]
    Planned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub id: u32,
    pub title: String,
    pub status: PhaseStatus,
    /// Completion, 0..=100.
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoAccount {
    pub id: String,
    pub name: String,
    pub balance: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergySource {
    pub name: String,
    pub capacity: String,
    pub percentage: i64,
    pub icon: Icon,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualProjection {
    pub year: i32,
    /// GWh.
    pub solar_production: f64,
    /// GWh.
    pub other_production: f64,
    /// GWh.
    pub total_consumption: f64,
    /// USD.
    pub gdp_per_capita: f64,
    /// kWh.
    pub energy_per_capita: f64,
}

// =============================================================================
// CHART SERIES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSample {
    pub time: String,
    #[serde(rename = "geracao")]
    pub generation: f64,
    #[serde(rename = "demanda")]
    pub demand: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub time: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub time: String,
    #[serde(rename = "irradiacao")]
    pub irradiance: f64,
    pub temp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixSlice {
    pub name: String,
    pub value: f64,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyPrediction {
    pub time: String,
    pub solar: f64,
    pub thermal: f64,
    pub hydro: f64,
    pub battery: f64,
    #[serde(rename = "eolica")]
    pub wind: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandSample {
    pub time: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    pub day: String,
    #[serde(rename = "geracaoPrevista")]
    pub expected_generation: f64,
    #[serde(rename = "irradiacao")]
    pub irradiance: f64,
    pub temp: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub generation: Vec<GenerationSample>,
    pub efficiency: Vec<NamedValue>,
    pub prices: Vec<PriceSample>,
    pub weather: Vec<WeatherSample>,
    pub annual_projections: Vec<AnnualProjection>,
    pub energy_mix: Vec<MixSlice>,
    pub energy_prediction: Vec<EnergyPrediction>,
    pub demand_prediction: Vec<DemandSample>,
    pub seven_day_forecast: Vec<DailyForecast>,
}

/// Everything one dashboard render needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub kpis: Vec<Kpi>,
    pub alerts: Vec<Alert>,
    pub phases: Vec<Phase>,
    pub installations: Vec<Installation>,
    pub crypto_accounts: Vec<CryptoAccount>,
    pub energy_sources: Vec<EnergySource>,
    pub chart_data: ChartData,
}
