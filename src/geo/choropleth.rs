//! Choropleth aggregation: installations binned into neighbourhoods.
//!
//! DESIGN
//! ======
//! One pass over the installations: each point lands in the first region
//! (document order) whose polygon contains it, and every metric total for
//! that region is bumped. The requested metric is then resolved to a sum or
//! a mean, and regions with samples are painted on a 7-step quantized
//! YlOrRd scale over the observed extent.

use serde::Serialize;

use super::{Point, Region};
use crate::color::{self, NO_DATA, QuantizeScale, YL_OR_RD_7};
use crate::format;
use crate::model::{Installation, Metric};

/// How a metric folds across a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    Sum,
    Avg,
}

#[must_use]
pub fn reduction(metric: Metric) -> Reduction {
    match metric {
        Metric::Capacity | Metric::CarbonOffset => Reduction::Sum,
        Metric::Efficiency | Metric::Age | Metric::Roi | Metric::Capex | Metric::Opex => Reduction::Avg,
    }
}

#[must_use]
pub fn label(metric: Metric) -> &'static str {
    match metric {
        Metric::Capacity => "Capacidade Total (m²)",
        Metric::Efficiency => "Eficiência Média (%)",
        Metric::Age => "Idade Média (anos)",
        Metric::Roi => "ROI Médio (%)",
        Metric::Capex => "CAPEX Médio (R$)",
        Metric::Opex => "OPEX Médio (R$)",
        Metric::CarbonOffset => "CO₂ Offset Total (kg)",
    }
}

/// Display a metric value the way the map popups and legend do.
#[must_use]
pub fn format_value(metric: Metric, value: f64) -> String {
    match metric {
        Metric::Capacity | Metric::CarbonOffset => format::max_fraction(value, 0),
        Metric::Efficiency | Metric::Age | Metric::Roi => format::fixed(value, 1),
        Metric::Capex | Metric::Opex => format::currency_brl(value),
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAggregate {
    pub name: String,
    pub count: usize,
    /// Per-metric totals, in [`Metric::ALL`] order.
    #[serde(skip)]
    pub totals: [f64; 7],
    /// Resolved value for the requested metric; `None` without samples.
    pub value: Option<f64>,
    pub display_value: String,
    pub fill: String,
}

impl RegionAggregate {
    #[must_use]
    pub fn total(&self, metric: Metric) -> f64 {
        self.totals[metric_index(metric)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub color: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoroplethMap {
    pub metric: Metric,
    pub metric_label: &'static str,
    pub reduction: Reduction,
    pub regions: Vec<RegionAggregate>,
    /// Installations that fell outside every region.
    pub unassigned: usize,
    pub domain: (f64, f64),
    pub legend: Vec<LegendEntry>,
}

fn metric_index(metric: Metric) -> usize {
    Metric::ALL.iter().position(|m| *m == metric).unwrap_or_default()
}

// =============================================================================
// AGGREGATION
// =============================================================================

/// Bin `installations` into `regions` and color them by `metric`.
#[must_use]
pub fn aggregate(regions: &[Region], installations: &[Installation], metric: Metric) -> ChoroplethMap {
    let mut counts = vec![0usize; regions.len()];
    let mut totals = vec![[0.0f64; 7]; regions.len()];
    let mut unassigned = 0usize;

    for inst in installations {
        let point = Point::new(inst.lng, inst.lat);
        let Some(idx) = regions.iter().position(|r| r.contains(point)) else {
            unassigned += 1;
            continue;
        };
        counts[idx] += 1;
        for (slot, m) in totals[idx].iter_mut().zip(Metric::ALL) {
            let v = m.value(inst);
            if v.is_finite() {
                *slot += v;
            }
        }
    }

    let how = reduction(metric);
    let values: Vec<Option<f64>> = counts
        .iter()
        .zip(&totals)
        .map(|(&count, t)| {
            if count == 0 {
                return None;
            }
            let total = t[metric_index(metric)];
            Some(match how {
                Reduction::Avg => total / count as f64,
                Reduction::Sum => total,
            })
        })
        .collect();

    let domain = color::extent(values.iter().flatten().copied()).unwrap_or((0.0, 1.0));
    let scale = QuantizeScale::new(domain, &YL_OR_RD_7);

    let aggregates = regions
        .iter()
        .zip(counts)
        .zip(totals)
        .zip(values)
        .map(|(((region, count), totals), value)| RegionAggregate {
            name: region.name.clone(),
            count,
            totals,
            value,
            display_value: value.map_or_else(|| "N/A".to_string(), |v| format_value(metric, v)),
            fill: value.map_or_else(|| NO_DATA.to_string(), |v| scale.color(v).to_string()),
        })
        .collect();

    tracing::debug!(?metric, regions = regions.len(), unassigned, "choropleth aggregated");

    ChoroplethMap {
        metric,
        metric_label: label(metric),
        reduction: how,
        regions: aggregates,
        unassigned,
        domain,
        legend: legend(&scale, metric),
    }
}

/// Legend rows for a quantized scale, ending with the no-data swatch.
#[must_use]
pub fn legend(scale: &QuantizeScale, metric: Metric) -> Vec<LegendEntry> {
    let palette = scale.palette();
    let (lo, hi) = scale.domain();
    let fmt = |v: f64| format_value(metric, v);
    let mut entries = Vec::with_capacity(palette.len() + 1);

    if lo == hi || palette.len() < 2 {
        let label = if lo == hi { fmt(lo) } else { format!("{} – {}", fmt(lo), fmt(hi)) };
        let color = scale.color(lo).to_string();
        entries.push(LegendEntry { color, label });
    } else {
        let grades = scale.thresholds();
        let last = grades.len() - 1;
        entries.push(LegendEntry { color: palette[0].to_string(), label: format!("< {}", fmt(grades[0])) });
        for i in 0..last {
            entries.push(LegendEntry {
                color: palette[i + 1].to_string(),
                label: format!("{} – {}", fmt(grades[i]), fmt(grades[i + 1])),
            });
        }
        entries.push(LegendEntry { color: palette[last + 1].to_string(), label: format!("≥ {}", fmt(grades[last])) });
    }

    entries.push(LegendEntry { color: NO_DATA.to_string(), label: "Sem Dados".into() });
    entries
}

#[cfg(test)]
#[path = "choropleth_test.rs"]
mod tests;
