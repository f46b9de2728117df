//! Color scales for map and treemap fills.
//!
//! DESIGN
//! ======
//! Palettes are the ColorBrewer schemes the dashboard used. Continuous
//! interpolation is piecewise-linear in RGB between scheme stops, which
//! keeps scheme endpoints exact and stays visually close to a spline ramp.

/// ColorBrewer RdYlGn, 11 classes (red = low, green = high).
pub const RD_YL_GN: [&str; 11] = [
    "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#d9ef8b", "#a6d96a", "#66bd63", "#1a9850",
    "#006837",
];

/// ColorBrewer YlOrRd, 9 classes with the two lightest dropped.
pub const YL_OR_RD_7: [&str; 7] = ["#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c", "#bd0026", "#800026"];

/// D3 category10.
pub const CATEGORY_10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// Fill for regions without samples.
pub const NO_DATA: &str = "#4A5568";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb`. Invalid input yields black.
    #[must_use]
    pub fn from_hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        let channel = |i: usize| hex.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok()).unwrap_or(0);
        Self(channel(0), channel(2), channel(4))
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round().clamp(0.0, 255.0) as u8;
        Self(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// Sample a multi-stop ramp at `t` in [0, 1].
#[must_use]
pub fn ramp(stops: &[&str], t: f64) -> String {
    match stops.len() {
        0 => NO_DATA.to_string(),
        1 => stops[0].to_string(),
        n => {
            let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
            let pos = t * (n - 1) as f64;
            let i = (pos.floor() as usize).min(n - 2);
            let frac = pos - i as f64;
            Rgb::from_hex(stops[i]).lerp(Rgb::from_hex(stops[i + 1]), frac).to_hex()
        }
    }
}

#[must_use]
pub fn interpolate_rd_yl_gn(t: f64) -> String {
    ramp(&RD_YL_GN, t)
}

/// Ordinal category10 color for the `index`-th distinct key.
#[must_use]
pub fn category10(index: usize) -> &'static str {
    CATEGORY_10[index % CATEGORY_10.len()]
}

// =============================================================================
// SCALES
// =============================================================================

/// Maps `[d0, d1]` onto `[0, 1]`, optionally clamped. `d0 > d1` reverses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub d0: f64,
    pub d1: f64,
    pub clamp: bool,
}

impl LinearScale {
    #[must_use]
    pub fn new(d0: f64, d1: f64) -> Self {
        Self { d0, d1, clamp: false }
    }

    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.clamp = true;
        self
    }

    /// Degenerate domains map everything to the midpoint.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        let span = self.d1 - self.d0;
        if span == 0.0 || !span.is_finite() {
            return 0.5;
        }
        let t = (value - self.d0) / span;
        if self.clamp { t.clamp(0.0, 1.0) } else { t }
    }
}

/// Sequential RdYlGn scale over a data extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequentialScale {
    scale: LinearScale,
}

impl SequentialScale {
    /// When `reversed`, low values are green and high values red.
    #[must_use]
    pub fn new((lo, hi): (f64, f64), reversed: bool) -> Self {
        let scale = if reversed { LinearScale::new(hi, lo) } else { LinearScale::new(lo, hi) };
        Self { scale }
    }

    #[must_use]
    pub fn from_linear(scale: LinearScale) -> Self {
        Self { scale }
    }

    #[must_use]
    pub fn color(&self, value: f64) -> String {
        interpolate_rd_yl_gn(self.scale.apply(value))
    }
}

/// Equal-width bins over `[lo, hi]`, one palette entry per bin.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizeScale {
    lo: f64,
    hi: f64,
    palette: Vec<&'static str>,
}

impl QuantizeScale {
    #[must_use]
    pub fn new((lo, hi): (f64, f64), palette: &[&'static str]) -> Self {
        Self { lo, hi, palette: palette.to_vec() }
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    #[must_use]
    pub fn palette(&self) -> &[&'static str] {
        &self.palette
    }

    /// Interior bin boundaries; `palette.len() - 1` values.
    #[must_use]
    pub fn thresholds(&self) -> Vec<f64> {
        let n = self.palette.len();
        (1..n).map(|i| self.lo + (self.hi - self.lo) * i as f64 / n as f64).collect()
    }

    #[must_use]
    pub fn color(&self, value: f64) -> &'static str {
        if self.palette.is_empty() {
            return NO_DATA;
        }
        let idx = self.thresholds().iter().filter(|t| **t <= value).count();
        self.palette[idx.min(self.palette.len() - 1)]
    }
}

/// Min and max over finite values; `None` when there are none.
#[must_use]
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
#[path = "color_test.rs"]
mod tests;
