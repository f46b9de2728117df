//! pt-BR number formatting.
//!
//! Thousands are grouped with `.` and the decimal separator is `,`, which is
//! what the dashboard labels, legends and KPI cards display.

/// Format with exactly `decimals` fraction digits: `1234.5` → `1.234,50`.
#[must_use]
pub fn fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "N/A".into();
    }
    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };

    let is_zero = rendered.bytes().all(|b| b == b'0' || b == b'.');
    let mut out = String::with_capacity(rendered.len() + int_part.len() / 3 + 1);
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// Format with at most `max_decimals` fraction digits, trimming trailing zeros.
#[must_use]
pub fn max_fraction(value: f64, max_decimals: usize) -> String {
    let s = fixed(value, max_decimals);
    if !s.contains(',') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches(',').to_string()
}

/// Brazilian real: `R$ 1.234,56`.
#[must_use]
pub fn currency_brl(value: f64) -> String {
    if value.is_sign_negative() && value != 0.0 {
        format!("-R$ {}", fixed(-value, 2))
    } else {
        format!("R$ {}", fixed(value, 2))
    }
}

/// KPI change label: `+0.1%`, `-0.2%`. Positive values carry an explicit sign.
#[must_use]
pub fn signed_percent(change: f64) -> String {
    let sign = if change > 0.0 { "+" } else { "" };
    format!("{sign}{change:.1}%")
}

/// MW → GW with one decimal, as the national-grid cards show it.
#[must_use]
pub fn gigawatts(megawatts: f64) -> String {
    fixed(megawatts / 1000.0, 1)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
