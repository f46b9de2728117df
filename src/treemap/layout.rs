//! Squarified treemap layout with outer, top and inner padding.
//!
//! Tiling follows the squarify algorithm with a golden-ratio target aspect:
//! children are packed into rows along the shorter side of the remaining
//! rectangle, and a row grows while its worst aspect ratio keeps improving.
//! Zero-valued children get a degenerate rectangle.

use serde::Serialize;

use super::TreemapNode;

/// Target aspect ratio for squarified rows.
pub const PHI: f64 = 1.618_033_988_749_895;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Shrink by `left/top/right/bottom`; an inverted axis collapses to its midpoint.
    fn inset(self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        let (mut x0, mut y0, mut x1, mut y1) = (self.x0 + left, self.y0 + top, self.x1 - right, self.y1 - bottom);
        if x1 < x0 {
            x0 = (x0 + x1) / 2.0;
            x1 = x0;
        }
        if y1 < y0 {
            y0 = (y0 + y1) / 2.0;
            y1 = y0;
        }
        Self { x0, y0, x1, y1 }
    }
}

/// Gaps, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Padding {
    /// Between a parent's edge and its children, except the top.
    pub outer: f64,
    /// Between a parent's top edge and its children; leaves room for a label.
    pub top: f64,
    /// Between siblings.
    pub inner: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self { outer: 8.0, top: 20.0, inner: 2.0 }
    }
}

/// Lay out `root` and all descendants inside a `width` × `height` canvas.
pub fn apply(root: &mut TreemapNode, width: f64, height: f64, padding: Padding) {
    root.rect = Rect::new(0.0, 0.0, width, height);
    position(root, 0.0, padding);
}

fn position(node: &mut TreemapNode, inset: f64, padding: Padding) {
    node.rect = node.rect.inset(inset, inset, inset, inset);
    if node.children.is_empty() {
        return;
    }

    let half = padding.inner / 2.0;
    let side = padding.outer - half;
    let area = node.rect.inset(side, padding.top - half, side, side);
    let values: Vec<f64> = node.children.iter().map(|c| c.value).collect();

    for (child, rect) in node.children.iter_mut().zip(squarify(&values, area, PHI)) {
        child.rect = rect;
        position(child, half, padding);
    }
}

/// Tile `values` into `rect`, returning one rectangle per value in input order.
#[must_use]
pub fn squarify(values: &[f64], rect: Rect, ratio: f64) -> Vec<Rect> {
    let n = values.len();
    let mut out = vec![Rect::new(rect.x0, rect.y0, rect.x0, rect.y0); n];
    let mut remaining: f64 = values.iter().sum();
    if n == 0 || remaining <= 0.0 || !remaining.is_finite() {
        return out;
    }

    let Rect { mut x0, mut y0, mut x1, mut y1 } = rect;
    let (mut i0, mut i1) = (0usize, 0usize);

    while i0 < n {
        // Only zeros left: nothing to divide.
        if values[i0..].iter().all(|v| *v == 0.0) {
            for slot in &mut out[i0..] {
                *slot = Rect::new(x0, y0, x0, y0);
            }
            break;
        }
        let (dx, dy) = (x1 - x0, y1 - y0);

        // First non-empty value seeds the row.
        let mut sum;
        loop {
            sum = values[i1];
            i1 += 1;
            if sum != 0.0 || i1 >= n {
                break;
            }
        }
        let (mut min, mut max) = (sum, sum);
        let alpha = (dy / dx).max(dx / dy) / (remaining * ratio);
        let mut worst = worst_ratio(sum, min, max, alpha);

        while i1 < n {
            let v = values[i1];
            let candidate = worst_ratio(sum + v, min.min(v), max.max(v), alpha);
            if candidate > worst {
                break;
            }
            sum += v;
            min = min.min(v);
            max = max.max(v);
            worst = candidate;
            i1 += 1;
        }

        let row = &values[i0..i1];
        let slots = &mut out[i0..i1];
        if dx < dy {
            let row_y1 = if dy == 0.0 { y1 } else { y0 + dy * sum / remaining };
            dice(row, slots, Rect::new(x0, y0, x1, row_y1));
            if dy != 0.0 {
                y0 = row_y1;
            }
        } else {
            let row_x1 = if dx == 0.0 { x1 } else { x0 + dx * sum / remaining };
            slice(row, slots, Rect::new(x0, y0, row_x1, y1));
            if dx != 0.0 {
                x0 = row_x1;
            }
        }

        remaining -= sum;
        i0 = i1;
    }

    out
}

fn worst_ratio(sum: f64, min: f64, max: f64, alpha: f64) -> f64 {
    let beta = sum * sum * alpha;
    (max / beta).max(beta / min)
}

/// Left to right across the row.
fn dice(values: &[f64], slots: &mut [Rect], r: Rect) {
    let total: f64 = values.iter().sum();
    let k = if total == 0.0 { 0.0 } else { r.width() / total };
    let mut x = r.x0;
    for (v, slot) in values.iter().zip(slots) {
        let next = x + v * k;
        *slot = Rect::new(x, r.y0, next, r.y1);
        x = next;
    }
}

/// Top to bottom down the row.
fn slice(values: &[f64], slots: &mut [Rect], r: Rect) {
    let total: f64 = values.iter().sum();
    let k = if total == 0.0 { 0.0 } else { r.height() / total };
    let mut y = r.y0;
    for (v, slot) in values.iter().zip(slots) {
        let next = y + v * k;
        *slot = Rect::new(r.x0, y, r.x1, next);
        y = next;
    }
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
