//! Treemap aggregation: installations grouped two levels deep.
//!
//! DESIGN
//! ======
//! The primary grouping is chosen by the caller. The secondary grouping is
//! the size class, or the sector when the primary is already the size class.
//! Every node's value is the summed capacity (m²) beneath it, and siblings
//! are ordered by value, largest first. Leaves carry the installation count,
//! the average of the color metric and the fill derived from it; primary
//! groups get a translucent neutral fill so their leaves show through.
//!
//! Grouping keeps first-seen order before the value sort, so ties stay in
//! input order.

pub mod layout;

use serde::Serialize;

use crate::color::{self, LinearScale, SequentialScale};
use crate::model::{Dimension, Installation, Metric};

pub use layout::{Padding, Rect};

/// Background for primary groups.
pub const PARENT_FILL: &str = "rgba(113, 128, 150, 0.1)";

pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;

/// Fixed ROI domain used by the ROI treemap, in percent.
pub const ROI_DOMAIN: (f64, f64) = (2.0, 17.0);

// =============================================================================
// TYPES
// =============================================================================

/// How leaf colors map onto the RdYlGn ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorDomain {
    /// Extent of the color metric over all installations, reversed for
    /// metrics where lower is better.
    Extent,
    /// A fixed domain, clamped.
    Fixed(f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreemapNode {
    pub name: String,
    pub depth: u8,
    /// Summed capacity, m².
    pub value: f64,
    pub count: usize,
    /// Average of the color metric; leaves only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_value: Option<f64>,
    /// Average capacity per installation; leaves only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_capacity: Option<f64>,
    pub fill: String,
    /// `value / parent.value`; 1 for the root.
    pub share_of_parent: f64,
    pub rect: Rect,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreemapNode>,
}

impl TreemapNode {
    fn group(name: &str, depth: u8) -> Self {
        Self {
            name: name.to_string(),
            depth,
            value: 0.0,
            count: 0,
            color_value: None,
            avg_capacity: None,
            fill: String::new(),
            share_of_parent: 1.0,
            rect: Rect::default(),
            children: Vec::new(),
        }
    }

    /// Depth-first, parents before children.
    pub fn descendants(&self) -> impl Iterator<Item = &TreemapNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Treemap {
    pub group_by: Dimension,
    pub secondary: Dimension,
    pub color_by: Metric,
    pub width: f64,
    pub height: f64,
    pub root: TreemapNode,
}

// =============================================================================
// AGGREGATION
// =============================================================================

#[must_use]
pub fn secondary_dimension(primary: Dimension) -> Dimension {
    match primary {
        Dimension::Size => Dimension::Sector,
        Dimension::Sector | Dimension::Orientation => Dimension::Size,
    }
}

fn leaf_scale(installations: &[Installation], color_by: Metric, domain: ColorDomain) -> SequentialScale {
    match domain {
        ColorDomain::Extent => {
            let extent = color::extent(installations.iter().map(|i| color_by.value(i))).unwrap_or((0.0, 1.0));
            SequentialScale::new(extent, color_by.lower_is_better())
        }
        ColorDomain::Fixed(lo, hi) => {
            let linear = if color_by.lower_is_better() { LinearScale::new(hi, lo) } else { LinearScale::new(lo, hi) };
            SequentialScale::from_linear(linear.clamped())
        }
    }
}

fn bucket<'a>(
    installations: impl IntoIterator<Item = &'a Installation>,
    by: Dimension,
) -> Vec<(&'static str, Vec<&'a Installation>)> {
    let mut groups: Vec<(&'static str, Vec<&Installation>)> = Vec::new();
    for inst in installations {
        let key = by.key(inst);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(inst),
            None => groups.push((key, vec![inst])),
        }
    }
    groups
}

fn sort_by_value(nodes: &mut [TreemapNode]) {
    nodes.sort_by(|a, b| b.value.total_cmp(&a.value));
}

/// Build the unlaid-out hierarchy. Every rectangle is zero until
/// [`layout::apply`] runs.
#[must_use]
pub fn aggregate(installations: &[Installation], group_by: Dimension, color_by: Metric, domain: ColorDomain) -> TreemapNode {
    let secondary = secondary_dimension(group_by);
    let scale = leaf_scale(installations, color_by, domain);

    let mut root = TreemapNode::group("root", 0);
    for (primary_key, members) in bucket(installations, group_by) {
        let mut parent = TreemapNode::group(primary_key, 1);
        parent.fill = PARENT_FILL.to_string();

        for (leaf_key, leaves) in bucket(members.iter().copied(), secondary) {
            let count = leaves.len();
            let capacity: f64 = leaves.iter().map(|i| i.capacity).sum();
            let avg = leaves.iter().map(|i| color_by.value(i)).sum::<f64>() / count as f64;

            let mut leaf = TreemapNode::group(leaf_key, 2);
            leaf.value = capacity;
            leaf.count = count;
            leaf.color_value = Some(avg);
            leaf.avg_capacity = Some(capacity / count as f64);
            leaf.fill = scale.color(avg);
            parent.children.push(leaf);
        }

        parent.value = parent.children.iter().map(|c| c.value).sum();
        parent.count = members.len();
        sort_by_value(&mut parent.children);
        root.children.push(parent);
    }

    root.value = root.children.iter().map(|c| c.value).sum();
    root.count = installations.len();
    sort_by_value(&mut root.children);
    assign_shares(&mut root);
    root
}

fn assign_shares(node: &mut TreemapNode) {
    let parent_value = node.value;
    for child in &mut node.children {
        child.share_of_parent = if parent_value > 0.0 { child.value / parent_value } else { 0.0 };
        assign_shares(child);
    }
}

/// Aggregate and lay out in a `width` × `height` canvas with default padding.
#[must_use]
pub fn build(
    installations: &[Installation],
    group_by: Dimension,
    color_by: Metric,
    domain: ColorDomain,
    (width, height): (f64, f64),
) -> Treemap {
    let mut root = aggregate(installations, group_by, color_by, domain);
    layout::apply(&mut root, width, height, Padding::default());
    tracing::debug!(?group_by, ?color_by, groups = root.children.len(), "treemap built");
    Treemap { group_by, secondary: secondary_dimension(group_by), color_by, width, height, root }
}

/// Sector → size treemap colored by average ROI on the fixed 2–17 % domain.
#[must_use]
pub fn roi_treemap(installations: &[Installation], size: (f64, f64)) -> Treemap {
    let (lo, hi) = ROI_DOMAIN;
    build(installations, Dimension::Sector, Metric::Roi, ColorDomain::Fixed(lo, hi), size)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
