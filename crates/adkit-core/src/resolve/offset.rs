//! Numeric neighbourhood search: candidate generation.
//!
//! Pure enumeration, no probing. The probe loop lives in
//! [`super::strategy`]; this split keeps the ordering rules testable without
//! a scripted prober.

use crate::dimensions::Dimensions;

/// Bounds for the offset search.
///
/// Defaults match the content store's published constants; the config file
/// can tighten or widen them per installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBounds {
    /// Hard ceiling on offset magnitude.
    pub max_offset: u32,
    /// Per-dimension step cap, applied under `max_offset`.
    pub max_steps: u32,
    /// Cap on candidate combinations per file.
    pub max_candidates: usize,
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            max_offset: 20,
            max_steps: 10,
            max_candidates: 200,
        }
    }
}

impl SearchBounds {
    /// Effective per-dimension offset magnitude.
    pub fn step_limit(&self) -> u32 {
        self.max_steps.min(self.max_offset)
    }
}

/// The offset sequence `0, +1, -1, +2, -2, …` up to `±limit`.
///
/// Zero first so the unmodified request is always the first candidate, then
/// outward by distance with the larger value before the smaller at each step.
pub fn offset_sequence(limit: u32) -> Vec<i64> {
    let mut seq = Vec::with_capacity(1 + 2 * limit as usize);
    seq.push(0);
    for step in 1..=i64::from(limit) {
        seq.push(step);
        seq.push(-step);
    }
    seq
}

fn offset_dim(base: u32, delta: i64) -> Option<u32> {
    u32::try_from(i64::from(base) + delta).ok()
}

/// Candidate dimensions in nested order: height varies in the outer loop,
/// width in the middle, thickness in the inner. A dimension participates
/// only when its `vary_*` flag is set (the filename pattern references it).
/// Combinations that would push a dimension below zero are dropped. At most
/// `bounds.max_candidates` candidates are produced.
pub(crate) fn candidates(
    base: &Dimensions,
    vary_h: bool,
    vary_w: bool,
    vary_t: bool,
    bounds: &SearchBounds,
) -> Vec<Dimensions> {
    let limit = bounds.step_limit();
    let zero = vec![0i64];
    let hs = if vary_h { offset_sequence(limit) } else { zero.clone() };
    let ws = if vary_w { offset_sequence(limit) } else { zero.clone() };
    let ts = if vary_t { offset_sequence(limit) } else { zero };

    let base_t = base.thickness_or_depth();
    let mut out = Vec::new();
    'outer: for &dh in &hs {
        for &dw in &ws {
            for &dt in &ts {
                if out.len() == bounds.max_candidates {
                    break 'outer;
                }
                let Some(height) = offset_dim(base.height, dh) else {
                    continue;
                };
                let Some(width) = offset_dim(base.width, dw) else {
                    continue;
                };
                let Some(thickness) = offset_dim(base_t, dt) else {
                    continue;
                };
                out.push(Dimensions {
                    width,
                    height,
                    depth: base.depth,
                    thickness: Some(thickness),
                });
            }
        }
    }
    out
}
