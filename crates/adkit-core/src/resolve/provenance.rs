//! Resolution provenance carried with every resolved URL.

use crate::dimensions::Dimensions;

/// How a resolved URL was arrived at.
///
/// The annotation travels with the result instead of living in a shared
/// URL-to-note side table, so callers never have to recover it by string
/// matching and re-resolving a device cannot leak notes from a previous run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Served exactly as requested (statics and instructions are always
    /// exact; variable files are exact when the probe confirmed them).
    Exact,
    /// A size-table row replaced the requested dimensions; the file was
    /// confirmed to exist.
    TableSubstituted {
        requested_h: u32,
        used_h: u32,
        width: u32,
        thickness: u32,
    },
    /// Found by the numeric neighbourhood search.
    OffsetSubstituted { used: Dimensions },
    /// Best guess from the nearest table row, not confirmed to exist.
    Guessed {
        requested_h: u32,
        used_h: u32,
        width: u32,
        thickness: u32,
    },
    /// Nothing confirmed; the literal requested filename is kept so the
    /// failure surfaces at packaging or diagnostics time.
    Unresolved,
}

impl Provenance {
    pub fn is_exact(&self) -> bool {
        matches!(self, Provenance::Exact)
    }

    /// Short tag for list output.
    pub fn label(&self) -> &'static str {
        match self {
            Provenance::Exact => "exact",
            Provenance::TableSubstituted { .. } => "table",
            Provenance::OffsetSubstituted { .. } => "offset",
            Provenance::Guessed { .. } => "guessed",
            Provenance::Unresolved => "unresolved",
        }
    }

    /// Human-readable substitution note; `None` for exact matches.
    pub fn note(&self) -> Option<String> {
        match self {
            Provenance::Exact => None,
            Provenance::TableSubstituted {
                requested_h,
                used_h,
                width,
                thickness,
            } => Some(format!(
                "Size-table substitution: requested h={requested_h} -> using h={used_h} (w={width}, t={thickness})"
            )),
            Provenance::OffsetSubstituted { used } => Some(format!(
                "Nearest-size match: using h={}, w={}, t={}",
                used.height,
                used.width,
                used.thickness_or_depth()
            )),
            Provenance::Guessed {
                requested_h,
                used_h,
                width,
                thickness,
            } => Some(format!(
                "Guessed substitution: requested h={requested_h} -> guessed h={used_h} (w={width}, t={thickness})"
            )),
            Provenance::Unresolved => {
                Some("No existing size variant found; keeping the requested filename".to_string())
            }
        }
    }
}
