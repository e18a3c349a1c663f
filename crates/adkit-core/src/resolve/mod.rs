//! Nearest-size resolution.
//!
//! Turns one requested variable file into a concrete store URL by trying an
//! ordered plan of strategies: exact probe, size-table substitution, numeric
//! offset search, then a guessed or literal fallback. Resolution is total;
//! a file that cannot be confirmed still yields a URL, tagged so the failure
//! surfaces at packaging or diagnostics time instead of silently vanishing
//! from the bundle.

mod offset;
mod provenance;
mod strategy;
mod table;

pub use offset::{offset_sequence, SearchBounds};
pub use provenance::Provenance;
pub use strategy::{resolve_file, resolve_literal_part, FileQuery};
pub use table::{nearest_row, rank_rows, row_candidate};

/// A resolved store URL and how it was arrived at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    pub url: String,
    pub provenance: Provenance,
}

impl ResolvedUrl {
    /// Substitution note for display; `None` when the URL is exact.
    pub fn note(&self) -> Option<String> {
        self.provenance.note()
    }
}
