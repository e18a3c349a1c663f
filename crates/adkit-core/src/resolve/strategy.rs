//! Ordered resolution strategies behind a single `attempt` interface.

use crate::catalog::SizeRow;
use crate::dimensions::Dimensions;
use crate::pattern;
use crate::probe::Prober;
use crate::store;

use super::offset::{self, SearchBounds};
use super::provenance::Provenance;
use super::table;
use super::ResolvedUrl;

/// Everything needed to resolve one variable file.
#[derive(Debug, Clone, Copy)]
pub struct FileQuery<'a> {
    pub prefix: &'a str,
    pub device_id: &'a str,
    pub pattern: &'a str,
    pub part: Option<&'a str>,
    pub dims: &'a Dimensions,
    pub table: &'a [SizeRow],
    pub bounds: &'a SearchBounds,
}

impl FileQuery<'_> {
    fn url_for(&self, dims: &Dimensions) -> String {
        let filename = pattern::format_filename(self.pattern, self.device_id, dims, self.part);
        store::file_url(self.prefix, self.device_id, &filename)
    }

    /// True when a size table is configured and its nearest row is not the
    /// requested height. The exact size is not manufactured at all, so
    /// probing for it is pointless.
    fn height_not_manufactured(&self) -> bool {
        match table::nearest_row(self.table, self.dims.height) {
            Some(row) => row.h != self.dims.height,
            None => false,
        }
    }
}

/// One step of the resolution plan. Every strategy has the same shape:
/// attempt the query, return a resolved URL or pass to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// Probe the filename exactly as requested.
    Exact,
    /// Probe ranked size-table rows with their `med` presets.
    Table,
    /// Probe the numeric neighbourhood of the request.
    Offset,
    /// Take the nearest table row without probing.
    Guess,
    /// Keep the requested filename, marked unresolved. Terminates a plan.
    Literal,
}

/// Plan when the requested height is not manufactured at all: no probing of
/// the exact request, substitute from the table or guess.
const UNMANUFACTURED_PLAN: &[Strategy] = &[Strategy::Table, Strategy::Guess, Strategy::Literal];

/// Plan when the exact request might exist (its height is in the table, or
/// there is no table).
const PROBE_PLAN: &[Strategy] = &[
    Strategy::Exact,
    Strategy::Table,
    Strategy::Offset,
    Strategy::Literal,
];

impl Strategy {
    fn attempt(&self, q: &FileQuery<'_>, prober: &dyn Prober) -> Option<ResolvedUrl> {
        match self {
            Strategy::Exact => {
                let url = q.url_for(q.dims);
                prober.exists(&url).then_some(ResolvedUrl {
                    url,
                    provenance: Provenance::Exact,
                })
            }
            Strategy::Table => {
                for row in table::rank_rows(q.table, q.dims.height) {
                    let cand = table::row_candidate(row, q.dims);
                    let url = q.url_for(&cand);
                    if prober.exists(&url) {
                        return Some(ResolvedUrl {
                            url,
                            provenance: Provenance::TableSubstituted {
                                requested_h: q.dims.height,
                                used_h: cand.height,
                                width: cand.width,
                                thickness: cand.thickness_or_depth(),
                            },
                        });
                    }
                }
                None
            }
            Strategy::Offset => {
                let vary_h = q.pattern.contains("{h}");
                let vary_w = q.pattern.contains("{w}");
                let vary_t = q.pattern.contains("{t}");
                for cand in offset::candidates(q.dims, vary_h, vary_w, vary_t, q.bounds) {
                    let url = q.url_for(&cand);
                    if prober.exists(&url) {
                        return Some(ResolvedUrl {
                            url,
                            provenance: Provenance::OffsetSubstituted { used: cand },
                        });
                    }
                }
                None
            }
            Strategy::Guess => {
                let row = table::nearest_row(q.table, q.dims.height)?;
                let cand = table::row_candidate(row, q.dims);
                Some(ResolvedUrl {
                    url: q.url_for(&cand),
                    provenance: Provenance::Guessed {
                        requested_h: q.dims.height,
                        used_h: cand.height,
                        width: cand.width,
                        thickness: cand.thickness_or_depth(),
                    },
                })
            }
            Strategy::Literal => Some(ResolvedUrl {
                url: q.url_for(q.dims),
                provenance: Provenance::Unresolved,
            }),
        }
    }
}

/// Resolves one variable file through the ordered strategy plan.
///
/// Total: every query yields a URL. Unconfirmed results are tagged
/// `Guessed` or `Unresolved` rather than dropped.
pub fn resolve_file(q: &FileQuery<'_>, prober: &dyn Prober) -> ResolvedUrl {
    let plan = if q.height_not_manufactured() {
        UNMANUFACTURED_PLAN
    } else {
        PROBE_PLAN
    };
    for strategy in plan {
        if let Some(resolved) = strategy.attempt(q, prober) {
            return resolved;
        }
    }
    // Literal terminates every plan; spelled out for totality.
    ResolvedUrl {
        url: q.url_for(q.dims),
        provenance: Provenance::Unresolved,
    }
}

/// A handle part with no pattern at all: the literal `<part>.stl`, one exact
/// probe, no fallback cascade.
pub fn resolve_literal_part(
    prefix: &str,
    device_id: &str,
    part: &str,
    prober: &dyn Prober,
) -> ResolvedUrl {
    let url = store::file_url(prefix, device_id, &format!("{part}.stl"));
    let provenance = if prober.exists(&url) {
        Provenance::Exact
    } else {
        Provenance::Unresolved
    };
    ResolvedUrl { url, provenance }
}
