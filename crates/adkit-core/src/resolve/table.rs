//! Size-table ranking and candidate construction.

use crate::catalog::SizeRow;
use crate::dimensions::Dimensions;

/// Rows ordered by height distance from the request, closest first.
///
/// The sort is stable and has no secondary key: rows at equal distance keep
/// their configured table order, so a catalog that lists a preferred variant
/// first wins ties.
pub fn rank_rows<'a>(table: &'a [SizeRow], requested_h: u32) -> Vec<&'a SizeRow> {
    let mut ranked: Vec<&SizeRow> = table.iter().collect();
    ranked.sort_by_key(|row| row.h.abs_diff(requested_h));
    ranked
}

/// The single closest row, by the same distance rule.
pub fn nearest_row<'a>(table: &'a [SizeRow], requested_h: u32) -> Option<&'a SizeRow> {
    rank_rows(table, requested_h).into_iter().next()
}

/// Candidate dimensions for a row: its height plus its `med` presets, keeping
/// the requested width/thickness where the row has no preset. Depth is never
/// substituted.
pub fn row_candidate(row: &SizeRow, requested: &Dimensions) -> Dimensions {
    Dimensions {
        width: row.med_width().unwrap_or(requested.width),
        height: row.h,
        depth: requested.depth,
        thickness: row.med_thickness().or(requested.thickness),
    }
}
