//! Rayon-parallel scan (feature-gated).
//!
//! Rows of window placements are scored in parallel and concatenated in row
//! order, so the output is identical to the scalar scan.

use crate::candidate::types::Match;
use crate::image::Matrix;
use crate::kernel::scalar::{can_scan, scan_row};
use crate::kernel::ScanParams;
use crate::template::Template;
use crate::util::TriFindResult;
use rayon::prelude::*;

/// Row-parallel equivalent of [`crate::kernel::scalar::find_matches`].
pub fn find_matches_par(
    tpl: &Template,
    frame: &Matrix,
    params: ScanParams,
) -> TriFindResult<Vec<Match>> {
    params.validate()?;
    if !can_scan(tpl, frame) {
        return Ok(Vec::new());
    }
    let max_y = frame.height() - tpl.kernel_height();
    let rows: Vec<usize> = (0..=max_y).step_by(params.stride).collect();

    let row_results: Vec<Vec<Match>> = rows
        .into_par_iter()
        .map(|y| {
            let mut row_matches = Vec::new();
            scan_row(frame, tpl, y, params, &mut row_matches);
            row_matches
        })
        .collect();

    Ok(row_results.into_iter().flatten().collect())
}
