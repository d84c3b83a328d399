//! Scalar reference ZNCC scan.

use crate::candidate::types::Match;
use crate::image::Matrix;
use crate::kernel::ScanParams;
use crate::template::Template;
use crate::util::math::search_to_original;
use crate::util::TriFindResult;

/// Returns `true` if at least one window placement exists and the template
/// can produce a non-zero score.
pub(crate) fn can_scan(tpl: &Template, frame: &Matrix) -> bool {
    !frame.is_empty()
        && !tpl.is_inert()
        && frame.height() >= tpl.kernel_height()
        && frame.width() >= tpl.kernel_width()
}

/// ZNCC of the window at `(x, y)`; `None` when the window is flat.
///
/// The caller guarantees the window lies inside `frame`.
pub(crate) fn zncc_window(frame: &Matrix, tpl: &Template, x: usize, y: usize) -> Option<f64> {
    let kw = tpl.kernel_width();
    let kh = tpl.kernel_height();
    let fw = frame.width();
    let data = frame.as_slice();
    let kernel = tpl.kernel().as_slice();

    let mut crop_sum = 0.0f64;
    for ty in 0..kh {
        let start = (y + ty) * fw + x;
        for &value in &data[start..start + kw] {
            crop_sum += f64::from(value);
        }
    }
    let crop_mean = crop_sum / (kw * kh) as f64;

    let mut sum_product = 0.0f64;
    let mut sum_crop_sq = 0.0f64;
    for ty in 0..kh {
        let start = (y + ty) * fw + x;
        let crop = &data[start..start + kw];
        let k_row = &kernel[ty * kw..(ty + 1) * kw];
        for (&c, &k) in crop.iter().zip(k_row) {
            let centered = f64::from(c) - crop_mean;
            sum_product += centered * f64::from(k);
            sum_crop_sq += centered * centered;
        }
    }

    let denom = (sum_crop_sq * tpl.sum_kernel()).sqrt();
    if denom > 0.0 {
        Some(sum_product / denom)
    } else {
        None
    }
}

/// Scans one row of window placements and appends matches above threshold.
pub(crate) fn scan_row(
    frame: &Matrix,
    tpl: &Template,
    y: usize,
    params: ScanParams,
    out: &mut Vec<Match>,
) {
    let max_x = frame.width() - tpl.kernel_width();
    let (width, height) = tpl.original_size();
    for x in (0..=max_x).step_by(params.stride) {
        let Some(corr) = zncc_window(frame, tpl, x, y) else {
            continue;
        };
        let score = corr as f32;
        if score > params.threshold {
            out.push(Match {
                x: search_to_original(x, tpl.padding(), params.scale),
                y: search_to_original(y, tpl.padding(), params.scale),
                width,
                height,
                score,
            });
        }
    }
}

/// Returns the ZNCC score at window `(x, y)` of the frame matrix.
///
/// `None` if the window does not fit, the template is inert, or the window is
/// flat.
pub fn score_at(frame: &Matrix, tpl: &Template, x: usize, y: usize) -> Option<f32> {
    if !can_scan(tpl, frame) {
        return None;
    }
    if x > frame.width() - tpl.kernel_width() || y > frame.height() - tpl.kernel_height() {
        return None;
    }
    zncc_window(frame, tpl, x, y).map(|corr| corr as f32)
}

/// Slides `tpl` over `frame` and returns every placement scoring above
/// `params.threshold`, mapped to original image coordinates.
///
/// Rows are visited top to bottom and columns left to right. Empty frames,
/// frames smaller than the kernel and inert templates yield no matches.
/// Fails only if `params` is invalid.
pub fn find_matches(
    tpl: &Template,
    frame: &Matrix,
    params: ScanParams,
) -> TriFindResult<Vec<Match>> {
    params.validate()?;
    Ok(scan_matches(tpl, frame, params))
}

/// Scan body of [`find_matches`]; `params` must already be validated.
pub(crate) fn scan_matches(tpl: &Template, frame: &Matrix, params: ScanParams) -> Vec<Match> {
    if !can_scan(tpl, frame) {
        return Vec::new();
    }
    let max_y = frame.height() - tpl.kernel_height();
    let mut matches = Vec::new();
    for y in (0..=max_y).step_by(params.stride) {
        scan_row(frame, tpl, y, params, &mut matches);
    }
    matches
}
