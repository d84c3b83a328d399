//! Detection merging across templates.

use crate::candidate::nms::{nms_iou, NMS_IOU_THRESHOLD};
use crate::candidate::types::{Detection, Match};
use crate::image::Matrix;
use crate::kernel::scalar::scan_matches;
use crate::kernel::ScanParams;
use crate::template::Template;
use crate::trace::{trace_event, trace_span};
use crate::util::TriFindResult;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Runs every template over `frame` and concatenates matches in template order.
pub fn collect_matches(
    templates: &[Template],
    frame: &Matrix,
    params: ScanParams,
) -> TriFindResult<Vec<Match>> {
    params.validate()?;
    let mut all = Vec::new();
    for tpl in templates {
        all.extend(scan_matches(tpl, frame, params));
    }
    Ok(all)
}

/// Converts matches to detections and applies greedy IoU suppression.
///
/// The result is ordered by descending score; ties keep the match order.
pub fn merge_matches(matches: Vec<Match>) -> Vec<Detection> {
    let raw = matches.len();
    let detections: Vec<Detection> = matches.into_iter().map(Detection::from).collect();
    let kept = nms_iou(detections, NMS_IOU_THRESHOLD);
    trace_event!("detections", raw = raw, kept = kept.len());
    kept
}

/// Detects template instances in a preprocessed frame.
///
/// Fails only if `params` is invalid.
pub fn merge(
    templates: &[Template],
    frame: &Matrix,
    params: ScanParams,
) -> TriFindResult<Vec<Detection>> {
    let _span = trace_span!("merge", templates = templates.len()).entered();
    Ok(merge_matches(collect_matches(templates, frame, params)?))
}

/// Template-parallel [`merge`]; the output is identical to the sequential one.
#[cfg(feature = "rayon")]
pub fn merge_par(
    templates: &[Template],
    frame: &Matrix,
    params: ScanParams,
) -> TriFindResult<Vec<Detection>> {
    let _span = trace_span!("merge", templates = templates.len(), parallel = true).entered();
    params.validate()?;
    let per_template: Vec<Vec<Match>> = templates
        .par_iter()
        .map(|tpl| scan_matches(tpl, frame, params))
        .collect();
    Ok(merge_matches(per_template.into_iter().flatten().collect()))
}

#[cfg(test)]
mod tests {
    use super::{merge, merge_matches};
    use crate::candidate::types::Match;
    use crate::image::Matrix;
    use crate::kernel::ScanParams;
    use crate::template::Template;
    use crate::util::TriFindError;

    fn hit(x: usize, y: usize, score: f32) -> Match {
        Match {
            x,
            y,
            width: 10,
            height: 10,
            score,
        }
    }

    #[test]
    fn merge_matches_orders_and_suppresses() {
        let kept = merge_matches(vec![hit(0, 0, 0.9), hit(1, 1, 0.95), hit(40, 40, 0.8)]);
        let scores: Vec<f32> = kept.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![0.95, 0.8]);
        assert_eq!(kept[0].bbox.min_x, 1);
    }

    #[test]
    fn merge_without_templates_is_empty() {
        let frame = Matrix::zeros(8, 8);
        assert!(merge(&[], &frame, ScanParams::new(1, 0.5, 1.0)).unwrap().is_empty());
    }

    #[test]
    fn merge_on_empty_frame_is_empty() {
        let kernel = Matrix::from_rows(&[vec![1.0, -1.0], vec![-1.0, 1.0]]).unwrap();
        let tpl = Template::from_edge_matrix(kernel, 0, 2, 2);
        let detections = merge(&[tpl], &Matrix::empty(), ScanParams::new(1, 0.5, 1.0)).unwrap();
        assert!(detections.is_empty());
    }

    fn checker_template() -> Template {
        let kernel = Matrix::from_rows(&[vec![1.0, -1.0], vec![-1.0, 1.0]]).unwrap();
        Template::from_edge_matrix(kernel, 0, 2, 2)
    }

    fn checker_frame() -> Matrix {
        let data = (0..36)
            .map(|i| if (i % 6 + i / 6) % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        Matrix::new(data, 6, 6).unwrap()
    }

    #[test]
    fn merge_rejects_zero_scale() {
        let err = merge(&[checker_template()], &checker_frame(), ScanParams::new(1, 0.5, 0.0))
            .unwrap_err();
        assert_eq!(err, TriFindError::InvalidInput("scale must be finite and > 0"));
    }

    #[test]
    fn merge_with_tiny_scale_saturates_coordinates() {
        let detections = merge(
            &[checker_template()],
            &checker_frame(),
            ScanParams::new(1, 0.5, 1e-30),
        )
        .unwrap();
        assert!(detections.iter().any(|d| d.bbox.min_x == usize::MAX));
        for det in detections.iter().filter(|d| d.bbox.min_x == usize::MAX) {
            assert_eq!(det.bbox.max_x, usize::MAX);
            assert!(det.bbox.is_empty());
        }
    }
}
