//! Greedy IoU non-maximum suppression.

use crate::candidate::types::Detection;

/// Detections overlapping a kept detection by more than this IoU are dropped.
pub const NMS_IOU_THRESHOLD: f32 = 0.3;

/// Stable-sorts detections by descending score.
///
/// Equal scores keep their input order, which makes the output reproducible.
pub(crate) fn sort_detections_desc(detections: &mut [Detection]) {
    detections.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Applies greedy NMS with the given IoU cutoff.
///
/// Detections are sorted by descending score; each surviving detection
/// suppresses every later one whose IoU with it exceeds `iou_threshold`.
/// The result keeps the sorted order.
pub fn nms_iou(mut detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    sort_detections_desc(&mut detections);

    let mut suppressed = vec![false; detections.len()];
    let mut kept = Vec::new();
    for i in 0..detections.len() {
        if suppressed[i] {
            continue;
        }
        let current = detections[i].bbox;
        for j in (i + 1)..detections.len() {
            if !suppressed[j] && current.iou(&detections[j].bbox) > iou_threshold {
                suppressed[j] = true;
            }
        }
        kept.push(detections[i].clone());
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::{nms_iou, NMS_IOU_THRESHOLD};
    use crate::candidate::types::{BoundingBox, Detection, TRIANGLE_LABEL};

    fn det(x: usize, y: usize, size: usize, score: f32) -> Detection {
        Detection {
            bbox: BoundingBox {
                min_x: x,
                min_y: y,
                max_x: x + size,
                max_y: y + size,
            },
            score,
            label: TRIANGLE_LABEL,
        }
    }

    #[test]
    fn suppresses_overlapping_lower_scores() {
        let kept = nms_iou(
            vec![det(0, 0, 10, 0.7), det(1, 1, 10, 0.9), det(50, 50, 10, 0.8)],
            NMS_IOU_THRESHOLD,
        );
        let scores: Vec<f32> = kept.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![0.9, 0.8]);
    }

    #[test]
    fn cutoff_separates_overlap_levels() {
        // IoU of 1/3 is above 0.3, while 0.25 is below.
        let overlap_third = nms_iou(vec![det(0, 0, 10, 0.9), det(5, 0, 10, 0.8)], 0.3);
        assert_eq!(overlap_third.len(), 1);
        let overlap_low = nms_iou(vec![det(0, 0, 10, 0.9), det(6, 0, 10, 0.8)], 0.3);
        assert_eq!(overlap_low.len(), 2);
    }

    #[test]
    fn equal_scores_keep_input_order() {
        let kept = nms_iou(
            vec![det(0, 0, 10, 0.5), det(40, 0, 10, 0.5), det(80, 0, 10, 0.5)],
            NMS_IOU_THRESHOLD,
        );
        let xs: Vec<usize> = kept.iter().map(|d| d.bbox.min_x).collect();
        assert_eq!(xs, vec![0, 40, 80]);
    }

    #[test]
    fn suppressed_detections_do_not_suppress_others() {
        // b overlaps a and c; a suppresses b, so c survives.
        let a = det(0, 0, 10, 0.9);
        let b = det(5, 0, 10, 0.8);
        let c = det(10, 0, 10, 0.7);
        let kept = nms_iou(vec![c, b, a], NMS_IOU_THRESHOLD);
        let scores: Vec<f32> = kept.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![0.9, 0.7]);
    }
}
