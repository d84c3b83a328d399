//! Raw matches, bounding boxes, and final detections.

/// Label attached to every detection.
pub const TRIANGLE_LABEL: &str = "triangle";

/// Candidate hit in original image coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match {
    /// Left edge of the template content in original pixels.
    pub x: usize,
    /// Top edge of the template content in original pixels.
    pub y: usize,
    /// Unscaled template width.
    pub width: usize,
    /// Unscaled template height.
    pub height: usize,
    /// ZNCC coefficient, strictly above the scan threshold.
    pub score: f32,
}

impl Match {
    /// Returns the box `[x, y, x + width, y + height]`, saturating at
    /// `usize::MAX`.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            min_x: self.x,
            min_y: self.y,
            max_x: self.x.saturating_add(self.width),
            max_y: self.y.saturating_add(self.height),
        }
    }
}

/// Axis-aligned box with exclusive maximum corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Left edge, inclusive.
    pub min_x: usize,
    /// Top edge, inclusive.
    pub min_y: usize,
    /// Right edge, exclusive.
    pub max_x: usize,
    /// Bottom edge, exclusive.
    pub max_y: usize,
}

impl BoundingBox {
    /// Returns `max_x - min_x`, or 0 for an inverted box.
    pub fn width(&self) -> usize {
        self.max_x.saturating_sub(self.min_x)
    }

    /// Returns `max_y - min_y`, or 0 for an inverted box.
    pub fn height(&self) -> usize {
        self.max_y.saturating_sub(self.min_y)
    }

    /// Returns the covered pixel count, saturating at `usize::MAX`.
    pub fn area(&self) -> usize {
        self.width().saturating_mul(self.height())
    }

    /// Returns `true` if the box covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Returns the overlapping region, or `None` if the boxes do not overlap.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let min_x = self.min_x.max(other.min_x);
        let min_y = self.min_y.max(other.min_y);
        let max_x = self.max_x.min(other.max_x);
        let max_y = self.max_y.min(other.max_y);
        if min_x >= max_x || min_y >= max_y {
            return None;
        }
        Some(BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Intersection over union; 0 if either box is empty or they are disjoint.
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        if self.is_empty() || other.is_empty() {
            return 0.0;
        }
        let Some(inter) = self.intersection(other) else {
            return 0.0;
        };
        let inter_area = inter.area() as f64;
        let union = self.area() as f64 + other.area() as f64 - inter_area;
        (inter_area / union) as f32
    }
}

/// Final detection handed to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// Box in original image pixels.
    pub bbox: BoundingBox,
    /// ZNCC score of the surviving match.
    pub score: f32,
    /// Always [`TRIANGLE_LABEL`].
    pub label: &'static str,
}

impl From<Match> for Detection {
    fn from(m: Match) -> Self {
        Self {
            bbox: m.bounding_box(),
            score: m.score,
            label: TRIANGLE_LABEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BoundingBox, Detection, Match, TRIANGLE_LABEL};

    fn bbox(min_x: usize, min_y: usize, max_x: usize, max_y: usize) -> BoundingBox {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    #[test]
    fn iou_of_half_shifted_boxes() {
        let a = bbox(0, 0, 10, 10);
        let b = bbox(5, 0, 15, 10);
        // 50 / (100 + 100 - 50)
        assert!((a.iou(&b) - 1.0 / 3.0).abs() < 1e-6);
        assert!((a.iou(&a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn touching_or_empty_boxes_have_zero_iou() {
        let a = bbox(0, 0, 10, 10);
        assert_eq!(a.iou(&bbox(10, 0, 20, 10)), 0.0);
        assert_eq!(a.iou(&bbox(3, 3, 3, 8)), 0.0);
        assert!(a.intersection(&bbox(20, 20, 30, 30)).is_none());
    }

    #[test]
    fn detection_from_match_uses_template_size() {
        let m = Match {
            x: 12,
            y: 7,
            width: 30,
            height: 20,
            score: 0.8,
        };
        let det = Detection::from(m);
        assert_eq!(det.bbox, bbox(12, 7, 42, 27));
        assert_eq!(det.label, TRIANGLE_LABEL);
        assert_eq!(det.score, 0.8);
    }

    #[test]
    fn bounding_box_saturates_far_corner() {
        let m = Match {
            x: usize::MAX - 3,
            y: 5,
            width: 10,
            height: 10,
            score: 0.9,
        };
        let b = m.bounding_box();
        assert_eq!(b, bbox(usize::MAX - 3, 5, usize::MAX, 15));
        assert_eq!(b.area(), 30);
    }
}
