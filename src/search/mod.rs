//! Multi-template detection.
//!
//! [`merge`] runs the correlation scan for every template, converts matches to
//! detections and prunes them with IoU non-maximum suppression. [`Detector`]
//! wraps a [`crate::TemplateBank`] and a [`DetectConfig`] for per-frame use.

mod detector;
mod merger;

pub use detector::{DetectConfig, Detector, DEFAULT_STRIDE, DEFAULT_THRESHOLD};
#[cfg(feature = "rayon")]
pub use merger::merge_par;
pub use merger::{collect_matches, merge, merge_matches};
