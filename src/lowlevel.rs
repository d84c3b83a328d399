//! Building blocks for custom detection pipelines.
//!
//! Most users should prefer [`crate::TemplateBank`] and [`crate::Detector`].
//! These re-exports expose the individual preprocessing stages and the raw
//! correlation scan.

pub use crate::image::preprocess::{
    gray_matrix, luma_bt601, pad_with_corner, preprocess, preprocess_frame, rescale,
    sobel_magnitude, Preprocessed, DEFAULT_EDGE_THRESHOLD, DEFAULT_PADDING_RATIO, DEFAULT_SCALE,
};
#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::find_matches_par;
pub use crate::kernel::scalar::{find_matches, score_at};
pub use crate::search::collect_matches;
#[cfg(feature = "rayon")]
pub use crate::search::merge_par;
pub use crate::search::{DEFAULT_STRIDE, DEFAULT_THRESHOLD};
