//! trifind locates a fixed target shape in images by template matching.
//!
//! Templates and frames are reduced to Sobel edge-magnitude matrices, every
//! template is slid over the frame with zero-mean normalized cross-correlation
//! (ZNCC), hits are mapped back to original pixel coordinates, and overlapping
//! detections from all templates are pruned with greedy IoU suppression.
//!
//! Optional features: `image-io` (PNG/JPEG loading and template directories),
//! `rayon` (parallel matching with deterministic output), `tracing` (spans and
//! events on the construction and detection paths).

pub mod bank;
mod candidate;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod search;
pub mod template;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;
pub use crate::image::preprocess::{ImageRole, PreprocessConfig};
pub use crate::image::Matrix;
pub use bank::TemplateBank;
pub use candidate::nms::{nms_iou, NMS_IOU_THRESHOLD};
pub use candidate::types::{BoundingBox, Detection, Match, TRIANGLE_LABEL};
pub use kernel::scalar::find_matches;
pub use kernel::ScanParams;
pub use search::{merge, merge_matches, DetectConfig, Detector};
pub use template::Template;
pub use util::{TriFindError, TriFindResult};
