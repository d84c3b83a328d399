//! Match and detection types plus IoU-based non-maximum suppression.

pub(crate) mod nms;
pub(crate) mod types;
