//! Zero-mean normalized cross-correlation kernels.
//!
//! `scalar` is the reference sliding-window scan. The `rayon` module adds a
//! row-parallel variant that returns matches in exactly the same order.

use crate::util::{TriFindError, TriFindResult};

/// Per-call search parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanParams {
    /// Step between probed window positions in both axes.
    pub stride: usize,
    /// Strict lower bound on emitted scores.
    pub threshold: f32,
    /// Scale the frame and templates were resized by.
    pub scale: f32,
}

impl ScanParams {
    /// Bundles stride, threshold and scale without validating them.
    pub fn new(stride: usize, threshold: f32, scale: f32) -> Self {
        Self {
            stride,
            threshold,
            scale,
        }
    }

    /// Rejects a zero stride, a non-finite threshold and a scale that is not
    /// finite and positive.
    pub fn validate(&self) -> TriFindResult<()> {
        if self.stride == 0 {
            return Err(TriFindError::InvalidInput("stride must be at least 1"));
        }
        if !self.threshold.is_finite() {
            return Err(TriFindError::InvalidInput("threshold must be finite"));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(TriFindError::InvalidInput("scale must be finite and > 0"));
        }
        Ok(())
    }
}

pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;
