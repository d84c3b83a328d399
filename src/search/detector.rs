//! Per-frame detection entry point.

use crate::bank::TemplateBank;
use crate::candidate::types::Detection;
use crate::image::preprocess::preprocess_frame;
use crate::image::Matrix;
use crate::kernel::ScanParams;
use crate::search::merger::merge;
use crate::trace::{trace_event, trace_span};
use crate::util::{TriFindError, TriFindResult};
use ::image::DynamicImage;

/// Default window step.
pub const DEFAULT_STRIDE: usize = 2;
/// Default ZNCC acceptance threshold.
pub const DEFAULT_THRESHOLD: f32 = 0.75;

/// Search configuration applied to every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectConfig {
    /// Step between probed window positions.
    pub stride: usize,
    /// Strict lower bound on reported scores.
    pub threshold: f32,
    /// Match templates in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            stride: DEFAULT_STRIDE,
            threshold: DEFAULT_THRESHOLD,
            parallel: false,
        }
    }
}

impl DetectConfig {
    /// Rejects a zero stride and a non-finite threshold.
    pub fn validate(&self) -> TriFindResult<()> {
        if self.stride == 0 {
            return Err(TriFindError::InvalidInput("stride must be at least 1"));
        }
        if !self.threshold.is_finite() {
            return Err(TriFindError::InvalidInput("threshold must be finite"));
        }
        Ok(())
    }
}

/// Detects triangles in frames using a fixed template bank.
#[derive(Clone, Debug)]
pub struct Detector {
    bank: TemplateBank,
    cfg: DetectConfig,
}

impl Detector {
    /// Creates a detector with the default search configuration.
    pub fn new(bank: TemplateBank) -> Self {
        Self {
            bank,
            cfg: DetectConfig::default(),
        }
    }

    /// Replaces the search configuration.
    pub fn with_config(mut self, cfg: DetectConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the search configuration.
    pub fn config(&self) -> &DetectConfig {
        &self.cfg
    }

    /// Returns the template bank.
    pub fn bank(&self) -> &TemplateBank {
        &self.bank
    }

    /// Preprocesses `image` with the bank's configuration and detects on it.
    pub fn detect(&self, image: &DynamicImage) -> TriFindResult<Vec<Detection>> {
        self.cfg.validate()?;
        let frame = preprocess_frame(image, self.bank.config())?;
        self.detect_matrix(&frame)
    }

    /// Detects on a frame that was already preprocessed with the bank's
    /// configuration.
    pub fn detect_matrix(&self, frame: &Matrix) -> TriFindResult<Vec<Detection>> {
        self.cfg.validate()?;
        let _span = trace_span!(
            "detect",
            width = frame.width(),
            height = frame.height(),
            templates = self.bank.len()
        )
        .entered();

        let params = ScanParams::new(self.cfg.stride, self.cfg.threshold, self.bank.scale());
        let detections = self.run(frame, params)?;
        trace_event!("frame_done", detections = detections.len());
        Ok(detections)
    }

    #[cfg(feature = "rayon")]
    fn run(&self, frame: &Matrix, params: ScanParams) -> TriFindResult<Vec<Detection>> {
        if self.cfg.parallel {
            crate::search::merger::merge_par(self.bank.templates(), frame, params)
        } else {
            merge(self.bank.templates(), frame, params)
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn run(&self, frame: &Matrix, params: ScanParams) -> TriFindResult<Vec<Detection>> {
        merge(self.bank.templates(), frame, params)
    }
}
