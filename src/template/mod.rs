//! Preprocessed reference templates.
//!
//! A [`Template`] holds a zero-mean edge-magnitude kernel together with the
//! geometry needed to map hits back to original image pixels. The kernel
//! energy `sum(k^2)` is precomputed once so the correlation denominator only
//! needs the frame-side variance per window.

use crate::image::preprocess::{preprocess, ImageRole, PreprocessConfig};
use crate::image::Matrix;
use crate::trace::{trace_event, trace_span};
use crate::util::math::mean_f64;
use crate::util::TriFindResult;
use ::image::{DynamicImage, GenericImageView};

/// Immutable zero-mean kernel plus geometric metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    kernel: Matrix,
    padding: usize,
    original_width: usize,
    original_height: usize,
    sum_kernel: f64,
}

impl Template {
    /// Builds a template from a decoded image.
    ///
    /// Runs rescale, padding, luma, Sobel and zero-mean normalization. Fails
    /// on invalid configuration or if the padded width is inconsistent.
    pub fn build(image: &DynamicImage, cfg: &PreprocessConfig) -> TriFindResult<Self> {
        let (width, height) = image.dimensions();
        let _span = trace_span!("build_template", width = width, height = height).entered();

        let out = preprocess(image, cfg, ImageRole::Template)?;
        let tpl = Self::from_edge_matrix(out.matrix, out.padding, width as usize, height as usize);

        trace_event!(
            "template_built",
            padding = tpl.padding,
            kernel_width = tpl.kernel_width(),
            kernel_height = tpl.kernel_height(),
        );
        Ok(tpl)
    }

    /// Wraps an edge-magnitude matrix, subtracting its mean and caching its energy.
    ///
    /// `padding` is the border (in kernel cells) around the template content
    /// and `original_*` is the unscaled size reported for detections.
    pub fn from_edge_matrix(
        mut edges: Matrix,
        padding: usize,
        original_width: usize,
        original_height: usize,
    ) -> Self {
        let mean = mean_f64(edges.as_slice());
        for value in edges.as_mut_slice() {
            *value = (f64::from(*value) - mean) as f32;
        }
        let sum_kernel = edges
            .as_slice()
            .iter()
            .map(|&v| f64::from(v) * f64::from(v))
            .sum();

        Self {
            kernel: edges,
            padding,
            original_width,
            original_height,
            sum_kernel,
        }
    }

    /// Returns the zero-mean kernel.
    pub fn kernel(&self) -> &Matrix {
        &self.kernel
    }

    /// Returns the padded, scaled kernel width.
    pub fn kernel_width(&self) -> usize {
        self.kernel.width()
    }

    /// Returns the padded, scaled kernel height.
    pub fn kernel_height(&self) -> usize {
        self.kernel.height()
    }

    /// Returns the border added on each side before edge detection.
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Returns the unscaled `(width, height)` of the source image.
    pub fn original_size(&self) -> (usize, usize) {
        (self.original_width, self.original_height)
    }

    /// Returns the kernel energy `sum(kernel[y][x]^2)`.
    pub fn sum_kernel(&self) -> f64 {
        self.sum_kernel
    }

    /// A template with no energy can never score above zero.
    pub fn is_inert(&self) -> bool {
        self.kernel.is_empty() || self.sum_kernel <= 0.0
    }
}
