//! Template bank construction.
//!
//! A [`TemplateBank`] is built once from decoded images and is read-only
//! afterwards, so it can be shared across threads detecting on different
//! frames. The bank keeps the [`PreprocessConfig`] its templates were built
//! with; frames must be preprocessed with the same configuration for the
//! kernel geometry to line up.

use crate::image::preprocess::PreprocessConfig;
use crate::template::Template;
use crate::trace::{trace_event, trace_span};
use crate::util::{TriFindError, TriFindResult};
use ::image::DynamicImage;
#[cfg(feature = "image-io")]
use std::path::Path;

/// Ordered, immutable collection of templates.
#[derive(Clone, Debug)]
pub struct TemplateBank {
    templates: Vec<Template>,
    cfg: PreprocessConfig,
}

impl TemplateBank {
    /// Builds a bank from decoded images using the default noise floor and
    /// padding ratio.
    pub fn build(images: &[DynamicImage], scale: f32) -> TriFindResult<Self> {
        Self::build_with_config(images, PreprocessConfig::with_scale(scale))
    }

    /// Builds a bank with explicit preprocessing parameters.
    ///
    /// Fails if any template fails to build or if `images` is empty.
    pub fn build_with_config(images: &[DynamicImage], cfg: PreprocessConfig) -> TriFindResult<Self> {
        let _span = trace_span!("build_bank", images = images.len()).entered();
        cfg.validate()?;

        let templates = images
            .iter()
            .map(|img| Template::build(img, &cfg))
            .collect::<TriFindResult<Vec<_>>>()?;
        Self::from_templates(templates, cfg)
    }

    /// Wraps already-built templates.
    pub fn from_templates(templates: Vec<Template>, cfg: PreprocessConfig) -> TriFindResult<Self> {
        cfg.validate()?;
        if templates.is_empty() {
            return Err(TriFindError::EmptyTemplateBank);
        }
        trace_event!("bank_built", templates = templates.len());
        Ok(Self { templates, cfg })
    }

    /// Loads every template image in `dir` (see [`crate::io::load_template_images`])
    /// and builds a bank from them.
    #[cfg(feature = "image-io")]
    pub fn from_dir<P: AsRef<Path>>(dir: P, cfg: PreprocessConfig) -> TriFindResult<Self> {
        let images: Vec<DynamicImage> = crate::io::load_template_images(dir)?
            .into_iter()
            .map(|(_, img)| img)
            .collect();
        Self::build_with_config(&images, cfg)
    }

    /// Returns the templates in construction order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Returns the number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Always `false` for a constructed bank.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Returns the preprocessing configuration shared with frames.
    pub fn config(&self) -> &PreprocessConfig {
        &self.cfg
    }

    /// Returns the resize factor shared by templates and frames.
    pub fn scale(&self) -> f32 {
        self.cfg.scale
    }
}
