//! Image preprocessing shared by templates and frames.
//!
//! The pipeline is: rescale (Lanczos3) -> pad (templates only) -> BT.601
//! luma -> 3x3 Sobel gradient magnitude -> noise floor. Templates additionally get a
//! border of `round(padding_ratio * resized_width)` pixels filled with the
//! template's top-left luma value. Padding is applied after the luma
//! conversion; because both steps are per-pixel the result is the same as
//! padding in colour first.

use crate::image::Matrix;
use crate::util::math::scaled_len;
use crate::util::{TriFindError, TriFindResult};
use ::image::imageops::{self, FilterType};
use ::image::{DynamicImage, GenericImageView, GrayImage, Luma};

/// Default downscale factor applied to frames and templates.
pub const DEFAULT_SCALE: f32 = 0.5;
/// Sobel magnitudes below this value are treated as noise and zeroed.
pub const DEFAULT_EDGE_THRESHOLD: f32 = 50.0;
/// Template border width as a fraction of the resized template width.
pub const DEFAULT_PADDING_RATIO: f32 = 0.3;

/// Preprocessing parameters shared by every template and frame of a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreprocessConfig {
    /// Resize factor applied to the image width (height follows aspect ratio).
    pub scale: f32,
    /// Noise floor for Sobel magnitudes, on the 8-bit intensity scale.
    pub edge_threshold: f32,
    /// Template padding per side as a fraction of the resized width.
    pub padding_ratio: f32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            padding_ratio: DEFAULT_PADDING_RATIO,
        }
    }
}

impl PreprocessConfig {
    /// Returns a default configuration with the given scale.
    pub fn with_scale(scale: f32) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    /// Checks that every parameter is finite and in range.
    pub fn validate(&self) -> TriFindResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(TriFindError::InvalidInput("scale must be finite and > 0"));
        }
        if !self.edge_threshold.is_finite() || self.edge_threshold < 0.0 {
            return Err(TriFindError::InvalidInput(
                "edge_threshold must be finite and >= 0",
            ));
        }
        if !self.padding_ratio.is_finite() || self.padding_ratio < 0.0 {
            return Err(TriFindError::InvalidInput(
                "padding_ratio must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Whether an image is a reference template or a live frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageRole {
    /// Live frame: never padded.
    Frame,
    /// Reference template: padded before edge detection.
    Template,
}

/// Output of [`preprocess`].
#[derive(Clone, Debug, PartialEq)]
pub struct Preprocessed {
    /// Edge-magnitude matrix of the rescaled (and possibly padded) image.
    pub matrix: Matrix,
    /// Pixels added on every side; always 0 for frames.
    pub padding: usize,
    /// Width after rescaling, before padding.
    pub resized_width: usize,
    /// Height after rescaling, before padding.
    pub resized_height: usize,
}

/// Resizes `image` so its width becomes `round(width * scale)`.
///
/// The height follows the aspect ratio and is at least 1 for a non-empty
/// result. A resize to the same dimensions returns a copy unchanged.
pub fn rescale(image: &DynamicImage, scale: f32) -> DynamicImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }
    let new_width = scaled_len(width, f64::from(scale));
    if new_width == 0 {
        return DynamicImage::new_luma8(0, 0);
    }
    let new_height = scaled_len(height, f64::from(new_width) / f64::from(width)).max(1);
    if (new_width, new_height) == (width, height) {
        return image.clone();
    }
    image.resize_exact(new_width, new_height, FilterType::Lanczos3)
}

/// Adds a `padding`-pixel border filled with the top-left pixel value.
pub fn pad_with_corner(gray: &GrayImage, padding: u32) -> GrayImage {
    if padding == 0 {
        return gray.clone();
    }
    let (width, height) = gray.dimensions();
    let background = gray.get_pixel_checked(0, 0).copied().unwrap_or(Luma([0]));
    let mut padded = GrayImage::from_pixel(width + 2 * padding, height + 2 * padding, background);
    imageops::replace(&mut padded, gray, i64::from(padding), i64::from(padding));
    padded
}

/// Converts an image to 8-bit luma with BT.601 weights.
///
/// Gray inputs are kept as they are. Colour inputs use the fixed-point
/// weights `0.299 R + 0.587 G + 0.114 B`; alpha is ignored.
pub fn luma_bt601(image: &DynamicImage) -> GrayImage {
    match image {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_) => image.to_luma8(),
        _ => {
            let rgb = image.to_rgb8();
            let (width, height) = rgb.dimensions();
            let mut gray = GrayImage::new(width, height);
            for (dst, src) in gray.pixels_mut().zip(rgb.pixels()) {
                let [r, g, b] = src.0;
                let y = (19595 * u32::from(r) + 38470 * u32::from(g) + 7471 * u32::from(b)
                    + (1 << 15))
                    >> 16;
                *dst = Luma([y as u8]);
            }
            gray
        }
    }
}

/// Converts an 8-bit luma image into an intensity matrix.
pub fn gray_matrix(gray: &GrayImage) -> TriFindResult<Matrix> {
    let (width, height) = gray.dimensions();
    let data = gray.pixels().map(|p| f32::from(p.0[0])).collect();
    Matrix::new(data, width as usize, height as usize)
}

/// Computes the 3x3 Sobel gradient magnitude `sqrt(gx^2 + gy^2)`.
///
/// Border cells stay at 0. Magnitudes strictly below `edge_threshold` are
/// zeroed.
pub fn sobel_magnitude(gray: &Matrix, edge_threshold: f32) -> Matrix {
    let width = gray.width();
    let height = gray.height();
    let mut edges = Matrix::zeros(width, height);
    if width < 3 || height < 3 {
        return edges;
    }

    let src = gray.as_slice();
    let dst = edges.as_mut_slice();
    for y in 1..height - 1 {
        let above = &src[(y - 1) * width..y * width];
        let here = &src[y * width..(y + 1) * width];
        let below = &src[(y + 1) * width..(y + 2) * width];
        for x in 1..width - 1 {
            let gx = (above[x + 1] + 2.0 * here[x + 1] + below[x + 1])
                - (above[x - 1] + 2.0 * here[x - 1] + below[x - 1]);
            let gy = (below[x - 1] + 2.0 * below[x] + below[x + 1])
                - (above[x - 1] + 2.0 * above[x] + above[x + 1]);
            let magnitude = (gx * gx + gy * gy).sqrt();
            dst[y * width + x] = if magnitude < edge_threshold {
                0.0
            } else {
                magnitude
            };
        }
    }
    edges
}

/// Runs the full preprocessing pipeline for a frame or a template.
///
/// Zero-sized inputs produce an empty matrix rather than an error. The only
/// image-dependent error is the padded-width consistency check for templates.
pub fn preprocess(
    image: &DynamicImage,
    cfg: &PreprocessConfig,
    role: ImageRole,
) -> TriFindResult<Preprocessed> {
    cfg.validate()?;

    let resized = rescale(image, cfg.scale);
    let (resized_width, resized_height) = resized.dimensions();
    let gray = luma_bt601(&resized);

    let (gray, padding) = match role {
        ImageRole::Frame => (gray, 0),
        ImageRole::Template => {
            let padding = scaled_len(resized_width, f64::from(cfg.padding_ratio));
            let padded = pad_with_corner(&gray, padding);
            let width = padded.width() as usize;
            let expected = resized_width as usize + 2 * padding as usize;
            if width != expected {
                return Err(TriFindError::PaddedWidthMismatch { width, expected });
            }
            (padded, padding)
        }
    };

    let intensity = gray_matrix(&gray)?;
    let matrix = sobel_magnitude(&intensity, cfg.edge_threshold);
    Ok(Preprocessed {
        matrix,
        padding: padding as usize,
        resized_width: resized_width as usize,
        resized_height: resized_height as usize,
    })
}

/// Preprocesses a live frame into its edge-magnitude matrix.
pub fn preprocess_frame(image: &DynamicImage, cfg: &PreprocessConfig) -> TriFindResult<Matrix> {
    preprocess(image, cfg, ImageRole::Frame).map(|out| out.matrix)
}
