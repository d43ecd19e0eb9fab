/// Network input preparation
///
/// Turns an RGB bitmap into the `[1, 3, S, S]` float tensor a torchvision
/// ImageNet model expects: resize, optional center crop, scale to [0, 1],
/// then per-channel mean/std normalization.

use image::{imageops, imageops::FilterType, RgbImage};
use tract_onnx::prelude::tract_ndarray::Array4;

/// ImageNet channel means (RGB)
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
/// ImageNet channel standard deviations (RGB)
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// How the bitmap is brought to the network's square input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    /// Scale the shorter side to `shorter_side` keeping aspect, then
    /// center-crop the input square (whole-image classification)
    CenterCrop { shorter_side: u32 },
    /// Stretch straight to the input square (grid cells)
    Exact,
}

#[derive(Debug, Clone)]
pub struct Preprocessor {
    input_size: u32,
    mode: ResizeMode,
    /// Per-channel scale, `1 / (255 * std)`
    alpha: [f32; 3],
    /// Per-channel offset, `-mean / std`
    beta: [f32; 3],
}

impl Preprocessor {
    pub fn new(input_size: u32, mode: ResizeMode) -> Self {
        let mut alpha = [0.0; 3];
        let mut beta = [0.0; 3];
        for c in 0..3 {
            alpha[c] = 1.0 / (255.0 * IMAGENET_STD[c]);
            beta[c] = -IMAGENET_MEAN[c] / IMAGENET_STD[c];
        }
        Self {
            input_size,
            mode,
            alpha,
            beta,
        }
    }

    /// Resize 256 + center crop 224 style preprocessing
    pub fn center_crop(input_size: u32, shorter_side: u32) -> Self {
        Self::new(
            input_size,
            ResizeMode::CenterCrop {
                shorter_side: shorter_side.max(input_size),
            },
        )
    }

    /// Plain resize to the input square
    pub fn exact(input_size: u32) -> Self {
        Self::new(input_size, ResizeMode::Exact)
    }

    pub fn input_size(&self) -> u32 {
        self.input_size
    }

    pub fn mode(&self) -> ResizeMode {
        self.mode
    }

    /// Resize (and crop) the bitmap to the input square, still as 8-bit RGB
    pub fn fit(&self, bitmap: &RgbImage) -> RgbImage {
        let size = self.input_size;
        match self.mode {
            ResizeMode::Exact => imageops::resize(bitmap, size, size, FilterType::Triangle),
            ResizeMode::CenterCrop { shorter_side } => {
                let (w, h) = bitmap.dimensions();
                let (new_w, new_h) = if w <= h {
                    (shorter_side, scale_side(shorter_side, h, w))
                } else {
                    (scale_side(shorter_side, w, h), shorter_side)
                };
                let resized = imageops::resize(bitmap, new_w, new_h, FilterType::Triangle);

                let left = crop_offset(new_w, size);
                let top = crop_offset(new_h, size);
                imageops::crop_imm(&resized, left, top, size, size).to_image()
            }
        }
    }

    /// Full preprocessing: fit, scale, normalize, lay out as NCHW
    pub fn to_tensor(&self, bitmap: &RgbImage) -> Array4<f32> {
        let fitted = self.fit(bitmap);
        let size = self.input_size as usize;
        Array4::from_shape_fn((1, 3, size, size), |(_, c, y, x)| {
            let value = fitted.get_pixel(x as u32, y as u32)[c] as f32;
            value * self.alpha[c] + self.beta[c]
        })
    }
}

/// Long side after scaling the short side to `target`, truncated like torchvision
fn scale_side(target: u32, long: u32, short: u32) -> u32 {
    ((target as u64 * long as u64) / short.max(1) as u64).max(target as u64) as u32
}

/// Start of a centered `size` window inside `len`; halves round to even
fn crop_offset(len: u32, size: u32) -> u32 {
    (len.saturating_sub(size) as f64 / 2.0).round_ties_even() as u32
}
