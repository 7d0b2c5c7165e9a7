use image::{imageops, DynamicImage, GrayImage, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// 3x3 smoothing kernel used as the blur reference for sharpening.
const SMOOTH_KERNEL: [f32; 9] = [1.0, 1.0, 1.0, 1.0, 5.0, 1.0, 1.0, 1.0, 1.0];

/// Enhancement factors applied before OCR. A factor of 1.0 leaves the image
/// unchanged; larger values strengthen the effect.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceSettings {
    pub brightness: f32,
    pub contrast: f32,
    pub sharpness: f32,
}

impl Default for EnhanceSettings {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 3.0,
            sharpness: 4.0,
        }
    }
}

/// Brightens, boosts contrast, sharpens and converts to grayscale.
///
/// Trivia screenshots have light text on colored cards; the strong contrast
/// and sharpening push the text towards black-on-white for Tesseract.
pub fn enhance(img: &DynamicImage, settings: &EnhanceSettings) -> GrayImage {
    let rgb = img.to_rgb8();
    let rgb = adjust_brightness(&rgb, settings.brightness);
    let rgb = adjust_contrast(&rgb, settings.contrast);
    let rgb = adjust_sharpness(&rgb, settings.sharpness);
    DynamicImage::ImageRgb8(rgb).to_luma8()
}

/// Interpolates from `degenerate` towards `original` by `factor`,
/// extrapolating when `factor > 1`.
fn blend_channel(degenerate: u8, original: u8, factor: f32) -> u8 {
    let value = degenerate as f32 + factor * (original as f32 - degenerate as f32);
    value.round().clamp(0.0, 255.0) as u8
}

fn blend_pixel(degenerate: &Rgb<u8>, original: &Rgb<u8>, factor: f32) -> Rgb<u8> {
    Rgb([
        blend_channel(degenerate[0], original[0], factor),
        blend_channel(degenerate[1], original[1], factor),
        blend_channel(degenerate[2], original[2], factor),
    ])
}

/// Scales every channel towards black (factor < 1) or away from it.
pub fn adjust_brightness(img: &RgbImage, factor: f32) -> RgbImage {
    let black = Rgb([0, 0, 0]);
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        blend_pixel(&black, img.get_pixel(x, y), factor)
    })
}

/// Rounded mean luma (ITU-R 601-2) of the image, 0 for an empty image.
pub fn mean_luma(img: &RgbImage) -> u8 {
    let count = img.width() as usize * img.height() as usize;
    if count == 0 {
        return 0;
    }

    let total: f64 = img
        .pixels()
        .map(|p| (p[0] as f64 * 299.0 + p[1] as f64 * 587.0 + p[2] as f64 * 114.0) / 1000.0)
        .sum();

    (total / count as f64 + 0.5).clamp(0.0, 255.0) as u8
}

/// Spreads channel values away from the mean gray level.
pub fn adjust_contrast(img: &RgbImage, factor: f32) -> RgbImage {
    let mean = mean_luma(img);
    let gray = Rgb([mean, mean, mean]);
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        blend_pixel(&gray, img.get_pixel(x, y), factor)
    })
}

/// Extrapolates away from a smoothed copy. Border pixels are left as-is.
pub fn adjust_sharpness(img: &RgbImage, factor: f32) -> RgbImage {
    let (width, height) = img.dimensions();
    if width < 3 || height < 3 {
        return img.clone();
    }

    let smooth: RgbImage = imageops::filter3x3(img, &SMOOTH_KERNEL);
    RgbImage::from_fn(width, height, |x, y| {
        let original = img.get_pixel(x, y);
        if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
            *original
        } else {
            blend_pixel(smooth.get_pixel(x, y), original, factor)
        }
    })
}
