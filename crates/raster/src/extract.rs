//! Background removal and cropping.

use image::{Rgba, RgbaImage, imageops};
use log::debug;

use crate::error::{Error, Result};

/// Background color that is removed from rendered characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    /// RGB color of the background.
    pub color: [u8; 3],
    /// Maximum per-channel distance still classified as background.
    pub tolerance: u8,
}

impl Background {
    /// White with a tolerance of 15 per channel.
    pub const WHITE: Self = Self { color: [255, 255, 255], tolerance: 15 };

    pub const fn new(color: [u8; 3], tolerance: u8) -> Self {
        Self { color, tolerance }
    }

    /// Whether a pixel is background. The alpha channel is ignored.
    pub fn matches(&self, pixel: &Rgba<u8>) -> bool {
        pixel.0[..3]
            .iter()
            .zip(self.color)
            .all(|(&channel, expected)| channel.abs_diff(expected) <= self.tolerance)
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Inclusive bounding box of foreground pixels, in source image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl BoundingBox {
    fn point(x: u32, y: u32) -> Self {
        Self { min_x: x, min_y: y, max_x: x, max_y: y }
    }

    fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x + 1).max(1)
    }

    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y + 1).max(1)
    }
}

/// A cropped, background-stripped character bitmap.
///
/// Characters without any foreground pixel (whitespace) are represented by a
/// 1x1 fully transparent bitmap and no bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedCharacter {
    pixels: RgbaImage,
    bounds: Option<BoundingBox>,
}

impl ProcessedCharacter {
    /// The placeholder for a character with no foreground pixels.
    pub fn empty() -> Self {
        Self { pixels: RgbaImage::new(1, 1), bounds: None }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Foreground bounding box in the uncropped source image.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Row of the lowest foreground pixel in the uncropped source image,
    /// or `None` for an empty character.
    pub fn max_y(&self) -> Option<u32> {
        self.bounds.map(|b| b.max_y)
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }
}

/// Remove `background` from `image` and crop it to the remaining foreground.
///
/// Background pixels are rewritten to fully transparent in place before
/// cropping, so the image is consumed.
pub fn extract_foreground(
    mut image: RgbaImage,
    background: &Background,
) -> Result<ProcessedCharacter> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }

    let mut bounds: Option<BoundingBox> = None;
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        if background.matches(pixel) {
            *pixel = Rgba([0, 0, 0, 0]);
        } else {
            match bounds.as_mut() {
                Some(b) => b.include(x, y),
                None => bounds = Some(BoundingBox::point(x, y)),
            }
        }
    }

    let Some(bounds) = bounds else {
        debug!("No foreground in {width}x{height} image");
        return Ok(ProcessedCharacter::empty());
    };

    let pixels =
        imageops::crop_imm(&image, bounds.min_x, bounds.min_y, bounds.width(), bounds.height())
            .to_image();

    Ok(ProcessedCharacter { pixels, bounds: Some(bounds) })
}
