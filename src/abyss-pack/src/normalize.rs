//! Canonical 3-channel form of decoded icons.
//!
//! Icons arrive as grey, RGB, or RGBA PNGs. Hashing always runs on 8-bit
//! RGB, with transparency flattened onto a fixed grey so the fingerprint
//! does not depend on what a viewer would draw behind the icon.

use image::{DynamicImage, GrayImage, ImageError, Rgb, RgbImage, RgbaImage};

/// Grey level transparent pixels are composited against
pub const BACKGROUND_LEVEL: u8 = 180;

/// Decode raw asset bytes at full channel depth.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
    image::load_from_memory(bytes)
}

/// Convert any decoded image to 8-bit RGB of the same dimensions.
///
/// - with alpha (RGBA, grey+alpha): composited onto [`BACKGROUND_LEVEL`]
/// - grey: replicated into three channels
/// - RGB: unchanged
///
/// Deeper-than-8-bit sources are reduced to 8 bits first.
pub fn normalize(image: &DynamicImage) -> RgbImage {
    let color = image.color();
    if color.has_alpha() {
        composite(&image.to_rgba8())
    } else if color.has_color() {
        match image {
            DynamicImage::ImageRgb8(rgb) => rgb.clone(),
            other => other.to_rgb8(),
        }
    } else {
        replicate_gray(&image.to_luma8())
    }
}

fn composite(rgba: &RgbaImage) -> RgbImage {
    let background = f32::from(BACKGROUND_LEVEL);
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = f32::from(a) / 255.0;
        // Float blend per channel, truncated at the end
        let blend = |c: u8| (f32::from(c) * alpha + background * (1.0 - alpha)) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

fn replicate_gray(gray: &GrayImage) -> RgbImage {
    RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y).0[0];
        Rgb([v, v, v])
    })
}
