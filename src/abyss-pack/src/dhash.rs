//! Difference hash (dhash) fingerprints.
//!
//! The arithmetic here is pinned: the matcher consuming the hash index
//! compares against fingerprints computed exactly this way, so the luma
//! weights, resize weights and rounding must not change.
//!
//! 1. RGB -> luma with BT.601 weights in 14-bit fixed point
//! 2. area resize to `(size + 1) x size`
//! 3. per row, bit = right neighbour strictly brighter than left pixel
//! 4. bits packed MSB-first, rendered as zero-padded lowercase hex

use image::{GrayImage, Luma, RgbImage};

/// Default hash edge; yields 64 bits / 16 hex digits
pub const DEFAULT_HASH_SIZE: u32 = 8;

// BT.601 luma weights scaled by 2^14
const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;

/// Fingerprint `image` as a `ceil(size*size/4)`-digit hex string.
///
/// Returns `None` when there is nothing to hash (an empty image or a zero
/// hash size).
pub fn dhash(image: &RgbImage, hash_size: u32) -> Option<String> {
    if hash_size == 0 || image.width() == 0 || image.height() == 0 {
        return None;
    }

    let gray = to_luma(image);
    let resized = resize_area(&gray, hash_size + 1, hash_size);

    let mut bits = Vec::with_capacity((hash_size * hash_size) as usize);
    for y in 0..hash_size {
        for x in 0..hash_size {
            let left = resized.get_pixel(x, y).0[0];
            let right = resized.get_pixel(x + 1, y).0[0];
            bits.push(right > left);
        }
    }

    Some(bits_to_hex(&bits))
}

/// Single-channel luma of an RGB image, rounded to nearest.
pub fn to_luma(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let sum = u32::from(r) * LUMA_R + u32::from(g) * LUMA_G + u32::from(b) * LUMA_B;
        Luma([((sum + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8])
    })
}

/// Area-interpolated resize.
///
/// Shrinking on both axes averages every source pixel by its fractional
/// coverage of the destination cell. Any enlargement switches to
/// area-weighted bilinear taps on both axes, which degenerate to copies or
/// box averages where the scale is integral. The bilinear path runs in
/// 11-bit fixed point and rounds half up.
pub fn resize_area(src: &GrayImage, dst_w: u32, dst_h: u32) -> GrayImage {
    let (src_w, src_h) = src.dimensions();
    if src_w == 0 || src_h == 0 {
        return GrayImage::new(dst_w, dst_h);
    }

    if src_w >= dst_w && src_h >= dst_h {
        resize_box(src, dst_w, dst_h)
    } else {
        resize_linear(src, dst_w, dst_h)
    }
}

fn resize_box(src: &GrayImage, dst_w: u32, dst_h: u32) -> GrayImage {
    let (src_w, src_h) = src.dimensions();
    let x_taps = box_taps(src_w, dst_w);
    let y_taps = box_taps(src_h, dst_h);

    GrayImage::from_fn(dst_w, dst_h, |x, y| {
        let mut acc = 0.0f64;
        for &(sy, wy) in &y_taps[y as usize] {
            for &(sx, wx) in &x_taps[x as usize] {
                acc += wy * wx * f64::from(src.get_pixel(sx, sy).0[0]);
            }
        }
        Luma([acc.round_ties_even().clamp(0.0, 255.0) as u8])
    })
}

// Bilinear coefficient scale, 2^11
const COEF_BITS: u32 = 11;

fn resize_linear(src: &GrayImage, dst_w: u32, dst_h: u32) -> GrayImage {
    let (src_w, src_h) = src.dimensions();
    let x_taps = fixed_taps(linear_taps(src_w, dst_w));
    let y_taps = fixed_taps(linear_taps(src_h, dst_h));
    let half = 1i64 << (2 * COEF_BITS - 1);

    GrayImage::from_fn(dst_w, dst_h, |x, y| {
        let mut acc = 0i64;
        for &(sy, wy) in &y_taps[y as usize] {
            for &(sx, wx) in &x_taps[x as usize] {
                acc += wy * wx * i64::from(src.get_pixel(sx, sy).0[0]);
            }
        }
        Luma([((acc + half) >> (2 * COEF_BITS)).clamp(0, 255) as u8])
    })
}

fn fixed_taps(taps: Taps) -> Vec<Vec<(u32, i64)>> {
    let scale = f64::from(1u32 << COEF_BITS);
    taps.into_iter()
        .map(|cell| {
            cell.into_iter()
                .map(|(s, w)| (s, (w * scale).round_ties_even() as i64))
                .collect()
        })
        .collect()
}

type Taps = Vec<Vec<(u32, f64)>>;

/// Coverage weights of each destination cell, normalized to sum to 1.
fn box_taps(src_len: u32, dst_len: u32) -> Taps {
    let scale = f64::from(src_len) / f64::from(dst_len);
    (0..dst_len)
        .map(|d| {
            let start = f64::from(d) * scale;
            let end = start + scale;
            let mut taps = Vec::new();
            let mut s = start.floor() as u32;
            while s < src_len && f64::from(s) < end {
                let lo = start.max(f64::from(s));
                let hi = end.min(f64::from(s) + 1.0);
                if hi > lo {
                    taps.push((s, (hi - lo) / scale));
                }
                s += 1;
            }
            taps
        })
        .collect()
}

/// Two-tap area-mode bilinear weights.
fn linear_taps(src_len: u32, dst_len: u32) -> Taps {
    let scale = f64::from(src_len) / f64::from(dst_len);
    let inv_scale = f64::from(dst_len) / f64::from(src_len);
    let last = src_len - 1;
    (0..dst_len)
        .map(|d| {
            let mut sx = (f64::from(d) * scale).floor() as u32;
            let mut fx = f64::from(d + 1) - f64::from(sx + 1) * inv_scale;
            fx = if fx <= 0.0 { 0.0 } else { fx - fx.floor() };
            if sx >= last {
                sx = last;
                fx = 0.0;
            }
            vec![(sx, 1.0 - fx), ((sx + 1).min(last), fx)]
        })
        .collect()
}

/// Pack bits MSB-first and render as hex zero-padded to `ceil(n/4)` digits.
fn bits_to_hex(bits: &[bool]) -> String {
    let pad = (4 - bits.len() % 4) % 4;
    let padded: Vec<bool> = std::iter::repeat(false)
        .take(pad)
        .chain(bits.iter().copied())
        .collect();

    padded
        .chunks(4)
        .map(|nibble| {
            let v = nibble.iter().fold(0u32, |acc, &b| (acc << 1) | u32::from(b));
            char::from_digit(v, 16).unwrap_or('0')
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gray_rgb(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let v = f(x, y);
            Rgb([v, v, v])
        })
    }

    #[test]
    fn test_increasing_ramp_is_all_ones() {
        let ramp = gray_rgb(8, 8, |x, _| (x * 255 / 7) as u8);
        assert_eq!(dhash(&ramp, 8).as_deref(), Some("ffffffffffffffff"));
    }

    #[test]
    fn test_decreasing_ramp_is_all_zeros() {
        let ramp = gray_rgb(90, 40, |x, _| 255 - (x * 255 / 89) as u8);
        assert_eq!(dhash(&ramp, 8).as_deref(), Some("0000000000000000"));
    }

    #[test]
    fn test_flat_image_is_all_zeros() {
        let flat = gray_rgb(256, 256, |_, _| 180);
        assert_eq!(dhash(&flat, 8).as_deref(), Some("0000000000000000"));
    }

    #[test]
    fn test_large_ramp_downscaled() {
        let ramp = gray_rgb(256, 256, |x, _| x as u8);
        assert_eq!(dhash(&ramp, 8).as_deref(), Some("ffffffffffffffff"));
    }

    #[test]
    fn test_row_pattern_is_row_major() {
        // Top half brightens to the right, bottom half darkens
        let img = gray_rgb(9, 8, |x, y| {
            if y < 4 {
                (x * 20) as u8
            } else {
                200 - (x * 20) as u8
            }
        });
        assert_eq!(dhash(&img, 8).as_deref(), Some("ffffffff00000000"));
    }

    #[test]
    fn test_hash_is_stable() {
        let img = RgbImage::from_fn(37, 53, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) * 5 % 256) as u8])
        });
        let first = dhash(&img, 8).unwrap();
        assert_eq!(first.len(), 16);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(dhash(&img, 8).unwrap(), first);
    }

    #[test]
    fn test_other_hash_sizes_pad_width() {
        let ramp = gray_rgb(64, 64, |x, _| (x * 4) as u8);
        // 9 bits -> 3 hex digits, value 0x1ff
        assert_eq!(dhash(&ramp, 3).as_deref(), Some("1ff"));
        assert_eq!(dhash(&ramp, 16).map(|h| h.len()), Some(64));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(dhash(&RgbImage::new(0, 0), 8), None);
        assert_eq!(dhash(&gray_rgb(4, 4, |_, _| 1), 0), None);
    }

    #[test]
    fn test_luma_weights() {
        let img = RgbImage::from_fn(4, 1, |x, _| match x {
            0 => Rgb([255, 0, 0]),
            1 => Rgb([0, 255, 0]),
            2 => Rgb([0, 0, 255]),
            _ => Rgb([255, 255, 255]),
        });
        let luma = to_luma(&img);
        assert_eq!(luma.get_pixel(0, 0).0[0], 76);
        assert_eq!(luma.get_pixel(1, 0).0[0], 150);
        assert_eq!(luma.get_pixel(2, 0).0[0], 29);
        assert_eq!(luma.get_pixel(3, 0).0[0], 255);
    }

    #[test]
    fn test_resize_box_average() {
        let src = GrayImage::from_fn(4, 2, |x, _| Luma([if x < 2 { 10 } else { 30 }]));
        let out = resize_area(&src, 2, 1);
        assert_eq!(out.get_pixel(0, 0).0[0], 10);
        assert_eq!(out.get_pixel(1, 0).0[0], 30);

        // 3 -> 2: cells cover [0,1.5) and [1.5,3)
        let src = GrayImage::from_fn(3, 1, |x, _| Luma([[0u8, 100, 200][x as usize]]));
        let out = resize_area(&src, 2, 1);
        // (0*1 + 100*0.5)/1.5 = 33.3, (100*0.5 + 200*1)/1.5 = 166.7
        assert_eq!(out.get_pixel(0, 0).0[0], 33);
        assert_eq!(out.get_pixel(1, 0).0[0], 167);
    }

    #[test]
    fn test_resize_upscale_taps() {
        let src = GrayImage::from_fn(8, 1, |x, _| Luma([(x * 32) as u8]));
        let out = resize_area(&src, 9, 1);
        assert_eq!(out.get_pixel(0, 0).0[0], 0);
        // 0.125 * 0 + 0.875 * 32 = 28
        assert_eq!(out.get_pixel(1, 0).0[0], 28);
        assert_eq!(out.get_pixel(8, 0).0[0], 224);
    }

    #[test]
    fn test_upscale_rounds_half_up() {
        // Column 1 lands exactly on 0.125 * 4 + 0.875 * 0 = 0.5
        let row = [4u8, 0, 1, 1, 1, 1, 1, 1];
        let src = GrayImage::from_fn(8, 1, |x, _| Luma([row[x as usize]]));
        let out = resize_area(&src, 9, 1);
        let values: Vec<u8> = out.pixels().map(|p| p.0[0]).collect();
        assert_eq!(values, vec![4, 1, 1, 1, 1, 1, 1, 1, 1]);

        let img = gray_rgb(8, 8, |x, _| row[x as usize]);
        assert_eq!(dhash(&img, 8).as_deref(), Some("0000000000000000"));
    }
}
