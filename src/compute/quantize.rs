//! Channel quantization.
//!
//! Channels are snapped up to the next multiple of [`QUANTUM`] and capped at
//! [`CHANNEL_MAX`], shrinking each channel to 27 distinct values.

/// Grid step for quantized channels.
pub const QUANTUM: i32 = 10;

/// Saturation cap (the only quantized value that is not a multiple of `QUANTUM`).
pub const CHANNEL_MAX: i32 = 255;

/// Round `x` up to the next multiple of 10, capped at 255.
#[inline]
pub fn quantize(x: i32) -> i32 {
    let rounded = (x + QUANTUM - 1).div_euclid(QUANTUM) * QUANTUM;
    rounded.min(CHANNEL_MAX)
}

/// Quantize every channel of an RGB triple.
#[inline]
pub fn quantize_rgb(rgb: [u8; 3]) -> [i32; 3] {
    rgb.map(|c| quantize(i32::from(c)))
}
