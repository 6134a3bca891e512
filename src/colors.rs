//! Color math: the phase oscillator, gamma curve and fade helper.
//!
//! All colors are `palette::Srgb<u16>`, where each channel spans
//! `0..=MAX_INTENSITY`. Nothing here has state or side effects.

use core::f32::consts::TAU;
use palette::Srgb;

/// A single RGB color with 16-bit channels.
pub type Color = Srgb<u16>;

/// Full brightness on one channel.
pub const MAX_INTENSITY: u16 = u16::MAX;

/// All channels at zero.
pub const COLOR_OFF: Color = Srgb::new(0, 0, 0);

/// Phase offsets of the red, green and blue channels of one LED.
pub const CHANNEL_OFFSETS: [f32; 3] = [0.0, TAU / 3.0, 2.0 * TAU / 3.0];

/// Intensity of one channel at phase `theta` (radians) shifted by `offset`.
///
/// Computes `sin(theta + offset) * 0.5 + 0.5` scaled to the channel range,
/// truncated toward zero.
#[inline]
pub fn channel_intensity(theta: f32, offset: f32) -> u16 {
    let level = libm::sinf(theta + offset) * 0.5 + 0.5;
    // `as` saturates, so float error just past 1.0 still lands on MAX_INTENSITY
    (level * MAX_INTENSITY as f32) as u16
}

/// Color of one LED at phase `theta`, using the three channel offsets.
#[inline]
pub fn oscillate(theta: f32) -> Color {
    Srgb::new(
        channel_intensity(theta, CHANNEL_OFFSETS[0]),
        channel_intensity(theta, CHANNEL_OFFSETS[1]),
        channel_intensity(theta, CHANNEL_OFFSETS[2]),
    )
}

/// Maps a linear intensity through `x^exponent`.
///
/// `0` and `MAX_INTENSITY` are returned unchanged for every exponent. Values
/// in between are monotonically non-decreasing; an exponent that is not a
/// positive finite number leaves the value untouched.
pub fn gamma_encode(value: u16, exponent: f32) -> u16 {
    if value == 0 || value == MAX_INTENSITY {
        return value;
    }
    if !(exponent.is_finite() && exponent > 0.0) {
        return value;
    }

    let normalized = value as f32 / MAX_INTENSITY as f32;
    let encoded = libm::powf(normalized, exponent) * MAX_INTENSITY as f32 + 0.5;
    // Rounding must not promote an interior value onto the top endpoint.
    (encoded as u16).min(MAX_INTENSITY - 1)
}

/// Applies [`gamma_encode`] to every channel.
#[inline]
pub fn gamma_encode_color(color: Color, exponent: f32) -> Color {
    Srgb::new(
        gamma_encode(color.red, exponent),
        gamma_encode(color.green, exponent),
        gamma_encode(color.blue, exponent),
    )
}

/// Scales `target` by `step / steps`, truncating each channel.
///
/// `step == 0` yields off, `step >= steps` yields `target`.
pub fn fade(target: Color, step: u16, steps: u16) -> Color {
    if steps == 0 || step >= steps {
        return target;
    }

    let scale = |channel: u16| (channel as u32 * step as u32 / steps as u32) as u16;
    Srgb::new(scale(target.red), scale(target.green), scale(target.blue))
}
