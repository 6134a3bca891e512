//! Rainbow sweep across all LEDs and palette capture.
//!
//! Each LED runs the same [`oscillate`] curve, shifted by `TAU / N` from its
//! neighbor, so the LEDs rotate in lockstep without ever showing the same
//! color. The colors of the final frame become the next [`Palette`].

use core::f32::consts::TAU;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use rand::Rng;

use crate::board::Board;
use crate::colors::{COLOR_OFF, Color, oscillate};
use crate::hardware::RgbLed;
use crate::swatch::Palette;
use crate::time::frame_interval_ms;
use crate::types::{PaletteError, RainbowConfig};

/// Fixed phase of LED `slot` out of `count`.
#[inline]
pub fn led_phase(slot: usize, count: usize) -> f32 {
    TAU * slot as f32 / count.max(1) as f32
}

/// Colors of all `N` LEDs at `frame` out of `frames`.
///
/// Frame `0` and frame `frames` are one full turn apart, so a cycle's last
/// frame lines up with the next cycle's first.
pub fn rainbow_frame<const N: usize>(start_phase: f32, frame: u16, frames: u16) -> [Color; N] {
    let theta = f32::from(frame) / f32::from(frames.max(1)) * TAU;
    core::array::from_fn(|slot| oscillate(start_phase + led_phase(slot, N) + theta))
}

/// Runs `config.cycles` rainbow cycles on the board and publishes the colors
/// of the very last frame as the new palette.
///
/// A random starting phase is drawn per call and advanced by another random
/// amount after each cycle, so no two sweeps look alike. The only suspension
/// point is the sleep between frames.
///
/// # Errors
/// Returns a [`PaletteError`] if `N` LEDs do not fit in a palette. The board
/// keeps its previous palette in that case.
pub async fn animate_rainbow<M, L, D, R, const N: usize>(
    board: &Board<M, L, N>,
    delay: &mut D,
    rng: &mut R,
    config: &RainbowConfig,
) -> Result<Palette, PaletteError>
where
    M: RawMutex,
    L: RgbLed,
    D: DelayNs,
    R: Rng,
{
    let frames = config.frames.max(1);
    let interval = frame_interval_ms(config.cycle_ms, frames);
    let mut start_phase = rng.random::<f32>() * TAU;
    let mut captured = [COLOR_OFF; N];

    for _ in 0..config.cycles.max(1) {
        for frame in 0..=frames {
            let colors = rainbow_frame::<N>(start_phase, frame, frames);
            board.show_frame(&colors);
            if frame == frames {
                captured = colors;
            }
            delay.delay_ms(interval).await;
        }

        start_phase += rng.random::<f32>() * TAU;
    }

    let palette = Palette::from_active(&captured)?;
    let _generation = board.publish_palette(palette.clone());

    #[cfg(feature = "defmt")]
    defmt::debug!("palette generation {} published", _generation);

    Ok(palette)
}
