//! Power-on choreography: all off, fade each LED in turn, first rainbow.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use rand::Rng;

use crate::board::Board;
use crate::colors::{COLOR_OFF, fade};
use crate::hardware::RgbLed;
use crate::rainbow::animate_rainbow;
use crate::swatch::Palette;
use crate::time::frame_interval_ms;
use crate::types::{FadeConfig, PaletteError, RainbowConfig};

/// Ramps the LED in `slot` from off to `config.target`, one step per frame.
pub async fn fade_in<M, L, D, const N: usize>(
    board: &Board<M, L, N>,
    slot: usize,
    delay: &mut D,
    config: &FadeConfig,
) where
    M: RawMutex,
    L: RgbLed,
    D: DelayNs,
{
    let steps = config.steps.max(1);
    let interval = frame_interval_ms(config.fade_ms, steps);

    for step in 0..=steps {
        board.show(slot, fade(config.target, step, steps));
        delay.delay_ms(interval).await;
    }
}

/// Runs the power-on sequence and returns the first palette.
///
/// Button watchers must not start before this returns: until then the board
/// only holds an all-off placeholder palette.
///
/// # Errors
/// Returns a [`PaletteError`] if the board's LEDs do not fit in a palette.
pub async fn run_startup<M, L, D, R, const N: usize>(
    board: &Board<M, L, N>,
    delay: &mut D,
    rng: &mut R,
    fade_config: &FadeConfig,
    rainbow_config: &RainbowConfig,
) -> Result<Palette, PaletteError>
where
    M: RawMutex,
    L: RgbLed,
    D: DelayNs,
    R: Rng,
{
    #[cfg(feature = "defmt")]
    defmt::info!("startup: lights off");

    board.show_all(COLOR_OFF);
    delay.delay_ms(fade_config.gap_ms).await;

    for slot in 0..N {
        #[cfg(feature = "defmt")]
        defmt::debug!("startup: fading in LED {}", slot);

        fade_in(board, slot, delay, fade_config).await;
        delay.delay_ms(fade_config.gap_ms).await;
    }

    let palette = animate_rainbow(board, delay, rng, rainbow_config).await?;

    #[cfg(feature = "defmt")]
    defmt::info!("startup: first palette ready ({} colors)", palette.len());

    Ok(palette)
}
