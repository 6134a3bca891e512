//! Win celebration: flash, jingle, fresh rainbow, reseed.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use rand::Rng;

use crate::audio::{Jingle, JingleQueue, request_jingle};
use crate::board::Board;
use crate::colors::{COLOR_OFF, Color};
use crate::hardware::RgbLed;
use crate::rainbow::animate_rainbow;
use crate::types::{FlashConfig, PaletteError, RainbowConfig};

/// Flashes `color` on every LED `config.times` times, leaving them off.
pub async fn flash<M, L, D, const N: usize>(
    board: &Board<M, L, N>,
    delay: &mut D,
    color: Color,
    config: &FlashConfig,
) where
    M: RawMutex,
    L: RgbLed,
    D: DelayNs,
{
    for _ in 0..config.times {
        board.show_all(color);
        delay.delay_ms(config.on_ms).await;
        board.show_all(COLOR_OFF);
        delay.delay_ms(config.off_ms).await;
    }
}

/// The orchestrator that reacts to the sync signal.
///
/// A celebration always runs to completion. Presses that land while it runs
/// are overwritten by the reseed at the end.
pub struct Celebration<'b, M, L, D, R, const N: usize>
where
    M: RawMutex,
    L: RgbLed,
    D: DelayNs,
    R: Rng,
{
    board: &'b Board<M, L, N>,
    jingles: &'b JingleQueue<M>,
    delay: D,
    rng: R,
    flash: FlashConfig,
    rainbow: RainbowConfig,
    rounds: u32,
}

impl<'b, M, L, D, R, const N: usize> Celebration<'b, M, L, D, R, N>
where
    M: RawMutex,
    L: RgbLed,
    D: DelayNs,
    R: Rng,
{
    pub fn new(
        board: &'b Board<M, L, N>,
        jingles: &'b JingleQueue<M>,
        delay: D,
        rng: R,
        flash: FlashConfig,
        rainbow: RainbowConfig,
    ) -> Self {
        Self {
            board,
            jingles,
            delay,
            rng,
            flash,
            rainbow,
            rounds: 0,
        }
    }

    /// Waits for the sync signal and celebrates, forever.
    ///
    /// Stops only if a rainbow fails to build a palette, which cannot happen
    /// once the startup rainbow has succeeded on the same board.
    pub async fn run(&mut self) -> PaletteError {
        #[cfg(feature = "defmt")]
        defmt::info!("celebration orchestrator started");

        loop {
            // `wait` clears the signal as it returns, before any work starts
            self.board.wait_sync().await;
            if let Err(err) = self.celebrate().await {
                return err;
            }
        }
    }

    /// Runs one full celebration sequence.
    ///
    /// # Errors
    /// Returns a [`PaletteError`] if the new rainbow cannot build a palette.
    /// The board is left with its previous palette and indices.
    pub async fn celebrate(&mut self) -> Result<(), PaletteError> {
        self.rounds = self.rounds.wrapping_add(1);

        #[cfg(feature = "defmt")]
        defmt::info!("celebration {} started", self.rounds);

        request_jingle(self.jingles, Jingle::Win);

        // A press may have slipped in since the signal was raised
        let color = self
            .board
            .matched_color()
            .unwrap_or_else(|| self.board.displayed(0));
        flash(self.board, &mut self.delay, color, &self.flash).await;

        animate_rainbow(self.board, &mut self.delay, &mut self.rng, &self.rainbow).await?;

        self.board.reseed();

        // Presses during the celebration may have re-raised the signal for a
        // state that no longer exists after the reseed.
        if !self.board.all_equal() {
            self.board.clear_sync();
        }

        #[cfg(feature = "defmt")]
        defmt::info!("celebration {} finished", self.rounds);

        Ok(())
    }

    /// Number of celebrations started so far.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }
}
