//! Per-button debounced press handling.
//!
//! Provides [`ButtonWatcher`], which polls one input line, advances that
//! button's palette index on each confirmed press and raises the board's
//! sync signal when the press leaves every button on the same color.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use crate::audio::{Jingle, JingleQueue, request_jingle};
use crate::board::ButtonHandle;
use crate::hardware::{ButtonInput, RgbLed};
use crate::types::DebounceConfig;

/// The current state of a button watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Waiting for the input to go active.
    Idle,
    /// Input went active; the press has not been applied yet.
    Pressed,
    /// Press applied. Waiting for release.
    Held,
    /// Released. Waiting out contact bounce before re-arming.
    Settling,
}

/// Watches one button for its whole life.
///
/// # Type Parameters
/// * `'b` - Lifetime of the shared board and jingle queue
/// * `M` - Raw mutex type of the board
/// * `L` - LED implementation type
/// * `B` - Input line implementation type
/// * `D` - Delay implementation type
/// * `N` - Number of buttons on the board
pub struct ButtonWatcher<'b, M, L, B, D, const N: usize>
where
    M: RawMutex,
    L: RgbLed,
    B: ButtonInput,
    D: DelayNs,
{
    handle: ButtonHandle<'b, M, L, N>,
    input: B,
    delay: D,
    jingles: &'b JingleQueue<M>,
    config: DebounceConfig,
    state: ButtonState,
    presses: u32,
}

impl<'b, M, L, B, D, const N: usize> ButtonWatcher<'b, M, L, B, D, N>
where
    M: RawMutex,
    L: RgbLed,
    B: ButtonInput,
    D: DelayNs,
{
    /// Creates an idle watcher.
    pub fn new(
        handle: ButtonHandle<'b, M, L, N>,
        input: B,
        delay: D,
        jingles: &'b JingleQueue<M>,
        config: DebounceConfig,
    ) -> Self {
        Self {
            handle,
            input,
            delay,
            jingles,
            config,
            state: ButtonState::Idle,
            presses: 0,
        }
    }

    /// Runs the state machine forever.
    pub async fn run(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!("button {} watcher started", self.handle.slot());

        loop {
            self.step().await;
        }
    }

    /// Performs the work of the current state and moves to the next one.
    ///
    /// `Idle` and `Held` sleep one poll interval when the input has not
    /// changed; `Settling` sleeps the settle interval; `Pressed` never
    /// suspends.
    pub async fn step(&mut self) -> ButtonState {
        self.state = match self.state {
            ButtonState::Idle => {
                if self.input.is_active() {
                    ButtonState::Pressed
                } else {
                    self.delay.delay_ms(self.config.poll_ms).await;
                    ButtonState::Idle
                }
            }
            ButtonState::Pressed => {
                let _index = self.handle.advance();
                self.presses = self.presses.wrapping_add(1);
                request_jingle(self.jingles, Jingle::Click);

                #[cfg(feature = "defmt")]
                defmt::debug!("button {} -> index {}", self.handle.slot(), _index);

                ButtonState::Held
            }
            ButtonState::Held => {
                if self.input.is_active() {
                    self.delay.delay_ms(self.config.poll_ms).await;
                    ButtonState::Held
                } else {
                    ButtonState::Settling
                }
            }
            ButtonState::Settling => {
                self.delay.delay_ms(self.config.settle_ms).await;
                let board = self.handle.board();
                if board.all_equal() {
                    board.raise_sync();
                }
                ButtonState::Idle
            }
        };
        self.state
    }

    /// Returns the current state.
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Number of presses applied since creation.
    pub fn presses(&self) -> u32 {
        self.presses
    }

    /// The button slot this watcher drives.
    pub fn slot(&self) -> usize {
        self.handle.slot()
    }
}
