//! Shared test infrastructure for chroma-match integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use core::future::{Future, poll_fn};
use core::task::Poll;

use chroma_match::{
    Board, ButtonInput, COLOR_OFF, Color, Palette, RgbLed, Srgb, Tone, ToneOutput,
};
use embassy_futures::block_on;
use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embedded_hal_async::delay::DelayNs;

// ============================================================================
// Virtual Time
// ============================================================================

/// Discrete-event clock in milliseconds.
///
/// Sleeping futures register their deadline every time they are polled.
/// After every polling round the clock jumps to the earliest registered
/// deadline, so runs are deterministic and take no real time.
pub struct SimClock {
    now: Cell<u64>,
    next: Cell<Option<u64>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(0),
            next: Cell::new(None),
        }
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    pub fn delay(&self) -> SimDelay<'_> {
        SimDelay { clock: self }
    }

    fn schedule(&self, deadline: u64) {
        let next = match self.next.get() {
            Some(current) => current.min(deadline),
            None => deadline,
        };
        self.next.set(Some(next));
    }

    async fn sleep(&self, millis: u64) {
        let deadline = self.now() + millis;
        poll_fn(|_| {
            if self.now() >= deadline {
                Poll::Ready(())
            } else {
                self.schedule(deadline);
                Poll::Pending
            }
        })
        .await
    }

    async fn advance_until(&self, limit_ms: u64) {
        poll_fn(|_| {
            match self.next.take() {
                Some(deadline) => self.now.set(deadline.max(self.now())),
                // Nothing is sleeping, so nothing can change any more
                None => return Poll::Ready(()),
            }
            if self.now() >= limit_ms {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await
    }

    /// Drives `fut` until it completes or virtual time reaches `limit_ms`.
    ///
    /// Returns `None` if `fut` was still running when time ran out.
    pub fn run_until<F: Future>(&self, fut: F, limit_ms: u64) -> Option<F::Output> {
        block_on(async {
            match select(fut, self.advance_until(limit_ms)).await {
                Either::First(output) => Some(output),
                Either::Second(()) => None,
            }
        })
    }
}

/// `DelayNs` backed by a [`SimClock`].
#[derive(Clone)]
pub struct SimDelay<'c> {
    clock: &'c SimClock,
}

impl DelayNs for SimDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.clock.sleep(u64::from(ns.div_ceil(1_000_000))).await;
    }

    async fn delay_us(&mut self, us: u32) {
        self.clock.sleep(u64::from(us.div_ceil(1_000))).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.clock.sleep(u64::from(ms)).await;
    }
}

// ============================================================================
// Mock LED
// ============================================================================

/// Mock LED that records every color change with its virtual timestamp
pub struct RecordingLed<'c> {
    clock: &'c SimClock,
    current_color: Color,
    history: Vec<(u64, Color)>,
}

impl<'c> RecordingLed<'c> {
    pub fn new(clock: &'c SimClock) -> Self {
        Self {
            clock,
            current_color: COLOR_OFF,
            history: Vec::new(),
        }
    }

    pub fn last_color(&self) -> Color {
        self.current_color
    }

    pub fn history(&self) -> &[(u64, Color)] {
        &self.history
    }

    pub fn colors(&self) -> Vec<Color> {
        self.history.iter().map(|(_, color)| *color).collect()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl RgbLed for RecordingLed<'_> {
    fn set_color(&mut self, color: Color) {
        self.current_color = color;
        self.history.push((self.clock.now(), color));
    }
}

pub type TestBoard<'c> = Board<NoopRawMutex, RecordingLed<'c>, 3>;

pub fn new_board(clock: &SimClock) -> TestBoard<'_> {
    Board::new([
        RecordingLed::new(clock),
        RecordingLed::new(clock),
        RecordingLed::new(clock),
    ])
}

pub fn clear_histories(board: &TestBoard<'_>) {
    board.with_leds(|leds| leds.iter_mut().for_each(RecordingLed::clear_history));
}

// ============================================================================
// Mock Button
// ============================================================================

/// Button that is active during fixed windows of virtual time
pub struct ScriptedButton<'c> {
    clock: &'c SimClock,
    windows: Vec<(u64, u64)>,
}

impl<'c> ScriptedButton<'c> {
    /// Each `(start, end)` window is active for `start <= now < end`.
    pub fn new(clock: &'c SimClock, windows: &[(u64, u64)]) -> Self {
        Self {
            clock,
            windows: windows.to_vec(),
        }
    }

    pub fn never(clock: &'c SimClock) -> Self {
        Self::new(clock, &[])
    }
}

impl ButtonInput for ScriptedButton<'_> {
    fn is_active(&mut self) -> bool {
        let now = self.clock.now();
        self.windows
            .iter()
            .any(|&(start, end)| start <= now && now < end)
    }
}

// ============================================================================
// Mock Speaker
// ============================================================================

#[derive(Default)]
pub struct RecordingSpeaker {
    pub tones: Vec<Tone>,
}

impl ToneOutput for RecordingSpeaker {
    fn emit(&mut self, tone: Tone) {
        self.tones.push(tone);
    }
}

// ============================================================================
// Test Colors
// ============================================================================

pub const RED: Color = Srgb::new(65535, 0, 0);
pub const GREEN: Color = Srgb::new(0, 65535, 0);
pub const BLUE: Color = Srgb::new(0, 0, 65535);

/// Red, green, blue plus off: four entries
pub fn rgb_palette() -> Palette {
    Palette::from_active(&[RED, GREEN, BLUE]).unwrap()
}
