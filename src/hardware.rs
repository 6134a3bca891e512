//! Hardware abstraction traits.
//!
//! Implement these for your board (PWM slices, GPIO, a piezo driver) and hand
//! them to the game. None of them can fail: a miswired LED or a floating
//! input is a setup problem, not a runtime one.

use crate::colors::{Color, gamma_encode_color};

/// Trait for abstracting RGB LED hardware.
pub trait RgbLed {
    /// Sets the LED to the specified color.
    ///
    /// Each channel is in `0..=MAX_INTENSITY`. Implementations convert this
    /// to their native format (e.g. a PWM duty cycle) and handle hardware
    /// errors internally.
    fn set_color(&mut self, color: Color);
}

/// Trait for reading a button's input line.
pub trait ButtonInput {
    /// Returns `true` while the line is at its active level.
    ///
    /// For the usual pull-up wiring this is when the pin reads low.
    fn is_active(&mut self) -> bool;
}

/// A single note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration_ms: u32,
    /// Output level in `0..=MAX_INTENSITY`.
    pub amplitude: u16,
}

impl Tone {
    pub const fn new(frequency_hz: u32, duration_ms: u32, amplitude: u16) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            amplitude,
        }
    }
}

/// Trait for abstracting a tone generator.
pub trait ToneOutput {
    /// Starts `tone` and returns immediately. The hardware stops it after
    /// `tone.duration_ms`.
    fn emit(&mut self, tone: Tone);
}

/// LED wrapper that passes every channel through a gamma curve.
#[derive(Debug)]
pub struct GammaLed<L: RgbLed> {
    led: L,
    exponent: f32,
}

impl<L: RgbLed> GammaLed<L> {
    pub fn new(led: L, exponent: f32) -> Self {
        Self { led, exponent }
    }

    /// Returns the wrapped LED.
    pub fn into_inner(self) -> L {
        self.led
    }

    pub fn inner(&self) -> &L {
        &self.led
    }
}

impl<L: RgbLed> RgbLed for GammaLed<L> {
    fn set_color(&mut self, color: Color) {
        self.led.set_color(gamma_encode_color(color, self.exponent));
    }
}
