//! Configuration and error types shared by all tasks.

use crate::colors::Color;
use palette::Srgb;

/// Parameters of one rainbow sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RainbowConfig {
    /// Wall-clock time of one full cycle, in milliseconds.
    pub cycle_ms: u32,

    /// Frames per cycle. Each cycle renders `frames + 1` frames so the first
    /// and last coincide. Twelve or more looks smooth.
    pub frames: u16,

    /// Cycles to run before the palette is captured.
    pub cycles: u8,
}

impl RainbowConfig {
    /// Slow single sweep used at power-on.
    pub const STARTUP: Self = Self {
        cycle_ms: 3000,
        frames: 60,
        cycles: 1,
    };

    /// Fast triple sweep used after a win.
    pub const CELEBRATION: Self = Self {
        cycle_ms: 400,
        frames: 24,
        cycles: 3,
    };
}

/// Power-on fade-in of each LED.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeConfig {
    /// Color every LED ramps up to.
    pub target: Color,

    /// Duration of one LED's fade, in milliseconds.
    pub fade_ms: u32,

    /// Number of fade steps per LED.
    pub steps: u16,

    /// Pause after all-off and after each LED finishes, in milliseconds.
    pub gap_ms: u32,
}

impl FadeConfig {
    /// Warm white fade used at power-on.
    pub const DEFAULT: Self = Self {
        target: Srgb::new(40000, 40000, 40000),
        fade_ms: 400,
        steps: 32,
        gap_ms: 120,
    };
}

/// Win flash of the matched color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashConfig {
    pub times: u8,
    pub on_ms: u32,
    pub off_ms: u32,
}

impl FlashConfig {
    pub const DEFAULT: Self = Self {
        times: 3,
        on_ms: 120,
        off_ms: 120,
    };
}

/// Input polling and contact-bounce rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceConfig {
    /// Poll interval while idle and while held, in milliseconds.
    pub poll_ms: u32,

    /// Extra wait after release before the button is armed again.
    pub settle_ms: u32,
}

impl DebounceConfig {
    pub const DEFAULT: Self = Self {
        poll_ms: 10,
        settle_ms: 40,
    };
}

/// All timing and output constants for one game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub fade: FadeConfig,
    pub startup_rainbow: RainbowConfig,
    pub celebration_rainbow: RainbowConfig,
    pub flash: FlashConfig,
    pub debounce: DebounceConfig,

    /// Exponent handed to [`GammaLed`](crate::hardware::GammaLed).
    pub gamma: f32,
}

impl GameConfig {
    pub const DEFAULT: Self = Self {
        fade: FadeConfig::DEFAULT,
        startup_rainbow: RainbowConfig::STARTUP,
        celebration_rainbow: RainbowConfig::CELEBRATION,
        flash: FlashConfig::DEFAULT,
        debounce: DebounceConfig::DEFAULT,
        gamma: 2.2,
    };
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Palette construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PaletteError {
    /// Fewer than two entries.
    TooShort,

    /// Palette capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for PaletteError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PaletteError::TooShort => {
                write!(f, "palette needs at least one active color plus off")
            }
            PaletteError::CapacityExceeded => {
                write!(f, "palette capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PaletteError {}

/// Errors that abort game startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameError {
    /// Buttons were claimed before any rainbow published a palette.
    NoPalette,

    /// Button handles were already handed out.
    ButtonsAlreadyClaimed,

    /// The board has more LEDs than a palette can hold.
    Palette(PaletteError),
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::NoPalette => {
                write!(f, "no palette has been generated yet")
            }
            GameError::ButtonsAlreadyClaimed => {
                write!(f, "button handles were already claimed")
            }
            GameError::Palette(err) => {
                write!(f, "palette error: {}", err)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

impl From<PaletteError> for GameError {
    fn from(err: PaletteError) -> Self {
        GameError::Palette(err)
    }
}
