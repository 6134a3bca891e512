#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Board`**: Shared state: the LEDs, the active `Palette`, one palette index per button and the sync signal
//! - **`ButtonHandle`**: Exclusive write access to one button's index, handed out once by `Board::claim_buttons`
//! - **`Palette`**: The selectable colors captured from the last rainbow plus a trailing off color
//! - **`ButtonWatcher`**: Debounced per-button state machine (`Idle` → `Pressed` → `Held` → `Settling`)
//! - **`Celebration`**: Orchestrator that flashes, plays the win jingle, runs a new rainbow and reseeds
//! - **`animate_rainbow`**: Phase-shifted sine sweep that publishes a fresh palette
//! - **`run_startup`**: Power-on fade-in followed by the first rainbow
//! - **`RgbLed`** / **`ButtonInput`** / **`ToneOutput`**: Traits to implement for your hardware
//!
//! Colors are `Srgb<u16>` with every channel in `0..=65535`. Wrap an LED in
//! `GammaLed` to apply a gamma curve on the way out.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod audio;
pub mod board;
pub mod button;
pub mod celebration;
pub mod colors;
pub mod game;
pub mod hardware;
pub mod rainbow;
pub mod startup;
pub mod swatch;
pub mod time;
pub mod types;

pub use audio::{Jingle, JingleQueue, play_jingles, request_jingle};
pub use board::{Board, ButtonHandle, all_equal};
pub use button::{ButtonState, ButtonWatcher};
pub use celebration::{Celebration, flash};
pub use colors::{COLOR_OFF, Color, MAX_INTENSITY, gamma_encode, oscillate};
pub use game::run_game;
pub use hardware::{ButtonInput, GammaLed, RgbLed, Tone, ToneOutput};
pub use rainbow::{animate_rainbow, rainbow_frame};
pub use startup::run_startup;
pub use swatch::{PALETTE_CAPACITY, Palette};
pub use types::{
    DebounceConfig, FadeConfig, FlashConfig, GameConfig, GameError, PaletteError, RainbowConfig,
};

/// Number of buttons in the reference game.
pub const BUTTON_COUNT: usize = 3;
