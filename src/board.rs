//! Shared game state: the LEDs, the active palette, one palette index per
//! button and the edge-triggered sync signal.
//!
//! Every read-modify-write on the board happens inside a single lock of an
//! `embassy_sync` blocking mutex and never spans an `.await`. On a
//! single-threaded executor this is exactly the run-to-completion section
//! between two suspension points; on a multi-core executor the raw mutex
//! supplies the exclusion instead.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

use crate::colors::{COLOR_OFF, Color};
use crate::hardware::RgbLed;
use crate::swatch::Palette;
use crate::types::GameError;

/// Returns `true` if every index equals every other.
///
/// Empty and single-element slices are trivially equal.
#[inline]
pub fn all_equal(indices: &[usize]) -> bool {
    indices.windows(2).all(|pair| pair[0] == pair[1])
}

struct BoardState<L: RgbLed, const N: usize> {
    leds: [L; N],
    displayed: [Color; N],
    palette: Palette,
    generation: u32,
    indices: [usize; N],
    claimed: bool,
}

impl<L: RgbLed, const N: usize> BoardState<L, N> {
    fn show(&mut self, slot: usize, color: Color) {
        self.leds[slot].set_color(color);
        self.displayed[slot] = color;
    }
}

/// The state every task shares.
///
/// # Type Parameters
/// * `M` - Raw mutex guarding the state (`NoopRawMutex` on a single executor,
///   `CriticalSectionRawMutex` when tasks may run on different cores)
/// * `L` - LED implementation type
/// * `N` - Number of buttons, each with its own LED
pub struct Board<M: RawMutex, L: RgbLed, const N: usize> {
    state: Mutex<M, RefCell<BoardState<L, N>>>,
    sync: Signal<M, ()>,
}

impl<M: RawMutex, L: RgbLed, const N: usize> Board<M, L, N> {
    /// Creates a board with all LEDs off and indices seeded to `0..N`.
    ///
    /// The palette starts as an all-off placeholder; buttons cannot be
    /// claimed until a rainbow has published a real one.
    pub fn new(mut leds: [L; N]) -> Self {
        for led in leds.iter_mut() {
            led.set_color(COLOR_OFF);
        }

        let palette = Palette::dark(N);
        let indices = core::array::from_fn(|slot| slot % palette.len());

        Self {
            state: Mutex::new(RefCell::new(BoardState {
                leds,
                displayed: [COLOR_OFF; N],
                palette,
                generation: 0,
                indices,
                claimed: false,
            })),
            sync: Signal::new(),
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut BoardState<L, N>) -> R) -> R {
        self.state.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Hands out one exclusive handle per button.
    ///
    /// # Errors
    /// * `NoPalette` - no rainbow has published a palette yet
    /// * `ButtonsAlreadyClaimed` - handles were already handed out
    pub fn claim_buttons(&self) -> Result<[ButtonHandle<'_, M, L, N>; N], GameError> {
        self.claim()?;
        Ok(core::array::from_fn(|slot| ButtonHandle::new(self, slot)))
    }

    pub(crate) fn claim(&self) -> Result<(), GameError> {
        self.update(|state| {
            if state.generation == 0 {
                return Err(GameError::NoPalette);
            }
            if state.claimed {
                return Err(GameError::ButtonsAlreadyClaimed);
            }
            state.claimed = true;
            Ok(())
        })
    }

    /// Replaces the palette as a whole and returns the new generation number.
    pub fn publish_palette(&self, palette: Palette) -> u32 {
        self.update(|state| {
            state.palette = palette;
            state.generation = state.generation.wrapping_add(1).max(1);
            state.generation
        })
    }

    /// Returns a copy of the current palette.
    pub fn palette(&self) -> Palette {
        self.update(|state| state.palette.clone())
    }

    /// Number of palettes published so far.
    pub fn generation(&self) -> u32 {
        self.update(|state| state.generation)
    }

    /// Snapshot of every button's palette index.
    pub fn indices(&self) -> [usize; N] {
        self.update(|state| state.indices)
    }

    /// Color last written to the LED in `slot`.
    pub fn displayed(&self, slot: usize) -> Color {
        self.update(|state| state.displayed[slot])
    }

    /// The color every button currently shows, if they all match.
    pub fn matched_color(&self) -> Option<Color> {
        self.update(|state| {
            if all_equal(&state.indices) {
                state.indices.first().map(|&index| state.palette.color(index))
            } else {
                None
            }
        })
    }

    /// Returns `true` if every button points at the same palette entry.
    pub fn all_equal(&self) -> bool {
        self.update(|state| all_equal(&state.indices))
    }

    /// Writes one color to one LED.
    pub fn show(&self, slot: usize, color: Color) {
        self.update(|state| state.show(slot, color));
    }

    /// Writes the same color to every LED.
    pub fn show_all(&self, color: Color) {
        self.update(|state| {
            for slot in 0..N {
                state.show(slot, color);
            }
        });
    }

    /// Writes one animation frame, one color per LED.
    pub fn show_frame(&self, frame: &[Color; N]) {
        self.update(|state| {
            for (slot, color) in frame.iter().enumerate() {
                state.show(slot, *color);
            }
        });
    }

    /// Resets every index to its starting value and shows the matching
    /// palette colors.
    pub fn reseed(&self) {
        self.update(|state| {
            let len = state.palette.len();
            for slot in 0..N {
                let index = slot % len;
                state.indices[slot] = index;
                let color = state.palette.color(index);
                state.show(slot, color);
            }
        });
    }

    /// Raises the sync signal. Raising an already raised signal is a no-op.
    pub fn raise_sync(&self) {
        #[cfg(feature = "defmt")]
        defmt::info!("all buttons match");

        self.sync.signal(());
    }

    /// Waits for the sync signal and clears it.
    pub async fn wait_sync(&self) {
        self.sync.wait().await;
    }

    /// Clears a pending sync signal without waiting.
    pub fn clear_sync(&self) {
        self.sync.reset();
    }

    /// Returns `true` if a sync signal is pending.
    pub fn sync_pending(&self) -> bool {
        self.sync.signaled()
    }

    /// Runs `f` with exclusive access to the LEDs.
    pub fn with_leds<R>(&self, f: impl FnOnce(&mut [L; N]) -> R) -> R {
        self.update(|state| f(&mut state.leds))
    }
}

/// Exclusive write access to one button's palette index.
///
/// Only [`Board::claim_buttons`] creates these, once per slot, so each index
/// has exactly one writer besides the orchestrator's reseed.
pub struct ButtonHandle<'b, M: RawMutex, L: RgbLed, const N: usize> {
    board: &'b Board<M, L, N>,
    slot: usize,
}

impl<'b, M: RawMutex, L: RgbLed, const N: usize> ButtonHandle<'b, M, L, N> {
    pub(crate) fn new(board: &'b Board<M, L, N>, slot: usize) -> Self {
        Self { board, slot }
    }

    /// The button this handle owns.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// The board this handle belongs to.
    pub fn board(&self) -> &'b Board<M, L, N> {
        self.board
    }

    /// Current palette index of this button.
    pub fn index(&self) -> usize {
        self.board.update(|state| state.indices[self.slot])
    }

    /// Moves this button to the next palette entry and shows it.
    ///
    /// Wraps using the palette length at the moment of the press, since a
    /// new palette may have been published since the last one.
    pub fn advance(&mut self) -> usize {
        let slot = self.slot;
        self.board.update(|state| {
            let index = (state.indices[slot] + 1) % state.palette.len();
            state.indices[slot] = index;
            let color = state.palette.color(index);
            state.show(slot, color);
            index
        })
    }
}
