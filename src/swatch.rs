//! The active set of selectable colors.

use crate::colors::{COLOR_OFF, Color};
use crate::types::PaletteError;
use heapless::Vec;

/// Maximum number of entries a [`Palette`] can hold, off color included.
pub const PALETTE_CAPACITY: usize = 9;

/// Ordered list of selectable colors with a trailing off color.
///
/// Entries `0..len-1` are the active colors captured from the last rainbow,
/// one per LED. The last entry is always [`COLOR_OFF`]. A palette is never
/// edited after construction; a new generation replaces it as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color, PALETTE_CAPACITY>,
}

impl Palette {
    /// Builds a palette from the active colors and appends the off color.
    ///
    /// # Errors
    /// * `TooShort` - `active` is empty, so the palette would only hold off
    /// * `CapacityExceeded` - more than `PALETTE_CAPACITY - 1` active colors
    pub fn from_active(active: &[Color]) -> Result<Self, PaletteError> {
        if active.is_empty() {
            return Err(PaletteError::TooShort);
        }

        let mut colors = Vec::new();
        colors
            .extend_from_slice(active)
            .map_err(|_| PaletteError::CapacityExceeded)?;
        colors
            .push(COLOR_OFF)
            .map_err(|_| PaletteError::CapacityExceeded)?;

        Ok(Self { colors })
    }

    /// All-off placeholder used before the first rainbow has run.
    pub(crate) fn dark(active: usize) -> Self {
        let mut colors = Vec::new();
        for _ in 0..=active.min(PALETTE_CAPACITY - 1) {
            let _ = colors.push(COLOR_OFF);
        }
        Self { colors }
    }

    /// Number of entries, off color included. Always at least 2.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// A palette is never empty; provided for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the color at `index`, wrapping around the palette length.
    #[inline]
    pub fn color(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    /// Index of the trailing off color.
    #[inline]
    pub fn off_index(&self) -> usize {
        self.colors.len() - 1
    }

    /// The active colors, without the trailing off color.
    pub fn active(&self) -> &[Color] {
        &self.colors[..self.off_index()]
    }

    /// All entries in order, off color last.
    pub fn as_slice(&self) -> &[Color] {
        &self.colors
    }
}
