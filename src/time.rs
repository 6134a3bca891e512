//! Frame timing helpers.
//!
//! All suspension goes through `embedded_hal_async::delay::DelayNs`; on
//! embassy that is `embassy_time::Delay`, in tests a virtual clock.

/// Shortest sleep the scheduler can honor, in milliseconds.
pub const MIN_FRAME_MS: u32 = 1;

/// Time between two frames when `duration_ms` is split into `frames`.
///
/// Never shorter than [`MIN_FRAME_MS`], so a frame loop always yields.
#[inline]
pub fn frame_interval_ms(duration_ms: u32, frames: u16) -> u32 {
    (duration_ms / u32::from(frames.max(1))).max(MIN_FRAME_MS)
}
