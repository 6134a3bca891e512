//! Fire-and-forget sound effects.
//!
//! Game tasks drop a [`Jingle`] into a [`JingleQueue`] with
//! [`request_jingle`], which never waits. A separate [`play_jingles`] task
//! drains the queue and drives the [`ToneOutput`].

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use embedded_hal_async::delay::DelayNs;

use crate::hardware::{Tone, ToneOutput};

/// Number of jingles that can wait to be played.
pub const JINGLE_QUEUE_DEPTH: usize = 4;

/// Queue between the game tasks and the jingle player.
pub type JingleQueue<M> = Channel<M, Jingle, JINGLE_QUEUE_DEPTH>;

const CLICK_NOTES: &[Tone] = &[Tone::new(2_000, 12, 12_000)];

// C5 E5 G5 C6, last note held
const WIN_NOTES: &[Tone] = &[
    Tone::new(523, 90, 20_000),
    Tone::new(659, 90, 20_000),
    Tone::new(784, 90, 20_000),
    Tone::new(1_047, 240, 20_000),
];

/// Silence between two notes of a jingle, in milliseconds.
pub const NOTE_GAP_MS: u32 = 20;

/// A short sound effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Jingle {
    /// Button press feedback.
    Click,

    /// All buttons matched.
    Win,
}

impl Jingle {
    /// The notes of this jingle, in order.
    pub fn notes(self) -> &'static [Tone] {
        match self {
            Jingle::Click => CLICK_NOTES,
            Jingle::Win => WIN_NOTES,
        }
    }
}

/// Queues `jingle` without waiting. Returns `false` if the queue was full and
/// the jingle was dropped.
pub fn request_jingle<M: RawMutex>(queue: &JingleQueue<M>, jingle: Jingle) -> bool {
    match queue.try_send(jingle) {
        Ok(()) => true,
        Err(_) => {
            #[cfg(feature = "defmt")]
            defmt::debug!("jingle queue full, dropping {}", jingle);
            false
        }
    }
}

/// Plays every note of `jingle`, waiting out each note and the gap after it.
pub async fn play_jingle<T: ToneOutput, D: DelayNs>(jingle: Jingle, speaker: &mut T, delay: &mut D) {
    for tone in jingle.notes() {
        speaker.emit(*tone);
        delay.delay_ms(tone.duration_ms + NOTE_GAP_MS).await;
    }
}

/// Jingle player task. Runs forever.
pub async fn play_jingles<M, T, D>(queue: &JingleQueue<M>, speaker: &mut T, delay: &mut D)
where
    M: RawMutex,
    T: ToneOutput,
    D: DelayNs,
{
    #[cfg(feature = "defmt")]
    defmt::info!("jingle player started");

    loop {
        let jingle = queue.receive().await;
        play_jingle(jingle, speaker, delay).await;
    }
}
