//! Whole-game runner.
//!
//! [`run_game`] is a plain `async fn`, not an embassy task: embassy tasks
//! cannot be generic, so firmware wraps it in a thin concrete task:
//!
//! ```ignore
//! #[embassy_executor::task]
//! async fn game_task(
//!     board: &'static Board<CriticalSectionRawMutex, PwmLed, 3>,
//!     jingles: &'static JingleQueue<CriticalSectionRawMutex>,
//!     buttons: [PinButton; 3],
//!     speaker: Buzzer,
//! ) {
//!     let mut speaker = speaker;
//!     let rng = SmallRng::seed_from_u64(RoscRng.next_u64());
//!     let err = run_game(board, jingles, buttons, &mut speaker, Delay, rng, &GameConfig::DEFAULT).await;
//!     defmt::panic!("game stopped: {}", err);
//! }
//! ```

use embassy_futures::join::join_array;
use embassy_futures::select::{Either3, select3};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use rand::Rng;

use crate::audio::{JingleQueue, play_jingles};
use crate::board::{Board, ButtonHandle};
use crate::button::ButtonWatcher;
use crate::celebration::Celebration;
use crate::hardware::{ButtonInput, RgbLed, ToneOutput};
use crate::startup::run_startup;
use crate::types::{GameConfig, GameError};

/// Runs startup, then drives every button watcher, the celebration
/// orchestrator and the jingle player concurrently.
///
/// Watchers are only created after startup has published the first palette.
/// Each task gets its own clone of `delay`. Returns only on failure.
pub async fn run_game<M, L, B, T, D, R, const N: usize>(
    board: &Board<M, L, N>,
    jingles: &JingleQueue<M>,
    inputs: [B; N],
    speaker: &mut T,
    delay: D,
    mut rng: R,
    config: &GameConfig,
) -> GameError
where
    M: RawMutex,
    L: RgbLed,
    B: ButtonInput,
    T: ToneOutput,
    D: DelayNs + Clone,
    R: Rng,
{
    let mut startup_delay = delay.clone();
    if let Err(err) = run_startup(
        board,
        &mut startup_delay,
        &mut rng,
        &config.fade,
        &config.startup_rainbow,
    )
    .await
    {
        return err.into();
    }

    if let Err(err) = board.claim() {
        return err;
    }

    let mut slot = 0;
    let mut watchers = inputs.map(|input| {
        let handle = ButtonHandle::new(board, slot);
        slot += 1;
        ButtonWatcher::new(handle, input, delay.clone(), jingles, config.debounce)
    });

    let mut celebration = Celebration::new(
        board,
        jingles,
        delay.clone(),
        rng,
        config.flash,
        config.celebration_rainbow,
    );

    let mut jingle_delay = delay;

    #[cfg(feature = "defmt")]
    defmt::info!("game running with {} buttons", N);

    match select3(
        join_array(watchers.each_mut().map(|watcher| watcher.run())),
        celebration.run(),
        play_jingles(jingles, speaker, &mut jingle_delay),
    )
    .await
    {
        Either3::Second(err) => err.into(),
        Either3::First(_) | Either3::Third(_) => {
            unreachable!("button watchers and the jingle player never return")
        }
    }
}
