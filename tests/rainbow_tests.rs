//! Integration tests for the rainbow palette generator

mod common;
use common::*;

use chroma_match::{COLOR_OFF, Palette, RainbowConfig, animate_rainbow, rainbow_frame};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const SWEEP: RainbowConfig = RainbowConfig {
    cycle_ms: 600,
    frames: 60,
    cycles: 1,
};

fn generate(seed: u64, config: RainbowConfig) -> Palette {
    let clock = SimClock::new();
    let board = new_board(&clock);
    let mut delay = clock.delay();
    let mut rng = SmallRng::seed_from_u64(seed);

    clock
        .run_until(animate_rainbow(&board, &mut delay, &mut rng, &config), 1_000_000)
        .unwrap()
        .unwrap()
}

#[test]
fn same_seed_gives_same_palette() {
    assert_eq!(generate(42, SWEEP), generate(42, SWEEP));
}

#[test]
fn different_seeds_give_different_palettes() {
    assert_ne!(generate(1, SWEEP), generate(2, SWEEP));
}

#[test]
fn off_color_is_always_last() {
    let configs = [
        RainbowConfig { cycle_ms: 100, frames: 12, cycles: 1 },
        RainbowConfig::CELEBRATION,
        RainbowConfig { cycle_ms: 3000, frames: 60, cycles: 2 },
        RainbowConfig { cycle_ms: 5, frames: 1, cycles: 0 },
    ];

    for (seed, config) in configs.into_iter().enumerate() {
        let palette = generate(seed as u64, config);
        assert_eq!(palette.len(), 4);
        assert_eq!(palette.color(palette.off_index()), COLOR_OFF);
    }
}

#[test]
fn renders_frames_plus_one_per_cycle() {
    let clock = SimClock::new();
    let board = new_board(&clock);
    clear_histories(&board);
    let mut delay = clock.delay();
    let mut rng = SmallRng::seed_from_u64(7);

    clock
        .run_until(
            animate_rainbow(&board, &mut delay, &mut rng, &RainbowConfig::CELEBRATION),
            1_000_000,
        )
        .unwrap()
        .unwrap();

    let frames = board.with_leds(|leds| leds[0].history().len());
    assert_eq!(frames, (24 + 1) * 3);

    // 400 ms / 24 frames = 16 ms per frame
    assert_eq!(clock.now(), 75 * 16);
}

#[test]
fn palette_is_the_final_frame_and_is_published() {
    let clock = SimClock::new();
    let board = new_board(&clock);
    let mut delay = clock.delay();
    let mut rng = SmallRng::seed_from_u64(99);

    let palette = clock
        .run_until(animate_rainbow(&board, &mut delay, &mut rng, &SWEEP), 1_000_000)
        .unwrap()
        .unwrap();

    assert_eq!(board.generation(), 1);
    assert_eq!(board.palette(), palette);
    for slot in 0..3 {
        assert_eq!(board.displayed(slot), palette.color(slot));
    }
}

#[test]
fn each_call_publishes_a_new_generation() {
    let clock = SimClock::new();
    let board = new_board(&clock);
    let mut delay = clock.delay();
    let mut rng = SmallRng::seed_from_u64(5);

    for expected in 1..=3 {
        clock
            .run_until(animate_rainbow(&board, &mut delay, &mut rng, &SWEEP), 1_000_000)
            .unwrap()
            .unwrap();
        assert_eq!(board.generation(), expected);
    }
}

#[test]
fn frame_helper_matches_rendered_leds() {
    let first = rainbow_frame::<3>(0.0, 0, 12);
    let quarter = rainbow_frame::<3>(0.0, 3, 12);
    assert_ne!(first, quarter);
    assert_eq!(first[1], rainbow_frame::<3>(core::f32::consts::TAU / 3.0, 0, 12)[0]);
}
