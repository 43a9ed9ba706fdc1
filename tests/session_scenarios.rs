//! End-to-end runs through the public `Session` API

use cosmic_collector::persistence::{MemoryStorage, Storage};
use cosmic_collector::sim::{Achievement, Directions, GameEvent, GamePhase, TickInput};
use cosmic_collector::{FrameStatus, Records, Session, SessionResult, Settings};
use proptest::prelude::*;

const DT: f32 = 0.016;

fn session(seed: u64) -> Session<MemoryStorage> {
    Session::new(MemoryStorage::new(), Settings::default(), seed, 800.0, 600.0)
}

/// Teleport onto star `index` and run one frame at `now_ms`
fn grab(session: &mut Session<MemoryStorage>, index: usize, now_ms: f64) -> FrameStatus {
    let pos = session.state().stars[index].pos;
    session.state_mut().player.pos = pos;
    session.frame(&TickInput::default(), DT, now_ms)
}

fn collected(session: &Session<MemoryStorage>) -> usize {
    session.state().stars.iter().filter(|s| s.collected).count()
}

#[test]
fn perfect_fast_run_unlocks_everything() {
    let mut s = session(7);
    s.start();

    let mut result: Option<SessionResult> = None;
    for i in 0..10 {
        match grab(&mut s, i, 10_000.0 + i as f64 * 500.0) {
            FrameStatus::Ended(r) => result = Some(r),
            FrameStatus::Running => assert_eq!(s.state().combo, i as u32 + 1),
            FrameStatus::Inactive => panic!("run stopped early"),
        }
    }

    let result = result.expect("collecting every star ends the run");
    assert!(result.won);
    assert_eq!(result.score, 10);
    assert_eq!(result.max_combo, 10);
    for achievement in Achievement::ALL {
        assert!(result.achievements.contains(&achievement), "{achievement:?}");
    }
    assert!(result.new_high_score);
    assert!(result.new_best_time);
    assert_eq!(s.records().best_time, 59);
    assert_eq!(s.state().phase, GamePhase::Ended);

    let events = s.drain_events();
    assert_eq!(events.last(), Some(&GameEvent::SessionEnded { won: true }));
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::StarCollected { .. }))
            .count(),
        10
    );
}

#[test]
fn idle_round_times_out() {
    let mut s = session(3);
    s.start();

    let mut frames = 0;
    let result = loop {
        frames += 1;
        if let FrameStatus::Ended(r) = s.frame(&TickInput::default(), 0.5, frames as f64 * 500.0) {
            break r;
        }
        assert!(frames < 200, "round never ended");
    };

    assert_eq!(frames, 120);
    assert!(!result.won);
    assert_eq!(result.score, 0);
    assert!(result.achievements.is_empty());
    assert!(!result.new_high_score);
    assert!(s.achievements().is_empty());
    assert_eq!(
        s.frame(&TickInput::default(), DT, 61_000.0),
        FrameStatus::Inactive
    );
}

#[test]
fn slow_second_collection_resets_combo() {
    let mut s = session(11);
    s.start();

    grab(&mut s, 0, 10_000.0);
    assert_eq!(s.state().combo, 1);

    s.state_mut().player.pos = glam::Vec2::new(400.0, 300.0);
    for frame in 1..=10 {
        s.frame(&TickInput::default(), DT, 10_000.0 + frame as f64 * 100.0);
    }

    grab(&mut s, 1, 13_000.0);
    assert_eq!(s.state().score, 2);
    assert_eq!(s.state().combo, 1);
    assert_eq!(s.state().max_combo, 1);
}

#[test]
fn pause_freezes_the_clock_and_the_player() {
    let mut s = session(5);
    s.start();
    s.frame(&TickInput::default(), DT, 0.0);
    let time_left = s.state().time_left;
    let pos = s.state().player.pos;

    s.toggle_pause(0.0);
    let right = TickInput {
        directions: Directions {
            right: true,
            ..Default::default()
        },
        idle_mode: false,
    };
    for i in 0..30 {
        assert_eq!(s.frame(&right, DT, i as f64 * 16.0), FrameStatus::Running);
    }
    assert_eq!(s.state().time_left, time_left);
    assert_eq!(s.state().player.pos, pos);

    s.toggle_pause(600.0);
    s.frame(&right, DT, 600.0);
    assert!(s.state().player.pos.x > pos.x);
    assert!(s.state().time_left < time_left);
}

#[test]
fn records_follow_high_score_and_best_time_rules() {
    let mut s = session(9);

    s.start();
    s.state_mut().score = 3;
    let r = s.end(false);
    assert!(r.new_high_score && !r.new_best_time);

    s.start();
    s.state_mut().score = 10;
    s.state_mut().time_left = 35.7;
    let r = s.end(true);
    assert!(r.new_best_time);
    assert_eq!(s.records().best_time, 35);

    s.start();
    s.state_mut().score = 10;
    s.state_mut().time_left = 20.0;
    let r = s.end(true);
    assert!(!r.new_high_score && !r.new_best_time);
    assert_eq!(*s.records(), Records { high_score: 10, best_time: 35 });

    // A fresh session over the same storage sees the saved records
    let storage = s.storage().clone();
    assert_eq!(
        storage.get_item(Records::HIGH_SCORE_KEY).unwrap().as_deref(),
        Some("10")
    );
    let reopened = Session::new(storage, Settings::default(), 1, 800.0, 600.0);
    assert_eq!(reopened.records().best_time, 35);
}

#[test]
fn autopilot_wins_a_default_round() {
    let mut s = session(21);
    s.start();
    let idle = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut now = 0.0;
    let result = loop {
        now += 1000.0 / 60.0;
        if let FrameStatus::Ended(r) = s.frame(&idle, 1.0 / 60.0, now) {
            break r;
        }
    };
    assert!(result.won, "autopilot finished with {} stars", result.score);
}

fn directions_from_bits(bits: u8) -> Directions {
    Directions {
        up: bits & 1 != 0,
        down: bits & 2 != 0,
        left: bits & 4 != 0,
        right: bits & 8 != 0,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_input_keeps_state_consistent(
        seed in any::<u64>(),
        width in 60.0f32..1600.0,
        height in 60.0f32..1200.0,
        steps in prop::collection::vec((0u8..16, 0.001f32..0.05), 1..400),
    ) {
        let mut s = Session::new(MemoryStorage::new(), Settings::default(), seed, width, height);
        s.start();
        let mut now = 0.0;
        let mut last_score = 0;
        let mut was_collected = vec![false; s.state().star_count()];

        for (bits, dt) in steps {
            now += f64::from(dt) * 1000.0;
            let input = TickInput { directions: directions_from_bits(bits), idle_mode: false };
            let status = s.frame(&input, dt, now);

            let state = s.state();
            let size = state.player.size;
            prop_assert!(state.player.pos.x >= size - 1e-3 || width < 2.0 * size);
            prop_assert!(state.player.pos.x <= width - size + 1e-3);
            prop_assert!(state.player.pos.y >= size - 1e-3 || height < 2.0 * size);
            prop_assert!(state.player.pos.y <= height - size + 1e-3);

            prop_assert!(state.score >= last_score);
            prop_assert!(state.score as usize <= state.star_count());
            prop_assert_eq!(state.score as usize, collected(&s));
            for (i, star) in state.stars.iter().enumerate() {
                prop_assert!(star.collected || !was_collected[i]);
                was_collected[i] = star.collected;
            }
            last_score = state.score;

            if matches!(status, FrameStatus::Ended(_)) {
                break;
            }
        }
    }
}
