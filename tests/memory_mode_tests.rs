//! Memory mode integration tests.
//!
//! All timing runs on the controller's virtual clock, so every test
//! advances time explicitly.

use std::sync::Arc;
use std::time::Duration;

use mahjong_bridge::{
    EngineConfig, GameRng, GameSession, InputRejection, MemoryEvent, MemoryModeController,
    MemoryPhase, MemoryStorage, RecordStore, RoundGenerator, TileCatalog, TilePosition,
};

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

fn generator() -> RoundGenerator {
    RoundGenerator::new(Arc::new(TileCatalog::standard()), GameRng::new(5))
}

fn memory_session() -> GameSession<MemoryStorage> {
    GameSession::new(
        EngineConfig::default().with_memory_mode(true),
        Arc::new(TileCatalog::standard()),
        RecordStore::open(MemoryStorage::new()),
        3,
    )
    .unwrap()
}

// =============================================================================
// Preview Countdown
// =============================================================================

#[test]
fn test_preview_counts_down_then_hides() {
    let mut gen = generator();
    let round = gen.generate(6).unwrap();
    let mut memory = MemoryModeController::new(&EngineConfig::default().with_memory_mode(true));

    memory.start_round(&round);
    assert_eq!(memory.phase(), MemoryPhase::Previewing);
    assert_eq!(memory.remaining_seconds(), 5);
    assert!(!memory.accepts_input());

    let events = memory.advance(secs(5));
    assert_eq!(
        events,
        vec![
            MemoryEvent::CountdownTick { remaining_seconds: 4 },
            MemoryEvent::CountdownTick { remaining_seconds: 3 },
            MemoryEvent::CountdownTick { remaining_seconds: 2 },
            MemoryEvent::CountdownTick { remaining_seconds: 1 },
            MemoryEvent::PreviewEnded,
        ]
    );
    assert_eq!(memory.phase(), MemoryPhase::Hidden);
    assert!(memory.accepts_input());
    assert!(!memory.is_revealed(TilePosition::left(0)));
    assert_eq!(memory.pending_timers(), 0);
}

/// A new round mid-preview cancels the old countdown for good.
#[test]
fn test_new_round_cancels_old_preview() {
    let mut gen = generator();
    let first = gen.generate(6).unwrap();
    let second = gen.generate(6).unwrap();
    let mut memory = MemoryModeController::new(&EngineConfig::default().with_memory_mode(true));

    memory.start_round(&first);
    memory.advance(secs(2));
    assert_eq!(memory.remaining_seconds(), 3);

    memory.start_round(&second);
    assert_eq!(memory.round(), Some(second.id()));
    assert_eq!(memory.remaining_seconds(), 5);

    // The first round's completion was due at t=5.
    let events = memory.advance(secs(3));
    assert!(!events.contains(&MemoryEvent::PreviewEnded));
    assert_eq!(memory.phase(), MemoryPhase::Previewing);
    assert_eq!(memory.remaining_seconds(), 2);

    // The second round's completion is due at t=7.
    let events = memory.advance(secs(2));
    assert_eq!(events.last(), Some(&MemoryEvent::PreviewEnded));
    assert_eq!(memory.phase(), MemoryPhase::Hidden);
}

#[test]
fn test_leaving_stops_everything() {
    let mut gen = generator();
    let round = gen.generate(6).unwrap();
    let mut memory = MemoryModeController::new(&EngineConfig::default().with_memory_mode(true));

    memory.start_round(&round);
    memory.leave();
    assert_eq!(memory.pending_timers(), 0);
    assert!(memory.advance(secs(60)).is_empty());
}

// =============================================================================
// Hints
// =============================================================================

#[test]
fn test_hint_reveals_then_covers() {
    let mut session = memory_session();
    session.advance(secs(5));
    assert_eq!(session.memory().phase(), MemoryPhase::Hidden);

    assert!(session.reveal_tile(TilePosition::right(3)));
    assert!(session.request_hint());
    assert_eq!(session.memory().phase(), MemoryPhase::HintRevealing);
    assert_eq!(session.connect(0, 0), Err(InputRejection::BoardLocked));

    // Only one hint at a time.
    assert!(!session.request_hint());

    let events = session.advance(secs(3));
    assert_eq!(events, vec![MemoryEvent::HintStarted, MemoryEvent::HintEnded]);
    assert_eq!(session.memory().phase(), MemoryPhase::Hidden);

    // The tile flipped before the hint stays up; the rest are covered again.
    let state = session.memory_state();
    assert_eq!(state.revealed.len(), 1);
    assert!(state.revealed.contains(&TilePosition::right(3)));
}

/// Once the player has left, nothing can restart a timer.
#[test]
fn test_hint_after_leaving_is_refused() {
    let mut session = memory_session();
    session.leave();

    assert!(!session.request_hint());
    assert_eq!(session.memory().phase(), MemoryPhase::Hidden);
    assert_eq!(session.memory().pending_timers(), 0);
    assert!(session.advance(secs(10)).is_empty());
}

#[test]
fn test_hint_refused_during_preview() {
    let mut session = memory_session();
    assert!(!session.request_hint());
    assert_eq!(session.memory().pending_timers(), 2);
}

#[test]
fn test_new_round_cancels_hint() {
    let mut session = memory_session();
    session.advance(secs(5));
    assert!(session.request_hint());

    session.start_round().unwrap();
    assert_eq!(session.memory().phase(), MemoryPhase::Previewing);

    let events = session.advance(secs(3));
    assert!(!events.contains(&MemoryEvent::HintEnded));
}

#[test]
fn test_verify_during_hidden_play_reveals_all() {
    let mut session = memory_session();
    session.advance(secs(5));
    session.connect(0, 0).unwrap();
    session.verify().unwrap();

    let state = session.memory_state();
    assert_eq!(state.phase, MemoryPhase::Inactive);
    assert_eq!(state.revealed.len(), 12);
    assert_eq!(session.memory().pending_timers(), 0);
}

#[test]
fn test_disable_mid_preview() {
    let mut session = memory_session();
    session.advance(secs(1));
    session.set_memory_mode(false);

    assert_eq!(session.memory().phase(), MemoryPhase::Inactive);
    assert!(session.advance(secs(10)).is_empty());
    session.connect(0, 0).unwrap();
}
