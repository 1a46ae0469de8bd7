//! Memory mode state machine.
//!
//! ```text
//!   start_round ──► Previewing ──(countdown ends / cancel)──► Hidden
//!                                                              │  ▲
//!                                                  request_hint│  │hint expires
//!                                                              ▼  │
//!                                                          HintRevealing
//!
//!   verify / disable ──► Inactive (all revealed, no timers)
//! ```
//!
//! All timers live in the controller's own `TimerQueue`. Every payload
//! carries the epoch it was scheduled in, and starting a round bumps the
//! epoch after cancelling the queue. A timer from an older round can
//! therefore never act on a newer one.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::EngineConfig;
use crate::round::{Round, RoundId, TilePosition};
use crate::timers::{TimerHandle, TimerQueue};

/// Visibility phase of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoryPhase {
    /// Memory mode is off or the round was submitted: everything visible.
    Inactive,
    /// All tiles visible while the countdown runs.
    Previewing,
    /// Normal memory play; only individually revealed tiles are visible.
    Hidden,
    /// Temporary full reveal from a hint.
    HintRevealing,
}

/// Snapshot of the memory mode state for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryModeState {
    pub phase: MemoryPhase,
    /// Seconds left on the preview countdown, 0 outside the preview.
    pub remaining_seconds: u32,
    /// Positions currently face up.
    pub revealed: BTreeSet<TilePosition>,
}

/// Timer-driven transitions reported by `advance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryEvent {
    /// The preview countdown moved to `remaining_seconds`.
    CountdownTick { remaining_seconds: u32 },
    /// The preview finished and the tiles were covered.
    PreviewEnded,
    /// A hint uncovered the hidden tiles.
    HintStarted,
    /// The hint window closed and the hinted tiles were covered again.
    HintEnded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerKind {
    PreviewTick,
    PreviewComplete,
    HintExpire,
}

#[derive(Clone, Copy, Debug)]
struct MemoryTimer {
    epoch: u64,
    kind: TimerKind,
}

/// Owns the reveal/hide state and timers of memory mode for one session.
#[derive(Debug)]
pub struct MemoryModeController {
    enabled: bool,
    preview_duration: Duration,
    preview_seconds: u32,
    hint_duration: Duration,
    countdown_tick: Duration,

    phase: MemoryPhase,
    remaining_seconds: u32,
    revealed: BTreeSet<TilePosition>,
    pair_count: usize,
    round: Option<RoundId>,
    round_open: bool,

    epoch: u64,
    queue: TimerQueue<MemoryTimer>,
    preview_tick: Option<TimerHandle>,
    preview_done: Option<TimerHandle>,
    hint_timer: Option<TimerHandle>,
    hint_snapshot: Vec<TilePosition>,
    // Transitions from player actions, reported on the next `advance`.
    queued_events: Vec<MemoryEvent>,
}

impl MemoryModeController {
    /// Create a controller with the timings and initial mode from `config`.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            enabled: config.memory_mode,
            preview_duration: config.preview_duration,
            preview_seconds: config.preview_seconds(),
            hint_duration: config.hint_duration,
            countdown_tick: config.countdown_tick,
            phase: MemoryPhase::Inactive,
            remaining_seconds: 0,
            revealed: BTreeSet::new(),
            pair_count: 0,
            round: None,
            round_open: false,
            epoch: 0,
            queue: TimerQueue::new(),
            preview_tick: None,
            preview_done: None,
            hint_timer: None,
            hint_snapshot: Vec::new(),
            queued_events: Vec::new(),
        }
    }

    // === Queries ===

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn phase(&self) -> MemoryPhase {
        self.phase
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Round the current timers belong to.
    #[must_use]
    pub fn round(&self) -> Option<RoundId> {
        self.round
    }

    /// Generation counter compared by every timer when it fires.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Timers still waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.queue.len()
    }

    /// Whether a tile is face up.
    #[must_use]
    pub fn is_revealed(&self, position: TilePosition) -> bool {
        self.phase == MemoryPhase::Inactive || self.revealed.contains(&position)
    }

    /// Connections may only be drawn outside the preview and hint windows.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        !matches!(self.phase, MemoryPhase::Previewing | MemoryPhase::HintRevealing)
    }

    /// Whether `request_hint` would currently succeed.
    #[must_use]
    pub fn hint_available(&self) -> bool {
        self.enabled
            && self.round_open
            && self.phase == MemoryPhase::Hidden
            && self.hint_timer.is_none()
            && self.hidden_positions().next().is_some()
    }

    /// Snapshot for rendering.
    #[must_use]
    pub fn state(&self) -> MemoryModeState {
        let revealed = if self.phase == MemoryPhase::Inactive {
            TilePosition::all(self.pair_count).collect()
        } else {
            self.revealed.clone()
        };
        MemoryModeState {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            revealed,
        }
    }

    // === Round lifecycle ===

    /// Prepare for a freshly dealt (or reset) round.
    ///
    /// Cancels every timer of the previous round before anything else.
    pub fn start_round(&mut self, round: &Round) {
        self.teardown_timers();
        self.epoch += 1;
        self.round = Some(round.id());
        self.pair_count = round.pair_count();
        self.round_open = true;

        if self.enabled {
            self.begin_preview();
        } else {
            self.go_inactive();
        }
        tracing::debug!(round = %round.id(), epoch = self.epoch, phase = ?self.phase, "memory mode round start");
    }

    /// Stop all timers because the player left the round.
    pub fn leave(&mut self) {
        self.cancel_preview();
        self.cancel_hint();
        self.teardown_timers();
        self.epoch += 1;
        self.round_open = false;
    }

    /// Cut the preview short and cover the tiles.
    ///
    /// Returns `false` when no preview was running.
    pub fn cancel_preview(&mut self) -> bool {
        if self.phase != MemoryPhase::Previewing {
            return false;
        }
        self.end_preview();
        true
    }

    /// Cancel a pending hint and cover the hinted tiles immediately.
    ///
    /// Returns `false` when no hint was showing.
    pub fn cancel_hint(&mut self) -> bool {
        if self.phase != MemoryPhase::HintRevealing {
            return false;
        }
        self.end_hint();
        true
    }

    /// Reveal everything because the round was submitted.
    ///
    /// Applies in every phase and cancels any pending preview or hint.
    pub fn reveal_all_for_verification(&mut self) {
        self.teardown_timers();
        self.round_open = false;
        self.go_inactive();
    }

    /// Turn memory mode on or off.
    ///
    /// Turning it off reveals everything and tears down all timers. Turning
    /// it on during an open round starts a fresh preview.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        self.teardown_timers();
        self.epoch += 1;

        if enabled && self.round_open {
            self.begin_preview();
        } else {
            self.go_inactive();
        }
        tracing::debug!(enabled, epoch = self.epoch, "memory mode toggled");
    }

    // === Player actions ===

    /// Reveal every hidden tile for a short time.
    ///
    /// Only one hint at a time, never during the preview. The tiles hidden
    /// at request time are the ones covered again when it expires.
    pub fn request_hint(&mut self) -> bool {
        if !self.hint_available() {
            return false;
        }

        self.hint_snapshot = self.hidden_positions().collect();
        self.revealed.extend(self.hint_snapshot.iter().copied());
        self.phase = MemoryPhase::HintRevealing;
        self.hint_timer = Some(self.schedule(self.hint_duration, TimerKind::HintExpire));
        self.queued_events.push(MemoryEvent::HintStarted);

        tracing::debug!(tiles = self.hint_snapshot.len(), "hint started");
        true
    }

    /// Flip a single tile face up for the rest of the hidden period.
    pub fn reveal_tile(&mut self, position: TilePosition) -> bool {
        if !self.round_open || self.phase != MemoryPhase::Hidden || position.index >= self.pair_count {
            return false;
        }
        self.revealed.insert(position)
    }

    // === Clock ===

    /// Advance the clock by `elapsed`, firing due timers in order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<MemoryEvent> {
        let until = self.queue.now() + elapsed;
        let mut events = std::mem::take(&mut self.queued_events);

        while let Some(fired) = self.queue.pop_due(until) {
            if fired.payload.epoch != self.epoch {
                tracing::trace!(
                    timer_epoch = fired.payload.epoch,
                    epoch = self.epoch,
                    "stale memory timer suppressed"
                );
                continue;
            }

            match fired.payload.kind {
                TimerKind::PreviewTick => {
                    if self.preview_tick != Some(fired.handle) {
                        continue;
                    }
                    self.preview_tick = None;
                    self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
                    events.push(MemoryEvent::CountdownTick {
                        remaining_seconds: self.remaining_seconds,
                    });
                    if self.remaining_seconds > 1 {
                        self.preview_tick = Some(self.schedule(self.countdown_tick, TimerKind::PreviewTick));
                    }
                }
                TimerKind::PreviewComplete => {
                    if self.preview_done != Some(fired.handle) {
                        continue;
                    }
                    self.preview_done = None;
                    self.end_preview();
                    events.push(MemoryEvent::PreviewEnded);
                }
                TimerKind::HintExpire => {
                    if self.hint_timer != Some(fired.handle) {
                        continue;
                    }
                    self.hint_timer = None;
                    self.end_hint();
                    events.push(MemoryEvent::HintEnded);
                }
            }
        }

        self.queue.settle(until);
        events
    }

    // === Internals ===

    fn schedule(&mut self, after: Duration, kind: TimerKind) -> TimerHandle {
        let epoch = self.epoch;
        self.queue.schedule(after, MemoryTimer { epoch, kind })
    }

    fn hidden_positions(&self) -> impl Iterator<Item = TilePosition> + '_ {
        TilePosition::all(self.pair_count).filter(move |p| !self.revealed.contains(p))
    }

    fn teardown_timers(&mut self) {
        self.queue.cancel_all();
        self.preview_tick = None;
        self.preview_done = None;
        self.hint_timer = None;
        self.hint_snapshot.clear();
        self.queued_events.clear();
    }

    fn begin_preview(&mut self) {
        self.phase = MemoryPhase::Previewing;
        self.remaining_seconds = self.preview_seconds;
        self.revealed = TilePosition::all(self.pair_count).collect();

        self.preview_done = Some(self.schedule(self.preview_duration, TimerKind::PreviewComplete));
        if self.remaining_seconds > 1 {
            self.preview_tick = Some(self.schedule(self.countdown_tick, TimerKind::PreviewTick));
        }
    }

    fn end_preview(&mut self) {
        for handle in [self.preview_tick.take(), self.preview_done.take()].into_iter().flatten() {
            self.queue.cancel(handle);
        }
        self.phase = MemoryPhase::Hidden;
        self.remaining_seconds = 0;
        self.revealed.clear();
    }

    fn end_hint(&mut self) {
        if let Some(handle) = self.hint_timer.take() {
            self.queue.cancel(handle);
        }
        for position in self.hint_snapshot.drain(..) {
            self.revealed.remove(&position);
        }
        self.phase = MemoryPhase::Hidden;
    }

    fn go_inactive(&mut self) {
        self.phase = MemoryPhase::Inactive;
        self.remaining_seconds = 0;
        self.revealed = TilePosition::all(self.pair_count).collect();
    }
}
