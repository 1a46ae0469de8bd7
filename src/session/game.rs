//! Game session: one player's run of rounds.
//!
//! The session owns the generator, the current round, the player's input,
//! memory mode and the record store, and applies the verifier's score delta.
//! Presentations drive it with discrete calls (taps, buttons) and with
//! `advance` for elapsed time.

use std::sync::Arc;
use std::time::Duration;

use crate::core::{EngineConfig, EngineError, GameRng, RecordedScore};
use crate::ledger::{ConnectRejection, Connection, ConnectionLedger, Selection, SelectionOutcome};
use crate::memory::{MemoryEvent, MemoryModeController, MemoryModeState};
use crate::records::{GameRecord, RecordStorage, RecordStore};
use crate::round::{Round, RoundGenerator, Side, TilePosition};
use crate::tiles::TileCatalog;
use crate::verify::{VerificationResult, Verifier, VerifyRejection};

/// Why the session refused a connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputRejection {
    /// Memory mode is previewing or showing a hint.
    BoardLocked,
    /// The round was already verified.
    AlreadyVerified,
    /// The ledger refused the connection.
    Ledger(ConnectRejection),
}

/// A running game.
pub struct GameSession<S: RecordStorage> {
    config: EngineConfig,
    generator: RoundGenerator,
    verifier: Verifier,
    round: Round,
    ledger: ConnectionLedger,
    selection: Selection,
    memory: MemoryModeController,
    store: RecordStore<S>,
    score: i64,
    streak: u32,
    last_result: Option<VerificationResult>,
}

impl<S: RecordStorage> GameSession<S> {
    /// Create a session and deal its first round.
    pub fn new(
        config: EngineConfig,
        catalog: Arc<TileCatalog>,
        store: RecordStore<S>,
        seed: u64,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let rng = GameRng::new(seed).for_context("rounds");
        let mut generator =
            RoundGenerator::new(catalog, rng).with_max_draw_attempts(config.max_draw_attempts);
        let round = generator.generate(config.pair_count)?;

        let mut session = Self {
            verifier: Verifier::new(config.points_per_match),
            ledger: ConnectionLedger::new(round.pair_count()),
            selection: Selection::new(),
            memory: MemoryModeController::new(&config),
            config,
            generator,
            round,
            store,
            score: 0,
            streak: 0,
            last_result: None,
        };
        session.memory.start_round(&session.round);
        tracing::debug!(seed, round = %session.round.id(), "session started");
        Ok(session)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn round(&self) -> &Round {
        &self.round
    }

    #[must_use]
    pub fn ledger(&self) -> &ConnectionLedger {
        &self.ledger
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn memory(&self) -> &MemoryModeController {
        &self.memory
    }

    #[must_use]
    pub fn memory_state(&self) -> MemoryModeState {
        self.memory.state()
    }

    #[must_use]
    pub fn records(&self) -> &RecordStore<S> {
        &self.store
    }

    /// Mutable store access for deletions from a history screen.
    pub fn records_mut(&mut self) -> &mut RecordStore<S> {
        &mut self.store
    }

    /// Cumulative score.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Consecutive perfect rounds.
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Result of verifying the current round, if it was verified.
    #[must_use]
    pub fn last_result(&self) -> Option<&VerificationResult> {
        self.last_result.as_ref()
    }

    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.last_result.is_some()
    }

    // === Round lifecycle ===

    /// Deal a fresh round, replacing the current one.
    pub fn start_round(&mut self) -> Result<&Round, EngineError> {
        let round = self.generator.generate(self.config.pair_count)?;
        self.install(round);
        Ok(&self.round)
    }

    /// Play a hand-built round next (tutorials, tests).
    pub fn load_round(&mut self, round: Round) {
        self.install(round);
    }

    /// Clear the player's connections and restart the memory preview.
    pub fn reset_round(&mut self) {
        self.ledger.clear();
        self.selection.clear();
        self.last_result = None;
        self.memory.start_round(&self.round);
    }

    /// Leave the game screen: stop all timers.
    pub fn leave(&mut self) {
        self.memory.leave();
        self.selection.clear();
    }

    fn install(&mut self, round: Round) {
        self.ledger = ConnectionLedger::new(round.pair_count());
        self.selection.clear();
        self.last_result = None;
        self.round = round;
        self.memory.start_round(&self.round);
    }

    // === Input ===

    fn check_input(&self) -> Result<(), InputRejection> {
        if self.is_verified() {
            return Err(InputRejection::AlreadyVerified);
        }
        if !self.memory.accepts_input() {
            return Err(InputRejection::BoardLocked);
        }
        Ok(())
    }

    /// Connect two tiles directly (drag gesture).
    pub fn connect(&mut self, left: usize, right: usize) -> Result<Connection, InputRejection> {
        self.check_input()?;
        self.ledger.connect(left, right).map_err(InputRejection::Ledger)
    }

    /// Remove the connection from a left tile.
    pub fn disconnect_left(&mut self, left: usize) -> Result<Connection, InputRejection> {
        self.check_input()?;
        self.ledger.disconnect_left(left).map_err(InputRejection::Ledger)
    }

    /// Tap a left tile.
    pub fn select_left(&mut self, index: usize) -> SelectionOutcome {
        self.select(Side::Left, index)
    }

    /// Tap a right tile.
    pub fn select_right(&mut self, index: usize) -> SelectionOutcome {
        self.select(Side::Right, index)
    }

    fn select(&mut self, side: Side, index: usize) -> SelectionOutcome {
        if self.check_input().is_err() {
            return SelectionOutcome::Ignored;
        }
        self.selection.select(&mut self.ledger, side, index)
    }

    // === Verification ===

    /// Score the current connections.
    ///
    /// On success the points are added, the streak is updated, the board is
    /// revealed and a record is appended. A refused verification changes
    /// nothing.
    pub fn verify(&mut self) -> Result<&VerificationResult, VerifyRejection> {
        let result = match self.last_result.take() {
            Some(result) => result,
            None => self.score_round()?,
        };
        Ok(self.last_result.insert(result))
    }

    fn score_round(&mut self) -> Result<VerificationResult, VerifyRejection> {
        let result = self.verifier.verify(&self.round, &self.ledger)?;

        self.score += result.points_awarded;
        if result.is_perfect() {
            self.streak += 1;
        } else {
            self.streak = 0;
        }

        self.ledger.finalize();
        self.selection.clear();
        self.memory.reveal_all_for_verification();

        let recorded = match self.config.recorded_score {
            RecordedScore::SessionTotal => self.score,
            RecordedScore::RoundPoints => result.points_awarded,
        };
        self.store.append(GameRecord::new(recorded));

        tracing::debug!(
            round = %self.round.id(),
            correct = result.correct_count,
            incorrect = result.incorrect_count,
            points = result.points_awarded,
            score = self.score,
            "round verified"
        );
        Ok(result)
    }

    /// Pause before the presentation should deal the next round.
    #[must_use]
    pub fn next_round_delay(&self, result: &VerificationResult) -> Duration {
        if result.is_perfect() {
            self.config.perfect_round_delay
        } else {
            self.config.retry_round_delay
        }
    }

    // === Memory mode ===

    /// Forward elapsed time to memory mode.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<MemoryEvent> {
        self.memory.advance(elapsed)
    }

    /// Turn memory mode on or off for this and future rounds.
    pub fn set_memory_mode(&mut self, enabled: bool) {
        self.config.memory_mode = enabled;
        self.memory.set_enabled(enabled);
    }

    /// Ask for a hint. Returns whether one started.
    pub fn request_hint(&mut self) -> bool {
        self.memory.request_hint()
    }

    /// Skip the rest of the preview.
    pub fn skip_preview(&mut self) -> bool {
        self.memory.cancel_preview()
    }

    /// Flip one covered tile face up.
    pub fn reveal_tile(&mut self, position: TilePosition) -> bool {
        self.memory.reveal_tile(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPhase;
    use crate::records::MemoryStorage;
    use crate::round::RoundId;
    use crate::tiles::{Category, Rank, Tile, TileId};

    fn session(config: EngineConfig) -> GameSession<MemoryStorage> {
        GameSession::new(
            config,
            Arc::new(TileCatalog::standard()),
            RecordStore::open(MemoryStorage::new()),
            42,
        )
        .unwrap()
    }

    /// left = [1, 2, 3], right = [2, 3, 1]
    fn fixed_round() -> Round {
        let tile = |id: u32, rank: u8, category: Category| {
            Tile::new(TileId::new(id), Rank::new(rank).unwrap(), category)
        };
        Round::from_tiles(
            RoundId(100),
            vec![
                tile(0, 1, Category::Bamboo),
                tile(1, 2, Category::Character),
                tile(2, 3, Category::Dots),
            ],
            vec![
                tile(3, 2, Category::Dots),
                tile(4, 3, Category::Bamboo),
                tile(5, 1, Category::Character),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_session_deals_round() {
        let s = session(EngineConfig::default());
        assert_eq!(s.round().pair_count(), 6);
        assert_eq!(s.score(), 0);
        assert_eq!(s.memory().phase(), MemoryPhase::Inactive);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = GameSession::new(
            EngineConfig::default().with_pair_count(0),
            Arc::new(TileCatalog::standard()),
            RecordStore::open(MemoryStorage::new()),
            1,
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_perfect_round_updates_score_and_streak() {
        let mut s = session(EngineConfig::default());
        s.load_round(fixed_round());
        s.connect(0, 2).unwrap();
        s.connect(1, 0).unwrap();
        s.connect(2, 1).unwrap();

        let result = s.verify().unwrap().clone();
        assert_eq!(result.points_awarded, 30);
        assert_eq!(s.score(), 30);
        assert_eq!(s.streak(), 1);
        assert_eq!(s.records().len(), 1);
        assert_eq!(s.records().all()[0].score(), 30);
        assert_eq!(s.next_round_delay(&result), Duration::from_millis(1800));
    }

    #[test]
    fn test_input_refused_after_verify() {
        let mut s = session(EngineConfig::default());
        s.load_round(fixed_round());
        s.connect(0, 1).unwrap();
        s.verify().unwrap();

        assert_eq!(s.connect(1, 0), Err(InputRejection::AlreadyVerified));
        assert_eq!(s.select_left(1), SelectionOutcome::Ignored);

        // A second verify returns the same result without another record.
        s.verify().unwrap();
        assert_eq!(s.records().len(), 1);
    }

    #[test]
    fn test_empty_verify_has_no_side_effects() {
        let mut s = session(EngineConfig::default());
        assert_eq!(s.verify().err(), Some(VerifyRejection::EmptyLedger));
        assert!(s.records().is_empty());
        assert!(!s.is_verified());
    }

    #[test]
    fn test_streak_resets_on_mistake() {
        let mut s = session(EngineConfig::default());
        s.load_round(fixed_round());
        s.connect(0, 2).unwrap();
        s.verify().unwrap();
        assert_eq!(s.streak(), 1);

        s.load_round(fixed_round());
        s.connect(0, 0).unwrap();
        let result = s.verify().unwrap().clone();
        assert_eq!(s.streak(), 0);
        assert_eq!(s.next_round_delay(&result), Duration::from_millis(2500));
    }

    #[test]
    fn test_recorded_score_modes() {
        let mut total = session(EngineConfig::default());
        let mut points =
            session(EngineConfig::default().with_recorded_score(RecordedScore::RoundPoints));

        for s in [&mut total, &mut points] {
            s.load_round(fixed_round());
            s.connect(0, 2).unwrap();
            s.verify().unwrap();
            s.load_round(fixed_round());
            s.connect(0, 2).unwrap();
            s.verify().unwrap();
        }

        assert_eq!(total.records().highest_score(), 20);
        assert_eq!(points.records().highest_score(), 10);
    }

    #[test]
    fn test_memory_mode_locks_input_during_preview() {
        let mut s = session(EngineConfig::default().with_memory_mode(true));
        assert_eq!(s.memory().phase(), MemoryPhase::Previewing);
        assert_eq!(s.connect(0, 0), Err(InputRejection::BoardLocked));

        s.advance(Duration::from_secs(5));
        assert_eq!(s.memory().phase(), MemoryPhase::Hidden);
        assert_eq!(s.select_left(0), SelectionOutcome::Pending);
    }

    #[test]
    fn test_verify_reveals_board() {
        let mut s = session(EngineConfig::default().with_memory_mode(true));
        s.skip_preview();
        assert!(s.request_hint());
        s.memory.cancel_hint();

        s.connect(0, 0).unwrap();
        s.verify().unwrap();
        assert_eq!(s.memory().phase(), MemoryPhase::Inactive);
        assert_eq!(s.memory_state().revealed.len(), 12);
    }

    #[test]
    fn test_reset_round_clears_input_and_restarts_preview() {
        let mut s = session(EngineConfig::default().with_memory_mode(true));
        s.advance(Duration::from_secs(5));
        s.connect(0, 0).unwrap();
        let round_id = s.round().id();

        s.reset_round();
        assert!(s.ledger().is_empty());
        assert_eq!(s.round().id(), round_id);
        assert_eq!(s.memory().phase(), MemoryPhase::Previewing);
    }

    #[test]
    fn test_start_round_replaces_round() {
        let mut s = session(EngineConfig::default());
        let first = s.round().id();
        s.connect(0, 0).unwrap();

        let second = s.start_round().unwrap().id();
        assert!(second > first);
        assert!(s.ledger().is_empty());
    }

    #[test]
    fn test_toggle_memory_mode() {
        let mut s = session(EngineConfig::default());
        s.set_memory_mode(true);
        assert!(s.config().memory_mode);
        assert_eq!(s.memory().phase(), MemoryPhase::Previewing);

        s.set_memory_mode(false);
        assert_eq!(s.memory().phase(), MemoryPhase::Inactive);
        assert_eq!(s.memory().pending_timers(), 0);
    }
}
