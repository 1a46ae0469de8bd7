//! Engine configuration.
//!
//! Everything tunable about a session lives in `EngineConfig`: round size,
//! scoring multiplier, memory mode timings and how records are scored.
//! The defaults reproduce the shipped game.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Default number of left/right pairs in a round.
pub const DEFAULT_PAIR_COUNT: usize = 6;

/// Points awarded per correct connection.
pub const DEFAULT_POINTS_PER_MATCH: i64 = 10;

/// Draw budget per round before the catalog is declared defective.
pub const DEFAULT_MAX_DRAW_ATTEMPTS: u32 = 10_000;

/// Which score a `GameRecord` stores when a round is verified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordedScore {
    /// Cumulative session score after the round's points are applied.
    #[default]
    SessionTotal,
    /// Points awarded by this round alone.
    RoundPoints,
}

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Pairs per generated round.
    pub pair_count: usize,

    /// Multiplier applied to the correct-connection count.
    pub points_per_match: i64,

    /// Draw attempts allowed per round before failing fast.
    pub max_draw_attempts: u32,

    /// Start rounds with the memory mode preview.
    pub memory_mode: bool,

    /// Length of the all-visible preview at round start.
    pub preview_duration: Duration,

    /// Length of a hint reveal.
    pub hint_duration: Duration,

    /// Interval between preview countdown ticks.
    pub countdown_tick: Duration,

    /// Score written to the record store.
    pub recorded_score: RecordedScore,

    /// Pause before the next round after a perfect verification.
    pub perfect_round_delay: Duration,

    /// Pause before the next round after a verification with mistakes.
    pub retry_round_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pair_count: DEFAULT_PAIR_COUNT,
            points_per_match: DEFAULT_POINTS_PER_MATCH,
            max_draw_attempts: DEFAULT_MAX_DRAW_ATTEMPTS,
            memory_mode: false,
            preview_duration: Duration::from_secs(5),
            hint_duration: Duration::from_secs(3),
            countdown_tick: Duration::from_secs(1),
            recorded_score: RecordedScore::SessionTotal,
            perfect_round_delay: Duration::from_millis(1800),
            retry_round_delay: Duration::from_millis(2500),
        }
    }
}

impl EngineConfig {
    /// Set the number of pairs per round.
    #[must_use]
    pub fn with_pair_count(mut self, pair_count: usize) -> Self {
        self.pair_count = pair_count;
        self
    }

    /// Enable or disable memory mode for new rounds.
    #[must_use]
    pub fn with_memory_mode(mut self, enabled: bool) -> Self {
        self.memory_mode = enabled;
        self
    }

    /// Set the draw budget per round.
    #[must_use]
    pub fn with_max_draw_attempts(mut self, attempts: u32) -> Self {
        self.max_draw_attempts = attempts;
        self
    }

    /// Set the preview and hint durations.
    #[must_use]
    pub fn with_memory_timings(mut self, preview: Duration, hint: Duration) -> Self {
        self.preview_duration = preview;
        self.hint_duration = hint;
        self
    }

    /// Choose which score is recorded after verification.
    #[must_use]
    pub fn with_recorded_score(mut self, recorded: RecordedScore) -> Self {
        self.recorded_score = recorded;
        self
    }

    /// Whole seconds shown by the preview countdown.
    #[must_use]
    pub fn preview_seconds(&self) -> u32 {
        let tick = self.countdown_tick.as_millis().max(1);
        let ticks = self.preview_duration.as_millis().div_ceil(tick);
        u32::try_from(ticks).unwrap_or(u32::MAX).max(1)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.pair_count == 0 {
            return Err(EngineError::InvalidConfig("pair_count must be at least 1".into()));
        }
        if self.points_per_match < 0 {
            return Err(EngineError::InvalidConfig(
                "points_per_match must not be negative".into(),
            ));
        }
        if self.max_draw_attempts == 0 {
            return Err(EngineError::InvalidConfig(
                "max_draw_attempts must be at least 1".into(),
            ));
        }
        if self.countdown_tick.is_zero() {
            return Err(EngineError::InvalidConfig("countdown_tick must be non-zero".into()));
        }
        if self.preview_duration.is_zero() || self.hint_duration.is_zero() {
            return Err(EngineError::InvalidConfig(
                "memory mode durations must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();

        assert_eq!(config.pair_count, 6);
        assert_eq!(config.points_per_match, 10);
        assert!(!config.memory_mode);
        assert_eq!(config.preview_duration, Duration::from_secs(5));
        assert_eq!(config.hint_duration, Duration::from_secs(3));
        assert_eq!(config.recorded_score, RecordedScore::SessionTotal);
        assert_eq!(config.preview_seconds(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default()
            .with_pair_count(3)
            .with_memory_mode(true)
            .with_memory_timings(Duration::from_secs(2), Duration::from_secs(1))
            .with_recorded_score(RecordedScore::RoundPoints);

        assert_eq!(config.pair_count, 3);
        assert!(config.memory_mode);
        assert_eq!(config.preview_seconds(), 2);
        assert_eq!(config.recorded_score, RecordedScore::RoundPoints);
    }

    #[test]
    fn test_preview_seconds_rounds_up() {
        let config = EngineConfig::default()
            .with_memory_timings(Duration::from_millis(4500), Duration::from_secs(3));
        assert_eq!(config.preview_seconds(), 5);
    }

    #[test]
    fn test_validate_rejects_zero_pairs() {
        let config = EngineConfig::default().with_pair_count(0);
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_zero_durations() {
        let config = EngineConfig::default()
            .with_memory_timings(Duration::ZERO, Duration::from_secs(3));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = EngineConfig::default().with_memory_mode(true);
        let json = serde_json::to_string(&config).unwrap();
        let restored: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
