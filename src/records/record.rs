//! Game records - one per verified round.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Score of one verified round, stamped with when it happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    identifier: String,
    score: i64,
    #[serde(rename = "timestamp_epoch", with = "epoch_seconds")]
    timestamp: SystemTime,
}

impl GameRecord {
    /// Record a score now.
    #[must_use]
    pub fn new(score: i64) -> Self {
        Self::with_timestamp(score, SystemTime::now())
    }

    /// Record a score at a given instant.
    #[must_use]
    pub fn with_timestamp(score: i64, timestamp: SystemTime) -> Self {
        Self {
            identifier: Uuid::new_v4().to_string(),
            score,
            timestamp,
        }
    }

    /// Unique identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    /// Seconds since the Unix epoch, negative for earlier instants.
    #[must_use]
    pub fn timestamp_epoch(&self) -> f64 {
        epoch_seconds::to_f64(self.timestamp)
    }
}

/// `SystemTime` as fractional seconds since the Unix epoch.
mod epoch_seconds {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub(super) fn to_f64(time: SystemTime) -> f64 {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => after.as_secs_f64(),
            Err(before) => -before.duration().as_secs_f64(),
        }
    }

    pub(super) fn from_f64(seconds: f64) -> Option<SystemTime> {
        if !seconds.is_finite() {
            return None;
        }
        let magnitude = Duration::try_from_secs_f64(seconds.abs()).ok()?;
        if seconds >= 0.0 {
            UNIX_EPOCH.checked_add(magnitude)
        } else {
            UNIX_EPOCH.checked_sub(magnitude)
        }
    }

    pub fn serialize<S: Serializer>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(to_f64(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SystemTime, D::Error> {
        let seconds = f64::deserialize(deserializer)?;
        from_f64(seconds)
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp {seconds} out of range")))
    }
}
