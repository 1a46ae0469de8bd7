//! Round generation.
//!
//! Each pair is drawn as a `(rank, left category, right category)` triple.
//! The rank is uniform over `1..=9` and the categories are a uniform ordered
//! pair of distinct categories. A triple may appear only once per round.
//! Ranks may repeat as long as the category pair differs. Once every pair is
//! collected, the right column is shuffled so rows no longer line up.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::board::{Round, RoundId};
use crate::core::{EngineError, GameRng, GameRngState, DEFAULT_MAX_DRAW_ATTEMPTS};
use crate::tiles::{Category, Rank, TileCatalog};

/// Deals rounds from a shared catalog.
#[derive(Clone, Debug)]
pub struct RoundGenerator {
    catalog: Arc<TileCatalog>,
    rng: GameRng,
    max_draw_attempts: u32,
    next_round: u64,
}

impl RoundGenerator {
    /// Create a generator with the default draw budget.
    #[must_use]
    pub fn new(catalog: Arc<TileCatalog>, rng: GameRng) -> Self {
        Self {
            catalog,
            rng,
            max_draw_attempts: DEFAULT_MAX_DRAW_ATTEMPTS,
            next_round: 1,
        }
    }

    /// Set the number of draws allowed per round.
    #[must_use]
    pub fn with_max_draw_attempts(mut self, attempts: u32) -> Self {
        self.max_draw_attempts = attempts;
        self
    }

    /// Catalog this generator deals from.
    #[must_use]
    pub fn catalog(&self) -> &Arc<TileCatalog> {
        &self.catalog
    }

    /// RNG state, for replaying the upcoming rounds.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Id the next generated (or reserved) round will get.
    #[must_use]
    pub fn peek_round_id(&self) -> RoundId {
        RoundId(self.next_round)
    }

    /// Claim a round id without dealing, for hand-built rounds.
    pub fn reserve_round_id(&mut self) -> RoundId {
        let id = RoundId(self.next_round);
        self.next_round += 1;
        id
    }

    /// Deal a round of `pair_count` pairs.
    ///
    /// Fails fast when the catalog cannot supply enough distinct triples or
    /// the draw budget runs out. Either means the catalog is misconfigured.
    pub fn generate(&mut self, pair_count: usize) -> Result<Round, EngineError> {
        let available = self.catalog.distinct_pair_capacity();
        if pair_count == 0 || pair_count > available {
            return Err(EngineError::InvalidPairCount {
                requested: pair_count,
                available,
            });
        }

        let categories = self.catalog.all_categories();
        let mut used: FxHashSet<(Rank, Category, Category)> = FxHashSet::default();
        let mut left = Vec::with_capacity(pair_count);
        let mut right = Vec::with_capacity(pair_count);
        let mut attempts = 0u32;

        while left.len() < pair_count {
            if attempts >= self.max_draw_attempts {
                return Err(EngineError::CatalogExhausted {
                    requested: pair_count,
                    collected: left.len(),
                    attempts,
                });
            }
            attempts += 1;

            let Some(rank) = Rank::new(self.rng.gen_range_u8(Rank::MIN.value()..=Rank::MAX.value()))
            else {
                continue;
            };
            let Some((a, b)) = self.rng.choose_distinct_pair(categories.len()) else {
                continue;
            };
            let (left_category, right_category) = (categories[a], categories[b]);

            let triple = (rank, left_category, right_category);
            if used.contains(&triple) {
                continue;
            }

            let (Some(l), Some(r)) = (
                self.catalog.tile(left_category, rank),
                self.catalog.tile(right_category, rank),
            ) else {
                continue;
            };

            used.insert(triple);
            left.push(l);
            right.push(r);
        }

        self.rng.shuffle(&mut right);

        let id = self.reserve_round_id();
        tracing::debug!(%id, pair_count, attempts, "dealt round");

        Round::from_tiles(id, left, right)
    }
}
