//! Elo rating engine.
//!
//! Applies one pairwise outcome atomically: both firm rows are locked, ranked, updated and
//! re-ranked inside a single database transaction. Any failure drops the transaction, which
//! rolls it back, so a vote is applied to both firms or to neither.

pub mod elo;

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::firm::FirmRepository,
    error::{matchup::MatchupError, Error},
    model::rating::{RatingDelta, RatingOutcome},
};

pub struct RatingEngine<'a> {
    db: &'a DatabaseConnection,
    k_factor: f64,
}

impl<'a> RatingEngine<'a> {
    pub fn new(db: &'a DatabaseConnection, k_factor: f64) -> Self {
        Self { db, k_factor }
    }

    /// Records a win of `winner_id` over `loser_id`
    ///
    /// Rows are locked in ascending ID order so two votes sharing a firm serialize
    /// without deadlocking. Ranks are over the whole population: `1 + count(rating > own)`,
    /// old ranks from the pre-update ratings and new ranks after both writes.
    ///
    /// # Arguments
    /// - `winner_id` - Record ID of the winning firm
    /// - `loser_id` - Record ID of the losing firm
    ///
    /// # Returns
    /// - `Ok(RatingOutcome)` - Both firms updated and committed
    /// - `Err(MatchupError::SameFirm)` - Both IDs are equal, nothing was touched
    /// - `Err(MatchupError::FirmNotFound)` - Either firm does not exist
    /// - `Err(Error::InternalError)` - A write did not affect exactly one row, rolled back
    /// - `Err(Error::DbErr)` - Database error, rolled back
    pub async fn update_ratings(
        &self,
        winner_id: i32,
        loser_id: i32,
    ) -> Result<RatingOutcome, Error> {
        if winner_id == loser_id {
            return Err(MatchupError::SameFirm(winner_id).into());
        }

        let txn = self.db.begin().await?;
        let firm_repository = FirmRepository::new(&txn);

        let (low_id, high_id) = if winner_id < loser_id {
            (winner_id, loser_id)
        } else {
            (loser_id, winner_id)
        };
        let low = firm_repository
            .get_by_id_for_update(low_id)
            .await?
            .ok_or(MatchupError::FirmNotFound(low_id))?;
        let high = firm_repository
            .get_by_id_for_update(high_id)
            .await?
            .ok_or(MatchupError::FirmNotFound(high_id))?;

        let (winner, loser) = if low.id == winner_id {
            (low, high)
        } else {
            (high, low)
        };

        let old_winner_rank = firm_repository.rank_of(winner.elo_score).await?;
        let old_loser_rank = firm_repository.rank_of(loser.elo_score).await?;

        let (new_winner_elo, new_loser_elo) =
            elo::calculate(winner.elo_score, loser.elo_score, self.k_factor);

        for (id, rating) in [(winner.id, new_winner_elo), (loser.id, new_loser_elo)] {
            if !firm_repository.apply_rating_update(id, rating).await? {
                return Err(Error::InternalError(format!(
                    "Rating update for firm ID {} did not affect exactly one row",
                    id
                )));
            }
        }

        let new_winner_rank = firm_repository.rank_of(new_winner_elo).await?;
        let new_loser_rank = firm_repository.rank_of(new_loser_elo).await?;
        let total = firm_repository.count().await?;

        txn.commit().await?;

        tracing::debug!(
            winner_id,
            loser_id,
            old_winner_elo = winner.elo_score,
            new_winner_elo,
            old_loser_elo = loser.elo_score,
            new_loser_elo,
            "Applied rating update"
        );

        Ok(RatingOutcome {
            winner: RatingDelta {
                old_elo: winner.elo_score,
                new_elo: new_winner_elo,
                old_rank: old_winner_rank,
                new_rank: new_winner_rank,
            },
            loser: RatingDelta {
                old_elo: loser.elo_score,
                new_elo: new_loser_elo,
                old_rank: old_loser_rank,
                new_rank: new_loser_rank,
            },
            total,
        })
    }
}
