//! Deal and vote flows.
//!
//! Dealing picks two random firms and binds them to a fresh session token. Voting consumes
//! that token exactly once, charges the winner against the origin's rate limit, applies the
//! Elo update under the store timeout and only then records the win in the ledger.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::matchup::{DealtPairDto, VoteResultDto},
    server::{
        admission::{Admission, AdmissionController},
        data::firm::FirmRepository,
        error::{matchup::MatchupError, Error},
        model::app::{AppSettings, AppState},
        service::{rating::RatingEngine, retry::RetryContext},
        session::MatchupSessionRegistry,
    },
};

pub struct MatchupService<'a> {
    db: &'a DatabaseConnection,
    sessions: &'a MatchupSessionRegistry,
    admission: &'a AdmissionController,
    settings: &'a AppSettings,
}

impl<'a> MatchupService<'a> {
    /// Creates a new instance of [`MatchupService`]
    pub fn new(
        db: &'a DatabaseConnection,
        sessions: &'a MatchupSessionRegistry,
        admission: &'a AdmissionController,
        settings: &'a AppSettings,
    ) -> Self {
        Self {
            db,
            sessions,
            admission,
            settings,
        }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(&state.db, &state.sessions, &state.admission, &state.settings)
    }

    /// Deals two random firms, optionally restricted to one category
    ///
    /// An empty category is treated as no category. A category with fewer than two
    /// firms, including one that is not configured at all, yields `InsufficientFirms`.
    ///
    /// # Returns
    /// - `Ok(DealtPairDto)` - Token plus the public fields of both firms
    /// - `Err(MatchupError::InsufficientFirms)` - Fewer than two candidate firms
    /// - `Err(_)` - Store error
    pub async fn deal_pair(&self, category: Option<String>) -> Result<DealtPairDto, Error> {
        let now = Utc::now();
        let category = category.filter(|c| !c.trim().is_empty());

        self.sessions.maybe_sweep(now).await;

        let firms = RetryContext::new()
            .execute_with_retry("deal pair", || {
                let db = self.db.clone();
                let category = category.clone();

                Box::pin(async move {
                    let firm_repository = FirmRepository::new(&db);
                    Ok(firm_repository.get_two_random(category.as_deref()).await?)
                })
            })
            .await?;

        let mut firms = firms.into_iter();
        let (Some(first), Some(second)) = (firms.next(), firms.next()) else {
            return Err(MatchupError::InsufficientFirms(category).into());
        };

        let token = self
            .sessions
            .create_session(first.id, second.id, category, now)
            .await?;

        tracing::debug!(
            first_id = first.id,
            second_id = second.id,
            "Dealt matchup"
        );

        Ok(DealtPairDto {
            token,
            pair: vec![first.into(), second.into()],
        })
    }

    /// Records a vote for the firm at `winner_position` of the dealt pair
    ///
    /// The session is consumed before admission, so a rate-limited vote still burns its
    /// token. After admission, any failure releases the reservation so it costs the origin
    /// nothing. The reservation is also released if this future is dropped before the
    /// outcome is known.
    ///
    /// # Arguments
    /// - `token` - Session token returned by [`Self::deal_pair`]
    /// - `winner_position` - 0 or 1
    /// - `origin` - Coarse client identifier for rate limiting
    ///
    /// # Returns
    /// - `Ok(VoteResultDto)` - Ratings and ranks before and after the vote
    /// - `Err(MatchupError::InvalidWinnerPosition)` - Position not 0 or 1, nothing touched
    /// - `Err(MatchupError::InvalidOrExpiredSession)` - Token unknown, used or expired
    /// - `Err(MatchupError::RateLimited)` - Origin exceeded a window for the winner
    /// - `Err(Error::StoreTimeout)` - Rating update did not finish in time, rolled back
    /// - `Err(_)` - Rating engine or store error
    pub async fn submit_vote(
        &self,
        token: &str,
        winner_position: u8,
        origin: &str,
    ) -> Result<VoteResultDto, Error> {
        if winner_position > 1 {
            return Err(MatchupError::InvalidWinnerPosition(winner_position).into());
        }

        let session = self.sessions.consume_session(token, Utc::now()).await?;

        let (winner_id, loser_id) = session
            .resolve_winner(winner_position)
            .ok_or(MatchupError::InvalidWinnerPosition(winner_position))?;
        if winner_id == loser_id {
            return Err(MatchupError::SameFirm(winner_id).into());
        }

        let guard = match self
            .admission
            .check_and_reserve(origin, winner_id, Utc::now())
            .await?
        {
            Admission::Allowed(reservation) => self.admission.guard(reservation),
            Admission::Denied(denial) => return Err(MatchupError::RateLimited(denial).into()),
        };
        let key = guard.key().clone();

        let engine = RatingEngine::new(self.db, self.settings.k_factor);
        let timeout = self.settings.store_timeout;
        let result = match tokio::time::timeout(timeout, engine.update_ratings(winner_id, loser_id))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(Error::StoreTimeout(timeout)),
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                if let Err(release_err) = guard.release().await {
                    tracing::warn!(key = %key, "Failed to release vote reservation: {}", release_err);
                }
                return Err(e);
            }
        };

        if let Err(e) = guard.record(Utc::now()).await {
            // The rating update is committed, so the vote still succeeds
            tracing::error!(key = %key, "Failed to record vote in rate limit ledger: {}", e);
        }

        tracing::debug!(winner_id, loser_id, origin, "Recorded vote");

        Ok(outcome.into())
    }
}
