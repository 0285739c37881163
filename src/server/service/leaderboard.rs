use sea_orm::DatabaseConnection;

use crate::{
    model::firm::{LeaderboardDto, LeaderboardEntryDto},
    server::{data::firm::FirmRepository, error::Error, service::retry::RetryContext},
};

pub struct LeaderboardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LeaderboardService<'a> {
    /// Creates a new instance of [`LeaderboardService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Firms ordered by rating, optionally within one category
    ///
    /// Ranks are computed within the listed population: 1 + number of listed firms with a
    /// strictly greater rating, so tied firms share a rank and the next rank skips.
    pub async fn get_leaderboard(&self, stage: Option<String>) -> Result<LeaderboardDto, Error> {
        let stage = stage.filter(|s| !s.trim().is_empty());

        let firms = RetryContext::new()
            .execute_with_retry("leaderboard", || {
                let db = self.db.clone();
                let stage = stage.clone();

                Box::pin(async move {
                    let firm_repository = FirmRepository::new(&db);
                    Ok(firm_repository.leaderboard(stage.as_deref()).await?)
                })
            })
            .await?;

        let mut entries: Vec<LeaderboardEntryDto> = Vec::with_capacity(firms.len());
        let mut previous: Option<(i32, u64)> = None;

        for (index, firm) in firms.into_iter().enumerate() {
            let rank = match previous {
                Some((elo, rank)) if elo == firm.elo_score => rank,
                _ => index as u64 + 1,
            };
            previous = Some((firm.elo_score, rank));

            entries.push(LeaderboardEntryDto {
                rank,
                firm: firm.into(),
            });
        }

        Ok(LeaderboardDto {
            stage,
            firms: entries,
        })
    }
}
