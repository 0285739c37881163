use crate::model::matchup::{RatingDeltaDto, VoteResultDto};

/// Rating and rank of one firm before and after a vote
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RatingDelta {
    pub old_elo: i32,
    pub new_elo: i32,
    pub old_rank: u64,
    pub new_rank: u64,
}

/// Result of applying one pairwise outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RatingOutcome {
    pub winner: RatingDelta,
    pub loser: RatingDelta,
    /// Number of firms across all categories at commit time
    pub total: u64,
}

impl From<RatingDelta> for RatingDeltaDto {
    fn from(delta: RatingDelta) -> Self {
        Self {
            old_elo: delta.old_elo,
            new_elo: delta.new_elo,
            old_rank: delta.old_rank,
            new_rank: delta.new_rank,
        }
    }
}

impl From<RatingOutcome> for VoteResultDto {
    fn from(outcome: RatingOutcome) -> Self {
        Self {
            winner: outcome.winner.into(),
            loser: outcome.loser.into(),
            total: outcome.total,
        }
    }
}
