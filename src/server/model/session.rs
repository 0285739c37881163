use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The server-side record of a dealt matchup, bound to a single-use token
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchupSession {
    /// Firm shown at position 0
    pub first_id: i32,
    /// Firm shown at position 1
    pub second_id: i32,
    /// Category the pair was dealt from, if any
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MatchupSession {
    pub fn new(first_id: i32, second_id: i32, category: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            first_id,
            second_id,
            category,
            created_at: now,
        }
    }

    /// Whether the session's age exceeds `ttl` at `now`
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at > ttl
    }

    /// Maps a winning display position to `(winner_id, loser_id)`
    ///
    /// Returns `None` for any position other than 0 or 1.
    pub fn resolve_winner(&self, position: u8) -> Option<(i32, i32)> {
        match position {
            0 => Some((self.first_id, self.second_id)),
            1 => Some((self.second_id, self.first_id)),
            _ => None,
        }
    }
}
