use serde::{Deserialize, Serialize};

use crate::model::firm::PublicFirmDto;

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PairRequestDto {
    /// Restrict the pair to one category
    #[serde(default)]
    pub stage: Option<String>,
}

/// A dealt matchup: the single-use token and the two firms in display order
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DealtPairDto {
    pub token: String,
    /// Always two entries; position 0 and position 1
    pub pair: Vec<PublicFirmDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct VoteRequestDto {
    pub token: String,
    /// Position of the winning firm in the dealt pair, 0 or 1
    pub winner: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingDeltaDto {
    pub old_elo: i32,
    pub new_elo: i32,
    pub old_rank: u64,
    pub new_rank: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct VoteResultDto {
    pub winner: RatingDeltaDto,
    pub loser: RatingDeltaDto,
    /// Number of firms across all categories
    pub total: u64,
}
