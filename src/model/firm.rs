use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Firm fields safe to expose to anonymous clients; the record ID is never included
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicFirmDto {
    pub name: String,
    pub website: String,
    pub stage: String,
    pub logo_url: Option<String>,
    pub elo_score: i32,
    pub match_count: i32,
}

/// One row of the leaderboard
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryDto {
    /// 1 + number of listed firms with a strictly greater rating
    pub rank: u64,
    #[serde(flatten)]
    pub firm: PublicFirmDto,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardDto {
    pub stage: Option<String>,
    pub firms: Vec<LeaderboardEntryDto>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CategoryDto {
    pub value: String,
    pub label: String,
}

/// The active ranker profile and its categories
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesDto {
    pub title: String,
    pub entity_name: String,
    pub entity_name_plural: String,
    pub stages: Vec<CategoryDto>,
}

/// Full firm record returned by admin routes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FirmDto {
    pub id: i32,
    pub name: String,
    pub website: String,
    pub stage: String,
    pub logo_url: Option<String>,
    pub elo_score: i32,
    pub match_count: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFirmDto {
    pub name: String,
    pub website: String,
    pub stage: String,
}

/// Partial update of a firm identified by name
///
/// `logoUrl` distinguishes an absent field (leave unchanged) from `null` (clear the logo).
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFirmDto {
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub logo_url: Option<Option<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedResultDto {
    /// Number of firms inserted
    pub count: u64,
    /// Number of inserted firms that kept a logo URL from before the seed
    pub logos_preserved: u64,
}

impl From<entity::firm::Model> for PublicFirmDto {
    fn from(firm: entity::firm::Model) -> Self {
        Self {
            name: firm.name,
            website: firm.website,
            stage: firm.stage,
            logo_url: firm.logo_url,
            elo_score: firm.elo_score,
            match_count: firm.match_count,
        }
    }
}

impl From<entity::firm::Model> for FirmDto {
    fn from(firm: entity::firm::Model) -> Self {
        Self {
            id: firm.id,
            name: firm.name,
            website: firm.website,
            stage: firm.stage,
            logo_url: firm.logo_url,
            elo_score: firm.elo_score,
            match_count: firm.match_count,
            created_at: firm.created_at,
        }
    }
}

/// Wraps any present value, including `null`, in `Some` so it can be told apart from a missing field
fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
