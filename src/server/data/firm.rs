use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    DeleteResult, EntityTrait, ExprTrait, IntoActiveModel, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Rating every firm starts at
pub const DEFAULT_ELO: i32 = 1000;

pub struct FirmRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FirmRepository<'a, C> {
    /// Creates a new instance of [`FirmRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new firm with the default rating and no matches played
    pub async fn create(
        &self,
        name: String,
        website: String,
        stage: String,
        logo_url: Option<String>,
    ) -> Result<entity::firm::Model, DbErr> {
        let firm = entity::firm::ActiveModel {
            name: ActiveValue::Set(name),
            website: ActiveValue::Set(website),
            stage: ActiveValue::Set(stage),
            logo_url: ActiveValue::Set(logo_url),
            elo_score: ActiveValue::Set(DEFAULT_ELO),
            match_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        firm.insert(self.db).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::firm::Model>, DbErr> {
        entity::prelude::Firm::find_by_id(id).one(self.db).await
    }

    /// Reads a firm and locks its row until the surrounding transaction ends
    ///
    /// Uses `SELECT ... FOR UPDATE`; backends without row locks (SQLite) ignore the lock.
    pub async fn get_by_id_for_update(
        &self,
        id: i32,
    ) -> Result<Option<entity::firm::Model>, DbErr> {
        entity::prelude::Firm::find_by_id(id)
            .lock_exclusive()
            .one(self.db)
            .await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<entity::firm::Model>, DbErr> {
        entity::prelude::Firm::find()
            .filter(entity::firm::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Picks up to two distinct firms uniformly at random, optionally within one category
    pub async fn get_two_random(
        &self,
        stage: Option<&str>,
    ) -> Result<Vec<entity::firm::Model>, DbErr> {
        let mut query = entity::prelude::Firm::find();

        if let Some(stage) = stage {
            query = query.filter(entity::firm::Column::Stage.eq(stage));
        }

        query
            .order_by(Expr::cust("RANDOM()"), Order::Asc)
            .limit(2)
            .all(self.db)
            .await
    }

    /// Number of firms, across all categories, rated strictly above `rating`
    pub async fn count_greater_than(&self, rating: i32) -> Result<u64, DbErr> {
        entity::prelude::Firm::find()
            .filter(entity::firm::Column::EloScore.gt(rating))
            .count(self.db)
            .await
    }

    /// Rank of a rating among all firms: 1 + number of firms rated strictly higher
    pub async fn rank_of(&self, rating: i32) -> Result<u64, DbErr> {
        Ok(self.count_greater_than(rating).await? + 1)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Firm::find().count(self.db).await
    }

    /// Sets a firm's rating and increments its match count by one
    ///
    /// # Returns
    /// - `Ok(true)` - Exactly one row was updated
    /// - `Ok(false)` - No firm with this ID exists
    pub async fn apply_rating_update(&self, id: i32, new_rating: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Firm::update_many()
            .col_expr(entity::firm::Column::EloScore, Expr::value(new_rating))
            .col_expr(
                entity::firm::Column::MatchCount,
                Expr::col(entity::firm::Column::MatchCount).add(1),
            )
            .filter(entity::firm::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Firms ordered by rating descending, ties by name, optionally within one category
    pub async fn leaderboard(
        &self,
        stage: Option<&str>,
    ) -> Result<Vec<entity::firm::Model>, DbErr> {
        let mut query = entity::prelude::Firm::find();

        if let Some(stage) = stage {
            query = query.filter(entity::firm::Column::Stage.eq(stage));
        }

        query
            .order_by_desc(entity::firm::Column::EloScore)
            .order_by_asc(entity::firm::Column::Name)
            .all(self.db)
            .await
    }

    /// Updates website and/or logo URL of the firm named `name`
    ///
    /// `None` leaves a field unchanged; `logo_url: Some(None)` clears the logo.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - The updated firm
    /// - `Ok(None)` - No firm with this name exists
    pub async fn update_details(
        &self,
        name: &str,
        website: Option<String>,
        logo_url: Option<Option<String>>,
    ) -> Result<Option<entity::firm::Model>, DbErr> {
        let firm = match self.get_by_name(name).await? {
            Some(firm) => firm,
            None => return Ok(None),
        };

        let mut firm_am = firm.into_active_model();
        if let Some(website) = website {
            firm_am.website = ActiveValue::Set(website);
        }
        if let Some(logo_url) = logo_url {
            firm_am.logo_url = ActiveValue::Set(logo_url);
        }

        let firm = firm_am.update(self.db).await?;

        Ok(Some(firm))
    }

    /// Logo URLs of every firm that has one, keyed by firm name
    pub async fn logo_urls_by_name(&self) -> Result<HashMap<String, String>, DbErr> {
        let firms = entity::prelude::Firm::find()
            .filter(entity::firm::Column::LogoUrl.is_not_null())
            .all(self.db)
            .await?;

        Ok(firms
            .into_iter()
            .filter_map(|firm| firm.logo_url.map(|logo_url| (firm.name, logo_url)))
            .collect())
    }

    /// Deletes every firm
    pub async fn delete_all(&self) -> Result<DeleteResult, DbErr> {
        entity::prelude::Firm::delete_many().exec(self.db).await
    }
}
