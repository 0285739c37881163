//! Firm fixture utilities.
//!
//! Provides methods for inserting firm records into the test database and factory
//! functions for creating in-memory model instances.

pub mod factory;

use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    constant::{TEST_DEFAULT_ELO, TEST_STAGE},
    error::TestError,
    TestContext,
};

impl TestContext {
    pub fn firm<'a>(&'a mut self) -> FirmFixtures<'a> {
        FirmFixtures { setup: self }
    }
}

pub struct FirmFixtures<'a> {
    pub setup: &'a mut TestContext,
}

impl<'a> FirmFixtures<'a> {
    /// Insert a firm with the default rating and no matches played.
    ///
    /// # Arguments
    /// - `name` - Unique firm name
    /// - `stage` - Category the firm belongs to
    ///
    /// # Returns
    /// - `Ok(Model)` - The inserted firm record
    /// - `Err(TestError::DbErr)` - Insert failed, e.g. duplicate name or missing table
    pub async fn insert_firm(
        &mut self,
        name: &str,
        stage: &str,
    ) -> Result<entity::firm::Model, TestError> {
        self.insert_rated_firm(name, stage, TEST_DEFAULT_ELO).await
    }

    /// Insert a firm in the default test category.
    pub async fn insert_mock_firm(&mut self, name: &str) -> Result<entity::firm::Model, TestError> {
        self.insert_rated_firm(name, TEST_STAGE, TEST_DEFAULT_ELO)
            .await
    }

    /// Insert a firm with a specific rating.
    ///
    /// The website is derived from the name (`https://www.<name>.com`) with whitespace removed.
    pub async fn insert_rated_firm(
        &mut self,
        name: &str,
        stage: &str,
        elo_score: i32,
    ) -> Result<entity::firm::Model, TestError> {
        let firm = entity::prelude::Firm::insert(entity::firm::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            website: ActiveValue::Set(factory::website_for(name)),
            stage: ActiveValue::Set(stage.to_string()),
            logo_url: ActiveValue::Set(None),
            elo_score: ActiveValue::Set(elo_score),
            match_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?;

        Ok(firm)
    }

    /// Fetch a firm by its record ID.
    pub async fn get_firm(&self, id: i32) -> Result<Option<entity::firm::Model>, TestError> {
        Ok(entity::prelude::Firm::find_by_id(id)
            .one(&self.setup.db)
            .await?)
    }

    /// Fetch every firm ordered by record ID.
    pub async fn all_firms(&self) -> Result<Vec<entity::firm::Model>, TestError> {
        use sea_orm::QueryOrder;

        Ok(entity::prelude::Firm::find()
            .order_by_asc(entity::firm::Column::Id)
            .all(&self.setup.db)
            .await?)
    }
}
