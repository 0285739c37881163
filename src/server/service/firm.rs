//! Admin firm management: create, update and seed.

use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};

use crate::{
    model::firm::{CreateFirmDto, FirmDto, SeedResultDto, UpdateFirmDto},
    server::{
        data::firm::FirmRepository,
        error::{admin::AdminError, Error},
        model::app::AppSettings,
        util::logo::logo_url_for,
    },
};

pub struct FirmService<'a> {
    db: &'a DatabaseConnection,
    settings: &'a AppSettings,
}

impl<'a> FirmService<'a> {
    /// Creates a new instance of [`FirmService`]
    pub fn new(db: &'a DatabaseConnection, settings: &'a AppSettings) -> Self {
        Self { db, settings }
    }

    /// Adds a firm at the default rating with a logo URL generated from its website
    ///
    /// # Returns
    /// - `Ok(FirmDto)` - The created firm
    /// - `Err(AdminError::MissingField)` - Name, website or stage blank
    /// - `Err(AdminError::InvalidStage)` - Stage not configured for the active profile
    /// - `Err(AdminError::DuplicateName)` - A firm with this name exists
    pub async fn create_firm(&self, payload: CreateFirmDto) -> Result<FirmDto, Error> {
        let name = required(payload.name, "name")?;
        let website = required(payload.website, "website")?;
        let stage = required(payload.stage, "stage")?;

        let profile = self.settings.profile;
        if !profile.is_valid_category(&stage) {
            return Err(AdminError::InvalidStage {
                stage,
                allowed: profile.category_values(),
            }
            .into());
        }

        let firm_repository = FirmRepository::new(self.db);
        if firm_repository.get_by_name(&name).await?.is_some() {
            return Err(AdminError::DuplicateName(name).into());
        }

        let logo_url = logo_url_for(&self.settings.logo_url_template, &website);
        let firm = match firm_repository
            .create(name.clone(), website, stage, logo_url)
            .await
        {
            Ok(firm) => firm,
            // Lost a race with a concurrent insert of the same name
            Err(e) if is_unique_violation(&e) => {
                return Err(AdminError::DuplicateName(name).into())
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(firm_id = firm.id, name = %firm.name, "Added firm");

        Ok(firm.into())
    }

    /// Updates a firm's website and/or logo URL by name
    ///
    /// A new website without an explicit logo URL regenerates the logo; `logoUrl: null`
    /// clears it.
    ///
    /// # Returns
    /// - `Ok(FirmDto)` - The updated firm
    /// - `Err(AdminError::NothingToUpdate)` - Neither website nor logoUrl given
    /// - `Err(AdminError::FirmNotFound)` - No firm with this name
    pub async fn update_firm(&self, payload: UpdateFirmDto) -> Result<FirmDto, Error> {
        let name = required(payload.name, "name")?;
        let website = payload
            .website
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty());

        if website.is_none() && payload.logo_url.is_none() {
            return Err(AdminError::NothingToUpdate.into());
        }

        let logo_url = match (&website, payload.logo_url) {
            (_, Some(logo_url)) => Some(logo_url),
            (Some(website), None) => {
                Some(logo_url_for(&self.settings.logo_url_template, website))
            }
            (None, None) => None,
        };

        let firm = FirmRepository::new(self.db)
            .update_details(&name, website, logo_url)
            .await?
            .ok_or_else(|| AdminError::FirmNotFound(name.clone()))?;

        tracing::info!(firm_id = firm.id, name = %firm.name, "Updated firm");

        Ok(firm.into())
    }

    /// Replaces every firm with the active profile's seed list
    ///
    /// Ratings restart at 1000 with no matches. Logo URLs of firms that exist before the
    /// seed are carried over by name. Runs in one transaction.
    ///
    /// # Returns
    /// - `Ok(SeedResultDto)` - Number of firms inserted and logos carried over
    /// - `Err(AdminError::NoSeedData)` - The active profile has no seed list, nothing changed
    pub async fn seed(&self) -> Result<SeedResultDto, Error> {
        let profile = self.settings.profile;
        if profile.seed.is_empty() {
            return Err(AdminError::NoSeedData(profile.title.to_string()).into());
        }

        let txn = self.db.begin().await?;
        let firm_repository = FirmRepository::new(&txn);

        let mut logos = firm_repository.logo_urls_by_name().await?;
        let deleted = firm_repository.delete_all().await?.rows_affected;

        let mut logos_preserved = 0;
        for seed in profile.seed {
            let logo_url = logos.remove(seed.name);
            if logo_url.is_some() {
                logos_preserved += 1;
            }

            firm_repository
                .create(
                    seed.name.to_string(),
                    seed.website.to_string(),
                    seed.stage.to_string(),
                    logo_url,
                )
                .await?;
        }

        txn.commit().await?;

        tracing::info!(
            deleted,
            inserted = profile.seed.len(),
            logos_preserved,
            "Seeded firms"
        );

        Ok(SeedResultDto {
            count: profile.seed.len() as u64,
            logos_preserved,
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String, AdminError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AdminError::MissingField(field));
    }

    Ok(value.to_string())
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
