use sea_orm_migration::{prelude::*, schema::*};

static IDX_FIRM_ELO_SCORE: &str = "idx-firm-elo_score";
static IDX_FIRM_STAGE: &str = "idx-firm-stage";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Firm::Table)
                    .if_not_exists()
                    .col(pk_auto(Firm::Id))
                    .col(string_uniq(Firm::Name))
                    .col(string(Firm::Website))
                    .col(string(Firm::Stage))
                    .col(string_null(Firm::LogoUrl))
                    .col(integer(Firm::EloScore).default(1000))
                    .col(integer(Firm::MatchCount).default(0))
                    .col(timestamp(Firm::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        // Rank queries count rows with a strictly greater rating
        manager
            .create_index(
                Index::create()
                    .name(IDX_FIRM_ELO_SCORE)
                    .table(Firm::Table)
                    .col(Firm::EloScore)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_FIRM_STAGE)
                    .table(Firm::Table)
                    .col(Firm::Stage)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(IDX_FIRM_STAGE).table(Firm::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_FIRM_ELO_SCORE)
                    .table(Firm::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Firm::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Firm {
    Table,
    Id,
    Name,
    Website,
    Stage,
    LogoUrl,
    EloScore,
    MatchCount,
    CreatedAt,
}
