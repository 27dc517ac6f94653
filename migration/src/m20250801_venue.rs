use crate::types::Venues;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Venues::Table)
                    .if_not_exists()
                    .col(pk_auto(Venues::Id))
                    .col(string(Venues::Name))
                    .col(string(Venues::City))
                    .col(string(Venues::State))
                    .col(string(Venues::Address))
                    .col(string(Venues::Phone))
                    .col(string(Venues::Genres))
                    .col(string_null(Venues::ImageLink))
                    .col(string_null(Venues::FacebookLink))
                    .col(string_null(Venues::WebsiteLink))
                    .col(boolean(Venues::SeekingTalent).default(false))
                    .col(string_null(Venues::SeekingDescription))
                    .col(timestamp(Venues::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Venues::Table).to_owned())
            .await
    }
}
