use crate::types::Artists;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Artists::Table)
                    .if_not_exists()
                    .col(pk_auto(Artists::Id))
                    .col(string(Artists::Name))
                    .col(string(Artists::City))
                    .col(string(Artists::State))
                    .col(string(Artists::Phone))
                    .col(string(Artists::Genres))
                    .col(string_null(Artists::ImageLink))
                    .col(string_null(Artists::FacebookLink))
                    .col(string_null(Artists::WebsiteLink))
                    .col(boolean(Artists::SeekingVenue).default(false))
                    .col(string_null(Artists::SeekingDescription))
                    .col(timestamp(Artists::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Artists::Table).to_owned())
            .await
    }
}
