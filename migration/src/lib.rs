pub use sea_orm_migration::prelude::*;

mod m20250801_venue;
mod m20250802_artist;
mod m20250803_show;
pub mod types;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_venue::Migration),
            Box::new(m20250802_artist::Migration),
            Box::new(m20250803_show::Migration),
        ]
    }
}
