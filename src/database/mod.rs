use anyhow::Result;
#[cfg(not(debug_assertions))]
use directories;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use thiserror::Error;

pub mod insert;
pub mod select;
pub mod update;
pub mod views;

/// Errors surfaced by the entity store and the view functions.
///
/// Every mutating operation is transactional: when one of these comes back,
/// no partial write is left behind.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// A required field was missing or empty on create/update
    #[error("required field is missing: {0}")]
    MissingField(&'static str),
    /// A show was created against an artist or venue that does not exist
    #[error("no {entity} with id {id} to reference")]
    MissingReference { entity: &'static str, id: i32 },
    /// Lookup or mutation by an id that does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error(transparent)]
    Database(#[from] DbErr),
}

pub type DirectoryResult<T, E = DirectoryError> = std::result::Result<T, E>;

/// Handle to the booking directory database.
///
/// Opened once at startup, dropped at shutdown; there is no global
/// connection state.
pub struct Directory {
    database: DatabaseConnection,
}

impl Directory {
    /// Open the directory at its default location and run pending migrations.
    pub async fn try_new() -> Result<Directory> {
        #[cfg(debug_assertions)]
        let database_path = String::from("sqlite:./gigbook.sqlite?mode=rwc");
        #[cfg(not(debug_assertions))]
        let database_path = {
            let Some(dirs) = directories::ProjectDirs::from("", "", "gigbook") else {
                anyhow::bail!("Can't get user directories");
            };
            std::fs::create_dir_all(dirs.data_dir())?;
            format!("sqlite:{}/gigbook.sqlite?mode=rwc", dirs.data_dir().display())
        };

        Self::connect(&database_path).await
    }

    /// Open the directory at an explicit database url.
    pub async fn connect(url: &str) -> Result<Directory> {
        let mut database_options = ConnectOptions::new(url);
        // One pooled connection, otherwise every connection gets its own copy
        // of an in-memory database.
        database_options
            .max_connections(1)
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        let database = Database::connect(database_options).await?;
        migration::Migrator::up(&database, None).await?;
        Ok(Directory { database })
    }
}
