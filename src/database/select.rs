use entity::{artist, show, venue};
use sea_orm::prelude::*;
use sea_orm::EntityTrait;

use super::{Directory, DirectoryError, DirectoryResult};

impl Directory {
    pub async fn venue(&self, id: i32) -> DirectoryResult<venue::Model> {
        venue::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or(DirectoryError::NotFound { entity: "venue", id })
    }

    pub async fn artist(&self, id: i32) -> DirectoryResult<artist::Model> {
        artist::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or(DirectoryError::NotFound { entity: "artist", id })
    }

    pub async fn show(&self, id: i32) -> DirectoryResult<show::Model> {
        show::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or(DirectoryError::NotFound { entity: "show", id })
    }

    /// Every record of an entity, in insertion order.
    pub async fn find_all<E>(&self) -> DirectoryResult<Vec<E::Model>>
    where
        E: EntityTrait,
    {
        Ok(E::find().all(&self.database).await?)
    }

    pub async fn model_related<M, R>(&self, model: &M) -> DirectoryResult<Vec<R::Model>>
    where
        M: ModelTrait,
        R: EntityTrait,
        M::Entity: Related<R>,
    {
        Ok(model
            .find_related(R::default())
            .all(&self.database)
            .await?)
    }
}
