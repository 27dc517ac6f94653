use entity::{artist, venue};
use log::info;
use sea_orm::prelude::*;
use sea_orm::{Set, TransactionTrait};

use super::insert::{ArtistFields, VenueFields};
use super::{Directory, DirectoryError, DirectoryResult};
use crate::tags;

impl Directory {
    /// Replace every editable field of a venue. `created_at` is not
    /// editable and keeps its original value.
    pub async fn update_venue(&self, id: i32, fields: VenueFields) -> DirectoryResult<()> {
        fields.validate()?;
        let txn = self.database.begin().await?;
        let Some(venue) = venue::Entity::find_by_id(id).one(&txn).await? else {
            return Err(DirectoryError::NotFound { entity: "venue", id });
        };
        let mut venue = venue::ActiveModel::from(venue);
        venue.name = Set(fields.name);
        venue.city = Set(fields.city);
        venue.state = Set(fields.state);
        venue.address = Set(fields.address);
        venue.phone = Set(fields.phone);
        venue.genres = Set(tags::join(&fields.genres));
        venue.image_link = Set(fields.image_link);
        venue.facebook_link = Set(fields.facebook_link);
        venue.website_link = Set(fields.website_link);
        venue.seeking_talent = Set(fields.seeking_talent);
        venue.seeking_description = Set(fields.seeking_description);
        venue.update(&txn).await?;
        txn.commit().await?;
        info!("Updated venue {id}");
        Ok(())
    }

    pub async fn update_artist(&self, id: i32, fields: ArtistFields) -> DirectoryResult<()> {
        fields.validate()?;
        let txn = self.database.begin().await?;
        let Some(artist) = artist::Entity::find_by_id(id).one(&txn).await? else {
            return Err(DirectoryError::NotFound { entity: "artist", id });
        };
        let mut artist = artist::ActiveModel::from(artist);
        artist.name = Set(fields.name);
        artist.city = Set(fields.city);
        artist.state = Set(fields.state);
        artist.phone = Set(fields.phone);
        artist.genres = Set(tags::join(&fields.genres));
        artist.image_link = Set(fields.image_link);
        artist.facebook_link = Set(fields.facebook_link);
        artist.website_link = Set(fields.website_link);
        artist.seeking_venue = Set(fields.seeking_venue);
        artist.seeking_description = Set(fields.seeking_description);
        artist.update(&txn).await?;
        txn.commit().await?;
        info!("Updated artist {id}");
        Ok(())
    }

    /// Delete a venue and, through the foreign key cascade, every show
    /// booked there. Deleting an id that does not exist is an error.
    pub async fn delete_venue(&self, id: i32) -> DirectoryResult<()> {
        let txn = self.database.begin().await?;
        let Some(venue) = venue::Entity::find_by_id(id).one(&txn).await? else {
            return Err(DirectoryError::NotFound { entity: "venue", id });
        };
        let name = venue.name.clone();
        venue.delete(&txn).await?;
        txn.commit().await?;
        info!("Deleted venue {id}: {name}");
        Ok(())
    }

    /// Delete an artist and every show they were booked for.
    pub async fn delete_artist(&self, id: i32) -> DirectoryResult<()> {
        let txn = self.database.begin().await?;
        let Some(artist) = artist::Entity::find_by_id(id).one(&txn).await? else {
            return Err(DirectoryError::NotFound { entity: "artist", id });
        };
        let name = artist.name.clone();
        artist.delete(&txn).await?;
        txn.commit().await?;
        info!("Deleted artist {id}: {name}");
        Ok(())
    }
}
