use chrono::Utc;
use entity::{artist, show, venue};
use log::info;
use sea_orm::prelude::*;
use sea_orm::{EntityTrait, Set, TransactionTrait};

use super::{Directory, DirectoryError, DirectoryResult};
use crate::tags;

/// Editable fields of a venue, as handed over by the presentation layer.
///
/// `genres` travels as a tag list and is comma-joined on the way into the
/// database.
#[derive(Clone, Debug, Default)]
pub struct VenueFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueFields {
    pub(super) fn validate(&self) -> DirectoryResult<()> {
        require("name", &self.name)?;
        require("city", &self.city)?;
        require("state", &self.state)?;
        require("address", &self.address)?;
        require("phone", &self.phone)?;
        if self.genres.is_empty() {
            return Err(DirectoryError::MissingField("genres"));
        }
        Ok(())
    }
}

/// Editable fields of an artist, same shape as [`VenueFields`] minus the
/// street address.
#[derive(Clone, Debug, Default)]
pub struct ArtistFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistFields {
    pub(super) fn validate(&self) -> DirectoryResult<()> {
        require("name", &self.name)?;
        require("city", &self.city)?;
        require("state", &self.state)?;
        require("phone", &self.phone)?;
        if self.genres.is_empty() {
            return Err(DirectoryError::MissingField("genres"));
        }
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> DirectoryResult<()> {
    if value.trim().is_empty() {
        return Err(DirectoryError::MissingField(field));
    }
    Ok(())
}

impl Directory {
    pub async fn create_venue(&self, fields: VenueFields) -> DirectoryResult<i32> {
        fields.validate()?;
        let venue_data = venue::ActiveModel {
            id: Default::default(),
            name: Set(fields.name.clone()),
            city: Set(fields.city),
            state: Set(fields.state),
            address: Set(fields.address),
            phone: Set(fields.phone),
            genres: Set(tags::join(&fields.genres)),
            image_link: Set(fields.image_link),
            facebook_link: Set(fields.facebook_link),
            website_link: Set(fields.website_link),
            seeking_talent: Set(fields.seeking_talent),
            seeking_description: Set(fields.seeking_description),
            created_at: Set(Utc::now().naive_utc()),
        };
        let venue_insert = venue::Entity::insert(venue_data)
            .exec(&self.database)
            .await?;
        info!("Created venue: {}", fields.name);
        Ok(venue_insert.last_insert_id)
    }

    pub async fn create_artist(&self, fields: ArtistFields) -> DirectoryResult<i32> {
        fields.validate()?;
        let artist_data = artist::ActiveModel {
            id: Default::default(),
            name: Set(fields.name.clone()),
            city: Set(fields.city),
            state: Set(fields.state),
            phone: Set(fields.phone),
            genres: Set(tags::join(&fields.genres)),
            image_link: Set(fields.image_link),
            facebook_link: Set(fields.facebook_link),
            website_link: Set(fields.website_link),
            seeking_venue: Set(fields.seeking_venue),
            seeking_description: Set(fields.seeking_description),
            created_at: Set(Utc::now().naive_utc()),
        };
        let artist_insert = artist::Entity::insert(artist_data)
            .exec(&self.database)
            .await?;
        info!("Created artist: {}", fields.name);
        Ok(artist_insert.last_insert_id)
    }

    /// Book a show. Both referenced records are checked inside the same
    /// transaction as the insert, so a failed check persists nothing.
    pub async fn create_show(
        &self,
        artist_id: i32,
        venue_id: i32,
        start_time: DateTime,
    ) -> DirectoryResult<i32> {
        let txn = self.database.begin().await?;
        if artist::Entity::find_by_id(artist_id).one(&txn).await?.is_none() {
            return Err(DirectoryError::MissingReference {
                entity: "artist",
                id: artist_id,
            });
        }
        if venue::Entity::find_by_id(venue_id).one(&txn).await?.is_none() {
            return Err(DirectoryError::MissingReference {
                entity: "venue",
                id: venue_id,
            });
        }
        let show_data = show::ActiveModel {
            id: Default::default(),
            artist_id: Set(artist_id),
            venue_id: Set(venue_id),
            start_time: Set(start_time),
        };
        let show_insert = show::Entity::insert(show_data).exec(&txn).await?;
        txn.commit().await?;
        info!("Created show: artist {artist_id} at venue {venue_id}");
        Ok(show_insert.last_insert_id)
    }
}
