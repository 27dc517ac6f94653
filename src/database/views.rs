//! Read-only view state derived from the stored records.
//!
//! Everything here is computed into dedicated value types; the entity
//! models themselves are never decorated with view data. Each function
//! captures `now` exactly once and reuses it for every comparison, so a
//! show cannot switch bucket halfway through a computation. A show whose
//! start time equals `now` counts as upcoming.

use std::collections::HashMap;

use chrono::Utc;
use entity::{artist, show, venue};
use log::warn;
use sea_orm::prelude::*;
use sea_orm::{Condition, PaginatorTrait, QueryFilter, QueryOrder};

use super::{Directory, DirectoryError, DirectoryResult};
use crate::tags;

const START_TIME_FORMAT: &str = "%m/%d/%Y, %H:%M:%S";

/// Bucket rule shared by the page views and the listing counts: past is
/// strictly before `now`, everything else (equality included) is upcoming.
fn is_upcoming(start_time: DateTime, now: DateTime) -> bool {
    start_time >= now
}

/// All venues sharing one (city, state) pair.
#[derive(Clone, Debug)]
pub struct VenueGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<ListingEntry>,
}

/// One venue or artist in a listing or search result.
#[derive(Clone, Debug)]
pub struct ListingEntry {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: u64,
}

#[derive(Clone, Debug)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<ListingEntry>,
}

/// One show on a detail page, joined to the other party of the booking:
/// the artist on a venue page, the venue on an artist page.
#[derive(Clone, Debug)]
pub struct BookedShow {
    pub id: i32,
    pub name: String,
    pub image_link: Option<String>,
    pub start_time: String,
}

#[derive(Clone, Debug)]
pub struct VenuePage {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub past_shows: Vec<BookedShow>,
    pub upcoming_shows: Vec<BookedShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Clone, Debug)]
pub struct ArtistPage {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub past_shows: Vec<BookedShow>,
    pub upcoming_shows: Vec<BookedShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// One show in the flat listing, joined to both parties.
#[derive(Clone, Debug)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl Directory {
    /// All venues grouped by (city, state). Groups appear in order of the
    /// lowest venue id they contain, venues within a group in id order.
    pub async fn venues_by_city(&self) -> DirectoryResult<Vec<VenueGroup>> {
        let now = Utc::now().naive_utc();
        let venues = venue::Entity::find()
            .order_by_asc(venue::Column::Id)
            .all(&self.database)
            .await?;

        let mut groups: Vec<VenueGroup> = Vec::new();
        for venue in venues {
            let num_upcoming_shows = self
                .upcoming_count(show::Column::VenueId, venue.id, now)
                .await?;
            let position = groups
                .iter()
                .position(|group| group.city == venue.city && group.state == venue.state);
            let entry = ListingEntry {
                id: venue.id,
                name: venue.name,
                num_upcoming_shows,
            };
            match position {
                Some(position) => groups[position].venues.push(entry),
                None => groups.push(VenueGroup {
                    city: venue.city,
                    state: venue.state,
                    venues: vec![entry],
                }),
            }
        }
        Ok(groups)
    }

    /// Venues whose name, city or state contains `term`, case-insensitive.
    /// An empty term matches every venue.
    pub async fn search_venues(&self, term: &str) -> DirectoryResult<SearchResults> {
        let now = Utc::now().naive_utc();
        let venues = venue::Entity::find()
            .filter(
                Condition::any()
                    .add(venue::Column::Name.contains(term))
                    .add(venue::Column::City.contains(term))
                    .add(venue::Column::State.contains(term)),
            )
            .order_by_asc(venue::Column::Id)
            .all(&self.database)
            .await?;

        let mut data = Vec::new();
        for venue in venues {
            let num_upcoming_shows = self
                .upcoming_count(show::Column::VenueId, venue.id, now)
                .await?;
            data.push(ListingEntry {
                id: venue.id,
                name: venue.name,
                num_upcoming_shows,
            });
        }
        Ok(SearchResults {
            count: data.len(),
            data,
        })
    }

    /// Artists whose name, city or state contains `term`, case-insensitive.
    pub async fn search_artists(&self, term: &str) -> DirectoryResult<SearchResults> {
        let now = Utc::now().naive_utc();
        let artists = artist::Entity::find()
            .filter(
                Condition::any()
                    .add(artist::Column::Name.contains(term))
                    .add(artist::Column::City.contains(term))
                    .add(artist::Column::State.contains(term)),
            )
            .order_by_asc(artist::Column::Id)
            .all(&self.database)
            .await?;

        let mut data = Vec::new();
        for artist in artists {
            let num_upcoming_shows = self
                .upcoming_count(show::Column::ArtistId, artist.id, now)
                .await?;
            data.push(ListingEntry {
                id: artist.id,
                name: artist.name,
                num_upcoming_shows,
            });
        }
        Ok(SearchResults {
            count: data.len(),
            data,
        })
    }

    /// Detail page of one venue with its shows bucketed into past and
    /// upcoming, each joined to the booked artist.
    pub async fn venue_page(&self, venue_id: i32) -> DirectoryResult<VenuePage> {
        let Some(venue) = venue::Entity::find_by_id(venue_id).one(&self.database).await? else {
            return Err(DirectoryError::NotFound {
                entity: "venue",
                id: venue_id,
            });
        };

        let now = Utc::now().naive_utc();
        let shows = show::Entity::find()
            .filter(show::Column::VenueId.eq(venue_id))
            .order_by_asc(show::Column::StartTime)
            .find_also_related(artist::Entity)
            .all(&self.database)
            .await?;

        let mut past_shows = Vec::new();
        let mut upcoming_shows = Vec::new();
        for (show, artist) in shows {
            let Some(artist) = artist else {
                warn!("Show {} has no artist attached", show.id);
                continue;
            };
            let booked = BookedShow {
                id: artist.id,
                name: artist.name,
                image_link: artist.image_link,
                start_time: show.start_time.format(START_TIME_FORMAT).to_string(),
            };
            if is_upcoming(show.start_time, now) {
                upcoming_shows.push(booked);
            } else {
                past_shows.push(booked);
            }
        }

        Ok(VenuePage {
            id: venue.id,
            name: venue.name,
            genres: tags::split(&venue.genres),
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website_link: venue.website_link,
            facebook_link: venue.facebook_link,
            image_link: venue.image_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }

    /// Detail page of one artist, shows joined to the booked venue.
    pub async fn artist_page(&self, artist_id: i32) -> DirectoryResult<ArtistPage> {
        let Some(artist) = artist::Entity::find_by_id(artist_id).one(&self.database).await? else {
            return Err(DirectoryError::NotFound {
                entity: "artist",
                id: artist_id,
            });
        };

        let now = Utc::now().naive_utc();
        let shows = show::Entity::find()
            .filter(show::Column::ArtistId.eq(artist_id))
            .order_by_asc(show::Column::StartTime)
            .find_also_related(venue::Entity)
            .all(&self.database)
            .await?;

        let mut past_shows = Vec::new();
        let mut upcoming_shows = Vec::new();
        for (show, venue) in shows {
            let Some(venue) = venue else {
                warn!("Show {} has no venue attached", show.id);
                continue;
            };
            let booked = BookedShow {
                id: venue.id,
                name: venue.name,
                image_link: venue.image_link,
                start_time: show.start_time.format(START_TIME_FORMAT).to_string(),
            };
            if is_upcoming(show.start_time, now) {
                upcoming_shows.push(booked);
            } else {
                past_shows.push(booked);
            }
        }

        Ok(ArtistPage {
            id: artist.id,
            name: artist.name,
            genres: tags::split(&artist.genres),
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website_link: artist.website_link,
            facebook_link: artist.facebook_link,
            image_link: artist.image_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }

    /// Every show joined to both its venue and its artist, no bucketing.
    pub async fn show_listings(&self) -> DirectoryResult<Vec<ShowListing>> {
        let venues: HashMap<i32, venue::Model> = venue::Entity::find()
            .all(&self.database)
            .await?
            .into_iter()
            .map(|venue| (venue.id, venue))
            .collect();
        let shows = show::Entity::find()
            .order_by_asc(show::Column::Id)
            .find_also_related(artist::Entity)
            .all(&self.database)
            .await?;

        let mut listings = Vec::new();
        for (show, artist) in shows {
            let (Some(artist), Some(venue)) = (artist, venues.get(&show.venue_id)) else {
                warn!("Show {} is missing a booking party", show.id);
                continue;
            };
            listings.push(ShowListing {
                venue_id: venue.id,
                venue_name: venue.name.clone(),
                artist_id: artist.id,
                artist_name: artist.name,
                artist_image_link: artist.image_link,
                start_time: show.start_time.format(START_TIME_FORMAT).to_string(),
            });
        }
        Ok(listings)
    }

    async fn upcoming_count(
        &self,
        reference: show::Column,
        id: i32,
        now: DateTime,
    ) -> DirectoryResult<u64> {
        // `gte` mirrors `is_upcoming`: equality with `now` counts.
        Ok(show::Entity::find()
            .filter(reference.eq(id))
            .filter(show::Column::StartTime.gte(now))
            .count(&self.database)
            .await?)
    }
}
