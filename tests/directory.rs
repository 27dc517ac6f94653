use chrono::{Duration, NaiveDateTime, Utc};
use gigbook::database::insert::{ArtistFields, VenueFields};
use gigbook::database::{Directory, DirectoryError};

async fn directory() -> Directory {
    Directory::connect("sqlite::memory:")
        .await
        .expect("in-memory database")
}

fn days_from_now(days: i64) -> NaiveDateTime {
    Utc::now().naive_utc() + Duration::days(days)
}

fn musical_hop() -> VenueFields {
    VenueFields {
        name: "The Musical Hop".into(),
        city: "San Francisco".into(),
        state: "CA".into(),
        address: "1015 Folsom Street".into(),
        phone: "123-123-1234".into(),
        genres: vec!["Jazz".into(), "Reggae".into(), "Swing".into()],
        seeking_talent: true,
        seeking_description: Some("On the lookout for a local artist.".into()),
        ..Default::default()
    }
}

fn park_square() -> VenueFields {
    VenueFields {
        name: "Park Square Live Music & Coffee".into(),
        city: "San Francisco".into(),
        state: "CA".into(),
        address: "34 Whiskey Moore Ave".into(),
        phone: "415-000-1234".into(),
        genres: vec!["Rock n Roll".into(), "Jazz".into()],
        ..Default::default()
    }
}

fn dueling_pianos() -> VenueFields {
    VenueFields {
        name: "The Dueling Pianos Bar".into(),
        city: "New York".into(),
        state: "NY".into(),
        address: "335 Delancey Street".into(),
        phone: "914-003-1132".into(),
        genres: vec!["Classical".into()],
        ..Default::default()
    }
}

fn guns_n_petals() -> ArtistFields {
    ArtistFields {
        name: "Guns N Petals".into(),
        city: "San Francisco".into(),
        state: "CA".into(),
        phone: "326-123-5000".into(),
        genres: vec!["Rock n Roll".into()],
        seeking_venue: true,
        image_link: Some("https://example.com/guns-n-petals.jpg".into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn migrations_create_every_table_the_store_uses() {
    let directory = directory().await;
    let venue = directory.create_venue(musical_hop()).await.unwrap();
    let artist = directory.create_artist(guns_n_petals()).await.unwrap();
    let show = directory
        .create_show(artist, venue, days_from_now(1))
        .await
        .unwrap();

    assert_eq!(directory.venue(venue).await.unwrap().name, "The Musical Hop");
    assert_eq!(directory.artist(artist).await.unwrap().name, "Guns N Petals");
    assert_eq!(directory.show(show).await.unwrap().venue_id, venue);
}

#[tokio::test]
async fn venues_in_the_same_city_share_a_group() {
    let directory = directory().await;
    let hop = directory.create_venue(musical_hop()).await.unwrap();
    let park = directory.create_venue(park_square()).await.unwrap();
    let pianos = directory.create_venue(dueling_pianos()).await.unwrap();

    let groups = directory.venues_by_city().await.unwrap();
    assert_eq!(groups.len(), 2);

    let sf = groups
        .iter()
        .find(|group| group.city == "San Francisco" && group.state == "CA")
        .expect("San Francisco group");
    let ids: Vec<i32> = sf.venues.iter().map(|venue| venue.id).collect();
    assert_eq!(ids, vec![hop, park]);

    let ny = groups
        .iter()
        .find(|group| group.city == "New York" && group.state == "NY")
        .expect("New York group");
    assert_eq!(ny.venues.len(), 1);
    assert_eq!(ny.venues[0].id, pianos);
}

#[tokio::test]
async fn grouped_listing_counts_only_upcoming_shows() {
    let directory = directory().await;
    let venue = directory.create_venue(musical_hop()).await.unwrap();
    let artist = directory.create_artist(guns_n_petals()).await.unwrap();
    directory
        .create_show(artist, venue, days_from_now(-10))
        .await
        .unwrap();
    directory
        .create_show(artist, venue, days_from_now(7))
        .await
        .unwrap();
    directory
        .create_show(artist, venue, days_from_now(30))
        .await
        .unwrap();

    let groups = directory.venues_by_city().await.unwrap();
    assert_eq!(groups[0].venues[0].num_upcoming_shows, 2);
}

#[tokio::test]
async fn venue_search_is_partial_and_case_insensitive() {
    let directory = directory().await;
    directory.create_venue(musical_hop()).await.unwrap();
    directory.create_venue(park_square()).await.unwrap();

    let results = directory.search_venues("Hop").await.unwrap();
    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].name, "The Musical Hop");

    let results = directory.search_venues("Music").await.unwrap();
    assert_eq!(results.count, 2);

    let results = directory.search_venues("hop").await.unwrap();
    assert_eq!(results.count, 1);
}

#[tokio::test]
async fn search_matches_city_and_state_too() {
    let directory = directory().await;
    directory.create_venue(musical_hop()).await.unwrap();
    directory.create_venue(dueling_pianos()).await.unwrap();

    let results = directory.search_venues("new yo").await.unwrap();
    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].name, "The Dueling Pianos Bar");

    let results = directory.search_venues("CA").await.unwrap();
    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].name, "The Musical Hop");
}

#[tokio::test]
async fn empty_search_term_matches_everything() {
    let directory = directory().await;
    directory.create_venue(musical_hop()).await.unwrap();
    directory.create_venue(park_square()).await.unwrap();
    directory.create_artist(guns_n_petals()).await.unwrap();

    assert_eq!(directory.search_venues("").await.unwrap().count, 2);
    assert_eq!(directory.search_artists("").await.unwrap().count, 1);
}

#[tokio::test]
async fn artist_page_buckets_shows_and_joins_the_venue() {
    let directory = directory().await;
    let venue = directory.create_venue(musical_hop()).await.unwrap();
    let artist = directory.create_artist(guns_n_petals()).await.unwrap();

    let past = days_from_now(-30);
    let upcoming = days_from_now(30);
    directory.create_show(artist, venue, past).await.unwrap();
    directory.create_show(artist, venue, upcoming).await.unwrap();

    let page = directory.artist_page(artist).await.unwrap();
    assert_eq!(page.genres, vec!["Rock n Roll"]);
    assert_eq!(page.past_shows_count, 1);
    assert_eq!(page.upcoming_shows_count, 1);
    assert_eq!(page.past_shows.len(), 1);
    assert_eq!(page.upcoming_shows.len(), 1);

    assert_eq!(page.past_shows[0].id, venue);
    assert_eq!(page.past_shows[0].name, "The Musical Hop");
    assert_eq!(
        page.past_shows[0].start_time,
        past.format("%m/%d/%Y, %H:%M:%S").to_string()
    );
    assert_eq!(
        page.upcoming_shows[0].start_time,
        upcoming.format("%m/%d/%Y, %H:%M:%S").to_string()
    );
}

#[tokio::test]
async fn venue_page_joins_the_artist() {
    let directory = directory().await;
    let venue = directory.create_venue(musical_hop()).await.unwrap();
    let artist = directory.create_artist(guns_n_petals()).await.unwrap();
    directory
        .create_show(artist, venue, days_from_now(-5))
        .await
        .unwrap();

    let page = directory.venue_page(venue).await.unwrap();
    assert_eq!(page.name, "The Musical Hop");
    assert_eq!(page.genres, vec!["Jazz", "Reggae", "Swing"]);
    assert_eq!(page.past_shows_count, 1);
    assert_eq!(page.upcoming_shows_count, 0);
    assert_eq!(page.past_shows[0].id, artist);
    assert_eq!(page.past_shows[0].name, "Guns N Petals");
    assert_eq!(
        page.past_shows[0].image_link.as_deref(),
        Some("https://example.com/guns-n-petals.jpg")
    );
}

#[tokio::test]
async fn detail_page_of_missing_entity_is_not_found() {
    let directory = directory().await;
    assert!(matches!(
        directory.venue_page(42).await,
        Err(DirectoryError::NotFound { entity: "venue", id: 42 })
    ));
    assert!(matches!(
        directory.artist_page(42).await,
        Err(DirectoryError::NotFound { entity: "artist", id: 42 })
    ));
}

#[tokio::test]
async fn show_listing_joins_both_parties() {
    let directory = directory().await;
    let venue = directory.create_venue(musical_hop()).await.unwrap();
    let artist = directory.create_artist(guns_n_petals()).await.unwrap();
    let start_time = days_from_now(14);
    directory.create_show(artist, venue, start_time).await.unwrap();

    let listings = directory.show_listings().await.unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].venue_id, venue);
    assert_eq!(listings[0].venue_name, "The Musical Hop");
    assert_eq!(listings[0].artist_id, artist);
    assert_eq!(listings[0].artist_name, "Guns N Petals");
    assert_eq!(
        listings[0].artist_image_link.as_deref(),
        Some("https://example.com/guns-n-petals.jpg")
    );
    assert_eq!(
        listings[0].start_time,
        start_time.format("%m/%d/%Y, %H:%M:%S").to_string()
    );
}

#[tokio::test]
async fn show_against_missing_artist_persists_nothing() {
    let directory = directory().await;
    let venue = directory.create_venue(musical_hop()).await.unwrap();

    let result = directory.create_show(99, venue, days_from_now(1)).await;
    assert!(matches!(
        result,
        Err(DirectoryError::MissingReference { entity: "artist", id: 99 })
    ));

    let shows = directory.find_all::<entity::show::Entity>().await.unwrap();
    assert!(shows.is_empty());
}

#[tokio::test]
async fn show_against_missing_venue_persists_nothing() {
    let directory = directory().await;
    let artist = directory.create_artist(guns_n_petals()).await.unwrap();

    let result = directory.create_show(artist, 99, days_from_now(1)).await;
    assert!(matches!(
        result,
        Err(DirectoryError::MissingReference { entity: "venue", id: 99 })
    ));
    assert!(directory
        .find_all::<entity::show::Entity>()
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn deleting_a_venue_cascades_to_its_shows() {
    let directory = directory().await;
    let venue = directory.create_venue(musical_hop()).await.unwrap();
    let artist = directory.create_artist(guns_n_petals()).await.unwrap();
    let show = directory
        .create_show(artist, venue, days_from_now(3))
        .await
        .unwrap();

    directory.delete_venue(venue).await.unwrap();

    assert!(matches!(
        directory.show(show).await,
        Err(DirectoryError::NotFound { entity: "show", .. })
    ));
    // The artist side of the booking survives, with no shows left.
    let artist = directory.artist(artist).await.unwrap();
    let shows = directory
        .model_related::<_, entity::show::Entity>(&artist)
        .await
        .unwrap();
    assert!(shows.is_empty());
}

#[tokio::test]
async fn deleting_an_artist_cascades_to_their_shows() {
    let directory = directory().await;
    let venue = directory.create_venue(musical_hop()).await.unwrap();
    let artist = directory.create_artist(guns_n_petals()).await.unwrap();
    let show = directory
        .create_show(artist, venue, days_from_now(3))
        .await
        .unwrap();

    directory.delete_artist(artist).await.unwrap();

    assert!(matches!(
        directory.show(show).await,
        Err(DirectoryError::NotFound { entity: "show", .. })
    ));
    assert!(directory.venue(venue).await.is_ok());
}

#[tokio::test]
async fn deleting_a_missing_id_is_an_error() {
    let directory = directory().await;
    assert!(matches!(
        directory.delete_venue(7).await,
        Err(DirectoryError::NotFound { entity: "venue", id: 7 })
    ));
    assert!(matches!(
        directory.delete_artist(7).await,
        Err(DirectoryError::NotFound { entity: "artist", id: 7 })
    ));
}

#[tokio::test]
async fn create_rejects_missing_required_fields() {
    let directory = directory().await;

    let mut fields = musical_hop();
    fields.name = String::new();
    assert!(matches!(
        directory.create_venue(fields).await,
        Err(DirectoryError::MissingField("name"))
    ));

    let mut fields = musical_hop();
    fields.genres.clear();
    assert!(matches!(
        directory.create_venue(fields).await,
        Err(DirectoryError::MissingField("genres"))
    ));

    let mut fields = guns_n_petals();
    fields.phone = "   ".into();
    assert!(matches!(
        directory.create_artist(fields).await,
        Err(DirectoryError::MissingField("phone"))
    ));

    assert!(directory
        .find_all::<entity::venue::Entity>()
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn update_replaces_fields_but_not_created_at() {
    let directory = directory().await;
    let id = directory.create_venue(musical_hop()).await.unwrap();
    let before = directory.venue(id).await.unwrap();

    let mut fields = musical_hop();
    fields.city = "Oakland".into();
    fields.genres = vec!["Folk".into(), "Blues".into()];
    fields.seeking_talent = false;
    directory.update_venue(id, fields).await.unwrap();

    let after = directory.venue(id).await.unwrap();
    assert_eq!(after.city, "Oakland");
    assert_eq!(after.genres, "Folk,Blues");
    assert!(!after.seeking_talent);
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn update_of_missing_artist_is_not_found() {
    let directory = directory().await;
    assert!(matches!(
        directory.update_artist(3, guns_n_petals()).await,
        Err(DirectoryError::NotFound { entity: "artist", id: 3 })
    ));
}
