use anyhow::Context;
use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};

use gigbook::database::insert::{ArtistFields, VenueFields};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// Log level:
    /// 0 quiet,
    /// 1 errors,
    /// 2 warnings,
    /// 3 info,
    #[clap(short, long)]
    #[clap(default_value_t = 2)]
    pub loglevel: u8,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all venues, grouped by city and state
    Venues,
    /// List all artists
    Artists,
    /// List all shows with their venue and artist
    Shows,
    /// Find venues by name, city or state
    SearchVenues { term: String },
    /// Find artists by name, city or state
    SearchArtists { term: String },
    /// Show one venue with its past and upcoming shows
    Venue { id: i32 },
    /// Show one artist with their past and upcoming shows
    Artist { id: i32 },
    /// Add a venue to the directory
    CreateVenue(VenueArgs),
    /// Add an artist to the directory
    CreateArtist(ArtistArgs),
    /// Book an artist at a venue
    CreateShow {
        artist_id: i32,
        venue_id: i32,
        /// Start time, "YYYY-MM-DD HH:MM"
        start_time: String,
    },
    /// Remove a venue and all its shows
    DeleteVenue { id: i32 },
    /// Remove an artist and all their shows
    DeleteArtist { id: i32 },
}

#[derive(Args, Debug)]
pub struct VenueArgs {
    #[clap(long)]
    pub name: String,
    #[clap(long)]
    pub city: String,
    #[clap(long)]
    pub state: String,
    #[clap(long)]
    pub address: String,
    #[clap(long)]
    pub phone: String,
    /// Comma-separated genre tags
    #[clap(long, value_delimiter = ',')]
    pub genres: Vec<String>,
    #[clap(long)]
    pub image_link: Option<String>,
    #[clap(long)]
    pub facebook_link: Option<String>,
    #[clap(long)]
    pub website_link: Option<String>,
    #[clap(long)]
    pub seeking_talent: bool,
    #[clap(long)]
    pub seeking_description: Option<String>,
}

impl From<VenueArgs> for VenueFields {
    fn from(args: VenueArgs) -> Self {
        VenueFields {
            name: args.name,
            city: args.city,
            state: args.state,
            address: args.address,
            phone: args.phone,
            genres: args.genres,
            image_link: args.image_link,
            facebook_link: args.facebook_link,
            website_link: args.website_link,
            seeking_talent: args.seeking_talent,
            seeking_description: args.seeking_description,
        }
    }
}

#[derive(Args, Debug)]
pub struct ArtistArgs {
    #[clap(long)]
    pub name: String,
    #[clap(long)]
    pub city: String,
    #[clap(long)]
    pub state: String,
    #[clap(long)]
    pub phone: String,
    /// Comma-separated genre tags
    #[clap(long, value_delimiter = ',')]
    pub genres: Vec<String>,
    #[clap(long)]
    pub image_link: Option<String>,
    #[clap(long)]
    pub facebook_link: Option<String>,
    #[clap(long)]
    pub website_link: Option<String>,
    #[clap(long)]
    pub seeking_venue: bool,
    #[clap(long)]
    pub seeking_description: Option<String>,
}

impl From<ArtistArgs> for ArtistFields {
    fn from(args: ArtistArgs) -> Self {
        ArtistFields {
            name: args.name,
            city: args.city,
            state: args.state,
            phone: args.phone,
            genres: args.genres,
            image_link: args.image_link,
            facebook_link: args.facebook_link,
            website_link: args.website_link,
            seeking_venue: args.seeking_venue,
            seeking_description: args.seeking_description,
        }
    }
}

pub fn parse_start_time(value: &str) -> anyhow::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .with_context(|| format!("invalid start time {value:?}, expected YYYY-MM-DD HH:MM"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_declaration_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn create_show_subcommand_parses() {
        let cli = Cli::parse_from(["gigbook", "create-show", "4", "1", "2025-05-21 21:30"]);
        match cli.command {
            Command::CreateShow {
                artist_id,
                venue_id,
                start_time,
            } => {
                assert_eq!(artist_id, 4);
                assert_eq!(venue_id, 1);
                assert_eq!(start_time, "2025-05-21 21:30");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn create_venue_splits_genres() {
        let cli = Cli::parse_from([
            "gigbook",
            "create-venue",
            "--name",
            "The Musical Hop",
            "--city",
            "San Francisco",
            "--state",
            "CA",
            "--address",
            "1015 Folsom Street",
            "--phone",
            "123-123-1234",
            "--genres",
            "Jazz,Reggae,Swing",
            "--seeking-talent",
        ]);
        let Command::CreateVenue(args) = cli.command else {
            panic!("expected create-venue");
        };
        let fields = VenueFields::from(args);
        assert_eq!(fields.genres, vec!["Jazz", "Reggae", "Swing"]);
        assert!(fields.seeking_talent);
    }

    #[test]
    fn start_time_parses_with_and_without_seconds() {
        assert!(parse_start_time("2025-05-21 21:30").is_ok());
        assert!(parse_start_time("2025-05-21 21:30:15").is_ok());
        assert!(parse_start_time("21:30 2025-05-21").is_err());
    }
}
