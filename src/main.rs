use clap::Parser;
use log::LevelFilter;
use simplelog::TermLogger;

use cli::{Cli, Command};
use gigbook::database::views::SearchResults;
use gigbook::database::Directory;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut log_config = simplelog::ConfigBuilder::new();
    TermLogger::init(
        match cli.loglevel {
            0 => LevelFilter::Off,
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            4 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        },
        log_config.set_time_level(LevelFilter::Off).build(),
        simplelog::TerminalMode::Stdout,
        simplelog::ColorChoice::Auto,
    )?;

    let directory = Directory::try_new().await?;

    match cli.command {
        Command::Venues => {
            for group in directory.venues_by_city().await? {
                println!("{}, {}", group.city, group.state);
                for venue in group.venues {
                    println!(
                        "  {:>4}  {} ({} upcoming)",
                        venue.id, venue.name, venue.num_upcoming_shows
                    );
                }
            }
        }
        Command::Artists => {
            for artist in directory.find_all::<entity::artist::Entity>().await? {
                println!("{:>4}  {}", artist.id, artist.name);
            }
        }
        Command::Shows => {
            for show in directory.show_listings().await? {
                println!(
                    "{}  {} at {}",
                    show.start_time, show.artist_name, show.venue_name
                );
            }
        }
        Command::SearchVenues { term } => {
            print_search(directory.search_venues(&term).await?);
        }
        Command::SearchArtists { term } => {
            print_search(directory.search_artists(&term).await?);
        }
        Command::Venue { id } => {
            let page = directory.venue_page(id).await?;
            println!("{} [{}]", page.name, page.genres.join(", "));
            println!("{}, {}, {}", page.address, page.city, page.state);
            println!("Past shows ({}):", page.past_shows_count);
            for show in page.past_shows {
                println!("  {}  {}", show.start_time, show.name);
            }
            println!("Upcoming shows ({}):", page.upcoming_shows_count);
            for show in page.upcoming_shows {
                println!("  {}  {}", show.start_time, show.name);
            }
        }
        Command::CreateVenue(args) => {
            let id = directory.create_venue(args.into()).await?;
            println!("Created venue {id}");
        }
        Command::CreateArtist(args) => {
            let id = directory.create_artist(args.into()).await?;
            println!("Created artist {id}");
        }
        Command::CreateShow {
            artist_id,
            venue_id,
            start_time,
        } => {
            let start_time = cli::parse_start_time(&start_time)?;
            let id = directory.create_show(artist_id, venue_id, start_time).await?;
            println!("Created show {id}");
        }
        Command::DeleteVenue { id } => {
            directory.delete_venue(id).await?;
            println!("Deleted venue {id}");
        }
        Command::DeleteArtist { id } => {
            directory.delete_artist(id).await?;
            println!("Deleted artist {id}");
        }
        Command::Artist { id } => {
            let page = directory.artist_page(id).await?;
            println!("{} [{}]", page.name, page.genres.join(", "));
            println!("{}, {}", page.city, page.state);
            println!("Past shows ({}):", page.past_shows_count);
            for show in page.past_shows {
                println!("  {}  {}", show.start_time, show.name);
            }
            println!("Upcoming shows ({}):", page.upcoming_shows_count);
            for show in page.upcoming_shows {
                println!("  {}  {}", show.start_time, show.name);
            }
        }
    }

    Ok(())
}

fn print_search(results: SearchResults) {
    println!("{} result(s)", results.count);
    for entry in results.data {
        println!(
            "{:>4}  {} ({} upcoming)",
            entry.id, entry.name, entry.num_upcoming_shows
        );
    }
}
