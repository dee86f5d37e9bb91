use crate::config::Config;
use crate::core::{Collection, Resolved, Track};
use crate::extractors::AppleMusic;
use crate::plugin::{AppleMusicPlugin, InfoPlugin};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "apple-music-info")]
#[command(about = "Extract track, album and playlist metadata from Apple Music pages")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Storefront country code used when rebuilding catalogue URLs
    #[arg(short, long, default_value = "us")]
    pub storefront: String,

    /// Print records as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve a track, album or playlist URL into a normalized record
    Resolve {
        /// Catalogue URL
        url: String,
    },
    /// Search the catalogue and list matching tracks
    Search {
        /// Search terms
        query: String,
    },
    /// Resolve a track URL and list related tracks
    Related {
        /// Catalogue track URL
        url: String,
    },
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let config = Config {
            storefront: self.storefront.clone(),
            ..Config::default()
        };

        match &self.command {
            Command::Resolve { url } => {
                let plugin = AppleMusicPlugin::with_config(&config);
                println!("Resolving: {}", url);
                let resolved = plugin.resolve(url).await?;

                if self.json {
                    println!("{}", serde_json::to_string_pretty(&resolved)?);
                    return Ok(());
                }

                match resolved {
                    Resolved::Track(track) => print_track(&track, 0),
                    Resolved::Collection(collection) => print_collection(&collection),
                }
            }
            Command::Related { url } => {
                let plugin = AppleMusicPlugin::with_config(&config);
                println!("Resolving: {}", url);
                let track = match plugin.resolve(url).await? {
                    Resolved::Track(track) => track,
                    Resolved::Collection(_) => {
                        anyhow::bail!("related lookup needs a track url, got a collection")
                    }
                };
                let related = plugin.related_tracks(&track).await?;

                if self.json {
                    println!("{}", serde_json::to_string_pretty(&related)?);
                    return Ok(());
                }

                println!("Found {} related tracks", related.len());
                for track in &related {
                    print_track(track, 2);
                }
            }
            Command::Search { query } => {
                let api = AppleMusic::with_config(&config);
                println!("Searching: {}", query);
                let tracks = api.search(query).await;

                if self.json {
                    println!("{}", serde_json::to_string_pretty(&tracks)?);
                    return Ok(());
                }

                println!("Found {} tracks", tracks.len());
                for track in &tracks {
                    print_track(track, 2);
                }
            }
        }

        Ok(())
    }
}

fn print_track(track: &Track, indent: usize) {
    let pad = " ".repeat(indent);
    println!("{}{} - {} [{}]", pad, track.title, track.artist.name, track.id);
    println!("{}  url: {}", pad, track.url);
    if let Some(duration) = &track.duration {
        println!("{}  duration: {}", pad, duration);
    }
}

fn print_collection(collection: &Collection) {
    println!(
        "{}: {} - {} [{}]",
        collection.kind.as_str(),
        collection.title,
        collection.artist.name,
        collection.id
    );
    println!("  url: {}", collection.url);
    println!("  tracks: {}", collection.tracks.len());
    for track in &collection.tracks {
        print_track(track, 4);
    }
}
