use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::subscriber as tracing_subscriber_global;
use tracing_log::LogTracer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use spotify_web_handlers as lib;
use lib::models::{Collection, Model, Playlist, Track};
use lib::options::{BrowseOptions, MarketOptions, ModifyTracksOptions, SearchOptions};
use lib::{Config, Spotify};

#[derive(Parser)]
#[command(name = "spotify-web-handlers", version)]
struct Cli {
    /// Path to config TOML
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print raw JSON instead of one line per item
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate config file and exit
    ConfigValidate,
    #[command(flatten)]
    Api(ApiCommands),
}

#[derive(Subcommand)]
enum ApiCommands {
    /// Search playlists by keyword
    SearchPlaylists {
        query: String,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Search tracks by keyword
    SearchTracks {
        query: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List featured playlists (token required)
    Featured {
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List playlists of a browse category (token required)
    Category {
        id: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one playlist
    Playlist { id: String },
    /// Add track URIs to a playlist (token with playlist-modify scope required)
    AddTracks {
        playlist_id: String,
        #[arg(required = true)]
        uris: Vec<String>,
        #[arg(long)]
        position: Option<u32>,
    },
    /// Remove track URIs from a playlist
    RemoveTracks {
        playlist_id: String,
        #[arg(required = true)]
        uris: Vec<String>,
    },
    /// Show the profile owning the token
    Me,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("spotify-web-handlers").join("config.toml"))
        .filter(|p| p.exists())
}

fn load_config(explicit: Option<&PathBuf>) -> Result<Config> {
    let cfg = match explicit.cloned().or_else(default_config_path) {
        Some(path) => Config::from_path(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    Ok(cfg.apply_env())
}

fn print_playlists(page: &Collection<Playlist>) {
    for pl in page {
        println!(
            "{}\t{}\t{} tracks\t(owner {})",
            pl.id().unwrap_or("-"),
            pl.name().unwrap_or("-"),
            pl.tracks_total().unwrap_or(0),
            pl.owner_id().unwrap_or("-")
        );
    }
    println!("-- {} of {} (offset {})", page.len(), page.total(), page.offset());
}

fn print_tracks(page: &Collection<Track>) {
    for t in page {
        println!(
            "{}\t{} - {}",
            t.uri().unwrap_or("-"),
            t.artist_names().join(", "),
            t.name().unwrap_or("-")
        );
    }
    println!("-- {} of {} (offset {})", page.len(), page.total(), page.offset());
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn validate_config(explicit: Option<&PathBuf>) -> Result<()> {
    let path = explicit
        .cloned()
        .or_else(default_config_path)
        .context("no config file given and none found in the default location")?;
    match Config::from_path(&path) {
        Ok(_) => println!("OK"),
        Err(e) => {
            eprintln!("Config validation failed: {}", e);
            std::process::exit(2);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let command = match cli.command {
        Commands::ConfigValidate => return validate_config(cli.config.as_ref()),
        Commands::Api(command) => command,
    };
    let cfg = load_config(cli.config.as_ref())?;

    // Bridge `log` records from dependencies, then install structured logging:
    // stderr always, plus a daily-rotated file when log_dir is configured.
    let _ = LogTracer::init();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (file_layer, _guard) = match &cfg.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "spotify-web-handlers.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(non_blocking).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };
    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(fmt::layer().with_writer(std::io::stderr));
    tracing_subscriber_global::set_global_default(subscriber)
        .context("installing tracing subscriber")?;

    let spotify = Spotify::connect(&cfg)
        .await
        .context("building Spotify client")?;
    let market = MarketOptions {
        market: cfg.market.clone(),
    };

    match command {
        ApiCommands::SearchPlaylists { query, limit, offset } => {
            let opts = SearchOptions {
                limit,
                offset,
                market: cfg.market.clone(),
            };
            let page = spotify.playlists().search(&query, &opts).await?;
            if cli.json {
                print_json(&page.into_items())?;
            } else {
                print_playlists(&page);
            }
        }
        ApiCommands::SearchTracks { query, limit } => {
            let opts = SearchOptions {
                limit,
                market: cfg.market.clone(),
                ..Default::default()
            };
            let page = spotify.tracks().search(&query, &opts).await?;
            if cli.json {
                print_json(&page.into_items())?;
            } else {
                print_tracks(&page);
            }
        }
        ApiCommands::Featured { country, limit } => {
            let opts = BrowseOptions {
                country: country.or_else(|| cfg.market.clone()),
                limit,
                ..Default::default()
            };
            let page = spotify.playlists().featured_playlists(&opts).await?;
            if cli.json {
                print_json(&page.into_items())?;
            } else {
                print_playlists(&page);
            }
        }
        ApiCommands::Category { id, limit } => {
            let opts = BrowseOptions {
                country: cfg.market.clone(),
                limit,
                ..Default::default()
            };
            let page = spotify.playlists().categories_playlists(&id, &opts).await?;
            if cli.json {
                print_json(&page.into_items())?;
            } else {
                print_playlists(&page);
            }
        }
        ApiCommands::Playlist { id } => {
            let pl = spotify.playlists().lookup(&id, &market).await?;
            if cli.json {
                print_json(&pl)?;
            } else {
                println!("{}\t{}", pl.id().unwrap_or("-"), pl.name().unwrap_or("-"));
                println!("owner: {}", pl.owner_display_name().or(pl.owner_id()).unwrap_or("-"));
                println!("tracks: {}", pl.tracks_total().unwrap_or(0));
                if let Some(desc) = pl.description().filter(|d| !d.is_empty()) {
                    println!("{}", desc);
                }
            }
        }
        ApiCommands::AddTracks {
            playlist_id,
            uris,
            position,
        } => {
            let pl = spotify.playlists().lookup(&playlist_id, &market).await?;
            spotify
                .playlists()
                .add_tracks(&uris, &pl, &ModifyTracksOptions { position })
                .await
                .with_context(|| format!("adding tracks to {}", playlist_id))?;
            println!("Added {} tracks to {}", uris.len(), pl.name().unwrap_or(&playlist_id));
        }
        ApiCommands::RemoveTracks { playlist_id, uris } => {
            let pl = spotify.playlists().lookup(&playlist_id, &market).await?;
            spotify
                .playlists()
                .remove_tracks(&uris, &pl)
                .await
                .with_context(|| format!("removing tracks from {}", playlist_id))?;
            println!("Removed {} tracks from {}", uris.len(), pl.name().unwrap_or(&playlist_id));
        }
        ApiCommands::Me => {
            let me = spotify.users().me().await?;
            if cli.json {
                print_json(&me)?;
            } else {
                println!(
                    "{}\t{}\t{}",
                    me.id().unwrap_or("-"),
                    me.display_name().unwrap_or("-"),
                    me.product().unwrap_or("-")
                );
            }
        }
    }

    Ok(())
}
