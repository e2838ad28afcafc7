//! Plumbus - browse Rick and Morty episodes from the terminal
#![allow(clippy::uninlined_format_args)]

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use plumbus::api::{EpisodeApi, RickAndMortyClient};
use plumbus::app::{EpisodeListing, LoadState};
use plumbus::db::{Database, KeyValueStore, MemoryStore};
use plumbus::images::ImageResolver;
use plumbus::output::{EpisodeRow, character_block, episode_line};
use plumbus::{Config, FavouritesRegistry, FilterMode};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let (command, ephemeral) = parse_args()?;

    match command {
        Command::Episodes { filter, search } => {
            let config = Config::load()?;
            episodes_cli(&config, filter, &search, ephemeral).await
        }
        Command::Favourites => {
            let config = Config::load()?;
            favourites_cli(&config, ephemeral).await
        }
        Command::Toggle { episode_id } => toggle_cli(episode_id, ephemeral),
        Command::Character { episode_id } => {
            let config = Config::load()?;
            character_cli(&config, episode_id).await
        }
        Command::Config => config_cli(),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
enum Command {
    Episodes {
        filter: Option<FilterMode>,
        search: String,
    },
    Favourites,
    Toggle {
        episode_id: u32,
    },
    Character {
        episode_id: u32,
    },
    Config,
    Help,
    Version,
}

fn parse_args() -> Result<(Command, bool)> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let ephemeral = args.iter().any(|a| a == "--ephemeral");
    args.retain(|a| a != "--ephemeral");

    let Some(first) = args.first() else {
        return Ok((
            Command::Episodes {
                filter: None,
                search: String::new(),
            },
            ephemeral,
        ));
    };

    let command = match first.as_str() {
        "-h" | "--help" | "help" => Command::Help,
        "-v" | "--version" | "version" => Command::Version,

        "episodes" | "ep" => {
            let mut filter = None;
            let mut search = String::new();
            let mut i = 1;
            while i < args.len() {
                match args[i].as_str() {
                    "--filter" | "-f" => {
                        let value = args
                            .get(i + 1)
                            .ok_or_else(|| anyhow::anyhow!("Missing value for --filter"))?;
                        filter = Some(FilterMode::from_str(value).ok_or_else(|| {
                            anyhow::anyhow!("Unknown filter: {value} (use name or number)")
                        })?);
                        i += 2;
                    }
                    "--search" | "-s" => {
                        search = args.get(i + 1).cloned().unwrap_or_default();
                        i += 2;
                    }
                    _ => i += 1,
                }
            }
            Command::Episodes { filter, search }
        }

        "favourites" | "favorites" | "fav" => Command::Favourites,

        "favourite" | "favorite" | "toggle" => Command::Toggle {
            episode_id: parse_episode_id(args.get(1))?,
        },

        "character" | "char" => Command::Character {
            episode_id: parse_episode_id(args.get(1))?,
        },

        "config" => Command::Config,

        other => {
            return Err(anyhow::anyhow!(
                "Unknown command: {other}\nRun 'plumbus --help' for usage"
            ));
        }
    };

    Ok((command, ephemeral))
}

fn parse_episode_id(arg: Option<&String>) -> Result<u32> {
    let arg = arg.ok_or_else(|| anyhow::anyhow!("Missing episode ID"))?;
    arg.parse()
        .with_context(|| format!("Invalid episode ID: {arg}"))
}

fn print_help() {
    let config_path = Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
Plumbus - Rick and Morty episodes in your terminal

USAGE:
    plumbus                            List episodes
    plumbus [COMMAND] [--ephemeral]

COMMANDS:
    episodes [OPTIONS]                 List episodes
      Options:
        -f, --filter <name|number>     Match character references or episode codes
        -s, --search <text>            Case-insensitive search text
      Examples:
        plumbus episodes --search s02
        plumbus episodes -f name -s character/38

    favourites                         List favourite episodes
    favourite <id>                     Add or remove a favourite
    character <episode-id>             Show a random character from an episode
    config                             Show configuration

OPTIONS:
    --ephemeral                        Don't read or write saved favourites
    -h, --help                         Show this help message
    -v, --version                      Show version information

CONFIG:
    {}
"#,
        plumbus::LOGO,
        config_path
    );
}

fn print_version() {
    println!("plumbus {}", plumbus::VERSION);
}

fn client(config: &Config) -> RickAndMortyClient {
    RickAndMortyClient::new(&config.api_base_url, config.request_timeout())
}

fn open_favourites(ephemeral: bool) -> Result<FavouritesRegistry<Box<dyn KeyValueStore>>> {
    let store: Box<dyn KeyValueStore> = if ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(Database::open()?)
    };
    FavouritesRegistry::load(store)
}

async fn episodes_cli(
    config: &Config,
    filter: Option<FilterMode>,
    search: &str,
    ephemeral: bool,
) -> Result<()> {
    let favourites = open_favourites(ephemeral)?;
    let mode = filter.unwrap_or(config.default_filter);

    let mut listing = EpisodeListing::new(
        Arc::new(client(config)),
        ImageResolver::from_seed(config.image_seed),
        mode,
        config.episode_order,
    );

    listing.refresh();
    while listing.state() == LoadState::Loading {
        if !listing.next_event().await {
            break;
        }
    }
    if listing.state() != LoadState::Loaded {
        anyhow::bail!("Could not fetch episodes (run with RUST_LOG=warn for details)");
    }

    listing.apply_filter(mode, search);
    let displayed = listing.displayed().to_vec();

    if config.show_images {
        let pending = displayed
            .iter()
            .filter(|e| listing.request_image(e).is_none() && !e.character_urls.is_empty())
            .count();
        for _ in 0..pending {
            if !listing.next_event().await {
                break;
            }
        }
    }
    listing.shutdown();

    println!(
        "{} episodes · filter: {}{}",
        displayed.len(),
        mode,
        if search.is_empty() {
            String::new()
        } else {
            format!(" · search: \"{search}\"")
        }
    );
    println!("{}", "─".repeat(60));

    for episode in &displayed {
        println!(
            "{}",
            episode_line(&EpisodeRow {
                episode,
                favourite: favourites.contains(episode.id),
                image_url: listing.image(episode.id),
            })
        );
    }

    Ok(())
}

async fn favourites_cli(config: &Config, ephemeral: bool) -> Result<()> {
    let favourites = open_favourites(ephemeral)?;

    if favourites.is_empty() {
        println!("No favourite episodes yet.");
        println!("\nAdd one with:");
        println!("  plumbus favourite <episode-id>");
        return Ok(());
    }

    let api = client(config);
    let episodes = favourites.fetch_favourites(&api).await;
    let mut resolver = ImageResolver::from_seed(config.image_seed);

    println!("Favourite episodes:\n");
    for episode in &episodes {
        let image_url = if config.show_images {
            resolver.resolve(&api, episode).await
        } else {
            None
        };
        println!(
            "{}",
            episode_line(&EpisodeRow {
                episode,
                favourite: true,
                image_url: image_url.as_deref(),
            })
        );
    }

    Ok(())
}

fn toggle_cli(episode_id: u32, ephemeral: bool) -> Result<()> {
    let mut favourites = open_favourites(ephemeral)?;

    if favourites.toggle(episode_id)? {
        println!("♥ Episode {} added to favourites", episode_id);
    } else {
        println!("Episode {} removed from favourites", episode_id);
    }

    Ok(())
}

async fn character_cli(config: &Config, episode_id: u32) -> Result<()> {
    let api = client(config);
    let episodes = api.fetch_episode_list().await?;

    let episode = episodes
        .iter()
        .find(|e| e.id == episode_id)
        .ok_or_else(|| anyhow::anyhow!("No episode with ID {episode_id}"))?;

    let mut resolver = ImageResolver::from_seed(config.image_seed);
    let Some(character_url) = resolver.pick_character(episode) else {
        println!("{} ({}) has no characters.", episode.name, episode.episode_code);
        return Ok(());
    };

    let character = api.fetch_character(character_url).await?;

    println!("{} · {}\n", episode.episode_code, episode.name);
    print!("{}", character_block(&character));

    Ok(())
}

fn config_cli() -> Result<()> {
    let path = Config::default_path()?;
    let config = Config::load_from(&path)?;

    println!("# {}", path.display());
    print!(
        "{}",
        toml::to_string_pretty(&config).context("Failed to serialize config")?
    );

    Ok(())
}
