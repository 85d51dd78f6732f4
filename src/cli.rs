use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "moviebrowser")]
#[command(author, version, about = "Browse the movie catalog by genre")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog API key (overrides the config file and TMDB_API_KEY)
    #[arg(long, global = true, env = "TMDB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the catalog's movie genres
    Genres,

    /// List movies in a genre
    Movies {
        /// Genre id (see `genres`)
        genre: i64,

        /// Pages to load up front (default: browse.initial_pages)
        #[arg(short, long)]
        pages: Option<u32>,

        /// Extra pages to load one at a time after the initial load
        #[arg(long, default_value = "0")]
        more: u32,

        /// Look up and show each movie's runtime
        #[arg(long)]
        runtimes: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search a genre's first pages by title
    Search {
        /// Genre id (see `genres`)
        genre: i64,

        /// Case-sensitive title substring; empty matches everything
        query: String,

        /// Pages to scan (default: browse.search_max_pages)
        #[arg(short, long)]
        max_pages: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show runtimes for one or more movies
    Runtime {
        /// Movie ids
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Download a poster image
    Poster {
        /// Poster path as returned by the catalog, e.g. /abc.jpg
        path: String,

        /// File to write the image to
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
