mod cli;

use moviebrowser::{
    catalog::{CatalogClient, TmdbClient, TmdbSettings},
    config,
    format::{format_rating, format_runtime},
    genres::GenresProvider,
    movies::{MovieFeed, MoviesProvider},
    GenreId, Movie, MovieId,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;

/// Everything a catalog command needs, built from the loaded config.
struct App {
    config: config::Config,
    catalog: Arc<dyn CatalogClient>,
}

impl App {
    fn load(config_path: Option<&Path>, api_key: Option<String>) -> Result<Self> {
        let mut config = config::load_config_or_default(config_path)?;
        if let Some(key) = api_key {
            config.catalog.api_key = key;
        }

        let client = TmdbClient::new(TmdbSettings::from(&config.catalog));
        if !client.is_configured() {
            tracing::warn!("No API key set; pass --api-key or set catalog.api_key");
        }

        Ok(Self {
            config,
            catalog: Arc::new(client),
        })
    }

    fn movies(&self) -> MoviesProvider {
        MoviesProvider::new(Arc::clone(&self.catalog))
            .with_max_concurrency(self.config.browse.max_concurrency)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "moviebrowser=debug,moviebrowser_common=debug".to_string()
        } else {
            "moviebrowser=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("moviebrowser {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        command => {
            let app = App::load(config_path, cli.api_key)?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_command(&app, command))
        }
    }
}

async fn run_command(app: &App, command: Commands) -> Result<()> {
    match command {
        Commands::Genres => list_genres(app).await,
        Commands::Movies {
            genre,
            pages,
            more,
            runtimes,
            json,
        } => {
            let pages = pages.unwrap_or(app.config.browse.initial_pages);
            list_movies(app, GenreId::new(genre), pages, more, runtimes, json).await
        }
        Commands::Search {
            genre,
            query,
            max_pages,
            json,
        } => {
            let max_pages = max_pages.unwrap_or(app.config.browse.search_max_pages);
            search(app, GenreId::new(genre), &query, max_pages, json).await
        }
        Commands::Runtime { ids } => show_runtimes(app, &ids).await,
        Commands::Poster { path, out } => save_poster(app, &path, &out).await,
        Commands::Validate { .. } | Commands::Version => Ok(()),
    }
}

async fn list_genres(app: &App) -> Result<()> {
    let genres = GenresProvider::new(Arc::clone(&app.catalog))
        .get_genres()
        .await
        .context("Failed to fetch genres")?;

    for genre in &genres {
        println!("{:>6}  {}", genre.id.get(), genre.name);
    }
    Ok(())
}

async fn list_movies(
    app: &App,
    genre_id: GenreId,
    pages: u32,
    more: u32,
    runtimes: bool,
    json: bool,
) -> Result<()> {
    let provider = app.movies();
    let mut feed = MovieFeed::new(genre_id);

    feed.load_initial(&provider, pages)
        .await
        .with_context(|| format!("Failed to load genre {}", genre_id))?;

    for _ in 0..more {
        if !feed.has_more() {
            break;
        }
        if let Err(e) = feed.load_next(&provider).await {
            tracing::warn!(genre_id = %genre_id, error = %e, "Failed to load next page");
            // The feed is unchanged on failure, so the next pass retries the same page.
            if !e.is_transient() {
                break;
            }
        }
    }

    let movies = if runtimes {
        provider.attach_runtimes(feed.movies()).await
    } else {
        feed.movies().to_vec()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&movies)?);
        return Ok(());
    }

    print_movies(&movies);
    println!(
        "\n{} movies, {} of {} pages loaded",
        movies.len(),
        feed.loaded_pages(),
        feed.total_pages().unwrap_or(0)
    );
    Ok(())
}

async fn search(
    app: &App,
    genre_id: GenreId,
    query: &str,
    max_pages: u32,
    json: bool,
) -> Result<()> {
    let matches = app
        .movies()
        .search_across_pages(genre_id, max_pages, query)
        .await
        .with_context(|| format!("Search for {:?} failed", query))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No movies matching {:?} in the first {} pages", query, max_pages);
        return Ok(());
    }

    print_movies(&matches);
    println!("\n{} matches", matches.len());
    Ok(())
}

async fn show_runtimes(app: &App, ids: &[i64]) -> Result<()> {
    let ids: Vec<MovieId> = ids.iter().copied().map(MovieId::new).collect();

    for (id, result) in app.movies().get_runtimes(&ids).await {
        match result {
            Ok(minutes) => println!("{:>8}  {}", id.get(), format_runtime(minutes)),
            Err(e) => println!("{:>8}  unavailable ({})", id.get(), e),
        }
    }
    Ok(())
}

async fn save_poster(app: &App, path: &str, out: &Path) -> Result<()> {
    let bytes = app
        .movies()
        .get_poster(path)
        .await
        .with_context(|| format!("Failed to fetch poster {}", path))?;

    std::fs::write(out, &bytes).with_context(|| format!("Failed to write {:?}", out))?;
    println!("Wrote {} bytes to {}", bytes.len(), out.display());
    Ok(())
}

fn print_movies(movies: &[Movie]) {
    for movie in movies {
        let id = movie.id.map(|id| id.to_string()).unwrap_or_default();
        let title = movie.display_title().unwrap_or("(untitled)");
        let year = movie
            .release_year()
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        let runtime = movie
            .runtime
            .map(|m| format!("  {}", format_runtime(m)))
            .unwrap_or_default();
        println!(
            "{:>8}  {:>4}  {}{}{}",
            id,
            format_rating(movie.rating),
            title,
            year,
            runtime
        );
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config_summary(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            print_config_summary(&config::Config::default());
        }
    }

    Ok(())
}

fn print_config_summary(config: &config::Config) {
    println!("  API base: {}", config.catalog.api_base_url);
    println!("  Image base: {}", config.catalog.image_base_url);
    println!("  Language: {}", config.catalog.language);
    println!(
        "  API key: {}",
        if config.catalog.api_key.is_empty() {
            "not set"
        } else {
            "set"
        }
    );
    println!("  Initial pages: {}", config.browse.initial_pages);
    println!("  Search pages: {}", config.browse.search_max_pages);
    println!("  Max concurrency: {}", config.browse.max_concurrency);
}
