use chrono::Utc;
use clap::{Parser, Subcommand};
use esg_search_core::{
    ContentFetcher, DocumentPipeline, EsgExtractor, EsgSearcher, GoogleSearchProvider,
    HttpSource, SearchSettings, DEFAULT_DOWNLOAD_DIR, DEFAULT_QUERY, DEFAULT_RESULT_LIMIT,
    DEFAULT_SEARCH_ENDPOINT,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "esg-search", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Custom Search API key
    #[arg(long, env = "ESG_SEARCH_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Programmable Search Engine ID (cx)
    #[arg(long, env = "ESG_SEARCH_ENGINE_ID")]
    engine_id: Option<String>,

    /// Custom Search endpoint
    #[arg(long, env = "ESG_SEARCH_ENDPOINT", default_value = DEFAULT_SEARCH_ENDPOINT)]
    endpoint: String,

    /// Directory that receives downloaded PDFs
    #[arg(long, env = "ESG_SEARCH_DOWNLOAD_DIR", default_value = DEFAULT_DOWNLOAD_DIR)]
    download_dir: String,
}

#[derive(Subcommand)]
enum Command {
    /// Search, fetch every hit and print the extracted ESG data.
    Run {
        /// Search query, sent verbatim
        #[arg(long, env = "ESG_SEARCH_QUERY", default_value = DEFAULT_QUERY)]
        query: String,
        /// Maximum number of search hits to process.
        #[arg(long, env = "ESG_SEARCH_LIMIT", default_value_t = DEFAULT_RESULT_LIMIT)]
        limit: usize,
        /// Also print hits that were dropped because they could not be fetched.
        #[arg(long, default_value_t = false)]
        show_dropped: bool,
    },
    /// Print search hits without fetching them.
    Search {
        /// Search query, sent verbatim
        #[arg(long, env = "ESG_SEARCH_QUERY", default_value = DEFAULT_QUERY)]
        query: String,
        /// Maximum number of search hits to print.
        #[arg(long, env = "ESG_SEARCH_LIMIT", default_value_t = DEFAULT_RESULT_LIMIT)]
        limit: usize,
    },
    /// Fetch a single URL and print the extracted ESG data.
    Extract {
        #[arg(long)]
        url: String,
    },
}

fn build_searcher(
    cli: &Cli,
    extractor: EsgExtractor,
) -> anyhow::Result<EsgSearcher<GoogleSearchProvider, HttpSource>> {
    let settings = SearchSettings::new(
        cli.api_key.clone().unwrap_or_default(),
        cli.engine_id.clone().unwrap_or_default(),
        cli.endpoint.clone(),
        cli.download_dir.clone(),
    )?;
    let fetcher = ContentFetcher::new(HttpSource::new(), &settings.download_dir);
    Ok(EsgSearcher::new(
        GoogleSearchProvider::new(&settings),
        fetcher,
        extractor,
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            return Err(anyhow::anyhow!("failed to load .env: {error}"));
        }
    }

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "esg-search boot"
    );

    let extractor = EsgExtractor::new()?;

    match &cli.command {
        Command::Run {
            query,
            limit,
            show_dropped,
        } => {
            let searcher = build_searcher(&cli, extractor)?;

            let hits = searcher.search(query, *limit).await;
            let report = searcher.process_best_effort(&hits).await;

            if !report.dropped.is_empty() {
                warn!(
                    "dropped_hits={} of hit_count={}",
                    report.dropped.len(),
                    hits.len()
                );
            }

            println!("\nProcessed Results:");
            for record in &report.records {
                println!("\nResult:");
                print!("{record}");
            }

            if *show_dropped {
                for dropped in &report.dropped {
                    println!(
                        "\nDropped: {} - {}",
                        dropped.hit.title.as_deref().unwrap_or_default(),
                        dropped.hit.link.as_deref().unwrap_or_default()
                    );
                    println!("reason: {}", dropped.reason);
                }
            }
        }
        Command::Search { query, limit } => {
            let searcher = build_searcher(&cli, extractor)?;

            let hits = searcher.search(query, *limit).await;
            println!("query: {query}");
            for (rank, hit) in hits.iter().enumerate() {
                println!(
                    "[{}] {}",
                    rank + 1,
                    hit.title.as_deref().unwrap_or_default()
                );
                if let Some(link) = &hit.link {
                    println!("  link={link}");
                }
                if let Some(snippet) = &hit.snippet {
                    println!("  snippet={snippet}");
                }
            }
        }
        Command::Extract { url } => {
            let fetcher = ContentFetcher::new(HttpSource::new(), &cli.download_dir);
            let data = DocumentPipeline::new(fetcher, extractor)
                .process_url(url)
                .await?;

            println!("source: {url}");
            for (name, value) in data.fields() {
                println!("{name}: {value}");
            }
        }
    }

    Ok(())
}
