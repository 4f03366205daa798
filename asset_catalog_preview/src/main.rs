use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use asset_catalog::{AssetCatalog, ImageSource};
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "asset-catalog-preview")]
#[command(about = "Preview catalog and network images in the terminal", long_about = None)]
struct Cli {
    /// Image URL. Use asset-catalog://<name>?delay=<seconds> to load a
    /// bundled asset instead of a network resource.
    url: String,

    /// Directory of bundled images forming the asset catalog.
    #[arg(short, long, default_value = "assets")]
    assets: PathBuf,

    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    configure_tracing(args.log_level);

    let url = Url::parse(&args.url)
        .with_context(|| format!("Failed to parse url \"{}\"", args.url))?;

    let catalog = Arc::new(
        AssetCatalog::from_dir(&args.assets)
            .await
            .with_context(|| format!("Failed to load asset catalog from {:?}", args.assets))?,
    );
    info!("Loaded {} catalog asset(s) from {:?}", catalog.len(), args.assets);

    let bytes = match ImageSource::resolve(Some(url), &catalog) {
        Some(ImageSource::Provider(provider)) => {
            info!("Fetching \"{}\" from the asset catalog", provider.cache_key());
            fetch_from_provider(provider).await?
        }
        Some(ImageSource::Network(url)) => {
            info!("Fetching {url} over the network");
            fetch_from_network(url).await?
        }
        None => anyhow::bail!("No image URL provided."),
    };

    print_image(&bytes)
}

async fn fetch_from_provider(
    provider: Arc<dyn asset_catalog::ImageDataProvider>,
) -> anyhow::Result<Vec<u8>> {
    let (tx, rx) = tokio::sync::oneshot::channel();

    provider.data(Box::new(move |result| {
        let _ = tx.send(result);
    }));

    let bytes = rx
        .await
        .context("Fetch completed without delivering a result")??;

    Ok(bytes)
}

async fn fetch_from_network(url: Url) -> anyhow::Result<Vec<u8>> {
    let response = reqwest::get(url.clone())
        .await
        .with_context(|| format!("Failed to fetch {url}"))?;

    if !response.status().is_success() {
        anyhow::bail!(
            "Unexpected status code fetching {url}: HTTP {}",
            response.status()
        );
    }

    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read response body from {url}"))?;

    Ok(bytes.to_vec())
}

fn print_image(bytes: &[u8]) -> anyhow::Result<()> {
    let image = image::load_from_memory(bytes).context("Failed to decode fetched image")?;

    let conf = viuer::Config {
        absolute_offset: false,
        ..Default::default()
    };

    viuer::print(&image, &conf).map_err(|e| anyhow::anyhow!("Failed to print image: {e}"))?;

    Ok(())
}

fn configure_tracing(log_level: Option<String>) {
    let log_level = match log_level.map(|level| level.to_lowercase()).as_deref() {
        Some("error") => Level::ERROR,
        Some("warn") => Level::WARN,
        Some("info") => Level::INFO,
        Some("debug") => Level::DEBUG,
        Some("trace") => Level::TRACE,
        Some(_) => panic!("invalid log level. must be one of [error, warn, info, debug, trace]."),
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}
