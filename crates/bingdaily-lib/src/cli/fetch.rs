use crate::cli::params::FetchParams;
use crate::error::BingDailyError;
use crate::fetch::PageFetcher;
use crate::store::ImageStore;
use tracing;

/// Runs the full pipeline: fetch the page, extract today's image path,
/// download the image and generate its thumbnail.
pub async fn run_fetch(params: FetchParams) -> Result<(), BingDailyError> {
    let FetchParams { config, overwrite } = params;

    let client = reqwest::Client::new();
    let fetcher = PageFetcher::new(client.clone(), config.source.clone());

    let Some(image_path) = fetcher.fetch_image_path().await? else {
        tracing::info!("No image available today, nothing to do");
        return Ok(());
    };
    tracing::info!(path = %image_path, "Found today's image");

    let store = ImageStore::new(
        client,
        config.source,
        config.storage,
        config.thumbnail.clone(),
    )?;
    store
        .create_thumb_from_url(&image_path, &config.thumbnail.dir, overwrite)
        .await?;

    tracing::info!("Fetch completed successfully");
    Ok(())
}
