use crate::cli::params::ThumbParams;
use crate::error::BingDailyError;
use crate::store::ImageStore;
use tracing;

/// Regenerates the thumbnail for an already downloaded image file.
pub async fn run_thumb(params: ThumbParams) -> Result<(), BingDailyError> {
    let ThumbParams { config, image_path } = params;

    let store = ImageStore::new(
        reqwest::Client::new(),
        config.source,
        config.storage,
        config.thumbnail.clone(),
    )?;
    let thumb_path = store
        .create_thumb(&image_path, &config.thumbnail.dir, true)
        .await?;

    tracing::info!(thumb = %thumb_path.display(), "Thumbnail generated");
    Ok(())
}
