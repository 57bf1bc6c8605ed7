use super::thumbnail;
use crate::config::{SourceConfig, StorageConfig, ThumbnailConfig};
use crate::error::BingDailyError;
use chrono::{Local, NaiveDate};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Image file extension; the daily image is always served as JPEG.
const IMG_FORMAT: &str = "jpg";

/// Downloads daily images into the content directory and derives
/// thumbnails from them. Each instance owns its configuration; nothing is
/// shared or mutated across instances.
pub struct ImageStore {
    client: reqwest::Client,
    source: SourceConfig,
    storage: StorageConfig,
    thumbnail: ThumbnailConfig,
}

impl ImageStore {
    /// Creates a store and makes sure the content directory exists,
    /// creating missing path segments recursively.
    pub fn new(
        client: reqwest::Client,
        source: SourceConfig,
        storage: StorageConfig,
        thumbnail: ThumbnailConfig,
    ) -> Result<Self, BingDailyError> {
        std::fs::create_dir_all(&storage.content_dir).map_err(|e| {
            BingDailyError::ImageStore {
                path: storage.content_dir.clone(),
                reason: format!("Failed to create content directory: {e}"),
            }
        })?;

        Ok(Self {
            client,
            source,
            storage,
            thumbnail,
        })
    }

    /// Downloads the image and generates its thumbnail in one go.
    /// Resolves to `true` only when both steps completed; any failure
    /// propagates unchanged.
    pub async fn create_thumb_from_url(
        &self,
        image_path: &str,
        thumb_dir: &str,
        overwrite: bool,
    ) -> Result<bool, BingDailyError> {
        let stored_path = self.download_image(image_path, overwrite).await?;
        let thumb_path = self.create_thumb(&stored_path, thumb_dir, overwrite).await?;

        tracing::info!(
            image = %stored_path.display(),
            thumb = %thumb_path.display(),
            "Stored image and thumbnail"
        );
        Ok(true)
    }

    /// Stores the image at the given host-relative path under today's
    /// date and returns the path of the stored file.
    ///
    /// With `overwrite` unset, an existing file for today is returned
    /// as-is without touching the network. The download itself goes
    /// through a temporary `.part` file that is renamed into place only
    /// after the full body has been written, so a half-written file is
    /// never visible at the final path.
    pub async fn download_image(
        &self,
        image_path: &str,
        overwrite: bool,
    ) -> Result<PathBuf, BingDailyError> {
        let file_path = self
            .storage
            .content_dir
            .join(image_file_name(Local::now().date_naive()));

        if file_path.exists() && !overwrite {
            tracing::debug!(
                path = %file_path.display(),
                "Image for today already stored, skipping download"
            );
            return Ok(file_path);
        }

        let url = format!(
            "{}://{}{}",
            self.source.protocol, self.source.host, image_path
        );
        tracing::info!(url = %url, output = %file_path.display(), "Downloading image");

        let mut request = self.client.get(&url);
        for (name, value) in &self.source.headers {
            request = request.header(name, value);
        }
        let response = request.send().await?.error_for_status()?;

        let part_path = file_path.with_extension(format!("{IMG_FORMAT}.part"));
        if let Err(err) = stream_to_file(response, &part_path).await {
            // Best effort; the error we report is the stream failure.
            let _ = tokio::fs::remove_file(&part_path).await;
            return Err(err);
        }

        tokio::fs::rename(&part_path, &file_path)
            .await
            .map_err(|e| BingDailyError::ImageStore {
                path: file_path.clone(),
                reason: format!("Failed to move downloaded image into place: {e}"),
            })?;

        Ok(file_path)
    }

    /// Generates a thumbnail for the given stored image. The thumbnail
    /// directory is resolved relative to the image's parent directory and
    /// created recursively when missing.
    ///
    /// The `overwrite` flag is accepted for symmetry with
    /// [`ImageStore::download_image`] but not honored: thumbnails are
    /// always regenerated, since rebuilding one is cheaper than checking
    /// whether the existing file is still valid.
    pub async fn create_thumb(
        &self,
        stored_path: &Path,
        thumb_dir: &str,
        _overwrite: bool,
    ) -> Result<PathBuf, BingDailyError> {
        let thumb_dir_path = thumbnail::resolve_thumb_dir(stored_path, thumb_dir);

        tokio::fs::create_dir_all(&thumb_dir_path)
            .await
            .map_err(|e| BingDailyError::ThumbDirCreation {
                path: thumb_dir_path.clone(),
                reason: e.to_string(),
            })?;

        let source = stored_path.to_path_buf();
        let dest_dir = thumb_dir_path.clone();
        let width = self.thumbnail.width;

        // Decoding and resizing are CPU-bound; keep them off the runtime.
        tokio::task::spawn_blocking(move || thumbnail::generate(&source, &dest_dir, width))
            .await
            .map_err(|e| BingDailyError::Unexpected(eyre::eyre!("Thumbnail task failed: {e}")))?
    }
}

async fn stream_to_file(
    response: reqwest::Response,
    path: &Path,
) -> Result<(), BingDailyError> {
    let file = tokio::fs::File::create(path)
        .await
        .map_err(|e| BingDailyError::ImageStore {
            path: path.to_path_buf(),
            reason: format!("Failed to create output file: {e}"),
        })?;
    let mut writer = tokio::io::BufWriter::new(file);

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| BingDailyError::ImageStore {
                path: path.to_path_buf(),
                reason: format!("Failed to write to output file: {e}"),
            })?;
    }

    writer.flush().await.map_err(|e| BingDailyError::ImageStore {
        path: path.to_path_buf(),
        reason: format!("Failed to flush output file: {e}"),
    })?;

    Ok(())
}

/// Generates the stored file name for the given calendar date.
fn image_file_name(date: NaiveDate) -> String {
    format!("{}.{IMG_FORMAT}", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_is_iso_date_with_jpg_extension() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        assert_eq!(image_file_name(date), "2024-03-05.jpg");
    }

    #[test]
    fn file_name_zero_pads_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();

        assert_eq!(image_file_name(date), "2023-01-09.jpg");
    }

    #[test]
    fn same_date_yields_same_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 14).unwrap();

        assert_eq!(image_file_name(date), image_file_name(date));
    }
}
