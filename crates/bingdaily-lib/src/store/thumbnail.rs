use crate::error::BingDailyError;
use image::GenericImageView;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};

/// Resolves the thumbnail directory relative to the stored image's parent
/// directory. A leading `./` in `thumb_dir` is ignored; an absolute
/// `thumb_dir` is used as-is.
pub fn resolve_thumb_dir(stored_path: &Path, thumb_dir: &str) -> PathBuf {
    let parent = stored_path.parent().unwrap_or_else(|| Path::new("."));
    let relative = Path::new(thumb_dir)
        .strip_prefix(".")
        .unwrap_or_else(|_| Path::new(thumb_dir));

    parent.join(relative)
}

/// Resizes the image at `source` to the target width, keeping the aspect
/// ratio, and saves it under the same file name in `dest_dir`. Any
/// existing thumbnail is replaced.
pub fn generate(
    source: &Path,
    dest_dir: &Path,
    width: u32,
) -> Result<PathBuf, BingDailyError> {
    let file_name = source
        .file_name()
        .ok_or_else(|| BingDailyError::Processing {
            path: source.to_path_buf(),
            reason: "Source path has no file name".to_string(),
        })?;
    let thumb_path = dest_dir.join(file_name);

    let img = image::open(source).map_err(|e| BingDailyError::Processing {
        path: source.to_path_buf(),
        reason: format!("Failed to decode image: {e}"),
    })?;

    // resize keeps the aspect ratio; the unbounded height leaves the
    // target width as the only constraint.
    let thumb = img.resize(width, u32::MAX, FilterType::Lanczos3);

    thumb.save(&thumb_path).map_err(|e| BingDailyError::Processing {
        path: thumb_path.clone(),
        reason: format!("Failed to save thumbnail: {e}"),
    })?;

    tracing::debug!(
        source = %source.display(),
        thumb = %thumb_path.display(),
        width = thumb.width(),
        height = thumb.height(),
        "Generated thumbnail"
    );
    Ok(thumb_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn thumb_dir_resolves_relative_to_image_parent() {
        let resolved = resolve_thumb_dir(Path::new("/content/2024-03-05.jpg"), "./thumb");

        assert_eq!(resolved, PathBuf::from("/content/thumb"));
    }

    #[test]
    fn thumb_dir_without_dot_prefix_resolves_the_same() {
        let resolved = resolve_thumb_dir(Path::new("/content/2024-03-05.jpg"), "thumb");

        assert_eq!(resolved, PathBuf::from("/content/thumb"));
    }

    #[test]
    fn absolute_thumb_dir_is_used_as_is() {
        let resolved = resolve_thumb_dir(Path::new("/content/2024-03-05.jpg"), "/tmp/thumbs");

        assert_eq!(resolved, PathBuf::from("/tmp/thumbs"));
    }

    #[test]
    fn generates_thumbnail_with_target_width() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("2024-03-05.jpg");
        RgbImage::new(400, 300).save(&source).unwrap();

        let thumb_dir = dir.path().join("thumb");
        std::fs::create_dir_all(&thumb_dir).unwrap();

        let thumb_path = generate(&source, &thumb_dir, 200).unwrap();

        assert_eq!(thumb_path, thumb_dir.join("2024-03-05.jpg"));
        let thumb = image::open(&thumb_path).unwrap();
        assert_eq!(thumb.dimensions(), (200, 150));
    }

    #[test]
    fn replaces_existing_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("2024-03-05.jpg");
        RgbImage::new(600, 300).save(&source).unwrap();

        let thumb_dir = dir.path().join("thumb");
        std::fs::create_dir_all(&thumb_dir).unwrap();
        let stale = thumb_dir.join("2024-03-05.jpg");
        std::fs::write(&stale, b"not an image").unwrap();

        generate(&source, &thumb_dir, 200).unwrap();

        let thumb = image::open(&stale).unwrap();
        assert_eq!(thumb.dimensions().0, 200);
    }

    #[test]
    fn unreadable_source_is_a_processing_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("2024-03-05.jpg");
        std::fs::write(&source, b"definitely not a jpeg").unwrap();

        let result = generate(&source, dir.path(), 200);

        assert!(matches!(result, Err(BingDailyError::Processing { .. })));
    }
}
