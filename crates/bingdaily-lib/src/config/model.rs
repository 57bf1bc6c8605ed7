use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Where the daily image page lives and which headers to send when
/// requesting it. The defaults point at the Bing homepage, which embeds
/// the image of the day in its markup.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct SourceConfig {
    pub protocol: String,
    pub host: String,
    pub page_path: String,
    pub headers: HashMap<String, String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            protocol: "https".to_string(),
            host: "www.bing.com".to_string(),
            page_path: "/".to_string(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct StorageConfig {
    pub content_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("public/images"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ThumbnailConfig {
    /// Thumbnail directory, resolved relative to the stored image's parent
    /// directory rather than the working directory.
    pub dir: String,
    pub width: u32,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            dir: "./thumb".to_string(),
            width: 200,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub source: SourceConfig,
    pub storage: StorageConfig,
    pub thumbnail: ThumbnailConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_source_points_at_bing() {
        let config = Config::default();

        assert_eq!(config.source.protocol, "https");
        assert_eq!(config.source.host, "www.bing.com");
        assert_eq!(config.source.page_path, "/");
        assert!(config.source.headers.is_empty());
    }

    #[test]
    fn default_thumbnail_is_200_px_under_thumb() {
        let config = Config::default();

        assert_eq!(config.thumbnail.dir, "./thumb");
        assert_eq!(config.thumbnail.width, 200);
    }
}
