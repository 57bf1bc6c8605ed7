use super::Config;
use crate::error::BingDailyError;
use config::Config as ConfigBuilder;

/// Loads the configuration from the given file, or falls back to the
/// built-in defaults when no file was provided. Fields missing from the
/// file keep their default values.
pub fn load_config(config_path: Option<&str>) -> Result<Config, BingDailyError> {
    let Some(config_path) = config_path else {
        return Ok(Config::default());
    };

    let config_builder = ConfigBuilder::builder()
        .add_source(config::File::with_name(config_path))
        .build()?;

    config_builder.try_deserialize().map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).unwrap();

        assert_eq!(config.source.host, "www.bing.com");
        assert_eq!(config.storage.content_dir.to_str(), Some("public/images"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[source]\nhost = \"bing.example\"\n").unwrap();

        let config = load_config(path.to_str()).unwrap();

        assert_eq!(config.source.host, "bing.example");
        assert_eq!(config.source.protocol, "https");
        assert_eq!(config.thumbnail.width, 200);
    }
}
