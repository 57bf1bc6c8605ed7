use crate::cli::args::Command;
use crate::cli::params::{FetchParams, ThumbParams};
use crate::config::load_config;
use crate::error::BingDailyError;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum ResolvedCommand {
    Fetch(FetchParams),
    Thumb(ThumbParams),
}

pub fn resolve_command(command: Command) -> Result<ResolvedCommand, BingDailyError> {
    match command {
        Command::Fetch {
            config_path,
            content_dir,
            thumb_dir,
            width,
            no_overwrite,
        } => {
            let mut config = load_config(config_path.as_deref())?;

            if let Some(content_dir) = content_dir {
                config.storage.content_dir = PathBuf::from(content_dir);
            }
            if let Some(thumb_dir) = thumb_dir {
                config.thumbnail.dir = thumb_dir;
            }
            if let Some(width) = width {
                config.thumbnail.width = width;
            }

            validate_width(config.thumbnail.width)?;

            Ok(ResolvedCommand::Fetch(FetchParams {
                config,
                overwrite: !no_overwrite,
            }))
        }
        Command::Thumb {
            config_path,
            image,
            thumb_dir,
            width,
        } => {
            let mut config = load_config(config_path.as_deref())?;

            if let Some(thumb_dir) = thumb_dir {
                config.thumbnail.dir = thumb_dir;
            }
            if let Some(width) = width {
                config.thumbnail.width = width;
            }

            validate_width(config.thumbnail.width)?;

            let image_path = PathBuf::from(image);
            if !image_path.is_file() {
                return Err(BingDailyError::CliArgumentValidation {
                    details: format!("Image file does not exist: {}", image_path.display()),
                });
            }

            // The store roots itself at the image's parent so the thumb
            // command never touches the configured content directory.
            if let Some(parent) = image_path.parent() {
                config.storage.content_dir = parent.to_path_buf();
            }

            Ok(ResolvedCommand::Thumb(ThumbParams { config, image_path }))
        }
    }
}

fn validate_width(width: u32) -> Result<(), BingDailyError> {
    if width == 0 {
        return Err(BingDailyError::CliArgumentValidation {
            details: "width must be greater than 0.".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_overrides_replace_config_values() {
        let command = Command::Fetch {
            config_path: None,
            content_dir: Some("/tmp/images".to_string()),
            thumb_dir: Some("./small".to_string()),
            width: Some(320),
            no_overwrite: true,
        };

        let resolved = resolve_command(command).unwrap();
        let ResolvedCommand::Fetch(params) = resolved else {
            panic!("expected fetch params");
        };

        assert_eq!(params.config.storage.content_dir, PathBuf::from("/tmp/images"));
        assert_eq!(params.config.thumbnail.dir, "./small");
        assert_eq!(params.config.thumbnail.width, 320);
        assert!(!params.overwrite);
    }

    #[test]
    fn zero_width_is_rejected() {
        let command = Command::Fetch {
            config_path: None,
            content_dir: None,
            thumb_dir: None,
            width: Some(0),
            no_overwrite: false,
        };

        let result = resolve_command(command);

        assert!(matches!(
            result,
            Err(BingDailyError::CliArgumentValidation { .. })
        ));
    }

    #[test]
    fn thumb_requires_an_existing_image() {
        let command = Command::Thumb {
            config_path: None,
            image: "/nonexistent/2024-03-05.jpg".to_string(),
            thumb_dir: None,
            width: None,
        };

        let result = resolve_command(command);

        assert!(matches!(
            result,
            Err(BingDailyError::CliArgumentValidation { .. })
        ));
    }
}
