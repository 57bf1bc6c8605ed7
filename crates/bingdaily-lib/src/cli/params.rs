use crate::config::Config;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FetchParams {
    pub config: Config,
    pub overwrite: bool,
}

#[derive(Debug, Clone)]
pub struct ThumbParams {
    pub config: Config,
    pub image_path: PathBuf,
}
