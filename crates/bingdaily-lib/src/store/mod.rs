mod acquire;
mod thumbnail;

pub use acquire::ImageStore;
pub use thumbnail::resolve_thumb_dir;
