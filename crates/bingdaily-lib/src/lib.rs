pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod store;

pub use config::Config;
pub use error::BingDailyError;
