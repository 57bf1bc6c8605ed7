mod args;
mod fetch;
mod params;
mod resolved_command;
mod thumb;

pub use args::{Command, parse_args};
pub use fetch::run_fetch;
pub use params::{FetchParams, ThumbParams};
pub use resolved_command::{ResolvedCommand, resolve_command};
pub use thumb::run_thumb;
