use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber;

#[derive(Debug, Clone)]
pub enum Command {
    Fetch {
        config_path: Option<String>,
        content_dir: Option<String>,
        thumb_dir: Option<String>,
        width: Option<u32>,
        no_overwrite: bool,
    },
    Thumb {
        config_path: Option<String>,
        image: String,
        thumb_dir: Option<String>,
        width: Option<u32>,
    },
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "bingdaily",
    version,
    author = "Manuel Schächinger",
    about = "Fetch the Bing image of the day and keep a dated local copy with a thumbnail"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count,
        global = true
    )]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Fetch today's image page, download the image and generate a thumbnail
    Fetch {
        #[arg(
            short = 'c',
            long = "config",
            value_name = "FILE",
            help = "Sets a custom config file"
        )]
        config: Option<String>,

        #[arg(
            short = 'o',
            long = "content-dir",
            value_name = "DIR",
            help = "Overrides the directory downloaded images are stored in"
        )]
        content_dir: Option<String>,

        #[arg(
            long = "thumb-dir",
            value_name = "DIR",
            help = "Overrides the thumbnail directory, relative to the stored image"
        )]
        thumb_dir: Option<String>,

        #[arg(
            short = 'w',
            long = "width",
            value_name = "PX",
            help = "Overrides the thumbnail target width in pixels"
        )]
        width: Option<u32>,

        #[arg(
            long = "no-overwrite",
            help = "Keep an already stored image for today instead of fetching again",
            action = ArgAction::SetTrue
        )]
        no_overwrite: bool,
    },

    /// Regenerate the thumbnail for an already downloaded image file
    Thumb {
        #[arg(value_name = "IMAGE", help = "Path of the stored image file")]
        image: String,

        #[arg(
            short = 'c',
            long = "config",
            value_name = "FILE",
            help = "Sets a custom config file"
        )]
        config: Option<String>,

        #[arg(
            long = "thumb-dir",
            value_name = "DIR",
            help = "Overrides the thumbnail directory, relative to the image"
        )]
        thumb_dir: Option<String>,

        #[arg(
            short = 'w',
            long = "width",
            value_name = "PX",
            help = "Overrides the thumbnail target width in pixels"
        )]
        width: Option<u32>,
    },
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    let command = match cli.command {
        CliCommand::Fetch {
            config,
            content_dir,
            thumb_dir,
            width,
            no_overwrite,
        } => Command::Fetch {
            config_path: config,
            content_dir,
            thumb_dir,
            width,
            no_overwrite,
        },
        CliCommand::Thumb {
            image,
            config,
            thumb_dir,
            width,
        } => Command::Thumb {
            config_path: config,
            image,
            thumb_dir,
            width,
        },
    };

    Args { command, log_level }
}
