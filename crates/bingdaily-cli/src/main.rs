use bingdaily_lib::cli::{ResolvedCommand, parse_args, resolve_command, run_fetch, run_thumb};
use bingdaily_lib::error::BingDailyError;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), BingDailyError> {
    color_eyre::install()?;

    let args = parse_args();
    let command = resolve_command(args.command)?;

    match command {
        ResolvedCommand::Fetch(params) => run_fetch(params).await?,
        ResolvedCommand::Thumb(params) => run_thumb(params).await?,
    }

    Ok(())
}
