use std::io::{self, Write};

use clap::Parser;
use color_eyre::Result;
use tracing::info;

use mailform::{
    app::{App, RunOutcome},
    cli::Cli,
    config::Config,
    errors, logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    errors::init()?;
    let args = Cli::parse();
    let config = Config::new(args.config.as_deref())?;
    let _guard = logging::init(&config.config.data_dir)?;
    info!("starting {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let app = App::new(&args, config)?;
    match app.run().await? {
        RunOutcome::Sent(message) => {
            let mut stdout = io::stdout().lock();
            args.output.write(&mut stdout, &message)?;
            stdout.flush()?;
        }
        RunOutcome::Quit => info!("quit without sending"),
    }
    Ok(())
}
