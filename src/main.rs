use clap::Parser;
use polymap::cli::{self, Cli};
use polymap::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;
    tracing::debug!("polymap {} (built {})", polymap::VERSION, polymap::BUILD_DATE);

    cli::run(cli)
}
