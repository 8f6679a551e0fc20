use clap::Parser;
use tracing_subscriber::EnvFilter;

use batlog::cli::Cli;
use batlog::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    batlog::run(cli, config, &mut stdout).await?;
    Ok(())
}
