use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod commands;
use commands::{catalog::CatalogCommand, pricing::PricingCommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "tcg-cli")]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Verbose output
  #[arg(short, long, global = true)]
  verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Browse the provider catalog
  Catalog(CatalogCommand),
  /// Fetch or refresh market prices
  Pricing(PricingCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
  dotenv().ok();

  let cli = Cli::parse();

  let log_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt().with_env_filter(log_level).init();

  let config = tcg_core::Config::from_env()?;
  let gateway = commands::build_gateway(&config)?;

  match cli.command {
    Commands::Catalog(cmd) => commands::catalog::execute(cmd, gateway).await?,
    Commands::Pricing(cmd) => commands::pricing::execute(cmd, gateway).await?,
  }

  Ok(())
}
