use super::parse_ids;
use anyhow::Result;
use clap::{Args, Subcommand};
use tcg_gateway::Gateway;
use tcg_models::market_price;
use tracing::info;

#[derive(Args, Debug)]
pub struct PricingCommand {
  #[command(subcommand)]
  command: PricingSubcommands,
}

#[derive(Subcommand, Debug)]
enum PricingSubcommands {
  /// Fetch market prices for products
  Products {
    /// Comma-separated product ids
    ids: String,
  },

  /// Fetch market prices for SKUs
  Skus {
    /// Comma-separated SKU ids
    ids: String,
  },

  /// Refresh the local price cache for products
  Refresh {
    /// Comma-separated product ids
    ids: String,

    /// Category the products belong to
    #[arg(short, long)]
    category: i64,
  },
}

pub async fn execute(cmd: PricingCommand, gateway: Gateway) -> Result<()> {
  match cmd.command {
    PricingSubcommands::Products { ids } => {
      let records = gateway.get_product_prices(&parse_ids(&ids)?).await?;
      for record in &records {
        println!("{record}  (market: {:.2})", market_price(record));
      }
      info!(count = records.len(), "Done");
    }
    PricingSubcommands::Skus { ids } => {
      let records = gateway.get_sku_prices(&parse_ids(&ids)?).await?;
      println!("{}", serde_json::to_string_pretty(&records)?);
      info!(count = records.len(), "Done");
    }
    PricingSubcommands::Refresh { ids, category } => {
      let outcome = gateway.refresh_product_prices(&parse_ids(&ids)?, category).await?;
      println!("Refreshed {} of {} products", outcome.upserted, outcome.requested);
    }
  }
  Ok(())
}
