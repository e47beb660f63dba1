use super::parse_ids;
use anyhow::Result;
use clap::{Args, Subcommand};
use tcg_gateway::Gateway;
use tracing::info;

#[derive(Args, Debug)]
pub struct CatalogCommand {
  #[command(subcommand)]
  command: CatalogSubcommands,
}

#[derive(Subcommand, Debug)]
enum CatalogSubcommands {
  /// List all catalog categories
  Categories,

  /// List all groups (sets) in a category
  Groups {
    /// Category id
    category_id: i64,
  },

  /// Search products by name
  Search {
    /// Product name to search for
    name: String,

    /// Restrict to a category
    #[arg(short, long)]
    category: Option<i64>,

    /// Restrict to a group
    #[arg(short, long)]
    group: Option<i64>,

    /// Limit results
    #[arg(short, long, default_value = "20")]
    limit: usize,
  },

  /// Fetch product details by id
  Details {
    /// Comma-separated product ids
    ids: String,
  },

  /// Fetch SKUs for products
  Skus {
    /// Comma-separated product ids
    ids: String,
  },
}

pub async fn execute(cmd: CatalogCommand, gateway: Gateway) -> Result<()> {
  match cmd.command {
    CatalogSubcommands::Categories => {
      let set = gateway.get_categories().await?;
      if set.truncated {
        info!("Category listing hit the pagination cap; output is partial");
      }
      print_records(&set.items)?;
    }
    CatalogSubcommands::Groups { category_id } => {
      let set = gateway.get_all_groups(category_id).await?;
      if set.truncated {
        info!("Group listing hit the pagination cap; output is partial");
      }
      print_records(&set.items)?;
    }
    CatalogSubcommands::Search { name, category, group, limit } => {
      let hits = gateway.search_products(&name, category, group, limit, 0).await?;
      print_records(&hits)?;
    }
    CatalogSubcommands::Details { ids } => {
      let details = gateway.get_product_details(&parse_ids(&ids)?).await?;
      print_records(&details)?;
    }
    CatalogSubcommands::Skus { ids } => {
      let skus = gateway.get_skus(&parse_ids(&ids)?).await?;
      print_records(&skus)?;
    }
  }
  Ok(())
}

fn print_records(records: &[serde_json::Value]) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(records)?);
  info!(count = records.len(), "Done");
  Ok(())
}
