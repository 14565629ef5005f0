mod commands;

use clap::{Parser, Subcommand};

use vitrine_core::PriceFilter;

#[derive(Debug, Parser)]
#[command(name = "vitrine-cli")]
#[command(about = "Vitrine storefront command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the catalog the way the search page does
    Search {
        /// Free-text query; empty matches the whole catalog
        query: Vec<String>,
        /// Price filter token (all, 0-50, 50-100, 100-200, 200+, price-asc, price-desc)
        #[arg(long, default_value = "all")]
        price: PriceFilter,
        /// Match the query against category labels instead of names
        #[arg(long)]
        category: bool,
        /// Order promotional products first
        #[arg(long)]
        promo: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// List the storefront categories
    Categories,
    /// List the featured products
    Featured,
    /// Image cache maintenance
    #[command(subcommand)]
    Images(ImagesCommand),
}

#[derive(Debug, Subcommand)]
enum ImagesCommand {
    /// Prefetch thumbnails for the featured products
    Warm,
    /// Delete expired cache entries
    Prune,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = vitrine_core::load_app_config_from_env()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            query,
            price,
            category,
            promo,
            page,
        } => commands::run_search(&config, &query.join(" "), price, category, promo, page).await,
        Commands::Categories => commands::run_categories(&config).await,
        Commands::Featured => commands::run_featured(&config).await,
        Commands::Images(ImagesCommand::Warm) => commands::run_images_warm(&config).await,
        Commands::Images(ImagesCommand::Prune) => commands::run_images_prune(&config),
    }
}
