use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use package_builder::builder::{PricingResult, SelectionState};
use package_builder::catalog::{ServiceCategory, ServiceOption};

#[derive(Parser)]
#[command(name = "builder-cli")]
#[command(about = "Management CLI for the package builder service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, default_value = "admin-secret-key")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service status
    Status,
    /// Inspect the full catalog, hidden entries included
    Catalog,
    /// View sales and session analytics
    Analytics,
    /// List open builder sessions
    Sessions,
    /// Price a hypothetical package offline (one distinct service per price)
    Price {
        /// Monthly unit prices of the selected services
        #[arg(long, required = true, num_args = 1..)]
        price: Vec<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Commands::Price { price } = &cli.command {
        return price_offline(price);
    }

    let client = reqwest::Client::new();
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let path = match cli.command {
        Commands::Status => "/admin/status",
        Commands::Catalog => "/admin/catalog",
        Commands::Analytics => "/admin/analytics",
        Commands::Sessions => "/admin/sessions",
        Commands::Price { .. } => unreachable!(),
    };

    let res = client
        .get(format!("{}{}", cli.url, path))
        .headers(headers)
        .send()
        .await?;
    print_response(res).await
}

/// Compute a quote locally, without a running service.
fn price_offline(prices: &[f64]) -> Result<(), Box<dyn std::error::Error>> {
    let mut selection = SelectionState::new();
    for (i, price) in prices.iter().enumerate() {
        selection.toggle(&ServiceOption {
            id: format!("svc-{}", i + 1),
            name: format!("Service {}", i + 1),
            category: ServiceCategory::Branding,
            monthly_price: *price,
            description: None,
            image_url: None,
            visible: true,
        });
    }

    let pricing = PricingResult::compute(&selection);
    println!("{}", serde_json::to_string_pretty(&pricing)?);
    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
