use anyhow::Result;
use clap::{Parser, Subcommand};
use deal_search::config::AppConfig;
use deal_search::search_clients::elasticsearch::ElasticsearchDealIndex;
use deal_search::{Deal, DealService};
use log::info;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "deal_search", about = "Index, update and search deals in Elasticsearch")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Index the three sample deals
    Seed,
    Create {
        id: String,
        title: String,
        value: i64,
    },
    Update {
        id: String,
        title: String,
        value: i64,
    },
    Get {
        id: String,
    },
    /// Deals whose value is at least THRESHOLD
    MinValue {
        #[arg(allow_negative_numbers = true)]
        threshold: i64,
    },
    /// Free-text search, passed to the engine's query-string parser
    Search {
        text: String,
    },
}

fn sample_deals() -> Vec<Deal> {
    vec![
        Deal::new("1", "Microsoft buys amazon", 20),
        Deal::new("2", "Amazon buys apple", 200),
        Deal::new("3", "CJ buys Microsoft", 5),
    ]
}

fn print_deals(deals: &[Deal]) {
    for deal in deals {
        println!("{}\t{}\t{}", deal.id(), deal.title(), deal.value());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::new()?;

    env_logger::Builder::new()
        .filter_level(config.log_level.parse().unwrap_or(log::LevelFilter::Info))
        .init();

    info!("Starting deal_search against {}", config.elasticsearch_url);

    let index = Arc::new(ElasticsearchDealIndex::new(&config)?);
    let service = DealService::new(index);

    match cli.command {
        Some(Command::Seed) => {
            service.ensure_index_exists().await?;
            for deal in sample_deals() {
                service.create(&deal).await?;
                info!("Indexed deal {}", deal.id());
            }
        }
        Some(Command::Create { id, title, value }) => {
            service.ensure_index_exists().await?;
            service.create(&Deal::new(id, title, value)).await?;
        }
        Some(Command::Update { id, title, value }) => {
            service.update(&Deal::new(id, title, value)).await?;
        }
        Some(Command::Get { id }) => match service.get(&id).await? {
            Some(deal) => print_deals(&[deal]),
            None => println!("deal {} not found", id),
        },
        Some(Command::MinValue { threshold }) => {
            print_deals(&service.search_by_minimum_value(threshold).await?);
        }
        Some(Command::Search { text }) => {
            print_deals(&service.search_by_free_text(&text).await?);
        }
        None => {
            print_deals(&service.search_by_free_text("apple").await?);
            print_deals(&service.search_by_minimum_value(220).await?);
        }
    }

    info!("deal_search finished");

    Ok(())
}
