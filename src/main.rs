use anyhow::Result;
use clap::Parser;
use serde_json::json;
use std::time::Duration;

use stock_chart::{
    cli::{Cli, Commands},
    feed::MockFeed,
    format::{format_number, format_percent},
    initialize_charts,
    settings::Settings,
    RecordingEngine, StaticPage, TerminalEngine,
};

fn preprocess() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    preprocess();

    let cli = Cli::parse();
    log::debug!("command line: {cli:?}");

    let settings = match &cli.settings {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    match cli.command {
        Commands::Show { page } => {
            let page = StaticPage::load(&settings.page_path(page)?)?;
            let mut engine = TerminalEngine::new();
            initialize_charts(&page, &mut engine, &settings.layout);
            engine.show()?;
        }

        Commands::Dump { page } => {
            let page = StaticPage::load(&settings.page_path(page)?)?;
            let mut engine = RecordingEngine::new();
            if initialize_charts(&page, &mut engine, &settings.layout).is_none() {
                eprintln!("No charts rendered");
            }
            let charts: Vec<_> = engine
                .charts()
                .iter()
                .map(|c| json!({ "surface": c.surface, "config": c.config }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&charts)?);
        }

        Commands::Quote { symbol, latency_ms } => {
            let quote = MockFeed::new(Duration::from_millis(latency_ms))
                .fetch(&symbol)
                .await;
            println!("{} ({})", quote.name, quote.symbol);
            println!("  Price:      {:.2}", quote.price);
            println!("  Change:     {}", format_percent(quote.change));
            println!("  Volume:     {}", format_number(quote.volume.round()));
            println!("  Market cap: {}", quote.market_cap);
            println!("  P/E:        {:.2}", quote.pe_ratio);
            println!("  As of:      {}", quote.fetched_at.format("%Y-%m-%d %H:%M:%S"));
        }
    }

    Ok(())
}
