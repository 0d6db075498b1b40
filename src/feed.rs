use chrono::{DateTime, Local};
use rand::Rng;
use serde::Serialize;
use std::time::Duration;

/// Latest-quote snapshot for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    /// Percent change on the day
    pub change: f64,
    pub volume: f64,
    pub market_cap: String,
    pub pe_ratio: f64,
    pub fetched_at: DateTime<Local>,
}

/// Stand-in quote source that fabricates values around fixed anchors.
#[derive(Debug, Clone)]
pub struct MockFeed {
    latency: Duration,
}

impl Default for MockFeed {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(500),
        }
    }
}

impl MockFeed {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub async fn fetch(&self, symbol: &str) -> Quote {
        tokio::time::sleep(self.latency).await;

        let mut rng = rand::rng();
        Quote {
            symbol: symbol.to_string(),
            name: format!("{symbol} 公司"),
            price: 120.45 + rng.random_range(-5.0..5.0),
            change: 2.3 + rng.random_range(-1.0..1.0),
            volume: 3_245_678.0 + rng.random_range(-500_000.0..500_000.0),
            market_cap: "1.2T".to_string(),
            pe_ratio: 22.5 + rng.random_range(-2.5..2.5),
            fetched_at: Local::now(),
        }
    }
}
