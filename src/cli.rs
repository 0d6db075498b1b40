use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file to use instead of the one in the config directory.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw the price and volume charts of a page snapshot in the terminal.
    Show {
        /// Page snapshot (JSON); falls back to the configured page.
        page: Option<PathBuf>,
    },

    /// Print the chart configurations built from a page snapshot.
    Dump {
        page: Option<PathBuf>,
    },

    /// Fetch a quote from the mock feed.
    Quote {
        symbol: String,

        /// Simulated latency in milliseconds.
        #[arg(long, default_value_t = 500)]
        latency_ms: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands() {
        let cli = Cli::parse_from(["stock-chart", "dump", "page.json"]);
        assert!(matches!(cli.command, Commands::Dump { page: Some(p) } if p == PathBuf::from("page.json")));

        let cli = Cli::parse_from(["stock-chart", "quote", "AAPL", "--latency-ms", "0", "--settings", "s.json"]);
        assert_eq!(cli.settings, Some(PathBuf::from("s.json")));
        assert!(matches!(cli.command, Commands::Quote { ref symbol, latency_ms: 0 } if symbol == "AAPL"));
    }

    #[test]
    fn verifies_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
