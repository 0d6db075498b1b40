//! Price and volume charts for a stock detail page.
//!
//! A page carries the stock record as JSON in an attribute of a holder
//! element. [`initialize_charts`] reads it, validates it, and binds a price
//! line chart and a volume bar chart to the page's two chart surfaces through
//! a [`ChartEngine`].

pub mod chart;
pub mod cli;
pub mod engine;
pub mod error;
pub mod feed;
pub mod format;
pub mod page;
pub mod pipeline;
pub mod render;
pub mod series;
pub mod settings;
pub mod tui;

pub use engine::{ChartEngine, ChartHandle, RecordingEngine};
pub use error::{EngineError, ExtractError, PipelineError};
pub use page::{Element, Page, PageLayout, StaticPage};
pub use pipeline::{initialize_charts, try_initialize, Charts};
pub use series::{extract, StockSeries};
pub use tui::TerminalEngine;
