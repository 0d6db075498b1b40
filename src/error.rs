use thiserror::Error;

/// Reasons the stock record could not be read from the page.
#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    /// A required element (holder or chart surface) is not on the page.
    #[error("element `{0}` not found on page")]
    MissingContainer(String),

    /// The payload attribute is absent or is not a stock record.
    #[error("malformed stock payload: {0}")]
    MalformedPayload(String),

    /// The record parsed but lacks a required series.
    #[error("stock data incomplete: missing `{0}`")]
    IncompleteData(&'static str),
}

/// Errors raised by a charting engine while binding a chart.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("surface `{0}` already has a chart bound to it")]
    SurfaceInUse(String),
}

/// Any failure of a chart initialization pass.
#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
