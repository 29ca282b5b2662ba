//! Series input: a one-shot fetch of the numeric series from a local endpoint.
//!
//! The chart treats its data as an external precondition: one blocking GET
//! returning a JSON array of numbers, fetched before the chart mounts. No
//! retry, no pagination; any failure is fatal at startup and the chart is
//! never rendered with a partial series.

use thiserror::Error;

/// Endpoint the standalone binary fetches from when none is given.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/data";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("reading series payload failed: {0}")]
    Read(#[from] std::io::Error),
    #[error("series payload is not a JSON number array: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("series payload is empty")]
    Empty,
}

/// Fetch the series from `url`.
///
/// Blocks until the response arrives; returns every sample in order.
pub fn fetch_series(url: &str) -> Result<Vec<f64>, SourceError> {
    let response = ureq::get(url).call().map_err(|e| SourceError::Request {
        url: url.to_string(),
        source: Box::new(e),
    })?;
    let body = response.into_string()?;
    let series: Vec<f64> = serde_json::from_str(&body)?;
    if series.is_empty() {
        return Err(SourceError::Empty);
    }
    Ok(series)
}
