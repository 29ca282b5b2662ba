//! Standalone binary: fetch the series from the local endpoint and run the
//! chart. Requires the `fetch` feature.

use std::process::ExitCode;

use plotmark::data::bindings::DrawBindings;
use plotmark::{run_chart, ChartConfig};

fn main() -> ExitCode {
    env_logger::init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| plotmark::source::DEFAULT_ENDPOINT.to_string());

    let series = match plotmark::source::fetch_series(&url) {
        Ok(s) => s,
        Err(e) => {
            log::error!("failed to fetch series from {}: {}", url, e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("fetched {} samples from {}", series.len(), url);

    let mut config = ChartConfig::default();
    match DrawBindings::load_from_default_path() {
        Ok(b) => config.bindings = b,
        Err(e) => log::debug!("using default bindings: {}", e),
    }

    if let Err(e) = run_chart(series, config) {
        log::error!("ui error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
