//! Standalone application wrapper and entry point.
//!
//! [`ChartApp`] wraps a [`ChartPanel`] and implements [`eframe::App`] so the
//! chart can run in its own native window; [`run_chart`] is the blocking
//! entry point that opens the window and enters the event loop.

use eframe::egui;

use crate::chart::ChartPanel;
use crate::config::ChartConfig;

/// Standalone chart application.
pub struct ChartApp {
    panel: ChartPanel,
}

impl ChartApp {
    pub fn new(series: Vec<f64>, config: ChartConfig) -> Self {
        Self {
            panel: ChartPanel::with_config(series, config),
        }
    }

    pub fn panel(&self) -> &ChartPanel {
        &self.panel
    }
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.panel.ui(ui);
        });
    }
}

/// Launch the chart in a native window. Blocks until the window closes.
pub fn run_chart(series: Vec<f64>, mut config: ChartConfig) -> eframe::Result<()> {
    let title = config.title.clone();
    let mut opts = config
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts.viewport.clone().with_inner_size(egui::vec2(960.0, 560.0));
    }

    eframe::run_native(
        &title,
        opts,
        Box::new(move |_cc| Ok(Box::new(ChartApp::new(series, config)))),
    )
}
