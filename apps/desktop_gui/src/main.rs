use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use backend_bridge::commands::BackendCommand;
use clap::Parser;
use client_core::{config::load_settings, HttpEmailGenerator};
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;
use ui::DesktopGuiApp;

#[derive(Parser, Debug)]
#[command(name = "emailme", about = "Generate emails from a short context")]
struct Args {
    /// Generation endpoint, overriding emailme.toml and the environment.
    #[arg(long)]
    endpoint: Option<String>,
    /// Request timeout in seconds; 0 waits indefinitely.
    #[arg(long)]
    request_timeout_secs: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(secs) = args.request_timeout_secs {
        settings.request_timeout_secs = Some(secs);
    }

    let generator = HttpEmailGenerator::from_settings(&settings)
        .context("failed to configure generation client")?;
    tracing::info!(endpoint = %generator.endpoint(), "starting desktop client");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, Arc::new(generator));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("EmailMe!")
            .with_inner_size([640.0, 720.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "EmailMe!",
        options,
        Box::new(|cc| {
            ui::theme::apply(&cc.egui_ctx);
            Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("desktop window failed: {err}"))
}

#[cfg(test)]
#[path = "tests/flow_tests.rs"]
mod flow_tests;
