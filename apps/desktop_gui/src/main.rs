mod backend_bridge;
mod controller;
mod ui;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{load_settings, HttpUserDirectory, MissingUserDirectory, Settings, UserDirectory};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::ui::ConsoleApp;

#[derive(Parser, Debug)]
#[command(name = "user-console-gui", about = "Desktop console for a remote users collection")]
struct Args {
    /// API root; `/users` is appended. Overrides configuration.
    #[arg(long)]
    api_url: Option<String>,
    /// Settings file (defaults to ./console.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn resolve_directory(args: Args) -> (Arc<dyn UserDirectory>, String, Option<UiError>) {
    let settings = match load_settings(args.config.as_deref()) {
        Ok(mut settings) => {
            if let Some(api_url) = args.api_url {
                settings.api_url = api_url;
            }
            settings
        }
        Err(err) => {
            let message = format!("{err:#}");
            return (
                Arc::new(MissingUserDirectory::new(message.clone())),
                Settings::default().log_filter,
                Some(UiError::new(UiErrorContext::Configuration, message)),
            );
        }
    };

    match build_directory(&settings) {
        Ok(directory) => (Arc::new(directory), settings.log_filter, None),
        Err(err) => {
            let message = format!("{err:#}");
            (
                Arc::new(MissingUserDirectory::new(message.clone())),
                settings.log_filter,
                Some(UiError::new(UiErrorContext::Configuration, message)),
            )
        }
    }
}

fn build_directory(settings: &Settings) -> Result<HttpUserDirectory> {
    HttpUserDirectory::from_settings(settings)
        .with_context(|| format!("cannot use API root '{}'", settings.api_url))
}

fn main() -> eframe::Result<()> {
    let (directory, log_filter, startup_error) = resolve_directory(Args::parse());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    if let Some(err) = startup_error {
        tracing::error!("{}", err.message());
        let _ = ui_tx.try_send(UiEvent::Error(err));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("User Management")
            .with_inner_size([960.0, 680.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "User Management",
        options,
        Box::new(|cc| {
            backend_bridge::runtime::launch(cmd_rx, ui_tx, directory, cc.egui_ctx.clone());
            Ok(Box::new(ConsoleApp::new(cmd_tx, ui_rx)))
        }),
    )
}
