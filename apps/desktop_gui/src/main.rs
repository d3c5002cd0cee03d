use anyhow::anyhow;
use clap::Parser;
use client_core::{config::load_settings, ClientSettings};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::{commands::BackendCommand, runtime::spawn_backend_thread};
use controller::events::UiEvent;
use ui::StorefrontApp;

#[derive(Parser, Debug)]
#[command(name = "storefront-gui", about = "Dessert storefront window")]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    catalog_url: Option<String>,
    #[arg(long)]
    order_url: Option<String>,
}

fn resolve_settings(args: &Args) -> anyhow::Result<ClientSettings> {
    let mut settings = load_settings()?;
    if let Some(url) = &args.server_url {
        settings.set_server_url(url)?;
    }
    if let Some(url) = &args.catalog_url {
        settings.set_catalog_url(url)?;
    }
    if let Some(url) = &args.order_url {
        settings.set_order_url(url)?;
    }
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();
    let settings = resolve_settings(&args)?;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    spawn_backend_thread(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Dessert Storefront")
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Dessert Storefront",
        options,
        Box::new(|_cc| Ok(Box::new(StorefrontApp::new(cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow!("storefront window failed: {err}"))
}
