//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{
    CatalogService, ClientSettings, OrderService, StorefrontClient, SubmissionOutcome,
};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Starts the worker thread. Every command runs as its own task, so a slow
/// order never holds up another request and nothing is deduplicated.
pub fn spawn_backend_thread(
    settings: ClientSettings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let client = Arc::new(StorefrontClient::new(settings));
        tracing::info!(
            catalog_url = %client.settings().catalog_url,
            order_url = %client.settings().order_url,
            "backend worker ready"
        );

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let client = Arc::clone(&client);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = run_command(client.as_ref(), cmd).await;
                    if ui_tx.try_send(event).is_err() {
                        tracing::warn!("ui event queue unavailable; dropping backend result");
                    }
                });
            }
            tracing::debug!("command queue closed; backend worker exiting");
        });
    });
}

pub(crate) async fn run_command<S>(services: &S, cmd: BackendCommand) -> UiEvent
where
    S: CatalogService + OrderService,
{
    match cmd {
        BackendCommand::LoadCatalog => UiEvent::CatalogLoaded(services.fetch_catalog().await),
        BackendCommand::SubmitOrder { request } => {
            UiEvent::OrderSettled(SubmissionOutcome::from(services.submit_order(&request).await))
        }
    }
}
