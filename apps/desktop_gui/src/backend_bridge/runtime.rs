//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{ConsoleState, UserDirectory, UserFormController};
use crossbeam_channel::{Receiver, SendError, Sender, TrySendError};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    directory: Arc<dyn UserDirectory>,
    repaint: egui::Context,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                repaint.request_repaint();
                return;
            }
        };

        let observer_tx = ui_tx.clone();
        let controller =
            UserFormController::new(directory).with_observer(move |state: &ConsoleState| {
                forward_state(&observer_tx, state);
                repaint.request_repaint();
            });

        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
        runtime.block_on(run_worker(controller, cmd_rx));
        tracing::info!("backend worker stopped");
    });
}

/// In-flight snapshots may be dropped under backpressure; a settled one
/// (`loading == false`) waits for room, or the form would stay disabled.
fn forward_state(ui_tx: &Sender<UiEvent>, state: &ConsoleState) {
    let event = UiEvent::StateChanged(Box::new(state.clone()));
    let sent = if state.loading {
        ui_tx.try_send(event)
    } else {
        ui_tx
            .send(event)
            .map_err(|SendError(event)| TrySendError::Disconnected(event))
    };
    match sent {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            tracing::warn!("ui event queue is full; dropping in-flight state snapshot");
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui event queue closed; state snapshot not delivered");
        }
    }
}

/// Loads the list once, then runs queued commands in order until the UI hangs up.
pub async fn run_worker(mut controller: UserFormController, cmd_rx: Receiver<BackendCommand>) {
    controller.list().await;

    while let Ok(cmd) = cmd_rx.recv() {
        tracing::debug!(command = cmd.name(), "processing ui command");
        match cmd {
            BackendCommand::Refresh => {
                controller.list().await;
            }
            BackendCommand::Submit { draft } => {
                controller.submit(draft).await;
            }
            BackendCommand::Delete { id } => {
                controller.delete(id).await;
            }
            BackendCommand::BeginEdit { record } => controller.begin_edit(&record),
            BackendCommand::CancelEdit => controller.cancel_edit(),
            BackendCommand::DismissError => controller.dismiss_error(),
        }
    }
}
