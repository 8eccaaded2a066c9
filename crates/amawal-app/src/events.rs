use std::sync::Arc;

use amawal_types::{AppEvent, UiEvent};
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod favorite;
pub mod search;
pub mod status;

use favorite::handle_favorite_toggle;
use search::{handle_clear, handle_filter_change, handle_random, handle_search, handle_selection};
use status::{handle_statistics, handle_status};

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );

        if matches!(event, AppEvent::Quit) {
            app_to_ui_tx.send(AppEvent::Quit).await?;
            break;
        }

        handle_events(state.clone(), &app_to_ui_tx, event).await?;
    }

    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}

/// Dispatch one event. Anything that talks to the backend runs in its own
/// task so the loop keeps accepting input.
async fn handle_events(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    let tx = app_to_ui_tx.clone();

    match event {
        AppEvent::UiEvent(UiEvent::Search(term)) => {
            tokio::spawn(report(handle_search(state, term, tx)));
        }
        AppEvent::UiEvent(UiEvent::Random(source)) => {
            tokio::spawn(report(handle_random(state, source, tx)));
        }
        AppEvent::UiEvent(UiEvent::SetFilter { source, enabled }) => {
            tokio::spawn(report(handle_filter_change(state, source, enabled, tx)));
        }
        AppEvent::UiEvent(UiEvent::ToggleFavorite(index)) => {
            tokio::spawn(report(handle_favorite_toggle(state, index, tx)));
        }
        AppEvent::UiEvent(UiEvent::Clear) => {
            handle_clear(state, &tx).await?;
        }
        AppEvent::UiEvent(UiEvent::SelectResult(index)) => {
            handle_selection(state, Some(index), &tx).await?;
        }
        AppEvent::UiEvent(UiEvent::CloseDetail) => {
            handle_selection(state, None, &tx).await?;
        }
        AppEvent::UiEvent(UiEvent::ShowStatistics) => {
            handle_statistics(state, &tx).await?;
        }
        AppEvent::UiEvent(UiEvent::ShowStatus) => {
            handle_status(state, &tx).await?;
        }
        AppEvent::AuthChanged(authenticated) => {
            // The session listens to the auth stream itself
            state.auth.set(authenticated);
            let text = if authenticated {
                "Logged in"
            } else {
                "Logged out"
            };
            tx.send(AppEvent::Display(text.to_string())).await?;
        }
        AppEvent::Display(_) | AppEvent::Quit => {
            // UI-only events, ignore in backend
        }
    }

    Ok(())
}

async fn report(task: impl Future<Output = anyhow::Result<()>>) {
    if let Err(e) = task.await {
        tracing::error!("event handler failed: {e}");
    }
}
