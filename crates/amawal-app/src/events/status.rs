use std::sync::Arc;

use amawal_types::AppEvent;
use kanal::AsyncSender;

use super::search::source_list;
use crate::state::AppState;

pub async fn handle_statistics(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let cache = state.session.statistics();

    let text = match cache.statistics().await {
        Some(statistics) => {
            let mut lines = vec![format!(
                "{} dictionary entries in {}",
                cache.total_dictionary_entries().await,
                cache.dictionary_sources_only().await.join(", ")
            )];

            for (source, count) in statistics.entries_by_source.iter() {
                lines.push(format!("  {:<12} {}", source, count));
            }

            for (source, types) in cache.available_types().await {
                lines.push(format!("  {} types: {}", source, types.join(", ")));
            }

            lines.join("\n")
        }
        None => "Statistics unavailable".to_string(),
    };

    app_to_ui_tx.send(AppEvent::Display(text)).await?;
    Ok(())
}

pub async fn handle_status(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let snapshot = state.session.state().await;
    let api = state.config.read().await.gateway.base_url.clone();

    let text = [
        format!("session:  {}", state.session.id()),
        format!("backend:  {}", api),
        format!(
            "auth:     {}",
            if state.session.is_authenticated() {
                "logged in"
            } else {
                "anonymous"
            }
        ),
        format!("sources:  {}", source_list(&snapshot.filters.active())),
        format!("phase:    {:?}", snapshot.phase),
        state.session.results_summary().await,
    ]
    .join("\n");

    app_to_ui_tx.send(AppEvent::Display(text)).await?;
    Ok(())
}
