use std::collections::HashMap;
use std::sync::Arc;

use amawal_core::{SearchOutcome, SessionState, SkipReason};
use amawal_types::{AppEvent, Source};
use kanal::AsyncSender;

use crate::state::AppState;

pub async fn handle_search(
    state: Arc<AppState>,
    term: String,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::debug!("Search requested: '{}'", term);
    let outcome = state.session.search(&term).await;
    show_outcome(&state, outcome, &app_to_ui_tx).await
}

pub async fn handle_random(
    state: Arc<AppState>,
    source: Option<Source>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let outcome = state.session.random_entry(source).await;
    show_outcome(&state, outcome, &app_to_ui_tx).await
}

pub async fn handle_filter_change(
    state: Arc<AppState>,
    source: Source,
    enabled: bool,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    state.session.set_source_enabled(source, enabled).await;

    let active = state.session.filters().await.active();
    app_to_ui_tx
        .send(AppEvent::Display(format!(
            "Active sources: {}",
            source_list(&active)
        )))
        .await?;

    if let Some(outcome) = state.session.on_source_filter_change().await {
        show_outcome(&state, outcome, &app_to_ui_tx).await?;
    }

    Ok(())
}

pub async fn handle_clear(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    state.session.clear_search().await;
    app_to_ui_tx
        .send(AppEvent::Display(state.session.results_summary().await))
        .await?;
    Ok(())
}

/// Open the detail view for result `index` (1-based), or close it
pub async fn handle_selection(
    state: Arc<AppState>,
    index: Option<usize>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(index) = index else {
        state.session.close_detail_view().await;
        return Ok(());
    };

    let results = state.session.results().await;
    let text = match index.checked_sub(1).and_then(|i| results.get(i)) {
        Some(result) => {
            state.session.select_result(result.clone()).await;
            let favorited = state.session.is_favorited(&result.global_id).await;

            let mut lines = vec![
                format!("{} - {}", result.word, result.translation),
                format!("  type:   {}", result.entry_type),
                format!("  source: {}", result.source_display_name),
                format!("  match:  {}", result.match_type.description()),
            ];
            if let Some(highlighted) = &result.highlighted_text {
                lines.push(format!("  text:   {}", highlighted));
            }
            if favorited {
                lines.push("  ★ in your favorites".to_string());
            }
            lines.join("\n")
        }
        None => format!("No result #{}", index),
    };

    app_to_ui_tx.send(AppEvent::Display(text)).await?;
    Ok(())
}

async fn show_outcome(
    state: &AppState,
    outcome: SearchOutcome,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let text = match outcome {
        SearchOutcome::Superseded => return Ok(()),
        SearchOutcome::Skipped(SkipReason::NoActiveSources) => {
            "Select at least one source first".to_string()
        }
        SearchOutcome::Skipped(SkipReason::InvalidLimit) => {
            "Result limit must be positive".to_string()
        }
        SearchOutcome::Skipped(SkipReason::BlankTerm) | SearchOutcome::Completed(_) => {
            let snapshot = state.session.state().await;
            let favorites = state.session.favorites().snapshot().await;
            let summary = state.session.results_summary().await;
            render_results(&summary, &snapshot, &favorites)
        }
    };

    app_to_ui_tx.send(AppEvent::Display(text)).await?;
    Ok(())
}

pub(crate) fn render_results(
    summary: &str,
    state: &SessionState,
    favorites: &HashMap<String, bool>,
) -> String {
    let mut lines = vec![summary.to_string()];

    for (i, result) in state.results.iter().enumerate() {
        let star = if favorites.get(&result.global_id).copied().unwrap_or(false) {
            "★"
        } else {
            " "
        };
        lines.push(format!(
            "{:>3}. {} {} - {} ({}) [{}]",
            i + 1,
            star,
            result.word,
            result.translation,
            result.entry_type,
            result.source_display_name
        ));
    }

    lines.join("\n")
}

pub(crate) fn source_list(sources: &[Source]) -> String {
    if sources.is_empty() {
        return "none".to_string();
    }

    sources
        .iter()
        .map(Source::display_name)
        .collect::<Vec<_>>()
        .join(", ")
}
