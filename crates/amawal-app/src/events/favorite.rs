use std::sync::Arc;

use amawal_core::ToggleOutcome;
use amawal_types::AppEvent;
use kanal::AsyncSender;

use crate::state::AppState;

pub async fn handle_favorite_toggle(
    state: Arc<AppState>,
    index: usize,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let results = state.session.results().await;
    let Some(result) = index.checked_sub(1).and_then(|i| results.get(i)) else {
        app_to_ui_tx
            .send(AppEvent::Display(format!("No result #{}", index)))
            .await?;
        return Ok(());
    };

    let text = match state.session.toggle_favorite(result).await {
        ToggleOutcome::Unauthenticated => "Log in to save favorites".to_string(),
        ToggleOutcome::Added => format!("★ {} added to favorites", result.word),
        ToggleOutcome::Removed => format!("{} removed from favorites", result.word),
        ToggleOutcome::Unchanged => format!("{} was not in your favorites", result.word),
        ToggleOutcome::Failed => format!("Could not update favorites for {}", result.word),
    };

    app_to_ui_tx.send(AppEvent::Display(text)).await?;
    Ok(())
}
