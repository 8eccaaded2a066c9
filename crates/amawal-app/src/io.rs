use std::io::BufRead;

use amawal_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

use crate::command::{HELP, parse_command};

/// Reads commands from stdin and forwards them to the event loop
pub async fn watcher_io(
    event_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let lines = spawn_stdin_reader();

    if atty::is(atty::Stream::Stdin) {
        app_to_ui_tx.send(AppEvent::Display(HELP.to_string())).await?;
    }

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.recv() => line.ok(),
        };

        // End of input behaves like quit
        let Some(line) = line else {
            event_tx.send(AppEvent::Quit).await?;
            break;
        };

        match parse_command(&line) {
            Ok(Some(event)) => {
                let quit = matches!(event, AppEvent::Quit);
                event_tx.send(event).await?;
                if quit {
                    break;
                }
            }
            Ok(None) if line.trim().eq_ignore_ascii_case("help") || line.trim() == "?" => {
                app_to_ui_tx.send(AppEvent::Display(HELP.to_string())).await?;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::debug!("Rejected input '{}': {}", line, e);
                app_to_ui_tx.send(AppEvent::Display(format!("{e:#}"))).await?;
            }
        }
    }

    Ok(())
}

/// Blocking stdin reads live on their own thread so shutdown never waits on
/// a pending line. The channel closes at end of input.
fn spawn_stdin_reader() -> AsyncReceiver<String> {
    let (tx, rx) = kanal::bounded::<String>(16);

    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });

    rx.to_async()
}
