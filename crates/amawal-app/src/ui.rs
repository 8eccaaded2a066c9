use amawal_types::AppEvent;
use kanal::AsyncReceiver;

/// Prints everything the event loop wants shown, until `Quit`
pub async fn ui_loop(app_to_ui_rx: AsyncReceiver<AppEvent>) -> anyhow::Result<()> {
    while let Ok(event) = app_to_ui_rx.recv().await {
        match event {
            AppEvent::Display(text) => println!("{}", text),
            AppEvent::Quit => break,
            _ => {}
        }
    }

    Ok(())
}
