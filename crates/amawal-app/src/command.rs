use amawal_types::{AppEvent, Source, UiEvent};
use anyhow::{Context, bail};

pub const HELP: &str = "\
Commands:
  search <term>            search the active sources
  random [source]          show a random entry
  clear                    clear the current search
  select <n> | close       open or close the detail view of result n
  fav <n>                  toggle result n in your favorites
  filter <source> on|off   enable or disable a source
  stats                    dictionary statistics
  status                   session status
  login | logout           update the authentication state
  help | quit";

/// Turn one input line into an event. Blank lines and `help` yield `None`.
pub fn parse_command(line: &str) -> anyhow::Result<Option<AppEvent>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let event = match command.to_lowercase().as_str() {
        "search" | "s" => AppEvent::UiEvent(UiEvent::Search(rest.to_string())),
        "random" | "r" => {
            let source = if rest.is_empty() {
                None
            } else {
                Some(parse_source(rest)?)
            };
            AppEvent::UiEvent(UiEvent::Random(source))
        }
        "clear" => AppEvent::UiEvent(UiEvent::Clear),
        "select" => AppEvent::UiEvent(UiEvent::SelectResult(parse_index(rest)?)),
        "close" => AppEvent::UiEvent(UiEvent::CloseDetail),
        "fav" | "favorite" => AppEvent::UiEvent(UiEvent::ToggleFavorite(parse_index(rest)?)),
        "filter" => {
            let Some((source, flag)) = rest.rsplit_once(char::is_whitespace) else {
                bail!("usage: filter <source> on|off");
            };
            let enabled = match flag.to_lowercase().as_str() {
                "on" | "true" | "1" => true,
                "off" | "false" | "0" => false,
                other => bail!("expected on or off, got '{}'", other),
            };
            AppEvent::UiEvent(UiEvent::SetFilter {
                source: parse_source(source)?,
                enabled,
            })
        }
        "stats" => AppEvent::UiEvent(UiEvent::ShowStatistics),
        "status" => AppEvent::UiEvent(UiEvent::ShowStatus),
        "login" => AppEvent::AuthChanged(true),
        "logout" => AppEvent::AuthChanged(false),
        "quit" | "exit" | "q" => AppEvent::Quit,
        "help" | "?" => return Ok(None),
        other => bail!("unknown command '{}', type help", other),
    };

    Ok(Some(event))
}

fn parse_source(text: &str) -> anyhow::Result<Source> {
    text.parse::<Source>()
        .with_context(|| format!("expected one of {:?}", Source::ALL))
}

fn parse_index(text: &str) -> anyhow::Result<usize> {
    let index: usize = text
        .parse()
        .with_context(|| format!("expected a result number, got '{}'", text))?;
    if index == 0 {
        bail!("result numbers start at 1");
    }
    Ok(index)
}
