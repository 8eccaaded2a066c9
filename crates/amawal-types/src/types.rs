use crate::source::Source;

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    /// Authentication state pushed by the external auth service
    AuthChanged(bool),
    /// Text for the terminal front-end to print
    Display(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Search(String),
    Random(Option<Source>),
    Clear,
    SelectResult(usize),
    CloseDetail,
    ToggleFavorite(usize),
    SetFilter { source: Source, enabled: bool },
    ShowStatistics,
    ShowStatus,
}
