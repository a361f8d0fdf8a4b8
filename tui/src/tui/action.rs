use strum::Display;

#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Quit,
    ClearScreen,
    Error(String),
    /// Flip between bars and arcs.
    ToggleMode,
}
