mod action;
mod app;
mod components;
mod layout;
mod mode;
mod readout;
mod theme;
#[allow(clippy::module_inception)]
mod tui;
mod widgets;

pub(crate) use action::Action;
pub use app::App;
use components::Component;
use theme::Theme;
use tui::Event;
pub(crate) use tui::restore;
pub use tui::Tui;
