use std::sync::{
    atomic::{
        AtomicBool,
        Ordering,
    },
    Arc,
};
use strum::Display;

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum DisplayMode {
    Bars,
    Arcs,
}

impl DisplayMode {
    fn from_bars(use_bars: bool) -> Self {
        if use_bars {
            Self::Bars
        } else {
            Self::Arcs
        }
    }
}

/// The active [`DisplayMode`], shared between the input path that flips it and the render pass that reads it.
///
/// A single atomic flag: a render pass may see the previous mode for one frame, which is harmless.
#[derive(Debug, Clone)]
pub(crate) struct ModeSwitch(Arc<AtomicBool>);

impl ModeSwitch {
    pub(crate) fn new(initial: DisplayMode) -> Self {
        Self(Arc::new(AtomicBool::new(initial == DisplayMode::Bars)))
    }

    pub(crate) fn current(&self) -> DisplayMode {
        DisplayMode::from_bars(self.0.load(Ordering::Relaxed))
    }

    /// Returns the mode after the flip.
    pub(crate) fn toggle(&self) -> DisplayMode {
        DisplayMode::from_bars(!self.0.fetch_xor(true, Ordering::Relaxed))
    }
}

impl From<bool> for ModeSwitch {
    fn from(use_bars: bool) -> Self {
        Self::new(DisplayMode::from_bars(use_bars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_back_and_forth() {
        let mode = ModeSwitch::from(true);
        assert_eq!(mode.current(), DisplayMode::Bars);

        let shared = mode.clone();
        assert_eq!(shared.toggle(), DisplayMode::Arcs);
        assert_eq!(mode.current(), DisplayMode::Arcs);
        assert_eq!(mode.toggle(), DisplayMode::Bars);
        assert_eq!(shared.current(), DisplayMode::Bars);
    }

    #[test]
    fn arcs_unless_bars_are_asked_for() {
        assert_eq!(ModeSwitch::from(false).current(), DisplayMode::Arcs);
        assert_eq!(DisplayMode::Arcs.to_string(), "arcs");
    }
}
