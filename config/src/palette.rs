use serde::{
    Deserialize,
    Serialize,
};
use std::str::FromStr as _;
use strum::{
    Display,
    EnumIter,
    EnumString,
};

/// Colours a gauge can be drawn in. Unknown names fall back to [`GaugeColor::White`].
#[derive(Debug, Default, Clone, Copy, Display, EnumIter, EnumString, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GaugeColor {
    Blue,
    Red,
    Green,
    Yellow,
    Magenta,
    Cyan,
    #[default]
    White,
}

impl From<String> for GaugeColor {
    fn from(name: String) -> Self {
        Self::from_str(name.trim()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_known_names() {
        assert_eq!(GaugeColor::from("blue".to_string()), GaugeColor::Blue);
        assert_eq!(GaugeColor::from("Magenta".to_string()), GaugeColor::Magenta);
        assert_eq!(GaugeColor::from(" cyan ".to_string()), GaugeColor::Cyan);
    }

    #[test]
    fn unknown_names_fall_back_to_white() {
        assert_eq!(GaugeColor::from("default".to_string()), GaugeColor::White);
        assert_eq!(GaugeColor::from("".to_string()), GaugeColor::White);
        assert_eq!(GaugeColor::from("orange".to_string()), GaugeColor::White);
    }

    #[test]
    fn displays_lowercase() {
        assert_eq!(GaugeColor::Yellow.to_string(), "yellow");
    }
}
