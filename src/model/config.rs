use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration from config.toml in the data directory.
/// Everything is optional; a missing file means defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme color overrides, keyed by theme slot name, values `#rrggbb`
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Per-tag chip color overrides, values `#rrggbb`
    #[serde(default)]
    pub tag_colors: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_parses_to_defaults() {
        let config: BoardConfig = toml::from_str("").unwrap();
        assert!(config.ui.colors.is_empty());
        assert!(config.ui.tag_colors.is_empty());
    }

    #[test]
    fn color_overrides_parse() {
        let config: BoardConfig = toml::from_str(
            r##"
            [ui.colors]
            background = "#101010"

            [ui.tag_colors]
            Bug = "#FF0000"
            "##,
        )
        .unwrap();
        assert_eq!(config.ui.colors.get("background").unwrap(), "#101010");
        assert_eq!(config.ui.tag_colors.get("Bug").unwrap(), "#FF0000");
    }
}
