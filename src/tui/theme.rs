use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::config::UiConfig;
use crate::model::roster::Person;
use crate::model::task::Status;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub selection_bg: Color,
    /// Border of the column a dragged card would drop into
    pub drop_target: Color,
    pub warning: Color,
    pub todo: Color,
    pub in_progress: Color,
    pub done: Color,
    /// Per-tag chip colors
    pub tag_colors: HashMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut tag_colors = HashMap::new();
        tag_colors.insert("Bug".into(), Color::Rgb(0xEF, 0x44, 0x44));
        tag_colors.insert("Feature".into(), Color::Rgb(0x3B, 0x82, 0xF6));
        tag_colors.insert("Documentation".into(), Color::Rgb(0x8B, 0x5C, 0xF6));
        tag_colors.insert("Testing".into(), Color::Rgb(0x10, 0xB9, 0x81));
        tag_colors.insert("Urgente".into(), Color::Rgb(0xF5, 0x9E, 0x0B));

        Theme {
            background: Color::Rgb(0x0F, 0x17, 0x2A),
            text: Color::Rgb(0xCB, 0xD5, 0xE1),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x38, 0xBD, 0xF8),
            dim: Color::Rgb(0x64, 0x74, 0x8B),
            selection_bg: Color::Rgb(0x1E, 0x29, 0x3B),
            drop_target: Color::Rgb(0x34, 0xD3, 0x99),
            warning: Color::Rgb(0xEF, 0x44, 0x44),
            todo: Color::Rgb(0x3B, 0x82, 0xF6),
            in_progress: Color::Rgb(0xF5, 0x9E, 0x0B),
            done: Color::Rgb(0x10, 0xB9, 0x81),
            tag_colors,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from config.toml overrides, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "selection_bg" => theme.selection_bg = color,
                    "drop_target" => theme.drop_target = color,
                    "warning" => theme.warning = color,
                    "todo" => theme.todo = color,
                    "inprogress" => theme.in_progress = color,
                    "done" => theme.done = color,
                    _ => {}
                }
            }
        }

        for (tag, value) in &ui.tag_colors {
            if let Some(color) = parse_hex_color(value) {
                theme.tag_colors.insert(tag.clone(), color);
            }
        }

        theme
    }

    /// Get the color for a tag, falling back to text color
    pub fn tag_color(&self, tag: &str) -> Color {
        self.tag_colors.get(tag).copied().unwrap_or(self.text)
    }

    /// Get the column/badge color for a status
    pub fn status_color(&self, status: Status) -> Color {
        match status {
            Status::Todo => self.todo,
            Status::InProgress => self.in_progress,
            Status::Done => self.done,
        }
    }

    /// Avatar color for a roster member
    pub fn person_color(&self, person: &Person) -> Color {
        parse_hex_color(person.color).unwrap_or(self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex_color("#FF0080"), Some(Color::Rgb(0xFF, 0x00, 0x80)));
        assert_eq!(parse_hex_color("FF0080"), None);
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn config_overrides_apply() {
        let mut ui = UiConfig::default();
        ui.colors.insert("highlight".into(), "#123456".into());
        ui.tag_colors.insert("Bug".into(), "#000000".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.highlight, Color::Rgb(0x12, 0x34, 0x56));
        assert_eq!(theme.tag_color("Bug"), Color::Rgb(0, 0, 0));
        // Unknown tags fall back to the text color
        assert_eq!(theme.tag_color("nope"), theme.text);
    }

    #[test]
    fn every_roster_color_parses() {
        let theme = Theme::default();
        for person in crate::model::roster::ROSTER.iter() {
            assert_ne!(theme.person_color(person), theme.text, "{}", person.name);
        }
    }
}
