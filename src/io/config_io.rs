use std::fs;
use std::io;
use std::path::Path;

use crate::model::config::BoardConfig;

/// Name of the optional theme/config file in the data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Read config.toml from the data directory. A missing file yields the
/// defaults; an unreadable or unparseable file also yields the defaults,
/// with a logged warning.
pub fn load_config(data_dir: &Path) -> BoardConfig {
    let path = data_dir.join(CONFIG_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return BoardConfig::default(),
        Err(e) => {
            log::warn!("could not read {}: {}", path.display(), e);
            return BoardConfig::default();
        }
    };
    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("could not parse {}: {}", path.display(), e);
            BoardConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path());
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn malformed_config_yields_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[ui.colors\nbroken").unwrap();
        let config = load_config(dir.path());
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn overrides_are_read() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[ui.colors]\nhighlight = \"#AA00AA\"\n",
        )
        .unwrap();
        let config = load_config(dir.path());
        assert_eq!(config.ui.colors.get("highlight").unwrap(), "#AA00AA");
    }
}
