//! Configuration
//!
//! Descriptor directory list (order is precedence, user before system) and
//! the override-list location. Loaded leniently: a missing or unparsable
//! config file yields the defaults.

use std::path::PathBuf;

use toml::map::Map;

#[derive(Clone, Debug)]
pub struct Config {
    /// Descriptor directories, earliest wins duplicate ids
    pub descriptor_dirs: Vec<PathBuf>,
    /// Override list; missing file means no overrides
    pub overrides_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let mut descriptor_dirs = Vec::new();
        if let Some(data) = dirs::data_dir() {
            descriptor_dirs.push(data.join("applications"));
        }
        descriptor_dirs.push(PathBuf::from("/usr/share/applications"));

        Self {
            descriptor_dirs,
            overrides_path: dirs::config_dir().map(|p| p.join("mklist").join("associations.list")),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mklist").join("config.toml"))
    }

    /// Load config, falling back to defaults for anything absent
    pub fn load() -> Self {
        let table = Self::config_path()
            .and_then(|p| std::fs::read_to_string(&p).ok())
            .and_then(|s| s.parse::<toml::Table>().ok())
            .unwrap_or_default();
        Self::from_table(&table)
    }

    fn from_table(table: &Map<String, toml::Value>) -> Self {
        let mut config = Self::default();

        if let Some(toml::Value::Array(dirs)) = table.get("descriptor_dirs") {
            let parsed: Vec<PathBuf> = dirs
                .iter()
                .filter_map(|v| v.as_str())
                .map(PathBuf::from)
                .collect();
            if !parsed.is_empty() {
                config.descriptor_dirs = parsed;
            }
        }

        if let Some(toml::Value::String(path)) = table.get("associations") {
            config.overrides_path = Some(PathBuf::from(path));
        }

        config
    }
}
