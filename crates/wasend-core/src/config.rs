use crate::error::Result;
use crate::paths;
use crate::personalize::CHAT_BASE_URL;
use crate::types::CategoryFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// LinkConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Launch the chat link in the default browser after building it.
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
}

fn default_base_url() -> String {
    CHAT_BASE_URL.to_string()
}

fn default_open_browser() -> bool {
    true
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            open_browser: default_open_browser(),
        }
    }
}

// ---------------------------------------------------------------------------
// ListConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListConfig {
    /// `all` or a category name; applied when `contact list` gets no `--category`.
    #[serde(default = "default_filter")]
    pub default_filter: String,
}

fn default_filter() -> String {
    "all".to_string()
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_filter: default_filter(),
        }
    }
}

impl ListConfig {
    /// Falls back to `All` when the configured value doesn't parse; `validate` flags it.
    pub fn filter(&self) -> CategoryFilter {
        self.default_filter.parse().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub link: LinkConfig,
    #[serde(default)]
    pub list: ListConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            link: LinkConfig::default(),
            list: ListConfig::default(),
        }
    }
}

impl Config {
    /// Load `.wasend/config.yaml`, or defaults when the file is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let base = self.link.base_url.trim();
        if base.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "link.base_url is empty".to_string(),
            });
        } else if !base.starts_with("https://") {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("link.base_url '{base}' is not an https URL"),
            });
        }
        if base.contains('?') {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "link.base_url must not contain a query string".to_string(),
            });
        }

        if self.list.default_filter.parse::<CategoryFilter>().is_err() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "unknown list.default_filter '{}', using 'all'",
                    self.list.default_filter
                ),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.link.base_url, "https://web.whatsapp.com/send");
        assert!(cfg.link.open_browser);
    }

    #[test]
    fn save_and_reload() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.link.open_browser = false;
        cfg.list.default_filter = "top".to_string();
        cfg.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.list.filter(), CategoryFilter::Only(Category::Top));
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".wasend")).unwrap();
        std::fs::write(
            dir.path().join(".wasend/config.yaml"),
            "link:\n  open_browser: false\n",
        )
        .unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert!(!cfg.link.open_browser);
        assert_eq!(cfg.link.base_url, CHAT_BASE_URL);
        assert_eq!(cfg.list.default_filter, "all");
    }

    #[test]
    fn defaults_validate_clean() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn validate_flags_bad_values() {
        let mut cfg = Config::default();
        cfg.link.base_url = "http://wa.example/send?x=1".to_string();
        cfg.list.default_filter = "vip".to_string();
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.level == WarnLevel::Error));
        assert_eq!(cfg.list.filter(), CategoryFilter::All);
    }

    #[test]
    fn empty_base_is_error() {
        let mut cfg = Config::default();
        cfg.link.base_url = "  ".to_string();
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Error);
    }
}
