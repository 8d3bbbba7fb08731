//! Application and compiler configuration

use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// File name of the compiled navigation manifest
pub const MANIFEST_FILE: &str = "structure.js";

/// Viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Last opened site root
    pub site_root: Option<PathBuf>,
    /// Recently opened site roots
    pub recent_sites: Vec<PathBuf>,
    /// Manifest file name, relative to the site root
    pub manifest_file: String,
    /// UI settings
    pub ui: UiConfig,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Theme (light/dark)
    pub theme: String,
    /// Sidebar width
    pub sidebar_width: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site_root: None,
            recent_sites: Vec::new(),
            manifest_file: MANIFEST_FILE.to_string(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            sidebar_width: 280.0,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "starcodex", "Starcodex")
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Add a site to recent sites
    pub fn add_recent_site(&mut self, path: PathBuf) {
        self.recent_sites.retain(|p| p != &path);
        self.recent_sites.insert(0, path);
        self.recent_sites.truncate(10);
    }

    /// Site root to browse, falling back to the working directory
    pub fn site_root(&self) -> PathBuf {
        self.site_root.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// File backing the persisted UI state
    pub fn state_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.data_dir().join("state.json"))
            .unwrap_or_else(|| PathBuf::from(".starcodex-state.json"))
    }

    /// Directory for rendered pages handed to the system browser
    pub fn export_dir() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.cache_dir().join("pages"))
            .unwrap_or_else(|| std::env::temp_dir().join("starcodex-pages"))
    }
}

/// Subjects that render as card grids instead of nested sidebar branches
pub const DEFAULT_SUBJECTS: &[&str] = &[
    "бестиарий",
    "классы",
    "расы",
    "навыки",
    "черты",
    "темы",
    "снаряжение",
    "звездолёты",
    "заклинания",
    "магия",
    "тактические правила",
    "миры игры",
    "фракции",
    "планеты",
];

/// Manifest compiler settings. The binary always runs with the defaults.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Directory holding the markdown sources
    pub sources_dir: PathBuf,
    /// Where the manifest artifact is written
    pub output_file: PathBuf,
    /// Prefix of every document reference
    pub reference_prefix: String,
    /// Entry names skipped besides hidden ones
    pub skip_names: Vec<String>,
    /// Curated subject names, in priority order
    pub subjects: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            sources_dir: PathBuf::from("./sources"),
            output_file: PathBuf::from(format!("./{MANIFEST_FILE}")),
            reference_prefix: "sources".to_string(),
            skip_names: vec!["node_modules".to_string()],
            subjects: DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_sites_are_deduplicated() {
        let mut config = AppConfig::default();
        for i in 0..12 {
            config.add_recent_site(PathBuf::from(format!("/site/{i}")));
        }
        config.add_recent_site(PathBuf::from("/site/5"));

        assert_eq!(config.recent_sites.len(), 10);
        assert_eq!(config.recent_sites[0], PathBuf::from("/site/5"));
        assert_eq!(
            config.recent_sites.iter().filter(|p| p.ends_with("5")).count(),
            1
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"site_root": "/srv/wiki"}"#).unwrap();
        assert_eq!(config.manifest_file, MANIFEST_FILE);
        assert_eq!(config.site_root(), PathBuf::from("/srv/wiki"));
    }
}
