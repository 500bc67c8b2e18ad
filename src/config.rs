//! Configuration structures and loading logic for mdguard.
//!
//! Configuration lives in `.mdguard.toml` (or `mdguard.toml`) with a `[global]` table and
//! optional per-rule tables keyed by diagnostic id, e.g. `[line-length]`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Config file names, in order of precedence
pub const CONFIG_FILES: &[&str] = &[".mdguard.toml", "mdguard.toml"];

/// Largest document accepted for validation, in characters
pub const DEFAULT_MAX_INPUT_CHARS: usize = 500_000;

/// Normalizes configuration keys (rule names, option names) to lowercase kebab-case.
pub fn normalize_key(key: &str) -> String {
    key.trim().replace('_', "-").to_ascii_lowercase()
}

/// Represents a rule-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RuleConfig {
    /// Configuration values for the rule
    #[serde(flatten)]
    pub values: BTreeMap<String, toml::Value>,
}

/// Represents the complete configuration loaded from `.mdguard.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Global configuration options
    #[serde(default)]
    pub global: GlobalConfig,

    /// Rule-specific configurations keyed by diagnostic id
    ///
    /// Recognised sections:
    /// - `line-length`: `max`
    /// - `large-code-block`: `max-chars`
    /// - `image-extension`: `allowed`
    #[serde(flatten)]
    pub rules: BTreeMap<String, RuleConfig>,
}

/// Global configuration options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Run stylistic checks by default
    pub strict: bool,

    /// Checks or diagnostic ids to run exclusively
    pub enable: Vec<String>,

    /// Checks or diagnostic ids to skip
    pub disable: Vec<String>,

    /// Path patterns skipped when walking directories
    pub exclude: Vec<String>,

    /// Respect .gitignore files when scanning directories
    #[serde(alias = "respect_gitignore")]
    pub respect_gitignore: bool,

    /// Documents longer than this (in characters) are rejected
    #[serde(alias = "max_input_chars")]
    pub max_input_chars: usize,

    /// Reject documents containing active HTML content
    #[serde(alias = "safety_check")]
    pub safety_check: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            strict: false,
            enable: Vec::new(),
            disable: Vec::new(),
            exclude: Vec::new(),
            respect_gitignore: true,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            safety_check: true,
        }
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Configuration file already exists
    #[error("Configuration file already exists at {path}")]
    FileExists { path: String },
}

impl Config {
    /// Parse a configuration from TOML text, normalizing rule section names and keys
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.rules = std::mem::take(&mut config.rules)
            .into_iter()
            .map(|(name, rule)| {
                let values = rule.values.into_iter().map(|(k, v)| (normalize_key(&k), v)).collect();
                (normalize_key(&name), RuleConfig { values })
            })
            .collect();
        config.global.enable = config.global.enable.iter().map(|s| normalize_key(s)).collect();
        config.global.disable = config.global.disable.iter().map(|s| normalize_key(s)).collect();

        Ok(config)
    }

    /// Load a configuration file from an explicit path
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            source: e,
            path: path.display().to_string(),
        })?;
        log::debug!("[mdguard-config] Loaded config file: {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit `config_path` wins. Otherwise, unless `isolated` is set, the first
    /// config file found walking upward from `start_dir` is used. Returns the config
    /// together with the file it came from, if any.
    pub fn load_with_discovery(
        config_path: Option<&str>,
        start_dir: &Path,
        isolated: bool,
    ) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = config_path {
            let path = PathBuf::from(path);
            return Ok((Self::from_file(&path)?, Some(path)));
        }

        if isolated {
            log::debug!("[mdguard-config] Skipping auto-discovery due to --isolated");
            return Ok((Self::default(), None));
        }

        match discover_config_upward(start_dir) {
            Some(path) => Ok((Self::from_file(&path)?, Some(path))),
            None => {
                log::debug!("[mdguard-config] No configuration file found, using defaults");
                Ok((Self::default(), None))
            }
        }
    }

    /// Rule sections and enable/disable entries that name nothing known
    pub fn unknown_entries(&self, known: &[&str]) -> Vec<String> {
        let is_known = |name: &str| name == "all" || known.contains(&name);
        self.rules
            .keys()
            .filter(|name| !is_known(name))
            .map(|name| format!("Unknown rule section [{name}]"))
            .chain(
                self.global
                    .enable
                    .iter()
                    .chain(self.global.disable.iter())
                    .filter(|name| !is_known(name))
                    .map(|name| format!("Unknown rule '{name}' in enable/disable list")),
            )
            .collect()
    }
}

/// Discover configuration file by traversing up the directory tree.
/// Stops at the first directory containing `.git`.
fn discover_config_upward(start_dir: &Path) -> Option<PathBuf> {
    const MAX_DEPTH: usize = 100;

    let mut current_dir = start_dir.to_path_buf();
    for _ in 0..MAX_DEPTH {
        log::debug!("[mdguard-config] Searching for config in: {}", current_dir.display());

        for config_name in CONFIG_FILES {
            let config_path = current_dir.join(config_name);
            if config_path.is_file() {
                log::debug!("[mdguard-config] Found config file: {}", config_path.display());
                return Some(config_path);
            }
        }

        if current_dir.join(".git").exists() {
            log::debug!("[mdguard-config] Stopping at .git directory");
            break;
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Get a rule-specific configuration value
/// Automatically tries both the original key and normalized variants (kebab-case and snake_case)
pub fn get_rule_config_value<T: serde::de::DeserializeOwned>(config: &Config, rule_name: &str, key: &str) -> Option<T> {
    let rule_config = config.rules.get(&normalize_key(rule_name))?;

    let key_variants = [key.to_string(), normalize_key(key), key.replace('-', "_")];

    for variant in &key_variants {
        let Some(value) = rule_config.values.get(variant) else {
            continue;
        };
        match T::deserialize(value.clone()) {
            Ok(result) => return Some(result),
            Err(e) => log::warn!("Ignoring invalid value for [{rule_name}] {key}: {e}"),
        }
    }

    None
}

/// Create a default configuration file at the specified path
pub fn create_default_config(path: &str) -> Result<(), ConfigError> {
    if Path::new(path).exists() {
        return Err(ConfigError::FileExists { path: path.to_string() });
    }

    let default_config = r#"# mdguard configuration file

[global]
# Run stylistic checks (line length, trailing whitespace, tabs, first heading)
strict = false

# Checks or diagnostic ids to skip (uncomment and modify as needed)
# disable = ["insecure-link", "missing-language"]

# Checks or diagnostic ids to run exclusively
# enable = ["syntax", "headings"]

# Path patterns to exclude when walking directories
exclude = [
    "node_modules",
    "target",
    "CHANGELOG.md",
]

# Respect .gitignore files when scanning directories (default: true)
respect-gitignore = true

# Reject documents longer than this many characters
max-input-chars = 500000

# Reject documents containing <script>, <iframe>, <object> or <embed>
safety-check = true

# Rule-specific configurations (uncomment and modify as needed)

# [line-length]
# max = 120

# [large-code-block]
# max-chars = 10000

# [image-extension]
# allowed = ["jpg", "jpeg", "png", "gif", "svg", "webp"]
"#;

    fs::write(path, default_config).map_err(|err| ConfigError::IoError {
        source: err,
        path: path.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.global.strict);
        assert!(config.global.safety_check);
        assert_eq!(config.global.max_input_chars, 500_000);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_parse_global_and_rule_sections() {
        let content = r#"
[global]
strict = true
disable = ["Insecure_Link"]
max_input_chars = 1000

[Line_Length]
max = 80

[large-code-block]
max_chars = 50
"#;
        let config = Config::from_toml_str(content).unwrap();
        assert!(config.global.strict);
        assert_eq!(config.global.disable, vec!["insecure-link"]);
        assert_eq!(config.global.max_input_chars, 1000);
        assert_eq!(get_rule_config_value::<usize>(&config, "line-length", "max"), Some(80));
        assert_eq!(
            get_rule_config_value::<usize>(&config, "large-code-block", "max-chars"),
            Some(50)
        );
        assert_eq!(get_rule_config_value::<usize>(&config, "line-length", "missing"), None);
    }

    #[test]
    fn test_parse_error() {
        let err = Config::from_toml_str("[global\nstrict = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_wrong_type_is_ignored_by_lookup() {
        let config = Config::from_toml_str("[line-length]\nmax = \"long\"\n").unwrap();
        assert_eq!(get_rule_config_value::<usize>(&config, "line-length", "max"), None);
    }

    #[test]
    fn test_unknown_entries() {
        let config = Config::from_toml_str("[global]\ndisable = [\"nope\", \"all\"]\n\n[bogus]\nx = 1\n").unwrap();
        let unknown = config.unknown_entries(&["line-length"]);
        assert_eq!(unknown.len(), 2);
        assert!(unknown[0].contains("[bogus]"));
        assert!(unknown[1].contains("'nope'"));
    }

    #[test]
    fn test_discovery_walks_upward_and_stops_at_git() {
        let root = tempdir().unwrap();
        let nested = root.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.path().join(".mdguard.toml"), "[global]\nstrict = true\n").unwrap();

        let (config, path) = Config::load_with_discovery(None, &nested, false).unwrap();
        assert!(config.global.strict);
        assert_eq!(path.unwrap(), root.path().join(".mdguard.toml"));

        // A .git boundary below the config hides it
        fs::create_dir(root.path().join("a/.git")).unwrap();
        let (config, path) = Config::load_with_discovery(None, &nested, false).unwrap();
        assert!(!config.global.strict);
        assert!(path.is_none());
    }

    #[test]
    fn test_isolated_skips_discovery() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("mdguard.toml"), "[global]\nstrict = true\n").unwrap();
        let (config, path) = Config::load_with_discovery(None, root.path(), true).unwrap();
        assert!(!config.global.strict);
        assert!(path.is_none());
    }

    #[test]
    fn test_explicit_missing_file_is_io_error() {
        let root = tempdir().unwrap();
        let missing = root.path().join("nope.toml");
        let err = Config::load_with_discovery(missing.to_str(), root.path(), false).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }

    #[test]
    fn test_create_default_config_roundtrips() {
        let root = tempdir().unwrap();
        let path = root.path().join(".mdguard.toml");
        let path_str = path.to_str().unwrap();
        create_default_config(path_str).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.global, GlobalConfig {
            exclude: vec!["node_modules".into(), "target".into(), "CHANGELOG.md".into()],
            ..GlobalConfig::default()
        });

        let err = create_default_config(path_str).unwrap_err();
        assert!(matches!(err, ConfigError::FileExists { .. }));
    }
}
