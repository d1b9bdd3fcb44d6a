use crate::error::{CodeSnapError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ROOT: &str = "src/service";
pub const DEFAULT_OUTPUT: &str = "all_code_with_metadata.txt";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub filters: FilterConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    /// File name suffixes, compared case-sensitively.
    pub extensions: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub root: PathBuf,
    pub path: PathBuf,
    /// Visit directory entries in file-name order instead of raw listing order.
    pub sort_paths: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            extensions: vec![".jsx".to_string(), ".ts".to_string()],
            exclude_dirs: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            path: PathBuf::from(DEFAULT_OUTPUT),
            sort_paths: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CodeSnapError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CodeSnapError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| CodeSnapError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["codesnap.toml", ".codesnap.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref root) = cli_args.root {
            self.output.root = root.clone();
        }

        if let Some(ref output) = cli_args.output {
            self.output.path = output.clone();
        }

        if let Some(ref extensions) = cli_args.extensions {
            self.filters.extensions = parse_extension_list(extensions);
        }

        if let Some(ref exclude) = cli_args.exclude {
            for dir in exclude {
                if !self.filters.exclude_dirs.contains(dir) {
                    self.filters.exclude_dirs.push(dir.clone());
                }
            }
        }

        if let Some(sort_paths) = cli_args.sort_paths {
            self.output.sort_paths = sort_paths;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| CodeSnapError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| CodeSnapError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.filters.extensions.is_empty() {
            return Err(CodeSnapError::Config {
                message: "At least one file extension must be specified".to_string(),
            });
        }

        if self.filters.extensions.iter().any(|e| e.is_empty()) {
            return Err(CodeSnapError::Config {
                message: "File extensions cannot be empty strings".to_string(),
            });
        }

        for pattern in &self.filters.exclude_patterns {
            Regex::new(pattern).map_err(|e| CodeSnapError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(CodeSnapError::Config {
                message: "Output path cannot be empty".to_string(),
            });
        }

        if self.output.path.is_dir() {
            return Err(CodeSnapError::Config {
                message: format!(
                    "Output path is a directory: {}",
                    self.output.path.display()
                ),
            });
        }

        // A bare file name has an empty parent, which means the working directory.
        if let Some(parent) = self.output.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(CodeSnapError::Config {
                    message: format!("Parent directory does not exist: {}", parent.display()),
                });
            }
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

/// Splits a comma-separated suffix list. Suffixes are kept verbatim (no case folding,
/// no implicit leading dot).
pub fn parse_extension_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub extensions: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub sort_paths: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        self.root = root;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_extensions(mut self, extensions: Option<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_exclude(mut self, exclude: Option<Vec<String>>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_sort_paths(mut self, sort_paths: Option<bool>) -> Self {
        self.sort_paths = sort_paths;
        self
    }
}
