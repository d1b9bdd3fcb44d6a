use crate::config::FilterConfig;
use regex::Regex;
use std::path::Path;

/// Decides which files are collected and which directories are entered.
///
/// Extensions are plain file-name suffixes compared byte for byte, so `.ts`
/// matches `index.ts` and `index.d.ts` but not `INDEX.TS`.
pub struct ExtensionFilter {
    extensions: Vec<String>,
    exclude_dirs: Vec<String>,
    exclude_patterns: Vec<Regex>,
}

impl ExtensionFilter {
    pub fn new(config: &FilterConfig) -> Self {
        let exclude_patterns = config
            .exclude_patterns
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect();

        Self {
            extensions: config.extensions.clone(),
            exclude_dirs: config.exclude_dirs.clone(),
            exclude_patterns,
        }
    }

    pub fn from_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
            exclude_dirs: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.matched_extension(file_name).is_some()
    }

    /// Longest configured suffix that `file_name` ends with.
    pub fn matched_extension(&self, file_name: &str) -> Option<&str> {
        self.extensions
            .iter()
            .filter(|ext| !ext.is_empty() && file_name.ends_with(ext.as_str()))
            .max_by_key(|ext| ext.len())
            .map(String::as_str)
    }

    pub fn is_source_file(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| self.matches(&name.to_string_lossy()))
            .unwrap_or(false)
    }

    pub fn should_traverse_directory(&self, path: &Path) -> bool {
        if let Some(dir_name) = path.file_name().and_then(|s| s.to_str()) {
            if self.exclude_dirs.iter().any(|exclude| exclude == dir_name) {
                return false;
            }
        }

        let path_str = path.to_string_lossy();
        !self
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.is_match(&path_str))
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn exclude_dirs(&self) -> &[String] {
        &self.exclude_dirs
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}
