use crate::config::FilterConfig;
use crate::error::{CodeSnapError, Result};
use crate::scanner::extension_filter::ExtensionFilter;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub source_path: PathBuf,
    pub relative_path: PathBuf,
    pub file_name: String,
}

impl SourceFile {
    pub fn new(source_path: PathBuf, relative_path: PathBuf) -> Self {
        let file_name = source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            source_path,
            relative_path,
            file_name,
        }
    }

    /// Relative path with `/` separators on every platform.
    pub fn display_path(&self) -> String {
        relative_display(&self.relative_path)
    }
}

/// Joins the components of a relative path with `/`.
pub fn relative_display(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub struct SourceScanner {
    filter: ExtensionFilter,
    sort_paths: bool,
}

impl SourceScanner {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            filter: ExtensionFilter::new(config),
            sort_paths: true,
        }
    }

    pub fn with_sorted_paths(mut self, sort_paths: bool) -> Self {
        self.sort_paths = sort_paths;
        self
    }

    /// Collects matching files under `root` in traversal order.
    ///
    /// A missing root, or one that is not a directory, yields no files.
    /// Unreadable subdirectories are logged and skipped; only a failure to read
    /// the root itself is returned as an error.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<SourceFile>> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            tracing::debug!("Root folder {} does not exist, nothing to scan", root_path.display());
            return Ok(Vec::new());
        }

        if !root_path.is_dir() {
            tracing::debug!("Root {} is not a directory, nothing to scan", root_path.display());
            return Ok(Vec::new());
        }

        let mut walker = WalkDir::new(root_path).follow_links(false);
        if self.sort_paths {
            walker = walker.sort_by_file_name();
        }

        let mut files = Vec::new();

        for entry in walker
            .into_iter()
            .filter_entry(|e| self.should_traverse(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(CodeSnapError::Io(err.into()));
                }
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };

            if !is_file_entry(&entry) {
                continue;
            }

            if !self.filter.is_source_file(entry.path()) {
                continue;
            }

            match entry.path().strip_prefix(root_path) {
                Ok(relative) => files.push(SourceFile::new(
                    entry.path().to_path_buf(),
                    relative.to_path_buf(),
                )),
                Err(_) => {
                    tracing::warn!(
                        "Cannot calculate relative path for {} from root {}",
                        entry.path().display(),
                        root_path.display()
                    );
                }
            }
        }

        tracing::debug!("Found {} matching files under {}", files.len(), root_path.display());

        Ok(files)
    }

    fn should_traverse(&self, entry: &DirEntry) -> bool {
        // The root is always entered, even if its own name is excluded.
        if entry.depth() == 0 {
            return true;
        }

        if entry.file_type().is_dir() {
            return self.filter.should_traverse_directory(entry.path());
        }

        true
    }

    pub fn statistics(&self, files: &[SourceFile]) -> ScanStatistics {
        let mut files_by_extension = BTreeMap::new();
        for file in files {
            let ext = self
                .filter
                .matched_extension(&file.file_name)
                .unwrap_or("other")
                .to_string();
            *files_by_extension.entry(ext).or_insert(0) += 1;
        }

        ScanStatistics {
            total_files: files.len(),
            files_by_extension,
        }
    }
}

/// Anything that is not a directory is handed to the read step, dangling links
/// included, so an unreadable entry is reported instead of silently dropped.
/// Links to directories count as directories and are never descended into.
fn is_file_entry(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        return false;
    }
    !(file_type.is_symlink() && entry.path().is_dir())
}

#[derive(Debug, Default)]
pub struct ScanStatistics {
    pub total_files: usize,
    pub files_by_extension: BTreeMap<String, usize>,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        let mut summary = format!("Scan Results:\n  Matching files: {}\n", self.total_files);

        if !self.files_by_extension.is_empty() {
            summary.push_str("  Files by extension:\n");
            for (ext, count) in &self.files_by_extension {
                summary.push_str(&format!("    {}: {} files\n", ext, count));
            }
        }

        summary
    }
}
