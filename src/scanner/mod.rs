pub mod extension_filter;
pub mod source_scanner;

pub use extension_filter::ExtensionFilter;
pub use source_scanner::{relative_display, ScanStatistics, SourceFile, SourceScanner};
