use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodeSnapError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot write output file {path}: {source}")]
    OutputFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for CodeSnapError {
    fn user_message(&self) -> String {
        match self {
            CodeSnapError::OutputFile { path, source } => {
                format!("Could not write the snapshot to {}: {}", path, source)
            }
            CodeSnapError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            CodeSnapError::InvalidPattern { pattern, .. } => {
                format!("Exclude pattern is not a valid regular expression: {}", pattern)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            CodeSnapError::OutputFile { .. } => Some(
                "Check that the parent directory exists and is writable, or choose another path with --output.".to_string()
            ),
            CodeSnapError::Config { .. } => Some(
                "Check your configuration file syntax. Run with --generate-config to see a valid example.".to_string()
            ),
            CodeSnapError::InvalidPattern { .. } => Some(
                "Exclude patterns use Rust regex syntax (e.g., '.*/generated/.*').".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for CodeSnapError {
    fn from(error: toml::de::Error) -> Self {
        CodeSnapError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodeSnapError>;
