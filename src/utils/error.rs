use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Reference file '{path}' could not be read: {source}")]
    MissingReferenceFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unknown text encoding: {label}")]
    UnknownEncoding { label: String },

    #[error("Column '{column}' is missing from the {table} table header")]
    MissingColumn { table: String, column: String },

    #[error("ZIP code {zip} (line {line}) has a malformed {field} value: '{value}'")]
    MalformedZipRow {
        zip: String,
        line: u64,
        field: String,
        value: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    ReferenceData,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl FinderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FinderError::ConfigError { .. }
            | FinderError::InvalidConfigValueError { .. }
            | FinderError::UnknownEncoding { .. } => ErrorCategory::Configuration,
            FinderError::MissingReferenceFile { .. }
            | FinderError::MissingColumn { .. }
            | FinderError::MalformedZipRow { .. } => ErrorCategory::ReferenceData,
            FinderError::IoError(_)
            | FinderError::CsvError(_)
            | FinderError::SerializationError(_) => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::ReferenceData => {
                ErrorSeverity::Critical
            }
            ErrorCategory::Processing => ErrorSeverity::High,
        }
    }

    /// Process exit code for the command-line binaries.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::ReferenceData => 3,
            ErrorCategory::Processing => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FinderError::MissingReferenceFile { path, .. } => {
                format!("Reference data file not found or unreadable: {}", path)
            }
            FinderError::MissingColumn { table, column } => {
                format!("The {} table has no '{}' column", table, column)
            }
            FinderError::MalformedZipRow { zip, .. } => {
                format!("The ZIP table entry for {} is corrupt", zip)
            }
            FinderError::UnknownEncoding { label } => {
                format!("'{}' is not a supported text encoding", label)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FinderError::MissingReferenceFile { .. } => {
                "Check --zip-file/--markets-file (or the [zip_table]/[market_table] paths) and --base-dir"
            }
            FinderError::MissingColumn { .. } => {
                "Verify the header row or override the column names in the TOML configuration"
            }
            FinderError::MalformedZipRow { .. } => {
                "Fix the latitude/longitude values for this ZIP code in the reference table"
            }
            FinderError::UnknownEncoding { .. } => {
                "Use a WHATWG encoding label such as utf-8 or windows-1252"
            }
            FinderError::ConfigError { .. }
            | FinderError::InvalidConfigValueError { .. } => "Review the configuration values",
            FinderError::IoError(_) | FinderError::CsvError(_) => {
                "Check that the reference tables are well-formed CSV files"
            }
            FinderError::SerializationError(_) => "Retry with --format text",
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
