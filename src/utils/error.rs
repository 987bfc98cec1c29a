use thiserror::Error;

/// CSV 匯入失敗的原因；decode 要嘛完整成功，要嘛完整失敗。
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("CSV must contain a header line and a data line")]
    MissingDataLine,

    #[error("CSV header and value mismatch: {headers} headers, {values} values")]
    FieldCountMismatch { headers: usize, values: usize },

    #[error("Malformed product list: {reason}")]
    MalformedProductList { reason: String },

    #[error("CSV tokenizing error: {0}")]
    Csv(#[from] csv::Error),
}

/// 單一欄位的驗證問題，例如 `products[1].discount`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub value: String,
    pub reason: String,
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {:?}: {}", self.field, self.value, self.reason)
    }
}

#[derive(Error, Debug)]
pub enum PromoError {
    #[error("CSV import failed: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML error: {message}")]
    TomlError { message: String },

    #[error("Unsupported document format: {path}")]
    UnsupportedFormat { path: String },

    #[error("Validation failed with {} issue(s)", .issues.len())]
    ValidationError { issues: Vec<FieldIssue> },
}

impl PromoError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            PromoError::Parse(e) => format!(
                "Failed to import CSV. Please ensure it's a valid file exported from this tool. Error: {}",
                e
            ),
            PromoError::IoError(e) => format!("Could not read or write a file: {}", e),
            PromoError::SerializationError(e) => format!("The JSON document is invalid: {}", e),
            PromoError::TomlError { message } => format!("The TOML document is invalid: {}", message),
            PromoError::UnsupportedFormat { path } => {
                format!("Don't know how to handle '{}'", path)
            }
            PromoError::ValidationError { issues } => {
                let lines: Vec<String> = issues.iter().map(|i| format!("  - {}", i)).collect();
                format!("The promotion has problems:\n{}", lines.join("\n"))
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PromoError::Parse(ParseError::MissingDataLine) => {
                "Export the promotion again; the file needs a header line and a data line"
            }
            PromoError::Parse(ParseError::FieldCountMismatch { .. }) => {
                "Check that every value is wrapped in double quotes and inner quotes are doubled"
            }
            PromoError::Parse(ParseError::MalformedProductList { .. }) => {
                "The products column must hold a JSON array with at least one product"
            }
            PromoError::Parse(ParseError::Csv(_)) => "Make sure the file is UTF-8 encoded CSV",
            PromoError::IoError(_) => "Check that the path exists and is writable",
            PromoError::SerializationError(_) | PromoError::TomlError { .. } => {
                "Fix the syntax error reported above, or regenerate the file with `init`"
            }
            PromoError::UnsupportedFormat { .. } => "Use a .csv, .toml or .json file",
            PromoError::ValidationError { .. } => {
                "Fix the listed fields; rendering still works but the email may look broken"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PromoError>;
