use std::path::PathBuf;

/// Failures while reading or validating a dataset document.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The dataset file could not be read
    #[error("Failed to read dataset {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request failed before a response arrived
    #[error("Failed to fetch dataset {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("Failed to load dataset: {status} from {url}")]
    Status { url: String, status: u16 },

    /// The document is not valid JSON
    #[error("Invalid JSON in dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// The top-level value is neither an array nor an object
    #[error("Unsupported dataset shape: expected an array or an object, found {0}")]
    UnsupportedShape(&'static str),

    /// No record resolved the required fields
    #[error("Dataset has no usable records ({total} read, none with the required fields)")]
    NoUsableRecords { total: usize },
}

pub type Result<T> = std::result::Result<T, DatasetError>;
