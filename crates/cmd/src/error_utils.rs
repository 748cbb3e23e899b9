// Error handling utilities to eliminate repetitive error mapping patterns

use anyhow::{Result, anyhow};

/// Shown when the checker cannot load its country dataset.
pub const DATASET_UNAVAILABLE: &str =
    "Sorry — problem loading country data. Please try again in a moment.";

/// Extension trait for Results to provide standardized error mapping
/// Eliminates repetitive `.map_err(|e| anyhow!("Failed to ..."))` patterns
pub trait ErrorContext<T> {
    /// Map error with a context message for common "Failed to..." patterns
    fn with_context_msg(self, msg: &str) -> Result<T>;

    /// Map error with a formatted context message
    fn with_context_fmt(self, msg: &str, args: &dyn std::fmt::Display) -> Result<T>;

    /// Common error mapping for dataset loads
    fn dataset_context(self, location: &str) -> Result<T>;

    /// Common error mapping for site generation
    fn site_context(self, operation: &str, path: &std::path::Path) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn with_context_msg(self, msg: &str) -> Result<T> {
        self.map_err(|e| anyhow!("{}: {}", msg, e))
    }

    fn with_context_fmt(self, msg: &str, args: &dyn std::fmt::Display) -> Result<T> {
        self.map_err(|e| anyhow!("{} {}: {}", msg, args, e))
    }

    fn dataset_context(self, location: &str) -> Result<T> {
        self.with_context_fmt("Failed to load dataset", &location)
    }

    fn site_context(self, operation: &str, path: &std::path::Path) -> Result<T> {
        self.with_context_fmt(&format!("Failed to {}", operation), &path.display())
    }
}
