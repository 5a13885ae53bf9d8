//! Error types for pattern catalog compilation

use thiserror::Error;

/// Errors that can occur while building the compiled pattern catalog.
///
/// Extraction itself never fails: a field that cannot be recovered from the
/// text is simply absent from the result. The only fatal condition is a
/// malformed catalog entry, which is a configuration defect and is surfaced
/// before the parser services any call.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A pattern alternative failed to compile
    #[error("Failed to compile pattern for field {field}: {details}")]
    Compile {
        field: &'static str,
        details: String,
    },
}

/// Result type for catalog compilation
pub type Result<T> = std::result::Result<T, CatalogError>;
