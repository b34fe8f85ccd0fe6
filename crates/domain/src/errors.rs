//! Domain Errors - fixture loading and business rule violations

use thiserror::Error;

/// Errors raised while loading the fixture or applying form rules.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Fixture file could not be read
    #[error("Failed to read dataset from {path}: {source}")]
    DatasetIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Fixture JSON does not match the expected layout
    #[error("Invalid dataset JSON: {0}")]
    DatasetFormat(#[from] serde_json::Error),

    #[error("Employee not found with ID: {0}")]
    EmployeeNotFound(String),

    /// Business validation: a required form field was left empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// Business validation: invoice needs at least one line
    #[error("Invoice must contain at least one item")]
    EmptyInvoice,

    #[error("Quantity must be positive for product {0}")]
    InvalidQuantity(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DomainError::EmployeeNotFound("E999".to_string());
        assert_eq!(error.to_string(), "Employee not found with ID: E999");

        let error = DomainError::MissingField("customer name");
        assert_eq!(error.to_string(), "Missing required field: customer name");
    }

    #[test]
    fn test_format_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: DomainError = json_error.into();
        assert!(matches!(error, DomainError::DatasetFormat(_)));
    }
}
