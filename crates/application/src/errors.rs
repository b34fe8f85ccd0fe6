//! Application Layer Errors
//!
//! Chat turns never fail (gateway problems become error turns); these errors
//! come from report generation, transcript export and input validation.

use domain::DomainError;
use llm::GatewayError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Completion failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Failed to build prompt: {0}")]
    Prompt(#[from] serde_json::Error),

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource_type} with ID '{id}'")]
    NotFound { resource_type: String, id: String },

    #[error("Unexpected assistant reply: {message}")]
    UnexpectedReply { message: String },

    #[error("Failed to write {path}: {source}")]
    Export {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ApplicationError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found<R: Into<String>, I: Into<String>>(resource_type: R, id: I) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Problems the user can fix by changing their input
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ApplicationError::Validation { .. }
                | ApplicationError::NotFound { .. }
                | ApplicationError::Domain(
                    DomainError::EmployeeNotFound(_)
                        | DomainError::MissingField(_)
                        | DomainError::InvalidDate { .. }
                        | DomainError::EmptyInvoice
                        | DomainError::InvalidQuantity(_)
                )
        )
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
