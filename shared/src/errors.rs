use thiserror::Error;

/// Result type alias for storage and operations layers.
pub type Result<T, E = RerouteError> = std::result::Result<T, E>;

/// Errors surfaced by the storage and operations layers.
///
/// The matching core itself never produces these: malformed rule data is
/// represented as a negative result (non-match, unresolved target) so that
/// bad configuration can never abort request processing for a tenant.
#[derive(Error, Debug)]
pub enum RerouteError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("precondition failed: {0}")]
    Precondition(String),

    #[error("validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },
}

impl RerouteError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        RerouteError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        RerouteError::Precondition(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        RerouteError::Validation {
            message: message.into(),
            field: None,
        }
    }
}
