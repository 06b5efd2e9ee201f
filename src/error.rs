use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::id::StoreId;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Coarse classification of [`Error`] for callers that only need to know
/// what kind of failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    QuotaExceeded,
    State,
    Infrastructure,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("store {store_id} kept changing underneath us, gave up after {attempts} attempts")]
    Conflict { store_id: StoreId, attempts: u32 },

    #[error("store {store_id} has a malformed record: {reason}")]
    MalformedRecord { store_id: StoreId, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("notification delivery failed: {0}")]
    Notification(String),
}

impl Error {
    pub fn store_not_found(id: &StoreId) -> Self {
        Self::NotFound {
            entity: "store",
            id: id.to_string(),
        }
    }

    pub fn listing_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "listing",
            id: id.to_string(),
        }
    }

    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Domain(e) => match e {
                DomainError::InvalidDiscount { .. }
                | DomainError::PriceByAgreement { .. }
                | DomainError::InvalidPlan { .. }
                | DomainError::InvalidRating { .. }
                | DomainError::ListingNotInStore { .. } => ErrorKind::Validation,
                DomainError::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
                DomainError::StoreUnavailable { .. }
                | DomainError::StoreArchived
                | DomainError::NotDeactivated { .. }
                | DomainError::PlanTooSmall { .. } => ErrorKind::State,
            },
            Self::Conflict { .. } => ErrorKind::State,
            Self::Config(_) => ErrorKind::Validation,
            Self::MalformedRecord { .. }
            | Self::Json(_)
            | Self::Io(_)
            | Self::Connection(_)
            | Self::Database(_)
            | Self::Notification(_) => ErrorKind::Infrastructure,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
