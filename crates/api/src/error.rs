// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::csv_export::CsvExportError;
use absence_board::CoreError;
use absence_board_domain::DomainError;
use absence_board_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request addresses a year other than the one loaded for the tenant.
    YearNotLoaded {
        /// The requested year.
        requested: i32,
        /// The loaded year, if any.
        loaded: Option<i32>,
    },
    /// The remote store rejected or failed a write.
    RemoteWriteFailed {
        /// A description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::YearNotLoaded {
                requested,
                loaded: Some(loaded),
            } => {
                write!(f, "Year {requested} is not loaded (currently loaded: {loaded})")
            }
            Self::YearNotLoaded {
                requested,
                loaded: None,
            } => {
                write!(f, "Year {requested} is not loaded (no year loaded)")
            }
            Self::RemoteWriteFailed { message } => {
                write!(f, "Remote write failed: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<CsvExportError> for ApiError {
    fn from(err: CsvExportError) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidDateComponents { year, month, day } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Day {day} of month index {month} in {year} does not exist"),
        },
        DomainError::OutOfRange { kind, index, max } => ApiError::InvalidInput {
            field: kind.to_string(),
            message: format!("Index {index} out of range: must be 0..={max}"),
        },
        DomainError::InvalidStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown status '{value}'"),
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidPersonId(msg) => ApiError::InvalidInput {
            field: String::from("person_id"),
            message: msg,
        },
        DomainError::InvalidTenantId(msg) => ApiError::InvalidInput {
            field: String::from("tenant_id"),
            message: msg,
        },
        DomainError::InvalidYear(year) => ApiError::InvalidInput {
            field: String::from("year"),
            message: format!("Year {year} must be between 1900 and 2200"),
        },
        DomainError::InvalidEntitlement { days } => ApiError::InvalidInput {
            field: String::from("vacation_entitlement_days"),
            message: format!("{days} days exceeds the maximum of 366"),
        },
        DomainError::DuplicatePerson(id) => ApiError::DomainRuleViolation {
            rule: String::from("unique_person_id"),
            message: format!("Person '{id}' already exists"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::PersonNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Person"),
            message: format!("Person '{id}' does not exist"),
        },
        CoreError::YearNotLoaded { requested, loaded } => ApiError::YearNotLoaded {
            requested,
            loaded: Some(loaded),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Failed writes and unreachable stores surface as `RemoteWriteFailed`;
/// the remaining variants indicate a server-side defect.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::InjectedFailure(_) => ApiError::RemoteWriteFailed {
            message: err.to_string(),
        },
        PersistenceError::MigrationFailed(_)
        | PersistenceError::TaskFailed(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::InvalidRecord(_) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
