// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use absence_board_domain::DomainError;

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The referenced person is not part of the loaded state.
    PersonNotFound(String),
    /// The date lies outside the year currently loaded into the store.
    YearNotLoaded {
        /// The year of the requested date.
        requested: i32,
        /// The year held by the store.
        loaded: i32,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::PersonNotFound(id) => write!(f, "Person '{id}' not found"),
            Self::YearNotLoaded { requested, loaded } => {
                write!(
                    f,
                    "Year {requested} is not loaded (currently loaded: {loaded})"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
