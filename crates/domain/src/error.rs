// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The day/month/year combination is not a real calendar date.
    InvalidDateComponents {
        /// The year component.
        year: i32,
        /// The zero-based month component.
        month: u8,
        /// The day-of-month component.
        day: u8,
    },
    /// An index passed to a lookup is outside its valid domain.
    OutOfRange {
        /// What kind of index was looked up.
        kind: &'static str,
        /// The rejected index.
        index: u8,
        /// The largest valid index.
        max: u8,
    },
    /// A status string does not name a known status value.
    InvalidStatus(String),
    /// Person name is empty or invalid.
    InvalidName(String),
    /// Person identifier is empty or invalid.
    InvalidPersonId(String),
    /// Tenant identifier is empty or invalid.
    InvalidTenantId(String),
    /// Year value is outside the supported range.
    InvalidYear(i32),
    /// Vacation entitlement is outside the supported range.
    InvalidEntitlement {
        /// The rejected number of days.
        days: u16,
    },
    /// A person identifier is used twice within a tenant.
    DuplicatePerson(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateComponents { year, month, day } => {
                write!(
                    f,
                    "Invalid date: day {day} of month index {month} in {year} does not exist"
                )
            }
            Self::OutOfRange { kind, index, max } => {
                write!(f, "{kind} index {index} out of range: must be 0..={max}")
            }
            Self::InvalidStatus(value) => write!(f, "Invalid status: '{value}'"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidPersonId(msg) => write!(f, "Invalid person id: {msg}"),
            Self::InvalidTenantId(msg) => write!(f, "Invalid tenant id: {msg}"),
            Self::InvalidYear(year) => {
                write!(f, "Invalid year {year}: must be between 1900 and 2200")
            }
            Self::InvalidEntitlement { days } => {
                write!(
                    f,
                    "Invalid vacation entitlement: {days} days. Must be at most 366"
                )
            }
            Self::DuplicatePerson(id) => write!(f, "Person '{id}' already exists"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
