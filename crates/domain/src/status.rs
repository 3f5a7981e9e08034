// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Day status values and the click cycle.
//!
//! The "none" status is never stored: it is the absence of a value, modelled
//! as `Option<StatusValue>::None` everywhere in the workspace.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A recorded status for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusValue {
    /// Urlaub.
    Vacation,
    /// Durchführung.
    TrainingSession,
    /// Fortbildung.
    ContinuingEducation,
    /// Interne Teamtage.
    InternalTeamDay,
    /// Feiertag.
    Holiday,
}

impl StatusValue {
    /// All status values in cycle order.
    pub const ALL: [Self; 5] = [
        Self::Vacation,
        Self::TrainingSession,
        Self::ContinuingEducation,
        Self::InternalTeamDay,
        Self::Holiday,
    ];

    /// Returns the wire representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vacation => "vacation",
            Self::TrainingSession => "training-session",
            Self::ContinuingEducation => "continuing-education",
            Self::InternalTeamDay => "internal-team-day",
            Self::Holiday => "holiday",
        }
    }

    /// Returns the German label shown in the calendar and in exports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Vacation => "Urlaub",
            Self::TrainingSession => "Durchführung",
            Self::ContinuingEducation => "Fortbildung",
            Self::InternalTeamDay => "interne Teamtage",
            Self::Holiday => "Feiertag",
        }
    }

    /// Returns whether a day with this status counts against the vacation entitlement.
    #[must_use]
    pub const fn consumes_vacation(&self) -> bool {
        matches!(self, Self::Vacation)
    }
}

impl FromStr for StatusValue {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vacation" => Ok(Self::Vacation),
            "training-session" => Ok(Self::TrainingSession),
            "continuing-education" => Ok(Self::ContinuingEducation),
            "internal-team-day" => Ok(Self::InternalTeamDay),
            "holiday" => Ok(Self::Holiday),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for StatusValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Computes the status a click advances a day to.
///
/// `current` is the effective status of the day and `is_inherited` tells
/// whether it came from the organization-wide entry. A `None` result means
/// the person-specific entry is deleted; it never removes a global entry.
///
/// | current | specific | inherited |
/// |---|---|---|
/// | none | vacation | vacation |
/// | vacation | training-session | training-session |
/// | training-session | continuing-education | continuing-education |
/// | continuing-education | internal-team-day | internal-team-day |
/// | internal-team-day | holiday | vacation |
/// | holiday | none | vacation |
#[must_use]
pub const fn next_status(current: Option<StatusValue>, is_inherited: bool) -> Option<StatusValue> {
    match (current, is_inherited) {
        (None, _) => Some(StatusValue::Vacation),
        (Some(StatusValue::Vacation), _) => Some(StatusValue::TrainingSession),
        (Some(StatusValue::TrainingSession), _) => Some(StatusValue::ContinuingEducation),
        (Some(StatusValue::ContinuingEducation), _) => Some(StatusValue::InternalTeamDay),
        (Some(StatusValue::InternalTeamDay | StatusValue::Holiday), true) => {
            Some(StatusValue::Vacation)
        }
        (Some(StatusValue::InternalTeamDay), false) => Some(StatusValue::Holiday),
        (Some(StatusValue::Holiday), false) => None,
    }
}
