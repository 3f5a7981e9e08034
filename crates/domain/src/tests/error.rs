// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidDateComponents {
        year: 2025,
        month: 3,
        day: 31,
    };
    assert_eq!(
        format!("{err}"),
        "Invalid date: day 31 of month index 3 in 2025 does not exist"
    );

    let err: DomainError = DomainError::OutOfRange {
        kind: "month",
        index: 12,
        max: 11,
    };
    assert_eq!(format!("{err}"), "month index 12 out of range: must be 0..=11");

    let err: DomainError = DomainError::InvalidStatus(String::from("sick"));
    assert_eq!(format!("{err}"), "Invalid status: 'sick'");

    let err: DomainError = DomainError::InvalidName(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid name: test");

    let err: DomainError = DomainError::InvalidPersonId(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid person id: test");

    let err: DomainError = DomainError::InvalidTenantId(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid tenant id: test");

    let err: DomainError = DomainError::InvalidYear(1800);
    assert_eq!(
        format!("{err}"),
        "Invalid year 1800: must be between 1900 and 2200"
    );

    let err: DomainError = DomainError::InvalidEntitlement { days: 400 };
    assert_eq!(
        format!("{err}"),
        "Invalid vacation entitlement: 400 days. Must be at most 366"
    );

    let err: DomainError = DomainError::DuplicatePerson(String::from("p-1"));
    assert_eq!(format!("{err}"), "Person 'p-1' already exists");

    let err: DomainError = DomainError::DateArithmeticOverflow {
        operation: String::from("computing Easter Sunday 2025"),
    };
    assert_eq!(
        format!("{err}"),
        "Date arithmetic overflow while computing Easter Sunday 2025"
    );
}
