// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use absence_board_domain::{
    DayDate, DayEntry, GLOBAL_PERSON_SENTINEL, PersonId, StatusValue, YearConfiguration,
};

use crate::tests::{global_key, person_key, record};
use crate::{DayEntryKey, DayEntryRecord, PersistenceError, YearConfigurationRecord};

#[test]
fn test_global_entry_uses_sentinel_person_id() {
    let entry: DayEntry = DayEntry::global(DayDate::new(2025, 4, 1).unwrap(), StatusValue::Holiday);

    let record: DayEntryRecord = DayEntryRecord::from_entry(&entry);

    assert_eq!(record.person_id, GLOBAL_PERSON_SENTINEL);
    assert_eq!(record.month, 4);
    assert_eq!(record.day, 1);
    assert!(record.key().is_global());
}

#[test]
fn test_record_serializes_with_wire_field_names() {
    let record: DayEntryRecord = record(person_key("p-1", 2025, 0, 6), StatusValue::TrainingSession);

    let json: serde_json::Value = serde_json::to_value(&record).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "personId": "p-1",
            "year": 2025,
            "month": 0,
            "day": 6,
            "status": "training-session",
        })
    );
}

#[test]
fn test_record_converts_back_to_entry() {
    let person: DayEntry = record(person_key("p-1", 2025, 0, 6), StatusValue::Vacation)
        .to_entry()
        .unwrap();
    let global: DayEntry = record(global_key(2025, 9, 3), StatusValue::Holiday)
        .to_entry()
        .unwrap();

    assert_eq!(
        person,
        DayEntry::person(
            PersonId::new("p-1").unwrap(),
            DayDate::new(2025, 0, 6).unwrap(),
            StatusValue::Vacation
        )
    );
    assert_eq!(
        global,
        DayEntry::global(DayDate::new(2025, 9, 3).unwrap(), StatusValue::Holiday)
    );
}

#[test]
fn test_impossible_date_is_an_invalid_record() {
    let bad: DayEntryRecord = DayEntryRecord::new(
        DayEntryKey {
            person_id: String::from("p-1"),
            year: 2025,
            month: 1,
            day: 30,
        },
        StatusValue::Vacation,
    );

    assert!(matches!(
        bad.to_entry().unwrap_err(),
        PersistenceError::InvalidRecord(_)
    ));
}

#[test]
fn test_year_configuration_record_round_trip() {
    let config: YearConfiguration = YearConfiguration {
        year: 2025,
        vacation_entitlement_days: 28,
        holidays_imported: true,
    };

    let record: YearConfigurationRecord = config.into();

    assert_eq!(YearConfiguration::from(record), config);
}
