//! Validation and record-shape coverage for guest data.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

fn base_form() -> GuestForm {
    GuestForm {
        full_name: "Budi Santoso".to_owned(),
        address: "Jl. Merdeka No. 1".to_owned(),
        phone: Some("081234567890".to_owned()),
        purpose: "Mengurus surat domisili".to_owned(),
        visit_date: "2025-03-12".to_owned(),
    }
}

#[fixture]
fn valid_form() -> GuestForm {
    base_form()
}

fn record(id: &str, visit_date: &str) -> GuestRecord {
    GuestRecord::new(GuestRecordPayload {
        id: GuestId::new(id).expect("valid id"),
        full_name: "Budi Santoso".to_owned(),
        address: "Jl. Merdeka No. 1".to_owned(),
        phone: None,
        purpose: "Mengurus surat domisili".to_owned(),
        visit_date: visit_date.to_owned(),
        created_at: Utc
            .with_ymd_and_hms(2025, 3, 12, 2, 30, 0)
            .single()
            .expect("valid timestamp"),
    })
}

#[rstest]
fn accepts_a_valid_form(valid_form: GuestForm) {
    let submission = valid_form.validate().expect("form is valid");
    assert_eq!(submission.full_name(), "Budi Santoso");
    assert_eq!(submission.phone(), Some("081234567890"));
    assert_eq!(submission.visit_date().to_string(), "2025-03-12");
}

#[rstest]
#[case(None)]
#[case(Some(""))]
fn blank_phone_is_absent(valid_form: GuestForm, #[case] phone: Option<&str>) {
    let form = GuestForm {
        phone: phone.map(str::to_owned),
        ..valid_form
    };
    let submission = form.validate().expect("blank phone accepted");
    assert_eq!(submission.phone(), None);
}

#[rstest]
#[case::short_name(GuestForm { full_name: "B".into(), ..base_form() }, GuestField::FullName)]
#[case::short_address(GuestForm { address: "Jl.".into(), ..base_form() }, GuestField::Address)]
#[case::phone_letters(GuestForm { phone: Some("0812-3456-789".into()), ..base_form() }, GuestField::Phone)]
#[case::phone_short(GuestForm { phone: Some("12345".into()), ..base_form() }, GuestField::Phone)]
#[case::phone_long(GuestForm { phone: Some("1234567890123456".into()), ..base_form() }, GuestField::Phone)]
#[case::short_purpose(GuestForm { purpose: "Main".into(), ..base_form() }, GuestField::Purpose)]
#[case::empty_date(GuestForm { visit_date: String::new(), ..base_form() }, GuestField::VisitDate)]
#[case::bad_date(GuestForm { visit_date: "2025-02-30".into(), ..base_form() }, GuestField::VisitDate)]
fn single_violation_names_only_that_field(#[case] form: GuestForm, #[case] field: GuestField) {
    let errors = form.validate().expect_err("form is invalid");
    assert_eq!(errors.fields(), vec![field]);
}

#[rstest]
fn lengths_count_characters_not_bytes(valid_form: GuestForm) {
    let form = GuestForm {
        full_name: "É".to_owned(),
        ..valid_form
    };
    let errors = form.validate().expect_err("one character is too short");
    assert_eq!(
        errors.errors(),
        &[GuestValidationError::FullNameTooShort { min: FULL_NAME_MIN }]
    );
}

#[rstest]
fn reports_every_failing_field() {
    let errors = GuestForm::default().validate().expect_err("empty form");
    assert_eq!(
        errors.fields(),
        vec![
            GuestField::FullName,
            GuestField::Address,
            GuestField::Purpose,
            GuestField::VisitDate,
        ]
    );
}

#[rstest]
fn validation_errors_become_field_scoped_details() {
    let form = GuestForm {
        phone: Some("12345".to_owned()),
        ..base_form()
    };
    let errors = form.validate().expect_err("phone too short");
    let error = Error::from(errors);

    assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
    assert_eq!(
        error.details(),
        Some(&json!({ "phone": "Nomor HP minimal 10 digit." }))
    );
}

#[rstest]
#[case(json!(7), "7")]
#[case(json!("abc-1"), "abc-1")]
fn guest_id_accepts_numbers_and_strings(#[case] raw: serde_json::Value, #[case] expected: &str) {
    let id: GuestId = serde_json::from_value(raw).expect("id deserialises");
    assert_eq!(id.as_ref(), expected);
}

#[rstest]
fn guest_id_rejects_blank_text() {
    assert!(serde_json::from_value::<GuestId>(json!("  ")).is_err());
}

#[rstest]
fn malformed_stored_dates_are_kept_raw() {
    let stored = record("1", "12-03-2025");
    assert_eq!(stored.visit_date(), None);
    assert_eq!(stored.raw_visit_date(), "12-03-2025");
}

#[rstest]
fn record_serialises_in_camel_case() {
    let value = serde_json::to_value(record("7", "2025-03-12")).expect("serialise");
    assert_eq!(value["id"], json!("7"));
    assert_eq!(value["fullName"], json!("Budi Santoso"));
    assert_eq!(value["visitDate"], json!("2025-03-12"));
    assert_eq!(value["phone"], serde_json::Value::Null);
}

#[rstest]
fn untouched_form_is_not_dirty() {
    let stored = record("7", "2025-03-12");
    let form = GuestForm::from_record(&stored);
    assert!(!form.differs_from(&stored));
}

#[rstest]
fn empty_phone_matches_absent_phone() {
    let stored = record("7", "2025-03-12");
    let form = GuestForm {
        phone: Some(String::new()),
        ..GuestForm::from_record(&stored)
    };
    assert!(!form.differs_from(&stored));
}

#[rstest]
fn changed_date_is_dirty() {
    let stored = record("7", "2025-03-12");
    let form = GuestForm {
        visit_date: "2025-03-13".to_owned(),
        ..GuestForm::from_record(&stored)
    };
    assert!(form.differs_from(&stored));
}

#[rstest]
fn with_submission_keeps_identity() {
    let stored = record("7", "2025-03-12");
    let form = GuestForm {
        full_name: "Siti Aminah".to_owned(),
        ..GuestForm::from_record(&stored)
    };
    let submission = form.validate().expect("valid edit");

    let updated = stored.with_submission(&submission);

    assert_eq!(updated.id(), stored.id());
    assert_eq!(updated.created_at(), stored.created_at());
    assert_eq!(updated.full_name(), "Siti Aminah");
}
