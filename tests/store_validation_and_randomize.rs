#[path = "../src/calc.rs"]
mod calc;
#[path = "../src/store.rs"]
mod store;

use calc::{Grade, GradeRecord};
use serde_json::json;
use std::collections::HashSet;
use store::{SessionState, CREDIT_CHOICES, LETTER_CHOICES, PERIOD_CHOICES, SUBJECT_CATALOG};

fn rec(subject: &str, credits: f64, grade: Grade, period: &str) -> GradeRecord {
    GradeRecord {
        subject: subject.to_string(),
        credits,
        grade,
        period: period.to_string(),
    }
}

#[test]
fn blank_subject_is_rejected_and_store_is_untouched() {
    let mut state = SessionState::seeded();
    let before = state.records.len();
    let e = state
        .add(rec("   ", 3.0, Grade::Letter("A".into()), "Q1"))
        .expect_err("blank subject must be rejected");
    assert_eq!(e.code, "validation_error");
    assert_eq!(state.records.len(), before);
}

#[test]
fn out_of_range_numeric_grade_is_rejected_not_clamped() {
    let mut state = SessionState::empty();
    for bad in [-1.0, 100.5, f64::NAN] {
        let e = state
            .add(rec("Физика", 3.0, Grade::Numeric(bad), "Q1"))
            .expect_err("out-of-range numeric grade must be rejected");
        assert_eq!(e.code, "validation_error");
    }
    assert!(state.records.is_empty());

    state
        .add(rec("Физика", 3.0, Grade::Numeric(100.0), "Q1"))
        .expect("boundary value 100 is valid");
    state
        .add(rec("Химия", 3.0, Grade::Numeric(0.0), "Q1"))
        .expect("boundary value 0 is valid");
}

#[test]
fn negative_credits_are_rejected() {
    let mut state = SessionState::empty();
    let e = state
        .add(rec("Тарих", -1.0, Grade::Letter("B".into()), "Q1"))
        .expect_err("negative credits must be rejected");
    assert_eq!(e.code, "validation_error");
}

#[test]
fn unknown_letter_grade_is_accepted_by_policy() {
    let mut state = SessionState::empty();
    state
        .add(rec("Өнер", 2.0, Grade::Letter("Z".into()), "Q1"))
        .expect("unknown letters degrade to 0 points, they are not errors");
    let rows = calc::normalize_records(&state.records);
    assert_eq!(rows[0].gpa_points, 0.0);
}

#[test]
fn subject_is_stored_trimmed() {
    let mut state = SessionState::empty();
    state
        .add(rec("  Химия  ", 3.0, Grade::Letter("B".into()), "Q1"))
        .expect("add record");
    assert_eq!(state.records[0].subject, "Химия");
}

#[test]
fn params_with_unparsable_numeric_grade_fail_as_invalid_grade() {
    let e = store::record_from_params(&json!({
        "subject": "Физика",
        "credits": 3.0,
        "scoreType": "numeric",
        "grade": "abc",
        "period": "Q1"
    }))
    .expect_err("unparsable numeric grade");
    assert_eq!(e.code, "invalid_grade");
}

#[test]
fn params_accept_numeric_grade_as_string() {
    let record = store::record_from_params(&json!({
        "subject": "Физика",
        "credits": "3",
        "scoreType": "numeric",
        "grade": "86.5",
        "period": "Q1"
    }))
    .expect("numeric grade sent as a string");
    assert_eq!(record.grade, Grade::Numeric(86.5));
    assert_eq!(record.credits, 3.0);
}

#[test]
fn params_reject_unknown_score_type() {
    let e = store::record_from_params(&json!({
        "subject": "Физика",
        "credits": 3.0,
        "scoreType": "percentage",
        "grade": 86,
        "period": "Q1"
    }))
    .expect_err("unknown score type");
    assert_eq!(e.code, "validation_error");
}

#[test]
fn randomize_generates_well_formed_distinct_records() {
    let mut state = SessionState::empty();
    let generated = state.randomize(6);
    assert_eq!(generated, 6);
    assert_eq!(state.records.len(), 6);

    let subjects: HashSet<&str> = state.records.iter().map(|r| r.subject.as_str()).collect();
    assert_eq!(subjects.len(), 6, "subjects must be distinct");

    for r in &state.records {
        assert!(SUBJECT_CATALOG.contains(&r.subject.as_str()));
        assert!(CREDIT_CHOICES.contains(&r.credits));
        assert!(PERIOD_CHOICES.contains(&r.period.as_str()));
        match &r.grade {
            Grade::Letter(l) => assert!(LETTER_CHOICES.contains(&l.as_str())),
            Grade::Numeric(n) => assert!((0.0..=100.0).contains(n), "numeric grade {}", n),
        }
    }
}

#[test]
fn randomize_is_capped_at_the_subject_catalog() {
    let mut state = SessionState::seeded();
    let generated = state.randomize(50);
    assert_eq!(generated, SUBJECT_CATALOG.len());
    assert_eq!(state.records.len(), SUBJECT_CATALOG.len());
}

#[test]
fn seeded_session_matches_the_demo_gpa() {
    let state = SessionState::seeded();
    assert_eq!(state.records.len(), 6);
    let rows = calc::normalize_records(&state.records);
    // A*4 + 86->3*3 + B*2 + 92->4*2 + A*3 + 74->2*3 over 17 credits.
    let gpa = calc::compute_overall_gpa(&rows);
    assert!((gpa - 57.0 / 17.0).abs() < 1e-12, "gpa was {}", gpa);
}
