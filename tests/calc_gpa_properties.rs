#[path = "../src/calc.rs"]
mod calc;

use calc::{Grade, GradeRecord, PeriodType};

fn rec(subject: &str, credits: f64, grade: Grade, period: &str) -> GradeRecord {
    GradeRecord {
        subject: subject.to_string(),
        credits,
        grade,
        period: period.to_string(),
    }
}

#[test]
fn overall_gpa_is_a_credit_weighted_mean() {
    let records = vec![
        rec("Математика", 4.0, Grade::Letter("A".into()), "Q1"),
        rec("Химия", 2.0, Grade::Letter("C".into()), "Q1"),
    ];
    let rows = calc::normalize_records(&records);
    // (4*4 + 2*2) / (4 + 2)
    let gpa = calc::compute_overall_gpa(&rows);
    assert!((gpa - 20.0 / 6.0).abs() < 1e-12, "gpa was {}", gpa);
}

#[test]
fn empty_table_and_zero_credits_yield_zero_gpa() {
    assert_eq!(calc::compute_overall_gpa(&[]), 0.0);

    let records = vec![rec("Өнер", 0.0, Grade::Letter("A".into()), "Q1")];
    let rows = calc::normalize_records(&records);
    assert_eq!(calc::compute_overall_gpa(&rows), 0.0);
}

#[test]
fn normalized_rows_carry_weighted_points_and_period_fields() {
    let records = vec![rec("Физика", 3.0, Grade::Numeric(86.0), "q2")];
    let rows = calc::normalize_records(&records);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.gpa_points, 3.0);
    assert_eq!(row.weighted_points, 9.0);
    assert_eq!(row.period_type, PeriodType::Quarter);
    assert_eq!(row.period_name, "Q2");
    assert!(row.subject_display.ends_with("Физика"));
}

#[test]
fn negative_credits_normalize_to_zero_weight() {
    let records = vec![rec("Тарих", -3.0, Grade::Letter("A".into()), "Q1")];
    let rows = calc::normalize_records(&records);
    assert_eq!(rows[0].credits, 0.0);
    assert_eq!(rows[0].weighted_points, 0.0);
}

#[test]
fn period_summaries_sort_chronologically() {
    let records = vec![
        rec("Биология", 3.0, Grade::Numeric(74.0), "S2"),
        rec("Математика", 4.0, Grade::Letter("A".into()), "Q1"),
        rec("Химия", 3.0, Grade::Letter("B".into()), "Q3"),
        rec("Информатика", 3.0, Grade::Letter("A".into()), "S1"),
    ];
    let rows = calc::normalize_records(&records);
    let summaries = calc::compute_period_summaries(&rows);
    let names: Vec<&str> = summaries.iter().map(|s| s.period_name.as_str()).collect();
    assert_eq!(names, vec!["Q1", "Q3", "S1", "S2"]);
}

#[test]
fn unrecognized_periods_sort_after_recognized_ones() {
    let records = vec![
        rec("Өнер", 2.0, Grade::Letter("B".into()), "midterm"),
        rec("Математика", 4.0, Grade::Letter("A".into()), "Q2"),
        rec("География", 2.0, Grade::Letter("C".into()), ""),
    ];
    let rows = calc::normalize_records(&records);
    let summaries = calc::compute_period_summaries(&rows);
    let names: Vec<&str> = summaries.iter().map(|s| s.period_name.as_str()).collect();
    assert_eq!(names[0], "Q2");
    assert!(names[1..].contains(&"MIDTERM"));
    assert!(names[1..].contains(&"N/A"));
    assert_eq!(
        summaries[0].period_type,
        PeriodType::Quarter
    );
}

#[test]
fn per_period_gpa_uses_group_totals() {
    let records = vec![
        rec("Математика", 4.0, Grade::Letter("A".into()), "Q1"),
        rec("Физика", 2.0, Grade::Numeric(72.0), "Q1"),
        rec("Тарих", 3.0, Grade::Letter("B".into()), "S1"),
    ];
    let rows = calc::normalize_records(&records);
    let summaries = calc::compute_period_summaries(&rows);
    assert_eq!(summaries.len(), 2);

    let q1 = &summaries[0];
    assert_eq!(q1.period_name, "Q1");
    assert_eq!(q1.total_credits, 6.0);
    assert_eq!(q1.total_weighted_points, 20.0);
    assert!((q1.gpa - 20.0 / 6.0).abs() < 1e-12);

    let s1 = &summaries[1];
    assert_eq!(s1.period_name, "S1");
    assert_eq!(s1.gpa, 3.0);
}
