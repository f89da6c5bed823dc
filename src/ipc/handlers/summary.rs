use crate::calc;
use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use std::collections::HashSet;

/// Everything the presentation layer renders from: the normalized table,
/// the overall GPA, the metric-card counts and the per-period GPA table
/// (already in chronological order for the trend chart).
fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let rows = calc::normalize_records(&state.session.records);
    let overall_gpa = calc::compute_overall_gpa(&rows);
    let period_gpa = calc::compute_period_summaries(&rows);
    let subject_count = rows
        .iter()
        .map(|r| r.subject.as_str())
        .collect::<HashSet<_>>()
        .len();

    ok(
        &req.id,
        json!({
            "records": rows,
            "overallGpa": overall_gpa,
            "recordCount": rows.len(),
            "subjectCount": subject_count,
            "periodGpa": period_gpa,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "summary.get" => Some(handle_get(state, req)),
        _ => None,
    }
}
