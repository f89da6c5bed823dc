use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!(state.session.student))
}

/// Partial update: only the fields present in params change. Student info is
/// free text with no validation beyond presence.
fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student = &mut state.session.student;
    let fields: [(&str, &mut String); 5] = [
        ("name", &mut student.name),
        ("className", &mut student.class_name),
        ("studentId", &mut student.student_id),
        ("school", &mut student.school),
        ("academicYear", &mut student.academic_year),
    ];
    for (key, slot) in fields {
        if let Some(v) = req.params.get(key).and_then(|v| v.as_str()) {
            *slot = v.to_string();
        }
    }
    tracing::debug!("student info updated");
    ok(&req.id, json!(state.session.student))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "student.get" => Some(handle_get(state, req)),
        "student.update" => Some(handle_update(state, req)),
        _ => None,
    }
}
