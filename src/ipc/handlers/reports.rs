use crate::calc;
use crate::export::{pdf, xlsx};
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use std::path::PathBuf;

fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

fn write_artifact(req: &Request, out_path: &str, bytes: &[u8]) -> Result<(), serde_json::Value> {
    let out = PathBuf::from(out_path);
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| err(&req.id, "io_error", e.to_string(), None))?;
        }
    }
    std::fs::write(&out, bytes).map_err(|e| err(&req.id, "io_error", e.to_string(), None))
}

fn artifact_result(out_path: &str, file_name: &str, content_type: &str, len: usize) -> serde_json::Value {
    json!({
        "path": out_path,
        "fileName": file_name,
        "contentType": content_type,
        "byteCount": len,
    })
}

fn handle_export_xlsx(state: &mut AppState, req: &Request) -> serde_json::Value {
    let out_path = match required_str(req, "outPath") {
        Ok(v) => v,
        Err(e) => return e,
    };

    let rows = calc::normalize_records(&state.session.records);
    let summaries = calc::compute_period_summaries(&rows);
    let bytes = match xlsx::build_workbook(&rows, &summaries) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "export_failed", e.to_string(), None),
    };
    if let Err(e) = write_artifact(req, &out_path, &bytes) {
        return e;
    }
    tracing::debug!(path = %out_path, bytes = bytes.len(), "xlsx report written");
    ok(
        &req.id,
        artifact_result(&out_path, xlsx::FILE_NAME, xlsx::CONTENT_TYPE, bytes.len()),
    )
}

fn handle_export_pdf(state: &mut AppState, req: &Request) -> serde_json::Value {
    let out_path = match required_str(req, "outPath") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let Some(font_path) = state.report_font.clone() else {
        return err(
            &req.id,
            "font_unavailable",
            "no report font with required script coverage; set GPAD_REPORT_FONT",
            None,
        );
    };

    let rows = calc::normalize_records(&state.session.records);
    let bytes = match pdf::build_report(&rows, &state.session.student, &font_path) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "export_failed", e.to_string(), None),
    };
    if let Err(e) = write_artifact(req, &out_path, &bytes) {
        return e;
    }
    tracing::debug!(path = %out_path, bytes = bytes.len(), "pdf report written");
    ok(
        &req.id,
        artifact_result(&out_path, pdf::FILE_NAME, pdf::CONTENT_TYPE, bytes.len()),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "report.exportXlsx" => Some(handle_export_xlsx(state, req)),
        "report.exportPdf" => Some(handle_export_pdf(state, req)),
        _ => None,
    }
}
