use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::store;
use serde_json::json;

const DEFAULT_RANDOM_COUNT: u64 = 6;

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "records": state.session.records,
            "recordCount": state.session.records.len(),
        }),
    )
}

fn handle_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let record = match store::record_from_params(&req.params) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(code = e.code, "record rejected: {}", e.message);
            return err(&req.id, e.code, e.message, None);
        }
    };
    if let Err(e) = state.session.add(record) {
        tracing::warn!(code = e.code, "record rejected: {}", e.message);
        return err(&req.id, e.code, e.message, None);
    }
    tracing::debug!(count = state.session.records.len(), "record added");
    ok(
        &req.id,
        json!({ "recordCount": state.session.records.len() }),
    )
}

fn handle_clear(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.session.clear();
    tracing::debug!("records cleared");
    ok(&req.id, json!({ "recordCount": 0 }))
}

fn handle_randomize(state: &mut AppState, req: &Request) -> serde_json::Value {
    let count = req
        .params
        .get("count")
        .and_then(|v| v.as_u64())
        .unwrap_or(DEFAULT_RANDOM_COUNT) as usize;
    let generated = state.session.randomize(count);
    tracing::debug!(generated, "records randomized");
    ok(&req.id, json!({ "recordCount": generated }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "records.list" => Some(handle_list(state, req)),
        "records.add" => Some(handle_add(state, req)),
        "records.clear" => Some(handle_clear(state, req)),
        "records.randomize" => Some(handle_randomize(state, req)),
        _ => None,
    }
}
