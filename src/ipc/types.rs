use std::path::PathBuf;

use crate::store::SessionState;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub session: SessionState,
    /// Resolved once at startup; `None` disables PDF export with a clear
    /// error instead of corrupting non-Latin text.
    pub report_font: Option<PathBuf>,
}
