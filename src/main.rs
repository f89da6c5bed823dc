mod calc;
mod export;
mod fonts;
mod ipc;
mod store;

use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    // stdout carries the protocol, so logs go to stderr.
    let filter = EnvFilter::try_from_env("GPAD_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let report_font = match fonts::FontConfig::from_env().resolve() {
        Ok(path) => {
            tracing::info!(font = %path.display(), "report font resolved");
            Some(path)
        }
        Err(e) => {
            tracing::warn!("pdf export disabled: {}", e);
            None
        }
    };

    let mut state = ipc::AppState {
        session: store::SessionState::seeded(),
        report_font,
    };
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gpad session started");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply with an id; report and keep the loop alive.
                let _ = writeln!(
                    stdout,
                    "{{\"ok\":false,\"error\":{{\"code\":\"bad_json\",\"message\":\"{}\"}}}}",
                    e
                );
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
}
