mod access;
mod aggregate;
mod assistant;
mod config;
mod filters;
mod ipc;
mod logging;
mod model;
mod navigation;
mod seed;
mod session;
mod store;
mod views;

use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    let cfg = config::Config::parse();
    logging::init(&cfg.log_level, cfg.log_json);

    let today = cfg.today();
    let store = store::EntityStore::load(seed::generate(cfg.seed, today))
        .context("generated dataset failed validation")?;
    let chat = assistant::HttpChatClient::new(cfg.assistant()).context("building chat client")?;
    tracing::info!(
        seed = cfg.seed,
        %today,
        endpoint = %cfg.assistant_endpoint,
        students = store.students().len(),
        "estacaod ready"
    );

    let mut state = ipc::AppState::new(store, Box::new(chat), cfg.seed, today);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // No id to answer to.
                tracing::warn!(error = %e, "bad request line");
                let resp = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                writeln!(stdout, "{resp}")?;
                stdout.flush()?;
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        writeln!(stdout, "{resp}")?;
        stdout.flush()?;
    }
    tracing::info!("stdin closed, exiting");
    Ok(())
}
