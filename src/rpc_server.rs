//! navpanel RPC server: JSON-RPC over stdin/stdout for an out-of-process UI.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"website.add", "params":{"name":"...","url":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Logs go to stderr so stdout carries protocol lines only.

use std::time::Instant;

use clap::Parser;
use navpanel::app::App;
use navpanel::config::{AppConfig, ConfigArgs};
use navpanel::logging;
use navpanel::rpc_handler::handle_method;

use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

/// JSON-RPC server for an out-of-process navpanel UI.
#[derive(Parser)]
#[command(name = "navpanel-rpc", version)]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,
}

/// Fixed-window rate limiter over all methods.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self {
            window_start: Instant::now(),
            request_count: 0,
            max_per_second,
        }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

async fn send(stdout: &mut io::Stdout, message: &Value) -> std::io::Result<()> {
    let mut line = message.to_string();
    line.push('\n');
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let config = match AppConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}; using defaults", e);
            AppConfig::default()
        }
    };
    logging::init(&config.log_filter);

    let mut app = App::new(config);
    if let Err(e) = app.startup().await {
        warn!("Initial load failed: {}", e);
    }

    let mut stdout = io::stdout();
    send(
        &mut stdout,
        &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}),
    )
    .await?;

    let mut rate_limiter = RateLimiter::new(200);
    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                send(&mut stdout, &json!({"id": null, "error": format!("parse error: {}", e)}))
                    .await?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            send(&mut stdout, &json!({"id": id, "error": "rate limit exceeded"})).await?;
            continue;
        }

        let method = req.get("method").and_then(Value::as_str).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or_else(|| json!({}));

        let response = match handle_method(&mut app, method, &params).await {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => {
                error!("{} failed: {}", method, err);
                json!({"id": id, "error": err})
            }
        };
        send(&mut stdout, &response).await?;
    }

    app.shutdown();
    info!("stdin closed");
    Ok(())
}
