//! JSON-lines event loop.
//!
//! PROTOCOL
//! ========
//! Each stdin line is one event in the `salon::event::Event` serde shape,
//! e.g. `{"type":"select_task","taskId":"a"}`. Every non-blank line gets
//! exactly one stdout line back: `{"outcomes":[...],"state":{...},"ui":{...},
//! "progress":{...}}` on success, `{"error":"..."}` for input that does not
//! parse. A tokio interval feeds `Tick` events silently. EOF ends the loop.

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_test;

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use salon::event::Event;
use salon::session::Session;
use salon::storage::StorageBridge;
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

#[derive(Serialize)]
struct ErrorLine<'a> {
    error: &'a str,
}

/// Current time as milliseconds since the Unix epoch.
fn now_ms() -> u64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    u64::try_from(dur.as_millis()).unwrap_or(u64::MAX)
}

/// Drive `session` from `input` until EOF, writing replies to `output`.
///
/// # Errors
///
/// Returns the I/O error if reading input or writing output fails.
pub async fn run<S, R, W>(mut session: Session<S>, input: R, mut output: W, tick: Duration) -> std::io::Result<()>
where
    S: StorageBridge,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let tick_ms = u64::try_from(tick.as_millis()).unwrap_or(u64::MAX);
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await;

    let mut lines = input.lines();
    let mut handled: u64 = 0;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if let Some(reply) = handle_line(&mut session, &line, now_ms()) {
                    output.write_all(reply.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                    output.flush().await?;
                    handled += 1;
                }
            }
            _ = interval.tick() => {
                session.dispatch(Event::Tick { delta_ms: tick_ms }, now_ms());
            }
        }
    }

    info!(handled, "input closed; session ended");
    Ok(())
}

/// Handle one input line. Blank lines produce no reply.
pub fn handle_line<S: StorageBridge>(session: &mut Session<S>, line: &str, now_ms: u64) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let event: Event = match serde_json::from_str(line) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "rejected input line");
            return Some(error_line(&e.to_string()));
        }
    };
    debug!(event = event.kind(), "input event");
    let outcomes = session.dispatch(event, now_ms);
    match serde_json::to_string(&session.report(outcomes)) {
        Ok(reply) => Some(reply),
        Err(e) => {
            warn!(error = %e, "failed to encode report");
            Some(error_line(&e.to_string()))
        }
    }
}

fn error_line(message: &str) -> String {
    serde_json::to_string(&ErrorLine { error: message }).unwrap_or_else(|_| String::from(r#"{"error":"unencodable"}"#))
}
