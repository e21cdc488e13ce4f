//! HTTP ingestion endpoint for the SMS gateway.
//!
//! A small synchronous server: POST /log takes one JSON entry with a
//! `type` discriminator and routes it straight to the matching
//! aggregator. Unknown types are acknowledged and ignored so the SMS
//! gateway never retries chatter it shouldn't. Validation failures come
//! back as 400 with nothing written; storage failures as 500 so the
//! ingester may retry.

use crate::config::Config;
use crate::core::hours::HoursLogic;
use crate::core::mileage::MileageLogic;
use crate::db::log::ttlog;
use crate::db::migrate::check_schema;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entry::LogEntry;
use crate::ui::messages::{info, warning};
use chrono::Local;
use serde_json::json;
use std::io::Read;
use tiny_http::{Header, Method, Request, Response, Server};

pub struct ServeLogic;

impl ServeLogic {
    /// Bind and serve forever. The schema must already exist: request
    /// handling never creates tables implicitly.
    pub fn run(cfg: &Config, addr: &str) -> AppResult<()> {
        let pool = DbPool::new(&cfg.database)?;

        let missing = check_schema(&pool.conn)?;
        if !missing.is_empty() {
            return Err(AppError::Migration(format!(
                "missing tables {:?}; run `biztrack init` first",
                missing
            )));
        }

        let server = Server::http(addr).map_err(|e| AppError::Server(e.to_string()))?;

        info(format!("Ingestion endpoint listening on http://{}", addr));
        if let Err(e) = ttlog(&pool.conn, "serve", addr, "Ingestion endpoint started") {
            warning(format!("Failed to write internal log: {}", e));
        }

        Self::serve(pool, server)
    }

    /// Request loop, split from `run` so tests can drive it against an
    /// ephemeral-port server.
    pub fn serve(mut pool: DbPool, server: Server) -> AppResult<()> {
        for mut request in server.incoming_requests() {
            let (code, body) = route(&mut pool, &mut request);

            let mut response = Response::from_string(body.to_string()).with_status_code(code);
            if let Ok(h) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
                response.add_header(h);
            }

            if let Err(e) = request.respond(response) {
                warning(format!("Failed to send response: {}", e));
            }
        }
        Ok(())
    }
}

fn route(pool: &mut DbPool, request: &mut Request) -> (u16, serde_json::Value) {
    if request.method() != &Method::Post || request.url() != "/log" {
        return (
            404,
            json!({"status": "error", "message": "Not found"}),
        );
    }

    let mut body = String::new();
    if request.as_reader().read_to_string(&mut body).is_err() {
        return (
            400,
            json!({"status": "error", "message": "Unreadable request body"}),
        );
    }

    handle_entry(pool, &body, &Local::now().to_rfc3339())
}

/// Handle one entry body: parse, stamp `received_at`, dispatch to the
/// aggregator, map the result onto a status/message pair.
pub fn handle_entry(pool: &mut DbPool, body: &str, now: &str) -> (u16, serde_json::Value) {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            return (
                400,
                json!({"status": "error", "message": format!("Malformed JSON: {}", e)}),
            );
        }
    };

    match value.get("type").and_then(|t| t.as_str()) {
        Some("mileage") | Some("hours") => {}
        _ => {
            return (
                200,
                json!({"status": "ignored", "message": "Unsupported log type"}),
            );
        }
    }

    let mut entry: LogEntry = match serde_json::from_value(value) {
        Ok(e) => e,
        Err(e) => {
            return (
                400,
                json!({"status": "error", "message": format!("Malformed entry: {}", e)}),
            );
        }
    };
    entry.stamp_received(now);

    let result = match entry {
        LogEntry::Mileage(m) => MileageLogic::record(pool, m).map(|_| ()),
        LogEntry::Hours(h) => HoursLogic::record(pool, &h).map(|_| ()),
    };

    match result {
        Ok(()) => (200, json!({"status": "logged", "message": "Entry saved"})),
        Err(e) if e.is_validation() => {
            (400, json!({"status": "error", "message": e.to_string()}))
        }
        Err(AppError::Conflict(msg)) => (409, json!({"status": "error", "message": msg})),
        Err(e) => (
            500,
            json!({"status": "error", "message": format!("Storage failure, retry later: {}", e)}),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use rusqlite::Connection;

    fn mem_pool() -> DbPool {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        DbPool { conn }
    }

    #[test]
    fn valid_mileage_entry_is_logged() {
        let mut pool = mem_pool();
        let (code, body) = handle_entry(
            &mut pool,
            r#"{"type":"mileage","name":"Kevin","date":"2025-06-07","position":"start","distance":100.5}"#,
            "2025-06-07T08:00:00-04:00",
        );
        assert_eq!(code, 200);
        assert_eq!(body["status"], "logged");

        let count: i64 = pool
            .conn
            .query_row("SELECT COUNT(*) FROM mileage_raw", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
        let received: String = pool
            .conn
            .query_row("SELECT received_at FROM mileage_raw", [], |r| r.get(0))
            .unwrap();
        assert_eq!(received, "2025-06-07T08:00:00-04:00");
    }

    #[test]
    fn unsupported_type_is_ignored_with_200() {
        let mut pool = mem_pool();
        let (code, body) = handle_entry(
            &mut pool,
            r#"{"type":"expenses","amount":12.0}"#,
            "2025-06-07T08:00:00-04:00",
        );
        assert_eq!(code, 200);
        assert_eq!(body["status"], "ignored");
    }

    #[test]
    fn validation_failure_is_400_and_writes_nothing() {
        let mut pool = mem_pool();
        let (code, body) = handle_entry(
            &mut pool,
            r#"{"type":"mileage","name":"Kevin","date":"2025-06-07","position":"sideways","distance":100.5}"#,
            "2025-06-07T08:00:00-04:00",
        );
        assert_eq!(code, 400);
        assert_eq!(body["status"], "error");

        let count: i64 = pool
            .conn
            .query_row("SELECT COUNT(*) FROM mileage_raw", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn malformed_json_is_400() {
        let mut pool = mem_pool();
        let (code, _) = handle_entry(&mut pool, "not json at all", "2025-06-07T08:00:00-04:00");
        assert_eq!(code, 400);
    }

    #[test]
    fn replayed_mileage_id_is_409() {
        let mut pool = mem_pool();
        let body =
            r#"{"type":"mileage","id":"fixed-id","name":"Kevin","date":"2025-06-07","position":"start","distance":100.5}"#;
        let (code, _) = handle_entry(&mut pool, body, "2025-06-07T08:00:00-04:00");
        assert_eq!(code, 200);
        let (code, resp) = handle_entry(&mut pool, body, "2025-06-07T08:05:00-04:00");
        assert_eq!(code, 409);
        assert_eq!(resp["status"], "error");
    }
}
