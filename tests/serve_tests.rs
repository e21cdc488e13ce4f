//! End-to-end checks of the HTTP ingestion endpoint against an
//! ephemeral-port server.

use biztrack::core::serve::ServeLogic;
use biztrack::db::initialize::init_db;
use biztrack::db::pool::DbPool;
use serde_json::json;
use std::thread;

mod common;
use common::{count, open, setup_test_db, total_miles};

fn spawn_endpoint(db_path: &str) -> String {
    let pool = DbPool::new(db_path).expect("open pool");
    init_db(&pool.conn).expect("init schema");

    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind server");
    let addr = server.server_addr().to_ip().expect("ip addr");
    thread::spawn(move || {
        let _ = ServeLogic::serve(pool, server);
    });
    format!("http://{}/log", addr)
}

#[test]
fn test_endpoint_logs_mileage_and_hours() {
    let db_path = setup_test_db("serve_logs");
    let url = spawn_endpoint(&db_path);
    let client = reqwest::blocking::Client::new();

    for body in [
        json!({"type": "mileage", "name": "Kevin", "date": "2025-06-07", "position": "start", "distance": 100.5}),
        json!({"type": "mileage", "name": "Kevin", "date": "2025-06-07", "position": "end", "distance": 160.5}),
        json!({"type": "hours", "date": "2025-06-07", "hours_today": 8, "hours_week": 32}),
    ] {
        let resp = client.post(&url).json(&body).send().expect("send");
        assert_eq!(resp.status().as_u16(), 200);
        let reply: serde_json::Value = resp.json().expect("json reply");
        assert_eq!(reply["status"], "logged");
        assert_eq!(reply["message"], "Entry saved");
    }

    let conn = open(&db_path);
    assert_eq!(count(&conn, "mileage_raw"), 2);
    assert_eq!(count(&conn, "hours"), 1);
    let total = total_miles(&conn, "Kevin", "2025-06-07").expect("summary row");
    assert!((total - 60.0).abs() < 1e-9);

    // The endpoint stamps received_at when the gateway didn't.
    let received: String = conn
        .query_row("SELECT received_at FROM mileage_raw LIMIT 1", [], |r| r.get(0))
        .expect("received_at");
    assert!(!received.is_empty());
}

#[test]
fn test_endpoint_ignores_unsupported_type() {
    let db_path = setup_test_db("serve_ignored");
    let url = spawn_endpoint(&db_path);
    let client = reqwest::blocking::Client::new();

    let resp = client
        .post(&url)
        .json(&json!({"type": "expenses", "amount": 12.0}))
        .send()
        .expect("send");
    assert_eq!(resp.status().as_u16(), 200);
    let reply: serde_json::Value = resp.json().expect("json reply");
    assert_eq!(reply["status"], "ignored");
}

#[test]
fn test_endpoint_rejects_invalid_entry_without_writes() {
    let db_path = setup_test_db("serve_invalid");
    let url = spawn_endpoint(&db_path);
    let client = reqwest::blocking::Client::new();

    let resp = client
        .post(&url)
        .json(&json!({"type": "mileage", "name": "Kevin", "date": "2025-06-07", "position": "start", "distance": -4.0}))
        .send()
        .expect("send");
    assert_eq!(resp.status().as_u16(), 400);
    let reply: serde_json::Value = resp.json().expect("json reply");
    assert_eq!(reply["status"], "error");

    let conn = open(&db_path);
    assert_eq!(count(&conn, "mileage_raw"), 0);
}

#[test]
fn test_endpoint_unknown_route_is_404() {
    let db_path = setup_test_db("serve_404");
    let url = spawn_endpoint(&db_path);
    let client = reqwest::blocking::Client::new();

    let resp = client
        .get(url.replace("/log", "/status"))
        .send()
        .expect("send");
    assert_eq!(resp.status().as_u16(), 404);
}
