//! SQLite connection wrapper (lightweight for CLI and endpoint usage).

use rusqlite::{Connection, Result};
use std::path::Path;
use std::time::Duration;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        // Same-key writers serialize on IMMEDIATE transactions; the busy
        // timeout makes contending connections wait instead of failing.
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self { conn })
    }
}
