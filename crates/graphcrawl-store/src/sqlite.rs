//! SQLite implementation of the GraphStore trait.
//!
//! This is the primary storage backend. The database file is the whole
//! durable state of a crawl: reopening it in a fresh process is enough to
//! resume exploration.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use rusqlite::{params, Connection};

use graphcrawl_core::{Action, Edge, PathStep, StateId};

use crate::error::{Result, StoreError};
use crate::migration::{self, now_millis};
use crate::path;
use crate::traits::{GraphStore, InsertResult};

/// How long a writer waits for another process holding the database lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. Each trait method runs under one lock
/// acquisition, and multi-statement writes run in a transaction, so every
/// operation is atomic on its own.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let _mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Applied schema version.
    pub fn schema_version(&self) -> Result<u32> {
        self.with_conn(|conn| migration::schema_version(conn))
    }

    /// Execute a blocking operation on the connection.
    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        f(&conn)
    }

    /// Execute a blocking operation that needs mutable access.
    fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        f(&mut conn)
    }
}

fn decode_action(code: i64) -> Result<Action> {
    u8::try_from(code)
        .ok()
        .and_then(Action::from_u8)
        .ok_or_else(|| StoreError::InvalidData(format!("unknown action code {} in edges", code)))
}

fn insert_state(conn: &Connection, state: &StateId, now: i64) -> Result<InsertResult> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO states (state_id, discovered_at) VALUES (?1, ?2)",
        params![state.as_str(), now],
    )?;
    Ok(if changed == 1 {
        InsertResult::Inserted
    } else {
        InsertResult::AlreadyExists
    })
}

/// Actions with at least one recorded edge out of `state`.
fn performed_actions(conn: &Connection, state: &StateId) -> Result<HashSet<Action>> {
    let mut stmt = conn.prepare_cached("SELECT DISTINCT action FROM edges WHERE from_state = ?1")?;
    let codes = stmt
        .query_map(params![state.as_str()], |row| row.get::<_, i64>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    codes.into_iter().map(decode_action).collect()
}

impl GraphStore for SqliteStore {
    fn add_state_if_new(&self, state: &StateId) -> Result<InsertResult> {
        self.with_conn(|conn| insert_state(conn, state, now_millis()))
    }

    fn add_edge(&self, from: &StateId, action: Action, to: &StateId) -> Result<InsertResult> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let now = now_millis();

            insert_state(&tx, from, now)?;
            insert_state(&tx, to, now)?;

            let changed = tx.execute(
                "INSERT OR IGNORE INTO edges (from_state, action, to_state, discovered_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![from.as_str(), action.to_u8() as i64, to.as_str(), now],
            )?;

            tx.commit()?;
            Ok(if changed == 1 {
                InsertResult::Inserted
            } else {
                InsertResult::AlreadyExists
            })
        })
    }

    fn frontier_states(&self, vocabulary: &[Action]) -> Result<Vec<StateId>> {
        self.with_conn(|conn| {
            let mut performed: HashMap<String, HashSet<Action>> = HashMap::new();
            let mut stmt = conn.prepare("SELECT DISTINCT from_state, action FROM edges")?;
            let rows = stmt
                .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            for (from, code) in rows {
                performed.entry(from).or_default().insert(decode_action(code)?);
            }

            let mut stmt = conn.prepare("SELECT state_id FROM states ORDER BY seq")?;
            let states = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(states
                .into_iter()
                .filter(|state| match performed.get(state) {
                    Some(done) => vocabulary.iter().any(|a| !done.contains(a)),
                    None => !vocabulary.is_empty(),
                })
                .map(StateId::from)
                .collect())
        })
    }

    fn unperformed_actions(&self, state: &StateId, vocabulary: &[Action]) -> Result<Vec<Action>> {
        self.with_conn(|conn| {
            let performed = performed_actions(conn, state)?;
            Ok(vocabulary
                .iter()
                .copied()
                .filter(|a| !performed.contains(a))
                .collect())
        })
    }

    fn shortest_path(&self, from: &StateId, to: &StateId) -> Result<Vec<PathStep>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT action, to_state FROM edges
                 WHERE from_state = ?1
                 ORDER BY action, to_state",
            )?;

            path::shortest_path(from, to, |state| {
                let rows = stmt
                    .query_map(params![state.as_str()], |row| {
                        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;

                rows.into_iter()
                    .map(|(code, to)| decode_action(code).map(|action| (action, StateId::from(to))))
                    .collect()
            })
        })
    }

    fn has_state(&self, state: &StateId) -> Result<bool> {
        self.with_conn(|conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM states WHERE state_id = ?1)",
                params![state.as_str()],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    fn state_count(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM states", [], |row| row.get(0))?;
            Ok(count as usize)
        })
    }

    fn edge_count(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM edges", [], |row| row.get(0))?;
            Ok(count as usize)
        })
    }

    fn states(&self) -> Result<Vec<StateId>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT state_id FROM states ORDER BY seq")?;
            let states = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(states.into_iter().map(StateId::from).collect())
        })
    }

    fn edges(&self) -> Result<Vec<Edge>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT from_state, action, to_state FROM edges
                 ORDER BY from_state, action, to_state",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            rows.into_iter()
                .map(|(from, code, to)| decode_action(code).map(|action| Edge::new(from, action, to)))
                .collect()
        })
    }
}
