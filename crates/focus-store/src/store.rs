//! SQLite-backed todo storage.

use crate::todo::{normalize_title, Todo};
use focus_config::DatabaseTarget;
use rusqlite::{params, Connection, Row};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from todo store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Lock error")]
    Lock,
    #[error("Failed to create database directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Title is required")]
    EmptyTitle,
}

const TODO_COLUMNS: &str = "id, title, done, created_at";

/// SQLite-backed todo storage. Every operation is one statement.
pub struct TodoStore {
    conn: Mutex<Connection>,
}

impl TodoStore {
    /// Opens (or creates) the database file, creating parent directories as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        info!("Database initialized at {}", path.display());
        Ok(store)
    }

    /// Creates an in-memory todo store (for testing and `:memory:` URLs).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    pub fn from_target(target: &DatabaseTarget) -> Result<Self, StoreError> {
        match target {
            DatabaseTarget::File(path) => Self::open(path),
            DatabaseTarget::Memory => {
                info!("Using in-memory database; todos will not survive a restart");
                Self::in_memory()
            }
        }
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL CHECK (length(trim(title)) > 0),
                done INTEGER NOT NULL DEFAULT 0,
                created_at TEXT DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );
            "#,
        )?;

        Ok(())
    }

    /// Lists every todo, newest id first.
    pub fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {TODO_COLUMNS} FROM todos ORDER BY id DESC"
        ))?;
        let rows = stmt.query_map([], todo_from_row)?;

        let mut todos = Vec::new();
        for row in rows {
            todos.push(row?);
        }

        Ok(todos)
    }

    /// Retrieves a todo by id.
    pub fn get(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let result = conn.query_row(
            &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
            params![id],
            todo_from_row,
        );

        match result {
            Ok(todo) => Ok(Some(todo)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Inserts a todo with a trimmed title and returns the stored row.
    pub fn create(&self, title: &str) -> Result<Todo, StoreError> {
        let title = normalize_title(title).ok_or(StoreError::EmptyTitle)?;
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let todo = conn.query_row(
            &format!("INSERT INTO todos (title) VALUES (?1) RETURNING {TODO_COLUMNS}"),
            params![title],
            todo_from_row,
        )?;

        info!(id = todo.id, "Created todo");
        Ok(todo)
    }

    /// Sets `done` on one row. Returns whether the id matched.
    pub fn set_done(&self, id: i64, done: bool) -> Result<bool, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let changed = conn.execute(
            "UPDATE todos SET done = ?1 WHERE id = ?2",
            params![done, id],
        )?;

        if changed == 0 {
            debug!(id, "set_done matched no todo");
        } else {
            info!(id, done, "Updated todo");
        }
        Ok(changed > 0)
    }

    /// Deletes one row. Returns whether the id matched.
    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let removed = conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;

        if removed == 0 {
            debug!(id, "delete matched no todo");
        } else {
            info!(id, "Deleted todo");
        }
        Ok(removed > 0)
    }

    /// Number of stored todos.
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM todos", [], |r| r.get(0))?;
        Ok(count as usize)
    }
}

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        done: row.get(2)?,
        created_at: row.get(3)?,
    })
}
