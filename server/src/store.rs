//! SQLite-backed `TodoRepository` over the `todo_items` table.

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};

use dashboard_core::{NewTodoItem, StoreError, TodoId, TodoItem, TodoRepository};

const STORED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SELECT_COLUMNS: &str = r#"SELECT id, title, description, "from", "to", sort_order FROM todo_items"#;

pub struct SqliteTodoRepo {
    conn: Connection,
}

impl SqliteTodoRepo {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::new(format!("failed to create db dir {}: {e}", parent.display()))
            })?;
        }
        let conn = Connection::open(path)
            .map_err(|e| StoreError::new(format!("failed to open db {}: {e}", path.display())))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(StoreError::new)?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::new)?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl TodoRepository for SqliteTodoRepo {
    fn list_ordered(&self) -> Result<Vec<TodoItem>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY sort_order ASC, id ASC"))
            .map_err(StoreError::new)?;
        let rows = stmt.query_map([], row_to_item).map_err(StoreError::new)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StoreError::new)
    }

    fn find_by_id(&self, id: TodoId) -> Result<Option<TodoItem>, StoreError> {
        self.conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                row_to_item,
            )
            .optional()
            .map_err(StoreError::new)
    }

    fn insert(&mut self, item: NewTodoItem) -> Result<TodoItem, StoreError> {
        self.conn
            .execute(
                r#"INSERT INTO todo_items (title, description, "from", "to", sort_order)
                   VALUES (?1, ?2, ?3, ?4, ?5)"#,
                params![
                    item.title,
                    item.description,
                    to_column(item.range.from),
                    to_column(item.range.to),
                    item.sort_order
                ],
            )
            .map_err(StoreError::new)?;
        Ok(TodoItem {
            id: self.conn.last_insert_rowid(),
            title: item.title,
            description: item.description,
            from: item.range.from,
            to: item.range.to,
            sort_order: item.sort_order,
        })
    }

    fn update(&mut self, item: &TodoItem) -> Result<bool, StoreError> {
        let changed = self
            .conn
            .execute(
                r#"UPDATE todo_items SET title = ?1, description = ?2, "from" = ?3, "to" = ?4
                   WHERE id = ?5"#,
                params![
                    item.title,
                    item.description,
                    to_column(item.from),
                    to_column(item.to),
                    item.id
                ],
            )
            .map_err(StoreError::new)?;
        Ok(changed > 0)
    }

    fn delete(&mut self, id: TodoId) -> Result<bool, StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM todo_items WHERE id = ?1", params![id])
            .map_err(StoreError::new)?;
        Ok(changed > 0)
    }

    fn max_sort_order(&self) -> Result<Option<i64>, StoreError> {
        self.conn
            .query_row("SELECT MAX(sort_order) FROM todo_items", [], |row| row.get(0))
            .map_err(StoreError::new)
    }

    /// Applies the whole batch in one transaction.
    fn apply_sort_orders(&mut self, orders: &[(TodoId, i64)]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction().map_err(StoreError::new)?;
        let mut updated = 0;
        {
            let mut stmt = tx
                .prepare("UPDATE todo_items SET sort_order = ?1 WHERE id = ?2")
                .map_err(StoreError::new)?;
            for (id, sort_order) in orders {
                updated += stmt
                    .execute(params![sort_order, id])
                    .map_err(StoreError::new)?;
            }
        }
        tx.commit().map_err(StoreError::new)?;
        Ok(updated)
    }
}

fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
CREATE TABLE IF NOT EXISTS todo_items (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  title TEXT NOT NULL,
  description TEXT,
  "from" TEXT,
  "to" TEXT,
  sort_order INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_todo_items_sort_order ON todo_items(sort_order);
"#,
    )
    .map_err(|e| StoreError::new(format!("failed to initialize schema: {e}")))
}

fn row_to_item(row: &Row) -> rusqlite::Result<TodoItem> {
    Ok(TodoItem {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        from: from_column(row, "from")?,
        to: from_column(row, "to")?,
        sort_order: row.get("sort_order")?,
    })
}

fn to_column(value: Option<NaiveDateTime>) -> Option<String> {
    value.map(|at| at.format(STORED_DATE_FORMAT).to_string())
}

fn from_column(row: &Row, column: &str) -> rusqlite::Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(column)?;
    raw.map(|text| {
        NaiveDateTime::parse_from_str(&text, STORED_DATE_FORMAT).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::DateRange;

    fn new_item(title: &str, sort_order: i64) -> NewTodoItem {
        NewTodoItem {
            title: title.to_string(),
            description: None,
            range: DateRange::default(),
            sort_order,
        }
    }

    #[test]
    fn sqlite_repo_round_trip() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut repo = SqliteTodoRepo::open(tmp.path()).unwrap();

        let from = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let created = repo
            .insert(NewTodoItem {
                title: "hello".to_string(),
                description: Some("world".to_string()),
                range: DateRange {
                    from: Some(from),
                    to: None,
                },
                sort_order: 0,
            })
            .unwrap();
        assert_eq!(repo.find_by_id(created.id).unwrap(), Some(created.clone()));

        assert!(repo.delete(created.id).unwrap());
        assert!(repo.list_ordered().unwrap().is_empty());
        assert!(!repo.delete(created.id).unwrap());
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dashboard.sqlite");
        {
            let mut repo = SqliteTodoRepo::open(&path).unwrap();
            repo.insert(new_item("persisted", 0)).unwrap();
        }
        let repo = SqliteTodoRepo::open(&path).unwrap();
        let items = repo.list_ordered().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "persisted");
    }

    #[test]
    fn list_orders_by_sort_order_then_id() {
        let mut repo = SqliteTodoRepo::open_in_memory().unwrap();
        repo.insert(new_item("c", 2)).unwrap();
        repo.insert(new_item("a", 0)).unwrap();
        repo.insert(new_item("b", 0)).unwrap();
        let titles: Vec<String> = repo
            .list_ordered()
            .unwrap()
            .into_iter()
            .map(|item| item.title)
            .collect();
        assert_eq!(titles, ["a", "b", "c"]);
    }

    #[test]
    fn update_leaves_sort_order_alone() {
        let mut repo = SqliteTodoRepo::open_in_memory().unwrap();
        let mut item = repo.insert(new_item("a", 7)).unwrap();
        item.title = "renamed".to_string();
        item.sort_order = 0;
        assert!(repo.update(&item).unwrap());

        let stored = repo.find_by_id(item.id).unwrap().unwrap();
        assert_eq!(stored.title, "renamed");
        assert_eq!(stored.sort_order, 7);

        item.id = 999;
        assert!(!repo.update(&item).unwrap());
    }

    #[test]
    fn apply_sort_orders_skips_unknown_ids() {
        let mut repo = SqliteTodoRepo::open_in_memory().unwrap();
        let a = repo.insert(new_item("a", 0)).unwrap();
        let b = repo.insert(new_item("b", 1)).unwrap();

        let updated = repo
            .apply_sort_orders(&[(b.id, 0), (404, 1), (a.id, 2)])
            .unwrap();
        assert_eq!(updated, 2);
        assert_eq!(repo.max_sort_order().unwrap(), Some(2));

        let ids: Vec<TodoId> = repo.list_ordered().unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[test]
    fn max_sort_order_of_empty_table_is_none() {
        let repo = SqliteTodoRepo::open_in_memory().unwrap();
        assert_eq!(repo.max_sort_order().unwrap(), None);
    }
}
