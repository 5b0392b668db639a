//! Draft storage: save, get, list, delete, and clear drafts.

use jiff::Timestamp;
use rusqlite::{Connection, OptionalExtension};
use serde_json::Value;
use tracing::{debug, info};

use crate::model::Draft;

use super::{Result, Storage, StorageError};

impl Storage {
    /// Saves a draft, replacing any draft stored under the same id.
    ///
    /// The whole payload is overwritten; nothing is merged from the previous one.
    pub fn save_draft(&self, id: &str, data: Value) -> Result<Draft> {
        self.save_draft_at(id, data, Timestamp::now())
    }

    fn save_draft_at(&self, id: &str, data: Value, updated_at: Timestamp) -> Result<Draft> {
        let conn = self.open_db()?;
        let json = serde_json::to_string(&data)?;
        conn.execute(
            "INSERT OR REPLACE INTO drafts (id, data, updated_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![id, json, updated_at.to_string()],
        )?;
        info!(draft = id, %updated_at, "saved draft");
        Ok(Draft {
            id: id.to_string(),
            data,
            updated_at,
        })
    }

    /// Loads a single draft, or `None` if no draft has this id.
    pub fn load_draft(&self, id: &str) -> Result<Option<Draft>> {
        let conn = self.open_db()?;
        let row = conn
            .query_row(
                "SELECT id, data, updated_at FROM drafts WHERE id = ?1",
                [id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;
        debug!(draft = id, found = row.is_some(), "loaded draft");
        row.map(|(id, data, updated_at)| parse_draft(id, &data, &updated_at))
            .transpose()
    }

    /// Lists all drafts, most recently saved first.
    ///
    /// Drafts saved at the same instant keep their storage order.
    pub fn list_drafts(&self) -> Result<Vec<Draft>> {
        let conn = self.open_db()?;
        let mut drafts = load_draft_rows(&conn)?;
        drafts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        debug!(count = drafts.len(), "listed drafts");
        Ok(drafts)
    }

    /// Deletes a draft. Deleting an id that isn't stored is not an error.
    pub fn delete_draft(&self, id: &str) -> Result<()> {
        let conn = self.open_db()?;
        let rows = conn.execute("DELETE FROM drafts WHERE id = ?1", [id])?;
        info!(draft = id, removed = rows > 0, "deleted draft");
        Ok(())
    }

    /// Deletes every draft.
    pub fn clear_drafts(&self) -> Result<()> {
        let conn = self.open_db()?;
        let rows = conn.execute("DELETE FROM drafts", [])?;
        info!(removed = rows, "cleared drafts");
        Ok(())
    }
}

/// Reads every draft row in storage order.
fn load_draft_rows(conn: &Connection) -> Result<Vec<Draft>> {
    let mut stmt = conn.prepare("SELECT id, data, updated_at FROM drafts ORDER BY rowid")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut drafts = Vec::new();
    for row in rows {
        let (id, data, updated_at) = row?;
        drafts.push(parse_draft(id, &data, &updated_at)?);
    }
    Ok(drafts)
}

/// Reconstructs a `Draft` from its column values.
fn parse_draft(id: String, data: &str, updated_at: &str) -> Result<Draft> {
    let data = serde_json::from_str(data)
        .map_err(|e| StorageError::Corrupt(format!("invalid payload for draft {id}: {e}")))?;
    let updated_at = updated_at
        .parse::<Timestamp>()
        .map_err(|e| StorageError::Corrupt(format!("invalid updated_at for draft {id}: {e}")))?;
    Ok(Draft {
        id,
        data,
        updated_at,
    })
}
