//! SQLite image store

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::schema::init_schema;
use crate::error::{AuthError, AuthResult};
use crate::image::{Image, ImageId};
use crate::store::ImageStore;

/// SQLite-backed image store
///
/// Statements run in autocommit mode, so each write is durable on return.
pub struct SqliteImageStore {
    conn: Mutex<Connection>,
}

impl SqliteImageStore {
    /// Open or create a database at the given path
    pub fn open(path: &str) -> AuthResult<Self> {
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> AuthResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> AuthResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(AuthError::poisoned)
    }

    fn now() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

fn row_to_image(row: &Row<'_>) -> rusqlite::Result<(String, String, String, String)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn into_image(
    (id, owner_id, file_name, title): (String, String, String, String),
) -> AuthResult<Image> {
    let uuid = Uuid::parse_str(&id)
        .map_err(|e| AuthError::Store(format!("Corrupt image id {id}: {e}")))?;
    Ok(Image {
        id: ImageId::from_uuid(uuid),
        owner_id,
        file_name,
        title,
    })
}

#[async_trait]
impl ImageStore for SqliteImageStore {
    async fn find_by_id(&self, id: &ImageId) -> AuthResult<Option<Image>> {
        let conn = self.conn()?;

        let row = conn
            .query_row(
                "SELECT id, owner_id, file_name, title FROM images WHERE id = ?",
                [id.to_string()],
                row_to_image,
            )
            .optional()?;

        row.map(into_image).transpose()
    }

    async fn find_by_owner(&self, owner_id: &str) -> AuthResult<Vec<Image>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, owner_id, file_name, title FROM images WHERE owner_id = ? ORDER BY title, id",
        )?;

        let rows = stmt
            .query_map([owner_id], row_to_image)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter().map(into_image).collect()
    }

    async fn insert(&self, image: Image) -> AuthResult<()> {
        let conn = self.conn()?;

        let changed = conn.execute(
            "INSERT OR IGNORE INTO images (id, owner_id, file_name, title, created_at) VALUES (?, ?, ?, ?, ?)",
            (
                image.id.to_string(),
                &image.owner_id,
                &image.file_name,
                &image.title,
                Self::now(),
            ),
        )?;

        if changed == 0 {
            return Err(AuthError::AlreadyExists(format!("Image {}", image.id)));
        }
        Ok(())
    }

    async fn update(&self, image: Image) -> AuthResult<()> {
        let conn = self.conn()?;

        // owner_id is deliberately absent from the SET list
        let changed = conn.execute(
            "UPDATE images SET title = ?, file_name = ? WHERE id = ?",
            (&image.title, &image.file_name, image.id.to_string()),
        )?;

        if changed == 0 {
            return Err(AuthError::ImageNotFound(image.id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: &ImageId) -> AuthResult<()> {
        let conn = self.conn()?;

        let changed = conn.execute("DELETE FROM images WHERE id = ?", [id.to_string()])?;

        if changed == 0 {
            return Err(AuthError::ImageNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn commit(&self) -> AuthResult<()> {
        Ok(())
    }
}
