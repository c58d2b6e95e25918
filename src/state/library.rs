use chrono::Utc;
use rusqlite::{Connection, ErrorCode, Row};
use std::path::{Path, PathBuf};

use super::catalog::ImageCatalog;
use super::data::{CatalogEntry, Image};
use crate::error::{GalleryError, Result};

/// Outcome of inserting one scanned file into the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(i64),
    /// The path was already cataloged
    Skipped,
}

/// The Library manages the SQLite catalog database.
/// It stores which artwork belongs to which category and project,
/// and where its cached thumbnail lives.
pub struct Library {
    conn: Connection,
    db_path: PathBuf,
}

impl Library {
    /// Open the catalog at its default location.
    ///
    /// The database file is created in the user's data directory:
    /// - Linux: ~/.local/share/portfolio-gallery/catalog.db
    /// - macOS: ~/Library/Application Support/portfolio-gallery/catalog.db
    /// - Windows: %APPDATA%\portfolio-gallery\catalog.db
    pub fn open_default() -> Result<Self> {
        Self::open(&Self::default_path()?)
    }

    /// Open (or create) the catalog stored at `db_path`
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| GalleryError::io(parent, err))?;
            }
        }

        let conn = Connection::open(db_path)?;
        log::info!("📁 Catalog opened at: {}", db_path.display());

        let library = Library {
            conn,
            db_path: db_path.to_path_buf(),
        };
        library.init_schema()?;
        Ok(library)
    }

    /// Open a throwaway catalog that lives only in memory
    pub fn open_in_memory() -> Result<Self> {
        let library = Library {
            conn: Connection::open_in_memory()?,
            db_path: PathBuf::from(":memory:"),
        };
        library.init_schema()?;
        Ok(library)
    }

    /// Get the path where the database should be stored
    pub fn default_path() -> Result<PathBuf> {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or(GalleryError::MissingDirectory("data"))?;

        path.push("portfolio-gallery");
        path.push("catalog.db");
        Ok(path)
    }

    /// Create all tables and indexes if they don't exist.
    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS images (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                path            TEXT NOT NULL UNIQUE,
                name            TEXT NOT NULL,
                category        TEXT NOT NULL,
                project         TEXT NOT NULL,
                imported_at     INTEGER NOT NULL,
                thumbnail_path  TEXT,
                cache_status    TEXT NOT NULL DEFAULT 'pending'
            )",
            [],
        )?;

        // Gallery queries filter by category then project
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_images_category_project
             ON images(category, project)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_images_cache_status
             ON images(cache_status)",
            [],
        )?;

        log::debug!("Catalog schema initialized");
        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Get a count of images in the catalog
    pub fn image_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Insert a scanned file. Paths already in the catalog are skipped.
    pub fn insert_image(&self, entry: &CatalogEntry) -> Result<InsertOutcome> {
        let result = self.conn.execute(
            "INSERT INTO images (path, name, category, project, imported_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                &entry.path,
                &entry.name,
                &entry.category,
                &entry.project,
                Utc::now().timestamp(),
            ],
        );

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted(self.conn.last_insert_rowid())),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Ok(InsertOutcome::Skipped)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Get images that need thumbnail generation (cache_status = 'pending')
    pub fn pending_thumbnails(&self, limit: usize) -> Result<Vec<Image>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, path, thumbnail_path
             FROM images
             WHERE cache_status = 'pending'
             ORDER BY id
             LIMIT ?1",
        )?;

        let images = stmt
            .query_map([limit as i64], row_to_image)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(images)
    }

    /// Update an image's thumbnail path and mark it as cached
    pub fn update_thumbnail(&self, image_id: i64, thumbnail_path: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE images SET thumbnail_path = ?1, cache_status = 'cached' WHERE id = ?2",
            rusqlite::params![thumbnail_path, image_id],
        )?;
        Ok(())
    }

    /// Stop retrying an image whose thumbnail cannot be produced
    pub fn mark_thumbnail_failed(&self, image_id: i64) -> Result<()> {
        self.conn.execute(
            "UPDATE images SET cache_status = 'failed' WHERE id = ?1",
            rusqlite::params![image_id],
        )?;
        Ok(())
    }

    /// Verify cached thumbnails actually exist on disk.
    /// Reset to 'pending' if the thumbnail file is missing.
    pub fn verify_thumbnails(&self) -> Result<usize> {
        let mut stmt = self.conn.prepare(
            "SELECT id, thumbnail_path FROM images
             WHERE cache_status = 'cached' AND thumbnail_path IS NOT NULL",
        )?;

        let cached: Vec<(i64, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .filter_map(|r| r.ok())
            .collect();

        let mut reset_count = 0;
        for (id, thumbnail_path) in cached {
            if !Path::new(&thumbnail_path).exists() {
                self.conn.execute(
                    "UPDATE images SET cache_status = 'pending', thumbnail_path = NULL WHERE id = ?1",
                    rusqlite::params![id],
                )?;
                reset_count += 1;
            }
        }

        if reset_count > 0 {
            log::info!("🔄 Reset {} missing thumbnails to pending", reset_count);
        }

        Ok(reset_count)
    }
}

impl ImageCatalog for Library {
    fn categories(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT category FROM images GROUP BY category ORDER BY MIN(id)")?;
        let categories = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(categories)
    }

    fn projects_of_category(&self, category: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT project FROM images WHERE category = ?1
             GROUP BY project ORDER BY MIN(id)",
        )?;
        let projects = stmt
            .query_map([category], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(projects)
    }

    fn images_by_project_and_category(&self, project: &str, category: &str) -> Result<Vec<Image>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, path, thumbnail_path FROM images
             WHERE project = ?1 AND category = ?2
             ORDER BY id",
        )?;
        let images = stmt
            .query_map([project, category], row_to_image)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(images)
    }
}

fn row_to_image(row: &Row<'_>) -> rusqlite::Result<Image> {
    Ok(Image {
        id: row.get(0)?,
        name: row.get(1)?,
        path: row.get(2)?,
        thumbnail_path: row.get(3)?,
    })
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
pub(crate) fn entry(category: &str, project: &str, name: &str) -> CatalogEntry {
    CatalogEntry {
        path: format!("/art/{category}/{project}/{name}.png"),
        name: name.to_string(),
        category: category.to_string(),
        project: project.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Library {
        let library = Library::open_in_memory().unwrap();
        for e in [
            entry("Sketches", "Ink", "crow"),
            entry("Paintings", "Oils", "harbor"),
            entry("Sketches", "Ink", "fox"),
            entry("Sketches", "Charcoal", "hands"),
            entry("Paintings", "Oils", "dunes"),
        ] {
            library.insert_image(&e).unwrap();
        }
        library
    }

    #[test]
    fn test_categories_in_import_order() {
        let library = seeded();
        assert_eq!(library.categories().unwrap(), vec!["Sketches", "Paintings"]);
    }

    #[test]
    fn test_projects_of_category() {
        let library = seeded();
        assert_eq!(library.projects_of_category("Sketches").unwrap(), vec!["Ink", "Charcoal"]);
        assert!(library.projects_of_category("Sculpture").unwrap().is_empty());
    }

    #[test]
    fn test_images_by_project_and_category() {
        let library = seeded();
        let names: Vec<String> = library
            .images_by_project_and_category("Ink", "Sketches")
            .unwrap()
            .into_iter()
            .map(|image| image.name)
            .collect();
        assert_eq!(names, vec!["crow", "fox"]);
    }

    #[test]
    fn test_duplicate_path_is_skipped() {
        let library = seeded();
        let outcome = library.insert_image(&entry("Sketches", "Ink", "crow")).unwrap();
        assert_eq!(outcome, InsertOutcome::Skipped);
        assert_eq!(library.image_count().unwrap(), 5);
    }

    #[test]
    fn test_thumbnail_lifecycle() {
        let library = seeded();
        let pending = library.pending_thumbnails(2).unwrap();
        assert_eq!(pending.len(), 2);

        library.update_thumbnail(pending[0].id, "/cache/1.jpg").unwrap();
        library.mark_thumbnail_failed(pending[1].id).unwrap();
        assert_eq!(library.pending_thumbnails(10).unwrap().len(), 3);

        let crow = &library.images_by_project_and_category("Ink", "Sketches").unwrap()[0];
        assert_eq!(crow.thumbnail_path.as_deref(), Some("/cache/1.jpg"));
        assert_eq!(crow.tile_source(), "/cache/1.jpg");
    }

    #[test]
    fn test_verify_thumbnails_resets_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.jpg");
        std::fs::write(&present, b"jpg").unwrap();

        let library = seeded();
        let pending = library.pending_thumbnails(2).unwrap();
        library
            .update_thumbnail(pending[0].id, &present.to_string_lossy())
            .unwrap();
        library
            .update_thumbnail(pending[1].id, &dir.path().join("gone.jpg").to_string_lossy())
            .unwrap();

        assert_eq!(library.verify_thumbnails().unwrap(), 1);
        assert_eq!(library.pending_thumbnails(10).unwrap().len(), 4);
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("catalog.db");

        let library = Library::open(&db_path).unwrap();
        assert_eq!(library.path(), &db_path);
        assert!(db_path.exists());
    }
}
