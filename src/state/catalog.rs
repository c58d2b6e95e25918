/// Read-only catalog interface and portfolio folder import
///
/// A portfolio folder is laid out as `<root>/<category>/<project>/<image>`.
/// Images placed directly in `<root>/<category>/` belong to a project named
/// after the category; files directly in the root are ignored.
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::data::{CatalogEntry, Image};
use super::library::{InsertOutcome, Library};
use crate::error::Result;

/// Supported image extensions (lowercase)
const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// What the gallery needs to know about the artwork collection
pub trait ImageCatalog {
    /// Every category, each once, in catalog order
    fn categories(&self) -> Result<Vec<String>>;

    /// Projects of `category`, each once, in catalog order
    fn projects_of_category(&self, category: &str) -> Result<Vec<String>>;

    /// Images of one project in display order
    fn images_by_project_and_category(&self, project: &str, category: &str) -> Result<Vec<Image>>;
}

/// Result of a folder import operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportResult {
    pub imported_count: usize,
    pub skipped_count: usize,
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Walk a portfolio folder and collect every image with its category and project
pub fn scan_portfolio(root: &Path) -> Vec<CatalogEntry> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .min_depth(2)
        .max_depth(3)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || !is_supported_image(path) {
            continue;
        }

        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        let (category, project) = match parts.as_slice() {
            [category, _] => (category.clone(), category.clone()),
            [category, project, _] => (category.clone(), project.clone()),
            _ => continue,
        };

        let name = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        entries.push(CatalogEntry {
            path: path.to_string_lossy().to_string(),
            name,
            category,
            project,
        });
    }

    entries
}

/// Insert scanned entries into `library`, skipping paths it already knows
pub fn import_entries(library: &Library, entries: &[CatalogEntry]) -> Result<ImportResult> {
    let mut result = ImportResult::default();

    for entry in entries {
        match library.insert_image(entry)? {
            InsertOutcome::Inserted(_) => {
                result.imported_count += 1;
                if result.imported_count % 100 == 0 {
                    log::info!("⏳ Imported {} files...", result.imported_count);
                }
            }
            InsertOutcome::Skipped => result.skipped_count += 1,
        }
    }

    Ok(result)
}

/// Import a portfolio folder on a background thread.
///
/// Opens its own connection because `rusqlite::Connection` is not `Send`.
pub async fn import_folder_async(folder_path: PathBuf, db_path: PathBuf) -> Result<ImportResult> {
    tokio::task::spawn_blocking(move || -> Result<ImportResult> {
        log::info!("🔍 Scanning folder: {}", folder_path.display());
        let entries = scan_portfolio(&folder_path);

        let library = Library::open(&db_path)?;
        let result = import_entries(&library, &entries)?;

        log::info!(
            "✅ Import complete: {} new, {} skipped",
            result.imported_count,
            result.skipped_count
        );
        Ok(result)
    })
    .await?
}
