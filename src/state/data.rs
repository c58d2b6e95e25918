/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the catalog layer and the UI layer.

/// Represents a single artwork in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Unique catalog ID
    pub id: i64,
    /// Display name, unique within a gallery list (the file stem)
    pub name: String,
    /// Full path to the image file
    pub path: String,
    /// Path to the 256px grid thumbnail (None if not yet generated)
    pub thumbnail_path: Option<String>,
}

impl Image {
    /// Source used for gallery tiles: the thumbnail when cached
    pub fn tile_source(&self) -> &str {
        self.thumbnail_path.as_deref().unwrap_or(&self.path)
    }
}

/// A file found while scanning a portfolio folder, ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub path: String,
    pub name: String,
    pub category: String,
    pub project: String,
}

/// Payload of the "image selected" signal
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSelection {
    /// The full gallery list the image was picked from, in display order
    pub images: Vec<Image>,
    pub selected: Image,
}

/// Payload of the "project selected" signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSelection {
    pub category: String,
    pub project: String,
}

#[cfg(test)]
pub(crate) fn image(id: i64, name: &str) -> Image {
    Image {
        id,
        name: name.to_string(),
        path: format!("/art/{name}.png"),
        thumbnail_path: None,
    }
}
