use image::{imageops::FilterType, DynamicImage};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GalleryError, Result};
use crate::state::library::Library;

/// Size of generated thumbnails (longest edge)
const THUMBNAIL_SIZE: u32 = 256;

/// How many pending rows are fetched per catalog query
const BATCH_SIZE: usize = 32;

/// Get the thumbnail cache directory
/// Returns ~/.cache/portfolio-gallery/thumbnails on Linux
pub fn thumbnail_cache_dir() -> Result<PathBuf> {
    let mut path = dirs_next::cache_dir()
        .or_else(dirs_next::home_dir)
        .ok_or(GalleryError::MissingDirectory("cache"))?;

    path.push("portfolio-gallery");
    path.push("thumbnails");

    fs::create_dir_all(&path).map_err(|err| GalleryError::io(&path, err))?;
    Ok(path)
}

/// Where the thumbnail of `image_id` lives (doesn't generate it)
pub fn thumbnail_path(cache_dir: &Path, image_id: i64) -> PathBuf {
    cache_dir.join(format!("{}.jpg", image_id))
}

/// Decode `source`, shrink it to fit the thumbnail box and save it as JPEG
pub fn generate_thumbnail(source: &Path, image_id: i64, cache_dir: &Path) -> Result<PathBuf> {
    let img = image::open(source)?;
    let thumbnail = img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3);

    // JPEG has no alpha channel
    let thumbnail = DynamicImage::ImageRgb8(thumbnail.to_rgb8());

    let path = thumbnail_path(cache_dir, image_id);
    thumbnail.save(&path)?;

    log::debug!("📸 Generated thumbnail: {}", path.display());
    Ok(path)
}

/// Generate thumbnails for every pending catalog row on a background thread.
/// Returns how many were generated; images that fail are marked and skipped.
pub async fn generate_pending_thumbnails(db_path: PathBuf, cache_dir: PathBuf) -> Result<usize> {
    tokio::task::spawn_blocking(move || -> Result<usize> {
        let library = Library::open(&db_path)?;
        library.verify_thumbnails()?;

        let mut generated = 0;
        loop {
            let batch = library.pending_thumbnails(BATCH_SIZE)?;
            if batch.is_empty() {
                break;
            }

            for image in batch {
                match generate_thumbnail(Path::new(&image.path), image.id, &cache_dir) {
                    Ok(path) => {
                        library.update_thumbnail(image.id, &path.to_string_lossy())?;
                        generated += 1;
                    }
                    Err(err) => {
                        log::warn!("❌ Thumbnail failed for {}: {}", image.path, err);
                        library.mark_thumbnail_failed(image.id)?;
                    }
                }
            }
        }

        if generated > 0 {
            log::info!("📸 Generated {} thumbnails", generated);
        }
        Ok(generated)
    })
    .await?
}
