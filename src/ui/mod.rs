/// User interface module
///
/// - Shared view context and signal channels (context.rs)
/// - Home view composing header, gallery and visualizer (home.rs)
/// - Bio and not-found pages (bio.rs, not_found.rs)

pub mod bio;
pub mod context;
pub mod gallery;
pub mod header;
pub mod home;
pub mod not_found;
pub mod social;
pub mod visualizer;
