/// State management module
///
/// This module handles all catalog state, including:
/// - Shared data structures (data.rs)
/// - The read-only catalog interface and folder scanning (catalog.rs)
/// - Database connections and queries (library.rs)

pub mod catalog;
pub mod data;
pub mod library;
