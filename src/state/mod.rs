/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - Bounded image selection with overflow handling (selection.rs)
/// - Pagination over the album grid and order list (pagination.rs)
/// - Scratch ordering for the rearrange panel (reorder.rs)
/// - Contact form validation (form.rs)
/// - Remembered contacts and album codes (store.rs)

pub mod data;
pub mod form;
pub mod pagination;
pub mod reorder;
pub mod selection;
pub mod store;
