/// State management module
///
/// This module handles all session state, including:
/// - Shared data structures (data.rs)
/// - The scanned, sorted image catalog (catalog.rs)
/// - The output directory of accepted links (chosen.rs)
/// - Wrapping navigation (cursor.rs)
/// - Accept / reject transitions (review.rs)
/// - The interactive session tying it together (session.rs)

pub mod catalog;
pub mod chosen;
pub mod cursor;
pub mod data;
pub mod review;
pub mod session;
