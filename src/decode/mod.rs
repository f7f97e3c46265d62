/// Image decoding module
///
/// This module handles:
/// - Decoding a single file into RGBA pixels (loader.rs)
/// - Decoding the whole catalog in parallel before viewing starts (bulk.rs)

pub mod loader;
pub mod bulk;
