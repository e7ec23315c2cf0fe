//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: writes the filtered articles to a timestamped JSON file

pub mod json;
