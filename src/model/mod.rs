//! Transient data model for a single conversion.
//!
//! Values here live for one request: created during extraction, consumed
//! by a builder or renderer, then dropped.

mod document;
mod progress;
mod unit;

pub use document::{ExtractedText, Metadata};
pub use progress::{no_progress, Progress};
pub use unit::{
    PageText, Placeholder, TextUnit, LINE_UNSUPPORTED, PARAGRAPH_SKIPPED, UNABLE_TO_EXTRACT,
};
