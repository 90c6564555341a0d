//! Data model for the extraction pipeline.
//!
//! Input side: positioned [`TextBlock`]s produced by the PDF backend in
//! reading order. Output side: the [`ExtractionResult`] payload returned
//! to callers. Everything here is transient per request.

mod block;
mod result;

pub use block::{BlockKind, BoundingBox, TextBlock};
pub use result::{ExtractionMethod, ExtractionResult};
