//! Per-variant filtering and smoothing over an in-memory variant table.

pub mod frame;
pub mod summary;

pub use frame::{SmoothingRequest, VariantFrame};
pub use summary::selection_summary;
