//! PDF manipulation module

pub mod assemble;
pub mod metadata;

// Re-export commonly used items
pub use assemble::{assemble_archive, plan_outline, OutlineEntry, OutlinePlan};
pub use metadata::count_pages;
