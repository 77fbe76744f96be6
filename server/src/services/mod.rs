//! Service layer between API handlers and the workspace crates.

pub mod labels;
