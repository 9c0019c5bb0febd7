//! File-level pipelines tying the parsing, resolution and rendering modules
//! together. Frontends call these and decide where the output goes.

pub mod convert;
pub mod summarize;
