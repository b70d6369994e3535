//! Pipeline orchestration and domain logic for repolens.
//!
//! This crate ties the GitHub client and the Markdown renderer into the two
//! end-to-end workflows: `enrich` (project list → report) and `render`
//! (report → README).

pub mod enrichment;
pub mod pipeline;
pub mod render;
pub mod report;
