//! lockscope - dependency inventory extraction for Yarn v1 lockfiles
//!
//! This crate parses `yarn.lock` files into a deduplicated list of resolved
//! `{name, version}` records, discovers lockfiles across directory trees,
//! and exports inventories as JSON, CSV, or Markdown.

pub mod export;
pub mod parser;
pub mod scan;
