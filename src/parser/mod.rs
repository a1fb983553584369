//! Parser module for lockscope.
//!
//! Turns Yarn v1 `yarn.lock` text into a dependency inventory in three
//! stages:
//!
//! - [`lexer`] - raw text to a flat token sequence
//! - [`tree`] - tokens to a nested, insertion-ordered key/value tree
//! - [`yarn_lock`] - version gate, pipeline entry points and normalization
//!   of the tree into deduplicated [`Dependency`] records
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use lockscope::parser::parse_file;
//!
//! match parse_file(Path::new("yarn.lock")).unwrap() {
//!     Some(deps) => println!("Found {} dependencies", deps.len()),
//!     None => println!("Not a yarn v1 lockfile"),
//! }
//! ```

pub mod error;
pub mod lexer;
pub mod token;
pub mod tree;
pub mod types;
pub mod yarn_lock;

// Re-export commonly used types for convenience
pub use error::{ParseError, ParseResult};
pub use token::{Token, TokenKind};
pub use tree::{Mapping, Value};
pub use types::Dependency;
pub use yarn_lock::{
    is_compatible, lockfile_version, normalize, parse_file, parse_str, parse_tree,
    LOCKFILE_VERSION,
};
