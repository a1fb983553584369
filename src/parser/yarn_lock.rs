//! Parser for Yarn v1 `yarn.lock` files.
//!
//! The pipeline is: version gate, [lexer](super::lexer),
//! [tree parser](super::tree), then [`normalize`] which projects the
//! top-level entries into a deduplicated list of [`Dependency`] records.
//!
//! A lockfile without a supported `yarn lockfile v1` header in its first two
//! lines is not an error: the entry points return `Ok(None)` so callers can
//! treat it as "not this format". Grammar violations fail the whole parse.

use std::fs;
use std::ops::Range;
use std::path::Path;

use indexmap::IndexSet;
use tracing::{debug, instrument, warn};

use super::error::{ParseError, ParseResult};
use super::lexer::tokenize;
use super::tree::{parse_tokens, Mapping};
use super::types::Dependency;

/// The only lockfile format version this parser understands.
pub const LOCKFILE_VERSION: u32 = 1;

const VERSION_MARKER: &str = "yarn lockfile v";

/// Parses a yarn.lock file from a file path.
///
/// # Arguments
///
/// * `path` - Path to the yarn.lock file
///
/// # Returns
///
/// `Ok(None)` when the file does not carry a supported version header,
/// otherwise the deduplicated dependency records.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use lockscope::parser::yarn_lock::parse_file;
///
/// if let Some(deps) = parse_file(Path::new("yarn.lock")).unwrap() {
///     println!("{} dependencies", deps.len());
/// }
/// ```
#[instrument]
pub fn parse_file(path: &Path) -> ParseResult<Option<Vec<Dependency>>> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses yarn.lock content from a string.
///
/// # Example
///
/// ```
/// use lockscope::parser::yarn_lock::parse_str;
///
/// let lockfile = "# yarn lockfile v1\n\naccepts@^1.3.5:\n  version \"1.3.7\"\n";
/// let deps = parse_str(lockfile).unwrap().unwrap();
///
/// assert_eq!(deps.len(), 1);
/// assert_eq!(deps[0].name, "accepts");
/// assert_eq!(deps[0].version.as_deref(), Some("1.3.7"));
/// ```
pub fn parse_str(content: &str) -> ParseResult<Option<Vec<Dependency>>> {
    match parse_tree(content)? {
        Some(tree) => normalize(&tree).map(Some),
        None => Ok(None),
    }
}

/// Parses yarn.lock content into its raw key/value tree.
///
/// Useful for consumers that need fields other than `version`, such as
/// `resolved`, `integrity` or the nested `dependencies` block. The line
/// carrying the version marker is header, not entry grammar, and is left out
/// of tokenizing; its newline is kept so error line numbers still match the
/// input.
pub fn parse_tree(content: &str) -> ParseResult<Option<Mapping>> {
    let Some(header) = header_span(content) else {
        warn!(
            found = ?lockfile_version(content),
            expected = LOCKFILE_VERSION,
            "unsupported lockfile version"
        );
        return Ok(None);
    };

    let mut body = String::with_capacity(content.len());
    body.push_str(&content[..header.start]);
    body.push_str(&content[header.end..]);

    let tokens = tokenize(&body)?;
    debug!(tokens = tokens.len(), "tokenized lockfile");

    let tree = parse_tokens(&tokens)?;
    debug!(entries = tree.len(), "parsed lockfile tree");

    Ok(Some(tree))
}

/// Returns true if the first two lines carry a supported version marker.
pub fn is_compatible(content: &str) -> bool {
    header_span(content).is_some()
}

/// Returns the version number from the first `yarn lockfile v<N>` marker
/// found in the first two lines, if any.
///
/// Only the digits directly following `v` are read; anything after them on
/// the line is ignored.
pub fn lockfile_version(content: &str) -> Option<u32> {
    markers(content).next().map(|(version, _)| version)
}

/// Byte range of the line holding a supported version marker.
fn header_span(content: &str) -> Option<Range<usize>> {
    markers(content)
        .find(|(version, _)| *version == LOCKFILE_VERSION)
        .map(|(_, span)| span)
}

/// Version markers in the first two lines, with the byte range of each
/// marker line excluding its line terminator.
fn markers(content: &str) -> impl Iterator<Item = (u32, Range<usize>)> + '_ {
    content
        .split_inclusive('\n')
        .take(2)
        .scan(0, |offset, line| {
            let start = *offset;
            *offset += line.len();
            Some((start, line))
        })
        .filter_map(|(start, line)| {
            let text = line.trim_end_matches(['\n', '\r']);
            marker_version(text).map(|version| (version, start..start + text.len()))
        })
}

fn marker_version(line: &str) -> Option<u32> {
    let start = line.find(VERSION_MARKER)? + VERSION_MARKER.len();
    let digits = &line[start..];
    let len = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..len];
    // Only the canonical spelling counts: `v01` is not `v1`.
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

/// Projects a parsed lockfile tree into deduplicated dependency records.
///
/// Each top-level key is a descriptor like `accepts@~1.3.7`; its package
/// name is the text before the `@` that separates name and range. An entry
/// without a `version` field produces a record with `version: None`.
///
/// # Errors
///
/// Returns [`ParseError::InvalidDescriptor`] for a key without a separating
/// `@`.
pub fn normalize(tree: &Mapping) -> ParseResult<Vec<Dependency>> {
    let mut deps = IndexSet::new();

    for (descriptor, details) in tree {
        let name = package_name(descriptor)?;
        let version = details
            .as_map()
            .and_then(|entry| entry.get("version"))
            .and_then(|value| value.scalar_string());

        deps.insert(Dependency {
            name: name.to_string(),
            version,
        });
    }

    debug!(
        descriptors = tree.len(),
        records = deps.len(),
        "normalized lockfile entries"
    );
    Ok(deps.into_iter().collect())
}

/// Extracts the package name from a descriptor.
///
/// A leading `@` marks an npm scope and belongs to the name.
///
/// # Example
///
/// ```
/// use lockscope::parser::yarn_lock::package_name;
///
/// assert_eq!(package_name("accepts@~1.3.7").unwrap(), "accepts");
/// assert_eq!(package_name("@babel/core@^7.0.0").unwrap(), "@babel/core");
/// assert!(package_name("accepts").is_err());
/// ```
pub fn package_name(descriptor: &str) -> ParseResult<&str> {
    let offset = usize::from(descriptor.starts_with('@'));
    descriptor[offset..]
        .find('@')
        .map(|at| &descriptor[..offset + at])
        .ok_or_else(|| ParseError::InvalidDescriptor(descriptor.to_string()))
}
