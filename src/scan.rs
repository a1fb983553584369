//! Lockfile discovery.
//!
//! Walks a directory tree to find `yarn.lock` files and parses each one,
//! so a monorepo or a checkout of many projects can be inventoried in one
//! pass.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::export::ExportData;
use crate::parser::{parse_file, Dependency, ParseError};

/// File name of a Yarn lockfile.
pub const LOCKFILE_NAME: &str = "yarn.lock";

/// Settings for lockfile discovery.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Descend into `node_modules` directories.
    pub include_node_modules: bool,
    /// Descend into directories whose name starts with `.`.
    pub include_hidden: bool,
    /// Maximum directory depth below the root, unlimited when `None`.
    pub max_depth: Option<usize>,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
}

/// What happened when a discovered lockfile was parsed.
#[derive(Debug)]
pub enum ScanOutcome {
    /// The lockfile parsed; holds its deduplicated records.
    Parsed(Vec<Dependency>),
    /// The lockfile does not carry a supported version header.
    Unsupported,
    /// Reading or parsing failed.
    Failed(ParseError),
}

/// One discovered lockfile and its parse outcome.
#[derive(Debug)]
pub struct ScanResult {
    pub path: PathBuf,
    pub outcome: ScanOutcome,
}

/// Finds every `yarn.lock` under `root`, depth first with siblings sorted
/// by name.
///
/// Unreadable directory entries are skipped.
pub fn find_lockfiles(root: &Path, options: &ScanOptions) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(root)
        .follow_links(options.follow_links)
        .sort_by_file_name();
    if let Some(depth) = options.max_depth {
        // Depth counts the root itself; the lockfile sits one level below
        // the deepest directory visited.
        walker = walker.max_depth(depth + 1);
    }

    let mut found = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ignored_dir(e, options))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() && entry.file_name() == LOCKFILE_NAME {
            found.push(entry.into_path());
        }
    }

    info!(root = %root.display(), count = found.len(), "discovered lockfiles");
    found
}

/// Finds and parses every lockfile under `root`.
///
/// A lockfile that fails to parse does not stop the scan; its error is
/// recorded in the returned [`ScanResult`].
pub fn scan(root: &Path, options: &ScanOptions) -> Vec<ScanResult> {
    find_lockfiles(root, options)
        .into_iter()
        .map(|path| {
            let outcome = match parse_file(&path) {
                Ok(Some(deps)) => ScanOutcome::Parsed(deps),
                Ok(None) => {
                    warn!(path = %path.display(), "skipping unsupported lockfile");
                    ScanOutcome::Unsupported
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to parse lockfile");
                    ScanOutcome::Failed(e)
                }
            };
            ScanResult { path, outcome }
        })
        .collect()
}

/// Scan results grouped for export.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// One report per successfully parsed lockfile, in discovery order.
    pub reports: Vec<ExportData>,
    pub unsupported: usize,
    pub failed: usize,
}

/// Collects parsed lockfiles into export reports and counts the rest.
pub fn summarize(results: Vec<ScanResult>) -> ScanSummary {
    let mut summary = ScanSummary::default();
    for result in results {
        match result.outcome {
            ScanOutcome::Parsed(deps) => summary
                .reports
                .push(ExportData::new(result.path.display().to_string(), deps)),
            ScanOutcome::Unsupported => summary.unsupported += 1,
            ScanOutcome::Failed(_) => summary.failed += 1,
        }
    }
    summary
}

/// Check if a directory should be skipped during traversal.
fn is_ignored_dir(entry: &walkdir::DirEntry, options: &ScanOptions) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    (name == "node_modules" && !options.include_node_modules)
        || (name.starts_with('.') && !options.include_hidden)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const LOCKFILE: &str = "# yarn lockfile v1\n\nms@2.0.0:\n  version \"2.0.0\"\n";

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_find_lockfiles_skips_ignored_dirs() {
        let dir = tempdir().unwrap();
        write(dir.path(), "yarn.lock", LOCKFILE);
        write(dir.path(), "packages/app/yarn.lock", LOCKFILE);
        write(dir.path(), "node_modules/dep/yarn.lock", LOCKFILE);
        write(dir.path(), ".cache/yarn.lock", LOCKFILE);
        write(dir.path(), "packages/app/package.json", "{}");

        let found = find_lockfiles(dir.path(), &ScanOptions::default());

        assert_eq!(
            found,
            vec![
                dir.path().join("packages/app/yarn.lock"),
                dir.path().join("yarn.lock"),
            ]
        );
    }

    #[test]
    fn test_find_lockfiles_include_node_modules() {
        let dir = tempdir().unwrap();
        write(dir.path(), "node_modules/dep/yarn.lock", LOCKFILE);

        let options = ScanOptions {
            include_node_modules: true,
            ..ScanOptions::default()
        };
        assert_eq!(find_lockfiles(dir.path(), &options).len(), 1);
    }

    #[test]
    fn test_find_lockfiles_max_depth() {
        let dir = tempdir().unwrap();
        write(dir.path(), "yarn.lock", LOCKFILE);
        write(dir.path(), "a/yarn.lock", LOCKFILE);
        write(dir.path(), "a/b/yarn.lock", LOCKFILE);

        let options = ScanOptions {
            max_depth: Some(1),
            ..ScanOptions::default()
        };
        assert_eq!(find_lockfiles(dir.path(), &options).len(), 2);
    }

    #[test]
    fn test_scan_outcomes() {
        let dir = tempdir().unwrap();
        write(dir.path(), "good/yarn.lock", LOCKFILE);
        write(dir.path(), "berry/yarn.lock", "__metadata:\n  version: 6\n");
        write(dir.path(), "broken/yarn.lock", "# yarn lockfile v1\nms:\n  version \"1\"\n");

        let results = scan(dir.path(), &ScanOptions::default());
        assert_eq!(results.len(), 3);

        // Sorted by path: berry, broken, good
        assert!(matches!(results[0].outcome, ScanOutcome::Unsupported));
        assert!(matches!(
            results[1].outcome,
            ScanOutcome::Failed(ParseError::InvalidDescriptor(_))
        ));
        match &results[2].outcome {
            ScanOutcome::Parsed(deps) => {
                assert_eq!(deps, &vec![Dependency::new("ms", Some("2.0.0"))]);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let summary = summarize(results);
        assert_eq!(summary.reports.len(), 1);
        assert_eq!(summary.unsupported, 1);
        assert_eq!(summary.failed, 1);
        assert!(summary.reports[0].lockfile.ends_with("yarn.lock"));
    }

    #[cfg(unix)]
    #[test]
    fn test_find_lockfiles_follow_links() {
        let dir = tempdir().unwrap();
        let target = tempdir().unwrap();
        write(target.path(), "yarn.lock", LOCKFILE);
        std::os::unix::fs::symlink(target.path(), dir.path().join("linked")).unwrap();

        assert!(find_lockfiles(dir.path(), &ScanOptions::default()).is_empty());

        let options = ScanOptions {
            follow_links: true,
            ..ScanOptions::default()
        };
        assert_eq!(
            find_lockfiles(dir.path(), &options),
            vec![dir.path().join("linked/yarn.lock")]
        );
    }
}
