//! Export functionality for lockfile inventories.
//!
//! This module provides exporters for outputting extracted dependency
//! records in various formats: JSON, CSV, and Markdown.

pub mod csv;
pub mod json;
pub mod markdown;

use crate::parser::Dependency;
use indexmap::IndexMap;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    Json,
    /// CSV format - spreadsheet-friendly
    Csv,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, csv, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// A package resolved at more than one version in the same lockfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleVersions {
    /// Package name
    pub package_name: String,
    /// Resolved versions, in lockfile order
    pub versions: Vec<String>,
}

/// Data container for export operations.
///
/// Holds one lockfile's extracted records.
#[derive(Debug, Clone)]
pub struct ExportData {
    /// Path of the lockfile the records came from
    pub lockfile: String,
    /// Deduplicated dependency records
    pub dependencies: Vec<Dependency>,
}

impl ExportData {
    /// Create new export data from parse results.
    pub fn new(lockfile: impl Into<String>, dependencies: Vec<Dependency>) -> Self {
        Self {
            lockfile: lockfile.into(),
            dependencies,
        }
    }

    /// Get count of distinct package names
    pub fn unique_package_count(&self) -> usize {
        self.versions_by_package().len()
    }

    /// Get count of records without a resolved version
    pub fn missing_version_count(&self) -> usize {
        self.dependencies
            .iter()
            .filter(|d| d.version.is_none())
            .count()
    }

    /// Packages resolved at two or more distinct versions.
    pub fn multiple_versions(&self) -> Vec<MultipleVersions> {
        self.versions_by_package()
            .into_iter()
            .filter(|(_, versions)| versions.len() > 1)
            .map(|(name, versions)| MultipleVersions {
                package_name: name.to_string(),
                versions: versions.into_iter().map(str::to_string).collect(),
            })
            .collect()
    }

    fn versions_by_package(&self) -> IndexMap<&str, Vec<&str>> {
        let mut by_package: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for dep in &self.dependencies {
            let versions = by_package.entry(dep.name.as_str()).or_default();
            if let Some(version) = dep.version.as_deref() {
                versions.push(version);
            }
        }
        by_package
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;

    /// Export several lockfiles' data as a single document.
    ///
    /// The default writes each report in turn, separated by a blank line.
    fn export_all<W: Write>(&self, reports: &[ExportData], writer: &mut W) -> io::Result<()> {
        for (i, data) in reports.iter().enumerate() {
            if i > 0 {
                writeln!(writer)?;
            }
            self.export(data, writer)?;
        }
        Ok(())
    }
}

/// Export data in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(data, writer),
        ExportFormat::Csv => csv::CsvExporter.export(data, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(data, writer),
    }
}

/// Export several lockfiles' data as one document in the specified format.
pub fn export_all<W: Write>(
    format: ExportFormat,
    reports: &[ExportData],
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export_all(reports, writer),
        ExportFormat::Csv => csv::CsvExporter.export_all(reports, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export_all(reports, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
pub(crate) fn sample_data() -> ExportData {
    ExportData::new(
        "yarn.lock",
        vec![
            Dependency::new("accepts", Some("1.3.7")),
            Dependency::new("ms", Some("2.0.0")),
            Dependency::new("ms", Some("2.1.1")),
            Dependency::new("left-pad", None::<String>),
        ],
    )
}
