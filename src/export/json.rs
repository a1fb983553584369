//! JSON export implementation.
//!
//! Exports lockfile inventories in JSON format for machine-readable output.

use super::{ExportData, Exporter};
use crate::parser::Dependency;
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable package with several resolved versions.
#[derive(Serialize)]
struct JsonMultipleVersions {
    package: String,
    versions: Vec<String>,
}

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    total_dependencies: usize,
    unique_packages: usize,
    packages_with_multiple_versions: usize,
    missing_versions: usize,
}

/// Report for a single lockfile.
#[derive(Serialize)]
struct JsonExport<'a> {
    lockfile: &'a str,
    summary: JsonSummary,
    dependencies: &'a [Dependency],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    multiple_versions: Vec<JsonMultipleVersions>,
}

impl<'a> From<&'a ExportData> for JsonExport<'a> {
    fn from(data: &'a ExportData) -> Self {
        let multiple = data.multiple_versions();

        JsonExport {
            lockfile: &data.lockfile,
            summary: JsonSummary {
                total_dependencies: data.dependencies.len(),
                unique_packages: data.unique_package_count(),
                packages_with_multiple_versions: multiple.len(),
                missing_versions: data.missing_version_count(),
            },
            dependencies: &data.dependencies,
            multiple_versions: multiple
                .into_iter()
                .map(|m| JsonMultipleVersions {
                    package: m.package_name,
                    versions: m.versions,
                })
                .collect(),
        }
    }
}

fn write_pretty<W: Write, T: Serialize>(value: &T, writer: &mut W) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    writeln!(writer, "{}", json)
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        write_pretty(&JsonExport::from(data), writer)
    }

    /// Writes one JSON array holding a report per lockfile.
    fn export_all<W: Write>(&self, reports: &[ExportData], writer: &mut W) -> io::Result<()> {
        let reports: Vec<JsonExport<'_>> = reports.iter().map(JsonExport::from).collect();
        write_pretty(&reports, writer)
    }
}
