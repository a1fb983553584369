//! CSV export implementation.
//!
//! Exports lockfile inventories in CSV format for spreadsheet use.

use super::{ExportData, Exporter};
use std::collections::HashSet;
use std::io::{self, Write};

/// CSV exporter implementation.
pub struct CsvExporter;

impl CsvExporter {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or line breaks.
    fn escape_field(value: &str) -> String {
        if value.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }

    /// Write one row per record, prefixed with the lockfile column when
    /// several lockfiles share the document.
    fn write_rows<W: Write>(
        data: &ExportData,
        writer: &mut W,
        with_lockfile: bool,
    ) -> io::Result<()> {
        let multiple = data.multiple_versions();
        let multiple_packages: HashSet<&str> = multiple
            .iter()
            .map(|m| m.package_name.as_str())
            .collect();

        for dep in &data.dependencies {
            if with_lockfile {
                write!(writer, "{},", Self::escape_field(&data.lockfile))?;
            }
            writeln!(
                writer,
                "{},{},{}",
                Self::escape_field(&dep.name),
                Self::escape_field(dep.version_str()),
                multiple_packages.contains(dep.name.as_str())
            )?;
        }

        Ok(())
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "name,version,multiple_versions")?;
        Self::write_rows(data, writer, false)
    }

    fn export_all<W: Write>(&self, reports: &[ExportData], writer: &mut W) -> io::Result<()> {
        writeln!(writer, "lockfile,name,version,multiple_versions")?;
        for data in reports {
            Self::write_rows(data, writer, true)?;
        }
        Ok(())
    }
}
