//! Markdown export implementation.
//!
//! Exports lockfile inventories in Markdown format for documentation and reporting.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let multiple = data.multiple_versions();

        // Title
        writeln!(writer, "# Dependency Inventory")?;
        writeln!(writer)?;
        writeln!(writer, "**Lockfile:** `{}`", data.lockfile)?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(
            writer,
            "| Total Dependencies | {} |",
            data.dependencies.len()
        )?;
        writeln!(
            writer,
            "| Unique Packages | {} |",
            data.unique_package_count()
        )?;
        writeln!(
            writer,
            "| Packages With Multiple Versions | {} |",
            multiple.len()
        )?;
        writeln!(
            writer,
            "| Missing Versions | {} |",
            data.missing_version_count()
        )?;
        writeln!(writer)?;

        writeln!(writer, "## Dependencies")?;
        writeln!(writer)?;

        if data.dependencies.is_empty() {
            writeln!(writer, "*No dependencies found.*")?;
            writeln!(writer)?;
        } else {
            writeln!(writer, "| Package | Version |")?;
            writeln!(writer, "|---------|---------|")?;
            for dep in &data.dependencies {
                let version = dep.version.as_deref().unwrap_or("-");
                writeln!(writer, "| {} | {} |", dep.name, version)?;
            }
            writeln!(writer)?;
        }

        if !multiple.is_empty() {
            writeln!(writer, "## Multiple Versions")?;
            writeln!(writer)?;
            writeln!(
                writer,
                "The following packages are resolved at more than one version:"
            )?;
            writeln!(writer)?;
            for entry in &multiple {
                writeln!(
                    writer,
                    "- **{}**: {}",
                    entry.package_name,
                    entry.versions.join(", ")
                )?;
            }
            writeln!(writer)?;
        }

        // Footer
        writeln!(writer, "---")?;
        writeln!(writer, "*Generated by lockscope*")?;

        Ok(())
    }
}
