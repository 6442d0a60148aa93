use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::ContributionTable;

#[derive(Serialize)]
struct CsvRow<'a> {
    person: &'a str,
    open_source_repos: &'a str,
    contribution_to_repo: u64,
}

/// The user's downloads directory, or `~/Downloads` when the platform does
/// not define one.
pub fn default_output_dir() -> Result<PathBuf> {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .ok_or_else(|| Error::Config("Unable to locate a downloads directory".to_string()))
}

pub fn export_path(dir: &Path, organization: &str) -> PathBuf {
    dir.join(format!("{}.csv", organization))
}

/// Writes the table as CSV with a header row and no index column.
pub fn write_table<W: Write>(table: &ContributionTable, writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // Written explicitly so an empty table still gets a header.
    writer.write_record(["person", "open_source_repos", "contribution_to_repo"])?;
    for record in table {
        writer.serialize(CsvRow {
            person: &record.person,
            open_source_repos: &record.repository,
            contribution_to_repo: record.contributions,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `{organization}.csv` into `dir`, replacing any existing file, and
/// returns the path written.
pub fn export_csv(table: &ContributionTable, organization: &str, dir: &Path) -> Result<PathBuf> {
    let path = export_path(dir, organization);

    let mut buffer = Vec::new();
    write_table(table, &mut buffer)?;

    fs::write(&path, buffer).map_err(|source| Error::Export {
        path: path.clone(),
        source,
    })?;

    tracing::info!("Exported {} records to {}", table.len(), path.display());
    Ok(path)
}
