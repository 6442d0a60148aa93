use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

const BUNDLED_LICENSES: &str = include_str!("bundled.csv");
const LICENSE_COLUMN: &str = "license_name";

/// License names (as GitHub reports them) accepted as open source.
#[derive(Debug, Clone)]
pub struct LicenseSet {
    names: HashSet<String>,
}

#[derive(Deserialize)]
struct LicenseRow {
    license_name: String,
}

impl LicenseSet {
    /// The reference list compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_reader(BUNDLED_LICENSES.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::Config(format!(
                "Unable to open license list {}: {}",
                path.display(),
                e
            ))
        })?;
        let set = Self::from_reader(file)?;
        tracing::debug!("Loaded {} licenses from {}", set.len(), path.display());
        Ok(set)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| Error::Config(format!("Unreadable license list: {}", e)))?;
        if !headers.iter().any(|h| h.trim() == LICENSE_COLUMN) {
            return Err(Error::Config(format!(
                "License list has no {} column",
                LICENSE_COLUMN
            )));
        }

        let mut names = HashSet::new();
        for row in reader.deserialize::<LicenseRow>() {
            let row = row.map_err(|e| Error::Config(format!("Corrupt license list: {}", e)))?;
            let name = row.license_name.trim();
            if !name.is_empty() {
                names.insert(name.to_string());
            }
        }

        if names.is_empty() {
            return Err(Error::Config("License list is empty".to_string()));
        }

        Ok(Self { names })
    }

    pub fn contains(&self, license_name: &str) -> bool {
        self.names.contains(license_name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for LicenseSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_list() {
        let licenses = LicenseSet::bundled().unwrap();
        assert!(licenses.contains("MIT License"));
        assert!(licenses.contains("Apache License 2.0"));
        assert!(licenses.contains(r#"BSD 3-Clause "New" or "Revised" License"#));
        assert!(licenses.contains("Mulan Permissive Software License, Version 2"));
        assert!(!licenses.contains("Other"));
        assert!(!licenses.contains("mit license"));
    }

    #[test]
    fn test_extra_columns_and_blank_names() {
        let csv = "id,license_name,osi\n1,MIT,yes\n2,  ,no\n3, ISC ,yes\n";
        let licenses = LicenseSet::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(licenses.len(), 2);
        assert!(licenses.contains("MIT"));
        assert!(licenses.contains("ISC"));
    }

    #[test]
    fn test_missing_column_is_config_error() {
        let err = LicenseSet::from_reader("name\nMIT\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_empty_list_is_config_error() {
        let err = LicenseSet::from_reader("license_name\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = LicenseSet::from_path("/no/such/all_licenses.csv").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
